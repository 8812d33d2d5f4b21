use anyhow::Result;
use clap::Parser;
use sm2_kex_cli::{run, CliArgs};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose.into());

    tracing::debug!(target: "sm2_kex", config = ?args.config, "sm2-kex starting");
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

fn init_tracing(level: tracing::Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
