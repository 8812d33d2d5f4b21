use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for sm2-kex
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sm2-kex",
    version = env!("CARGO_PKG_VERSION"),
    about = "SM2 key agreement and base85 payload tool",
    long_about = "sm2-kex generates SM2 key pairs, derives encoded public keys, runs the key exchange against a peer's public key, and converts text payloads to and from base85."
)]
pub struct CliArgs {
    /// Specifies the TOML config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// The verbose log level
    #[arg(long = "verbose", value_enum, default_value = "info", global = true)]
    pub verbose: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a fresh key pair
    Keygen,

    /// Print the encoded public key of a private key
    PublicKey {
        /// Private key in hex
        #[arg(long = "private", value_name = "HEX")]
        private: String,
    },

    /// Derive the shared secret with a peer
    Exchange {
        /// Own private key in hex
        #[arg(long = "private", value_name = "HEX")]
        private: String,

        /// The peer's encoded public key
        #[arg(long = "peer", value_name = "ENCODED")]
        peer: String,
    },

    /// Encode text as base85
    Encode {
        #[arg(long = "variant", value_enum, default_value = "safe")]
        variant: Variant,

        /// Text to encode
        text: String,
    },

    /// Decode base85 back to text
    Decode {
        #[arg(long = "variant", value_enum, default_value = "safe")]
        variant: Variant,

        /// Base85 to decode
        text: String,
    },
}

/// Base85 flavour
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The configured point alphabet
    Safe,
    /// Digits offset from '!'
    Ascii85,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["sm2-kex", "keygen"]);
        assert_eq!(args.verbose, LogLevel::Info);
        assert_eq!(args.config, None);
        assert_eq!(args.command, Command::Keygen);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CliArgs::parse_from([
            "sm2-kex",
            "public-key",
            "--private",
            "01",
            "--config",
            "kex.toml",
            "--verbose",
            "debug",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("kex.toml")));
        assert_eq!(args.verbose, LogLevel::Debug);
        assert_eq!(
            args.command,
            Command::PublicKey {
                private: "01".to_string()
            }
        );
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
