use std::io::Write;

use anyhow::{Context, Result};
use rand::rngs::OsRng;
use sm2_kex_crypto::{DomainParams, KexConfig, KeyExchange};
use sm2_kex_encoding::{decode_utf8, encode_utf8, FromBase85, ToBase85};

use crate::args::{CliArgs, Command, Variant};

/// Loads the config named on the command line, or the defaults.
pub fn load_config(args: &CliArgs) -> Result<KexConfig> {
    match &args.config {
        Some(path) => KexConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(KexConfig::default()),
    }
}

/// Runs one subcommand, writing its result to `out`.
pub fn run<W: Write>(args: &CliArgs, out: &mut W) -> Result<()> {
    let config = load_config(args)?;

    match &args.command {
        Command::Keygen => {
            let kex = KeyExchange::generate(DomainParams::sm2(), &config, &mut OsRng)?;
            writeln!(out, "private: {}", kex.private_key_hex())?;
            writeln!(out, "public:  {}", kex.public_key()?)?;
        }
        Command::PublicKey { private } => {
            let kex = from_private(&config, private)?;
            writeln!(out, "{}", kex.public_key()?)?;
        }
        Command::Exchange { private, peer } => {
            let kex = from_private(&config, private)?;
            let secret = kex
                .key_exchange(peer.trim())
                .context("key exchange with peer failed")?;
            tracing::info!(target: "sm2_kex", "shared secret derived");
            writeln!(out, "{}", hex::encode(secret.as_bytes()))?;
        }
        Command::Encode { variant, text } => {
            let bytes = encode_utf8(text);
            let encoded = match variant {
                Variant::Safe => bytes.to_base85_with(&config.alphabet()?),
                Variant::Ascii85 => bytes.to_ascii85(),
            };
            writeln!(out, "{encoded}")?;
        }
        Command::Decode { variant, text } => {
            let bytes = match variant {
                Variant::Safe => Vec::from_base85_with(text.trim(), &config.alphabet()?)?,
                Variant::Ascii85 => Vec::from_ascii85(text.trim())?,
            };
            writeln!(out, "{}", decode_utf8(&bytes)?)?;
        }
    }

    Ok(())
}

fn from_private(config: &KexConfig, private: &str) -> Result<KeyExchange> {
    KeyExchange::from_private_key_hex(DomainParams::sm2(), config, private)
        .context("invalid --private key")
}
