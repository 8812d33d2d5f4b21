//! Engine configuration.
//!
//! Settings that must agree between both ends of an exchange (the point alphabet)
//! and local tuning (the square-root attempt cap). Loaded from TOML; every field
//! has a default so an empty file is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sm2_kex_encoding::{Alphabet, AlphabetError, SAFE_ALPHABET};

use crate::math::DEFAULT_SQRT_MAX_ATTEMPTS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config: failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config: invalid point_alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("config: sqrt_max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Key agreement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KexConfig {
    /// 85-symbol alphabet used for encoded public keys
    #[serde(default = "default_point_alphabet")]
    pub point_alphabet: String,

    /// Lucas candidates tried before a `p ≡ 1 (mod 8)` square root gives up
    #[serde(default = "default_sqrt_max_attempts")]
    pub sqrt_max_attempts: u32,
}

fn default_point_alphabet() -> String {
    SAFE_ALPHABET.to_string()
}

fn default_sqrt_max_attempts() -> u32 {
    DEFAULT_SQRT_MAX_ATTEMPTS
}

impl Default for KexConfig {
    fn default() -> Self {
        Self {
            point_alphabet: default_point_alphabet(),
            sqrt_max_attempts: default_sqrt_max_attempts(),
        }
    }
}

impl KexConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: KexConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: "sm2_kex",
            path = %path.display(),
            sqrt_max_attempts = config.sqrt_max_attempts,
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sqrt_max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        self.alphabet().map(|_| ())
    }

    /// The point alphabet, validated.
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        Ok(Alphabet::new(&self.point_alphabet)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = KexConfig::default();
        assert_eq!(config.point_alphabet, SAFE_ALPHABET);
        assert_eq!(config.sqrt_max_attempts, 128);
        assert!(config.validate().is_ok());
        assert_eq!(config.alphabet().expect("alphabet"), *Alphabet::safe());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = KexConfig::from_toml_str("").expect("empty document is valid");
        assert_eq!(config, KexConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let reversed: String = SAFE_ALPHABET.chars().rev().collect();
        let content = format!("point_alphabet = '{reversed}'\nsqrt_max_attempts = 16\n");
        let config = KexConfig::from_toml_str(&content).expect("valid config");
        assert_eq!(config.point_alphabet, reversed);
        assert_eq!(config.sqrt_max_attempts, 16);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            KexConfig::from_toml_str("sqrt_max_attempts = 0"),
            Err(ConfigError::ZeroAttempts)
        ));
        assert!(matches!(
            KexConfig::from_toml_str("point_alphabet = 'abc'"),
            Err(ConfigError::Alphabet(AlphabetError::InvalidSize(3)))
        ));
        assert!(matches!(
            KexConfig::from_toml_str("sqrt_max_attempts = 'many'"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sqrt_max_attempts = 32").expect("write");

        let config = KexConfig::load(file.path()).expect("load");
        assert_eq!(config.sqrt_max_attempts, 32);
        assert_eq!(config.point_alphabet, SAFE_ALPHABET);

        let missing = file.path().with_extension("missing");
        assert!(matches!(KexConfig::load(missing), Err(ConfigError::Io { .. })));
    }
}
