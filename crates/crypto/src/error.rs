//! Error types for the key agreement engine.

use std::fmt;

use sm2_kex_encoding::{Base85Error, Utf8Error};

use crate::config::ConfigError;

/// Residue class of the modulus, which selects the square-root algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqrtCase {
    /// `p ≡ 3 (mod 4)`, one exponentiation.
    ThreeModFour,
    /// `p ≡ 5 (mod 8)`, Atkin-style two-branch formula.
    FiveModEight,
    /// `p ≡ 1 (mod 8)`, probabilistic Lucas-sequence search.
    OneModEight,
}

impl fmt::Display for SqrtCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqrtCase::ThreeModFour => f.write_str("p ≡ 3 (mod 4)"),
            SqrtCase::FiveModEight => f.write_str("p ≡ 5 (mod 8)"),
            SqrtCase::OneModEight => f.write_str("p ≡ 1 (mod 8)"),
        }
    }
}

/// Failures of the modular kernel and the curve group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("math: singular curve, 4a^3 + 27b^2 ≡ 0 (mod p)")]
    SingularCurve,

    #[error("math: {op} requires an odd prime modulus")]
    UnsupportedModulus { op: &'static str },

    #[error("math: {op}: value is not invertible modulo p")]
    NotInvertible { op: &'static str },

    #[error("math: mod_sqrt: no square root exists ({case})")]
    NoSquareRoot { case: SqrtCase },

    #[error("math: mod_sqrt: gave up after {attempts} lucas candidates (p ≡ 1 (mod 8))")]
    RetryLimitExceeded { attempts: u32 },

    #[error("math: point is not on the curve")]
    PointNotOnCurve,
}

pub type MathResult<T> = std::result::Result<T, MathError>;

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Base85(#[from] Base85Error),

    #[error(transparent)]
    Utf8(#[from] Utf8Error),

    #[error("point: invalid parity byte {0:#04x}, expected 0x02 or 0x03")]
    InvalidParity(u8),

    #[error("point: encoded point is empty")]
    EmptyPoint,

    #[error("key: invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("key: point at infinity has no encoding")]
    IdentityPoint,

    #[error("cipher: {0}")]
    Cipher(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
