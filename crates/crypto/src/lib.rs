//! Prime-field arithmetic, the short Weierstrass group and SM2-flavoured key agreement.
//!
//! - [`math`] - modular exponentiation, inverse, Lucas sequences and square roots
//! - [`curve`] - affine point arithmetic with a tagged identity
//! - [`params`] - domain parameters and the shared SM2 instance
//! - [`kex`] - key pairs, point encoding and the shared secret exchange
//! - [`transport`] - sealing text payloads with a caller-supplied cipher
//!
//! ```no_run
//! use sm2_kex_crypto::KeyExchange;
//!
//! let alice = KeyExchange::new()?;
//! let bob = KeyExchange::new()?;
//!
//! let a = alice.key_exchange(&bob.public_key()?)?;
//! let b = bob.key_exchange(&alice.public_key()?)?;
//! assert_eq!(a, b);
//! # Ok::<(), sm2_kex_crypto::Error>(())
//! ```

pub mod config;
pub mod curve;
pub mod error;
pub mod kex;
pub mod math;
pub mod params;
pub mod secret;
pub mod transport;

pub use config::{ConfigError, KexConfig};
pub use curve::{Curve, Point};
pub use error::{Error, MathError, MathResult, Result, SqrtCase};
pub use kex::{decode_point, encode_point, KeyExchange};
pub use math::{lucas_uv, mod_inv, mod_pow, mod_sqrt, mod_sqrt_with, DEFAULT_SQRT_MAX_ATTEMPTS};
pub use params::DomainParams;
pub use secret::{derive_shared_secret, SharedSecret, SECRET_SIZE};
pub use transport::{open, seal, SymmetricCipher};
