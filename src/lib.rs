//! # sm2-kex: SM2-flavoured key agreement in Rust
//!
//! Elliptic-curve Diffie-Hellman over the SM2 recommended curve, with the byte and
//! text codecs that make keys and payloads transportable as printable strings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sm2_kex::prelude::*;
//!
//! fn main() -> Result<(), Error> {
//!     let alice = KeyExchange::new()?;
//!     let bob = KeyExchange::new()?;
//!
//!     // public keys travel as base85 text
//!     let secret = alice.key_exchange(&bob.public_key()?)?;
//!     assert_eq!(secret, bob.key_exchange(&alice.public_key()?)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`encoding`] - big-integer bytes, base85 and UTF-8 codecs
//! - [`crypto`] - modular arithmetic, the curve group, key agreement and payload sealing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use sm2_kex_crypto as crypto;
pub use sm2_kex_encoding as encoding;

/// Common imports for key agreement
pub mod prelude {
    pub use crate::crypto::{
        open, seal, DomainParams, Error, KexConfig, KeyExchange, Point, SharedSecret,
        SymmetricCipher,
    };
    pub use crate::encoding::{Alphabet, FromBase85, ToBase85};
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
