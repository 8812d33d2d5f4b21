//! Text and byte codecs for SM2 key agreement.
//!
//! This crate provides the byte-level plumbing the key agreement engine needs to
//! move curve coordinates and payloads around as printable strings:
//!
//! - [`integer`] - big-endian conversion between byte buffers and [`BigUint`]
//! - [`base85`] - the padded base85 codec, with the "safe" alphabet and an ASCII85-style variant
//! - [`utf8`] - code-point oriented UTF-8 encoding and decoding
//!
//! [`BigUint`]: num_bigint::BigUint

pub mod base85;
pub mod integer;
pub mod utf8;

pub use base85::{Alphabet, AlphabetError, Base85Error, FromBase85, ToBase85, SAFE_ALPHABET};
pub use integer::{bytes_to_integer, integer_to_bytes};
pub use utf8::{decode_utf8, encode_utf8, Utf8Error};
