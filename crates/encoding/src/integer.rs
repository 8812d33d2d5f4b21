//! Big-endian integer codec.
//!
//! Coordinates cross the point/byte boundary through these two functions. The byte
//! form is minimal: no fixed width, no sign byte. An odd number of hex digits is
//! completed with a single leading zero nibble, so the output is always whole bytes.

use num_bigint::BigUint;

/// Interprets `bytes` as an unsigned big-endian integer. An empty slice is zero.
#[inline]
pub fn bytes_to_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes `n` as minimal-length big-endian bytes.
///
/// Zero encodes as a single `0x00` byte. Leading zero bytes are never emitted for
/// non-zero values, so a 256-bit coordinate whose top byte is zero comes out as 31
/// bytes. The point codec and the shared-secret fold both depend on this.
#[inline]
pub fn integer_to_bytes(n: &BigUint) -> Vec<u8> {
    n.to_bytes_be()
}
