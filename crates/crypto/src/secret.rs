//! The 16-byte session secret and the XOR fold that derives it.

use std::fmt::{self, Debug, Formatter};

use sm2_kex_encoding::integer_to_bytes;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::Point;
use crate::error::{Error, Result};

pub const SECRET_SIZE: usize = 16;

/// Key handed to the symmetric cipher. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SECRET_SIZE]);

impl SharedSecret {
    #[inline]
    pub fn new(bytes: [u8; SECRET_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSecret").field(&"***").finish()
    }
}

/// Folds the shared point into 16 bytes:
/// `secret[i] = x[2i] ^ y[2i] ^ x[2i+1] ^ y[2i+1]`.
///
/// `x` and `y` are the minimal big-endian encodings of the coordinates, so a
/// coordinate with a leading zero byte is one byte shorter and shifts the fold.
/// Positions past the end of a short coordinate count as zero. This is the wire
/// behaviour of existing peers and must not be replaced by a real KDF in place.
pub fn derive_shared_secret(point: &Point) -> Result<SharedSecret> {
    let (x, y) = match point {
        Point::Infinity => return Err(Error::IdentityPoint),
        Point::Affine { x, y } => (integer_to_bytes(x), integer_to_bytes(y)),
    };

    let at = |bytes: &[u8], i: usize| bytes.get(i).copied().unwrap_or(0);
    let mut secret = [0u8; SECRET_SIZE];
    for (i, byte) in secret.iter_mut().enumerate() {
        *byte = (at(&x, 2 * i) ^ at(&y, 2 * i)) ^ (at(&x, 2 * i + 1) ^ at(&y, 2 * i + 1));
    }

    Ok(SharedSecret(secret))
}
