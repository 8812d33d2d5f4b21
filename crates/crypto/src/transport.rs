//! Text payloads over an established session.
//!
//! `seal` turns text into a printable frame: UTF-8 bytes, encrypted with the session
//! secret, then the ASCII85 variant of the base85 codec. `open` reverses it. The
//! cipher itself is supplied by the caller.

use sm2_kex_encoding::{decode_utf8, encode_utf8, FromBase85, ToBase85};

use crate::error::{Error, Result};
use crate::secret::{SharedSecret, SECRET_SIZE};

/// A symmetric cipher keyed by the 16-byte session secret.
pub trait SymmetricCipher {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encrypt(
        &self,
        key: &[u8; SECRET_SIZE],
        plaintext: &[u8],
    ) -> std::result::Result<Vec<u8>, Self::Error>;

    fn decrypt(
        &self,
        key: &[u8; SECRET_SIZE],
        ciphertext: &[u8],
    ) -> std::result::Result<Vec<u8>, Self::Error>;
}

pub fn seal<C: SymmetricCipher + ?Sized>(
    cipher: &C,
    secret: &SharedSecret,
    text: &str,
) -> Result<String> {
    let sealed = cipher
        .encrypt(secret.as_bytes(), &encode_utf8(text))
        .map_err(|err| Error::Cipher(Box::new(err)))?;
    Ok(sealed.to_ascii85())
}

pub fn open<C: SymmetricCipher + ?Sized>(
    cipher: &C,
    secret: &SharedSecret,
    frame: &str,
) -> Result<String> {
    let sealed = Vec::from_ascii85(frame)?;
    let plain = cipher
        .decrypt(secret.as_bytes(), &sealed)
        .map_err(|err| Error::Cipher(Box::new(err)))?;
    Ok(decode_utf8(&plain)?)
}
