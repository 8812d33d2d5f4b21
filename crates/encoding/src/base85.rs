//! Padded base85 codec.
//!
//! Two variants share one algorithm and differ only in how a digit `0..85` maps to a
//! symbol: a lookup table ([`Alphabet`], the "safe" alphabet by default) or the
//! ASCII85-style offset `digit + 33`.
//!
//! The input is always padded before encoding. With `k = 4 - len % 4` the encoder
//! appends `k` bytes of value `k`, which means an input whose length is already a
//! multiple of four still gets a full block of four `0x04` bytes. The decoder reads
//! `k` back from the last decoded byte and strips that many bytes. Every 4-byte
//! big-endian word becomes 5 symbols, most significant digit first.

use std::fmt::{self, Debug, Formatter};

use once_cell::sync::Lazy;

/// Symbols of the safe alphabet. No quotes, backslash, comma or whitespace, so encoded
/// values can be embedded in JSON strings and shell arguments as-is.
pub const SAFE_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

const RADIX: u32 = 85;
const SYMBOLS_PER_WORD: usize = 5;
const BYTES_PER_WORD: usize = 4;
const ASCII85_OFFSET: u8 = 33;
const NO_DIGIT: u8 = 0xFF;

static SAFE: Lazy<Alphabet> =
    Lazy::new(|| Alphabet::new(SAFE_ALPHABET).expect("safe alphabet is a valid base85 alphabet"));

#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum AlphabetError {
    #[error("base85: alphabet must have 85 symbols, got {0}")]
    InvalidSize(usize),

    #[error("base85: alphabet symbol '{0}' is not ascii")]
    NonAscii(char),

    #[error("base85: alphabet symbol '{0}' appears more than once")]
    Duplicate(char),
}

/// Decoding failures. Lengths and offsets count bytes of the input, not characters,
/// so a multi-byte character advances them by its UTF-8 width.
#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum Base85Error {
    /// Input byte length is zero or not a multiple of 5
    #[error("base85: input length {0} is not a multiple of 5")]
    InvalidLength(usize),

    /// The offending character and the byte offset where it starts
    #[error("base85: invalid character '{0}' at offset {1}")]
    InvalidChar(char, usize),

    /// Byte offset of the 5-symbol group above `u32::MAX`
    #[error("base85: group at offset {0} overflows 32 bits")]
    Overflow(usize),

    #[error("base85: invalid padding count {0}")]
    InvalidPadding(u8),
}

/// A validated 85-symbol alphabet with its reverse lookup table.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: String,
    encode: [u8; RADIX as usize],
    decode: [u8; 128],
}

impl Alphabet {
    /// Builds an alphabet from exactly 85 distinct ASCII characters.
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let count = symbols.chars().count();
        if count != RADIX as usize {
            return Err(AlphabetError::InvalidSize(count));
        }

        let mut encode = [0u8; RADIX as usize];
        let mut decode = [NO_DIGIT; 128];
        for (digit, ch) in symbols.chars().enumerate() {
            if !ch.is_ascii() {
                return Err(AlphabetError::NonAscii(ch));
            }

            let byte = ch as u8;
            if decode[byte as usize] != NO_DIGIT {
                return Err(AlphabetError::Duplicate(ch));
            }

            encode[digit] = byte;
            decode[byte as usize] = digit as u8;
        }

        Ok(Self {
            symbols: symbols.to_string(),
            encode,
            decode,
        })
    }

    /// The shared "safe" alphabet.
    #[inline]
    pub fn safe() -> &'static Alphabet {
        &SAFE
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::safe().clone()
    }
}

impl Debug for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.symbols).finish()
    }
}

/// Digit/symbol mapping used by one encode or decode pass.
#[derive(Clone, Copy)]
enum Symbols<'a> {
    Table(&'a Alphabet),
    Ascii85,
}

impl Symbols<'_> {
    #[inline]
    fn symbol(self, digit: u8) -> char {
        match self {
            Symbols::Table(alphabet) => alphabet.encode[digit as usize] as char,
            Symbols::Ascii85 => (digit + ASCII85_OFFSET) as char,
        }
    }

    #[inline]
    fn digit(self, symbol: u8) -> Option<u8> {
        match self {
            Symbols::Table(alphabet) => alphabet
                .decode
                .get(symbol as usize)
                .copied()
                .filter(|&digit| digit != NO_DIGIT),
            Symbols::Ascii85 => symbol
                .checked_sub(ASCII85_OFFSET)
                .filter(|&digit| (digit as u32) < RADIX),
        }
    }
}

fn encode(data: &[u8], symbols: Symbols<'_>) -> String {
    let pad = BYTES_PER_WORD - data.len() % BYTES_PER_WORD;
    let mut buf = Vec::with_capacity(data.len() + pad);
    buf.extend_from_slice(data);
    buf.resize(data.len() + pad, pad as u8);

    let mut out = String::with_capacity(buf.len() / BYTES_PER_WORD * SYMBOLS_PER_WORD);
    for chunk in buf.chunks_exact(BYTES_PER_WORD) {
        let mut word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let mut digits = [0u8; SYMBOLS_PER_WORD];
        for digit in digits.iter_mut().rev() {
            *digit = (word % RADIX) as u8;
            word /= RADIX;
        }

        digits.iter().for_each(|&digit| out.push(symbols.symbol(digit)));
    }

    out
}

/// The character starting at byte `offset`, or U+FFFD when `src` is not UTF-8 there.
fn char_at(src: &[u8], offset: usize) -> char {
    let rest = &src[offset..];
    let width = match rest[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };

    std::str::from_utf8(&rest[..width.min(rest.len())])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn decode(src: &[u8], symbols: Symbols<'_>) -> Result<Vec<u8>, Base85Error> {
    if src.is_empty() || src.len() % SYMBOLS_PER_WORD != 0 {
        return Err(Base85Error::InvalidLength(src.len()));
    }

    let mut out = Vec::with_capacity(src.len() / SYMBOLS_PER_WORD * BYTES_PER_WORD);
    for (group, chunk) in src.chunks_exact(SYMBOLS_PER_WORD).enumerate() {
        let start = group * SYMBOLS_PER_WORD;
        let mut acc = 0u64;
        for (offset, &symbol) in chunk.iter().enumerate() {
            let digit = symbols.digit(symbol).ok_or_else(|| {
                Base85Error::InvalidChar(char_at(src, start + offset), start + offset)
            })?;
            acc = acc * RADIX as u64 + digit as u64;
        }

        let word = u32::try_from(acc).map_err(|_| Base85Error::Overflow(start))?;
        out.extend_from_slice(&word.to_be_bytes());
    }

    // `out` is non-empty: `src` held at least one group.
    let pad = out[out.len() - 1];
    if !(1..=BYTES_PER_WORD as u8).contains(&pad) {
        return Err(Base85Error::InvalidPadding(pad));
    }

    out.truncate(out.len() - pad as usize);
    Ok(out)
}

pub trait ToBase85 {
    /// Encodes with the safe alphabet.
    fn to_base85(&self) -> String;

    fn to_base85_with(&self, alphabet: &Alphabet) -> String;

    /// Encodes with the ASCII85-style `digit + 33` mapping.
    fn to_ascii85(&self) -> String;
}

impl<T: AsRef<[u8]>> ToBase85 for T {
    #[inline]
    fn to_base85(&self) -> String {
        encode(self.as_ref(), Symbols::Table(Alphabet::safe()))
    }

    #[inline]
    fn to_base85_with(&self, alphabet: &Alphabet) -> String {
        encode(self.as_ref(), Symbols::Table(alphabet))
    }

    #[inline]
    fn to_ascii85(&self) -> String {
        encode(self.as_ref(), Symbols::Ascii85)
    }
}

pub trait FromBase85: Sized {
    type Error;

    fn from_base85<T: AsRef<[u8]>>(src: T) -> Result<Self, Self::Error>;

    fn from_base85_with<T: AsRef<[u8]>>(src: T, alphabet: &Alphabet) -> Result<Self, Self::Error>;

    fn from_ascii85<T: AsRef<[u8]>>(src: T) -> Result<Self, Self::Error>;
}

impl FromBase85 for Vec<u8> {
    type Error = Base85Error;

    #[inline]
    fn from_base85<T: AsRef<[u8]>>(src: T) -> Result<Vec<u8>, Self::Error> {
        decode(src.as_ref(), Symbols::Table(Alphabet::safe()))
    }

    #[inline]
    fn from_base85_with<T: AsRef<[u8]>>(
        src: T,
        alphabet: &Alphabet,
    ) -> Result<Vec<u8>, Self::Error> {
        decode(src.as_ref(), Symbols::Table(alphabet))
    }

    #[inline]
    fn from_ascii85<T: AsRef<[u8]>>(src: T) -> Result<Vec<u8>, Self::Error> {
        decode(src.as_ref(), Symbols::Ascii85)
    }
}
