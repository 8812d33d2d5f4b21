//! UTF-8 codec used to prepare text payloads before they are encrypted and encoded.
//!
//! Encoding walks the input by Unicode scalar value, never by UTF-16 unit, so
//! characters outside the basic multilingual plane come out as one 4-byte sequence.

#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum Utf8Error {
    #[error("utf8: invalid lead byte {0:#04x} at offset {1}")]
    InvalidLeadByte(u8, usize),

    #[error("utf8: truncated sequence at offset {0}")]
    Truncated(usize),

    #[error("utf8: invalid continuation byte {0:#04x} at offset {1}")]
    InvalidContinuation(u8, usize),

    #[error("utf8: invalid code point {0:#x} at offset {1}")]
    InvalidCodePoint(u32, usize),
}

/// Encodes `text` one code point at a time.
pub fn encode_utf8(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let c = ch as u32;
        match c {
            0..=0x7F => out.push(c as u8),
            0x80..=0x7FF => {
                out.push(0xC0 | (c >> 6) as u8);
                out.push(0x80 | (c & 0x3F) as u8);
            }
            0x800..=0xFFFF => {
                out.push(0xE0 | (c >> 12) as u8);
                out.push(0x80 | ((c >> 6) & 0x3F) as u8);
                out.push(0x80 | (c & 0x3F) as u8);
            }
            _ => {
                out.push(0xF0 | (c >> 18) as u8);
                out.push(0x80 | ((c >> 12) & 0x3F) as u8);
                out.push(0x80 | ((c >> 6) & 0x3F) as u8);
                out.push(0x80 | (c & 0x3F) as u8);
            }
        }
    }

    out
}

/// Decodes `bytes`, reading one code point per lead byte.
///
/// Overlong forms, surrogates and values above `0x10FFFF` are rejected rather than
/// turned into replacement characters.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, Utf8Error> {
    let mut out = String::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let lead = bytes[pos];
        let (len, initial, min) = match lead {
            0x00..=0x7F => (1, lead as u32, 0),
            0xC0..=0xDF => (2, (lead & 0x1F) as u32, 0x80),
            0xE0..=0xEF => (3, (lead & 0x0F) as u32, 0x800),
            0xF0..=0xF7 => (4, (lead & 0x07) as u32, 0x1_0000),
            _ => return Err(Utf8Error::InvalidLeadByte(lead, pos)),
        };

        if pos + len > bytes.len() {
            return Err(Utf8Error::Truncated(pos));
        }

        let mut c = initial;
        for (i, &byte) in bytes[pos + 1..pos + len].iter().enumerate() {
            if byte & 0xC0 != 0x80 {
                return Err(Utf8Error::InvalidContinuation(byte, pos + 1 + i));
            }
            c = (c << 6) | (byte & 0x3F) as u32;
        }

        if c < min {
            return Err(Utf8Error::InvalidCodePoint(c, pos));
        }

        let ch = char::from_u32(c).ok_or(Utf8Error::InvalidCodePoint(c, pos))?;
        out.push(ch);
        pos += len;
    }

    Ok(out)
}
