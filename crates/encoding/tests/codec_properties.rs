//! Property-based tests for sm2-kex-encoding
//!
//! These tests use proptest to verify the round-trip laws of every codec:
//! - base85 (safe alphabet and ASCII85-style) decode(encode(x)) == x
//! - integer bytes_to_integer(integer_to_bytes(n)) == n
//! - UTF-8 decode(encode(s)) == s, and agreement with the standard library

use num_bigint::BigUint;
use proptest::prelude::*;
use sm2_kex_encoding::{
    bytes_to_integer, decode_utf8, encode_utf8, integer_to_bytes, FromBase85, ToBase85,
};

proptest! {
    // =========================================================================
    // Base85
    // =========================================================================

    #[test]
    fn test_base85_safe_roundtrip(data in any::<Vec<u8>>()) {
        let encoded = data.to_base85();
        prop_assert_eq!(encoded.len() % 5, 0);

        let decoded = Vec::from_base85(&encoded).unwrap();
        prop_assert_eq!(data, decoded);
    }

    #[test]
    fn test_ascii85_roundtrip(data in any::<Vec<u8>>()) {
        let encoded = data.to_ascii85();
        prop_assert!(encoded.bytes().all(|b| (33..=117).contains(&b)));

        let decoded = Vec::from_ascii85(&encoded).unwrap();
        prop_assert_eq!(data, decoded);
    }

    #[test]
    fn test_truncated_base85_is_rejected(data in any::<Vec<u8>>(), cut in 1usize..5) {
        let encoded = data.to_base85();
        let truncated = &encoded[..encoded.len() - cut];
        prop_assert!(Vec::from_base85(truncated).is_err());
    }

    // =========================================================================
    // Integer codec
    // =========================================================================

    #[test]
    fn test_integer_roundtrip(digits in any::<Vec<u32>>()) {
        let n = BigUint::new(digits);
        let bytes = integer_to_bytes(&n);
        prop_assert_eq!(bytes_to_integer(&bytes), n.clone());
        prop_assert!(bytes.len() == 1 || bytes[0] != 0);
    }

    // =========================================================================
    // UTF-8
    // =========================================================================

    #[test]
    fn test_utf8_roundtrip(text in any::<String>()) {
        let encoded = encode_utf8(&text);
        prop_assert_eq!(encoded.as_slice(), text.as_bytes());
        prop_assert_eq!(decode_utf8(&encoded).unwrap(), text);
    }

    #[test]
    fn test_utf8_decode_agrees_with_std(bytes in any::<Vec<u8>>()) {
        let ours = decode_utf8(&bytes).ok();
        let std = String::from_utf8(bytes).ok();
        prop_assert_eq!(ours, std);
    }
}
