//! End-to-end key agreement tests over the SM2 parameters.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sm2_kex_crypto::{
    derive_shared_secret, DomainParams, Error, KexConfig, KeyExchange, MathError, Point,
};
use sm2_kex_encoding::{Alphabet, ToBase85, SAFE_ALPHABET};

fn seeded(seed: u64) -> KeyExchange {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    KeyExchange::generate(DomainParams::sm2(), &KexConfig::default(), &mut rng)
        .expect("key generation should be ok")
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let a = seeded(7);
    let b = seeded(7);
    let c = seeded(8);

    assert_eq!(a.private_key_hex(), b.private_key_hex());
    assert_eq!(a.public_point(), b.public_point());
    assert_ne!(a.private_key_hex(), c.private_key_hex());
}

#[test]
fn test_generated_keys_are_valid() {
    for seed in 0..4 {
        let kex = seeded(seed);
        let params = kex.params();
        assert!(params.curve().contains(kex.public_point()));
        assert!(!kex.public_point().is_identity());

        // the hex form reloads into the same key pair
        let reloaded = KeyExchange::from_private_key_hex(
            DomainParams::sm2(),
            &KexConfig::default(),
            &kex.private_key_hex(),
        )
        .expect("reload should be ok");
        assert_eq!(reloaded.public_point(), kex.public_point());
    }
}

#[test]
fn test_exchange_between_seeded_peers() {
    let alice = seeded(1);
    let bob = seeded(2);
    let eve = seeded(3);

    let alice_pub = alice.public_key().expect("encode should be ok");
    let bob_pub = bob.public_key().expect("encode should be ok");

    let k_ab = alice.key_exchange(&bob_pub).expect("exchange should be ok");
    let k_ba = bob.key_exchange(&alice_pub).expect("exchange should be ok");
    let k_eb = eve.key_exchange(&bob_pub).expect("exchange should be ok");

    assert_eq!(k_ab, k_ba);
    assert_ne!(k_ab, k_eb);
}

#[test]
fn test_exchange_matches_manual_derivation() {
    let alice = seeded(11);
    let bob = seeded(12);

    let curve = alice.params().curve();
    let bob_point = alice
        .decode_point(&bob.public_key().expect("encode should be ok"))
        .expect("decode should be ok");
    assert_eq!(&bob_point, bob.public_point());

    let secret = alice.key_exchange_point(&bob_point).expect("exchange should be ok");
    let private = num_bigint::BigUint::parse_bytes(alice.private_key_hex().as_bytes(), 16)
        .expect("valid hex");
    let shared = curve.scalar_mul(&bob_point, &private).expect("mul should be ok");
    assert_eq!(secret, derive_shared_secret(&shared).expect("fold should be ok"));
}

#[test]
fn test_custom_alphabet_must_match_on_both_sides() {
    let reversed: String = SAFE_ALPHABET.chars().rev().collect();
    let config = KexConfig {
        point_alphabet: reversed.clone(),
        ..KexConfig::default()
    };

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let alice = KeyExchange::generate(DomainParams::sm2(), &config, &mut rng)
        .expect("key generation should be ok");
    let bob = KeyExchange::generate(DomainParams::sm2(), &config, &mut rng)
        .expect("key generation should be ok");
    let stranger = seeded(22);

    let bob_pub = bob.public_key().expect("encode should be ok");
    assert!(bob_pub.chars().all(|c| reversed.contains(c)));
    assert_eq!(
        alice.key_exchange(&bob_pub).expect("exchange should be ok"),
        bob.key_exchange(&alice.public_key().expect("encode should be ok"))
            .expect("exchange should be ok"),
    );

    // decoded with the wrong alphabet the point lands somewhere else
    assert_ne!(
        stranger.decode_point(&bob_pub).ok().as_ref(),
        Some(bob.public_point())
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = KexConfig {
        sqrt_max_attempts: 0,
        ..KexConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(matches!(
        KeyExchange::generate(DomainParams::sm2(), &config, &mut rng),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_off_curve_peer_is_rejected() {
    let alice = seeded(5);

    // x = 2 gives y^2 = 8 + 2a + b, which is not a square for SM2
    let encoded = [0x02u8, 0x02].to_base85_with(Alphabet::safe());
    assert!(matches!(
        alice.key_exchange(&encoded),
        Err(Error::Math(MathError::NoSquareRoot { .. }))
    ));
}

#[test]
fn test_identity_peer_is_rejected() {
    let alice = seeded(6);
    assert!(matches!(
        alice.key_exchange_point(&Point::Infinity),
        Err(Error::IdentityPoint)
    ));
}

#[test]
fn test_off_curve_point_is_rejected() {
    let alice = seeded(9);
    let bogus = Point::new(1u32.into(), 1u32.into());
    assert!(!alice.params().curve().contains(&bogus));

    assert!(matches!(
        alice.key_exchange_point(&bogus),
        Err(Error::Math(MathError::PointNotOnCurve))
    ));

    // coordinates outside the field are rejected too
    let bob = seeded(10);
    let (x, y) = match bob.public_point() {
        Point::Affine { x, y } => (x.clone(), y.clone()),
        Point::Infinity => unreachable!("generated keys are affine"),
    };
    let unreduced = Point::new(x + alice.params().p(), y);
    assert!(matches!(
        alice.key_exchange_point(&unreduced),
        Err(Error::Math(MathError::PointNotOnCurve))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn test_exchange_is_symmetric(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        let alice = seeded(seed_a);
        let bob = seeded(seed_b);

        let k_ab = alice.key_exchange(&bob.public_key().unwrap()).unwrap();
        let k_ba = bob.key_exchange(&alice.public_key().unwrap()).unwrap();
        prop_assert_eq!(k_ab, k_ba);
    }
}
