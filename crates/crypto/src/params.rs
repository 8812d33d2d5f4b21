//! Curve domain parameters and the fixed SM2 instance.

use std::sync::Arc;

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::curve::{Curve, Point};
use crate::error::{MathError, MathResult};

// Recommended SM2 parameters, GM/T 0003-2012.
const SM2_P: &[u8] = b"FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF";
const SM2_A: &[u8] = b"FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC";
const SM2_B: &[u8] = b"28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93";
const SM2_N: &[u8] = b"FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123";
const SM2_GX: &[u8] = b"32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7";
const SM2_GY: &[u8] = b"BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0";

static SM2: Lazy<Arc<DomainParams>> = Lazy::new(|| {
    let parse =
        |digits: &[u8]| BigUint::parse_bytes(digits, 16).expect("SM2 constant is valid hex");

    let curve = Curve::new(parse(SM2_A), parse(SM2_B), parse(SM2_P))
        .expect("SM2 curve is non-singular");
    let g = Point::new(parse(SM2_GX), parse(SM2_GY));
    Arc::new(DomainParams::new(curve, parse(SM2_N), g).expect("SM2 generator is on the curve"))
});

/// A curve together with its base point `g` and the order `n` of `g`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParams {
    curve: Curve,
    n: BigUint,
    g: Point,
}

impl DomainParams {
    /// Fails with [`MathError::PointNotOnCurve`] if `g` is the identity or off the curve.
    pub fn new(curve: Curve, n: BigUint, g: Point) -> MathResult<Self> {
        if g.is_identity() || !curve.contains(&g) {
            return Err(MathError::PointNotOnCurve);
        }

        Ok(Self { curve, n, g })
    }

    /// The process-wide SM2 parameters, built on first use.
    #[inline]
    pub fn sm2() -> Arc<DomainParams> {
        Arc::clone(&SM2)
    }

    #[inline]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        self.curve.p()
    }

    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[inline]
    pub fn g(&self) -> &Point {
        &self.g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_traits::One;

    #[test]
    fn test_sm2_generator_on_curve() {
        let params = DomainParams::sm2();
        assert!(params.curve().contains(params.g()));
        assert_eq!(params.p().bits(), 256);
        assert_eq!(params.n().bits(), 256);
    }

    #[test]
    fn test_sm2_generator_order() {
        let params = DomainParams::sm2();
        let curve = params.curve();
        assert_eq!(
            curve.scalar_mul(params.g(), params.n()).expect("mul"),
            Point::Infinity
        );

        let n_minus_1 = params.n() - BigUint::one();
        assert_eq!(
            curve.scalar_mul(params.g(), &n_minus_1).expect("mul"),
            curve.negate(params.g())
        );
    }

    #[test]
    fn test_sm2_double_generator() {
        let params = DomainParams::sm2();
        let two_g = params.curve().double(params.g()).expect("double");
        let expected = Point::new(
            BigUint::from_bytes_be(&hex!(
                "56CEFD60D7C87C000D58EF57FA73BA4D9C0DFA08C08A7331495C2E1DA3F2BD52"
            )),
            BigUint::from_bytes_be(&hex!(
                "31B7E7E6CC8189F668535CE0F8EAF1BD6DE84C182F6C8E716F780D3A970A23C3"
            )),
        );
        assert_eq!(two_g, expected);
        assert_eq!(
            params.curve().scalar_mul(params.g(), &BigUint::from(2u32)).expect("mul"),
            expected
        );
    }

    #[test]
    fn test_sm2_shared_instance() {
        assert!(Arc::ptr_eq(&DomainParams::sm2(), &DomainParams::sm2()));
    }

    #[test]
    fn test_generator_must_be_on_curve() {
        let params = DomainParams::sm2();
        let bogus = Point::new(BigUint::from(1u32), BigUint::from(1u32));
        assert_eq!(
            DomainParams::new(params.curve().clone(), params.n().clone(), bogus),
            Err(MathError::PointNotOnCurve)
        );
    }
}
