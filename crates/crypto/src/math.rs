//! Modular arithmetic over a prime modulus.
//!
//! Every function here assumes the modulus is prime. Nothing checks primality: with
//! a composite modulus the results are silently wrong, not errors. All outputs are
//! normalised into `[0, p)`.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;

use crate::error::{MathError, MathResult, SqrtCase};

/// Default cap on Lucas candidates tried by [`mod_sqrt`] when `p ≡ 1 (mod 8)`.
///
/// Each candidate fails with probability about one half for a residue, so hitting
/// the cap means the input or the randomness source is broken.
pub const DEFAULT_SQRT_MAX_ATTEMPTS: u32 = 128;

/// `(a - b) mod p` for `a, b` already reduced.
#[inline]
pub(crate) fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        (a - b) % p
    } else {
        (p - (b - a) % p) % p
    }
}

/// `base^exponent mod modulus` by square-and-multiply.
///
/// The exponent is first reduced modulo `modulus - 1` (Fermat), and a reduced
/// exponent of zero gives one. A base divisible by the modulus gives zero for any
/// positive exponent. A modulus of zero or one gives zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus <= &BigUint::one() {
        return BigUint::zero();
    }

    let mut base = base % modulus;
    if base.is_zero() {
        return if exponent.is_zero() {
            BigUint::one()
        } else {
            BigUint::zero()
        };
    }

    let mut exp = exponent % (modulus - 1u32);
    let mut result = BigUint::one();
    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        exp >>= 1;
        base = (&base * &base) % modulus;
    }

    result
}

/// Multiplicative inverse `g^(p-2) mod p`.
pub fn mod_inv(g: &BigUint, p: &BigUint) -> MathResult<BigUint> {
    if p < &BigUint::from(2u32) {
        return Err(MathError::UnsupportedModulus { op: "mod_inv" });
    }

    if (g % p).is_zero() {
        return Err(MathError::NotInvertible { op: "mod_inv" });
    }

    Ok(mod_pow(g, &(p - 2u32), p))
}

/// Lucas sequence pair `(U_k, V_k) mod p` for `X^2 - x·X + y`.
///
/// Walks the bits of `k` from the top, doubling with
/// `U_2m = U_m·V_m`, `V_2m = (V_m^2 + Δ·U_m^2) / 2` and stepping by one with
/// `U_m+1 = (x·U_m + V_m) / 2`, `V_m+1 = (x·V_m + Δ·U_m) / 2`, where `Δ = x^2 - 4y`.
pub fn lucas_uv(
    x: &BigUint,
    y: &BigUint,
    k: &BigUint,
    p: &BigUint,
) -> MathResult<(BigUint, BigUint)> {
    if p < &BigUint::from(3u32) || p.is_even() {
        return Err(MathError::UnsupportedModulus { op: "lucas_uv" });
    }

    if k.is_zero() {
        return Ok((BigUint::zero(), BigUint::from(2u32)));
    }

    let inv2 = mod_inv(&BigUint::from(2u32), p)?;
    let x = x % p;
    let delta = sub_mod(&(&x * &x % p), &((y % p) * 4u32 % p), p);

    let mut u = BigUint::one();
    let mut v = x.clone();
    for i in (0..k.bits() - 1).rev() {
        let u2 = &u * &v % p;
        let v2 = (&v * &v + &delta * &u * &u) % p * &inv2 % p;
        u = u2;
        v = v2;

        if k.bit(i) {
            let u1 = (&x * &u + &v) % p * &inv2 % p;
            let v1 = (&x * &v + &delta * &u) % p * &inv2 % p;
            u = u1;
            v = v1;
        }
    }

    Ok((u, v))
}

/// Square root of `g` modulo the odd prime `p`, drawing Lucas candidates from the
/// thread-local generator with the default attempt cap.
pub fn mod_sqrt(g: &BigUint, p: &BigUint) -> MathResult<BigUint> {
    mod_sqrt_with(g, p, &mut rand::thread_rng(), DEFAULT_SQRT_MAX_ATTEMPTS)
}

/// Square root of `g` modulo the odd prime `p`.
///
/// Returns one of the two roots; callers pick the other with `p - y`. Fails with
/// [`MathError::NoSquareRoot`] when `g` is a non-residue and with
/// [`MathError::RetryLimitExceeded`] when the `p ≡ 1 (mod 8)` search runs out of
/// attempts.
pub fn mod_sqrt_with<R: RngCore + ?Sized>(
    g: &BigUint,
    p: &BigUint,
    rng: &mut R,
    max_attempts: u32,
) -> MathResult<BigUint> {
    if p < &BigUint::from(3u32) || p.is_even() {
        return Err(MathError::UnsupportedModulus { op: "mod_sqrt" });
    }

    let g = g % p;
    if g.is_zero() {
        return Ok(g);
    }

    let one = BigUint::one();
    let p_minus_1 = p - 1u32;
    // p is odd, so p mod 8 is one of 1, 3, 5, 7
    let residue = (p % 8u32).to_u32().unwrap_or_default();
    match residue {
        3 | 7 => {
            let u = (p - 3u32) >> 2;
            let y = mod_pow(&g, &(u + 1u32), p);
            if &y * &y % p == g {
                Ok(y)
            } else {
                Err(MathError::NoSquareRoot {
                    case: SqrtCase::ThreeModFour,
                })
            }
        }
        5 => {
            let u = (p - 5u32) >> 3;
            let z = mod_pow(&g, &(&u * 2u32 + 1u32), p);
            if z == one {
                Ok(mod_pow(&g, &(u + 1u32), p))
            } else if z == p_minus_1 {
                let two_g = &g * 2u32 % p;
                let four_g = &g * 4u32 % p;
                Ok(two_g * mod_pow(&four_g, &u, p) % p)
            } else {
                Err(MathError::NoSquareRoot {
                    case: SqrtCase::FiveModEight,
                })
            }
        }
        _ => {
            let u = (p - 1u32) >> 3;
            let k = u * 4u32 + 1u32;
            let inv2 = mod_inv(&BigUint::from(2u32), p)?;
            let four_g = &g * 4u32 % p;

            for attempt in 1..=max_attempts {
                let x = rng.gen_biguint_range(&one, p);
                let (u, v) = lucas_uv(&x, &g, &k, p)?;
                if &v * &v % p == four_g {
                    return Ok(v * &inv2 % p);
                }

                if u != one && u != p_minus_1 {
                    return Err(MathError::NoSquareRoot {
                        case: SqrtCase::OneModEight,
                    });
                }

                tracing::trace!(target: "sm2_kex", attempt, "lucas candidate rejected");
            }

            Err(MathError::RetryLimitExceeded {
                attempts: max_attempts,
            })
        }
    }
}
