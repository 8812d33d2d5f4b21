//! Short Weierstrass curve group `y^2 = x^3 + ax + b (mod p)` in affine coordinates.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

use crate::error::{MathError, MathResult};
use crate::math::{mod_inv, mod_sqrt_with, sub_mod, DEFAULT_SQRT_MAX_ATTEMPTS};

/// A curve point. The identity is its own variant, so the affine pair `(0, 0)` is
/// an ordinary coordinate and never mistaken for infinity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    #[inline]
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    #[inline]
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    #[inline]
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => f.write_str("Point::Infinity"),
            Point::Affine { x, y } => f
                .debug_struct("Point")
                .field("x", &format_args!("{x:#x}"))
                .field("y", &format_args!("{y:#x}"))
                .finish(),
        }
    }
}

/// The curve equation over the prime field of `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    p: BigUint,
    a: BigUint,
    b: BigUint,
}

impl Curve {
    /// Builds the curve, rejecting even moduli and singular curves
    /// (`4a^3 + 27b^2 ≡ 0 (mod p)`).
    pub fn new(a: BigUint, b: BigUint, p: BigUint) -> MathResult<Self> {
        if p < BigUint::from(3u32) || (&p % 2u32).is_zero() {
            return Err(MathError::UnsupportedModulus { op: "curve" });
        }

        let a = a % &p;
        let b = b % &p;
        let discriminant = (&a * &a * &a * 4u32 + &b * &b * 27u32) % &p;
        if discriminant.is_zero() {
            return Err(MathError::SingularCurve);
        }

        Ok(Self { p, a, b })
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    #[inline]
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// `x^3 + ax + b mod p`.
    fn rhs(&self, x: &BigUint) -> BigUint {
        let x = x % &self.p;
        (&x * &x * &x + &self.a * &x + &self.b) % &self.p
    }

    /// Whether `point` satisfies the curve equation. The identity always does.
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                x < &self.p && y < &self.p && (y * y) % &self.p == self.rhs(x)
            }
        }
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                Point::new(x.clone(), sub_mod(&BigUint::zero(), y, &self.p))
            }
        }
    }

    /// Group law. Points are expected to be on this curve with reduced coordinates.
    pub fn add(&self, p1: &Point, p2: &Point) -> MathResult<Point> {
        let (x1, y1, x2, y2) = match (p1, p2) {
            (Point::Infinity, _) => return Ok(p2.clone()),
            (_, Point::Infinity) => return Ok(p1.clone()),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        let p = &self.p;
        let lambda = if x1 == x2 {
            // P + (-P), including doubling a point with y = 0
            if ((y1 + y2) % p).is_zero() {
                return Ok(Point::Infinity);
            }

            let numerator = (x1 * x1 * 3u32 + &self.a) % p;
            numerator * mod_inv(&(y1 * 2u32), p)? % p
        } else {
            sub_mod(y2, y1, p) * mod_inv(&sub_mod(x2, x1, p), p)? % p
        };

        let x3 = sub_mod(&(&lambda * &lambda % p), &((x1 + x2) % p), p);
        let y3 = sub_mod(&(lambda * sub_mod(x1, &x3, p) % p), y1, p);
        Ok(Point::new(x3, y3))
    }

    #[inline]
    pub fn double(&self, point: &Point) -> MathResult<Point> {
        self.add(point, point)
    }

    /// `k·point` by double-and-add over the bits of `k`, most significant first.
    pub fn scalar_mul(&self, point: &Point, k: &BigUint) -> MathResult<Point> {
        let mut acc = Point::Infinity;
        for i in (0..k.bits()).rev() {
            acc = self.double(&acc)?;
            if k.bit(i) {
                acc = self.add(&acc, point)?;
            }
        }

        Ok(acc)
    }

    /// One of the two `y` with `y^2 = x^3 + ax + b`; the caller picks the other by parity.
    pub fn y_from_x(&self, x: &BigUint) -> MathResult<BigUint> {
        self.y_from_x_with(x, &mut rand::thread_rng(), DEFAULT_SQRT_MAX_ATTEMPTS)
    }

    pub fn y_from_x_with<R: RngCore + ?Sized>(
        &self,
        x: &BigUint,
        rng: &mut R,
        max_attempts: u32,
    ) -> MathResult<BigUint> {
        mod_sqrt_with(&self.rhs(x), &self.p, rng, max_attempts)
    }
}
