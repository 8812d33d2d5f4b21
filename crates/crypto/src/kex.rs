//! SM2-flavoured Diffie-Hellman key agreement.
//!
//! A [`KeyExchange`] holds one private scalar and its public point for a single peer
//! session. Public keys travel as base85 text of `[parity][x]`, where the parity byte
//! is `0x02` for even `y` and `0x03` for odd `y`, and `x` is the minimal big-endian
//! encoding of the x-coordinate. The instance is not synchronised: callers sharing
//! one across threads must serialise `set_private_key` against the other methods.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sm2_kex_encoding::{bytes_to_integer, integer_to_bytes, Alphabet, FromBase85, ToBase85};

use crate::config::KexConfig;
use crate::curve::Point;
use crate::error::{Error, MathError, Result};
use crate::math::sub_mod;
use crate::params::DomainParams;
use crate::secret::{derive_shared_secret, SharedSecret};

const PARITY_EVEN: u8 = 0x02;
const PARITY_ODD: u8 = 0x03;

/// Encodes an affine point as `[parity][x]` in base85.
pub fn encode_point(point: &Point, alphabet: &Alphabet) -> Result<String> {
    let (x, y) = match point {
        Point::Infinity => return Err(Error::IdentityPoint),
        Point::Affine { x, y } => (x, y),
    };

    let x = integer_to_bytes(x);
    let mut buf = Vec::with_capacity(1 + x.len());
    buf.push(if y.is_odd() { PARITY_ODD } else { PARITY_EVEN });
    buf.extend_from_slice(&x);
    Ok(buf.to_base85_with(alphabet))
}

/// Recovers a point from its base85 `[parity][x]` form.
///
/// `y` is recomputed from the curve equation and replaced by `p - y` when its low
/// bit disagrees with the parity byte.
pub fn decode_point<R: RngCore + ?Sized>(
    params: &DomainParams,
    encoded: &str,
    alphabet: &Alphabet,
    rng: &mut R,
    sqrt_max_attempts: u32,
) -> Result<Point> {
    let bytes = Vec::from_base85_with(encoded, alphabet)?;
    let (&parity, x) = bytes.split_first().ok_or(Error::EmptyPoint)?;
    if parity != PARITY_EVEN && parity != PARITY_ODD {
        return Err(Error::InvalidParity(parity));
    }

    let p = params.p();
    let x = bytes_to_integer(x);
    if &x >= p {
        return Err(MathError::PointNotOnCurve.into());
    }

    let y = params.curve().y_from_x_with(&x, rng, sqrt_max_attempts)?;
    let y = if y.is_odd() == (parity == PARITY_ODD) {
        y
    } else {
        sub_mod(&BigUint::zero(), &y, p)
    };

    Ok(Point::new(x, y))
}

/// Key pair and codec settings for one peer session.
#[derive(Clone)]
pub struct KeyExchange {
    params: Arc<DomainParams>,
    alphabet: Alphabet,
    sqrt_max_attempts: u32,
    private_key: BigUint,
    public_key: Point,
}

impl KeyExchange {
    /// SM2 key pair drawn from the operating system generator, default settings.
    pub fn new() -> Result<Self> {
        Self::generate(DomainParams::sm2(), &KexConfig::default(), &mut OsRng)
    }

    /// Draws a private scalar uniformly from `[1, n)` and derives the public point.
    pub fn generate<R: CryptoRng + RngCore>(
        params: Arc<DomainParams>,
        config: &KexConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let private_key = rng.gen_biguint_range(&BigUint::one(), params.n());
        let kex = Self::with_private_key(params, config, private_key)?;
        tracing::debug!(
            target: "sm2_kex",
            order_bits = kex.params.n().bits(),
            "key pair generated"
        );
        Ok(kex)
    }

    /// Key pair for a known private scalar given in hex.
    pub fn from_private_key_hex(
        params: Arc<DomainParams>,
        config: &KexConfig,
        private_key: &str,
    ) -> Result<Self> {
        let private_key = parse_private_key(&params, private_key)?;
        Self::with_private_key(params, config, private_key)
    }

    fn with_private_key(
        params: Arc<DomainParams>,
        config: &KexConfig,
        private_key: BigUint,
    ) -> Result<Self> {
        config.validate()?;
        let public_key = params.curve().scalar_mul(params.g(), &private_key)?;
        Ok(Self {
            alphabet: config.alphabet()?,
            sqrt_max_attempts: config.sqrt_max_attempts,
            params,
            private_key,
            public_key,
        })
    }

    /// Replaces the private scalar and recomputes the public point.
    pub fn set_private_key(&mut self, private_key: &str) -> Result<()> {
        let private_key = parse_private_key(&self.params, private_key)?;
        self.public_key = self.params.curve().scalar_mul(self.params.g(), &private_key)?;
        self.private_key = private_key;
        tracing::debug!(target: "sm2_kex", "private key replaced");
        Ok(())
    }

    #[inline]
    pub fn params(&self) -> &Arc<DomainParams> {
        &self.params
    }

    /// Private scalar as lowercase hex, zero-padded to the width of `n`.
    pub fn private_key_hex(&self) -> String {
        let width = (self.params.n().bits() as usize + 3) / 4;
        format!("{:0width$x}", self.private_key, width = width)
    }

    #[inline]
    pub fn public_point(&self) -> &Point {
        &self.public_key
    }

    /// The encoded public key to hand to the peer.
    pub fn public_key(&self) -> Result<String> {
        encode_point(&self.public_key, &self.alphabet)
    }

    /// Decodes a peer's encoded public key and checks it lies on the curve.
    pub fn decode_point(&self, encoded: &str) -> Result<Point> {
        let point = decode_point(
            &self.params,
            encoded,
            &self.alphabet,
            &mut rand::thread_rng(),
            self.sqrt_max_attempts,
        )?;

        if !self.params.curve().contains(&point) {
            return Err(MathError::PointNotOnCurve.into());
        }

        Ok(point)
    }

    /// Derives the 16-byte session secret from the peer's encoded public key.
    pub fn key_exchange(&self, peer_public_key: &str) -> Result<SharedSecret> {
        let peer = self.decode_point(peer_public_key)?;
        self.key_exchange_point(&peer)
    }

    /// Same as [`key_exchange`](Self::key_exchange) for an already decoded peer point.
    ///
    /// The point must lie on this curve; anything else is rejected before it meets the
    /// private scalar.
    pub fn key_exchange_point(&self, peer: &Point) -> Result<SharedSecret> {
        if !self.params.curve().contains(peer) {
            return Err(MathError::PointNotOnCurve.into());
        }

        let shared = self.params.curve().scalar_mul(peer, &self.private_key)?;
        let secret = derive_shared_secret(&shared)?;
        tracing::debug!(target: "sm2_kex", "shared secret derived");
        Ok(secret)
    }
}

impl Debug for KeyExchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExchange")
            .field("private_key", &"***")
            .field("public_key", &self.public_key)
            .finish()
    }
}

fn parse_private_key(params: &DomainParams, hex: &str) -> Result<BigUint> {
    let digits = hex.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidPrivateKey("not a hexadecimal string".to_string()));
    }

    let key = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidPrivateKey("not a hexadecimal string".to_string()))?;
    if key.is_zero() || &key >= params.n() {
        return Err(Error::InvalidPrivateKey("scalar must be in [1, n)".to_string()));
    }

    Ok(key)
}
