//! Scalar field contract (component B): arithmetic modulo the curve order
//! `n`, wide reduction for deterministic-nonce and hash-derived scalars,
//! and the bit/NAF accessors scalar multiplication needs.

pub(crate) mod macros;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Upper bound on NAF digit count across every supported curve (P-521's
/// 521-bit order plus one carry digit, rounded up). A fixed-capacity
/// buffer keeps the variable-time scalar-multiplication path off the heap,
/// matching this core's "no allocation on the hot paths" posture even
/// though `naf()` itself is a `vt`-only helper.
pub const MAX_NAF_DIGITS: usize = 530;

/// Width-`w` non-adjacent form of a scalar, stored least-significant digit
/// first in a fixed-capacity buffer. Variable-time only.
#[derive(Copy, Clone)]
pub struct Naf {
    digits: [i8; MAX_NAF_DIGITS],
    len: usize,
}

impl Naf {
    /// The digit sequence, least significant first.
    pub fn as_slice(&self) -> &[i8] {
        &self.digits[..self.len]
    }
}

/// Operations every scalar-field element type exposes.
pub trait ScalarField:
    Copy + Clone + Default + ConditionallySelectable + ConstantTimeEq + Eq + PartialEq
{
    /// Canonical big-endian encoded size in bytes.
    const BYTES: usize;

    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// `self + rhs mod n`.
    fn add(&self, rhs: &Self) -> Self;

    /// `self - rhs mod n`.
    fn sub(&self, rhs: &Self) -> Self;

    /// `-self mod n`.
    fn neg(&self) -> Self;

    /// `self * rhs mod n`.
    fn mul(&self, rhs: &Self) -> Self;

    /// Multiplicative inverse, `None` iff `self` is zero.
    fn invert(&self) -> CtOption<Self>;

    /// `true` iff `self` is the additive identity.
    fn is_zero(&self) -> Choice;

    /// `true` iff the canonical representative exceeds `n/2` - used for
    /// ECDSA low-S normalization.
    fn is_high(&self) -> Choice;

    /// Parse a canonical big-endian encoding. Rejects `>= n`.
    fn from_bytes(bytes: &[u8]) -> CtOption<Self>;

    /// As [`ScalarField::from_bytes`], but additionally rejects zero - the
    /// shape every ECDSA/EdDSA private-key import uses.
    fn from_bytes_nonzero(bytes: &[u8]) -> CtOption<Self> {
        let candidate = Self::from_bytes(bytes);
        candidate.and_then(|s| CtOption::new(s, !s.is_zero()))
    }

    /// Reduce an arbitrary-length big-endian byte string (up to roughly
    /// twice the encoded width) modulo `n`. Used for RFC 6979 DRBG output
    /// and EdDSA's `SHA-512` nonce/challenge hashes, neither of which is
    /// guaranteed to already be `< n`.
    fn from_bytes_wide(bytes: &[u8]) -> Self;

    /// Encode canonically as big-endian bytes into `out` (length
    /// [`ScalarField::BYTES`]).
    fn to_bytes_into(&self, out: &mut [u8]);

    /// Encode the group order `n` itself as big-endian bytes into `out`
    /// (length [`ScalarField::BYTES`]). Used by ECDSA recovery to
    /// reconstruct `R.x` when the low-order bit of the recovery id says `r`
    /// was reduced mod `n` during signing.
    fn modulus_into(out: &mut [u8]);

    /// Bit `i` (0-indexed from the least significant bit); `0` once `i`
    /// exceeds the field's bit width. Used by constant-time ladders, which
    /// must visit every bit position up to a fixed curve-specific count
    /// regardless of the scalar's actual magnitude.
    fn bit(&self, i: usize) -> u8;

    /// Width-`w` non-adjacent form. Variable-time only: the digit count and
    /// positions depend on the scalar's value, so this must never be
    /// called on a secret scalar.
    fn naf(&self, window_width: u32) -> Naf;

    /// Conditionally negate `self` in place.
    fn conditional_negate(&mut self, choice: Choice) {
        *self = Self::conditional_select(self, &self.neg(), choice);
    }

    /// Draw a uniformly random nonzero scalar from `rng` by rejection
    /// sampling: fill a canonical-width buffer and retry until
    /// [`ScalarField::from_bytes_nonzero`] accepts it. The rejection
    /// probability is at most `~2^-faithful-bits` per draw (the top byte of
    /// `n` is never all-ones for any supported curve), so termination is
    /// overwhelmingly likely on the first try and guaranteed in the limit -
    /// the same rejection-sampling shape the teacher's `NonZeroScalar::random`
    /// uses, just against this core's own `ScalarField` rather than
    /// `ff::PrimeField`.
    #[cfg(feature = "rand_core")]
    fn random<R: rand_core::RngCore + rand_core::CryptoRng>(rng: &mut R) -> Self {
        let mut buf = [0u8; 66];
        loop {
            rng.fill_bytes(&mut buf[..Self::BYTES]);
            if let Some(scalar) = Option::from(Self::from_bytes_nonzero(&buf[..Self::BYTES])) {
                return scalar;
            }
        }
    }
}

/// Compute the width-`w` NAF of a plain (non-Montgomery) little-endian limb
/// array. Shared by every curve's `naf()` impl; variable-time by
/// construction (digit count and loop trip count depend on the scalar).
pub(crate) fn naf_from_limbs<const L: usize>(mut limbs: [u64; L], window_width: u32) -> Naf {
    let w = window_width;
    let half = 1i64 << (w - 1);
    let modulus_digit = 1i64 << w;

    let mut out = Naf {
        digits: [0i8; MAX_NAF_DIGITS],
        len: 0,
    };

    let is_zero = |l: &[u64; L]| l.iter().all(|&x| x == 0);

    while !is_zero(&limbs) {
        let digit = if limbs[0] & 1 == 1 {
            let mut d = (limbs[0] & ((modulus_digit as u64) - 1)) as i64;
            if d >= half {
                d -= modulus_digit;
            }
            if d >= 0 {
                limbs = crate::limbs::sub_small(limbs, d as u64);
            } else {
                limbs = crate::limbs::add_small(limbs, (-d) as u64);
            }
            d as i8
        } else {
            0
        };
        out.digits[out.len] = digit;
        out.len += 1;
        limbs = crate::limbs::shr(&limbs, 1);
    }

    out
}
