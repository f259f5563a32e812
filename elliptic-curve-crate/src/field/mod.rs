//! Prime field contract (component A): element representation and the
//! `set, add, sub, neg, mul, sqr, inv, sqrt, pow, import, export, equal,
//! is_zero, is_odd, conditional_select, conditional_negate` operation set.
//!
//! Concrete field elements (one type per curve, since each curve picks its
//! own limb count) are generated by the [`impl_prime_field`] macro in
//! [`crate::curves`]. This module carries the trait every such type
//! implements, plus the square-root strategies shared across curves:
//! `p ≡ 3 (mod 4)` (P-256, P-384, P-521, secp256k1), the Atkin-style
//! `p ≡ 5 (mod 8)` trick (Ed25519), and general Tonelli-Shanks for the one
//! curve where neither holds (P-224, whose prime is `1 mod 8`).

pub(crate) mod macros;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Operations every prime-field element type exposes.
///
/// All arithmetic is branch-free with respect to `self`/`rhs`; `invert` and
/// `sqrt` use fixed per-curve addition chains (the exponent is a public
/// constant, so branching on its bits leaks nothing about the operand).
pub trait PrimeField:
    Copy + Clone + Default + ConditionallySelectable + ConstantTimeEq + Eq + PartialEq
{
    /// Canonical big-endian encoded size in bytes (`⌈log2 p / 8⌉`).
    const BYTES: usize;

    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// `self + rhs mod p`.
    fn add(&self, rhs: &Self) -> Self;

    /// `self - rhs mod p`.
    fn sub(&self, rhs: &Self) -> Self;

    /// `-self mod p`.
    fn neg(&self) -> Self;

    /// `self * rhs mod p`.
    fn mul(&self, rhs: &Self) -> Self;

    /// `self^2 mod p`.
    fn square(&self) -> Self {
        self.mul(self)
    }

    /// Multiplicative inverse via Fermat's little theorem (`self^(p-2)`).
    /// Returns `None` (as a falsy `CtOption`) iff `self` is zero.
    fn invert(&self) -> CtOption<Self>;

    /// Principal square root, when one exists. The `CtOption` is "falsy"
    /// (internally `NotASquare`) when `self` is a non-residue.
    fn sqrt(&self) -> CtOption<Self>;

    /// `true` iff `self` is the additive identity.
    fn is_zero(&self) -> Choice;

    /// Parity of the canonical representative (LSB of its integer value).
    fn is_odd(&self) -> Choice;

    /// Parse a canonical big-endian encoding. Rejects any encoding `>= p`
    /// (non-canonical) or of the wrong length.
    fn from_bytes(bytes: &[u8]) -> CtOption<Self>;

    /// Encode canonically as big-endian bytes into `out`, which must have
    /// length exactly [`PrimeField::BYTES`].
    fn to_bytes_into(&self, out: &mut [u8]);

    /// Encode the field modulus `p` itself as big-endian bytes into `out`
    /// (length [`PrimeField::BYTES`]). Used by ECDSA verification to check
    /// whether a candidate `r + n` still fits under `p` (§4.F) without
    /// reaching for a bigint type at the protocol layer.
    fn modulus_into(out: &mut [u8]);

    /// Conditionally negate `self` in place.
    fn conditional_negate(&mut self, choice: Choice) {
        *self = Self::conditional_select(self, &self.neg(), choice);
    }
}

/// Square root for `p ≡ 3 (mod 4)` fields: `x^((p+1)/4)`, checked by
/// squaring the candidate and comparing against the input.
pub(crate) fn sqrt_3mod4<F: PrimeField>(x: &F, pow_p1_div4: impl Fn(&F) -> F) -> CtOption<F> {
    let candidate = pow_p1_div4(x);
    let check = candidate.square();
    CtOption::new(candidate, check.ct_eq(x))
}

/// Square root for `p ≡ 5 (mod 8)` fields (Ed25519's base field), the
/// Atkin-style trick: let `y = x^((p+3)/8)`. If `y^2 == x`, `y` is the
/// root. Otherwise multiply by a fixed square root of `-1` and check
/// again.
pub(crate) fn sqrt_5mod8<F: PrimeField>(
    x: &F,
    pow_p3_div8: impl Fn(&F) -> F,
    sqrt_minus_one: &F,
) -> CtOption<F> {
    let y = pow_p3_div8(x);
    let y2 = y.square();
    if bool::from(y2.ct_eq(x)) {
        return CtOption::new(y, Choice::from(1));
    }
    let y_alt = y.mul(sqrt_minus_one);
    let y_alt2 = y_alt.square();
    CtOption::new(y_alt, y_alt2.ct_eq(x))
}

/// General Tonelli-Shanks square root, used for P-224 (`p ≡ 1 (mod 8)`,
/// specifically `p - 1 = 2^96 * (2^128 - 1)`).
///
/// `q_exp` computes `x^((q-1)/2)` where `p - 1 = 2^s * q`; `z` is a fixed
/// quadratic non-residue, precomputed as `z^q` in Montgomery form by the
/// caller so this routine never needs to re-derive it.
pub(crate) fn sqrt_tonelli_shanks<F: PrimeField>(
    x: &F,
    s: u32,
    pow_q_minus_1_div_2: impl Fn(&F) -> F,
    z_pow_q: &F,
) -> CtOption<F> {
    if bool::from(x.is_zero()) {
        return CtOption::new(F::zero(), Choice::from(1));
    }

    let mut m = s;
    let mut c = *z_pow_q;
    let w = pow_q_minus_1_div_2(x);
    let mut t = w.square().mul(x);
    let mut r = w.mul(x);

    loop {
        if bool::from(t.ct_eq(&F::one())) {
            break;
        }

        // find least i, 0 < i < m, such that t^(2^i) == 1
        let mut i = 0u32;
        let mut t2i = t;
        loop {
            i += 1;
            t2i = t2i.square();
            if bool::from(t2i.ct_eq(&F::one())) {
                break;
            }
            if i >= m {
                return CtOption::new(F::zero(), Choice::from(0));
            }
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = b.square();
        }
        let b2 = b.square();
        m = i;
        c = b2;
        t = t.mul(&b2);
        r = r.mul(&b);
    }

    let check = r.square();
    CtOption::new(r, check.ct_eq(x))
}
