//! Scalar multiplication over the twisted Edwards group (component E,
//! Ed25519-specific half): constant-time `k*P` via a plain double-and-add
//! ladder, and variable-time `k*P` via width-w NAF, used together to build
//! EdDSA's `r*G`/`a*G` (secret, constant-time) and the verification
//! equation's `S*G`/`h*pub` (public, variable-time).
//!
//! Ed25519 only has one curve in this core that needs the twisted Edwards
//! group, so unlike [`crate::scalar_mult`]'s Weierstrass side (which carries
//! a fixed-base comb and a GLV-aware joint multiplication for secp256k1's
//! verification hot path) this stays a single plain ladder: the unified
//! Hisil-Wong-Carter-Dawson formulas already make doubling, the identity,
//! and `P + P` branch-free, so no windowing is needed to keep the
//! constant-time path safe.

use crate::edwards::{EdwardsCurve, ExtendedPoint};
use crate::scalar::ScalarField;
use subtle::{Choice, ConditionallySelectable};

/// Constant-time `k*P`. Branch-free in `k`: every bit position performs a
/// doubling, an addition, and a full conditional select regardless of the
/// bit's value.
pub fn ct_mul<C: EdwardsCurve>(k: &C::Scalar, p: &ExtendedPoint<C>) -> ExtendedPoint<C> {
    let bits = <C::Scalar as ScalarField>::BYTES * 8;
    let mut acc = ExtendedPoint::<C>::identity();
    for i in (0..bits).rev() {
        acc = acc.double();
        let added = acc.add(p);
        acc = ExtendedPoint::conditional_select(&acc, &added, Choice::from(k.bit(i)));
    }
    acc
}

/// Window width for `vt_mul`'s NAF table. Fixed at compile time (rather
/// than taken as a parameter, as the Weierstrass side's equivalent helper
/// does) so the odd-multiples table below can live in a stack array sized
/// by a const expression instead of a heap-allocated `Vec` - this module
/// has exactly one curve and one verification-time table to build, so
/// there's no per-call table size to parameterize over.
const VT_WINDOW: u32 = 5;

/// `2^(VT_WINDOW-1)` entries: the odd multiples `{1*P, 3*P, .., (2^VT_WINDOW-1)*P}`.
const VT_TABLE_SIZE: usize = 1 << (VT_WINDOW as usize - 1);

/// Variable-time `k*P`, width-5 NAF. Used only for the public values in
/// EdDSA verification (`S*G`, `h*pub`); never call with a secret scalar.
pub fn vt_mul<C: EdwardsCurve>(k: &C::Scalar, p: &ExtendedPoint<C>) -> ExtendedPoint<C> {
    let naf = k.naf(VT_WINDOW);
    let table = vt_odd_multiples(p);

    let mut acc = ExtendedPoint::<C>::identity();
    for &d in naf.as_slice().iter().rev() {
        acc = acc.double();
        if d != 0 {
            let idx = (d.unsigned_abs() as usize - 1) / 2;
            let term = table[idx];
            acc = if d > 0 { acc.add(&term) } else { acc.sub(&term) };
        }
    }
    acc
}

/// Build the odd-multiples table `{1*P, 3*P, .., (2*VT_TABLE_SIZE-1)*P}` in
/// a fixed-size array - no allocation, so this path builds without the
/// `alloc` feature enabled.
fn vt_odd_multiples<C: EdwardsCurve>(p: &ExtendedPoint<C>) -> [ExtendedPoint<C>; VT_TABLE_SIZE] {
    let mut out = [*p; VT_TABLE_SIZE];
    let double_p = p.double();
    for i in 1..VT_TABLE_SIZE {
        out[i] = out[i - 1].add(&double_p);
    }
    out
}
