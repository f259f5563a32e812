//! Scalar multiplication (component E): constant-time fixed-base comb
//! `k*G`, constant-time variable-base windowed scalar multiplication
//! `k*P`, variable-time joint `k1*G + k2*P` (verification only), and
//! secp256k1's GLV endomorphism decomposition.
//!
//! Every `ct_*` routine here is branch-free and memory-access-pattern
//! invariant with respect to the secret scalar: window digits are always
//! read out of a full table via [`subtle::ConditionallySelectable`]
//! selection rather than indexing, and the table itself always has
//! `2^WINDOW_WIDTH` entries (including the identity) so no odd/even digit
//! recoding - and the branch that would come with it - is needed. `vt_*`
//! routines (verification-only joint multiplication) are explicitly
//! permitted to branch on the scalars involved, per this core's `ct`/`vt`
//! split.

use crate::scalar::ScalarField;
use crate::weierstrass::{AffinePoint, ProjectivePoint, WeierstrassCurve};
use subtle::{Choice, ConditionallySelectable};

pub mod edwards;

/// Window width used by the constant-time fixed-base comb and
/// variable-base ladder. `4` balances table size (`2^W` entries) against
/// the number of group operations for the curve sizes in this core.
pub const CT_WINDOW_WIDTH: u32 = 4;

/// `2^CT_WINDOW_WIDTH`, the number of entries in a constant-time digit
/// table (digits `0..=2^W - 1`, table[0] the identity).
const CT_TABLE_SIZE: usize = 1 << CT_WINDOW_WIDTH as usize;

/// A full digit table `{0*P, 1*P, ..., (2^W-1)*P}` in affine form, built
/// once per base point and then read with constant-time, full-table
/// selects. Zero is included (rather than restricting to odd multiples)
/// so the accumulation step is a single unconditional complete addition,
/// with no separate odd/even recoding branch.
struct DigitTable<C: WeierstrassCurve> {
    entries: [AffinePoint<C>; CT_TABLE_SIZE],
}

impl<C: WeierstrassCurve> DigitTable<C> {
    fn build(p: &ProjectivePoint<C>) -> Self {
        let mut jac = [ProjectivePoint::<C>::identity(); CT_TABLE_SIZE];
        for i in 1..CT_TABLE_SIZE {
            jac[i] = jac[i - 1].add(p);
        }
        let mut affine = [AffinePoint::<C>::identity(); CT_TABLE_SIZE];
        ProjectivePoint::batch_to_affine(&jac, &mut affine);
        Self { entries: affine }
    }

    /// Constant-time select of `entries[digit]`: every entry is touched on
    /// every call, regardless of which one `digit` names.
    fn select(&self, digit: u32) -> AffinePoint<C> {
        let mut out = self.entries[0];
        for (i, entry) in self.entries.iter().enumerate() {
            out = AffinePoint::conditional_select(&out, entry, Choice::from((digit as usize == i) as u8));
        }
        out
    }
}

/// Bit width a curve's scalar ladder must iterate over: the scalar field's
/// canonical encoded width in bits. Every ladder visits this many bit
/// positions regardless of the scalar's actual magnitude.
fn total_bits<C: WeierstrassCurve>() -> usize {
    <C::Scalar as ScalarField>::BYTES * 8
}

fn window_digit<C: WeierstrassCurve>(k: &C::Scalar, window: usize, w: usize, bits: usize) -> u32 {
    let mut digit = 0u32;
    for b in 0..w {
        let bit_index = window * w + b;
        let bit = if bit_index < bits { k.bit(bit_index) } else { 0 };
        digit |= (bit as u32) << b;
    }
    digit
}

/// Constant-time variable-base scalar multiplication `k*P`. Safe to call
/// with a secret scalar and/or a secret point: the digit table is built
/// from `p` once, then every window is decoded via a full-table select and
/// accumulated with the group's complete addition formula.
pub fn ct_mul<C: WeierstrassCurve>(k: &C::Scalar, p: &ProjectivePoint<C>) -> ProjectivePoint<C> {
    let table = DigitTable::build(p);
    let w = CT_WINDOW_WIDTH as usize;
    let bits = total_bits::<C>();
    let windows = (bits + w - 1) / w;

    let mut acc = ProjectivePoint::<C>::identity();
    for window in (0..windows).rev() {
        for _ in 0..w {
            acc = acc.double();
        }
        let digit = window_digit::<C>(k, window, w, bits);
        let term = table.select(digit);
        acc = acc.mixed_add(&term);
    }
    acc
}

/// A precomputed fixed-base comb table for constant-time `k*G`: one
/// [`DigitTable`] per `W`-bit window position, each built from
/// `(2^(row*W))*G`. Built once per curve context and cached - the "tens of
/// kilobytes, cheap to clone" comb state the curve context owns.
pub struct CombTable<C: WeierstrassCurve> {
    rows: alloc::vec::Vec<DigitTable<C>>,
}

impl<C: WeierstrassCurve> CombTable<C> {
    /// Build the comb table for `generator`. `rows` should be
    /// `ceil(scalar_bits / CT_WINDOW_WIDTH)`.
    pub fn build(generator: ProjectivePoint<C>, rows: usize) -> Self {
        let mut row_base = generator;
        let mut out = alloc::vec::Vec::with_capacity(rows);
        for _ in 0..rows {
            out.push(DigitTable::build(&row_base));
            for _ in 0..CT_WINDOW_WIDTH {
                row_base = row_base.double();
            }
        }
        Self { rows: out }
    }
}

/// Constant-time fixed-base scalar multiplication `k*G` against a
/// precomputed [`CombTable`]. No point doublings are needed on the hot
/// path at all (each row already encodes its own power-of-two weight),
/// only a table select and a complete addition per window - what makes
/// fixed-base multiplication cheaper than the variable-base ladder.
pub fn ct_mul_base<C: WeierstrassCurve>(k: &C::Scalar, comb: &CombTable<C>) -> ProjectivePoint<C> {
    let w = CT_WINDOW_WIDTH as usize;
    let bits = total_bits::<C>();
    debug_assert!(comb.rows.len() >= (bits + w - 1) / w);

    let mut acc = ProjectivePoint::<C>::identity();
    for (row, table) in comb.rows.iter().enumerate() {
        let digit = window_digit::<C>(k, row, w, bits);
        let term = table.select(digit);
        acc = acc.mixed_add(&term);
    }
    acc
}

/// Variable-time joint scalar multiplication `k1*G + k2*P`, used only by
/// signature verification where both scalars and the point are public.
/// Interleaved width-w NAF: a wider window for the fixed generator (which
/// gets a larger precomputed table) than for the arbitrary point `P`.
pub fn vt_mul_double_base<C: WeierstrassCurve>(
    k1: &C::Scalar,
    g_table: &[AffinePoint<C>],
    k2: &C::Scalar,
    p: &ProjectivePoint<C>,
) -> ProjectivePoint<C> {
    const G_WINDOW: u32 = 5;
    const P_WINDOW: u32 = 4;

    let naf1 = k1.naf(G_WINDOW);
    let naf2 = k2.naf(P_WINDOW);
    let p_table = vt_odd_multiples(p, P_WINDOW);

    let len = naf1.as_slice().len().max(naf2.as_slice().len());
    let mut acc = ProjectivePoint::<C>::identity();
    for i in (0..len).rev() {
        acc = acc.double();
        let d1 = naf1.as_slice().get(i).copied().unwrap_or(0);
        if d1 != 0 {
            let idx = (d1.unsigned_abs() as usize - 1) / 2;
            let term = g_table[idx];
            acc = if d1 > 0 { acc.mixed_add(&term) } else { acc.mixed_sub(&term) };
        }
        let d2 = naf2.as_slice().get(i).copied().unwrap_or(0);
        if d2 != 0 {
            let idx = (d2.unsigned_abs() as usize - 1) / 2;
            let term = p_table[idx];
            acc = if d2 > 0 { acc.mixed_add(&term) } else { acc.mixed_sub(&term) };
        }
    }
    acc
}

/// Build a generator comb's odd-multiple NAF table (`{1*G, 3*G, ..}` at
/// window width `w`) in affine form, for use as `g_table` in
/// [`vt_mul_double_base`]. Variable-time; `generator` is always a public
/// curve constant.
pub fn vt_odd_multiples<C: WeierstrassCurve>(
    p: &ProjectivePoint<C>,
    window_width: u32,
) -> alloc::vec::Vec<AffinePoint<C>> {
    let n = 1usize << (window_width as usize - 1);
    let mut jac = alloc::vec![ProjectivePoint::<C>::identity(); n];
    jac[0] = *p;
    let double_p = p.double();
    for i in 1..n {
        jac[i] = jac[i - 1].add(&double_p);
    }
    let mut affine = alloc::vec![AffinePoint::<C>::identity(); n];
    ProjectivePoint::batch_to_affine(&jac, &mut affine);
    affine
}

/// secp256k1's GLV endomorphism decomposition: given `k`, produce signed
/// half-width subscalars `(k1, k2)` with `k == k1 + k2*lambda mod n`, each
/// bounded by roughly `2^128` - half the bit width of `n`. Variable-time;
/// used only inside verification's joint multiplication, never on a secret
/// scalar directly (the decomposition shortens the ladder, it doesn't
/// touch private-key bits).
///
/// Follows the standard Babai-rounding construction (as used throughout
/// the secp256k1 reference implementations): `k`, `g1`, `g2` are ordinary
/// 256-bit integers (not scalar-field elements - the rounding step needs
/// exact integer division, which working modulo `n` would destroy).
/// `c1 = round(k*g1 / 2^384)`, `c2 = round(k*g2 / 2^384)` recover the
/// quotients of `k*b2/n` and `k*(-b1)/n` via a fixed-point multiply and
/// shift; `k1 = k - c1*a1 - c2*a2` and `k2 = -(c1*b1 + c2*b2)` then fall out
/// of the lattice basis, each guaranteed `< 2^128` in absolute value.
pub trait GlvCurve: WeierstrassCurve {
    /// Lattice basis constant `a1`, plain little-endian 256-bit limbs.
    fn glv_a1() -> [u64; 4];
    /// Lattice basis constant `b1`'s magnitude (the real `b1` is negative
    /// for secp256k1's basis; callers combine it with the right sign).
    fn glv_b1_mag() -> [u64; 4];
    /// Lattice basis constant `a2`.
    fn glv_a2() -> [u64; 4];
    /// Lattice basis constant `b2`.
    fn glv_b2() -> [u64; 4];
    /// `g1 = round(2^384 * b2 / n)`, plain little-endian 256-bit limbs.
    fn glv_g1() -> [u64; 4];
    /// `g2 = round(2^384 * (-b1) / n)`.
    fn glv_g2() -> [u64; 4];
    /// `lambda`, the scalar such that `lambda*(x, y) == (beta*x, y)`.
    fn glv_lambda() -> Self::Scalar;
    /// `beta`, the field element such that `lambda*(x, y) == (beta*x, y)`
    /// (a primitive cube root of unity mod `p`).
    fn glv_beta() -> Self::Field;
}

/// Apply the GLV endomorphism `(x, y) -> (beta*x, y)` to an affine point.
fn endomorphism<C: GlvCurve>(point: &AffinePoint<C>) -> AffinePoint<C> {
    AffinePoint {
        x: point.x.mul(&C::glv_beta()),
        y: point.y,
        infinity: point.infinity,
    }
}

/// Add or subtract `table[(|digit|-1)/2]` into `acc`, flipping the sign of
/// `digit` first when `flip_sign` is set (used to fold the endomorphism
/// subscalar's own sign into the shared NAF digit stream).
fn apply_digit<C: WeierstrassCurve>(
    acc: ProjectivePoint<C>,
    digit: i8,
    table: &[AffinePoint<C>],
    flip_sign: bool,
) -> ProjectivePoint<C> {
    if digit == 0 {
        return acc;
    }
    let idx = (digit.unsigned_abs() as usize - 1) / 2;
    let term = table[idx];
    let positive = (digit > 0) ^ flip_sign;
    if positive {
        acc.mixed_add(&term)
    } else {
        acc.mixed_sub(&term)
    }
}

/// GLV-accelerated variable-time joint multiplication `k1*G + k2*P`, for
/// curves with a cheap endomorphism (secp256k1). Decomposes both scalars
/// into half-width subscalars via [`glv_decompose`] and runs a single
/// 4-way interleaved NAF over `{G, phi(G), P, phi(P)}`, roughly halving the
/// ladder length of the generic [`vt_mul_double_base`] at the cost of two
/// extra odd-multiple tables.
pub fn vt_mul_double_base_glv<C: GlvCurve>(
    k1: &C::Scalar,
    g_table: &[AffinePoint<C>],
    g_window: u32,
    k2: &C::Scalar,
    p: &ProjectivePoint<C>,
    p_window: u32,
) -> ProjectivePoint<C> {
    let (k1a, k1b) = glv_decompose::<C>(k1);
    let (k2a, k2b) = glv_decompose::<C>(k2);

    let phi_g_table: alloc::vec::Vec<_> = g_table.iter().map(endomorphism::<C>).collect();
    let p_table = vt_odd_multiples(p, p_window);
    let phi_p_table: alloc::vec::Vec<_> = p_table.iter().map(endomorphism::<C>).collect();

    let naf_k1a = k1a.magnitude.naf(g_window);
    let naf_k1b = k1b.magnitude.naf(g_window);
    let naf_k2a = k2a.magnitude.naf(p_window);
    let naf_k2b = k2b.magnitude.naf(p_window);

    let len = [
        naf_k1a.as_slice().len(),
        naf_k1b.as_slice().len(),
        naf_k2a.as_slice().len(),
        naf_k2b.as_slice().len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let mut acc = ProjectivePoint::<C>::identity();
    for i in (0..len).rev() {
        acc = acc.double();
        acc = apply_digit(acc, naf_k1a.as_slice().get(i).copied().unwrap_or(0), g_table, k1a.negative);
        acc = apply_digit(acc, naf_k1b.as_slice().get(i).copied().unwrap_or(0), &phi_g_table, k1b.negative);
        acc = apply_digit(acc, naf_k2a.as_slice().get(i).copied().unwrap_or(0), &p_table, k2a.negative);
        acc = apply_digit(acc, naf_k2b.as_slice().get(i).copied().unwrap_or(0), &phi_p_table, k2b.negative);
    }
    acc
}

/// A signed half-width scalar produced by GLV decomposition.
pub struct SignedScalar<S> {
    pub magnitude: S,
    pub negative: bool,
}

/// Decompose `k` into `(k1, k2)` balanced to roughly half the bit width of
/// `n`, such that `k*P == k1*P + k2*(lambda*P)`.
///
/// `k1 = k - c1*a1 - c2*a2`, `k2 = c1*|b1| - c2*b2` (the real `b1` is
/// negative, so `-c1*b1` becomes `+c1*|b1|`), where `c1 = round(k*g1 /
/// 2^384)` and `c2 = round(k*g2 / 2^384)` approximate the exact-rational
/// Babai rounding `round(k*b2/n)` and `round(-k*b1/n)` via a fixed-point
/// multiply and shift - avoiding a second bigint type for one rounding
/// step.
pub fn glv_decompose<C: GlvCurve>(k: &C::Scalar) -> (SignedScalar<C::Scalar>, SignedScalar<C::Scalar>) {
    let mut k_bytes = [0u8; 32];
    k.to_bytes_into(&mut k_bytes);
    let k_limbs = be_bytes_to_limbs(&k_bytes);

    let c1 = round_shift_384(&k_limbs, &C::glv_g1());
    let c2 = round_shift_384(&k_limbs, &C::glv_g2());

    let c1_a1 = wide_to_4(&mul256(&c1, &C::glv_a1()));
    let c2_a2 = wide_to_4(&mul256(&c2, &C::glv_a2()));
    let c1_b1 = wide_to_4(&mul256(&c1, &C::glv_b1_mag()));
    let c2_b2 = wide_to_4(&mul256(&c2, &C::glv_b2()));

    let (k1_mag, k1_neg) = signed_combine(&[(false, k_limbs), (true, c1_a1), (true, c2_a2)]);
    let (k2_mag, k2_neg) = signed_combine(&[(false, c1_b1), (true, c2_b2)]);

    (
        SignedScalar { magnitude: limbs_to_scalar::<C::Scalar>(&k1_mag), negative: k1_neg },
        SignedScalar { magnitude: limbs_to_scalar::<C::Scalar>(&k2_mag), negative: k2_neg },
    )
}

fn wide_to_4(x: &[u64; 8]) -> [u64; 4] {
    debug_assert_eq!((x[4], x[5], x[6], x[7]), (0, 0, 0, 0));
    [x[0], x[1], x[2], x[3]]
}

/// Sum signed 256-bit magnitudes (`(negative, magnitude)` pairs), returning
/// a balanced `(magnitude, negative)` result. Every GLV term here is
/// bounded well within 256 bits by construction, so the running
/// accumulator never needs more than 4 limbs.
fn signed_combine(terms: &[(bool, [u64; 4])]) -> ([u64; 4], bool) {
    let mut acc = [0u64; 4];
    let mut acc_neg = false;
    for &(neg, mag) in terms {
        if neg == acc_neg {
            let (sum, _) = crate::limbs::add(&acc, &mag);
            acc = sum;
        } else if crate::limbs::lt(&acc, &mag) {
            let (diff, _) = crate::limbs::sub(&mag, &acc);
            acc = diff;
            acc_neg = neg;
        } else {
            let (diff, _) = crate::limbs::sub(&acc, &mag);
            acc = diff;
        }
    }
    (acc, acc_neg)
}

/// `round((k * g) / 2^384)` where `k` and `g` are 256-bit plain integers:
/// multiply to a 512-bit product, then take the 128 bits starting at bit
/// 384, rounding based on bit 383.
fn round_shift_384(k: &[u64; 4], g: &[u64; 4]) -> [u64; 4] {
    let product = mul256(k, g);
    let round_bit = (product[5] >> 63) & 1;
    // bits [384, 512) of the 512-bit product occupy limbs 6 and 7.
    let mut out = [product[6], product[7], 0, 0];
    if round_bit == 1 {
        let (sum, _) = crate::limbs::add(&out, &[1, 0, 0, 0]);
        out = sum;
    }
    out
}

/// Schoolbook 256x256 -> 512-bit multiply, plain (non-Montgomery) limbs.
fn mul256(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u64;
        for j in 0..4 {
            let (v, c) = crate::limbs::mac(t[i + j], a[i], b[j], carry);
            t[i + j] = v;
            carry = c;
        }
        let mut k = i + 4;
        while carry != 0 {
            let (v, c) = crate::limbs::adc(t[k], carry, 0);
            t[k] = v;
            carry = c;
            k += 1;
        }
    }
    t
}

fn be_bytes_to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut out = [0u64; 4];
    for i in 0..4 {
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[24 - i * 8..32 - i * 8]);
        out[i] = u64::from_be_bytes(chunk);
    }
    out
}

fn limbs_to_scalar<S: ScalarField>(limbs: &[u64; 4]) -> S {
    let mut be = [0u8; 32];
    for i in 0..4 {
        be[24 - i * 8..32 - i * 8].copy_from_slice(&limbs[i].to_be_bytes());
    }
    // GLV subscalar magnitudes are always `< 2^128 << n`, so this never
    // rejects; a rejection would indicate a registry constant bug.
    Option::from(S::from_bytes(&be)).unwrap_or_else(S::zero)
}
