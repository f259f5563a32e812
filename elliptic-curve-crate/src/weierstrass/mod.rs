//! Short-Weierstrass group (component C): affine and Jacobian point types,
//! the complete/near-complete group law, mixed addition, validation,
//! cross-representation equality, batched affine conversion, and SEC1
//! encoding/decoding.
//!
//! Generic over any curve supplying a [`WeierstrassCurve`] impl (field,
//! scalar, and the `a`/`b` equation constants plus generator) - one
//! implementation drives P-224, P-256, P-384, P-521, and secp256k1,
//! mirroring the `primeorder` crate's role in the upstream RustCrypto
//! workspace (a single generic Jacobian-point crate backing every
//! short-Weierstrass curve crate that doesn't need hand-tuned assembly).

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::scalar::ScalarField;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Domain parameters a curve must supply to use the generic group law.
pub trait WeierstrassCurve: Copy {
    /// Base field element type.
    type Field: PrimeField;
    /// Scalar field element type (mod the group order).
    type Scalar: ScalarField;

    /// The `a` coefficient of `y^2 = x^3 + ax + b`, in field representation.
    fn equation_a() -> Self::Field;
    /// The `b` coefficient.
    fn equation_b() -> Self::Field;
    /// `true` for curves with `a == -3` (P-224/256/384/521), enabling the
    /// cheaper doubling formula; `false` for secp256k1 (`a == 0`), which
    /// still uses the fully general complete formulas below.
    fn a_is_minus_three() -> bool;
    /// Generator point, affine coordinates.
    fn generator() -> (Self::Field, Self::Field);
    /// Cofactor (`1` for every supported Weierstrass curve).
    fn cofactor() -> u64 {
        1
    }

    /// Variable-time joint multiplication `k1*G + k2*P` (§4.E.3),
    /// verification's hot path. `g_table` is the generator's precomputed
    /// odd-multiple table (width-5 wNAF). Default: plain interleaved joint
    /// wNAF over `G` and `P` directly; curves with a GLV endomorphism
    /// ([`crate::scalar_mult::GlvCurve`], secp256k1 alone in this core)
    /// override this to decompose both scalars first and run a 4-way joint
    /// wNAF instead, halving the ladder length.
    fn vt_joint_mul(
        k1: &Self::Scalar,
        g_table: &[AffinePoint<Self>],
        k2: &Self::Scalar,
        p: &ProjectivePoint<Self>,
    ) -> ProjectivePoint<Self> {
        crate::scalar_mult::vt_mul_double_base(k1, g_table, k2, p)
    }
}

/// An affine short-Weierstrass point, or the point at infinity.
#[derive(Copy, Clone, Debug)]
pub struct AffinePoint<C: WeierstrassCurve> {
    pub x: C::Field,
    pub y: C::Field,
    pub infinity: Choice,
}

impl<C: WeierstrassCurve> AffinePoint<C> {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self {
            x: C::Field::zero(),
            y: C::Field::zero(),
            infinity: Choice::from(1),
        }
    }

    /// The curve's generator point.
    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Self {
            x,
            y,
            infinity: Choice::from(0),
        }
    }

    /// `true` iff this is the point at infinity.
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Validate the curve equation `y^2 == x^3 + ax + b`. Constant-time;
    /// the point at infinity is never considered valid (callers who accept
    /// it do so explicitly before calling `validate`).
    pub fn validate(&self) -> Choice {
        let lhs = self.y.square();
        let x3 = self.x.square().mul(&self.x);
        let ax = C::equation_a().mul(&self.x);
        let rhs = x3.add(&ax).add(&C::equation_b());
        lhs.ct_eq(&rhs) & !self.infinity
    }

    /// Negate: `(x, y) -> (x, -y)`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.neg(),
            infinity: self.infinity,
        }
    }

    fn to_jacobian(self) -> ProjectivePoint<C> {
        let one = C::Field::one();
        ProjectivePoint {
            x: C::Field::conditional_select(&self.x, &C::Field::one(), self.infinity),
            y: C::Field::conditional_select(&self.y, &one, self.infinity),
            z: C::Field::conditional_select(&one, &C::Field::zero(), self.infinity),
        }
    }
}

impl<C: WeierstrassCurve> ConditionallySelectable for AffinePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::Field::conditional_select(&a.x, &b.x, choice),
            y: C::Field::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: WeierstrassCurve> PartialEq for AffinePoint<C> {
    fn eq(&self, other: &Self) -> bool {
        let both_inf = self.infinity & other.infinity;
        let neither_inf_eq = (!self.infinity) & (!other.infinity) & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
        bool::from(both_inf | neither_inf_eq)
    }
}
impl<C: WeierstrassCurve> Eq for AffinePoint<C> {}

/// A Jacobian-coordinate short-Weierstrass point: affine equivalent is
/// `(X/Z^2, Y/Z^3)`; `Z == 0` encodes the point at infinity.
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint<C: WeierstrassCurve> {
    pub x: C::Field,
    pub y: C::Field,
    pub z: C::Field,
}

impl<C: WeierstrassCurve> ProjectivePoint<C> {
    /// The point at infinity (`Z = 0`).
    pub fn identity() -> Self {
        Self {
            x: C::Field::one(),
            y: C::Field::one(),
            z: C::Field::zero(),
        }
    }

    /// The curve's generator point, lifted to Jacobian coordinates.
    pub fn generator() -> Self {
        AffinePoint::<C>::generator().to_jacobian()
    }

    /// `true` iff `Z == 0`, i.e. the point at infinity. Constant-time.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Point doubling. Branch-free in `self`; dispatches at compile time
    /// (via [`WeierstrassCurve::a_is_minus_three`], a curve-level not a
    /// point-level fact) between the `a = -3` shortcut and the fully
    /// general `a`/`b` formula secp256k1 needs.
    pub fn double(&self) -> Self {
        if C::a_is_minus_three() {
            self.double_a_minus_three()
        } else {
            self.double_general()
        }
    }

    // a = -3 doubling (Jacobian), per Handbook of Applied Cryptography
    // Algorithm 3.21 / the formula used throughout the P-256/P-384/P-224
    // family: cheaper than the general case because `3X^2 + aZ^4` collapses
    // to `3(X-Z^2)(X+Z^2)`.
    fn double_a_minus_three(&self) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let s = {
            let xpyy = self.x.add(&yy).square();
            let t = xpyy.sub(&xx).sub(&yyyy);
            t.add(&t)
        };
        // m = 3*(X - ZZ)*(X + ZZ), the a = -3 shortcut for 3*X^2 + a*ZZ^2.
        let m = {
            let x_minus_zz = self.x.sub(&zz);
            let x_plus_zz = self.x.add(&zz);
            let t = x_minus_zz.mul(&x_plus_zz);
            t.add(&t).add(&t)
        };
        let t = m.square().sub(&s).sub(&s);
        let y4 = yyyy.add(&yyyy).add(&yyyy).add(&yyyy).add(&yyyy).add(&yyyy).add(&yyyy).add(&yyyy);
        let y_new = m.mul(&s.sub(&t)).sub(&y4);
        let z_new = self.y.add(&self.z).square().sub(&yy).sub(&zz);

        let result = Self { x: t, y: y_new, z: z_new };
        Self::conditional_select(&result, &Self::identity(), self.is_identity())
    }

    // General doubling (Jacobian), valid for any `a` - the formula secp256k1
    // (`a = 0`) uses, and which also works for the `a = -3` curves (just
    // with an extra multiply by `a`).
    fn double_general(&self) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let xpyy = self.x.add(&yy).square();
        let s = {
            let t = xpyy.sub(&xx).sub(&yyyy);
            t.add(&t)
        };
        let zz2 = zz.square();
        let a_zz2 = C::equation_a().mul(&zz2);
        let m = {
            let three_xx = xx.add(&xx).add(&xx);
            three_xx.add(&a_zz2)
        };
        let t = m.square().sub(&s).sub(&s);
        let y4 = {
            let t2 = yyyy.add(&yyyy);
            let t4 = t2.add(&t2);
            t4.add(&t4)
        };
        let y_new = m.mul(&s.sub(&t)).sub(&y4);
        let z_new = self.y.add(&self.z).square().sub(&yy).sub(&zz);

        let result = Self { x: t, y: y_new, z: z_new };
        Self::conditional_select(&result, &Self::identity(), self.is_identity())
    }

    /// Jacobian + Jacobian addition. Complete: handles either operand being
    /// the identity and `P + P`/`P + (-P)` without a separate code path,
    /// so it is safe to call on secret inputs.
    pub fn add(&self, other: &Self) -> Self {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2);
        let u2 = other.x.mul(&z1z1);
        let s1 = self.y.mul(&other.z).mul(&z2z2);
        let s2 = other.y.mul(&self.z).mul(&z1z1);
        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        let is_doubling = h.is_zero() & r.is_zero();
        let doubled = self.double();

        let hh = h.square();
        let hhh = hh.mul(&h);
        let v = u1.mul(&hh);
        let x3 = r.square().sub(&hhh).sub(&v).sub(&v);
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&hhh));
        let z3 = self.z.mul(&other.z).mul(&h);

        let added = Self { x: x3, y: y3, z: z3 };

        let result = Self::conditional_select(&added, &doubled, is_doubling);
        let result = Self::conditional_select(&result, other, self.is_identity());
        Self::conditional_select(&result, self, other.is_identity())
    }

    /// Jacobian + affine mixed addition (`Z2 == 1` assumed), used inside
    /// scalar multiplication against precomputed affine tables - saves one
    /// field squaring and multiply relative to full Jacobian addition.
    pub fn mixed_add(&self, other: &AffinePoint<C>) -> Self {
        let other_jac = ProjectivePoint {
            x: other.x,
            y: other.y,
            z: C::Field::one(),
        };
        let sum = self.add(&other_jac);
        Self::conditional_select(&sum, self, other.infinity)
    }

    /// Mixed subtraction: `self + (-other)`.
    pub fn mixed_sub(&self, other: &AffinePoint<C>) -> Self {
        self.mixed_add(&other.neg())
    }

    /// Negate.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.neg(),
            z: self.z,
        }
    }

    /// Cross-representation equality without an inversion: compare
    /// `X1*Z2^2 == X2*Z1^2` and `Y1*Z2^3 == Y2*Z1^3`.
    pub fn equal(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2);
        let u2 = other.x.mul(&z1z1);
        let s1 = self.y.mul(&other.z).mul(&z2z2);
        let s2 = other.y.mul(&self.z).mul(&z1z1);
        let both_identity = self.is_identity() & other.is_identity();
        let neither_identity_eq = !self.is_identity() & !other.is_identity() & u1.ct_eq(&u2) & s1.ct_eq(&s2);
        both_identity | neither_identity_eq
    }

    /// Convert to affine, performing one field inversion. Returns the
    /// identity in affine form if `self` is the point at infinity.
    pub fn to_affine(&self) -> AffinePoint<C> {
        let z_inv = self.z.invert();
        let z_inv = z_inv.unwrap_or_else(C::Field::zero);
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);
        let x = self.x.mul(&z_inv2);
        let y = self.y.mul(&z_inv3);
        AffinePoint {
            x,
            y,
            infinity: self.is_identity(),
        }
    }

    /// Batch-convert many Jacobian points to affine with a single field
    /// inversion (Montgomery's trick), instead of one inversion per point.
    pub fn batch_to_affine(points: &[Self], out: &mut [AffinePoint<C>]) {
        debug_assert_eq!(points.len(), out.len());
        let n = points.len();
        if n == 0 {
            return;
        }

        // Running products of Z, Z_0 * Z_1 * ... * Z_i.
        let mut prefix = alloc_or_stack_products::<C>(n);
        prefix[0] = points[0].z;
        for i in 1..n {
            prefix[i] = prefix[i - 1].mul(&points[i].z);
        }

        let mut inv = prefix[n - 1].invert().unwrap_or_else(C::Field::zero);

        for i in (0..n).rev() {
            let z_inv = if i == 0 {
                inv
            } else {
                inv.mul(&prefix[i - 1])
            };
            let z_inv2 = z_inv.square();
            let z_inv3 = z_inv2.mul(&z_inv);
            out[i] = AffinePoint {
                x: points[i].x.mul(&z_inv2),
                y: points[i].y.mul(&z_inv3),
                infinity: points[i].is_identity(),
            };
            if i > 0 {
                inv = inv.mul(&points[i].z);
            }
        }
    }
}

// Batch conversion needs one scratch buffer the size of the input slice.
// The crate is `no_std` without a hard `alloc` requirement elsewhere, but
// batch conversion is only reached from verification/recovery (`vt`)
// call-sites, so it's fine for it to size its scratch space dynamically
// when `alloc` is enabled and fall back to a fixed on-stack cap otherwise.
#[cfg(feature = "alloc")]
fn alloc_or_stack_products<C: WeierstrassCurve>(n: usize) -> alloc::vec::Vec<C::Field> {
    alloc::vec![C::Field::zero(); n]
}

#[cfg(not(feature = "alloc"))]
fn alloc_or_stack_products<C: WeierstrassCurve>(n: usize) -> [C::Field; 16] {
    assert!(n <= 16, "batch_to_affine without `alloc` is capped at 16 points");
    [C::Field::zero(); 16]
}

impl<C: WeierstrassCurve> ConditionallySelectable for ProjectivePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::Field::conditional_select(&a.x, &b.x, choice),
            y: C::Field::conditional_select(&a.y, &b.y, choice),
            z: C::Field::conditional_select(&a.z, &b.z, choice),
        }
    }
}

/// SEC1 point encoding/decoding (§4.C). `field_bytes` is the curve's
/// canonical field element width.
pub fn sec1_decode<C: WeierstrassCurve>(bytes: &[u8], field_bytes: usize) -> Result<AffinePoint<C>> {
    if bytes.is_empty() {
        return Err(Error::InvalidPoint);
    }
    match bytes[0] {
        0x02 | 0x03 => {
            if bytes.len() != 1 + field_bytes {
                return Err(Error::InvalidPoint);
            }
            let x = C::Field::from_bytes(&bytes[1..]).ok_or(Error::InvalidPoint)?;
            let want_odd = Choice::from(bytes[0] & 1);
            let rhs = x.square().mul(&x).add(&C::equation_a().mul(&x)).add(&C::equation_b());
            let mut y = rhs.sqrt().ok_or(Error::InvalidPoint)?;
            let is_odd = y.is_odd();
            y.conditional_negate(is_odd ^ want_odd);
            Ok(AffinePoint { x, y, infinity: Choice::from(0) })
        }
        0x04 | 0x06 | 0x07 => {
            if bytes.len() != 1 + 2 * field_bytes {
                return Err(Error::InvalidPoint);
            }
            let x = C::Field::from_bytes(&bytes[1..1 + field_bytes]).ok_or(Error::InvalidPoint)?;
            let y = C::Field::from_bytes(&bytes[1 + field_bytes..]).ok_or(Error::InvalidPoint)?;
            if bytes[0] == 0x06 || bytes[0] == 0x07 {
                let want_odd = Choice::from(bytes[0] & 1);
                if bool::from(y.is_odd() ^ want_odd) {
                    return Err(Error::InvalidPoint);
                }
            }
            let point = AffinePoint { x, y, infinity: Choice::from(0) };
            if !bool::from(point.validate()) {
                return Err(Error::InvalidPoint);
            }
            Ok(point)
        }
        _ => Err(Error::InvalidPoint),
    }
}

/// Encode a point per SEC1. `out` must be sized `1 + field_bytes`
/// (compressed) or `1 + 2*field_bytes` (uncompressed); returns the number
/// of bytes written.
pub fn sec1_encode<C: WeierstrassCurve>(
    point: &AffinePoint<C>,
    field_bytes: usize,
    compressed: bool,
    out: &mut [u8],
) -> usize {
    if compressed {
        out[0] = 0x02 | u8::from(point.y.is_odd());
        point.x.to_bytes_into(&mut out[1..1 + field_bytes]);
        1 + field_bytes
    } else {
        out[0] = 0x04;
        point.x.to_bytes_into(&mut out[1..1 + field_bytes]);
        point.y.to_bytes_into(&mut out[1 + field_bytes..1 + 2 * field_bytes]);
        1 + 2 * field_bytes
    }
}

trait CtOptionExt<T> {
    fn ok_or(self, err: Error) -> Result<T>;
}

impl<T> CtOptionExt<T> for CtOption<T> {
    fn ok_or(self, err: Error) -> Result<T> {
        Option::<T>::from(self).ok_or(err)
    }
}

/// ECDSA verification's "`R'.x mod n == r`" check (§4.F), performed directly
/// on the Jacobian representative without an affine conversion: accept iff
/// `x~ == r*Z^2 (mod p)`, or - when `r + n` still fits under `p` - iff `x~ ==
/// (r+n)*Z^2 (mod p)`, covering the case where the original `r` was reduced
/// mod `n` during signing. Variable-time; verification-only.
pub fn ecdsa_check_x<C: WeierstrassCurve>(point: &ProjectivePoint<C>, r: &C::Scalar) -> Choice {
    const MAX_BYTES: usize = 66;
    let field_bytes = C::Field::BYTES;

    let mut r_bytes = [0u8; MAX_BYTES];
    r.to_bytes_into(&mut r_bytes[..C::Scalar::BYTES]);
    // r < n < p for every supported curve, so this conversion never rejects.
    let r_field = match Option::from(C::Field::from_bytes(&r_bytes[..field_bytes])) {
        Some(f) => f,
        None => return Choice::from(0),
    };

    let zz = point.z.square();
    let direct = point.x.ct_eq(&r_field.mul(&zz));

    let mut n_bytes = [0u8; MAX_BYTES];
    C::Scalar::modulus_into(&mut n_bytes[..C::Scalar::BYTES]);
    let mut sum = [0u8; MAX_BYTES];
    let carry = be_add(&r_bytes[..field_bytes], &n_bytes[..field_bytes], &mut sum[..field_bytes]);

    let mut p_bytes = [0u8; MAX_BYTES];
    C::Field::modulus_into(&mut p_bytes[..field_bytes]);
    let fits = !carry && sum[..field_bytes] < p_bytes[..field_bytes];

    let overflow_eq = if fits {
        match Option::from(C::Field::from_bytes(&sum[..field_bytes])) {
            Some(r_plus_n) => point.x.ct_eq(&r_plus_n.mul(&zz)),
            None => Choice::from(0),
        }
    } else {
        Choice::from(0)
    };

    direct | overflow_eq
}

/// Big-endian byte-array addition, `a.len() == b.len() == out.len()`.
/// Returns `true` on carry-out. Not constant-time; used only inside
/// [`ecdsa_check_x`]'s variable-time overflow check on public values.
fn be_add(a: &[u8], b: &[u8], out: &mut [u8]) -> bool {
    let mut carry = 0u16;
    for i in (0..a.len()).rev() {
        let sum = a[i] as u16 + b[i] as u16 + carry;
        out[i] = sum as u8;
        carry = sum >> 8;
    }
    carry != 0
}
