//! Twisted Edwards group (component D): affine and extended-projective
//! point types, the unified Hisil-Wong-Carter-Dawson add/dbl formulas, and
//! RFC 8032 §5.1.2 encoding/decoding.
//!
//! Only Ed25519 (`a = -1`) is wired up today, but the group law is kept
//! generic over [`EdwardsCurve`] the same way [`crate::weierstrass`] is kept
//! generic over its curves, rather than hand-specializing to one `d`
//! constant.

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::scalar::ScalarField;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Domain parameters a twisted Edwards curve (`-x^2 + y^2 = 1 + d*x^2*y^2`)
/// must supply to use the generic group law below.
pub trait EdwardsCurve: Copy {
    /// Base field element type.
    type Field: PrimeField;
    /// Scalar field element type (mod the group order).
    type Scalar: ScalarField;

    /// The `d` coefficient.
    fn equation_d() -> Self::Field;
    /// Generator point, affine coordinates.
    fn generator() -> (Self::Field, Self::Field);
    /// Cofactor (`8` for Ed25519).
    fn cofactor() -> u64 {
        8
    }
}

/// An affine twisted Edwards point. Unlike the Weierstrass group, the
/// identity `(0, 1)` is an ordinary affine point - no separate flag needed.
#[derive(Copy, Clone, Debug)]
pub struct AffinePoint<C: EdwardsCurve> {
    pub x: C::Field,
    pub y: C::Field,
}

impl<C: EdwardsCurve> AffinePoint<C> {
    /// The identity element, `(0, 1)`.
    pub fn identity() -> Self {
        Self {
            x: C::Field::zero(),
            y: C::Field::one(),
        }
    }

    /// The curve's generator point.
    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Self { x, y }
    }

    /// Validate the curve equation `y^2 - x^2 == 1 + d*x^2*y^2`.
    /// Constant-time.
    pub fn validate(&self) -> Choice {
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = yy.sub(&xx);
        let rhs = C::Field::one().add(&C::equation_d().mul(&xx).mul(&yy));
        lhs.ct_eq(&rhs)
    }

    /// Negate: `(x, y) -> (-x, y)`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x.neg(),
            y: self.y,
        }
    }

    fn to_extended(self) -> ExtendedPoint<C> {
        ExtendedPoint {
            x: self.x,
            y: self.y,
            z: C::Field::one(),
            t: self.x.mul(&self.y),
        }
    }
}

impl<C: EdwardsCurve> ConditionallySelectable for AffinePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::Field::conditional_select(&a.x, &b.x, choice),
            y: C::Field::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl<C: EdwardsCurve> PartialEq for AffinePoint<C> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}
impl<C: EdwardsCurve> Eq for AffinePoint<C> {}

/// An extended-projective twisted Edwards point `(X, Y, Z, T)` with affine
/// equivalent `(X/Z, Y/Z)` and the auxiliary invariant `T = XY/Z`.
#[derive(Copy, Clone, Debug)]
pub struct ExtendedPoint<C: EdwardsCurve> {
    pub x: C::Field,
    pub y: C::Field,
    pub z: C::Field,
    pub t: C::Field,
}

impl<C: EdwardsCurve> ExtendedPoint<C> {
    /// The identity element, `(0, 1, 1, 0)`.
    pub fn identity() -> Self {
        Self {
            x: C::Field::zero(),
            y: C::Field::one(),
            z: C::Field::one(),
            t: C::Field::zero(),
        }
    }

    /// The curve's generator point, lifted to extended coordinates.
    pub fn generator() -> Self {
        AffinePoint::<C>::generator().to_extended()
    }

    /// `true` iff this is the identity element.
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&self.z)
    }

    /// Unified point addition ("add-2008-hwcd-3", valid for `a = -1`
    /// twisted Edwards curves - correct for both doubling and the identity
    /// without a separate code path, unlike the Weierstrass group law).
    pub fn add(&self, other: &Self) -> Self {
        let a = self.y.sub(&self.x).mul(&other.y.sub(&other.x));
        let b = self.y.add(&self.x).mul(&other.y.add(&other.x));
        let c = self.t.mul(&C::equation_d().add(&C::equation_d())).mul(&other.t);
        let d = self.z.mul(&other.z).add(&self.z.mul(&other.z));
        let e = b.sub(&a);
        let f = d.sub(&c);
        let g = d.add(&c);
        let h = b.add(&a);
        Self {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Unified doubling ("dbl-2008-hwcd"), `a = -1` specialization.
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().add(&self.z.square());
        let d = a.neg();
        let e = self.x.add(&self.y).square().sub(&a).sub(&b);
        let g = d.add(&b);
        let f = g.sub(&c);
        let h = d.sub(&b);
        Self {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Negate: `(X, Y, Z, T) -> (-X, Y, Z, -T)`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x.neg(),
            y: self.y,
            z: self.z,
            t: self.t.neg(),
        }
    }

    /// `self + (-other)`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiply by the cofactor (`8` for Ed25519), via three doublings.
    /// Used to implement cofactored verification - multiplying both sides
    /// of the check equation by `h` so low-order components cancel instead
    /// of being rejected outright.
    pub fn mul_cofactor(&self) -> Self {
        let mut p = *self;
        let mut h = C::cofactor();
        debug_assert!(h.is_power_of_two());
        while h > 1 {
            p = p.double();
            h >>= 1;
        }
        p
    }

    /// Cross-representation equality without inversion: compare
    /// `X1*Z2 == X2*Z1` and `Y1*Z2 == Y2*Z1`.
    pub fn equal(&self, other: &Self) -> Choice {
        let x1z2 = self.x.mul(&other.z);
        let x2z1 = other.x.mul(&self.z);
        let y1z2 = self.y.mul(&other.z);
        let y2z1 = other.y.mul(&self.z);
        x1z2.ct_eq(&x2z1) & y1z2.ct_eq(&y2z1)
    }

    /// Convert to affine, performing one field inversion.
    pub fn to_affine(&self) -> AffinePoint<C> {
        let z_inv = self.z.invert().unwrap_or_else(C::Field::zero);
        AffinePoint {
            x: self.x.mul(&z_inv),
            y: self.y.mul(&z_inv),
        }
    }
}

impl<C: EdwardsCurve> ConditionallySelectable for ExtendedPoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::Field::conditional_select(&a.x, &b.x, choice),
            y: C::Field::conditional_select(&a.y, &b.y, choice),
            z: C::Field::conditional_select(&a.z, &b.z, choice),
            t: C::Field::conditional_select(&a.t, &b.t, choice),
        }
    }
}

/// RFC 8032 §5.1.2 decoding: little-endian `y`, most significant bit of the
/// last byte is the sign of `x`. `field_bytes` is the curve's canonical
/// field element width (32 for Ed25519).
pub fn decode<C: EdwardsCurve>(bytes: &[u8], field_bytes: usize) -> Result<AffinePoint<C>> {
    if bytes.len() != field_bytes {
        return Err(Error::InvalidPoint);
    }
    let sign = (bytes[field_bytes - 1] >> 7) & 1;
    let mut le = [0u8; 64];
    le[..field_bytes].copy_from_slice(bytes);
    le[field_bytes - 1] &= 0x7f;
    let mut be = [0u8; 64];
    for i in 0..field_bytes {
        be[field_bytes - 1 - i] = le[i];
    }
    let y = C::Field::from_bytes(&be[..field_bytes]).ok_or(Error::InvalidPoint)?;

    let yy = y.square();
    let u = yy.sub(&C::Field::one());
    let v = C::equation_d().mul(&yy).add(&C::Field::one());
    let v_inv = v.invert().ok_or(Error::InvalidPoint)?;
    let x2 = u.mul(&v_inv);
    let mut x = x2.sqrt().ok_or(Error::InvalidPoint)?;

    let is_zero = x.is_zero();
    // x == 0 is only valid when the encoded sign bit also requests +0.
    if bool::from(is_zero) && sign == 1 {
        return Err(Error::InvalidPoint);
    }
    let wrong_sign = x.is_odd() ^ Choice::from(sign);
    x.conditional_negate(wrong_sign & !is_zero);

    let point = AffinePoint { x, y };
    if !bool::from(point.validate()) {
        return Err(Error::InvalidPoint);
    }
    Ok(point)
}

/// RFC 8032 §5.1.2 encoding into `out`, which must have length exactly
/// `field_bytes`.
pub fn encode<C: EdwardsCurve>(point: &AffinePoint<C>, field_bytes: usize, out: &mut [u8]) {
    let mut be = [0u8; 64];
    point.y.to_bytes_into(&mut be[..field_bytes]);
    for i in 0..field_bytes {
        out[i] = be[field_bytes - 1 - i];
    }
    let sign = u8::from(point.x.is_odd());
    out[field_bytes - 1] = (out[field_bytes - 1] & 0x7f) | (sign << 7);
}

trait CtOptionExt<T> {
    fn ok_or(self, err: Error) -> Result<T>;
}

impl<T> CtOptionExt<T> for CtOption<T> {
    fn ok_or(self, err: Error) -> Result<T> {
        Option::<T>::from(self).ok_or(err)
    }
}
