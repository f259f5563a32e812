//! Curve contexts (component H, randomization state): per-curve, per-caller
//! state bundling a fixed-base comb table for `k*G` with a scalar-splitting
//! blind and a coordinate-randomization blind.
//!
//! A context's masks are set once - either at construction (to the neutral,
//! no-op values) or by an explicit call to `randomize` - and stay fixed
//! until the next `randomize` call. They never change as a side effect of
//! an ordinary sign/derive operation, and they never affect an operation's
//! observable output, only the intermediate representation scalar
//! multiplication takes to get there:
//!
//! - The scalar mask splits a secret scalar `k` into `k1 + k2 = k mod n`
//!   before multiplication (`k*P == k1*P + k2*P`), so the bit pattern the
//!   ladder actually walks differs from `k`'s own bits.
//! - The point mask re-randomizes a Jacobian/extended-projective point's
//!   `(X, Y, Z[, T])` representative before multiplication, so two calls
//!   with the same logical point don't walk through the same field-element
//!   values internally.
//!
//! Both are textbook countermeasures (randomized projective coordinates;
//! additive scalar splitting), not a complete side-channel defense - see
//! this core's non-goals around side-channel resistance below the
//! timing/branch level.

use crate::edwards::{EdwardsCurve, ExtendedPoint};
use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::scalar::ScalarField;
use crate::scalar_mult::{self, edwards as edwards_mult, CombTable};
use crate::weierstrass::{ProjectivePoint, WeierstrassCurve};

fn rows_for<B: ScalarField>() -> usize {
    let bits = B::BYTES * 8;
    let w = scalar_mult::CT_WINDOW_WIDTH as usize;
    (bits + w - 1) / w
}

/// Read a field element out of a short entropy buffer by left-padding it
/// with zero bytes up to the field's canonical width. The padded value is
/// always far smaller than the modulus (the pack a context is randomized
/// with is half the curve's field width), so this never rejects - a
/// rejection would mean `randomize` was called with a degenerate buffer.
fn field_mask_from_seed<F: PrimeField>(seed: &[u8]) -> F {
    let mut buf = [0u8; 66];
    let width = F::BYTES;
    debug_assert!(seed.len() <= width);
    let pad = width - seed.len();
    buf[pad..width].copy_from_slice(seed);
    Option::from(F::from_bytes(&buf[..width])).unwrap_or_else(|| {
        // Only reachable if the seed half alone already exceeds the
        // modulus, which can't happen since it's zero-padded from a
        // strictly shorter slice than the modulus's own encoding.
        F::one()
    })
}

/// Split `k` into a `(masked, remainder)` pair with `masked + remainder ==
/// k mod n`, where `masked` is the context's persisted scalar mask.
fn split<S: ScalarField>(k: &S, mask: &S) -> (S, S) {
    (*mask, k.sub(mask))
}

/// Curve context for a short-Weierstrass curve: owns the fixed-base comb
/// table for constant-time `k*G`, plus this curve's blinding masks.
pub struct WeierstrassContext<C: WeierstrassCurve> {
    comb: CombTable<C>,
    scalar_mask: C::Scalar,
    point_mask: C::Field,
}

impl<C: WeierstrassCurve> WeierstrassContext<C> {
    /// A fresh context with blinding masks at their neutral values
    /// (`scalar_mask = 0`, `point_mask = 1`): every operation behaves
    /// exactly as the unblinded primitives until [`Self::randomize`] is
    /// called.
    pub fn new() -> Self {
        Self {
            comb: CombTable::build(ProjectivePoint::<C>::generator(), rows_for::<C::Scalar>()),
            scalar_mask: C::Scalar::zero(),
            point_mask: C::Field::one(),
        }
    }

    /// Refresh the blinding masks from caller-supplied entropy. `entropy`
    /// must be at least `2` bytes and no longer than twice the curve's
    /// field width; the first half seeds the scalar mask (reduced mod the
    /// group order), the second half seeds the point mask (a field
    /// element).
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        if entropy.len() < 2 || entropy.len() > 2 * C::Field::BYTES {
            return Err(Error::EntropyFailure);
        }
        let half = entropy.len() / 2;
        self.scalar_mask = C::Scalar::from_bytes_wide(&entropy[..half]);
        self.point_mask = field_mask_from_seed::<C::Field>(&entropy[half..]);
        // A zero point mask would collapse every re-randomized point to
        // the identity's representative; reject it in favor of the
        // neutral mask rather than silently breaking multiplication.
        if bool::from(self.point_mask.is_zero()) {
            self.point_mask = C::Field::one();
        }
        Ok(())
    }

    /// Re-randomize `p`'s Jacobian representative: `(X, Y, Z) -> (X*m^2,
    /// Y*m^3, Z*m)` for the context's point mask `m`. Leaves the point's
    /// affine value unchanged.
    fn blind_point(&self, p: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        let m2 = self.point_mask.square();
        let m3 = m2.mul(&self.point_mask);
        ProjectivePoint {
            x: p.x.mul(&m2),
            y: p.y.mul(&m3),
            z: p.z.mul(&self.point_mask),
        }
    }

    /// Constant-time `k*G` with scalar splitting applied.
    pub fn mul_base(&self, k: &C::Scalar) -> ProjectivePoint<C> {
        let (k1, k2) = split(k, &self.scalar_mask);
        let r1 = scalar_mult::ct_mul_base(&k1, &self.comb);
        let r2 = scalar_mult::ct_mul_base(&k2, &self.comb);
        r1.add(&r2)
    }

    /// Constant-time `k*P` with scalar splitting and point-coordinate
    /// blinding applied.
    pub fn mul(&self, k: &C::Scalar, p: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        let blinded = self.blind_point(p);
        let (k1, k2) = split(k, &self.scalar_mask);
        let r1 = scalar_mult::ct_mul(&k1, &blinded);
        let r2 = scalar_mult::ct_mul(&k2, &blinded);
        r1.add(&r2)
    }
}

impl<C: WeierstrassCurve> Default for WeierstrassContext<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Curve context for Ed25519's twisted Edwards group. No fixed-base comb is
/// kept here (see [`crate::scalar_mult::edwards`]'s doc comment on why a
/// plain ladder is enough for this core's one Edwards curve); the context
/// exists to carry the same blinding masks as the Weierstrass side.
pub struct EdwardsContext<C: EdwardsCurve> {
    scalar_mask: C::Scalar,
    point_mask: C::Field,
}

impl<C: EdwardsCurve> EdwardsContext<C> {
    /// A fresh context with blinding masks at their neutral values.
    pub fn new() -> Self {
        Self {
            scalar_mask: C::Scalar::zero(),
            point_mask: C::Field::one(),
        }
    }

    /// As [`WeierstrassContext::randomize`].
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        if entropy.len() < 2 || entropy.len() > 2 * C::Field::BYTES {
            return Err(Error::EntropyFailure);
        }
        let half = entropy.len() / 2;
        self.scalar_mask = C::Scalar::from_bytes_wide(&entropy[..half]);
        self.point_mask = field_mask_from_seed::<C::Field>(&entropy[half..]);
        if bool::from(self.point_mask.is_zero()) {
            self.point_mask = C::Field::one();
        }
        Ok(())
    }

    fn blind_point(&self, p: &ExtendedPoint<C>) -> ExtendedPoint<C> {
        ExtendedPoint {
            x: p.x.mul(&self.point_mask),
            y: p.y.mul(&self.point_mask),
            z: p.z.mul(&self.point_mask),
            t: p.t.mul(&self.point_mask),
        }
    }

    /// Constant-time `k*G` with scalar splitting applied.
    pub fn mul_base(&self, k: &C::Scalar) -> ExtendedPoint<C> {
        self.mul(k, &ExtendedPoint::<C>::generator())
    }

    /// Constant-time `k*P` with scalar splitting and point blinding
    /// applied.
    pub fn mul(&self, k: &C::Scalar, p: &ExtendedPoint<C>) -> ExtendedPoint<C> {
        let blinded = self.blind_point(p);
        let (k1, k2) = split(k, &self.scalar_mask);
        let r1 = edwards_mult::ct_mul(&k1, &blinded);
        let r2 = edwards_mult::ct_mul(&k2, &blinded);
        r1.add(&r2)
    }
}

impl<C: EdwardsCurve> Default for EdwardsContext<C> {
    fn default() -> Self {
        Self::new()
    }
}
