//! Low-level ECDSA primitives that operate directly on scalars and points,
//! bypassing key management and the hash-interface wrapping
//! [`crate::SigningKey`]/[`crate::VerifyingKey`] provide.
//!
//! <div class="warning">
//!
//! Using these functions directly requires carefully reading and following
//! the caller obligations documented on each one. Reusing a nonce, skipping
//! low-S normalization, or calling a `vt` scalar-multiplication path with a
//! secret scalar silently breaks ECDSA's security guarantees without
//! producing any visible error. Prefer [`crate::SigningKey`] and
//! [`crate::VerifyingKey`] unless you are implementing a protocol that
//! genuinely needs this level of control (e.g. threshold signing, where the
//! nonce commitment is produced by a different party).
//!
//! </div>

use elliptic_curve::context::WeierstrassContext;
use elliptic_curve::field::PrimeField;
use elliptic_curve::scalar::ScalarField;
use elliptic_curve::weierstrass::{ecdsa_check_x, AffinePoint, ProjectivePoint, WeierstrassCurve};
use elliptic_curve::{Error, Result};
use subtle::{Choice, ConditionallySelectable};

use crate::recovery::RecoveryId;
use crate::signature::Signature;

const MAX_BYTES: usize = 66;

/// Reduce a message digest to the scalar FIPS 186-4 calls `z`: the leftmost
/// `C::Scalar::BYTES * 8` bits of `hash`, interpreted as a big-endian
/// integer and reduced modulo the group order `n`.
///
/// A digest narrower than the curve's scalar width is zero-extended on the
/// left (its bits are already the "leftmost" available); a wider one is
/// truncated to the leftmost whole bytes. This mirrors
/// [`elliptic_curve::scalar::ScalarField::from_bytes_wide`]'s reduction, just
/// fed the digest at the width the standard specifies rather than the
/// digest's native width.
pub fn bits2field<C: WeierstrassCurve>(hash: &[u8]) -> C::Scalar {
    let n = C::Scalar::BYTES;
    let mut buf = [0u8; MAX_BYTES];
    if hash.len() >= n {
        buf[..n].copy_from_slice(&hash[..n]);
    } else {
        buf[n - hash.len()..n].copy_from_slice(hash);
    }
    C::Scalar::from_bytes_wide(&buf[..n])
}

/// Sign prehash `z` with private scalar `priv_scalar` and ephemeral scalar
/// `k`, per FIPS 186-4's ECDSA signature generation (§4.F). Returns the
/// low-S-normalized signature and its recovery id.
///
/// Callers own `k`'s derivation: reusing `k` across two different `z` for
/// the same `priv_scalar`, or using a `k` an attacker can predict or
/// influence, leaks `priv_scalar`. [`crate::SigningKey::sign_prehash`]
/// derives `k` deterministically per RFC 6979 so ordinary callers never
/// need to call this directly.
pub fn sign_prehashed<C: WeierstrassCurve>(
    ctx: &WeierstrassContext<C>,
    priv_scalar: &C::Scalar,
    k: &C::Scalar,
    z: &C::Scalar,
) -> Result<(Signature<C>, RecoveryId)> {
    let r_point = ctx.mul_base(k).to_affine();
    if bool::from(r_point.is_identity()) {
        return Err(Error::InvalidSignature);
    }

    let field_bytes = <C::Field as PrimeField>::BYTES;
    let mut x_bytes = [0u8; MAX_BYTES];
    r_point.x.to_bytes_into(&mut x_bytes[..field_bytes]);
    let r = C::Scalar::from_bytes_wide(&x_bytes[..field_bytes]);
    if bool::from(r.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let mut n_bytes = [0u8; MAX_BYTES];
    C::Scalar::modulus_into(&mut n_bytes[..field_bytes]);
    let x_overflowed = x_bytes[..field_bytes] >= n_bytes[..field_bytes];

    let k_inv = Option::from(k.invert()).ok_or(Error::InvalidSignature)?;
    let s = k_inv.mul(&z.add(&r.mul(priv_scalar)));
    if bool::from(s.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let is_high = s.is_high();
    let s_norm = C::Scalar::conditional_select(&s, &s.neg(), is_high);
    let y_odd = bool::from(r_point.y.is_odd()) ^ bool::from(is_high);

    let recovery_id = RecoveryId::new(y_odd, x_overflowed);
    let sig = Signature::from_scalars(r, s_norm)?;
    Ok((sig, recovery_id))
}

/// Verify prehash `z` against `sig` under public point `pubkey`, per FIPS
/// 186-4's ECDSA signature verification (§4.F). `g_table` is the curve's
/// generator odd-multiple wNAF table (width 5), reused across verifications
/// against the same curve.
///
/// `pubkey` and `sig` are both public values; this runs entirely on the
/// variable-time path.
pub fn verify_prehashed<C: WeierstrassCurve>(
    g_table: &[AffinePoint<C>],
    pubkey: &ProjectivePoint<C>,
    z: &C::Scalar,
    sig: &Signature<C>,
) -> Result<()> {
    let r = sig.r();
    let s = sig.s();
    if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let s_inv = Option::from(s.invert()).ok_or(Error::InvalidSignature)?;
    let u1 = z.mul(&s_inv);
    let u2 = r.mul(&s_inv);

    let r_point = C::vt_joint_mul(&u1, g_table, &u2, pubkey);
    if bool::from(r_point.is_identity()) {
        return Err(Error::InvalidSignature);
    }

    if bool::from(ecdsa_check_x::<C>(&r_point, r)) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// Reconstruct `R` from `(r, recovery_id)`: `R.x = r`, plus `n` if the
/// recovery id's overflow bit is set; `R.y`'s parity follows the recovery
/// id's bit 0.
fn recover_r<C: WeierstrassCurve>(r: &C::Scalar, recovery_id: RecoveryId) -> Result<AffinePoint<C>> {
    let field_bytes = <C::Field as PrimeField>::BYTES;
    let mut r_bytes = [0u8; MAX_BYTES];
    r.to_bytes_into(&mut r_bytes[..field_bytes]);

    let x = if recovery_id.is_x_overflowed() {
        let mut n_bytes = [0u8; MAX_BYTES];
        C::Scalar::modulus_into(&mut n_bytes[..field_bytes]);
        let mut sum = [0u8; MAX_BYTES];
        let mut carry = 0u16;
        for i in (0..field_bytes).rev() {
            let t = r_bytes[i] as u16 + n_bytes[i] as u16 + carry;
            sum[i] = t as u8;
            carry = t >> 8;
        }
        if carry != 0 {
            return Err(Error::InvalidRecoveryId);
        }
        Option::from(C::Field::from_bytes(&sum[..field_bytes])).ok_or(Error::InvalidRecoveryId)?
    } else {
        Option::from(C::Field::from_bytes(&r_bytes[..field_bytes])).ok_or(Error::InvalidRecoveryId)?
    };

    let rhs = x.square().mul(&x).add(&C::equation_a().mul(&x)).add(&C::equation_b());
    let mut y = Option::from(rhs.sqrt()).ok_or(Error::InvalidRecoveryId)?;
    let want_odd = Choice::from(recovery_id.is_y_odd() as u8);
    let is_odd = y.is_odd();
    y.conditional_negate(is_odd ^ want_odd);

    let point = AffinePoint { x, y, infinity: Choice::from(0) };
    if !bool::from(point.validate()) {
        return Err(Error::InvalidRecoveryId);
    }
    Ok(point)
}

/// Recover the public key from a prehash `z`, signature, and recovery id,
/// per FIPS 186-4's public key recovery operation. Rejects a recovered
/// point that turns out to be the identity.
pub fn recover_from_prehashed<C: WeierstrassCurve>(
    g_table: &[AffinePoint<C>],
    z: &C::Scalar,
    sig: &Signature<C>,
    recovery_id: RecoveryId,
) -> Result<ProjectivePoint<C>> {
    let r = sig.r();
    let s = sig.s();
    if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
        return Err(Error::InvalidSignature);
    }

    let r_affine = recover_r::<C>(r, recovery_id)?;
    let r_jac = ProjectivePoint { x: r_affine.x, y: r_affine.y, z: C::Field::one() };

    let r_inv = Option::from(r.invert()).ok_or(Error::InvalidRecoveryId)?;
    let u1 = z.neg().mul(&r_inv);
    let u2 = s.mul(&r_inv);

    let pub_point = C::vt_joint_mul(&u1, g_table, &u2, &r_jac);
    if bool::from(pub_point.is_identity()) {
        return Err(Error::InvalidPublicKey);
    }
    Ok(pub_point)
}
