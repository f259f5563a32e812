//! ECDSA verifying (public) key, generic over any curve implementing
//! [`elliptic_curve::weierstrass::WeierstrassCurve`].

use elliptic_curve::field::PrimeField;
use elliptic_curve::weierstrass::{sec1_decode, sec1_encode, AffinePoint, ProjectivePoint, WeierstrassCurve};
use elliptic_curve::{Error, Result};

use crate::hazmat;
use crate::recovery::RecoveryId;
use crate::signature::Signature;

/// An ECDSA public key, `pub = priv*G`.
///
/// Carries a precomputed width-5 odd-multiple wNAF table for the curve's
/// generator, reused by every [`Self::verify_prehash`]/[`Self::recover_prehash`]
/// call against this key rather than rebuilt per call.
pub struct VerifyingKey<C: WeierstrassCurve> {
    point: ProjectivePoint<C>,
    g_table: alloc::vec::Vec<AffinePoint<C>>,
}

/// Width used for the cached generator odd-multiple table - must match
/// [`elliptic_curve::scalar_mult::vt_mul_double_base`]'s own `G_WINDOW`
/// (and the window `Secp256k1::vt_joint_mul` passes its GLV variant) so the
/// table this key caches is the one verification actually indexes into.
const G_WINDOW: u32 = 5;

impl<C: WeierstrassCurve> VerifyingKey<C> {
    /// Wrap a validated public point directly (e.g. a point derived from a
    /// [`crate::SigningKey`]). Does not re-validate `point` is on-curve; use
    /// [`Self::from_sec1_bytes`] to import untrusted, externally supplied
    /// key material.
    pub fn from_point(point: ProjectivePoint<C>) -> Self {
        let g_table = elliptic_curve::scalar_mult::vt_odd_multiples(&ProjectivePoint::<C>::generator(), G_WINDOW);
        Self { point, g_table }
    }

    /// Parse a SEC1-encoded public key (compressed, uncompressed, or
    /// hybrid). Rejects the identity and any off-curve point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let field_bytes = <C::Field as PrimeField>::BYTES;
        let affine: AffinePoint<C> = sec1_decode(bytes, field_bytes)?;
        if bool::from(affine.is_identity()) {
            return Err(Error::InvalidPublicKey);
        }
        let g_table = elliptic_curve::scalar_mult::vt_odd_multiples(&ProjectivePoint::<C>::generator(), G_WINDOW);
        Ok(Self {
            point: ProjectivePoint { x: affine.x, y: affine.y, z: C::Field::one() },
            g_table,
        })
    }

    /// Export as a SEC1-encoded public key, writing into `out` (length `1 +
    /// field_bytes` compressed, `1 + 2*field_bytes` uncompressed).
    pub fn to_sec1_bytes_into(&self, compressed: bool, out: &mut [u8]) -> usize {
        let field_bytes = <C::Field as PrimeField>::BYTES;
        sec1_encode(&self.point.to_affine(), field_bytes, compressed, out)
    }

    /// Export as a SEC1-encoded public key.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    pub fn to_sec1_bytes(&self, compressed: bool) -> alloc::vec::Vec<u8> {
        let field_bytes = <C::Field as PrimeField>::BYTES;
        let len = if compressed { 1 + field_bytes } else { 1 + 2 * field_bytes };
        let mut out = alloc::vec![0u8; len];
        self.to_sec1_bytes_into(compressed, &mut out);
        out
    }

    /// The underlying public point.
    pub fn as_point(&self) -> &ProjectivePoint<C> {
        &self.point
    }

    /// Verify a signature against an already-hashed message digest
    /// `prehash` (§4.F `Verify`).
    pub fn verify_prehash(&self, prehash: &[u8], sig: &Signature<C>) -> Result<()> {
        let z = hazmat::bits2field::<C>(prehash);
        hazmat::verify_prehashed::<C>(&self.g_table, &self.point, &z, sig)
    }

    /// Recover the signer's public key from an already-hashed message
    /// digest, signature, and recovery id (§4.F `Recover`). Does not use
    /// `self`'s own point; this is a free-standing reconstruction callers
    /// typically invoke as `VerifyingKey::recover_from_prehash` against a
    /// shared generator table rather than an existing key.
    pub fn recover_from_prehash(
        prehash: &[u8],
        sig: &Signature<C>,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        let g_table = elliptic_curve::scalar_mult::vt_odd_multiples(&ProjectivePoint::<C>::generator(), G_WINDOW);
        let z = hazmat::bits2field::<C>(prehash);
        let point = hazmat::recover_from_prehashed::<C>(&g_table, &z, sig, recovery_id)?;
        Ok(Self { point, g_table })
    }

    /// As [`Self::recover_from_prehash`], reusing this key's cached
    /// generator table instead of rebuilding it. The returned key's point
    /// need not equal `self`'s; this exists for callers who already hold a
    /// `VerifyingKey` for the same curve and want to amortize the table.
    pub fn recover_prehash(&self, prehash: &[u8], sig: &Signature<C>, recovery_id: RecoveryId) -> Result<Self> {
        let z = hazmat::bits2field::<C>(prehash);
        let point = hazmat::recover_from_prehashed::<C>(&self.g_table, &z, sig, recovery_id)?;
        Ok(Self { point, g_table: self.g_table.clone() })
    }
}

impl<C: WeierstrassCurve> Clone for VerifyingKey<C> {
    fn clone(&self) -> Self {
        Self { point: self.point, g_table: self.g_table.clone() }
    }
}

impl<C: WeierstrassCurve> PartialEq for VerifyingKey<C> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.point.equal(&other.point))
    }
}
impl<C: WeierstrassCurve> Eq for VerifyingKey<C> {}

impl<C: WeierstrassCurve> core::fmt::Debug for VerifyingKey<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let field_bytes = <C::Field as PrimeField>::BYTES;
        let mut buf = [0u8; 133];
        let n = sec1_encode(&self.point.to_affine(), field_bytes, true, &mut buf);
        f.debug_struct("VerifyingKey").field("point", &&buf[..n]).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::curves::p256::P256;

    #[test]
    fn rejects_identity_public_key() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        assert!(VerifyingKey::<P256>::from_sec1_bytes(&bytes).is_err());
    }
}
