//! ECDSA signing key, generic over any curve implementing
//! [`elliptic_curve::weierstrass::WeierstrassCurve`].

use elliptic_curve::context::WeierstrassContext;
use elliptic_curve::scalar::ScalarField;
use elliptic_curve::weierstrass::WeierstrassCurve;
use elliptic_curve::{Error, Result};
use hmac::digest::{BlockSizeUser, Digest, FixedOutputReset};
use zeroize::Zeroize;

use crate::hazmat::{self, bits2field};
use crate::recovery::RecoveryId;
use crate::signature::Signature;
use crate::verifying::VerifyingKey;

/// An ECDSA private key: a secret nonzero scalar `d` in `[1, n-1]`, plus the
/// curve context used to evaluate `d*G` and sign against it.
///
/// Every constructor rejects a zero scalar, matching §4.F's private key
/// encoding contract. The scalar is wiped on drop.
pub struct SigningKey<C: WeierstrassCurve>
where
    C::Scalar: Zeroize,
{
    ctx: WeierstrassContext<C>,
    secret_scalar: C::Scalar,
}

impl<C: WeierstrassCurve> SigningKey<C>
where
    C::Scalar: Zeroize,
{
    /// Parse a private key from its canonical big-endian encoding
    /// (`C::Scalar::BYTES` wide).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let secret_scalar =
            Option::from(C::Scalar::from_bytes_nonzero(bytes)).ok_or(Error::InvalidPrivateKey)?;
        Ok(Self { ctx: WeierstrassContext::new(), secret_scalar })
    }

    /// Wrap an already-parsed scalar as a signing key, rejecting zero.
    pub fn from_scalar(secret_scalar: C::Scalar) -> Result<Self> {
        if bool::from(secret_scalar.is_zero()) {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(Self { ctx: WeierstrassContext::new(), secret_scalar })
    }

    /// Refresh this key's scalar-splitting/point-blinding masks from fresh
    /// entropy (see [`WeierstrassContext::randomize`]).
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        self.ctx.randomize(entropy)
    }

    /// Generate a cryptographically random signing key.
    #[cfg(feature = "rand_core")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rand_core")))]
    pub fn random<R: rand_core::CryptoRng + rand_core::RngCore>(rng: &mut R) -> Self {
        let secret_scalar = C::Scalar::random(rng);
        Self { ctx: WeierstrassContext::new(), secret_scalar }
    }

    /// The corresponding verifying (public) key, `d*G`.
    pub fn verifying_key(&self) -> VerifyingKey<C> {
        VerifyingKey::from_point(self.ctx.mul_base(&self.secret_scalar))
    }

    /// Sign an already-hashed message digest `prehash`, deriving the
    /// ephemeral nonce deterministically via RFC 6979 HMAC-DRBG with hash
    /// `D` (§4.F). `D` need not match the curve's own canonical hash; it is
    /// only RFC 6979's DRBG hash, which may differ from the hash that
    /// produced `prehash` in principle, though in practice callers use the
    /// same one for both.
    ///
    /// Loops internally on the negligible-probability `r == 0`/`s == 0`
    /// case (§4.F step "If r = 0 restart with the next DRBG output");
    /// termination is guaranteed by the DRBG's output distribution, not by
    /// an iteration cap.
    pub fn sign_prehash<D>(&self, prehash: &[u8]) -> Result<(Signature<C>, RecoveryId)>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        let z = bits2field::<C>(prehash);
        loop {
            let k = rfc6979::generate_k::<C::Scalar, D>(&self.secret_scalar, C::Scalar::BYTES, prehash, b"");
            match hazmat::sign_prehashed::<C>(&self.ctx, &self.secret_scalar, &k, &z) {
                Ok(result) => return Ok(result),
                Err(Error::InvalidSignature) => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<C: WeierstrassCurve> Drop for SigningKey<C>
where
    C::Scalar: Zeroize,
{
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::curves::p256::P256;
    use sha2::{Digest, Sha256};

    #[test]
    fn sign_then_verify_roundtrips() {
        let sk = SigningKey::<P256>::from_bytes(&hex_literal::hex!(
            "001234567890abcdef1234567890abcdef1234567890abcdef1234567890abcd"
        ))
        .unwrap();
        let vk = sk.verifying_key();
        let prehash = Sha256::digest(b"sample");
        let (sig, recovery_id) = sk.sign_prehash::<Sha256>(&prehash).unwrap();
        assert!(vk.verify_prehash(&prehash, &sig).is_ok());

        let recovered = vk.clone().recover_prehash(&prehash, &sig, recovery_id).unwrap();
        assert_eq!(recovered, vk);
    }

    #[test]
    fn rejects_zero_private_key() {
        assert!(SigningKey::<P256>::from_bytes(&[0u8; 32]).is_err());
    }

    #[cfg(feature = "rand_core")]
    #[test]
    fn random_keys_produce_verifiable_signatures() {
        let mut rng = rand_core::OsRng;
        let sk = SigningKey::<P256>::random(&mut rng);
        let vk = sk.verifying_key();
        let prehash = Sha256::digest(b"random key test");
        let (sig, _recovery_id) = sk.sign_prehash::<Sha256>(&prehash).unwrap();
        assert!(vk.verify_prehash(&prehash, &sig).is_ok());
    }
}
