//! Ed25519 private keys and signing.

use elliptic_curve::context::EdwardsContext;
use elliptic_curve::curves::ed25519::{Ed25519, Scalar};
use elliptic_curve::{Error, Result};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::hazmat::{self, MAX_CONTEXT_LEN};
use crate::{Signature, VerifyingKey};

/// An Ed25519 signing key: a 32-byte seed, its RFC 8032 §5.1.5 expansion
/// (clamped scalar `a` and nonce prefix), and the derived public key,
/// cached so repeated signing doesn't re-run the base-point multiplication.
pub struct SigningKey {
    seed: [u8; 32],
    scalar: Scalar,
    prefix: [u8; 32],
    verifying_key: VerifyingKey,
    ctx: EdwardsContext<Ed25519>,
}

impl SigningKey {
    /// Derive a signing key from a 32-byte seed (RFC 8032 calls this the
    /// private key). Unlike ECDSA's scalar import, every 32-byte string is
    /// a valid Ed25519 seed - clamping always produces a scalar in range,
    /// so this cannot fail.
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        let ctx = EdwardsContext::new();
        let expanded = hazmat::expand_seed(seed);
        let a_point = ctx.mul_base(&expanded.scalar).to_affine();
        let verifying_key = VerifyingKey::from_affine(a_point);
        Self {
            seed: *seed,
            scalar: expanded.scalar,
            prefix: expanded.prefix,
            verifying_key,
            ctx,
        }
    }

    /// Generate a fresh signing key from a CSPRNG.
    #[cfg(feature = "rand_core")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rand_core")))]
    pub fn generate<R: rand_core::CryptoRng + rand_core::RngCore>(rng: &mut R) -> Self {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        Self::from_bytes(&seed)
    }

    /// Refresh this key's blinding context from fresh entropy. See
    /// [`elliptic_curve::context::EdwardsContext::randomize`]; does not
    /// change the key's public identity or any future signature's bytes.
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        self.ctx.randomize(entropy)
    }

    /// This key's public counterpart.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// The original 32-byte seed.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.seed
    }

    /// Sign `msg` with plain Ed25519 (RFC 8032 §5.1.6, no context).
    pub fn sign(&self, msg: &[u8]) -> Signature {
        let pub_bytes = self.verifying_key.to_bytes();
        let raw = hazmat::sign(&self.ctx, &self.scalar, &self.prefix, &pub_bytes, msg, None);
        Signature::from(raw)
    }

    /// Sign `msg` with Ed25519ctx (RFC 8032 §5.3): `context` must be no
    /// more than 255 bytes. An empty context is legal here but produces a
    /// signature distinct from plain Ed25519, since Ed25519ctx always
    /// emits the `dom2` prefix and plain Ed25519 never does.
    pub fn sign_with_context(&self, msg: &[u8], context: &[u8]) -> Result<Signature> {
        if context.len() > MAX_CONTEXT_LEN {
            return Err(Error::InvalidSignature);
        }
        let pub_bytes = self.verifying_key.to_bytes();
        let raw = hazmat::sign(&self.ctx, &self.scalar, &self.prefix, &pub_bytes, msg, Some((false, context)));
        Ok(Signature::from(raw))
    }

    /// Sign the SHA-512 prehash of `msg` with Ed25519ph (RFC 8032 §5.2).
    /// `context` must be no more than 255 bytes (an empty context is the
    /// common case and is explicitly permitted by the RFC).
    pub fn sign_prehashed(&self, msg: &[u8], context: &[u8]) -> Result<Signature> {
        if context.len() > MAX_CONTEXT_LEN {
            return Err(Error::InvalidSignature);
        }
        let hash = Sha512::digest(msg);
        let mut digest = [0u8; 64];
        digest.copy_from_slice(&hash);
        let pub_bytes = self.verifying_key.to_bytes();
        let raw = hazmat::sign(&self.ctx, &self.scalar, &self.prefix, &pub_bytes, &digest, Some((true, context)));
        Ok(Signature::from(raw))
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.seed.zeroize();
        self.prefix.zeroize();
    }
}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SigningKey(public: {:?})", self.verifying_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_is_deterministic() {
        let sk = SigningKey::from_bytes(&[0x24; 32]);
        let msg = b"deterministic nonces only";
        assert_eq!(sk.sign(msg).to_bytes(), sk.sign(msg).to_bytes());
    }

    #[test]
    fn distinct_seeds_yield_distinct_public_keys() {
        let a = SigningKey::from_bytes(&[0x01; 32]);
        let b = SigningKey::from_bytes(&[0x02; 32]);
        assert_ne!(a.verifying_key().to_bytes(), b.verifying_key().to_bytes());
    }

    #[test]
    #[cfg(feature = "rand_core")]
    fn generate_produces_verifiable_keys() {
        let mut rng = rand_core::OsRng;
        let sk = SigningKey::generate(&mut rng);
        let vk = sk.verifying_key();
        let sig = sk.sign(b"generated key");
        assert!(vk.verify(b"generated key", &sig).is_ok());
    }

    // RFC 8032 §5.1.5/§5.1.6 are fully deterministic - no nonce ambiguity -
    // so seed, public key, and signature all reproduce bit-exactly against
    // an external known-answer vector, checked independently of this crate.
    #[test]
    fn known_answer_pubkey_and_signature() {
        let seed = hex_literal::hex!("d74c0153c5cdf48b7b3e602c2e4b36af2be662e6d783845fc4960f16250d23be");
        let msg = hex_literal::hex!("9d89d6bd578361a99f018b2348ed97f1dd06d179e7e1a2baee59560abe54af06");
        let expected_pub =
            hex_literal::hex!("750dcf38c4579c65ea16160c51c6422d72763e697fd86d095e91733b1aab4b7e");
        let expected_sig = hex_literal::hex!(
            "e233f6440e5a88c8dc206bfb5ee24197292b89396b26390a4257067001575a0661955a70d9144f929efd0ff52012a87489e105954509762d82b269ec82527b08"
        );

        let sk = SigningKey::from_bytes(&seed);
        assert_eq!(sk.verifying_key().to_bytes(), expected_pub);

        let sig = sk.sign(&msg);
        assert_eq!(sig.to_bytes(), expected_sig);
    }

    #[test]
    fn prehashed_sign_then_verify_roundtrips() {
        let sk = SigningKey::from_bytes(&[0x55; 32]);
        let vk = sk.verifying_key();
        let msg = b"hash me first";
        let sig = sk.sign_prehashed(msg, b"").unwrap();
        let digest = Sha512::digest(msg);
        let mut digest_bytes = [0u8; 64];
        digest_bytes.copy_from_slice(&digest);
        assert!(vk.verify_prehashed(&digest_bytes, b"", &sig).is_ok());
    }
}
