//! Ed25519 public keys and signature verification.

use elliptic_curve::curves::ed25519::Ed25519;
use elliptic_curve::edwards::{self, AffinePoint};
use elliptic_curve::{Error, Result};

use crate::hazmat::{self, MAX_CONTEXT_LEN};
use crate::Signature;

/// An Ed25519 public key: a decoded, validated curve point plus its
/// original 32-byte compressed encoding (kept around since signing and
/// verification both hash it raw, per RFC 8032 §5.1.6/§5.1.7).
#[derive(Copy, Clone)]
pub struct VerifyingKey {
    point: AffinePoint<Ed25519>,
    bytes: [u8; 32],
}

impl VerifyingKey {
    /// Wrap an already-decoded point, re-encoding it canonically.
    pub fn from_affine(point: AffinePoint<Ed25519>) -> Self {
        let mut bytes = [0u8; 32];
        edwards::encode::<Ed25519>(&point, 32, &mut bytes);
        Self { point, bytes }
    }

    /// Decode a public key from its 32-byte compressed encoding (RFC 8032
    /// §5.1.2/§5.1.5). Rejects encodings that don't decode to a point on
    /// the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidPublicKey);
        }
        let point = hazmat::decode_point(bytes).map_err(|_| Error::InvalidPublicKey)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Self { point, bytes: arr })
    }

    /// The public key's canonical 32-byte compressed encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// The decoded curve point.
    pub fn as_affine(&self) -> &AffinePoint<Ed25519> {
        &self.point
    }

    /// Verify a plain Ed25519 signature over `msg` (RFC 8032 §5.1.7, no
    /// `dom2` prefix).
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        hazmat::verify(&self.point, &self.bytes, &signature.to_bytes(), msg, None)
    }

    /// Verify an Ed25519ctx signature over `msg` under `context` (RFC 8032
    /// §5.3, non-empty context string; `phflag = 0`).
    pub fn verify_with_context(&self, msg: &[u8], context: &[u8], signature: &Signature) -> Result<()> {
        if context.len() > MAX_CONTEXT_LEN {
            return Err(Error::InvalidSignature);
        }
        hazmat::verify(&self.point, &self.bytes, &signature.to_bytes(), msg, Some((false, context)))
    }

    /// Verify an Ed25519ph signature over the SHA-512 prehash `digest` of
    /// the message (RFC 8032 §5.2, `phflag = 1`).
    pub fn verify_prehashed(&self, digest: &[u8; 64], context: &[u8], signature: &Signature) -> Result<()> {
        if context.len() > MAX_CONTEXT_LEN {
            return Err(Error::InvalidSignature);
        }
        hazmat::verify(&self.point, &self.bytes, &signature.to_bytes(), digest, Some((true, context)))
    }
}

impl core::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?})", &self.bytes[..])
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
impl Eq for VerifyingKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SigningKey;

    #[test]
    fn sign_then_verify_roundtrips() {
        let sk = SigningKey::from_bytes(&[0x42; 32]);
        let vk = sk.verifying_key();
        let msg = b"the quick brown fox jumps over the lazy dog";
        let sig = sk.sign(msg);
        assert!(vk.verify(msg, &sig).is_ok());
    }

    // Same known-answer vector as `signing::tests::known_answer_pubkey_and_signature`,
    // checked here from the verifier's side: the externally sourced public
    // key and signature must verify against each other without this crate
    // having derived either one itself.
    #[test]
    fn known_answer_verifies() {
        let pub_bytes =
            hex_literal::hex!("750dcf38c4579c65ea16160c51c6422d72763e697fd86d095e91733b1aab4b7e");
        let msg = hex_literal::hex!("9d89d6bd578361a99f018b2348ed97f1dd06d179e7e1a2baee59560abe54af06");
        let sig_bytes = hex_literal::hex!(
            "e233f6440e5a88c8dc206bfb5ee24197292b89396b26390a4257067001575a0661955a70d9144f929efd0ff52012a87489e105954509762d82b269ec82527b08"
        );

        let vk = VerifyingKey::from_bytes(&pub_bytes).unwrap();
        let sig = Signature::from_bytes(&sig_bytes[..]).unwrap();
        assert!(vk.verify(&msg, &sig).is_ok());
    }

    #[test]
    fn tweaked_signature_fails() {
        let sk = SigningKey::from_bytes(&[0x11; 32]);
        let vk = sk.verifying_key();
        let msg = b"hello";
        let mut sig_bytes = sk.sign(msg).to_bytes();
        sig_bytes[0] ^= 1;
        let sig = Signature::from_bytes(&sig_bytes[..]).unwrap();
        assert!(vk.verify(msg, &sig).is_err());
    }

    #[test]
    fn context_changes_signature() {
        let sk = SigningKey::from_bytes(&[0x77; 32]);
        let vk = sk.verifying_key();
        let msg = b"hello";
        let sig_a = sk.sign_with_context(msg, b"context-a").unwrap();
        let sig_b = sk.sign_with_context(msg, b"context-b").unwrap();
        assert!(vk.verify_with_context(msg, b"context-a", &sig_a).is_ok());
        assert!(vk.verify_with_context(msg, b"context-b", &sig_b).is_ok());
        assert!(vk.verify_with_context(msg, b"context-b", &sig_a).is_err());
    }
}
