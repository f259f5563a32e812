//! Low-level EdDSA primitives operating directly on this workspace's
//! [`elliptic_curve::edwards`] group and [`elliptic_curve::curves::ed25519`]
//! field/scalar types: seed expansion and clamping, the dom2 prefix RFC
//! 8032 §5.2/§5.3 define for Ed25519ph/Ed25519ctx, and the raw sign/verify
//! math [`crate::SigningKey`]/[`crate::VerifyingKey`] wrap.
//!
//! Mirrors the split `ecdsa::hazmat` uses for component F: key management
//! stays in `signing`/`verifying`, the math that must not be gotten wrong
//! (nonce derivation, the challenge hash, the cofactored check) lives here
//! where it's exercised by one code path regardless of which of the three
//! RFC 8032 variants is in play.

use elliptic_curve::context::EdwardsContext;
use elliptic_curve::curves::ed25519::{Ed25519, Scalar};
use elliptic_curve::edwards::{self, AffinePoint, EdwardsCurve, ExtendedPoint};
use elliptic_curve::field::PrimeField;
use elliptic_curve::scalar::ScalarField;
use elliptic_curve::scalar_mult::edwards::vt_mul;
use elliptic_curve::{Error, Result};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Ed25519's field/scalar canonical encoded width.
pub(crate) const FIELD_BYTES: usize = 32;

/// The dom2 prefix RFC 8032 §5.2/§5.3 define: `"SigEd25519 no Ed25519
/// collisions"`, followed by a one-byte `phflag` and a one-byte context
/// length before the context string itself.
const DOM2_PREFIX: &[u8] = b"SigEd25519 no Ed25519 collisions";

/// Maximum RFC 8032 context length (the length prefix is a single byte).
pub(crate) const MAX_CONTEXT_LEN: usize = 255;

/// A seed's expansion per RFC 8032 §5.1.5: the clamped secret scalar `a`
/// and the 32-byte nonce-derivation prefix.
pub(crate) struct ExpandedSeed {
    pub(crate) scalar: Scalar,
    pub(crate) prefix: [u8; 32],
}

/// Clamp a little-endian 32-byte scalar per RFC 8032 §5.1.5: clear bits
/// 0-2 of the first byte, clear bit 7 and set bit 6 of the last byte. The
/// result, read as a little-endian integer, always lies in `[2^254, 2^255)`
/// and is a multiple of the cofactor `8`.
fn clamp(bytes: &mut [u8; 32]) {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
}

/// Reverse a fixed-size byte array - converts between RFC 8032's
/// little-endian octet-string convention and this workspace's big-endian
/// [`elliptic_curve::field::PrimeField`]/[`ScalarField`] encoding.
fn reverse<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    for i in 0..N {
        out[i] = bytes[N - 1 - i];
    }
    out
}

/// Expand a 32-byte seed into its clamped scalar and nonce prefix (§4.G
/// `Clamp`).
pub(crate) fn expand_seed(seed: &[u8; 32]) -> ExpandedSeed {
    let hash = Sha512::digest(seed);
    let mut a_le = [0u8; 32];
    a_le.copy_from_slice(&hash[..32]);
    clamp(&mut a_le);
    let a_be: [u8; 32] = reverse(&a_le);
    let scalar = Scalar::from_bytes_wide(&a_be);
    a_le.zeroize();

    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&hash[32..64]);
    ExpandedSeed { scalar, prefix }
}

/// `SHA-512(dom2(phflag, context) ‖ parts[0] ‖ parts[1] ‖ ...)`, reduced
/// modulo the group order. `dom2` is omitted entirely when `dom2` is
/// `None` - pure Ed25519 (§4.G "Context/Phflag"), matching RFC 8032 §5.1
/// exactly rather than always emitting a (possibly zero-length) prefix.
fn hash_to_scalar(dom2: Option<(bool, &[u8])>, parts: &[&[u8]]) -> Scalar {
    let mut h = Sha512::new();
    if let Some((phflag, context)) = dom2 {
        h.update(DOM2_PREFIX);
        h.update([phflag as u8, context.len() as u8]);
        h.update(context);
    }
    for part in parts {
        h.update(part);
    }
    let digest = h.finalize();
    let be: [u8; 64] = reverse(&digest);
    Scalar::from_bytes_wide(&be)
}

fn encode_point(p: &AffinePoint<Ed25519>) -> [u8; FIELD_BYTES] {
    let mut out = [0u8; FIELD_BYTES];
    edwards::encode::<Ed25519>(p, FIELD_BYTES, &mut out);
    out
}

/// Decode a compressed Edwards point (RFC 8032 §5.1.3). `bytes` must be
/// exactly 32 bytes; used directly by [`crate::VerifyingKey::from_bytes`]
/// so public-key import and the `R` component of a signature share the
/// same validation.
pub(crate) fn decode_point(bytes: &[u8]) -> Result<AffinePoint<Ed25519>> {
    edwards::decode::<Ed25519>(bytes, FIELD_BYTES)
}

fn encode_scalar(s: &Scalar) -> [u8; FIELD_BYTES] {
    let mut be = [0u8; FIELD_BYTES];
    s.to_bytes_into(&mut be);
    reverse(&be)
}

/// Decode a signature's `S` component. Rejects non-canonical encodings
/// (`S >= n`) the same way [`Scalar::from_bytes`] rejects them for any
/// other scalar import - §8's "flipping any bit ... causes verification to
/// fail" property depends on this being strict.
fn decode_scalar(bytes: &[u8; FIELD_BYTES]) -> Result<Scalar> {
    let be: [u8; FIELD_BYTES] = reverse(bytes);
    Option::from(Scalar::from_bytes(&be)).ok_or(Error::InvalidSignature)
}

fn to_extended(p: &AffinePoint<Ed25519>) -> ExtendedPoint<Ed25519> {
    ExtendedPoint {
        x: p.x,
        y: p.y,
        z: <Ed25519 as EdwardsCurve>::Field::one(),
        t: p.x.mul(&p.y),
    }
}

/// Sign `msg` (or, for the prehashed variant, an already-hashed message)
/// under the expanded key `(scalar, prefix)` whose public key encodes as
/// `pub_bytes` (§4.G `Sign`). `dom2` is `None` for pure Ed25519, or
/// `Some((phflag, context))` for Ed25519ctx (`phflag = false`) / Ed25519ph
/// (`phflag = true`).
pub(crate) fn sign(
    ctx: &EdwardsContext<Ed25519>,
    scalar: &Scalar,
    prefix: &[u8; 32],
    pub_bytes: &[u8; 32],
    msg: &[u8],
    dom2: Option<(bool, &[u8])>,
) -> [u8; 64] {
    let r = hash_to_scalar(dom2, &[prefix, msg]);
    let r_point = ctx.mul_base(&r).to_affine();
    let r_bytes = encode_point(&r_point);

    let h = hash_to_scalar(dom2, &[&r_bytes, pub_bytes, msg]);
    let s = r.add(&h.mul(scalar));
    let s_bytes = encode_scalar(&s);

    let mut sig = [0u8; 64];
    sig[..32].copy_from_slice(&r_bytes);
    sig[32..].copy_from_slice(&s_bytes);
    sig
}

/// Verify `msg` against `sig` under the decoded public point `pub_point`
/// (encoded as `pub_bytes`), per §4.G `Verify`'s cofactored check: `[8]*S*G
/// == [8]*R + [8]*h*pub`. Entirely variable-time; every input here is
/// public.
pub(crate) fn verify(
    pub_point: &AffinePoint<Ed25519>,
    pub_bytes: &[u8; 32],
    sig: &[u8; 64],
    msg: &[u8],
    dom2: Option<(bool, &[u8])>,
) -> Result<()> {
    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&sig[..32]);
    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&sig[32..]);

    let r_point = decode_point(&r_bytes)?;
    let s = decode_scalar(&s_bytes)?;

    let h = hash_to_scalar(dom2, &[&r_bytes, pub_bytes, msg]);

    let g = ExtendedPoint::<Ed25519>::generator();
    let s_g = vt_mul::<Ed25519>(&s, &g);
    let h_pub = vt_mul::<Ed25519>(&h, &to_extended(pub_point));
    let rhs = to_extended(&r_point).add(&h_pub);

    if bool::from(s_g.mul_cofactor().equal(&rhs.mul_cofactor())) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_sets_and_clears_the_documented_bits() {
        for pattern in [0x00u8, 0xff, 0xa5] {
            let mut bytes = [pattern; 32];
            clamp(&mut bytes);
            assert_eq!(bytes[0] & 0b0000_0111, 0, "low 3 bits of byte 0 must be clear");
            assert_eq!(bytes[31] & 0b1000_0000, 0, "bit 255 must be clear");
            assert_eq!(bytes[31] & 0b0100_0000, 0b0100_0000, "bit 254 must be set");
        }
    }

    #[test]
    fn reverse_is_its_own_inverse() {
        let bytes: [u8; 32] = core::array::from_fn(|i| i as u8);
        let rev: [u8; 32] = reverse(&bytes);
        let back: [u8; 32] = reverse(&rev);
        assert_eq!(bytes, back);
        assert_eq!(rev[0], bytes[31]);
        assert_eq!(rev[31], bytes[0]);
    }
}
