//! Fixed-size ECDSA signature representation (`r` ‖ `s`, raw concatenation,
//! no ASN.1 at this layer).

use core::fmt;

use elliptic_curve::scalar::ScalarField;
use elliptic_curve::weierstrass::WeierstrassCurve;
use elliptic_curve::{Error, Result};

/// Upper bound on a signature component's canonical byte width across every
/// curve this crate supports (P-521's 66 bytes).
const MAX_SCALAR_BYTES: usize = 66;

/// An ECDSA signature, generic over elliptic curve types.
///
/// Serialized as a fixed-size big-endian `r` followed by `s`, each
/// `C::Scalar::BYTES` wide and with no added framing. For a curve with a
/// 256-bit order like NIST P-256 or secp256k1, that's 32 bytes each, 64
/// bytes total.
pub struct Signature<C: WeierstrassCurve> {
    pub(crate) r: C::Scalar,
    pub(crate) s: C::Scalar,
}

impl<C: WeierstrassCurve> Signature<C> {
    /// Parse a signature from its raw `r ‖ s` encoding. Rejects either
    /// component being zero or `>= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let n = C::Scalar::BYTES;
        if bytes.len() != 2 * n {
            return Err(Error::InvalidSignature);
        }
        let r = Option::from(C::Scalar::from_bytes_nonzero(&bytes[..n])).ok_or(Error::InvalidSignature)?;
        let s = Option::from(C::Scalar::from_bytes_nonzero(&bytes[n..])).ok_or(Error::InvalidSignature)?;
        Ok(Self { r, s })
    }

    /// Assemble a signature directly from its `r` and `s` scalars.
    pub fn from_scalars(r: C::Scalar, s: C::Scalar) -> Result<Self> {
        if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
            return Err(Error::InvalidSignature);
        }
        Ok(Self { r, s })
    }

    /// Encode as raw `r ‖ s`, writing into `out` (length `2 *
    /// C::Scalar::BYTES`).
    pub fn to_bytes_into(&self, out: &mut [u8]) {
        let n = C::Scalar::BYTES;
        self.r.to_bytes_into(&mut out[..n]);
        self.s.to_bytes_into(&mut out[n..2 * n]);
    }

    /// Encode as a byte vector.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        let n = C::Scalar::BYTES;
        let mut out = alloc::vec![0u8; 2 * n];
        self.to_bytes_into(&mut out);
        out
    }

    /// The `r` component.
    pub fn r(&self) -> &C::Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &C::Scalar {
        &self.s
    }

    /// `r` and `s`, each encoded as big-endian bytes.
    pub fn split_bytes(&self) -> ([u8; MAX_SCALAR_BYTES], [u8; MAX_SCALAR_BYTES]) {
        let n = C::Scalar::BYTES;
        let mut r_bytes = [0u8; MAX_SCALAR_BYTES];
        let mut s_bytes = [0u8; MAX_SCALAR_BYTES];
        self.r.to_bytes_into(&mut r_bytes[..n]);
        self.s.to_bytes_into(&mut s_bytes[..n]);
        (r_bytes, s_bytes)
    }
}

impl<C: WeierstrassCurve> Clone for Signature<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: WeierstrassCurve> Copy for Signature<C> {}

impl<C: WeierstrassCurve> PartialEq for Signature<C> {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.s == other.s
    }
}

impl<C: WeierstrassCurve> Eq for Signature<C> {}

impl<C: WeierstrassCurve> fmt::Debug for Signature<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, s) = self.split_bytes();
        let n = C::Scalar::BYTES;
        f.debug_struct("Signature")
            .field("r", &&r[..n])
            .field("s", &&s[..n])
            .finish()
    }
}
