//! Ed25519 signatures.
//!
//! Edwards Digital Signature Algorithm (EdDSA) over Curve25519 as specified in
//! RFC 8032: <https://tools.ietf.org/html/rfc8032>, built on this workspace's
//! own [`elliptic_curve::edwards`] twisted Edwards group law rather than a
//! standalone curve25519 implementation.
//!
//! Covers the three variants RFC 8032 defines: plain Ed25519 (§5.1, no
//! context), Ed25519ctx (§5.3, non-empty context string), and Ed25519ph
//! (§5.2, pre-hashed with SHA-512).

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

/// Re-export the `elliptic-curve` crate this implementation is built on,
/// and its `Error`/`Result` - the same flat error taxonomy [`ecdsa`] uses,
/// rather than a separate `signature`-crate error type.
///
/// [`ecdsa`]: https://docs.rs/ecdsa
pub use elliptic_curve::{self, Error, Result};

use core::fmt::{self, Debug};

mod hazmat;
mod signing;
mod verifying;

#[cfg(feature = "serde")]
mod serde;

pub use signing::SigningKey;
pub use verifying::VerifyingKey;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Raw, fixed-size Ed25519 signature byte encoding.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// Ed25519 signature, `R` (32 bytes) followed by `S` (32 bytes), per RFC
/// 8032 §5.1.6.
#[derive(Copy, Clone)]
pub struct Signature(SignatureBytes);

impl Signature {
    /// Size of an encoded Ed25519 signature in bytes.
    pub const BYTE_SIZE: usize = SIGNATURE_LENGTH;

    /// Create a new signature from a byte array.
    pub fn new(bytes: SignatureBytes) -> Self {
        Self::from(bytes)
    }

    /// Assemble a signature from its `R` and `S` components.
    pub fn from_components(r: [u8; 32], s: [u8; 32]) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&r);
        bytes[32..].copy_from_slice(&s);
        Self(bytes)
    }

    /// Return the inner byte array.
    pub fn to_bytes(&self) -> SignatureBytes {
        self.0
    }

    /// The `R` component (a compressed Edwards point).
    pub fn r_bytes(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The `S` component (a scalar, little-endian).
    pub fn s_bytes(&self) -> &[u8] {
        &self.0[32..]
    }

    /// Parse a signature from its raw 64-byte `R` ‖ `S` encoding. Does not
    /// check that `R` decodes to a curve point or that `S` is canonically
    /// reduced - [`VerifyingKey::verify`] rejects those at verification
    /// time instead, matching §7's "verification ... return[s] a boolean /
    /// error without distinguishing the failure reason".
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Result<Self> {
        let bytes = bytes.as_ref();
        if bytes.len() == SIGNATURE_LENGTH {
            let mut arr = [0u8; SIGNATURE_LENGTH];
            arr.copy_from_slice(bytes);
            Ok(Signature(arr))
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<SignatureBytes> for Signature {
    fn from(bytes: SignatureBytes) -> Signature {
        Signature(bytes)
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?})", &self.0[..])
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref().eq(other.as_ref())
    }
}

impl Eq for Signature {}
