//! Error taxonomy for the ECC core.
//!
//! Every fallible operation below the protocol layer (ECDSA/EdDSA) returns
//! one of these variants. None of them carry secret material: they're safe
//! to log, format, or propagate to a caller without risk of leaking key
//! bits.

use core::fmt;

/// Result type alias used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type covering every failure mode of the field, scalar, group, and
/// signature layers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A field element encoding was non-canonical or `>= p`.
    InvalidFieldElement,
    /// A scalar was zero where forbidden, or `>= n`.
    InvalidScalar,
    /// A point encoding was malformed, off-curve, or the identity where
    /// forbidden.
    InvalidPoint,
    /// Signature parsing or verification failed. Callers should not try to
    /// distinguish the two: both indicate "do not trust this signature".
    InvalidSignature,
    /// Recovery id was out of range, or recovery produced the identity
    /// point.
    InvalidRecoveryId,
    /// A caller-supplied entropy buffer was rejected, e.g. wrong length.
    EntropyFailure,
    /// A private key encoding was zero or `>= n`.
    InvalidPrivateKey,
    /// A public key was rejected (off curve, identity, or wrong length).
    InvalidPublicKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidFieldElement => "invalid field element encoding",
            Error::InvalidScalar => "invalid scalar encoding",
            Error::InvalidPoint => "invalid point encoding",
            Error::InvalidSignature => "signature error",
            Error::InvalidRecoveryId => "invalid recovery id",
            Error::EntropyFailure => "entropy buffer rejected",
            Error::InvalidPrivateKey => "invalid private key",
            Error::InvalidPublicKey => "invalid public key",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Internal-only error produced by the square root routines; always
/// surfaced to callers as [`Error::InvalidPoint`] or folded into a
/// `CtOption` rather than propagated directly (`NotASquare` never crosses
/// the public API boundary as its own variant).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct NotASquare;
