//! ECDSA public key recovery id.

use elliptic_curve::{Error, Result};

/// Recovery id: a single byte in `[0, 3]` letting a verifier reconstruct the
/// signer's public key from a signature plus the message digest alone.
///
/// Bit 0 is the y-parity of `R` (after low-S normalization); bit 1 records
/// whether `R.x` overflowed the group order `n` during signing and had to be
/// reduced.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Build a recovery id from its two component bits.
    pub fn new(y_is_odd: bool, x_overflowed: bool) -> Self {
        Self(y_is_odd as u8 | ((x_overflowed as u8) << 1))
    }

    /// Parse a recovery id byte, rejecting anything outside `[0, 3]`.
    pub fn from_byte(byte: u8) -> Result<Self> {
        if byte > 3 {
            return Err(Error::InvalidRecoveryId);
        }
        Ok(Self(byte))
    }

    /// The single-byte encoding.
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Bit 0: `true` iff `R.y` was odd.
    pub fn is_y_odd(self) -> bool {
        self.0 & 1 != 0
    }

    /// Bit 1: `true` iff `R.x` overflowed `n` and was reduced during
    /// signing.
    pub fn is_x_overflowed(self) -> bool {
        self.0 & 2 != 0
    }
}
