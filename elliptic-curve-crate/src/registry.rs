//! Curve identifier registry (component H): the string tags used to name a
//! curve across process/wire boundaries (config files, CLI flags, trait
//! bounds that need a runtime-checkable identity alongside their
//! compile-time type).

use core::fmt;

/// Identifies one of this core's six supported curves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CurveId {
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
    Ed25519,
}

impl CurveId {
    /// The canonical upper-case string tag, stable across releases.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CurveId::P224 => "P224",
            CurveId::P256 => "P256",
            CurveId::P384 => "P384",
            CurveId::P521 => "P521",
            CurveId::Secp256k1 => "SECP256K1",
            CurveId::Ed25519 => "ED25519",
        }
    }

    /// Parse a canonical string tag, case-sensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "P224" => CurveId::P224,
            "P256" => CurveId::P256,
            "P384" => CurveId::P384,
            "P521" => CurveId::P521,
            "SECP256K1" => CurveId::Secp256k1,
            "ED25519" => CurveId::Ed25519,
            _ => return None,
        })
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ties a concrete curve marker type to its registry identifier. Every
/// curve in [`crate::curves`] implements this alongside its
/// [`crate::weierstrass::WeierstrassCurve`] or
/// [`crate::edwards::EdwardsCurve`] impl.
pub trait NamedCurve {
    /// This curve's canonical identifier.
    const ID: CurveId;
}

impl NamedCurve for crate::curves::p224::P224 {
    const ID: CurveId = CurveId::P224;
}
impl NamedCurve for crate::curves::p256::P256 {
    const ID: CurveId = CurveId::P256;
}
impl NamedCurve for crate::curves::p384::P384 {
    const ID: CurveId = CurveId::P384;
}
impl NamedCurve for crate::curves::p521::P521 {
    const ID: CurveId = CurveId::P521;
}
impl NamedCurve for crate::curves::secp256k1::Secp256k1 {
    const ID: CurveId = CurveId::Secp256k1;
}
impl NamedCurve for crate::curves::ed25519::Ed25519 {
    const ID: CurveId = CurveId::Ed25519;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_tag() {
        let ids = [
            CurveId::P224,
            CurveId::P256,
            CurveId::P384,
            CurveId::P521,
            CurveId::Secp256k1,
            CurveId::Ed25519,
        ];
        for id in ids {
            assert_eq!(CurveId::from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn named_curve_matches_registry() {
        assert_eq!(crate::curves::p256::P256::ID, CurveId::P256);
        assert_eq!(crate::curves::ed25519::Ed25519::ID, CurveId::Ed25519);
    }
}
