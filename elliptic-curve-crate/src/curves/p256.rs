//! NIST P-256 domain parameters (FIPS 186-4 §D.1.2), a.k.a. `secp256r1` /
//! `prime256v1`. `p ≡ 3 (mod 4)`, so square roots use the `x^((p+1)/4)`
//! shortcut.

use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use crate::weierstrass::WeierstrassCurve;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    4,
    32,
    [0xffffffffffffffff, 0x00000000ffffffff, 0x0000000000000000, 0xffffffff00000001],
    [0x0000000000000001, 0xffffffff00000000, 0xffffffffffffffff, 0x00000000fffffffe],
    [0x0000000000000003, 0xfffffffbffffffff, 0xfffffffffffffffe, 0x00000004fffffffd],
    0x0000000000000001
);

impl_scalar_field!(
    Scalar,
    4,
    32,
    [0xf3b9cac2fc632551, 0xbce6faada7179e84, 0xffffffffffffffff, 0xffffffff00000000],
    [0x0c46353d039cdaaf, 0x4319055258e8617b, 0x0000000000000000, 0x00000000ffffffff],
    [0x83244c95be79eea2, 0x4699799c49bd6fa6, 0x2845b2392b6bec59, 0x66e12d94f3d95620],
    0xccd1c8aaee00bc4f
);

const P_MINUS_3: [u64; 4] = [0xfffffffffffffffc, 0x00000000ffffffff, 0x0000000000000000, 0xffffffff00000001];
const GX: [u64; 4] = [0xf4a13945d898c296, 0x77037d812deb33a0, 0xf8bce6e563a440f2, 0x6b17d1f2e12c4247];
const GY: [u64; 4] = [0xcbb6406837bf51f5, 0x2bce33576b315ece, 0x8ee7eb4a7c0f9e16, 0x4fe342e2fe1a7f9b];
const B: [u64; 4] = [0x3bce3c3e27d2604b, 0x651d06b0cc53b0f6, 0xb3ebbd55769886bc, 0x5ac635d8aa3a93e7];

/// `(p + 1) / 4`, the square-root exponent for `p ≡ 3 (mod 4)`.
const SQRT_EXP: [u64; 4] = [0x0000000000000000, 0x0000000040000000, 0x4000000000000000, 0x3fffffffc0000000];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        field::sqrt_3mod4(x, |v| v.pow_fixed(&SQRT_EXP))
    }
}

/// NIST P-256 (`secp256r1`).
#[derive(Copy, Clone, Debug, Default)]
pub struct P256;

impl WeierstrassCurve for P256 {
    type Field = FieldElement;
    type Scalar = Scalar;

    fn equation_a() -> Self::Field {
        FieldElement::from_plain_limbs(P_MINUS_3)
    }

    fn equation_b() -> Self::Field {
        FieldElement::from_plain_limbs(B)
    }

    fn a_is_minus_three() -> bool {
        true
    }

    fn generator() -> (Self::Field, Self::Field) {
        (FieldElement::from_plain_limbs(GX), FieldElement::from_plain_limbs(GY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weierstrass::AffinePoint;

    #[test]
    fn generator_is_on_curve() {
        let g = AffinePoint::<P256>::generator();
        assert!(bool::from(g.validate()));
    }
}
