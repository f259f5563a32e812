//! Ed25519 domain parameters (RFC 8032 §5.1). `p = 2^255 - 19 ≡ 5 (mod 8)`,
//! so square roots use the Atkin-style `x^((p+3)/8)` trick with a fixed
//! square root of `-1` for the disagreement case.

use crate::edwards::EdwardsCurve;
use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    4,
    32,
    [0xffffffffffffffed, 0xffffffffffffffff, 0xffffffffffffffff, 0x7fffffffffffffff],
    [0x0000000000000026, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000],
    [0x00000000000005a4, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000],
    0x86bca1af286bca1b
);

impl_scalar_field!(
    Scalar,
    4,
    32,
    [0x5812631a5cf5d3ed, 0x14def9dea2f79cd6, 0x0000000000000000, 0x1000000000000000],
    [0xd6ec31748d98951d, 0xc6ef5bf4737dcf70, 0xfffffffffffffffe, 0x0fffffffffffffff],
    [0xa40611e3449c0f01, 0xd00e1ba768859347, 0xceec73d217f5be65, 0x0399411b7c309a3d],
    0xd2b51da312547e1b
);

const GX: [u64; 4] = [0xc9562d608f25d51a, 0x692cc7609525a7b2, 0xc0a4e231fdd6dc5c, 0x216936d3cd6e53fe];
const GY: [u64; 4] = [0x6666666666666658, 0x6666666666666666, 0x6666666666666666, 0x6666666666666666];
const D: [u64; 4] = [0x75eb4dca135978a3, 0x00700a4d4141d8ab, 0x8cc740797779e898, 0x52036cee2b6ffe73];

/// `(p + 3) / 8`.
const SQRT_EXP: [u64; 4] = [0xfffffffffffffffe, 0xffffffffffffffff, 0xffffffffffffffff, 0x0fffffffffffffff];
/// A fixed square root of `-1 mod p`, used when the `(p+3)/8` candidate's
/// square disagrees with the input by a factor of `-1`.
const SQRT_MINUS_ONE: [u64; 4] = [0xc4ee1b274a0ea0b0, 0x2f431806ad2fe478, 0x2b4d00993dfbd7a7, 0x2b8324804fc1df0b];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        let sqrt_m1 = Self::from_plain_limbs(SQRT_MINUS_ONE);
        field::sqrt_5mod8(x, |v| v.pow_fixed(&SQRT_EXP), &sqrt_m1)
    }
}

/// Ed25519.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ed25519;

impl EdwardsCurve for Ed25519 {
    type Field = FieldElement;
    type Scalar = Scalar;

    fn equation_d() -> Self::Field {
        FieldElement::from_plain_limbs(D)
    }

    fn generator() -> (Self::Field, Self::Field) {
        (FieldElement::from_plain_limbs(GX), FieldElement::from_plain_limbs(GY))
    }

    fn cofactor() -> u64 {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edwards::AffinePoint;

    #[test]
    fn generator_is_on_curve() {
        let g = AffinePoint::<Ed25519>::generator();
        assert!(bool::from(g.validate()));
    }
}
