//! NIST P-384 domain parameters (FIPS 186-4 §D.1.3). `p ≡ 3 (mod 4)`.

use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use crate::weierstrass::WeierstrassCurve;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    6,
    48,
    [0x00000000ffffffff, 0xffffffff00000000, 0xfffffffffffffffe, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff],
    [0xffffffff00000001, 0x00000000ffffffff, 0x0000000000000001, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000],
    [0xfffffffe00000001, 0x0000000200000000, 0xfffffffe00000000, 0x0000000200000000, 0x0000000000000001, 0x0000000000000000],
    0x0000000100000001
);

impl_scalar_field!(
    Scalar,
    6,
    48,
    [0xecec196accc52973, 0x581a0db248b0a77a, 0xc7634d81f4372ddf, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff],
    [0x1313e695333ad68d, 0xa7e5f24db74f5885, 0x389cb27e0bc8d220, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000],
    [0x2d319b2419b409a9, 0xff3d81e5df1aa419, 0xbc3e483afcb82947, 0xd40d49174aab1cc5, 0x3fb05b7a28266895, 0x0c84ee012b39bf21],
    0x6ed46089e88fdc45
);

const P_MINUS_3: [u64; 6] = [
    0x00000000fffffffc, 0xffffffff00000000, 0xfffffffffffffffe,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
];
const GX: [u64; 6] = [
    0x3a545e3872760ab7, 0x5502f25dbf55296c, 0x59f741e082542a38,
    0x6e1d3b628ba79b98, 0x8eb1c71ef320ad74, 0xaa87ca22be8b0537,
];
const GY: [u64; 6] = [
    0x7a431d7c90ea0e5f, 0x0a60b1ce1d7e819d, 0xe9da3113b5f0b8c0,
    0xf8f41dbd289a147c, 0x5d9e98bf9292dc29, 0x3617de4a96262c6f,
];
const B: [u64; 6] = [
    0x2a85c8edd3ec2aef, 0xc656398d8a2ed19d, 0x0314088f5013875a,
    0x181d9c6efe814112, 0x988e056be3f82d19, 0xb3312fa7e23ee7e4,
];

/// `(p + 1) / 4`.
const SQRT_EXP: [u64; 6] = [
    0x0000000040000000, 0xbfffffffc0000000, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0x3fffffffffffffff,
];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        field::sqrt_3mod4(x, |v| v.pow_fixed(&SQRT_EXP))
    }
}

/// NIST P-384 (`secp384r1`).
#[derive(Copy, Clone, Debug, Default)]
pub struct P384;

impl WeierstrassCurve for P384 {
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
        let g = AffinePoint::<P384>::generator();
        assert!(bool::from(g.validate()));
    }
}
