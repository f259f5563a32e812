//! NIST P-521 domain parameters (FIPS 186-4 §D.1.4). `p = 2^521 - 1 ≡ 3
//! (mod 4)`. Field and scalar elements are stored in 9 limbs (576 bits of
//! capacity) though the canonical encoding is 66 bytes (521 bits, rounded
//! up).

use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use crate::weierstrass::WeierstrassCurve;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    9,
    66,
    [
        0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000001ff,
    ],
    [
        0x0080000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    [
        0x0000000000000000, 0x0000400000000000, 0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    0x0000000000000001
);

impl_scalar_field!(
    Scalar,
    9,
    66,
    [
        0xbb6fb71e91386409, 0x3bb5c9b8899c47ae, 0x7fcc0148f709a5d0, 0x51868783bf2f966b,
        0xfffffffffffffffa, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
        0x0000000000000001,
    ],
    [
        0x8000000000000000, 0xa2482470b763cdfb, 0xe2251b23bb31dc28, 0x4019ff5b847b2d17,
        0xd73cbc3e206834ca, 0x0000000000000002, 0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    [
        0xaf16cf675d7ef701, 0x8ac34519b21d6b11, 0x4ee1eaca2767ce66, 0xd89822d50189209e,
        0x905049a8ed838fef, 0xa71f9fdbfa2a0246, 0x6d61a8e567bcd00a, 0x03d1492d0d455bcc,
        0x0000000000000000,
    ],
    0x1d2f5ccd79a995c7
);

const P_MINUS_3: [u64; 9] = [
    0xfffffffffffffffc, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0x00000000000001ff,
];
const GX: [u64; 9] = [
    0xf97e7e31c2e5bd66, 0x3348b3c1856a429b, 0xfe1dc127a2ffa8de, 0xa14b5e77efe75928,
    0xf828af606b4d3dba, 0x9c648139053fb521, 0x9e3ecb662395b442, 0x858e06b70404e9cd,
    0x00000000000000c6,
];
const GY: [u64; 9] = [
    0x88be94769fd16650, 0x353c7086a272c240, 0xc550b9013fad0761, 0x97ee72995ef42640,
    0x17afbd17273e662c, 0x98f54449579b4468, 0x5c8a5fb42c7d1bd9, 0x39296a789a3bc004,
    0x0000000000000118,
];
const B: [u64; 9] = [
    0xef451fd46b503f00, 0x3573df883d2c34f1, 0x1652c0bd3bb1bf07, 0x56193951ec7e937b,
    0xb8b489918ef109e1, 0xa2da725b99b315f3, 0x929a21a0b68540ee, 0x953eb9618e1c9a1f,
    0x0000000000000051,
];

/// `(p + 1) / 4 = 2^519`.
const SQRT_EXP: [u64; 9] = [
    0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000080,
];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        field::sqrt_3mod4(x, |v| v.pow_fixed(&SQRT_EXP))
    }
}

/// NIST P-521 (`secp521r1`).
#[derive(Copy, Clone, Debug, Default)]
pub struct P521;

impl WeierstrassCurve for P521 {
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
        let g = AffinePoint::<P521>::generator();
        assert!(bool::from(g.validate()));
    }
}
