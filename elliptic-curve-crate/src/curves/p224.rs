//! NIST P-224 domain parameters (FIPS 186-4 §D.1.2).
//!
//! The only supported curve whose field prime is `1 mod 8`, so square roots
//! here use general Tonelli-Shanks ([`crate::field::sqrt_tonelli_shanks`])
//! rather than the `3 mod 4`/`5 mod 8` shortcuts the other curves take:
//! `p - 1 = 2^96 * (2^128 - 1)`.

use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use crate::weierstrass::WeierstrassCurve;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    4,
    28,
    [0x0000000000000001, 0xffffffff00000000, 0xffffffffffffffff, 0x00000000ffffffff],
    [0xffffffff00000000, 0xffffffffffffffff, 0x0000000000000000, 0x0000000000000000],
    [0xffffffff00000001, 0xffffffff00000000, 0xfffffffe00000000, 0x00000000ffffffff],
    0xffffffffffffffff
);

impl_scalar_field!(
    Scalar,
    4,
    28,
    [0x13dd29455c5c2a3d, 0xffff16a2e0b8f03e, 0xffffffffffffffff, 0x00000000ffffffff],
    [0xa3a3d5c300000000, 0x1f470fc1ec22d6ba, 0x000000000000e95d, 0x0000000000000000],
    [0x29947a695f517d15, 0xabc8ff5931d63f4b, 0x6ad15f7cd9714856, 0x00000000b1e97961],
    0xd6e242706a1fc2eb
);

/// `p - 3`, the `a` coefficient's plain-limb representative.
const P_MINUS_3: [u64; 4] = [0xfffffffffffffffe, 0xfffffffeffffffff, 0xffffffffffffffff, 0x00000000ffffffff];

const GX: [u64; 4] = [0x343280d6115c1d21, 0x4a03c1d356c21122, 0x6bb4bf7f321390b9, 0x00000000b70e0cbd];
const GY: [u64; 4] = [0x44d5819985007e34, 0xcd4375a05a074764, 0xb5f723fb4c22dfe6, 0x00000000bd376388];
const B: [u64; 4] = [0x270b39432355ffb4, 0x5044b0b7d7bfd8ba, 0x0c04b3abf5413256, 0x00000000b4050a85];

/// Tonelli-Shanks constants: `p - 1 = 2^S * Q`.
const TS_S: u32 = 96;
/// `(Q - 1) / 2`, the exponent for `x^((Q-1)/2)`.
const TS_Q_MINUS_1_DIV_2: [u64; 4] = [0xffffffffffffffff, 0x7fffffffffffffff, 0x0000000000000000, 0x0000000000000000];
/// `z^Q mod p` for the fixed smallest quadratic non-residue `z = 11`, plain
/// limbs (lifted into Montgomery form on first use).
const Z_POW_Q: [u64; 4] = [0xf3fb3632dc691b74, 0x0b2d6ffbbea3d8ce, 0x8598a7920c55b2d4, 0x000000006a0fec67];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        let z_pow_q = Self::from_plain_limbs(Z_POW_Q);
        field::sqrt_tonelli_shanks(
            x,
            TS_S,
            |v| v.pow_fixed(&TS_Q_MINUS_1_DIV_2),
            &z_pow_q,
        )
    }
}

/// NIST P-224 (`secp224r1`).
#[derive(Copy, Clone, Debug, Default)]
pub struct P224;

impl WeierstrassCurve for P224 {
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
        let g = AffinePoint::<P224>::generator();
        assert!(bool::from(g.validate()));
    }

    #[test]
    fn sqrt_of_square_roundtrips() {
        let x = FieldElement::from_plain_limbs([7, 0, 0, 0]);
        let sq = x.square();
        let root = sq.sqrt().unwrap();
        assert!(root == x || root == x.neg());
    }
}
