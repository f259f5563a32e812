//! secp256k1 domain parameters (SEC 2 §2.4.1). `a = 0`, so doubling always
//! takes the general-formula path; `p ≡ 3 (mod 4)`. The only curve in this
//! core with a GLV endomorphism, used by [`crate::scalar_mult::glv_decompose`]
//! to halve the scalar length in verification's joint multiplication.

use crate::field::{self, PrimeField};
use crate::field::macros::impl_prime_field;
use crate::scalar::macros::impl_scalar_field;
use crate::scalar::ScalarField;
use crate::scalar_mult::GlvCurve;
use crate::weierstrass::WeierstrassCurve;
use subtle::CtOption;

impl_prime_field!(
    FieldElement,
    4,
    32,
    [0xfffffffefffffc2f, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff],
    [0x00000001000003d1, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000],
    [0x000007a2000e90a1, 0x0000000000000001, 0x0000000000000000, 0x0000000000000000],
    0xd838091dd2253531
);

impl_scalar_field!(
    Scalar,
    4,
    32,
    [0xbfd25e8cd0364141, 0xbaaedce6af48a03b, 0xfffffffffffffffe, 0xffffffffffffffff],
    [0x402da1732fc9bebf, 0x4551231950b75fc4, 0x0000000000000001, 0x0000000000000000],
    [0x896cf21467d7d140, 0x741496c20e7cf878, 0xe697f5e45bcd07c6, 0x9d671cd581c69bc5],
    0x4b0dff665588b13f
);

const GX: [u64; 4] = [0x59f2815b16f81798, 0x029bfcdb2dce28d9, 0x55a06295ce870b07, 0x79be667ef9dcbbac];
const GY: [u64; 4] = [0x9c47d08ffb10d4b8, 0xfd17b448a6855419, 0x5da4fbfc0e1108a8, 0x483ada7726a3c465];

/// `(p + 1) / 4`.
const SQRT_EXP: [u64; 4] = [0xffffffffbfffff0c, 0xffffffffffffffff, 0xffffffffffffffff, 0x3fffffffffffffff];

impl FieldElement {
    pub(crate) fn sqrt_impl(x: &Self) -> CtOption<Self> {
        field::sqrt_3mod4(x, |v| v.pow_fixed(&SQRT_EXP))
    }
}

/// secp256k1.
#[derive(Copy, Clone, Debug, Default)]
pub struct Secp256k1;

impl WeierstrassCurve for Secp256k1 {
    type Field = FieldElement;
    type Scalar = Scalar;

    fn equation_a() -> Self::Field {
        FieldElement::zero()
    }

    fn equation_b() -> Self::Field {
        // b = 7
        FieldElement::from_plain_limbs([7, 0, 0, 0])
    }

    fn a_is_minus_three() -> bool {
        false
    }

    fn generator() -> (Self::Field, Self::Field) {
        (FieldElement::from_plain_limbs(GX), FieldElement::from_plain_limbs(GY))
    }

    fn vt_joint_mul(
        k1: &Self::Scalar,
        g_table: &[crate::weierstrass::AffinePoint<Self>],
        k2: &Self::Scalar,
        p: &crate::weierstrass::ProjectivePoint<Self>,
    ) -> crate::weierstrass::ProjectivePoint<Self> {
        crate::scalar_mult::vt_mul_double_base_glv::<Self>(k1, g_table, 5, k2, p, 4)
    }
}

/// GLV lattice basis (standard construction, e.g. libsecp256k1's
/// `secp256k1_gej_mul_lambda` constants): `a1`, `b1` (negative; magnitude
/// stored), `a2`, `b2`, and the fixed-point rounding multipliers `g1`, `g2`.
const GLV_A1: [u64; 4] = [0xe86c90e49284eb15, 0x3086d221a7d46bcd, 0x0000000000000000, 0x0000000000000000];
const GLV_B1_MAG: [u64; 4] = [0x6f547fa90abfe4c3, 0xe4437ed6010e8828, 0x0000000000000000, 0x0000000000000000];
const GLV_A2: [u64; 4] = [0x57c1108d9d44cfd8, 0x14ca50f7a8e2f3f6, 0x0000000000000001, 0x0000000000000000];
const GLV_B2: [u64; 4] = [0xe86c90e49284eb15, 0x3086d221a7d46bcd, 0x0000000000000000, 0x0000000000000000];
const GLV_G1: [u64; 4] = [0xe893209a45dbb031, 0x3daa8a1471e8ca7f, 0xe86c90e49284eb15, 0x3086d221a7d46bcd];
const GLV_G2: [u64; 4] = [0x1571b4ae8ac47f71, 0x221208ac9df506c6, 0x6f547fa90abfe4c4, 0xe4437ed6010e8828];
/// `lambda mod n` such that `lambda*(x, y) == (beta*x, y)`.
const LAMBDA: [u64; 4] = [0xdf02967c1b23bd72, 0x122e22ea20816678, 0xa5261c028812645a, 0x5363ad4cc05c30e0];
/// `beta mod p`, a primitive cube root of unity: `beta^3 == 1` and
/// `beta*(x, y) == (lambda*x, y)` point-wise under the endomorphism.
const GLV_BETA: [u64; 4] = [0xc1396c28719501ee, 0x9cf0497512f58995, 0x6e64479eac3434e9, 0x7ae96a2b657c0710];

impl GlvCurve for Secp256k1 {
    fn glv_a1() -> [u64; 4] {
        GLV_A1
    }

    fn glv_b1_mag() -> [u64; 4] {
        GLV_B1_MAG
    }

    fn glv_a2() -> [u64; 4] {
        GLV_A2
    }

    fn glv_b2() -> [u64; 4] {
        GLV_B2
    }

    fn glv_g1() -> [u64; 4] {
        GLV_G1
    }

    fn glv_g2() -> [u64; 4] {
        GLV_G2
    }

    fn glv_lambda() -> Self::Scalar {
        Scalar::from_plain_limbs(LAMBDA)
    }

    fn glv_beta() -> Self::Field {
        FieldElement::from_plain_limbs(GLV_BETA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weierstrass::AffinePoint;

    #[test]
    fn generator_is_on_curve() {
        let g = AffinePoint::<Secp256k1>::generator();
        assert!(bool::from(g.validate()));
    }
}
