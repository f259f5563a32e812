//! `impl_scalar_field!`: generates a concrete Montgomery-form scalar type
//! for one curve's group order `n`, built on the same limb machinery as
//! [`crate::field::macros::impl_prime_field`].

macro_rules! impl_scalar_field {
    ($name:ident, $limbs:expr, $bytes:expr, $modulus:expr, $r:expr, $r2:expr, $n0:expr) => {
        /// Scalar field element (mod the group order) in Montgomery form.
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name(pub(crate) [u64; $limbs]);

        impl $name {
            /// Number of 64-bit limbs backing this scalar.
            pub const LIMBS: usize = $limbs;
            /// Canonical big-endian encoded byte length.
            pub const BYTES: usize = $bytes;
            /// The group order, in plain (non-Montgomery) little-endian limbs.
            pub const MODULUS: [u64; $limbs] = $modulus;
            const R: [u64; $limbs] = $r;
            const R2: [u64; $limbs] = $r2;
            const N0: u64 = $n0;

            pub(crate) fn from_plain_limbs(limbs: [u64; $limbs]) -> Self {
                Self($crate::limbs::mont_mul(&limbs, &Self::R2, &Self::MODULUS, Self::N0))
            }

            pub(crate) fn to_plain_limbs(self) -> [u64; $limbs] {
                let mut one = [0u64; $limbs];
                one[0] = 1;
                $crate::limbs::mont_mul(&self.0, &one, &Self::MODULUS, Self::N0)
            }

            fn pow_fixed(&self, exponent: &[u64; $limbs]) -> Self {
                Self($crate::limbs::pow_montgomery(
                    &self.0,
                    exponent,
                    &Self::MODULUS,
                    Self::N0,
                    &Self::R,
                ))
            }
        }

        impl $crate::scalar::ScalarField for $name {
            const BYTES: usize = $bytes;

            fn zero() -> Self {
                Self([0u64; $limbs])
            }

            fn one() -> Self {
                Self(Self::R)
            }

            fn add(&self, rhs: &Self) -> Self {
                Self($crate::limbs::mont_add(&self.0, &rhs.0, &Self::MODULUS))
            }

            fn sub(&self, rhs: &Self) -> Self {
                Self($crate::limbs::mont_sub(&self.0, &rhs.0, &Self::MODULUS))
            }

            fn neg(&self) -> Self {
                Self($crate::limbs::mont_neg(&self.0, &Self::MODULUS))
            }

            fn mul(&self, rhs: &Self) -> Self {
                Self($crate::limbs::mont_mul(&self.0, &rhs.0, &Self::MODULUS, Self::N0))
            }

            fn invert(&self) -> subtle::CtOption<Self> {
                // n is prime for every supported curve, so Fermat applies
                // here exactly as it does for the base field.
                let exponent = $crate::limbs::sub_small(Self::MODULUS, 2);
                let inv = self.pow_fixed(&exponent);
                subtle::CtOption::new(inv, !self.is_zero())
            }

            fn is_zero(&self) -> subtle::Choice {
                subtle::Choice::from($crate::limbs::is_zero(&self.0) as u8)
            }

            fn is_high(&self) -> subtle::Choice {
                // self > n/2  <=>  2*self - n doesn't underflow, i.e. the
                // half-modulus comparison via ct_lt on plain representatives.
                let plain = self.to_plain_limbs();
                let half = $crate::limbs::shr(&Self::MODULUS, 1);
                !$crate::limbs::ct_lt(&plain, &half) & !$crate::limbs::ct_eq(&plain, &half)
            }

            fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self> {
                if bytes.len() != $bytes {
                    return subtle::CtOption::new(Self::zero(), subtle::Choice::from(0));
                }
                let limbs = $crate::limbs::from_be_bytes_any::<$limbs>(bytes);
                let in_range = !$crate::limbs::ct_lt(&Self::MODULUS, &limbs)
                    & !$crate::limbs::ct_eq(&limbs, &Self::MODULUS);
                subtle::CtOption::new(Self::from_plain_limbs(limbs), in_range)
            }

            fn from_bytes_wide(bytes: &[u8]) -> Self {
                let limbs = $crate::limbs::reduce_wide::<$limbs>(bytes, &Self::MODULUS);
                Self::from_plain_limbs(limbs)
            }

            fn to_bytes_into(&self, out: &mut [u8]) {
                let plain = self.to_plain_limbs();
                $crate::limbs::to_be_bytes_any::<$limbs>(&plain, out);
            }

            fn modulus_into(out: &mut [u8]) {
                $crate::limbs::to_be_bytes_any::<$limbs>(&Self::MODULUS, out);
            }

            fn bit(&self, i: usize) -> u8 {
                let plain = self.to_plain_limbs();
                $crate::limbs::bit(&plain, i)
            }

            fn naf(&self, window_width: u32) -> $crate::scalar::Naf {
                $crate::scalar::naf_from_limbs::<$limbs>(self.to_plain_limbs(), window_width)
            }
        }

        impl subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> subtle::Choice {
                $crate::limbs::ct_eq(&self.0, &other.0)
            }
        }

        impl subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                let mut out = [0u64; $limbs];
                for i in 0..$limbs {
                    out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
                }
                Self(out)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                use subtle::ConstantTimeEq;
                bool::from(self.ct_eq(other))
            }
        }
        impl Eq for $name {}

        impl zeroize::DefaultIsZeroes for $name {}
    };
}

pub(crate) use impl_scalar_field;
