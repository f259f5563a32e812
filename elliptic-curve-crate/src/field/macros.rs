//! `impl_prime_field!`: generates a concrete Montgomery-form field element
//! type for one curve, wiring its hardcoded modulus/Montgomery constants
//! into the const-generic limb arithmetic of [`crate::limbs`].
//!
//! Each curve module (`crate::curves::p256`, etc.) invokes this once per
//! field it needs (base field, and separately the scalar field when it
//! isn't handled by [`crate::scalar::macros::impl_scalar_field`]). The
//! generated type implements [`crate::field::PrimeField`]; the macro only
//! supplies the per-curve data (modulus, `R`, `R^2`, `N0`, byte length, and
//! which square-root strategy applies), matching the shape of
//! `elliptic-curve-crate/src/p256/field.rs` in the teacher repo, which
//! hardcodes the same constants for a single 4-limb field rather than
//! going through a bigint library.

/// Generate a Montgomery-form prime field element type.
///
/// `$name`: the type to generate.
/// `$limbs`: limb count `L` (4 for 224/256-bit fields, 6 for P-384, 9 for
/// P-521's 576-bit storage).
/// `$bytes`: canonical encoded byte length.
/// `$modulus`: `[u64; $limbs]`, little-endian limbs of `p`.
/// `$r`: `[u64; $limbs]`, `R mod p` (Montgomery form of `1`).
/// `$r2`: `[u64; $limbs]`, `R^2 mod p` (used to convert into Montgomery form).
/// `$n0`: `u64`, `-p^-1 mod 2^64`.
macro_rules! impl_prime_field {
    ($name:ident, $limbs:expr, $bytes:expr, $modulus:expr, $r:expr, $r2:expr, $n0:expr) => {
        /// Prime field element in Montgomery form.
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name(pub(crate) [u64; $limbs]);

        impl $name {
            /// Number of 64-bit limbs backing this field.
            pub const LIMBS: usize = $limbs;
            /// Canonical big-endian encoded byte length.
            pub const BYTES: usize = $bytes;
            /// The field modulus, in plain (non-Montgomery) little-endian limbs.
            pub const MODULUS: [u64; $limbs] = $modulus;
            const R: [u64; $limbs] = $r;
            const R2: [u64; $limbs] = $r2;
            const N0: u64 = $n0;

            /// Lift a plain little-endian-limb integer already known to be
            /// `< p` into Montgomery form.
            pub(crate) fn from_plain_limbs(limbs: [u64; $limbs]) -> Self {
                Self($crate::limbs::mont_mul(&limbs, &Self::R2, &Self::MODULUS, Self::N0))
            }

            /// Lower this element back out of Montgomery form into plain
            /// little-endian limbs `< p`.
            pub(crate) fn to_plain_limbs(self) -> [u64; $limbs] {
                let one = {
                    let mut o = [0u64; $limbs];
                    o[0] = 1;
                    o
                };
                $crate::limbs::mont_mul(&self.0, &one, &Self::MODULUS, Self::N0)
            }

            /// Exponentiate by a fixed public exponent given as plain
            /// little-endian limbs. Used for Fermat-chain inversion and the
            /// per-curve square-root addition chains; the exponent is
            /// always a public constant, so the fixed iteration count
            /// leaks nothing about `self`.
            pub(crate) fn pow_fixed(&self, exponent: &[u64; $limbs]) -> Self {
                Self($crate::limbs::pow_montgomery(
                    &self.0,
                    exponent,
                    &Self::MODULUS,
                    Self::N0,
                    &Self::R,
                ))
            }
        }

        impl $crate::field::PrimeField for $name {
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
                // Fermat's little theorem: a^(p-2) == a^-1 (mod p).
                let exponent = $crate::limbs::sub_small(Self::MODULUS, 2);
                let inv = self.pow_fixed(&exponent);
                subtle::CtOption::new(inv, !self.is_zero())
            }

            fn sqrt(&self) -> subtle::CtOption<Self> {
                Self::sqrt_impl(self)
            }

            fn is_zero(&self) -> subtle::Choice {
                subtle::Choice::from($crate::limbs::is_zero(&self.0) as u8)
            }

            fn is_odd(&self) -> subtle::Choice {
                let plain = self.to_plain_limbs();
                subtle::Choice::from((plain[0] & 1) as u8)
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

            fn to_bytes_into(&self, out: &mut [u8]) {
                let plain = self.to_plain_limbs();
                $crate::limbs::to_be_bytes_any::<$limbs>(&plain, out);
            }

            fn modulus_into(out: &mut [u8]) {
                $crate::limbs::to_be_bytes_any::<$limbs>(&Self::MODULUS, out);
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
    };
}

pub(crate) use impl_prime_field;
