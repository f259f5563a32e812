//! Curve registry (component H): one module per supported curve, each
//! wiring concrete field/scalar element types (generated by
//! [`crate::field::macros::impl_prime_field`] and
//! [`crate::scalar::macros::impl_scalar_field`]) into a zero-sized marker
//! type implementing [`crate::weierstrass::WeierstrassCurve`] or
//! [`crate::edwards::EdwardsCurve`].
//!
//! The modulus, generator, and equation constants below are the standard
//! published domain parameters (FIPS 186-4 Appendix D for the NIST curves,
//! SEC2 for secp256k1, RFC 8032 §5.1 for Ed25519) transcribed as
//! little-endian 64-bit limb arrays - the same representation
//! `elliptic-curve-crate/src/{p256,p384,...}/field.rs` hardcodes in the
//! teacher repo, generalized here over limb count so one macro instantiates
//! all five Weierstrass fields instead of five hand-written field modules.

pub mod ed25519;
pub mod p224;
pub mod p256;
pub mod p384;
pub mod p521;
pub mod secp256k1;
