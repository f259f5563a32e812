#![no_std]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

//! General purpose Elliptic Curve Cryptography (ECC) support: prime-field
//! and scalar-field arithmetic, short-Weierstrass and twisted-Edwards
//! group laws, constant/variable-time scalar multiplication, and the
//! per-curve descriptor registry that ties them together.
//!
//! This crate implements components A-E and H of the ECC core: it is the
//! layer [`ecdsa`] and [`ed25519`] (sibling crates in this workspace) sit
//! on top of. It never touches hashing, entropy collection, or signature
//! framing itself - those stay in the protocol crates, matching the
//! `elliptic-curve`/`ecdsa`/`ed25519` split in the upstream RustCrypto
//! workspace this is modeled on.

#[cfg(feature = "alloc")]
extern crate alloc;

pub(crate) mod limbs;

pub mod error;
pub mod field;
pub mod scalar;
pub mod weierstrass;
pub mod edwards;
pub mod scalar_mult;
pub mod curves;
pub mod context;
pub mod registry;

pub use error::{Error, Result};
pub use field::PrimeField;
pub use registry::CurveId;
pub use scalar::ScalarField;
