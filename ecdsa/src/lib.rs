#![doc = include_str!("../README.md")]

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "hazmat")]
#[cfg_attr(docsrs, doc(cfg(feature = "hazmat")))]
pub mod hazmat;
#[cfg(not(feature = "hazmat"))]
mod hazmat;

#[cfg(feature = "dev")]
#[cfg_attr(docsrs, doc(cfg(feature = "dev")))]
pub mod dev;

mod recovery;
mod signature;
mod signing;
mod verifying;

pub use elliptic_curve::{self, Error, Result};
pub use recovery::RecoveryId;
pub use signature::Signature;
pub use signing::SigningKey;
pub use verifying::VerifyingKey;
