#![doc = include_str!("../README.md")]
//!
//! ## Usage
//!
//! See also: the documentation for the [`generate_k`] function.
//!
//! ```
//! use elliptic_curve::curves::p256::P256;
//! use elliptic_curve::scalar::ScalarField;
//! use sha2::{Digest, Sha256};
//!
//! type Scalar = <P256 as elliptic_curve::weierstrass::WeierstrassCurve>::Scalar;
//!
//! let x = Scalar::from_bytes_nonzero(&[0x01; 32]).unwrap();
//! let h = Sha256::digest(b"sample");
//! let k = rfc6979::generate_k::<Scalar, Sha256>(&x, 32, &h, b"");
//! assert!(!bool::from(k.is_zero()));
//! ```

#![no_std]
#![forbid(unsafe_code, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

use elliptic_curve::scalar::ScalarField;
use hmac::{
    digest::{core_api::BlockSizeUser, generic_array::GenericArray, Digest, FixedOutput, FixedOutputReset},
    Mac, SimpleHmac,
};
use zeroize::{Zeroize, Zeroizing};

/// Upper bound on a scalar's canonical byte width across every curve this
/// workspace supports (P-521's 66 bytes), so `generate_k`'s working buffers
/// can live on the stack rather than reaching for `alloc`.
const MAX_SCALAR_BYTES: usize = 66;

/// Deterministically generate an ephemeral scalar `k` per RFC 6979 §3.2.
///
/// Accepts:
///
/// - `x`: secret scalar (the signing key)
/// - `scalar_bytes`: the curve's canonical scalar encoding width
/// - `h`: hash/digest of the message, already truncated/expanded to the
///   curve's bit length by the caller (RFC 6979 §2.3.2's `bits2octets` input)
/// - `data`: additional associated data, e.g. caller-supplied extra entropy
///
/// Loops internally (per RFC 6979 §3.2's "go to step h" restart clause)
/// until the DRBG output parses as a nonzero scalar in `[1, n)`; this is
/// rejection sampling, not modular reduction, matching the published
/// construction exactly. Termination is not bounded by an iteration count -
/// it's guaranteed by the DRBG's output distribution, which rejects with
/// negligible probability for every curve order in this workspace.
pub fn generate_k<S, D>(x: &S, scalar_bytes: usize, h: &[u8], data: &[u8]) -> Zeroizing<S>
where
    S: ScalarField,
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    debug_assert_eq!(scalar_bytes, S::BYTES);
    debug_assert!(scalar_bytes <= MAX_SCALAR_BYTES);

    let mut x_bytes = [0u8; MAX_SCALAR_BYTES];
    x.to_bytes_into(&mut x_bytes[..scalar_bytes]);
    let mut drbg = HmacDrbg::<D>::new(&x_bytes[..scalar_bytes], h, data);
    x_bytes.zeroize();

    loop {
        let mut candidate = [0u8; MAX_SCALAR_BYTES];
        drbg.fill_bytes(&mut candidate[..scalar_bytes]);
        let k = S::from_bytes_nonzero(&candidate[..scalar_bytes]);
        candidate.zeroize();
        if let Some(k) = Option::from(k) {
            return Zeroizing::new(k);
        }
    }
}

/// `HMAC_DRBG` as described in NIST SP 800-90A §10.1.2, specialized to the
/// fixed instantiate-then-generate sequence RFC 6979 §3.2 needs (no reseed,
/// no personalization beyond the nonce/additional-data inputs).
pub struct HmacDrbg<D>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    /// HMAC key `K` (see RFC 6979 §3.2.c).
    k: SimpleHmac<D>,
    /// Chaining value `V` (see RFC 6979 §3.2.c).
    v: GenericArray<u8, D::OutputSize>,
}

impl<D> HmacDrbg<D>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    /// Initialize `HMAC_DRBG`.
    pub fn new(entropy_input: &[u8], nonce: &[u8], additional_data: &[u8]) -> Self {
        let mut k = SimpleHmac::new(&Default::default());
        let mut v = GenericArray::default();

        for b in &mut v {
            *b = 0x01;
        }

        for i in 0..=1 {
            k.update(&v);
            k.update(&[i]);
            k.update(entropy_input);
            k.update(nonce);
            k.update(additional_data);
            k = SimpleHmac::new_from_slice(&k.finalize().into_bytes()).expect("HMAC accepts any key length");

            k.update(&v);
            v = k.finalize_reset().into_bytes();
        }

        Self { k, v }
    }

    /// Write the next `HMAC_DRBG` output to `out`.
    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        for out_chunk in out.chunks_mut(self.v.len()) {
            self.k.update(&self.v);
            self.v = self.k.finalize_reset().into_bytes();
            out_chunk.copy_from_slice(&self.v[..out_chunk.len()]);
        }

        self.k.update(&self.v);
        self.k.update(&[0x00]);
        self.k = SimpleHmac::new_from_slice(&self.k.finalize_reset().into_bytes()).expect("HMAC accepts any key length");
        self.k.update(&self.v);
        self.v = self.k.finalize_reset().into_bytes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::curves::p256::P256;
    use elliptic_curve::weierstrass::WeierstrassCurve;
    use sha2::Sha256;

    type Scalar = <P256 as WeierstrassCurve>::Scalar;

    /// RFC 6979 A.2.5, NIST P-256 + SHA-256, message "sample".
    #[test]
    fn rfc6979_p256_sha256_sample() {
        let x_bytes = hex_literal::hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
        let x = Scalar::from_bytes_nonzero(&x_bytes).unwrap();
        let h = Sha256::digest(b"sample");
        let k = generate_k::<Scalar, Sha256>(&x, 32, &h, b"");

        let mut k_bytes = [0u8; 32];
        k.to_bytes_into(&mut k_bytes);
        assert_eq!(
            k_bytes,
            hex_literal::hex!("a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60")
        );
    }
}
