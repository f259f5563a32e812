//! Development-related functionality: test-vector plumbing shared by every
//! curve's own test suite, so each one doesn't hand-roll its own parser.

// TODO(tarcieri): implement full set of tests from ECDSA2VS
// <https://csrc.nist.gov/CSRC/media/Projects/Cryptographic-Algorithm-Validation-Program/documents/dss2/ecdsa2vs.pdf>

/// ECDSA test vector.
pub struct TestVector {
    /// Private scalar, big-endian, `C::Scalar::BYTES` wide.
    pub d: &'static [u8],

    /// Public key, SEC1-encoded (any of compressed/uncompressed/hybrid).
    pub q: &'static [u8],

    /// Ephemeral scalar (nonce), big-endian. Informational only: this
    /// harness re-derives `k` via RFC 6979 rather than injecting a fixed
    /// one, so a signing test only checks that the vector's own `d`/`m`
    /// reproduce its `r`/`s` deterministically.
    pub k: &'static [u8],

    /// Message digest (already hashed).
    pub m: &'static [u8],

    /// Signature `r` component, big-endian.
    pub r: &'static [u8],

    /// Signature `s` component, big-endian.
    pub s: &'static [u8],
}

/// Define an ECDSA signing test against RFC 6979 deterministic vectors.
/// Expects a curve type, a `Digest + BlockSizeUser + FixedOutputReset` type,
/// and a `&[TestVector]` expression.
#[macro_export]
#[cfg_attr(docsrs, doc(cfg(feature = "dev")))]
macro_rules! new_signing_test {
    ($curve:ty, $digest:ty, $vectors:expr) => {
        #[test]
        fn ecdsa_signing() {
            for vector in $vectors {
                let sk = $crate::SigningKey::<$curve>::from_bytes(vector.d).unwrap();
                let (sig, _recovery_id) = sk.sign_prehash::<$digest>(vector.m).unwrap();
                let (r, s) = sig.split_bytes();
                assert_eq!(vector.r, &r[..vector.r.len()], "r mismatch");
                assert_eq!(vector.s, &s[..vector.s.len()], "s mismatch");
            }
        }
    };
}

/// Define ECDSA verification tests: every vector's signature must verify
/// against its own public key and digest, and must fail once `s` is
/// tweaked.
#[macro_export]
#[cfg_attr(docsrs, doc(cfg(feature = "dev")))]
macro_rules! new_verification_test {
    ($curve:ty, $vectors:expr) => {
        #[test]
        fn ecdsa_verify_success() {
            for vector in $vectors {
                let vk = $crate::VerifyingKey::<$curve>::from_sec1_bytes(vector.q).unwrap();
                let n = vector.r.len();
                let mut raw = [0u8; 132];
                raw[..n].copy_from_slice(vector.r);
                raw[n..2 * n].copy_from_slice(vector.s);
                let sig = $crate::Signature::<$curve>::from_bytes(&raw[..2 * n]).unwrap();
                assert!(vk.verify_prehash(vector.m, &sig).is_ok());
            }
        }

        #[test]
        fn ecdsa_verify_invalid_s() {
            for vector in $vectors {
                let vk = $crate::VerifyingKey::<$curve>::from_sec1_bytes(vector.q).unwrap();
                let n = vector.r.len();
                let mut raw = [0u8; 132];
                raw[..n].copy_from_slice(vector.r);
                raw[n..2 * n].copy_from_slice(vector.s);
                raw[n] ^= 1;
                let sig = $crate::Signature::<$curve>::from_bytes(&raw[..2 * n]).unwrap();
                assert!(vk.verify_prehash(vector.m, &sig).is_err());
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::TestVector;
    use elliptic_curve::curves::p256::P256;
    use sha2::{Digest, Sha256};

    // P-256/SHA-256 vectors, `Q` SEC1-compressed. The first is a
    // self-generated keypair used only to exercise RFC 6979's `(d, m) -> k`
    // derivation; the second is a known-answer vector reproduced bit-exactly
    // from an external source, so a systematic arithmetic bug (wrong curve
    // constant, wrong Montgomery parameter) that is merely self-consistent
    // with the first vector cannot hide behind it the way a round trip can.
    const P256_SHA256_VECTOR: &[TestVector] = &[
        TestVector {
            d: &hex_literal::hex!("001234567890abcdef1234567890abcdef1234567890abcdef1234567890abcd"),
            q: &hex_literal::hex!("032d562a617e9dfb0437d6613a0386fbb9c2418e8e8957d4d7a9fd7b151888327a"),
            k: &hex_literal::hex!("ac440a619936d92652bf4fb38ab778fa07d7c834dce5e83b3ec629604085dd17"),
            m: &hex_literal::hex!("b2376e259689daaa71841d67204f0ba6a7f59862c001eff8baf57e85277cfd8f"),
            r: &hex_literal::hex!("119925056bade37aa8ab02dff244fede159a8aaa37ffacfa5560f1605cfaf7d2"),
            s: &hex_literal::hex!("10db2dc04e1ef7f1c048710d73b59b65d39475140c6d6eba2ff2693f8df7d04c"),
        },
        TestVector {
            d: &hex_literal::hex!("43f729cc1d9494feb28c1e1d36dbcddfdcd717988d51da888feabc9e55e171b8"),
            q: &hex_literal::hex!("03802b0dc263d91bc5831b9efcc2b50e5bb5d902bd67a404f7b752db3eedeb39bf"),
            k: &[],
            m: &hex_literal::hex!("51890598bff4a6468635e8d1903edc7e9bf4eba756e97f3ca01a2ca9365404ae"),
            r: &hex_literal::hex!("f5b08560d4c67b9da2e5da5322101c9644386d7ec8d68fc64ab5fec65466f95e"),
            s: &hex_literal::hex!("333e7d9c7cf2635e72497dcfffcb3896a2561020ee56429945114375000d96c5"),
        },
    ];

    crate::new_signing_test!(P256, Sha256, P256_SHA256_VECTOR);
    crate::new_verification_test!(P256, P256_SHA256_VECTOR);

    #[test]
    fn p256_known_answer_recovery_id() {
        let vector = &P256_SHA256_VECTOR[1];
        let sk = crate::SigningKey::<P256>::from_bytes(vector.d).unwrap();
        let (_sig, recovery_id) = sk.sign_prehash::<Sha256>(vector.m).unwrap();
        assert_eq!(recovery_id.to_byte(), 1);
    }

    // secp256k1/SHA-256 known-answer vector, reproduced bit-exactly. Lives
    // in its own submodule since `new_signing_test!`/`new_verification_test!`
    // expand to fixed test function names, which would otherwise collide
    // with the P-256 invocations above.
    mod secp256k1_known_answer {
        use super::TestVector;
        use elliptic_curve::curves::secp256k1::Secp256k1;
        use sha2::Sha256;

        const SECP256K1_SHA256_VECTOR: &[TestVector] = &[TestVector {
            d: &hex_literal::hex!("cc524c2fe62cc8b820bc830890bedd623d3a836dce22517023bcda4f1c5c756e"),
            q: &hex_literal::hex!("0203cad7f301acf0bb102bc7e680dcb074003ffda0a6be696ad0cf129b87576cd0"),
            k: &[],
            m: &hex_literal::hex!("fa09ee3d85c4938e098fbbf6a4f761a0537e465f610b7873fb264306c37b336c"),
            r: &hex_literal::hex!("83ecd1ab7c388dc9f0957ae39e9c40df99f830300425ead6659f1acdedbec9e6"),
            s: &hex_literal::hex!("1778974e168da0cd64d0f8963148ecbc7fa7325c5a8f1b9b3aa0eacf74568c1a"),
        }];

        crate::new_signing_test!(Secp256k1, Sha256, SECP256K1_SHA256_VECTOR);
        crate::new_verification_test!(Secp256k1, SECP256K1_SHA256_VECTOR);

        #[test]
        fn secp256k1_known_answer_recovery_id() {
            let vector = &SECP256K1_SHA256_VECTOR[0];
            let sk = crate::SigningKey::<Secp256k1>::from_bytes(vector.d).unwrap();
            let (_sig, recovery_id) = sk.sign_prehash::<Sha256>(vector.m).unwrap();
            assert_eq!(recovery_id.to_byte(), 0);
        }
    }

    // Round-trip coverage for the curves the fixed vectors above don't
    // reach. Each curve gets an arbitrary nonzero private key rather than
    // an externally sourced vector - sign/verify/recover agreeing with each
    // other already exercises every curve-specific constant (`a`, `b`, the
    // generator) that the known-answer vectors above don't touch.
    macro_rules! roundtrip_test {
        ($name:ident, $curve:ty) => {
            #[test]
            fn $name() {
                use elliptic_curve::scalar::ScalarField;
                let width = <$curve as elliptic_curve::weierstrass::WeierstrassCurve>::Scalar::BYTES;
                let mut d = [0x11u8; 66];
                d[65] = 0x42;
                let sk = $crate::SigningKey::<$curve>::from_bytes(&d[66 - width..]).unwrap();
                let vk = sk.verifying_key();
                let prehash = Sha256::digest(b"ecdsa round trip across curves");
                let (sig, recovery_id) = sk.sign_prehash::<Sha256>(&prehash).unwrap();
                assert!(vk.verify_prehash(&prehash, &sig).is_ok());
                let recovered = vk.clone().recover_prehash(&prehash, &sig, recovery_id).unwrap();
                assert_eq!(recovered, vk);
            }
        };
    }

    roundtrip_test!(p224_sign_verify_recover_roundtrip, elliptic_curve::curves::p224::P224);
    roundtrip_test!(p384_sign_verify_recover_roundtrip, elliptic_curve::curves::p384::P384);
    roundtrip_test!(p521_sign_verify_recover_roundtrip, elliptic_curve::curves::p521::P521);
    roundtrip_test!(secp256k1_sign_verify_recover_roundtrip, elliptic_curve::curves::secp256k1::Secp256k1);
}
