//! The slice of BLS12-381 the protocol is written against.
//!
//! Everything above this module sees curve points only through these helpers: random scalar
//! generation, hashing onto G1, the fixed-size compressed encodings and the pairing product
//! check. Decoding is strict, a point must be canonical, in the prime order subgroup and not
//! the point at infinity.

use crate::constants::{
    DST_G1_SHA256, DST_G1_SHA384, DST_G1_SHA512, G1_SIZE, G2_SIZE, SCALAR_SIZE,
};
use crate::hash::HashAlgorithm;
use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, Gt, Scalar};
use ff::Field;
use rand_core::CryptoRngCore;
use sha2_09::{Sha256, Sha384, Sha512};

/// Draw a uniformly random non-zero scalar
pub(crate) fn random_scalar<CSPRNG>(rng: &mut CSPRNG) -> Scalar
where
    CSPRNG: CryptoRngCore,
{
    loop {
        let s = Scalar::random(&mut *rng);
        if !bool::from(s.is_zero()) {
            return s;
        }
    }
}

/// Decode a canonical, non-zero scalar
pub(crate) fn scalar_from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Option<Scalar> {
    Option::<Scalar>::from(Scalar::from_bytes(bytes)).filter(|s| !bool::from(s.is_zero()))
}

/// Decode a compressed G1 element, rejecting the point at infinity
pub(crate) fn decode_g1(bytes: &[u8; G1_SIZE]) -> Option<G1Affine> {
    Option::<G1Affine>::from(G1Affine::from_compressed(bytes))
        .filter(|p| !bool::from(p.is_identity()))
}

/// Decode a compressed G2 element, rejecting the point at infinity
pub(crate) fn decode_g2(bytes: &[u8; G2_SIZE]) -> Option<G2Affine> {
    Option::<G2Affine>::from(G2Affine::from_compressed(bytes))
        .filter(|p| !bool::from(p.is_identity()))
}

/// Hash an arbitrary message onto G1 using `hash_to_curve` with the tag for `algorithm`
pub(crate) fn hash_to_g1(algorithm: HashAlgorithm, msg: &[u8]) -> G1Projective {
    match algorithm {
        HashAlgorithm::Sha256 => {
            <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(msg, DST_G1_SHA256)
        }
        HashAlgorithm::Sha384 => {
            <G1Projective as HashToCurve<ExpandMsgXmd<Sha384>>>::hash_to_curve(msg, DST_G1_SHA384)
        }
        HashAlgorithm::Sha512 => {
            <G1Projective as HashToCurve<ExpandMsgXmd<Sha512>>>::hash_to_curve(msg, DST_G1_SHA512)
        }
    }
}

/// Compute `e(a, b) * e(c, d)` with a single final exponentiation
pub(crate) fn pairing_product(a: &G1Affine, b: &G2Affine, c: &G1Affine, d: &G2Affine) -> Gt {
    let b = G2Prepared::from(*b);
    let d = G2Prepared::from(*d);
    multi_miller_loop(&[(a, &b), (c, &d)]).final_exponentiation()
}
