//! Identity hashing and time permit seeds.
//!
//! `H(ID)` is computed in two steps: the identity is digested with the selected hash, and the
//! digest is hashed onto G1. The time permit seed for a day digests the big-endian day number
//! followed by that same identity digest, then hashes onto G1 again.
//!
//! Client, Server and every Trusted Authority must use the same [`HashAlgorithm`]. A mismatch is
//! not detected, it just makes every derived secret disagree and authentication fail.

use crate::constants::MAX_DIGEST_SIZE;
use crate::curve::hash_to_g1;
use bls12_381::G1Affine;
use sha2::{Digest, Sha256, Sha384, Sha512};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hash function used to map identities and days onto the curve
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Length in bytes of this algorithm's digest
    pub fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => <Sha256 as Digest>::output_size(),
            HashAlgorithm::Sha384 => <Sha384 as Digest>::output_size(),
            HashAlgorithm::Sha512 => <Sha512 as Digest>::output_size(),
        }
    }

    fn digest(self, parts: &[&[u8]]) -> IdentityDigest {
        let mut out = IdentityDigest {
            bytes: [0u8; MAX_DIGEST_SIZE],
            len: self.output_size(),
        };
        match self {
            HashAlgorithm::Sha256 => digest_into::<Sha256>(parts, &mut out.bytes),
            HashAlgorithm::Sha384 => digest_into::<Sha384>(parts, &mut out.bytes),
            HashAlgorithm::Sha512 => digest_into::<Sha512>(parts, &mut out.bytes),
        }
        out
    }
}

#[inline(always)]
fn digest_into<D: Digest>(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    out[..digest.len()].copy_from_slice(&digest);
}

/// Digest of an identity, sized by the algorithm that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct IdentityDigest {
    bytes: [u8; MAX_DIGEST_SIZE],
    len: usize,
}

impl IdentityDigest {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// An identity mapped onto G1 - the `HCID` of the client and the `HID` of the server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedIdentity {
    digest: IdentityDigest,
    point: G1Affine,
}

impl HashedIdentity {
    /// The identity's digest, which the time permit seed is built from
    pub fn digest(&self) -> &[u8] {
        self.digest.as_bytes()
    }

    /// The identity's point on G1
    pub fn point(&self) -> &G1Affine {
        &self.point
    }
}

/// Map an identity onto G1
pub fn hash_identity<I>(algorithm: HashAlgorithm, identity: I) -> HashedIdentity
where
    I: AsRef<[u8]>,
{
    let digest = algorithm.digest(&[identity.as_ref()]);
    let point = G1Affine::from(hash_to_g1(algorithm, digest.as_bytes()));
    HashedIdentity { digest, point }
}

/// Derive `H(day ‖ H(ID))`, the point a master secret share multiplies into a time permit share
pub fn time_permit_seed(
    algorithm: HashAlgorithm,
    day: EpochDay,
    identity: &HashedIdentity,
) -> G1Affine {
    let digest = algorithm.digest(&[&day.0.to_be_bytes()[..], identity.digest()]);
    G1Affine::from(hash_to_g1(algorithm, digest.as_bytes()))
}

/// A day number counted from the Unix epoch.
/// Time permits are bound to exactly one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochDay(u32);

impl EpochDay {
    /// Seconds in one epoch day
    pub const SECONDS: u64 = 24 * 60 * 60;

    /// Wrap a day number
    pub const fn new(day: u32) -> Self {
        Self(day)
    }

    /// The day number
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The day after this one
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// The day containing `secs` seconds after the Unix epoch, `None` past the last `u32` day
    pub fn from_unix_seconds(secs: u64) -> Option<Self> {
        u32::try_from(secs / Self::SECONDS).ok().map(Self)
    }

    /// The current day according to the system clock.
    ///
    /// A clock set before the Unix epoch reads as day 0, and a clock past the last
    /// representable day reads as `u32::MAX`.
    #[cfg(feature = "std")]
    pub fn today() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let secs = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs(),
            Err(_) => return Self(0),
        };
        Self::from_unix_seconds(secs).unwrap_or(Self(u32::MAX))
    }
}

impl From<u32> for EpochDay {
    fn from(day: u32) -> Self {
        Self(day)
    }
}
