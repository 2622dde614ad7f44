//! Owning wrappers for secret-bearing scalars and points.
//!
//! Every value here is overwritten with its `Default` (zero / the point at infinity) through
//! volatile writes when dropped, so secrets are wiped on every exit path.

use crate::constants::{G1_SIZE, G2_SIZE, SCALAR_SIZE};
use crate::curve::{decode_g1, decode_g2, scalar_from_bytes};
use crate::{Error, Result};
use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{DefaultIsZeroes, Zeroize, ZeroizeOnDrop, Zeroizing};

/// A `Copy` cell the `zeroize` crate knows how to wipe
#[derive(Clone, Copy, Default)]
struct Cell<T>(T);

impl<T: Copy + Default> DefaultIsZeroes for Cell<T> {}

/// A value that is zeroized when dropped
pub(crate) struct Secret<T: Copy + Default>(Cell<T>);

impl<T: Copy + Default> Secret<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(Cell(value))
    }

    pub(crate) fn expose(&self) -> &T {
        &self.0 .0
    }
}

impl<T: Copy + Default> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self::new(*self.expose())
    }
}

impl<T: Copy + Default> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Copy + Default> ZeroizeOnDrop for Secret<T> {}

/// A scalar known to one party only, like the nonces `x` and `y`
pub(crate) type SecretScalar = Secret<Scalar>;

/// A master secret share held by exactly one Trusted Authority
#[derive(Clone)]
pub struct MasterSecretShare(pub(crate) SecretScalar);

impl MasterSecretShare {
    /// Decode a share from its canonical little-endian encoding.
    /// Zero and out of range values are rejected with [`Error::InvalidShare`].
    pub fn from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        scalar_from_bytes(bytes)
            .map(|s| Self(Secret::new(s)))
            .ok_or(Error::InvalidShare)
    }

    /// Encode this share, the buffer is wiped when dropped
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        Zeroizing::new(self.0.expose().to_bytes())
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        self.0.expose()
    }
}

impl fmt::Debug for MasterSecretShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecretShare(..)")
    }
}

// generates a zeroize-on-drop newtype around a secret curve point
macro_rules! secret_point {
    (
        $(#[$meta:meta])*
        $name:ident, $proj:ty, $affine:ty, $size:expr, $decode:path, $err:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(pub(crate) Secret<$proj>);

        impl $name {
            #[allow(dead_code)]
            pub(crate) fn new(point: $proj) -> Self {
                Self(Secret::new(point))
            }

            pub(crate) fn point(&self) -> &$proj {
                self.0.expose()
            }

            /// Decode from the compressed encoding.
            /// Bytes that are not a valid, non-identity point are rejected.
            pub fn from_bytes(bytes: &[u8; $size]) -> Result<Self> {
                $decode(bytes)
                    .map(|p| Self::new(<$proj>::from(p)))
                    .ok_or($err)
            }

            /// Compressed encoding, the buffer is wiped when dropped
            pub fn to_bytes(&self) -> Zeroizing<[u8; $size]> {
                Zeroizing::new(<$affine>::from(self.point()).to_compressed())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.point().ct_eq(other.point()).into()
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(..)"))
            }
        }
    };
}

secret_point!(
    /// One authority's share of the server secret, `s·Q` in G2
    ServerSecretShare, G2Projective, G2Affine, G2_SIZE, decode_g2, Error::InvalidShare
);

secret_point!(
    /// The combined server secret `SS`, the sum of every authority's [`ServerSecretShare`]
    ServerSecret, G2Projective, G2Affine, G2_SIZE, decode_g2, Error::InvalidShare
);

secret_point!(
    /// One authority's share of a client secret, `s·HCID` in G1
    ClientSecretShare, G1Projective, G1Affine, G1_SIZE, decode_g1, Error::InvalidShare
);

secret_point!(
    /// The combined client secret, the sum of every authority's [`ClientSecretShare`]
    ClientSecret, G1Projective, G1Affine, G1_SIZE, decode_g1, Error::InvalidSecret
);

secret_point!(
    /// One authority's share of a time permit for a single day
    TimePermitShare, G1Projective, G1Affine, G1_SIZE, decode_g1, Error::InvalidShare
);

secret_point!(
    /// A combined time permit `s·H(day ‖ H(ID))`, valid for one epoch day
    TimePermit, G1Projective, G1Affine, G1_SIZE, decode_g1, Error::InvalidShare
);

secret_point!(
    /// The client secret with the PIN taken out, the only secret the end-user device persists
    Token, G1Projective, G1Affine, G1_SIZE, decode_g1, Error::InvalidSecret
);
