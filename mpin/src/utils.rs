// serde_with helper modules for serialising curve points and scalars
#[cfg(feature = "serde")]
pub(crate) mod serde_g1 {
    use crate::constants::G1_SIZE;
    use crate::curve::decode_g1;
    use bls12_381::G1Affine;
    use serde::de::Error;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(point: &G1Affine, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_arrays::serialize(&point.to_compressed(), serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<G1Affine, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: [u8; G1_SIZE] = serde_arrays::deserialize(deserializer)?;
        decode_g1(&bytes).ok_or_else(|| D::Error::custom("invalid G1 point"))
    }
}

#[cfg(feature = "serde")]
pub(crate) mod serde_g1_option {
    use bls12_381::G1Affine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Wire(#[serde(with = "super::serde_g1")] G1Affine);

    pub fn serialize<S>(point: &Option<G1Affine>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        point.map(Wire).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<G1Affine>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Wire>::deserialize(deserializer)?.map(|w| w.0))
    }
}

#[cfg(feature = "serde")]
pub(crate) mod serde_scalar {
    use crate::constants::SCALAR_SIZE;
    use crate::curve::scalar_from_bytes;
    use bls12_381::Scalar;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(scalar: &Scalar, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        scalar.to_bytes().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Scalar, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = <[u8; SCALAR_SIZE]>::deserialize(deserializer)?;
        scalar_from_bytes(&bytes).ok_or_else(|| D::Error::custom("invalid scalar"))
    }
}
