/// PINs are reduced modulo this value, giving a four digit PIN space
pub const MAX_PIN: u32 = 10_000;

/// Length of a compressed G1 element
pub const G1_SIZE: usize = 48;

/// Length of a compressed G2 element
pub const G2_SIZE: usize = 96;

/// Length of a scalar in its canonical little-endian encoding
pub const SCALAR_SIZE: usize = 32;

/// Largest digest produced by any supported hash algorithm
pub const MAX_DIGEST_SIZE: usize = 64;

/// Domain separation tag for hashing onto G1 with SHA-256
pub const DST_G1_SHA256: &[u8] = b"MPIN-V01-CS02-with-BLS12381G1_XMD:SHA-256_SSWU_RO_";
/// Domain separation tag for hashing onto G1 with SHA-384
pub const DST_G1_SHA384: &[u8] = b"MPIN-V01-CS02-with-BLS12381G1_XMD:SHA-384_SSWU_RO_";
/// Domain separation tag for hashing onto G1 with SHA-512
pub const DST_G1_SHA512: &[u8] = b"MPIN-V01-CS02-with-BLS12381G1_XMD:SHA-512_SSWU_RO_";
