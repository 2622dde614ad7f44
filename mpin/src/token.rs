//! Taking the PIN out of a client secret, and putting it back.
//!
//! The PIN, reduced modulo [`MAX_PIN`], multiplies the identity's own hashed point:
//! `Token = CS − PIN·H(ID)`. Using `H(ID)` rather than a global generator is what lets a
//! server diagnose the size of a PIN error from a failed session.

use crate::constants::MAX_PIN;
use crate::hash::{hash_identity, HashAlgorithm, HashedIdentity};
use crate::secret::{ClientSecret, Token};
use crate::{Error, Result};
use bls12_381::{G1Projective, Scalar};

/// `PIN·H(ID)` with the PIN reduced into range
#[inline(always)]
pub(crate) fn pin_multiple(identity: &HashedIdentity, pin: u32) -> G1Projective {
    identity.point() * Scalar::from(u64::from(pin % MAX_PIN))
}

/// Create the token the end-user device stores, by subtracting the PIN from the client secret
///
/// # Arguments:
/// - `algorithm` - the hash algorithm the client secret was issued for
/// - `identity` - the end-user's identity
/// - `pin` - the PIN chosen by the end-user, taken modulo [`MAX_PIN`]
/// - `secret` - the combined client secret
///
/// # Return:
/// - Ok(`token`): the token to persist on the device
/// - Err([`Error::InvalidSecret`]): the client secret is the point at infinity
///
pub fn extract_token<I>(
    algorithm: HashAlgorithm,
    identity: I,
    pin: u32,
    secret: &ClientSecret,
) -> Result<Token>
where
    I: AsRef<[u8]>,
{
    if bool::from(secret.point().is_identity()) {
        return Err(Error::InvalidSecret);
    }
    let hcid = hash_identity(algorithm, identity);
    Ok(Token::new(secret.point() - pin_multiple(&hcid, pin)))
}

/// Put the PIN back into a token, recovering the client secret.
///
/// Used to change a PIN: restore with the old PIN, then extract with the new one.
pub fn restore_client_secret<I>(
    algorithm: HashAlgorithm,
    identity: I,
    pin: u32,
    token: &Token,
) -> Result<ClientSecret>
where
    I: AsRef<[u8]>,
{
    if bool::from(token.point().is_identity()) {
        return Err(Error::InvalidSecret);
    }
    let hcid = hash_identity(algorithm, identity);
    Ok(ClientSecret::new(token.point() + pin_multiple(&hcid, pin)))
}
