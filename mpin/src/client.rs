use crate::constants::SCALAR_SIZE;
use crate::curve::{random_scalar, scalar_from_bytes};
use crate::hash::{hash_identity, time_permit_seed};
use crate::secret::{Secret, SecretScalar, TimePermit, Token};
use crate::token::pin_multiple;
use crate::{Error, Result, SessionParams};
use bls12_381::{G1Affine, G1Projective, Scalar};
use ff::Field;
use rand_core::CryptoRngCore;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use crate::utils::{serde_g1, serde_g1_option};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Implementation of the client side of the M-Pin protocol
pub struct MpinClient<CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    rng: CSPRNG,
}

impl<CSPRNG> MpinClient<CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    /// Create new client
    pub fn new(rng: CSPRNG) -> Self {
        Self { rng }
    }

    /// Start a session: rebuild the client secret from the token and the entered PIN and commit
    /// to a fresh random `x`
    ///
    /// # Arguments:
    /// - `params` - hash algorithm and (optional) time permit day agreed with the server
    /// - `identity` - the end-user's identity
    /// - `pin` - the PIN entered by the end-user for this attempt
    /// - `token` - the token stored on the device
    /// - `permit` - the time permit for `params.day`, required when time permits are enabled
    ///
    /// # Return:
    /// - Ok(([`next_step`](MpinClientPass1Done), [`message`](ClientMessage::Commitment)))
    ///     - [`next_step`](MpinClientPass1Done): the client waiting for the server's challenge
    ///     - [`message`](ClientMessage::Commitment): the message to send to the server
    /// - Err([`Error::MissingTimePermit`]): time permits are enabled but `permit` is `None`
    /// - Err([`Error::InvalidSecret`]): the token is the point at infinity
    ///
    pub fn pass1<I>(
        &mut self,
        params: SessionParams,
        identity: I,
        pin: u32,
        token: &Token,
        permit: Option<&TimePermit>,
    ) -> Result<(MpinClientPass1Done, ClientMessage)>
    where
        I: AsRef<[u8]>,
    {
        let x = Secret::new(random_scalar(&mut self.rng));
        MpinClientPass1Done::new(x, params, identity.as_ref(), pin, token, permit)
    }

    /// The same as [`pass1`](Self::pass1) but with the caller supplying the nonce `x`.
    ///
    /// The nonce must never be reused across sessions.
    ///
    /// # Return:
    /// - Err([`Error::InvalidRandomness`]): `x` is zero or not a canonical scalar
    ///
    pub fn pass1_with_nonce<I>(
        &self,
        x: &[u8; SCALAR_SIZE],
        params: SessionParams,
        identity: I,
        pin: u32,
        token: &Token,
        permit: Option<&TimePermit>,
    ) -> Result<(MpinClientPass1Done, ClientMessage)>
    where
        I: AsRef<[u8]>,
    {
        let x = scalar_from_bytes(x).ok_or(Error::InvalidRandomness)?;
        MpinClientPass1Done::new(Secret::new(x), params, identity.as_ref(), pin, token, permit)
    }
}

/// Client that has sent its commitment and waits for the server's challenge `y`
pub struct MpinClientPass1Done {
    x: SecretScalar,
    sec: Secret<G1Projective>,
}

impl MpinClientPass1Done {
    fn new(
        x: SecretScalar,
        params: SessionParams,
        identity: &[u8],
        pin: u32,
        token: &Token,
        permit: Option<&TimePermit>,
    ) -> Result<(Self, ClientMessage)> {
        if bool::from(token.point().is_identity()) {
            return Err(Error::InvalidSecret);
        }

        let hcid = hash_identity(params.algorithm, identity);
        let approx = Secret::new(token.point() + pin_multiple(&hcid, pin));

        let (sec, u, ut) = match params.day {
            Some(day) => {
                let permit = permit.ok_or(Error::MissingTimePermit)?;
                let seed = time_permit_seed(params.algorithm, day, &hcid);
                let u = hcid.point() * x.expose();
                let ut = (G1Projective::from(hcid.point()) + seed) * x.expose();
                (Secret::new(approx.expose() + permit.point()), u, Some(ut))
            }
            None => (approx, hcid.point() * x.expose(), None),
        };

        trace!(
            identity_len = identity.len(),
            time_permits = params.day.is_some(),
            "client pass 1"
        );
        let message = ClientMessage::Commitment {
            u: G1Affine::from(u),
            ut: ut.map(G1Affine::from),
        };
        let next_step = Self { x, sec };
        Ok((next_step, message))
    }

    /// Answer the server's challenge with `V = −(x + y)·SEC`
    ///
    /// # Arguments:
    /// - `y` - the challenge received from the server
    ///
    /// # Return:
    /// - Ok([`message`](ClientMessage::Response)): the message to send to the server
    /// - Err([`Error::InvalidRandomness`]): `y` is zero, or `x + y` is zero
    ///
    pub fn receive_challenge(self, y: Scalar) -> Result<ClientMessage> {
        if bool::from(y.is_zero()) {
            return Err(Error::InvalidRandomness);
        }
        let blind = Secret::new(self.x.expose() + y);
        if bool::from(blind.expose().is_zero()) {
            return Err(Error::InvalidRandomness);
        }

        let v = -(self.sec.expose() * blind.expose());
        debug!("client pass 2 complete");
        Ok(ClientMessage::Response(G1Affine::from(v)))
    }
}

/// An enum representing the different messages the client can send to the server
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClientMessage {
    /// Pass 1 commitment
    Commitment {
        /// `U = x·H(ID)`
        #[cfg_attr(feature = "serde", serde(with = "serde_g1"))]
        u: G1Affine,
        /// `UT = x·(H(ID) + H(day ‖ H(ID)))`, present exactly when time permits are enabled
        #[cfg_attr(feature = "serde", serde(with = "serde_g1_option"))]
        ut: Option<G1Affine>,
    },

    /// Pass 2 response `V = −(x + y)·SEC`
    Response(#[cfg_attr(feature = "serde", serde(with = "serde_g1"))] G1Affine),
}
