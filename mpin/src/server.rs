use crate::diagnosis::PinErrorWitness;
use crate::curve::{pairing_product, random_scalar};
use crate::hash::{hash_identity, time_permit_seed};
use crate::secret::{Secret, SecretScalar, ServerSecret};
use crate::{ClientMessage, Error, Result, SessionParams};
use bls12_381::{pairing, G1Affine, G1Projective, G2Affine, Gt, Scalar};
use group::Group;
use rand_core::CryptoRngCore;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use crate::utils::serde_scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Implementation of the server side of the M-Pin protocol
pub struct MpinServer<CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    /// The CSPRNG used to draw challenges
    rng: CSPRNG,
}

impl<CSPRNG> MpinServer<CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    /// Create a new server
    pub fn new(rng: CSPRNG) -> Self {
        Self { rng }
    }

    /// Compute `HID = H(ID)` and, when time permits are enabled, `HTID = HID + H(day ‖ H(ID))`.
    ///
    /// This uses public data only, the day must be the server's own idea of today
    /// rather than anything the client claims.
    ///
    /// # Arguments:
    /// - `params` - hash algorithm and (optional) time permit day for this session
    /// - `identity` - the identity the client claims
    ///
    /// # Return:
    /// [`next_step`](MpinServerHidComputed): the server waiting for the client's commitment
    ///
    pub fn server1<I>(&mut self, params: SessionParams, identity: I) -> MpinServerHidComputed<'_, CSPRNG>
    where
        I: AsRef<[u8]>,
    {
        let hid = hash_identity(params.algorithm, identity);
        let htid = params.day.map(|day| {
            let seed = time_permit_seed(params.algorithm, day, &hid);
            G1Affine::from(G1Projective::from(hid.point()) + seed)
        });

        trace!(time_permits = htid.is_some(), "server pass 1");
        MpinServerHidComputed {
            rng: &mut self.rng,
            params,
            hid: *hid.point(),
            htid,
        }
    }
}

/// Server that knows `HID` (and `HTID`) and waits for the client's commitment
pub struct MpinServerHidComputed<'a, CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    rng: &'a mut CSPRNG,
    params: SessionParams,
    hid: G1Affine,
    htid: Option<G1Affine>,
}

impl<'a, CSPRNG> MpinServerHidComputed<'a, CSPRNG>
where
    CSPRNG: CryptoRngCore,
{
    /// `H(ID)` for the claimed identity
    pub fn hid(&self) -> &G1Affine {
        &self.hid
    }

    /// `H(ID) + H(day ‖ H(ID))`, present when time permits are enabled
    pub fn htid(&self) -> Option<&G1Affine> {
        self.htid.as_ref()
    }

    /// Accept the client's commitment and draw the fresh challenge `y`
    ///
    /// # Arguments:
    /// - `u` - the client's `U`
    /// - `ut` - the client's `UT`, required when time permits are enabled and ignored otherwise
    ///
    /// # Return:
    /// - Ok(([`next_step`](MpinServerAwaitResponse), [`message`](ServerMessage::Challenge)))
    ///     - [`next_step`](MpinServerAwaitResponse): the server waiting for the client's response
    ///     - [`message`](ServerMessage::Challenge): the message to send to the client
    /// - Err([`Error::MissingTimePermit`]): time permits are enabled but `ut` is `None`
    /// - Err([`Error::InvalidPoint`]): a commitment is the point at infinity
    ///
    pub fn receive_commitment(
        self,
        u: G1Affine,
        ut: Option<G1Affine>,
    ) -> Result<(MpinServerAwaitResponse, ServerMessage)> {
        let ut = match self.htid {
            Some(_) => Some(ut.ok_or(Error::MissingTimePermit)?),
            None => None,
        };
        if bool::from(u.is_identity()) || ut.is_some_and(|ut| bool::from(ut.is_identity())) {
            return Err(Error::InvalidPoint);
        }

        let y = Secret::new(random_scalar(self.rng));
        let message = ServerMessage::Challenge(*y.expose());
        let next_step = MpinServerAwaitResponse {
            params: self.params,
            hid: self.hid,
            htid: self.htid,
            u,
            ut,
            y,
        };
        Ok((next_step, message))
    }

    /// [`receive_commitment`](Self::receive_commitment) taking the message as sent by the client
    ///
    /// # Return:
    /// - Err([`Error::InvalidPoint`]): the message is not a commitment
    ///
    pub fn receive_client_message(
        self,
        message: ClientMessage,
    ) -> Result<(MpinServerAwaitResponse, ServerMessage)> {
        match message {
            ClientMessage::Commitment { u, ut } => self.receive_commitment(u, ut),
            ClientMessage::Response(_) => Err(Error::InvalidPoint),
        }
    }
}

/// The outcome of a verification that keeps the PIN error diagnosis data
#[derive(Clone, Debug)]
pub enum Verdict {
    /// The client knew the PIN and held a valid token (and time permit)
    Authenticated,
    /// Authentication failed. The witness can be searched for the size of a PIN error.
    Rejected(PinErrorWitness),
}

/// Server that has issued its challenge and waits for the client's response `V`
pub struct MpinServerAwaitResponse {
    params: SessionParams,
    hid: G1Affine,
    htid: Option<G1Affine>,
    u: G1Affine,
    ut: Option<G1Affine>,
    y: SecretScalar,
}

impl MpinServerAwaitResponse {
    /// The session parameters this server was started with
    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// `P = y·HTID + UT` with time permits, `P = y·HID + U` without
    fn blinded_identity(&self) -> G1Affine {
        let y = self.y.expose();
        match (self.htid, self.ut) {
            (Some(htid), Some(ut)) => G1Affine::from(htid * y + ut),
            _ => G1Affine::from(self.hid * y + self.u),
        }
    }

    /// Compute `e(V, Q)·e(P, SS)`, the identity of Gt exactly when authentication succeeds
    fn check_value(&self, v: &G1Affine, server_secret: &ServerSecret) -> Result<Gt> {
        if bool::from(v.is_identity()) {
            return Err(Error::InvalidPoint);
        }
        let p = self.blinded_identity();
        let ss = G2Affine::from(server_secret.point());
        Ok(pairing_product(v, &G2Affine::generator(), &p, &ss))
    }

    /// Verify the client's response `V`, completing the protocol.
    ///
    /// # Arguments:
    /// - `v` - the client's response
    /// - `server_secret` - the combined server secret
    ///
    /// # Return:
    /// - Ok(()): the client is authenticated
    /// - Err([`Error::AuthenticationFailed`]): wrong PIN, wrong or expired time permit, or a
    ///   tampered transcript, these are not told apart
    /// - Err([`Error::InvalidPoint`]): `v` is the point at infinity
    ///
    pub fn verify(self, v: G1Affine, server_secret: &ServerSecret) -> Result<()> {
        let g = self.check_value(&v, server_secret)?;
        if bool::from(g.is_identity()) {
            debug!(time_permits = self.params.time_permits_enabled(), "authentication succeeded");
            Ok(())
        } else {
            debug!(time_permits = self.params.time_permits_enabled(), "authentication failed");
            Err(Error::AuthenticationFailed)
        }
    }

    /// [`verify`](Self::verify) taking the message as sent by the client
    ///
    /// # Return:
    /// - Err([`Error::InvalidPoint`]): the message is not a response
    ///
    pub fn receive_client_message(
        self,
        message: ClientMessage,
        server_secret: &ServerSecret,
    ) -> Result<()> {
        match message {
            ClientMessage::Response(v) => self.verify(v, server_secret),
            ClientMessage::Commitment { .. } => Err(Error::InvalidPoint),
        }
    }

    /// Verify the client's response like [`verify`](Self::verify), but on failure also compute
    /// the data needed to recover the size of a PIN error.
    ///
    /// The witness costs an extra pairing. Do not reveal anything derived from it to the client.
    ///
    /// # Return:
    /// - Ok([`Verdict`]): the outcome of the session
    /// - Err([`Error::InvalidPoint`]): `v` is the point at infinity
    ///
    pub fn verify_diagnosed(self, v: G1Affine, server_secret: &ServerSecret) -> Result<Verdict> {
        let g = self.check_value(&v, server_secret)?;
        if bool::from(g.is_identity()) {
            debug!("authentication succeeded");
            return Ok(Verdict::Authenticated);
        }

        let y = self.y.expose();
        let f = pairing(&G1Affine::from(self.hid * y + self.u), &G2Affine::generator());
        debug!("authentication failed, recording diagnosis witness");
        Ok(Verdict::Rejected(PinErrorWitness::new(g, f)))
    }
}

/// An enum representing the different messages the server can send to the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ServerMessage {
    /// The fresh random challenge `y`
    Challenge(#[cfg_attr(feature = "serde", serde(with = "serde_scalar"))] Scalar),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{EpochDay, HashAlgorithm};
    use rand_core::OsRng;

    #[test]
    fn test_server1_matches_client_derivation() {
        let mut server = MpinServer::new(OsRng);
        let params = SessionParams::new(HashAlgorithm::Sha256).with_time_permits(EpochDay::new(3));
        let state = server.server1(params, b"dave");

        let hid = hash_identity(HashAlgorithm::Sha256, b"dave");
        let seed = time_permit_seed(HashAlgorithm::Sha256, EpochDay::new(3), &hid);
        assert_eq!(state.hid(), hid.point());
        assert_eq!(
            state.htid(),
            Some(&G1Affine::from(G1Projective::from(hid.point()) + seed))
        );
    }

    #[test]
    fn test_server1_without_permits_has_no_htid() {
        let mut server = MpinServer::new(OsRng);
        let state = server.server1(SessionParams::default(), b"dave");
        assert!(state.htid().is_none());
    }

    #[test]
    fn test_missing_ut_rejected() {
        let mut server = MpinServer::new(OsRng);
        let params = SessionParams::default().with_time_permits(EpochDay::new(3));
        let state = server.server1(params, b"dave");
        let u = G1Affine::generator();
        assert!(matches!(
            state.receive_commitment(u, None),
            Err(Error::MissingTimePermit)
        ));
    }

    #[test]
    fn test_identity_commitment_rejected() {
        let mut server = MpinServer::new(OsRng);
        let state = server.server1(SessionParams::default(), b"dave");
        assert!(matches!(
            state.receive_commitment(G1Affine::identity(), None),
            Err(Error::InvalidPoint)
        ));
    }

    #[test]
    fn test_challenges_are_fresh() {
        let mut server = MpinServer::new(OsRng);
        let (_, ServerMessage::Challenge(y1)) = server
            .server1(SessionParams::default(), b"dave")
            .receive_commitment(G1Affine::generator(), None)
            .unwrap();
        let (_, ServerMessage::Challenge(y2)) = server
            .server1(SessionParams::default(), b"dave")
            .receive_commitment(G1Affine::generator(), None)
            .unwrap();
        assert_ne!(y1, y2);
    }

    #[test]
    fn test_response_expected_after_commitment() {
        let mut server = MpinServer::new(OsRng);
        let state = server.server1(SessionParams::default(), b"dave");
        let res = state.receive_client_message(ClientMessage::Response(G1Affine::generator()));
        assert!(matches!(res, Err(Error::InvalidPoint)));
    }
}
