//! Master secret shares and the secrets derived from them.
//!
//! Each Trusted Authority holds one [`MasterSecretShare`] `sᵢ` and issues its share of every
//! derived secret independently. The end-user and the server add the shares up, so the combined
//! values equal what a single authority holding `Σ sᵢ` would have issued. Every share is needed,
//! there is no threshold.

use crate::curve::random_scalar;
use crate::hash::{time_permit_seed, EpochDay, HashAlgorithm, HashedIdentity};
use crate::secret::{
    ClientSecret, ClientSecretShare, MasterSecretShare, Secret, ServerSecret, ServerSecretShare,
    TimePermit, TimePermitShare,
};
use crate::{Error, Result};
use bls12_381::{G1Projective, G2Projective};
use group::Group;
use rand_core::CryptoRngCore;
use tracing::debug;

/// Generate a fresh random, non-zero master secret share
pub fn generate_master_secret_share<CSPRNG>(rng: &mut CSPRNG) -> MasterSecretShare
where
    CSPRNG: CryptoRngCore,
{
    MasterSecretShare(Secret::new(random_scalar(rng)))
}

/// Compute this authority's server secret share `s·Q`, where `Q` is the G2 generator
pub fn get_server_secret_share(share: &MasterSecretShare) -> ServerSecretShare {
    ServerSecretShare::new(G2Projective::generator() * share.scalar())
}

/// Compute this authority's client secret share `s·H(ID)`
pub fn get_client_secret_share(
    share: &MasterSecretShare,
    identity: &HashedIdentity,
) -> ClientSecretShare {
    ClientSecretShare::new(identity.point() * share.scalar())
}

/// Compute this authority's time permit share `s·H(day ‖ H(ID))`
pub fn get_time_permit_share(
    algorithm: HashAlgorithm,
    day: EpochDay,
    share: &MasterSecretShare,
    identity: &HashedIdentity,
) -> TimePermitShare {
    let seed = time_permit_seed(algorithm, day, identity);
    TimePermitShare::new(seed * share.scalar())
}

/// Add up a non-empty sequence of group elements, keeping the running sum wiped on drop
#[inline(always)]
fn combine<'a, G, I>(points: I) -> Result<Secret<G>>
where
    G: Group + Default + 'a,
    I: IntoIterator<Item = &'a G>,
{
    let mut points = points.into_iter();
    let mut sum = Secret::new(*points.next().ok_or(Error::NoShares)?);
    let mut count = 1usize;
    for p in points {
        sum = Secret::new(*sum.expose() + p);
        count += 1;
    }

    debug!(shares = count, "combined secret shares");
    if bool::from(sum.expose().is_identity()) {
        return Err(Error::InvalidShare);
    }
    Ok(sum)
}

/// Combine every authority's server secret share into the server secret `SS`
pub fn combine_server_secret<'a, I>(shares: I) -> Result<ServerSecret>
where
    I: IntoIterator<Item = &'a ServerSecretShare>,
{
    combine::<G2Projective, _>(shares.into_iter().map(|s| s.point())).map(ServerSecret)
}

/// Combine every authority's client secret share into the end-user's client secret
pub fn combine_client_secret<'a, I>(shares: I) -> Result<ClientSecret>
where
    I: IntoIterator<Item = &'a ClientSecretShare>,
{
    combine::<G1Projective, _>(shares.into_iter().map(|s| s.point())).map(ClientSecret)
}

/// Combine every authority's time permit share for one day into the end-user's time permit
pub fn combine_time_permit<'a, I>(shares: I) -> Result<TimePermit>
where
    I: IntoIterator<Item = &'a TimePermitShare>,
{
    combine::<G1Projective, _>(shares.into_iter().map(|s| s.point())).map(TimePermit)
}
