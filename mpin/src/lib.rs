#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! # Usage
//! Add `mpin` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mpin = "0.1"
//! ```
//!
//! Trusted Authorities use the functions in [`sharing`](sharing/index.html), the end-user
//! device uses [`extract_token`] once and then the [`client`](client/index.html) module,
//! the verifier uses the [`server`](server/index.html) module.
//!
//! # Protocol description
//! Here we briefly describe the two-pass M-Pin protocol. For additional information refer to
//! the M-Pin paper[1]. `e` is the BLS12-381 pairing, `Q` the fixed generator of G2, `H` a hash
//! onto G1 and `s = Σ sᵢ` the master secret split across the Trusted Authorities.
//!
//! | Trusted Authority `i`          | Data transfer          | End-User                         |
//! |--------------------------------|------------------------|----------------------------------|
//! |`sᵢ = ${1..r}`                  |                        |                                  |
//! |`SSᵢ = sᵢ·Q`                    | `SSᵢ` -> server        |                                  |
//! |`CSᵢ = sᵢ·H(ID)`                | `CSᵢ` ->               |`CS = Σ CSᵢ`                      |
//! |`TPᵢ = sᵢ·H(d `\|\|` H(ID))`    | `TPᵢ` ->               |`TP = Σ TPᵢ`                      |
//! |                                |                        |`TK = CS − PIN·H(ID)`, store `TK` |
//!
//! |       Server                   |   Data transfer        |      Client                      |
//! |--------------------------------|------------------------|----------------------------------|
//! |                                |                        |`x = ${1..r}`                     |
//! |                                |                        |`SEC = TK + PIN'·H(ID) + TP`      |
//! |`HID = H(ID)`                   | <- `ID`, `U`, `UT`     |`U = x·H(ID)`                     |
//! |`HTID = HID + H(d `\|\|` H(ID))`|                        |`UT = x·(H(ID) + H(d `\|\|` H(ID)))`|
//! |`y = ${1..r}`                   | `y` ->                 |                                  |
//! |                                | <- `V`                 |`V = −(x + y)·SEC`                |
//! |`P = y·HTID + UT`               |                        |                                  |
//! |accept iff `e(V,Q)·e(P,SS) = 1` |                        |                                  |
//!
//! Without time permits `TP`, `UT` and `HTID` are dropped and `P = y·HID + U`.
//!
//! Variables and notations have the following meaning:
//!
//! - `r` - the order of the BLS12-381 groups
//! - `${1..r}` - pick a random non-zero scalar
//! - `d` - the epoch day the time permit is valid for
//! - `SS` - the server secret `Σ SSᵢ`
//! - `CS` - the client secret
//! - `TP` - the time permit for day `d`
//! - `TK` - the token, the only secret stored by the end-user
//! - `PIN'` - the PIN entered at authentication time
//!
//! [1]: https://eprint.iacr.org/2002/164.pdf

#[cfg(any(feature = "std", test))]
extern crate std;

mod curve;
mod diagnosis;
mod errors;
mod hash;
mod params;
mod secret;
mod token;
mod utils;

/// Module containing the implementation of the client for the M-Pin protocol
pub mod client;

/// Module containing the implementation of the server for the M-Pin protocol
pub mod server;

/// Module containing the Trusted Authority operations and share combination
pub mod sharing;

/// Module contains constants used in the code
pub mod constants;

pub use self::{
    client::{ClientMessage, MpinClient},
    diagnosis::PinErrorWitness,
    errors::{Error, Result},
    hash::{hash_identity, time_permit_seed, EpochDay, HashAlgorithm, HashedIdentity},
    params::SessionParams,
    secret::{
        ClientSecret, ClientSecretShare, MasterSecretShare, ServerSecret, ServerSecretShare,
        TimePermit, TimePermitShare, Token,
    },
    server::{MpinServer, ServerMessage, Verdict},
    sharing::{
        combine_client_secret, combine_server_secret, combine_time_permit,
        generate_master_secret_share, get_client_secret_share, get_server_secret_share,
        get_time_permit_share,
    },
    token::{extract_token, restore_client_secret},
};

pub use bls12_381::{G1Affine, G2Affine, Scalar};
pub use rand_core;

#[cfg(feature = "getrandom")]
pub use rand_core::OsRng;

/// Default Client instantiation with OsRng
#[cfg(feature = "getrandom")]
pub type Client = MpinClient<OsRng>;

/// Default Server instantiation with OsRng
#[cfg(feature = "getrandom")]
pub type Server = MpinServer<OsRng>;
