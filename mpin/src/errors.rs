use core::fmt;

/// Errors that can occur during the protocol
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A secret share did not decode to a valid group element, or the shares summed to the
    /// point at infinity
    InvalidShare,
    /// An attempt was made to combine an empty collection of shares
    NoShares,
    /// A nonce was zero or not a canonical scalar
    InvalidRandomness,
    /// A client secret or token is not a valid group element
    InvalidSecret,
    /// A public protocol message did not decode to a valid group element
    InvalidPoint,
    /// Time permits are in force for this session but no permit (or `UT`) was supplied
    MissingTimePermit,
    /// The pairing check failed.
    /// Deliberately says nothing about whether the PIN, the time permit or the transcript was at fault.
    AuthenticationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidShare => write!(f, "secret share is not a valid group element"),
            Error::NoShares => write!(f, "at least one secret share is required"),
            Error::InvalidRandomness => write!(f, "nonce is zero or out of range"),
            Error::InvalidSecret => write!(f, "client secret or token is not a valid group element"),
            Error::InvalidPoint => write!(f, "protocol message is not a valid group element"),
            Error::MissingTimePermit => write!(
                f,
                "time permits are enabled for this session but no permit was supplied"
            ),
            Error::AuthenticationFailed => write!(f, "authentication failed"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type
pub type Result<T> = core::result::Result<T, Error>;
