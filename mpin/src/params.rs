use crate::hash::{EpochDay, HashAlgorithm};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters the client and the server must agree on before a session starts.
///
/// Neither side can detect a disagreement, a session run with mismatched parameters
/// simply fails with [`Error::AuthenticationFailed`](crate::Error::AuthenticationFailed).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionParams {
    /// Hash used to map the identity (and the day) onto G1
    pub algorithm: HashAlgorithm,
    /// The day time permits are checked against, `None` disables time permits
    pub day: Option<EpochDay>,
}

impl SessionParams {
    /// Parameters for a session without time permits
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            day: None,
        }
    }

    /// Require a time permit valid for `day`
    pub const fn with_time_permits(self, day: EpochDay) -> Self {
        Self {
            algorithm: self.algorithm,
            day: Some(day),
        }
    }

    /// Whether time permits are in force
    pub const fn time_permits_enabled(&self) -> bool {
        self.day.is_some()
    }
}
