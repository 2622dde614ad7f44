//! Recovering the size of a PIN error from a failed session.
//!
//! When the client used `PIN2` but its token was made with `PIN1`, the failed check value is
//! `E = e(V, Q)·e(P, SS) = F^(−δ)` with `F = e(y·H(ID) + U, Q)` and `δ = PIN2 − PIN1`.
//! Both `E` and `F` are known to the server, and `|δ| < MAX_PIN`, so `δ` is found by walking
//! the powers of `F`.

use crate::constants::MAX_PIN;
use bls12_381::Gt;
use tracing::trace;

/// The `E` and `F` values of a failed session
#[derive(Clone, Debug)]
pub struct PinErrorWitness {
    e: Gt,
    f: Gt,
}

impl PinErrorWitness {
    pub(crate) fn new(e: Gt, f: Gt) -> Self {
        Self { e, f }
    }

    /// Find `δ = PIN2 − PIN1`, the difference between the PIN entered and the PIN the token was
    /// made with.
    ///
    /// # Return:
    /// - Some(`δ`): the session failed because of a PIN error of exactly `δ`
    /// - None: no PIN error explains the failure - the time permit or token is wrong, or
    ///   the transcript was tampered with
    ///
    pub fn pin_error(&self) -> Option<i32> {
        let target = -self.e;
        let mut acc = Gt::identity();
        for delta in 1..MAX_PIN as i32 {
            acc += self.f;
            if acc == target {
                trace!(steps = delta, "pin error found");
                return Some(delta);
            }
            if acc == self.e {
                trace!(steps = delta, "pin error found");
                return Some(-delta);
            }
        }
        None
    }
}
