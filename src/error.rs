use derive_more::derive::{Display, Error};

use crate::signal_channel::PioIndex;

/// A specialized [`Result`](core::result::Result) where the error is this crate's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from binding a strip to a PIO state machine.
///
/// The pixel buffer itself never fails; only state machine selection reports errors.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Error {
    /// Every state machine on both PIO blocks is already claimed.
    #[display("no free state machine on PIO0 or PIO1")]
    NoFreeStateMachine,

    /// An explicitly requested state machine was already claimed.
    #[display("state machine {sm} on {pio} is already claimed")]
    StateMachineInUse {
        /// The PIO block that was requested.
        pio: PioIndex,
        /// The state machine index that was requested.
        sm: u8,
    },

    /// An explicitly requested state machine index does not exist.
    #[display("state machine {sm} does not exist on {pio}")]
    InvalidStateMachine {
        /// The PIO block that was requested.
        pio: PioIndex,
        /// The out-of-range state machine index.
        sm: u8,
    },
}
