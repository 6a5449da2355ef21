//! The contract between a [`PixelStrip`](crate::pixel_strip::PixelStrip) and the hardware that
//! shifts its bits onto the wire, plus the policy for choosing a PIO state machine.
//!
//! A [`SignalChannel`] accepts 32-bit wire words and emits them in order. On the Pico this is a
//! PIO state machine running the SK6812 program (see `pio_channel`), but any type that can
//! serialize words works, including a recording double in host tests.
//!
//! [`StateMachineClaims`] decides *which* state machine a strip gets. An explicit
//! [`StateMachineSlot`] is claimed exactly. Otherwise the first free state machine on PIO0
//! is used, then PIO1.

use derive_more::derive::Display;

use crate::{Error, Result};

/// Number of state machines in each PIO block.
pub const STATE_MACHINES_PER_PIO: u8 = 4;

/// Hardware that serializes 32-bit wire words into a timed bitstream.
pub trait SignalChannel {
    /// Hands one word to the serializer.
    ///
    /// Does not return until the serializer has room for the word. There is no timeout: a
    /// stalled peripheral stalls the caller.
    fn submit_blocking(&mut self, word: u32);
}

impl<T: SignalChannel + ?Sized> SignalChannel for &mut T {
    #[inline]
    fn submit_blocking(&mut self, word: u32) {
        (**self).submit_blocking(word);
    }
}

/// One of the two PIO blocks strips can run on.
///
/// PIO0 is the primary block; PIO1 is only used once PIO0 is full.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum PioIndex {
    /// The primary PIO block.
    #[display("PIO0")]
    Pio0,
    /// The secondary PIO block.
    #[display("PIO1")]
    Pio1,
}

impl PioIndex {
    /// Search order for automatic claims.
    pub const ALL: [Self; 2] = [Self::Pio0, Self::Pio1];

    const fn position(self) -> usize {
        match self {
            Self::Pio0 => 0,
            Self::Pio1 => 1,
        }
    }
}

/// A PIO block plus one of its state machines.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
#[display("{pio} SM{sm}")]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct StateMachineSlot {
    /// The PIO block.
    pub pio: PioIndex,
    /// The state machine index within the block (`0..STATE_MACHINES_PER_PIO`).
    pub sm: u8,
}

impl StateMachineSlot {
    /// Names a specific state machine.
    #[must_use]
    pub const fn new(pio: PioIndex, sm: u8) -> Self {
        Self { pio, sm }
    }

    const fn mask(self) -> Option<u8> {
        if self.sm < STATE_MACHINES_PER_PIO {
            Some(1 << self.sm)
        } else {
            None
        }
    }
}

/// Tracks which state machines have been handed out.
///
/// Claims are permanent for the life of the tracker, the same way a bound strip keeps its
/// state machine for its whole life.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StateMachineClaims {
    claimed: [u8; 2],
}

impl StateMachineClaims {
    /// Starts with every state machine free.
    #[must_use]
    pub const fn new() -> Self {
        Self { claimed: [0; 2] }
    }

    /// Claims `slot` if given, otherwise any free state machine (PIO0 first, then PIO1).
    ///
    /// # Errors
    ///
    /// See [`Self::claim_slot`] and [`Self::claim_any`].
    pub fn claim(&mut self, slot: Option<StateMachineSlot>) -> Result<StateMachineSlot> {
        match slot {
            Some(slot) => self.claim_slot(slot),
            None => self.claim_any(),
        }
    }

    /// Claims exactly `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateMachine`] if the index is out of range and
    /// [`Error::StateMachineInUse`] if it was already claimed.
    pub fn claim_slot(&mut self, slot: StateMachineSlot) -> Result<StateMachineSlot> {
        let StateMachineSlot { pio, sm } = slot;
        let mask = slot.mask().ok_or(Error::InvalidStateMachine { pio, sm })?;
        let claimed = &mut self.claimed[pio.position()];
        if *claimed & mask != 0 {
            return Err(Error::StateMachineInUse { pio, sm });
        }
        *claimed |= mask;
        Ok(slot)
    }

    /// Claims the lowest free state machine on PIO0, falling back to PIO1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFreeStateMachine`] when all eight are taken.
    pub fn claim_any(&mut self) -> Result<StateMachineSlot> {
        PioIndex::ALL
            .into_iter()
            .find_map(|pio| self.claim_unused(pio))
            .ok_or(Error::NoFreeStateMachine)
    }

    /// Claims the lowest free state machine on one PIO block, if there is one.
    pub fn claim_unused(&mut self, pio: PioIndex) -> Option<StateMachineSlot> {
        (0..STATE_MACHINES_PER_PIO)
            .map(|sm| StateMachineSlot::new(pio, sm))
            .find(|slot| !self.is_claimed(*slot))
            .and_then(|slot| self.claim_slot(slot).ok())
    }

    /// Whether `slot` has been claimed. Out-of-range slots are never claimed.
    #[must_use]
    pub const fn is_claimed(&self, slot: StateMachineSlot) -> bool {
        match slot.mask() {
            Some(mask) => self.claimed[slot.pio.position()] & mask != 0,
            None => false,
        }
    }

    /// Number of free state machines on one PIO block.
    #[must_use]
    pub const fn free_count(&self, pio: PioIndex) -> u32 {
        STATE_MACHINES_PER_PIO as u32 - self.claimed[pio.position()].count_ones()
    }
}
