//! PIO state machines as [`SignalChannel`]s for SK6812 strips.
//!
//! [`Sk6812Pios`] takes ownership of PIO0 and PIO1, hands out state machines with
//! [`bind`](Sk6812Pios::bind), and loads the SK6812 program into a block the first time one of
//! its state machines is bound. Each bound state machine becomes a [`PioChannel`], ready to be
//! moved into a [`PixelStrip`](crate::pixel_strip::PixelStrip).
//!
//! # Example
//!
//! ```no_run
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! # use core::convert::Infallible;
//! # use core::default::Default;
//! use pico_sk6812::Result;
//! use pico_sk6812::pio_channel::Sk6812Pios;
//! use pico_sk6812::pixel_strip::PixelStrip;
//!
//! # #[embassy_executor::main]
//! # async fn main(_spawner: embassy_executor::Spawner) -> ! {
//! #     let err = example().unwrap_err();
//! #     core::panic!("{err}");
//! # }
//! fn example() -> Result<Infallible> {
//!     let p = embassy_rp::init(Default::default());
//!     let mut sk6812_pios = Sk6812Pios::new(p.PIO0, p.PIO1);
//!
//!     // Any free state machine, PIO0 first.
//!     let channel = sk6812_pios.bind(p.PIN_2, None)?;
//!     let mut strip: PixelStrip<_, 60> = PixelStrip::new(10, channel);
//!
//!     strip.fill(0, 0, 0, 64);
//!     strip.show();
//!     loop {}
//! }
//! ```

use defmt::{debug, info, warn};
use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pin, Pio, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use fixed::types::U24F8;

use crate::pio_irqs::{Pio0Irqs, Pio1Irqs};
use crate::signal_channel::{PioIndex, SignalChannel, StateMachineClaims, StateMachineSlot};
use crate::{Error, Result};

/// Bit rate of the SK6812 data line.
pub const BIT_RATE_HZ: u32 = 800_000;

// Cycles the line is low before the start of a bit, high at the start, and carrying the data.
const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;

/// PIO clock cycles spent on each bit.
pub const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

/// Bits the state machine shifts out per pulled word: one LED, four channels.
const BITS_PER_WORD: u8 = 32;

// ============================================================================
// Program
// ============================================================================

/// The SK6812 bit-timing program, loaded into one PIO block's instruction memory.
pub struct Sk6812Program<'d, PIO: Instance> {
    program: LoadedProgram<'d, PIO>,
}

impl<'d, PIO: Instance> Sk6812Program<'d, PIO> {
    /// Assembles the program and loads it into `common`.
    pub fn new(common: &mut Common<'d, PIO>) -> Self {
        // Standard WS2812/SK6812 PIO program (T1 = 2, T2 = 5, T3 = 3 cycles per bit).
        let side_set = pio::SideSet::new(false, 1, false);
        let mut assembler: pio::Assembler<32> = pio::Assembler::new_with_side_set(side_set);

        let mut wrap_target = assembler.label();
        let mut wrap_source = assembler.label();
        let mut do_zero = assembler.label();
        assembler.set_with_side_set(pio::SetDestination::PINDIRS, 1, 0);
        assembler.bind(&mut wrap_target);
        // Stop bit: low, and pull the next data bit into X.
        assembler.out_with_delay_and_side_set(pio::OutDestination::X, 1, T3 - 1, 0);
        // Start bit: high.
        assembler.jmp_with_delay_and_side_set(
            pio::JmpCondition::XIsZero,
            &mut do_zero,
            T1 - 1,
            1,
        );
        // Data bit 1: stay high.
        assembler.jmp_with_delay_and_side_set(
            pio::JmpCondition::Always,
            &mut wrap_target,
            T2 - 1,
            1,
        );
        assembler.bind(&mut do_zero);
        // Data bit 0: go low.
        assembler.nop_with_delay_and_side_set(T2 - 1, 0);
        assembler.bind(&mut wrap_source);

        let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
        Self {
            program: common.load_program(&program),
        }
    }
}

// ============================================================================
// Channel
// ============================================================================

/// One configured state machine driving one strip's data pin.
pub struct Sk6812StateMachine<'d, PIO: Instance, const SM: usize> {
    state_machine: StateMachine<'d, PIO, SM>,
    _pin: Pin<'d, PIO>,
}

impl<'d, PIO: Instance, const SM: usize> Sk6812StateMachine<'d, PIO, SM> {
    /// Configures `state_machine` to run `program` on `pin` at [`BIT_RATE_HZ`] and starts it.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut state_machine: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
        program: &Sk6812Program<'d, PIO>,
    ) -> Self {
        let mut config = Config::default();

        let out_pin = common.make_pio_pin(pin);
        config.set_out_pins(&[&out_pin]);
        config.set_set_pins(&[&out_pin]);
        config.use_program(&program.program, &[&out_pin]);

        let clock_freq = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_freq = U24F8::from_num(BIT_RATE_HZ / 1000) * CYCLES_PER_BIT;
        config.clock_divider = clock_freq / bit_freq;

        config.fifo_join = FifoJoin::TxOnly;
        config.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_WORD,
            direction: ShiftDirection::Left,
        };

        state_machine.set_config(&config);
        state_machine.set_enable(true);

        Self {
            state_machine,
            _pin: out_pin,
        }
    }
}

impl<PIO: Instance, const SM: usize> SignalChannel for Sk6812StateMachine<'_, PIO, SM> {
    fn submit_blocking(&mut self, word: u32) {
        let tx = self.state_machine.tx();
        while !tx.try_push(word) {}
    }
}

/// A bound state machine on either PIO block.
///
/// Returned by [`Sk6812Pios::bind`]; which variant you get depends on which state machine was
/// free.
pub enum PioChannel<'d> {
    /// PIO0, state machine 0.
    Pio0Sm0(Sk6812StateMachine<'d, PIO0, 0>),
    /// PIO0, state machine 1.
    Pio0Sm1(Sk6812StateMachine<'d, PIO0, 1>),
    /// PIO0, state machine 2.
    Pio0Sm2(Sk6812StateMachine<'d, PIO0, 2>),
    /// PIO0, state machine 3.
    Pio0Sm3(Sk6812StateMachine<'d, PIO0, 3>),
    /// PIO1, state machine 0.
    Pio1Sm0(Sk6812StateMachine<'d, PIO1, 0>),
    /// PIO1, state machine 1.
    Pio1Sm1(Sk6812StateMachine<'d, PIO1, 1>),
    /// PIO1, state machine 2.
    Pio1Sm2(Sk6812StateMachine<'d, PIO1, 2>),
    /// PIO1, state machine 3.
    Pio1Sm3(Sk6812StateMachine<'d, PIO1, 3>),
}

impl PioChannel<'_> {
    /// The PIO block and state machine this channel runs on.
    #[must_use]
    pub const fn slot(&self) -> StateMachineSlot {
        match self {
            Self::Pio0Sm0(_) => StateMachineSlot::new(PioIndex::Pio0, 0),
            Self::Pio0Sm1(_) => StateMachineSlot::new(PioIndex::Pio0, 1),
            Self::Pio0Sm2(_) => StateMachineSlot::new(PioIndex::Pio0, 2),
            Self::Pio0Sm3(_) => StateMachineSlot::new(PioIndex::Pio0, 3),
            Self::Pio1Sm0(_) => StateMachineSlot::new(PioIndex::Pio1, 0),
            Self::Pio1Sm1(_) => StateMachineSlot::new(PioIndex::Pio1, 1),
            Self::Pio1Sm2(_) => StateMachineSlot::new(PioIndex::Pio1, 2),
            Self::Pio1Sm3(_) => StateMachineSlot::new(PioIndex::Pio1, 3),
        }
    }
}

impl SignalChannel for PioChannel<'_> {
    fn submit_blocking(&mut self, word: u32) {
        match self {
            Self::Pio0Sm0(channel) => channel.submit_blocking(word),
            Self::Pio0Sm1(channel) => channel.submit_blocking(word),
            Self::Pio0Sm2(channel) => channel.submit_blocking(word),
            Self::Pio0Sm3(channel) => channel.submit_blocking(word),
            Self::Pio1Sm0(channel) => channel.submit_blocking(word),
            Self::Pio1Sm1(channel) => channel.submit_blocking(word),
            Self::Pio1Sm2(channel) => channel.submit_blocking(word),
            Self::Pio1Sm3(channel) => channel.submit_blocking(word),
        }
    }
}

// ============================================================================
// PIO blocks
// ============================================================================

/// One PIO block's shared resources and its not-yet-bound state machines.
struct PioBlock<'d, PIO: Instance> {
    common: Common<'d, PIO>,
    program: Option<Sk6812Program<'d, PIO>>,
    sm0: Option<StateMachine<'d, PIO, 0>>,
    sm1: Option<StateMachine<'d, PIO, 1>>,
    sm2: Option<StateMachine<'d, PIO, 2>>,
    sm3: Option<StateMachine<'d, PIO, 3>>,
}

impl<'d, PIO: Instance> PioBlock<'d, PIO> {
    fn new(pio: Pio<'d, PIO>) -> Self {
        let Pio {
            common,
            sm0,
            sm1,
            sm2,
            sm3,
            ..
        } = pio;
        Self {
            common,
            program: None,
            sm0: Some(sm0),
            sm1: Some(sm1),
            sm2: Some(sm2),
            sm3: Some(sm3),
        }
    }

    /// Loads the program if this block has none yet, then configures `state_machine` on `pin`.
    fn initialize<const SM: usize>(
        &mut self,
        state_machine: Option<StateMachine<'d, PIO, SM>>,
        pin: Peri<'d, impl PioPin>,
        slot: StateMachineSlot,
    ) -> Result<Sk6812StateMachine<'d, PIO, SM>> {
        let state_machine = state_machine.ok_or(Error::StateMachineInUse {
            pio: slot.pio,
            sm: slot.sm,
        })?;
        let Self {
            common, program, ..
        } = self;
        let program = program.get_or_insert_with(|| {
            debug!("Sk6812Pios: loading SK6812 program into {}", slot.pio);
            Sk6812Program::new(common)
        });
        Ok(Sk6812StateMachine::new(common, state_machine, pin, program))
    }
}

/// PIO0 and PIO1, set up to run SK6812 strips.
///
/// See the [module documentation](mod@crate::pio_channel) for an example.
pub struct Sk6812Pios<'d> {
    pio0: PioBlock<'d, PIO0>,
    pio1: PioBlock<'d, PIO1>,
    claims: StateMachineClaims,
}

impl<'d> Sk6812Pios<'d> {
    /// Takes both PIO blocks. No program is loaded until the first [`bind`](Self::bind).
    #[must_use]
    pub fn new(pio0: Peri<'d, PIO0>, pio1: Peri<'d, PIO1>) -> Self {
        Self {
            pio0: PioBlock::new(Pio::new(pio0, Pio0Irqs)),
            pio1: PioBlock::new(Pio::new(pio1, Pio1Irqs)),
            claims: StateMachineClaims::new(),
        }
    }

    /// Binds a state machine to drive `pin` and starts it at [`BIT_RATE_HZ`].
    ///
    /// With `Some(slot)`, exactly that state machine is used. With `None`, the first free
    /// state machine on PIO0 is used, falling back to PIO1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFreeStateMachine`] when `slot` is `None` and all eight state machines
    /// are bound, [`Error::StateMachineInUse`] when `slot` is already bound, and
    /// [`Error::InvalidStateMachine`] when `slot` names a state machine that does not exist.
    pub fn bind(
        &mut self,
        pin: Peri<'d, impl PioPin>,
        slot: Option<StateMachineSlot>,
    ) -> Result<PioChannel<'d>> {
        let claimed = self.claims.claim(slot)?;
        if slot.is_none() && claimed.pio == PioIndex::Pio1 {
            warn!("Sk6812Pios: PIO0 is full, falling back to {}", claimed);
        }

        let channel = match (claimed.pio, claimed.sm) {
            (PioIndex::Pio0, 0) => {
                let sm = self.pio0.sm0.take();
                PioChannel::Pio0Sm0(self.pio0.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio0, 1) => {
                let sm = self.pio0.sm1.take();
                PioChannel::Pio0Sm1(self.pio0.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio0, 2) => {
                let sm = self.pio0.sm2.take();
                PioChannel::Pio0Sm2(self.pio0.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio0, 3) => {
                let sm = self.pio0.sm3.take();
                PioChannel::Pio0Sm3(self.pio0.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio1, 0) => {
                let sm = self.pio1.sm0.take();
                PioChannel::Pio1Sm0(self.pio1.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio1, 1) => {
                let sm = self.pio1.sm1.take();
                PioChannel::Pio1Sm1(self.pio1.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio1, 2) => {
                let sm = self.pio1.sm2.take();
                PioChannel::Pio1Sm2(self.pio1.initialize(sm, pin, claimed)?)
            }
            (PioIndex::Pio1, 3) => {
                let sm = self.pio1.sm3.take();
                PioChannel::Pio1Sm3(self.pio1.initialize(sm, pin, claimed)?)
            }
            (pio, sm) => return Err(Error::InvalidStateMachine { pio, sm }),
        };

        info!("Sk6812Pios: bound {} at {} Hz", claimed, BIT_RATE_HZ);
        Ok(channel)
    }

    /// Whether `slot` is already bound to a strip.
    #[must_use]
    pub const fn is_bound(&self, slot: StateMachineSlot) -> bool {
        self.claims.is_claimed(slot)
    }
}
