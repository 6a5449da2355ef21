//! PIO interrupt bindings shared by every strip on a PIO block.

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::InterruptHandler;

bind_interrupts!(
    /// Interrupt binding for PIO0.
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => InterruptHandler<PIO0>;
    }
);

bind_interrupts!(
    /// Interrupt binding for PIO1.
    pub struct Pio1Irqs {
        PIO1_IRQ_0 => InterruptHandler<PIO1>;
    }
);
