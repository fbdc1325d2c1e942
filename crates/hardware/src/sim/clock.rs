//! Simulation time base.
//!
//! The clock is the only component that advances simulated time. Each step it:
//! 1. **Toggles:** Flips the DUT's clock input pin.
//! 2. **Settles:** Calls `eval` so the model reacts to the new level before anyone looks at it.
//! 3. **Advances:** Once the step's observers have run, bumps the step counter and remembers the
//!    level for edge detection.

use crate::common::constants::UNBOUNDED;
use crate::dut::Dut;

/// Step counter, step limit, and the clock level seen at the end of the previous step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationClock {
    step: u64,
    prev_level: bool,
    limit: u64,
}

impl SimulationClock {
    /// Creates a clock at step zero with the pin assumed low. A `limit` of zero is unbounded.
    pub const fn new(limit: u64) -> Self {
        Self {
            step: 0,
            prev_level: false,
            limit,
        }
    }

    /// Steps completed so far; also the timestamp of the step in progress.
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Configured step limit.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Clock level at the end of the previous step.
    pub const fn prev_level(&self) -> bool {
        self.prev_level
    }

    /// Whether another step may run under the limit.
    pub const fn in_bounds(&self) -> bool {
        self.limit == UNBOUNDED || self.step < self.limit
    }

    /// Flips the clock pin and lets the model settle. Returns the new level.
    pub fn toggle<D: Dut + ?Sized>(&self, dut: &mut D) -> bool {
        let level = !dut.clock();
        dut.set_clock(level);
        dut.eval();
        level
    }

    /// Whether `level` is a 0 to 1 transition from the previous step.
    pub const fn is_rising(&self, level: bool) -> bool {
        !self.prev_level && level
    }

    /// Closes the current step.
    pub const fn advance(&mut self, level: bool) {
        self.step += 1;
        self.prev_level = level;
    }
}
