//! Simulation driver.
//!
//! Composes the per-step pipeline around a [`Dut`](crate::dut::Dut):
//! 1. **Clock:** Time base and edge detection.
//! 2. **Audio:** Sample capture on rising edges.
//! 3. **Trace:** Optional VCD waveform dump.
//! 4. **Simulator:** Run controller owning all of the above.

pub mod audio;
pub mod clock;
pub mod simulator;
pub mod trace;

pub use audio::{AudioCapture, AudioSample};
pub use clock::SimulationClock;
pub use simulator::{Simulator, StepOutcome, simulate, simulate_with_progress};
pub use trace::TraceSession;
