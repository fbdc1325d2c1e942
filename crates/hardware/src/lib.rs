//! Simulation driver for the nanospc sound co-processor.
//!
//! This crate exercises a device-under-test through a narrow interface and records what it
//! produces:
//! 1. **DUT:** The [`Dut`] accessor trait and a behavioural [`ReferenceDut`].
//! 2. **Simulation:** Clock generation, edge-triggered audio capture, VCD tracing, and the
//!    [`Simulator`] run controller.
//! 3. **Configuration:** Run parameters and serde-loadable harness settings.
//! 4. **Statistics:** The end-of-run [`RunSummary`](stats::RunSummary).
//! 5. **Tools:** Packing SPC snapshots into an SD-card image.

/// Common constants and error types.
pub mod common;
/// Run and harness configuration.
pub mod config;
/// Device-under-test interface and reference model.
pub mod dut;
/// SPC SD-card image packing.
pub mod image;
/// Clock, capture, trace, and run controller.
pub mod sim;
/// End-of-run statistics.
pub mod stats;

/// Error type returned by every fallible operation in this crate.
pub use crate::common::SimError;
/// Harness settings; use `Config::default()` or deserialize from JSON.
pub use crate::config::{Config, RunConfig};
/// Hardware model interface and the built-in reference model.
pub use crate::dut::{Dut, ReferenceDut, Signal};
/// Run controller.
pub use crate::sim::Simulator;
