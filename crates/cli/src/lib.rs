//! Command-line front ends for the nanospc simulation harness.
//!
//! This crate holds what the `sim` and `spc2img` binaries share:
//! 1. **Options:** The `sim` argument parser and its usage text.
//! 2. **Logging:** Subscriber setup for diagnostics on stderr.

/// Diagnostic logging setup.
pub mod logging;
/// `sim` option parsing.
pub mod options;

pub use options::{ArgumentError, Options, USAGE};
