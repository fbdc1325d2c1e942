//! Common types and constants used throughout the simulation driver.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Default output paths, run limits, and image layout.
//! 2. **Error Handling:** The `SimError` type and the `OutputKind` it reports on.

/// Harness-wide constants.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{OutputKind, SimError};
