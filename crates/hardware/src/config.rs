//! Configuration for the simulation driver.
//!
//! This module defines the run parameters of the harness. It provides:
//! 1. **Run configuration:** `RunConfig`, the immutable result of command-line parsing.
//! 2. **Harness configuration:** `Config`, hierarchical settings for output paths, tracing,
//!    run limits, and the reference model.
//!
//! The `sim` binary uses `Config::default()`; library users may deserialize a `Config` from JSON.

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants;

mod defaults {
    use crate::common::constants;

    pub fn audio_path() -> String {
        constants::DEFAULT_AUDIO_PATH.to_string()
    }

    pub fn trace_path() -> String {
        constants::DEFAULT_TRACE_PATH.to_string()
    }

    pub const fn trace_depth() -> u32 {
        constants::DEFAULT_TRACE_DEPTH
    }

    pub const fn step_limit() -> u64 {
        constants::DEFAULT_STEP_LIMIT
    }

    pub const fn progress_interval() -> u64 {
        constants::PROGRESS_INTERVAL
    }

    pub const fn sample_divider() -> u64 {
        constants::REFERENCE_SAMPLE_DIVIDER
    }
}

/// Parameters of a single run, fixed once the command line has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    trace_enabled: bool,
    step_limit: u64,
}

impl RunConfig {
    /// Creates a run configuration. A `step_limit` of zero means unbounded.
    pub const fn new(trace_enabled: bool, step_limit: u64) -> Self {
        Self {
            trace_enabled,
            step_limit,
        }
    }

    /// Whether a waveform dump is written.
    pub const fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// Maximum number of simulation steps, or zero for unbounded.
    pub const fn step_limit(&self) -> u64 {
        self.step_limit
    }

    /// Whether the run stops only when forced to.
    pub const fn is_unbounded(&self) -> bool {
        self.step_limit == constants::UNBOUNDED
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(false, defaults::step_limit())
    }
}

/// Root configuration of the harness.
///
/// Every field has a default, so a partial document is enough:
///
/// ```
/// use nanospc_sim_core::config::Config;
///
/// let json = r#"{ "trace": { "depth": 2 }, "run": { "progress_interval": 10 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.trace.depth, 2);
/// assert_eq!(config.run.progress_interval, 10);
/// assert_eq!(config.output.audio_path, "snes.aud");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Output file locations.
    #[serde(default)]
    pub output: OutputConfig,
    /// Waveform dump settings.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Run limits and progress reporting.
    #[serde(default)]
    pub run: RunSettings,
    /// Behaviour of the built-in reference model.
    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the run configuration used when `-c` is absent.
    pub const fn default_run(&self, trace_enabled: bool) -> RunConfig {
        RunConfig::new(trace_enabled, self.run.default_step_limit)
    }
}

/// Output file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Raw PCM output file.
    #[serde(default = "defaults::audio_path")]
    pub audio_path: String,
    /// VCD output file, written only when tracing is enabled.
    #[serde(default = "defaults::trace_path")]
    pub trace_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            audio_path: defaults::audio_path(),
            trace_path: defaults::trace_path(),
        }
    }
}

/// Waveform dump settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TraceConfig {
    /// Deepest scope level recorded; 0 records the whole hierarchy.
    #[serde(default = "defaults::trace_depth")]
    pub depth: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            depth: defaults::trace_depth(),
        }
    }
}

/// Run limits and progress reporting.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RunSettings {
    /// Step limit applied when the command line gives none.
    #[serde(default = "defaults::step_limit")]
    pub default_step_limit: u64,
    /// Captured samples between progress notices; 0 disables them.
    #[serde(default = "defaults::progress_interval")]
    pub progress_interval: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            default_step_limit: defaults::step_limit(),
            progress_interval: defaults::progress_interval(),
        }
    }
}

/// Reference model settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReferenceConfig {
    /// Rising clock edges between two sample-ready pulses.
    #[serde(default = "defaults::sample_divider")]
    pub sample_divider: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            sample_divider: defaults::sample_divider(),
        }
    }
}
