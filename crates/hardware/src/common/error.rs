//! Harness error definitions.
//!
//! This module defines the failures the simulation driver can report. It provides:
//! 1. **Output Kinds:** Naming which output stream a failure concerns.
//! 2. **Error Type:** `SimError`, covering resource acquisition, mid-run I/O, configuration
//!    parsing, and SD-card image packing.
//!
//! DUT evaluation never fails from the driver's point of view, so there is no variant for it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Output streams produced by the harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Raw interleaved PCM samples.
    Audio,
    /// Value Change Dump waveform.
    Trace,
    /// Packed SPC SD-card image.
    Image,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Trace => write!(f, "trace"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Errors raised by the simulation driver and its tools.
#[derive(Debug, Error)]
pub enum SimError {
    /// An output file could not be created.
    ///
    /// Raised before the run loop starts; the run never begins with a missing output.
    #[error("could not open {output} output '{path}': {source}")]
    ResourceOpen {
        /// Which output failed.
        output: OutputKind,
        /// Path that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Appending to or flushing an already open output failed.
    #[error("failed writing {output} output: {source}")]
    Write {
        /// Which output failed.
        output: OutputKind,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An SPC snapshot could not be read.
    #[error("could not read SPC file '{path}': {source}")]
    ImageInput {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// No SPC snapshot was given, or more than the header can count.
    #[error("an SD-card image holds between 1 and 65535 SPC files, got {0}")]
    ImageCount(usize),
}

impl SimError {
    /// Wraps an I/O failure on an open output.
    pub fn write(output: OutputKind, source: io::Error) -> Self {
        Self::Write { output, source }
    }

    /// Wraps a failure to create an output file.
    pub fn open(output: OutputKind, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ResourceOpen {
            output,
            path: path.into(),
            source,
        }
    }
}
