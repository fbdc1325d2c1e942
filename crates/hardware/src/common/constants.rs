//! Global Harness Constants.
//!
//! This module defines constants shared across the simulation driver. It includes:
//! 1. **Output Constants:** Default file names for audio and waveform output.
//! 2. **Run Constants:** Step limit, progress cadence, and trace hierarchy depth.
//! 3. **Image Constants:** Layout of the SPC SD-card image.

/// Default audio output file, relative to the working directory.
pub const DEFAULT_AUDIO_PATH: &str = "snes.aud";

/// Default waveform output file, relative to the working directory.
pub const DEFAULT_TRACE_PATH: &str = "waveform.vcd";

/// Scope levels below the top module that a waveform dump records.
pub const DEFAULT_TRACE_DEPTH: u32 = 5;

/// Step limit used when `-c` is not given.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// A step limit of zero means the run never stops on its own.
pub const UNBOUNDED: u64 = 0;

/// Captured samples between two progress notices.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Rising clock edges per audio sample in the reference model (24.576 MHz / 32 kHz).
pub const REFERENCE_SAMPLE_DIVIDER: u64 = 768;

/// Size of the SD-card image header in bytes.
pub const SPC_IMAGE_HEADER_SIZE: usize = 512;

/// Magic bytes opening the SD-card image header.
pub const SPC_IMAGE_MAGIC: &[u8; 4] = b"SPC ";

/// Size of one SPC snapshot slot in the image (64 KiB RAM + 512 bytes of state).
pub const SPC_SLOT_SIZE: usize = 66048;
