//! Edge-triggered audio sample capture.
//!
//! On a rising clock edge with `snd_rdy` asserted, the capture reads both audio registers and
//! appends them to the output stream as raw signed 16-bit little-endian values, right channel
//! first. The stream has no header; samples appear in capture order. Every `progress_interval`
//! samples the capture marks a progress milestone for the caller to report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::common::{OutputKind, SimError};
use crate::dut::{Dut, Signal};

/// One stereo sample pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioSample {
    /// Left channel.
    pub left: i16,
    /// Right channel.
    pub right: i16,
}

impl AudioSample {
    /// Reads both audio registers from the model.
    pub fn read<D: Dut + ?Sized>(dut: &D) -> Self {
        Self {
            left: dut.read(Signal::AudioLeft) as u16 as i16,
            right: dut.read(Signal::AudioRight) as u16 as i16,
        }
    }

    /// On-disk encoding: right then left, little-endian.
    pub fn to_bytes(self) -> [u8; 4] {
        let [r0, r1] = self.right.to_le_bytes();
        let [l0, l1] = self.left.to_le_bytes();
        [r0, r1, l0, l1]
    }
}

/// Writes captured samples to an output stream.
#[derive(Debug)]
pub struct AudioCapture<W: Write> {
    out: W,
    samples: u64,
    progress_interval: u64,
    milestone: Option<u64>,
}

impl AudioCapture<BufWriter<File>> {
    /// Creates (or truncates) the audio file.
    pub fn create(path: &Path, progress_interval: u64) -> Result<Self, SimError> {
        let file = File::create(path).map_err(|e| SimError::open(OutputKind::Audio, path, e))?;
        debug!(path = %path.display(), "audio output opened");
        Ok(Self::new(BufWriter::new(file), progress_interval))
    }
}

impl<W: Write> AudioCapture<W> {
    /// Wraps an already open stream. A `progress_interval` of zero disables progress notices.
    pub const fn new(out: W, progress_interval: u64) -> Self {
        Self {
            out,
            samples: 0,
            progress_interval,
            milestone: None,
        }
    }

    /// Samples written so far.
    pub const fn samples(&self) -> u64 {
        self.samples
    }

    /// Sample count reached by the last [`AudioCapture::observe`] call, if it completed a
    /// progress interval.
    pub const fn milestone(&self) -> Option<u64> {
        self.milestone
    }

    /// Captures a sample if this step is a rising edge and the model has one ready.
    pub fn observe<D: Dut + ?Sized>(
        &mut self,
        rising: bool,
        dut: &D,
    ) -> Result<Option<AudioSample>, SimError> {
        self.milestone = None;
        if !rising || dut.read(Signal::SampleReady) & 1 == 0 {
            return Ok(None);
        }

        let sample = AudioSample::read(dut);
        self.out
            .write_all(&sample.to_bytes())
            .map_err(|e| SimError::write(OutputKind::Audio, e))?;
        self.samples += 1;

        if self.progress_interval != 0 && self.samples % self.progress_interval == 0 {
            self.milestone = Some(self.samples);
        }
        Ok(Some(sample))
    }

    /// Flushes buffered samples and hands back the stream.
    pub fn finish(mut self) -> Result<W, SimError> {
        self.out
            .flush()
            .map_err(|e| SimError::write(OutputKind::Audio, e))?;
        debug!(samples = self.samples, "audio output closed");
        Ok(self.out)
    }
}
