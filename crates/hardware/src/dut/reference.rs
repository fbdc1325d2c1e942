//! Behavioural reference model.
//!
//! Stands in for the generated co-processor model so the driver can run end to end. It keeps
//! the externally visible timing of the real core: registers update on the rising edge of
//! `sys_clk`, `snd_rdy` is high for exactly one clock cycle per sample, and the audio registers
//! hold their value until the next sample.

use super::{Dut, Signal};

/// Phase increment per sample: 440 Hz at a 32 kHz output rate.
const PHASE_STEP: u16 = 901;

/// Envelope value after a key-on.
const ENVELOPE_ATTACK: u8 = 0x7F;

/// Samples between two envelope decrements.
const ENVELOPE_DECAY_PERIOD: u64 = 64;

/// Deterministic model producing an enveloped triangle tone.
#[derive(Clone, Debug)]
pub struct ReferenceDut {
    sys_clk: bool,
    settled_clk: bool,
    edges: u64,
    divider: u64,
    samples: u64,
    snd_rdy: bool,
    audio_l: i16,
    audio_r: i16,
    phase: u16,
    envelope: u8,
    tracing: bool,
}

impl ReferenceDut {
    /// Creates a model that raises `snd_rdy` on every `divider`-th rising edge.
    pub fn new(divider: u64) -> Self {
        Self {
            sys_clk: false,
            settled_clk: false,
            edges: 0,
            divider: divider.max(1),
            samples: 0,
            snd_rdy: false,
            audio_l: 0,
            audio_r: 0,
            phase: 0,
            envelope: ENVELOPE_ATTACK,
            tracing: false,
        }
    }

    /// Rising edges seen so far.
    pub const fn edges(&self) -> u64 {
        self.edges
    }

    /// Whether trace instrumentation was switched on.
    pub const fn tracing(&self) -> bool {
        self.tracing
    }

    fn posedge(&mut self) {
        self.edges += 1;
        self.snd_rdy = self.edges % self.divider == 0;
        if !self.snd_rdy {
            return;
        }

        self.samples += 1;
        self.phase = self.phase.wrapping_add(PHASE_STEP);
        if self.samples % ENVELOPE_DECAY_PERIOD == 0 {
            self.envelope = match self.envelope {
                0 => ENVELOPE_ATTACK,
                level => level - 1,
            };
        }

        let scaled = triangle(self.phase) * i32::from(self.envelope) / i32::from(ENVELOPE_ATTACK);
        self.audio_l = scaled as i16;
        self.audio_r = self.audio_l.saturating_neg();
    }
}

impl Default for ReferenceDut {
    fn default() -> Self {
        Self::new(crate::common::constants::REFERENCE_SAMPLE_DIVIDER)
    }
}

/// Full-scale triangle wave over one 16-bit phase period.
fn triangle(phase: u16) -> i32 {
    let p = i32::from(phase);
    if p < 0x8000 {
        p * 2 - 0x8000
    } else {
        (0xFFFF - p) * 2 - 0x7FFF
    }
}

impl Dut for ReferenceDut {
    fn clock(&self) -> bool {
        self.sys_clk
    }

    fn set_clock(&mut self, level: bool) {
        self.sys_clk = level;
    }

    fn eval(&mut self) {
        if self.sys_clk && !self.settled_clk {
            self.posedge();
        }
        self.settled_clk = self.sys_clk;
    }

    fn read(&self, signal: Signal) -> u64 {
        match signal {
            Signal::SampleReady => u64::from(self.snd_rdy),
            Signal::AudioLeft => u64::from(self.audio_l as u16),
            Signal::AudioRight => u64::from(self.audio_r as u16),
            Signal::Envelope => u64::from(self.envelope),
        }
    }

    fn enable_trace(&mut self) {
        self.tracing = true;
    }
}
