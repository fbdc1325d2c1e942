use nanospc_sim_core::dut::{Dut, Signal};

/// Model whose sample-ready timing is scripted per rising edge.
///
/// Edge ordinals are 1-based. A captured sample carries its edge ordinal on the left channel and
/// the negated ordinal on the right, so tests can tell which edge produced it.
#[derive(Debug, Default)]
pub struct ScriptedDut {
    clk: bool,
    settled: bool,
    edges: u64,
    ready: Vec<bool>,
    hold: bool,
    snd_rdy: bool,
    left: i16,
    right: i16,
    envelope: u8,
    pub evals: u64,
    pub clock_writes: u64,
    pub traced: bool,
}

impl ScriptedDut {
    /// Asserts sample-ready on edge `n` when `pattern[n - 1]` is true.
    pub fn with_pattern(pattern: Vec<bool>) -> Self {
        Self {
            ready: pattern,
            ..Self::default()
        }
    }

    /// Asserts sample-ready on the listed edge ordinals.
    pub fn ready_on(edges: &[u64]) -> Self {
        let len = edges.iter().copied().max().unwrap_or(0) as usize;
        let mut pattern = vec![false; len];
        for &e in edges {
            pattern[e as usize - 1] = true;
        }
        Self::with_pattern(pattern)
    }

    /// Holds sample-ready high for the whole run.
    pub fn held_ready() -> Self {
        Self {
            hold: true,
            snd_rdy: true,
            ..Self::default()
        }
    }

    pub fn with_envelope(mut self, envelope: u8) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn edges(&self) -> u64 {
        self.edges
    }
}

impl Dut for ScriptedDut {
    fn clock(&self) -> bool {
        self.clk
    }

    fn set_clock(&mut self, level: bool) {
        self.clk = level;
        self.clock_writes += 1;
    }

    fn eval(&mut self) {
        self.evals += 1;
        if self.clk && !self.settled {
            self.edges += 1;
            let idx = (self.edges - 1) as usize;
            self.snd_rdy = self.hold || self.ready.get(idx).copied().unwrap_or(false);
            self.left = self.edges as i16;
            self.right = self.left.wrapping_neg();
        }
        self.settled = self.clk;
    }

    fn read(&self, signal: Signal) -> u64 {
        match signal {
            Signal::SampleReady => u64::from(self.snd_rdy),
            Signal::AudioLeft => u64::from(self.left as u16),
            Signal::AudioRight => u64::from(self.right as u16),
            Signal::Envelope => u64::from(self.envelope),
        }
    }

    fn enable_trace(&mut self) {
        self.traced = true;
    }
}
