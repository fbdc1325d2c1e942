//! Device-under-test collaborator interface.
//!
//! The driver never looks inside the hardware model. It sees:
//! 1. **Clock pin:** The single input it is allowed to write.
//! 2. **Settle:** `eval`, which advances the model until it is stable after a pin change.
//! 3. **Named signals:** Read-only registers addressed by [`Signal`], independent of how the
//!    model nests its submodules.
//! 4. **Trace points:** The hierarchical names a waveform dump records.

/// Behavioural stand-in for the generated hardware model.
pub mod reference;

pub use reference::ReferenceDut;

/// Named read-only signals exposed by the sound co-processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// `snd_rdy`: a new stereo sample is valid.
    SampleReady,
    /// `audio_l`: left channel output register.
    AudioLeft,
    /// `audio_r`: right channel output register.
    AudioRight,
    /// `dsp.TENVX`: envelope value of the voice being processed.
    Envelope,
}

impl Signal {
    /// Every signal, in trace declaration order.
    pub const ALL: [Self; 4] = [
        Self::SampleReady,
        Self::AudioLeft,
        Self::AudioRight,
        Self::Envelope,
    ];

    /// Signal name inside its scope.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SampleReady => "snd_rdy",
            Self::AudioLeft => "audio_l",
            Self::AudioRight => "audio_r",
            Self::Envelope => "TENVX",
        }
    }

    /// Enclosing scopes, outermost first.
    pub const fn scope(self) -> &'static [&'static str] {
        match self {
            Self::SampleReady | Self::AudioLeft | Self::AudioRight => &["TOP", "nanospc_top"],
            Self::Envelope => &["TOP", "nanospc_top", "dsp"],
        }
    }

    /// Width of the register in bits.
    pub const fn width(self) -> u32 {
        match self {
            Self::SampleReady => 1,
            Self::AudioLeft | Self::AudioRight => 16,
            Self::Envelope => 8,
        }
    }
}

/// Where a trace point takes its value from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The clock input pin.
    Clock,
    /// A named model signal.
    Signal(Signal),
}

/// One variable of a waveform dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TracePoint {
    /// Enclosing scopes, outermost first.
    pub scope: &'static [&'static str],
    /// Variable name inside its scope.
    pub name: &'static str,
    /// Width in bits.
    pub width: u32,
    /// Value source.
    pub probe: Probe,
}

impl TracePoint {
    /// Number of scopes enclosing this point.
    pub const fn depth(&self) -> usize {
        self.scope.len()
    }
}

/// The clock input as seen in a waveform dump.
pub const CLOCK_POINT: TracePoint = TracePoint {
    scope: &["TOP"],
    name: "sys_clk",
    width: 1,
    probe: Probe::Clock,
};

/// Narrow accessor capability over a hardware model.
///
/// Implementors hold the model state; the driver owns the implementor for the whole run and
/// calls it from a single thread.
pub trait Dut {
    /// Current level of the clock input pin.
    fn clock(&self) -> bool;

    /// Drives the clock input pin. The model does not react until [`Dut::eval`].
    fn set_clock(&mut self, level: bool);

    /// Settles combinational and sequential logic after an input change.
    fn eval(&mut self);

    /// Raw bits of a named signal, right-aligned.
    fn read(&self, signal: Signal) -> u64;

    /// Switches on trace instrumentation. Called once, before the first step, when a waveform
    /// dump is requested.
    fn enable_trace(&mut self) {}

    /// Variables a waveform dump may record, before depth filtering.
    fn trace_points(&self) -> Vec<TracePoint> {
        let mut points = Vec::with_capacity(Signal::ALL.len() + 1);
        points.push(CLOCK_POINT);
        points.extend(Signal::ALL.iter().map(|&signal| TracePoint {
            scope: signal.scope(),
            name: signal.name(),
            width: signal.width(),
            probe: Probe::Signal(signal),
        }));
        points
    }

    /// Value of a trace point.
    fn probe(&self, probe: Probe) -> u64 {
        match probe {
            Probe::Clock => u64::from(self.clock()),
            Probe::Signal(signal) => self.read(signal),
        }
    }
}

impl<D: Dut + ?Sized> Dut for Box<D> {
    fn clock(&self) -> bool {
        (**self).clock()
    }

    fn set_clock(&mut self, level: bool) {
        (**self).set_clock(level);
    }

    fn eval(&mut self) {
        (**self).eval();
    }

    fn read(&self, signal: Signal) -> u64 {
        (**self).read(signal)
    }

    fn enable_trace(&mut self) {
        (**self).enable_trace();
    }

    fn trace_points(&self) -> Vec<TracePoint> {
        (**self).trace_points()
    }

    fn probe(&self, probe: Probe) -> u64 {
        (**self).probe(probe)
    }
}
