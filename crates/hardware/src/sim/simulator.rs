//! Run controller: owns the model and every output for the duration of a run.
//!
//! The controller moves through three phases, enforced by ownership:
//! 1. **Initializing:** [`Simulator::new`] opens the trace session (if requested) and the audio
//!    stream. A file that cannot be created is reported before the first step.
//! 2. **Running:** [`Simulator::run_until`] repeats [`Simulator::step`] while the step limit
//!    allows it.
//! 3. **Terminating:** [`Simulator::finish`] consumes the controller, closes the outputs, drops the
//!    model, and returns the [`RunSummary`]. Nothing can step afterwards.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::common::SimError;
use crate::config::{Config, RunConfig};
use crate::dut::{Dut, Signal};
use crate::sim::audio::{AudioCapture, AudioSample};
use crate::sim::clock::SimulationClock;
use crate::sim::trace::TraceSession;
use crate::stats::RunSummary;

/// Watches the DSP envelope register.
///
/// The value is read every step and remembered when it changes to something non-zero. It has
/// no effect on the run or its outputs.
#[derive(Clone, Copy, Debug, Default)]
struct EnvelopeProbe {
    last: u64,
}

impl EnvelopeProbe {
    fn observe<D: Dut + ?Sized>(&mut self, step: u64, dut: &D) {
        let envelope = dut.read(Signal::Envelope);
        if envelope != 0 && envelope != self.last {
            trace!(step, envelope, "envelope changed");
            self.last = envelope;
        }
    }
}

/// What a single step produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Sample captured on this step's rising edge.
    pub sample: Option<AudioSample>,
    /// Sample count, when this step's capture completed a progress interval.
    pub progress: Option<u64>,
}

/// Top-level simulation driver for one DUT.
#[derive(Debug)]
pub struct Simulator<D: Dut, W: Write = BufWriter<File>> {
    dut: D,
    clock: SimulationClock,
    audio: AudioCapture<W>,
    trace: Option<TraceSession>,
    envelope: EnvelopeProbe,
    rising_edges: u64,
    audio_path: Option<PathBuf>,
    trace_path: Option<PathBuf>,
    elapsed: Duration,
}

impl<D: Dut> Simulator<D> {
    /// Takes ownership of the model and opens the outputs named in `config`.
    pub fn new(mut dut: D, run: RunConfig, config: &Config) -> Result<Self, SimError> {
        let trace_path = run
            .trace_enabled()
            .then(|| PathBuf::from(&config.output.trace_path));
        let trace = match trace_path.as_deref() {
            Some(path) => Some(TraceSession::open(&mut dut, path, config.trace.depth)?),
            None => None,
        };

        let audio_path = PathBuf::from(&config.output.audio_path);
        let audio = AudioCapture::create(&audio_path, config.run.progress_interval)?;

        let mut sim = Self::with_outputs(dut, run, audio, trace);
        sim.audio_path = Some(audio_path);
        sim.trace_path = trace_path;
        Ok(sim)
    }
}

impl<D: Dut, W: Write> Simulator<D, W> {
    /// Assembles a controller around already open outputs.
    pub fn with_outputs(
        dut: D,
        run: RunConfig,
        audio: AudioCapture<W>,
        trace: Option<TraceSession>,
    ) -> Self {
        Self {
            dut,
            clock: SimulationClock::new(run.step_limit()),
            audio,
            trace,
            envelope: EnvelopeProbe::default(),
            rising_edges: 0,
            audio_path: None,
            trace_path: None,
            elapsed: Duration::ZERO,
        }
    }

    /// The model under test.
    pub const fn dut(&self) -> &D {
        &self.dut
    }

    /// The simulation time base.
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Samples captured so far.
    pub const fn samples(&self) -> u64 {
        self.audio.samples()
    }

    /// Rising clock edges seen so far.
    pub const fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    /// Whether a waveform dump is being written.
    pub const fn is_tracing(&self) -> bool {
        self.trace.is_some()
    }

    /// Whether the step limit allows another step.
    pub const fn is_running(&self) -> bool {
        self.clock.in_bounds()
    }

    /// Executes one step: toggle, settle, capture, dump, probe, advance.
    ///
    /// Does not consult the step limit; [`Simulator::run_until`] does.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        let level = self.clock.toggle(&mut self.dut);
        let rising = self.clock.is_rising(level);
        if rising {
            self.rising_edges += 1;
        }

        let sample = self.audio.observe(rising, &self.dut)?;
        let progress = self.audio.milestone();
        if let Some(samples) = progress {
            info!(samples, "audio progress");
        }
        if let Some(session) = self.trace.as_mut() {
            session.dump(self.clock.step(), &self.dut)?;
        }
        self.envelope.observe(self.clock.step(), &self.dut);

        self.clock.advance(level);
        Ok(StepOutcome { sample, progress })
    }

    /// Steps until the limit is reached or `stop` returns `true`.
    ///
    /// `stop` is checked before each step, after the limit.
    pub fn run_until<F>(&mut self, stop: F) -> Result<(), SimError>
    where
        F: FnMut(&SimulationClock) -> bool,
    {
        self.run_observed(stop, |_| {})
    }

    /// Like [`Simulator::run_until`], calling `on_progress` with the sample count at every
    /// progress milestone.
    pub fn run_observed<F, P>(&mut self, mut stop: F, mut on_progress: P) -> Result<(), SimError>
    where
        F: FnMut(&SimulationClock) -> bool,
        P: FnMut(u64),
    {
        let start = Instant::now();
        debug!(
            limit = self.clock.limit(),
            from = self.clock.step(),
            "run loop entered"
        );
        let result = loop {
            if !self.clock.in_bounds() || stop(&self.clock) {
                break Ok(());
            }
            match self.step() {
                Ok(outcome) => {
                    if let Some(samples) = outcome.progress {
                        on_progress(samples);
                    }
                }
                Err(e) => break Err(e),
            }
        };
        self.elapsed += start.elapsed();
        result
    }

    /// Runs to the step limit and terminates. An unbounded run never returns on its own.
    pub fn run(self) -> Result<RunSummary, SimError> {
        self.run_with_progress(|_| {})
    }

    /// Runs to the step limit, reporting progress milestones, and terminates.
    pub fn run_with_progress<P>(mut self, on_progress: P) -> Result<RunSummary, SimError>
    where
        P: FnMut(u64),
    {
        self.run_observed(|_| false, on_progress)?;
        self.finish()
    }

    /// Closes the audio stream, then the trace session, then releases the model.
    pub fn finish(self) -> Result<RunSummary, SimError> {
        let Self {
            dut,
            clock,
            audio,
            trace,
            rising_edges,
            audio_path,
            trace_path,
            elapsed,
            ..
        } = self;

        let samples = audio.samples();
        drop(audio.finish()?);
        if let Some(session) = trace {
            session.close()?;
        }
        drop(dut);

        debug!(steps = clock.step(), samples, "run terminated");
        Ok(RunSummary {
            steps: clock.step(),
            rising_edges,
            samples,
            audio_path,
            trace_path,
            elapsed,
        })
    }
}

/// Opens the configured outputs around `dut` and runs it to completion.
pub fn simulate<D: Dut>(dut: D, run: RunConfig, config: &Config) -> Result<RunSummary, SimError> {
    Simulator::new(dut, run, config)?.run()
}

/// [`simulate`], calling `on_progress` with the sample count at every progress milestone.
pub fn simulate_with_progress<D, P>(
    dut: D,
    run: RunConfig,
    config: &Config,
    on_progress: P,
) -> Result<RunSummary, SimError>
where
    D: Dut,
    P: FnMut(u64),
{
    Simulator::new(dut, run, config)?.run_with_progress(on_progress)
}
