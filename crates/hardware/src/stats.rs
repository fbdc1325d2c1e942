//! Run statistics and end-of-run reporting.
//!
//! `RunSummary` is produced when a run terminates. It records:
//! 1. **Time:** Simulation steps executed and rising clock edges seen.
//! 2. **Audio:** Samples captured and where they were written.
//! 3. **Trace:** Whether a waveform dump was written, and where.
//! 4. **Host:** Wall-clock time spent in the run loop.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Simulation steps (clock toggles) executed.
    pub steps: u64,
    /// Rising clock edges seen.
    pub rising_edges: u64,
    /// Stereo samples written to the audio output.
    pub samples: u64,
    /// Audio output path, when the run wrote to a file.
    pub audio_path: Option<PathBuf>,
    /// Waveform output path, when tracing was enabled.
    pub trace_path: Option<PathBuf>,
    /// Host time spent stepping.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Simulated steps per host second, in kHz.
    pub fn step_rate_khz(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        (self.steps as f64 / seconds) / 1000.0
    }

    /// Label for the audio destination.
    pub fn audio_label(&self) -> String {
        self.audio_path
            .as_deref()
            .map_or_else(|| "<stream>".to_string(), |p| p.display().to_string())
    }

    /// Prints the summary to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("NANOSPC SIMULATION SUMMARY");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", self.elapsed.as_secs_f64());
        println!("sim_steps                {}", self.steps);
        println!("sim_rising_edges         {}", self.rising_edges);
        println!("sim_freq                 {:.2} kHz", self.step_rate_khz());
        println!("audio_samples            {}", self.samples);
        if let Some(path) = self.trace_path.as_deref().map(Path::display) {
            println!("trace_file               {path}");
        }
        println!("==========================================================");
    }
}
