//! nanospc simulation driver CLI.
//!
//! This binary runs one simulation of the sound co-processor. It performs:
//! 1. **Option parsing:** `-t` enables a waveform dump, `-c T` bounds the run to T steps.
//! 2. **Run:** Steps the model, capturing audio to `snes.aud` and, when tracing, the waveform to
//!    `waveform.vcd`.
//! 3. **Report:** Prints a progress line every 1000 samples, then the completion line and the
//!    run summary.

use std::process::ExitCode;

use nanospc_sim::{Options, USAGE, logging};
use nanospc_sim_core::config::{Config, RunConfig};
use nanospc_sim_core::sim::simulate_with_progress;
use nanospc_sim_core::{ReferenceDut, SimError};
use tracing::debug;

fn main() -> ExitCode {
    logging::init();

    let options = match Options::parse_from(std::env::args_os()) {
        Ok(options) => options,
        Err(e) => {
            println!("{e}");
            print!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    for line in options.announcements() {
        println!("{line}");
    }

    let config = Config::default();
    let run = options.run_config(&config);
    match cmd_run(&config, run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the reference model under `run` and reports the outcome.
///
/// Every output opened for the run is closed before this returns, on success or failure.
fn cmd_run(config: &Config, run: RunConfig) -> Result<(), SimError> {
    let dut = ReferenceDut::new(config.reference.sample_divider);
    debug!(?run, "starting run");

    let summary = simulate_with_progress(dut, run, config, |samples| {
        println!("{samples} samples");
    })?;
    println!("Audio output to {} done.", summary.audio_label());
    summary.print();
    Ok(())
}
