//! Command-line option parsing for `sim`.
//!
//! Exactly two flags are recognized: `-t` and `-c T`, each as a whole token. Any other token
//! (grouped flags such as `-tc`, glued values such as `-c4`, `--`), or `-c` without a value, is an
//! [`ArgumentError`]; nothing is applied until the whole argument list has parsed.

use std::convert::Infallible;
use std::ffi::OsString;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use nanospc_sim_core::config::{Config, RunConfig};
use thiserror::Error;

/// Usage text printed after an argument error.
pub const USAGE: &str = "\
Usage: sim [-t] [-c T]
  -t     output trace file waveform.vcd
  -c T   limit simulate length to T time steps. T=0 means infinite.
";

/// A command line that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A token that is not one of the recognized flags.
    #[error("Unrecognized option: {0}")]
    Unrecognized(String),
    /// A flag that requires a value appeared last.
    #[error("Unrecognized option: {0}")]
    MissingValue(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Output trace file waveform.vcd.
    #[arg(short = 't')]
    trace: bool,

    /// Limit simulate length to T time steps. T=0 means infinite.
    #[arg(
        short = 'c',
        value_name = "T",
        value_parser = step_limit_arg,
        allow_hyphen_values = true
    )]
    steps: Option<u64>,
}

/// Parsed `sim` command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// `-t` was given.
    pub trace: bool,
    /// Value of the last `-c`, if any.
    pub step_limit: Option<u64>,
}

impl Options {
    /// Parses a full argument list, program name first.
    pub fn parse_from<I, T>(args: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        screen(args.iter().skip(1))?;
        let cli = Cli::try_parse_from(args).map_err(|e| classify(&e))?;
        Ok(Self {
            trace: cli.trace,
            step_limit: cli.steps,
        })
    }

    /// Resolves the run configuration, falling back to the configured default step limit.
    pub fn run_config(&self, config: &Config) -> RunConfig {
        self.step_limit.map_or_else(
            || config.default_run(self.trace),
            |limit| RunConfig::new(self.trace, limit),
        )
    }

    /// Lines acknowledging the accepted flags, in the order they are printed.
    pub fn announcements(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.trace {
            lines.push("Tracing ON".to_string());
        }
        match self.step_limit {
            Some(0) => lines.push("Simulating forever.".to_string()),
            Some(limit) => lines.push(format!("Simulating {limit} steps")),
            None => {}
        }
        lines
    }
}

/// Parses a step count the way C's `strtoll(text, _, 10)` does.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first non-digit, no
/// digits yields 0, and out-of-range values saturate. Negative results keep their
/// two's-complement bit pattern.
pub fn step_limit_from(text: &str) -> u64 {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i128, |acc, d| {
            acc.saturating_mul(10).saturating_add(i128::from(d - b'0'))
        });
    let signed = if negative { -magnitude } else { magnitude };
    signed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64 as u64
}

fn step_limit_arg(text: &str) -> Result<u64, Infallible> {
    Ok(step_limit_from(text))
}

/// Rejects the first token that is not exactly `-t` or `-c`. The token after `-c` is its value,
/// whatever it looks like.
fn screen<'a, I>(args: I) -> Result<(), ArgumentError>
where
    I: IntoIterator<Item = &'a OsString>,
{
    let mut tokens = args.into_iter();
    while let Some(token) = tokens.next() {
        match token.to_str() {
            Some("-t") => {}
            Some("-c") => {
                if tokens.next().is_none() {
                    return Err(ArgumentError::MissingValue("-c".to_string()));
                }
            }
            _ => {
                return Err(ArgumentError::Unrecognized(
                    token.to_string_lossy().into_owned(),
                ));
            }
        }
    }
    Ok(())
}

/// Maps a clap failure to the token the user has to fix.
fn classify(err: &clap::Error) -> ArgumentError {
    let token = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.split_whitespace().next().unwrap_or_default(),
        _ => "",
    }
    .to_string();

    match err.kind() {
        ErrorKind::InvalidValue | ErrorKind::NoEquals => ArgumentError::MissingValue(token),
        _ => ArgumentError::Unrecognized(token),
    }
}
