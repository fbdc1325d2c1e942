//! Waveform trace recording.
//!
//! A `TraceSession` exists only when tracing was requested. It:
//! 1. **Opens:** Switches on the model's trace instrumentation, creates the VCD file, and declares
//!    every trace point within the configured hierarchy depth under nested module scopes.
//! 2. **Dumps:** Writes one `#<step>` record per simulation step. The first record carries all
//!    values inside `$dumpvars`; later ones carry only the values that changed.
//! 3. **Closes:** Flushes the file exactly once, either through [`TraceSession::close`] or, on
//!    any other exit path, when dropped.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::{debug, warn};
use vcd::{IdCode, SimulationCommand, TimescaleUnit, Value};

use crate::common::{OutputKind, SimError};
use crate::dut::{Dut, TracePoint};

/// A declared VCD variable and the value last written for it.
#[derive(Debug)]
struct Channel {
    point: TracePoint,
    id: IdCode,
    last: Option<u64>,
}

/// An open waveform dump.
pub struct TraceSession {
    writer: vcd::Writer<BufWriter<File>>,
    channels: Vec<Channel>,
    depth: u32,
    records: u64,
    closed: bool,
}

impl std::fmt::Debug for TraceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceSession")
            .field("channels", &self.channels)
            .field("depth", &self.depth)
            .field("records", &self.records)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Keeps the points whose scope nesting is within `depth` (0 keeps everything).
pub fn within_depth(points: Vec<TracePoint>, depth: u32) -> Vec<TracePoint> {
    if depth == 0 {
        return points;
    }
    points
        .into_iter()
        .filter(|p| p.depth() <= depth as usize)
        .collect()
}

impl TraceSession {
    /// Binds the model to a new VCD file at `path`, recording scopes down to `depth`.
    pub fn open<D: Dut + ?Sized>(dut: &mut D, path: &Path, depth: u32) -> Result<Self, SimError> {
        dut.enable_trace();
        let points = within_depth(dut.trace_points(), depth);

        let file = File::create(path).map_err(|e| SimError::open(OutputKind::Trace, path, e))?;
        let mut writer = vcd::Writer::new(BufWriter::new(file));
        let channels = declare(&mut writer, &points)
            .map_err(|e| SimError::write(OutputKind::Trace, e))?;

        debug!(path = %path.display(), depth, vars = channels.len(), "trace session opened");
        Ok(Self {
            writer,
            channels,
            depth,
            records: 0,
            closed: false,
        })
    }

    /// Hierarchy depth the session was opened with.
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Trace points being recorded, in declaration order.
    pub fn points(&self) -> impl Iterator<Item = &TracePoint> {
        self.channels.iter().map(|c| &c.point)
    }

    /// Timestamp records written so far.
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Writes the model's current state as the record for `step`.
    pub fn dump<D: Dut + ?Sized>(&mut self, step: u64, dut: &D) -> Result<(), SimError> {
        self.write_record(step, dut)
            .map_err(|e| SimError::write(OutputKind::Trace, e))?;
        self.records += 1;
        Ok(())
    }

    fn write_record<D: Dut + ?Sized>(&mut self, step: u64, dut: &D) -> io::Result<()> {
        let first = self.records == 0;
        self.writer.timestamp(step)?;
        if first {
            self.writer.begin(SimulationCommand::Dumpvars)?;
        }
        for channel in &mut self.channels {
            let value = dut.probe(channel.point.probe) & mask(channel.point.width);
            if channel.last == Some(value) {
                continue;
            }
            channel.last = Some(value);
            if channel.point.width == 1 {
                self.writer.change_scalar(channel.id, bit(value, 0))?;
            } else {
                let width = channel.point.width;
                self.writer
                    .change_vector(channel.id, (0..width).rev().map(|i| bit(value, i)))?;
            }
        }
        if first {
            self.writer.end()?;
        }
        Ok(())
    }

    /// Flushes and closes the dump.
    pub fn close(mut self) -> Result<(), SimError> {
        self.closed = true;
        self.writer
            .flush()
            .map_err(|e| SimError::write(OutputKind::Trace, e))?;
        debug!(records = self.records, "trace session closed");
        Ok(())
    }
}

impl Drop for TraceSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.writer.flush() {
            warn!(error = %e, "trace session dropped with unflushed data");
        }
    }
}

/// Writes the header and variable declarations, opening scopes as the points require.
fn declare<W: io::Write>(
    writer: &mut vcd::Writer<W>,
    points: &[TracePoint],
) -> io::Result<Vec<Channel>> {
    writer.timescale(1, TimescaleUnit::PS)?;

    let mut open: Vec<&str> = Vec::new();
    let mut channels = Vec::with_capacity(points.len());
    for point in points {
        let shared = open
            .iter()
            .zip(point.scope)
            .take_while(|(a, b)| *a == *b)
            .count();
        for _ in shared..open.len() {
            writer.upscope()?;
        }
        open.truncate(shared);
        for &scope in &point.scope[shared..] {
            writer.add_module(scope)?;
            open.push(scope);
        }
        let id = writer.add_wire(point.width, point.name)?;
        channels.push(Channel {
            point: *point,
            id,
            last: None,
        });
    }
    for _ in 0..open.len() {
        writer.upscope()?;
    }
    writer.enddefinitions()?;
    Ok(channels)
}

const fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

const fn bit(value: u64, index: u32) -> Value {
    if (value >> index) & 1 == 1 {
        Value::V1
    } else {
        Value::V0
    }
}
