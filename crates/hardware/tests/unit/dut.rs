//! # DUT Interface Tests
//!
//! Default trait methods and the reference model's externally visible timing.

use nanospc_sim_core::dut::{CLOCK_POINT, Dut, Probe, ReferenceDut, Signal};
use rstest::rstest;

use crate::common::mocks::scripted::ScriptedDut;

#[test]
fn test_default_trace_points_cover_clock_and_signals() {
    let dut = ScriptedDut::default();
    let points = dut.trace_points();

    assert_eq!(points.len(), 5);
    assert_eq!(points[0], CLOCK_POINT);
    let names: Vec<&str> = points.iter().map(|p| p.name).collect();
    assert_eq!(names, ["sys_clk", "snd_rdy", "audio_l", "audio_r", "TENVX"]);
}

#[rstest]
#[case(Signal::SampleReady, 1, 2)]
#[case(Signal::AudioLeft, 16, 2)]
#[case(Signal::AudioRight, 16, 2)]
#[case(Signal::Envelope, 8, 3)]
fn test_signal_geometry(#[case] signal: Signal, #[case] width: u32, #[case] depth: usize) {
    assert_eq!(signal.width(), width);
    assert_eq!(signal.scope().len(), depth);
    assert_eq!(signal.scope()[0], "TOP");
}

#[test]
fn test_probe_reads_clock_pin() {
    let mut dut = ScriptedDut::default();
    assert_eq!(dut.probe(Probe::Clock), 0);
    dut.set_clock(true);
    assert_eq!(dut.probe(Probe::Clock), 1);
}

#[test]
fn test_boxed_model_forwards() {
    let mut dut: Box<dyn Dut> = Box::new(ScriptedDut::held_ready().with_envelope(9));
    dut.set_clock(true);
    dut.eval();
    assert!(dut.clock());
    assert_eq!(dut.read(Signal::SampleReady), 1);
    assert_eq!(dut.probe(Probe::Signal(Signal::Envelope)), 9);
}

#[test]
fn test_reference_model_sample_cadence() {
    let mut dut = ReferenceDut::new(3);
    let mut ready_edges = Vec::new();
    for edge in 1..=9 {
        dut.set_clock(true);
        dut.eval();
        if dut.read(Signal::SampleReady) == 1 {
            ready_edges.push(edge);
        }
        dut.set_clock(false);
        dut.eval();
        assert_eq!(dut.read(Signal::SampleReady), u64::from(edge % 3 == 0));
    }
    assert_eq!(ready_edges, [3, 6, 9]);
}

#[test]
fn test_reference_model_envelope_in_range() {
    let mut dut = ReferenceDut::new(1);
    for _ in 0..10_000 {
        dut.set_clock(!dut.clock());
        dut.eval();
        assert!(dut.read(Signal::Envelope) <= 0x7F);
    }
}

#[test]
fn test_reference_model_enable_trace() {
    let mut dut = ReferenceDut::default();
    assert!(!dut.tracing());
    dut.enable_trace();
    assert!(dut.tracing());
}
