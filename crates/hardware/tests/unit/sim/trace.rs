//! # Trace Session Tests
//!
//! Depth filtering, record layout, and flush-on-drop of waveform dumps.

use nanospc_sim_core::common::{OutputKind, SimError};
use nanospc_sim_core::dut::Dut;
use nanospc_sim_core::sim::TraceSession;
use nanospc_sim_core::sim::trace::within_depth;
use rstest::rstest;
use std::fs;

use crate::common::harness::{TestContext, timestamps};
use crate::common::mocks::scripted::ScriptedDut;

fn toggle(dut: &mut ScriptedDut) {
    let level = !dut.clock();
    dut.set_clock(level);
    dut.eval();
}

#[rstest]
#[case(0, 5)]
#[case(1, 1)]
#[case(2, 4)]
#[case(3, 5)]
#[case(99, 5)]
fn test_depth_filter(#[case] depth: u32, #[case] kept: usize) {
    let dut = ScriptedDut::default();
    assert_eq!(within_depth(dut.trace_points(), depth).len(), kept);
}

#[test]
fn test_open_enables_instrumentation_and_declares() {
    let ctx = TestContext::new();
    let mut dut = ScriptedDut::default();

    let session = TraceSession::open(&mut dut, &ctx.trace_path(), 5).unwrap();
    assert!(dut.traced);
    assert_eq!(session.depth(), 5);
    assert_eq!(session.points().count(), 5);
    session.close().unwrap();

    let vcd = ctx.trace_text();
    assert!(vcd.contains("$timescale"));
    assert!(vcd.contains("nanospc_top"));
    assert!(vcd.contains("dsp"));
    assert!(vcd.contains("TENVX"));
    assert!(vcd.contains("$enddefinitions"));
    assert!(timestamps(&vcd).is_empty());
}

#[test]
fn test_scopes_are_balanced() {
    let ctx = TestContext::new();
    let mut dut = ScriptedDut::default();
    TraceSession::open(&mut dut, &ctx.trace_path(), 0)
        .unwrap()
        .close()
        .unwrap();

    let vcd = ctx.trace_text();
    let opened = vcd.matches("$scope").count();
    assert_eq!(opened, 3);
    assert_eq!(vcd.matches("$upscope").count(), opened);
    let defs = vcd.find("$enddefinitions").unwrap();
    assert!(vcd.rfind("$upscope").unwrap() < defs);
}

#[test]
fn test_shallow_depth_omits_nested_scope() {
    let ctx = TestContext::new().with_trace_depth(2);
    let mut dut = ScriptedDut::default();

    let session = TraceSession::open(&mut dut, &ctx.trace_path(), ctx.config.trace.depth).unwrap();
    assert!(session.points().all(|p| p.name != "TENVX"));
    session.close().unwrap();

    let vcd = ctx.trace_text();
    assert!(vcd.contains("snd_rdy"));
    assert!(!vcd.contains("TENVX"));
    assert!(!vcd.contains("dsp"));
}

#[test]
fn test_one_record_per_dump() {
    let ctx = TestContext::new();
    let mut dut = ScriptedDut::held_ready();
    let mut session = TraceSession::open(&mut dut, &ctx.trace_path(), 0).unwrap();

    for step in 0..6 {
        toggle(&mut dut);
        session.dump(step, &dut).unwrap();
    }
    assert_eq!(session.records(), 6);
    session.close().unwrap();

    let vcd = ctx.trace_text();
    assert_eq!(timestamps(&vcd), [0, 1, 2, 3, 4, 5]);
    assert_eq!(vcd.matches("$dumpvars").count(), 1);
}

#[test]
fn test_drop_flushes_records() {
    let ctx = TestContext::new();
    let mut dut = ScriptedDut::default();
    {
        let mut session = TraceSession::open(&mut dut, &ctx.trace_path(), 0).unwrap();
        for step in 0..3 {
            toggle(&mut dut);
            session.dump(step, &dut).unwrap();
        }
    }
    assert_eq!(timestamps(&ctx.trace_text()), [0, 1, 2]);
}

#[test]
fn test_open_in_missing_directory() {
    let ctx = TestContext::new();
    let path = ctx.dir.path().join("missing").join("waveform.vcd");
    let mut dut = ScriptedDut::default();

    let err = TraceSession::open(&mut dut, &path, 5).unwrap_err();
    assert!(matches!(
        err,
        SimError::ResourceOpen {
            output: OutputKind::Trace,
            ..
        }
    ));
    assert!(!fs::exists(&path).unwrap());
}
