use mockall::mock;
use nanospc_sim_core::dut::{Dut, Probe, Signal, TracePoint};

mock! {
    pub Model {}
    impl Dut for Model {
        fn clock(&self) -> bool;
        fn set_clock(&mut self, level: bool);
        fn eval(&mut self);
        fn read(&self, signal: Signal) -> u64;
        fn enable_trace(&mut self);
        fn trace_points(&self) -> Vec<TracePoint>;
        fn probe(&self, probe: Probe) -> u64;
    }
}
