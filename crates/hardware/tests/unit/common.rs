//! # Error Tests
//!
//! Display text and classification of `SimError`.

use nanospc_sim_core::common::{OutputKind, SimError};
use std::io;

#[test]
fn test_resource_open_names_output_and_path() {
    let err = SimError::open(
        OutputKind::Audio,
        "/nowhere/snes.aud",
        io::Error::new(io::ErrorKind::NotFound, "no such directory"),
    );
    assert_eq!(
        err.to_string(),
        "could not open audio output '/nowhere/snes.aud': no such directory"
    );
    assert!(matches!(
        err,
        SimError::ResourceOpen {
            output: OutputKind::Audio,
            ..
        }
    ));
}

#[test]
fn test_write_failure_keeps_source() {
    let err = SimError::write(OutputKind::Trace, io::Error::other("disk full"));
    assert_eq!(err.to_string(), "failed writing trace output: disk full");
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "disk full");
}

#[test]
fn test_image_count_message() {
    assert_eq!(
        SimError::ImageCount(0).to_string(),
        "an SD-card image holds between 1 and 65535 SPC files, got 0"
    );
}

#[test]
fn test_output_kind_display() {
    assert_eq!(OutputKind::Audio.to_string(), "audio");
    assert_eq!(OutputKind::Trace.to_string(), "trace");
    assert_eq!(OutputKind::Image.to_string(), "image");
}
