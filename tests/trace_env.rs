//! Trace configuration from the environment
//!
//! Kept in its own test binary: the environment and the trace state are
//! process-wide.

use curses::emulator::Emulator;
use curses::*;

/// Test that a second session keeps the log of the first
#[test]
fn test_env_trace_survives_new_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.trace");
    std::env::set_var(trace::TRACE_ENV, "0x20");
    std::env::set_var(trace::TRACE_FILE_ENV, &path);

    let first = Curses::new(Emulator::new(5, 10));
    first.initscr().unwrap();
    trace::tracef("first session");

    let second = Curses::new(Emulator::new(5, 10));
    second.initscr().unwrap();
    trace::tracef("second session");
    trace::trace(trace::TRACE_DISABLE);

    let log = std::fs::read_to_string(&path).unwrap();
    assert!(log.contains("first session"));
    assert!(log.contains("second session"));
    assert_eq!(log.matches("initscr() = ").count(), 2);
}
