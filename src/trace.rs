//! # Call tracing
//!
//! A trace log in the manner of ncurses' `trace()`: a process-wide level
//! bitmask and a file that receives one timestamped line per event. The
//! binding logs every wrapped call as `name(args) = result`, and every
//! failure with its message.
//!
//! Tracing is off until [`trace`] or [`trace_to`] is called, or until
//! [`init_from_env`] finds `CURSES_TRACE` set.
//!
//! ## Example
//!
//! ```rust,no_run
//! use curses::trace::*;
//!
//! // Enable call and attribute tracing, written to ./trace
//! trace(TRACE_CALLS | TRACE_ATTRS);
//!
//! tracef("Starting application");
//! let attr_str = traceattr(curses::attr::A_BOLD | curses::attr::A_UNDERLINE);
//! assert_eq!(attr_str, "A_UNDERLINE|A_BOLD");
//! ```

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::attr;
use crate::error::NativeFailure;
use crate::types::{AttrT, ChType};

// ============================================================================
// Trace level constants
// ============================================================================

/// Disable tracing.
pub const TRACE_DISABLE: u32 = 0x0000;

/// Trace screen updates.
pub const TRACE_UPDATE: u32 = 0x0004;

/// Trace all curses calls with parameters and return values.
pub const TRACE_CALLS: u32 = 0x0020;

/// Trace input events.
pub const TRACE_IEVENT: u32 = 0x0080;

/// Trace changes to video attributes and colors.
pub const TRACE_ATTRS: u32 = 0x1000;

/// Enable every trace feature.
pub const TRACE_MAXIMUM: u32 = 0xFFFF;

/// Environment variable holding the initial trace level.
pub const TRACE_ENV: &str = "CURSES_TRACE";

/// Environment variable naming the trace file.
pub const TRACE_FILE_ENV: &str = "CURSES_TRACE_FILE";

/// Trace file used when none is given.
pub const DEFAULT_TRACE_FILE: &str = "trace";

// ============================================================================
// Global trace state
// ============================================================================

#[derive(Default)]
struct TraceState {
    level: u32,
    file: Option<File>,
}

static TRACE_STATE: OnceLock<Mutex<TraceState>> = OnceLock::new();

static ENV_APPLIED: Once = Once::new();

fn state() -> MutexGuard<'static, TraceState> {
    TRACE_STATE
        .get_or_init(|| Mutex::new(TraceState::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn open_trace_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

// ============================================================================
// Main trace functions
// ============================================================================

/// Set the trace level, writing to `./trace`.
///
/// A nonzero level opens the file if no trace file is open yet;
/// `TRACE_DISABLE` closes it. If the file cannot be created the level is
/// still recorded but nothing is written.
pub fn trace(level: u32) {
    let mut state = state();
    if level == TRACE_DISABLE {
        state.file = None;
    } else if state.file.is_none() {
        state.file = open_trace_file(Path::new(DEFAULT_TRACE_FILE)).ok();
    }
    state.level = level;
}

/// Set the trace level, writing to `path`.
///
/// Replaces any trace file already open.
pub fn trace_to(path: impl AsRef<Path>, level: u32) -> io::Result<()> {
    let file = open_trace_file(path.as_ref())?;
    let mut state = state();
    state.file = (level != TRACE_DISABLE).then_some(file);
    state.level = level;
    Ok(())
}

/// Get the current trace level.
pub fn curses_trace() -> u32 {
    state().level
}

/// Check whether any of the bits in `flag` are enabled.
pub fn trace_enabled(flag: u32) -> bool {
    let state = state();
    state.level != TRACE_DISABLE && (state.level & flag) != 0
}

/// Write a message to the trace file.
pub fn tracef(msg: &str) {
    let mut state = state();
    if state.level == TRACE_DISABLE {
        return;
    }
    write_line(&mut state, format_args!("{}", msg));
}

fn write_line(state: &mut TraceState, line: fmt::Arguments<'_>) {
    if let Some(file) = state.file.as_mut() {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or(0);

        let _ = writeln!(file, "[{:012}] {}", timestamp, line);
        let _ = file.flush();
    }
}

/// Log one wrapped call as `name(args) = result` when `flag` is enabled.
pub(crate) fn call(flag: u32, name: &str, args: fmt::Arguments<'_>, result: &dyn fmt::Debug) {
    let mut state = state();
    if state.level & flag == 0 {
        return;
    }
    write_line(&mut state, format_args!("{}({}) = {:?}", name, args, result));
}

/// Evaluate a native call and log it with [`call`].
///
/// `trace_call!(TRACE_CALLS, "wmove", ("{}, {}", y, x), native.wmove(win, y, x))`
macro_rules! trace_call {
    ($flag:expr, $name:expr, ($($args:tt)*), $call:expr) => {{
        let ret = $call;
        $crate::trace::call($flag, $name, format_args!($($args)*), &ret);
        ret
    }};
}
pub(crate) use trace_call;

/// Log a failed call.
pub(crate) fn trace_failure(message: &str, native: &NativeFailure) {
    let mut state = state();
    if state.level & TRACE_CALLS == 0 {
        return;
    }
    write_line(&mut state, format_args!("error: {} ({})", message, native));
}

// ============================================================================
// Environment configuration
// ============================================================================

/// Parse a trace level written in decimal or `0x` hex.
pub fn parse_level(value: &str) -> Option<u32> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Apply `CURSES_TRACE` and `CURSES_TRACE_FILE`, once per process.
///
/// Later calls do nothing, so a second session keeps appending to the file
/// the first one opened. Does nothing when `CURSES_TRACE` is unset or
/// unparsable, so tracing configured in code is left alone.
pub fn init_from_env() {
    ENV_APPLIED.call_once(apply_env);
}

fn apply_env() {
    let Some(level) = std::env::var(TRACE_ENV)
        .ok()
        .as_deref()
        .and_then(parse_level)
    else {
        return;
    };
    let path = std::env::var_os(TRACE_FILE_ENV).unwrap_or_else(|| DEFAULT_TRACE_FILE.into());
    if trace_to(&path, level).is_err() {
        // Keep the level so `trace_enabled` still reflects the request.
        state().level = level;
    }
}

// ============================================================================
// Value rendering
// ============================================================================

/// Return a string representation of video attributes.
pub fn traceattr(attr: AttrT) -> String {
    const NAMES: [(AttrT, &str); 10] = [
        (attr::A_STANDOUT, "A_STANDOUT"),
        (attr::A_UNDERLINE, "A_UNDERLINE"),
        (attr::A_REVERSE, "A_REVERSE"),
        (attr::A_BLINK, "A_BLINK"),
        (attr::A_DIM, "A_DIM"),
        (attr::A_BOLD, "A_BOLD"),
        (attr::A_PROTECT, "A_PROTECT"),
        (attr::A_INVIS, "A_INVIS"),
        (attr::A_ALTCHARSET, "A_ALTCHARSET"),
        (attr::A_ITALIC, "A_ITALIC"),
    ];

    let mut parts: Vec<String> = NAMES
        .iter()
        .filter(|(bit, _)| attr & bit != 0)
        .map(|(_, name)| name.to_string())
        .collect();

    let pair = attr::pair_number(attr);
    if pair != 0 {
        parts.push(format!("COLOR_PAIR({})", pair));
    }

    if parts.is_empty() {
        "A_NORMAL".to_string()
    } else {
        parts.join("|")
    }
}

/// Return a printable representation of a key or character code.
pub fn tracechar(ch: i32) -> String {
    if (32..127).contains(&ch) {
        format!("'{}'", ch as u8 as char)
    } else if (0..32).contains(&ch) {
        format!("^{}", (ch + 64) as u8 as char)
    } else if ch == 127 {
        "^?".to_string()
    } else if ch < 0 {
        format!("ERR({})", ch)
    } else {
        format!("\\x{:02X}", ch)
    }
}

/// Return a string representation of a chtype: character and attributes.
pub fn tracechtype(ch: ChType) -> String {
    let char_part = attr::chtype_char(ch) as char;
    let attr_part = attr::chtype_attr(ch);

    let char_str = if char_part.is_ascii_graphic() || char_part == ' ' {
        format!("'{}'", char_part)
    } else {
        format!("\\x{:02X}", char_part as u8)
    };

    if attr_part == 0 {
        char_str
    } else {
        format!("{} | {}", char_str, traceattr(attr_part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    // The trace state is global; tests that change it run one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn test_trace_levels() {
        assert_eq!(TRACE_DISABLE, 0);
        assert!(TRACE_MAXIMUM > TRACE_CALLS);
        assert_ne!(TRACE_MAXIMUM & TRACE_ATTRS, 0);
    }

    #[test]
    fn test_traceattr() {
        let result = traceattr(attr::A_BOLD);
        assert_eq!(result, "A_BOLD");

        let result = traceattr(attr::A_BOLD | attr::A_UNDERLINE);
        assert!(result.contains("A_BOLD"));
        assert!(result.contains("A_UNDERLINE"));

        assert_eq!(traceattr(attr::color_pair(3)), "COLOR_PAIR(3)");
        assert_eq!(traceattr(0), "A_NORMAL");
    }

    #[test]
    fn test_tracechar() {
        assert_eq!(tracechar(b'A' as i32), "'A'");
        assert_eq!(tracechar(0), "^@");
        assert_eq!(tracechar(127), "^?");
        assert_eq!(tracechar(-1), "ERR(-1)");
    }

    #[test]
    fn test_tracechtype() {
        assert_eq!(tracechtype(b'X' as ChType), "'X'");
        assert_eq!(
            tracechtype(b'X' as ChType | attr::A_REVERSE),
            "'X' | A_REVERSE"
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("32"), Some(TRACE_CALLS));
        assert_eq!(parse_level("0x1000"), Some(TRACE_ATTRS));
        assert_eq!(parse_level(" 0XFFFF "), Some(TRACE_MAXIMUM));
        assert_eq!(parse_level("lots"), None);
    }

    #[test]
    fn test_trace_to_file() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");

        trace_to(&path, TRACE_CALLS).unwrap();
        assert!(trace_enabled(TRACE_CALLS));
        assert!(!trace_enabled(TRACE_ATTRS));
        tracef("hello trace");
        call(TRACE_CALLS, "wmove", format_args!("{}, {}", 2, 3), &0);
        call(TRACE_ATTRS, "wattron", format_args!("{}", 1), &0);
        trace_failure("Move failed", &NativeFailure::Code(-1));
        trace(TRACE_DISABLE);

        let log = fs::read_to_string(&path).unwrap();
        assert!(log.contains("hello trace"));
        assert!(log.contains("wmove(2, 3) = 0"));
        assert!(!log.contains("wattron"));
        assert!(log.contains("error: Move failed (native call returned -1)"));
        assert_eq!(curses_trace(), TRACE_DISABLE);
    }

    #[test]
    fn test_disabled_trace_writes_nothing() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("off.log");

        trace_to(&path, TRACE_DISABLE).unwrap();
        tracef("should not appear");
        assert!(!trace_enabled(TRACE_MAXIMUM));

        let log = fs::read_to_string(&path).unwrap();
        assert!(log.is_empty());
    }
}
