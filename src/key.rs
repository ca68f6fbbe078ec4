//! Key codes returned by `getch`.
//!
//! With keypad translation enabled, function keys arrive as the single codes
//! below instead of raw escape sequences. Values match `curses.h`.

/// Minimum curses key value.
pub const KEY_MIN: i32 = 0o401;

/// Down arrow key.
pub const KEY_DOWN: i32 = 0o402;

/// Up arrow key.
pub const KEY_UP: i32 = 0o403;

/// Left arrow key.
pub const KEY_LEFT: i32 = 0o404;

/// Right arrow key.
pub const KEY_RIGHT: i32 = 0o405;

/// Home key.
pub const KEY_HOME: i32 = 0o406;

/// Backspace key.
pub const KEY_BACKSPACE: i32 = 0o407;

/// Function key F0.
pub const KEY_F0: i32 = 0o410;

/// Function key F(n), the `KEY_F(n)` macro.
#[inline]
pub const fn key_f(n: i32) -> i32 {
    KEY_F0 + n
}

/// Delete character key.
pub const KEY_DC: i32 = 0o512;

/// Insert character key.
pub const KEY_IC: i32 = 0o513;

/// Next page key.
pub const KEY_NPAGE: i32 = 0o522;

/// Previous page key.
pub const KEY_PPAGE: i32 = 0o523;

/// Enter key on the keypad.
pub const KEY_ENTER: i32 = 0o527;

/// Back-tab key.
pub const KEY_BTAB: i32 = 0o541;

/// End key.
pub const KEY_END: i32 = 0o550;

/// Terminal resize event.
pub const KEY_RESIZE: i32 = 0o632;

/// Maximum curses key value.
pub const KEY_MAX: i32 = 0o777;

/// Decoded view of a `getch` result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain byte.
    Char(char),
    /// Down arrow.
    Down,
    /// Up arrow.
    Up,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter.
    Enter,
    /// Back-tab.
    BackTab,
    /// Function key.
    F(u8),
    /// Terminal resize.
    Resize,
    /// `getch` returned `ERR` (no input).
    NoInput,
    /// Anything else.
    Unknown(i32),
}

impl Key {
    /// Decode a raw `getch` value.
    pub fn from_code(code: i32) -> Self {
        match code {
            crate::types::ERR => Key::NoInput,
            0..=255 => Key::Char(code as u8 as char),
            KEY_DOWN => Key::Down,
            KEY_UP => Key::Up,
            KEY_LEFT => Key::Left,
            KEY_RIGHT => Key::Right,
            KEY_HOME => Key::Home,
            KEY_END => Key::End,
            KEY_BACKSPACE => Key::Backspace,
            KEY_DC => Key::Delete,
            KEY_IC => Key::Insert,
            KEY_PPAGE => Key::PageUp,
            KEY_NPAGE => Key::PageDown,
            KEY_ENTER => Key::Enter,
            KEY_BTAB => Key::BackTab,
            KEY_RESIZE => Key::Resize,
            k if (KEY_F0..=KEY_F0 + 63).contains(&k) => Key::F((k - KEY_F0) as u8),
            _ => Key::Unknown(code),
        }
    }
}

impl From<i32> for Key {
    fn from(code: i32) -> Self {
        Key::from_code(code)
    }
}

/// The byte sequence a VT100-style terminal sends for a key code.
///
/// Used when keypad translation is off and the raw sequence reaches the
/// application instead of the decoded code.
pub fn escape_sequence(code: i32) -> Option<&'static [u8]> {
    match code {
        KEY_UP => Some(b"\x1b[A"),
        KEY_DOWN => Some(b"\x1b[B"),
        KEY_RIGHT => Some(b"\x1b[C"),
        KEY_LEFT => Some(b"\x1b[D"),
        KEY_HOME => Some(b"\x1b[H"),
        KEY_END => Some(b"\x1b[F"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_f() {
        assert_eq!(key_f(1), KEY_F0 + 1);
        assert_eq!(Key::from_code(key_f(12)), Key::F(12));
    }

    #[test]
    fn test_decode() {
        assert_eq!(Key::from_code(b'q' as i32), Key::Char('q'));
        assert_eq!(Key::from_code(KEY_UP), Key::Up);
        assert_eq!(Key::from_code(-1), Key::NoInput);
        assert_eq!(Key::from_code(KEY_MAX), Key::Unknown(KEY_MAX));
    }

    #[test]
    fn test_escape_sequence() {
        assert_eq!(escape_sequence(KEY_LEFT), Some(&b"\x1b[D"[..]));
        assert_eq!(escape_sequence(KEY_DC), None);
    }
}
