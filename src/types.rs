//! Core type definitions shared by the binding and its backends.
//!
//! These mirror the C types used by the ncurses ABI so values can cross the
//! FFI boundary without conversion.

/// Character type with embedded attributes.
///
/// In ncurses, `chtype` is a 32-bit value where:
/// - Bits 0-7: The character
/// - Bits 8-15: The color pair
/// - Bits 16-31: Video attributes
pub type ChType = u32;

/// Attribute type. Same width as `ChType`.
pub type AttrT = ChType;

/// Color value type (`short` in C).
pub type ColorT = i16;

/// Color pair index type (`short` in C).
pub type PairT = i16;

/// OK return value (success).
pub const OK: i32 = 0;

/// ERR return value (failure).
pub const ERR: i32 = -1;

/// Hide the cursor.
pub const CURS_HIDE: i32 = 0;

/// Normal cursor.
pub const CURS_NORM: i32 = 1;

/// Highly visible cursor.
pub const CURS_HIGH: i32 = 2;

/// Cursor visibility states accepted by `curs_set`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CursorVisibility {
    /// Cursor is hidden.
    Hidden = CURS_HIDE,
    /// Normal cursor visibility (default).
    #[default]
    Normal = CURS_NORM,
    /// Very visible cursor (e.g., block cursor).
    HighlyVisible = CURS_HIGH,
}

impl CursorVisibility {
    /// Create from a raw `curs_set` value.
    ///
    /// Returns `None` if the value is not a valid cursor visibility.
    #[must_use]
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            CURS_HIDE => Some(Self::Hidden),
            CURS_NORM => Some(Self::Normal),
            CURS_HIGH => Some(Self::HighlyVisible),
            _ => None,
        }
    }

    /// Convert to the raw `curs_set` value.
    #[must_use]
    pub fn to_raw(self) -> i32 {
        self as i32
    }
}

impl From<CursorVisibility> for i32 {
    fn from(v: CursorVisibility) -> Self {
        v.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_visibility_raw() {
        assert_eq!(CursorVisibility::Hidden.to_raw(), 0);
        assert_eq!(CursorVisibility::HighlyVisible.to_raw(), 2);
        assert_eq!(CursorVisibility::from_raw(1), Some(CursorVisibility::Normal));
        assert_eq!(CursorVisibility::from_raw(3), None);
        assert_eq!(CursorVisibility::from_raw(ERR), None);
    }

    #[test]
    fn test_default_visibility() {
        assert_eq!(CursorVisibility::default(), CursorVisibility::Normal);
    }
}
