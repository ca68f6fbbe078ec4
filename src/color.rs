//! Color constants.
//!
//! The eight standard colors every color terminal provides. Pairs combining
//! them are registered with `Curses::init_pair` and applied with
//! `attr::color_pair`.

use crate::types::ColorT;

/// Black color.
pub const COLOR_BLACK: ColorT = 0;
/// Red color.
pub const COLOR_RED: ColorT = 1;
/// Green color.
pub const COLOR_GREEN: ColorT = 2;
/// Yellow color.
pub const COLOR_YELLOW: ColorT = 3;
/// Blue color.
pub const COLOR_BLUE: ColorT = 4;
/// Magenta color.
pub const COLOR_MAGENTA: ColorT = 5;
/// Cyan color.
pub const COLOR_CYAN: ColorT = 6;
/// White color.
pub const COLOR_WHITE: ColorT = 7;

/// Standard color enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum Color {
    /// Black (color 0).
    Black = COLOR_BLACK,
    /// Red (color 1).
    Red = COLOR_RED,
    /// Green (color 2).
    Green = COLOR_GREEN,
    /// Yellow (color 3).
    Yellow = COLOR_YELLOW,
    /// Blue (color 4).
    Blue = COLOR_BLUE,
    /// Magenta (color 5).
    Magenta = COLOR_MAGENTA,
    /// Cyan (color 6).
    Cyan = COLOR_CYAN,
    /// White (color 7).
    White = COLOR_WHITE,
}

impl Color {
    /// Convert from a color index.
    pub fn from_index(index: ColorT) -> Option<Self> {
        match index {
            COLOR_BLACK => Some(Color::Black),
            COLOR_RED => Some(Color::Red),
            COLOR_GREEN => Some(Color::Green),
            COLOR_YELLOW => Some(Color::Yellow),
            COLOR_BLUE => Some(Color::Blue),
            COLOR_MAGENTA => Some(Color::Magenta),
            COLOR_CYAN => Some(Color::Cyan),
            COLOR_WHITE => Some(Color::White),
            _ => None,
        }
    }

    /// Convert to color index.
    pub const fn to_index(self) -> ColorT {
        self as ColorT
    }
}

impl From<Color> for ColorT {
    fn from(color: Color) -> Self {
        color as ColorT
    }
}

/// Number of colors the emulator reports for a color terminal.
pub const DEFAULT_COLORS: i32 = 8;

/// Number of color pairs the emulator reports for a color terminal.
pub const DEFAULT_COLOR_PAIRS: i32 = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_round_trip() {
        for index in 0..8 {
            let color = Color::from_index(index).unwrap();
            assert_eq!(color.to_index(), index);
        }
        assert_eq!(Color::from_index(8), None);
        assert_eq!(ColorT::from(Color::Cyan), COLOR_CYAN);
    }
}
