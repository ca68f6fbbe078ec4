//! Video attribute bits.
//!
//! The layout matches the ncurses ABI: the character sits in the low byte,
//! the color pair in the next byte, and rendering attributes above that. The
//! values can therefore be OR'd into a `chtype` and handed to either backend.

use crate::types::{AttrT, ChType, PairT};

/// Number of bits reserved for the character.
pub const NCURSES_ATTR_SHIFT: u32 = 8;

/// `NCURSES_BITS` from `curses.h`.
#[inline]
pub const fn ncurses_bits(mask: u32, shift: u32) -> ChType {
    (mask as ChType) << (shift + NCURSES_ATTR_SHIFT)
}

/// Normal display (no attributes).
pub const A_NORMAL: AttrT = 0;

/// Mask for the character portion of a chtype.
pub const A_CHARTEXT: AttrT = (1 << NCURSES_ATTR_SHIFT) - 1;

/// Mask for the color pair portion of a chtype.
pub const A_COLOR: AttrT = ((1 << 8) - 1) << NCURSES_ATTR_SHIFT;

/// Everything except the character.
pub const A_ATTRIBUTES: AttrT = !A_CHARTEXT;

/// Standout mode.
pub const A_STANDOUT: AttrT = ncurses_bits(1, 8);

/// Underline.
pub const A_UNDERLINE: AttrT = ncurses_bits(1, 9);

/// Reverse video.
pub const A_REVERSE: AttrT = ncurses_bits(1, 10);

/// Blinking.
pub const A_BLINK: AttrT = ncurses_bits(1, 11);

/// Half-bright.
pub const A_DIM: AttrT = ncurses_bits(1, 12);

/// Bold.
pub const A_BOLD: AttrT = ncurses_bits(1, 13);

/// Alternate character set.
pub const A_ALTCHARSET: AttrT = ncurses_bits(1, 14);

/// Invisible.
pub const A_INVIS: AttrT = ncurses_bits(1, 15);

/// Protected.
pub const A_PROTECT: AttrT = ncurses_bits(1, 16);

/// Italic (ncurses extension).
pub const A_ITALIC: AttrT = ncurses_bits(1, 23);

/// The `COLOR_PAIR(n)` macro: encode a pair number into attribute bits.
///
/// ```rust
/// use curses::attr::{color_pair, pair_number, A_BOLD};
///
/// let attr = color_pair(3) | A_BOLD;
/// assert_eq!(pair_number(attr), 3);
/// ```
#[inline]
pub const fn color_pair(n: PairT) -> AttrT {
    ncurses_bits(n as u32, 0) & A_COLOR
}

/// The `PAIR_NUMBER(a)` macro.
#[inline]
pub const fn pair_number(attr: AttrT) -> PairT {
    ((attr & A_COLOR) >> NCURSES_ATTR_SHIFT) as PairT
}

bitflags::bitflags! {
    /// Rendering attributes as a typed set.
    ///
    /// Converts to and from raw `AttrT` masks; the color pair and character
    /// bits are never part of the set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Attribute: AttrT {
        /// Standout mode.
        const STANDOUT = A_STANDOUT;
        /// Underline.
        const UNDERLINE = A_UNDERLINE;
        /// Reverse video.
        const REVERSE = A_REVERSE;
        /// Blinking.
        const BLINK = A_BLINK;
        /// Half-bright.
        const DIM = A_DIM;
        /// Bold.
        const BOLD = A_BOLD;
        /// Alternate character set.
        const ALTCHARSET = A_ALTCHARSET;
        /// Invisible.
        const INVIS = A_INVIS;
        /// Protected.
        const PROTECT = A_PROTECT;
        /// Italic.
        const ITALIC = A_ITALIC;
    }
}

impl Attribute {
    /// Combine with a color pair into a raw attribute mask.
    #[must_use]
    pub fn with_color_pair(self, pair: PairT) -> AttrT {
        self.bits() | color_pair(pair)
    }
}

impl From<AttrT> for Attribute {
    fn from(attr: AttrT) -> Self {
        Attribute::from_bits_truncate(attr & !A_COLOR & !A_CHARTEXT)
    }
}

impl From<Attribute> for AttrT {
    fn from(attr: Attribute) -> Self {
        attr.bits()
    }
}

/// Character byte of a chtype.
#[inline]
pub const fn chtype_char(ch: ChType) -> u8 {
    (ch & A_CHARTEXT) as u8
}

/// Attribute and color bits of a chtype.
#[inline]
pub const fn chtype_attr(ch: ChType) -> AttrT {
    ch & A_ATTRIBUTES
}

/// Build a chtype from a byte and attributes.
#[inline]
pub const fn make_chtype(ch: u8, attr: AttrT) -> ChType {
    (ch as ChType) | attr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_curses_h() {
        assert_eq!(A_CHARTEXT, 0xFF);
        assert_eq!(A_COLOR, 0xFF00);
        assert_eq!(A_STANDOUT, 0x1_0000);
        assert_eq!(A_BOLD, 0x20_0000);
        assert_eq!(A_ITALIC, 0x8000_0000);
    }

    #[test]
    fn test_color_pair_round_trip() {
        assert_eq!(color_pair(0), 0);
        assert_eq!(pair_number(color_pair(7) | A_REVERSE), 7);
        assert_eq!(pair_number(color_pair(255)), 255);
    }

    #[test]
    fn test_chtype_helpers() {
        let ch = make_chtype(b'Q', A_UNDERLINE | color_pair(2));
        assert_eq!(chtype_char(ch), b'Q');
        assert_eq!(chtype_attr(ch), A_UNDERLINE | color_pair(2));
    }

    #[test]
    fn test_attribute_from_raw_drops_color() {
        let attr = Attribute::from(A_BOLD | color_pair(4) | b'x' as AttrT);
        assert_eq!(attr, Attribute::BOLD);
        assert_eq!(
            Attribute::UNDERLINE.with_color_pair(1),
            A_UNDERLINE | color_pair(1)
        );
    }
}
