//! FFI declarations for the system ncurses library.
//!
//! Only compiled with the `ncurses` feature, which links `libncurses`.
//! [`Ncurses`] forwards every [`Native`] call to the C function of the same
//! name.

#![allow(missing_docs)]

use libc::{c_int, c_short, c_uint};

use crate::native::{Native, RawWindow};
use crate::types::{AttrT, ChType, ColorT, PairT};

/// `chtype` as compiled into ncurses (32-bit).
#[allow(non_camel_case_types)]
pub type chtype = c_uint;

/// The opaque ncurses `WINDOW` structure.
#[allow(clippy::upper_case_acronyms)]
#[repr(C)]
pub struct WINDOW {
    _opaque: [u8; 0],
}

#[link(name = "ncurses")]
unsafe extern "C" {
    pub fn initscr() -> *mut WINDOW;
    pub fn endwin() -> c_int;

    pub fn newwin(nlines: c_int, ncols: c_int, begin_y: c_int, begin_x: c_int) -> *mut WINDOW;
    pub fn subwin(
        orig: *mut WINDOW,
        nlines: c_int,
        ncols: c_int,
        begin_y: c_int,
        begin_x: c_int,
    ) -> *mut WINDOW;
    pub fn derwin(
        orig: *mut WINDOW,
        nlines: c_int,
        ncols: c_int,
        begin_y: c_int,
        begin_x: c_int,
    ) -> *mut WINDOW;
    pub fn delwin(win: *mut WINDOW) -> c_int;

    pub fn has_colors() -> bool;
    pub fn start_color() -> c_int;
    pub fn init_pair(pair: c_short, f: c_short, b: c_short) -> c_int;

    pub fn raw() -> c_int;
    pub fn noraw() -> c_int;
    pub fn cbreak() -> c_int;
    pub fn nocbreak() -> c_int;
    pub fn echo() -> c_int;
    pub fn noecho() -> c_int;
    pub fn curs_set(visibility: c_int) -> c_int;

    pub fn doupdate() -> c_int;
    pub fn resize_term(lines: c_int, columns: c_int) -> c_int;

    pub fn wmove(win: *mut WINDOW, y: c_int, x: c_int) -> c_int;
    pub fn waddch(win: *mut WINDOW, ch: chtype) -> c_int;
    pub fn mvwaddch(win: *mut WINDOW, y: c_int, x: c_int, ch: chtype) -> c_int;
    pub fn mvwinch(win: *mut WINDOW, y: c_int, x: c_int) -> chtype;
    pub fn wresize(win: *mut WINDOW, lines: c_int, columns: c_int) -> c_int;
    pub fn keypad(win: *mut WINDOW, bf: bool) -> c_int;

    pub fn wrefresh(win: *mut WINDOW) -> c_int;
    pub fn wnoutrefresh(win: *mut WINDOW) -> c_int;
    pub fn wredrawln(win: *mut WINDOW, beg_line: c_int, num_lines: c_int) -> c_int;
    pub fn redrawwin(win: *mut WINDOW) -> c_int;

    pub fn wclear(win: *mut WINDOW) -> c_int;
    pub fn werase(win: *mut WINDOW) -> c_int;
    pub fn wclrtobot(win: *mut WINDOW) -> c_int;
    pub fn wclrtoeol(win: *mut WINDOW) -> c_int;

    #[link_name = "box"]
    pub fn box_(win: *mut WINDOW, verch: chtype, horch: chtype) -> c_int;
    pub fn wbkgd(win: *mut WINDOW, ch: chtype) -> c_int;
    pub fn wattron(win: *mut WINDOW, attrs: c_int) -> c_int;
    pub fn wattroff(win: *mut WINDOW, attrs: c_int) -> c_int;

    pub fn wgetch(win: *mut WINDOW) -> c_int;

    pub static mut COLS: c_int;
    pub static mut LINES: c_int;
    pub static mut COLORS: c_int;
    pub static mut COLOR_PAIRS: c_int;
    pub static mut TABSIZE: c_int;
}

impl RawWindow for *mut WINDOW {
    fn null() -> Self {
        std::ptr::null_mut()
    }

    fn is_null(self) -> bool {
        <*mut WINDOW>::is_null(self)
    }
}

/// The system ncurses library.
///
/// Zero-sized: all state lives inside the C library. Window pointers handed
/// out by this backend stay valid until `delwin`; using one afterwards is
/// undefined behaviour, exactly as in C.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ncurses;

// SAFETY (applies to every call below): the functions are declared with the
// prototypes from curses.h. Window pointers come from this backend's own
// creation calls; ncurses itself rejects null pointers with ERR.
impl Native for Ncurses {
    type Win = *mut WINDOW;

    fn initscr(&self) -> Self::Win {
        unsafe { initscr() }
    }

    fn endwin(&self) -> i32 {
        unsafe { endwin() }
    }

    fn newwin(&self, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32) -> Self::Win {
        unsafe { newwin(nlines, ncols, begin_y, begin_x) }
    }

    fn subwin(
        &self,
        orig: Self::Win,
        nlines: i32,
        ncols: i32,
        begin_y: i32,
        begin_x: i32,
    ) -> Self::Win {
        unsafe { subwin(orig, nlines, ncols, begin_y, begin_x) }
    }

    fn derwin(
        &self,
        orig: Self::Win,
        nlines: i32,
        ncols: i32,
        begin_y: i32,
        begin_x: i32,
    ) -> Self::Win {
        unsafe { derwin(orig, nlines, ncols, begin_y, begin_x) }
    }

    fn delwin(&self, win: Self::Win) -> i32 {
        unsafe { delwin(win) }
    }

    fn has_colors(&self) -> bool {
        unsafe { has_colors() }
    }

    fn start_color(&self) -> i32 {
        unsafe { start_color() }
    }

    fn init_pair(&self, pair: PairT, f: ColorT, b: ColorT) -> i32 {
        unsafe { init_pair(pair, f, b) }
    }

    fn raw(&self) -> i32 {
        unsafe { raw() }
    }

    fn noraw(&self) -> i32 {
        unsafe { noraw() }
    }

    fn cbreak(&self) -> i32 {
        unsafe { cbreak() }
    }

    fn nocbreak(&self) -> i32 {
        unsafe { nocbreak() }
    }

    fn echo(&self) -> i32 {
        unsafe { echo() }
    }

    fn noecho(&self) -> i32 {
        unsafe { noecho() }
    }

    fn curs_set(&self, visibility: i32) -> i32 {
        unsafe { curs_set(visibility) }
    }

    fn doupdate(&self) -> i32 {
        unsafe { doupdate() }
    }

    fn resize_term(&self, lines: i32, columns: i32) -> i32 {
        unsafe { resize_term(lines, columns) }
    }

    fn wmove(&self, win: Self::Win, y: i32, x: i32) -> i32 {
        unsafe { wmove(win, y, x) }
    }

    fn waddch(&self, win: Self::Win, ch: ChType) -> i32 {
        unsafe { waddch(win, ch) }
    }

    fn mvwaddch(&self, win: Self::Win, y: i32, x: i32, ch: ChType) -> i32 {
        unsafe { mvwaddch(win, y, x, ch) }
    }

    fn mvwinch(&self, win: Self::Win, y: i32, x: i32) -> ChType {
        unsafe { mvwinch(win, y, x) }
    }

    fn wresize(&self, win: Self::Win, lines: i32, columns: i32) -> i32 {
        unsafe { wresize(win, lines, columns) }
    }

    fn keypad(&self, win: Self::Win, bf: bool) -> i32 {
        unsafe { keypad(win, bf) }
    }

    fn wrefresh(&self, win: Self::Win) -> i32 {
        unsafe { wrefresh(win) }
    }

    fn wnoutrefresh(&self, win: Self::Win) -> i32 {
        unsafe { wnoutrefresh(win) }
    }

    fn wredrawln(&self, win: Self::Win, beg_line: i32, num_lines: i32) -> i32 {
        unsafe { wredrawln(win, beg_line, num_lines) }
    }

    fn redrawwin(&self, win: Self::Win) -> i32 {
        unsafe { redrawwin(win) }
    }

    fn wclear(&self, win: Self::Win) -> i32 {
        unsafe { wclear(win) }
    }

    fn werase(&self, win: Self::Win) -> i32 {
        unsafe { werase(win) }
    }

    fn wclrtobot(&self, win: Self::Win) -> i32 {
        unsafe { wclrtobot(win) }
    }

    fn wclrtoeol(&self, win: Self::Win) -> i32 {
        unsafe { wclrtoeol(win) }
    }

    fn box_(&self, win: Self::Win, verch: ChType, horch: ChType) -> i32 {
        unsafe { box_(win, verch, horch) }
    }

    fn wbkgd(&self, win: Self::Win, ch: ChType) -> i32 {
        unsafe { wbkgd(win, ch) }
    }

    fn wattron(&self, win: Self::Win, attrs: AttrT) -> i32 {
        unsafe { wattron(win, attrs as c_int) }
    }

    fn wattroff(&self, win: Self::Win, attrs: AttrT) -> i32 {
        unsafe { wattroff(win, attrs as c_int) }
    }

    fn wgetch(&self, win: Self::Win) -> i32 {
        unsafe { wgetch(win) }
    }

    fn cols(&self) -> i32 {
        unsafe { COLS }
    }

    fn lines(&self) -> i32 {
        unsafe { LINES }
    }

    fn colors(&self) -> i32 {
        unsafe { COLORS }
    }

    fn color_pairs(&self) -> i32 {
        unsafe { COLOR_PAIRS }
    }

    fn tabsize(&self) -> i32 {
        unsafe { TABSIZE }
    }
}
