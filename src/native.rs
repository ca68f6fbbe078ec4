//! The native call surface.
//!
//! [`Native`] lists the C functions the binding wraps, with their C return
//! conventions intact: `OK`/`ERR` codes, nullable window pointers, raw
//! chtypes. The binding layer in [`crate::screen`] and [`crate::window`]
//! turns those into `Result`s; backends only have to forward calls.
//!
//! All methods take `&self`. The native library keeps process-wide mutable
//! state of its own, so the receiver says nothing about exclusivity.

use std::fmt::Debug;

use crate::types::{AttrT, ChType, ColorT, PairT};

/// A raw, nullable window pointer.
pub trait RawWindow: Copy + Eq + Debug {
    /// The null pointer.
    fn null() -> Self;

    /// Whether this is the null pointer.
    fn is_null(self) -> bool;
}

/// The wrapped subset of the curses C API.
pub trait Native {
    /// The backend's `WINDOW *`.
    type Win: RawWindow;

    // Session

    /// `WINDOW *initscr(void)`
    fn initscr(&self) -> Self::Win;
    /// `int endwin(void)`
    fn endwin(&self) -> i32;

    // Window lifecycle

    /// `WINDOW *newwin(int nlines, int ncols, int begin_y, int begin_x)`
    fn newwin(&self, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32) -> Self::Win;
    /// `WINDOW *subwin(WINDOW *orig, int nlines, int ncols, int begin_y, int begin_x)`
    fn subwin(&self, orig: Self::Win, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32)
        -> Self::Win;
    /// `WINDOW *derwin(WINDOW *orig, int nlines, int ncols, int begin_y, int begin_x)`
    fn derwin(&self, orig: Self::Win, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32)
        -> Self::Win;
    /// `int delwin(WINDOW *win)`
    fn delwin(&self, win: Self::Win) -> i32;

    // Color

    /// `bool has_colors(void)`
    fn has_colors(&self) -> bool;
    /// `int start_color(void)`
    fn start_color(&self) -> i32;
    /// `int init_pair(short pair, short f, short b)`
    fn init_pair(&self, pair: PairT, f: ColorT, b: ColorT) -> i32;

    // Input modes

    /// `int raw(void)`
    fn raw(&self) -> i32;
    /// `int noraw(void)`
    fn noraw(&self) -> i32;
    /// `int cbreak(void)`
    fn cbreak(&self) -> i32;
    /// `int nocbreak(void)`
    fn nocbreak(&self) -> i32;
    /// `int echo(void)`
    fn echo(&self) -> i32;
    /// `int noecho(void)`
    fn noecho(&self) -> i32;
    /// `int curs_set(int visibility)`: previous visibility, or `ERR`.
    fn curs_set(&self, visibility: i32) -> i32;

    // Screen

    /// `int doupdate(void)`
    fn doupdate(&self) -> i32;
    /// `int resize_term(int lines, int columns)`
    fn resize_term(&self, lines: i32, columns: i32) -> i32;

    // Window output

    /// `int wmove(WINDOW *win, int y, int x)`
    fn wmove(&self, win: Self::Win, y: i32, x: i32) -> i32;
    /// `int waddch(WINDOW *win, const chtype ch)`
    fn waddch(&self, win: Self::Win, ch: ChType) -> i32;
    /// `int mvwaddch(WINDOW *win, int y, int x, const chtype ch)`
    fn mvwaddch(&self, win: Self::Win, y: i32, x: i32, ch: ChType) -> i32;
    /// `chtype mvwinch(WINDOW *win, int y, int x)`: `(chtype)ERR` on failure.
    fn mvwinch(&self, win: Self::Win, y: i32, x: i32) -> ChType;
    /// `int wresize(WINDOW *win, int lines, int columns)`
    fn wresize(&self, win: Self::Win, lines: i32, columns: i32) -> i32;
    /// `int keypad(WINDOW *win, bool bf)`
    fn keypad(&self, win: Self::Win, bf: bool) -> i32;

    // Refresh

    /// `int wrefresh(WINDOW *win)`
    fn wrefresh(&self, win: Self::Win) -> i32;
    /// `int wnoutrefresh(WINDOW *win)`
    fn wnoutrefresh(&self, win: Self::Win) -> i32;
    /// `int wredrawln(WINDOW *win, int beg_line, int num_lines)`
    fn wredrawln(&self, win: Self::Win, beg_line: i32, num_lines: i32) -> i32;
    /// `int redrawwin(WINDOW *win)`
    fn redrawwin(&self, win: Self::Win) -> i32;

    // Clearing

    /// `int wclear(WINDOW *win)`
    fn wclear(&self, win: Self::Win) -> i32;
    /// `int werase(WINDOW *win)`
    fn werase(&self, win: Self::Win) -> i32;
    /// `int wclrtobot(WINDOW *win)`
    fn wclrtobot(&self, win: Self::Win) -> i32;
    /// `int wclrtoeol(WINDOW *win)`
    fn wclrtoeol(&self, win: Self::Win) -> i32;

    // Decoration

    /// `int box(WINDOW *win, chtype verch, chtype horch)`
    fn box_(&self, win: Self::Win, verch: ChType, horch: ChType) -> i32;
    /// `int wbkgd(WINDOW *win, chtype ch)`
    fn wbkgd(&self, win: Self::Win, ch: ChType) -> i32;
    /// `int wattron(WINDOW *win, int attrs)`
    fn wattron(&self, win: Self::Win, attrs: AttrT) -> i32;
    /// `int wattroff(WINDOW *win, int attrs)`
    fn wattroff(&self, win: Self::Win, attrs: AttrT) -> i32;

    // Input

    /// `int wgetch(WINDOW *win)`
    fn wgetch(&self, win: Self::Win) -> i32;

    // Global cells, read on every call

    /// `COLS`
    fn cols(&self) -> i32;
    /// `LINES`
    fn lines(&self) -> i32;
    /// `COLORS`
    fn colors(&self) -> i32;
    /// `COLOR_PAIRS`
    fn color_pairs(&self) -> i32;
    /// `TABSIZE`
    fn tabsize(&self) -> i32;
}
