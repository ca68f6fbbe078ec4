//! The curses session.
//!
//! [`Curses`] owns a [`Native`] backend and wraps the calls that act on the
//! terminal as a whole: initialization, window creation, colors, input
//! modes, the cursor and screen updates. Window-level calls live on
//! [`Window`].
//!
//! Each wrapper makes exactly one native call (plus `has_colors` for
//! [`Curses::start_color`]), logs it, and turns the C sentinel into a
//! [`Result`].

use std::cell::Cell;
use std::fmt;

use crate::attr;
use crate::error::{CursesError, Handle, NativeFailure, Result, Sentinel};
use crate::native::Native;
use crate::trace::{self, trace_call, TRACE_ATTRS, TRACE_CALLS, TRACE_UPDATE};
use crate::types::{AttrT, ColorT, CursorVisibility, PairT, ERR};
use crate::window::Window;

/// A curses session over the backend `N`.
///
/// # Example
///
/// ```rust
/// use curses::emulator::Emulator;
/// use curses::{Curses, CursorVisibility};
///
/// fn main() -> curses::Result<()> {
///     let curses = Curses::new(Emulator::new(24, 80));
///     let stdwin = curses.initscr()?;
///     curses.cbreak()?;
///     curses.noecho()?;
///     curses.curs_set(CursorVisibility::Hidden)?;
///
///     stdwin.addstr(0, 0, "Hello, World!", 0);
///     stdwin.refresh()?;
///
///     curses.endwin()
/// }
/// ```
pub struct Curses<N: Native> {
    native: N,
    /// The standard window, once `initscr` succeeded.
    stdscr: Cell<Option<N::Win>>,
}

impl<N: Native> Curses<N> {
    /// Wrap a backend. Applies the trace configuration from the
    /// environment (see [`trace::init_from_env`]).
    pub fn new(native: N) -> Self {
        trace::init_from_env();
        Self {
            native,
            stdscr: Cell::new(None),
        }
    }

    /// The backend.
    pub fn native(&self) -> &N {
        &self.native
    }

    /// Give back the backend.
    pub fn into_native(self) -> N {
        self.native
    }

    pub(crate) fn wrap(&self, raw: N::Win) -> Window<'_, N> {
        Window::from_raw(self, raw)
    }

    pub(crate) fn forget_stdscr(&self, raw: N::Win) {
        if self.stdscr.get() == Some(raw) {
            self.stdscr.set(None);
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Initialize the terminal and return the standard window.
    pub fn initscr(&self) -> Result<Window<'_, N>> {
        let raw = trace_call!(TRACE_CALLS, "initscr", (""), self.native.initscr());
        let raw = Handle(raw).check("Initscr failed")?;
        self.stdscr.set(Some(raw));
        Ok(self.wrap(raw))
    }

    /// The standard window, if `initscr` succeeded.
    pub fn stdwin(&self) -> Option<Window<'_, N>> {
        self.stdscr.get().map(|raw| self.wrap(raw))
    }

    /// Restore the terminal to its pre-curses state.
    pub fn endwin(&self) -> Result<()> {
        trace_call!(TRACE_CALLS, "endwin", (""), self.native.endwin()).check("Endwin failed")
    }

    /// Create a window of `rows` x `cols` at screen position `(y, x)`.
    ///
    /// Zero for `rows` or `cols` extends the window to the screen edge.
    pub fn newwin(&self, rows: i32, cols: i32, y: i32, x: i32) -> Result<Window<'_, N>> {
        let raw = trace_call!(
            TRACE_CALLS,
            "newwin",
            ("{}, {}, {}, {}", rows, cols, y, x),
            self.native.newwin(rows, cols, y, x)
        );
        let raw = Handle(raw).check("Failed to create window")?;
        Ok(self.wrap(raw))
    }

    // ========================================================================
    // Color
    // ========================================================================

    /// Start color support.
    ///
    /// Fails without calling `start_color` when the terminal has no colors.
    pub fn start_color(&self) -> Result<()> {
        let has_colors = trace_call!(TRACE_CALLS, "has_colors", (""), self.native.has_colors());
        if !has_colors {
            return Err(CursesError::new(
                "terminal does not support color",
                NativeFailure::NoColorSupport,
            ));
        }
        trace_call!(TRACE_CALLS, "start_color", (""), self.native.start_color())
            .check("Start_color failed")
    }

    /// Register color pair `pair` as foreground `fg` on background `bg`.
    ///
    /// The native result is not checked; use [`Curses::try_init_pair`] to
    /// see failures.
    pub fn init_pair(&self, pair: PairT, fg: ColorT, bg: ColorT) {
        let _ = self.init_pair_raw(pair, fg, bg);
    }

    /// Register a color pair, reporting out-of-range pairs or colors.
    pub fn try_init_pair(&self, pair: PairT, fg: ColorT, bg: ColorT) -> Result<()> {
        self.init_pair_raw(pair, fg, bg).check("Init_pair failed")
    }

    fn init_pair_raw(&self, pair: PairT, fg: ColorT, bg: ColorT) -> i32 {
        trace_call!(
            TRACE_CALLS | TRACE_ATTRS,
            "init_pair",
            ("{}, {}, {}", pair, fg, bg),
            self.native.init_pair(pair, fg, bg)
        )
    }

    /// The attribute value selecting color pair `pair` (`COLOR_PAIR`).
    pub fn color_pair(&self, pair: PairT) -> AttrT {
        attr::color_pair(pair)
    }

    // ========================================================================
    // Input modes
    // ========================================================================

    fn mode(&self, name: &str, message: &'static str, call: fn(&N) -> i32) -> Result<()> {
        trace_call!(TRACE_CALLS, name, (""), call(&self.native)).check(message)
    }

    /// Pass every key through uninterpreted, including interrupt keys.
    pub fn raw(&self) -> Result<()> {
        self.mode("raw", "Raw failed", N::raw)
    }

    /// Leave raw mode.
    pub fn noraw(&self) -> Result<()> {
        self.mode("noraw", "Noraw failed", N::noraw)
    }

    /// Deliver keys as they are typed, without line buffering.
    pub fn cbreak(&self) -> Result<()> {
        self.mode("cbreak", "Cbreak failed", N::cbreak)
    }

    /// Return to line-buffered input.
    pub fn nocbreak(&self) -> Result<()> {
        self.mode("nocbreak", "Nocbreak failed", N::nocbreak)
    }

    /// Echo typed characters.
    pub fn echo(&self) -> Result<()> {
        self.mode("echo", "Echo failed", N::echo)
    }

    /// Stop echoing typed characters.
    pub fn noecho(&self) -> Result<()> {
        self.mode("noecho", "Noecho failed", N::noecho)
    }

    /// Set the cursor visibility and return the previous one.
    pub fn curs_set(&self, visibility: CursorVisibility) -> Result<CursorVisibility> {
        let ret = trace_call!(
            TRACE_CALLS,
            "curs_set",
            ("{}", visibility.to_raw()),
            self.native.curs_set(visibility.to_raw())
        );
        if ret == ERR {
            return Err(CursesError::new("Curs_set failed", NativeFailure::Code(ret)));
        }
        CursorVisibility::from_raw(ret)
            .ok_or_else(|| CursesError::new("Curs_set failed", NativeFailure::Code(ret)))
    }

    // ========================================================================
    // Screen
    // ========================================================================

    /// Send everything staged with [`Window::noutrefresh`] to the terminal.
    pub fn doupdate(&self) -> Result<()> {
        trace_call!(TRACE_CALLS | TRACE_UPDATE, "doupdate", (""), self.native.doupdate())
            .check("Doupdate failed")
    }

    /// Change the terminal size the library works with.
    pub fn resize_term(&self, rows: i32, cols: i32) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "resize_term",
            ("{}, {}", rows, cols),
            self.native.resize_term(rows, cols)
        )
        .check("Resize_term failed")
    }

    // ========================================================================
    // Global cells
    //
    // Read from the backend on every call, so they follow native changes
    // such as a terminal resize.
    // ========================================================================

    /// Width of the terminal (`COLS`).
    pub fn cols(&self) -> i32 {
        self.native.cols()
    }

    /// Height of the terminal (`LINES`).
    pub fn rows(&self) -> i32 {
        self.native.lines()
    }

    /// Number of colors (`COLORS`), 0 before `start_color`.
    pub fn colors(&self) -> i32 {
        self.native.colors()
    }

    /// Number of color pairs (`COLOR_PAIRS`), 0 before `start_color`.
    pub fn color_pairs(&self) -> i32 {
        self.native.color_pairs()
    }

    /// Columns per tab stop (`TABSIZE`).
    pub fn tabsize(&self) -> i32 {
        self.native.tabsize()
    }
}

impl<N: Native + Default> Default for Curses<N> {
    fn default() -> Self {
        Self::new(N::default())
    }
}

impl<N: Native + fmt::Debug> fmt::Debug for Curses<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curses")
            .field("native", &self.native)
            .field("stdscr", &self.stdscr.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::Emulator;

    fn curses() -> Curses<Emulator> {
        Curses::new(Emulator::new(24, 80))
    }

    #[test]
    fn test_initscr_sets_stdwin() {
        let curses = curses();
        assert!(curses.stdwin().is_none());
        let stdwin = curses.initscr().unwrap();
        assert_eq!(curses.stdwin(), Some(stdwin));
    }

    #[test]
    fn test_initscr_failure() {
        let curses = Curses::new(Emulator::builder().terminal_available(false).build());
        let err = curses.initscr().unwrap_err();
        assert_eq!(err.message(), "Initscr failed");
        assert_eq!(err.native(), NativeFailure::NullWindow);
    }

    #[test]
    fn test_newwin_out_of_bounds() {
        let curses = curses();
        curses.initscr().unwrap();
        let err = curses.newwin(10, 10, 20, 75).unwrap_err();
        assert_eq!(err.message(), "Failed to create window");
    }

    #[test]
    fn test_modes_before_initscr_fail() {
        let curses = curses();
        assert_eq!(curses.raw().unwrap_err().message(), "Raw failed");
        assert_eq!(curses.noecho().unwrap_err().message(), "Noecho failed");
        assert_eq!(curses.doupdate().unwrap_err().message(), "Doupdate failed");
    }

    #[test]
    fn test_modes_reach_backend() {
        let curses = curses();
        curses.initscr().unwrap();
        curses.raw().unwrap();
        curses.cbreak().unwrap();
        curses.noecho().unwrap();
        let modes = curses.native().modes();
        assert!(modes.raw && modes.cbreak && !modes.echo);

        curses.noraw().unwrap();
        curses.nocbreak().unwrap();
        curses.echo().unwrap();
        let modes = curses.native().modes();
        assert!(!modes.raw && !modes.cbreak && modes.echo);
    }

    #[test]
    fn test_curs_set_previous() {
        let curses = curses();
        curses.initscr().unwrap();
        assert_eq!(
            curses.curs_set(CursorVisibility::Hidden).unwrap(),
            CursorVisibility::Normal
        );
        assert_eq!(
            curses.curs_set(CursorVisibility::Normal).unwrap(),
            CursorVisibility::Hidden
        );

        let curses = Curses::new(Emulator::builder().cursor_control(false).build());
        curses.initscr().unwrap();
        let err = curses.curs_set(CursorVisibility::Hidden).unwrap_err();
        assert_eq!(err.message(), "Curs_set failed");
    }

    #[test]
    fn test_color_pairs() {
        let curses = curses();
        curses.initscr().unwrap();
        assert_eq!(curses.colors(), 0);
        curses.start_color().unwrap();
        assert_eq!(curses.colors(), 8);
        assert_eq!(curses.color_pairs(), 64);

        curses.init_pair(1, 2, 0);
        assert_eq!(curses.native().pair_content(1), Some((2, 0)));
        // Unchecked variant swallows the failure, the checked one reports it.
        curses.init_pair(99, 2, 0);
        let err = curses.try_init_pair(99, 2, 0).unwrap_err();
        assert_eq!(err.message(), "Init_pair failed");
        assert_eq!(curses.color_pair(1), attr::color_pair(1));
    }

    #[test]
    fn test_start_color_without_support() {
        let curses = Curses::new(Emulator::builder().monochrome().build());
        curses.initscr().unwrap();
        let err = curses.start_color().unwrap_err();
        assert_eq!(err.message(), "terminal does not support color");
        assert_eq!(err.native(), NativeFailure::NoColorSupport);
    }

    #[test]
    fn test_resize_term_updates_globals() {
        let curses = curses();
        curses.initscr().unwrap();
        curses.resize_term(30, 100).unwrap();
        assert_eq!((curses.rows(), curses.cols()), (30, 100));
        let err = curses.resize_term(-1, 100).unwrap_err();
        assert_eq!(err.message(), "Resize_term failed");
    }

    #[test]
    fn test_endwin_twice() {
        let curses = curses();
        curses.initscr().unwrap();
        curses.endwin().unwrap();
        assert_eq!(curses.endwin().unwrap_err().message(), "Endwin failed");
    }
}
