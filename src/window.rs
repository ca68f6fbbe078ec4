//! Window handles.
//!
//! A [`Window`] is a non-owning, `Copy` reference to a native window. It
//! borrows its [`Curses`] session, so no window outlives the backend that
//! created it. Deleting a window with [`Window::delwin`] does not invalidate
//! copies of the handle; using one afterwards is passed to the backend as
//! is (an `ERR` for the emulator, undefined behaviour for ncurses).
//!
//! All coordinates are `(y, x)`, row first, as in curses.

use std::fmt::{self, Write as _};

use crate::error::{CursesError, Handle, NativeFailure, Result, Sentinel};
use crate::native::Native;
use crate::screen::Curses;
use crate::trace::{trace_call, trace_enabled, traceattr, tracechar, tracechtype, tracef};
use crate::trace::{TRACE_ATTRS, TRACE_CALLS, TRACE_IEVENT, TRACE_UPDATE};
use crate::types::{AttrT, ChType, ERR, OK};

/// Write formatted text into a window at `(y, x)`.
///
/// The counterpart of C's `mvwprintw`. Like [`Window::addstr`], failures of
/// individual characters are not reported.
///
/// ```rust
/// use curses::emulator::Emulator;
/// use curses::{mvwprintw, Curses};
///
/// let curses = Curses::new(Emulator::new(4, 20));
/// let win = curses.initscr()?;
/// mvwprintw!(win, 1, 0, 0, "{} of {}", 3, 7);
/// assert_eq!(curses.native().window_line(win.raw(), 1).as_deref(), Some("3 of 7              "));
/// # Ok::<(), curses::CursesError>(())
/// ```
#[macro_export]
macro_rules! mvwprintw {
    ($win:expr, $y:expr, $x:expr, $flags:expr, $($arg:tt)*) => {
        $win.addstr_fmt($y, $x, $flags, format_args!($($arg)*))
    };
}

/// A window of a curses session.
pub struct Window<'c, N: Native> {
    curses: &'c Curses<N>,
    raw: N::Win,
}

impl<N: Native> Clone for Window<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Native> Copy for Window<'_, N> {}

impl<N: Native> PartialEq for Window<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<N: Native> Eq for Window<'_, N> {}

impl<N: Native> fmt::Debug for Window<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Window").field(&self.raw).finish()
    }
}

/// Adapter that feeds formatted output to `waddch` one byte at a time.
struct CharWriter<'w, 'c, N: Native> {
    win: &'w Window<'c, N>,
    flags: AttrT,
    failed: bool,
}

impl<N: Native> fmt::Write for CharWriter<'_, '_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if self.win.waddch(byte as ChType | self.flags) == ERR {
                self.failed = true;
            }
        }
        Ok(())
    }
}

impl<'c, N: Native> Window<'c, N> {
    pub(crate) fn from_raw(curses: &'c Curses<N>, raw: N::Win) -> Self {
        Self { curses, raw }
    }

    /// The native window pointer.
    pub fn raw(&self) -> N::Win {
        self.raw
    }

    /// The session this window belongs to.
    pub fn curses(&self) -> &'c Curses<N> {
        self.curses
    }

    fn native(&self) -> &'c N {
        self.curses.native()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a window of `rows` x `cols` inside this one, at screen
    /// position `(y, x)`. The two share their cells.
    pub fn subwin(&self, rows: i32, cols: i32, y: i32, x: i32) -> Result<Window<'c, N>> {
        let raw = trace_call!(
            TRACE_CALLS,
            "subwin",
            ("{:?}, {}, {}, {}, {}", self.raw, rows, cols, y, x),
            self.native().subwin(self.raw, rows, cols, y, x)
        );
        let raw = Handle(raw).check("Failed to create window")?;
        Ok(self.curses.wrap(raw))
    }

    /// Like [`Window::subwin`], with `(y, x)` relative to this window.
    pub fn derwin(&self, rows: i32, cols: i32, y: i32, x: i32) -> Result<Window<'c, N>> {
        let raw = trace_call!(
            TRACE_CALLS,
            "derwin",
            ("{:?}, {}, {}, {}, {}", self.raw, rows, cols, y, x),
            self.native().derwin(self.raw, rows, cols, y, x)
        );
        let raw = Handle(raw).check("Failed to create window")?;
        Ok(self.curses.wrap(raw))
    }

    /// Delete the window. Sub-windows must be deleted first.
    pub fn delwin(self) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "delwin",
            ("{:?}", self.raw),
            self.native().delwin(self.raw)
        )
        .check("delete failed")?;
        self.curses.forget_stdscr(self.raw);
        Ok(())
    }

    /// Change the window size.
    pub fn resize(&self, rows: i32, cols: i32) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "wresize",
            ("{:?}, {}, {}", self.raw, rows, cols),
            self.native().wresize(self.raw, rows, cols)
        )
        .check("Resize failed")
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Move the cursor to `(y, x)`.
    pub fn mv(&self, y: i32, x: i32) -> Result<()> {
        self.wmove(y, x).check("Move failed")
    }

    fn wmove(&self, y: i32, x: i32) -> i32 {
        trace_call!(
            TRACE_CALLS,
            "wmove",
            ("{:?}, {}, {}", self.raw, y, x),
            self.native().wmove(self.raw, y, x)
        )
    }

    fn waddch(&self, ch: ChType) -> i32 {
        trace_call!(
            TRACE_CALLS,
            "waddch",
            ("{:?}, {}", self.raw, tracechtype(ch)),
            self.native().waddch(self.raw, ch)
        )
    }

    /// Write `ch` with `flags` at `(y, x)`.
    pub fn addch(&self, y: i32, x: i32, ch: ChType, flags: AttrT) -> Result<()> {
        let ch = ch | flags;
        trace_call!(
            TRACE_CALLS,
            "mvwaddch",
            ("{:?}, {}, {}, {}", self.raw, y, x, tracechtype(ch)),
            self.native().mvwaddch(self.raw, y, x, ch)
        )
        .check("Addch failed")
    }

    /// Write `s` byte by byte with `flags`, starting at `(y, x)`.
    ///
    /// Failures are not reported. If `(y, x)` is off the window the text
    /// goes to the current cursor instead, and text that runs off the end
    /// is cut. Use [`Window::try_addstr`] to find out.
    pub fn addstr(&self, y: i32, x: i32, s: &str, flags: AttrT) {
        self.addstr_fmt(y, x, flags, format_args!("{}", s));
    }

    /// Write formatted text byte by byte, as [`Window::addstr`] does.
    ///
    /// Usually called through [`mvwprintw!`](crate::mvwprintw).
    pub fn addstr_fmt(&self, y: i32, x: i32, flags: AttrT, args: fmt::Arguments<'_>) {
        let _ = self.mv(y, x);
        self.put_fmt(flags, args);
    }

    /// Write `s` at `(y, x)`, failing if the cursor cannot be placed or a
    /// character could not be written.
    ///
    /// All bytes are attempted even after a failure.
    pub fn try_addstr(&self, y: i32, x: i32, s: &str, flags: AttrT) -> Result<()> {
        self.try_addstr_fmt(y, x, flags, format_args!("{}", s))
    }

    fn try_addstr_fmt(&self, y: i32, x: i32, flags: AttrT, args: fmt::Arguments<'_>) -> Result<()> {
        self.mv(y, x)?;
        let code = if self.put_fmt(flags, args) { OK } else { ERR };
        code.check("Addstr failed")
    }

    /// Write at the cursor; false if any character failed.
    fn put_fmt(&self, flags: AttrT, args: fmt::Arguments<'_>) -> bool {
        let mut writer = CharWriter {
            win: self,
            flags,
            failed: false,
        };
        // CharWriter never returns an error itself.
        let _ = writer.write_fmt(args);
        !writer.failed
    }

    /// Read the cell at `(y, x)`, character and attributes.
    pub fn inch(&self, y: i32, x: i32) -> Result<ChType> {
        let ch = trace_call!(
            TRACE_CALLS,
            "mvwinch",
            ("{:?}, {}, {}", self.raw, y, x),
            self.native().mvwinch(self.raw, y, x)
        );
        if ch == ERR as ChType {
            return Err(CursesError::new("Inch failed", NativeFailure::Code(ERR)));
        }
        Ok(ch)
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Copy the window to the terminal.
    pub fn refresh(&self) -> Result<()> {
        trace_call!(
            TRACE_CALLS | TRACE_UPDATE,
            "wrefresh",
            ("{:?}", self.raw),
            self.native().wrefresh(self.raw)
        )
        .check("Refresh failed")
    }

    /// Stage the window for the next [`Curses::doupdate`].
    pub fn noutrefresh(&self) -> Result<()> {
        trace_call!(
            TRACE_CALLS | TRACE_UPDATE,
            "wnoutrefresh",
            ("{:?}", self.raw),
            self.native().wnoutrefresh(self.raw)
        )
        .check("Noutrefresh failed")
    }

    /// Mark `num` lines from `beg` as garbled, to be repainted in full.
    pub fn redrawln(&self, beg: i32, num: i32) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "wredrawln",
            ("{:?}, {}, {}", self.raw, beg, num),
            self.native().wredrawln(self.raw, beg, num)
        )
        .check("Redrawln failed")
    }

    /// Mark the whole window as garbled.
    pub fn redraw(&self) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "redrawwin",
            ("{:?}", self.raw),
            self.native().redrawwin(self.raw)
        )
        .check("Redraw failed")
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Erase the window and repaint the whole screen on the next refresh.
    pub fn clear(&self) -> Result<()> {
        trace_call!(TRACE_CALLS, "wclear", ("{:?}", self.raw), self.native().wclear(self.raw))
            .check("Clear failed")
    }

    /// Blank the window with its background.
    pub fn erase(&self) -> Result<()> {
        trace_call!(TRACE_CALLS, "werase", ("{:?}", self.raw), self.native().werase(self.raw))
            .check("Erase failed")
    }

    /// Erase from the cursor to the end of the window.
    pub fn clrtobot(&self) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "wclrtobot",
            ("{:?}", self.raw),
            self.native().wclrtobot(self.raw)
        )
        .check("Clrtobot failed")
    }

    /// Erase from the cursor to the end of the line.
    pub fn clrtoeol(&self) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "wclrtoeol",
            ("{:?}", self.raw),
            self.native().wclrtoeol(self.raw)
        )
        .check("Clrtoeol failed")
    }

    // ========================================================================
    // Decoration
    // ========================================================================

    /// Draw a border. 0 selects the default characters.
    pub fn draw_box(&self, verch: ChType, horch: ChType) {
        trace_call!(
            TRACE_CALLS,
            "box",
            ("{:?}, {}, {}", self.raw, tracechtype(verch), tracechtype(horch)),
            self.native().box_(self.raw, verch, horch)
        );
    }

    /// Set the background character and attributes.
    pub fn background(&self, ch: ChType) {
        trace_call!(
            TRACE_CALLS | TRACE_ATTRS,
            "wbkgd",
            ("{:?}, {}", self.raw, tracechtype(ch)),
            self.native().wbkgd(self.raw, ch)
        );
    }

    /// Turn on attributes for later writes.
    pub fn attron(&self, flags: AttrT) -> Result<()> {
        trace_call!(
            TRACE_CALLS | TRACE_ATTRS,
            "wattron",
            ("{:?}, {}", self.raw, traceattr(flags)),
            self.native().wattron(self.raw, flags)
        )
        .check("Attron failed")
    }

    /// Turn off attributes for later writes.
    pub fn attroff(&self, flags: AttrT) -> Result<()> {
        trace_call!(
            TRACE_CALLS | TRACE_ATTRS,
            "wattroff",
            ("{:?}, {}", self.raw, traceattr(flags)),
            self.native().wattroff(self.raw, flags)
        )
        .check("Attroff failed")
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Translate function keys into `KEY_*` codes.
    pub fn keypad(&self, enabled: bool) -> Result<()> {
        trace_call!(
            TRACE_CALLS,
            "keypad",
            ("{:?}, {}", self.raw, enabled),
            self.native().keypad(self.raw, enabled)
        )
        .check("Keypad failed")
    }

    /// Read one key.
    ///
    /// Returns the raw native value: a character, a `KEY_*` code, or `ERR`.
    pub fn getch(&self) -> i32 {
        let key = trace_call!(
            TRACE_CALLS,
            "wgetch",
            ("{:?}", self.raw),
            self.native().wgetch(self.raw)
        );
        if trace_enabled(TRACE_IEVENT) {
            tracef(&format!("wgetch: key {}", tracechar(key)));
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{A_BOLD, A_CHARTEXT, A_UNDERLINE};
    use crate::emulator::Emulator;
    use crate::key::{KEY_LEFT, KEY_RIGHT};

    fn curses() -> Curses<Emulator> {
        Curses::new(Emulator::new(10, 20))
    }

    fn text<N: Native>(win: &Window<'_, N>, y: i32, len: i32) -> String {
        (0..len)
            .map(|x| (win.inch(y, x).unwrap() & A_CHARTEXT) as u8 as char)
            .collect()
    }

    #[test]
    fn test_window_is_copy() {
        let curses = curses();
        let a = curses.initscr().unwrap();
        let b = a;
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), format!("Window({:?})", a.raw()));
    }

    #[test]
    fn test_mv_bounds() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        win.mv(9, 19).unwrap();
        assert_eq!(win.mv(10, 0).unwrap_err().message(), "Move failed");
        assert_eq!(win.mv(0, -1).unwrap_err().message(), "Move failed");
    }

    #[test]
    fn test_addch_applies_flags() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        win.addch(2, 3, b'x' as ChType, A_BOLD).unwrap();
        assert_eq!(win.inch(2, 3).unwrap(), b'x' as ChType | A_BOLD);
        let err = win.addch(2, 30, b'x' as ChType, 0).unwrap_err();
        assert_eq!(err.message(), "Addch failed");
    }

    #[test]
    fn test_addstr_reads_back() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        win.addstr(4, 2, "Hello", A_UNDERLINE);
        assert_eq!(text(&win, 4, 9), "  Hello  ");
        assert_eq!(win.inch(4, 2).unwrap(), b'H' as ChType | A_UNDERLINE);
    }

    #[test]
    fn test_addstr_discards_failures() {
        let curses = curses();
        let win = curses.newwin(1, 4, 0, 0).unwrap();
        // Off the window: the text lands at the current cursor.
        win.mv(0, 1).unwrap();
        win.addstr(3, 0, "ab", 0);
        assert_eq!(text(&win, 0, 4), " ab ");
        // The last cell keeps being overwritten once the cursor is stuck.
        win.addstr(0, 0, "abcdef", 0);
        assert_eq!(text(&win, 0, 4), "abcf");

        assert_eq!(
            win.try_addstr(3, 0, "abc", 0).unwrap_err().message(),
            "Move failed"
        );
        assert_eq!(
            win.try_addstr(0, 1, "abcdef", 0).unwrap_err().message(),
            "Addstr failed"
        );
        win.try_addstr(0, 0, "wxyz", 0).unwrap_err();
        win.try_addstr(0, 0, "wx", 0).unwrap();
    }

    #[test]
    fn test_inch_outside_window() {
        let curses = curses();
        let win = curses.newwin(2, 2, 0, 0).unwrap();
        let err = win.inch(5, 0).unwrap_err();
        assert_eq!(err.message(), "Inch failed");
        assert_eq!(err.native(), NativeFailure::Code(ERR));
    }

    #[test]
    fn test_mvwprintw() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        let score = 42;
        mvwprintw!(win, 0, 0, 0, "score: {:>4}", score);
        assert_eq!(text(&win, 0, 11), "score:   42");
    }

    #[test]
    fn test_subwin_and_derwin() {
        let curses = curses();
        let win = curses.newwin(6, 10, 2, 4).unwrap();
        let sub = win.subwin(2, 3, 3, 5).unwrap();
        let der = win.derwin(2, 3, 1, 1).unwrap();
        sub.addch(0, 0, b'*' as ChType, 0).unwrap();
        assert_eq!(der.inch(0, 0).unwrap() & A_CHARTEXT, b'*' as ChType);
        assert_eq!(
            win.derwin(10, 10, 0, 0).unwrap_err().message(),
            "Failed to create window"
        );

        assert_eq!(win.delwin().unwrap_err().message(), "delete failed");
        sub.delwin().unwrap();
        der.delwin().unwrap();
        win.delwin().unwrap();
        assert_eq!(win.delwin().unwrap_err().message(), "delete failed");
    }

    #[test]
    fn test_delwin_stdscr_forgets_it() {
        let curses = curses();
        let stdwin = curses.initscr().unwrap();
        stdwin.delwin().unwrap();
        assert!(curses.stdwin().is_none());
    }

    #[test]
    fn test_attron_attroff() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        win.attron(A_BOLD).unwrap();
        win.addstr(0, 0, "on", 0);
        win.attroff(A_BOLD).unwrap();
        win.addstr(1, 0, "off", 0);
        assert_eq!(win.inch(0, 0).unwrap(), b'o' as ChType | A_BOLD);
        assert_eq!(win.inch(1, 0).unwrap(), b'o' as ChType);
    }

    #[test]
    fn test_clearing() {
        let curses = curses();
        let win = curses.newwin(3, 4, 0, 0).unwrap();
        for y in 0..3 {
            win.addstr(y, 0, "abcd", 0);
        }
        win.mv(1, 2).unwrap();
        win.clrtoeol().unwrap();
        assert_eq!(text(&win, 1, 4), "ab  ");

        win.mv(0, 1).unwrap();
        win.clrtobot().unwrap();
        assert_eq!(text(&win, 0, 4), "a   ");
        assert_eq!(text(&win, 2, 4), "    ");

        win.addstr(0, 0, "z", 0);
        win.erase().unwrap();
        assert_eq!(text(&win, 0, 4), "    ");
        win.clear().unwrap();
    }

    #[test]
    fn test_box_and_background() {
        let curses = curses();
        let win = curses.newwin(3, 5, 0, 0).unwrap();
        win.draw_box(0, 0);
        assert_eq!(text(&win, 0, 5), "+---+");
        assert_eq!(text(&win, 1, 5), "|   |");

        win.background(b'.' as ChType);
        assert_eq!(text(&win, 1, 5), "|...|");
    }

    #[test]
    fn test_resize_window() {
        let curses = curses();
        let win = curses.newwin(2, 2, 0, 0).unwrap();
        win.resize(4, 6).unwrap();
        assert_eq!(curses.native().window_size(win.raw()), Some((4, 6)));
        assert_eq!(win.resize(-1, 6).unwrap_err().message(), "Resize failed");
    }

    #[test]
    fn test_getch_keypad() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        curses.noecho().unwrap();
        assert_eq!(win.getch(), ERR);

        win.keypad(true).unwrap();
        curses.native().push_key(KEY_LEFT);
        curses.native().push_str("q");
        assert_eq!(win.getch(), KEY_LEFT);
        assert_eq!(win.getch(), b'q' as i32);

        win.keypad(false).unwrap();
        curses.native().push_key(KEY_RIGHT);
        assert_eq!(win.getch(), 0x1b);
    }

    #[test]
    fn test_refresh_and_redraw() {
        let curses = curses();
        let win = curses.initscr().unwrap();
        win.refresh().unwrap();
        assert_eq!(curses.native().last_update_lines(), 10);

        win.addstr(3, 0, "x", 0);
        win.noutrefresh().unwrap();
        curses.doupdate().unwrap();
        assert_eq!(curses.native().last_update_lines(), 1);
        assert_eq!(curses.native().screen_line(3).unwrap().trim_end(), "x");

        win.redrawln(0, 2).unwrap();
        win.refresh().unwrap();
        assert_eq!(curses.native().last_update_lines(), 2);
        win.redraw().unwrap();
        win.refresh().unwrap();
        assert_eq!(curses.native().last_update_lines(), 10);
        assert_eq!(win.redrawln(8, 5).unwrap_err().message(), "Redrawln failed");
    }
}
