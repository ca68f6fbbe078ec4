//! An in-memory curses engine.
//!
//! [`Emulator`] implements [`Native`] without a terminal: windows live in an
//! arena, the physical screen is a grid of cells, and input comes from a
//! queue the host fills. Return values follow the ncurses contracts (`ERR`
//! for invalid handles or positions, null for failed window creation), which
//! makes it a faithful stand-in for the C library in tests and a headless
//! renderer elsewhere.
//!
//! ```rust
//! use curses::emulator::Emulator;
//! use curses::Curses;
//!
//! let curses = Curses::new(Emulator::new(5, 20));
//! let stdwin = curses.initscr()?;
//! stdwin.addstr(1, 2, "hello", 0);
//! stdwin.refresh()?;
//! assert_eq!(curses.native().screen_line(1).as_deref(), Some("  hello             "));
//! # Ok::<(), curses::CursesError>(())
//! ```

mod line;
mod window;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use self::line::LineData;
use self::window::{View, WinData};
use crate::attr::A_CHARTEXT;
use crate::color::{DEFAULT_COLORS, DEFAULT_COLOR_PAIRS};
use crate::key::{escape_sequence, KEY_MIN, KEY_RESIZE};
use crate::native::{Native, RawWindow};
use crate::trace::{self, TRACE_UPDATE};
use crate::types::{AttrT, ChType, ColorT, PairT, CURS_HIGH, CURS_HIDE, CURS_NORM, ERR, OK};

const BLANK: ChType = b' ' as ChType;

/// Default tab width.
const DEFAULT_TABSIZE: i32 = 8;

/// Window handle of the emulator. Index into the window arena, 0 is null.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinId(usize);

impl WinId {
    fn index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    fn from_index(index: usize) -> Self {
        WinId(index + 1)
    }
}

impl RawWindow for WinId {
    fn null() -> Self {
        WinId(0)
    }

    fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Input processing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modes {
    /// Set by `raw`, cleared by `noraw`.
    pub raw: bool,
    /// Set by `cbreak`, cleared by `nocbreak`.
    pub cbreak: bool,
    /// Set by `echo`, cleared by `noecho`.
    pub echo: bool,
}

impl Default for Modes {
    /// The modes ncurses starts in: cooked input with echo.
    fn default() -> Self {
        Self {
            raw: false,
            cbreak: false,
            echo: true,
        }
    }
}

/// Builder for an [`Emulator`].
///
/// ```rust
/// use curses::emulator::Emulator;
///
/// let emulator = Emulator::builder()
///     .size(30, 100)
///     .monochrome()
///     .tabsize(4)
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct EmulatorBuilder {
    lines: i32,
    cols: i32,
    colors: i32,
    color_pairs: i32,
    tabsize: i32,
    cursor_control: bool,
    terminal_available: bool,
}

impl Default for EmulatorBuilder {
    fn default() -> Self {
        Self {
            lines: 24,
            cols: 80,
            colors: DEFAULT_COLORS,
            color_pairs: DEFAULT_COLOR_PAIRS,
            tabsize: DEFAULT_TABSIZE,
            cursor_control: true,
            terminal_available: true,
        }
    }
}

impl EmulatorBuilder {
    /// A 24x80 color terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal size in rows and columns.
    #[must_use]
    pub const fn size(mut self, lines: i32, cols: i32) -> Self {
        self.lines = lines;
        self.cols = cols;
        self
    }

    /// Colors and color pairs reported once color is started.
    #[must_use]
    pub const fn colors(mut self, colors: i32, color_pairs: i32) -> Self {
        self.colors = colors;
        self.color_pairs = color_pairs;
        self
    }

    /// A terminal without color support.
    #[must_use]
    pub const fn monochrome(self) -> Self {
        self.colors(0, 0)
    }

    /// Columns per tab stop (`TABSIZE`).
    #[must_use]
    pub const fn tabsize(mut self, tabsize: i32) -> Self {
        self.tabsize = tabsize;
        self
    }

    /// Whether `curs_set` can change the cursor.
    #[must_use]
    pub const fn cursor_control(mut self, enabled: bool) -> Self {
        self.cursor_control = enabled;
        self
    }

    /// When false, `initscr` fails as it does for an unknown terminal type.
    #[must_use]
    pub const fn terminal_available(mut self, available: bool) -> Self {
        self.terminal_available = available;
        self
    }

    /// Create the emulator. The terminal stays uninitialized until
    /// `initscr`.
    pub fn build(self) -> Emulator {
        Emulator {
            state: RefCell::new(State::new(self)),
        }
    }
}

/// The emulated terminal and its curses state.
///
/// Single-threaded, like the library it stands in for.
#[derive(Debug)]
pub struct Emulator {
    state: RefCell<State>,
}

impl Default for Emulator {
    fn default() -> Self {
        EmulatorBuilder::default().build()
    }
}

#[derive(Debug)]
struct State {
    config: EmulatorBuilder,
    initialized: bool,
    ended: bool,

    // Global cells
    lines: i32,
    cols: i32,
    colors: i32,
    color_pairs: i32,
    tabsize: i32,

    stdscr: Option<usize>,
    windows: Vec<Option<WinData>>,
    /// Rows of every root window, keyed by arena index.
    storage: HashMap<usize, Vec<LineData>>,

    /// Virtual screen, filled by `wnoutrefresh`.
    newscr: Vec<LineData>,
    /// Physical screen, filled by `doupdate`.
    curscr: Vec<LineData>,
    /// Physical lines to repaint regardless of content.
    garbled: Vec<bool>,
    clear_pending: bool,
    last_update: usize,

    modes: Modes,
    cursor: i32,
    pairs: Vec<Option<(ColorT, ColorT)>>,

    input: VecDeque<i32>,
    /// Bytes of an escape sequence still to be delivered.
    pending: VecDeque<i32>,
}

impl State {
    fn new(config: EmulatorBuilder) -> Self {
        Self {
            config,
            initialized: false,
            ended: false,
            lines: 0,
            cols: 0,
            colors: 0,
            color_pairs: 0,
            tabsize: 0,
            stdscr: None,
            windows: Vec::new(),
            storage: HashMap::new(),
            newscr: Vec::new(),
            curscr: Vec::new(),
            garbled: Vec::new(),
            clear_pending: false,
            last_update: 0,
            modes: Modes::default(),
            cursor: CURS_NORM,
            pairs: Vec::new(),
            input: VecDeque::new(),
            pending: VecDeque::new(),
        }
    }

    fn active(&self) -> bool {
        self.initialized
    }

    fn screen_rows(lines: i32, cols: i32) -> Vec<LineData> {
        (0..lines)
            .map(|_| LineData::new(cols as usize, BLANK))
            .collect()
    }

    fn win(&self, id: WinId) -> Option<&WinData> {
        self.windows.get(id.index()?)?.as_ref()
    }

    fn win_mut(&mut self, id: WinId) -> Option<&mut WinData> {
        self.windows.get_mut(id.index()?)?.as_mut()
    }

    fn view(&mut self, id: WinId) -> Option<View<'_>> {
        let win = self.windows.get_mut(id.index()?)?.as_mut()?;
        let lines = self.storage.get_mut(&win.root)?;
        Some(View {
            win,
            lines,
            tabsize: self.tabsize,
        })
    }

    /// Run `f` on a live window, mapping a bad handle to `ERR`.
    fn with_view(&mut self, id: WinId, f: impl FnOnce(&mut View<'_>) -> i32) -> i32 {
        match self.view(id) {
            Some(mut view) => f(&mut view),
            None => ERR,
        }
    }

    /// Slots are never reused, so a stale handle cannot name a newer window.
    fn insert(&mut self, data: WinData) -> WinId {
        let rows = data.owns_rows().then(|| data.new_rows());
        self.windows.push(None);
        let index = self.windows.len() - 1;
        let data = if data.owns_rows() {
            WinData { root: index, ..data }
        } else {
            data
        };
        if let Some(rows) = rows {
            self.storage.insert(index, rows);
        }
        self.windows[index] = Some(data);
        WinId::from_index(index)
    }

    fn initscr(&mut self) -> WinId {
        if !self.config.terminal_available {
            return WinId::null();
        }
        if self.initialized {
            self.ended = false;
            return self.stdscr.map_or(WinId::null(), WinId::from_index);
        }

        self.lines = self.config.lines;
        self.cols = self.config.cols;
        self.tabsize = self.config.tabsize;
        if self.lines <= 0 || self.cols <= 0 {
            return WinId::null();
        }

        self.newscr = Self::screen_rows(self.lines, self.cols);
        self.curscr = Self::screen_rows(self.lines, self.cols);
        self.garbled = vec![false; self.lines as usize];
        self.clear_pending = true;

        let stdscr = self.insert(WinData::root(0, self.lines, self.cols, 0, 0));
        self.stdscr = stdscr.index();
        self.initialized = true;
        self.ended = false;
        stdscr
    }

    fn endwin(&mut self) -> i32 {
        if !self.initialized || self.ended {
            return ERR;
        }
        self.ended = true;
        self.modes = Modes::default();
        OK
    }

    fn newwin(&mut self, nlines: i32, ncols: i32, begy: i32, begx: i32) -> WinId {
        if !self.active() || nlines < 0 || ncols < 0 || begy < 0 || begx < 0 {
            return WinId::null();
        }
        let rows = if nlines == 0 { self.lines - begy } else { nlines };
        let cols = if ncols == 0 { self.cols - begx } else { ncols };
        if rows <= 0
            || cols <= 0
            || !fits(begy, rows, self.lines)
            || !fits(begx, cols, self.cols)
        {
            return WinId::null();
        }
        self.insert(WinData::root(0, rows, cols, begy, begx))
    }

    fn derwin(&mut self, orig: WinId, nlines: i32, ncols: i32, y: i32, x: i32) -> WinId {
        let Some(parent_index) = orig.index() else {
            return WinId::null();
        };
        let Some(parent) = self.win(orig) else {
            return WinId::null();
        };
        if nlines < 0 || ncols < 0 || y < 0 || x < 0 {
            return WinId::null();
        }
        let rows = if nlines == 0 { parent.rows - y } else { nlines };
        let cols = if ncols == 0 { parent.cols - x } else { ncols };
        if rows <= 0
            || cols <= 0
            || !fits(y, rows, parent.rows)
            || !fits(x, cols, parent.cols)
        {
            return WinId::null();
        }

        let child = WinData::derived(parent_index, parent, rows, cols, y, x);
        if let Some(parent) = self.win_mut(orig) {
            parent.children += 1;
        }
        self.insert(child)
    }

    fn subwin(&mut self, orig: WinId, nlines: i32, ncols: i32, begy: i32, begx: i32) -> WinId {
        match self.win(orig) {
            Some(parent) => {
                match (begy.checked_sub(parent.begy), begx.checked_sub(parent.begx)) {
                    (Some(y), Some(x)) => self.derwin(orig, nlines, ncols, y, x),
                    _ => WinId::null(),
                }
            }
            None => WinId::null(),
        }
    }

    fn delwin(&mut self, id: WinId) -> i32 {
        let Some(index) = id.index() else {
            return ERR;
        };
        match self.win(id) {
            Some(win) if win.children == 0 => {}
            _ => return ERR,
        }
        let Some(win) = self.windows[index].take() else {
            return ERR;
        };
        match win.parent {
            Some(parent) => {
                if let Some(parent) = self.windows.get_mut(parent).and_then(Option::as_mut) {
                    parent.children -= 1;
                }
            }
            None => {
                self.storage.remove(&index);
            }
        }
        if self.stdscr == Some(index) {
            self.stdscr = None;
        }
        OK
    }

    fn start_color(&mut self) -> i32 {
        if !self.active() || self.config.colors <= 0 {
            return ERR;
        }
        self.colors = self.config.colors;
        self.color_pairs = self.config.color_pairs;
        self.pairs = vec![None; self.color_pairs.max(0) as usize];
        OK
    }

    fn init_pair(&mut self, pair: PairT, f: ColorT, b: ColorT) -> i32 {
        let valid_color = |c: ColorT| (0..self.colors).contains(&(c as i32));
        if self.colors == 0
            || !(0..self.color_pairs).contains(&(pair as i32))
            || !valid_color(f)
            || !valid_color(b)
        {
            return ERR;
        }
        self.pairs[pair as usize] = Some((f, b));
        OK
    }

    fn set_mode(&mut self, apply: impl FnOnce(&mut Modes)) -> i32 {
        if !self.active() {
            return ERR;
        }
        apply(&mut self.modes);
        OK
    }

    fn curs_set(&mut self, visibility: i32) -> i32 {
        if !self.active() || !self.config.cursor_control {
            return ERR;
        }
        if !(CURS_HIDE..=CURS_HIGH).contains(&visibility) {
            return ERR;
        }
        std::mem::replace(&mut self.cursor, visibility)
    }

    fn wnoutrefresh(&mut self, id: WinId) -> i32 {
        let Some(win) = self.win(id).cloned() else {
            return ERR;
        };
        if win.clear {
            self.clear_pending = true;
            if let Some(w) = self.win_mut(id) {
                w.clear = false;
            }
            if let Some(mut view) = self.view(id) {
                view.touch();
            }
        }

        let Some(rows) = self.storage.get_mut(&win.root) else {
            return ERR;
        };
        let (left, right) = (win.offx as usize, (win.offx + win.cols) as usize);

        for y in 0..win.rows {
            let Some(line) = rows.get_mut((win.offy + y) as usize) else {
                continue;
            };
            let Some((first, last)) = line.changed_range() else {
                continue;
            };
            if last < left || first >= right {
                continue;
            }
            let screen_y = win.begy + y;
            if let Some(screen_line) = usize::try_from(screen_y)
                .ok()
                .and_then(|sy| self.newscr.get_mut(sy))
            {
                for x in first.max(left)..=last.min(right - 1) {
                    let screen_x = win.begx as usize + (x - left);
                    screen_line.set(screen_x, line.get(x));
                }
            }
            // Changes outside this window stay pending for its ancestors.
            if first >= left && last < right {
                line.untouch();
            }
        }
        OK
    }

    fn doupdate(&mut self) -> i32 {
        if !self.active() {
            return ERR;
        }
        self.ended = false;

        if self.clear_pending {
            for line in &mut self.curscr {
                line.fill_range(0, line.width(), 0);
            }
            self.garbled.fill(true);
            self.clear_pending = false;
        }

        let mut repainted = 0;
        for (y, (physical, virtual_line)) in
            self.curscr.iter_mut().zip(self.newscr.iter()).enumerate()
        {
            if self.garbled[y] || physical.text() != virtual_line.text() {
                physical.copy_from(virtual_line);
                repainted += 1;
            }
        }
        self.garbled.fill(false);
        self.last_update = repainted;

        if trace::trace_enabled(TRACE_UPDATE) {
            trace::tracef(&format!("doupdate: repainted {} lines", repainted));
        }
        OK
    }

    fn wredrawln(&mut self, id: WinId, beg: i32, num: i32) -> i32 {
        let Some(win) = self.win(id) else {
            return ERR;
        };
        if beg < 0 || num < 0 || !fits(beg, num, win.rows) {
            return ERR;
        }
        let begy = win.begy;
        for y in (beg..beg + num).filter_map(|y| begy.checked_add(y)) {
            if let Some(flag) = usize::try_from(y).ok().and_then(|y| self.garbled.get_mut(y)) {
                *flag = true;
            }
        }
        OK
    }

    fn wgetch(&mut self, id: WinId) -> i32 {
        let Some(keypad) = self.win(id).map(|w| w.keypad) else {
            return ERR;
        };
        if !self.active() {
            return ERR;
        }

        // An implicit refresh when the window has pending changes.
        if self.view(id).is_some_and(|view| view.is_touched()) {
            self.wnoutrefresh(id);
            self.doupdate();
        }

        let key = match self.pending.pop_front() {
            Some(byte) => byte,
            None => match self.input.pop_front() {
                None => return ERR,
                Some(code) if code >= KEY_MIN && !keypad => match escape_sequence(code) {
                    Some(bytes) => {
                        self.pending.extend(bytes[1..].iter().map(|b| *b as i32));
                        bytes[0] as i32
                    }
                    None => code,
                },
                Some(code) => code,
            },
        };

        if self.modes.echo && (0x20..0x7f).contains(&key) {
            self.with_view(id, |view| view.addch(key as ChType));
        }
        key
    }

    fn resize_term(&mut self, lines: i32, cols: i32) -> i32 {
        if !self.active() || lines <= 0 || cols <= 0 {
            return ERR;
        }
        self.lines = lines;
        self.cols = cols;
        self.newscr = Self::screen_rows(lines, cols);
        self.curscr = Self::screen_rows(lines, cols);
        self.garbled = vec![false; lines as usize];
        self.clear_pending = true;

        if let Some(stdscr) = self.stdscr.map(WinId::from_index) {
            self.with_view(stdscr, |view| {
                view.resize(lines, cols);
                OK
            });
        }
        OK
    }
}

/// Whether `len` cells starting at `start` end within `limit`.
fn fits(start: i32, len: i32, limit: i32) -> bool {
    start.checked_add(len).is_some_and(|end| end <= limit)
}

impl Emulator {
    /// A color terminal of the given size.
    pub fn new(lines: i32, cols: i32) -> Self {
        Self::builder().size(lines, cols).build()
    }

    /// Start configuring an emulator.
    pub fn builder() -> EmulatorBuilder {
        EmulatorBuilder::new()
    }

    /// Queue a key for `wgetch`. Key codes (`KEY_*`) are allowed.
    pub fn push_key(&self, key: i32) {
        self.state.borrow_mut().input.push_back(key);
    }

    /// Queue the bytes of `s` for `wgetch`.
    pub fn push_str(&self, s: &str) {
        self.state
            .borrow_mut()
            .input
            .extend(s.bytes().map(i32::from));
    }

    /// Resize the terminal from the outside, as a window-size change signal
    /// would. Queues `KEY_RESIZE` like ncurses' signal handler does.
    pub fn resize(&self, lines: i32, cols: i32) -> i32 {
        let mut state = self.state.borrow_mut();
        let result = state.resize_term(lines, cols);
        if result == OK {
            state.input.push_back(KEY_RESIZE);
        }
        result
    }

    /// Characters on physical screen row `y`.
    pub fn screen_line(&self, y: i32) -> Option<String> {
        let state = self.state.borrow();
        let line = state.curscr.get(usize::try_from(y).ok()?)?;
        Some(
            line.text()
                .iter()
                .map(|ch| match (ch & A_CHARTEXT) as u8 {
                    0 => ' ',
                    b => b as char,
                })
                .collect(),
        )
    }

    /// Physical screen cell, with attributes.
    pub fn screen_cell(&self, y: i32, x: i32) -> Option<ChType> {
        let state = self.state.borrow();
        let line = state.curscr.get(usize::try_from(y).ok()?)?;
        line.text().get(usize::try_from(x).ok()?).copied()
    }

    /// Characters of row `y` inside a window, refreshed or not.
    pub fn window_line(&self, win: WinId, y: i32) -> Option<String> {
        let mut state = self.state.borrow_mut();
        let view = state.view(win)?;
        if y < 0 || y >= view.win.rows {
            return None;
        }
        view.row_text(y)
    }

    /// Size of a live window as `(rows, cols)`.
    pub fn window_size(&self, win: WinId) -> Option<(i32, i32)> {
        self.state.borrow().win(win).map(|w| (w.rows, w.cols))
    }

    /// Cursor of a live window as `(y, x)`.
    pub fn window_cursor(&self, win: WinId) -> Option<(i32, i32)> {
        self.state.borrow().win(win).map(|w| (w.cury, w.curx))
    }

    /// Current attributes of a live window.
    pub fn window_attrs(&self, win: WinId) -> Option<AttrT> {
        self.state.borrow().win(win).map(|w| w.attrs)
    }

    /// Whether keypad translation is on for a live window.
    pub fn is_keypad(&self, win: WinId) -> Option<bool> {
        self.state.borrow().win(win).map(|w| w.keypad)
    }

    /// Current input modes.
    pub fn modes(&self) -> Modes {
        self.state.borrow().modes
    }

    /// Current `curs_set` value.
    pub fn cursor_visibility(&self) -> i32 {
        self.state.borrow().cursor
    }

    /// Foreground and background registered for `pair`.
    pub fn pair_content(&self, pair: PairT) -> Option<(ColorT, ColorT)> {
        let state = self.state.borrow();
        state.pairs.get(usize::try_from(pair).ok()?).copied().flatten()
    }

    /// Physical lines repainted by the last `doupdate`.
    pub fn last_update_lines(&self) -> usize {
        self.state.borrow().last_update
    }

    /// Number of windows created and not yet deleted.
    pub fn live_windows(&self) -> usize {
        self.state.borrow().windows.iter().flatten().count()
    }

    /// Whether `endwin` was called and the session not resumed.
    pub fn is_endwin(&self) -> bool {
        let state = self.state.borrow();
        !state.initialized || state.ended
    }
}

impl Native for Emulator {
    type Win = WinId;

    fn initscr(&self) -> WinId {
        self.state.borrow_mut().initscr()
    }

    fn endwin(&self) -> i32 {
        self.state.borrow_mut().endwin()
    }

    fn newwin(&self, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32) -> WinId {
        self.state.borrow_mut().newwin(nlines, ncols, begin_y, begin_x)
    }

    fn subwin(&self, orig: WinId, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32) -> WinId {
        self.state
            .borrow_mut()
            .subwin(orig, nlines, ncols, begin_y, begin_x)
    }

    fn derwin(&self, orig: WinId, nlines: i32, ncols: i32, begin_y: i32, begin_x: i32) -> WinId {
        self.state
            .borrow_mut()
            .derwin(orig, nlines, ncols, begin_y, begin_x)
    }

    fn delwin(&self, win: WinId) -> i32 {
        self.state.borrow_mut().delwin(win)
    }

    fn has_colors(&self) -> bool {
        let state = self.state.borrow();
        state.active() && state.config.colors > 0
    }

    fn start_color(&self) -> i32 {
        self.state.borrow_mut().start_color()
    }

    fn init_pair(&self, pair: PairT, f: ColorT, b: ColorT) -> i32 {
        self.state.borrow_mut().init_pair(pair, f, b)
    }

    fn raw(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.raw = true)
    }

    fn noraw(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.raw = false)
    }

    fn cbreak(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.cbreak = true)
    }

    fn nocbreak(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.cbreak = false)
    }

    fn echo(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.echo = true)
    }

    fn noecho(&self) -> i32 {
        self.state.borrow_mut().set_mode(|m| m.echo = false)
    }

    fn curs_set(&self, visibility: i32) -> i32 {
        self.state.borrow_mut().curs_set(visibility)
    }

    fn doupdate(&self) -> i32 {
        self.state.borrow_mut().doupdate()
    }

    fn resize_term(&self, lines: i32, columns: i32) -> i32 {
        self.state.borrow_mut().resize_term(lines, columns)
    }

    fn wmove(&self, win: WinId, y: i32, x: i32) -> i32 {
        self.state.borrow_mut().with_view(win, |view| view.mv(y, x))
    }

    fn waddch(&self, win: WinId, ch: ChType) -> i32 {
        self.state.borrow_mut().with_view(win, |view| view.addch(ch))
    }

    fn mvwaddch(&self, win: WinId, y: i32, x: i32, ch: ChType) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            if view.mv(y, x) == ERR {
                return ERR;
            }
            view.addch(ch)
        })
    }

    fn mvwinch(&self, win: WinId, y: i32, x: i32) -> ChType {
        let mut state = self.state.borrow_mut();
        let Some(mut view) = state.view(win) else {
            return ERR as ChType;
        };
        if view.mv(y, x) == ERR {
            return ERR as ChType;
        }
        view.get(y, x)
    }

    fn wresize(&self, win: WinId, lines: i32, columns: i32) -> i32 {
        let mut state = self.state.borrow_mut();
        let Some(data) = state.win(win) else {
            return ERR;
        };
        if lines <= 0 || columns <= 0 || data.children > 0 {
            return ERR;
        }
        if let Some(parent) = data.parent.and_then(|p| state.windows.get(p)?.as_ref()) {
            let (y, x) = (data.begy - parent.begy, data.begx - parent.begx);
            if !fits(y, lines, parent.rows) || !fits(x, columns, parent.cols) {
                return ERR;
            }
        }
        state.with_view(win, |view| {
            view.resize(lines, columns);
            OK
        })
    }

    fn keypad(&self, win: WinId, bf: bool) -> i32 {
        match self.state.borrow_mut().win_mut(win) {
            Some(data) => {
                data.keypad = bf;
                OK
            }
            None => ERR,
        }
    }

    fn wrefresh(&self, win: WinId) -> i32 {
        let mut state = self.state.borrow_mut();
        if state.wnoutrefresh(win) == ERR {
            return ERR;
        }
        state.doupdate()
    }

    fn wnoutrefresh(&self, win: WinId) -> i32 {
        self.state.borrow_mut().wnoutrefresh(win)
    }

    fn wredrawln(&self, win: WinId, beg_line: i32, num_lines: i32) -> i32 {
        self.state.borrow_mut().wredrawln(win, beg_line, num_lines)
    }

    fn redrawwin(&self, win: WinId) -> i32 {
        let mut state = self.state.borrow_mut();
        match state.win(win).map(|w| w.rows) {
            Some(rows) => state.wredrawln(win, 0, rows),
            None => ERR,
        }
    }

    fn wclear(&self, win: WinId) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.erase();
            view.win.clear = true;
            OK
        })
    }

    fn werase(&self, win: WinId) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.erase();
            OK
        })
    }

    fn wclrtobot(&self, win: WinId) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.clrtobot();
            OK
        })
    }

    fn wclrtoeol(&self, win: WinId) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.clrtoeol();
            OK
        })
    }

    fn box_(&self, win: WinId, verch: ChType, horch: ChType) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.border(verch, horch);
            OK
        })
    }

    fn wbkgd(&self, win: WinId, ch: ChType) -> i32 {
        self.state.borrow_mut().with_view(win, |view| {
            view.bkgd(ch);
            OK
        })
    }

    fn wattron(&self, win: WinId, attrs: AttrT) -> i32 {
        match self.state.borrow_mut().win_mut(win) {
            Some(data) => {
                data.attrs |= attrs;
                OK
            }
            None => ERR,
        }
    }

    fn wattroff(&self, win: WinId, attrs: AttrT) -> i32 {
        match self.state.borrow_mut().win_mut(win) {
            Some(data) => {
                data.attrs &= !attrs;
                OK
            }
            None => ERR,
        }
    }

    fn wgetch(&self, win: WinId) -> i32 {
        self.state.borrow_mut().wgetch(win)
    }

    fn cols(&self) -> i32 {
        self.state.borrow().cols
    }

    fn lines(&self) -> i32 {
        self.state.borrow().lines
    }

    fn colors(&self) -> i32 {
        self.state.borrow().colors
    }

    fn color_pairs(&self) -> i32 {
        self.state.borrow().color_pairs
    }

    fn tabsize(&self) -> i32 {
        self.state.borrow().tabsize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::A_BOLD;
    use crate::key::KEY_UP;

    fn session(lines: i32, cols: i32) -> (Emulator, WinId) {
        let emulator = Emulator::new(lines, cols);
        let stdscr = emulator.initscr();
        assert!(!stdscr.is_null());
        (emulator, stdscr)
    }

    #[test]
    fn test_globals_before_and_after_init() {
        let emulator = Emulator::new(10, 40);
        assert_eq!((emulator.lines(), emulator.cols()), (0, 0));
        emulator.initscr();
        assert_eq!((emulator.lines(), emulator.cols()), (10, 40));
        assert_eq!(emulator.tabsize(), 8);
        assert_eq!(emulator.colors(), 0);
    }

    #[test]
    fn test_initscr_twice_returns_same_window() {
        let (emulator, stdscr) = session(5, 5);
        assert_eq!(emulator.initscr(), stdscr);
        assert_eq!(emulator.live_windows(), 1);
    }

    #[test]
    fn test_unavailable_terminal() {
        let emulator = Emulator::builder().terminal_available(false).build();
        assert!(emulator.initscr().is_null());
        assert!(emulator.newwin(1, 1, 0, 0).is_null());
    }

    #[test]
    fn test_newwin_bounds() {
        let (emulator, _) = session(10, 20);
        assert!(!emulator.newwin(10, 20, 0, 0).is_null());
        assert!(emulator.newwin(5, 5, 8, 0).is_null());
        assert!(emulator.newwin(-1, 5, 0, 0).is_null());
        let rest = emulator.newwin(0, 0, 4, 6);
        assert_eq!(emulator.window_size(rest), Some((6, 14)));
    }

    #[test]
    fn test_derived_window_shares_cells() {
        let (emulator, stdscr) = session(10, 20);
        let sub = emulator.derwin(stdscr, 3, 5, 2, 4);
        assert_eq!(emulator.mvwaddch(sub, 0, 0, b'Z' as ChType), OK);
        assert_eq!(emulator.mvwinch(stdscr, 2, 4) & A_CHARTEXT, b'Z' as ChType);

        let screen_sub = emulator.subwin(stdscr, 2, 2, 2, 4);
        assert_eq!(emulator.mvwinch(screen_sub, 0, 0) & A_CHARTEXT, b'Z' as ChType);
        assert!(emulator.derwin(stdscr, 3, 5, 8, 0).is_null());
    }

    #[test]
    fn test_delwin_rules() {
        let (emulator, stdscr) = session(10, 20);
        let sub = emulator.derwin(stdscr, 2, 2, 0, 0);
        assert_eq!(emulator.delwin(stdscr), ERR);
        assert_eq!(emulator.delwin(sub), OK);
        assert_eq!(emulator.delwin(sub), ERR);
        assert_eq!(emulator.delwin(WinId::null()), ERR);
    }

    #[test]
    fn test_stale_handle_does_not_reach_new_window() {
        let (emulator, _) = session(10, 20);
        let old = emulator.newwin(2, 2, 0, 0);
        assert_eq!(emulator.delwin(old), OK);
        let new = emulator.newwin(2, 2, 0, 0);
        assert_ne!(old, new);
        assert_eq!(emulator.delwin(old), ERR);
        assert_eq!(emulator.wmove(new, 1, 1), OK);
    }

    #[test]
    fn test_huge_sizes_fail_cleanly() {
        let (emulator, stdscr) = session(10, 20);
        assert!(emulator.newwin(i32::MAX, 10, 5, 0).is_null());
        assert!(emulator.newwin(2, i32::MAX, 0, 5).is_null());
        assert!(emulator.derwin(stdscr, i32::MAX, 1, 5, 0).is_null());
        assert!(emulator.subwin(stdscr, 1, 1, i32::MIN, 0).is_null());
        assert_eq!(emulator.wredrawln(stdscr, 1, i32::MAX), ERR);
        assert_eq!(emulator.wredrawln(stdscr, i32::MAX, 1), ERR);

        let sub = emulator.derwin(stdscr, 2, 2, 5, 5);
        assert_eq!(emulator.wresize(sub, i32::MAX, 1), ERR);
        assert_eq!(emulator.wresize(sub, 1, i32::MAX), ERR);
        assert_eq!(emulator.window_size(sub), Some((2, 2)));
    }

    #[test]
    fn test_refresh_reaches_physical_screen() {
        let (emulator, stdscr) = session(3, 6);
        emulator.wrefresh(stdscr);
        let win = emulator.newwin(1, 3, 1, 2);
        emulator.mvwaddch(win, 0, 0, b'a' as ChType);
        assert_eq!(emulator.wnoutrefresh(win), OK);
        assert_eq!(emulator.screen_line(1).as_deref(), Some("      "));
        assert_eq!(emulator.doupdate(), OK);
        assert_eq!(emulator.screen_line(1).as_deref(), Some("  a   "));

        // stdscr has nothing new, so the window stays visible.
        emulator.wrefresh(stdscr);
        emulator.wrefresh(stdscr);
        assert_eq!(emulator.screen_line(1).as_deref(), Some("  a   "));
    }

    #[test]
    fn test_redrawln_repaints_unchanged_lines() {
        let (emulator, stdscr) = session(4, 4);
        emulator.wrefresh(stdscr);
        emulator.doupdate();
        assert_eq!(emulator.last_update_lines(), 0);

        assert_eq!(emulator.wredrawln(stdscr, 1, 2), OK);
        emulator.doupdate();
        assert_eq!(emulator.last_update_lines(), 2);
        assert_eq!(emulator.wredrawln(stdscr, 3, 2), ERR);
    }

    #[test]
    fn test_wgetch_keypad_translation() {
        let (emulator, stdscr) = session(4, 4);
        emulator.noecho();
        emulator.push_key(KEY_UP);
        assert_eq!(emulator.wgetch(stdscr), 0x1b);
        assert_eq!(emulator.wgetch(stdscr), b'[' as i32);
        assert_eq!(emulator.wgetch(stdscr), b'A' as i32);

        emulator.keypad(stdscr, true);
        emulator.push_key(KEY_UP);
        assert_eq!(emulator.wgetch(stdscr), KEY_UP);
        assert_eq!(emulator.wgetch(stdscr), ERR);
    }

    #[test]
    fn test_wgetch_echo() {
        let (emulator, stdscr) = session(2, 4);
        emulator.push_str("hi");
        emulator.wgetch(stdscr);
        emulator.wgetch(stdscr);
        assert_eq!(emulator.window_line(stdscr, 0).as_deref(), Some("hi  "));
    }

    #[test]
    fn test_color_lifecycle() {
        let (emulator, _) = session(2, 2);
        assert_eq!(emulator.init_pair(1, 1, 0), ERR);
        assert!(emulator.has_colors());
        assert_eq!(emulator.start_color(), OK);
        assert_eq!((emulator.colors(), emulator.color_pairs()), (8, 64));
        assert_eq!(emulator.init_pair(1, 1, 0), OK);
        assert_eq!(emulator.pair_content(1), Some((1, 0)));
        assert_eq!(emulator.init_pair(64, 1, 0), ERR);
        assert_eq!(emulator.init_pair(2, 9, 0), ERR);
    }

    #[test]
    fn test_monochrome() {
        let emulator = Emulator::builder().monochrome().build();
        emulator.initscr();
        assert!(!emulator.has_colors());
        assert_eq!(emulator.start_color(), ERR);
    }

    #[test]
    fn test_curs_set_returns_previous() {
        let (emulator, _) = session(2, 2);
        assert_eq!(emulator.curs_set(CURS_HIDE), CURS_NORM);
        assert_eq!(emulator.curs_set(CURS_HIGH), CURS_HIDE);
        assert_eq!(emulator.curs_set(7), ERR);
        assert_eq!(emulator.cursor_visibility(), CURS_HIGH);
    }

    #[test]
    fn test_wresize_rules() {
        let (emulator, stdscr) = session(10, 10);
        let sub = emulator.derwin(stdscr, 2, 2, 5, 5);
        assert_eq!(emulator.wresize(stdscr, 5, 5), ERR);
        assert_eq!(emulator.wresize(sub, 6, 2), ERR);
        assert_eq!(emulator.wresize(sub, 5, 5), OK);
        assert_eq!(emulator.wresize(sub, 0, 5), ERR);
        assert_eq!(emulator.window_size(sub), Some((5, 5)));
    }

    #[test]
    fn test_resize_updates_globals_and_queues_event() {
        let (emulator, stdscr) = session(10, 10);
        assert_eq!(emulator.resize(20, 30), OK);
        assert_eq!((emulator.lines(), emulator.cols()), (20, 30));
        assert_eq!(emulator.window_size(stdscr), Some((20, 30)));
        emulator.keypad(stdscr, true);
        assert_eq!(emulator.wgetch(stdscr), KEY_RESIZE);
    }

    #[test]
    fn test_attributes_apply_to_writes() {
        let (emulator, stdscr) = session(2, 4);
        emulator.wattron(stdscr, A_BOLD);
        emulator.mvwaddch(stdscr, 0, 0, b'b' as ChType);
        emulator.wattroff(stdscr, A_BOLD);
        emulator.waddch(stdscr, b'n' as ChType);
        assert_eq!(emulator.mvwinch(stdscr, 0, 0), b'b' as ChType | A_BOLD);
        assert_eq!(emulator.mvwinch(stdscr, 0, 1), b'n' as ChType);
    }

    #[test]
    fn test_endwin_and_resume() {
        let (emulator, stdscr) = session(2, 2);
        emulator.cbreak();
        assert_eq!(emulator.endwin(), OK);
        assert!(emulator.is_endwin());
        assert_eq!(emulator.endwin(), ERR);
        assert!(!emulator.modes().cbreak);
        assert_eq!(emulator.initscr(), stdscr);
        assert!(!emulator.is_endwin());
    }
}
