//! Per-window state and the cell operations performed through it.
//!
//! A window created by `newwin` or `initscr` owns its rows. Windows made by
//! `subwin`/`derwin` own nothing: they address a rectangle inside their
//! root's rows, so writes through either are visible in both.

use super::line::LineData;
use crate::attr::{A_ATTRIBUTES, A_CHARTEXT, A_COLOR, A_NORMAL};
use crate::types::{AttrT, ChType, ERR, OK};

const BLANK: ChType = b' ' as ChType;

/// Default border characters used when `box` is given 0.
pub const DEFAULT_VLINE: ChType = b'|' as ChType;
pub const DEFAULT_HLINE: ChType = b'-' as ChType;
pub const DEFAULT_CORNER: ChType = b'+' as ChType;

/// Bookkeeping for one live window.
#[derive(Clone, Debug)]
pub struct WinData {
    /// Arena index of the window this one was derived from.
    pub parent: Option<usize>,
    /// Arena index of the window owning the rows.
    pub root: usize,
    /// Number of live windows derived from this one.
    pub children: usize,
    /// Screen position of the upper-left corner.
    pub begy: i32,
    pub begx: i32,
    /// Offset into the root's rows.
    pub offy: i32,
    pub offx: i32,
    pub rows: i32,
    pub cols: i32,
    pub cury: i32,
    pub curx: i32,
    /// Attributes applied to every character written.
    pub attrs: AttrT,
    /// Background character and attributes.
    pub bkgd: ChType,
    pub keypad: bool,
    /// Set by `wclear`: repaint the whole screen on the next update.
    pub clear: bool,
}

impl WinData {
    /// A window owning its rows.
    pub fn root(index: usize, rows: i32, cols: i32, begy: i32, begx: i32) -> Self {
        Self {
            parent: None,
            root: index,
            children: 0,
            begy,
            begx,
            offy: 0,
            offx: 0,
            rows,
            cols,
            cury: 0,
            curx: 0,
            attrs: A_NORMAL,
            bkgd: BLANK,
            keypad: false,
            clear: false,
        }
    }

    /// A window inside `parent`, at `(y, x)` relative to it.
    pub fn derived(parent_index: usize, parent: &WinData, rows: i32, cols: i32, y: i32, x: i32) -> Self {
        Self {
            parent: Some(parent_index),
            root: parent.root,
            children: 0,
            begy: parent.begy + y,
            begx: parent.begx + x,
            offy: parent.offy + y,
            offx: parent.offx + x,
            rows,
            cols,
            cury: 0,
            curx: 0,
            attrs: parent.attrs,
            bkgd: parent.bkgd,
            keypad: parent.keypad,
            clear: false,
        }
    }

    /// Fresh rows for a root window of this size.
    pub fn new_rows(&self) -> Vec<LineData> {
        (0..self.rows)
            .map(|_| LineData::new(self.cols as usize, self.bkgd))
            .collect()
    }

    #[inline]
    pub fn owns_rows(&self) -> bool {
        self.parent.is_none()
    }
}

/// A window together with the rows it draws into.
pub struct View<'a> {
    pub win: &'a mut WinData,
    pub lines: &'a mut Vec<LineData>,
    pub tabsize: i32,
}

impl View<'_> {
    fn line(&self, y: i32) -> Option<&LineData> {
        self.lines.get((self.win.offy + y) as usize)
    }

    fn line_mut(&mut self, y: i32) -> Option<&mut LineData> {
        self.lines.get_mut((self.win.offy + y) as usize)
    }

    /// Cell at window coordinates.
    pub fn get(&self, y: i32, x: i32) -> ChType {
        let offx = self.win.offx;
        self.line(y).map_or(0, |line| line.get((offx + x) as usize))
    }

    fn set(&mut self, y: i32, x: i32, ch: ChType) {
        let offx = self.win.offx;
        if let Some(line) = self.line_mut(y) {
            line.set((offx + x) as usize, ch);
        }
    }

    /// Blank `from_x..` on row `y` with the background.
    fn blank_row(&mut self, y: i32, from_x: i32) {
        let (offx, cols, bkgd) = (self.win.offx, self.win.cols, self.win.bkgd);
        if let Some(line) = self.line_mut(y) {
            line.fill_range((offx + from_x) as usize, (offx + cols) as usize, bkgd);
        }
    }

    pub fn mv(&mut self, y: i32, x: i32) -> i32 {
        if y < 0 || y >= self.win.rows || x < 0 || x >= self.win.cols {
            return ERR;
        }
        self.win.cury = y;
        self.win.curx = x;
        OK
    }

    /// Merge a character with the window attributes and background.
    pub fn render(&self, ch: ChType) -> ChType {
        let bkgd = self.win.bkgd;
        let mut c = ch & A_CHARTEXT;
        let mut attr = ch & A_ATTRIBUTES;

        if c == BLANK && attr == A_NORMAL {
            c = bkgd & A_CHARTEXT;
        }

        // An explicit color on the character wins over the window's.
        attr |= if attr & A_COLOR != 0 {
            self.win.attrs & !A_COLOR
        } else {
            self.win.attrs
        };

        let bkgd_attr = bkgd & A_ATTRIBUTES;
        if attr & A_COLOR == 0 {
            attr |= bkgd_attr & A_COLOR;
        }
        c | attr | (bkgd_attr & !A_COLOR)
    }

    /// `waddch`: write at the cursor and advance.
    pub fn addch(&mut self, ch: ChType) -> i32 {
        match (ch & A_CHARTEXT) as u8 {
            b'\n' => {
                self.clrtoeol();
                if self.win.cury + 1 < self.win.rows {
                    self.win.cury += 1;
                    self.win.curx = 0;
                    OK
                } else {
                    ERR
                }
            }
            b'\r' => {
                self.win.curx = 0;
                OK
            }
            b'\x08' => {
                if self.win.curx > 0 {
                    self.win.curx -= 1;
                }
                OK
            }
            b'\t' => {
                let tab = if self.tabsize > 0 { self.tabsize } else { 8 };
                let next_stop = (self.win.curx / tab + 1) * tab;
                let spaces = next_stop.min(self.win.cols) - self.win.curx;
                for _ in 0..spaces.max(1) {
                    if self.addch(BLANK | (ch & A_ATTRIBUTES)) == ERR {
                        return ERR;
                    }
                }
                OK
            }
            _ => {
                let cell = self.render(ch);
                let (y, x) = (self.win.cury, self.win.curx);
                self.set(y, x, cell);
                self.advance()
            }
        }
    }

    /// Move past the cell just written. Fails at the bottom-right corner.
    fn advance(&mut self) -> i32 {
        self.win.curx += 1;
        if self.win.curx < self.win.cols {
            return OK;
        }
        if self.win.cury + 1 < self.win.rows {
            self.win.cury += 1;
            self.win.curx = 0;
            OK
        } else {
            self.win.curx = self.win.cols - 1;
            ERR
        }
    }

    pub fn clrtoeol(&mut self) {
        let (y, x) = (self.win.cury, self.win.curx);
        self.blank_row(y, x);
    }

    pub fn clrtobot(&mut self) {
        self.clrtoeol();
        for y in self.win.cury + 1..self.win.rows {
            self.blank_row(y, 0);
        }
    }

    pub fn erase(&mut self) {
        for y in 0..self.win.rows {
            self.blank_row(y, 0);
        }
        self.win.cury = 0;
        self.win.curx = 0;
    }

    /// `box`: border along the window edges. Zero selects the defaults.
    pub fn border(&mut self, verch: ChType, horch: ChType) {
        let vline = self.render(if verch == 0 { DEFAULT_VLINE } else { verch });
        let hline = self.render(if horch == 0 { DEFAULT_HLINE } else { horch });
        let corner = self.render(DEFAULT_CORNER);
        let (maxy, maxx) = (self.win.rows - 1, self.win.cols - 1);

        for x in 0..=maxx {
            self.set(0, x, hline);
            self.set(maxy, x, hline);
        }
        for y in 0..=maxy {
            self.set(y, 0, vline);
            self.set(y, maxx, vline);
        }
        for (y, x) in [(0, 0), (0, maxx), (maxy, 0), (maxy, maxx)] {
            self.set(y, x, corner);
        }
    }

    /// `wbkgd`: install a new background and reapply it to every cell.
    pub fn bkgd(&mut self, ch: ChType) {
        let ch = if ch & A_CHARTEXT == 0 { ch | BLANK } else { ch };
        let old = self.win.bkgd;
        self.win.bkgd = ch;

        let (old_char, old_attr) = (old & A_CHARTEXT, old & A_ATTRIBUTES);
        let (new_char, new_attr) = (ch & A_CHARTEXT, ch & A_ATTRIBUTES);

        for y in 0..self.win.rows {
            for x in 0..self.win.cols {
                let cell = self.get(y, x);
                let cell_char = cell & A_CHARTEXT;
                let updated_char = if cell_char == old_char { new_char } else { cell_char };
                let updated_attr = ((cell & A_ATTRIBUTES) & !old_attr) | new_attr;
                self.set(y, x, updated_char | updated_attr);
            }
        }
    }

    /// Change the window size. Rows are reallocated only for root windows;
    /// the caller has checked that a derived window still fits its parent.
    pub fn resize(&mut self, rows: i32, cols: i32) {
        let bkgd = self.win.bkgd;
        if self.win.owns_rows() {
            self.lines
                .resize_with(rows as usize, || LineData::new(cols as usize, bkgd));
            for line in self.lines.iter_mut() {
                line.resize(cols as usize, bkgd);
            }
        }
        self.win.rows = rows;
        self.win.cols = cols;
        self.win.cury = self.win.cury.min(rows - 1);
        self.win.curx = self.win.curx.min(cols - 1);
        self.touch();
    }

    /// Mark every cell of the window as changed.
    pub fn touch(&mut self) {
        let (offx, cols) = (self.win.offx, self.win.cols);
        for y in 0..self.win.rows {
            if let Some(line) = self.line_mut(y) {
                line.touch_range(offx as usize, (offx + cols) as usize);
            }
        }
    }

    /// Whether any cell inside the window changed since its last refresh.
    pub fn is_touched(&self) -> bool {
        let (left, right) = (self.win.offx as usize, (self.win.offx + self.win.cols) as usize);
        (0..self.win.rows).any(|y| {
            self.line(y)
                .and_then(LineData::changed_range)
                .is_some_and(|(first, last)| first < right && last >= left)
        })
    }

    /// Characters of row `y`, attributes stripped.
    pub fn row_text(&self, y: i32) -> Option<String> {
        self.line(y)?;
        Some(
            (0..self.win.cols)
                .map(|x| (self.get(y, x) & A_CHARTEXT) as u8 as char)
                .collect(),
        )
    }
}
