//! One row of cells with change tracking.
//!
//! The changed range is what `wnoutrefresh` copies into the virtual screen.

use crate::types::ChType;

/// Marker for "no change" in the tracked range.
const NOCHANGE: i32 = -1;

/// A single row of window or screen cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineData {
    text: Vec<ChType>,
    /// First changed column, or `NOCHANGE`.
    firstchar: i32,
    /// Last changed column.
    lastchar: i32,
}

impl LineData {
    /// Create a line of `width` cells filled with `fill`, fully touched.
    pub fn new(width: usize, fill: ChType) -> Self {
        let mut line = Self {
            text: vec![fill; width],
            firstchar: NOCHANGE,
            lastchar: NOCHANGE,
        };
        line.touch();
        line
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.text.len()
    }

    /// The changed column range, inclusive.
    pub fn changed_range(&self) -> Option<(usize, usize)> {
        if self.firstchar == NOCHANGE {
            None
        } else {
            Some((self.firstchar as usize, self.lastchar as usize))
        }
    }

    /// Mark the entire line as changed.
    pub fn touch(&mut self) {
        if self.text.is_empty() {
            self.untouch();
        } else {
            self.firstchar = 0;
            self.lastchar = self.text.len() as i32 - 1;
        }
    }

    /// Mark `start..end` as changed.
    pub fn touch_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.text.len());
        if start < end {
            self.mark_changed(start);
            self.mark_changed(end - 1);
        }
    }

    pub fn untouch(&mut self) {
        self.firstchar = NOCHANGE;
        self.lastchar = NOCHANGE;
    }

    #[inline]
    fn mark_changed(&mut self, x: usize) {
        let x = x as i32;
        if self.firstchar == NOCHANGE {
            self.firstchar = x;
            self.lastchar = x;
        } else {
            self.firstchar = self.firstchar.min(x);
            self.lastchar = self.lastchar.max(x);
        }
    }

    /// Cell at `x`, or 0 past the end.
    #[inline]
    pub fn get(&self, x: usize) -> ChType {
        self.text.get(x).copied().unwrap_or(0)
    }

    /// Store a cell; writes past the end are dropped.
    #[inline]
    pub fn set(&mut self, x: usize, ch: ChType) {
        if x < self.text.len() {
            self.text[x] = ch;
            self.mark_changed(x);
        }
    }

    pub fn text(&self) -> &[ChType] {
        &self.text
    }

    /// Fill `start..end` with `ch`.
    pub fn fill_range(&mut self, start: usize, end: usize, ch: ChType) {
        let end = end.min(self.text.len());
        if start >= end {
            return;
        }
        self.text[start..end].fill(ch);
        self.mark_changed(start);
        self.mark_changed(end - 1);
    }

    /// Replace the whole content with `other`'s.
    pub fn copy_from(&mut self, other: &LineData) {
        let len = self.text.len().min(other.text.len());
        self.text[..len].copy_from_slice(&other.text[..len]);
        self.touch();
    }

    /// Change the width, padding with `fill`.
    pub fn resize(&mut self, new_width: usize, fill: ChType) {
        self.text.resize(new_width, fill);
        self.touch();
    }
}
