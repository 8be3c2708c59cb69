//! Scrolling and resize logic for the screen buffer

use crate::cell::Cell;
use crate::grid::Grid;

impl Grid {
    /// Append one grid row to the circular scrollback, evicting the oldest
    /// line once capacity is reached.
    fn push_scrollback(&mut self, src_start: usize) {
        if self.max_scrollback == 0 {
            return;
        }
        let src_end = src_start + self.cols;
        let physical = (self.scrollback_start + self.scrollback_lines) % self.max_scrollback;
        let dst_start = physical * self.cols;
        if dst_start == self.scrollback_cells.len() {
            // Storage still growing sequentially
            let row: Vec<Cell> = self.cells[src_start..src_end].to_vec();
            self.scrollback_cells.extend_from_slice(&row);
        } else {
            for j in 0..self.cols {
                self.scrollback_cells[dst_start + j] = self.cells[src_start + j];
            }
        }
        if self.scrollback_lines < self.max_scrollback {
            self.scrollback_lines += 1;
        } else {
            self.scrollback_start = (self.scrollback_start + 1) % self.max_scrollback;
        }
    }

    /// Remove and return the newest scrollback line, if any
    fn pop_scrollback(&mut self) -> Option<Vec<Cell>> {
        if self.scrollback_lines == 0 {
            return None;
        }
        let index = self.scrollback_lines - 1;
        let physical = (self.scrollback_start + index) % self.max_scrollback;
        let start = physical * self.cols;
        let line = self.scrollback_cells[start..start + self.cols].to_vec();
        self.scrollback_lines -= 1;
        if start + self.cols == self.scrollback_cells.len() {
            self.scrollback_cells.truncate(start);
        }
        Some(line)
    }

    /// Scroll the full screen up by n lines; evicted top rows enter
    /// scrollback (bounded, oldest-first discarded).
    pub fn scroll_up(&mut self, n: usize) {
        let n = n.min(self.rows);

        for i in 0..n {
            self.push_scrollback(i * self.cols);
        }

        for i in n..self.rows {
            let src_start = i * self.cols;
            let dst_start = (i - n) * self.cols;
            for j in 0..self.cols {
                self.cells[dst_start + j] = self.cells[src_start + j];
            }
        }

        for i in (self.rows - n)..self.rows {
            self.clear_row(i);
        }
    }

    /// Scroll the full screen down by n lines (top rows blanked, bottom
    /// rows discarded — never into scrollback).
    pub fn scroll_down(&mut self, n: usize) {
        let n = n.min(self.rows);

        for i in (n..self.rows).rev() {
            let src_start = (i - n) * self.cols;
            let dst_start = i * self.cols;
            for j in 0..self.cols {
                self.cells[dst_start + j] = self.cells[src_start + j];
            }
        }

        for i in 0..n {
            self.clear_row(i);
        }
    }

    /// Scroll up within a region. Rows scrolled out of a restricted region
    /// are discarded; only a full-screen region feeds scrollback. Returns
    /// `false` if parameters are invalid.
    pub fn scroll_region_up(&mut self, n: usize, top: usize, bottom: usize) -> bool {
        if top >= self.rows || bottom >= self.rows || top > bottom {
            tracing::trace!(top, bottom, rows = self.rows, "invalid scroll region up");
            return false;
        }

        let region_size = bottom - top + 1;
        let n = n.min(region_size);

        if top == 0 && bottom == self.rows - 1 && self.max_scrollback > 0 {
            self.scroll_up(n);
            return true;
        }

        if n >= region_size {
            for i in top..=bottom {
                self.clear_row(i);
            }
            return true;
        }

        for i in top..=(bottom - n) {
            let src_start = (i + n) * self.cols;
            let dst_start = i * self.cols;
            for j in 0..self.cols {
                self.cells[dst_start + j] = self.cells[src_start + j];
            }
        }

        for i in (bottom - n + 1)..=bottom {
            self.clear_row(i);
        }
        true
    }

    /// Scroll down within a region. Returns `false` if parameters are invalid.
    pub fn scroll_region_down(&mut self, n: usize, top: usize, bottom: usize) -> bool {
        if top >= self.rows || bottom >= self.rows || top > bottom {
            tracing::trace!(top, bottom, rows = self.rows, "invalid scroll region down");
            return false;
        }

        let region_size = bottom - top + 1;
        let n = n.min(region_size);

        if n >= region_size {
            for i in top..=bottom {
                self.clear_row(i);
            }
            return true;
        }

        for i in ((top + n)..=bottom).rev() {
            let src_start = (i - n) * self.cols;
            let dst_start = i * self.cols;
            for j in 0..self.cols {
                self.cells[dst_start + j] = self.cells[src_start + j];
            }
        }

        for i in top..(top + n) {
            self.clear_row(i);
        }
        true
    }

    /// Resize the grid. Column changes truncate or pad rows in place (no
    /// rewrap); row changes donate rows to / absorb rows from scrollback so
    /// on-screen content keeps its position relative to the bottom.
    ///
    /// Returns the number of rows the visible content shifted: positive
    /// means rows were pulled down out of scrollback (cursor should move
    /// down), negative means top rows were pushed into scrollback (cursor
    /// should move up).
    pub fn resize(&mut self, new_cols: usize, new_rows: usize) -> isize {
        if new_cols == 0 || new_rows == 0 || (new_cols == self.cols && new_rows == self.rows) {
            return 0;
        }

        if new_cols != self.cols {
            self.rewidth(new_cols);
        }

        let mut shift: isize = 0;
        if new_rows < self.rows {
            // Donate top rows to scrollback, preferring to drop blank
            // bottom rows first so short content is not pushed out of view.
            let mut excess = self.rows - new_rows;
            while excess > 0 && self.bottom_row_is_blank() {
                self.rows -= 1;
                self.cells.truncate(self.rows * self.cols);
                excess -= 1;
            }
            for _ in 0..excess {
                self.push_scrollback(0);
                self.cells.drain(0..self.cols);
                self.rows -= 1;
                shift -= 1;
            }
        } else if new_rows > self.rows {
            // Absorb rows back out of scrollback at the top
            let mut want = new_rows - self.rows;
            while want > 0 {
                match self.pop_scrollback() {
                    Some(line) => {
                        self.cells.splice(0..0, line);
                        self.rows += 1;
                        shift += 1;
                        want -= 1;
                    }
                    None => break,
                }
            }
        }

        // Pad (or finish truncating) to the exact target size
        self.rows = new_rows;
        self.cells.resize(new_rows * self.cols, Cell::default());
        self.display_offset = self.display_offset.min(self.scrollback_lines);
        shift
    }

    fn bottom_row_is_blank(&self) -> bool {
        if self.rows == 0 {
            return false;
        }
        let start = (self.rows - 1) * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|c| c.is_empty())
    }

    /// Truncate or pad every stored row (grid and scrollback) to a new width
    fn rewidth(&mut self, new_cols: usize) {
        let old_cols = self.cols;

        let mut new_cells = Vec::with_capacity(new_cols * self.rows);
        for row in 0..self.rows {
            let start = row * old_cols;
            for col in 0..new_cols {
                if col < old_cols {
                    new_cells.push(self.cells[start + col]);
                } else {
                    new_cells.push(Cell::default());
                }
            }
        }
        self.cells = new_cells;

        // Linearize the circular scrollback at the new width
        let mut new_sb = Vec::with_capacity(new_cols * self.scrollback_lines);
        for i in 0..self.scrollback_lines {
            let physical = (self.scrollback_start + i) % self.max_scrollback;
            let start = physical * old_cols;
            for col in 0..new_cols {
                if col < old_cols {
                    new_sb.push(self.scrollback_cells[start + col]);
                } else {
                    new_sb.push(Cell::default());
                }
            }
        }
        self.scrollback_cells = new_sb;
        self.scrollback_start = 0;
        self.cols = new_cols;
    }
}
