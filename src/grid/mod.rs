//! Terminal screen buffer
//!
//! A 2D grid of cells with a bounded circular scrollback and a display
//! offset for user scrollback. The grid is deliberately not synchronized:
//! all mutation happens on the session's reader thread, and the owning
//! bridge guards access with its own lock.

use crate::cell::Cell;

mod edit;
mod erase;
mod scroll;

/// A 2D grid of terminal cells
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of columns
    pub(crate) cols: usize,
    /// Number of rows
    pub(crate) rows: usize,
    /// The grid data (row-major order)
    pub(crate) cells: Vec<Cell>,
    /// Scrollback buffer (flat Vec, row-major order like main grid)
    pub(crate) scrollback_cells: Vec<Cell>,
    /// Index of oldest line in circular scrollback buffer
    pub(crate) scrollback_start: usize,
    /// Number of lines currently in scrollback
    pub(crate) scrollback_lines: usize,
    /// Maximum scrollback lines
    pub(crate) max_scrollback: usize,
    /// How many scrollback lines the viewport is shifted up from the live
    /// grid (0 = live view). Never exceeds `scrollback_lines`.
    pub(crate) display_offset: usize,
}

impl Grid {
    /// Create a new grid with the specified dimensions
    pub fn new(cols: usize, rows: usize, max_scrollback: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            scrollback_cells: Vec::new(),
            scrollback_start: 0,
            scrollback_lines: 0,
            max_scrollback,
            display_offset: 0,
        }
    }

    /// Get the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get a reference to a cell at (col, row)
    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            Some(&self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Get a mutable reference to a cell at (col, row)
    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            Some(&mut self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set a cell at (col, row)
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(c) = self.get_mut(col, row) {
            *c = cell;
        }
    }

    /// Get a row as a slice
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Get a mutable row
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [Cell]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&mut self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Get the text content of a row (wide-char spacers skipped)
    pub fn row_text(&self, row: usize) -> String {
        match self.row(row) {
            Some(cells) => cells
                .iter()
                .filter(|cell| !cell.flags.wide_char_spacer())
                .map(|cell| cell.c)
                .collect(),
            None => String::new(),
        }
    }

    /// Number of lines currently in scrollback
    pub fn scrollback_len(&self) -> usize {
        self.scrollback_lines
    }

    /// Maximum scrollback capacity
    pub fn max_scrollback(&self) -> usize {
        self.max_scrollback
    }

    /// Get a line from scrollback by index (0 = oldest retained)
    pub fn scrollback_line(&self, index: usize) -> Option<&[Cell]> {
        if index < self.scrollback_lines {
            let physical_index = (self.scrollback_start + index) % self.max_scrollback;
            let start = physical_index * self.cols;
            Some(&self.scrollback_cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Text content of a scrollback line
    pub fn scrollback_text(&self, index: usize) -> Option<String> {
        self.scrollback_line(index).map(|cells| {
            cells
                .iter()
                .filter(|cell| !cell.flags.wide_char_spacer())
                .map(|cell| cell.c)
                .collect()
        })
    }

    /// Current viewport shift into scrollback (0 = live view)
    pub fn display_offset(&self) -> usize {
        self.display_offset
    }

    /// Shift the viewport by `delta` lines (positive = older content).
    /// Clamped to the available scrollback.
    pub fn scroll_display(&mut self, delta: isize) {
        let offset = self.display_offset as isize + delta;
        self.display_offset = offset.clamp(0, self.scrollback_lines as isize) as usize;
    }

    /// Set the viewport shift directly, clamped to the available scrollback
    pub fn set_display_offset(&mut self, offset: usize) {
        self.display_offset = offset.min(self.scrollback_lines);
    }

    /// Snap the viewport back to the live grid
    pub fn reset_display_offset(&mut self) {
        self.display_offset = 0;
    }

    /// A row as seen through the current viewport: index 0 is the top of
    /// the shifted window. Rows lifted out of scrollback come first, then
    /// live grid rows.
    pub fn visible_row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        if row < self.display_offset {
            let sb_index = self.scrollback_lines - self.display_offset + row;
            self.scrollback_line(sb_index)
        } else {
            self.row(row - self.display_offset)
        }
    }
}
