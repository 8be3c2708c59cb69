//! Character and line editing operations for the screen buffer

use crate::grid::Grid;

impl Grid {
    /// Insert n blank lines at row, pushing lines below toward the scroll
    /// bottom (lines shifted past it are discarded)
    pub fn insert_lines(&mut self, n: usize, row: usize, scroll_bottom: usize) {
        if row >= self.rows || row > scroll_bottom {
            return;
        }
        let bottom = scroll_bottom.min(self.rows - 1);
        let n = n.min(bottom - row + 1);
        if n == 0 {
            return;
        }

        if row + n <= bottom {
            for i in (row..=(bottom - n)).rev() {
                let src_start = i * self.cols;
                let dst_start = (i + n) * self.cols;
                for j in 0..self.cols {
                    self.cells[dst_start + j] = self.cells[src_start + j];
                }
            }
        }

        for i in row..(row + n) {
            self.clear_row(i);
        }
    }

    /// Delete n lines at row, pulling lines up from the scroll bottom and
    /// blanking the vacated rows
    pub fn delete_lines(&mut self, n: usize, row: usize, scroll_bottom: usize) {
        if row >= self.rows || row > scroll_bottom {
            return;
        }
        let bottom = scroll_bottom.min(self.rows - 1);
        let n = n.min(bottom - row + 1);
        if n == 0 {
            return;
        }

        if row + n <= bottom {
            for i in row..=(bottom - n) {
                let src_start = (i + n) * self.cols;
                let dst_start = i * self.cols;
                for j in 0..self.cols {
                    self.cells[dst_start + j] = self.cells[src_start + j];
                }
            }
        }

        for i in (bottom + 1 - n)..=bottom {
            self.clear_row(i);
        }
    }

    /// Insert n blank characters at position, shifting the rest of the row
    /// right (characters shifted past the margin are discarded)
    pub fn insert_chars(&mut self, col: usize, row: usize, n: usize) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let n = n.min(self.cols - col);
        let cols = self.cols;

        if let Some(row_cells) = self.row_mut(row) {
            for i in ((col + n)..cols).rev() {
                row_cells[i] = row_cells[i - n];
            }
            for cell in row_cells.iter_mut().skip(col).take(n) {
                cell.reset();
            }
        }
    }

    /// Delete n characters at position, pulling the rest of the row left and
    /// blanking the tail
    pub fn delete_chars(&mut self, col: usize, row: usize, n: usize) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let n = n.min(self.cols - col);
        let cols = self.cols;

        if let Some(row_cells) = self.row_mut(row) {
            for i in col..(cols - n) {
                row_cells[i] = row_cells[i + n];
            }
            for cell in row_cells.iter_mut().skip(cols - n).take(n) {
                cell.reset();
            }
        }
    }
}
