//! Cursor state for the terminal grid.

use serde::{Deserialize, Serialize};

/// Terminal cursor: position, visibility, and movement helpers.
///
/// Positions are 0-indexed. `col` may transiently equal the column count
/// while a wrap is pending; the interpreter resolves that before the next
/// write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column (0-indexed)
    pub col: usize,
    /// Row (0-indexed)
    pub row: usize,
    /// Whether the cursor should be drawn
    pub visible: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            col: 0,
            row: 0,
            visible: true,
        }
    }

    /// Move to an absolute position (caller clamps to screen bounds)
    pub fn goto(&mut self, col: usize, row: usize) {
        self.col = col;
        self.row = row;
    }

    pub fn move_up(&mut self, n: usize) {
        self.row = self.row.saturating_sub(n);
    }

    pub fn move_down(&mut self, n: usize, max_row: usize) {
        self.row = (self.row + n).min(max_row);
    }

    pub fn move_left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n);
    }

    pub fn move_right(&mut self, n: usize, max_col: usize) {
        self.col = (self.col + n).min(max_col);
    }
}

/// Saved-cursor slot for DECSC/DECRC: position plus the attribute state
/// active at save time.
#[derive(Debug, Clone, Copy)]
pub struct SavedCursor {
    pub cursor: Cursor,
    pub fg: crate::cell::Color,
    pub bg: crate::cell::Color,
    pub flags: crate::cell::CellFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_saturates_at_origin() {
        let mut cursor = Cursor::new();
        cursor.move_up(5);
        cursor.move_left(5);
        assert_eq!((cursor.col, cursor.row), (0, 0));
    }

    #[test]
    fn movement_clamps_to_bounds() {
        let mut cursor = Cursor::new();
        cursor.move_down(100, 23);
        cursor.move_right(100, 79);
        assert_eq!((cursor.col, cursor.row), (79, 23));
    }
}
