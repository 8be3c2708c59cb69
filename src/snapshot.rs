//! Render snapshot: the read contract between the session layer and a
//! renderer. A snapshot is a deep copy taken under the bridge lock, so the
//! renderer never touches live state and always sees a chunk-consistent
//! screen.

use crate::cell::Cell;
use crate::cursor::Cursor;
use crate::interpreter::Interpreter;

/// Immutable copy of everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// Row-major `rows * cols` cells of the *visible* window, honoring the
    /// current display offset into scrollback.
    pub cells: Vec<Cell>,
    /// Cursor in live-grid coordinates. Hidden while scrolled back or when
    /// the application turned it off.
    pub cursor: Cursor,
    pub title: String,
    /// Lines currently held in scrollback.
    pub scrollback_len: usize,
    /// How far the view is scrolled back (0 = live view).
    pub display_offset: usize,
    /// True when the alternate screen is in use (scrollback frozen).
    pub alt_screen: bool,
    /// Whether the cursor should blink.
    pub cursor_blink: bool,
    /// BEL count since session start, for visual-bell rendering.
    pub bell_count: u64,
}

impl RenderSnapshot {
    /// Capture the current visible state of an interpreter.
    pub fn capture(term: &Interpreter) -> Self {
        let (cols, rows) = term.size();
        let grid = term.active_grid();
        let offset = grid.display_offset();

        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            match grid.visible_row(row) {
                Some(r) => cells.extend_from_slice(r),
                None => cells.resize(cells.len() + cols, Cell::default()),
            }
        }

        let mut cursor = *term.cursor();
        if offset > 0 {
            cursor.visible = false;
        }

        Self {
            cols,
            rows,
            cells,
            cursor,
            title: term.title().to_string(),
            scrollback_len: grid.scrollback_len(),
            display_offset: offset,
            alt_screen: term.is_alt_screen_active(),
            cursor_blink: term.cursor_blink(),
            bell_count: term.bell_count(),
        }
    }

    /// Cell at visible position, if in bounds.
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Plain text of one visible row, wide-char spacers skipped.
    pub fn row_text(&self, row: usize) -> String {
        let mut out = String::with_capacity(self.cols);
        for col in 0..self.cols {
            if let Some(cell) = self.cell(col, row) {
                if !cell.flags.wide_char_spacer() {
                    out.push(cell.c);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_copies_visible_screen() {
        let mut term = Interpreter::new(10, 3);
        term.process(b"hi\r\nthere");

        let snap = RenderSnapshot::capture(&term);
        assert_eq!((snap.cols, snap.rows), (10, 3));
        assert_eq!(snap.row_text(0).trim_end(), "hi");
        assert_eq!(snap.row_text(1).trim_end(), "there");
        assert_eq!((snap.cursor.col, snap.cursor.row), (5, 1));
        assert!(snap.cursor.visible);
    }

    #[test]
    fn test_capture_is_detached_from_live_state() {
        let mut term = Interpreter::new(10, 2);
        term.process(b"before");
        let snap = RenderSnapshot::capture(&term);
        term.process(b"\x1b[2J\x1b[Hafter");

        assert_eq!(snap.row_text(0).trim_end(), "before");
    }

    #[test]
    fn test_scrolled_back_view_hides_cursor() {
        let mut term = Interpreter::new(10, 2);
        term.process(b"a\r\nb\r\nc\r\nd");
        term.scroll_display(2);

        let snap = RenderSnapshot::capture(&term);
        assert_eq!(snap.display_offset, 2);
        assert!(!snap.cursor.visible);
        // Window shows the oldest lines
        assert_eq!(snap.row_text(0).trim_end(), "a");
        assert_eq!(snap.row_text(1).trim_end(), "b");
    }

    #[test]
    fn test_wide_chars_render_once() {
        let mut term = Interpreter::new(10, 1);
        term.process("中x".as_bytes());

        let snap = RenderSnapshot::capture(&term);
        assert_eq!(snap.row_text(0).trim_end(), "中x");
        assert_eq!(snap.cell(0, 0).map(|c| c.width), Some(2));
    }
}
