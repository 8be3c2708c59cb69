//! VT100/xterm escape sequence interpreter
//!
//! Owns the screen state (primary and alternate grids, cursor, attributes,
//! modes) and advances it by parsing a byte stream through a persistent
//! [`vte::Parser`]. The parser instance survives across `process()` calls,
//! so escape sequences split arbitrarily over transport reads resolve to
//! the same state as a single contiguous read.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, CellFlags, Color};
use crate::cursor::{Cursor, SavedCursor};
use crate::grid::Grid;
use crate::input::{ModeSnapshot, MouseEncoding, MouseMode};

mod csi;
mod esc;
mod osc;
mod perform;

pub struct Interpreter {
    /// The primary terminal grid
    grid: Grid,
    /// Alternate screen grid (no scrollback)
    alt_grid: Grid,
    /// Whether the alternate screen is active
    alt_screen_active: bool,
    /// Cursor position and state
    pub(crate) cursor: Cursor,
    /// Parked cursor for the inactive screen
    alt_cursor: Cursor,
    /// Current foreground color
    pub(crate) fg: Color,
    /// Current background color
    pub(crate) bg: Color,
    /// Current cell flags
    pub(crate) flags: CellFlags,
    /// DECSC/DECRC slot for the primary screen
    saved_cursor: Option<SavedCursor>,
    /// DECSC/DECRC slot for the alternate screen
    alt_saved_cursor: Option<SavedCursor>,
    /// Window title (OSC 0/2)
    title: String,
    /// Mouse tracking mode
    pub(crate) mouse_mode: MouseMode,
    /// Mouse report encoding
    pub(crate) mouse_encoding: MouseEncoding,
    /// Bracketed paste mode (DECSET 2004)
    pub(crate) bracketed_paste: bool,
    /// Blinking cursor (DECSET 12)
    pub(crate) cursor_blink: bool,
    /// Application cursor keys (DECCKM)
    pub(crate) application_cursor: bool,
    /// Application keypad (DECKPAM/DECKPNM)
    pub(crate) application_keypad: bool,
    /// Origin mode (DECOM), cursor addressing relative to the scroll region
    pub(crate) origin_mode: bool,
    /// Auto wrap mode (DECAWM)
    pub(crate) auto_wrap: bool,
    /// Insert mode (IRM)
    pub(crate) insert_mode: bool,
    /// Line feed/new line mode (LNM)
    pub(crate) newline_mode: bool,
    /// Tab stops (columns where tab stops are set)
    pub(crate) tab_stops: Vec<bool>,
    /// Scroll region top (0-indexed, inclusive)
    pub(crate) scroll_region_top: usize,
    /// Scroll region bottom (0-indexed, inclusive)
    pub(crate) scroll_region_bottom: usize,
    /// DECAWM delayed wrap: set after printing in the last column
    pub(crate) pending_wrap: bool,
    /// VTE parser instance (maintains state across process() calls)
    parser: vte::Parser,
    /// Responses queued for the remote side (DSR/DA replies)
    pub(crate) response_buffer: Vec<u8>,
    /// Sequences received but not understood, discarded silently
    unhandled_sequences: u64,
    /// BEL characters received
    bell_count: u64,
}

impl Interpreter {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_scrollback(cols, rows, 10_000)
    }

    /// Create an interpreter with a custom scrollback capacity.
    ///
    /// Dimensions are clamped to at least one column and one row; a
    /// zero-sized screen has no well-defined cursor position.
    pub fn with_scrollback(cols: usize, rows: usize, scrollback: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut tab_stops = vec![false; cols];
        for i in (0..cols).step_by(8) {
            tab_stops[i] = true;
        }

        Self {
            grid: Grid::new(cols, rows, scrollback),
            alt_grid: Grid::new(cols, rows, 0),
            alt_screen_active: false,
            cursor: Cursor::new(),
            alt_cursor: Cursor::new(),
            fg: Color::Default,
            bg: Color::Default,
            flags: CellFlags::default(),
            saved_cursor: None,
            alt_saved_cursor: None,
            title: String::new(),
            mouse_mode: MouseMode::Off,
            mouse_encoding: MouseEncoding::Default,
            bracketed_paste: false,
            cursor_blink: false,
            application_cursor: false,
            application_keypad: false,
            origin_mode: false,
            auto_wrap: true,
            insert_mode: false,
            newline_mode: false,
            tab_stops,
            scroll_region_top: 0,
            scroll_region_bottom: rows.saturating_sub(1),
            pending_wrap: false,
            parser: vte::Parser::new(),
            response_buffer: Vec::new(),
            unhandled_sequences: 0,
            bell_count: 0,
        }
    }

    /// Feed transport bytes through the parser.
    ///
    /// The persistent parser keeps partial-sequence state between calls, so
    /// a sequence split across reads lands identically to an unsplit one.
    pub fn process(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        // New output snaps a scrolled-back viewport to the live screen
        self.grid.reset_display_offset();
        // Take ownership of the parser to avoid aliasing self
        let mut parser = std::mem::replace(&mut self.parser, vte::Parser::new());
        parser.advance(self, data);
        self.parser = parser;
    }

    /// Get the active grid (primary or alternate based on current mode)
    pub fn active_grid(&self) -> &Grid {
        if self.alt_screen_active {
            &self.alt_grid
        } else {
            &self.grid
        }
    }

    pub(crate) fn active_grid_mut(&mut self) -> &mut Grid {
        if self.alt_screen_active {
            &mut self.alt_grid
        } else {
            &mut self.grid
        }
    }

    /// The primary grid (always holds the scrollback)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Terminal dimensions as (cols, rows)
    pub fn size(&self) -> (usize, usize) {
        (self.grid.cols(), self.grid.rows())
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn is_alt_screen_active(&self) -> bool {
        self.alt_screen_active
    }

    /// Count of escape sequences received but not understood
    pub fn unhandled_sequences(&self) -> u64 {
        self.unhandled_sequences
    }

    pub(crate) fn count_unhandled(&mut self) {
        self.unhandled_sequences = self.unhandled_sequences.wrapping_add(1);
    }

    /// BEL characters received since creation
    pub fn bell_count(&self) -> u64 {
        self.bell_count
    }

    /// Whether the application asked for a blinking cursor (DECSET 12)
    pub fn cursor_blink(&self) -> bool {
        self.cursor_blink
    }

    pub(crate) fn ring_bell(&mut self) {
        self.bell_count = self.bell_count.wrapping_add(1);
    }

    /// Drain queued replies (DSR/DA) destined for the remote program
    pub fn take_responses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.response_buffer)
    }

    pub(crate) fn push_response(&mut self, bytes: &[u8]) {
        self.response_buffer.extend_from_slice(bytes);
    }

    /// Input-affecting modes, for the key/mouse/paste encoders
    pub fn mode_snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            application_cursor: self.application_cursor,
            application_keypad: self.application_keypad,
            bracketed_paste: self.bracketed_paste,
            newline_mode: self.newline_mode,
            mouse_mode: self.mouse_mode,
            mouse_encoding: self.mouse_encoding,
        }
    }

    /// Resize both screens. Row changes exchange lines with the primary
    /// scrollback; the cursor follows its content.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if cols == 0 || rows == 0 || (cols, rows) == self.size() {
            return;
        }

        let shift = self.grid.resize(cols, rows);
        self.alt_grid.resize(cols, rows);
        tracing::debug!(cols, rows, shift, "terminal resized");

        self.tab_stops = vec![false; cols];
        for i in (0..cols).step_by(8) {
            self.tab_stops[i] = true;
        }

        // Stale regions cause rendering artifacts after a resize; programs
        // re-issue DECSTBM if they need one
        self.scroll_region_top = 0;
        self.scroll_region_bottom = rows.saturating_sub(1);

        if !self.alt_screen_active {
            let row = self.cursor.row as isize + shift;
            self.cursor.row = row.clamp(0, rows as isize - 1) as usize;
        }
        self.cursor.col = self.cursor.col.min(cols.saturating_sub(1));
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
        self.alt_cursor.col = self.alt_cursor.col.min(cols.saturating_sub(1));
        self.alt_cursor.row = self.alt_cursor.row.min(rows.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Save cursor position and attributes (DECSC)
    pub(crate) fn save_cursor(&mut self) {
        let saved = SavedCursor {
            cursor: self.cursor,
            fg: self.fg,
            bg: self.bg,
            flags: self.flags,
        };
        if self.alt_screen_active {
            self.alt_saved_cursor = Some(saved);
        } else {
            self.saved_cursor = Some(saved);
        }
    }

    /// Restore cursor position and attributes (DECRC); no-op without a save
    pub(crate) fn restore_cursor(&mut self) {
        let slot = if self.alt_screen_active {
            self.alt_saved_cursor
        } else {
            self.saved_cursor
        };
        if let Some(saved) = slot {
            let (cols, rows) = self.size();
            self.cursor = saved.cursor;
            self.cursor.col = self.cursor.col.min(cols.saturating_sub(1));
            self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
            self.fg = saved.fg;
            self.bg = saved.bg;
            self.flags = saved.flags;
            self.pending_wrap = false;
        }
    }

    /// Switch to the alternate screen (DECSET 1049 path)
    pub(crate) fn use_alt_screen(&mut self) {
        if !self.alt_screen_active {
            let primary_cursor = self.cursor;
            self.alt_screen_active = true;
            self.cursor = self.alt_cursor;
            self.alt_cursor = primary_cursor;
            self.alt_grid.clear();
            self.cursor.goto(0, 0);
            self.pending_wrap = false;
        }
    }

    /// Switch back to the primary screen; its content and scrollback are
    /// untouched by alternate-screen output
    pub(crate) fn use_primary_screen(&mut self) {
        if self.alt_screen_active {
            let alt_cursor = self.cursor;
            self.alt_screen_active = false;
            self.cursor = self.alt_cursor;
            self.alt_cursor = alt_cursor;
            self.pending_wrap = false;
        }
    }

    /// Reset to initial state (RIS)
    pub(crate) fn reset(&mut self) {
        let (cols, rows) = self.size();

        self.grid.clear();
        self.alt_grid.clear();
        self.alt_screen_active = false;
        self.cursor = Cursor::new();
        self.alt_cursor = Cursor::new();
        self.fg = Color::Default;
        self.bg = Color::Default;
        self.flags = CellFlags::default();
        self.saved_cursor = None;
        self.alt_saved_cursor = None;
        self.mouse_mode = MouseMode::Off;
        self.mouse_encoding = MouseEncoding::Default;
        self.bracketed_paste = false;
        self.cursor_blink = false;
        self.application_cursor = false;
        self.application_keypad = false;
        self.origin_mode = false;
        self.auto_wrap = true;
        self.insert_mode = false;
        self.newline_mode = false;
        self.scroll_region_top = 0;
        self.scroll_region_bottom = rows.saturating_sub(1);
        self.pending_wrap = false;
        self.response_buffer.clear();

        self.tab_stops = vec![false; cols];
        for i in (0..cols).step_by(8) {
            self.tab_stops[i] = true;
        }
    }

    /// Write a single character at the cursor, handling the C0 controls
    /// the print path routes here
    pub(crate) fn write_char(&mut self, c: char) {
        match c {
            '\r' => {
                self.cursor.col = 0;
                self.pending_wrap = false;
            }
            '\n' | '\x0b' | '\x0c' => {
                self.linefeed();
                if self.newline_mode {
                    self.cursor.col = 0;
                }
            }
            '\t' => self.horizontal_tab(),
            '\x08' => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
                self.pending_wrap = false;
            }
            _ => self.print_char(c),
        }
    }

    fn print_char(&mut self, c: char) {
        let width = c.width().unwrap_or(1);
        if width == 0 {
            // Combining marks are not merged into the previous cell
            return;
        }

        let (cols, rows) = self.size();
        if cols == 0 || rows == 0 {
            return;
        }

        if self.pending_wrap {
            self.pending_wrap = false;
            if self.auto_wrap {
                self.cursor.col = 0;
                self.linefeed();
            }
        }

        // A wide glyph that cannot fit in the remaining columns wraps early
        if width == 2 && self.cursor.col + 2 > cols {
            if self.auto_wrap {
                self.cursor.col = 0;
                self.linefeed();
            } else {
                self.cursor.col = cols.saturating_sub(2);
            }
        }

        let col = self.cursor.col;
        let row = self.cursor.row;

        if self.insert_mode {
            self.active_grid_mut().insert_chars(col, row, width);
        }

        let cell = Cell::new(c, width as u8, self.fg, self.bg, self.flags);
        self.active_grid_mut().set(col, row, cell);
        if width == 2 {
            let spacer = Cell::wide_spacer(self.fg, self.bg);
            self.active_grid_mut().set(col + 1, row, spacer);
        }

        if col + width >= cols {
            // Deferred wrap: stay in the last column until the next glyph
            self.cursor.col = cols - 1;
            self.pending_wrap = true;
        } else {
            self.cursor.col = col + width;
        }
    }

    /// Move down one line, scrolling the region when at its bottom
    pub(crate) fn linefeed(&mut self) {
        let (_, rows) = self.size();
        if self.cursor.row == self.scroll_region_bottom {
            let top = self.scroll_region_top;
            let bottom = self.scroll_region_bottom;
            self.active_grid_mut().scroll_region_up(1, top, bottom);
        } else if self.cursor.row + 1 < rows {
            self.cursor.row += 1;
        }
    }

    /// Move up one line, scrolling the region down when at its top (RI)
    pub(crate) fn reverse_index(&mut self) {
        self.pending_wrap = false;
        if self.cursor.row == self.scroll_region_top {
            let top = self.scroll_region_top;
            let bottom = self.scroll_region_bottom;
            self.active_grid_mut().scroll_region_down(1, top, bottom);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    fn horizontal_tab(&mut self) {
        let (cols, _) = self.size();
        self.pending_wrap = false;
        let mut col = self.cursor.col + 1;
        while col < cols && !self.tab_stops.get(col).copied().unwrap_or(false) {
            col += 1;
        }
        self.cursor.col = col.min(cols.saturating_sub(1));
    }

    /// Scroll the viewport into scrollback (positive = older lines)
    pub fn scroll_display(&mut self, delta: isize) {
        self.grid.scroll_display(delta);
    }
}

#[cfg(test)]
mod tests;
