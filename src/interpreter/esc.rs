//! ESC (two-byte escape) sequence handling
//!
//! Covers cursor save/restore (DECSC/DECRC), tab stops (HTS), index
//! movement (IND/RI/NEL), keypad modes, and full reset (RIS).

use crate::interpreter::Interpreter;

impl Interpreter {
    pub(in crate::interpreter) fn esc_dispatch_impl(
        &mut self,
        intermediates: &[u8],
        _ignore: bool,
        byte: u8,
    ) {
        // Charset designation (ESC ( X etc.) is accepted and ignored
        if matches!(intermediates.first(), Some(b'(' | b')' | b'*' | b'+')) {
            return;
        }

        match byte {
            b'7' => self.save_cursor(),
            b'8' => self.restore_cursor(),
            b'H' => {
                // Set tab stop at current column (HTS)
                if self.cursor.col < self.tab_stops.len() {
                    self.tab_stops[self.cursor.col] = true;
                }
            }
            b'D' => {
                // Index (IND)
                self.pending_wrap = false;
                self.linefeed();
            }
            b'M' => {
                // Reverse index (RI)
                self.reverse_index();
            }
            b'E' => {
                // Next line (NEL)
                self.pending_wrap = false;
                self.cursor.col = 0;
                self.linefeed();
            }
            b'=' => self.application_keypad = true,
            b'>' => self.application_keypad = false,
            b'c' => self.reset(),
            _ => {
                tracing::trace!(byte = %byte as char, "unhandled ESC sequence");
                self.count_unhandled();
            }
        }
    }
}
