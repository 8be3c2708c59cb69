//! Device status reports and attribute queries
//!
//! Replies are queued in the response buffer; the owning session drains
//! them with `take_responses()` and writes them back to the transport.

use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_report(
        &mut self,
        action: char,
        params: &Params,
        intermediates: &[u8],
    ) {
        match action {
            'n' => {
                // Device status report (DSR)
                let n = params
                    .iter()
                    .next()
                    .and_then(|p| p.first())
                    .copied()
                    .unwrap_or(0);
                match n {
                    5 => self.push_response(b"\x1b[0n"),
                    6 => {
                        // Cursor position report, region-relative in origin mode
                        let row = if self.origin_mode {
                            self.cursor.row.saturating_sub(self.scroll_region_top) + 1
                        } else {
                            self.cursor.row + 1
                        };
                        let col = self.cursor.col + 1;
                        let report = format!("\x1b[{};{}R", row, col);
                        self.push_response(report.as_bytes());
                    }
                    _ => {}
                }
            }
            'c' => {
                if intermediates.is_empty() {
                    // Primary device attributes: VT320-class with no options
                    self.push_response(b"\x1b[?63;1;2c");
                }
            }
            _ => {}
        }
    }
}
