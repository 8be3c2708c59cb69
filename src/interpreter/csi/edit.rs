//! Insertion and deletion CSI sequence handling

use crate::interpreter::csi::param_or;
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_edit(&mut self, action: char, params: &Params, _intermediates: &[u8]) {
        let cursor_row = self.cursor.row;
        let scroll_top = self.scroll_region_top;
        let scroll_bottom = self.scroll_region_bottom;
        let in_region = cursor_row >= scroll_top && cursor_row <= scroll_bottom;

        match action {
            'L' => {
                // Insert lines (IL), only inside the scroll region
                let n = param_or(params, 1);
                if in_region {
                    self.active_grid_mut()
                        .insert_lines(n, cursor_row, scroll_bottom);
                }
            }
            'M' => {
                // Delete lines (DL)
                let n = param_or(params, 1);
                if in_region {
                    self.active_grid_mut()
                        .delete_lines(n, cursor_row, scroll_bottom);
                }
            }
            '@' => {
                // Insert characters (ICH)
                let n = param_or(params, 1);
                let col = self.cursor.col;
                self.active_grid_mut().insert_chars(col, cursor_row, n);
            }
            'P' => {
                // Delete characters (DCH)
                let n = param_or(params, 1);
                let col = self.cursor.col;
                self.active_grid_mut().delete_chars(col, cursor_row, n);
            }
            _ => {}
        }
    }
}
