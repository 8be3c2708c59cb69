//! Erase-related CSI sequence handling

use crate::interpreter::csi::param_or;
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_erase(
        &mut self,
        action: char,
        params: &Params,
        _intermediates: &[u8],
    ) {
        let col = self.cursor.col;
        let row = self.cursor.row;

        match action {
            'J' => {
                // Erase in display (ED)
                let n = params
                    .iter()
                    .next()
                    .and_then(|p| p.first())
                    .copied()
                    .unwrap_or(0);
                match n {
                    0 => self.active_grid_mut().clear_screen_below(col, row),
                    1 => self.active_grid_mut().clear_screen_above(col, row),
                    2 => self.active_grid_mut().clear(),
                    3 => {
                        self.active_grid_mut().clear();
                        self.active_grid_mut().clear_scrollback();
                    }
                    _ => {}
                }
            }
            'K' => {
                // Erase in line (EL)
                let n = params
                    .iter()
                    .next()
                    .and_then(|p| p.first())
                    .copied()
                    .unwrap_or(0);
                match n {
                    0 => self.active_grid_mut().clear_line_right(col, row),
                    1 => self.active_grid_mut().clear_line_left(col, row),
                    2 => self.active_grid_mut().clear_row(row),
                    _ => {}
                }
            }
            'X' => {
                // Erase characters (ECH)
                let n = param_or(params, 1);
                self.active_grid_mut().erase_characters(col, row, n);
            }
            _ => {}
        }
    }
}
