//! Cursor-related CSI sequence handling

use crate::interpreter::csi::param_or;
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_cursor(
        &mut self,
        action: char,
        params: &Params,
        _intermediates: &[u8],
    ) {
        let (cols, rows) = self.size();

        match action {
            'A' => {
                // Cursor up (CUU)
                let n = param_or(params, 1);
                self.cursor.move_up(n);
                self.cursor.row = self.cursor.row.max(self.region_min_row());
                self.pending_wrap = false;
            }
            'B' => {
                // Cursor down (CUD)
                let n = param_or(params, 1);
                self.cursor.move_down(n, self.region_max_row());
                self.pending_wrap = false;
            }
            'C' => {
                // Cursor forward (CUF)
                let n = param_or(params, 1);
                self.cursor.move_right(n, cols.saturating_sub(1));
                self.pending_wrap = false;
            }
            'D' => {
                // Cursor back (CUB)
                let n = param_or(params, 1);
                self.cursor.move_left(n);
                self.pending_wrap = false;
            }
            'H' | 'f' => {
                // Cursor position (CUP/HVP)
                let mut iter = params.iter();
                let row = iter.next().and_then(|p| p.first()).copied().unwrap_or(1) as usize;
                let col = iter.next().and_then(|p| p.first()).copied().unwrap_or(1) as usize;

                let col = col.saturating_sub(1).min(cols.saturating_sub(1));
                let row = row.saturating_sub(1);

                if self.origin_mode {
                    let region_height = self.scroll_region_bottom - self.scroll_region_top + 1;
                    let row = self.scroll_region_top + row.min(region_height - 1);
                    self.cursor.goto(col, row);
                } else {
                    self.cursor.goto(col, row.min(rows.saturating_sub(1)));
                }
                self.pending_wrap = false;
            }
            'E' => {
                // Cursor next line (CNL)
                let n = param_or(params, 1);
                self.cursor.move_down(n, self.region_max_row());
                self.cursor.col = 0;
                self.pending_wrap = false;
            }
            'F' => {
                // Cursor preceding line (CPL)
                let n = param_or(params, 1);
                self.cursor.move_up(n);
                self.cursor.row = self.cursor.row.max(self.region_min_row());
                self.cursor.col = 0;
                self.pending_wrap = false;
            }
            'G' | '`' => {
                // Cursor horizontal absolute (CHA/HPA)
                let col = param_or(params, 1);
                self.cursor.col = (col - 1).min(cols.saturating_sub(1));
                self.pending_wrap = false;
            }
            'd' => {
                // Line position absolute (VPA)
                let row = param_or(params, 1);
                self.cursor.row = (row - 1).min(rows.saturating_sub(1));
                self.pending_wrap = false;
            }
            'I' => {
                // Horizontal tab forward (CHT)
                let n = param_or(params, 1);
                for _ in 0..n {
                    self.write_char('\t');
                }
            }
            'Z' => {
                // Horizontal tab back (CBT)
                let n = param_or(params, 1);
                for _ in 0..n {
                    let mut col = self.cursor.col;
                    if col > 0 {
                        col -= 1;
                        while col > 0 && !self.tab_stops[col] {
                            col -= 1;
                        }
                        self.cursor.col = col;
                    }
                }
                self.pending_wrap = false;
            }
            'g' => {
                // Tabulation clear (TBC)
                let n = params
                    .iter()
                    .next()
                    .and_then(|p| p.first())
                    .copied()
                    .unwrap_or(0);
                match n {
                    0 => {
                        if self.cursor.col < self.tab_stops.len() {
                            self.tab_stops[self.cursor.col] = false;
                        }
                    }
                    3 => self.tab_stops.fill(false),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Lowest row CUU/CPL may reach: the region top in origin mode
    fn region_min_row(&self) -> usize {
        if self.origin_mode && self.cursor.row >= self.scroll_region_top {
            self.scroll_region_top
        } else {
            0
        }
    }

    /// Highest row CUD/CNL may reach: the region bottom in origin mode
    fn region_max_row(&self) -> usize {
        let (_, rows) = self.size();
        if self.origin_mode && self.cursor.row <= self.scroll_region_bottom {
            self.scroll_region_bottom
        } else {
            rows.saturating_sub(1)
        }
    }
}
