//! Scrolling and scroll-region CSI sequence handling

use crate::interpreter::csi::param_or;
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_scroll(
        &mut self,
        action: char,
        params: &Params,
        _intermediates: &[u8],
    ) {
        match action {
            'S' => {
                // Scroll up (SU)
                let n = param_or(params, 1);
                let top = self.scroll_region_top;
                let bottom = self.scroll_region_bottom;
                self.active_grid_mut().scroll_region_up(n, top, bottom);
            }
            'T' => {
                // Scroll down (SD)
                let n = param_or(params, 1);
                let top = self.scroll_region_top;
                let bottom = self.scroll_region_bottom;
                self.active_grid_mut().scroll_region_down(n, top, bottom);
            }
            'r' => {
                // Set scroll region (DECSTBM)
                let (_, rows) = self.size();
                let mut iter = params.iter();
                let top = iter.next().and_then(|p| p.first()).copied().unwrap_or(1) as usize;
                let bottom = iter
                    .next()
                    .and_then(|p| p.first())
                    .copied()
                    .unwrap_or(rows as u16) as usize;
                let top = if top == 0 { 1 } else { top };
                let bottom = if bottom == 0 { rows } else { bottom };

                // A region shorter than two rows is rejected
                if top < bottom && bottom <= rows {
                    self.scroll_region_top = top - 1;
                    self.scroll_region_bottom = bottom - 1;
                    // DECSTBM homes the cursor
                    if self.origin_mode {
                        self.cursor.goto(0, self.scroll_region_top);
                    } else {
                        self.cursor.goto(0, 0);
                    }
                    self.pending_wrap = false;
                } else {
                    tracing::trace!(top, bottom, rows, "rejected DECSTBM parameters");
                }
            }
            _ => {}
        }
    }
}
