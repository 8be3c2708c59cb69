//! CSI (Control Sequence Introducer) dispatch

mod cursor;
mod edit;
mod erase;
mod mode;
mod report;
mod scroll;
mod style;

use crate::interpreter::Interpreter;
use vte::Params;

/// First parameter with a default, treating 0 as the default per VT rules
pub(crate) fn param_or(params: &Params, default: u16) -> usize {
    let n = params
        .iter()
        .next()
        .and_then(|p| p.first())
        .copied()
        .unwrap_or(default);
    let n = if n == 0 { default } else { n };
    n as usize
}

impl Interpreter {
    pub(in crate::interpreter) fn csi_dispatch_impl(
        &mut self,
        params: &Params,
        intermediates: &[u8],
        _ignore: bool,
        action: char,
    ) {
        match action {
            'A' | 'B' | 'C' | 'D' | 'E' | 'F' | 'G' | '`' | 'H' | 'f' | 'd' | 'I' | 'Z' | 'g' => {
                self.handle_csi_cursor(action, params, intermediates);
            }
            'J' | 'K' | 'X' => {
                self.handle_csi_erase(action, params, intermediates);
            }
            'L' | 'M' | '@' | 'P' => {
                self.handle_csi_edit(action, params, intermediates);
            }
            'S' | 'T' | 'r' => {
                self.handle_csi_scroll(action, params, intermediates);
            }
            'm' => {
                self.handle_csi_style(action, params, intermediates);
            }
            'h' | 'l' => {
                self.handle_csi_mode(action, params, intermediates);
            }
            'n' | 'c' => {
                self.handle_csi_report(action, params, intermediates);
            }
            's' => self.save_cursor(),
            'u' => self.restore_cursor(),
            _ => {
                tracing::trace!(action = %action, "unhandled CSI action");
                self.count_unhandled();
            }
        }
    }
}
