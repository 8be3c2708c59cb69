//! Mode-related CSI sequence handling (SM/RM, DECSET/DECRST)

use crate::input::{MouseEncoding, MouseMode};
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_mode(&mut self, action: char, params: &Params, intermediates: &[u8]) {
        let private = intermediates.contains(&b'?');
        let set = action == 'h';

        for param_slice in params {
            let param = param_slice.first().copied().unwrap_or(0);
            if private {
                self.handle_dec_private_mode(param, set);
            } else {
                match param {
                    4 => self.insert_mode = set,
                    20 => self.newline_mode = set,
                    _ => {
                        tracing::trace!(param, set, "unhandled ANSI mode");
                        self.count_unhandled();
                    }
                }
            }
        }
    }

    fn handle_dec_private_mode(&mut self, param: u16, set: bool) {
        match param {
            1 => self.application_cursor = set,
            6 => {
                self.origin_mode = set;
                if set {
                    self.cursor.goto(0, self.scroll_region_top);
                } else {
                    self.cursor.goto(0, 0);
                }
                self.pending_wrap = false;
            }
            7 => self.auto_wrap = set,
            12 => self.cursor_blink = set,
            25 => self.cursor.visible = set,
            1000 => {
                self.mouse_mode = if set { MouseMode::Normal } else { MouseMode::Off };
            }
            1002 => {
                self.mouse_mode = if set {
                    MouseMode::ButtonEvent
                } else {
                    MouseMode::Off
                };
            }
            1003 => {
                self.mouse_mode = if set {
                    MouseMode::AnyEvent
                } else {
                    MouseMode::Off
                };
            }
            1006 => {
                self.mouse_encoding = if set {
                    MouseEncoding::Sgr
                } else {
                    MouseEncoding::Default
                };
            }
            // UTF-8 and urxvt mouse encodings are not offered; falling back
            // to the default encoding keeps reports parseable
            1005 | 1015 => {
                if !set {
                    self.mouse_encoding = MouseEncoding::Default;
                }
            }
            47 | 1047 => {
                if set {
                    self.use_alt_screen();
                } else {
                    self.use_primary_screen();
                }
            }
            1048 => {
                if set {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => {
                if set {
                    self.save_cursor();
                    self.use_alt_screen();
                } else {
                    self.use_primary_screen();
                    self.restore_cursor();
                }
            }
            2004 => self.bracketed_paste = set,
            _ => {
                tracing::trace!(param, set, "unhandled DEC private mode");
                self.count_unhandled();
            }
        }
    }
}
