//! OSC (Operating System Command) sequence handling

use crate::interpreter::Interpreter;

impl Interpreter {
    pub(in crate::interpreter) fn osc_dispatch_impl(
        &mut self,
        params: &[&[u8]],
        _bell_terminated: bool,
    ) {
        let Some(code) = params.first() else {
            return;
        };

        match *code {
            // Set icon name and/or window title
            b"0" | b"2" => {
                if let Some(text) = params.get(1) {
                    self.set_title(String::from_utf8_lossy(text).into_owned());
                }
            }
            // Icon name only; we track just the title
            b"1" => {}
            _ => {
                tracing::trace!(code = %String::from_utf8_lossy(code), "unhandled OSC sequence");
                self.count_unhandled();
            }
        }
    }
}
