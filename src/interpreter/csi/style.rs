//! SGR (Select Graphic Rendition) handling

use crate::cell::{CellFlags, Color, NamedColor};
use crate::interpreter::Interpreter;
use vte::Params;

impl Interpreter {
    pub(crate) fn handle_csi_style(&mut self, action: char, params: &Params, intermediates: &[u8]) {
        if action != 'm' || !intermediates.is_empty() {
            return;
        }

        if params.is_empty() {
            self.flags = CellFlags::default();
            self.fg = Color::Default;
            self.bg = Color::Default;
            return;
        }

        let mut iter = params.iter();
        while let Some(param_slice) = iter.next() {
            let param = param_slice.first().copied().unwrap_or(0);
            match param {
                0 => {
                    self.flags = CellFlags::default();
                    self.fg = Color::Default;
                    self.bg = Color::Default;
                }
                1 => self.flags.insert(CellFlags::BOLD),
                2 => self.flags.insert(CellFlags::DIM),
                3 => self.flags.insert(CellFlags::ITALIC),
                4 => self.flags.insert(CellFlags::UNDERLINE),
                5 | 6 => self.flags.insert(CellFlags::BLINK),
                7 => self.flags.insert(CellFlags::REVERSE),
                8 => self.flags.insert(CellFlags::HIDDEN),
                9 => self.flags.insert(CellFlags::STRIKETHROUGH),
                22 => self.flags.remove(CellFlags::BOLD | CellFlags::DIM),
                23 => self.flags.remove(CellFlags::ITALIC),
                24 => self.flags.remove(CellFlags::UNDERLINE),
                25 => self.flags.remove(CellFlags::BLINK),
                27 => self.flags.remove(CellFlags::REVERSE),
                28 => self.flags.remove(CellFlags::HIDDEN),
                29 => self.flags.remove(CellFlags::STRIKETHROUGH),
                30..=37 => self.fg = Color::Named(NamedColor::from_u8((param - 30) as u8)),
                38 => {
                    if let Some(color) = extended_color(param_slice, &mut iter) {
                        self.fg = color;
                    }
                }
                39 => self.fg = Color::Default,
                40..=47 => self.bg = Color::Named(NamedColor::from_u8((param - 40) as u8)),
                48 => {
                    if let Some(color) = extended_color(param_slice, &mut iter) {
                        self.bg = color;
                    }
                }
                49 => self.bg = Color::Default,
                90..=97 => self.fg = Color::from_ansi_code((param - 90 + 8) as u8),
                100..=107 => self.bg = Color::from_ansi_code((param - 100 + 8) as u8),
                _ => {}
            }
        }
    }
}

/// Parse the 38/48 extended color forms. Handles both the colon subparameter
/// form (38:2:r:g:b in one slice) and the semicolon form (38;2;r;g;b spread
/// across successive params).
fn extended_color(
    param_slice: &[u16],
    iter: &mut vte::ParamsIter<'_>,
) -> Option<Color> {
    if let Some(&mode) = param_slice.get(1) {
        match mode {
            2 => {
                let r = param_slice.get(2).copied().unwrap_or(0) as u8;
                let g = param_slice.get(3).copied().unwrap_or(0) as u8;
                let b = param_slice.get(4).copied().unwrap_or(0) as u8;
                Some(Color::Rgb(r, g, b))
            }
            5 => param_slice
                .get(2)
                .map(|&idx| Color::from_ansi_code(idx as u8)),
            _ => None,
        }
    } else {
        let mode = iter.next().and_then(|p| p.first()).copied()?;
        match mode {
            2 => {
                let r = iter.next().and_then(|p| p.first()).copied().unwrap_or(0) as u8;
                let g = iter.next().and_then(|p| p.first()).copied().unwrap_or(0) as u8;
                let b = iter.next().and_then(|p| p.first()).copied().unwrap_or(0) as u8;
                Some(Color::Rgb(r, g, b))
            }
            5 => iter
                .next()
                .and_then(|p| p.first())
                .map(|&idx| Color::from_ansi_code(idx as u8)),
            _ => None,
        }
    }
}
