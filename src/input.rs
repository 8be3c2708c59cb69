//! Keyboard, mouse, and paste encoding
//!
//! Translates host-side input events into the byte sequences a remote
//! program expects, as a pure function of the event and the terminal's
//! current input modes. Nothing here touches screen state; callers obtain
//! a [`ModeSnapshot`] from the interpreter and pass it in.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key or mouse event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

impl KeyModifiers {
    /// xterm modifier parameter: 1 + (shift=1, alt=2, ctrl=4)
    fn xterm_param(&self) -> u8 {
        let mut p = 1;
        if self.contains(KeyModifiers::SHIFT) {
            p += 1;
        }
        if self.contains(KeyModifiers::ALT) {
            p += 2;
        }
        if self.contains(KeyModifiers::CTRL) {
            p += 4;
        }
        p
    }
}

/// A key event from the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKey {
    /// A printable character (pre-layout, post-IME)
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// Function key F1-F12
    F(u8),
}

/// Mouse tracking mode (DECSET 1000/1002/1003)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseMode {
    #[default]
    Off,
    /// Report button press and release (1000)
    Normal,
    /// Also report motion while a button is held (1002)
    ButtonEvent,
    /// Report all motion (1003)
    AnyEvent,
}

/// Mouse report encoding (DECSET 1006)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseEncoding {
    /// Legacy X10/X11 byte encoding, limited to coordinate 223
    #[default]
    Default,
    /// SGR encoding (1006), unlimited coordinates and distinct release
    Sgr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    /// Pointer moved; `button` is the held button, if any
    Motion,
}

/// A mouse event in grid coordinates (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub button: Option<MouseButton>,
    pub col: usize,
    pub row: usize,
    pub modifiers: KeyModifiers,
}

/// Immutable view of the interpreter's input-affecting modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSnapshot {
    pub application_cursor: bool,
    pub application_keypad: bool,
    pub bracketed_paste: bool,
    pub newline_mode: bool,
    pub mouse_mode: MouseMode,
    pub mouse_encoding: MouseEncoding,
}

/// Encode a key event as terminal input bytes.
///
/// Returns `None` for events that produce no bytes (e.g. a bare modifier
/// press mapped to `Char` by a confused layer, or F0/F13+).
pub fn encode_key(key: TerminalKey, modifiers: KeyModifiers, modes: &ModeSnapshot) -> Option<Vec<u8>> {
    match key {
        TerminalKey::Char(c) => encode_char(c, modifiers),
        TerminalKey::Enter => {
            if modes.newline_mode {
                Some(b"\r\n".to_vec())
            } else {
                Some(b"\r".to_vec())
            }
        }
        TerminalKey::Tab => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                Some(b"\x1b[Z".to_vec())
            } else {
                Some(b"\t".to_vec())
            }
        }
        TerminalKey::Backspace => {
            if modifiers.contains(KeyModifiers::ALT) {
                Some(b"\x1b\x7f".to_vec())
            } else {
                Some(b"\x7f".to_vec())
            }
        }
        TerminalKey::Escape => Some(b"\x1b".to_vec()),
        TerminalKey::Up => Some(encode_cursor_key(b'A', modifiers, modes)),
        TerminalKey::Down => Some(encode_cursor_key(b'B', modifiers, modes)),
        TerminalKey::Right => Some(encode_cursor_key(b'C', modifiers, modes)),
        TerminalKey::Left => Some(encode_cursor_key(b'D', modifiers, modes)),
        TerminalKey::Home => Some(encode_cursor_key(b'H', modifiers, modes)),
        TerminalKey::End => Some(encode_cursor_key(b'F', modifiers, modes)),
        TerminalKey::Insert => Some(encode_tilde_key(2, modifiers)),
        TerminalKey::Delete => Some(encode_tilde_key(3, modifiers)),
        TerminalKey::PageUp => Some(encode_tilde_key(5, modifiers)),
        TerminalKey::PageDown => Some(encode_tilde_key(6, modifiers)),
        TerminalKey::F(n) => encode_function_key(n, modifiers),
    }
}

fn encode_char(c: char, modifiers: KeyModifiers) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(5);
    if modifiers.contains(KeyModifiers::ALT) {
        out.push(0x1b);
    }
    if modifiers.contains(KeyModifiers::CTRL) {
        // Control chords map into the C0 range
        let byte = match c {
            'a'..='z' => Some(c as u8 - b'a' + 1),
            'A'..='Z' => Some(c as u8 - b'A' + 1),
            '@' | ' ' => Some(0x00),
            '[' => Some(0x1b),
            '\\' => Some(0x1c),
            ']' => Some(0x1d),
            '^' => Some(0x1e),
            '_' | '/' => Some(0x1f),
            '?' => Some(0x7f),
            _ => None,
        };
        match byte {
            Some(b) => out.push(b),
            None => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    } else {
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
    Some(out)
}

fn encode_cursor_key(final_byte: u8, modifiers: KeyModifiers, modes: &ModeSnapshot) -> Vec<u8> {
    if !modifiers.is_empty() {
        // Modified cursor keys always use the CSI 1;m form
        return format!("\x1b[1;{}{}", modifiers.xterm_param(), final_byte as char).into_bytes();
    }
    if modes.application_cursor {
        vec![0x1b, b'O', final_byte]
    } else {
        vec![0x1b, b'[', final_byte]
    }
}

fn encode_tilde_key(code: u8, modifiers: KeyModifiers) -> Vec<u8> {
    if modifiers.is_empty() {
        format!("\x1b[{}~", code).into_bytes()
    } else {
        format!("\x1b[{};{}~", code, modifiers.xterm_param()).into_bytes()
    }
}

fn encode_function_key(n: u8, modifiers: KeyModifiers) -> Option<Vec<u8>> {
    // F1-F4 are SS3 keys, F5-F12 use the tilde form with gaps
    let code = match n {
        1..=4 => {
            let final_byte = b'P' + (n - 1);
            if modifiers.is_empty() {
                return Some(vec![0x1b, b'O', final_byte]);
            }
            return Some(
                format!("\x1b[1;{}{}", modifiers.xterm_param(), final_byte as char).into_bytes(),
            );
        }
        5 => 15,
        6 => 17,
        7 => 18,
        8 => 19,
        9 => 20,
        10 => 21,
        11 => 23,
        12 => 24,
        _ => return None,
    };
    Some(encode_tilde_key(code, modifiers))
}

/// Encode a mouse event per the current tracking mode and encoding.
///
/// Returns `None` when the mode does not report this event (tracking off,
/// or motion without the required mode).
pub fn encode_mouse(event: &MouseEvent, modes: &ModeSnapshot) -> Option<Vec<u8>> {
    match modes.mouse_mode {
        MouseMode::Off => return None,
        MouseMode::Normal => {
            if event.kind == MouseEventKind::Motion {
                return None;
            }
        }
        MouseMode::ButtonEvent => {
            if event.kind == MouseEventKind::Motion && event.button.is_none() {
                return None;
            }
        }
        MouseMode::AnyEvent => {}
    }

    let mut cb: u8 = match event.button {
        Some(MouseButton::Left) => 0,
        Some(MouseButton::Middle) => 1,
        Some(MouseButton::Right) => 2,
        Some(MouseButton::WheelUp) => 64,
        Some(MouseButton::WheelDown) => 65,
        None => 3,
    };
    if event.kind == MouseEventKind::Motion {
        cb += 32;
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        cb += 4;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        cb += 8;
    }
    if event.modifiers.contains(KeyModifiers::CTRL) {
        cb += 16;
    }

    match modes.mouse_encoding {
        MouseEncoding::Sgr => {
            let suffix = if event.kind == MouseEventKind::Release {
                'm'
            } else {
                'M'
            };
            Some(
                format!("\x1b[<{};{};{}{}", cb, event.col + 1, event.row + 1, suffix).into_bytes(),
            )
        }
        MouseEncoding::Default => {
            // Legacy encoding folds release into cb and cannot address
            // coordinates past 222
            let cb = if event.kind == MouseEventKind::Release {
                (cb & 0b1111_1100) | 3
            } else {
                cb
            };
            let col = event.col.min(222) as u8;
            let row = event.row.min(222) as u8;
            Some(vec![0x1b, b'[', b'M', 32 + cb, 33 + col, 33 + row])
        }
    }
}

/// Encode pasted text, honoring bracketed paste mode.
///
/// Paste-guard sequences embedded in the payload are stripped: an
/// `ESC [ 201 ~` inside the pasted text would end the guard early and let
/// the remainder run as typed input.
pub fn encode_paste(text: &str, modes: &ModeSnapshot) -> Vec<u8> {
    if modes.bracketed_paste {
        let sanitized = text.replace("\x1b[200~", "").replace("\x1b[201~", "");
        let mut out = Vec::with_capacity(sanitized.len() + 12);
        out.extend_from_slice(b"\x1b[200~");
        out.extend_from_slice(sanitized.as_bytes());
        out.extend_from_slice(b"\x1b[201~");
        out
    } else {
        text.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes() -> ModeSnapshot {
        ModeSnapshot::default()
    }

    #[test]
    fn test_plain_char() {
        let bytes = encode_key(TerminalKey::Char('a'), KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, b"a");
    }

    #[test]
    fn test_ctrl_chords() {
        let bytes = encode_key(TerminalKey::Char('c'), KeyModifiers::CTRL, &modes()).unwrap();
        assert_eq!(bytes, b"\x03");
        let bytes = encode_key(TerminalKey::Char('['), KeyModifiers::CTRL, &modes()).unwrap();
        assert_eq!(bytes, b"\x1b");
        let bytes = encode_key(TerminalKey::Char(' '), KeyModifiers::CTRL, &modes()).unwrap();
        assert_eq!(bytes, b"\x00");
    }

    #[test]
    fn test_alt_prefixes_escape() {
        let bytes = encode_key(TerminalKey::Char('x'), KeyModifiers::ALT, &modes()).unwrap();
        assert_eq!(bytes, b"\x1bx");
    }

    #[test]
    fn test_utf8_char_passthrough() {
        let bytes = encode_key(TerminalKey::Char('é'), KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, "é".as_bytes());
    }

    #[test]
    fn test_cursor_keys_follow_application_mode() {
        let normal = modes();
        let bytes = encode_key(TerminalKey::Up, KeyModifiers::empty(), &normal).unwrap();
        assert_eq!(bytes, b"\x1b[A");

        let app = ModeSnapshot {
            application_cursor: true,
            ..Default::default()
        };
        let bytes = encode_key(TerminalKey::Up, KeyModifiers::empty(), &app).unwrap();
        assert_eq!(bytes, b"\x1bOA");
    }

    #[test]
    fn test_modified_cursor_key_uses_csi_form() {
        // Application cursor mode does not apply to modified keys
        let app = ModeSnapshot {
            application_cursor: true,
            ..Default::default()
        };
        let bytes = encode_key(TerminalKey::Up, KeyModifiers::CTRL, &app).unwrap();
        assert_eq!(bytes, b"\x1b[1;5A");
    }

    #[test]
    fn test_enter_follows_newline_mode() {
        let bytes = encode_key(TerminalKey::Enter, KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, b"\r");

        let lnm = ModeSnapshot {
            newline_mode: true,
            ..Default::default()
        };
        let bytes = encode_key(TerminalKey::Enter, KeyModifiers::empty(), &lnm).unwrap();
        assert_eq!(bytes, b"\r\n");
    }

    #[test]
    fn test_function_keys() {
        let bytes = encode_key(TerminalKey::F(1), KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, b"\x1bOP");
        let bytes = encode_key(TerminalKey::F(5), KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, b"\x1b[15~");
        let bytes = encode_key(TerminalKey::F(12), KeyModifiers::empty(), &modes()).unwrap();
        assert_eq!(bytes, b"\x1b[24~");
        assert!(encode_key(TerminalKey::F(13), KeyModifiers::empty(), &modes()).is_none());
    }

    #[test]
    fn test_tilde_keys_with_modifiers() {
        let bytes = encode_key(TerminalKey::Delete, KeyModifiers::SHIFT, &modes()).unwrap();
        assert_eq!(bytes, b"\x1b[3;2~");
    }

    #[test]
    fn test_mouse_off_reports_nothing() {
        let event = MouseEvent {
            kind: MouseEventKind::Press,
            button: Some(MouseButton::Left),
            col: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        assert!(encode_mouse(&event, &modes()).is_none());
    }

    #[test]
    fn test_mouse_sgr_press_release() {
        let snapshot = ModeSnapshot {
            mouse_mode: MouseMode::Normal,
            mouse_encoding: MouseEncoding::Sgr,
            ..Default::default()
        };
        let press = MouseEvent {
            kind: MouseEventKind::Press,
            button: Some(MouseButton::Left),
            col: 4,
            row: 9,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(encode_mouse(&press, &snapshot).unwrap(), b"\x1b[<0;5;10M");

        let release = MouseEvent {
            kind: MouseEventKind::Release,
            ..press
        };
        assert_eq!(encode_mouse(&release, &snapshot).unwrap(), b"\x1b[<0;5;10m");
    }

    #[test]
    fn test_mouse_legacy_encoding_clamps() {
        let snapshot = ModeSnapshot {
            mouse_mode: MouseMode::Normal,
            mouse_encoding: MouseEncoding::Default,
            ..Default::default()
        };
        let press = MouseEvent {
            kind: MouseEventKind::Press,
            button: Some(MouseButton::Left),
            col: 500,
            row: 500,
            modifiers: KeyModifiers::empty(),
        };
        let bytes = encode_mouse(&press, &snapshot).unwrap();
        assert_eq!(&bytes[..3], b"\x1b[M");
        assert_eq!(bytes[4], 33 + 222);
        assert_eq!(bytes[5], 33 + 222);
    }

    #[test]
    fn test_mouse_motion_requires_tracking_mode() {
        let motion = MouseEvent {
            kind: MouseEventKind::Motion,
            button: None,
            col: 1,
            row: 1,
            modifiers: KeyModifiers::empty(),
        };
        let normal = ModeSnapshot {
            mouse_mode: MouseMode::Normal,
            mouse_encoding: MouseEncoding::Sgr,
            ..Default::default()
        };
        assert!(encode_mouse(&motion, &normal).is_none());

        let button_event = ModeSnapshot {
            mouse_mode: MouseMode::ButtonEvent,
            ..normal
        };
        assert!(encode_mouse(&motion, &button_event).is_none());
        let dragged = MouseEvent {
            button: Some(MouseButton::Left),
            ..motion
        };
        assert!(encode_mouse(&dragged, &button_event).is_some());

        let any_event = ModeSnapshot {
            mouse_mode: MouseMode::AnyEvent,
            ..normal
        };
        assert!(encode_mouse(&motion, &any_event).is_some());
    }

    #[test]
    fn test_wheel_buttons() {
        let snapshot = ModeSnapshot {
            mouse_mode: MouseMode::Normal,
            mouse_encoding: MouseEncoding::Sgr,
            ..Default::default()
        };
        let wheel = MouseEvent {
            kind: MouseEventKind::Press,
            button: Some(MouseButton::WheelUp),
            col: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(encode_mouse(&wheel, &snapshot).unwrap(), b"\x1b[<64;1;1M");
    }

    #[test]
    fn test_paste_bracketing() {
        let plain = encode_paste("hello", &modes());
        assert_eq!(plain, b"hello");

        let bracketed = ModeSnapshot {
            bracketed_paste: true,
            ..Default::default()
        };
        let wrapped = encode_paste("hello", &bracketed);
        assert_eq!(wrapped, b"\x1b[200~hello\x1b[201~");
    }

    #[test]
    fn test_paste_strips_embedded_guard_sequences() {
        let bracketed = ModeSnapshot {
            bracketed_paste: true,
            ..Default::default()
        };
        // A payload carrying its own guard end must not break out early
        let hostile = "evil\x1b[201~rm -rf /\x1b[200~tail";
        let wrapped = encode_paste(hostile, &bracketed);
        assert_eq!(wrapped, b"\x1b[200~evilrm -rf /tail\x1b[201~");

        // Without bracketed paste there is no guard to defend
        assert_eq!(encode_paste("a\x1b[201~b", &modes()), b"a\x1b[201~b");
    }
}
