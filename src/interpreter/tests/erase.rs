use crate::interpreter::Interpreter;

fn filled(cols: usize, rows: usize) -> Interpreter {
    let mut term = Interpreter::new(cols, rows);
    for row in 0..rows {
        let line = "X".repeat(cols);
        term.process(format!("\x1b[{};1H{}", row + 1, line).as_bytes());
    }
    term
}

#[test]
fn test_erase_to_end_of_line() {
    let mut term = filled(10, 3);
    term.process(b"\x1b[2;5H\x1b[K");

    assert_eq!(term.active_grid().row_text(1), "XXXX      ");
    assert_eq!(term.active_grid().row_text(0), "XXXXXXXXXX");
}

#[test]
fn test_erase_to_start_of_line() {
    let mut term = filled(10, 3);
    term.process(b"\x1b[2;5H\x1b[1K");

    assert_eq!(term.active_grid().row_text(1), "     XXXXX");
}

#[test]
fn test_erase_whole_line() {
    let mut term = filled(10, 3);
    term.process(b"\x1b[2;5H\x1b[2K");

    assert_eq!(term.active_grid().row_text(1).trim_end(), "");
    assert_eq!(term.active_grid().row_text(2), "XXXXXXXXXX");
}

#[test]
fn test_erase_below() {
    let mut term = filled(10, 4);
    term.process(b"\x1b[2;5H\x1b[J");

    assert_eq!(term.active_grid().row_text(0), "XXXXXXXXXX");
    assert_eq!(term.active_grid().row_text(1), "XXXX      ");
    assert_eq!(term.active_grid().row_text(2).trim_end(), "");
    assert_eq!(term.active_grid().row_text(3).trim_end(), "");
}

#[test]
fn test_erase_above() {
    let mut term = filled(10, 4);
    term.process(b"\x1b[3;5H\x1b[1J");

    assert_eq!(term.active_grid().row_text(0).trim_end(), "");
    assert_eq!(term.active_grid().row_text(1).trim_end(), "");
    // Erase includes the cursor column
    assert_eq!(term.active_grid().row_text(2), "     XXXXX");
    assert_eq!(term.active_grid().row_text(3), "XXXXXXXXXX");
}

#[test]
fn test_erase_all_keeps_scrollback() {
    let mut term = Interpreter::new(10, 3);
    term.process(b"a\r\nb\r\nc\r\nd\r\ne");
    let scrollback_before = term.grid().scrollback_len();
    assert!(scrollback_before > 0);

    term.process(b"\x1b[2J");

    assert_eq!(term.active_grid().row_text(0).trim_end(), "");
    assert_eq!(term.grid().scrollback_len(), scrollback_before);
}

#[test]
fn test_erase_scrollback() {
    let mut term = Interpreter::new(10, 3);
    term.process(b"a\r\nb\r\nc\r\nd\r\ne");
    assert!(term.grid().scrollback_len() > 0);

    term.process(b"\x1b[3J");

    assert_eq!(term.grid().scrollback_len(), 0);
}

#[test]
fn test_erase_characters() {
    let mut term = filled(10, 2);
    term.process(b"\x1b[1;3H\x1b[4X");

    assert_eq!(term.active_grid().row_text(0), "XX    XXXX");
    // ECH does not move the cursor
    assert_eq!(term.cursor.col, 2);
}

#[test]
fn test_erase_does_not_move_cursor() {
    let mut term = filled(10, 3);
    term.process(b"\x1b[2;5H\x1b[J");
    assert_eq!((term.cursor.col, term.cursor.row), (4, 1));
}
