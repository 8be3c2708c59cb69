use crate::interpreter::Interpreter;

#[test]
fn test_cursor_position() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;20H");

    assert_eq!(term.cursor.row, 9);
    assert_eq!(term.cursor.col, 19);
}

#[test]
fn test_cursor_position_clamped_to_screen() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[99;199H");

    assert_eq!(term.cursor.row, 23);
    assert_eq!(term.cursor.col, 79);
}

#[test]
fn test_cursor_position_defaults_to_home() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;20H\x1b[H");

    assert_eq!(term.cursor.row, 0);
    assert_eq!(term.cursor.col, 0);
}

#[test]
fn test_relative_movement() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;10H");
    term.process(b"\x1b[3A"); // up 3
    assert_eq!(term.cursor.row, 6);
    term.process(b"\x1b[2B"); // down 2
    assert_eq!(term.cursor.row, 8);
    term.process(b"\x1b[5C"); // right 5
    assert_eq!(term.cursor.col, 14);
    term.process(b"\x1b[4D"); // left 4
    assert_eq!(term.cursor.col, 10);
}

#[test]
fn test_zero_param_means_one() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;10H\x1b[0A");
    assert_eq!(term.cursor.row, 8);
}

#[test]
fn test_movement_clamps_at_edges() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[99A");
    assert_eq!(term.cursor.row, 0);
    term.process(b"\x1b[99D");
    assert_eq!(term.cursor.col, 0);
    term.process(b"\x1b[99B");
    assert_eq!(term.cursor.row, 23);
    term.process(b"\x1b[99C");
    assert_eq!(term.cursor.col, 79);
}

#[test]
fn test_column_and_row_absolute() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[40G");
    assert_eq!(term.cursor.col, 39);
    term.process(b"\x1b[12d");
    assert_eq!(term.cursor.row, 11);
}

#[test]
fn test_next_and_preceding_line() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;30H\x1b[2E");
    assert_eq!((term.cursor.col, term.cursor.row), (0, 11));
    term.process(b"\x1b[30G\x1b[3F");
    assert_eq!((term.cursor.col, term.cursor.row), (0, 8));
}

#[test]
fn test_save_restore_cursor() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[15;10H\x1b[31m\x1b[1m");
    term.process(b"\x1b7");

    term.process(b"\x1b[20;50H\x1b[32m\x1b[22m");
    term.process(b"\x1b8");

    assert_eq!(term.cursor.col, 9);
    assert_eq!(term.cursor.row, 14);
    assert!(term.flags.contains(crate::cell::CellFlags::BOLD));
}

#[test]
fn test_restore_without_save_is_noop() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[10;15H");
    let (col, row) = (term.cursor.col, term.cursor.row);

    term.process(b"\x1b8");

    assert_eq!(term.cursor.col, col);
    assert_eq!(term.cursor.row, row);
}

#[test]
fn test_set_and_clear_tab_stop() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;21H\x1bH"); // HTS at col 20
    term.process(b"\x1b[1;1H\t\t\t");
    assert_eq!(term.cursor.col, 20); // 8, 16, then the custom stop

    term.process(b"\x1b[0g"); // clear stop under cursor
    term.process(b"\x1b[1;1H\t\t\t");
    assert_eq!(term.cursor.col, 24);

    term.process(b"\x1b[3g\x1b[1;1H\t"); // clear all stops
    assert_eq!(term.cursor.col, 79);
}

#[test]
fn test_backward_tab() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;30H\x1b[Z");
    assert_eq!(term.cursor.col, 24);
    term.process(b"\x1b[2Z");
    assert_eq!(term.cursor.col, 8);
}

#[test]
fn test_index_and_reverse_index() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[11;10H");

    term.process(b"\x1bD");
    assert_eq!(term.cursor.row, 11);

    term.process(b"\x1bM\x1bM");
    assert_eq!(term.cursor.row, 9);
    assert_eq!(term.cursor.col, 9); // column untouched
}

#[test]
fn test_nel_resets_column() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[11;40H\x1bE");

    assert_eq!(term.cursor.col, 0);
    assert_eq!(term.cursor.row, 11);
}

#[test]
fn test_cursor_visibility() {
    let mut term = Interpreter::new(80, 24);
    assert!(term.cursor().visible);

    term.process(b"\x1b[?25l");
    assert!(!term.cursor().visible);

    term.process(b"\x1b[?25h");
    assert!(term.cursor().visible);
}

#[test]
fn test_movement_cancels_pending_wrap() {
    let mut term = Interpreter::new(10, 5);
    term.process(b"0123456789");
    assert!(term.pending_wrap);

    term.process(b"\x1b[D");
    assert!(!term.pending_wrap);

    term.process(b"X");
    assert_eq!(term.cursor.row, 0); // no wrap happened
}
