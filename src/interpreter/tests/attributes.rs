use crate::cell::{CellFlags, Color, NamedColor};
use crate::interpreter::Interpreter;

#[test]
fn test_basic_colors() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[31mred\x1b[42mgreen-bg");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Named(NamedColor::Red));
    assert_eq!(cell.bg, Color::Default);

    let cell = term.active_grid().get(3, 0).unwrap();
    assert_eq!(cell.fg, Color::Named(NamedColor::Red));
    assert_eq!(cell.bg, Color::Named(NamedColor::Green));
}

#[test]
fn test_bright_colors() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[91m\x1b[104mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Named(NamedColor::BrightRed));
    assert_eq!(cell.bg, Color::Named(NamedColor::BrightBlue));
}

#[test]
fn test_256_color_semicolon_form() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[38;5;196mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Indexed(196));
}

#[test]
fn test_256_color_low_index_maps_to_named() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[48;5;1mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.bg, Color::Named(NamedColor::Red));
}

#[test]
fn test_rgb_color_semicolon_form() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[38;2;10;20;30mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
}

#[test]
fn test_rgb_color_colon_form() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[38:2:10:20:30mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
}

#[test]
fn test_text_attributes() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;4;7mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert!(cell.flags.contains(CellFlags::BOLD));
    assert!(cell.flags.contains(CellFlags::UNDERLINE));
    assert!(cell.flags.contains(CellFlags::REVERSE));
}

#[test]
fn test_attribute_clearing() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;4m\x1b[24mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert!(cell.flags.contains(CellFlags::BOLD));
    assert!(!cell.flags.contains(CellFlags::UNDERLINE));
}

#[test]
fn test_sgr_reset() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;31;42m\x1b[0mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Default);
    assert_eq!(cell.bg, Color::Default);
    assert!(cell.flags.is_empty());
}

#[test]
fn test_empty_sgr_resets() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;31m\x1b[mx");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Default);
    assert!(cell.flags.is_empty());
}

#[test]
fn test_default_fg_bg_selectable() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[31;42m\x1b[39mx\x1b[49my");

    let x = term.active_grid().get(0, 0).unwrap();
    assert_eq!(x.fg, Color::Default);
    assert_eq!(x.bg, Color::Named(NamedColor::Green));

    let y = term.active_grid().get(1, 0).unwrap();
    assert_eq!(y.bg, Color::Default);
}

#[test]
fn test_attributes_survive_save_restore() {
    let mut term = Interpreter::new(80, 24);
    term.process(b"\x1b[1;35m\x1b7\x1b[0;32m\x1b8x");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::Named(NamedColor::Magenta));
    assert!(cell.flags.contains(CellFlags::BOLD));
}

#[test]
fn test_erased_cells_have_default_attributes() {
    let mut term = Interpreter::new(10, 2);
    term.process(b"\x1b[41mxxxx\x1b[1;1H\x1b[K");

    let cell = term.active_grid().get(0, 0).unwrap();
    assert_eq!(cell.bg, Color::Default);
    assert_eq!(cell.c, ' ');
}
