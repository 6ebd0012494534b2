//! End-to-end typing through the public `Typer` API with a recording surface.

use typer::keyboard::display::encode_str;
use typer::{Casing, Command, Row, SecondaryPolicy, Typer, TyperOptions};

mod support;
use support::mock_surface::MockSurface;

fn typer(casing: Casing, max_length: usize) -> Typer {
    Typer::new(TyperOptions {
        max_length,
        casing,
        secondary: SecondaryPolicy::Disabled,
        ..TyperOptions::default()
    })
}

fn run(typer: &mut Typer, surface: &mut MockSurface, commands: &[Command]) {
    for &command in commands {
        typer.handle(command, surface);
    }
}

#[test]
fn sentence_casing_and_auto_space() {
    let mut t = typer(Casing::SentenceUpper, 0);
    let mut surface = MockSurface::new();
    t.open(None, &mut surface);

    // alpha 'a' capitalized, then 'b' lowercase
    run(&mut t, &mut surface, &[Command::Down, Command::Confirm]);
    assert_eq!(t.value(), "A");
    run(&mut t, &mut surface, &[Command::Right, Command::Confirm]);
    assert_eq!(t.value(), "Ab");

    // down past the hidden secondary row and nums to symbols, '.' is first
    run(&mut t, &mut surface, &[Command::Down, Command::Down, Command::Confirm]);
    assert_eq!(t.value(), "Ab. ");
    assert!(t.session().is_some_and(|s| s.capitalize()));

    run(&mut t, &mut surface, &[Command::Up, Command::Up, Command::Confirm]);
    assert_eq!(t.value(), "Ab. B");
    assert_eq!(surface.encoded_buffer, "&#65;&#98;&#46;&#160;&#66;");
}

#[test]
fn display_glyphs_follow_capitalization() {
    let mut t = typer(Casing::SentenceUpper, 0);
    let mut surface = MockSurface::new();
    t.open(None, &mut surface);
    assert_eq!(surface.glyphs(Row::Alpha)[0], 'A');

    run(&mut t, &mut surface, &[Command::Down, Command::Confirm]);
    assert_eq!(surface.glyphs(Row::Alpha)[0], 'a');
    assert_eq!(surface.encoded_current, "&#97;");
}

#[test]
fn reaching_max_length_returns_to_value_row() {
    let mut t = typer(Casing::Lower, 5);
    let mut surface = MockSurface::new();
    t.open(Some("1234"), &mut surface);

    run(&mut t, &mut surface, &[Command::Down, Command::Down]);
    assert_eq!(t.session().map(|s| s.active_row()), Some(Row::Nums));
    for _ in 0..5 {
        t.handle(Command::Right, &mut surface);
    }
    t.handle(Command::Confirm, &mut surface);

    assert_eq!(t.value(), "12345");
    assert_eq!(t.session().map(|s| s.active_row()), Some(Row::Value));
    assert_eq!(surface.active, Some(Row::Value));
    assert!(t.session().is_some_and(|s| s.last_chosen().is_none()));
}

#[test]
fn value_row_edits_with_left_and_right() {
    let mut t = typer(Casing::Lower, 0);
    let mut surface = MockSurface::new();
    t.open(Some("abc"), &mut surface);

    run(&mut t, &mut surface, &[Command::Left, Command::Left]);
    assert_eq!(t.value(), "a");
    t.handle(Command::Right, &mut surface);
    assert_eq!(t.value(), "a ");
    run(&mut t, &mut surface, &[Command::Left, Command::Left, Command::Left]);
    assert_eq!(t.value(), "");
}

#[test]
fn alpha_wraps_backwards_from_first_glyph() {
    let mut t = typer(Casing::Lower, 0);
    let mut surface = MockSurface::new();
    t.open(None, &mut surface);

    run(&mut t, &mut surface, &[Command::Down, Command::Left]);
    let last = t.session().map(|s| s.keyboard().len(Row::Alpha) - 1);
    assert_eq!(t.session().map(|s| s.index(Row::Alpha)), last);
    assert_eq!(surface.highlights.get(&Row::Alpha).copied(), last);
    t.handle(Command::Confirm, &mut surface);
    assert_eq!(t.value(), "z");
}

#[test]
fn hidden_rows_are_skipped_vertically() {
    let mut t = Typer::new(TyperOptions {
        secondary: SecondaryPolicy::Disabled,
        hidden_rows: vec![Row::Nums],
        ..TyperOptions::default()
    });
    let mut surface = MockSurface::new();
    t.open(None, &mut surface);
    assert!(!surface.is_shown(Row::Nums));
    assert!(!surface.is_shown(Row::Secondary));

    run(&mut t, &mut surface, &[Command::Down, Command::Down]);
    assert_eq!(surface.active, Some(Row::Symbols));
    t.handle(Command::Down, &mut surface);
    assert_eq!(surface.active, Some(Row::Symbols));
    t.handle(Command::Up, &mut surface);
    assert_eq!(surface.active, Some(Row::Alpha));

    t.set_row_hidden(Row::Nums, false);
    t.handle(Command::Down, &mut surface);
    assert_eq!(surface.active, Some(Row::Nums));
}

#[test]
fn buttons_row_wraps_between_accept_and_cancel() {
    let mut t = typer(Casing::Lower, 0);
    let mut surface = MockSurface::new();
    t.open(None, &mut surface);

    t.handle(Command::Up, &mut surface);
    assert_eq!(surface.active, Some(Row::Buttons));
    assert_eq!(surface.highlights.get(&Row::Buttons), Some(&0));
    run(&mut t, &mut surface, &[Command::Right, Command::Right, Command::Left]);
    assert_eq!(surface.highlights.get(&Row::Buttons), Some(&1));

    // boundary: nothing above the buttons
    t.handle(Command::Up, &mut surface);
    assert_eq!(surface.active, Some(Row::Buttons));
}

#[test]
fn ampersand_and_space_share_a_token() {
    let mut t = typer(Casing::Lower, 0);
    let mut surface = MockSurface::new();
    t.open(Some("a&b c"), &mut surface);

    assert_eq!(surface.encoded_buffer, "&#97;&#160;&#98;&#160;&#99;");
    assert_eq!(surface.encoded_buffer, encode_str("a&b c"));
    // no selected character on the value row
    assert_eq!(surface.encoded_current, "&#160;");
}

#[test]
fn initial_value_is_clamped_to_max_length() {
    let mut t = typer(Casing::Lower, 3);
    let mut surface = MockSurface::new();
    t.open(Some("abcdef"), &mut surface);
    assert_eq!(t.value(), "abc");
}
