//! Property-style checks from the testable-properties section: invariants
//! that must hold regardless of the specific sequence of operations that led
//! to them.

use pretty_assertions::assert_eq;
use vtscreen::{ActiveScreen, Pos, Selection, SelectionState, Terminal};

/// The scrollback ring never exceeds its configured bound, no matter how
/// many lines are pushed through it.
#[test]
fn scrollback_ring_never_exceeds_bound() {
    let mut term = Terminal::new(5, 10);
    term.swap_screens(ActiveScreen::Primary, false, false);

    for _ in 0..500 {
        term.scroll_active_region(1);
        assert!(term.scrollback().len() <= term.scrollback().max_lines());
    }
}

/// Repainting without any intervening output must not perturb an active
/// selection's endpoints.
#[test]
fn selection_stable_across_repaint_with_no_output() {
    let mut term = Terminal::new(10, 20);
    term.selection = Selection {
        state: SelectionState::CharSelecting,
        start: Pos { row: 2, col: 3 },
        end: Pos { row: 4, col: 7 },
        anchor: Pos { row: 2, col: 3 },
        rectangular: false,
    };
    let before = term.selection;

    // A "repaint" at this layer is simply reading the current screen state;
    // it must not mutate selection.
    let _ = term.screen().line(0).visible_text();
    let _ = term.screen().cursor();

    assert_eq!(term.selection, before);
}

/// `resize(r, c); resize(r, c)` is idempotent: applying the same size twice
/// leaves the screen identical to applying it once.
#[test]
fn resize_is_idempotent() {
    let mut term = Terminal::new(24, 80);
    term.resize(30, 100);
    let after_first = term.screen().line(0).visible_text();
    let cursor_first = *term.screen().cursor();

    term.resize(30, 100);
    assert_eq!(term.screen().line(0).visible_text(), after_first);
    assert_eq!(*term.screen().cursor(), cursor_first);
}
