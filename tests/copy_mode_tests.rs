//! Integration tests for the copy-mode (xcopy) jump style.
//!
//! Exercises the full flow against a scripted tmux and checks the exact
//! copy-mode commands issued: leaving copy mode before painting, restoring
//! scroll position, selection and cursor afterwards, the scroll-parity and
//! stale-scroll handling, and the final cursor movement.

mod common;

use common::{ENTER_ALTERNATE, FakeCopy, FakeHost, FakePane, LEAVE_ALTERNATE, config};
use par_jump::app::{App, RunOutcome};
use par_jump::error::{InputError, JumpError};
use par_jump::input::KeyReader;
use par_jump::jump::JumpOutcome;
use par_jump_config::{Config, JumpStyle};

fn run(config: Config, host: &mut FakeHost) -> Result<RunOutcome, JumpError> {
    let reader = KeyReader::new(config.input_timeout);
    App::new(config, reader).run(host)
}

/// Two rows, three matches of `ab`, copy mode scrolled back 10 lines.
fn copy_pane() -> FakePane {
    FakePane::new("ab ab\nxx ab").in_copy_mode(10, (1, 1))
}

fn with_selection(
    mut pane: FakePane,
    selection: (i64, i64, i64, i64),
    rectangle: bool,
) -> FakePane {
    let copy = pane.copy.take().unwrap();
    pane.copy = Some(FakeCopy {
        selection: Some(selection),
        rectangle,
        ..copy
    });
    pane
}

// ---------------------------------------------------------------------------
// Restoring copy mode around the overlay
// ---------------------------------------------------------------------------

#[test]
fn copy_mode_is_left_for_painting_and_restored() {
    let mut host = FakeHost::new(copy_pane()).with_keys(&["d"]);
    let outcome = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();

    assert_eq!(outcome, RunOutcome::Jumped(JumpOutcome::Moved));
    assert_eq!(
        host.copy_keys(),
        vec![
            // before painting
            "cancel",
            // restore scroll position and copy cursor (1, 1)
            "goto-line 10",
            "-N 1 cursor-down",
            "start-of-line",
            "-N 1 cursor-right",
            // jump to (3, 0)
            "-N 1 cursor-up",
            "start-of-line",
            "-N 3 cursor-right",
            "begin-selection",
        ]
    );
    assert_eq!(host.count("copy-mode"), 1);
    assert_eq!(host.tty_writes[0], ENTER_ALTERNATE);
    assert_eq!(host.tty_writes[2], LEAVE_ALTERNATE);
}

#[test]
fn copy_mode_window_is_captured() {
    let mut host = FakeHost::new(copy_pane()).with_keys(&["d"]);
    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();

    let capture = host
        .subcommands()
        .into_iter()
        .find(|args| args[0] == "capture-pane")
        .unwrap();
    assert_eq!(
        capture,
        vec!["capture-pane", "-t", "%1", "-S", "-10", "-E", "-9", "-p"]
    );
}

#[test]
fn scroll_position_follows_history_parity() {
    let mut pane = copy_pane();
    pane.history_after = 101;
    let mut host = FakeHost::new(pane).with_keys(&["d"]);

    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();
    assert_eq!(host.copy_keys()[1], "goto-line 9");
}

#[test]
fn painting_on_primary_screen_moves_scroll_position() {
    let mut pane = copy_pane();
    pane.alternate_screen_option = false;
    let mut host = FakeHost::new(pane).with_keys(&["d"]);

    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();
    // overlay paint and snapshot redraw each push one screen (2 rows) into history
    assert_eq!(host.copy_keys()[1], "goto-line 14");
}

#[test]
fn stale_scroll_skips_the_jump() {
    let mut pane = copy_pane();
    pane.history_after = 4;
    let mut host = FakeHost::new(pane).with_keys(&["d"]);

    let err = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap_err();

    assert!(matches!(
        err,
        JumpError::StaleScroll {
            scroll_position: 10,
            history_size: 4
        }
    ));
    assert!(err.is_cancel());
    assert_eq!(host.copy_keys(), vec!["cancel"]);
    assert_eq!(host.tty_writes.last().unwrap().as_slice(), LEAVE_ALTERNATE);
}

#[test]
fn label_timeout_restores_copy_mode() {
    let mut host = FakeHost::new(copy_pane());
    let err = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap_err();

    assert!(matches!(err, JumpError::Input(InputError::Timeout(_))));
    assert_eq!(
        host.copy_keys(),
        vec![
            "cancel",
            "goto-line 10",
            "-N 1 cursor-down",
            "start-of-line",
            "-N 1 cursor-right",
        ]
    );
    assert_eq!(host.count("copy-mode"), 1);
    assert_eq!(host.tty_writes.last().unwrap().as_slice(), LEAVE_ALTERNATE);
}

#[test]
fn unknown_label_restores_selection_and_cursor() {
    let pane = with_selection(
        FakePane::new("ab ab\nxx ab").in_copy_mode(10, (2, 1)),
        (0, 90, 2, 91),
        false,
    );
    let mut host = FakeHost::new(pane).with_keys(&["z"]);

    let err = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap_err();

    assert!(matches!(err, JumpError::InvalidLabel(_)));
    assert_eq!(
        host.copy_keys(),
        vec![
            "cancel",
            "goto-line 10",
            "begin-selection",
            "-N 1 cursor-down",
            "start-of-line",
            "-N 2 cursor-right",
        ]
    );
}

#[test]
fn failed_prompt_restores_copy_mode() {
    let mut host = FakeHost::new(copy_pane());
    host.fail_command = Some("command-prompt");

    let err = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap_err();

    assert!(matches!(err, JumpError::Host(_)));
    assert_eq!(&host.copy_keys()[1..3], &["goto-line 10", "-N 1 cursor-down"]);
    assert_eq!(host.tty_writes.last().unwrap().as_slice(), LEAVE_ALTERNATE);
}

#[test]
fn failed_copy_mode_restore_still_leaves_alternate_screen() {
    let mut host = FakeHost::new(copy_pane()).with_keys(&["d"]);
    host.fail_command = Some("copy-mode");

    let err = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap_err();

    assert!(matches!(err, JumpError::Host(_)));
    assert!(!err.is_cancel());
    assert_eq!(host.tty_writes.last().unwrap().as_slice(), LEAVE_ALTERNATE);
    // no jump after a failed restore
    assert_eq!(host.copy_keys(), vec!["cancel"]);
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

#[test]
fn selection_is_replayed_and_extended_past_the_target() {
    // anchor (0, 0), other end (2, 1) once shifted out of history
    let pane = with_selection(
        FakePane::new("ab ab\nxx ab").in_copy_mode(10, (2, 1)),
        (0, 90, 2, 91),
        false,
    );
    let mut host = FakeHost::new(pane).with_keys(&["j"]);

    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();

    assert_eq!(
        host.copy_keys(),
        vec![
            "cancel",
            "goto-line 10",
            // anchor is where the cursor already is
            "begin-selection",
            "-N 1 cursor-down",
            "start-of-line",
            "-N 2 cursor-right",
            // target (3, 0) lies after the anchor, so one more cell
            "-N 1 cursor-up",
            "start-of-line",
            "-N 4 cursor-right",
        ]
    );
}

#[test]
fn rectangle_selection_is_replayed() {
    let pane = with_selection(
        FakePane::new("ab ab\nxx ab").in_copy_mode(10, (2, 1)),
        (0, 90, 2, 91),
        true,
    );
    let mut host = FakeHost::new(pane).with_keys(&["j"]);

    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();
    assert_eq!(&host.copy_keys()[2..4], &["begin-selection", "rectangle-on"]);
}

#[test]
fn linewise_selection_is_replayed() {
    // ends at column 5, the end of "xx ab"
    let pane = with_selection(
        FakePane::new("ab ab\nxx ab").in_copy_mode(10, (5, 1)),
        (0, 90, 5, 91),
        false,
    );
    let mut host = FakeHost::new(pane).with_keys(&["j"]);

    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();
    assert_eq!(host.copy_keys()[2], "select-line");
}

// ---------------------------------------------------------------------------
// Single matches
// ---------------------------------------------------------------------------

#[test]
fn single_match_enters_copy_mode() {
    let mut host = FakeHost::new(FakePane::new("xx ab"));
    let outcome = run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();

    assert_eq!(outcome, RunOutcome::Jumped(JumpOutcome::Moved));
    assert_eq!(host.count("copy-mode"), 1);
    assert_eq!(
        host.copy_keys(),
        vec!["start-of-line", "-N 3 cursor-right", "begin-selection"]
    );
    assert!(host.tty_writes.is_empty());
}

#[test]
fn single_match_without_auto_begin() {
    let mut host = FakeHost::new(FakePane::new("xx ab"));
    let mut config = config(JumpStyle::Xcopy, "ab");
    config.auto_begin_selection = false;

    run(config, &mut host).unwrap();
    assert_eq!(host.copy_keys(), vec!["start-of-line", "-N 3 cursor-right"]);
}

#[test]
fn single_match_in_copy_mode_moves_from_copy_cursor() {
    let mut host = FakeHost::new(FakePane::new("xx ab").in_copy_mode(0, (0, 0)));
    run(config(JumpStyle::Xcopy, "ab"), &mut host).unwrap();

    assert_eq!(host.count("copy-mode"), 0);
    assert_eq!(
        host.copy_keys(),
        vec!["start-of-line", "-N 3 cursor-right", "begin-selection"]
    );
}

// ---------------------------------------------------------------------------
// Mouse style
// ---------------------------------------------------------------------------

#[test]
fn mouse_style_cancels_copy_mode_first() {
    let mut host = FakeHost::new(FakePane::new("xx ab").in_copy_mode(3, (0, 0)));
    let outcome = run(config(JumpStyle::Mouse, "ab"), &mut host).unwrap();

    assert!(matches!(outcome, RunOutcome::Jumped(JumpOutcome::Printed(_))));
    assert_eq!(host.copy_keys(), vec!["cancel"]);
    let capture = host
        .subcommands()
        .into_iter()
        .find(|args| args[0] == "capture-pane")
        .unwrap();
    assert!(!capture.contains(&"-S".to_string()));
}
