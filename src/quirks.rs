//! Corrections for tmux reporting defects.
//!
//! Each defect gets exactly one function so a tmux upgrade that fixes (or
//! changes) one of them only touches one place.

use par_jump_tmux::RawSelection;

/// tmux reports selection rows relative to the un-scrolled history; move them
/// into the scrolled copy-mode window.
pub fn shift_selection_rows(
    selection: RawSelection,
    history_size: i64,
    scroll_position: i64,
) -> RawSelection {
    let shift = history_size - scroll_position;
    RawSelection {
        start_y: selection.start_y - shift,
        end_y: selection.end_y - shift,
        ..selection
    }
}

/// When a selection was extended backwards tmux reports the live cursor as
/// the selection start. Swap the ends so that `start` is the anchor.
pub fn swap_reversed_selection(selection: RawSelection, copy_cursor: (i64, i64)) -> RawSelection {
    if (selection.start_x, selection.start_y) != copy_cursor {
        return selection;
    }
    log::debug!("selection start is the copy cursor, swapping ends");
    RawSelection {
        start_x: selection.end_x,
        start_y: selection.end_y,
        end_x: selection.start_x,
        end_y: selection.start_y,
        ..selection
    }
}

/// Re-entering copy mode lands one line off when the history size changed
/// parity since the scroll position was recorded.
pub fn correct_scroll_parity(
    scroll_position: i64,
    recorded_history: i64,
    current_history: i64,
) -> i64 {
    if recorded_history.rem_euclid(2) != current_history.rem_euclid(2) {
        log::debug!(
            "history parity changed ({} -> {}), scroll {} -> {}",
            recorded_history,
            current_history,
            scroll_position,
            scroll_position - 1
        );
        scroll_position - 1
    } else {
        scroll_position
    }
}
