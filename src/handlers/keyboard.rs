//! Keyboard routing.

use crate::handlers::{comment, dismiss, line};
use crate::input::KeyEvent;
use crate::keybindings::{KeyBindings, KeyIntent};
use crate::state::EngineState;
use crate::sync::Task;
use crate::undo;

/// Handle a key press. One key event maps to at most one intent.
pub fn handle_key(state: &mut EngineState, bindings: &KeyBindings, event: KeyEvent) -> Vec<Task> {
    match bindings.intent_for(&event) {
        Some(KeyIntent::Cancel) => {
            escape(state);
            Vec::new()
        }
        Some(KeyIntent::Undo) => undo::undo(state),
        Some(KeyIntent::Submit) if state.draft.is_some() => comment::submit_draft(state),
        Some(KeyIntent::Submit) | None => Vec::new(),
    }
}

/// Escape closes the innermost thing that is open.
///
/// Order: pending line, confirmation prompt, draft, expanded comment.
pub fn escape(state: &mut EngineState) {
    if line::abort(state) {
        return;
    }
    if state.confirmation.is_some() {
        dismiss(state);
        return;
    }
    if state.draft.is_some() {
        comment::cancel_draft(state);
        return;
    }
    if let Some(id) = state.selection.deselect() {
        log::debug!("Deselected comment {}", id);
    }
}
