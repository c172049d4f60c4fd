//! Message handlers for the interaction engine.
//!
//! Each handler processes one category of messages, keeping
//! [`Engine::update`](crate::Engine::update) a flat dispatch. Handlers mutate
//! [`EngineState`] in place and return the requests the host must run.

pub mod comment;
pub mod keyboard;
pub mod line;
pub mod navigation;

use crate::input::{PointerEvent, PointerKind, PointerTarget};
use crate::model::{Confirmation, Mode};
use crate::state::EngineState;
use crate::sync::Task;

/// Route a pointer event to the gesture it belongs to.
///
/// Move and up events follow an active drag regardless of mode. Clicks are
/// routed by mode: browse ignores the overlay, annotate places comments and
/// draw places line points. While a line is pending every click finishes it.
pub fn handle_pointer(state: &mut EngineState, event: PointerEvent) -> Vec<Task> {
    match event.kind {
        PointerKind::Move => {
            if state.selection.drag().is_some() {
                comment::drag_move(state, &event);
            } else if state.mode == Mode::Draw {
                line::preview(state, &event);
            }
            Vec::new()
        }
        PointerKind::Up => comment::drag_release(state),
        PointerKind::Down => {
            if state.confirmation.is_some() {
                return Vec::new();
            }
            if let PointerTarget::Pin(id) = &event.target {
                comment::pin_down(state, id);
            }
            Vec::new()
        }
        PointerKind::Click => {
            if state.confirmation.is_some() {
                log::debug!("Confirmation pending, ignoring click");
                return Vec::new();
            }
            if state.mode == Mode::Draw && state.drawing.is_pending() {
                return line::click(state, &event);
            }
            match &event.target {
                PointerTarget::Overlay if !state.mode.captures_clicks() => Vec::new(),
                PointerTarget::Overlay => match state.mode {
                    Mode::Draw => line::click(state, &event),
                    _ => {
                        comment::overlay_click(state, &event);
                        Vec::new()
                    }
                },
                PointerTarget::Pin(id) => {
                    comment::pin_click(state, id);
                    Vec::new()
                }
                PointerTarget::Line(id) => line::line_click(state, id),
            }
        }
    }
}

/// Switch interaction mode.
///
/// Leaving draw aborts a pending line. An open draft is cancelled. The eraser
/// only survives a switch into draw.
pub fn set_mode(state: &mut EngineState, mode: Mode) {
    if state.mode == Mode::Draw && mode != Mode::Draw {
        line::abort(state);
    }
    if state.mode != mode {
        comment::cancel_draft(state);
    }
    if !mode.keeps_eraser() {
        state.eraser = false;
    }
    if state.mode != mode {
        log::info!("🔀 Mode: {} -> {}", state.mode.name(), mode.name());
    }
    state.mode = mode;
}

/// Carry out the pending confirmation.
pub fn confirm(state: &mut EngineState) -> Vec<Task> {
    match state.confirmation.take() {
        Some(Confirmation::DeleteComment(id)) => comment::delete_comment(state, &id),
        Some(Confirmation::DeleteLine(id)) => line::delete_line(state, &id),
        None => Vec::new(),
    }
}

/// Drop the pending confirmation without acting on it.
pub fn dismiss(state: &mut EngineState) {
    if let Some(confirmation) = state.confirmation.take() {
        log::debug!("Dismissed '{}'", confirmation.prompt());
    }
}
