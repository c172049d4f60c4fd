//! Comment gestures: place, compose, submit, drag, select, resolve, delete.

use annotate_api::{CommentPatch, NewComment, Request};

use crate::input::PointerEvent;
use crate::model::{CommentDraft, Confirmation, DragState, Mode, can_mutate};
use crate::state::EngineState;
use crate::sync::{Purpose, Task};

/// Click on the empty overlay in annotate mode.
///
/// An expanded comment swallows the first click, then an open draft does.
/// Only a click with nothing open places a new draft.
pub fn overlay_click(state: &mut EngineState, event: &PointerEvent) {
    if let Some(id) = state.selection.deselect() {
        log::debug!("Deselected comment {} by clicking the overlay", id);
        return;
    }
    if state.draft.is_some() {
        cancel_draft(state);
        return;
    }
    let Some(position) = event.position() else {
        log::debug!("No viewport rectangle, ignoring click");
        return;
    };
    log::debug!("💬 Draft placed at ({:.1}, {:.1})", position.x, position.y);
    state.draft = Some(CommentDraft::new(position));
}

pub fn draft_changed(state: &mut EngineState, text: String) {
    match state.draft.as_mut() {
        Some(draft) => draft.text = text,
        None => log::debug!("Draft text changed without an open draft"),
    }
}

/// Submit the open draft. The draft stays open until the service confirms.
pub fn submit_draft(state: &mut EngineState) -> Vec<Task> {
    let Some(draft) = state.draft.as_ref() else {
        return Vec::new();
    };
    let Some(text) = draft.submittable_text() else {
        log::debug!("Refusing to submit a blank comment");
        return Vec::new();
    };
    let (Some(author), Some(context)) = (state.user.clone(), state.context.clone()) else {
        log::debug!("Cannot submit a comment without a user and an open page");
        return Vec::new();
    };

    let comment = NewComment {
        page_id: context.page_id,
        x: draft.position.x,
        y: draft.position.y,
        text: text.to_string(),
        author,
    };
    log::debug!("Submitting comment at ({:.1}, {:.1})", comment.x, comment.y);
    vec![state.issue(
        Purpose::CreateComment,
        Request::CreateComment {
            project_id: context.project_id,
            comment,
        },
    )]
}

pub fn cancel_draft(state: &mut EngineState) {
    if state.draft.take().is_some() {
        log::debug!("Draft discarded");
    }
}

/// Pointer down on a pin. Authors start dragging their own pins in annotate mode.
pub fn pin_down(state: &mut EngineState, id: &str) {
    if state.mode != Mode::Annotate {
        return;
    }
    let Some(comment) = state.comment(id) else {
        log::debug!("Pointer down on unknown comment {}", id);
        return;
    };
    if !can_mutate(&comment.author, state.user()) {
        return;
    }
    let drag = DragState {
        comment_id: comment.id.clone(),
    };
    log::debug!("✋ Drag started for comment {}", drag.comment_id);
    state.selection.start_drag(drag);
}

/// Pointer moved while a pin is held: move it locally, no request.
pub fn drag_move(state: &mut EngineState, event: &PointerEvent) {
    let Some(position) = event.position() else {
        return;
    };
    let Some(id) = state.selection.drag().map(|d| d.comment_id.clone()) else {
        return;
    };
    if let Some(comment) = state.comment_mut(&id) {
        comment.x = position.x;
        comment.y = position.y;
        log::trace!("Dragging {} to ({:.1}, {:.1})", id, position.x, position.y);
    }
}

/// Pointer released after a drag: persist the final position.
pub fn drag_release(state: &mut EngineState) -> Vec<Task> {
    let Some(drag) = state.selection.end_drag() else {
        return Vec::new();
    };
    let Some(comment) = state.comment(&drag.comment_id) else {
        log::debug!("Dragged comment {} disappeared before release", drag.comment_id);
        return Vec::new();
    };
    let patch = CommentPatch::position(comment.x, comment.y);
    log::debug!(
        "Drag released for comment {} at ({:.1}, {:.1})",
        drag.comment_id,
        comment.x,
        comment.y
    );
    vec![state.issue(
        Purpose::MoveComment(drag.comment_id.clone()),
        Request::UpdateComment {
            comment_id: drag.comment_id,
            patch,
        },
    )]
}

/// Click on a pin that is not draggable toggles its expanded view.
pub fn pin_click(state: &mut EngineState, id: &str) {
    let Some(comment) = state.comment(id) else {
        return;
    };
    let draggable = state.mode == Mode::Annotate && can_mutate(&comment.author, state.user());
    if draggable {
        return;
    }
    let id = comment.id.clone();
    state.selection.toggle(id);
}

/// Select a comment from the list, or clear the selection.
pub fn select_comment(state: &mut EngineState, id: Option<String>) {
    match id {
        Some(id) if state.comment(&id).is_some() => state.selection.select(id),
        Some(id) => log::debug!("Cannot select unknown comment {}", id),
        None => {
            state.selection.deselect();
        }
    }
}

/// Flip resolved on the service. Local state follows the reply.
pub fn toggle_resolved(state: &mut EngineState, id: &str) -> Vec<Task> {
    let Some(comment) = state.comment(id) else {
        log::debug!("Cannot resolve unknown comment {}", id);
        return Vec::new();
    };
    let patch = CommentPatch::resolved(!comment.resolved);
    let comment_id = comment.id.clone();
    vec![state.issue(
        Purpose::ToggleResolved(comment_id.clone()),
        Request::UpdateComment { comment_id, patch },
    )]
}

/// Ask the user to confirm deleting a comment they wrote.
pub fn request_delete(state: &mut EngineState, id: &str) {
    let Some(comment) = state.comment(id) else {
        return;
    };
    if !can_mutate(&comment.author, state.user()) {
        log::debug!("Comment {} belongs to {}, not offering delete", id, comment.author);
        return;
    }
    let id = comment.id.clone();
    state.confirmation = Some(Confirmation::DeleteComment(id));
}

/// Issue the delete. The comment stays listed until the service confirms.
pub fn delete_comment(state: &mut EngineState, id: &str) -> Vec<Task> {
    let Some(comment) = state.comment(id) else {
        return Vec::new();
    };
    if !can_mutate(&comment.author, state.user()) {
        return Vec::new();
    }
    let comment_id = comment.id.clone();
    vec![state.issue(
        Purpose::DeleteComment(comment_id.clone()),
        Request::DeleteComment { comment_id },
    )]
}
