//! Line gestures: two-click construction, preview, eraser and color.

use annotate_api::{LineColor, NewLine, Request};

use crate::input::PointerEvent;
use crate::model::{Confirmation, DrawGesture, can_mutate};
use crate::state::EngineState;
use crate::sync::{Purpose, Task};

/// Click in draw mode: place the start point, or finish the line.
///
/// The second click always ends the gesture, whether or not the create
/// request later succeeds. The color is read now, not at the first click.
pub fn click(state: &mut EngineState, event: &PointerEvent) -> Vec<Task> {
    let (Some(author), Some(context)) = (state.user.clone(), state.context.clone()) else {
        log::debug!("Cannot draw without a user and an open page");
        return Vec::new();
    };
    let Some(position) = event.position() else {
        log::debug!("No viewport rectangle, ignoring click");
        return Vec::new();
    };

    match std::mem::take(&mut state.drawing) {
        DrawGesture::Armed => {
            log::debug!("✏️ Line started at ({:.1}, {:.1})", position.x, position.y);
            state.drawing = DrawGesture::Pending {
                start: position,
                preview: None,
            };
            Vec::new()
        }
        DrawGesture::Pending { start, .. } => {
            let line = NewLine {
                page_id: context.page_id,
                x1: start.x,
                y1: start.y,
                x2: position.x,
                y2: position.y,
                color: state.color.clone(),
                author,
            };
            log::debug!(
                "Line finished ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                line.x1,
                line.y1,
                line.x2,
                line.y2
            );
            vec![state.issue(
                Purpose::CreateLine,
                Request::CreateLine {
                    project_id: context.project_id,
                    line,
                },
            )]
        }
    }
}

/// Track the pointer for the dashed guide line.
pub fn preview(state: &mut EngineState, event: &PointerEvent) {
    if let DrawGesture::Pending { preview, .. } = &mut state.drawing {
        if let Some(position) = event.position() {
            *preview = Some(position);
        }
    }
}

/// Abort a line in progress. Returns whether there was one.
pub fn abort(state: &mut EngineState) -> bool {
    if state.drawing.is_pending() {
        state.drawing = DrawGesture::Armed;
        log::debug!("Line aborted");
        true
    } else {
        false
    }
}

/// Click on an existing line.
///
/// Authors erase immediately with the eraser armed and are asked to confirm
/// otherwise. Other users' lines do not react.
pub fn line_click(state: &mut EngineState, id: &str) -> Vec<Task> {
    let Some(line) = state.line(id) else {
        return Vec::new();
    };
    if !can_mutate(&line.author, state.user()) {
        log::debug!("Line {} belongs to {}, ignoring click", id, line.author);
        return Vec::new();
    }
    let id = line.id.clone();
    if state.eraser {
        log::debug!("🧽 Erasing line {}", id);
        delete_line(state, &id)
    } else {
        state.confirmation = Some(Confirmation::DeleteLine(id));
        Vec::new()
    }
}

/// Issue the delete. The line stays listed until the service confirms.
pub fn delete_line(state: &mut EngineState, id: &str) -> Vec<Task> {
    let Some(line) = state.line(id) else {
        return Vec::new();
    };
    if !can_mutate(&line.author, state.user()) {
        return Vec::new();
    }
    let line_id = line.id.clone();
    vec![state.issue(
        Purpose::DeleteLine(line_id.clone()),
        Request::DeleteLine { line_id },
    )]
}

/// Pick the color for the next line. Picking a color puts the eraser away.
///
/// Only toolbar colors are accepted; raw values exist to decode other
/// clients' records, never to write new ones.
pub fn set_color(state: &mut EngineState, color: LineColor) {
    if let LineColor::Other(raw) = &color {
        log::warn!("Ignoring unsupported line color '{}'", raw);
        return;
    }
    log::debug!("🎨 Line color: {}", color);
    state.color = color;
    state.eraser = false;
}

pub fn set_eraser(state: &mut EngineState, armed: bool) {
    log::debug!("Eraser {}", if armed { "armed" } else { "disarmed" });
    state.eraser = armed;
}
