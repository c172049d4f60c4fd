//! Ephemeral gesture state: drafts, line construction, drags, confirmations.
//!
//! None of this is persisted. It lives between the first event of a gesture
//! and the event that completes or abandons it.

use annotate_api::{LineColor, RecordId};
use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// An uncommitted comment between "click to place" and submit/cancel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentDraft {
    pub position: Position,
    pub text: String,
}

impl CommentDraft {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            text: String::new(),
        }
    }

    /// Text as it would be submitted, or `None` if it is blank.
    pub fn submittable_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// State for a line currently being drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DrawGesture {
    /// Waiting for the first click.
    #[default]
    Armed,
    /// First point placed, waiting for the second click.
    Pending {
        start: Position,
        /// Last pointer position seen since the first click.
        preview: Option<Position>,
    },
}

impl DrawGesture {
    /// Check if a line is in progress.
    pub fn is_pending(&self) -> bool {
        matches!(self, DrawGesture::Pending { .. })
    }

    /// Dashed guide line for rendering, drawn in the currently selected color.
    pub fn preview_line(&self, color: &LineColor) -> Option<PreviewLine> {
        match self {
            DrawGesture::Pending {
                start,
                preview: Some(end),
            } => Some(PreviewLine {
                x1: start.x,
                y1: start.y,
                x2: end.x,
                y2: end.y,
                color: color.clone(),
            }),
            _ => None,
        }
    }
}

/// Guide line shown between the first click and the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: LineColor,
}

/// An in-progress drag of a comment pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub comment_id: RecordId,
}

/// A destructive action waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Confirmation {
    DeleteComment(RecordId),
    DeleteLine(RecordId),
}

impl Confirmation {
    /// Prompt shown to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteComment(_) => "Delete this comment?",
            Confirmation::DeleteLine(_) => "Delete this line?",
        }
    }
}
