//! Engine message types.
//!
//! Every input to the engine is a message, Elm architecture style: pointer and
//! keyboard events from the viewport, actions from the surrounding chrome, and
//! completions of requests the engine asked the host to run.

use annotate_api::LineColor;
use serde::{Deserialize, Serialize};

use crate::input::{KeyEvent, PointerEvent};
use crate::model::{Mode, RecordId};
use crate::sync::Completion;

/// Messages that can be sent to update engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Message {
    // Session
    /// A user signed in under this display name
    SignIn(String),
    /// The user signed out
    SignOut,
    /// Open a page of a project and load its annotations
    OpenPage {
        project_id: RecordId,
        page_id: RecordId,
    },
    /// Close the open page
    ClosePage,
    /// Reload comments and lines of the open page
    Reload,

    // Toolbar
    /// Switch interaction mode
    SetMode(Mode),
    /// Pick the color for new lines
    SetColor(LineColor),
    /// Arm or disarm the eraser
    SetEraser(bool),

    // Viewport
    /// Pointer event over the overlay, a pin or a line
    Pointer(PointerEvent),
    /// Key press with modifiers
    Key(KeyEvent),

    // Draft
    /// Draft text edited
    DraftChanged(String),
    /// Submit the draft
    SubmitDraft,
    /// Discard the draft
    CancelDraft,

    // Comments
    /// Select a comment from the list, or deselect with `None`
    SelectComment(Option<RecordId>),
    /// Flip a comment between open and resolved
    ToggleResolved(RecordId),
    /// Ask to delete a comment
    RequestDeleteComment(RecordId),

    // Confirmation
    /// Accept the pending confirmation
    Confirm,
    /// Reject the pending confirmation
    Dismiss,

    /// Delete the most recent own annotation
    Undo,

    /// A request finished
    Completed(Completion),
}
