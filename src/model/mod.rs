//! Engine-side data models.

mod gesture;
mod mode;

pub use annotate_api::{Comment, Line, LineColor, RecordId};
pub use gesture::{CommentDraft, Confirmation, DragState, DrawGesture, PreviewLine};
pub use mode::Mode;

/// Whether `user` may drag, erase or delete a record written by `author`.
///
/// Signed-out sessions can mutate nothing.
pub fn can_mutate(author: &str, user: Option<&str>) -> bool {
    user.is_some_and(|user| user == author)
}
