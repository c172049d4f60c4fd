//! Engine state.
//!
//! Everything the interaction engine knows lives in [`EngineState`]: the
//! signed-in user, the open page, both annotation collections and every piece
//! of in-progress gesture state. It is plain data and round-trips through
//! serde, so a host can snapshot it and tests can assert on it directly.

mod selection;

pub use selection::{CommentCounts, Selection};

use annotate_api::{Comment, Line, LineColor, Request};
use serde::{Deserialize, Serialize};

use crate::model::{CommentDraft, Confirmation, DrawGesture, Mode, RecordId};
use crate::sync::{Purpose, Task, Ticket};
use crate::undo::UndoController;

/// The page whose annotations are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub project_id: RecordId,
    pub page_id: RecordId,
}

impl PageContext {
    pub fn new(project_id: impl Into<RecordId>, page_id: impl Into<RecordId>) -> Self {
        Self {
            project_id: project_id.into(),
            page_id: page_id.into(),
        }
    }
}

/// Complete state of the interaction engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineState {
    /// Display name of the signed-in user, used as `author`.
    pub user: Option<String>,
    pub context: Option<PageContext>,
    /// Bumped on every navigation; replies from older generations are dropped.
    pub generation: u64,
    pub mode: Mode,
    /// Newest first.
    pub comments: Vec<Comment>,
    /// Oldest first.
    pub lines: Vec<Line>,
    pub selection: Selection,
    pub draft: Option<CommentDraft>,
    pub drawing: DrawGesture,
    /// Color used for the next completed line.
    pub color: LineColor,
    pub eraser: bool,
    pub confirmation: Option<Confirmation>,
    pub undo: UndoController,
    next_ticket: u64,
}

impl EngineState {
    pub fn new(mode: Mode, color: LineColor, undo: UndoController) -> Self {
        Self {
            mode,
            color,
            undo,
            ..Default::default()
        }
    }

    /// Stamp a request with a fresh ticket.
    pub fn issue(&mut self, purpose: Purpose, request: Request) -> Task {
        self.next_ticket += 1;
        Task {
            ticket: Ticket {
                seq: self.next_ticket,
                generation: self.generation,
                purpose,
            },
            request,
        }
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.next_ticket
    }

    /// Request the comment list for the open page.
    pub fn reload_comments(&mut self) -> Option<Task> {
        let context = self.context.clone()?;
        Some(self.issue(
            Purpose::LoadComments,
            Request::ListComments {
                project_id: context.project_id,
                page_id: context.page_id,
            },
        ))
    }

    /// Request the line list for the open page.
    pub fn reload_lines(&mut self) -> Option<Task> {
        let context = self.context.clone()?;
        Some(self.issue(
            Purpose::LoadLines,
            Request::ListLines {
                project_id: context.project_id,
                page_id: context.page_id,
            },
        ))
    }

    /// Replace the comment list wholesale with a server listing.
    pub fn replace_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        let stale: Vec<RecordId> = self
            .selection
            .selected()
            .into_iter()
            .chain(self.selection.drag().map(|d| &d.comment_id))
            .filter(|id| self.comment(id).is_none())
            .cloned()
            .collect();
        for id in stale {
            self.selection.forget(&id);
        }
    }

    /// Replace the line list wholesale with a server listing.
    pub fn replace_lines(&mut self, lines: Vec<Line>) {
        self.lines = lines;
    }

    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub fn comment_mut(&mut self, id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn remove_comment(&mut self, id: &str) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        self.selection.forget(id);
        Some(self.comments.remove(index))
    }

    pub fn remove_line(&mut self, id: &str) -> Option<Line> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Drop everything tied to the open page.
    ///
    /// Mode, color and eraser belong to the toolbar and survive.
    pub fn clear_page(&mut self) {
        self.generation += 1;
        self.comments.clear();
        self.lines.clear();
        self.selection.clear();
        self.draft = None;
        self.drawing = DrawGesture::Armed;
        self.confirmation = None;
        self.undo.clear();
    }

    pub fn counts(&self) -> CommentCounts {
        CommentCounts::from_comments(&self.comments)
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    #[test]
    fn test_reload_requires_open_page() {
        let mut state = EngineState::default();
        assert!(state.reload_comments().is_none());
        assert_eq!(state.issued(), 0);

        state.context = Some(PageContext::new("p1", "pg1"));
        let task = state.reload_lines().unwrap();
        assert_eq!(task.ticket.seq, 1);
        assert_eq!(task.ticket.purpose, Purpose::LoadLines);
        assert_eq!(task.request.path(), "/projects/p1/pages/pg1/lines");
    }

    #[test]
    fn test_clear_page_keeps_toolbar() {
        let mut state = EngineState::new(Mode::Draw, LineColor::Green, UndoController::default());
        state.eraser = true;
        state.draft = Some(CommentDraft::new(Position::new(1.0, 1.0)));
        state.clear_page();

        assert_eq!(state.generation, 1);
        assert!(state.draft.is_none());
        assert_eq!(state.mode, Mode::Draw);
        assert_eq!(state.color, LineColor::Green);
        assert!(state.eraser);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = EngineState::default();
        state.user = Some("alice".to_string());
        state.context = Some(PageContext::new("p1", "pg1"));
        state.drawing = DrawGesture::Pending {
            start: Position::new(10.0, 10.0),
            preview: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        let restored: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
