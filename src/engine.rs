//! The annotation interaction engine.
//!
//! [`Engine`] turns [`Message`]s into state changes plus a list of [`Task`]s
//! for the host to run. It never performs I/O itself; see [`crate::session`]
//! for a driver that executes tasks against a store.

use annotate_api::{Comment, Line, LineColor};
use serde::{Deserialize, Serialize};

use crate::color_utils::{author_color, author_initial};
use crate::config::AppConfig;
use crate::handlers::{self, comment, keyboard, line, navigation};
use crate::keybindings::KeyBindings;
use crate::message::Message;
use crate::model::{CommentDraft, Confirmation, Mode, PreviewLine, RecordId};
use crate::state::{CommentCounts, EngineState};
use crate::sync::{self, Task};

/// Interaction engine: state plus the key map used to read key events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Engine {
    state: EngineState,
    bindings: KeyBindings,
}

impl Engine {
    pub fn new(state: EngineState, bindings: KeyBindings) -> Self {
        Self { state, bindings }
    }

    /// Build an engine from configuration, signed in if a user is configured.
    pub fn from_config(config: &AppConfig) -> Self {
        let prefs = &config.preferences;
        let mut state = EngineState::new(
            prefs.default_mode,
            prefs.default_color.clone(),
            prefs.undo_controller(),
        );
        if let Some(user) = &config.user {
            navigation::sign_in(&mut state, user.clone());
        }
        Self::new(state, config.keybindings.clone())
    }

    /// Process a message. Returns the requests the host must execute.
    pub fn update(&mut self, message: Message) -> Vec<Task> {
        let state = &mut self.state;
        match message {
            Message::SignIn(name) => {
                navigation::sign_in(state, name);
                Vec::new()
            }
            Message::SignOut => {
                navigation::sign_out(state);
                Vec::new()
            }
            Message::OpenPage {
                project_id,
                page_id,
            } => navigation::open_page(state, project_id, page_id),
            Message::ClosePage => {
                navigation::close_page(state);
                Vec::new()
            }
            Message::Reload => navigation::reload(state),

            Message::SetMode(mode) => {
                handlers::set_mode(state, mode);
                Vec::new()
            }
            Message::SetColor(color) => {
                line::set_color(state, color);
                Vec::new()
            }
            Message::SetEraser(armed) => {
                line::set_eraser(state, armed);
                Vec::new()
            }

            Message::Pointer(event) => handlers::handle_pointer(state, event),
            Message::Key(event) => keyboard::handle_key(state, &self.bindings, event),

            Message::DraftChanged(text) => {
                comment::draft_changed(state, text);
                Vec::new()
            }
            Message::SubmitDraft => comment::submit_draft(state),
            Message::CancelDraft => {
                comment::cancel_draft(state);
                Vec::new()
            }

            Message::SelectComment(id) => {
                comment::select_comment(state, id);
                Vec::new()
            }
            Message::ToggleResolved(id) => comment::toggle_resolved(state, &id),
            Message::RequestDeleteComment(id) => {
                comment::request_delete(state, &id);
                Vec::new()
            }

            Message::Confirm => handlers::confirm(state),
            Message::Dismiss => {
                handlers::dismiss(state);
                Vec::new()
            }

            Message::Undo => crate::undo::undo(state),

            Message::Completed(completion) => sync::apply_completion(state, completion),
        }
    }

    /// By-value form of [`Engine::update`].
    pub fn step(mut self, message: Message) -> (Self, Vec<Task>) {
        let tasks = self.update(message);
        (self, tasks)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn comments(&self) -> &[Comment] {
        &self.state.comments
    }

    pub fn lines(&self) -> &[Line] {
        &self.state.lines
    }

    pub fn selected_comment_id(&self) -> Option<&RecordId> {
        self.state.selection.selected()
    }

    pub fn dragging_comment_id(&self) -> Option<&RecordId> {
        self.state.selection.drag().map(|d| &d.comment_id)
    }

    pub fn draft(&self) -> Option<&CommentDraft> {
        self.state.draft.as_ref()
    }

    pub fn preview_line(&self) -> Option<PreviewLine> {
        self.state.drawing.preview_line(&self.state.color)
    }

    pub fn color(&self) -> &LineColor {
        &self.state.color
    }

    pub fn eraser(&self) -> bool {
        self.state.eraser
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.state.confirmation.as_ref()
    }

    pub fn counts(&self) -> CommentCounts {
        self.state.counts()
    }

    /// Everything a renderer needs, as one value.
    pub fn view(&self) -> EngineView {
        EngineView {
            mode: self.mode(),
            comments: self.state.comments.iter().map(CommentView::from_comment).collect(),
            lines: self.state.lines.iter().map(LineView::from_line).collect(),
            selected_comment_id: self.selected_comment_id().cloned(),
            dragging_comment_id: self.dragging_comment_id().cloned(),
            draft: self.state.draft.clone(),
            preview_line: self.preview_line(),
            color: self.state.color.clone(),
            eraser: self.state.eraser,
            confirmation: self.state.confirmation.clone(),
            counts: self.counts(),
        }
    }
}

/// Render-facing snapshot of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineView {
    pub mode: Mode,
    pub comments: Vec<CommentView>,
    pub lines: Vec<LineView>,
    pub selected_comment_id: Option<RecordId>,
    pub dragging_comment_id: Option<RecordId>,
    pub draft: Option<CommentDraft>,
    pub preview_line: Option<PreviewLine>,
    pub color: LineColor,
    pub eraser: bool,
    pub confirmation: Option<Confirmation>,
    pub counts: CommentCounts,
}

/// A comment with the pin decoration derived from its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub pin_color: String,
    pub initial: String,
}

impl CommentView {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            pin_color: author_color(&comment.author).to_string(),
            initial: author_initial(&comment.author),
            comment: comment.clone(),
        }
    }
}

/// A line with its resolved stroke. Unknown colors keep the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    #[serde(flatten)]
    pub line: Line,
    pub stroke: String,
}

impl LineView {
    pub fn from_line(line: &Line) -> Self {
        Self {
            stroke: line.color.stroke().to_string(),
            line: line.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AUTHOR_PALETTE;

    fn line(id: &str, color: LineColor) -> Line {
        Line {
            id: id.to_string(),
            project_id: "p1".to_string(),
            page_id: "pg1".to_string(),
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 10.0,
            color,
            author: "alice".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_view_decorates_comments_and_lines() {
        let mut state = EngineState::default();
        state.comments.push(Comment {
            id: "c1".to_string(),
            project_id: "p1".to_string(),
            page_id: "pg1".to_string(),
            x: 5.0,
            y: 5.0,
            text: "hi".to_string(),
            author: "christopher".to_string(),
            resolved: false,
            created_at: String::new(),
        });
        state.lines = vec![line("l1", LineColor::Blue), line("l2", LineColor::from("#abcdef"))];

        let view = Engine::new(state, KeyBindings::default()).view();
        assert_eq!(view.comments[0].pin_color, AUTHOR_PALETTE[3]);
        assert_eq!(view.comments[0].initial, "C");
        assert_eq!(view.comments[0].comment.id, "c1");
        assert_eq!(view.lines[0].stroke, "#3b82f6");
        assert_eq!(view.lines[1].stroke, "#abcdef");
    }

    #[test]
    fn test_view_rows_serialize_flat() {
        let row = LineView::from_line(&line("l1", LineColor::Red));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], "l1");
        assert_eq!(json["color"], "red");
        assert_eq!(json["stroke"], "#ef4444");
    }
}
