//! Sync coordination between local state and the persistence service.
//!
//! The engine never talks to the network itself. Every mutating gesture
//! produces [`Task`]s; the host runs them against a store and hands the
//! outcome back as a [`Completion`]. The ticket attached to each task says
//! what the call was for, which decides how its outcome is applied:
//!
//! - creates, resolve toggles and deletes are confirm-then-apply: local state
//!   only changes from a successful reply;
//! - drag releases follow an optimistic local move; a failed release forces a
//!   full reload of the comments, discarding the unconfirmed position;
//! - reloads replace the whole collection, never merge.
//!
//! Tickets also carry the navigation generation they were issued under.
//! Replies that arrive after the user switched page or project are dropped.

use annotate_api::{ApiError, Comment, Reply, Request};
use serde::{Deserialize, Serialize};

use crate::model::RecordId;
use crate::state::EngineState;
use crate::undo::UndoEntry;

/// Why a request was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "purpose", content = "id", rename_all = "snake_case")]
pub enum Purpose {
    LoadComments,
    LoadLines,
    CreateComment,
    MoveComment(RecordId),
    ToggleResolved(RecordId),
    DeleteComment(RecordId),
    CreateLine,
    DeleteLine(RecordId),
}

/// Identifies one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Issue order, unique per engine.
    pub seq: u64,
    /// Navigation generation at issue time.
    pub generation: u64,
    pub purpose: Purpose,
}

/// A request the host must execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub ticket: Ticket,
    pub request: Request,
}

/// A failed network call: transport error or non-2xx reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("network failure: {message}")]
pub struct SyncFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl SyncFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl From<&ApiError> for SyncFailure {
    fn from(error: &ApiError) -> Self {
        Self {
            status: error.status_code(),
            message: error.to_string(),
        }
    }
}

impl From<ApiError> for SyncFailure {
    fn from(error: ApiError) -> Self {
        SyncFailure::from(&error)
    }
}

/// Outcome of a task, fed back into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Reply, SyncFailure>,
}

impl Completion {
    pub fn new(ticket: Ticket, outcome: Result<Reply, SyncFailure>) -> Self {
        Self { ticket, outcome }
    }

    /// Successful completion.
    pub fn ok(ticket: Ticket, reply: Reply) -> Self {
        Self::new(ticket, Ok(reply))
    }

    /// Failed completion.
    pub fn failed(ticket: Ticket, failure: SyncFailure) -> Self {
        Self::new(ticket, Err(failure))
    }
}

/// Apply a completed request to local state.
///
/// Returns follow-up tasks (a reload after a failed drag release).
pub fn apply_completion(state: &mut EngineState, completion: Completion) -> Vec<Task> {
    let Completion { ticket, outcome } = completion;

    if ticket.generation != state.generation {
        log::debug!(
            "Dropping stale reply for {:?} (generation {} != {})",
            ticket.purpose,
            ticket.generation,
            state.generation
        );
        return Vec::new();
    }

    match outcome {
        Ok(reply) => apply_success(state, ticket.purpose, reply),
        Err(failure) => apply_failure(state, ticket.purpose, failure),
    }
}

fn apply_success(state: &mut EngineState, purpose: Purpose, reply: Reply) -> Vec<Task> {
    match (purpose, reply) {
        (Purpose::LoadComments, Reply::Comments(comments)) => {
            log::debug!("Loaded {} comments", comments.len());
            state.replace_comments(comments);
        }
        (Purpose::LoadLines, Reply::Lines(lines)) => {
            log::debug!("Loaded {} lines", lines.len());
            state.replace_lines(lines);
        }
        (Purpose::CreateComment, Reply::Comment(comment)) => {
            log::info!("Created comment {} at ({:.1}, {:.1})", comment.id, comment.x, comment.y);
            record_creation(state, &comment.author, UndoEntry::Comment(comment.id.clone()));
            state.comments.insert(0, comment);
            state.draft = None;
        }
        (Purpose::MoveComment(id), Reply::Comment(comment)) => {
            if state.selection.is_dragging(&id) {
                log::debug!("Comment {} is being dragged again, keeping local position", id);
            } else {
                replace_comment(state, comment);
            }
        }
        (Purpose::ToggleResolved(_), Reply::Comment(comment)) => {
            log::info!(
                "Comment {} {}",
                comment.id,
                if comment.resolved { "resolved" } else { "reopened" }
            );
            replace_comment(state, comment);
        }
        (Purpose::DeleteComment(id), Reply::Deleted) => {
            log::info!("🗑️ Deleted comment {}", id);
            state.undo.forget(&UndoEntry::Comment(id.clone()));
            state.remove_comment(&id);
        }
        (Purpose::CreateLine, Reply::Line(line)) => {
            log::info!("Created {} line {}", line.color, line.id);
            record_creation(state, &line.author, UndoEntry::Line(line.id.clone()));
            state.lines.push(line);
        }
        (Purpose::DeleteLine(id), Reply::Deleted) => {
            log::info!("🗑️ Deleted line {}", id);
            state.undo.forget(&UndoEntry::Line(id.clone()));
            state.remove_line(&id);
        }
        (purpose, reply) => {
            log::warn!("Unexpected reply {:?} for {:?}, ignoring", reply_name(&reply), purpose);
        }
    }
    Vec::new()
}

fn apply_failure(state: &mut EngineState, purpose: Purpose, failure: SyncFailure) -> Vec<Task> {
    match purpose {
        Purpose::LoadComments => log::error!("Failed to load comments: {}", failure),
        Purpose::LoadLines => log::error!("Failed to load lines: {}", failure),
        Purpose::CreateComment => {
            log::error!("Failed to add comment, keeping draft: {}", failure);
        }
        Purpose::MoveComment(id) => {
            log::warn!("Failed to move comment {}, reloading: {}", id, failure);
            return state.reload_comments().into_iter().collect();
        }
        Purpose::ToggleResolved(id) => {
            log::error!("Failed to resolve comment {}: {}", id, failure);
        }
        Purpose::DeleteComment(id) => {
            log::error!("Failed to delete comment {}: {}", id, failure);
        }
        Purpose::CreateLine => log::error!("Failed to create line: {}", failure),
        Purpose::DeleteLine(id) => log::error!("Failed to delete line {}: {}", id, failure),
    }
    Vec::new()
}

fn record_creation(state: &mut EngineState, author: &str, entry: UndoEntry) {
    if state.user.as_deref() == Some(author) {
        state.undo.record(entry);
    }
}

fn replace_comment(state: &mut EngineState, comment: Comment) {
    match state.comments.iter_mut().find(|c| c.id == comment.id) {
        Some(existing) => *existing = comment,
        None => log::debug!("Reply for comment {} which is no longer listed", comment.id),
    }
}

fn reply_name(reply: &Reply) -> &'static str {
    match reply {
        Reply::Comments(_) => "comments",
        Reply::Comment(_) => "comment",
        Reply::Lines(_) => "lines",
        Reply::Line(_) => "line",
        Reply::Deleted => "deleted",
    }
}
