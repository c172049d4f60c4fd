//! Request vocabulary and the [`Store`] trait.
//!
//! [`Request`] covers exactly the calls the interaction engine makes. Each
//! variant knows its HTTP verb, path and JSON body, so transports only have to
//! move bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::{Comment, CommentPatch, Line, NewComment, NewLine, Page, RecordId};

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A call against the persistence service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// `GET /projects/{pid}/pages/{pageId}/comments`
    ListComments {
        project_id: RecordId,
        page_id: RecordId,
    },
    /// `POST /projects/{pid}/comments`
    CreateComment {
        project_id: RecordId,
        comment: NewComment,
    },
    /// `PATCH /comments/{id}`
    UpdateComment {
        comment_id: RecordId,
        patch: CommentPatch,
    },
    /// `DELETE /comments/{id}`
    DeleteComment { comment_id: RecordId },
    /// `GET /projects/{pid}/pages/{pageId}/lines`
    ListLines {
        project_id: RecordId,
        page_id: RecordId,
    },
    /// `POST /projects/{pid}/lines`
    CreateLine { project_id: RecordId, line: NewLine },
    /// `DELETE /lines/{id}`
    DeleteLine { line_id: RecordId },
}

/// Fieldless discriminant of a [`Request`], used for failure injection and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    ListComments,
    CreateComment,
    UpdateComment,
    DeleteComment,
    ListLines,
    CreateLine,
    DeleteLine,
}

impl Request {
    /// Discriminant of this request.
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::ListComments { .. } => RequestKind::ListComments,
            Request::CreateComment { .. } => RequestKind::CreateComment,
            Request::UpdateComment { .. } => RequestKind::UpdateComment,
            Request::DeleteComment { .. } => RequestKind::DeleteComment,
            Request::ListLines { .. } => RequestKind::ListLines,
            Request::CreateLine { .. } => RequestKind::CreateLine,
            Request::DeleteLine { .. } => RequestKind::DeleteLine,
        }
    }

    /// HTTP verb.
    pub fn method(&self) -> Method {
        match self {
            Request::ListComments { .. } | Request::ListLines { .. } => Method::Get,
            Request::CreateComment { .. } | Request::CreateLine { .. } => Method::Post,
            Request::UpdateComment { .. } => Method::Patch,
            Request::DeleteComment { .. } | Request::DeleteLine { .. } => Method::Delete,
        }
    }

    /// Path relative to the service base URL.
    pub fn path(&self) -> String {
        match self {
            Request::ListComments {
                project_id,
                page_id,
            } => format!("/projects/{project_id}/pages/{page_id}/comments"),
            Request::CreateComment { project_id, .. } => {
                format!("/projects/{project_id}/comments")
            }
            Request::UpdateComment { comment_id, .. } | Request::DeleteComment { comment_id } => {
                format!("/comments/{comment_id}")
            }
            Request::ListLines {
                project_id,
                page_id,
            } => format!("/projects/{project_id}/pages/{page_id}/lines"),
            Request::CreateLine { project_id, .. } => format!("/projects/{project_id}/lines"),
            Request::DeleteLine { line_id } => format!("/lines/{line_id}"),
        }
    }

    /// JSON body, for requests that carry one.
    pub fn body(&self) -> Result<Option<serde_json::Value>, ApiError> {
        let body = match self {
            Request::CreateComment { comment, .. } => Some(serde_json::to_value(comment)?),
            Request::UpdateComment { patch, .. } => Some(serde_json::to_value(patch)?),
            Request::CreateLine { line, .. } => Some(serde_json::to_value(line)?),
            _ => None,
        };
        Ok(body)
    }
}

/// Successful outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", content = "data", rename_all = "snake_case")]
pub enum Reply {
    Comments(Vec<Comment>),
    Comment(Comment),
    Lines(Vec<Line>),
    Line(Line),
    Deleted,
}

/// The persistence service as seen by the engine.
///
/// Mutations return the record exactly as stored, which callers apply to their
/// local state instead of the payload they sent.
#[async_trait]
pub trait Store: Send + Sync {
    /// Execute one request.
    async fn execute(&self, request: &Request) -> Result<Reply, ApiError>;

    /// List the pages of a project, ordered for display.
    async fn list_pages(&self, project_id: &str) -> Result<Vec<Page>, ApiError>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    async fn execute(&self, request: &Request) -> Result<Reply, ApiError> {
        (**self).execute(request).await
    }

    async fn list_pages(&self, project_id: &str) -> Result<Vec<Page>, ApiError> {
        (**self).list_pages(project_id).await
    }
}
