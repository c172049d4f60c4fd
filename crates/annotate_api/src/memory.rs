//! In-process [`Store`] with the same ordering rules as the service.
//!
//! Comments are listed newest first, lines oldest first. Failures can be
//! queued per request kind so callers can exercise their recovery paths.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{Comment, Line, Page, RecordId};
use crate::store::{Reply, Request, RequestKind, Store};

#[derive(Debug, Default)]
struct MemoryInner {
    /// Stored comments with their insertion sequence.
    comments: Vec<(u64, Comment)>,
    /// Stored lines with their insertion sequence.
    lines: Vec<(u64, Line)>,
    pages: Vec<Page>,
    next_seq: u64,
    /// Failures to return for the next requests of each kind.
    failures: HashMap<RequestKind, VecDeque<ApiError>>,
    offline: bool,
    log: Vec<RequestKind>,
}

impl MemoryInner {
    fn next_id(&mut self, prefix: &str) -> (u64, RecordId) {
        self.next_seq += 1;
        (self.next_seq, format!("{prefix}{}", self.next_seq))
    }

    fn take_failure(&mut self, kind: RequestKind) -> Option<ApiError> {
        if self.offline {
            return Some(ApiError::status(503, "service offline"));
        }
        self.failures.get_mut(&kind).and_then(VecDeque::pop_front)
    }
}

/// In-memory persistence service.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a page so it shows up in [`Store::list_pages`].
    pub fn add_page(&self, project_id: &str, url: &str, title: Option<&str>) -> Page {
        let mut inner = self.lock();
        let (_, id) = inner.next_id("pg");
        let order = inner
            .pages
            .iter()
            .filter(|p| p.project_id == project_id)
            .count() as i64;
        let page = Page {
            id,
            project_id: project_id.to_string(),
            url: url.to_string(),
            title: title.map(str::to_string),
            order,
            created_at: now(),
        };
        inner.pages.push(page.clone());
        page
    }

    /// Seed a comment as if another client had created it.
    pub fn seed_comment(&self, comment: Comment) {
        let mut inner = self.lock();
        let (seq, _) = inner.next_id("c");
        inner.comments.push((seq, comment));
    }

    /// Seed a line as if another client had created it.
    pub fn seed_line(&self, line: Line) {
        let mut inner = self.lock();
        let (seq, _) = inner.next_id("l");
        inner.lines.push((seq, line));
    }

    /// Make the next request of `kind` fail with a 500.
    pub fn fail_next(&self, kind: RequestKind) {
        self.fail_next_with(kind, ApiError::status(500, "injected failure"));
    }

    /// Make the next request of `kind` fail with the given error.
    pub fn fail_next_with(&self, kind: RequestKind, error: ApiError) {
        self.lock().failures.entry(kind).or_default().push_back(error);
    }

    /// Fail every request until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Kinds of all requests executed so far, in order.
    pub fn request_log(&self) -> Vec<RequestKind> {
        self.lock().log.clone()
    }

    /// Snapshot of a page's comments, in listing order.
    pub fn comments(&self, project_id: &str, page_id: &str) -> Vec<Comment> {
        list_comments(&self.lock(), project_id, page_id)
    }

    /// Snapshot of a page's lines, in listing order.
    pub fn lines(&self, project_id: &str, page_id: &str) -> Vec<Line> {
        list_lines(&self.lock(), project_id, page_id)
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn list_comments(inner: &MemoryInner, project_id: &str, page_id: &str) -> Vec<Comment> {
    let mut found: Vec<&(u64, Comment)> = inner
        .comments
        .iter()
        .filter(|(_, c)| c.project_id == project_id && c.page_id == page_id)
        .collect();
    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.into_iter().map(|(_, c)| c.clone()).collect()
}

fn list_lines(inner: &MemoryInner, project_id: &str, page_id: &str) -> Vec<Line> {
    let mut found: Vec<&(u64, Line)> = inner
        .lines
        .iter()
        .filter(|(_, l)| l.project_id == project_id && l.page_id == page_id)
        .collect();
    found.sort_by_key(|(seq, _)| *seq);
    found.into_iter().map(|(_, l)| l.clone()).collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn execute(&self, request: &Request) -> Result<Reply, ApiError> {
        let mut inner = self.lock();
        inner.log.push(request.kind());
        if let Some(error) = inner.take_failure(request.kind()) {
            log::debug!("MemoryStore: failing {:?}", request.kind());
            return Err(error);
        }

        match request {
            Request::ListComments {
                project_id,
                page_id,
            } => Ok(Reply::Comments(list_comments(&inner, project_id, page_id))),
            Request::CreateComment {
                project_id,
                comment,
            } => {
                let (seq, id) = inner.next_id("c");
                let created = Comment {
                    id,
                    project_id: project_id.clone(),
                    page_id: comment.page_id.clone(),
                    x: comment.x,
                    y: comment.y,
                    text: comment.text.clone(),
                    author: comment.author.clone(),
                    resolved: false,
                    created_at: now(),
                };
                inner.comments.push((seq, created.clone()));
                Ok(Reply::Comment(created))
            }
            Request::UpdateComment { comment_id, patch } => {
                let (_, comment) = inner
                    .comments
                    .iter_mut()
                    .find(|(_, c)| &c.id == comment_id)
                    .ok_or_else(|| ApiError::not_found("Comment"))?;
                patch.apply_to(comment);
                Ok(Reply::Comment(comment.clone()))
            }
            Request::DeleteComment { comment_id } => {
                let before = inner.comments.len();
                inner.comments.retain(|(_, c)| &c.id != comment_id);
                if inner.comments.len() == before {
                    return Err(ApiError::not_found("Comment"));
                }
                Ok(Reply::Deleted)
            }
            Request::ListLines {
                project_id,
                page_id,
            } => Ok(Reply::Lines(list_lines(&inner, project_id, page_id))),
            Request::CreateLine { project_id, line } => {
                let (seq, id) = inner.next_id("l");
                let created = Line {
                    id,
                    project_id: project_id.clone(),
                    page_id: line.page_id.clone(),
                    x1: line.x1,
                    y1: line.y1,
                    x2: line.x2,
                    y2: line.y2,
                    color: line.color.clone(),
                    author: line.author.clone(),
                    created_at: now(),
                };
                inner.lines.push((seq, created.clone()));
                Ok(Reply::Line(created))
            }
            Request::DeleteLine { line_id } => {
                let before = inner.lines.len();
                inner.lines.retain(|(_, l)| &l.id != line_id);
                if inner.lines.len() == before {
                    return Err(ApiError::not_found("Line"));
                }
                Ok(Reply::Deleted)
            }
        }
    }

    async fn list_pages(&self, project_id: &str) -> Result<Vec<Page>, ApiError> {
        let inner = self.lock();
        if inner.offline {
            return Err(ApiError::status(503, "service offline"));
        }
        let mut pages: Vec<Page> = inner
            .pages
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }
}
