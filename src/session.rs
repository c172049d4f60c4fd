//! Async driver that runs engine tasks against a [`Store`].

use std::collections::VecDeque;

use annotate_api::{ApiError, Page, Store};

use crate::engine::Engine;
use crate::message::Message;
use crate::sync::{Completion, SyncFailure, Task};

/// An engine wired to a store.
///
/// Tasks run one at a time in the order they were issued. Follow-up tasks
/// produced by a completion are queued behind whatever is already waiting.
pub struct Session<S: Store> {
    engine: Engine,
    store: S,
}

impl<S: Store> Session<S> {
    pub fn new(engine: Engine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Update the engine without running the resulting tasks.
    ///
    /// Lets callers hold requests back and complete them later, out of order.
    pub fn send(&mut self, message: Message) -> Vec<Task> {
        self.engine.update(message)
    }

    /// Update the engine and run every resulting task to completion.
    /// Returns the number of requests executed.
    pub async fn dispatch(&mut self, message: Message) -> usize {
        let tasks = self.engine.update(message);
        self.drain(tasks).await
    }

    /// Dispatch messages in order.
    pub async fn run<I>(&mut self, messages: I) -> usize
    where
        I: IntoIterator<Item = Message>,
    {
        let mut executed = 0;
        for message in messages {
            executed += self.dispatch(message).await;
        }
        executed
    }

    /// Run tasks, including any follow-ups they produce.
    pub async fn drain(&mut self, tasks: Vec<Task>) -> usize {
        let mut queue: VecDeque<Task> = tasks.into();
        let mut executed = 0;
        while let Some(task) = queue.pop_front() {
            let completion = self.execute(task).await;
            executed += 1;
            queue.extend(self.engine.update(Message::Completed(completion)));
        }
        executed
    }

    /// Run one task against the store without feeding the result back.
    pub async fn execute(&self, task: Task) -> Completion {
        log::debug!(
            "→ {:?} {} for {:?}",
            task.request.method(),
            task.request.path(),
            task.ticket.purpose
        );
        let outcome = self
            .store
            .execute(&task.request)
            .await
            .map_err(|e| {
                log::warn!("Request {} failed: {}", task.request.path(), e);
                SyncFailure::from(&e)
            });
        Completion::new(task.ticket, outcome)
    }

    /// Open the first page of a project, by display order.
    pub async fn open_first_page(&mut self, project_id: &str) -> Result<Option<Page>, ApiError> {
        let pages = self.store.list_pages(project_id).await?;
        let Some(page) = pages.into_iter().min_by_key(|p| p.order) else {
            log::warn!("Project {} has no pages", project_id);
            return Ok(None);
        };
        self.dispatch(Message::OpenPage {
            project_id: project_id.to_string(),
            page_id: page.id.clone(),
        })
        .await;
        Ok(Some(page))
    }

    /// Open a page by id, checking that it belongs to the project.
    pub async fn open_page(&mut self, project_id: &str, page_id: &str) -> Result<Page, ApiError> {
        let pages = self.store.list_pages(project_id).await?;
        let page = pages
            .into_iter()
            .find(|p| p.id == page_id)
            .ok_or_else(|| ApiError::not_found("page"))?;
        self.dispatch(Message::OpenPage {
            project_id: project_id.to_string(),
            page_id: page.id.clone(),
        })
        .await;
        Ok(page)
    }
}
