//! Undo for annotations.
//!
//! Undo removes the most recent annotation the current user created. It never
//! restores anything: resolve toggles and drags are not undoable. Two policies
//! decide what "most recent" means:
//!
//! - [`UndoPolicy::Collections`] inspects the live collections. The newest
//!   line wins over the newest comment; each only counts if the current user
//!   wrote it.
//! - [`UndoPolicy::History`] keeps a bounded stack of the user's confirmed
//!   creations and walks it back, skipping records that are already gone.
//!
//! Either way the removal goes through the normal delete request, so it is
//! confirm-then-apply like any other delete.

use annotate_api::Request;
use serde::{Deserialize, Serialize};

use crate::model::{RecordId, can_mutate};
use crate::state::EngineState;
use crate::sync::{Purpose, Task};

// ============================================================================
// Policy
// ============================================================================

/// How undo picks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoPolicy {
    /// Newest own line, else newest own comment, read from the collections.
    #[default]
    Collections,
    /// Walk back an explicit per-user creation history.
    History,
}

/// Configuration for the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoConfig {
    /// Maximum number of creations to remember.
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self { max_history: 100 }
    }
}

// ============================================================================
// History stack
// ============================================================================

/// A creation that undo can take back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum UndoEntry {
    Comment(RecordId),
    Line(RecordId),
}

impl UndoEntry {
    pub fn description(&self) -> String {
        match self {
            UndoEntry::Comment(id) => format!("Add comment {id}"),
            UndoEntry::Line(id) => format!("Draw line {id}"),
        }
    }
}

/// Bounded stack of creations, most recent at the end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
    config: UndoConfig,
}

impl UndoStack {
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Push an entry, dropping the oldest once the stack is full.
    pub fn push(&mut self, entry: UndoEntry) {
        log::debug!("📝 Undo: pushed '{}'", entry.description());
        self.entries.push(entry);

        while self.entries.len() > self.config.max_history {
            self.entries.remove(0);
        }
    }

    pub fn last(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    /// Remove an entry wherever it sits.
    pub fn remove(&mut self, entry: &UndoEntry) {
        self.entries.retain(|e| e != entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("🗑️ Undo history cleared");
        }
        self.entries.clear();
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Undo policy plus the history it may need.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UndoController {
    policy: UndoPolicy,
    history: UndoStack,
}

impl UndoController {
    pub fn new(policy: UndoPolicy, config: UndoConfig) -> Self {
        Self {
            policy,
            history: UndoStack::with_config(config),
        }
    }

    pub fn policy(&self) -> UndoPolicy {
        self.policy
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Note a confirmed creation by the current user.
    pub fn record(&mut self, entry: UndoEntry) {
        if self.policy == UndoPolicy::History {
            self.history.push(entry);
        }
    }

    /// Forget a record that has been deleted.
    pub fn forget(&mut self, entry: &UndoEntry) {
        self.history.remove(entry);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Pick the record undo would delete, without changing anything but the
/// history's stale entries.
pub fn undo_target(state: &mut EngineState) -> Option<UndoEntry> {
    let user = state.user.clone()?;
    match state.undo.policy {
        UndoPolicy::Collections => {
            let newest_line = state
                .lines
                .last()
                .filter(|line| can_mutate(&line.author, Some(user.as_str())));
            if let Some(line) = newest_line {
                return Some(UndoEntry::Line(line.id.clone()));
            }
            state
                .comments
                .first()
                .filter(|comment| can_mutate(&comment.author, Some(user.as_str())))
                .map(|comment| UndoEntry::Comment(comment.id.clone()))
        }
        UndoPolicy::History => {
            while let Some(entry) = state.undo.history.last().cloned() {
                let live = match &entry {
                    UndoEntry::Comment(id) => state
                        .comment(id)
                        .is_some_and(|c| can_mutate(&c.author, Some(user.as_str()))),
                    UndoEntry::Line(id) => state
                        .line(id)
                        .is_some_and(|l| can_mutate(&l.author, Some(user.as_str()))),
                };
                if live {
                    return Some(entry);
                }
                log::debug!("Skipping stale undo entry '{}'", entry.description());
                state.undo.history.pop();
            }
            None
        }
    }
}

/// Delete the most recent own annotation, if there is one.
pub fn undo(state: &mut EngineState) -> Vec<Task> {
    let Some(entry) = undo_target(state) else {
        log::debug!("Nothing to undo");
        return Vec::new();
    };
    log::info!("⏪ Undo: '{}'", entry.description());

    let task = match entry {
        UndoEntry::Comment(id) => state.issue(
            Purpose::DeleteComment(id.clone()),
            Request::DeleteComment { comment_id: id },
        ),
        UndoEntry::Line(id) => state.issue(
            Purpose::DeleteLine(id.clone()),
            Request::DeleteLine { line_id: id },
        ),
    };
    vec![task]
}
