//! Exporting a page's annotations.

use annotate_api::{Comment, Line};
use serde::{Deserialize, Serialize};

use crate::state::{CommentCounts, EngineState, PageContext};

/// Output formats for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Numbered comment list, resolved items struck through
    #[default]
    Markdown,
    /// Full page snapshot
    Json,
}

impl ExportFormat {
    pub fn id(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No page is open")]
    NoPage,

    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything known about one page, for the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub context: PageContext,
    pub counts: CommentCounts,
    pub comments: Vec<Comment>,
    pub lines: Vec<Line>,
}

impl PageSnapshot {
    pub fn from_state(state: &EngineState) -> Option<Self> {
        Some(Self {
            context: state.context.clone()?,
            counts: state.counts(),
            comments: state.comments.clone(),
            lines: state.lines.clone(),
        })
    }
}

/// Render comments as a numbered Markdown list in list order.
///
/// Resolved comments are wrapped in `~~` so they render struck through.
pub fn comments_to_markdown(comments: &[Comment]) -> String {
    comments
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mark = if c.resolved { "~~" } else { "" };
            format!("{}. {mark}{}{mark}", i + 1, c.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export the open page in the given format.
pub fn export(state: &EngineState, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Markdown => {
            if state.context.is_none() {
                return Err(ExportError::NoPage);
            }
            Ok(comments_to_markdown(&state.comments))
        }
        ExportFormat::Json => {
            let snapshot = PageSnapshot::from_state(state).ok_or(ExportError::NoPage)?;
            Ok(serde_json::to_string_pretty(&snapshot)?)
        }
    }
}
