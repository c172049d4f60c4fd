//! Wire records exchanged with the persistence service.
//!
//! Coordinates are percentages of the viewport rectangle the annotation was
//! placed on. The service does not validate their range.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
pub type RecordId = String;

/// A positional comment pinned to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: RecordId,
    #[serde(default)]
    pub project_id: RecordId,
    pub page_id: RecordId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /projects/{pid}/comments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub page_id: RecordId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub author: String,
}

/// Body of `PATCH /comments/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl CommentPatch {
    /// Patch that only moves the comment.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Patch that only sets the resolved flag.
    pub fn resolved(resolved: bool) -> Self {
        Self {
            resolved: Some(resolved),
            ..Default::default()
        }
    }

    /// Apply this patch to a comment in place.
    pub fn apply_to(&self, comment: &mut Comment) {
        if let Some(text) = &self.text {
            comment.text = text.clone();
        }
        if let Some(resolved) = self.resolved {
            comment.resolved = resolved;
        }
        if let Some(x) = self.x {
            comment.x = x;
        }
        if let Some(y) = self.y {
            comment.y = y;
        }
    }
}

/// Stroke color of a line.
///
/// The toolbar only offers red, blue and green, but records written by other
/// clients may carry any string. Unknown values are kept verbatim so they can
/// be rendered as-is instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineColor {
    #[default]
    Red,
    Blue,
    Green,
    Other(String),
}

impl LineColor {
    /// Wire name of the color.
    pub fn name(&self) -> &str {
        match self {
            LineColor::Red => "red",
            LineColor::Blue => "blue",
            LineColor::Green => "green",
            LineColor::Other(raw) => raw,
        }
    }

    /// Stroke value for rendering. Unknown colors fall back to the raw string.
    pub fn stroke(&self) -> &str {
        match self {
            LineColor::Red => "#ef4444",
            LineColor::Blue => "#3b82f6",
            LineColor::Green => "#22c55e",
            LineColor::Other(raw) => raw,
        }
    }
}

impl From<String> for LineColor {
    fn from(value: String) -> Self {
        match value.as_str() {
            "red" => LineColor::Red,
            "blue" => LineColor::Blue,
            "green" => LineColor::Green,
            _ => LineColor::Other(value),
        }
    }
}

impl From<&str> for LineColor {
    fn from(value: &str) -> Self {
        LineColor::from(value.to_string())
    }
}

impl From<LineColor> for String {
    fn from(color: LineColor) -> Self {
        match color {
            LineColor::Other(raw) => raw,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A straight freehand line between two percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: RecordId,
    #[serde(default)]
    pub project_id: RecordId,
    pub page_id: RecordId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: LineColor,
    pub author: String,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /projects/{pid}/lines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLine {
    pub page_id: RecordId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: LineColor,
    pub author: String,
}

/// A page of a project: one embedded URL that annotations are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: RecordId,
    pub project_id: RecordId,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub created_at: String,
}
