//! Selection and drag tracking, plus the counts derived from the comment list.

use annotate_api::Comment;
use serde::{Deserialize, Serialize};

use crate::model::{DragState, RecordId};

/// Which comment is expanded and which one is being dragged.
///
/// Starting a drag always selects the dragged comment, so `dragging` implies
/// `selected` at the moment the drag begins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<RecordId>,
    dragging: Option<DragState>,
}

impl Selection {
    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn select(&mut self, id: RecordId) {
        self.selected = Some(id);
    }

    /// Clear the selection. Returns the previously selected id.
    pub fn deselect(&mut self) -> Option<RecordId> {
        self.selected.take()
    }

    /// Select `id`, or deselect it if it already is.
    pub fn toggle(&mut self, id: RecordId) {
        if self.is_selected(&id) {
            self.selected = None;
        } else {
            self.selected = Some(id);
        }
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.dragging.as_ref()
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging.as_ref().is_some_and(|d| d.comment_id == id)
    }

    /// Begin dragging, selecting the dragged comment.
    pub fn start_drag(&mut self, drag: DragState) {
        self.selected = Some(drag.comment_id.clone());
        self.dragging = Some(drag);
    }

    pub fn end_drag(&mut self) -> Option<DragState> {
        self.dragging.take()
    }

    /// Drop any reference to a comment that no longer exists.
    pub fn forget(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selected = None;
        }
        if self.is_dragging(id) {
            self.dragging = None;
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.dragging = None;
    }
}

/// Open/resolved tallies shown next to the comment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentCounts {
    pub open: usize,
    pub resolved: usize,
    pub total: usize,
}

impl CommentCounts {
    pub fn from_comments(comments: &[Comment]) -> Self {
        let resolved = comments.iter().filter(|c| c.resolved).count();
        Self {
            open: comments.len() - resolved,
            resolved,
            total: comments.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(id: &str) -> DragState {
        DragState {
            comment_id: id.to_string(),
        }
    }

    #[test]
    fn test_drag_selects_comment() {
        let mut selection = Selection::default();
        selection.start_drag(drag("c1"));
        assert!(selection.is_selected("c1"));
        assert!(selection.is_dragging("c1"));

        selection.end_drag();
        assert!(selection.is_selected("c1"));
        assert!(selection.drag().is_none());
    }

    #[test]
    fn test_toggle_and_forget() {
        let mut selection = Selection::default();
        selection.toggle("c1".to_string());
        assert!(selection.is_selected("c1"));
        selection.toggle("c1".to_string());
        assert!(selection.selected().is_none());

        selection.start_drag(drag("c2"));
        selection.forget("c2");
        assert!(selection.selected().is_none());
        assert!(selection.drag().is_none());
    }

    #[test]
    fn test_counts() {
        let make = |id: &str, resolved: bool| Comment {
            id: id.to_string(),
            project_id: String::new(),
            page_id: "pg1".to_string(),
            x: 0.0,
            y: 0.0,
            text: "t".to_string(),
            author: "a".to_string(),
            resolved,
            created_at: String::new(),
        };
        let counts = CommentCounts::from_comments(&[make("1", false), make("2", true), make("3", false)]);
        assert_eq!(
            counts,
            CommentCounts {
                open: 2,
                resolved: 1,
                total: 3
            }
        );
    }
}
