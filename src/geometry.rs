//! Viewport geometry: client pixels to percentage coordinates and back.
//!
//! Annotations are stored as percentages of the viewport rectangle so they
//! stay put when the viewport is resized. Nothing is clamped: a pointer that
//! leaves the rectangle yields values outside `0..=100`, which is what lets
//! annotations follow content that scrolls or zooms under them.

use serde::{Deserialize, Serialize};

/// A position in percent of the viewport (`0..=100` inside the rectangle).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The viewport's bounding rectangle in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether the rectangle can be mapped against (non-zero, finite size).
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width != 0.0 && self.height != 0.0
    }
}

/// Map a client point to percentage coordinates of `rect`.
///
/// Returns `None` for a degenerate rectangle; callers treat that like a
/// missing rectangle and abort the gesture.
pub fn to_percent(client_x: f64, client_y: f64, rect: &Rect) -> Option<Position> {
    if !rect.is_usable() {
        return None;
    }
    Some(Position {
        x: (client_x - rect.left) / rect.width * 100.0,
        y: (client_y - rect.top) / rect.height * 100.0,
    })
}

/// Map percentage coordinates back to a client point inside `rect`.
pub fn to_client(position: Position, rect: &Rect) -> (f64, f64) {
    (
        rect.left + position.x / 100.0 * rect.width,
        rect.top + position.y / 100.0 * rect.height,
    )
}
