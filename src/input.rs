//! Raw pointer and keyboard input as delivered by the host surface.

use serde::{Deserialize, Serialize};

use crate::geometry::{Position, Rect, to_percent};
use crate::model::RecordId;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Emitted after `Up` when down and up hit the same target.
    Click,
}

/// What the pointer was over when the event fired.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "lowercase")]
pub enum PointerTarget {
    /// Empty overlay background.
    #[default]
    Overlay,
    /// A comment pin.
    Pin(RecordId),
    /// A rendered line.
    Line(RecordId),
}

/// A pointer event over the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client_x: f64,
    pub client_y: f64,
    #[serde(default)]
    pub target: PointerTarget,
    /// Live viewport rectangle, or `None` if the container is not laid out.
    #[serde(default)]
    pub rect: Option<Rect>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, client_x: f64, client_y: f64, rect: Option<Rect>) -> Self {
        Self {
            kind,
            client_x,
            client_y,
            target: PointerTarget::Overlay,
            rect,
        }
    }

    /// Set the hit target.
    pub fn on(mut self, target: PointerTarget) -> Self {
        self.target = target;
        self
    }

    /// Position in percent of the live rectangle, if there is one.
    pub fn position(&self) -> Option<Position> {
        self.rect
            .as_ref()
            .and_then(|rect| to_percent(self.client_x, self.client_y, rect))
    }
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Enter,
    /// A printable key, lowercase.
    Char(char),
}

impl KeyCode {
    /// Normalize printable keys to lowercase.
    pub fn normalized(self) -> Self {
        match self {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS. Either one counts.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}
