//! Customizable keybindings.
//!
//! Maps key presses to engine intents. Text entry inside the draft box is the
//! host's business; only the keys below ever reach the engine's routing.

use serde::{Deserialize, Serialize};

use crate::input::{KeyCode, KeyEvent};

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: KeyCode,
    /// Require Ctrl or Cmd.
    #[serde(default)]
    pub primary: bool,
    /// Require Shift.
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: KeyCode) -> Self {
        Self {
            key,
            primary: false,
            shift: false,
        }
    }

    pub fn primary(key: KeyCode) -> Self {
        Self {
            key,
            primary: true,
            shift: false,
        }
    }

    /// Check if a key event matches this chord exactly.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.key.normalized() == self.key.normalized()
            && event.modifiers.primary() == self.primary
            && event.modifiers.shift == self.shift
    }
}

/// What a key press asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Undo,
    Cancel,
    Submit,
}

/// Keybinding configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Delete the most recent own annotation.
    pub undo: KeyChord,
    /// Abort the gesture in progress.
    pub cancel: KeyChord,
    /// Submit the comment draft.
    pub submit: KeyChord,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            undo: KeyChord::primary(KeyCode::Char('z')),
            cancel: KeyChord::plain(KeyCode::Escape),
            // Shift+Enter is a newline in the draft box, so it must not match.
            submit: KeyChord::plain(KeyCode::Enter),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the intent that corresponds to a key press, if any.
    pub fn intent_for(&self, event: &KeyEvent) -> Option<KeyIntent> {
        if self.cancel.matches(event) {
            Some(KeyIntent::Cancel)
        } else if self.undo.matches(event) {
            Some(KeyIntent::Undo)
        } else if self.submit.matches(event) {
            Some(KeyIntent::Submit)
        } else {
            None
        }
    }
}
