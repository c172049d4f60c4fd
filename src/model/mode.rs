//! Interaction modes.

use serde::{Deserialize, Serialize};

/// Which gesture handler receives viewport clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Overlay is inert; the embedded page receives input.
    Browse,
    /// Clicks place comments, own pins can be dragged.
    #[default]
    Annotate,
    /// Two-click line construction and line erasing.
    Draw,
}

impl Mode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Browse => "Browse",
            Mode::Annotate => "Annotate",
            Mode::Draw => "Draw",
        }
    }

    /// Whether the eraser toggle survives entering this mode.
    pub fn keeps_eraser(&self) -> bool {
        matches!(self, Mode::Draw)
    }

    /// Whether viewport clicks reach a gesture handler.
    pub fn captures_clicks(&self) -> bool {
        !matches!(self, Mode::Browse)
    }
}
