//! Annotate - interaction engine for comments and lines over embedded pages.
//!
//! Pointer and keyboard input over a viewport becomes positioned annotation
//! records, kept consistent with a remote store through confirmed replies and
//! reload-on-failure. The engine itself is pure state plus messages; the
//! [`session`] module drives it against any [`annotate_api::Store`].

pub mod cli;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod handlers;
pub mod input;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod session;
pub mod state;
pub mod sync;
pub mod undo;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use engine::{CommentView, Engine, EngineView, LineView};
pub use message::Message;
pub use session::Session;
pub use sync::{Completion, Purpose, SyncFailure, Task, Ticket};
