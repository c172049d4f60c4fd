//! Annotate API - client for the annotation persistence service.
//!
//! Wire records, the request vocabulary the interaction engine depends on,
//! and two [`Store`] implementations: [`HttpStore`] talks to the real service
//! over HTTP, [`MemoryStore`] keeps everything in process.

mod error;
mod http;
mod memory;
mod model;
mod store;

pub use error::ApiError;
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use model::{Comment, CommentPatch, Line, LineColor, NewComment, NewLine, Page, RecordId};
pub use store::{Method, Reply, Request, RequestKind, Store};
