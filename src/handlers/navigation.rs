//! Sign-in and page navigation.
//!
//! Navigation is the reset point: the open page's collections and gestures
//! are dropped and the generation moves on, so replies still in flight for
//! the old page are ignored when they land.

use crate::model::RecordId;
use crate::state::{EngineState, PageContext};
use crate::sync::Task;

pub fn sign_in(state: &mut EngineState, name: String) {
    let name = name.trim().to_string();
    if name.is_empty() {
        log::warn!("Ignoring sign-in with an empty name");
        return;
    }
    if state.user.as_deref() != Some(name.as_str()) {
        state.undo.clear();
    }
    log::info!("👤 Signed in as {}", name);
    state.user = Some(name);
}

pub fn sign_out(state: &mut EngineState) {
    if let Some(name) = state.user.take() {
        log::info!("👋 {} signed out", name);
    }
    state.clear_page();
    state.context = None;
}

/// Open a page and request both of its collections.
pub fn open_page(state: &mut EngineState, project_id: RecordId, page_id: RecordId) -> Vec<Task> {
    state.clear_page();
    log::info!("📄 Opening page {} of project {}", page_id, project_id);
    state.context = Some(PageContext::new(project_id, page_id));
    reload(state)
}

pub fn close_page(state: &mut EngineState) {
    if let Some(context) = state.context.take() {
        log::info!("Closed page {}", context.page_id);
    }
    state.clear_page();
}

/// Re-fetch both collections of the open page.
pub fn reload(state: &mut EngineState) -> Vec<Task> {
    state
        .reload_comments()
        .into_iter()
        .chain(state.reload_lines())
        .collect()
}
