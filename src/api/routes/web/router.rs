//! Router for the page served to the browser

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Html, routing::get};

use crate::api::page::{IndexContext, Page, templates};
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn index(
    State(state): State<SharedState>,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let ctx = {
        let shared_state = state.read().expect("Unable to read shared state");
        IndexContext::from_panel(&shared_state.panel)
    };
    let html = templates().render(&Page::Index.to_string(), &ctx)?;
    Ok(Html(html))
}

/// Create the web router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(index))
}
