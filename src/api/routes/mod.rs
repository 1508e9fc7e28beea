//! API routes module

pub mod chat;
pub mod web;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat state routes
        .nest("/chat", chat::api_router())
}
