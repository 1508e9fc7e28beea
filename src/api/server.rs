use std::sync::{Arc, RwLock};

use anyhow::Result;
use axum::middleware;
use axum::{Router, extract::Request, response::Response};
use http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::core::logging::init_tracing;
use crate::qa::{HttpQaClient, SharedQaClient};

// The page changes with every exchange so it must never be cached
async fn set_no_cache(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

pub fn app(shared_state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        // Page and chat panel form actions
        .merge(routes::web::router())
        .nest("/chat", routes::chat::router())
        // JSON API routes
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(set_no_cache)),
        )
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    init_tracing(&format!(
        "{}=debug,tower_http=debug",
        env!("CARGO_CRATE_NAME")
    ));

    let qa_client: SharedQaClient = Arc::new(HttpQaClient::new(&config.qa_api_url));
    tracing::info!(
        "Sending questions to {} as thread {}",
        config.qa_api_url,
        config.thread_id
    );

    let app_state = AppState::new(&config, qa_client);
    let shared_state = Arc::new(RwLock::new(app_state));
    let app = app(Arc::clone(&shared_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
