//! Router for the chat panel

use std::sync::{Arc, RwLock};

use axum::{
    Form, Json, Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;
use crate::chat::{PendingQuestion, exchange};
use crate::qa::SharedQaClient;

type SharedState = Arc<RwLock<AppState>>;

/// Run the exchange detached from the request that started it so a
/// browser navigating away can't leave the session stuck in flight.
fn spawn_exchange(state: SharedState, client: SharedQaClient, pending: PendingQuestion) {
    tokio::spawn(async move {
        let outcome = exchange(client.as_ref(), &pending).await;
        let mut shared_state = state.write().expect("Unable to write shared state");
        shared_state.panel.session.complete(&outcome);
    });
}

async fn toggle(State(state): State<SharedState>) -> Redirect {
    state
        .write()
        .expect("Unable to write shared state")
        .panel
        .toggle();
    Redirect::to("/")
}

async fn open(State(state): State<SharedState>) -> Redirect {
    state
        .write()
        .expect("Unable to write shared state")
        .panel
        .open();
    Redirect::to("/")
}

async fn close(State(state): State<SharedState>) -> Redirect {
    state
        .write()
        .expect("Unable to write shared state")
        .panel
        .close();
    Redirect::to("/")
}

/// Save what the user has typed so far. Keystroke syncs aren't
/// ordered with the submit, so one typed on a page that is now out of
/// date is dropped rather than bringing back a submitted question.
async fn input(State(state): State<SharedState>, Form(form): Form<public::InputForm>) -> Redirect {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let session = &mut shared_state.panel.session;
    match form.turns {
        Some(seen_turns) => {
            if !session.sync_input(&form.text, seen_turns) {
                tracing::debug!(
                    "Ignoring stale input typed against {} turns, transcript has {}",
                    seen_turns,
                    session.transcript().len()
                );
            }
        }
        None => session.update_input(&form.text),
    }
    Redirect::to("/")
}

/// Submit the question in the textarea. Does nothing when it's
/// blank or another question is still being answered.
async fn submit(State(state): State<SharedState>, Form(form): Form<public::InputForm>) -> Redirect {
    let (pending, client) = {
        let mut guard = state.write().expect("Unable to write shared state");
        let shared_state = &mut *guard;
        shared_state.panel.session.update_input(&form.text);
        let pending = shared_state.panel.session.begin_submit();
        (pending, Arc::clone(&shared_state.qa_client))
    };

    match pending {
        Some(pending) => spawn_exchange(Arc::clone(&state), client, pending),
        None => tracing::debug!("Ignoring submit, nothing to send or already in flight"),
    }

    Redirect::to("/")
}

/// Snapshot of the panel for scripts and tests
async fn chat_state(State(state): State<SharedState>) -> Json<public::ChatStateResponse> {
    let shared_state = state.read().expect("Unable to read shared state");
    let snapshot = shared_state.panel.session.current_state();

    Json(public::ChatStateResponse {
        open: shared_state.panel.is_open(),
        in_flight: snapshot.in_flight,
        pending_input: snapshot.pending_input,
        turns: shared_state.panel.session.rendered_turns(),
    })
}

/// Create the router for the chat panel's form actions
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/toggle", post(toggle))
        .route("/open", post(open))
        .route("/close", post(close))
        .route("/input", post(input))
        .route("/submit", post(submit))
}

/// Create the chat API router
pub fn api_router() -> Router<SharedState> {
    Router::new().route("/state", get(chat_state))
}
