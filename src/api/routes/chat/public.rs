//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::RenderedTurn;

/// Form body posted by the chat textarea
#[derive(Deserialize)]
pub struct InputForm {
    #[serde(default)]
    pub text: String,
    /// Number of turns on the page the text was typed on. Lets a
    /// keystroke sync that arrives after a submit be told apart.
    #[serde(default)]
    pub turns: Option<usize>,
}

#[derive(Serialize)]
pub struct ChatStateResponse {
    pub open: bool,
    pub in_flight: bool,
    pub pending_input: String,
    pub turns: Vec<RenderedTurn>,
}
