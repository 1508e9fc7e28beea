use std::time::Duration;

use serde::Serialize;

use super::format::format_message;
use super::models::{Role, Transcript, Turn};
use crate::qa::{QaClient, QaError, QaRequest, QaResponse};

pub const NO_ANSWER_MESSAGE: &str = "Sorry, I could not process your request.";
pub const ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const TIMEOUT_MESSAGE: &str =
    "Sorry, the assistant took too long to respond. Please try again.";

/// How a single exchange with the question answering service ended.
///
/// The user only ever sees one of a few fallback messages but the
/// cause is kept so it can be logged.
#[derive(Clone, Debug, PartialEq)]
pub enum ExchangeOutcome {
    Answered(String),
    EmptyAnswer,
    TransportFailure(String),
    ProtocolFailure(String),
    TimedOut,
    /// The exchange was dropped before it finished
    Interrupted,
}

impl ExchangeOutcome {
    pub fn from_result(result: Result<QaResponse, QaError>) -> Self {
        match result {
            Ok(QaResponse {
                answer: Some(answer),
            }) => ExchangeOutcome::Answered(answer),
            Ok(QaResponse { answer: None }) => ExchangeOutcome::EmptyAnswer,
            Err(QaError::Transport(msg)) => ExchangeOutcome::TransportFailure(msg),
            Err(QaError::Protocol(msg)) => ExchangeOutcome::ProtocolFailure(msg),
        }
    }

    /// The text of the assistant turn for this outcome.
    pub fn reply_text(&self) -> &str {
        match self {
            ExchangeOutcome::Answered(answer) => answer,
            ExchangeOutcome::EmptyAnswer => NO_ANSWER_MESSAGE,
            ExchangeOutcome::TransportFailure(_)
            | ExchangeOutcome::ProtocolFailure(_)
            | ExchangeOutcome::Interrupted => ERROR_MESSAGE,
            ExchangeOutcome::TimedOut => TIMEOUT_MESSAGE,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, ExchangeOutcome::Answered(_))
    }

    fn log(&self, question: &str) {
        match self {
            ExchangeOutcome::Answered(_) => {
                tracing::debug!("Answered question: {}", question)
            }
            ExchangeOutcome::EmptyAnswer => {
                tracing::warn!("No answer returned for question: {}", question)
            }
            ExchangeOutcome::TransportFailure(err) => {
                tracing::error!(
                    "Q&A service unreachable for question: {} error: {}",
                    question,
                    err
                )
            }
            ExchangeOutcome::ProtocolFailure(err) => {
                tracing::error!(
                    "Q&A service returned a bad response for question: {} error: {}",
                    question,
                    err
                )
            }
            ExchangeOutcome::TimedOut => {
                tracing::warn!("Q&A service timed out for question: {}", question)
            }
            ExchangeOutcome::Interrupted => {
                tracing::warn!("Exchange interrupted for question: {}", question)
            }
        }
    }
}

/// A question that has been accepted and is waiting on the service.
/// Only `ConversationSession::begin_submit` hands these out.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingQuestion {
    request: QaRequest,
    timeout: Duration,
}

impl PendingQuestion {
    pub fn question(&self) -> &str {
        &self.request.question
    }
}

/// Ask the service a pending question. This is the only step of a
/// submit that waits, and it never waits longer than the session's
/// timeout.
pub async fn exchange(
    client: &(dyn QaClient + Send + Sync),
    pending: &PendingQuestion,
) -> ExchangeOutcome {
    let outcome = match tokio::time::timeout(pending.timeout, client.ask(&pending.request)).await
    {
        Ok(result) => ExchangeOutcome::from_result(result),
        Err(_) => ExchangeOutcome::TimedOut,
    };
    outcome.log(pending.question());
    outcome
}

/// Read only view of a session for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub transcript: Transcript,
    pub pending_input: String,
    pub in_flight: bool,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RenderedTurn {
    pub role: Role,
    pub text: String,
    /// Already escaped, safe to insert into a page without escaping
    pub markup: String,
}

impl From<&Turn> for RenderedTurn {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role(),
            text: turn.text().to_string(),
            markup: format_message(turn.text()),
        }
    }
}

/// A single conversation with the assistant.
///
/// Owns the transcript, the text the user is composing, and whether
/// an exchange is in flight. Only one exchange can be in flight at a
/// time, submitting while one is outstanding does nothing.
#[derive(Debug)]
pub struct ConversationSession {
    thread_id: String,
    timeout: Duration,
    transcript: Transcript,
    pending_input: String,
    in_flight: bool,
}

impl ConversationSession {
    pub fn new(thread_id: &str, timeout: Duration) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            timeout,
            transcript: Transcript::new(),
            pending_input: String::new(),
            in_flight: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn update_input(&mut self, text: &str) {
        self.pending_input = text.to_string();
    }

    /// Whether a submit right now would do anything.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.pending_input.trim().is_empty()
    }

    /// Save text typed on a view of the transcript that had
    /// `seen_turns` turns. Returns false and keeps the current input
    /// when the transcript has grown since, which means the text was
    /// typed before a submit that already cleared it.
    pub fn sync_input(&mut self, text: &str, seen_turns: usize) -> bool {
        if seen_turns != self.transcript.len() {
            return false;
        }
        self.update_input(text);
        true
    }

    /// First half of a submit. Records the user turn, clears the
    /// input and marks the session in flight. Returns `None` without
    /// touching anything when there is nothing to send or an exchange
    /// is already outstanding.
    pub fn begin_submit(&mut self) -> Option<PendingQuestion> {
        if !self.can_submit() {
            return None;
        }

        let question = self.pending_input.trim().to_string();
        self.transcript.push(Turn::user(&question));
        self.pending_input.clear();
        self.in_flight = true;

        Some(PendingQuestion {
            request: QaRequest::new(&question, &self.thread_id),
            timeout: self.timeout,
        })
    }

    /// Second half of a submit. Appends the assistant turn and then
    /// clears the in flight flag.
    pub fn complete(&mut self, outcome: &ExchangeOutcome) {
        if !self.in_flight {
            tracing::warn!("Completing an exchange that was not in flight");
        }
        self.transcript.push(Turn::assistant(outcome.reply_text()));
        self.in_flight = false;
    }

    /// Submit the pending input and wait for the reply. Every submit
    /// that isn't a no-op ends with exactly one assistant turn, even
    /// if the returned future is dropped part way through.
    pub async fn submit(
        &mut self,
        client: &(dyn QaClient + Send + Sync),
    ) -> Option<ExchangeOutcome> {
        let pending = self.begin_submit()?;
        let mut guard = InFlightGuard {
            session: self,
            settled: false,
        };
        let outcome = exchange(client, &pending).await;
        guard.settle(&outcome);
        Some(outcome)
    }

    pub fn current_state(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            pending_input: self.pending_input.clone(),
            in_flight: self.in_flight,
        }
    }

    pub fn rendered_turns(&self) -> Vec<RenderedTurn> {
        self.transcript.iter().map(RenderedTurn::from).collect()
    }
}

struct InFlightGuard<'a> {
    session: &'a mut ConversationSession,
    settled: bool,
}

impl InFlightGuard<'_> {
    fn settle(&mut self, outcome: &ExchangeOutcome) {
        self.session.complete(outcome);
        self.settled = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let outcome = ExchangeOutcome::Interrupted;
            outcome.log(
                self.session
                    .transcript
                    .last()
                    .map(Turn::text)
                    .unwrap_or_default(),
            );
            self.session.complete(&outcome);
        }
    }
}
