use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body posted to the question answering service.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct QaRequest {
    pub question: String,
    pub thread_id: String,
}

impl QaRequest {
    pub fn new(question: &str, thread_id: &str) -> Self {
        Self {
            question: question.to_string(),
            thread_id: thread_id.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QaResponse {
    pub answer: Option<String>,
}

impl QaResponse {
    /// Any JSON shape is accepted. Only a non-empty string `answer`
    /// counts as an answer, everything else is treated as no answer.
    pub fn from_value(body: &Value) -> Self {
        let answer = body["answer"]
            .as_str()
            .filter(|a| !a.is_empty())
            .map(String::from);
        Self { answer }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QaError {
    /// The service could not be reached or the connection broke
    Transport(String),
    /// The service answered but not with a usable success response
    Protocol(String),
}

impl fmt::Display for QaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QaError::Transport(msg) => write!(f, "transport failure: {}", msg),
            QaError::Protocol(msg) => write!(f, "protocol failure: {}", msg),
        }
    }
}

impl std::error::Error for QaError {}

impl From<reqwest::Error> for QaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() || err.is_decode() {
            QaError::Protocol(err.to_string())
        } else {
            QaError::Transport(err.to_string())
        }
    }
}

/// Anything that can turn a question into an answer. The HTTP client
/// is the real implementation, tests swap in their own.
#[async_trait]
pub trait QaClient {
    async fn ask(&self, request: &QaRequest) -> Result<QaResponse, QaError>;
}

pub type SharedQaClient = std::sync::Arc<dyn QaClient + Send + Sync + 'static>;

#[derive(Clone, Debug)]
pub struct HttpQaClient {
    client: reqwest::Client,
    api_base_url: String,
}

impl HttpQaClient {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.to_string(),
        }
    }

    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.api_base_url.trim_end_matches("/"))
    }
}

impl Default for HttpQaClient {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8000")
    }
}

#[async_trait]
impl QaClient for HttpQaClient {
    async fn ask(&self, request: &QaRequest) -> Result<QaResponse, QaError> {
        let resp = self
            .client
            .post(self.ask_url())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| QaError::Protocol(format!("unparseable body: {}", e)))?;

        Ok(QaResponse::from_value(&body))
    }
}
