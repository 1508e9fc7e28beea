use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub qa_api_url: String,
    pub thread_id: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub const DEFAULT_QA_API_URL: &'static str = "http://127.0.0.1:8000";
    pub const DEFAULT_THREAD_ID: &'static str = "main_session";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
}

impl Default for AppConfig {
    fn default() -> Self {
        let qa_api_url = env::var("EDUCOMPASS_QA_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_QA_API_URL.to_string());
        let thread_id = env::var("EDUCOMPASS_THREAD_ID")
            .unwrap_or_else(|_| Self::DEFAULT_THREAD_ID.to_string());
        // A bad value shouldn't keep the assistant from starting
        let timeout_secs = env::var("EDUCOMPASS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            qa_api_url,
            thread_id,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
