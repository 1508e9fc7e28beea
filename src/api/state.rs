use crate::chat::{ChatPanel, ConversationSession};
use crate::core::AppConfig;
use crate::qa::SharedQaClient;

pub struct AppState {
    // The one chat panel served to the browser
    pub panel: ChatPanel,
    pub qa_client: SharedQaClient,
}

impl AppState {
    pub fn new(config: &AppConfig, qa_client: SharedQaClient) -> Self {
        let session = ConversationSession::new(&config.thread_id, config.request_timeout);
        Self {
            panel: ChatPanel::new(session),
            qa_client,
        }
    }
}
