use super::core::ConversationSession;

pub const GREETING: &str = "Hello! I'm your EduCompass assistant.";
pub const GREETING_DETAIL: &str =
    "Ask me anything about private universities and courses in Sri Lanka!";
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What are the best computer science programs?",
    "Tell me about APIIT university",
    "What are the admission requirements?",
    "Show me scholarship opportunities",
];

/// The chat surface: a conversation plus whether it's showing.
/// Hiding the panel never touches the conversation.
#[derive(Debug)]
pub struct ChatPanel {
    open: bool,
    pub session: ConversationSession,
}

impl ChatPanel {
    pub fn new(session: ConversationSession) -> Self {
        Self {
            open: false,
            session,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Label for the button that shows or hides the panel
    pub fn toggle_label(&self) -> &'static str {
        if self.open { "Close" } else { "Ask Assistant" }
    }

    /// The greeting is only shown until the first question is asked
    pub fn show_greeting(&self) -> bool {
        self.session.transcript().is_empty()
    }
}
