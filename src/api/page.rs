//! The page served to the browser, rendered with Handlebars.
//!
//! Handlebars escapes every `{{value}}` so user and assistant text
//! can't add markup. The only raw `{{{value}}}` is a turn's `markup`,
//! which `format_message` has already escaped before decorating.

use std::fmt;

use handlebars::Handlebars;
use serde::Serialize;

use crate::chat::{ChatPanel, GREETING, GREETING_DETAIL, RenderedTurn, SUGGESTED_QUESTIONS};

#[derive(Debug)]
pub enum Page {
    Index,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  {{#if in_flight}}<meta http-equiv="refresh" content="1">{{/if}}
  <title>EduCompass</title>
  <style>
    body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
    .navbar { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1.5rem; background: #1e3a8a; color: #fff; }
    .navbar button { background: #fff; color: #1e3a8a; border: 0; border-radius: 999px; padding: 0.5rem 1rem; cursor: pointer; }
    .main-content { display: flex; }
    .home-screen { flex: 1; padding: 2rem; }
    .chat-panel { width: 380px; height: calc(100vh - 56px); display: flex; flex-direction: column; border-left: 1px solid #e5e7eb; }
    .chat-header { display: flex; justify-content: space-between; padding: 0.75rem; border-bottom: 1px solid #e5e7eb; }
    .chat-messages { flex: 1; overflow-y: auto; padding: 0.75rem; }
    .message { display: flex; margin-bottom: 0.5rem; }
    .message.user { justify-content: flex-end; }
    .message-content { max-width: 80%; padding: 0.5rem 0.75rem; border-radius: 12px; }
    .message.user .message-content { background: #2563eb; color: #fff; }
    .message.assistant .message-content { background: #f3f4f6; }
    .chat-input { display: flex; gap: 0.5rem; padding: 0.75rem; border-top: 1px solid #e5e7eb; }
    .chat-input textarea { flex: 1; resize: none; }
  </style>
</head>
<body>
  <nav class="navbar">
    <span class="brand-text">EduCompass</span>
    <form method="post" action="/chat/toggle">
      <button type="submit" class="chat-toggle-btn">{{toggle_label}}</button>
    </form>
  </nav>
  <div class="main-content">
    <div class="home-screen">
      <h1>Welcome to EduCompass</h1>
      <p>Your intelligent guide to private universities and courses in Sri Lanka.</p>
      <p>Click "Ask Assistant" in the top right to get started!</p>
    </div>
    {{#if open}}
    <div class="chat-panel">
      <div class="chat-header">
        <span>EduCompass Assistant</span>
        <form method="post" action="/chat/close"><button type="submit" class="close-btn">Close</button></form>
      </div>
      <div class="chat-messages">
        {{#if show_greeting}}
        <div class="welcome-message">
          <p>{{greeting}}</p>
          <p>{{greeting_detail}}</p>
          <p><strong>Try asking:</strong></p>
          <ul>
            {{#each suggested_questions}}<li>{{this}}</li>{{/each}}
          </ul>
        </div>
        {{/if}}
        {{#each turns}}
        <div class="message {{role}}"><div class="message-content">{{{markup}}}</div></div>
        {{/each}}
        {{#if in_flight}}
        <div class="message assistant"><div class="message-content typing-indicator">...</div></div>
        {{/if}}
        <div id="chat-end"></div>
      </div>
      <form class="chat-input" id="chat-form" method="post" action="/chat/submit">
        <textarea id="chat-input" name="text" placeholder="Ask about universities, courses, admissions..."{{#if in_flight}} disabled{{/if}}>{{pending_input}}</textarea>
        <button type="submit" id="send-btn" class="send-btn"{{#unless can_send}} disabled{{/unless}}>Send</button>
      </form>
    </div>
    <script>
      const form = document.getElementById("chat-form");
      const input = document.getElementById("chat-input");
      const send = document.getElementById("send-btn");
      const sync = () => {
        send.disabled = input.disabled || input.value.trim() === "";
      };
      input.addEventListener("input", () => {
        sync();
        fetch("/chat/input", {
          method: "POST",
          body: new URLSearchParams({ text: input.value, turns: "{{turn_count}}" }),
        });
      });
      input.addEventListener("keydown", (e) => {
        if (e.key === "Enter" && !e.shiftKey) {
          e.preventDefault();
          if (!send.disabled) form.submit();
        }
      });
      document.getElementById("chat-end").scrollIntoView({ behavior: "smooth" });
      input.focus();
    </script>
    {{/if}}
  </div>
</body>
</html>
"#;

#[derive(Serialize)]
pub struct IndexContext {
    pub open: bool,
    pub toggle_label: &'static str,
    pub show_greeting: bool,
    pub greeting: &'static str,
    pub greeting_detail: &'static str,
    pub suggested_questions: Vec<&'static str>,
    pub turns: Vec<RenderedTurn>,
    pub turn_count: usize,
    pub pending_input: String,
    pub in_flight: bool,
    pub can_send: bool,
}

impl IndexContext {
    pub fn from_panel(panel: &ChatPanel) -> Self {
        let snapshot = panel.session.current_state();
        Self {
            open: panel.is_open(),
            toggle_label: panel.toggle_label(),
            show_greeting: panel.show_greeting(),
            greeting: GREETING,
            greeting_detail: GREETING_DETAIL,
            suggested_questions: SUGGESTED_QUESTIONS.to_vec(),
            turns: panel.session.rendered_turns(),
            turn_count: snapshot.transcript.len(),
            can_send: panel.session.can_submit(),
            pending_input: snapshot.pending_input,
            in_flight: snapshot.in_flight,
        }
    }
}

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(&Page::Index.to_string(), INDEX_PAGE)
        .expect("Failed to register template");
    registry
}
