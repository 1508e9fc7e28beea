use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Cmd, DefaultEditor, KeyCode, KeyEvent, Modifiers};

use crate::chat::{ChatPanel, ConversationSession, GREETING, GREETING_DETAIL, SUGGESTED_QUESTIONS};
use crate::core::AppConfig;
use crate::core::logging::init_tracing;
use crate::qa::HttpQaClient;

fn print_greeting() {
    println!("{}", GREETING);
    println!("{}\n", GREETING_DETAIL);
    println!("Try asking:");
    for question in SUGGESTED_QUESTIONS {
        println!("  - {}", question);
    }
    println!();
}

// Enter keeps its default and accepts the line, which submits it.
// Shift+Enter inserts a newline, with Alt+Enter for terminals that
// don't report shift on enter.
fn bind_keys(rl: &mut DefaultEditor) {
    rl.bind_sequence(KeyEvent(KeyCode::Enter, Modifiers::SHIFT), Cmd::Newline);
    rl.bind_sequence(KeyEvent(KeyCode::Enter, Modifiers::ALT), Cmd::Newline);
}

pub async fn run(config: AppConfig) -> Result<()> {
    init_tracing(&format!("{}=warn", env!("CARGO_CRATE_NAME")));

    let mut rl = DefaultEditor::new()?;
    bind_keys(&mut rl);

    let client = HttpQaClient::new(&config.qa_api_url);
    let session = ConversationSession::new(&config.thread_id, config.request_timeout);
    let mut panel = ChatPanel::new(session);
    panel.open();

    print_greeting();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                panel.session.update_input(&line);

                if !panel.session.can_submit() {
                    continue;
                }

                println!("...");
                if panel.session.submit(&client).await.is_some()
                    && let Some(turn) = panel.session.transcript().last()
                {
                    println!("{}\n", turn.text());
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    panel.close();
    Ok(())
}
