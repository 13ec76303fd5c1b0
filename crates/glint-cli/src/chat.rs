//! Interactive chat module.
//!
//! Provides a REPL-style interface over a conversation session. Reads user
//! input from `input`, writes replies and notices to `output`; all
//! conversation logic lives behind the event/effect contract in glint-core.

use std::io::{BufRead, Write};

use anyhow::Result;
use glint_core::chat::{ChatEvent, Role};
use glint_core::providers::gemini::GeminiClient;
use glint_core::session::{ChatSession, NoticeReceiver};

use crate::attach;

const QUIT_COMMAND: &str = ":q";
const IMAGE_COMMAND: &str = "/image";
const PROMPT_PREFIX: &str = "you> ";
const ASSISTANT_PREFIX: &str = "gemini> ";

/// Runs the interactive chat loop.
///
/// Exits on `:q` command or EOF.
pub async fn run_chat<R, W>(input: R, output: &mut W, client: GeminiClient) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let (session, notices) = ChatSession::new(client);
    run_chat_with_session(input, output, session, notices).await
}

/// Runs the chat loop with a provided session (for testing).
pub async fn run_chat_with_session<R, W>(
    input: R,
    output: &mut W,
    mut session: ChatSession,
    mut notices: NoticeReceiver,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "Glint Chat ({QUIT_COMMAND} to quit, {IMAGE_COMMAND} <path> to attach an image)"
    )?;
    write!(output, "{PROMPT_PREFIX}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        // Attach command: stage an image on the draft, don't send yet.
        if let Some(rest) = trimmed.strip_prefix(IMAGE_COMMAND) {
            match attach::load_image(rest.trim()) {
                Ok(image) => {
                    writeln!(output, "attached {} ({} bytes)", image.mime_type, image.data.len())?;
                    session.handle(ChatEvent::ImageChanged { image });
                }
                Err(e) => writeln!(output, "notice: {e:#}")?,
            }
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        // An empty line still sends when an image is staged.
        if trimmed.is_empty() && session.state().draft_image.is_none() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        session.handle(ChatEvent::TextChanged {
            text: trimmed.to_string(),
        });
        session.handle(ChatEvent::Send);
        session.run_until_idle().await;

        while let Ok(notice) = notices.try_recv() {
            writeln!(output, "notice: {}", notice.message)?;
        }

        // On failure the newest message is still the user's; print nothing.
        if let Some(message) = session.state().messages.first()
            && message.role == Role::Assistant
        {
            writeln!(output, "{ASSISTANT_PREFIX}{}", message.text)?;
        }

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}
