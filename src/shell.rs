//! Line-oriented session sharing one assistant (and its reply memo).

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::assistant::{Action, Assistant, render_error, render_reply, render_search_fallback};
use crate::dispatch::GenerateContent;

pub const HELP: &str = "\
Commands:
  /fallacies <text>   detect logical fallacies in <text>
  /verify <claim>     verify <claim> with search grounding
  /clear              clear cached replies
  /help               show this help
  /quit               leave the session
";

const PROMPT: &str = "veritas> ";
const INVALID_UTF8: &str = "Input is not valid UTF-8; line ignored.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    Fallacies(&'a str),
    Verify(&'a str),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> ShellCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ShellCommand::Empty;
        }

        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));

        match head {
            "/fallacies" | "/f" => ShellCommand::Fallacies(rest),
            "/verify" | "/v" => ShellCommand::Verify(rest),
            "/clear" => ShellCommand::Clear,
            "/help" | "/?" => ShellCommand::Help,
            "/quit" | "/exit" | "/q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(head),
        }
    }
}

/// Result of one action, already rendered for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub text: String,
}

/// Runs one action and renders either the reply or the failure (plus the
/// manual search fallback for verification when applicable).
pub async fn perform<B: GenerateContent>(
    assistant: &Assistant<B>,
    action: Action,
    input: &str,
) -> Outcome {
    let result = match action {
        Action::Fallacies => assistant.detect_fallacies(input).await,
        Action::Verify => assistant.verify_claim(input).await,
    };

    match result {
        Ok(reply) => Outcome {
            ok: true,
            text: render_reply(action, &reply),
        },
        Err(err) => {
            let mut text = render_error(action, &err);
            text.push('\n');
            if action == Action::Verify
                && let Some(fallback) = assistant.search_fallback_for(input, &err)
            {
                text.push('\n');
                text.push_str(&render_search_fallback(&fallback));
            }
            Outcome { ok: false, text }
        }
    }
}

/// Reads commands until `/quit` or end of input. Failed actions and unreadable
/// lines are reported and the session keeps going.
pub async fn run<B, R, W>(assistant: &Assistant<B>, mut input: R, output: &mut W) -> io::Result<()>
where
    B: GenerateContent,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    output.write_all(HELP.as_bytes()).await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            output.write_all(b"\n").await?;
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            debug!(len = buf.len(), "[Shell] Skipping line that is not valid UTF-8");
            output.write_all(INVALID_UTF8.as_bytes()).await?;
            continue;
        };

        let text = match ShellCommand::parse(line) {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Clear => {
                assistant.clear_cache();
                "Cache cleared.\n".to_string()
            }
            ShellCommand::Fallacies(text) => perform(assistant, Action::Fallacies, text).await.text,
            ShellCommand::Verify(claim) => perform(assistant, Action::Verify, claim).await.text,
            ShellCommand::Unknown(head) => {
                debug!(command = head, "[Shell] Unknown command");
                format!("Unknown command `{head}`. Type /help for the list of commands.\n")
            }
        };

        output.write_all(text.as_bytes()).await?;
    }

    output.flush().await
}
