//! Interactive prompt.
//!
//! Each line is one submission:
//! - an address sets the input and looks it up
//! - an empty line re-submits the current input (pre-filled by auto-detection)
//! - `:key <value>` saves the API key, `:key` alone removes it
//! - `:help` lists commands, `:quit` / `:q` exits

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::lookup::LookupSession;

use super::write_record;

const PROMPT: &str = "ip> ";

const HELP: &str = "Enter an IP address and press Enter to look it up.
  <empty line>   look up the current input again
  :key <value>   save a pro API key
  :key           remove the saved API key
  :quit          exit";

/// A parsed prompt line.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptCommand {
    Submit(Option<String>),
    SetKey(String),
    Help,
    Quit,
}

impl PromptCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            ":q" | ":quit" | ":exit" => PromptCommand::Quit,
            ":help" | ":h" | "?" => PromptCommand::Help,
            "" => PromptCommand::Submit(None),
            _ => {
                if let Some(rest) = trimmed.strip_prefix(":key") {
                    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                        return PromptCommand::SetKey(rest.trim().to_string());
                    }
                }
                PromptCommand::Submit(Some(trimmed.to_string()))
            }
        }
    }
}

/// Runs the prompt until `:quit` or end of input.
pub async fn run_interactive<R, W>(
    session: &LookupSession,
    reader: R,
    out: &mut W,
    json: bool,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match PromptCommand::parse(&line) {
            PromptCommand::Quit => break,
            PromptCommand::Help => writeln!(out, "{}", HELP)?,
            PromptCommand::SetKey(value) => {
                // Outcome is reported through the notifier
                let _ = session.set_api_key_preference(&value);
            }
            PromptCommand::Submit(subject) => {
                if let Some(subject) = subject {
                    session.set_input(subject);
                }
                if let Ok(record) = session.submit().await {
                    write_record(out, &record, false, json)?;
                }
            }
        }
    }
    Ok(())
}
