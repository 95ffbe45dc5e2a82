//! Line-oriented terminal client.
//!
//! Each input line is sent as a user turn. `/rate N` rates the latest reply,
//! `/quit` exits.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::{
    ConversationClient, RejectReason, SendOutcome, MALFORMED_RESPONSE_TEXT, TRANSPORT_ERROR_TEXT,
    WELCOME_MESSAGE,
};

const PROMPT: &str = "you> ";
const MODEL_PREFIX: &str = "model> ";

enum Command<'a> {
    Message(&'a str),
    Rate(&'a str),
    Quit,
}

fn parse_line(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if trimmed == "/quit" || trimmed == "/exit" {
        Command::Quit
    } else if let Some(rest) = trimmed
        .strip_prefix("/rate")
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        Command::Rate(rest.trim())
    } else {
        Command::Message(line)
    }
}

pub async fn run<R, W>(client: &ConversationClient, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{MODEL_PREFIX}{WELCOME_MESSAGE}\n").as_bytes())
        .await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match parse_line(&line) {
            Command::Quit => break,
            Command::Rate(arg) => rate(client, arg).await,
            Command::Message(text) => match client.send_message(text).await {
                SendOutcome::Replied(reply) => Some(format!("{MODEL_PREFIX}{reply}")),
                SendOutcome::MalformedResponse { surfaced: true } => {
                    Some(format!("{MODEL_PREFIX}{MALFORMED_RESPONSE_TEXT}"))
                }
                SendOutcome::MalformedResponse { surfaced: false } => None,
                SendOutcome::TransportFailed => Some(format!("{MODEL_PREFIX}{TRANSPORT_ERROR_TEXT}")),
                SendOutcome::Rejected(RejectReason::Empty) => None,
                SendOutcome::Rejected(RejectReason::Busy) => {
                    Some("(still waiting for the previous reply)".to_string())
                }
            },
        };

        if let Some(reply) = reply {
            output.write_all(format!("{reply}\n").as_bytes()).await?;
        }
    }

    output.flush().await?;
    Ok(())
}

async fn rate(client: &ConversationClient, arg: &str) -> Option<String> {
    let Ok(rating) = arg.parse::<u8>() else {
        return Some("usage: /rate <1-5>".to_string());
    };
    match client.submit_feedback(rating).await {
        Ok(_) => Some("Thanks for the feedback!".to_string()),
        Err(e) => Some(format!("Feedback not sent: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::application::RelayTransport;
    use crate::domain::{DomainError, Feedback, Transcript};

    struct EchoTransport;

    #[async_trait]
    impl RelayTransport for EchoTransport {
        async fn post_transcript(&self, transcript: &Transcript) -> Result<Value, DomainError> {
            let last = transcript.latest_message()?;
            Ok(json!(format!("echo: {last}")))
        }

        async fn post_feedback(&self, _feedback: &Feedback) -> Result<(), DomainError> {
            Ok(())
        }
    }

    async fn run_script(script: &str) -> (String, Transcript) {
        let client = ConversationClient::new(Arc::new(EchoTransport));
        let mut output = Vec::new();
        run(&client, script.as_bytes(), &mut output).await.unwrap();
        (String::from_utf8(output).unwrap(), client.transcript().await)
    }

    #[tokio::test]
    async fn greets_then_relays_each_line() {
        let (output, transcript) = run_script("hi\nhow are you\n").await;

        assert!(output.starts_with(&format!("{MODEL_PREFIX}{WELCOME_MESSAGE}")));
        assert!(output.contains("model> echo: hi\n"));
        assert!(output.contains("model> echo: how are you\n"));
        assert_eq!(transcript.len(), 4);
    }

    #[tokio::test]
    async fn blank_lines_are_ignored() {
        let (_, transcript) = run_script("\n   \nhi\n").await;
        assert_eq!(transcript.len(), 2);
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let (_, transcript) = run_script("one\n/quit\ntwo\n").await;
        assert_eq!(transcript.len(), 2);
    }

    #[tokio::test]
    async fn rate_reports_outcome() {
        let (output, _) = run_script("/rate 5\nhi\n/rate 5\n/rate ten\n").await;
        assert!(output.contains("Feedback not sent"));
        assert!(output.contains("Thanks for the feedback!"));
        assert!(output.contains("usage: /rate <1-5>"));
    }

    #[tokio::test]
    async fn words_starting_with_rate_are_sent_as_messages() {
        let (output, transcript) = run_script("/rates are high
/rating
").await;
        assert!(output.contains("echo: /rates are high"));
        assert!(output.contains("echo: /rating"));
        assert!(!output.contains("usage: /rate"));
        assert_eq!(transcript.len(), 4);
    }
}
