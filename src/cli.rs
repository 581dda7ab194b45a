//! Terminal chat driver — runs one form session over stdin/stdout.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::form::session::{AnswerStep, FormSession, SubmitOutcome};
use crate::form::transcript::Sender;
use crate::invoice::payload::Attachment;

/// Print any transcript entries appended since the last flush.
fn flush_transcript(session: &mut FormSession) {
    for message in session.transcript_mut().drain_new() {
        match message.sender {
            Sender::Bot => println!("\n{}\n", message.text),
            Sender::User => println!("    ⇒ {}", message.text),
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    eprint!("> ");
    let line = lines
        .next_line()
        .await
        .map_err(crate::error::FormError::from)?;
    Ok(line.map(|l| l.trim().to_string()))
}

/// Read the weighment-slip file for attachment.
async fn load_attachment(path: &str) -> Result<Attachment> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(crate::error::FormError::from)?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(Attachment { file_name, bytes })
}

/// Run a full conversation: prompt, collect, submit, and act on the
/// outcome. Returns when the session ends or stdin closes.
pub async fn run(config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config);
    let mut session = FormSession::new().with_fallback_delay(config.fallback_redirect_delay);
    tracing::debug!(session = %session.id(), "Starting conversational form");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut awaiting_file = false;

    flush_transcript(&mut session);

    loop {
        let Some(line) = read_line(&mut lines).await? else {
            tracing::debug!(session = %session.id(), "stdin closed, abandoning session");
            return Ok(());
        };

        let step = if awaiting_file {
            // The terminal file question: attach, skip, or fall through to
            // the engine (which treats typed text as a skip too).
            if line.is_empty() {
                session.skip_file()
            } else if let Some(path) = line.strip_prefix("/attach ") {
                match load_attachment(path.trim()).await {
                    Ok(attachment) => session.attach_file(attachment)?,
                    Err(e) => {
                        eprintln!("Could not read file: {e}");
                        continue;
                    }
                }
            } else {
                session.submit_answer(&line)
            }
        } else {
            session.submit_answer(&line)
        };

        match step {
            AnswerStep::Prompted => {
                awaiting_file = false;
                flush_transcript(&mut session);
            }
            AnswerStep::AwaitFile => {
                awaiting_file = true;
                flush_transcript(&mut session);
                eprintln!("(/attach <path> to add the photo, Enter to skip)");
            }
            AnswerStep::Rejected => {
                if let Some(error) = session.last_error() {
                    eprintln!("⚠️  {error}");
                }
            }
            AnswerStep::ReadyToSubmit => {
                flush_transcript(&mut session);
                loop {
                    let outcome = session.submit(&api, None).await?;
                    flush_transcript(&mut session);
                    match outcome {
                        SubmitOutcome::Redirect(url) => {
                            println!("📄 {url}");
                            return Ok(());
                        }
                        SubmitOutcome::FallbackAfter(delay) => {
                            tokio::time::sleep(delay).await;
                            println!("🏠 Back to My Forms.");
                            return Ok(());
                        }
                        SubmitOutcome::Failed => {
                            eprintln!("(Enter to retry, Ctrl-D to give up)");
                            match read_line(&mut lines).await? {
                                Some(_) => continue,
                                None => return Ok(()),
                            }
                        }
                    }
                }
            }
        }
    }
}
