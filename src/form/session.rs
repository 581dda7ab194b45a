//! FormSession — one end-to-end run of the conversational form.

use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::client::InvoiceApi;
use crate::error::{FormError, Result};
use crate::invoice::payload::{Attachment, InvoicePayload};

use super::answers::{AnswerValue, FormAnswers};
use super::language::{Language, ui_text};
use super::question::{Advance, FieldKey, InputKind, QUESTIONS, Question, advance_from, index_of};
use super::transcript::Transcript;

/// Delay before falling back to the home screen when the document link is
/// not ready at submission time.
pub const FALLBACK_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Result of feeding one user input to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStep {
    /// Answer accepted; the next question has been prompted.
    Prompted,
    /// Answer accepted; the session now expects a file attachment (or an
    /// explicit skip).
    AwaitFile,
    /// The sequence is exhausted; the caller should call [`FormSession::submit`].
    ReadyToSubmit,
    /// Input rejected; [`FormSession::last_error`] holds the localized
    /// message. Nothing else changed.
    Rejected,
}

/// What the caller should do after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend returned a ready document link; navigate to it now.
    Redirect(String),
    /// The document is still generating; navigate home after the delay.
    FallbackAfter(Duration),
    /// Submission failed; the error is on the transcript and the session
    /// accepts a retry.
    Failed,
}

/// Drives the question sequence: validates and stores answers, maintains
/// the transcript, and submits the assembled payload once exhausted.
///
/// Owns its transcript and answers exclusively; nothing is shared across
/// sessions.
pub struct FormSession {
    id: Uuid,
    current: usize,
    language: Option<Language>,
    answers: FormAnswers,
    attachment: Option<Attachment>,
    transcript: Transcript,
    in_flight: bool,
    submitted: bool,
    last_error: Option<String>,
    fallback_delay: Duration,
}

impl FormSession {
    /// Create a session seeded with the first prompt (English, since no
    /// language has been chosen yet).
    pub fn new() -> Self {
        let mut transcript = Transcript::new();
        transcript.push_bot(QUESTIONS[0].text.en);
        Self {
            id: Uuid::new_v4(),
            current: 0,
            language: None,
            answers: FormAnswers::default(),
            attachment: None,
            transcript,
            in_flight: false,
            submitted: false,
            last_error: None,
            fallback_delay: FALLBACK_REDIRECT_DELAY,
        }
    }

    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_question(&self) -> &'static Question {
        &QUESTIONS[self.current]
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn answers(&self) -> &FormAnswers {
        &self.answers
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Current prompt in the selected language, for re-display.
    pub fn current_prompt(&self) -> &'static str {
        self.current_question().text.in_language(self.language)
    }

    /// Validate and record one typed answer, then advance.
    ///
    /// Rejection leaves index, answers, and transcript untouched; only the
    /// stored error text changes.
    pub fn submit_answer(&mut self, raw: &str) -> AnswerStep {
        if self.in_flight || self.submitted {
            return AnswerStep::Rejected;
        }

        let question = self.current_question();
        let input = raw.trim();

        if question.kind == InputKind::Language {
            return self.select_language(input);
        }

        if !question.optional && input.is_empty() {
            self.last_error = Some(ui_text::required_field(self.language).to_string());
            return AnswerStep::Rejected;
        }

        let value = match question.kind {
            InputKind::Number => match input.parse::<Decimal>() {
                Ok(n) => AnswerValue::Number(n),
                Err(_) => {
                    self.last_error = Some(ui_text::invalid_number(self.language).to_string());
                    return AnswerStep::Rejected;
                }
            },
            InputKind::File => {
                // Typing past the optional file question skips the
                // attachment and goes straight to submission.
                self.last_error = None;
                if !input.is_empty() {
                    self.transcript.push_user(input);
                }
                return AnswerStep::ReadyToSubmit;
            }
            _ => AnswerValue::Text(input.to_string()),
        };

        self.last_error = None;
        self.answers.set(question.field, value);
        self.transcript.push_user(input);
        self.advance()
    }

    /// Handle the language-selection question: input must be exactly one of
    /// the two sentinel tokens.
    fn select_language(&mut self, input: &str) -> AnswerStep {
        let Some(language) = Language::from_sentinel(input) else {
            self.last_error = Some(ui_text::CHOOSE_ONE_OR_TWO.to_string());
            return AnswerStep::Rejected;
        };

        self.language = Some(language);
        self.last_error = None;
        self.transcript.push_user(language.display_name());
        self.go_to(self.current + 1)
    }

    /// Attach the file for the terminal file-kind question and move to the
    /// submit step.
    pub fn attach_file(&mut self, attachment: Attachment) -> Result<AnswerStep> {
        let question = self.current_question();
        if question.kind != InputKind::File {
            return Err(FormError::NotAFileQuestion {
                field: question.field.to_string(),
            }
            .into());
        }

        self.transcript
            .push_user(format!("📎 {}", attachment.file_name));
        self.attachment = Some(attachment);
        self.last_error = None;
        Ok(AnswerStep::ReadyToSubmit)
    }

    /// Skip the optional file question without attaching anything.
    pub fn skip_file(&mut self) -> AnswerStep {
        self.last_error = None;
        AnswerStep::ReadyToSubmit
    }

    /// Advance past the question just answered, following the successor
    /// table. A `SkipTo` appends exactly one synthetic user message echoing
    /// the pre-filled default.
    fn advance(&mut self) -> AnswerStep {
        match advance_from(self.current_question().field) {
            Advance::Next => self.go_to(self.current + 1),
            Advance::SkipTo { target, echo } => {
                let echo_text = match echo {
                    FieldKey::ItemName => self.answers.item_name.clone(),
                    _ => String::new(),
                };
                self.transcript.push_user(echo_text);
                match index_of(target) {
                    Some(index) => self.go_to(index),
                    None => AnswerStep::ReadyToSubmit,
                }
            }
            Advance::Submit => AnswerStep::ReadyToSubmit,
        }
    }

    /// Move to `index` and prompt its question.
    fn go_to(&mut self, index: usize) -> AnswerStep {
        if index >= QUESTIONS.len() {
            return AnswerStep::ReadyToSubmit;
        }
        self.current = index;
        let question = self.current_question();
        self.transcript
            .push_bot(question.text.in_language(self.language));
        if question.kind == InputKind::File {
            AnswerStep::AwaitFile
        } else {
            AnswerStep::Prompted
        }
    }

    /// Build the payload and submit it — a single attempt per call.
    ///
    /// At most one submission may be outstanding per session; a second call
    /// while one is in flight errors without touching any state. Failures
    /// are reported on the transcript and clear the in-flight flag so the
    /// user may retry.
    pub async fn submit(
        &mut self,
        api: &dyn InvoiceApi,
        user_id: Option<&str>,
    ) -> Result<SubmitOutcome> {
        if self.submitted {
            return Err(FormError::SessionComplete.into());
        }
        if self.in_flight {
            return Err(FormError::SubmissionInFlight.into());
        }
        self.in_flight = true;
        self.transcript.push_bot(ui_text::submitting(self.language));

        let now = chrono::Utc::now();
        let payload = InvoicePayload::from_answers(&self.answers, user_id, now);
        let invoice_number = payload.invoice_number.clone();

        match api.create_invoice(payload, self.attachment.clone()).await {
            Ok(created) => {
                self.in_flight = false;
                self.submitted = true;
                self.transcript.push_bot(ui_text::success(self.language));
                match created.pdf_url {
                    Some(url) => {
                        tracing::info!(
                            session = %self.id,
                            invoice = %invoice_number,
                            "Invoice created, document ready"
                        );
                        Ok(SubmitOutcome::Redirect(url))
                    }
                    None => {
                        tracing::info!(
                            session = %self.id,
                            invoice = %invoice_number,
                            "Invoice created, document still generating"
                        );
                        self.transcript
                            .push_bot(ui_text::still_generating(self.language));
                        Ok(SubmitOutcome::FallbackAfter(self.fallback_delay))
                    }
                }
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Invoice submission failed");
                self.in_flight = false;
                self.transcript.push_bot(e.to_string());
                Ok(SubmitOutcome::Failed)
            }
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}
