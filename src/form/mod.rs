//! Conversational form engine.

pub mod answers;
pub mod language;
pub mod question;
pub mod session;
pub mod transcript;

pub use answers::FormAnswers;
pub use language::Language;
pub use question::{Advance, FieldKey, InputKind, Question};
pub use session::{AnswerStep, FormSession, SubmitOutcome};
pub use transcript::{Message, Sender, Transcript};
