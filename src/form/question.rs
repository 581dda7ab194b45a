//! The fixed question sequence and its traversal table.

use serde::{Deserialize, Serialize};

use super::language::Language;

/// Every slot the conversation can fill. Order of the question table, not
/// of this enum, defines traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Language,
    SupplierName,
    SupplierAddress,
    BuyerName,
    BuyerAddress,
    ItemName,
    Quantity,
    Rate,
    VehicleNumber,
    Notes,
    WeighmentSlip,
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Language => "language",
            Self::SupplierName => "supplierName",
            Self::SupplierAddress => "supplierAddress",
            Self::BuyerName => "buyerName",
            Self::BuyerAddress => "buyerAddress",
            Self::ItemName => "itemName",
            Self::Quantity => "quantity",
            Self::Rate => "rate",
            Self::VehicleNumber => "vehicleNumber",
            Self::Notes => "notes",
            Self::WeighmentSlip => "weightmentSlip",
        };
        write!(f, "{s}")
    }
}

/// How the answer to a question is captured and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Language,
    File,
}

/// Bilingual prompt text for one question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionText {
    pub en: &'static str,
    pub hi: &'static str,
}

impl QuestionText {
    /// Text in the selected language; English before any selection.
    pub fn in_language(&self, language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => self.hi,
            _ => self.en,
        }
    }
}

/// One entry of the conversation: field key, input kind, required policy,
/// and bilingual prompt.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub field: FieldKey,
    pub kind: InputKind,
    pub optional: bool,
    pub text: QuestionText,
}

/// The fixed, ordered question sequence. Prompts are verbatim from the
/// production flow (Hinglish on the English side is intentional).
pub const QUESTIONS: &[Question] = &[
    Question {
        field: FieldKey::Language,
        kind: InputKind::Language,
        optional: false,
        text: QuestionText {
            en: "Bhasha / Language\nType 1 - English\nType 2 - Hindi",
            hi: "भाषा चुनें \nType 1 - English\nType 2 - Hindi",
        },
    },
    Question {
        field: FieldKey::SupplierName,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Supplier Kaun",
            hi: "माल भेजने वाला",
        },
    },
    Question {
        field: FieldKey::SupplierAddress,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Place of Supply/Supply kahan se",
            hi: "भेजने वाले का पता",
        },
    },
    Question {
        field: FieldKey::BuyerName,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Party Ka Naam",
            hi: "पार्टी का नाम",
        },
    },
    Question {
        field: FieldKey::BuyerAddress,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Party Address",
            hi: "पार्टी का पता",
        },
    },
    Question {
        field: FieldKey::ItemName,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Item Kya hai",
            hi: "आइटम का नाम",
        },
    },
    Question {
        field: FieldKey::Quantity,
        kind: InputKind::Number,
        optional: false,
        text: QuestionText {
            en: "Kitna Maal",
            hi: "कुल मात्रा/QTY",
        },
    },
    Question {
        field: FieldKey::Rate,
        kind: InputKind::Number,
        optional: false,
        text: QuestionText {
            en: "Kya Bhaav Lgaya",
            hi: "रेट/भाव",
        },
    },
    Question {
        field: FieldKey::VehicleNumber,
        kind: InputKind::Text,
        optional: false,
        text: QuestionText {
            en: "Gaadi No.",
            hi: "गाड़ी नंबर",
        },
    },
    Question {
        field: FieldKey::Notes,
        kind: InputKind::Text,
        optional: true,
        text: QuestionText {
            en: "Cash ya Commission",
            hi: "नकद या कमीशन",
        },
    },
    Question {
        field: FieldKey::WeighmentSlip,
        kind: InputKind::File,
        optional: true,
        text: QuestionText {
            en: "Kanta Parchi Photo",
            hi: "कांटा पर्ची",
        },
    },
];

/// Position of a field in the question sequence.
pub fn index_of(field: FieldKey) -> Option<usize> {
    QUESTIONS.iter().position(|q| q.field == field)
}

/// What happens after a question is answered.
///
/// Declarative successor table: the default is the next entry in the
/// sequence, a `SkipTo` jumps ahead past pre-filled questions (echoing the
/// default so the transcript reads like the user confirmed it), and
/// `Submit` ends traversal. New branch rules are one arm each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move to the question at `currentIndex + 1`.
    Next,
    /// Jump to `target`, echoing the pre-filled default of `echo` as a
    /// synthetic user message.
    SkipTo { target: FieldKey, echo: FieldKey },
    /// Sequence exhausted; build and submit the payload.
    Submit,
}

/// Successor for the question just answered.
///
/// Item name and HSN carry fixed defaults the user never confirms, so the
/// buyer-address answer jumps straight to quantity.
pub fn advance_from(field: FieldKey) -> Advance {
    match field {
        FieldKey::BuyerAddress => Advance::SkipTo {
            target: FieldKey::Quantity,
            echo: FieldKey::ItemName,
        },
        FieldKey::WeighmentSlip => Advance::Submit,
        _ => match index_of(field) {
            Some(i) if i + 1 < QUESTIONS.len() => Advance::Next,
            _ => Advance::Submit,
        },
    }
}
