//! Language selection and localized UI strings.

use serde::{Deserialize, Serialize};

/// The two supported conversation languages, selected once per session by
/// sentinel token: `"1"` for English, `"2"` for Hindi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Hi,
}

impl Language {
    /// Parse a sentinel token. Anything other than `"1"`/`"2"` is rejected.
    pub fn from_sentinel(token: &str) -> Option<Language> {
        match token {
            "1" => Some(Language::En),
            "2" => Some(Language::Hi),
            _ => None,
        }
    }

    /// Name echoed into the transcript when the language is picked.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Hi => write!(f, "hi"),
        }
    }
}

/// Localized UI strings outside the question table. Shown to the user before
/// a language is chosen, callers pass `None` and get the English text plus
/// the bilingual variants where the original app used them.
pub mod ui_text {
    use super::Language;

    /// Reprompt when the language sentinel is not `1` or `2`. Always
    /// bilingual: no language has been chosen yet.
    pub const CHOOSE_ONE_OR_TWO: &str = "Please type 1 or 2 / कृपया 1 या 2 टाइप करें";

    pub fn required_field(language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => "यह फ़ील्ड आवश्यक है",
            _ => "This field is required",
        }
    }

    pub fn invalid_number(language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => "कृपया एक संख्या दर्ज करें",
            _ => "Please enter a number",
        }
    }

    pub fn submitting(language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => "सबमिट किया जा रहा है...",
            _ => "Submitting details...",
        }
    }

    pub fn success(language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => "हो गया! इनवॉइस बन गया।",
            _ => "Success! Invoice created.",
        }
    }

    pub fn still_generating(language: Option<Language>) -> &'static str {
        match language {
            Some(Language::Hi) => "PDF बन रहा है... My Forms पर भेजा जा रहा है।",
            _ => "PDF is generating... Redirecting to My Forms.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_parsing() {
        assert_eq!(Language::from_sentinel("1"), Some(Language::En));
        assert_eq!(Language::from_sentinel("2"), Some(Language::Hi));
        assert_eq!(Language::from_sentinel("3"), None);
        assert_eq!(Language::from_sentinel(""), None);
        assert_eq!(Language::from_sentinel("english"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Language::En.display_name(), "English");
        assert_eq!(Language::Hi.display_name(), "हिंदी");
    }

    #[test]
    fn ui_text_falls_back_to_english_before_selection() {
        assert_eq!(ui_text::required_field(None), "This field is required");
        assert_eq!(
            ui_text::required_field(Some(Language::Hi)),
            "यह फ़ील्ड आवश्यक है"
        );
        assert_eq!(ui_text::submitting(None), "Submitting details...");
    }
}
