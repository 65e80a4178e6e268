use std::fmt;

use thiserror::Error;

/// Rejection for submissions that carry no text at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("prompt must not be empty")]
pub struct EmptyPrompt;

/// Non-empty user prompt
///
/// The text is kept exactly as submitted. Two prompts are the same
/// prompt only when their text is byte-for-byte equal, which is what
/// decides whether a cached result may be reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt(String);

impl Prompt {
    /// Accept a submission, rejecting only empty text
    ///
    /// Whitespace counts as text and is forwarded unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyPrompt`] when the submitted text is empty
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyPrompt> {
        let text = text.into();
        if text.is_empty() {
            return Err(EmptyPrompt);
        }
        Ok(Self(text))
    }

    /// Interpret an optional form field as a submission
    ///
    /// A missing field and an empty field both mean "nothing submitted".
    pub fn from_submission(field: Option<&str>) -> Option<Self> {
        field.and_then(|text| Self::new(text).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, used for logging instead of the text itself
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_verbatim() {
        let prompt = Prompt::new("  a red fox ").unwrap();
        assert_eq!(prompt.as_str(), "  a red fox ");
    }

    #[test]
    fn rejects_only_empty_text() {
        assert_eq!(Prompt::new(""), Err(EmptyPrompt));
        assert_eq!(Prompt::new(" \t\n").unwrap().as_str(), " \t\n");
    }

    #[test]
    fn whitespace_field_is_a_submission() {
        assert_eq!(Prompt::from_submission(Some("   ")).map(|p| p.char_count()), Some(3));
    }

    #[test]
    fn missing_or_empty_field_is_no_submission() {
        assert!(Prompt::from_submission(None).is_none());
        assert!(Prompt::from_submission(Some("")).is_none());
        assert_eq!(
            Prompt::from_submission(Some("owl")).map(|p| p.to_string()),
            Some("owl".to_owned())
        );
    }

    #[test]
    fn char_count_is_unicode_aware() {
        let prompt = Prompt::new("café").unwrap();
        assert_eq!(prompt.char_count(), 4);
    }
}
