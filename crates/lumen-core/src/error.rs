use std::fmt;

/// Category of a failed generation, as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The provider refused the prompt on content policy grounds
    PolicyViolation,
    /// The provider could not be reached
    Transport,
    /// Any other provider failure
    Unknown,
}

impl ErrorCategory {
    /// Fixed user-facing message for this category
    pub const fn message(self) -> &'static str {
        match self {
            Self::PolicyViolation => "Image generation failed due to policy violation.",
            Self::Transport => "Image generation failed because the provider could not be reached.",
            Self::Unknown => "Image generation failed due to an unknown error.",
        }
    }

    /// Stable identifier, used in logs and markup
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PolicyViolation => "policy_violation",
            Self::Transport => "transport",
            Self::Unknown => "unknown",
        }
    }
}

/// Classified generation failure
///
/// Always terminal for the prompt it belongs to; the user is expected
/// to try a different prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    category: ErrorCategory,
    message: String,
}

impl ErrorInfo {
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            message: category.message().to_owned(),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorCategory> for ErrorInfo {
    fn from(category: ErrorCategory) -> Self {
        Self::new(category)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorInfo {}
