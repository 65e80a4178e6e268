use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Failures raised while talking to an image generation provider
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Provider rejected the request parameters or prompt
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (missing, expired or invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Every image was withheld by the provider's safety filter
    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    /// Provider answered successfully but returned no images
    #[error("Provider returned no images")]
    EmptyResponse,

    /// Provider response could not be decoded
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ImageGenError {
    /// Whether the provider was never reached
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
