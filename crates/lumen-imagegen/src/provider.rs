pub(crate) mod openai;
pub(crate) mod vertex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{error::Result, types::ImageRequest};

/// Trait for image generation provider implementations
#[async_trait]
pub(crate) trait ImageGenProvider: Send + Sync {
    /// Generate images for the request, returning the encoded payloads in order
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Bytes>>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Map a non-success provider status to an error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> crate::ImageGenError {
    use crate::ImageGenError;

    match status.as_u16() {
        401 | 403 => ImageGenError::AuthenticationFailed(body),
        400 => ImageGenError::InvalidRequest(body),
        code => ImageGenError::ProviderApiError { status: code, message: body },
    }
}
