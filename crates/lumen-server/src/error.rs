use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Failures while handling a page or download request
#[derive(Debug, Error)]
pub enum ServerError {
    /// No image is on display at the requested position
    #[error("no image at index {0}")]
    ImageNotFound(usize),

    /// The session middleware did not run for this route
    #[error("request has no session")]
    MissingSession,

    /// The render pass panicked or was aborted
    #[error("render task failed: {0}")]
    RenderTask(#[from] tokio::task::JoinError),

    /// A response header could not be built
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ImageNotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingSession | Self::RenderTask(_) | Self::InvalidHeader(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return (status, "Internal server error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}
