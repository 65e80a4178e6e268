#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod service;
mod types;

use std::sync::Arc;

pub use error::{ImageGenError, Result};
pub use service::{ImageGenerator, ImageRequestService};

use service::ImageRequestServiceBuilder;

/// Build the image request service from configuration
///
/// # Errors
///
/// Returns an error if the configured provider cannot be initialized
pub fn build_service(config: &lumen_config::Config) -> anyhow::Result<Arc<ImageRequestService>> {
    let service = ImageRequestServiceBuilder::new(&config.imagegen)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize image generation service: {e}"))?;

    Ok(Arc::new(service))
}
