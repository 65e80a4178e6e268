use async_trait::async_trait;
use lumen_config::{ImageGenConfig, ImageGenProviderConfig, ImageGenProviderType};
use lumen_core::{ErrorCategory, ErrorInfo, GenerationResult, Prompt};
use secrecy::SecretString;

use crate::{
    error::ImageGenError,
    provider::{ImageGenProvider, openai::OpenAiImageGenProvider, vertex::VertexImageGenProvider},
    types::ImageRequest,
};

/// Source of generated images for a prompt
///
/// Failures come back as classified [`ErrorInfo`] values, never as
/// transport errors, so callers can branch on them directly.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Issue one generation call for `prompt`
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, ErrorInfo>;
}

/// Issues a single fixed-size generation call per prompt and classifies failures
pub struct ImageRequestService {
    provider: Box<dyn ImageGenProvider>,
    number_of_images: u32,
    guidance_scale: Option<f64>,
    policy_markers: Vec<String>,
}

impl ImageRequestService {
    /// Map a provider failure onto the user-facing categories
    ///
    /// Safety filtering and any configured policy marker found in the
    /// failure text are policy violations; unreachable providers are
    /// transport failures; everything else is unknown.
    fn classify(&self, error: &ImageGenError) -> ErrorInfo {
        let category = match error {
            ImageGenError::ContentFiltered(_) => ErrorCategory::PolicyViolation,
            _ if self.matches_policy_marker(&error.to_string()) => ErrorCategory::PolicyViolation,
            _ if error.is_connection_failure() => ErrorCategory::Transport,
            _ => ErrorCategory::Unknown,
        };

        ErrorInfo::new(category)
    }

    fn matches_policy_marker(&self, text: &str) -> bool {
        self.policy_markers.iter().any(|marker| text.contains(marker.as_str()))
    }
}

#[async_trait]
impl ImageGenerator for ImageRequestService {
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, ErrorInfo> {
        let request = ImageRequest {
            prompt: prompt.as_str().to_owned(),
            number_of_images: self.number_of_images,
            guidance_scale: self.guidance_scale,
        };

        tracing::info!(
            provider = self.provider.name(),
            prompt_chars = prompt.char_count(),
            number_of_images = self.number_of_images,
            "generating images"
        );

        match self.provider.generate(&request).await {
            Ok(payloads) => {
                let result = GenerationResult::from_payloads(payloads);
                tracing::info!(provider = self.provider.name(), count = result.len(), "images generated");
                Ok(result)
            }
            Err(error) => {
                let info = self.classify(&error);
                tracing::warn!(
                    provider = self.provider.name(),
                    category = info.category().as_str(),
                    error = %error,
                    "image generation failed"
                );
                Err(info)
            }
        }
    }
}

/// Builder for constructing the image request service from configuration
pub(crate) struct ImageRequestServiceBuilder<'a> {
    config: &'a ImageGenConfig,
}

impl<'a> ImageRequestServiceBuilder<'a> {
    pub fn new(config: &'a ImageGenConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<ImageRequestService> {
        let provider_config = &self.config.provider;
        let api_key = resolve_api_key(provider_config)?;

        tracing::debug!(provider_type = ?provider_config.provider_type, "initializing image generation provider");

        let provider: Box<dyn ImageGenProvider> = match provider_config.provider_type {
            ImageGenProviderType::Vertex => {
                let project = provider_config.project.as_deref().ok_or_else(|| {
                    ImageGenError::ConfigError("project is required for the vertex provider".to_string())
                })?;

                Box::new(VertexImageGenProvider::new(
                    "vertex".to_string(),
                    api_key,
                    project,
                    provider_config.location.as_deref(),
                    provider_config.model.as_deref(),
                    provider_config.base_url.as_deref(),
                ))
            }
            ImageGenProviderType::Openai => Box::new(OpenAiImageGenProvider::new(
                "openai".to_string(),
                api_key,
                provider_config.base_url.as_deref(),
                provider_config.model.as_deref(),
            )),
        };

        Ok(self.with_provider(provider))
    }

    fn with_provider(self, provider: Box<dyn ImageGenProvider>) -> ImageRequestService {
        ImageRequestService {
            provider,
            number_of_images: self.config.number_of_images,
            guidance_scale: self.config.guidance_scale,
            policy_markers: self.config.policy_markers.clone(),
        }
    }
}

fn resolve_api_key(config: &ImageGenProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| ImageGenError::ConfigError("API key required for image generation provider".to_string()))
}
