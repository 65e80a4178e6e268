use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ImageGenProvider, status_error};
use crate::{
    error::{ImageGenError, Result},
    types::ImageRequest,
};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured
const DEFAULT_MODEL: &str = "dall-e-2";

/// Error code `OpenAI` uses for prompts rejected by its safety system
const CONTENT_POLICY_CODE: &str = "content_policy_violation";

/// `OpenAI` image generation provider
pub(crate) struct OpenAiImageGenProvider {
    name: String,
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiImageGenProvider {
    /// Create a new `OpenAI` image generation provider
    pub fn new(name: String, api_key: SecretString, base_url: Option<&str>, model: Option<&str>) -> Self {
        Self {
            name,
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }
}

/// Wire format for the `OpenAI` image generation API request
#[derive(Serialize)]
struct OpenAiImageRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    n: u32,
    response_format: &'static str,
}

/// Wire format for the `OpenAI` image generation API response
#[derive(Deserialize)]
struct OpenAiImageResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    b64_json: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetails,
}

#[derive(Deserialize)]
struct OpenAiErrorDetails {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[async_trait]
impl ImageGenProvider for OpenAiImageGenProvider {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Bytes>> {
        let url = format!("{}/images/generations", self.base_url);

        if request.guidance_scale.is_some() {
            tracing::debug!(provider = %self.name, "guidance scale is not supported by OpenAI, ignoring");
        }

        let wire_request = OpenAiImageRequest {
            prompt: &request.prompt,
            model: &self.model,
            n: request.number_of_images,
            response_format: "b64_json",
        };

        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            "sending image generation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "image generation request failed");
                ImageGenError::ConnectionError(format!("Failed to send request to OpenAI image generation: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, %status, "OpenAI image generation API error");

            if let Ok(body) = serde_json::from_str::<OpenAiErrorBody>(&error_text)
                && body.error.code.as_deref() == Some(CONTENT_POLICY_CODE)
            {
                return Err(ImageGenError::ContentFiltered(body.error.message));
            }

            return Err(status_error(status, error_text));
        }

        let wire_response: OpenAiImageResponse = response.json().await.map_err(|e| {
            tracing::error!(
                provider = %self.name,
                error = %e,
                "failed to parse OpenAI image generation response"
            );
            ImageGenError::InvalidResponse(e.to_string())
        })?;

        let images = wire_response
            .data
            .into_iter()
            .filter_map(|d| d.b64_json)
            .map(|encoded| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map(Bytes::from)
                    .map_err(|e| ImageGenError::InvalidResponse(format!("image is not valid base64: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        if images.is_empty() {
            return Err(ImageGenError::EmptyResponse);
        }

        tracing::debug!(provider = %self.name, count = images.len(), "image generation request complete");

        Ok(images)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
