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

/// Imagen model used when none is configured
pub(crate) const DEFAULT_MODEL: &str = "imagegeneration@002";

/// Region used when none is configured
pub(crate) const DEFAULT_LOCATION: &str = "us-central1";

/// Imagen on Vertex AI, called through the `:predict` endpoint
pub(crate) struct VertexImageGenProvider {
    name: String,
    client: Client,
    access_token: SecretString,
    predict_url: String,
}

impl VertexImageGenProvider {
    /// Create a provider for `model` in the given project and region
    ///
    /// Without a base URL override the regional endpoint
    /// `https://{location}-aiplatform.googleapis.com/v1` is used.
    pub fn new(
        name: String,
        access_token: SecretString,
        project: &str,
        location: Option<&str>,
        model: Option<&str>,
        base_url: Option<&str>,
    ) -> Self {
        let location = location.unwrap_or(DEFAULT_LOCATION);
        let model = model.unwrap_or(DEFAULT_MODEL);
        let base_url = base_url.map_or_else(
            || format!("https://{location}-aiplatform.googleapis.com/v1"),
            |url| url.trim_end_matches('/').to_string(),
        );

        Self {
            name,
            client: Client::new(),
            access_token,
            predict_url: format!("{base_url}/projects/{project}/locations/{location}/publishers/google/models/{model}:predict"),
        }
    }
}

/// Wire format for the Imagen predict request
#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [PredictInstance<'a>; 1],
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    guidance_scale: Option<f64>,
    /// Without this, fully filtered batches come back with no predictions
    include_rai_reason: bool,
}

/// Wire format for the Imagen predict response
#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    rai_filtered_reason: Option<String>,
}

#[async_trait]
impl ImageGenProvider for VertexImageGenProvider {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<Bytes>> {
        let wire_request = PredictRequest {
            instances: [PredictInstance {
                prompt: &request.prompt,
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                guidance_scale: request.guidance_scale,
                include_rai_reason: true,
            },
        };

        tracing::debug!(
            provider = %self.name,
            sample_count = request.number_of_images,
            "sending imagen predict request"
        );

        let response = self
            .client
            .post(&self.predict_url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "imagen predict request failed");
                ImageGenError::ConnectionError(format!("Failed to send request to Vertex AI: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, %status, "Vertex AI predict API error");

            return Err(status_error(status, error_text));
        }

        let wire_response: PredictResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse imagen predict response");
            ImageGenError::InvalidResponse(e.to_string())
        })?;

        let mut images = Vec::with_capacity(wire_response.predictions.len());
        let mut filtered_reason = None;

        for prediction in wire_response.predictions {
            match (prediction.bytes_base64_encoded, prediction.rai_filtered_reason) {
                (Some(encoded), _) => {
                    let decoded = STANDARD
                        .decode(encoded.as_bytes())
                        .map_err(|e| ImageGenError::InvalidResponse(format!("image is not valid base64: {e}")))?;
                    images.push(Bytes::from(decoded));
                }
                (None, Some(reason)) => filtered_reason = Some(reason),
                (None, None) => {}
            }
        }

        if images.is_empty() {
            return Err(filtered_reason.map_or(ImageGenError::EmptyResponse, ImageGenError::ContentFiltered));
        }

        if let Some(reason) = filtered_reason {
            tracing::warn!(provider = %self.name, %reason, kept = images.len(), "some images were filtered");
        }

        tracing::debug!(provider = %self.name, count = images.len(), "imagen predict request complete");

        Ok(images)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
