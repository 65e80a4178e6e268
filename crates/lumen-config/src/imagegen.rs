use secrecy::SecretString;
use serde::Deserialize;

/// Image generation configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Images requested per prompt
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u32,
    /// Provider guidance scale, omitted from requests when unset
    #[serde(default)]
    pub guidance_scale: Option<f64>,
    /// Substrings of a provider failure that mark a policy violation
    #[serde(default = "default_policy_markers")]
    pub policy_markers: Vec<String>,
    /// The single upstream provider
    pub provider: ImageGenProviderConfig,
}

/// Configuration for the upstream image generation provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: ImageGenProviderType,
    /// Model identifier; each provider has its own default
    #[serde(default)]
    pub model: Option<String>,
    /// API key, or OAuth access token for Vertex AI
    ///
    /// Vertex access tokens expire after about an hour and are not refreshed
    /// here; supply a fresh one (e.g. via `{{ env.VERTEX_ACCESS_TOKEN }}`)
    /// and restart.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Google Cloud project (Vertex AI only)
    #[serde(default)]
    pub project: Option<String>,
    /// Google Cloud region (Vertex AI only)
    #[serde(default)]
    pub location: Option<String>,
}

/// Supported image generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageGenProviderType {
    /// Imagen on Vertex AI
    Vertex,
    /// `OpenAI` image generation
    Openai,
}

#[allow(clippy::missing_const_for_fn)]
fn default_number_of_images() -> u32 {
    3
}

fn default_policy_markers() -> Vec<String> {
    vec!["57734940".to_string()]
}
