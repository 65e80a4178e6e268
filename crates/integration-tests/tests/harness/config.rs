//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use lumen_config::{
    Config, HealthConfig, ImageGenConfig, ImageGenProviderConfig, ImageGenProviderType, ServerConfig,
};
use secrecy::SecretString;

use super::mock_provider::{MOCK_PROJECT, MOCK_TOKEN};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder whose Vertex provider points at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                imagegen: ImageGenConfig {
                    number_of_images: 3,
                    guidance_scale: None,
                    policy_markers: vec!["57734940".to_owned()],
                    provider: ImageGenProviderConfig {
                        provider_type: ImageGenProviderType::Vertex,
                        model: None,
                        api_key: Some(SecretString::from(MOCK_TOKEN)),
                        base_url: Some(base_url.to_owned()),
                        project: Some(MOCK_PROJECT.to_owned()),
                        location: None,
                    },
                },
                telemetry: None,
            },
        }
    }

    /// Request a different number of images per prompt
    pub fn with_number_of_images(mut self, count: u32) -> Self {
        self.config.imagegen.number_of_images = count;
        self
    }

    /// Send a guidance scale with every request
    pub fn with_guidance_scale(mut self, scale: f64) -> Self {
        self.config.imagegen.guidance_scale = Some(scale);
        self
    }

    /// Change the page heading
    pub fn with_title(mut self, title: &str) -> Self {
        self.config.server.title = title.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
