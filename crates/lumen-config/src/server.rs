use std::net::SocketAddr;

use serde::Deserialize;

use crate::{health::HealthConfig, session::SessionConfig};

/// HTTP server and page configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Usage notice shown under the heading
    #[serde(default = "default_notice")]
    pub notice: String,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            title: default_title(),
            notice: default_notice(),
            health: HealthConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

fn default_title() -> String {
    "Google GenAI image creation".to_string()
}

fn default_notice() -> String {
    "Please use responsibly. Don't generate inappropriate images, or too many.".to_string()
}
