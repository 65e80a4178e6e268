#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
pub mod imagegen;
mod loader;
pub mod server;
pub mod session;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use imagegen::*;
pub use server::*;
pub use session::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level Lumen configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server and page configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Image generation provider and request parameters
    pub imagegen: ImageGenConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
