use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, ImageGenProviderType};

/// Largest batch a single prompt may request
const MAX_IMAGES_PER_PROMPT: u32 = 8;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_imagegen()?;
        self.validate_provider()?;
        self.validate_session()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_imagegen(&self) -> anyhow::Result<()> {
        let imagegen = &self.imagegen;

        if !(1..=MAX_IMAGES_PER_PROMPT).contains(&imagegen.number_of_images) {
            anyhow::bail!(
                "imagegen.number_of_images must be between 1 and {MAX_IMAGES_PER_PROMPT}, got {}",
                imagegen.number_of_images
            );
        }

        if let Some(scale) = imagegen.guidance_scale
            && !(scale.is_finite() && scale > 0.0)
        {
            anyhow::bail!("imagegen.guidance_scale must be a positive number, got {scale}");
        }

        if imagegen.policy_markers.iter().any(String::is_empty) {
            anyhow::bail!("imagegen.policy_markers must not contain empty markers");
        }

        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        let provider = &self.imagegen.provider;

        let has_key = provider
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty());
        if !has_key {
            anyhow::bail!("imagegen.provider.api_key must be set");
        }

        if provider.provider_type == ImageGenProviderType::Vertex
            && provider.project.as_deref().is_none_or(str::is_empty)
        {
            anyhow::bail!("imagegen.provider.project is required for the vertex provider");
        }

        if let Some(ref base_url) = provider.base_url {
            url::Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("invalid imagegen.provider.base_url '{base_url}': {e}"))?;
        }

        Ok(())
    }

    fn validate_session(&self) -> anyhow::Result<()> {
        let session = &self.server.session;

        session.idle_timeout()?;

        if session.cookie_name.is_empty()
            || !session
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!(
                "server.session.cookie_name must be non-empty and contain only ASCII letters, digits, '_' or '-'"
            );
        }

        if session.max_sessions == 0 {
            anyhow::bail!("server.session.max_sessions must be greater than 0");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(exporter) = self.telemetry.as_ref().and_then(|t| t.exporter.as_ref()) else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&exporter.sampling_rate) {
            anyhow::bail!(
                "telemetry.exporter.sampling_rate must be between 0.0 and 1.0, got {}",
                exporter.sampling_rate
            );
        }

        Ok(())
    }
}
