use std::time::Duration;

use serde::Deserialize;

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Idle time after which a session and its images are dropped (e.g. "30m")
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: String,
    /// Upper bound on concurrently held sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl SessionConfig {
    /// Parse `idle_timeout` into a duration
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid duration string
    pub fn idle_timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.idle_timeout)
            .map_err(|e| anyhow::anyhow!("invalid session idle_timeout '{}': {e}", self.idle_timeout))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_cookie_name() -> String {
    "lumen_session".to_string()
}

fn default_idle_timeout() -> String {
    "30m".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_sessions() -> u64 {
    10_000
}
