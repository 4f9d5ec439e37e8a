//! Runner configuration.

use crate::config::UpdateConfig;

/// Everything a run needs: the access token and the update settings.
#[derive(Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Run settings.
    update: UpdateConfig,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: String, update: UpdateConfig) -> Self {
        Self { token, update }
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the run settings.
    pub fn update(&self) -> &UpdateConfig {
        &self.update
    }

    /// Consumes the configuration, returning the run settings.
    pub fn into_update(self) -> UpdateConfig {
        self.update
    }
}

impl std::fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("token", &"<redacted>")
            .field("update", &self.update)
            .finish()
    }
}
