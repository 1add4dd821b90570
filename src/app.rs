//! App Core for ghcard.
//!
//! Ties the settings engine, the GitHub client built from those settings, and
//! the single widget instance together.

use std::sync::Arc;

use tracing::{info, warn};

use crate::managers::widget_manager::WidgetManager;
use crate::services::github_client::{GitHubApi, GitHubClient};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

pub struct App {
    pub settings_engine: SettingsEngine,
    pub widget: WidgetManager,
}

impl App {
    /// Loads settings (from `config_path` or the platform config dir) and
    /// builds the HTTP client and widget from them.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        Self::from_engine(settings_engine)
    }

    /// Builds the app from an already loaded (and possibly overridden) engine.
    pub fn from_engine(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let client = GitHubClient::new(settings_engine.get_settings())?;
        info!(api = client.base_url(), "GitHub client ready");
        Ok(Self::with_api(settings_engine, Arc::new(client)))
    }

    /// Uses a caller-supplied API implementation instead of the HTTP client.
    pub fn with_api(settings_engine: SettingsEngine, api: Arc<dyn GitHubApi>) -> Self {
        Self {
            settings_engine,
            widget: WidgetManager::new(api),
        }
    }

    /// Changes one setting and switches the widget to a client built from it.
    ///
    /// The client is built from the candidate settings first; if that fails
    /// (e.g. a user agent that is not a valid header) nothing is saved and the
    /// current client stays in place.
    pub fn update_setting(
        &mut self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let candidate = self.settings_engine.with_value(key, value)?;
        let client = GitHubClient::new(&candidate).map_err(|e| {
            warn!(%key, error = %e, "rejected settings change");
            e
        })?;
        self.settings_engine.replace(candidate)?;
        info!(%key, api = client.base_url(), "GitHub client reloaded");
        self.widget.replace_api(Arc::new(client));
        Ok(())
    }
}
