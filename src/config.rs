use crate::error::AppError;
use crate::models::LoggedIn;
use serde::{Deserialize, Serialize};

const APP_CONFIG: &str = include_str!("../config/app.toml");

/// Settings for the in-memory login/save collaborators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoSettings {
    pub login_code: String,
    pub latency_ms: u64,
    pub rejected_emails: Vec<String>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            login_code: "123456".to_string(),
            latency_ms: 600,
            rejected_emails: Vec::new(),
        }
    }
}

/// Application configuration, embedded at build time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub logged_in: LoggedIn,
    pub demo: DemoSettings,
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    /// Load the bundled config, falling back to defaults if it is broken
    pub fn load() -> Self {
        match Self::from_toml(APP_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{} ({})", e.user_message(), e);
                Self::default()
            }
        }
    }
}
