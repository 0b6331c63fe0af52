use crate::ServicesError;
use crate::domain::services::models::service::ProjectId;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_ttl() -> u64 {
    4
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Api {
    #[serde(default = "default_url")]
    pub url: String,
    pub token: Option<String>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Notifications {
    /// Seconds a notification stays visible.
    #[serde(default = "default_ttl")]
    pub ttl: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub project: Option<ProjectId>,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub notifications: Notifications,
}

impl Config {
    pub fn api_url(&self) -> Result<Url, ServicesError> {
        Url::parse(&self.api.url).map_err(|e| ServicesError::InvalidUrl(format!("{}: {e}", self.api.url)))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notifications.ttl)
    }
}

/// Reads the optional toml file, then `SERVICEDECK_` prefixed environment variables.
pub fn load_config(config_path: Option<&Path>) -> Result<Config, ServicesError> {
    let mut figment = Figment::new();
    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(Env::prefixed("SERVICEDECK_").split("_"))
        .extract()
        .map_err(|e| ServicesError::Config(Box::new(e)))
}
