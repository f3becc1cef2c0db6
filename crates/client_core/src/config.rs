use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "lotto.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    pub submit_path: String,
    pub request_timeout_secs: Option<u64>,
    pub submit_label: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            submit_path: "/submit".into(),
            request_timeout_secs: None,
            submit_label: "Submit games".into(),
        }
    }
}

impl ClientSettings {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.server_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            url: self.server_url.clone(),
            source,
        })
    }

    pub fn submit_endpoint(&self) -> Result<Url, ConfigError> {
        let base = self.base_url()?;
        base.join(&self.submit_path)
            .map_err(|source| ConfigError::InvalidUrl {
                url: format!("{}{}", self.server_url, self.submit_path),
                source,
            })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

/// Defaults, then the TOML file at `path` if readable, then environment
/// overrides. Values that fail to parse are skipped.
pub fn load_settings_from(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {err}")
            }
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file_values(settings: &mut ClientSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("submit_path").and_then(toml::Value::as_str) {
        settings.submit_path = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        settings.request_timeout_secs = u64::try_from(v).ok();
    }
    if let Some(v) = file_cfg.get("submit_label").and_then(toml::Value::as_str) {
        settings.submit_label = v.to_string();
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("LOTTO_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__SUBMIT_PATH") {
        settings.submit_path = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    if let Some(v) = var("APP__SUBMIT_LABEL") {
        settings.submit_label = v;
    }
}
