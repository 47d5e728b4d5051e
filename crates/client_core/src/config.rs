use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::{error::ClientError, loading::default_pool, types::CompletionPolicy};

pub const DEFAULT_CONFIG_FILE: &str = "tangent.toml";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Validated `http`/`https` base url of the calculation service.
    pub server_url: String,
    pub loading_messages: Vec<String>,
    pub completion_policy: CompletionPolicy,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            loading_messages: default_pool(),
            completion_policy: CompletionPolicy::default(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn set_server_url(&mut self, raw: &str) -> Result<(), ClientError> {
        self.server_url = parse_server_url(raw)?.to_string();
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    loading_messages: Option<Vec<String>>,
    completion_policy: Option<CompletionPolicy>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the config file, then `TANGENT__*` environment overrides.
///
/// Without an explicit `path`, `tangent.toml` in the working directory is used
/// when present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ClientError> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with_env(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ClientError> {
    let mut settings = Settings::default();

    let file = match path {
        Some(path) => Some(read_file_settings(path)?),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                Some(read_file_settings(&fallback)?)
            } else {
                None
            }
        }
    };

    if let Some(file) = file {
        if let Some(v) = file.server_url {
            settings.set_server_url(&v)?;
        }
        if let Some(v) = file.loading_messages {
            settings.loading_messages = v;
        }
        if let Some(v) = file.completion_policy {
            settings.completion_policy = v;
        }
        if let Some(v) = file.request_timeout_secs {
            settings.request_timeout_secs = Some(positive_timeout(v, v.to_string())?);
        }
    }

    if let Some(v) = env("TANGENT__SERVER_URL") {
        settings.set_server_url(&v)?;
    }
    if let Some(v) = env("TANGENT__COMPLETION_POLICY") {
        settings.completion_policy =
            CompletionPolicy::parse(&v).ok_or(ClientError::UnknownCompletionPolicy(v))?;
    }
    if let Some(v) = env("TANGENT__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .map_err(|_| ClientError::InvalidTimeout(v.clone()))?;
        settings.request_timeout_secs = Some(positive_timeout(secs, v)?);
    }

    if settings.loading_messages.is_empty() {
        return Err(ClientError::EmptyLoadingPool);
    }

    Ok(settings)
}

fn positive_timeout(secs: u64, raw: String) -> Result<u64, ClientError> {
    if secs == 0 {
        return Err(ClientError::InvalidTimeout(raw));
    }
    Ok(secs)
}

fn read_file_settings(path: &Path) -> Result<FileSettings, ClientError> {
    let raw = fs::read_to_string(path).map_err(|source| ClientError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ClientError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_server_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim()).map_err(|source| ClientError::InvalidServerUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ClientError::UnsupportedScheme(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
