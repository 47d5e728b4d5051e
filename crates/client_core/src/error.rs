use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("loading message pool must not be empty")]
    EmptyLoadingPool,
    #[error("unknown completion policy '{0}' (expected latest_only or last_resolved_wins)")]
    UnknownCompletionPolicy(String),
    #[error("invalid request timeout '{0}': expected a positive whole number of seconds")]
    InvalidTimeout(String),
    #[error("failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
