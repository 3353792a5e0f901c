use std::path::PathBuf;
use std::time::Duration;

use crate::client::UpdateMethod;
use crate::errors::ClientError;

const ENV_API_BASE_URL: &str = "SALAPLAN_API_BASE_URL";
const ENV_BIND_ADDR: &str = "SALAPLAN_BIND_ADDR";
const ENV_API_TOKEN: &str = "SALAPLAN_API_TOKEN";
const ENV_TOKEN_FILE: &str = "SALAPLAN_TOKEN_FILE";
const ENV_REQUEST_TIMEOUT_SECS: &str = "SALAPLAN_REQUEST_TIMEOUT_SECS";
const ENV_PATCH_FALLBACK: &str = "SALAPLAN_PATCH_FALLBACK";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TOKEN_FILE: &str = "data/session.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of the REST API the clients talk to.
    pub api_base_url: String,
    /// Listen address of the mock backend.
    pub bind_addr: String,
    /// Token the mock backend accepts; generated at startup when unset.
    pub api_token: Option<String>,
    /// Where the client keeps its `token`/`user` session document.
    pub token_file: PathBuf,
    pub request_timeout: Duration,
    /// Retry meeting and task updates as PATCH when PUT answers 404.
    pub patch_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_token: None,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            patch_fallback: false,
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let request_timeout = match get(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "{ENV_REQUEST_TIMEOUT_SECS}={raw:?} is not a positive integer, using {DEFAULT_REQUEST_TIMEOUT_SECS}s"
                    );
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Config {
            api_base_url: get(ENV_API_BASE_URL).unwrap_or(defaults.api_base_url),
            bind_addr: get(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            api_token: get(ENV_API_TOKEN),
            token_file: get(ENV_TOKEN_FILE).map(PathBuf::from).unwrap_or(defaults.token_file),
            request_timeout,
            patch_fallback: get(ENV_PATCH_FALLBACK).is_some_and(|v| parse_flag(&v)),
        }
    }

    pub fn update_method(&self) -> UpdateMethod {
        if self.patch_fallback {
            UpdateMethod::PutWithPatchFallback
        } else {
            UpdateMethod::Put
        }
    }

    /// Shared HTTP client with the request timeout applied.
    pub fn http_client(&self) -> Result<reqwest::Client, ClientError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
