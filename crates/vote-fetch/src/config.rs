use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_API_BASE_URL: &str = "VOTING_SCORE_API_BASE_URL";
pub const ENV_MAX_PAGES: &str = "VOTING_SCORE_MAX_PAGES";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "VOTING_SCORE_REQUEST_TIMEOUT_MS";

pub const DEFAULT_API_BASE_URL: &str = "https://api.boardroom.info/v1";
pub const DEFAULT_MAX_PAGES: u32 = 1_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VoteFetchConfig {
    pub api_base_url: String,
    pub max_pages: u32,
    pub request_timeout_ms: u64,
}

impl Default for VoteFetchConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl VoteFetchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };

        let api_base_url =
            value(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let max_pages = value(ENV_MAX_PAGES)
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_PAGES)
            .max(1);
        let request_timeout_ms = value(ENV_REQUEST_TIMEOUT_MS)
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
            .max(1);

        Self {
            api_base_url,
            max_pages,
            request_timeout_ms,
        }
    }
}
