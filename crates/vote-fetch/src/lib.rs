#![forbid(unsafe_code)]

mod config;
mod page;

use anyhow::{Result, bail};
use async_trait::async_trait;
use common::{RawVote, VoteSource, VoterAddress};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use config::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT_MS, ENV_API_BASE_URL,
    ENV_MAX_PAGES, ENV_REQUEST_TIMEOUT_MS, VoteFetchConfig,
};
pub use page::{VotePage, decode_vote_page};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with http status {status}")]
    Status { url: String, status: u16 },
    #[error("json decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("vote page has no 'data' array")]
    MissingData,
}

/// Outcome of walking every vote page of one address.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VoteFetchReport {
    pub address: VoterAddress,
    pub votes: Vec<RawVote>,
    pub pages_fetched: u32,
    pub skipped_records: usize,
    /// Set when the page limit stopped the walk while a cursor was still pending.
    pub truncated: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct VoteFetcher {
    http: reqwest::Client,
    config: VoteFetchConfig,
}

impl VoteFetcher {
    pub fn new(config: VoteFetchConfig) -> Result<Self> {
        if config.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        let timeout = Duration::from_millis(config.request_timeout_ms.max(1));
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &VoteFetchConfig {
        &self.config
    }

    pub fn votes_url(&self, address: &VoterAddress) -> String {
        format!(
            "{}/voters/{}/votes",
            self.config.api_base_url.trim_end_matches('/'),
            address
        )
    }

    /// Follows `nextCursor` until the last page, the page limit or the first
    /// failure. Failures end the walk but keep the votes already collected.
    pub async fn fetch_votes_traced(&self, address: &VoterAddress) -> VoteFetchReport {
        let url = self.votes_url(address);
        let max_pages = self.config.max_pages.max(1);
        let mut report = VoteFetchReport {
            address: address.clone(),
            ..VoteFetchReport::default()
        };
        let mut cursor: Option<String> = None;

        loop {
            if report.pages_fetched >= max_pages {
                report.truncated = true;
                tracing::warn!(
                    address = %address,
                    max_pages,
                    votes = report.votes.len(),
                    "vote page limit reached, remaining pages ignored"
                );
                break;
            }

            let page = match self.fetch_page(&url, cursor.as_deref()).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        address = %address,
                        page = report.pages_fetched.saturating_add(1),
                        votes = report.votes.len(),
                        "error in getting votes of address"
                    );
                    report.error = Some(err.to_string());
                    break;
                }
            };

            report.pages_fetched = report.pages_fetched.saturating_add(1);
            report.skipped_records = report.skipped_records.saturating_add(page.skipped);
            tracing::debug!(
                address = %address,
                page = report.pages_fetched,
                votes = page.votes.len(),
                skipped = page.skipped,
                "vote page fetched"
            );
            report.votes.extend(page.votes);

            match page.next_cursor {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    tracing::warn!(
                        address = %address,
                        cursor = %next,
                        "vote cursor did not advance"
                    );
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        report
    }

    async fn fetch_page(&self, url: &str, cursor: Option<&str>) -> Result<VotePage, FetchError> {
        let mut request = self.http.get(url);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_owned(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_owned(),
            source,
        })?;
        decode_vote_page(&body)
    }
}

#[async_trait]
impl VoteSource for VoteFetcher {
    async fn fetch_votes(&self, address: &VoterAddress) -> Vec<RawVote> {
        self.fetch_votes_traced(address).await.votes
    }
}
