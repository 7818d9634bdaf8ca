use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the unix epoch.
pub type UnixSeconds = i64;

#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterAddress(pub String);

impl VoterAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VoterAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One governance vote cast by an address, as reported by the vote source.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RawVote {
    pub protocol: String,
    pub timestamp: UnixSeconds,
}

impl RawVote {
    pub fn new(protocol: impl Into<String>, timestamp: UnixSeconds) -> Self {
        Self {
            protocol: protocol.into(),
            timestamp,
        }
    }
}

/// Anything that can produce the full vote history of an address.
///
/// Implementations swallow their own failures: an unreachable source yields
/// whatever was collected so far, possibly nothing.
#[async_trait]
pub trait VoteSource {
    async fn fetch_votes(&self, address: &VoterAddress) -> Vec<RawVote>;
}

/// Serves the same fixed vote list for every address.
#[derive(Clone, Debug, Default)]
pub struct StaticVoteSource {
    votes: Vec<RawVote>,
}

impl StaticVoteSource {
    pub fn new(votes: Vec<RawVote>) -> Self {
        Self { votes }
    }
}

#[async_trait]
impl VoteSource for StaticVoteSource {
    async fn fetch_votes(&self, _address: &VoterAddress) -> Vec<RawVote> {
        self.votes.clone()
    }
}

pub fn current_unix_seconds() -> UnixSeconds {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as UnixSeconds
}
