#![forbid(unsafe_code)]

mod aggregator;
mod decay;
mod diversity;
mod params;
mod report;

use common::{RawVote, UnixSeconds, VoteSource, VoterAddress};
use serde::{Deserialize, Serialize};

pub use aggregator::{ProtocolVoteSet, group_by_protocol, protocol_score, time_weighted_score};
pub use decay::{decreasing_decay, increasing_decay};
pub use diversity::diversity_multiplier;
pub use params::{
    DIVERSITY_COEFFICIENT, MAX_DIVERSITY_MULTIPLIER, MAX_SCORE_PER_PROTOCOL, MAX_VOTE_SCORE,
    MIN_DIVERSITY_MULTIPLIER, MIN_VOTE_SCORE, SCORER_VERSION, ScoringParams,
    TIMESTAMP_COEFFICIENT, scorer_version,
};
pub use report::{ReportOptions, render_report};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolScore {
    pub protocol: String,
    pub vote_count: usize,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub address: VoterAddress,
    pub now_unix_s: UnixSeconds,
    pub scorer_version: String,
    pub protocol_scores: Vec<ProtocolScore>,
    pub total_score: f64,
    pub diversity_multiplier: f64,
    pub final_score: f64,
}

impl ScoreResult {
    pub fn protocol_count(&self) -> usize {
        self.protocol_scores.len()
    }

    pub fn score_for(&self, protocol: &str) -> Option<f64> {
        self.protocol_scores
            .iter()
            .find(|entry| entry.protocol == protocol)
            .map(|entry| entry.score)
    }

    pub fn rounded_final_score(&self) -> f64 {
        (self.final_score * 100.0).round() / 100.0
    }
}

/// Scores an already fetched vote history against a single reference time.
pub fn score_votes(
    address: &VoterAddress,
    votes: &[RawVote],
    now: UnixSeconds,
    params: &ScoringParams,
) -> ScoreResult {
    let grouped = group_by_protocol(votes);

    let protocol_scores: Vec<ProtocolScore> = grouped
        .iter()
        .map(|(protocol, timestamps)| ProtocolScore {
            protocol: protocol.clone(),
            vote_count: timestamps.len(),
            score: params.protocol_score(now, timestamps),
        })
        .collect();
    let total_score: f64 = protocol_scores.iter().map(|entry| entry.score).sum();
    let diversity_multiplier = params.diversity_multiplier(grouped.len());

    ScoreResult {
        address: address.clone(),
        now_unix_s: now,
        scorer_version: scorer_version().to_owned(),
        protocol_scores,
        total_score,
        diversity_multiplier,
        final_score: total_score * diversity_multiplier,
    }
}

/// Fetches an address's votes from `S` and scores them.
#[derive(Clone, Debug)]
pub struct ScoreEngine<S> {
    source: S,
    params: ScoringParams,
}

impl<S: VoteSource> ScoreEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_params(source, ScoringParams::default())
    }

    pub fn with_params(source: S, params: ScoringParams) -> Self {
        Self { source, params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub async fn compute_voting_score(
        &self,
        address: &VoterAddress,
        now: UnixSeconds,
    ) -> ScoreResult {
        let votes = self.source.fetch_votes(address).await;
        tracing::debug!(address = %address, votes = votes.len(), now, "scoring vote history");
        let result = score_votes(address, &votes, now, &self.params);
        tracing::debug!(
            address = %address,
            protocols = result.protocol_count(),
            final_score = result.final_score,
            "voting score computed"
        );
        result
    }
}
