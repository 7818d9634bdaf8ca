use crate::decay::decreasing_decay;
use crate::params::ScoringParams;
use common::{RawVote, UnixSeconds};
use std::collections::BTreeMap;

/// Vote timestamps keyed by protocol. Ordered so that iteration, and with it
/// the floating point summation order, is stable between runs.
pub type ProtocolVoteSet = BTreeMap<String, Vec<UnixSeconds>>;

pub fn group_by_protocol(votes: &[RawVote]) -> ProtocolVoteSet {
    let mut grouped = ProtocolVoteSet::new();
    for vote in votes {
        grouped
            .entry(vote.protocol.clone())
            .or_default()
            .push(vote.timestamp);
    }
    grouped
}

impl ScoringParams {
    pub fn time_weighted_score(&self, now: UnixSeconds, vote_timestamp: UnixSeconds) -> f64 {
        let elapsed = now.saturating_sub(vote_timestamp);
        if elapsed < 0 {
            // future-dated vote, usually clock skew on the source side
            return 0.0;
        }
        decreasing_decay(
            self.max_vote_score - self.min_vote_score,
            self.timestamp_coefficient,
            elapsed as f64,
            self.min_vote_score,
        )
    }

    pub fn protocol_score(&self, now: UnixSeconds, timestamps: &[UnixSeconds]) -> f64 {
        let total: f64 = timestamps
            .iter()
            .map(|timestamp| self.time_weighted_score(now, *timestamp))
            .sum();
        total.min(self.max_score_per_protocol)
    }
}

pub fn time_weighted_score(now: UnixSeconds, vote_timestamp: UnixSeconds) -> f64 {
    ScoringParams::DEFAULT.time_weighted_score(now, vote_timestamp)
}

pub fn protocol_score(now: UnixSeconds, timestamps: &[UnixSeconds]) -> f64 {
    ScoringParams::DEFAULT.protocol_score(now, timestamps)
}
