use serde::{Deserialize, Serialize};

pub const SCORER_VERSION: &str = "voting-score.v1";

pub const MAX_SCORE_PER_PROTOCOL: f64 = 100.0;

pub const TIMESTAMP_COEFFICIENT: f64 = 0.000_000_1;
pub const MIN_VOTE_SCORE: f64 = 0.0;
pub const MAX_VOTE_SCORE: f64 = 1.0;

pub const DIVERSITY_COEFFICIENT: f64 = 0.1;
pub const MIN_DIVERSITY_MULTIPLIER: f64 = 1.0;
pub const MAX_DIVERSITY_MULTIPLIER: f64 = 2.0;

#[inline]
pub const fn scorer_version() -> &'static str {
    SCORER_VERSION
}

/// Tunables of the scoring curves. `Default` yields the published constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub max_score_per_protocol: f64,
    pub timestamp_coefficient: f64,
    pub min_vote_score: f64,
    pub max_vote_score: f64,
    pub diversity_coefficient: f64,
    pub min_diversity_multiplier: f64,
    pub max_diversity_multiplier: f64,
}

impl ScoringParams {
    pub const DEFAULT: Self = Self {
        max_score_per_protocol: MAX_SCORE_PER_PROTOCOL,
        timestamp_coefficient: TIMESTAMP_COEFFICIENT,
        min_vote_score: MIN_VOTE_SCORE,
        max_vote_score: MAX_VOTE_SCORE,
        diversity_coefficient: DIVERSITY_COEFFICIENT,
        min_diversity_multiplier: MIN_DIVERSITY_MULTIPLIER,
        max_diversity_multiplier: MAX_DIVERSITY_MULTIPLIER,
    };
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
