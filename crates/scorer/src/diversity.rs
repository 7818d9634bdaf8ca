use crate::decay::increasing_decay;
use crate::params::ScoringParams;

impl ScoringParams {
    /// Zero for an address with no protocols, exactly the minimum multiplier
    /// for one protocol, and rising toward the maximum as more are added.
    pub fn diversity_multiplier(&self, protocol_count: usize) -> f64 {
        if protocol_count < 1 {
            return 0.0;
        }
        increasing_decay(
            self.max_diversity_multiplier - self.min_diversity_multiplier,
            self.diversity_coefficient,
            (protocol_count - 1) as f64,
            self.min_diversity_multiplier,
        )
    }
}

pub fn diversity_multiplier(protocol_count: usize) -> f64 {
    ScoringParams::DEFAULT.diversity_multiplier(protocol_count)
}
