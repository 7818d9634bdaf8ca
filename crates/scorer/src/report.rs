use crate::ScoreResult;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReportOptions {
    /// Include the per-protocol lines and the diversity multiplier.
    pub verbose: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { verbose: true }
    }
}

pub fn render_report(result: &ScoreResult, options: ReportOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Address: {}", result.address);
    if options.verbose {
        for entry in &result.protocol_scores {
            let _ = writeln!(out, "{}: {}", entry.protocol, entry.score);
        }
        let _ = writeln!(out, "Diversity Multiplier: {}", result.diversity_multiplier);
    }
    let _ = writeln!(out, "Voting Score: {:.2}", result.final_score);
    out
}
