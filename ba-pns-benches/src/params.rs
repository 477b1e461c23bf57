//! Benchmark parameter types.

use std::fmt;

/// Parameters for a growth benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GrowthBenchParams {
    /// Final number of nodes.
    pub nodes: usize,
    /// Edges attached per growth step.
    pub edges_per_step: usize,
}

impl fmt::Display for GrowthBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.nodes, self.edges_per_step)
    }
}

/// Parameters for an estimation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct EstimationBenchParams {
    /// Number of observations in the sample.
    pub sample_len: usize,
    /// Whether the cutoff is searched rather than fixed.
    pub auto_cutoff: bool,
}

impl fmt::Display for EstimationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cutoff = if self.auto_cutoff { "auto" } else { "fixed" };
        write!(f, "n={},{cutoff}", self.sample_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_compact() {
        let growth = GrowthBenchParams {
            nodes: 1_000,
            edges_per_step: 3,
        };
        let estimation = EstimationBenchParams {
            sample_len: 500,
            auto_cutoff: true,
        };
        assert_eq!(growth.to_string(), "n=1000,m=3");
        assert_eq!(estimation.to_string(), "n=500,auto");
    }
}
