use crate::selector::Selector;
use crate::types::{ActionCandidate, DigestQuery};

/// Selects the top K candidates by priority score. Unscored candidates
/// sort last.
pub struct TopKSelector {
    pub k: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self { k: 10 }
    }
}

impl Selector<DigestQuery, ActionCandidate> for TopKSelector {
    fn score(&self, candidate: &ActionCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
