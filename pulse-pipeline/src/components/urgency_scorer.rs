use async_trait::async_trait;

use crate::scorer::Scorer;
use crate::types::{ActionCandidate, ActionType, DigestQuery};

/// Scores candidates by how lopsided the sold/available balance is, on
/// a log scale so one extreme SKU cannot drown out the rest of the
/// digest. Reorders score by sold-to-available, markdowns by
/// available-to-sold; both ratios are +1-smoothed to stay finite at
/// zero.
pub struct UrgencyScorer;

#[async_trait]
impl Scorer<DigestQuery, ActionCandidate> for UrgencyScorer {
    async fn score(
        &self,
        _query: &DigestQuery,
        candidates: &[ActionCandidate],
    ) -> Result<Vec<ActionCandidate>, String> {
        let scored = candidates
            .iter()
            .map(|candidate| {
                let ratio = match candidate.action {
                    ActionType::Reorder => {
                        (candidate.units_sold + 1.0) / (candidate.units_available + 1.0)
                    }
                    ActionType::Markdown => {
                        (candidate.units_available + 1.0) / (candidate.units_sold + 1.0)
                    }
                };
                let mut scored = candidate.clone();
                scored.priority_score = Some(ratio.ln().max(0.0));
                scored
            })
            .collect();
        Ok(scored)
    }

    fn update(&self, candidate: &mut ActionCandidate, scored: ActionCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
