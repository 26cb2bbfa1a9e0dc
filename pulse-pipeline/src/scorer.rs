use async_trait::async_trait;

use crate::util;

/// Scorers compute per-candidate scores. Each scorer returns a scored
/// copy of the slice; the driver merges the scored fields back via
/// `update`, so scorers stay independent of each other's fields.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score the candidates, returning one scored copy per input in the
    /// same order.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Merge the fields this scorer owns back into the candidate.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
