use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with context the source did not have.
/// Each hydrator returns an enriched copy per candidate; the driver
/// merges the enriched fields back via `update`.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Enrich the candidates, returning one copy per input in the same
    /// order.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Merge the fields this hydrator owns back into the candidate.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
