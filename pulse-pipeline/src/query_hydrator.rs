use async_trait::async_trait;

use crate::util;

/// Query hydrators fill in defaults or resolve relative parameters on
/// the query itself before any source runs.
#[async_trait]
pub trait QueryHydrator<Q>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Produce a hydrated copy of the query.
    async fn hydrate(&self, query: &Q) -> Result<Q, String>;

    /// Merge the hydrated fields back into the query.
    fn update(&self, query: &mut Q, hydrated: Q);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
