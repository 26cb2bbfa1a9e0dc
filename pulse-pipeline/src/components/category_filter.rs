use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{ActionCandidate, DigestQuery};

/// Partitions candidates on the query's category selection. Runs only
/// when a selection is present; candidates with no category context
/// pass through, since their sales rows already survived the
/// category-filtered aggregation.
pub struct CategoryFilter;

#[async_trait]
impl Filter<DigestQuery, ActionCandidate> for CategoryFilter {
    fn enable(&self, query: &DigestQuery) -> bool {
        query.categories.is_some()
    }

    async fn filter(
        &self,
        query: &DigestQuery,
        candidates: Vec<ActionCandidate>,
    ) -> Result<FilterResult<ActionCandidate>, String> {
        let selection = query.categories.clone().unwrap_or_default();
        let (kept, removed): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|c| {
            c.category
                .as_ref()
                .map(|category| selection.contains(category))
                .unwrap_or(true)
        });
        Ok(FilterResult { kept, removed })
    }
}
