//! The staged candidate pipeline driver.
//!
//! A pipeline is a fixed sequence of stages over a query `Q` and a
//! candidate type `C`: query hydration → sources → candidate hydration
//! → filters → scorers → selection → side effects. Concrete pipelines
//! plug component implementations into each slot; the driver owns the
//! control flow. A failing component is logged and skipped, never
//! fatal: a digest with one stage degraded beats no digest.

use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id so every log line can be correlated.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything a pipeline run produces, kept around for observability:
/// what was retrieved, what the filters removed, and what was selected.
pub struct PipelineResult<Q, C> {
    /// The query after hydration.
    pub query: Q,
    /// All candidates produced by the sources.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filters.
    pub filtered_candidates: Vec<C>,
    /// The final selection, sorted by score.
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;
    fn result_size(&self) -> usize;

    /// Run the full pipeline for one query.
    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let mut query = query;

        for hydrator in self.query_hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query).await {
                Ok(hydrated) => hydrator.update(&mut query, hydrated),
                Err(e) => log::warn!(
                    "request_id={} query hydrator {} failed: {}",
                    query.request_id(),
                    hydrator.name(),
                    e
                ),
            }
        }

        let mut retrieved: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.get_candidates(&query).await {
                Ok(mut candidates) => retrieved.append(&mut candidates),
                Err(e) => log::warn!(
                    "request_id={} source {} failed: {}",
                    query.request_id(),
                    source.name(),
                    e
                ),
            }
        }

        let mut candidates = retrieved.clone();
        for hydrator in self.hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query, &candidates).await {
                Ok(hydrated) if hydrated.len() == candidates.len() => {
                    for (candidate, enriched) in candidates.iter_mut().zip(hydrated) {
                        hydrator.update(candidate, enriched);
                    }
                }
                Ok(hydrated) => log::warn!(
                    "request_id={} hydrator {} returned {} candidates for {}, skipping",
                    query.request_id(),
                    hydrator.name(),
                    hydrated.len(),
                    candidates.len()
                ),
                Err(e) => log::warn!(
                    "request_id={} hydrator {} failed: {}",
                    query.request_id(),
                    hydrator.name(),
                    e
                ),
            }
        }

        let mut removed_all: Vec<C> = Vec::new();
        for filter in self.filters() {
            if !filter.enable(&query) {
                continue;
            }
            match filter.filter(&query, candidates.clone()).await {
                Ok(result) => {
                    candidates = result.kept;
                    removed_all.extend(result.removed);
                }
                Err(e) => log::warn!(
                    "request_id={} filter {} failed: {}",
                    query.request_id(),
                    filter.name(),
                    e
                ),
            }
        }

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) if scored.len() == candidates.len() => {
                    for (candidate, scored) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, scored);
                    }
                }
                Ok(scored) => log::warn!(
                    "request_id={} scorer {} returned {} candidates for {}, skipping",
                    query.request_id(),
                    scorer.name(),
                    scored.len(),
                    candidates.len()
                ),
                Err(e) => log::warn!(
                    "request_id={} scorer {} failed: {}",
                    query.request_id(),
                    scorer.name(),
                    e
                ),
            }
        }

        let mut selected = if self.selector().enable(&query) {
            self.selector().select(&query, candidates)
        } else {
            candidates
        };
        selected.truncate(self.result_size());

        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected.clone(),
        });
        let side_effects = self.side_effects();
        for effect in side_effects.iter() {
            if !effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(e) = effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    query.request_id(),
                    effect.name(),
                    e
                );
            }
        }

        PipelineResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: removed_all,
            selected_candidates: selected,
        }
    }
}
