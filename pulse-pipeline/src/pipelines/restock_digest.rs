use std::sync::Arc;

use async_trait::async_trait;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::category_filter::CategoryFilter;
use crate::components::date_range_query_hydrator::DateRangeQueryHydrator;
use crate::components::digest_log_side_effect::DigestLogSideEffect;
use crate::components::item_context_hydrator::ItemContextHydrator;
use crate::components::performance_source::PerformanceSource;
use crate::components::top_k_selector::TopKSelector;
use crate::components::urgency_scorer::UrgencyScorer;
use crate::dataset::Dataset;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{ActionCandidate, DigestQuery};

/// The restock/markdown digest pipeline.
///
/// Pipeline flow:
/// 1. DateRangeQueryHydrator fills missing date bounds from the data
/// 2. PerformanceSource joins sales velocity against stock on hand
/// 3. ItemContextHydrator attaches item names and categories
/// 4. CategoryFilter applies the query's category selection
/// 5. UrgencyScorer ranks by sold/available imbalance
/// 6. TopKSelector keeps the top N
/// 7. DigestLogSideEffect writes the audit line
pub struct RestockDigestPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<DigestQuery>>>,
    sources: Vec<Box<dyn Source<DigestQuery, ActionCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<DigestQuery, ActionCandidate>>>,
    filters: Vec<Box<dyn Filter<DigestQuery, ActionCandidate>>>,
    scorers: Vec<Box<dyn Scorer<DigestQuery, ActionCandidate>>>,
    selector: TopKSelector,
    side_effects: Arc<Vec<Box<dyn SideEffect<DigestQuery, ActionCandidate>>>>,
    result_size: usize,
}

impl RestockDigestPipeline {
    /// Build the digest pipeline over a loaded dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_dataset_with_size(dataset, 10)
    }

    /// Build the digest pipeline with a custom result size.
    pub fn from_dataset_with_size(dataset: &Dataset, result_size: usize) -> Self {
        let sale_facts = dataset.sale_facts();
        let stock_facts = dataset.stock_facts();

        let query_hydrators: Vec<Box<dyn QueryHydrator<DigestQuery>>> =
            vec![Box::new(DateRangeQueryHydrator::from_frame(&dataset.sales))];

        let sources: Vec<Box<dyn Source<DigestQuery, ActionCandidate>>> =
            vec![Box::new(PerformanceSource::new(sale_facts, stock_facts.clone()))];

        let hydrators: Vec<Box<dyn Hydrator<DigestQuery, ActionCandidate>>> =
            vec![Box::new(ItemContextHydrator::from_facts(&stock_facts))];

        let filters: Vec<Box<dyn Filter<DigestQuery, ActionCandidate>>> =
            vec![Box::new(CategoryFilter)];

        let scorers: Vec<Box<dyn Scorer<DigestQuery, ActionCandidate>>> =
            vec![Box::new(UrgencyScorer)];

        let selector = TopKSelector { k: result_size };

        let side_effects: Arc<Vec<Box<dyn SideEffect<DigestQuery, ActionCandidate>>>> =
            Arc::new(vec![Box::new(DigestLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector,
            side_effects,
            result_size,
        }
    }
}

#[async_trait]
impl CandidatePipeline<DigestQuery, ActionCandidate> for RestockDigestPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<DigestQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<DigestQuery, ActionCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<DigestQuery, ActionCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<DigestQuery, ActionCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<DigestQuery, ActionCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<DigestQuery, ActionCandidate> {
        &self.selector
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<DigestQuery, ActionCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}
