use std::collections::HashMap;

use async_trait::async_trait;

use crate::dataset::StockFact;
use crate::hydrator::Hydrator;
use crate::types::{ActionCandidate, DigestQuery};

/// Hydrates candidates with item name and decoded category from the
/// stock frame, keyed by SKU. First stock row per SKU wins.
pub struct ItemContextHydrator {
    context: HashMap<String, (String, Option<String>)>,
}

impl ItemContextHydrator {
    pub fn from_facts(stock: &[StockFact]) -> Self {
        let mut context = HashMap::new();
        for fact in stock {
            context
                .entry(fact.sku.clone())
                .or_insert_with(|| (fact.item_name.clone(), fact.category.clone()));
        }
        Self { context }
    }
}

#[async_trait]
impl Hydrator<DigestQuery, ActionCandidate> for ItemContextHydrator {
    async fn hydrate(
        &self,
        _query: &DigestQuery,
        candidates: &[ActionCandidate],
    ) -> Result<Vec<ActionCandidate>, String> {
        let hydrated = candidates
            .iter()
            .map(|candidate| {
                let mut enriched = candidate.clone();
                if let Some((name, category)) = self.context.get(&candidate.sku) {
                    enriched.item_name = (!name.is_empty()).then(|| name.clone());
                    enriched.category = category.clone();
                }
                enriched
            })
            .collect();
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut ActionCandidate, hydrated: ActionCandidate) {
        candidate.item_name = hydrated.item_name;
        candidate.category = hydrated.category;
    }
}
