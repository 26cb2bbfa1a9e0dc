use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::dataset::{SaleFact, StockFact};
use crate::source::Source;
use crate::types::{ActionCandidate, ActionType, DigestQuery};

/// Below this many available units a fast seller is flagged for reorder.
pub const LOW_STOCK_THRESHOLD: f64 = 50.0;
/// Above this many available units a slow seller is flagged for markdown.
pub const OVERSTOCK_THRESHOLD: f64 = 100.0;

/// Source that joins per-SKU sales velocity against available stock and
/// emits action candidates for the two imbalances worth surfacing:
///
/// - `Reorder`: available < low threshold and units sold above the mean
///   per-row sales quantity — about to run out of a proven seller.
/// - `Markdown`: available > overstock threshold and units sold below
///   the mean — capital parked in stock that is not moving.
///
/// The mean is taken over the date- and category-filtered sales rows,
/// so "above average" always refers to the slice being analyzed.
pub struct PerformanceSource {
    sales: Vec<SaleFact>,
    stock: Vec<StockFact>,
    pub low_stock_threshold: f64,
    pub overstock_threshold: f64,
}

impl PerformanceSource {
    pub fn new(sales: Vec<SaleFact>, stock: Vec<StockFact>) -> Self {
        Self::with_thresholds(sales, stock, LOW_STOCK_THRESHOLD, OVERSTOCK_THRESHOLD)
    }

    pub fn with_thresholds(
        sales: Vec<SaleFact>,
        stock: Vec<StockFact>,
        low_stock_threshold: f64,
        overstock_threshold: f64,
    ) -> Self {
        Self {
            sales,
            stock,
            low_stock_threshold,
            overstock_threshold,
        }
    }

    fn in_range(date: Option<NaiveDate>, query: &DigestQuery) -> bool {
        let range = &query.date_range;
        if range.start.is_none() && range.end.is_none() {
            return true;
        }
        let Some(date) = date else { return false };
        if range.start.is_some_and(|start| date < start) {
            return false;
        }
        if range.end.is_some_and(|end| date > end) {
            return false;
        }
        true
    }

    fn in_selection(category: &Option<String>, query: &DigestQuery) -> bool {
        match &query.categories {
            None => true,
            Some(selection) => category
                .as_ref()
                .map(|cat| selection.contains(cat))
                .unwrap_or(false),
        }
    }
}

#[async_trait]
impl Source<DigestQuery, ActionCandidate> for PerformanceSource {
    fn enable(&self, _query: &DigestQuery) -> bool {
        !self.sales.is_empty() && !self.stock.is_empty()
    }

    async fn get_candidates(&self, query: &DigestQuery) -> Result<Vec<ActionCandidate>, String> {
        let rows: Vec<&SaleFact> = self
            .sales
            .iter()
            .filter(|fact| {
                Self::in_range(fact.date, query) && Self::in_selection(&fact.category, query)
            })
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let mean_qty = rows.iter().map(|fact| fact.qty).sum::<f64>() / rows.len() as f64;

        let mut sold: HashMap<&str, f64> = HashMap::new();
        for fact in &rows {
            *sold.entry(fact.sku.as_str()).or_insert(0.0) += fact.qty;
        }

        let mut available: HashMap<&str, f64> = HashMap::new();
        for fact in self
            .stock
            .iter()
            .filter(|fact| Self::in_selection(&fact.category, query))
        {
            *available.entry(fact.sku.as_str()).or_insert(0.0) += fact.available;
        }

        let mut skus: Vec<&str> = sold.keys().copied().collect();
        skus.sort_unstable();

        let mut candidates = Vec::new();
        for sku in skus {
            let units_sold = sold[sku];
            let units_available = available.get(sku).copied().unwrap_or(0.0);

            if units_available < self.low_stock_threshold && units_sold > mean_qty {
                candidates.push(ActionCandidate {
                    sku: sku.to_string(),
                    action: ActionType::Reorder,
                    units_sold,
                    units_available,
                    ..ActionCandidate::default()
                });
            }
            if units_available > self.overstock_threshold && units_sold < mean_qty {
                candidates.push(ActionCandidate {
                    sku: sku.to_string(),
                    action: ActionType::Markdown,
                    units_sold,
                    units_available,
                    ..ActionCandidate::default()
                });
            }
        }

        Ok(candidates)
    }
}
