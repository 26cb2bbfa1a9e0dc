use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Inclusive date bounds for a digest. Either side may be open; missing
/// bounds are filled from the data by the query hydrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A digest request.
#[derive(Clone, Debug)]
pub struct DigestQuery {
    pub request_id: String,
    pub date_range: DateRange,
    /// Decoded category selection; `None` means every category.
    pub categories: Option<Vec<String>>,
}

impl HasRequestId for DigestQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// The recommended action for a SKU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActionType {
    /// Low stock with above-average sales: reorder before it runs out.
    Reorder,
    /// Overstock with below-average sales: discount or promote to free
    /// up capital.
    Markdown,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Reorder => write!(f, "Reorder"),
            ActionType::Markdown => write!(f, "Markdown"),
        }
    }
}

/// One actionable SKU surfaced by the recommendation pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct ActionCandidate {
    pub sku: String,
    pub action: ActionType,
    /// Item name from the stock frame (populated by the hydrator).
    pub item_name: Option<String>,
    /// Decoded category from the stock frame (populated by the hydrator).
    pub category: Option<String>,
    pub units_sold: f64,
    pub units_available: f64,
    /// Populated by scorers.
    pub priority_score: Option<f64>,
}

impl Default for ActionCandidate {
    fn default() -> Self {
        Self {
            sku: String::new(),
            action: ActionType::Reorder,
            item_name: None,
            category: None,
            units_sold: 0.0,
            units_available: 0.0,
            priority_score: None,
        }
    }
}
