use async_trait::async_trait;

use chrono::NaiveDate;

use crate::dataset::SalesFrame;
use crate::query_hydrator::QueryHydrator;
use crate::types::DigestQuery;

/// Fills missing date bounds on the query from the sales data itself,
/// so an unbounded digest covers exactly the observed date range.
pub struct DateRangeQueryHydrator {
    default_start: Option<NaiveDate>,
    default_end: Option<NaiveDate>,
}

impl DateRangeQueryHydrator {
    pub fn new(default_start: Option<NaiveDate>, default_end: Option<NaiveDate>) -> Self {
        Self {
            default_start,
            default_end,
        }
    }

    /// Defaults taken from the frame's observed min/max dates.
    pub fn from_frame(frame: &SalesFrame) -> Self {
        match frame.date_bounds() {
            Some((start, end)) => Self::new(Some(start), Some(end)),
            None => Self::new(None, None),
        }
    }
}

#[async_trait]
impl QueryHydrator<DigestQuery> for DateRangeQueryHydrator {
    async fn hydrate(&self, query: &DigestQuery) -> Result<DigestQuery, String> {
        let mut hydrated = query.clone();
        if hydrated.date_range.start.is_none() {
            hydrated.date_range.start = self.default_start;
        }
        if hydrated.date_range.end.is_none() {
            hydrated.date_range.end = self.default_end;
        }
        Ok(hydrated)
    }

    fn update(&self, query: &mut DigestQuery, hydrated: DigestQuery) {
        query.date_range = hydrated.date_range;
    }
}
