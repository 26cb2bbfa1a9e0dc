//! Loaded, decoded, filterable views over the four exports.
//!
//! A frame pairs a table's rows with their decoded SKU records in two
//! index-aligned vectors (the decoded side is absent when the export
//! had no SKU column). Filters clone-filter both sides together so the
//! alignment survives slicing.

use chrono::NaiveDate;

use pulse_decoder::{DecodedSku, Dictionary};

use crate::decorate::decode_table;
use crate::loaders::inbound::{InboundRecord, InboundTable};
use crate::loaders::sales::{SalesRecord, SalesTable};
use crate::loaders::stock::{StockRecord, StockTable};

/// Per-SKU sales observation distilled for the recommendation pipeline.
#[derive(Clone, Debug)]
pub struct SaleFact {
    pub sku: String,
    pub qty: f64,
    pub date: Option<NaiveDate>,
    /// Decoded category, when the sales export could be decoded.
    pub category: Option<String>,
}

/// Per-SKU stock observation distilled for the recommendation pipeline.
#[derive(Clone, Debug)]
pub struct StockFact {
    pub sku: String,
    pub available: f64,
    pub item_name: String,
    pub category: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SalesFrame {
    pub rows: Vec<SalesRecord>,
    pub decoded: Option<Vec<DecodedSku>>,
}

#[derive(Clone, Debug)]
pub struct InboundFrame {
    pub rows: Vec<InboundRecord>,
    pub decoded: Option<Vec<DecodedSku>>,
}

#[derive(Clone, Debug)]
pub struct StockFrame {
    pub rows: Vec<StockRecord>,
    pub decoded: Option<Vec<DecodedSku>>,
}

impl SalesFrame {
    pub fn from_table(table: SalesTable, dict: &Dictionary) -> Self {
        let skus: Vec<Option<String>> = table.rows.iter().map(|r| r.sku.clone()).collect();
        let decoded = decode_table("sales", table.has_sku, &skus, dict);
        Self {
            rows: table.rows,
            decoded,
        }
    }

    /// Observed min/max transaction dates, ignoring rows whose date
    /// failed to parse.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().filter_map(|r| r.date.map(|d| d.date()));
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }

    /// Keep rows dated within the inclusive range. Rows with no parsed
    /// date drop out of any bounded range.
    pub fn filter_by_date(&self, start: NaiveDate, end: NaiveDate) -> SalesFrame {
        let keep: Vec<bool> = self
            .rows
            .iter()
            .map(|r| {
                r.date
                    .map(|d| {
                        let d = d.date();
                        d >= start && d <= end
                    })
                    .unwrap_or(false)
            })
            .collect();
        let (rows, decoded) = apply_mask(&self.rows, self.decoded.as_deref(), &keep);
        SalesFrame { rows, decoded }
    }

    /// Keep rows whose decoded category is in the selection. A frame
    /// with no decoded columns passes through unchanged.
    pub fn filter_by_categories(&self, categories: &[String]) -> SalesFrame {
        match category_mask(self.decoded.as_deref(), categories) {
            Some(keep) => {
                let (rows, decoded) = apply_mask(&self.rows, self.decoded.as_deref(), &keep);
                SalesFrame { rows, decoded }
            }
            None => self.clone(),
        }
    }
}

impl InboundFrame {
    pub fn from_table(table: InboundTable, dict: &Dictionary) -> Self {
        let skus: Vec<Option<String>> = table.rows.iter().map(|r| r.sku.clone()).collect();
        let decoded = decode_table("inbound", table.has_sku, &skus, dict);
        Self {
            rows: table.rows,
            decoded,
        }
    }

    pub fn filter_by_categories(&self, categories: &[String]) -> InboundFrame {
        match category_mask(self.decoded.as_deref(), categories) {
            Some(keep) => {
                let (rows, decoded) = apply_mask(&self.rows, self.decoded.as_deref(), &keep);
                InboundFrame { rows, decoded }
            }
            None => self.clone(),
        }
    }
}

impl StockFrame {
    pub fn from_table(table: StockTable, dict: &Dictionary) -> Self {
        let skus: Vec<Option<String>> = table.rows.iter().map(|r| r.sku.clone()).collect();
        let decoded = decode_table("stock", table.has_sku, &skus, dict);
        Self {
            rows: table.rows,
            decoded,
        }
    }

    pub fn filter_by_categories(&self, categories: &[String]) -> StockFrame {
        match category_mask(self.decoded.as_deref(), categories) {
            Some(keep) => {
                let (rows, decoded) = apply_mask(&self.rows, self.decoded.as_deref(), &keep);
                StockFrame { rows, decoded }
            }
            None => self.clone(),
        }
    }
}

/// The dictionary plus the three decoded transaction frames.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub dictionary: Dictionary,
    pub sales: SalesFrame,
    pub inbound: InboundFrame,
    pub stock: StockFrame,
}

impl Dataset {
    /// Decode all three tables against the dictionary. The dictionary
    /// must be fully built first; an empty one is valid and decodes
    /// everything to sentinels.
    pub fn new(
        dictionary: Dictionary,
        sales: SalesTable,
        inbound: InboundTable,
        stock: StockTable,
    ) -> Self {
        let sales = SalesFrame::from_table(sales, &dictionary);
        let inbound = InboundFrame::from_table(inbound, &dictionary);
        let stock = StockFrame::from_table(stock, &dictionary);
        Self {
            dictionary,
            sales,
            inbound,
            stock,
        }
    }

    /// Apply one category selection across all three frames.
    pub fn filter_by_categories(&self, categories: &[String]) -> Dataset {
        Dataset {
            dictionary: self.dictionary.clone(),
            sales: self.sales.filter_by_categories(categories),
            inbound: self.inbound.filter_by_categories(categories),
            stock: self.stock.filter_by_categories(categories),
        }
    }

    /// Distill per-row sales facts for the recommendation pipeline.
    /// Rows without a SKU are skipped.
    pub fn sale_facts(&self) -> Vec<SaleFact> {
        self.sales
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let sku = row.sku.clone()?;
                Some(SaleFact {
                    sku,
                    qty: row.qty,
                    date: row.date.map(|d| d.date()),
                    category: self
                        .sales
                        .decoded
                        .as_ref()
                        .and_then(|d| d.get(i))
                        .map(|d| d.category.clone()),
                })
            })
            .collect()
    }

    /// Distill per-row stock facts for the recommendation pipeline.
    pub fn stock_facts(&self) -> Vec<StockFact> {
        self.stock
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let sku = row.sku.clone()?;
                Some(StockFact {
                    sku,
                    available: row.available,
                    item_name: row.item_name.clone(),
                    category: self
                        .stock
                        .decoded
                        .as_ref()
                        .and_then(|d| d.get(i))
                        .map(|d| d.category.clone()),
                })
            })
            .collect()
    }
}

fn apply_mask<R: Clone>(
    rows: &[R],
    decoded: Option<&[DecodedSku]>,
    keep: &[bool],
) -> (Vec<R>, Option<Vec<DecodedSku>>) {
    let rows = rows
        .iter()
        .zip(keep)
        .filter(|(_, keep)| **keep)
        .map(|(row, _)| row.clone())
        .collect();
    let decoded = decoded.map(|d| {
        d.iter()
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .map(|rec| rec.0.clone())
            .collect()
    });
    (rows, decoded)
}

fn category_mask(decoded: Option<&[DecodedSku]>, categories: &[String]) -> Option<Vec<bool>> {
    decoded.map(|d| {
        d.iter()
            .map(|rec| categories.iter().any(|c| *c == rec.category))
            .collect()
    })
}
