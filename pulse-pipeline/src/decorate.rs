//! SKU decoding applied to transaction tables.
//!
//! The decoder appends one `DecodedSku` per row, index-aligned so the
//! caller can column-join it back onto the table. A table without a
//! `SKU` column is presented unaugmented — a logged degradation, not an
//! error.

use pulse_decoder::{parse_batch, DecodedSku, Dictionary};

/// Decode a table's SKU column into an aligned vector of records.
///
/// `skus` must be one entry per row; rows with no SKU cell decode as
/// empty strings and come back all-sentinel.
pub fn decode_table(
    table: &'static str,
    has_sku: bool,
    skus: &[Option<String>],
    dict: &Dictionary,
) -> Option<Vec<DecodedSku>> {
    if !has_sku {
        log::warn!("column 'SKU' not found in {table} data, skipping SKU decoding");
        return None;
    }
    let raw: Vec<&str> = skus.iter().map(|s| s.as_deref().unwrap_or("")).collect();
    Some(parse_batch(&raw, dict))
}
