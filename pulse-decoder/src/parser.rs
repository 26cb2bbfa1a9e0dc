//! SKU segment parser.
//!
//! A well-formed SKU is a leading code block (category and sub-category,
//! as one token or two adjacent tokens), a two-digit year, a three-letter
//! season, a separator, a product-name code, a hyphen, a three-letter
//! color, and a two-digit size: `Z1182221BAS LUNA-BWT03`. The pattern is
//! matched as a prefix, case-insensitively; anything that does not fit
//! decodes to a record full of sentinels rather than an error, since
//! legacy and malformed SKUs are expected in real exports.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::dictionary::{Dictionary, Kind};

pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
pub const UNKNOWN_SUB_CATEGORY: &str = "Unknown Sub Category";
pub const UNKNOWN_YEAR: &str = "Unknown Tahun";
pub const UNKNOWN_SEASON: &str = "Unknown Musim";
pub const UNKNOWN_PRODUCT: &str = "Unknown Produk";
pub const UNKNOWN_COLOR: &str = "Unknown Warna";
pub const UNKNOWN_SIZE: &str = "Unknown Ukuran";

/// Positional SKU pattern.
///
/// Captures: 1 = leading code block, 2 = year (two digits), 3 = season
/// (three letters), 4 = product-name code, 5 = color (three letters),
/// 6 = size (two digits). The block/year boundary is resolved greedily,
/// so the block is the longest run that still leaves a valid tail.
static SKU_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z0-9]+)([0-9]{2})([A-Z]{3})[- ]([A-Z]+)-([A-Z]{3})([0-9]{2})")
        .expect("SKU pattern is valid")
});

/// One decoded SKU. Serialized field names match the decoded columns
/// the dashboard joins onto each transaction table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedSku {
    #[serde(rename = "Original SKU")]
    pub original: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub Category")]
    pub sub_category: String,
    #[serde(rename = "Tahun Produksi")]
    pub production_year: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Singkatan Nama Produk")]
    pub product_name: String,
    #[serde(rename = "Warna Produk")]
    pub color: String,
    #[serde(rename = "Size Produk")]
    pub size: String,
}

impl DecodedSku {
    /// The all-sentinel record for an input that did not match the
    /// pattern (or matched but resolved nothing).
    pub fn unknown(original: &str) -> Self {
        Self {
            original: original.to_string(),
            category: UNKNOWN_CATEGORY.to_string(),
            sub_category: UNKNOWN_SUB_CATEGORY.to_string(),
            production_year: UNKNOWN_YEAR.to_string(),
            season: UNKNOWN_SEASON.to_string(),
            product_name: UNKNOWN_PRODUCT.to_string(),
            color: UNKNOWN_COLOR.to_string(),
            size: UNKNOWN_SIZE.to_string(),
        }
    }
}

/// Decode one SKU against the dictionary.
///
/// Each field resolves independently: a SKU can come back with a known
/// color and an unknown season, and partial resolution is preserved
/// field by field. Category and sub-category are kind-gated; the other
/// five fields resolve by direct lookup of their own code.
pub fn parse(sku: &str, dict: &Dictionary) -> DecodedSku {
    let Some(caps) = SKU_PATTERN.captures(sku) else {
        return DecodedSku::unknown(sku);
    };

    let head = caps[1].to_uppercase();
    let year_code = caps[2].to_uppercase();
    let season_code = caps[3].to_uppercase();
    let product_code = caps[4].to_uppercase();
    let color_code = caps[5].to_uppercase();
    let size_code = caps[6].to_uppercase();

    let (first, second) = split_head(&head, dict);

    DecodedSku {
        original: sku.to_string(),
        category: resolve_gated(dict, first, second, Kind::Category)
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string(),
        sub_category: resolve_gated(dict, first, second, Kind::SubCategory)
            .unwrap_or(UNKNOWN_SUB_CATEGORY)
            .to_string(),
        production_year: dict.meaning(&year_code).unwrap_or(UNKNOWN_YEAR).to_string(),
        season: dict.meaning(&season_code).unwrap_or(UNKNOWN_SEASON).to_string(),
        product_name: dict
            .meaning(&product_code)
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string(),
        color: dict.meaning(&color_code).unwrap_or(UNKNOWN_COLOR).to_string(),
        size: dict.meaning(&size_code).unwrap_or(UNKNOWN_SIZE).to_string(),
    }
}

/// Decode a batch of SKUs, one record per input string.
///
/// Decoding is independent per SKU, so the batch runs in parallel; the
/// output is index-aligned with the input for column joins.
pub fn parse_batch<S>(skus: &[S], dict: &Dictionary) -> Vec<DecodedSku>
where
    S: AsRef<str> + Sync,
{
    skus.par_iter().map(|s| parse(s.as_ref(), dict)).collect()
}

/// Split the leading code block into its first and optional second token.
///
/// A SKU encodes category and sub-category either as one token or as two
/// adjacent tokens, and only the dictionary can tell which: the split is
/// taken at the longest kind-tagged code, whole block first, then proper
/// prefixes from longest to shortest. A block that starts with no known
/// kind-tagged code stays a single token.
fn split_head<'a>(head: &'a str, dict: &Dictionary) -> (&'a str, Option<&'a str>) {
    let kind_tagged =
        |code: &str| dict.get(code).is_some_and(|e| e.kind != Kind::Untagged);

    if kind_tagged(head) {
        return (head, None);
    }
    for split in (1..head.len()).rev() {
        let (first, second) = head.split_at(split);
        if kind_tagged(first) {
            return (first, Some(second));
        }
    }
    (head, None)
}

/// Two-step kind-gated resolution: the first token wins outright; the
/// second is consulted only when the first does not carry the expected
/// kind.
fn resolve_gated<'d>(
    dict: &'d Dictionary,
    first: &str,
    second: Option<&str>,
    kind: Kind,
) -> Option<&'d str> {
    dict.meaning_for_kind(first, kind)
        .or_else(|| second.and_then(|code| dict.meaning_for_kind(code, kind)))
}
