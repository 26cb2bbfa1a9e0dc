//! Cell and header cleanup shared by the export loaders.
//!
//! Spreadsheet exports arrive with padded headers, unit suffixes on
//! quantities, Indonesian-formatted rupiah amounts, and dates in mixed
//! formats. Unparseable numeric cells read as `0.0` and unparseable
//! dates as `None`, so one bad cell never sinks a whole file.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Collapse internal whitespace runs to single spaces and trim.
pub fn normalize_header(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a numeric cell, tolerating a ` Buah` unit suffix.
pub fn flexible_number(raw: &str) -> f64 {
    let cleaned = raw.trim().trim_end_matches("Buah").trim();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Parse an Indonesian-formatted amount: `Rp 1.234.567,89` → 1234567.89.
/// `.` is the thousands separator and `,` the decimal mark.
pub fn rupiah_amount(raw: &str) -> f64 {
    let cleaned = raw.replace("Rp", "").replace('.', "").replace(',', ".");
    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}

/// Sales export timestamps use one explicit format: `31/12/2021 13:45`.
pub fn sales_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), "%d/%m/%Y %H:%M").ok()
}

/// Inbound exports carry whatever the purchasing system emitted; try the
/// formats seen in the wild, most specific first.
pub fn inbound_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Flexible bool cells: "true"/"1"/"yes" variants; everything else,
/// including blank, reads as false.
pub fn flexible_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

pub fn de_flexible_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(flexible_number(&raw))
}

pub fn de_rupiah<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(rupiah_amount(&raw))
}

pub fn de_sales_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(sales_datetime(&raw))
}

pub fn de_inbound_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(inbound_datetime(&raw))
}

pub fn de_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(flexible_bool(&raw))
}
