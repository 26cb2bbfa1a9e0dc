//! Sales export loader.
//!
//! The point-of-sale export ships with garbled headers (`SK U`, a store
//! column named after the shop's marketplace listing, `Salesmen`) that
//! are renamed to canonical names before deserialization. `HPP` and
//! `Gross Profit` arrive as rupiah strings; the other numeric columns
//! are plain numbers with occasional junk cells.

use std::io::Read;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::clean;
use crate::error::LoadResult;

/// One sales transaction row.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Tanggal", deserialize_with = "clean::de_sales_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "Nama Barang", default)]
    pub item_name: String,
    #[serde(rename = "Channel", default)]
    pub channel: String,
    #[serde(rename = "Nama Toko", default)]
    pub store_name: String,
    #[serde(rename = "Salesman", default)]
    pub salesman: String,
    #[serde(rename = "QTY", deserialize_with = "clean::de_flexible_number")]
    pub qty: f64,
    #[serde(rename = "Harga", deserialize_with = "clean::de_flexible_number")]
    pub unit_price: f64,
    #[serde(rename = "Sub Total", deserialize_with = "clean::de_flexible_number")]
    pub sub_total: f64,
    #[serde(rename = "Nett Sales", deserialize_with = "clean::de_flexible_number")]
    pub nett_sales: f64,
    #[serde(rename = "HPP", deserialize_with = "clean::de_rupiah")]
    pub cogs: f64,
    #[serde(rename = "Gross Profit", deserialize_with = "clean::de_rupiah")]
    pub gross_profit: f64,
}

/// A loaded sales export. `has_sku` records whether the export carried
/// a SKU column at all; without one, decoding is skipped downstream.
#[derive(Debug, Clone)]
pub struct SalesTable {
    pub rows: Vec<SalesRecord>,
    pub has_sku: bool,
}

fn rename(header: String) -> String {
    match header.as_str() {
        "SK U" => "SKU".to_string(),
        "Nama Toka Ziel Kids Officia Shop" => "Nama Toko".to_string(),
        "Salesmen" => "Salesman".to_string(),
        _ => header,
    }
}

/// Load a sales export from a CSV reader.
pub fn load_sales<R: Read>(reader: R) -> LoadResult<SalesTable> {
    let (headers, rows) = super::read_table(reader, rename)?;
    let has_sku = headers.iter().any(|h| h == "SKU");
    Ok(SalesTable { rows, has_sku })
}

/// Load a sales export from a CSV file path.
pub fn load_sales_file(path: &str) -> LoadResult<SalesTable> {
    load_sales(super::open(path)?)
}
