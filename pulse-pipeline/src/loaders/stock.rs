//! Stock snapshot loader.
//!
//! The warehouse export names its item column `Nama` and its bundle
//! flag `is_bundle`; both are renamed. Every quantity and value column
//! is numeric with the usual junk-cell tolerance.

use std::io::Read;

use serde::Deserialize;

use super::clean;
use crate::error::LoadResult;

/// One stock snapshot row.
#[derive(Debug, Clone, Deserialize)]
pub struct StockRecord {
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "Nama Item", default)]
    pub item_name: String,
    #[serde(rename = "Lokasi", default)]
    pub location: String,
    #[serde(rename = "Is Bundle", default, deserialize_with = "clean::de_flexible_bool")]
    pub is_bundle: bool,
    #[serde(rename = "QTY", deserialize_with = "clean::de_flexible_number")]
    pub qty: f64,
    #[serde(rename = "Dipesan", deserialize_with = "clean::de_flexible_number")]
    pub reserved: f64,
    #[serde(rename = "Tersedia", deserialize_with = "clean::de_flexible_number")]
    pub available: f64,
    #[serde(rename = "Harga Jual", deserialize_with = "clean::de_flexible_number")]
    pub sale_price: f64,
    #[serde(rename = "HPP", deserialize_with = "clean::de_flexible_number")]
    pub cogs: f64,
    #[serde(rename = "Nilai Persediaan", deserialize_with = "clean::de_flexible_number")]
    pub inventory_value: f64,
}

/// A loaded stock export.
#[derive(Debug, Clone)]
pub struct StockTable {
    pub rows: Vec<StockRecord>,
    pub has_sku: bool,
}

fn rename(header: String) -> String {
    match header.as_str() {
        "Nama" => "Nama Item".to_string(),
        "is_bundle" => "Is Bundle".to_string(),
        _ => header,
    }
}

/// Load a stock export from a CSV reader.
pub fn load_stock<R: Read>(reader: R) -> LoadResult<StockTable> {
    let (headers, rows) = super::read_table(reader, rename)?;
    let has_sku = headers.iter().any(|h| h == "SKU");
    Ok(StockTable { rows, has_sku })
}

/// Load a stock export from a CSV file path.
pub fn load_stock_file(path: &str) -> LoadResult<StockTable> {
    load_stock(super::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
SKU,Nama,is_bundle,Lokasi,QTY,Dipesan,Tersedia,Harga Jual,HPP,Nilai Persediaan
Z1182221BAS LUNA-BWT03,Luna Jacket,false,Gudang A,120,10,110,150000,90000,10800000
ZOZA21BAS-MIA-TBW35,Mia Tee,0,Gudang B,30,0,30,80000,40000,1200000
,Unlabeled Bundle,yes,Gudang A,5,0,5,0,0,0
";

    #[test]
    fn loads_and_renames_headers() {
        let table = load_stock(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(table.has_sku);
        assert_eq!(table.rows.len(), 3);

        let first = &table.rows[0];
        assert_eq!(first.item_name, "Luna Jacket");
        assert_eq!(first.location, "Gudang A");
        assert!(!first.is_bundle);
        assert_eq!(first.qty, 120.0);
        assert_eq!(first.available, 110.0);
        assert_eq!(first.inventory_value, 10_800_000.0);
    }

    #[test]
    fn bundle_flags_and_missing_skus_are_tolerated() {
        let table = load_stock(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(!table.rows[1].is_bundle);
        let bundle = &table.rows[2];
        assert!(bundle.is_bundle);
        assert_eq!(bundle.sku, None);
    }
}
