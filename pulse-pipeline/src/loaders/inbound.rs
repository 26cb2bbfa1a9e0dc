//! Inbound receipts loader.
//!
//! The purchasing export uses system column names (`purchaseorder_no`,
//! `supplier_name`, `amount`, a second tax column exported as
//! `Pajak.1`) that are renamed to canonical names. Quantities may carry
//! a ` Buah` unit suffix. A `Tanggal` column is required; everything
//! about a receipt is meaningless without its date.

use std::io::Read;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::clean;
use crate::error::{LoadError, LoadResult};

/// One inbound receipt row.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundRecord {
    #[serde(rename = "Tanggal", default, deserialize_with = "clean::de_inbound_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "No PO", default)]
    pub po_number: Option<String>,
    #[serde(rename = "Nama Supplier", default)]
    pub supplier_name: Option<String>,
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "Nama Barang", default)]
    pub item_name: String,
    #[serde(rename = "Qty Dipesan Unit", deserialize_with = "clean::de_flexible_number")]
    pub qty_ordered: f64,
    #[serde(rename = "Qty Diterima", deserialize_with = "clean::de_flexible_number")]
    pub qty_received: f64,
    #[serde(rename = "Harga", deserialize_with = "clean::de_flexible_number")]
    pub unit_price: f64,
    #[serde(rename = "Amount", deserialize_with = "clean::de_flexible_number")]
    pub amount: f64,
    #[serde(rename = "Sub Total", deserialize_with = "clean::de_flexible_number")]
    pub sub_total: f64,
    #[serde(rename = "Diskon", deserialize_with = "clean::de_flexible_number")]
    pub discount: f64,
    #[serde(rename = "Pajak Total", deserialize_with = "clean::de_flexible_number")]
    pub tax_total: f64,
    #[serde(rename = "Grand Total", deserialize_with = "clean::de_flexible_number")]
    pub grand_total: f64,
    #[serde(rename = "No Bill", default)]
    pub bill_number: Option<String>,
    #[serde(rename = "Catatan", default)]
    pub notes: Option<String>,
}

/// A loaded inbound export.
#[derive(Debug, Clone)]
pub struct InboundTable {
    pub rows: Vec<InboundRecord>,
    pub has_sku: bool,
}

fn rename(header: String) -> String {
    match header.as_str() {
        "purchaseorder_no" => "No PO".to_string(),
        "supplier_name" => "Nama Supplier".to_string(),
        "Qty Dipesan" => "Qty Dipesan Unit".to_string(),
        "bill_no" => "No Bill".to_string(),
        "Pajak.1" => "Pajak Total".to_string(),
        "amount" => "Amount".to_string(),
        _ => header,
    }
}

/// Load an inbound export from a CSV reader.
pub fn load_inbound<R: Read>(reader: R) -> LoadResult<InboundTable> {
    let (headers, rows) = super::read_table(reader, rename)?;
    if !headers.iter().any(|h| h == "Tanggal") {
        return Err(LoadError::MissingColumn {
            table: "inbound",
            column: "Tanggal",
        });
    }
    let has_sku = headers.iter().any(|h| h == "SKU");
    Ok(InboundTable { rows, has_sku })
}

/// Load an inbound export from a CSV file path.
pub fn load_inbound_file(path: &str) -> LoadResult<InboundTable> {
    load_inbound(super::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Tanggal,purchaseorder_no,supplier_name,SKU,Nama Barang,Qty Dipesan,Qty Diterima,Harga,amount,Sub Total,Diskon,Pajak.1,Grand Total,bill_no,Catatan
2021-01-10,PO-001,PT Garmen Jaya,Z1182221BAS LUNA-BWT03,Luna Jacket,50 Buah,48 Buah,90000,4320000,4320000,0,475200,4795200,BILL-9,first batch
2021-01-20,PO-002,PT Garmen Jaya,ZOZA21BAS-MIA-TBW35,Mia Tee,20 Buah,20 Buah,40000,800000,800000,0,88000,888000,BILL-12,
";

    #[test]
    fn loads_and_renames_system_headers() {
        let table = load_inbound(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(table.has_sku);
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.po_number.as_deref(), Some("PO-001"));
        assert_eq!(first.supplier_name.as_deref(), Some("PT Garmen Jaya"));
        assert_eq!(first.qty_ordered, 50.0);
        assert_eq!(first.qty_received, 48.0);
        assert_eq!(first.grand_total, 4_795_200.0);
        assert_eq!(first.bill_number.as_deref(), Some("BILL-9"));
        assert_eq!(
            first.date.unwrap().format("%Y-%m-%d").to_string(),
            "2021-01-10"
        );
        assert_eq!(table.rows[1].notes, None);
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let csv_data = "\
purchaseorder_no,SKU,Qty Dipesan,Qty Diterima,Harga,amount,Sub Total,Diskon,Pajak.1,Grand Total
PO-001,A,1,1,10,10,10,0,1,11
";
        let err = load_inbound(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                table: "inbound",
                column: "Tanggal"
            }
        ));
    }
}
