//! Group-and-sum aggregations behind the dashboard's charts and KPIs.
//!
//! Everything here consumes decoded frames and produces plain rows
//! ready to chart or serialize; no rendering concerns.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use pulse_decoder::DecodedSku;

use crate::dataset::{InboundFrame, SalesFrame, StockFrame};
use crate::loaders::sales::SalesRecord;

/// One aggregation bucket: a group key and its summed value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub key: String,
    pub total: f64,
}

/// Headline figures for the digest.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpis {
    pub total_nett_sales: f64,
    pub total_gross_profit: f64,
    pub total_qty_sold: f64,
    /// Units sold divided by mean available stock; 0 when stock is
    /// empty or the mean is not positive.
    pub inventory_turnover: f64,
}

/// Stock on hand vs inbound receipts for one SKU.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockInboundRow {
    pub sku: String,
    pub item_name: String,
    pub available: f64,
    pub received: f64,
}

pub fn kpis(sales: &SalesFrame, stock: &StockFrame) -> Kpis {
    let total_qty_sold: f64 = sales.rows.iter().map(|r| r.qty).sum();
    let mean_available = if stock.rows.is_empty() {
        0.0
    } else {
        stock.rows.iter().map(|r| r.available).sum::<f64>() / stock.rows.len() as f64
    };
    let inventory_turnover = if mean_available > 0.0 {
        total_qty_sold / mean_available
    } else {
        0.0
    };
    Kpis {
        total_nett_sales: sales.rows.iter().map(|r| r.nett_sales).sum(),
        total_gross_profit: sales.rows.iter().map(|r| r.gross_profit).sum(),
        total_qty_sold,
        inventory_turnover,
    }
}

pub fn sales_by_category(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.category, |r| r.sub_total)
}

pub fn sales_by_sub_category(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.sub_category, |r| r.sub_total)
}

pub fn sales_by_production_year(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.production_year, |r| r.sub_total)
}

pub fn sales_by_season(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.season, |r| r.sub_total)
}

pub fn sales_by_color(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.color, |r| r.sub_total)
}

pub fn sales_by_size(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.size, |r| r.sub_total)
}

pub fn profit_by_category(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.category, |r| r.gross_profit)
}

pub fn profit_by_sub_category(frame: &SalesFrame) -> Vec<BreakdownRow> {
    decoded_breakdown(frame, |d| &d.sub_category, |r| r.gross_profit)
}

/// Sub Total per sales channel.
pub fn sales_by_channel(frame: &SalesFrame) -> Vec<BreakdownRow> {
    sum_by(
        frame
            .rows
            .iter()
            .map(|r| (r.channel.clone(), r.sub_total)),
    )
}

/// The `n` best-selling items by unit count.
pub fn top_products_by_qty(frame: &SalesFrame, n: usize) -> Vec<BreakdownRow> {
    let mut rows = sum_by(frame.rows.iter().map(|r| (r.item_name.clone(), r.qty)));
    rows.truncate(n);
    rows
}

/// Nett Sales per `YYYY-MM` bucket, ascending by month. Rows whose date
/// failed to parse are left out.
pub fn monthly_nett_sales(frame: &SalesFrame) -> Vec<BreakdownRow> {
    let mut rows = sum_by(frame.rows.iter().filter_map(|r| {
        r.date
            .map(|d| (d.format("%Y-%m").to_string(), r.nett_sales))
    }));
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    rows
}

/// Stock quantity per warehouse location.
pub fn stock_by_location(frame: &StockFrame) -> Vec<BreakdownRow> {
    sum_by(frame.rows.iter().map(|r| (r.location.clone(), r.qty)))
}

/// Outer join of available stock against received inbound quantity per
/// SKU, top `n` by availability. Item names come from the stock frame,
/// falling back to the SKU itself.
pub fn stock_vs_inbound(
    stock: &StockFrame,
    inbound: &InboundFrame,
    n: usize,
) -> Vec<StockInboundRow> {
    let mut available: HashMap<String, f64> = HashMap::new();
    let mut names: HashMap<String, String> = HashMap::new();
    for row in &stock.rows {
        let Some(sku) = &row.sku else { continue };
        *available.entry(sku.clone()).or_insert(0.0) += row.available;
        if !row.item_name.is_empty() {
            names.entry(sku.clone()).or_insert_with(|| row.item_name.clone());
        }
    }

    let mut received: HashMap<String, f64> = HashMap::new();
    for row in &inbound.rows {
        let Some(sku) = &row.sku else { continue };
        *received.entry(sku.clone()).or_insert(0.0) += row.qty_received;
    }

    let mut skus: Vec<String> = available.keys().chain(received.keys()).cloned().collect();
    skus.sort();
    skus.dedup();

    let mut rows: Vec<StockInboundRow> = skus
        .into_iter()
        .map(|sku| StockInboundRow {
            item_name: names.get(&sku).cloned().unwrap_or_else(|| sku.clone()),
            available: available.get(&sku).copied().unwrap_or(0.0),
            received: received.get(&sku).copied().unwrap_or(0.0),
            sku,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.available
            .partial_cmp(&a.available)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.sku.cmp(&b.sku))
    });
    rows.truncate(n);
    rows
}

/// Sum `value` per decoded attribute. A frame without decoded columns
/// has nothing to group by and yields no rows.
fn decoded_breakdown(
    frame: &SalesFrame,
    key: impl Fn(&DecodedSku) -> &str,
    value: impl Fn(&SalesRecord) -> f64,
) -> Vec<BreakdownRow> {
    let Some(decoded) = &frame.decoded else {
        return Vec::new();
    };
    sum_by(
        frame
            .rows
            .iter()
            .zip(decoded)
            .map(|(row, dec)| (key(dec).to_string(), value(row))),
    )
}

/// Accumulate (key, value) pairs and sort descending by total, with the
/// key as a deterministic tie-break.
fn sum_by<I>(pairs: I) -> Vec<BreakdownRow>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (key, value) in pairs {
        *totals.entry(key).or_insert(0.0) += value;
    }
    let mut rows: Vec<BreakdownRow> = totals
        .into_iter()
        .map(|(key, total)| BreakdownRow { key, total })
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalesFrame;
    use crate::loaders::inbound::load_inbound;
    use crate::loaders::sales::load_sales;
    use crate::loaders::stock::load_stock;
    use pulse_decoder::{Dictionary, RawRow};

    const SALES_CSV: &str = "\
Tanggal,SK U,Nama Barang,Channel,QTY,Harga,Sub Total,Nett Sales,HPP,Gross Profit
15/01/2021 09:30,Z1182221BAS LUNA-BWT03,Luna Jacket,Shopee,2,150000,300000,290000,Rp 170.000,Rp 120.000
16/01/2021 10:00,Z1182221BAS LUNA-BWT03,Luna Jacket,Offline,1,150000,150000,145000,Rp 85.000,Rp 60.000
20/02/2021 11:00,ZOZA21BAS-MIA-TBW35,Mia Tee,Shopee,4,80000,320000,310000,Rp 180.000,Rp 130.000
";

    const STOCK_CSV: &str = "\
SKU,Nama,Lokasi,QTY,Dipesan,Tersedia,Harga Jual,HPP,Nilai Persediaan
Z1182221BAS LUNA-BWT03,Luna Jacket,Gudang A,120,10,110,150000,90000,10800000
ZOZA21BAS-MIA-TBW35,Mia Tee,Gudang B,30,0,30,80000,40000,1200000
";

    const INBOUND_CSV: &str = "\
Tanggal,SKU,Qty Dipesan,Qty Diterima,Harga,amount,Sub Total,Diskon,Pajak.1,Grand Total
2021-01-10,Z1182221BAS LUNA-BWT03,50,48,90000,4320000,4320000,0,475200,4795200
2021-01-20,BRAND-NEW-SKU,10,10,40000,400000,400000,0,44000,444000
";

    fn dict() -> Dictionary {
        Dictionary::from_rows([
            RawRow {
                code: "Z11".into(),
                meaning: "Jackets".into(),
                kind: "CATEGORY".into(),
            },
            RawRow {
                code: "822".into(),
                meaning: "Winter".into(),
                kind: "SUB CATEGORY".into(),
            },
        ])
    }

    fn frames() -> (SalesFrame, InboundFrame, StockFrame) {
        let dict = dict();
        (
            SalesFrame::from_table(load_sales(SALES_CSV.as_bytes()).unwrap(), &dict),
            InboundFrame::from_table(load_inbound(INBOUND_CSV.as_bytes()).unwrap(), &dict),
            StockFrame::from_table(load_stock(STOCK_CSV.as_bytes()).unwrap(), &dict),
        )
    }

    #[test]
    fn kpis_sum_the_sales_frame() {
        let (sales, _, stock) = frames();
        let kpis = kpis(&sales, &stock);
        assert_eq!(kpis.total_nett_sales, 745_000.0);
        assert_eq!(kpis.total_gross_profit, 310_000.0);
        assert_eq!(kpis.total_qty_sold, 7.0);
        // mean available = (110 + 30) / 2 = 70; 7 / 70 = 0.1
        assert!((kpis.inventory_turnover - 0.1).abs() < 1e-9);
    }

    #[test]
    fn turnover_is_zero_without_stock() {
        let (sales, _, _) = frames();
        let empty = StockFrame {
            rows: Vec::new(),
            decoded: None,
        };
        assert_eq!(kpis(&sales, &empty).inventory_turnover, 0.0);
    }

    #[test]
    fn category_breakdown_groups_decoded_values() {
        let (sales, _, _) = frames();
        let rows = sales_by_category(&sales);
        assert_eq!(
            rows,
            vec![
                BreakdownRow {
                    key: "Jackets".into(),
                    total: 450_000.0
                },
                BreakdownRow {
                    key: "Unknown Category".into(),
                    total: 320_000.0
                },
            ]
        );
    }

    #[test]
    fn profit_breakdown_uses_gross_profit() {
        let (sales, _, _) = frames();
        let rows = profit_by_category(&sales);
        assert_eq!(rows[0].key, "Jackets");
        assert_eq!(rows[0].total, 180_000.0);
    }

    #[test]
    fn undecoded_frame_has_no_attribute_breakdowns() {
        let (sales, _, _) = frames();
        let undecoded = SalesFrame {
            rows: sales.rows.clone(),
            decoded: None,
        };
        assert!(sales_by_category(&undecoded).is_empty());
        // Raw-column groupings still work.
        assert_eq!(sales_by_channel(&undecoded).len(), 2);
    }

    #[test]
    fn channel_share_sorts_descending() {
        let (sales, _, _) = frames();
        let rows = sales_by_channel(&sales);
        assert_eq!(rows[0].key, "Shopee");
        assert_eq!(rows[0].total, 620_000.0);
        assert_eq!(rows[1].key, "Offline");
    }

    #[test]
    fn top_products_truncate() {
        let (sales, _, _) = frames();
        let rows = top_products_by_qty(&sales, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "Mia Tee");
        assert_eq!(rows[0].total, 4.0);
    }

    #[test]
    fn monthly_trend_is_ascending_by_month() {
        let (sales, _, _) = frames();
        let rows = monthly_nett_sales(&sales);
        assert_eq!(
            rows,
            vec![
                BreakdownRow {
                    key: "2021-01".into(),
                    total: 435_000.0
                },
                BreakdownRow {
                    key: "2021-02".into(),
                    total: 310_000.0
                },
            ]
        );
    }

    #[test]
    fn stock_vs_inbound_outer_joins_by_sku() {
        let (_, inbound, stock) = frames();
        let rows = stock_vs_inbound(&stock, &inbound, 20);
        assert_eq!(rows.len(), 3);

        let luna = rows.iter().find(|r| r.item_name == "Luna Jacket").unwrap();
        assert_eq!(luna.available, 110.0);
        assert_eq!(luna.received, 48.0);

        // Inbound-only SKU appears with zero stock and its SKU as name.
        let fresh = rows.iter().find(|r| r.sku == "BRAND-NEW-SKU").unwrap();
        assert_eq!(fresh.item_name, "BRAND-NEW-SKU");
        assert_eq!(fresh.available, 0.0);
        assert_eq!(fresh.received, 10.0);
    }

    #[test]
    fn stock_by_location_groups_quantity() {
        let (_, _, stock) = frames();
        let rows = stock_by_location(&stock);
        assert_eq!(rows[0].key, "Gudang A");
        assert_eq!(rows[0].total, 120.0);
    }
}
