use std::env;
use std::process;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use pulse_decoder::Dictionary;
use pulse_pipeline::aggregate::{self, BreakdownRow, Kpis, StockInboundRow};
use pulse_pipeline::candidate_pipeline::CandidatePipeline;
use pulse_pipeline::dataset::Dataset;
use pulse_pipeline::error::LoadError;
use pulse_pipeline::loaders::inbound::load_inbound_file;
use pulse_pipeline::loaders::master::load_master_file;
use pulse_pipeline::loaders::sales::load_sales_file;
use pulse_pipeline::loaders::stock::load_stock_file;
use pulse_pipeline::pipelines::restock_digest::RestockDigestPipeline;
use pulse_pipeline::types::{ActionCandidate, DateRange, DigestQuery};

const TOP_PRODUCTS: usize = 10;
const TOP_STOCK_COMPARISON: usize = 20;

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson {
    generated_at: String,
    date_range: DateRangeJson,
    categories: Option<Vec<String>>,
    kpis: Kpis,
    sales_by_category: Vec<BreakdownRow>,
    sales_by_sub_category: Vec<BreakdownRow>,
    sales_by_production_year: Vec<BreakdownRow>,
    sales_by_season: Vec<BreakdownRow>,
    sales_by_color: Vec<BreakdownRow>,
    sales_by_size: Vec<BreakdownRow>,
    profit_by_category: Vec<BreakdownRow>,
    profit_by_sub_category: Vec<BreakdownRow>,
    sales_by_channel: Vec<BreakdownRow>,
    top_products: Vec<BreakdownRow>,
    monthly_nett_sales: Vec<BreakdownRow>,
    stock_by_location: Vec<BreakdownRow>,
    stock_vs_inbound: Vec<StockInboundRow>,
    recommendations: Vec<ActionCandidate>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct DateRangeJson {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Serialize)]
struct SummaryJson {
    dictionary_entries: usize,
    sales_rows: usize,
    inbound_rows: usize,
    stock_rows: usize,
    candidates_detected: usize,
    candidates_filtered_out: usize,
    candidates_selected: usize,
    pipeline_ms: u128,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format an amount with Indonesian thousands separators: 1234567 → 1.234.567.
fn format_rupiah(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{sign}{whole}");
    }

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{}", grouped.chars().rev().collect::<String>())
}

fn print_breakdown(title: &str, rows: &[BreakdownRow], limit: usize) {
    if rows.is_empty() {
        return;
    }
    println!("  {title}");
    for row in rows.iter().take(limit) {
        println!("    {:<28} Rp {:>15}", row.key, format_rupiah(row.total));
    }
    println!();
}

fn print_human(digest: &DigestJson) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", "RETAIL PULSE \u{2014} Business Digest");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    if let (Some(start), Some(end)) = (&digest.date_range.start, &digest.date_range.end) {
        println!("  Period {start} to {end}");
    }
    if let Some(categories) = &digest.categories {
        println!("  Categories: {}", categories.join(", "));
    }
    println!(
        "  {} sales rows \u{00b7} {} inbound rows \u{00b7} {} stock rows \u{00b7} {} dictionary entries",
        digest.summary.sales_rows,
        digest.summary.inbound_rows,
        digest.summary.stock_rows,
        digest.summary.dictionary_entries,
    );
    println!();

    println!(
        "  Nett Sales   Rp {:<18} Gross Profit  Rp {}",
        format_rupiah(digest.kpis.total_nett_sales),
        format_rupiah(digest.kpis.total_gross_profit),
    );
    println!(
        "  Units Sold   {:<21} Stock Turnover {:.2}x",
        format_rupiah(digest.kpis.total_qty_sold),
        digest.kpis.inventory_turnover,
    );
    println!();

    print_breakdown("Sales by Category", &digest.sales_by_category, 8);
    print_breakdown("Sales by Sub Category", &digest.sales_by_sub_category, 8);
    print_breakdown("Sales by Channel", &digest.sales_by_channel, 8);
    print_breakdown("Monthly Nett Sales", &digest.monthly_nett_sales, 12);

    if !digest.top_products.is_empty() {
        println!("  Top Products by Units Sold");
        for row in &digest.top_products {
            println!("    {:<28} {:>8} units", row.key, format_rupiah(row.total));
        }
        println!();
    }

    if !digest.stock_vs_inbound.is_empty() {
        println!("  Stock on Hand vs Inbound Received");
        for row in &digest.stock_vs_inbound {
            println!(
                "    {:<28} {:>8} on hand {:>8} received",
                row.item_name,
                format_rupiah(row.available),
                format_rupiah(row.received),
            );
        }
        println!();
    }

    if digest.recommendations.is_empty() {
        println!("  No restock or markdown recommendations for this slice.");
    } else {
        println!("  Recommendations");
        println!("  {:\u{2500}<64}", "");
        for (i, rec) in digest.recommendations.iter().enumerate() {
            let urgency = match rec.priority_score.unwrap_or(0.0) {
                score if score >= 4.0 => "!!",
                score if score >= 2.0 => "! ",
                _ => "  ",
            };
            let name = rec.item_name.clone().unwrap_or_else(|| rec.sku.clone());
            println!(
                "  {} {}. {:<10} {:<28} sold {:>6}  on hand {:>6}",
                urgency,
                i + 1,
                rec.action.to_string(),
                name,
                format_rupiah(rec.units_sold),
                format_rupiah(rec.units_available),
            );
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!("  \u{23f1}  Pipeline ran in {}ms", digest.summary.pipeline_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!(
        "Usage: pulse-server <master.csv> <sales.csv> <inbound.csv> <stock.csv> [options]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --categories  Comma-separated decoded categories to analyze");
    eprintln!("  --from        Start of the sales date range (YYYY-MM-DD)");
    eprintln!("  --to          End of the sales date range (YYYY-MM-DD)");
    eprintln!("  --top         Number of recommendations to keep (default: 10)");
    eprintln!("  --json        Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  pulse-server master.csv sales.csv inbound.csv stock.csv");
    eprintln!("  pulse-server master.csv sales.csv inbound.csv stock.csv --categories Jackets --json");
    process::exit(1);
}

fn parse_date_flag(value: &str, flag: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|_| {
        eprintln!("Error: {flag} requires a date formatted as YYYY-MM-DD");
        process::exit(1);
    })
}

fn load_or_exit<T>(result: Result<T, LoadError>, table: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error loading {table} data: {e}");
        process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        usage();
    }

    let (master_path, sales_path, inbound_path, stock_path) =
        (&args[1], &args[2], &args[3], &args[4]);

    let mut categories: Option<Vec<String>> = None;
    let mut from: Option<NaiveDate> = None;
    let mut to: Option<NaiveDate> = None;
    let mut top_k: usize = 10;
    let mut json_output = false;

    let mut i = 5;
    while i < args.len() {
        match args[i].as_str() {
            "--categories" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --categories requires a comma-separated list");
                    process::exit(1);
                }
                categories = Some(
                    args[i + 1]
                        .split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect(),
                );
                i += 2;
            }
            "--from" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --from requires a date");
                    process::exit(1);
                }
                from = Some(parse_date_flag(&args[i + 1], "--from"));
                i += 2;
            }
            "--to" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --to requires a date");
                    process::exit(1);
                }
                to = Some(parse_date_flag(&args[i + 1], "--to"));
                i += 2;
            }
            "--top" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
                top_k = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top requires a positive integer");
                    process::exit(1);
                });
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
    }

    // The master file degrades to an empty dictionary: decoding then
    // yields sentinel fields everywhere, which is visible in the output
    // and tells the operator the dictionary needs fixing.
    let dictionary = load_master_file(master_path).unwrap_or_else(|e| {
        eprintln!("Error loading SKU master data: {e}");
        eprintln!("Continuing with an empty dictionary; every SKU will decode as Unknown.");
        Dictionary::empty()
    });
    if dictionary.is_empty() {
        log::warn!("SKU dictionary is empty");
    }

    let sales = load_or_exit(load_sales_file(sales_path), "sales");
    let inbound = load_or_exit(load_inbound_file(inbound_path), "inbound");
    let stock = load_or_exit(load_stock_file(stock_path), "stock");

    let dataset = Dataset::new(dictionary, sales, inbound, stock);

    // Views for the aggregations: date bounds fall back to the data's
    // own range when only one side is given.
    let mut sales_view = dataset.sales.clone();
    if from.is_some() || to.is_some() {
        if let Some((data_start, data_end)) = dataset.sales.date_bounds() {
            sales_view = sales_view
                .filter_by_date(from.unwrap_or(data_start), to.unwrap_or(data_end));
        }
    }
    let (sales_view, inbound_view, stock_view) = match &categories {
        Some(selection) => (
            sales_view.filter_by_categories(selection),
            dataset.inbound.filter_by_categories(selection),
            dataset.stock.filter_by_categories(selection),
        ),
        None => (sales_view, dataset.inbound.clone(), dataset.stock.clone()),
    };

    let pipeline_start = Instant::now();
    let pipeline = RestockDigestPipeline::from_dataset_with_size(&dataset, top_k);
    let query = DigestQuery {
        request_id: format!("digest-{}", Utc::now().format("%Y%m%d%H%M%S")),
        date_range: DateRange { start: from, end: to },
        categories: categories.clone(),
    };
    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    let digest = DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        date_range: DateRangeJson {
            start: result.query.date_range.start.map(|d| d.to_string()),
            end: result.query.date_range.end.map(|d| d.to_string()),
        },
        categories,
        kpis: aggregate::kpis(&sales_view, &stock_view),
        sales_by_category: aggregate::sales_by_category(&sales_view),
        sales_by_sub_category: aggregate::sales_by_sub_category(&sales_view),
        sales_by_production_year: aggregate::sales_by_production_year(&sales_view),
        sales_by_season: aggregate::sales_by_season(&sales_view),
        sales_by_color: aggregate::sales_by_color(&sales_view),
        sales_by_size: aggregate::sales_by_size(&sales_view),
        profit_by_category: aggregate::profit_by_category(&sales_view),
        profit_by_sub_category: aggregate::profit_by_sub_category(&sales_view),
        sales_by_channel: aggregate::sales_by_channel(&sales_view),
        top_products: aggregate::top_products_by_qty(&sales_view, TOP_PRODUCTS),
        monthly_nett_sales: aggregate::monthly_nett_sales(&sales_view),
        stock_by_location: aggregate::stock_by_location(&stock_view),
        stock_vs_inbound: aggregate::stock_vs_inbound(
            &stock_view,
            &inbound_view,
            TOP_STOCK_COMPARISON,
        ),
        recommendations: result.selected_candidates.clone(),
        summary: SummaryJson {
            dictionary_entries: dataset.dictionary.len(),
            sales_rows: sales_view.rows.len(),
            inbound_rows: inbound_view.rows.len(),
            stock_rows: stock_view.rows.len(),
            candidates_detected: result.retrieved_candidates.len(),
            candidates_filtered_out: result.filtered_candidates.len(),
            candidates_selected: result.selected_candidates.len(),
            pipeline_ms,
        },
    };

    if json_output {
        match serde_json::to_string_pretty(&digest) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("Error serializing digest: {e}");
                process::exit(1);
            }
        }
    } else {
        print_human(&digest);
    }
}
