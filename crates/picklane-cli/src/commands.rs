use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use tracing::{info, info_span};

use picklane_cli::source::CsvOrderSource;
use picklane_core::{BatchOptions, BatchResult, process_batch, uk_date};
use picklane_ingest::load_catalog;
use picklane_match::{
    classify_title, closest_template, extract_car_details, extract_sku_identifier, find_best_match,
};

use crate::cli::{MatchArgs, ProcessArgs};

pub fn run_process(args: &ProcessArgs) -> Result<BatchResult> {
    let now = run_instant(args.run_date);
    let run_date = uk_date(now);
    let batch_span = info_span!("batch", run_date = %run_date);
    let _batch_guard = batch_span.enter();

    // =========================================================================
    // Stage 1: Load the catalog - the only fatal failure point
    // =========================================================================
    let load_start = Instant::now();
    let catalog = load_catalog(&args.catalog).context("load catalog")?;
    info!(
        rows = catalog.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "catalog ready"
    );

    // =========================================================================
    // Stage 2: Process every store through the batch pipeline
    // =========================================================================
    let (source, store_ids) = CsvOrderSource::from_paths(&args.orders)?;
    let store_initials = match &args.store_initials {
        Some(path) => load_store_initials(path)?,
        None => HashMap::new(),
    };
    let options = BatchOptions {
        include_dispatched: args.include_dispatched,
        urgent_only: args.urgent_only,
        now,
        store_initials,
    };
    let process_start = Instant::now();
    let result = process_batch(&catalog, &source, &store_ids, &options);
    info!(
        stores = store_ids.len(),
        duration_ms = process_start.elapsed().as_millis(),
        "batch processed"
    );

    // =========================================================================
    // Stage 3: Optional JSON export
    // =========================================================================
    if let Some(path) = &args.json {
        write_json(path, &result)?;
        info!(path = %path.display(), "batch result written");
    }

    Ok(result)
}

pub fn run_match(args: &MatchArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog).context("load catalog")?;
    let identifier = extract_sku_identifier(&args.sku);
    println!("Identifier: {identifier}");

    let details = extract_car_details(&args.title);
    match &details {
        Some(details) => {
            let rendered = serde_json::to_string_pretty(details).context("render car details")?;
            println!("Car details: {rendered}");
        }
        None => println!("Car details: none"),
    }

    let attrs = classify_title(&args.title);
    println!(
        "Attributes: carpet={} trim={} type={} embroidery={}",
        attrs.carpet_colour,
        attrs.trim_colour,
        attrs.carpet_kind,
        if attrs.embroidery.is_empty() {
            "-"
        } else {
            attrs.embroidery.as_str()
        }
    );

    match find_best_match(&args.sku, &args.title, &catalog, details.as_ref()) {
        Some(matched) => {
            let rendered = serde_json::to_string_pretty(&matched).context("render match")?;
            println!("Match: {rendered}");
        }
        None => {
            println!("Match: none");
            if let Some((template, score)) = closest_template(&args.sku, &catalog) {
                println!("Closest template: {template} (score {score:.3})");
            }
        }
    }
    Ok(())
}

fn load_store_initials(path: &Path) -> Result<HashMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read store initials '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parse store initials '{}'", path.display()))
}

fn write_json(path: &Path, result: &BatchResult) -> Result<()> {
    let payload = json!({
        "summary": result.summary(),
        "expedited": result.expedited,
        "standard": result.standard,
        "unmatched": result.unmatched,
        "errors": result.errors,
    });
    let file = fs::File::create(path)
        .with_context(|| format!("create json output '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, &payload)
        .with_context(|| format!("write json output '{}'", path.display()))?;
    Ok(())
}

/// Midnight UTC keeps the UK civil date on the requested day in both
/// winter and summer time.
fn run_instant(run_date: Option<NaiveDate>) -> DateTime<Utc> {
    match run_date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}
