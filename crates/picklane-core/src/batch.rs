//! The per-run processing pipeline.
//!
//! Stages, per run: fetch each store's orders (store failures are
//! recorded and skipped), admit and match each line, assign barcodes
//! over the whole batch, then split into shipping lanes. Only the
//! catalog load ahead of this module can abort a run.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use picklane_match::{classify_title, closest_template, extract_car_details, find_best_match};
use picklane_model::{
    Catalog, Lane, OrderLineItem, OrderRecord, PicklaneError, Result, UnmatchedRecord,
};

use crate::admission::{is_shipping_due, should_skip_order};
use crate::barcode::BarcodeEngine;
use crate::categorize::{assign_lane, unit_counts};
use crate::uk_time::uk_date;

/// Source of raw order lines for one store account.
///
/// The marketplace transport lives behind this seam; tests and the
/// CLI plug in their own implementations.
pub trait OrderSource {
    fn fetch(&self, store_id: &str) -> Result<Vec<OrderRecord>>;
}

/// Caller-supplied knobs for one run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Admit orders that already carry a shipped timestamp.
    pub include_dispatched: bool,
    /// Keep only orders whose ship-by deadline is today or earlier.
    pub urgent_only: bool,
    /// Instant the run is evaluated at; drives the UK run date.
    pub now: DateTime<Utc>,
    /// Store id to barcode initials overrides.
    pub store_initials: HashMap<String, String>,
}

/// Everything one run produces.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    pub expedited: Vec<OrderLineItem>,
    pub standard: Vec<OrderLineItem>,
    pub unmatched: Vec<UnmatchedRecord>,
    /// Store fetch failures and per-item matching faults, as
    /// `"<store>: <error>"` lines.
    pub errors: Vec<String>,
}

/// Per-store and total line counts for the run report.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub stores: Vec<StoreSummary>,
    pub expedited: usize,
    pub standard: usize,
    pub unmatched: usize,
    pub errors: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct StoreSummary {
    pub store_id: String,
    pub expedited: usize,
    pub standard: usize,
    pub unmatched: usize,
}

impl BatchResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Counts lines per store, stores in first-seen order.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        let mut stores: Vec<StoreSummary> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for item in &self.expedited {
            let slot = store_slot(&mut stores, &mut index, &item.store_id);
            stores[slot].expedited += 1;
        }
        for item in &self.standard {
            let slot = store_slot(&mut stores, &mut index, &item.store_id);
            stores[slot].standard += 1;
        }
        for record in &self.unmatched {
            let slot = store_slot(&mut stores, &mut index, &record.store_id);
            stores[slot].unmatched += 1;
        }

        BatchSummary {
            stores,
            expedited: self.expedited.len(),
            standard: self.standard.len(),
            unmatched: self.unmatched.len(),
            errors: self.errors.len(),
        }
    }
}

fn store_slot(
    stores: &mut Vec<StoreSummary>,
    index: &mut HashMap<String, usize>,
    store_id: &str,
) -> usize {
    if let Some(&slot) = index.get(store_id) {
        return slot;
    }
    index.insert(store_id.to_string(), stores.len());
    stores.push(StoreSummary {
        store_id: store_id.to_string(),
        ..StoreSummary::default()
    });
    stores.len() - 1
}

/// Runs the whole pipeline over the given stores.
///
/// Never fails: store and item faults land in the result's error
/// list while the rest of the batch proceeds.
pub fn process_batch(
    catalog: &Catalog,
    source: &dyn OrderSource,
    store_ids: &[String],
    options: &BatchOptions,
) -> BatchResult {
    let mut matched: Vec<OrderLineItem> = Vec::new();
    let mut unmatched: Vec<UnmatchedRecord> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for store_id in store_ids {
        let store_span = info_span!("store", store_id = %store_id);
        let _store_guard = store_span.enter();

        let records = match source.fetch(store_id) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "store fetch failed, skipping store");
                errors.push(format!("{store_id}: {err}"));
                continue;
            }
        };
        info!(count = records.len(), "fetched store orders");

        for record in &records {
            if should_skip_order(record, options.include_dispatched) {
                continue;
            }
            if options.urgent_only && !is_shipping_due(record, options.now) {
                continue;
            }
            match resolve_line(record, store_id, catalog) {
                Ok(Some(units)) => matched.extend(units),
                Ok(None) => {
                    if let Some((template, score)) = closest_template(&record.sku, catalog) {
                        debug!(
                            sku = %record.sku,
                            template,
                            score,
                            "closest template for unmatched line"
                        );
                    }
                    unmatched.push(UnmatchedRecord::from_record(record, store_id));
                }
                Err(err) => {
                    warn!(%err, "item failed to resolve");
                    errors.push(format!("{store_id}: {err}"));
                }
            }
        }
    }

    let run_date = uk_date(options.now);
    let mut engine = BarcodeEngine::new(options.store_initials.clone(), run_date);
    engine.assign(&mut matched);

    let counts = unit_counts(&matched);
    let mut expedited = Vec::new();
    let mut standard = Vec::new();
    for item in matched {
        match assign_lane(&item, &counts) {
            Lane::Expedited => expedited.push(item),
            Lane::Standard => standard.push(item),
        }
    }

    info!(
        expedited = expedited.len(),
        standard = standard.len(),
        unmatched = unmatched.len(),
        errors = errors.len(),
        "batch complete"
    );
    BatchResult {
        expedited,
        standard,
        unmatched,
        errors,
    }
}

/// Matches one raw line and explodes it into per-unit items.
///
/// `Ok(None)` routes the line to the unmatched report; that covers
/// genuine no-match lines and matched lines with zero quantity.
fn resolve_line(
    record: &OrderRecord,
    store_id: &str,
    catalog: &Catalog,
) -> Result<Option<Vec<OrderLineItem>>> {
    let details = extract_car_details(&record.title);
    let Some(matched) = find_best_match(&record.sku, &record.title, catalog, details.as_ref())
    else {
        return Ok(None);
    };
    if matched.template.trim().is_empty() {
        return Err(PicklaneError::Matching {
            sku: record.sku.clone(),
            title: record.title.clone(),
            order_id: record.order_id.clone(),
            detail: "matched catalog row has an empty template".to_string(),
        });
    }

    let attrs = classify_title(&record.title);
    let units: Vec<OrderLineItem> = (0..record.quantity)
        .map(|_| OrderLineItem::from_match(record, store_id, &matched, &attrs))
        .collect();
    if units.is_empty() {
        return Ok(None);
    }
    Ok(Some(units))
}
