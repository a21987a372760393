//! Batch processing core for PickLane.
//!
//! Order admission and urgency rules, barcode assignment, shipping
//! lane categorization, and the per-run pipeline driving them.
//! Catalog matching itself lives in `picklane-match`; this crate
//! consumes it.

pub mod admission;
pub mod barcode;
pub mod batch;
pub mod categorize;
pub mod uk_time;

pub use admission::{is_shipping_due, should_skip_order};
pub use barcode::BarcodeEngine;
pub use batch::{
    BatchOptions, BatchResult, BatchSummary, OrderSource, StoreSummary, process_batch,
};
pub use categorize::{assign_lane, unit_counts};
pub use uk_time::{in_british_summer_time, uk_date};
