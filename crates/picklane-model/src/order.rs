//! Raw order lines as exposed by an order source, before admission and
//! matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for a line whose source record carries no SKU.
pub const SKU_NOT_FOUND: &str = "SKU_NOT_FOUND";

/// Sentinel for a line whose source record carries no title.
pub const TITLE_NOT_AVAILABLE: &str = "Title not available";

/// One order line as fetched from a store account.
///
/// Order-level fields (status, timestamps, shipping cost, dispatch window)
/// are repeated on every line of a multi-line order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub transaction_id: String,
    pub item_id: String,
    pub sku: String,
    pub title: String,
    pub quantity: u32,
    /// Order-level shipping cost, attributed unchanged to each line.
    pub shipping_cost: f64,
    pub status: OrderStatusFlags,
    pub paid_time: Option<DateTime<Utc>>,
    pub expected_ship_date: Option<DateTime<Utc>>,
    /// Seller's committed dispatch window in business days.
    pub dispatch_days: Option<u32>,
}

/// Marketplace status flags controlling order admission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusFlags {
    pub order_status: String,
    pub cancel_status: String,
    pub checkout_status: String,
    pub payment_status: String,
    pub payment_hold: String,
    pub shipped_time: Option<DateTime<Utc>>,
}
