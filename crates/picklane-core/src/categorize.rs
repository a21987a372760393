//! Lane assignment for matched per-unit lines.

use std::collections::HashMap;

use picklane_model::{Lane, OrderLineItem};

/// Number of per-unit lines each order id contributes to the batch.
#[must_use]
pub fn unit_counts(items: &[OrderLineItem]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.order_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Assigns a shipping lane to one item.
///
/// Paid shipping or a parent order with more than one unit in the
/// batch means expedited; everything else ships standard.
#[must_use]
pub fn assign_lane(item: &OrderLineItem, counts: &HashMap<String, usize>) -> Lane {
    let units = counts.get(&item.order_id).copied().unwrap_or(1);
    if item.shipping_cost > 0.0 || units > 1 {
        Lane::Expedited
    } else {
        Lane::Standard
    }
}
