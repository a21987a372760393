//! File-backed order source, one CSV per store account.
//!
//! The marketplace transport sits outside this repo; these files are
//! its export. Field gaps degrade to sentinels or absences instead of
//! failing the row, matching how the live feed behaves.

use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use picklane_model::{
    OrderRecord, OrderStatusFlags, PicklaneError, Result, SKU_NOT_FOUND, TITLE_NOT_AVAILABLE,
};

use crate::catalog::{normalize_cell, normalize_header};

struct OrderColumns {
    order_id: Option<usize>,
    transaction_id: Option<usize>,
    item_id: Option<usize>,
    sku: Option<usize>,
    title: Option<usize>,
    quantity: Option<usize>,
    shipping_cost: Option<usize>,
    order_status: Option<usize>,
    cancel_status: Option<usize>,
    checkout_status: Option<usize>,
    payment_status: Option<usize>,
    payment_hold: Option<usize>,
    shipped_time: Option<usize>,
    paid_time: Option<usize>,
    expected_ship_date: Option<usize>,
    dispatch_days: Option<usize>,
}

impl OrderColumns {
    fn resolve(headers: &[String]) -> Self {
        let locate = |name: &str| headers.iter().position(|header| header == name);
        Self {
            order_id: locate("OrderID"),
            transaction_id: locate("TransactionID"),
            item_id: locate("ItemID"),
            sku: locate("SKU"),
            title: locate("Title"),
            quantity: locate("Quantity"),
            shipping_cost: locate("ShippingCost"),
            order_status: locate("OrderStatus"),
            cancel_status: locate("CancelStatus"),
            checkout_status: locate("CheckoutStatus"),
            payment_status: locate("PaymentStatus"),
            payment_hold: locate("PaymentHoldStatus"),
            shipped_time: locate("ShippedTime"),
            paid_time: locate("PaidTime"),
            expected_ship_date: locate("ExpectedShipDate"),
            dispatch_days: locate("DispatchDays"),
        }
    }
}

/// Reads one store's order lines.
///
/// A read failure here is a store-level error; the caller decides how
/// to isolate it from the rest of the batch.
pub fn load_orders(store_id: &str, path: &Path) -> Result<Vec<OrderRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| {
            source_error(store_id, format!("cannot open orders file {}: {err}", path.display()))
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| source_error(store_id, format!("cannot read header row: {err}")))?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = OrderColumns::resolve(&headers);

    let mut orders = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|err| source_error(store_id, format!("row {}: {err}", row_idx + 2)))?;
        orders.push(build_record(store_id, &record, &columns));
    }
    Ok(orders)
}

/// Store id for an orders file when none was given explicitly: the
/// file stem.
#[must_use]
pub fn store_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn build_record(store_id: &str, record: &StringRecord, columns: &OrderColumns) -> OrderRecord {
    let cell = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(normalize_cell)
            .unwrap_or_default()
    };

    let sku = non_empty_or(cell(columns.sku), SKU_NOT_FOUND);
    let title = non_empty_or(cell(columns.title), TITLE_NOT_AVAILABLE);

    let status = OrderStatusFlags {
        order_status: cell(columns.order_status),
        cancel_status: cell(columns.cancel_status),
        checkout_status: cell(columns.checkout_status),
        payment_status: cell(columns.payment_status),
        payment_hold: cell(columns.payment_hold),
        shipped_time: parse_timestamp(store_id, "ShippedTime", &cell(columns.shipped_time)),
    };

    OrderRecord {
        order_id: cell(columns.order_id),
        transaction_id: cell(columns.transaction_id),
        item_id: cell(columns.item_id),
        sku,
        title,
        quantity: parse_quantity(store_id, &cell(columns.quantity)),
        shipping_cost: cell(columns.shipping_cost).parse().unwrap_or(0.0),
        status,
        paid_time: parse_timestamp(store_id, "PaidTime", &cell(columns.paid_time)),
        expected_ship_date: parse_timestamp(
            store_id,
            "ExpectedShipDate",
            &cell(columns.expected_ship_date),
        ),
        dispatch_days: parse_dispatch_days(store_id, &cell(columns.dispatch_days)),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn parse_quantity(store_id: &str, value: &str) -> u32 {
    if value.is_empty() {
        return 1;
    }
    match value.parse() {
        Ok(quantity) => quantity,
        Err(_) => {
            warn!(store_id, value, "unparseable quantity, defaulting to 1");
            1
        }
    }
}

fn parse_dispatch_days(store_id: &str, value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(days) => Some(days),
        Err(_) => {
            warn!(store_id, value, "unparseable dispatch days, treating as absent");
            None
        }
    }
}

fn parse_timestamp(store_id: &str, field: &str, value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            warn!(store_id, field, value, %err, "unparseable timestamp, treating as absent");
            None
        }
    }
}

fn source_error(store_id: &str, detail: String) -> PicklaneError {
    PicklaneError::Source {
        store_id: store_id.to_string(),
        detail,
    }
}
