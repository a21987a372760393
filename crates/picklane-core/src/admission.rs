//! Order admission and urgency rules.
//!
//! Status exclusions always apply; the ship-by computation only gates
//! the batch when the caller asks for the urgent-only view.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use picklane_model::OrderRecord;

use crate::uk_time::{is_business_day, uk_date};

/// Marketplace states that drop an order outright.
const EXCLUDED_ORDER_STATUSES: &[&str] = &["cancelled", "inactive", "invalid"];

/// Payment states safe to dispatch against.
const CLEARED_PAYMENT_STATUSES: &[&str] = &["nopaymentfailure", "paymentreceived", ""];

/// Dispatch window assumed when the listing does not carry one.
const DEFAULT_DISPATCH_DAYS: u32 = 1;

/// Returns true when an order must not enter the batch.
///
/// Already-dispatched orders are excluded unless `include_dispatched`
/// is set.
#[must_use]
pub fn should_skip_order(record: &OrderRecord, include_dispatched: bool) -> bool {
    let status = record.status.order_status.to_lowercase();
    if EXCLUDED_ORDER_STATUSES.contains(&status.as_str()) {
        debug!(order_id = %record.order_id, status, "order excluded by status");
        return true;
    }
    if record.status.cancel_status.to_lowercase().contains("cancel") {
        debug!(order_id = %record.order_id, "order excluded, cancellation in progress");
        return true;
    }
    // Checkout and payment state only exist once checkout has started.
    let checkout = record.status.checkout_status.to_lowercase();
    if !checkout.is_empty() {
        if checkout != "complete" {
            debug!(order_id = %record.order_id, checkout, "order excluded, checkout incomplete");
            return true;
        }
        let payment = record.status.payment_status.to_lowercase();
        if !CLEARED_PAYMENT_STATUSES.contains(&payment.as_str()) {
            debug!(order_id = %record.order_id, payment, "order excluded, payment not cleared");
            return true;
        }
    }
    if record.status.payment_hold == "PaymentHold" {
        debug!(order_id = %record.order_id, "order excluded, payment on hold");
        return true;
    }
    if !include_dispatched && record.status.shipped_time.is_some() {
        debug!(order_id = %record.order_id, "order excluded, already dispatched");
        return true;
    }
    false
}

/// Returns true when the order's ship-by deadline falls on or before
/// the current UK date.
///
/// A supplied expected-ship-date is checked first; otherwise the
/// deadline is the payment date plus the dispatch window, counted in
/// weekdays. Orders with neither timestamp are never due.
#[must_use]
pub fn is_shipping_due(record: &OrderRecord, now: DateTime<Utc>) -> bool {
    let today = uk_date(now);

    if let Some(expected) = record.expected_ship_date
        && uk_date(expected) <= today
    {
        return true;
    }

    let Some(paid) = record.paid_time else {
        return false;
    };
    let dispatch_days = record.dispatch_days.unwrap_or(DEFAULT_DISPATCH_DAYS);

    let mut ship_by = uk_date(paid);
    let mut counted = 0;
    while counted < dispatch_days {
        ship_by += Duration::days(1);
        if is_business_day(ship_by) {
            counted += 1;
        }
    }
    ship_by <= today
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use picklane_model::OrderStatusFlags;

    fn record() -> OrderRecord {
        OrderRecord {
            order_id: "110-001".to_string(),
            transaction_id: "t1".to_string(),
            item_id: "i1".to_string(),
            sku: "Q227".to_string(),
            title: "Audi Q7 2015-2020".to_string(),
            quantity: 1,
            shipping_cost: 0.0,
            status: OrderStatusFlags::default(),
            paid_time: None,
            expected_ship_date: None,
            dispatch_days: None,
        }
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn clean_orders_are_admitted() {
        assert!(!should_skip_order(&record(), false));
    }

    #[test]
    fn cancelled_and_invalid_statuses_are_excluded() {
        for status in ["Cancelled", "Inactive", "INVALID"] {
            let mut order = record();
            order.status.order_status = status.to_string();
            assert!(should_skip_order(&order, false), "status {status}");
        }
        let mut order = record();
        order.status.cancel_status = "CancelRequested".to_string();
        assert!(should_skip_order(&order, false));
    }

    #[test]
    fn checkout_gates_only_apply_once_checkout_exists() {
        let mut order = record();
        order.status.payment_status = "Failed".to_string();
        assert!(!should_skip_order(&order, false));

        order.status.checkout_status = "Complete".to_string();
        assert!(should_skip_order(&order, false));

        order.status.payment_status = "PaymentReceived".to_string();
        assert!(!should_skip_order(&order, false));

        order.status.checkout_status = "Incomplete".to_string();
        assert!(should_skip_order(&order, false));
    }

    #[test]
    fn payment_hold_is_an_exact_match() {
        let mut order = record();
        order.status.payment_hold = "PaymentHold".to_string();
        assert!(should_skip_order(&order, false));

        order.status.payment_hold = "paymenthold".to_string();
        assert!(!should_skip_order(&order, false));
    }

    #[test]
    fn dispatched_orders_are_excluded_unless_requested() {
        let mut order = record();
        order.status.shipped_time = Some(utc(2026, 8, 20, 10));
        assert!(should_skip_order(&order, false));
        assert!(!should_skip_order(&order, true));
    }

    #[test]
    fn past_expected_ship_dates_are_due() {
        let mut order = record();
        order.expected_ship_date = Some(utc(2026, 8, 20, 9));
        assert!(is_shipping_due(&order, utc(2026, 8, 21, 9)));
    }

    #[test]
    fn future_expected_ship_dates_fall_through_to_payment() {
        let mut order = record();
        order.expected_ship_date = Some(utc(2026, 8, 28, 9));
        assert!(!is_shipping_due(&order, utc(2026, 8, 21, 9)));

        // Paid Wednesday with a one-day window: due from Thursday on.
        order.paid_time = Some(utc(2026, 8, 19, 14));
        assert!(is_shipping_due(&order, utc(2026, 8, 21, 9)));
    }

    #[test]
    fn dispatch_days_skip_weekends() {
        // Paid Friday 2026-08-21; one business day lands on Monday.
        let mut order = record();
        order.paid_time = Some(utc(2026, 8, 21, 14));
        assert!(!is_shipping_due(&order, utc(2026, 8, 22, 9)));
        assert!(!is_shipping_due(&order, utc(2026, 8, 23, 9)));
        assert!(is_shipping_due(&order, utc(2026, 8, 24, 9)));
    }

    #[test]
    fn missing_dispatch_days_default_to_one() {
        let mut order = record();
        order.paid_time = Some(utc(2026, 8, 18, 14));
        order.dispatch_days = Some(3);
        assert!(!is_shipping_due(&order, utc(2026, 8, 20, 9)));
        assert!(is_shipping_due(&order, utc(2026, 8, 21, 9)));

        order.dispatch_days = None;
        assert!(is_shipping_due(&order, utc(2026, 8, 19, 9)));
    }

    #[test]
    fn unpaid_orders_are_never_due() {
        assert!(!is_shipping_due(&record(), utc(2026, 8, 21, 9)));
    }
}
