//! Barcode assignment over one processing batch.
//!
//! Two passes: every item with a store id gets a base barcode of
//! store initials + 3-digit batch counter + run date (DDMMYY), then
//! items sharing an order id get 2-digit per-unit suffixes after a
//! stable sort by raw SKU. Base uniqueness comes from the counter;
//! the suffix resolves the only remaining collision source, so final
//! barcodes are unique across the batch.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{error, warn};

use picklane_model::OrderLineItem;

/// Initials used when a store id has no mapping and no usable prefix.
const FALLBACK_INITIALS: &str = "XX";

/// One engine per batch; the row counter never outlives it.
pub struct BarcodeEngine {
    store_initials: HashMap<String, String>,
    run_date: NaiveDate,
    row_num: u32,
}

impl BarcodeEngine {
    #[must_use]
    pub fn new(store_initials: HashMap<String, String>, run_date: NaiveDate) -> Self {
        Self {
            store_initials,
            run_date,
            row_num: 1,
        }
    }

    /// Runs both passes over the batch in place.
    pub fn assign(&mut self, items: &mut [OrderLineItem]) {
        self.assign_bases(items);
        assign_finals(items);
    }

    fn assign_bases(&mut self, items: &mut [OrderLineItem]) {
        let date_part = self.run_date.format("%d%m%y").to_string();
        for item in items.iter_mut() {
            if item.store_id.is_empty() {
                error!(
                    order_id = %item.order_id,
                    sku = %item.raw_sku,
                    "item has no store id, leaving barcode unassigned"
                );
                item.base_barcode = None;
                continue;
            }
            let initials = self.initials_for(&item.store_id);
            item.base_barcode = Some(format!("{}{:03}{}", initials, self.row_num, date_part));
            self.row_num += 1;
        }
    }

    fn initials_for(&self, store_id: &str) -> String {
        if let Some(mapped) = self.store_initials.get(store_id) {
            return mapped.clone();
        }
        let prefix: String = store_id.chars().take(2).collect();
        if prefix.is_empty() {
            FALLBACK_INITIALS.to_string()
        } else {
            prefix.to_uppercase()
        }
    }
}

fn assign_finals(items: &mut [OrderLineItem]) {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    let mut orphans: Vec<usize> = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if item.order_id.is_empty() {
            orphans.push(idx);
        } else {
            groups.entry(item.order_id.clone()).or_default().push(idx);
        }
    }

    for idx in orphans {
        warn!(sku = %items[idx].raw_sku, "item without order id keeps its base barcode");
        items[idx].final_barcode = items[idx].base_barcode.clone();
    }

    for indices in groups.values() {
        if indices.len() == 1 {
            let idx = indices[0];
            items[idx].final_barcode = items[idx].base_barcode.clone();
            continue;
        }
        let mut ordered = indices.clone();
        ordered.sort_by(|&a, &b| items[a].raw_sku.cmp(&items[b].raw_sku));
        for (position, &idx) in ordered.iter().enumerate() {
            items[idx].final_barcode = items[idx]
                .base_barcode
                .as_ref()
                .map(|base| format!("{}{:02}", base, position + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use picklane_model::{CarpetKind, MatchMethod};

    fn item(order_id: &str, store_id: &str, sku: &str) -> OrderLineItem {
        OrderLineItem {
            order_id: order_id.to_string(),
            transaction_id: "t1".to_string(),
            item_number: "i1".to_string(),
            store_id: store_id.to_string(),
            raw_sku: sku.to_string(),
            title: "Audi Q7 2015-2020".to_string(),
            quantity: 1,
            template: "q227".to_string(),
            make: "audi".to_string(),
            model: "q7".to_string(),
            year: "2015-2020".to_string(),
            mats: "4".to_string(),
            clip_count: "8".to_string(),
            clip_type: "oval".to_string(),
            carpet_colour: "Black".to_string(),
            trim: "Black".to_string(),
            carpet_type: CarpetKind::Standard,
            embroidery: String::new(),
            method: MatchMethod::Identifier,
            shipping_cost: 0.0,
            base_barcode: None,
            final_barcode: None,
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
    }

    fn engine() -> BarcodeEngine {
        let mut initials = HashMap::new();
        initials.insert("carmats_direct".to_string(), "CD".to_string());
        BarcodeEngine::new(initials, run_date())
    }

    #[test]
    fn single_item_orders_keep_their_base() {
        let mut batch = vec![item("110-001", "carmats_direct", "Q227")];
        engine().assign(&mut batch);
        assert_eq!(batch[0].base_barcode.as_deref(), Some("CD001210826"));
        assert_eq!(batch[0].final_barcode.as_deref(), Some("CD001210826"));
    }

    #[test]
    fn multi_item_orders_get_sku_ordered_suffixes() {
        let mut batch = vec![
            item("110-001", "carmats_direct", "B-SKU"),
            item("110-001", "carmats_direct", "A-SKU"),
        ];
        engine().assign(&mut batch);
        // Counter follows input order; suffixes follow SKU order.
        assert_eq!(batch[0].base_barcode.as_deref(), Some("CD001210826"));
        assert_eq!(batch[1].base_barcode.as_deref(), Some("CD002210826"));
        assert_eq!(batch[1].final_barcode.as_deref(), Some("CD00221082601"));
        assert_eq!(batch[0].final_barcode.as_deref(), Some("CD00121082602"));
    }

    #[test]
    fn unmapped_stores_fall_back_to_their_prefix() {
        let mut batch = vec![item("110-001", "mat_world", "Q227")];
        engine().assign(&mut batch);
        assert_eq!(batch[0].final_barcode.as_deref(), Some("MA001210826"));
    }

    #[test]
    fn missing_store_id_is_a_soft_failure() {
        let mut batch = vec![
            item("110-001", "", "Q227"),
            item("110-002", "carmats_direct", "L2"),
        ];
        engine().assign(&mut batch);
        assert_eq!(batch[0].base_barcode, None);
        assert_eq!(batch[0].final_barcode, None);
        // The counter only advances on assignment.
        assert_eq!(batch[1].final_barcode.as_deref(), Some("CD001210826"));
    }

    #[test]
    fn items_without_an_order_id_keep_their_base() {
        let mut batch = vec![
            item("", "carmats_direct", "Q227"),
            item("", "carmats_direct", "L2"),
        ];
        engine().assign(&mut batch);
        assert_eq!(batch[0].final_barcode.as_deref(), Some("CD001210826"));
        assert_eq!(batch[1].final_barcode.as_deref(), Some("CD002210826"));
    }

    #[test]
    fn counter_state_stays_within_one_engine() {
        let mut first = vec![item("110-001", "carmats_direct", "Q227")];
        let mut second = vec![item("220-001", "carmats_direct", "L2")];
        engine().assign(&mut first);
        engine().assign(&mut second);
        assert_eq!(first[0].final_barcode, second[0].final_barcode);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Final barcodes never collide, whatever the order grouping.
        #[test]
        fn finals_are_unique_across_the_batch(
            lines in prop::collection::vec(("[a-c]{1}", "[A-Z]{1,6}"), 1..20)
        ) {
            let mut batch: Vec<OrderLineItem> = lines
                .iter()
                .map(|(order_id, sku)| item(order_id, "carmats_direct", sku))
                .collect();
            engine().assign(&mut batch);

            let finals: Vec<&str> = batch
                .iter()
                .filter_map(|i| i.final_barcode.as_deref())
                .collect();
            prop_assert_eq!(finals.len(), batch.len());
            let distinct: std::collections::HashSet<&str> = finals.iter().copied().collect();
            prop_assert_eq!(distinct.len(), finals.len());
        }
    }
}
