//! Matched and enriched order lines, plus the unmatched report record.
//!
//! Serialized field names are a wire contract: downstream pick-sheet and
//! courier writers key off these exact names, so renames here are breaking.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::enums::{CarpetKind, MatchMethod};
use crate::order::OrderRecord;

/// Reason recorded on every unmatched line.
pub const NO_MATCH_REASON: &str = "No match found in catalog";

/// A successful catalog resolution for one order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMatch {
    #[serde(rename = "Template")]
    pub template: String,
    #[serde(rename = "COMPANY")]
    pub company: String,
    #[serde(rename = "MODEL")]
    pub model: String,
    #[serde(rename = "YEAR")]
    pub year: String,
    #[serde(rename = "MATS")]
    pub mats: String,
    #[serde(rename = "NO OF CLIPS")]
    pub clip_count: String,
    #[serde(rename = "Type")]
    pub clip_type: String,
    pub method: MatchMethod,
}

impl TemplateMatch {
    /// Capture a catalog row at a given precedence level.
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry, method: MatchMethod) -> Self {
        Self {
            template: entry.template.clone(),
            company: entry.company.clone(),
            model: entry.model.clone(),
            year: entry.year.clone(),
            mats: entry.mats.clone(),
            clip_count: entry.clip_count.clone(),
            clip_type: entry.clip_type.clone(),
            method,
        }
    }
}

/// Title-derived production attributes attached to every matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleAttributes {
    pub carpet_colour: String,
    pub trim_colour: String,
    pub carpet_kind: CarpetKind,
    pub embroidery: String,
}

/// One enriched, per-unit order line flowing to downstream writers.
///
/// Built only from a successful match; barcode fields stay empty until the
/// assignment passes run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(rename = "ORDER ID")]
    pub order_id: String,
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,
    #[serde(rename = "Item Number")]
    pub item_number: String,
    #[serde(rename = "Store ID")]
    pub store_id: String,
    #[serde(rename = "Raw SKU")]
    pub raw_sku: String,
    #[serde(rename = "Product Title")]
    pub title: String,
    /// Always 1: multi-quantity lines are exploded into per-unit items.
    #[serde(rename = "QTY")]
    pub quantity: u32,
    #[serde(rename = "REF NO")]
    pub template: String,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "YEAR")]
    pub year: String,
    #[serde(rename = "Pcs/Set")]
    pub mats: String,
    #[serde(rename = "NO OF CLIPS")]
    pub clip_count: String,
    #[serde(rename = "CLIP TYPE")]
    pub clip_type: String,
    #[serde(rename = "CARPET COLOUR")]
    pub carpet_colour: String,
    #[serde(rename = "TRIM")]
    pub trim: String,
    #[serde(rename = "CARPET TYPE")]
    pub carpet_type: CarpetKind,
    #[serde(rename = "Embroidery")]
    pub embroidery: String,
    #[serde(rename = "Match Method")]
    pub method: MatchMethod,
    #[serde(rename = "Shipping Cost")]
    pub shipping_cost: f64,
    #[serde(rename = "AssignedBaseBarcode")]
    pub base_barcode: Option<String>,
    #[serde(rename = "FinalBarcode")]
    pub final_barcode: Option<String>,
}

impl OrderLineItem {
    /// Assemble one per-unit line from a matched source record.
    #[must_use]
    pub fn from_match(
        record: &OrderRecord,
        store_id: &str,
        matched: &TemplateMatch,
        attrs: &TitleAttributes,
    ) -> Self {
        Self {
            order_id: record.order_id.clone(),
            transaction_id: record.transaction_id.clone(),
            item_number: record.item_id.clone(),
            store_id: store_id.to_string(),
            raw_sku: record.sku.clone(),
            title: record.title.clone(),
            quantity: 1,
            template: matched.template.clone(),
            make: matched.company.clone(),
            model: matched.model.clone(),
            year: matched.year.clone(),
            mats: matched.mats.clone(),
            clip_count: matched.clip_count.clone(),
            clip_type: matched.clip_type.clone(),
            carpet_colour: attrs.carpet_colour.clone(),
            trim: attrs.trim_colour.clone(),
            carpet_type: attrs.carpet_kind,
            embroidery: attrs.embroidery.clone(),
            method: matched.method,
            shipping_cost: record.shipping_cost,
            base_barcode: None,
            final_barcode: None,
        }
    }
}

/// A line the matcher could not resolve, reported instead of dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedRecord {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Product Title")]
    pub title: String,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Store ID")]
    pub store_id: String,
    #[serde(rename = "Error")]
    pub reason: String,
}

impl UnmatchedRecord {
    #[must_use]
    pub fn from_record(record: &OrderRecord, store_id: &str) -> Self {
        let order_id = if record.order_id.is_empty() {
            "N/A".to_string()
        } else {
            record.order_id.clone()
        };
        Self {
            sku: record.sku.clone(),
            title: record.title.clone(),
            order_id,
            store_id: store_id.to_string(),
            reason: NO_MATCH_REASON.to_string(),
        }
    }
}
