//! Catalog and order-file ingestion for PickLane.

pub mod catalog;
pub mod orders;

pub use catalog::load_catalog;
pub use orders::{load_orders, store_id_from_path};
