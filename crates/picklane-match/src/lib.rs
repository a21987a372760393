//! SKU identifier extraction and catalog matching for PickLane.
//!
//! An order line arrives as a raw marketplace SKU plus a listing title.
//! This crate turns that pair into a catalog template row: the cascade
//! digs the identifier out of the SKU, the vehicle and colour modules
//! read the title, and the matcher ties everything to the master
//! catalog.

pub mod cascade;
pub mod colors;
pub mod matcher;
pub mod vehicle;
pub mod years;

pub use cascade::{Rule, extract_sku_identifier, rules};
pub use colors::{
    DOUBLE_STITCH, classify_title, determine_carpet_kind, determine_embroidery,
    extract_carpet_and_trim_colors,
};
pub use matcher::{closest_template, find_best_match};
pub use vehicle::{CarDetails, extract_car_details};
pub use years::{check_year_match, normalize_year_range};
