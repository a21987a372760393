pub mod catalog;
pub mod enums;
pub mod error;
pub mod item;
pub mod normalize;
pub mod order;

pub use catalog::{Catalog, CatalogEntry, Family, FamilyView};
pub use enums::{CarpetKind, Lane, MatchMethod};
pub use error::{PicklaneError, Result};
pub use item::{NO_MATCH_REASON, OrderLineItem, TemplateMatch, TitleAttributes, UnmatchedRecord};
pub use normalize::normalize_ref_no;
pub use order::{OrderRecord, OrderStatusFlags, SKU_NOT_FOUND, TITLE_NOT_AVAILABLE};
