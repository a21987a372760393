use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicklaneError {
    /// Fatal: the reference catalog could not be loaded. Aborts the run.
    #[error("catalog load failed for '{}': {detail}", path.display())]
    CatalogLoad { path: PathBuf, detail: String },
    /// A store's order source failed; the store is skipped, the batch continues.
    #[error("order source failed for store '{store_id}': {detail}")]
    Source { store_id: String, detail: String },
    /// Unexpected per-item fault inside the matching stage.
    #[error("matching failed for sku '{sku}' on order '{order_id}': {detail}")]
    Matching {
        sku: String,
        title: String,
        order_id: String,
        detail: String,
    },
    #[error("configuration: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PicklaneError>;
