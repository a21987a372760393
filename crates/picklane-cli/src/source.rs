//! File-backed order source: one CSV per store account.

use std::collections::HashMap;
use std::path::PathBuf;

use picklane_core::OrderSource;
use picklane_ingest::{load_orders, store_id_from_path};
use picklane_model::{OrderRecord, PicklaneError, Result};

/// Maps store ids to their order CSVs and reads them on demand.
#[derive(Debug)]
pub struct CsvOrderSource {
    files: HashMap<String, PathBuf>,
}

impl CsvOrderSource {
    /// Registers one file per store, taking the file stem as the
    /// store id. Returns the ids in input order alongside the source.
    pub fn from_paths(paths: &[PathBuf]) -> Result<(Self, Vec<String>)> {
        let mut files = HashMap::new();
        let mut store_ids = Vec::new();
        for path in paths {
            let store_id = store_id_from_path(path);
            if files.insert(store_id.clone(), path.clone()).is_some() {
                return Err(PicklaneError::Config(format!(
                    "duplicate store id '{store_id}' from '{}'",
                    path.display()
                )));
            }
            store_ids.push(store_id);
        }
        Ok((Self { files }, store_ids))
    }
}

impl OrderSource for CsvOrderSource {
    fn fetch(&self, store_id: &str) -> Result<Vec<OrderRecord>> {
        let Some(path) = self.files.get(store_id) else {
            return Err(PicklaneError::Source {
                store_id: store_id.to_string(),
                detail: "no order file registered".to_string(),
            });
        };
        load_orders(store_id, path)
    }
}
