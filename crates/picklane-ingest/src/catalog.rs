//! Master catalog loading.
//!
//! The catalog is the single source of truth for what can be matched;
//! anything wrong with it aborts the run before orders are touched.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use csv::ReaderBuilder;
use regex::Regex;
use tracing::info;

use picklane_model::{Catalog, CatalogEntry, PicklaneError, Result, normalize_ref_no};

/// Columns every catalog file must carry.
const REQUIRED_COLUMNS: &[&str] =
    &["Template", "COMPANY", "MODEL", "YEAR", "MATS", "#Clips", "Type"];

/// Optional per-row forced match override column.
const FORCED_COLUMN: &str = "ForcedMatchSKU";

static TO_PRESENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)to\s+present").expect("Invalid to-present regex"));

struct Columns {
    template: usize,
    company: usize,
    model: usize,
    year: usize,
    mats: usize,
    clips: usize,
    clip_type: usize,
    forced: Option<usize>,
}

/// Loads and prepares the master catalog from a CSV file.
///
/// Text columns are trimmed and lowercased, open-ended years are pinned
/// to the current year, and the family lookup indexes are built before
/// the catalog is handed out.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| load_error(path, format!("cannot open catalog: {err}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| load_error(path, format!("cannot read header row: {err}")))?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = resolve_columns(path, &headers)?;

    let current_year = Utc::now().year();
    let present_rewrite = format!("-{current_year}");

    let mut entries = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.map_err(|err| load_error(path, format!("row {}: {err}", row_idx + 2)))?;
        let cell = |idx: usize| record.get(idx).map(normalize_cell).unwrap_or_default();

        let template = cell(columns.template).to_lowercase();
        let year = TO_PRESENT_REGEX
            .replace_all(&cell(columns.year), present_rewrite.as_str())
            .to_lowercase();
        let forced_sku = columns
            .forced
            .and_then(|idx| record.get(idx))
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        entries.push(CatalogEntry {
            template_key: normalize_ref_no(&template),
            company: cell(columns.company).to_lowercase(),
            model: cell(columns.model).to_lowercase(),
            year,
            mats: cell(columns.mats),
            clip_count: cell(columns.clips),
            clip_type: cell(columns.clip_type).to_lowercase(),
            forced_sku,
            template,
        });
    }

    if entries.is_empty() {
        return Err(load_error(path, "catalog file contains no rows".to_string()));
    }

    info!(path = %path.display(), rows = entries.len(), "catalog loaded");
    Ok(Catalog::new(entries))
}

fn resolve_columns(path: &Path, headers: &[String]) -> Result<Columns> {
    let locate = |name: &str| headers.iter().position(|header| header == name);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| locate(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(load_error(
            path,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let require = |name: &str| {
        locate(name).ok_or_else(|| load_error(path, format!("missing required column: {name}")))
    };
    Ok(Columns {
        template: require("Template")?,
        company: require("COMPANY")?,
        model: require("MODEL")?,
        year: require("YEAR")?,
        mats: require("MATS")?,
        clips: require("#Clips")?,
        clip_type: require("Type")?,
        forced: locate(FORCED_COLUMN),
    })
}

fn load_error(path: &Path, detail: String) -> PicklaneError {
    PicklaneError::CatalogLoad {
        path: path.to_path_buf(),
        detail,
    }
}

/// Trims a header cell and tolerates a UTF-8 BOM on the first column.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
