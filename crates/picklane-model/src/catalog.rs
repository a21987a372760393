//! Reference catalog: one row per product template, loaded once per run and
//! read-only afterwards.
//!
//! Boot-mat combination products share the catalog but live under reserved
//! template-key prefixes (`MS-`, with `BM-` as a second reserved family).
//! Matching always starts by picking the family partition for the title, so
//! the catalog precomputes both partitions and their lookup indexes up front.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One prepared catalog row.
///
/// Text columns arrive pre-normalized from the loader: `template`, `company`,
/// `model`, `year` and `clip_type` are trimmed and lowercased, `template_key`
/// is the canonical uppercase lookup form, and `forced_sku` is the trimmed,
/// lowercased override value (absent when the column is missing or blank).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub template: String,
    pub template_key: String,
    pub company: String,
    pub model: String,
    pub year: String,
    pub mats: String,
    pub clip_count: String,
    pub clip_type: String,
    pub forced_sku: Option<String>,
}

impl CatalogEntry {
    /// Boot-mat family rows carry the reserved `MS-` prefix.
    #[must_use]
    pub fn is_boot_mat(&self) -> bool {
        self.template.trim().to_uppercase().starts_with("MS-")
    }

    /// Rows reserved for either combination family, excluded from general
    /// matching.
    #[must_use]
    pub fn is_family_reserved(&self) -> bool {
        let key = self.template.trim().to_uppercase();
        key.starts_with("BM-") || key.starts_with("MS-")
    }
}

/// Which catalog partition a title selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    General,
    BootMat,
}

/// Row-order list plus first-row-wins lookup indexes for one partition.
#[derive(Debug, Default)]
struct FamilyIndex {
    rows: Vec<usize>,
    by_template: HashMap<String, usize>,
    by_forced: HashMap<String, usize>,
}

impl FamilyIndex {
    fn insert(&mut self, idx: usize, entry: &CatalogEntry) {
        self.rows.push(idx);
        // First row in catalog order wins duplicate keys.
        self.by_template
            .entry(entry.template_key.clone())
            .or_insert(idx);
        if let Some(forced) = &entry.forced_sku {
            self.by_forced.entry(forced.clone()).or_insert(idx);
        }
    }
}

/// The full prepared catalog with both family partitions indexed.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    general: FamilyIndex,
    boot_mat: FamilyIndex,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut general = FamilyIndex::default();
        let mut boot_mat = FamilyIndex::default();
        for (idx, entry) in entries.iter().enumerate() {
            if entry.is_boot_mat() {
                boot_mat.insert(idx, entry);
            }
            if !entry.is_family_reserved() {
                general.insert(idx, entry);
            }
        }
        Self {
            entries,
            general,
            boot_mat,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// View over one family partition.
    #[must_use]
    pub fn family(&self, family: Family) -> FamilyView<'_> {
        let index = match family {
            Family::General => &self.general,
            Family::BootMat => &self.boot_mat,
        };
        FamilyView {
            entries: &self.entries,
            index,
        }
    }
}

/// Borrowed view over one partition's rows and indexes.
#[derive(Debug, Clone, Copy)]
pub struct FamilyView<'a> {
    entries: &'a [CatalogEntry],
    index: &'a FamilyIndex,
}

impl<'a> FamilyView<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.rows.len()
    }

    /// Rows of this partition in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogEntry> + '_ {
        self.index.rows.iter().map(|&idx| &self.entries[idx])
    }

    /// First row whose normalized template key equals `key`.
    #[must_use]
    pub fn by_template_key(&self, key: &str) -> Option<&'a CatalogEntry> {
        self.index.by_template.get(key).map(|&idx| &self.entries[idx])
    }

    /// First row whose normalized forced-override SKU equals `key`.
    #[must_use]
    pub fn by_forced_sku(&self, key: &str) -> Option<&'a CatalogEntry> {
        self.index.by_forced.get(key).map(|&idx| &self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogEntry, Family};

    fn entry(template: &str, key: &str) -> CatalogEntry {
        CatalogEntry {
            template: template.to_string(),
            template_key: key.to_string(),
            company: "ford".to_string(),
            model: "focus".to_string(),
            year: "2010-2015".to_string(),
            mats: "4".to_string(),
            clip_count: "8".to_string(),
            clip_type: "oval".to_string(),
            forced_sku: None,
        }
    }

    #[test]
    fn partitions_by_template_prefix() {
        let catalog = Catalog::new(vec![
            entry("q227", "Q227"),
            entry("ms-q80", "MSQ80"),
            entry("bm-x5", "BMX5"),
        ]);
        assert_eq!(catalog.family(Family::General).len(), 1);
        assert_eq!(catalog.family(Family::BootMat).len(), 1);
        assert!(
            catalog
                .family(Family::General)
                .by_template_key("Q227")
                .is_some()
        );
        assert!(
            catalog
                .family(Family::General)
                .by_template_key("BMX5")
                .is_none()
        );
    }

    #[test]
    fn duplicate_template_keys_keep_first_row() {
        let mut first = entry("q227", "Q227");
        first.model = "first".to_string();
        let mut second = entry("q 227", "Q227");
        second.model = "second".to_string();
        let catalog = Catalog::new(vec![first, second]);
        let hit = catalog
            .family(Family::General)
            .by_template_key("Q227")
            .unwrap();
        assert_eq!(hit.model, "first");
    }

    #[test]
    fn forced_lookup_respects_partition() {
        let mut forced = entry("q227", "Q227");
        forced.forced_sku = Some("legacy-sku".to_string());
        let catalog = Catalog::new(vec![forced]);
        assert!(
            catalog
                .family(Family::General)
                .by_forced_sku("legacy-sku")
                .is_some()
        );
        assert!(
            catalog
                .family(Family::BootMat)
                .by_forced_sku("legacy-sku")
                .is_none()
        );
    }
}
