//! Type-safe enumerations for match provenance and product attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a TemplateMatch was produced.
///
/// Ordered by precedence: a forced override beats the identifier path, which
/// beats the title fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// Manual per-SKU exception from the catalog's override column.
    Forced,
    /// Extracted identifier equals a normalized template key.
    Identifier,
    /// Manufacturer/model scoring over the title's vehicle detail.
    TitleFallback,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Forced => "forced",
            MatchMethod::Identifier => "identifier",
            MatchMethod::TitleFallback => "title-fallback",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Carpet material classification derived from the product title.
///
/// Serialized as the production floor's material codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarpetKind {
    /// Premium velour pile.
    #[serde(rename = "CTVEL")]
    Velour,
    /// Heavy-duty 5mm rubber.
    #[serde(rename = "RUBHD")]
    RubberHeavy,
    /// Standard rubber.
    #[serde(rename = "RUBSTD")]
    RubberStandard,
    /// Standard carpet stock.
    #[default]
    #[serde(rename = "CT65")]
    Standard,
}

impl CarpetKind {
    /// Material code as used on pick sheets.
    pub fn code(&self) -> &'static str {
        match self {
            CarpetKind::Velour => "CTVEL",
            CarpetKind::RubberHeavy => "RUBHD",
            CarpetKind::RubberStandard => "RUBSTD",
            CarpetKind::Standard => "CT65",
        }
    }
}

impl fmt::Display for CarpetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Shipping lane assigned by the categorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    /// Paid courier or multi-item consolidated order.
    Expedited,
    Standard,
}

impl Lane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Expedited => "expedited",
            Lane::Standard => "standard",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
