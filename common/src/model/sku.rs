//! Product catalog entries.
//!
//! The built-in catalog ships inside the binary as `catalog/skus.json`. A
//! session can append `Custom` entries for products that are on the shelf but
//! not in the catalog; those travel with the session blob and are never
//! edited or removed afterwards.

use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../catalog/skus.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuType {
    Natural,
    Professional,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuCategory {
    Hair,
    Skin,
    Body,
    Gifting,
    Other,
}

impl SkuCategory {
    pub fn label(self) -> &'static str {
        match self {
            SkuCategory::Hair => "Hair",
            SkuCategory::Skin => "Skin",
            SkuCategory::Body => "Body",
            SkuCategory::Gifting => "Gifting",
            SkuCategory::Other => "Other",
        }
    }
}

impl SkuType {
    pub fn label(self) -> &'static str {
        match self {
            SkuType::Natural => "Natural",
            SkuType::Professional => "Professional",
            SkuType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sku_type: SkuType,
    pub category: SkuCategory,
}

impl Sku {
    /// Builds a session-local SKU from the "new item" form. The code is
    /// upper-cased so it matches however the counter typed it later.
    pub fn custom(code: &str, name: &str) -> Option<Self> {
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            id: code.to_uppercase(),
            name: name.to_string(),
            sku_type: SkuType::Custom,
            category: SkuCategory::Other,
        })
    }
}

/// Parses the catalog embedded at build time. A broken catalog file leaves the
/// app usable with custom SKUs only.
pub fn builtin_catalog() -> Vec<Sku> {
    match serde_json::from_str(BUILTIN_CATALOG) {
        Ok(skus) => skus,
        Err(e) => {
            log::warn!("built-in SKU catalog is unreadable: {e}");
            Vec::new()
        }
    }
}

/// Looks a SKU up by id in `skus`.
pub fn find_sku<'a>(skus: &'a [Sku], id: &str) -> Option<&'a Sku> {
    skus.iter().find(|sku| sku.id == id)
}
