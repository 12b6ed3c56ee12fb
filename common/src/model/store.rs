use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ids;

/// A retail outlet that gets audited.
///
/// `bsrn` is the business key printed on the store's paperwork; `id` is only
/// meaningful on the device that created the entry. Two `Store` values with
/// different ids but the same bsrn are the same physical store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Locally generated identifier (UUID for new entries, legacy blobs used
    /// millisecond timestamps).
    #[serde(deserialize_with = "ids::deserialize_id")]
    pub id: String,
    /// Externally meaningful unique store code.
    #[serde(deserialize_with = "ids::deserialize_id")]
    pub bsrn: String,
    /// Display name of the retailer.
    pub name: String,
    /// Free-form location, kept for entries saved by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Store {
    /// Creates a store entered by hand, with a fresh local id.
    pub fn new(name: &str, bsrn: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bsrn: bsrn.trim().to_string(),
            name: name.trim().to_string(),
            location: None,
        }
    }

    /// True when both values describe the same physical store.
    pub fn same_store(&self, other: &Store) -> bool {
        ids::same_id(&self.bsrn, &other.bsrn)
    }

    /// True when `bsrn` identifies this store.
    pub fn has_bsrn(&self, bsrn: &str) -> bool {
        ids::same_id(&self.bsrn, bsrn)
    }
}
