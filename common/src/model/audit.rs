use serde::{Deserialize, Serialize};

use crate::codec::pairs;
use crate::model::ids;
use crate::model::stock::StockCountMap;
use crate::model::store::Store;

/// A confirmed count for one store.
///
/// `store` is a value copy taken when the count was confirmed; editing the
/// actor's saved store list later does not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Time-derived id (decimal milliseconds at confirmation).
    #[serde(deserialize_with = "ids::deserialize_id")]
    pub id: String,
    pub store: Store,
    #[serde(with = "pairs", default)]
    pub stock_data: StockCountMap,
    #[serde(default)]
    pub timestamp: i64,
}

impl AuditRecord {
    pub fn new(id: String, store: Store, stock_data: StockCountMap, timestamp: i64) -> Self {
        Self {
            id,
            store,
            stock_data,
            timestamp,
        }
    }

    pub fn total_units(&self) -> u64 {
        self.stock_data.total_units()
    }

    pub fn bsrn(&self) -> &str {
        ids::canonical(&self.store.bsrn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_data_is_written_as_pairs() {
        let mut stock = StockCountMap::new();
        stock.set("SKU1", 3);
        let record = AuditRecord::new("1".into(), Store::new("Glow", "S1"), stock, 42);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["stockData"], serde_json::json!([["SKU1", 3]]));
        assert_eq!(json["timestamp"], 42);
    }

    #[test]
    fn object_shaped_stock_data_is_still_readable() {
        let record: AuditRecord = serde_json::from_str(
            r#"{"id":17,"store":{"id":"a","bsrn":"S1","name":"Glow"},"stockData":{"SKU1":3},"timestamp":1}"#,
        )
        .unwrap();
        assert_eq!(record.id, "17");
        assert_eq!(record.stock_data.get("SKU1"), 3);
    }
}
