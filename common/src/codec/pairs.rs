//! Pair-list encoding for [`StockCountMap`].
//!
//! JSON objects do not keep key order and older blobs were written by hand
//! rolled code, so the canonical form is an ordered list of `[sku, count]`
//! pairs. Reading is lenient: a plain `{sku: count}` object is accepted, and
//! individual entries that cannot be read as a non-negative integer count are
//! skipped instead of failing the whole document. A skipped entry reads as
//! zero, which is what an absent key means anyway.
//!
//! Use with `#[serde(with = "pairs")]`.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::model::ids;
use crate::model::stock::StockCountMap;

pub fn serialize<S>(map: &StockCountMap, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(map.len()))?;
    for (sku, count) in map.iter() {
        seq.serialize_element(&(sku, count))?;
    }
    seq.end()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<StockCountMap, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value(&value))
}

/// Reads a stock map from either accepted shape.
pub fn from_value(value: &Value) -> StockCountMap {
    match value {
        Value::Array(items) => items.iter().filter_map(pair_from_value).collect(),
        Value::Object(entries) => {
            log::debug!("stock data stored as an object, reading it as key/value pairs");
            entries
                .iter()
                .filter_map(|(sku, count)| coerce_count(count).map(|c| (sku.clone(), c)))
                .collect()
        }
        Value::Null => StockCountMap::new(),
        other => {
            log::warn!("ignoring stock data of unexpected shape: {other}");
            StockCountMap::new()
        }
    }
}

fn pair_from_value(item: &Value) -> Option<(String, u32)> {
    let pair = item.as_array()?;
    if pair.len() != 2 {
        log::warn!("skipping malformed stock entry: {item}");
        return None;
    }
    let sku = ids::id_from_value(&pair[0])?;
    let count = coerce_count(&pair[1])?;
    Some((sku, count))
}

/// Reads a count, accepting whole floats and numeric strings. Negative,
/// fractional and out-of-range values are rejected.
pub fn coerce_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else if n.as_i64().is_some() {
                None
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .filter(|f| *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    if count.is_none() {
        log::warn!("skipping unreadable stock count: {value}");
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pair_lists_keep_zero_entries() {
        let map = from_value(&json!([["SKU1", 3], ["SKU2", 0]]));
        assert_eq!(map.get("SKU1"), 3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn object_shape_is_accepted_as_a_fallback() {
        let map = from_value(&json!({"SKU1": 3, "SKU2": "4"}));
        assert_eq!(map.get("SKU1"), 3);
        assert_eq!(map.get("SKU2"), 4);
    }

    #[test]
    fn bad_entries_are_skipped_not_fatal() {
        let map = from_value(&json!([
            ["SKU1", -2],
            ["SKU2", 1.5],
            ["SKU3"],
            "SKU4",
            [{"x": 1}, 2],
            ["SKU5", 2.0],
            [77, 1]
        ]));
        assert_eq!(map.get("SKU1"), 0);
        assert_eq!(map.get("SKU5"), 2);
        assert_eq!(map.get("77"), 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn scalars_read_as_empty() {
        assert!(from_value(&json!("nope")).is_empty());
        assert!(from_value(&Value::Null).is_empty());
    }

    #[test]
    fn counts_beyond_u32_are_rejected() {
        assert_eq!(coerce_count(&json!(5_000_000_000u64)), None);
        assert_eq!(coerce_count(&json!(true)), None);
    }
}
