//! Identifier normalization.
//!
//! Ids reach the core from three places: freshly generated in memory, read
//! back from the persisted session blob, and decoded from a share code typed
//! on another device. Older blobs wrote some ids as JSON numbers, so every
//! comparison goes through [`canonical`] and every id field deserializes
//! through [`deserialize_id`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Canonical string form of an identifier.
pub fn canonical(raw: &str) -> &str {
    raw.trim()
}

/// Compares two identifiers by their canonical form.
pub fn same_id(a: &str, b: &str) -> bool {
    canonical(a) == canonical(b)
}

/// Renders a JSON number the way it was most likely typed: integers without a
/// fractional part, even when they round-tripped through a float.
pub fn number_to_id(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Reads an identifier out of an arbitrary JSON value.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_id(n)),
        _ => None,
    }
}

/// Serde helper for id fields that may have been written as numbers.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom("expected a string or numeric identifier"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_compare_equal_after_normalizing() {
        let from_blob = id_from_value(&json!(1718000000000u64)).unwrap();
        assert!(same_id(&from_blob, " 1718000000000 "));
    }

    #[test]
    fn whole_floats_lose_their_fraction() {
        let from_blob = id_from_value(&json!(1718000000000.0)).unwrap();
        assert_eq!(from_blob, "1718000000000");
    }

    #[test]
    fn objects_are_not_identifiers() {
        assert_eq!(id_from_value(&json!({"id": 1})), None);
        assert_eq!(id_from_value(&Value::Null), None);
    }
}
