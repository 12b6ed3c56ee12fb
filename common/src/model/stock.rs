use std::collections::BTreeMap;

/// Counted units per SKU id for one store.
///
/// Counts are `u32`, so a negative count cannot be represented. A SKU that is
/// absent counts as zero, but an explicit zero is kept: it records that the
/// counter looked at the shelf and found nothing.
///
/// The type has no `Serialize`/`Deserialize` impl. Every text
/// boundary goes through [`crate::codec::pairs`], which writes an ordered list
/// of `[sku, count]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockCountMap(BTreeMap<String, u32>);

impl StockCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sku: &str) -> u32 {
        self.0.get(sku).copied().unwrap_or(0)
    }

    pub fn set(&mut self, sku: &str, count: u32) {
        self.0.insert(sku.to_string(), count);
    }

    pub fn increment(&mut self, sku: &str) {
        let next = self.get(sku).saturating_add(1);
        self.set(sku, next);
    }

    /// Decrements, stopping at zero.
    pub fn decrement(&mut self, sku: &str) {
        let next = self.get(sku).saturating_sub(1);
        self.set(sku, next);
    }

    /// No entry at all, not even an explicit zero.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries with a count above zero, in SKU order.
    pub fn positive(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter().filter(|(_, count)| *count > 0)
    }

    /// Copy keeping only the positive entries.
    pub fn filled(&self) -> StockCountMap {
        self.positive().map(|(k, v)| (k.to_string(), v)).collect()
    }

    /// Number of SKUs with at least one unit.
    pub fn filled_count(&self) -> usize {
        self.positive().count()
    }

    pub fn total_units(&self) -> u64 {
        self.0.values().map(|&v| u64::from(v)).sum()
    }

    pub fn to_pairs(&self) -> Vec<(String, u32)> {
        self.0.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Overlays `other` on top of `self`; counts in `other` win.
    pub fn merge(&mut self, other: &StockCountMap) {
        for (sku, count) in other.iter() {
            self.set(sku, count);
        }
    }

    /// SKUs whose count differs between the two maps, as
    /// `(sku, count_in_self, count_in_other)`. Absent keys read as zero, so an
    /// explicit zero on one side and a missing key on the other is no change.
    pub fn diff(&self, other: &StockCountMap) -> Vec<(String, u32, u32)> {
        let mut keys: Vec<&String> = self.0.keys().chain(other.0.keys()).collect();
        keys.sort();
        keys.dedup();
        keys.into_iter()
            .filter_map(|k| {
                let (a, b) = (self.get(k), other.get(k));
                (a != b).then(|| (k.clone(), a, b))
            })
            .collect()
    }
}

impl FromIterator<(String, u32)> for StockCountMap {
    /// Later pairs win over earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u32)]) -> StockCountMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn absent_keys_read_as_zero_and_zero_is_kept() {
        let mut counts = StockCountMap::new();
        assert_eq!(counts.get("SKU1"), 0);
        counts.set("SKU1", 0);
        assert!(!counts.is_empty());
        assert_eq!(counts.filled_count(), 0);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut counts = StockCountMap::new();
        counts.decrement("SKU1");
        assert_eq!(counts.get("SKU1"), 0);
        counts.increment("SKU1");
        counts.increment("SKU1");
        counts.decrement("SKU1");
        assert_eq!(counts.get("SKU1"), 1);
    }

    #[test]
    fn totals_and_filled_ignore_zero_entries() {
        let counts = map(&[("SKU1", 3), ("SKU2", 0), ("SKU3", 4)]);
        assert_eq!(counts.total_units(), 7);
        assert_eq!(counts.filled_count(), 2);
        assert_eq!(counts.filled(), map(&[("SKU1", 3), ("SKU3", 4)]));
    }

    #[test]
    fn merge_lets_the_other_side_win() {
        let mut base = map(&[("SKU1", 3), ("SKU2", 1)]);
        base.merge(&map(&[("SKU1", 5), ("SKU9", 2)]));
        assert_eq!(base, map(&[("SKU1", 5), ("SKU2", 1), ("SKU9", 2)]));
    }

    #[test]
    fn diff_treats_missing_and_zero_alike() {
        let before = map(&[("SKU1", 3), ("SKU2", 0)]);
        let after = map(&[("SKU1", 5), ("SKU3", 1)]);
        assert_eq!(
            before.diff(&after),
            vec![("SKU1".to_string(), 3, 5), ("SKU3".to_string(), 0, 1)]
        );
    }
}
