//! The session's set of confirmed store counts.
//!
//! Records are kept in confirmation order and keyed by the store's bsrn: a
//! store picked again from the saved list, or re-imported from another
//! device, usually carries a different local id than its earlier audit, so
//! the local id cannot be the key. Lookups by id compare canonical strings
//! because ids read back from the session blob may have been numbers.
//!
//! Nothing here fails. A missing record is a normal `None`/no-op and the
//! caller decides whether that is worth telling the user about.

use crate::model::audit::AuditRecord;
use crate::model::ids;

/// Whether an upsert added a store or replaced an earlier count for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Aggregates shown on the dashboard and the session review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub store_count: usize,
    pub total_units: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditRepository {
    records: Vec<AuditRecord>,
}

impl AuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from records read back from storage. Duplicated
    /// bsrns collapse onto the first position, later records winning.
    pub fn from_records(records: impl IntoIterator<Item = AuditRecord>) -> Self {
        let mut repo = Self::new();
        for record in records {
            repo.upsert(record);
        }
        repo
    }

    /// Inserts `record`, or replaces the record for the same bsrn in place.
    pub fn upsert(&mut self, record: AuditRecord) -> Upsert {
        match self
            .records
            .iter()
            .position(|existing| existing.store.same_store(&record.store))
        {
            Some(index) => {
                self.records[index] = record;
                Upsert::Replaced
            }
            None => {
                self.records.push(record);
                Upsert::Inserted
            }
        }
    }

    /// Removes the record with `record_id`, returning it if it was there.
    pub fn remove(&mut self, record_id: &str) -> Option<AuditRecord> {
        let index = self
            .records
            .iter()
            .position(|r| ids::same_id(&r.id, record_id))?;
        Some(self.records.remove(index))
    }

    pub fn find_by_record_id(&self, record_id: &str) -> Option<&AuditRecord> {
        self.records.iter().find(|r| ids::same_id(&r.id, record_id))
    }

    /// Lookup by the store's local id.
    pub fn find_by_store_id(&self, store_id: &str) -> Option<&AuditRecord> {
        self.records
            .iter()
            .find(|r| ids::same_id(&r.store.id, store_id))
    }

    pub fn find_by_bsrn(&self, bsrn: &str) -> Option<&AuditRecord> {
        self.records.iter().find(|r| r.store.has_bsrn(bsrn))
    }

    pub fn contains_record_id(&self, record_id: &str) -> bool {
        self.find_by_record_id(record_id).is_some()
    }

    pub fn totals(&self) -> Totals {
        Totals {
            store_count: self.records.len(),
            total_units: self.records.iter().map(AuditRecord::total_units).sum(),
        }
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records.iter()
    }

    /// Canonical bsrns of every audited store, for marking stores as done in
    /// the store picker.
    pub fn bsrns(&self) -> Vec<String> {
        self.records.iter().map(|r| r.bsrn().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stock::StockCountMap;
    use crate::model::store::Store;

    fn record(id: &str, store_id: &str, bsrn: &str, counts: &[(&str, u32)]) -> AuditRecord {
        let stock: StockCountMap = counts.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let store = Store {
            id: store_id.into(),
            bsrn: bsrn.into(),
            name: format!("Store {bsrn}"),
            location: None,
        };
        AuditRecord::new(id.into(), store, stock, 0)
    }

    #[test]
    fn upsert_replaces_by_bsrn_even_when_local_ids_differ() {
        let mut repo = AuditRepository::new();
        assert_eq!(repo.upsert(record("1", "local-a", "S1", &[("SKU1", 3)])), Upsert::Inserted);
        assert_eq!(repo.upsert(record("2", "S2", "S2", &[("SKU1", 1)])), Upsert::Inserted);
        assert_eq!(
            repo.upsert(record("3", "local-b", " S1 ", &[("SKU1", 5)])),
            Upsert::Replaced
        );

        assert_eq!(repo.len(), 2);
        // Position of the replaced record is preserved.
        assert_eq!(repo.records()[0].id, "3");
        assert_eq!(repo.records()[0].stock_data.get("SKU1"), 5);
        assert_eq!(repo.records()[1].id, "2");
    }

    #[test]
    fn upsert_is_idempotent_for_an_unchanged_record() {
        let mut repo = AuditRepository::new();
        let r = record("1", "a", "S1", &[("SKU1", 3)]);
        repo.upsert(r.clone());
        let snapshot = repo.clone();
        repo.upsert(r);
        assert_eq!(repo, snapshot);
    }

    #[test]
    fn remove_then_find_is_absent_including_unknown_ids() {
        let mut repo = AuditRepository::new();
        repo.upsert(record("1718000000000", "a", "S1", &[]));
        assert!(repo.remove(" 1718000000000").is_some());
        assert!(repo.find_by_record_id("1718000000000").is_none());

        assert!(repo.remove("never-existed").is_none());
        assert!(repo.find_by_record_id("never-existed").is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn lookups_normalize_identifiers() {
        let mut repo = AuditRepository::new();
        repo.upsert(record("42", "1717", "S1", &[]));
        assert!(repo.find_by_record_id(" 42 ").is_some());
        assert!(repo.find_by_store_id("1717").is_some());
        assert!(repo.find_by_bsrn("S1 ").is_some());
        assert!(repo.find_by_store_id("S1").is_none());
    }

    #[test]
    fn totals_sum_every_count() {
        let mut repo = AuditRepository::new();
        repo.upsert(record("1", "a", "S1", &[("SKU1", 3), ("SKU2", 0)]));
        repo.upsert(record("2", "b", "S2", &[("SKU1", 2), ("SKU3", 7)]));
        assert_eq!(
            repo.totals(),
            Totals {
                store_count: 2,
                total_units: 12
            }
        );
        assert_eq!(AuditRepository::new().totals(), Totals::default());
    }

    #[test]
    fn from_records_collapses_duplicate_bsrns() {
        let repo = AuditRepository::from_records(vec![
            record("1", "a", "S1", &[("SKU1", 1)]),
            record("2", "b", "S2", &[]),
            record("3", "c", "S1", &[("SKU1", 9)]),
        ]);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_bsrn("S1").map(|r| r.id.as_str()), Some("3"));
        assert_eq!(repo.bsrns(), vec!["S1".to_string(), "S2".to_string()]);
    }
}
