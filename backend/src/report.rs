//! CSV reports for the export endpoints.
//!
//! One row per counted product. Only counts above zero are exported; a row
//! whose SKU is not in the catalog still goes out, with its code standing in
//! for the name.

use chrono::{DateTime, Utc};
use common::model::sku::{find_sku, Sku};
use common::model::submission::Submission;
use common::requests::AuditBatch;

pub const HEADERS: [&str; 11] = [
    "Date",
    "BDE Name",
    "Region",
    "Role",
    "Store Name",
    "Store Id",
    "Product Code",
    "Product Name",
    "Category",
    "Type",
    "Stock Count",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub bde_name: String,
    pub region: String,
    pub role: String,
    pub store_name: String,
    pub store_id: String,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub sku_type: String,
    pub count: u32,
}

impl ReportRow {
    fn fields(&self) -> [String; 11] {
        [
            self.date.clone(),
            self.bde_name.clone(),
            self.region.clone(),
            self.role.clone(),
            self.store_name.clone(),
            self.store_id.clone(),
            self.product_code.clone(),
            self.product_name.clone(),
            self.category.clone(),
            self.sku_type.clone(),
            self.count.to_string(),
        ]
    }
}

/// `YYYY-MM-DD` (UTC) of a millisecond timestamp. Out-of-range values
/// render as an empty string.
pub fn date_string(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

struct ProductColumns {
    name: String,
    category: String,
    sku_type: String,
}

fn product_columns(catalog: &[Sku], code: &str) -> ProductColumns {
    match find_sku(catalog, code) {
        Some(sku) => ProductColumns {
            name: sku.name.clone(),
            category: sku.category.label().to_string(),
            sku_type: sku.sku_type.label().to_string(),
        },
        None => ProductColumns {
            name: code.to_string(),
            category: String::new(),
            sku_type: String::new(),
        },
    }
}

pub fn rows_from_batch(batch: &AuditBatch) -> Vec<ReportRow> {
    let actor = &batch.actor_info;
    let mut rows = Vec::new();
    for audit in &batch.audits {
        let date = date_string(audit.timestamp);
        for (code, count) in audit.stock_data.positive() {
            let product = product_columns(&batch.catalog, code);
            rows.push(ReportRow {
                date: date.clone(),
                bde_name: actor.name.clone(),
                region: actor.region.clone(),
                role: actor.role.label().to_string(),
                store_name: audit.store.name.clone(),
                store_id: audit.store.bsrn.clone(),
                product_code: code.to_string(),
                product_name: product.name,
                category: product.category,
                sku_type: product.sku_type,
                count,
            });
        }
    }
    rows
}

pub fn rows_from_submissions(submissions: &[Submission], catalog: &[Sku]) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for submission in submissions {
        for (code, count) in submission.stock_data.positive() {
            let product = product_columns(catalog, code);
            rows.push(ReportRow {
                date: submission.date_string.clone(),
                bde_name: submission.bde_name.clone(),
                region: submission.region.clone(),
                role: submission.role.label().to_string(),
                store_name: submission.store_name.clone(),
                store_id: submission.store_id.clone(),
                product_code: code.to_string(),
                product_name: product.name,
                category: product.category,
                sku_type: product.sku_type,
                count,
            });
        }
    }
    rows
}

pub fn to_csv(rows: &[ReportRow]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(|e| e.to_string())?;
    for row in rows {
        writer.write_record(row.fields()).map_err(|e| e.to_string())?;
    }
    writer.into_inner().map_err(|e| e.to_string())
}

/// `SOH_<label>_<date>.csv`, with anything but letters and digits in the
/// label turned into `_`.
pub fn file_name(label: &str, millis: i64) -> String {
    let label: String = label
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let label = if label.is_empty() { "Session".to_string() } else { label };
    format!("SOH_{}_{}.csv", label, date_string(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::actor::{ActorInfo, Role};
    use common::model::audit::AuditRecord;
    use common::model::stock::StockCountMap;
    use common::model::store::Store;

    fn batch() -> AuditBatch {
        let stock: StockCountMap = [
            ("SKU1".to_string(), 3),
            ("SKU2".to_string(), 0),
            ("ODD".to_string(), 2),
        ]
        .into_iter()
        .collect();
        AuditBatch {
            actor_info: ActorInfo::new("Asha", "North", Role::Bde),
            audits: vec![AuditRecord::new(
                "1".into(),
                Store::new("Glow, Main St", "S1"),
                stock,
                1_767_225_600_000,
            )],
            catalog: vec![
                Sku::custom("SKU1", "Serum").unwrap(),
                Sku::custom("SKU2", "Cream").unwrap(),
            ],
        }
    }

    #[test]
    fn zero_counts_are_left_out() {
        let rows = rows_from_batch(&batch());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.count > 0));
        let odd = rows.iter().find(|r| r.product_code == "ODD").unwrap();
        assert_eq!(odd.product_name, "ODD");
        let serum = rows.iter().find(|r| r.product_code == "SKU1").unwrap();
        assert_eq!(serum.sku_type, "Custom");
        assert_eq!(serum.date, "2026-01-01");
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let bytes = to_csv(&rows_from_batch(&batch())).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), HEADERS.join(","));
        assert!(text.contains("\"Glow, Main St\""));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn file_names_are_safe() {
        assert_eq!(file_name("Glow / Main", 0), "SOH_Glow___Main_1970-01-01.csv");
        assert_eq!(file_name("  ", 0), "SOH_Session_1970-01-01.csv");
    }
}
