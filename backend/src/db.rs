//! SQLite storage for synced submissions.
//!
//! Each handler opens its own connection through [`open`], which creates the
//! schema on first use. Every row carries an md5 checksum of who counted
//! which store and what was counted, so syncing the same batch twice stores
//! it once.

use common::codec::pairs;
use common::model::actor::Role;
use common::model::submission::Submission;
use log::warn;
use rusqlite::{params, Connection};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS submissions (
    submission_id TEXT PRIMARY KEY,
    bde_name      TEXT NOT NULL,
    region        TEXT NOT NULL,
    role          TEXT NOT NULL,
    store_name    TEXT NOT NULL,
    store_id      TEXT NOT NULL,
    audit_id      TEXT NOT NULL,
    stock_data    TEXT NOT NULL,
    total_qty     INTEGER NOT NULL,
    timestamp     INTEGER NOT NULL,
    date_string   TEXT NOT NULL,
    checksum      TEXT NOT NULL UNIQUE
);
CREATE INDEX IF NOT EXISTS submissions_by_time ON submissions (timestamp DESC);
";

pub fn open(path: &Path) -> Result<Connection, String> {
    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
    Ok(conn)
}

fn checksum(submission: &Submission, stock_json: &str) -> String {
    let key = format!(
        "{}|{}|{}|{}|{}",
        submission.bde_name.trim(),
        submission.role,
        submission.store_id.trim(),
        submission.audit_id.trim(),
        stock_json
    );
    format!("{:x}", md5::compute(key))
}

/// Inserts the submissions in one transaction and returns how many were new.
pub fn insert_submissions(conn: &mut Connection, submissions: &[Submission]) -> Result<usize, String> {
    let tx = conn.transaction().map_err(|e| e.to_string())?;
    let mut stored = 0;
    {
        let mut stmt = tx
            .prepare(
                "INSERT OR IGNORE INTO submissions (
                    submission_id, bde_name, region, role, store_name, store_id,
                    audit_id, stock_data, total_qty, timestamp, date_string, checksum
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )
            .map_err(|e| e.to_string())?;
        for submission in submissions {
            let stock_json =
                serde_json::to_string(&submission.stock_data.to_pairs()).map_err(|e| e.to_string())?;
            let total_qty = i64::try_from(submission.total_qty).map_err(|e| e.to_string())?;
            stored += stmt
                .execute(params![
                    &submission.submission_id,
                    &submission.bde_name,
                    &submission.region,
                    submission.role.label(),
                    &submission.store_name,
                    &submission.store_id,
                    &submission.audit_id,
                    &stock_json,
                    total_qty,
                    submission.timestamp,
                    &submission.date_string,
                    checksum(submission, &stock_json),
                ])
                .map_err(|e| e.to_string())?;
        }
    }
    tx.commit().map_err(|e| e.to_string())?;
    Ok(stored)
}

struct SubmissionRow {
    submission_id: String,
    bde_name: String,
    region: String,
    role: String,
    store_name: String,
    store_id: String,
    audit_id: String,
    stock_data: String,
    total_qty: i64,
    timestamp: i64,
    date_string: String,
}

impl SubmissionRow {
    fn into_submission(self) -> Option<Submission> {
        let Some(role) = Role::from_label(&self.role) else {
            warn!("skipping submission {} with unknown role {:?}", self.submission_id, self.role);
            return None;
        };
        let stock_data = match serde_json::from_str::<serde_json::Value>(&self.stock_data) {
            Ok(value) => pairs::from_value(&value),
            Err(e) => {
                warn!("submission {} has unreadable stock data: {}", self.submission_id, e);
                return None;
            }
        };
        Some(Submission {
            submission_id: self.submission_id,
            bde_name: self.bde_name,
            region: self.region,
            role,
            store_name: self.store_name,
            store_id: self.store_id,
            audit_id: self.audit_id,
            stock_data,
            total_qty: u64::try_from(self.total_qty).unwrap_or(0),
            timestamp: self.timestamp,
            date_string: self.date_string,
        })
    }
}

/// All submissions, newest first. `role: None` lists every role.
pub fn list_submissions(conn: &Connection, role: Option<Role>) -> Result<Vec<Submission>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT submission_id, bde_name, region, role, store_name, store_id,
                    audit_id, stock_data, total_qty, timestamp, date_string
             FROM submissions
             WHERE ?1 IS NULL OR role = ?1
             ORDER BY timestamp DESC, rowid DESC",
        )
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params![role.map(Role::label)], |row| {
            Ok(SubmissionRow {
                submission_id: row.get(0)?,
                bde_name: row.get(1)?,
                region: row.get(2)?,
                role: row.get(3)?,
                store_name: row.get(4)?,
                store_id: row.get(5)?,
                audit_id: row.get(6)?,
                stock_data: row.get(7)?,
                total_qty: row.get(8)?,
                timestamp: row.get(9)?,
                date_string: row.get(10)?,
            })
        })
        .map_err(|e| e.to_string())?;

    let mut submissions = Vec::new();
    for row in rows {
        let row = row.map_err(|e| e.to_string())?;
        if let Some(submission) = row.into_submission() {
            submissions.push(submission);
        }
    }
    Ok(submissions)
}

/// Returns false when no submission had that id.
pub fn delete_submission(conn: &Connection, submission_id: &str) -> Result<bool, String> {
    let deleted = conn
        .execute(
            "DELETE FROM submissions WHERE submission_id = ?1",
            params![submission_id.trim()],
        )
        .map_err(|e| e.to_string())?;
    Ok(deleted > 0)
}
