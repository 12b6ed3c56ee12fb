use crate::config::ServerConfig;
use crate::{db, report};
use actix_web::{web, HttpResponse, Responder};
use common::model::submission::Submission;
use common::requests::{AuditBatch, SyncResponse};
use log::{info, warn};
use std::path::Path;
use uuid::Uuid;

pub async fn process(
    config: web::Data<ServerConfig>,
    payload: web::Json<AuditBatch>,
) -> impl Responder {
    let batch = payload.into_inner();
    if batch.actor_info.name.trim().is_empty() {
        return HttpResponse::BadRequest().body("The batch has no actor name");
    }
    let db_path = config.db_path.clone();
    let result = web::block(move || sync_batch(&db_path, &batch, report::now_millis())).await;
    match result {
        Ok(Ok(stored)) => HttpResponse::Ok().json(SyncResponse { stored }),
        Ok(Err(e)) => {
            warn!("sync failed: {}", e);
            HttpResponse::ServiceUnavailable().body(format!("Error syncing audits: {}", e))
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Flattens the batch into submissions stamped with `received_at` and
/// stores the ones not seen before.
pub fn sync_batch(db_path: &Path, batch: &AuditBatch, received_at: i64) -> Result<usize, String> {
    let date = report::date_string(received_at);
    let submissions: Vec<Submission> = batch
        .audits
        .iter()
        .map(|audit| {
            Submission::from_audit(
                Uuid::new_v4().to_string(),
                &batch.actor_info,
                audit,
                received_at,
                date.clone(),
            )
        })
        .collect();

    let mut conn = db::open(db_path)?;
    let stored = db::insert_submissions(&mut conn, &submissions)?;
    info!(
        "{} synced {} audits ({} new, {} units)",
        batch.actor_info.name,
        submissions.len(),
        stored,
        batch.total_units()
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::actor::{ActorInfo, Role};
    use common::model::audit::AuditRecord;
    use common::model::stock::StockCountMap;
    use common::model::store::Store;

    #[test]
    fn resync_stores_nothing_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audits.sqlite");
        let stock: StockCountMap = [("NH001".to_string(), 2)].into_iter().collect();
        let batch = AuditBatch {
            actor_info: ActorInfo::new("Asha", "North", Role::Bde),
            audits: vec![
                AuditRecord::new("1".into(), Store::new("Glow", "S1"), stock.clone(), 1),
                AuditRecord::new("2".into(), Store::new("Shine", "S2"), stock, 2),
            ],
            catalog: Vec::new(),
        };

        assert_eq!(sync_batch(&path, &batch, 1_000).unwrap(), 2);
        assert_eq!(sync_batch(&path, &batch, 2_000).unwrap(), 0);

        let conn = db::open(&path).unwrap();
        let stored = db::list_submissions(&conn, None).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|s| s.date_string == "1970-01-01"));
    }
}
