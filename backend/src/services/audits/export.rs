use crate::report;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use common::requests::AuditBatch;
use log::info;

pub async fn process(payload: web::Json<AuditBatch>) -> impl Responder {
    match export_batch(&payload, report::now_millis()) {
        Ok((file_name, bytes)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(attachment(file_name))
            .body(bytes),
        Err(e) => HttpResponse::BadRequest().body(e),
    }
}

pub(crate) fn attachment(file_name: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file_name)],
    }
}

/// A single-store batch is named after the store, anything else after the
/// session.
pub fn export_batch(batch: &AuditBatch, now: i64) -> Result<(String, Vec<u8>), String> {
    let rows = report::rows_from_batch(batch);
    if rows.is_empty() {
        return Err("Nothing to export: no product has a count above zero".to_string());
    }
    let label = match batch.audits.as_slice() {
        [single] => single.store.name.as_str(),
        _ => "Session",
    };
    let bytes = report::to_csv(&rows)?;
    info!(
        "exported {} rows for {} stores by {}",
        rows.len(),
        batch.audits.len(),
        batch.actor_info.name
    );
    Ok((report::file_name(label, now), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use common::model::actor::{ActorInfo, Role};
    use common::model::audit::AuditRecord;
    use common::model::stock::StockCountMap;
    use common::model::store::Store;

    fn batch(counts: &[(&str, u32)]) -> AuditBatch {
        let stock: StockCountMap = counts.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        AuditBatch {
            actor_info: ActorInfo::new("Asha", "North", Role::Ba),
            audits: vec![AuditRecord::new("1".into(), Store::new("Glow", "S1"), stock, 0)],
            catalog: Vec::new(),
        }
    }

    #[test]
    fn single_store_export_is_named_after_the_store() {
        let (name, bytes) = export_batch(&batch(&[("NH001", 4)]), 0).unwrap();
        assert_eq!(name, "SOH_Glow_1970-01-01.csv");
        assert!(String::from_utf8(bytes).unwrap().contains("NH001"));
    }

    #[test]
    fn all_zero_batch_is_rejected() {
        assert!(export_batch(&batch(&[("NH001", 0)]), 0).is_err());
    }

    #[actix_web::test]
    async fn endpoint_answers_csv_attachment() {
        let app = actix_test::init_service(App::new().route("/export", web::post().to(process))).await;
        let req = actix_test::TestRequest::post()
            .uri("/export")
            .set_json(batch(&[("NH001", 4)]))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let disposition = resp
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.starts_with("attachment"));

        let req = actix_test::TestRequest::post()
            .uri("/export")
            .set_json(batch(&[]))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }
}
