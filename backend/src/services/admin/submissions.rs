use super::authorize;
use crate::config::ServerConfig;
use crate::db;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{AdminDelete, AdminQuery, SubmissionList};
use log::info;

pub async fn list(config: web::Data<ServerConfig>, payload: web::Json<AdminQuery>) -> impl Responder {
    let query = payload.into_inner();
    if let Err(denied) = authorize(&config, &query.credentials) {
        return denied;
    }
    let db_path = config.db_path.clone();
    let result = web::block(move || {
        let conn = db::open(&db_path)?;
        db::list_submissions(&conn, query.role)
    })
    .await;
    match result {
        Ok(Ok(submissions)) => HttpResponse::Ok().json(SubmissionList { submissions }),
        Ok(Err(e)) => HttpResponse::ServiceUnavailable().body(format!("Error listing submissions: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub async fn delete(config: web::Data<ServerConfig>, payload: web::Json<AdminDelete>) -> impl Responder {
    let request = payload.into_inner();
    if let Err(denied) = authorize(&config, &request.credentials) {
        return denied;
    }
    let db_path = config.db_path.clone();
    let submission_id = request.submission_id.clone();
    let result = web::block(move || {
        let conn = db::open(&db_path)?;
        db::delete_submission(&conn, &submission_id)
    })
    .await;
    match result {
        Ok(Ok(true)) => {
            info!("deleted submission {}", request.submission_id);
            HttpResponse::Ok().finish()
        }
        Ok(Ok(false)) => HttpResponse::NotFound().body("Submission not found"),
        Ok(Err(e)) => HttpResponse::ServiceUnavailable().body(format!("Error deleting submission: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::audits::sync::sync_batch;
    use actix_web::{test as actix_test, App};
    use common::model::actor::{ActorInfo, Role};
    use common::model::audit::AuditRecord;
    use common::model::stock::StockCountMap;
    use common::model::store::Store;
    use common::requests::{AdminCredentials, AuditBatch};
    use serde_json::json;

    fn config(dir: &tempfile::TempDir) -> ServerConfig {
        ServerConfig {
            db_path: dir.path().join("audits.sqlite"),
            admin_password: "pw".into(),
            ..ServerConfig::default()
        }
    }

    fn seed(config: &ServerConfig, role: Role, bsrn: &str) {
        let stock: StockCountMap = [("NH001".to_string(), 1)].into_iter().collect();
        let batch = AuditBatch {
            actor_info: ActorInfo::new("Asha", "North", role),
            audits: vec![AuditRecord::new(bsrn.into(), Store::new("Glow", bsrn), stock, 1)],
            catalog: Vec::new(),
        };
        sync_batch(&config.db_path, &batch, 5).unwrap();
    }

    #[actix_web::test]
    async fn listing_needs_valid_credentials_and_filters_by_role() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        seed(&config, Role::Bde, "S1");
        seed(&config, Role::Ba, "S2");

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(config.clone()))
                .route("/submissions", web::post().to(list)),
        )
        .await;

        let denied = actix_test::TestRequest::post()
            .uri("/submissions")
            .set_json(json!({"credentials": {"adminId": "admin", "password": "nope"}}))
            .to_request();
        assert_eq!(actix_test::call_service(&app, denied).await.status().as_u16(), 401);

        let req = actix_test::TestRequest::post()
            .uri("/submissions")
            .set_json(json!({"credentials": {"adminId": "admin", "password": "pw"}, "role": "BA"}))
            .to_request();
        let body: SubmissionList = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.submissions.len(), 1);
        assert_eq!(body.submissions[0].store_id, "S2");
    }

    #[actix_web::test]
    async fn delete_reports_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        seed(&config, Role::Bde, "S1");
        let conn = db::open(&config.db_path).unwrap();
        let id = db::list_submissions(&conn, None).unwrap()[0].submission_id.clone();

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(config.clone()))
                .route("/delete", web::post().to(delete)),
        )
        .await;
        let credentials = AdminCredentials {
            admin_id: "admin".into(),
            password: "pw".into(),
        };
        for (submission_id, status) in [(id.as_str(), 200), (id.as_str(), 404)] {
            let req = actix_test::TestRequest::post()
                .uri("/delete")
                .set_json(AdminDelete {
                    credentials: credentials.clone(),
                    submission_id: submission_id.to_string(),
                })
                .to_request();
            assert_eq!(actix_test::call_service(&app, req).await.status().as_u16(), status);
        }
    }
}
