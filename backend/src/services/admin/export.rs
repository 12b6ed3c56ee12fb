use super::authorize;
use crate::config::ServerConfig;
use crate::services::audits::export::attachment;
use crate::{db, report};
use actix_web::{web, HttpResponse, Responder};
use common::model::sku::builtin_catalog;
use common::requests::AdminQuery;

/// Master export of every synced submission. SKUs outside the built-in
/// catalog keep their code as the product name.
pub async fn process(config: web::Data<ServerConfig>, payload: web::Json<AdminQuery>) -> impl Responder {
    let query = payload.into_inner();
    if let Err(denied) = authorize(&config, &query.credentials) {
        return denied;
    }
    let role = query.role;
    let db_path = config.db_path.clone();
    let result = web::block(move || {
        let conn = db::open(&db_path)?;
        let submissions = db::list_submissions(&conn, role)?;
        let rows = report::rows_from_submissions(&submissions, &builtin_catalog());
        report::to_csv(&rows)
    })
    .await;
    match result {
        Ok(Ok(bytes)) => {
            let label = match role {
                Some(role) => format!("Master_{}", role.label()),
                None => "Master".to_string(),
            };
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(attachment(report::file_name(&label, report::now_millis())))
                .body(bytes)
        }
        Ok(Err(e)) => HttpResponse::ServiceUnavailable().body(format!("Error exporting submissions: {}", e)),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
