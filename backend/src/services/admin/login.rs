use crate::config::ServerConfig;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{AdminCredentials, AdminLoginResponse};
use common::workflow::AdminGate;
use log::info;

pub async fn process(
    config: web::Data<ServerConfig>,
    payload: web::Json<AdminCredentials>,
) -> impl Responder {
    let granted = config.admin_gate().check(&payload);
    info!("admin login for {:?}: granted = {}", payload.admin_id, granted);
    HttpResponse::Ok().json(AdminLoginResponse { granted })
}
