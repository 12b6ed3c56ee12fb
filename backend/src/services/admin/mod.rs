//! # Admin Service
//!
//! Read and clean-up access to everything synced. Every request carries the
//! admin credentials and is checked against the configured pair; there is no
//! server-side session.
//!
//! *   **`POST /login`**: `{"granted": bool}` for the given credentials.
//! *   **`POST /submissions`**: submissions newest first, optionally for one
//!     role only.
//! *   **`POST /submissions/delete`**: removes one submission by id.
//! *   **`POST /export`**: master CSV of the (filtered) submissions.

mod export;
mod login;
mod submissions;

use crate::config::ServerConfig;
use actix_web::web::{post, scope};
use actix_web::{HttpResponse, Scope};
use common::requests::AdminCredentials;
use common::workflow::AdminGate;
use log::warn;

const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/submissions", post().to(submissions::list))
        .route("/submissions/delete", post().to(submissions::delete))
        .route("/export", post().to(export::process))
}

/// `Err` holds the `401` to return when the credentials are wrong.
fn authorize(config: &ServerConfig, credentials: &AdminCredentials) -> Result<(), HttpResponse> {
    if config.admin_gate().check(credentials) {
        Ok(())
    } else {
        warn!("rejected admin request for {:?}", credentials.admin_id);
        Err(HttpResponse::Unauthorized().body("Invalid admin credentials"))
    }
}
