//! # Audit Sinks
//!
//! Endpoints the collection app pushes a session's confirmed audits to. Both
//! take the same `AuditBatch` body: the actor, the confirmed records and the
//! catalog needed to name every SKU in them.
//!
//! *   **`POST /sync`** (`sync::process`): stores one submission row per audit
//!     in SQLite and answers `{"stored": n}` with the number of new rows.
//!     Syncing the same batch again stores nothing.
//! *   **`POST /export`** (`export::process`): answers a CSV attachment with one
//!     line per counted product, or `400` when the batch has nothing counted.

pub(crate) mod export;
pub(crate) mod sync;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/audits";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/sync", post().to(sync::process))
        .route("/export", post().to(export::process))
}
