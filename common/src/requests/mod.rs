//! Payloads exchanged between the frontend and the backend sinks.

use serde::{Deserialize, Serialize};

use crate::model::actor::{ActorInfo, Role};
use crate::model::audit::AuditRecord;
use crate::model::sku::Sku;
use crate::model::submission::Submission;

/// What the export and cloud-sync sinks receive: who counted, the confirmed
/// records, and the catalog needed to name the SKUs (custom ones included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditBatch {
    pub actor_info: ActorInfo,
    pub audits: Vec<AuditRecord>,
    pub catalog: Vec<Sku>,
}

impl AuditBatch {
    pub fn total_units(&self) -> u64 {
        self.audits.iter().map(AuditRecord::total_units).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub stored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    pub admin_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub granted: bool,
}

/// Admin listing/export request. `role: None` means every role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    pub credentials: AdminCredentials,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDelete {
    pub credentials: AdminCredentials,
    pub submission_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionList {
    pub submissions: Vec<Submission>,
}
