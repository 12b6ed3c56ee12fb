use serde::{Deserialize, Serialize};

use crate::codec::{pairs, share};
use crate::model::actor::{ActorInfo, Role};
use crate::model::audit::AuditRecord;
use crate::model::stock::StockCountMap;
use crate::model::store::Store;

/// One audit as stored by the cloud-sync sink and listed on the admin
/// dashboard. Flattened so the master export does not need the session that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub bde_name: String,
    pub region: String,
    pub role: Role,
    pub store_name: String,
    /// The store's bsrn.
    pub store_id: String,
    pub audit_id: String,
    #[serde(with = "pairs")]
    pub stock_data: StockCountMap,
    pub total_qty: u64,
    /// Milliseconds since the epoch at which the batch was received.
    pub timestamp: i64,
    /// `YYYY-MM-DD` of `timestamp`, kept for display and filtering.
    pub date_string: String,
}

impl Submission {
    pub fn from_audit(
        submission_id: String,
        actor: &ActorInfo,
        audit: &AuditRecord,
        timestamp: i64,
        date_string: String,
    ) -> Self {
        Self {
            submission_id,
            bde_name: actor.name.clone(),
            region: actor.region.clone(),
            role: actor.role,
            store_name: audit.store.name.clone(),
            store_id: audit.store.bsrn.clone(),
            audit_id: audit.id.clone(),
            stock_data: audit.stock_data.clone(),
            total_qty: audit.total_units(),
            timestamp,
            date_string,
        }
    }

    /// Rebuilds a share code so an admin can hand a synced count back to a
    /// compiler's session. The original local store id is not kept server
    /// side, so the bsrn stands in for it.
    pub fn to_share_token(&self) -> String {
        let store = Store {
            id: self.store_id.clone(),
            bsrn: self.store_id.clone(),
            name: self.store_name.clone(),
            location: None,
        };
        share::encode(&store, &self.stock_data, self.timestamp)
    }
}
