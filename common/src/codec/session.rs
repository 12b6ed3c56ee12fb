//! Crash-recovery blob for the whole working session.
//!
//! The engine rewrites the blob after every committed change, so a reload, a
//! killed tab or a dead battery loses nothing that was confirmed on screen.
//! Reading never fails loudly: a blob that is not JSON at all means "no prior
//! session", and inside a readable blob every part is read on its own, so one
//! damaged audit record costs that record and not the rest of the day's work.
//!
//! Shape (camelCase keys):
//! `{step, actorInfo, sessionAudits: [{id, store, stockData: [[sku, n]...], timestamp}],
//!   draftStore, draftStockData: [[sku, n]...], sessionSkus, timestamp}`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::codec::pairs;
use crate::model::actor::ActorInfo;
use crate::model::audit::AuditRecord;
use crate::model::sku::Sku;
use crate::model::stock::StockCountMap;
use crate::model::store::Store;
use crate::repository::AuditRepository;
use crate::workflow::session::SessionState;
use crate::workflow::step::Step;

/// Storage key of the session blob.
pub const SESSION_KEY: &str = "soh_active_session";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default, deserialize_with = "lenient_step")]
    step: Step,
    #[serde(default, deserialize_with = "lenient")]
    actor_info: Option<ActorInfo>,
    #[serde(default, deserialize_with = "lenient_list")]
    session_audits: Vec<AuditRecord>,
    #[serde(default, deserialize_with = "lenient")]
    draft_store: Option<Store>,
    #[serde(default, with = "pairs")]
    draft_stock_data: StockCountMap,
    #[serde(default, deserialize_with = "lenient_list")]
    session_skus: Vec<Sku>,
    #[serde(default)]
    timestamp: i64,
}

/// Serializes the session. Admin steps are written as `LOGIN`: the admin
/// grant lives in memory only and a reload must go through the gate again.
pub fn serialize(state: &SessionState, timestamp: i64) -> Result<String, serde_json::Error> {
    let persisted = PersistedSession {
        step: state.step.persisted(),
        actor_info: state.actor.clone(),
        session_audits: state.audits.records().to_vec(),
        draft_store: state.draft_store.clone(),
        draft_stock_data: state.draft_stock.clone(),
        session_skus: state.session_skus.clone(),
        timestamp,
    };
    serde_json::to_string(&persisted)
}

/// Restores a session, or `None` when the blob is unusable as a whole.
pub fn deserialize(blob: &str) -> Option<SessionState> {
    let value: Value = serde_json::from_str(blob)
        .map_err(|e| log::warn!("discarding unreadable session blob: {e}"))
        .ok()?;
    if !value.is_object() {
        log::warn!("discarding session blob that is not a JSON object");
        return None;
    }
    let persisted: PersistedSession = serde_json::from_value(value)
        .map_err(|e| log::warn!("discarding unreadable session blob: {e}"))
        .ok()?;
    Some(SessionState {
        step: persisted.step,
        actor: persisted.actor_info,
        audits: AuditRepository::from_records(persisted.session_audits),
        draft_store: persisted.draft_store,
        draft_stock: persisted.draft_stock_data,
        session_skus: persisted.session_skus,
    })
}

/// Digest of a serialized blob, used to skip rewriting identical content.
pub fn fingerprint(blob: &str) -> String {
    format!("{:x}", md5::compute(blob))
}

fn lenient_step<'de, D>(deserializer: D) -> Result<Step, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
        log::warn!("unknown session step {value}, starting from login");
        Step::Login
    }))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|e| log::warn!("dropping unreadable session field: {e}"))
        .ok())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            log::warn!("expected a list in the session blob, found {value}");
        }
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .map_err(|e| log::warn!("dropping unreadable session entry: {e}"))
                .ok()
        })
        .collect())
}
