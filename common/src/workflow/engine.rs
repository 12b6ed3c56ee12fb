//! The session state machine.
//!
//! [`WorkflowEngine::dispatch`] is the only way the session changes. Each call
//! applies one [`Action`] to the current step, re-checks that the resulting
//! step has the entities it needs (falling back to login when it does not),
//! and writes the session blob through the storage port before returning.
//! Writing is synchronous so storage always holds the last committed state;
//! a failed write is logged and does not undo the transition.
//!
//! Destructive actions (ending a session with work in it, leaving stock entry
//! with a non-empty draft, deleting a record) are parked and reported as
//! [`Outcome::ConfirmationRequired`]. Nothing changes until
//! [`Action::ConfirmPending`]; [`Action::DeclinePending`] or any other action
//! drops the parked one.

use crate::codec::{session, share};
use crate::model::actor::{ActorInfo, Role};
use crate::model::audit::AuditRecord;
use crate::model::sku::{self, Sku};
use crate::model::stock::StockCountMap;
use crate::model::store::Store;
use crate::repository::Totals;
use crate::requests::AuditBatch;
use crate::storage::store_book::StoreBook;
use crate::storage::{KeyValueStore, StorageError};
use crate::workflow::action::{Action, Outcome, Prompt, Rejection};
use crate::workflow::ports::{AdminGate, Clock};
use crate::workflow::session::SessionState;
use crate::workflow::step::Step;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Parked {
    DiscardDraft,
    DeleteRecord(String),
    EndSession,
}

pub struct WorkflowEngine<S, C> {
    state: SessionState,
    store: S,
    clock: C,
    gate: Box<dyn AdminGate>,
    builtin_skus: Vec<Sku>,
    pending: Option<(Parked, Prompt)>,
    admin_granted: bool,
    last_fingerprint: Option<String>,
}

impl<S, C> WorkflowEngine<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Boots the engine from whatever session blob `store` holds. A missing
    /// or unreadable blob starts a fresh session at login.
    pub fn restore(store: S, clock: C, gate: Box<dyn AdminGate>, builtin_skus: Vec<Sku>) -> Self {
        let restored = match store.load_raw(session::SESSION_KEY) {
            Ok(blob) => session::deserialize(&blob),
            Err(StorageError::NotFound) => None,
            Err(e) => {
                log::warn!("could not read the saved session: {e}");
                None
            }
        };
        let resumed = restored.is_some();
        let mut engine = Self {
            state: restored.unwrap_or_default(),
            store,
            clock,
            gate,
            builtin_skus,
            pending: None,
            admin_granted: false,
            last_fingerprint: None,
        };
        if resumed {
            log::info!(
                "resumed session at {:?} with {} audited stores",
                engine.state.step,
                engine.state.audits.len()
            );
            engine.last_fingerprint = engine.state_fingerprint();
        }
        engine.enforce_step_requirements();
        engine
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn actor(&self) -> Option<&ActorInfo> {
        self.state.actor.as_ref()
    }

    /// The storage the engine writes through.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending(&self) -> Option<&Prompt> {
        self.pending.as_ref().map(|(_, prompt)| prompt)
    }

    pub fn admin_granted(&self) -> bool {
        self.admin_granted && self.state.step == Step::AdminDashboard
    }

    /// Built-in SKUs followed by the session's custom ones.
    pub fn catalog(&self) -> Vec<Sku> {
        self.builtin_skus
            .iter()
            .chain(self.state.session_skus.iter())
            .cloned()
            .collect()
    }

    pub fn totals(&self) -> Totals {
        self.state.audits.totals()
    }

    /// Stores already counted this session, to mark them in the picker.
    pub fn audited_bsrns(&self) -> Vec<String> {
        self.state.audits.bsrns()
    }

    /// Stores the current actor saved on this device.
    pub fn saved_stores(&self) -> Vec<Store> {
        match &self.state.actor {
            Some(actor) => StoreBook::new(&self.store).stores_for(&actor.name),
            None => Vec::new(),
        }
    }

    /// Drives the warn-before-close guard.
    pub fn has_uncommitted_work(&self) -> bool {
        self.state.has_uncommitted_work()
    }

    /// The whole session, for the export and cloud-sync sinks.
    pub fn audit_batch(&self) -> Option<AuditBatch> {
        let actor = self.state.actor.clone()?;
        Some(AuditBatch {
            actor_info: actor,
            audits: self.state.audits.records().to_vec(),
            catalog: self.catalog(),
        })
    }

    /// Just the draft under review, for a single-store export.
    pub fn draft_batch(&self) -> Option<AuditBatch> {
        let actor = self.state.actor.clone()?;
        let store = self.state.draft_store.clone()?;
        let record = AuditRecord::new(
            self.record_id_for(&store),
            store,
            self.state.draft_stock.clone(),
            self.clock.now_millis(),
        );
        Some(AuditBatch {
            actor_info: actor,
            audits: vec![record],
            catalog: self.catalog(),
        })
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::ConfirmPending => self.resolve_pending(),
            Action::DeclinePending => match self.pending.take() {
                Some(_) => Outcome::Declined,
                None => Outcome::Ignored(Rejection::NothingPending),
            },
            other => {
                self.pending = None;
                self.apply(other)
            }
        };
        self.enforce_step_requirements();
        if outcome.commits() {
            self.persist();
        }
        outcome
    }

    fn apply(&mut self, action: Action) -> Outcome {
        use Action as A;
        match (self.state.step, action) {
            (Step::Login, A::Login { name, region, role }) => self.login(&name, &region, role),
            (Step::Login, A::OpenAdmin) => self.goto(Step::AdminLogin),

            (Step::AdminLogin, A::AdminLogin(credentials)) => {
                if self.gate.check(&credentials) {
                    log::info!("admin access granted");
                    self.admin_granted = true;
                    self.goto(Step::AdminDashboard)
                } else {
                    log::warn!("admin access denied for {:?}", credentials.admin_id);
                    Outcome::Ignored(Rejection::AccessDenied)
                }
            }
            (Step::AdminLogin | Step::AdminDashboard, A::LeaveAdmin) => {
                self.admin_granted = false;
                self.goto(Step::Login)
            }

            (Step::Dashboard, A::StartAudit) => self.goto(Step::StoreSelect),
            (Step::Dashboard, A::EditRecord(id)) => self.edit_record(&id),
            (Step::Dashboard, A::DeleteRecord(id)) => match self.state.audits.find_by_record_id(&id) {
                Some(record) => {
                    let prompt = Prompt::DeleteRecord {
                        record_id: record.id.clone(),
                        store_name: record.store.name.clone(),
                    };
                    self.park(Parked::DeleteRecord(id), prompt)
                }
                None => Outcome::Ignored(Rejection::RecordNotFound(id)),
            },
            (Step::Dashboard, A::ImportToken(text)) => self.import_token(&text),
            (Step::Dashboard, A::ShareRecord(id)) => match self.state.audits.find_by_record_id(&id) {
                Some(record) => Outcome::Token(share::encode(
                    &record.store,
                    &record.stock_data,
                    self.clock.now_millis(),
                )),
                None => Outcome::Ignored(Rejection::RecordNotFound(id)),
            },
            (Step::Dashboard, A::FinishSession) => self.goto(Step::ReviewSession),

            (Step::StoreSelect, A::SelectStore(store)) => self.select_store(store),
            (Step::StoreSelect, A::SaveStore { name, bsrn }) => self.save_store(&name, &bsrn),
            (Step::StoreSelect, A::ForgetStore(bsrn)) => {
                if let Some(actor) = &self.state.actor {
                    StoreBook::new(&self.store).remove(&actor.name, &bsrn);
                }
                Outcome::Applied
            }
            (Step::StoreSelect, A::CancelAudit) => self.goto(Step::Dashboard),

            (Step::StockEntry, A::SetCount { sku, count }) => {
                self.edit_draft(&sku, |stock| stock.set(&sku, count))
            }
            (Step::StockEntry, A::Increment(sku)) => self.edit_draft(&sku, |stock| stock.increment(&sku)),
            (Step::StockEntry, A::Decrement(sku)) => self.edit_draft(&sku, |stock| stock.decrement(&sku)),
            (Step::StockEntry, A::AddCustomSku { code, name }) => self.add_custom_sku(&code, &name),
            (Step::StockEntry, A::SubmitCounts) => self.goto(Step::ReviewSingle),
            (Step::StockEntry, A::CancelAudit) => {
                if self.state.has_draft_work() {
                    let store_name = self
                        .state
                        .draft_store
                        .as_ref()
                        .map(|s| s.name.clone())
                        .unwrap_or_default();
                    self.park(Parked::DiscardDraft, Prompt::DiscardDraft { store_name })
                } else {
                    self.discard_draft()
                }
            }

            (Step::ReviewSingle, A::Confirm) => self.confirm_draft(),
            (Step::ReviewSingle, A::EditDraft) => self.goto(Step::StockEntry),
            (Step::ReviewSingle, A::ShareDraft) => self.share_draft(),
            (Step::ReviewSingle, A::FinishReview) => {
                self.state.clear_draft();
                self.goto(Step::Dashboard)
            }

            (Step::ReviewSession, A::ContinueSession) => self.goto(Step::Dashboard),

            (step, A::Logout) if step.needs_actor() => {
                if self.state.has_uncommitted_work() {
                    let totals = self.state.audits.totals();
                    let prompt = Prompt::EndSession {
                        stores: totals.store_count,
                        units: totals.total_units,
                    };
                    self.park(Parked::EndSession, prompt)
                } else {
                    self.end_session()
                }
            }

            (step, action) => {
                log::debug!("ignoring {action:?} in {step:?}");
                Outcome::Ignored(Rejection::IllegalInStep(step))
            }
        }
    }

    fn goto(&mut self, step: Step) -> Outcome {
        log::debug!("{:?} -> {:?}", self.state.step, step);
        self.state.step = step;
        Outcome::Applied
    }

    fn park(&mut self, parked: Parked, prompt: Prompt) -> Outcome {
        self.pending = Some((parked, prompt.clone()));
        Outcome::ConfirmationRequired(prompt)
    }

    fn resolve_pending(&mut self) -> Outcome {
        let Some((parked, _)) = self.pending.take() else {
            return Outcome::Ignored(Rejection::NothingPending);
        };
        match parked {
            Parked::DiscardDraft if self.state.step == Step::StockEntry => self.discard_draft(),
            Parked::DeleteRecord(id) if self.state.step == Step::Dashboard => {
                match self.state.audits.remove(&id) {
                    Some(record) => {
                        log::info!("deleted audit {} for store {}", record.id, record.store.bsrn);
                        Outcome::Applied
                    }
                    None => Outcome::Ignored(Rejection::RecordNotFound(id)),
                }
            }
            Parked::EndSession if self.state.step.needs_actor() => self.end_session(),
            _ => Outcome::Ignored(Rejection::IllegalInStep(self.state.step)),
        }
    }

    fn login(&mut self, name: &str, region: &str, role: Option<Role>) -> Outcome {
        if name.trim().is_empty() {
            return Outcome::Ignored(Rejection::MissingField("name"));
        }
        let Some(role) = role else {
            return Outcome::Ignored(Rejection::MissingField("role"));
        };
        let actor = ActorInfo::new(name, region, role);
        log::info!("{} {} started a session", actor.role, actor.name);
        self.state.actor = Some(actor);
        self.goto(Step::Dashboard)
    }

    fn select_store(&mut self, store: Store) -> Outcome {
        if store.bsrn.trim().is_empty() {
            return Outcome::Ignored(Rejection::MissingField("bsrn"));
        }
        // Picking a store that was already confirmed reopens its count.
        self.state.draft_stock = self
            .state
            .audits
            .find_by_bsrn(&store.bsrn)
            .map(|record| record.stock_data.clone())
            .unwrap_or_default();
        self.state.draft_store = Some(store);
        self.goto(Step::StockEntry)
    }

    fn save_store(&mut self, name: &str, bsrn: &str) -> Outcome {
        if name.trim().is_empty() {
            return Outcome::Ignored(Rejection::MissingField("name"));
        }
        if bsrn.trim().is_empty() {
            return Outcome::Ignored(Rejection::MissingField("bsrn"));
        }
        let Some(actor) = &self.state.actor else {
            return Outcome::Ignored(Rejection::MissingField("actor"));
        };
        if StoreBook::new(&self.store).add(&actor.name, Store::new(name, bsrn)) {
            Outcome::Applied
        } else {
            Outcome::Ignored(Rejection::DuplicateStore(bsrn.trim().to_string()))
        }
    }

    fn edit_draft(&mut self, sku: &str, edit: impl FnOnce(&mut StockCountMap)) -> Outcome {
        let known = sku::find_sku(&self.builtin_skus, sku).is_some()
            || sku::find_sku(&self.state.session_skus, sku).is_some()
            || self.state.draft_stock.iter().any(|(k, _)| k == sku);
        if !known {
            return Outcome::Ignored(Rejection::UnknownSku(sku.to_string()));
        }
        edit(&mut self.state.draft_stock);
        Outcome::Applied
    }

    fn add_custom_sku(&mut self, code: &str, name: &str) -> Outcome {
        let Some(new_sku) = Sku::custom(code, name) else {
            return Outcome::Ignored(Rejection::MissingField("item code and name"));
        };
        if self.catalog().iter().any(|s| s.id == new_sku.id) {
            return Outcome::Ignored(Rejection::DuplicateSku(new_sku.id));
        }
        log::debug!("added custom SKU {}", new_sku.id);
        self.state.session_skus.push(new_sku);
        Outcome::Applied
    }

    fn discard_draft(&mut self) -> Outcome {
        self.state.clear_draft();
        self.goto(Step::Dashboard)
    }

    fn confirm_draft(&mut self) -> Outcome {
        let Some(role) = self.state.actor.as_ref().map(|a| a.role) else {
            return Outcome::Ignored(Rejection::MissingField("actor"));
        };
        if !self.commit_draft() {
            return Outcome::Ignored(Rejection::MissingField("store"));
        }
        if role.shares_after_confirm() {
            return Outcome::Applied;
        }
        self.state.clear_draft();
        self.goto(Step::Dashboard)
    }

    /// A BA's share also confirms the count; sharing is how their work
    /// leaves the device.
    fn share_draft(&mut self) -> Outcome {
        let Some(store) = self.state.draft_store.clone() else {
            return Outcome::Ignored(Rejection::MissingField("store"));
        };
        if self.state.actor.as_ref().is_some_and(|a| a.role == Role::Ba) {
            self.commit_draft();
        }
        Outcome::Token(share::encode(
            &store,
            &self.state.draft_stock,
            self.clock.now_millis(),
        ))
    }

    /// Freezes the draft into the repository, keeping the record id when the
    /// store was already audited.
    fn commit_draft(&mut self) -> bool {
        let Some(store) = self.state.draft_store.clone() else {
            return false;
        };
        let record = AuditRecord::new(
            self.record_id_for(&store),
            store,
            self.state.draft_stock.clone(),
            self.clock.now_millis(),
        );
        log::info!(
            "confirmed {} units for store {}",
            record.total_units(),
            record.store.bsrn
        );
        self.state.audits.upsert(record);
        true
    }

    fn edit_record(&mut self, id: &str) -> Outcome {
        let Some(record) = self.state.audits.remove(id) else {
            return Outcome::Ignored(Rejection::RecordNotFound(id.to_string()));
        };
        self.state.draft_store = Some(record.store);
        self.state.draft_stock = record.stock_data;
        self.goto(Step::StockEntry)
    }

    fn import_token(&mut self, text: &str) -> Outcome {
        let Some(payload) = share::decode(text) else {
            return Outcome::Ignored(Rejection::InvalidToken);
        };
        let record = AuditRecord::new(
            self.record_id_for(&payload.store),
            payload.store,
            payload.stock_data,
            self.clock.now_millis(),
        );
        let bsrn = record.store.bsrn.clone();
        let result = self.state.audits.upsert(record);
        log::info!("imported share code for store {bsrn}: {result:?}");
        Outcome::Imported(result)
    }

    fn end_session(&mut self) -> Outcome {
        if let Some(actor) = &self.state.actor {
            log::info!("{} ended the session", actor.name);
        }
        self.state = SessionState::default();
        self.pending = None;
        Outcome::Applied
    }

    /// Existing id for an already audited store, otherwise a fresh one
    /// derived from the clock.
    fn record_id_for(&self, store: &Store) -> String {
        if let Some(existing) = self.state.audits.find_by_bsrn(&store.bsrn) {
            return existing.id.clone();
        }
        let mut candidate = self.clock.now_millis();
        while self.state.audits.contains_record_id(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn enforce_step_requirements(&mut self) {
        if self.state.step == Step::AdminDashboard && !self.admin_granted {
            log::warn!("admin dashboard without a grant, back to login");
            self.state.step = Step::Login;
        }
        if !self.state.step.is_admin() {
            self.admin_granted = false;
        }
        if !self.state.satisfies_step() {
            log::warn!(
                "{:?} is missing its actor or draft store, back to login",
                self.state.step
            );
            self.state.step = Step::Login;
            self.pending = None;
        }
    }

    fn state_fingerprint(&self) -> Option<String> {
        session::serialize(&self.state, 0)
            .map(|blob| session::fingerprint(&blob))
            .map_err(|e| log::warn!("failed to serialize session: {e}"))
            .ok()
    }

    fn persist(&mut self) {
        if self.state.is_pristine() {
            if self.last_fingerprint.is_some() || self.store.load_raw(session::SESSION_KEY).is_ok() {
                if let Err(e) = self.store.remove(session::SESSION_KEY) {
                    log::warn!("failed to erase the saved session: {e}");
                    return;
                }
                log::debug!("saved session erased");
            }
            self.last_fingerprint = None;
            return;
        }
        let Some(fingerprint) = self.state_fingerprint() else {
            return;
        };
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return;
        }
        let saved = session::serialize(&self.state, self.clock.now_millis())
            .map_err(StorageError::from)
            .and_then(|blob| self.store.save_raw(session::SESSION_KEY, &blob));
        match saved {
            Ok(()) => self.last_fingerprint = Some(fingerprint),
            Err(e) => log::warn!("failed to save the session: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::AdminCredentials;
    use crate::storage::MemoryStore;
    use crate::workflow::ports::{ManualClock, StaticAdminGate};

    type Engine = WorkflowEngine<MemoryStore, ManualClock>;

    fn catalog() -> Vec<Sku> {
        vec![
            Sku::custom("SKU1", "One").unwrap(),
            Sku::custom("SKU2", "Two").unwrap(),
        ]
    }

    fn boot(mem: &MemoryStore) -> Engine {
        WorkflowEngine::restore(
            mem.clone(),
            ManualClock::new(1_000),
            Box::new(StaticAdminGate::new("admin", "pw")),
            catalog(),
        )
    }

    fn logged_in(mem: &MemoryStore, role: Role) -> Engine {
        let mut engine = boot(mem);
        let outcome = engine.dispatch(Action::Login {
            name: "Asha".into(),
            region: "North".into(),
            role: Some(role),
        });
        assert_eq!(outcome, Outcome::Applied);
        engine
    }

    fn count_store(engine: &mut Engine, bsrn: &str, counts: &[(&str, u32)]) {
        engine.dispatch(Action::StartAudit);
        engine.dispatch(Action::SelectStore(Store::new(&format!("Store {bsrn}"), bsrn)));
        for (sku, n) in counts {
            engine.dispatch(Action::SetCount {
                sku: sku.to_string(),
                count: *n,
            });
        }
        engine.dispatch(Action::SubmitCounts);
    }

    #[test]
    fn login_requires_name_and_role() {
        let mem = MemoryStore::new();
        let mut engine = boot(&mem);
        let blank = engine.dispatch(Action::Login {
            name: "  ".into(),
            region: String::new(),
            role: Some(Role::Bde),
        });
        assert_eq!(blank, Outcome::Ignored(Rejection::MissingField("name")));
        let no_role = engine.dispatch(Action::Login {
            name: "Asha".into(),
            region: String::new(),
            role: None,
        });
        assert_eq!(no_role, Outcome::Ignored(Rejection::MissingField("role")));
        assert_eq!(engine.step(), Step::Login);
        assert!(!mem.contains(session::SESSION_KEY));
    }

    #[test]
    fn bde_confirm_returns_to_dashboard_and_clears_draft() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 3), ("SKU2", 0)]);
        assert_eq!(engine.step(), Step::ReviewSingle);

        assert_eq!(engine.dispatch(Action::Confirm), Outcome::Applied);
        assert_eq!(engine.step(), Step::Dashboard);
        assert!(engine.state().draft_store.is_none());
        assert_eq!(engine.totals().store_count, 1);
        assert_eq!(engine.totals().total_units, 3);
        let record = &engine.state().audits.records()[0];
        assert_eq!(record.id, "1000");
        assert_eq!(record.stock_data.get("SKU2"), 0);
        assert_eq!(record.stock_data.len(), 2);
    }

    #[test]
    fn ba_confirm_stays_for_sharing_and_share_confirms() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Ba);
        count_store(&mut engine, "S1", &[("SKU1", 4)]);

        let Outcome::Token(token) = engine.dispatch(Action::ShareDraft) else {
            panic!("expected a token");
        };
        assert_eq!(engine.state().audits.len(), 1);
        assert_eq!(engine.step(), Step::ReviewSingle);
        assert_eq!(share::decode(&token).unwrap().stock_data.get("SKU1"), 4);

        assert_eq!(engine.dispatch(Action::Confirm), Outcome::Applied);
        assert_eq!(engine.step(), Step::ReviewSingle);
        assert_eq!(engine.state().audits.len(), 1);

        engine.dispatch(Action::FinishReview);
        assert_eq!(engine.step(), Step::Dashboard);
        assert!(engine.state().draft_store.is_none());
    }

    #[test]
    fn bde_share_does_not_confirm() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 4)]);
        assert!(matches!(engine.dispatch(Action::ShareDraft), Outcome::Token(_)));
        assert!(engine.state().audits.is_empty());
    }

    #[test]
    fn selecting_an_audited_store_reopens_its_counts() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 3)]);
        engine.dispatch(Action::Confirm);

        engine.dispatch(Action::StartAudit);
        engine.dispatch(Action::SelectStore(Store::new("Other name", "S1")));
        assert_eq!(engine.state().draft_stock.get("SKU1"), 3);
        engine.dispatch(Action::Increment("SKU1".into()));
        engine.dispatch(Action::SubmitCounts);
        engine.dispatch(Action::Confirm);

        assert_eq!(engine.state().audits.len(), 1);
        let record = &engine.state().audits.records()[0];
        assert_eq!(record.stock_data.get("SKU1"), 4);
        assert_eq!(record.id, "1000");
    }

    #[test]
    fn edit_record_pulls_it_back_into_the_draft() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 3)]);
        engine.dispatch(Action::Confirm);
        let id = engine.state().audits.records()[0].id.clone();

        assert_eq!(engine.dispatch(Action::EditRecord(id)), Outcome::Applied);
        assert_eq!(engine.step(), Step::StockEntry);
        assert!(engine.state().audits.is_empty());
        assert_eq!(engine.state().draft_stock.get("SKU1"), 3);
        assert_eq!(
            engine.dispatch(Action::EditRecord("missing".into())),
            Outcome::Ignored(Rejection::IllegalInStep(Step::StockEntry))
        );
    }

    #[test]
    fn unknown_record_ids_are_ignored_on_the_dashboard() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        for action in [
            Action::EditRecord("nope".into()),
            Action::DeleteRecord("nope".into()),
            Action::ShareRecord("nope".into()),
        ] {
            assert_eq!(
                engine.dispatch(action),
                Outcome::Ignored(Rejection::RecordNotFound("nope".into()))
            );
        }
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 3)]);
        engine.dispatch(Action::Confirm);
        let id = engine.state().audits.records()[0].id.clone();

        let outcome = engine.dispatch(Action::DeleteRecord(id.clone()));
        assert!(matches!(
            outcome,
            Outcome::ConfirmationRequired(Prompt::DeleteRecord { .. })
        ));
        assert_eq!(engine.state().audits.len(), 1);
        assert_eq!(engine.dispatch(Action::DeclinePending), Outcome::Declined);
        assert_eq!(engine.state().audits.len(), 1);

        engine.dispatch(Action::DeleteRecord(id.clone()));
        assert_eq!(engine.dispatch(Action::ConfirmPending), Outcome::Applied);
        assert!(engine.state().audits.find_by_record_id(&id).is_none());
    }

    #[test]
    fn another_action_drops_the_parked_one() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 3)]);
        engine.dispatch(Action::Confirm);
        let id = engine.state().audits.records()[0].id.clone();

        engine.dispatch(Action::DeleteRecord(id));
        engine.dispatch(Action::FinishSession);
        assert_eq!(
            engine.dispatch(Action::ConfirmPending),
            Outcome::Ignored(Rejection::NothingPending)
        );
        assert_eq!(engine.state().audits.len(), 1);
    }

    #[test]
    fn cancelling_stock_entry_asks_only_when_the_draft_has_entries() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        engine.dispatch(Action::StartAudit);
        engine.dispatch(Action::SelectStore(Store::new("Glow", "S1")));
        assert_eq!(engine.dispatch(Action::CancelAudit), Outcome::Applied);
        assert_eq!(engine.step(), Step::Dashboard);

        engine.dispatch(Action::StartAudit);
        engine.dispatch(Action::SelectStore(Store::new("Glow", "S1")));
        engine.dispatch(Action::Increment("SKU1".into()));
        assert!(matches!(
            engine.dispatch(Action::CancelAudit),
            Outcome::ConfirmationRequired(Prompt::DiscardDraft { .. })
        ));
        assert_eq!(engine.step(), Step::StockEntry);
        engine.dispatch(Action::ConfirmPending);
        assert_eq!(engine.step(), Step::Dashboard);
        assert!(engine.state().draft_stock.is_empty());
    }

    #[test]
    fn counts_for_unknown_skus_are_rejected() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        engine.dispatch(Action::StartAudit);
        engine.dispatch(Action::SelectStore(Store::new("Glow", "S1")));
        assert_eq!(
            engine.dispatch(Action::Increment("GHOST".into())),
            Outcome::Ignored(Rejection::UnknownSku("GHOST".into()))
        );
        assert_eq!(
            engine.dispatch(Action::AddCustomSku {
                code: "ghost".into(),
                name: "Ghost Serum".into()
            }),
            Outcome::Applied
        );
        assert_eq!(engine.dispatch(Action::Increment("GHOST".into())), Outcome::Applied);
        assert_eq!(
            engine.dispatch(Action::AddCustomSku {
                code: "sku1".into(),
                name: "Clash".into()
            }),
            Outcome::Ignored(Rejection::DuplicateSku("SKU1".into()))
        );
        assert_eq!(engine.catalog().len(), 3);
    }

    #[test]
    fn saved_stores_survive_logout() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        engine.dispatch(Action::StartAudit);
        assert_eq!(
            engine.dispatch(Action::SaveStore {
                name: "Glow".into(),
                bsrn: "S1".into()
            }),
            Outcome::Applied
        );
        assert_eq!(
            engine.dispatch(Action::SaveStore {
                name: "Glow".into(),
                bsrn: "S1".into()
            }),
            Outcome::Ignored(Rejection::DuplicateStore("S1".into()))
        );
        engine.dispatch(Action::CancelAudit);
        engine.dispatch(Action::Logout);
        assert_eq!(engine.step(), Step::Login);

        let engine = logged_in(&mem, Role::Bde);
        assert_eq!(engine.saved_stores().len(), 1);
    }

    #[test]
    fn admin_branch_goes_through_the_gate() {
        let mem = MemoryStore::new();
        let mut engine = boot(&mem);
        assert_eq!(
            engine.dispatch(Action::AdminLogin(AdminCredentials {
                admin_id: "admin".into(),
                password: "pw".into()
            })),
            Outcome::Ignored(Rejection::IllegalInStep(Step::Login))
        );
        engine.dispatch(Action::OpenAdmin);
        let wrong = engine.dispatch(Action::AdminLogin(AdminCredentials {
            admin_id: "admin".into(),
            password: "nope".into(),
        }));
        assert_eq!(wrong, Outcome::Ignored(Rejection::AccessDenied));
        assert_eq!(engine.step(), Step::AdminLogin);

        engine.dispatch(Action::AdminLogin(AdminCredentials {
            admin_id: "admin".into(),
            password: "pw".into(),
        }));
        assert_eq!(engine.step(), Step::AdminDashboard);
        assert!(engine.admin_granted());

        engine.dispatch(Action::LeaveAdmin);
        assert_eq!(engine.step(), Step::Login);
        assert!(!engine.admin_granted());
    }

    #[test]
    fn draft_steps_without_a_draft_fall_back_to_login() {
        let mem = MemoryStore::new();
        let blob = r#"{"step":"REVIEW_SINGLE","actorInfo":{"name":"Asha","region":"","role":"BDE"}}"#;
        mem.save_raw(session::SESSION_KEY, blob).unwrap();
        let engine = boot(&mem);
        assert_eq!(engine.step(), Step::Login);
        assert!(engine.actor().is_some());
    }

    #[test]
    fn audit_batch_carries_custom_skus() {
        let mem = MemoryStore::new();
        let mut engine = logged_in(&mem, Role::Bde);
        count_store(&mut engine, "S1", &[("SKU1", 2)]);
        engine.dispatch(Action::EditDraft);
        engine.dispatch(Action::AddCustomSku {
            code: "x1".into(),
            name: "Extra".into(),
        });
        engine.dispatch(Action::SetCount {
            sku: "X1".into(),
            count: 5,
        });
        engine.dispatch(Action::SubmitCounts);
        let draft = engine.draft_batch().unwrap();
        assert_eq!(draft.total_units(), 7);
        engine.dispatch(Action::Confirm);

        let batch = engine.audit_batch().unwrap();
        assert_eq!(batch.audits.len(), 1);
        assert!(batch.catalog.iter().any(|s| s.id == "X1"));
        assert_eq!(batch.total_units(), 7);
    }
}
