use crate::model::actor::ActorInfo;
use crate::model::sku::Sku;
use crate::model::stock::StockCountMap;
use crate::model::store::Store;
use crate::repository::AuditRepository;
use crate::workflow::step::Step;

/// Everything a session owns. The engine holds exactly one of these and is
/// the only thing that mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub step: Step,
    pub actor: Option<ActorInfo>,
    pub audits: AuditRepository,
    /// Store whose count is being entered or reviewed.
    pub draft_store: Option<Store>,
    /// Counts for `draft_store`, not yet in `audits`.
    pub draft_stock: StockCountMap,
    /// Custom SKUs added during this session, in insertion order.
    pub session_skus: Vec<Sku>,
}

impl SessionState {
    /// True when the current step has everything it needs to render.
    pub fn satisfies_step(&self) -> bool {
        if self.step.needs_actor() && self.actor.is_none() {
            return false;
        }
        if self.step.needs_draft_store() && self.draft_store.is_none() {
            return false;
        }
        true
    }

    /// Work that would be lost by ending the session now.
    pub fn has_uncommitted_work(&self) -> bool {
        !self.audits.is_empty() || self.has_draft_work()
    }

    /// The draft holds at least one entry, zero counts included.
    pub fn has_draft_work(&self) -> bool {
        !self.draft_stock.is_empty()
    }

    /// Nothing worth a blob: what a fresh install or a logout leaves behind.
    pub fn is_pristine(&self) -> bool {
        self.step.persisted() == Step::Login
            && self.actor.is_none()
            && self.audits.is_empty()
            && self.draft_store.is_none()
            && self.draft_stock.is_empty()
            && self.session_skus.is_empty()
    }

    pub fn clear_draft(&mut self) {
        self.draft_store = None;
        self.draft_stock = StockCountMap::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::actor::Role;

    #[test]
    fn missing_entities_fail_the_step_requirements() {
        let mut state = SessionState {
            step: Step::StockEntry,
            ..SessionState::default()
        };
        assert!(!state.satisfies_step());
        state.actor = Some(ActorInfo::new("Asha", "North", Role::Bde));
        assert!(!state.satisfies_step());
        state.draft_store = Some(Store::new("Glow", "S1"));
        assert!(state.satisfies_step());
    }

    #[test]
    fn zero_counts_still_count_as_draft_work() {
        let mut state = SessionState::default();
        assert!(!state.has_uncommitted_work());
        state.draft_stock.set("NH001", 0);
        assert!(state.has_uncommitted_work());
        state.clear_draft();
        assert!(!state.has_uncommitted_work());
    }
}
