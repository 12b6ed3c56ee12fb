use serde::{Deserialize, Serialize};

/// Screens of the collection workflow.
///
/// The main line runs `Login → Dashboard → StoreSelect → StockEntry →
/// ReviewSingle → Dashboard`, with `ReviewSession` for the compiled report.
/// The admin branch hangs off `Login` and never touches session data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    #[default]
    Login,
    Dashboard,
    StoreSelect,
    StockEntry,
    ReviewSingle,
    ReviewSession,
    AdminLogin,
    AdminDashboard,
}

impl Step {
    /// Steps that make no sense without a logged-in actor.
    pub fn needs_actor(self) -> bool {
        matches!(
            self,
            Step::Dashboard
                | Step::StoreSelect
                | Step::StockEntry
                | Step::ReviewSingle
                | Step::ReviewSession
        )
    }

    /// Steps that operate on the draft store.
    pub fn needs_draft_store(self) -> bool {
        matches!(self, Step::StockEntry | Step::ReviewSingle)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Step::AdminLogin | Step::AdminDashboard)
    }

    /// The step written to the session blob.
    pub fn persisted(self) -> Step {
        if self.is_admin() { Step::Login } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Step::ReviewSingle).unwrap(),
            "\"REVIEW_SINGLE\""
        );
        let step: Step = serde_json::from_str("\"STORE_SELECT\"").unwrap();
        assert_eq!(step, Step::StoreSelect);
    }

    #[test]
    fn draft_steps_also_need_an_actor() {
        for step in [Step::StockEntry, Step::ReviewSingle] {
            assert!(step.needs_draft_store());
            assert!(step.needs_actor());
        }
        assert!(!Step::Login.needs_actor());
        assert!(!Step::AdminDashboard.needs_actor());
        assert_eq!(Step::AdminLogin.persisted(), Step::Login);
        assert_eq!(Step::Dashboard.persisted(), Step::Dashboard);
    }
}
