//! Inputs to and results of [`super::engine::WorkflowEngine::dispatch`].

use crate::model::actor::Role;
use crate::model::store::Store;
use crate::repository::Upsert;
use crate::requests::AdminCredentials;
use crate::workflow::step::Step;

/// A user intent. Which actions are legal depends on the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Login
    Login {
        name: String,
        region: String,
        role: Option<Role>,
    },
    OpenAdmin,

    // Admin branch
    AdminLogin(AdminCredentials),
    LeaveAdmin,

    // Dashboard
    StartAudit,
    EditRecord(String),
    DeleteRecord(String),
    ImportToken(String),
    ShareRecord(String),
    FinishSession,

    // Store selection
    SelectStore(Store),
    SaveStore { name: String, bsrn: String },
    ForgetStore(String),

    // Stock entry
    SetCount { sku: String, count: u32 },
    Increment(String),
    Decrement(String),
    AddCustomSku { code: String, name: String },
    SubmitCounts,

    /// Leaves store selection or stock entry without confirming anything.
    CancelAudit,

    // Single-store review
    Confirm,
    EditDraft,
    ShareDraft,
    FinishReview,

    // Session review
    ContinueSession,

    Logout,
    ConfirmPending,
    DeclinePending,
}

/// Why an action left the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    IllegalInStep(Step),
    MissingField(&'static str),
    RecordNotFound(String),
    InvalidToken,
    UnknownSku(String),
    DuplicateSku(String),
    DuplicateStore(String),
    AccessDenied,
    NothingPending,
}

/// Question the UI must put to the user before a destructive action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Leaving stock entry would throw the draft away.
    DiscardDraft { store_name: String },
    DeleteRecord { record_id: String, store_name: String },
    /// Logging out would erase the session and its saved blob.
    EndSession { stores: usize, units: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran; the session was persisted.
    Applied,
    /// A share code was produced (the action may also have changed state).
    Token(String),
    /// An imported share code was merged into the repository.
    Imported(Upsert),
    /// The action is parked until [`Action::ConfirmPending`].
    ConfirmationRequired(Prompt),
    /// A parked action was dropped. Nothing changed.
    Declined,
    Ignored(Rejection),
}

impl Outcome {
    /// Outcomes after which the session may have changed.
    pub fn commits(&self) -> bool {
        matches!(
            self,
            Outcome::Applied | Outcome::Token(_) | Outcome::Imported(_)
        )
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}
