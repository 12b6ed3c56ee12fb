use common::model::actor::Role;
use common::model::submission::Submission;
use common::requests::AdminCredentials;
use common::workflow::Action;

/// Form fields kept in the component rather than the engine: they are not
/// session data until submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    LoginName,
    LoginRegion,
    AdminId,
    AdminPassword,
    StoreName,
    StoreBsrn,
    SkuCode,
    SkuName,
    SkuFilter,
    ImportText,
}

pub enum Msg {
    /// Straight through to `WorkflowEngine::dispatch`.
    Dispatch(Action),
    Input(Field, String),
    SetLoginRole(Option<Role>),
    SubmitLogin,
    SubmitNewStore { count_now: bool },
    SubmitCustomSku,
    SubmitImport,
    /// Raw text from a count box; blank means zero.
    CountInput { sku: String, raw: String },
    CloseShare,

    ExportSession,
    ExportDraft,
    SyncSession,
    SyncFinished(Result<usize, String>),

    SubmitAdminLogin,
    AdminChecked { credentials: AdminCredentials, granted: bool },
    AdminCheckFailed(String),
    AdminSetRole(Option<Role>),
    AdminRefresh,
    AdminLoaded(Result<Vec<Submission>, String>),
    AdminDelete(String),
    AdminDeleted(Result<String, String>),
    AdminExport,
    AdminShare(String),
    LeaveAdmin,
}
