//! Update function for the collection app.
//!
//! Session changes go through `WorkflowEngine::dispatch`; this module only
//! turns UI events into actions, reacts to the engine's outcome (toasts,
//! share sheet, clearing forms) and runs the backend calls. Every message
//! ends by refreshing the close guard.

use common::codec::share;
use common::model::store::Store;
use common::requests::{AdminCredentials, AdminDelete, AdminQuery, AuditBatch};
use common::workflow::{Action, Outcome, Rejection, Step};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::api;
use super::helpers::{
    download_bytes, import_message, rejection_message, set_window_dirty_flag, show_toast,
};
use super::messages::{Field, Msg};
use super::state::{CollectorComponent, ShareSheet};

pub fn update(component: &mut CollectorComponent, ctx: &Context<CollectorComponent>, msg: Msg) -> bool {
    let render = handle(component, ctx, msg);
    set_window_dirty_flag(component.engine.has_uncommitted_work());
    render
}

fn handle(component: &mut CollectorComponent, ctx: &Context<CollectorComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Dispatch(action) => {
            dispatch(component, action);
            true
        }
        Msg::Input(field, value) => {
            let slot = match field {
                Field::LoginName => &mut component.login_name,
                Field::LoginRegion => &mut component.login_region,
                Field::AdminId => &mut component.admin_id,
                Field::AdminPassword => &mut component.admin_password,
                Field::StoreName => &mut component.store_name,
                Field::StoreBsrn => &mut component.store_bsrn,
                Field::SkuCode => &mut component.sku_code,
                Field::SkuName => &mut component.sku_name,
                Field::SkuFilter => &mut component.sku_filter,
                Field::ImportText => &mut component.import_text,
            };
            *slot = value;
            true
        }
        Msg::SetLoginRole(role) => {
            component.login_role = role;
            true
        }
        Msg::SubmitLogin => {
            let action = Action::Login {
                name: component.login_name.clone(),
                region: component.login_region.clone(),
                role: component.login_role,
            };
            dispatch(component, action);
            true
        }
        Msg::SubmitNewStore { count_now } => {
            let name = component.store_name.clone();
            let bsrn = component.store_bsrn.clone();
            let saved = dispatch(
                component,
                Action::SaveStore {
                    name: name.clone(),
                    bsrn: bsrn.clone(),
                },
            );
            let already_saved = matches!(saved, Outcome::Ignored(Rejection::DuplicateStore(_)));
            if saved.commits() || already_saved {
                component.store_name.clear();
                component.store_bsrn.clear();
                if count_now {
                    let store = component
                        .engine
                        .saved_stores()
                        .into_iter()
                        .find(|s| s.has_bsrn(&bsrn))
                        .unwrap_or_else(|| Store::new(&name, &bsrn));
                    dispatch(component, Action::SelectStore(store));
                }
            }
            true
        }
        Msg::SubmitCustomSku => {
            let action = Action::AddCustomSku {
                code: component.sku_code.clone(),
                name: component.sku_name.clone(),
            };
            if dispatch(component, action).commits() {
                show_toast("Item added to this session.");
                component.sku_code.clear();
                component.sku_name.clear();
            }
            true
        }
        Msg::SubmitImport => {
            let text = component.import_text.clone();
            if dispatch(component, Action::ImportToken(text)).commits() {
                component.import_text.clear();
            }
            true
        }
        Msg::CountInput { sku, raw } => {
            let raw = raw.trim();
            let count = if raw.is_empty() { Ok(0) } else { raw.parse::<u32>() };
            match count {
                Ok(count) => {
                    dispatch(component, Action::SetCount { sku, count });
                }
                Err(_) => show_toast("Counts must be whole numbers of zero or more."),
            }
            true
        }
        Msg::CloseShare => {
            component.share = None;
            true
        }

        Msg::ExportSession => {
            match component.engine.audit_batch() {
                Some(batch) if !batch.audits.is_empty() => start_export(batch),
                _ => show_toast("There are no audited stores to export yet."),
            }
            false
        }
        Msg::ExportDraft => {
            match component.engine.draft_batch() {
                Some(batch) => start_export(batch),
                None => show_toast("There is no count to export."),
            }
            false
        }
        Msg::SyncSession => {
            let Some(batch) = component.engine.audit_batch().filter(|b| !b.audits.is_empty()) else {
                show_toast("There are no audited stores to sync yet.");
                return false;
            };
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::SyncFinished(api::sync_batch(&batch).await));
            });
            true
        }
        Msg::SyncFinished(result) => {
            component.busy = false;
            match result {
                Ok(0) => show_toast("Already synced, nothing new to store."),
                Ok(stored) => show_toast(&format!("Synced {} store audits.", stored)),
                Err(e) => {
                    gloo_console::error!(format!("sync failed: {}", e));
                    show_toast(&format!("Sync failed: {}", e));
                }
            }
            true
        }

        Msg::SubmitAdminLogin => {
            let credentials = AdminCredentials {
                admin_id: component.admin_id.trim().to_string(),
                password: component.admin_password.clone(),
            };
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::admin_login(&credentials).await {
                    Ok(granted) => link.send_message(Msg::AdminChecked { credentials, granted }),
                    Err(e) => link.send_message(Msg::AdminCheckFailed(e)),
                }
            });
            true
        }
        Msg::AdminChecked { credentials, granted } => {
            component.busy = false;
            if granted {
                component.gate.approve(credentials.clone());
            }
            if dispatch(component, Action::AdminLogin(credentials)).commits() {
                component.admin_password.clear();
                ctx.link().send_message(Msg::AdminRefresh);
            }
            true
        }
        Msg::AdminCheckFailed(e) => {
            component.busy = false;
            gloo_console::error!(format!("admin login failed: {}", e));
            show_toast(&format!("Could not reach the server: {}", e));
            true
        }
        Msg::AdminSetRole(role) => {
            component.admin_role = role;
            ctx.link().send_message(Msg::AdminRefresh);
            true
        }
        Msg::AdminRefresh => {
            let Some(query) = admin_query(component) else {
                return false;
            };
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::AdminLoaded(api::list_submissions(&query).await));
            });
            true
        }
        Msg::AdminLoaded(result) => {
            component.busy = false;
            match result {
                Ok(submissions) => component.submissions = submissions,
                Err(e) => show_toast(&format!("Could not load submissions: {}", e)),
            }
            true
        }
        Msg::AdminDelete(submission_id) => {
            let Some(credentials) = component.gate.approved() else {
                return false;
            };
            if !confirm("Delete this submission for everyone?") {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                let request = AdminDelete {
                    credentials,
                    submission_id: submission_id.clone(),
                };
                let result = api::delete_submission(&request).await.map(|_| submission_id);
                link.send_message(Msg::AdminDeleted(result));
            });
            false
        }
        Msg::AdminDeleted(result) => {
            match result {
                Ok(submission_id) => {
                    component.submissions.retain(|s| s.submission_id != submission_id);
                    show_toast("Submission deleted.");
                }
                Err(e) => show_toast(&format!("Delete failed: {}", e)),
            }
            true
        }
        Msg::AdminExport => {
            let Some(query) = admin_query(component) else {
                return false;
            };
            spawn_local(async move {
                finish_download(api::export_submissions(&query).await, "SOH_Master.csv");
            });
            false
        }
        Msg::AdminShare(submission_id) => {
            if let Some(submission) = component
                .submissions
                .iter()
                .find(|s| s.submission_id == submission_id)
            {
                let store = Store {
                    id: submission.store_id.clone(),
                    bsrn: submission.store_id.clone(),
                    name: submission.store_name.clone(),
                    location: None,
                };
                component.share = Some(ShareSheet {
                    title: format!("{} ({})", store.name, store.bsrn),
                    message: share::share_message(&store, &submission.to_share_token()),
                });
            }
            true
        }
        Msg::LeaveAdmin => {
            component.gate.revoke();
            component.submissions.clear();
            dispatch(component, Action::LeaveAdmin);
            true
        }
    }
}

/// Runs one engine action and reports what the user needs to know about it.
/// Confirmation prompts are not handled here: the view reads
/// `engine.pending()` and shows the dialog.
fn dispatch(component: &mut CollectorComponent, action: Action) -> Outcome {
    let share_store = match &action {
        Action::ShareDraft => component.engine.state().draft_store.clone(),
        Action::ShareRecord(id) => component
            .engine
            .state()
            .audits
            .find_by_record_id(id)
            .map(|r| r.store.clone()),
        _ => None,
    };
    let was_admin = component.engine.step() == Step::AdminDashboard;

    let outcome = component.engine.dispatch(action);
    match &outcome {
        Outcome::Token(token) => {
            if let Some(store) = share_store {
                component.share = Some(ShareSheet {
                    title: format!("{} ({})", store.name, store.bsrn),
                    message: share::share_message(&store, token),
                });
            }
        }
        Outcome::Imported(result) => show_toast(import_message(*result)),
        Outcome::Ignored(rejection) => show_toast(&rejection_message(rejection)),
        Outcome::Applied | Outcome::ConfirmationRequired(_) | Outcome::Declined => {}
    }
    if was_admin && component.engine.step() != Step::AdminDashboard {
        component.gate.revoke();
    }
    if component.engine.step() == Step::Login && component.engine.actor().is_none() {
        component.share = None;
    }
    outcome
}

fn admin_query(component: &CollectorComponent) -> Option<AdminQuery> {
    component.gate.approved().map(|credentials| AdminQuery {
        credentials,
        role: component.admin_role,
    })
}

fn start_export(batch: AuditBatch) {
    spawn_local(async move {
        finish_download(api::export_batch(&batch).await, "SOH_Export.csv");
    });
}

fn finish_download(result: Result<api::Download, String>, fallback_name: &str) {
    match result {
        Ok(download) => {
            let name = download.file_name.as_deref().unwrap_or(fallback_name);
            match download_bytes(name, &download.bytes, "text/csv") {
                Ok(()) => show_toast(&format!("Downloaded {}", name)),
                Err(e) => {
                    gloo_console::error!(e);
                    show_toast("The browser blocked the download.");
                }
            }
        }
        Err(e) => show_toast(&format!("Export failed: {}", e)),
    }
}

fn confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}
