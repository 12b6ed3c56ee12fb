//! Component state for the collection app.
//!
//! The engine owns everything that is session data and persists it on every
//! committed action. The fields next to it are transient UI: half-typed form
//! values, the open share sheet, and the admin listing.

use common::model::actor::Role;
use common::model::sku::builtin_catalog;
use common::model::submission::Submission;
use common::workflow::WorkflowEngine;

use crate::browser::{BrowserClock, LocalStorageStore, ServerApprovedGate};

pub type Engine = WorkflowEngine<LocalStorageStore, BrowserClock>;

/// A share code ready to hand over, with the store it describes.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareSheet {
    pub title: String,
    pub message: String,
}

pub struct CollectorComponent {
    pub engine: Engine,
    pub gate: ServerApprovedGate,

    pub login_name: String,
    pub login_region: String,
    pub login_role: Option<Role>,

    pub admin_id: String,
    pub admin_password: String,

    pub store_name: String,
    pub store_bsrn: String,

    pub sku_code: String,
    pub sku_name: String,
    /// Case-insensitive match on SKU name or code in stock entry.
    pub sku_filter: String,

    pub import_text: String,
    pub share: Option<ShareSheet>,

    /// A request to the backend is in flight.
    pub busy: bool,

    pub admin_role: Option<Role>,
    pub submissions: Vec<Submission>,
}

impl CollectorComponent {
    pub fn new() -> Self {
        let gate = ServerApprovedGate::default();
        let engine = WorkflowEngine::restore(
            LocalStorageStore,
            BrowserClock,
            Box::new(gate.clone()),
            builtin_catalog(),
        );
        // A resumed session keeps the last identity in the login form.
        let (login_name, login_region, login_role) = match engine.actor() {
            Some(actor) => (actor.name.clone(), actor.region.clone(), Some(actor.role)),
            None => (String::new(), String::new(), None),
        };
        Self {
            engine,
            gate,
            login_name,
            login_region,
            login_role,
            admin_id: String::new(),
            admin_password: String::new(),
            store_name: String::new(),
            store_bsrn: String::new(),
            sku_code: String::new(),
            sku_name: String::new(),
            sku_filter: String::new(),
            import_text: String::new(),
            share: None,
            busy: false,
            admin_role: None,
            submissions: Vec::new(),
        }
    }
}
