//! Core of the stock-on-hand collection app.
//!
//! Everything that has to stay correct no matter which screen is showing lives
//! here: the audit data model, the per-session repository of confirmed store
//! counts, the two text codecs (crash-recovery blob and hand-off share code),
//! the key/value storage port and the workflow engine that drives the session
//! from login to the compiled report.
//!
//! The crate has no browser or server dependencies. The `frontend` crate plugs
//! `localStorage` into [`storage::KeyValueStore`]; the `backend` crate consumes
//! [`requests::AuditBatch`] for export and cloud sync.

pub mod codec;
pub mod model;
pub mod repository;
pub mod requests;
pub mod storage;
pub mod workflow;
