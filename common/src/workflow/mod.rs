//! The session workflow: steps, actions, and the engine that applies them.

pub mod action;
pub mod engine;
pub mod ports;
pub mod session;
pub mod step;

pub use action::{Action, Outcome, Prompt, Rejection};
pub use engine::WorkflowEngine;
pub use ports::{AdminGate, Clock, ManualClock, StaticAdminGate, SystemClock};
pub use session::SessionState;
pub use step::Step;
