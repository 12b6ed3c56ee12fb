//! Collaborators the engine needs from its host: a clock and the admin gate.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::requests::AdminCredentials;

/// Source of wall-clock time in milliseconds since the epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// `std::time` based clock for native hosts. Not usable on
/// `wasm32-unknown-unknown`, where the frontend supplies its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// Allow/deny check in front of the admin dashboard.
pub trait AdminGate {
    fn check(&self, credentials: &AdminCredentials) -> bool;
}

/// Gate comparing against one configured id/password pair.
#[derive(Debug, Clone)]
pub struct StaticAdminGate {
    admin_id: String,
    password: String,
}

impl StaticAdminGate {
    pub fn new(admin_id: &str, password: &str) -> Self {
        Self {
            admin_id: admin_id.trim().to_string(),
            password: password.to_string(),
        }
    }
}

impl AdminGate for StaticAdminGate {
    fn check(&self, credentials: &AdminCredentials) -> bool {
        !self.admin_id.is_empty()
            && credentials.admin_id.trim() == self.admin_id
            && credentials.password == self.password
    }
}
