//! Text representations of the working set.
//!
//! - [`pairs`]: the `[[sku, count], ...]` form every stock map takes on disk
//!   or on the wire.
//! - [`share`]: single-store hand-off code, copy-pasted between devices.
//! - [`session`]: whole-session blob used for crash recovery.

pub mod pairs;
pub mod session;
pub mod share;
