//! Browser implementations of the engine's ports.

mod clock;
mod gate;
mod storage;

pub use clock::BrowserClock;
pub use gate::ServerApprovedGate;
pub use storage::LocalStorageStore;
