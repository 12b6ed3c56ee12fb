//! Plain data shared by the engine, the codecs and both binaries.

pub mod actor;
pub mod audit;
pub mod ids;
pub mod sku;
pub mod stock;
pub mod store;
pub mod submission;
