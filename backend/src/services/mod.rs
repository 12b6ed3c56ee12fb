pub mod admin;
pub mod audits;
