//! One render function per workflow step.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod review_session;
pub mod review_single;
pub mod stock_entry;
pub mod store_select;
