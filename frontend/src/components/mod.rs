pub mod collector;
pub mod sheet;
