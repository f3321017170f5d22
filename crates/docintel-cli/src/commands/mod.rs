//! CLI command handlers

pub mod memory;
pub mod process;
pub mod providers;
pub mod query;
pub mod serve;
