//! Ledger engine, services, and supporting utilities.

pub mod ledger_manager;
pub mod random;
pub mod services;
pub mod utils;
