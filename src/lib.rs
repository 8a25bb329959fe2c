#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the ledger, budget reconciliation, summary, and
//! forecasting primitives behind a personal finance tracker.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod sample;
pub mod storage;
pub mod utils;

pub use crate::core::ledger_manager::{LedgerEvent, LedgerManager, LedgerObserver, TracingObserver};
pub use crate::core::random::{FixedSequence, RandomSource, SeededRandom, ThreadRandom};
pub use crate::core::services::{
    BudgetService, ForecastService, SummaryService, TransactionService,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
