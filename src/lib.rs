#![doc(test(attr(deny(warnings))))]

//! Aurum Engine computes personal-finance analytics and drives recurring
//! transaction schedules over a read-only snapshot of user records.
//!
//! The member crates are re-exported so callers depend on one crate:
//! [`aurum_domain`] for records, [`aurum_core`] for the services,
//! [`aurum_codec`] for the serialization boundary, and [`aurum_config`] for
//! engine settings.

pub mod engine;
pub mod errors;
pub mod utils;

pub use aurum_codec;
pub use aurum_config;
pub use aurum_core;
pub use aurum_domain;

pub use engine::{Dashboard, FinanceEngine};
pub use errors::{EngineError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Aurum engine tracing initialized.");
    });
}
