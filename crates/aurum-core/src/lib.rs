//! aurum-core
//!
//! Financial analytics and scheduling engine.
//! Depends on aurum-domain. Every operation is a pure function of a snapshot
//! and an explicitly supplied instant: no I/O, no storage, no wall clock.

pub mod budget_service;
pub mod debt_service;
pub mod error;
pub mod range;
pub mod recurrence_service;
pub mod summary_service;
pub mod time;
pub mod validation;

pub use budget_service::*;
pub use debt_service::*;
pub use error::CoreError;
pub use range::DateRange;
pub use recurrence_service::*;
pub use summary_service::*;
pub use time::{Calendar, Clock, FixedClock, SystemClock};
