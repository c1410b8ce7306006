//! aurum-domain
//!
//! Pure domain models (ledger entries, recurring templates, budgets, liabilities,
//! savings goals) and the computed structures derived from them.
//! No I/O, no clock access, no persistence. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod entry;
pub mod goal;
pub mod liability;
pub mod recurring;
pub mod snapshot;
pub mod summary;

pub use budget::*;
pub use common::*;
pub use entry::*;
pub use goal::*;
pub use liability::*;
pub use recurring::*;
pub use snapshot::*;
pub use summary::*;
