//! aurum-config
//!
//! Engine settings and their on-disk JSON form.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, MAX_UPCOMING_WINDOW_DAYS, MAX_UTC_OFFSET_MINUTES};
