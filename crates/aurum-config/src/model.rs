use serde::{Deserialize, Serialize};

use aurum_domain::{
    CatchUpPolicy, PriorityThresholds, DEFAULT_ALERT_THRESHOLD, HIGH_INTEREST_RATE,
    MAX_TREND_MONTHS, MEDIUM_INTEREST_RATE,
};

use crate::ConfigError;

/// Widest UTC offset accepted for the evaluation calendar, in minutes.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Longest look-ahead for upcoming recurring transactions, about a century.
pub const MAX_UPCOMING_WINDOW_DAYS: i64 = 36_500;

/// Tunables for an engine instance. Every field falls back to its default when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Minutes east of UTC used for every day and month boundary.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "Config::default_alert_threshold_value")]
    pub default_alert_threshold: f64,
    #[serde(default = "Config::default_trend_months")]
    pub trend_months: usize,
    #[serde(default = "Config::default_upcoming_window_days")]
    pub upcoming_window_days: i64,
    #[serde(default)]
    pub catch_up: CatchUpPolicy,
    #[serde(default = "Config::default_high_interest_rate")]
    pub high_interest_rate: f64,
    #[serde(default = "Config::default_medium_interest_rate")]
    pub medium_interest_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            default_alert_threshold: Self::default_alert_threshold_value(),
            trend_months: Self::default_trend_months(),
            upcoming_window_days: Self::default_upcoming_window_days(),
            catch_up: CatchUpPolicy::default(),
            high_interest_rate: Self::default_high_interest_rate(),
            medium_interest_rate: Self::default_medium_interest_rate(),
        }
    }
}

impl Config {
    pub fn default_alert_threshold_value() -> f64 {
        DEFAULT_ALERT_THRESHOLD
    }

    pub fn default_trend_months() -> usize {
        12
    }

    pub fn default_upcoming_window_days() -> i64 {
        7
    }

    pub fn default_high_interest_rate() -> f64 {
        HIGH_INTEREST_RATE
    }

    pub fn default_medium_interest_rate() -> f64 {
        MEDIUM_INTEREST_RATE
    }

    pub fn priority_thresholds(&self) -> PriorityThresholds {
        PriorityThresholds {
            high: self.high_interest_rate,
            medium: self.medium_interest_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes {} outside ±{}",
                self.utc_offset_minutes, MAX_UTC_OFFSET_MINUTES
            )));
        }
        if !(0.0..=1.0).contains(&self.default_alert_threshold) {
            return Err(ConfigError::Invalid(format!(
                "default_alert_threshold {} outside [0, 1]",
                self.default_alert_threshold
            )));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(ConfigError::Invalid(format!(
                "trend_months {} outside [1, {}]",
                self.trend_months, MAX_TREND_MONTHS
            )));
        }
        if !(0..=MAX_UPCOMING_WINDOW_DAYS).contains(&self.upcoming_window_days) {
            return Err(ConfigError::Invalid(format!(
                "upcoming_window_days {} outside [0, {}]",
                self.upcoming_window_days, MAX_UPCOMING_WINDOW_DAYS
            )));
        }
        if !self.medium_interest_rate.is_finite()
            || !self.high_interest_rate.is_finite()
            || self.medium_interest_rate < 0.0
            || self.medium_interest_rate > self.high_interest_rate
        {
            return Err(ConfigError::Invalid(format!(
                "interest thresholds must satisfy 0 <= medium ({}) <= high ({})",
                self.medium_interest_rate, self.high_interest_rate
            )));
        }
        Ok(())
    }
}
