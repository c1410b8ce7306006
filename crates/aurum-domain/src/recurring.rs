//! Recurring transaction templates and the scheduler's output records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, entry::*};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A templated ledger entry that regenerates on a fixed schedule.
pub struct RecurringTransaction {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub kind: EntryKind,
    pub start_date: DateTime<Utc>,
    /// Last instant at which an occurrence may still be posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "RecurringTransaction::default_active")]
    pub is_active: bool,
    pub next_due: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_processed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecurringTransaction {
    /// Creates an active template whose first occurrence falls on `start_date`.
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        kind: EntryKind,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            frequency,
            kind,
            start_date,
            end_date: None,
            is_active: true,
            next_due: start_date,
            last_processed: None,
            description: None,
        }
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Whether `instant` is still inside the optional end bound.
    pub fn within_end(&self, instant: DateTime<Utc>) -> bool {
        self.end_date.map_or(true, |end| instant <= end)
    }

    fn default_active() -> bool {
        true
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringTransaction {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for RecurringTransaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
/// Controls how far a single posting advances an overdue schedule.
pub enum CatchUpPolicy {
    /// Advance exactly one occurrence per posting; backlogs replay one per day visited.
    #[default]
    OnePerEvaluation,
    /// Post once, then move `next_due` past the evaluation instant, dropping the backlog.
    LatestOnly,
}

impl fmt::Display for CatchUpPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CatchUpPolicy::OnePerEvaluation => "One Per Evaluation",
            CatchUpPolicy::LatestOnly => "Latest Only",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// The atomic unit of scheduler output: a new entry plus the advanced template.
///
/// `previous_next_due` and `previous_last_processed` capture the schedule the
/// posting was computed from so a store can reject the write if it moved.
pub struct ScheduledPosting {
    pub entry: LedgerEntry,
    pub updated: RecurringTransaction,
    pub previous_next_due: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_last_processed: Option<DateTime<Utc>>,
}

impl ScheduledPosting {
    pub fn recurring_id(&self) -> Uuid {
        self.updated.id
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Totals of active monthly templates split by direction.
pub struct RecurringTotals {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}
