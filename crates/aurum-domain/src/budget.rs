//! Monthly category budgets and their computed status structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, entry::ExpenseCategory};

/// Fraction of the limit at which a budget is reported as near its limit.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub category: ExpenseCategory,
    pub monthly_limit: f64,
    #[serde(default = "Budget::default_alert_threshold")]
    pub alert_threshold: f64,
    #[serde(default = "Budget::default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Budget {
    pub fn new(name: impl Into<String>, category: ExpenseCategory, monthly_limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            monthly_limit,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            is_active: true,
            description: None,
        }
    }

    pub fn with_alert_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn default_alert_threshold() -> f64 {
        DEFAULT_ALERT_THRESHOLD
    }

    fn default_active() -> bool {
        true
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
/// Spending classification against a limit, ordered from best to worst.
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    /// Classifies a clamped progress fraction against an alert threshold.
    pub fn classify(progress: f64, alert_threshold: f64) -> Self {
        if progress >= 1.0 {
            BudgetStatus::OverBudget
        } else if progress >= alert_threshold {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn needs_attention(self) -> bool {
        !matches!(self, BudgetStatus::OnTrack)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::NearLimit => "Near Limit",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Derived state of a single budget for the month containing the evaluation instant.
pub struct BudgetReport {
    pub budget_id: Uuid,
    pub name: String,
    pub category: ExpenseCategory,
    pub monthly_limit: f64,
    pub current_spent: f64,
    /// Spent fraction of the limit, clamped to `[0, 1]`.
    pub progress: f64,
    /// May be negative once the limit is exceeded.
    pub remaining: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Portfolio-level view over every active budget.
pub struct BudgetAnalysis {
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub budgets_on_track: usize,
    pub budgets_near_limit: usize,
    pub budgets_over_budget: usize,
    pub overall_status: BudgetStatus,
    pub reports: Vec<BudgetReport>,
}

impl BudgetAnalysis {
    pub fn budget_count(&self) -> usize {
        self.budgets_on_track + self.budgets_near_limit + self.budgets_over_budget
    }
}
