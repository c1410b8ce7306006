//! Liabilities and the amortization structures computed for them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Annual rate (percent) above which a debt is treated as high priority.
pub const HIGH_INTEREST_RATE: f64 = 15.0;
/// Annual rate (percent) above which a debt is treated as medium priority.
pub const MEDIUM_INTEREST_RATE: f64 = 7.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityType {
    CreditCard,
    PersonalLoan,
    Mortgage,
    StudentLoan,
    CarLoan,
    Other,
}

impl fmt::Display for LiabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiabilityType::CreditCard => "Credit Card",
            LiabilityType::PersonalLoan => "Personal Loan",
            LiabilityType::Mortgage => "Mortgage",
            LiabilityType::StudentLoan => "Student Loan",
            LiabilityType::CarLoan => "Car Loan",
            LiabilityType::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    pub liability_type: LiabilityType,
    pub balance: f64,
    /// Annual percentage rate, e.g. `19.99`.
    pub interest_rate: f64,
    pub minimum_payment: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Liability {
    pub fn new(
        name: impl Into<String>,
        liability_type: LiabilityType,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            liability_type,
            balance,
            interest_rate,
            minimum_payment,
            due_date,
            description: None,
        }
    }

    pub fn priority(&self, thresholds: PriorityThresholds) -> DebtPriority {
        DebtPriority::classify(self.interest_rate, thresholds)
    }

    /// Share of `monthly_income` consumed by this debt's minimum payment.
    pub fn debt_to_income_ratio(&self, monthly_income: f64) -> f64 {
        if monthly_income > 0.0 {
            self.minimum_payment / monthly_income
        } else {
            0.0
        }
    }
}

impl Identifiable for Liability {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Liability {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Liability {
    fn amount(&self) -> f64 {
        self.balance
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriorityThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high: HIGH_INTEREST_RATE,
            medium: MEDIUM_INTEREST_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebtPriority {
    Low,
    Medium,
    High,
}

impl DebtPriority {
    pub fn classify(interest_rate: f64, thresholds: PriorityThresholds) -> Self {
        if interest_rate > thresholds.high {
            DebtPriority::High
        } else if interest_rate > thresholds.medium {
            DebtPriority::Medium
        } else {
            DebtPriority::Low
        }
    }
}

impl fmt::Display for DebtPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtPriority::High => "High Priority",
            DebtPriority::Medium => "Medium Priority",
            DebtPriority::Low => "Low Priority",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Outcome of simulating a fixed monthly payment until the balance clears.
pub struct PayoffResult {
    pub monthly_payment: f64,
    pub months_to_payoff: u32,
    pub payoff_date: DateTime<Utc>,
    pub total_interest_paid: f64,
    pub total_amount_paid: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// One simulated month of an amortization schedule.
pub struct AmortizationRow {
    pub month: u32,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}
