//! Cash-flow, trend, and breakdown structures produced by the aggregators.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::ExpenseCategory;

/// Longest trend series the aggregators will produce.
pub const MAX_TREND_MONTHS: usize = 1_200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Income and expense totals for the current month plus the asset/liability position.
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub monthly_savings: f64,
}

impl FinancialSummary {
    pub fn from_parts(
        total_income: f64,
        total_expenses: f64,
        total_assets: f64,
        total_liabilities: f64,
    ) -> Self {
        Self {
            total_income,
            total_expenses,
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
            monthly_savings: total_income - total_expenses,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowStatus {
    Positive,
    Negative,
    Neutral,
}

impl CashFlowStatus {
    pub fn from_net(net_cash_flow: f64) -> Self {
        if net_cash_flow > 0.0 {
            CashFlowStatus::Positive
        } else if net_cash_flow < 0.0 {
            CashFlowStatus::Negative
        } else {
            CashFlowStatus::Neutral
        }
    }
}

impl fmt::Display for CashFlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CashFlowStatus::Positive => "Positive",
            CashFlowStatus::Negative => "Negative",
            CashFlowStatus::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CashFlowAnalysis {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub net_cash_flow: f64,
    /// Net cash flow as a percentage of income; zero when there is no income.
    pub savings_rate: f64,
    pub net_worth: f64,
    pub status: CashFlowStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Income and expense totals for one calendar month.
pub struct MonthlyTrend {
    /// First day of the month in the evaluation time zone.
    pub month: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExpenseBreakdownItem {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub percentage: f64,
}
