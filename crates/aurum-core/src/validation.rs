//! Input checks applied before records enter a computation.
//!
//! Analytics never call these implicitly: a zero budget limit still yields a
//! guarded zero progress. Callers validate user input at the edge.

use aurum_domain::{Budget, FinanceSnapshot, LedgerEntry, Liability, RecurringTransaction, SavingsGoal};

use crate::CoreError;

pub fn validate_entry(entry: &LedgerEntry) -> Result<(), CoreError> {
    non_negative(entry.amount, "entry amount", entry.id)
}

pub fn validate_recurring(txn: &RecurringTransaction) -> Result<(), CoreError> {
    positive(txn.amount, "recurring amount", txn.id)?;
    if txn.next_due < txn.start_date {
        return Err(CoreError::InvalidInput(format!(
            "recurring {}: next due {} precedes start {}",
            txn.id, txn.next_due, txn.start_date
        )));
    }
    if let Some(end) = txn.end_date {
        if end < txn.start_date {
            return Err(CoreError::InvalidInput(format!(
                "recurring {}: end {} precedes start {}",
                txn.id, end, txn.start_date
            )));
        }
    }
    Ok(())
}

pub fn validate_budget(budget: &Budget) -> Result<(), CoreError> {
    positive(budget.monthly_limit, "budget limit", budget.id)?;
    if !(0.0..=1.0).contains(&budget.alert_threshold) {
        return Err(CoreError::InvalidInput(format!(
            "budget {}: alert threshold {} outside [0, 1]",
            budget.id, budget.alert_threshold
        )));
    }
    Ok(())
}

pub fn validate_liability(liability: &Liability) -> Result<(), CoreError> {
    non_negative(liability.balance, "liability balance", liability.id)?;
    non_negative(liability.interest_rate, "interest rate", liability.id)?;
    positive(liability.minimum_payment, "minimum payment", liability.id)
}

pub fn validate_goal(goal: &SavingsGoal) -> Result<(), CoreError> {
    positive(goal.target_amount, "savings target", goal.id)?;
    non_negative(goal.current_amount, "saved amount", goal.id)
}

/// Validates every record, reporting the first failure.
pub fn validate_snapshot(snapshot: &FinanceSnapshot) -> Result<(), CoreError> {
    snapshot.entries.iter().try_for_each(validate_entry)?;
    snapshot.recurring.iter().try_for_each(validate_recurring)?;
    snapshot.budgets.iter().try_for_each(validate_budget)?;
    snapshot.liabilities.iter().try_for_each(validate_liability)?;
    snapshot.savings_goals.iter().try_for_each(validate_goal)
}

fn positive(value: f64, label: &str, id: impl std::fmt::Display) -> Result<(), CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "{label} must be positive for {id}, got {value}"
        )))
    }
}

fn non_negative(value: f64, label: &str, id: impl std::fmt::Display) -> Result<(), CoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "{label} must not be negative for {id}, got {value}"
        )))
    }
}
