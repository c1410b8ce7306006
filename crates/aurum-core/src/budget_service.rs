//! Provides budget aggregation and status classification over expense entries.

use chrono::{DateTime, Utc};

use aurum_domain::{Budget, BudgetAnalysis, BudgetReport, BudgetStatus, LedgerEntry};

use crate::time::Calendar;

/// Stateless budgeting utilities that operate over entry snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Sums expenses in the budget's category within the calendar month of `now`.
    pub fn current_spent(
        budget: &Budget,
        entries: &[LedgerEntry],
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> f64 {
        entries
            .iter()
            .filter(|entry| entry.kind.expense_category() == Some(budget.category))
            .filter(|entry| calendar.same_month(entry.date, now))
            .map(|entry| entry.amount)
            .sum()
    }

    /// Spent fraction of the limit clamped to `[0, 1]`. A non-positive limit yields zero.
    pub fn progress(budget: &Budget, spent: f64) -> f64 {
        if budget.monthly_limit > 0.0 {
            (spent / budget.monthly_limit).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Builds the derived state of one budget for the month containing `now`.
    pub fn report(
        budget: &Budget,
        entries: &[LedgerEntry],
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> BudgetReport {
        let current_spent = Self::current_spent(budget, entries, now, calendar);
        let progress = Self::progress(budget, current_spent);
        BudgetReport {
            budget_id: budget.id,
            name: budget.name.clone(),
            category: budget.category,
            monthly_limit: budget.monthly_limit,
            current_spent,
            progress,
            remaining: budget.monthly_limit - current_spent,
            status: BudgetStatus::classify(progress, budget.alert_threshold),
        }
    }

    /// Summarizes every active budget.
    ///
    /// `overall_status` is the worst individual status, not an average.
    pub fn analyze(
        budgets: &[Budget],
        entries: &[LedgerEntry],
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> BudgetAnalysis {
        let reports: Vec<BudgetReport> = budgets
            .iter()
            .filter(|budget| budget.is_active)
            .map(|budget| Self::report(budget, entries, now, calendar))
            .collect();

        let count = |status: BudgetStatus| reports.iter().filter(|r| r.status == status).count();
        let overall_status = reports
            .iter()
            .map(|report| report.status)
            .max()
            .unwrap_or(BudgetStatus::OnTrack);

        BudgetAnalysis {
            total_budgeted: reports.iter().map(|r| r.monthly_limit).sum(),
            total_spent: reports.iter().map(|r| r.current_spent).sum(),
            budgets_on_track: count(BudgetStatus::OnTrack),
            budgets_near_limit: count(BudgetStatus::NearLimit),
            budgets_over_budget: count(BudgetStatus::OverBudget),
            overall_status,
            reports,
        }
    }

    /// Active budgets that are near their limit or over it.
    pub fn alerts(
        budgets: &[Budget],
        entries: &[LedgerEntry],
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Vec<BudgetReport> {
        budgets
            .iter()
            .filter(|budget| budget.is_active)
            .map(|budget| Self::report(budget, entries, now, calendar))
            .filter(|report| report.status.needs_attention())
            .collect()
    }
}
