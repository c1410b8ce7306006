//! Facade that binds a [`Config`], a [`Clock`], and the calculation services.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use aurum_codec::{decode_snapshot, encode_snapshot};
use aurum_config::{Config, ConfigError, ConfigManager};
use aurum_core::{
    validation, BudgetService, Calendar, Clock, DateRange, DebtService, ProcessingBatch,
    RecurrenceService, SummaryService, SystemClock, DEFAULT_RECENT_LIMIT,
};
use aurum_domain::{
    AmortizationRow, Budget, BudgetAnalysis, BudgetReport, CashFlowAnalysis, ExpenseBreakdownItem,
    ExpenseCategory, FinanceSnapshot, FinancialSummary, LedgerEntry, Liability, MonthlyTrend,
    PayoffResult, RecurringTotals, RecurringTransaction,
};

use crate::Result;

/// Everything the overview screen shows, computed in one pass at one instant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub as_of: DateTime<Utc>,
    pub summary: FinancialSummary,
    pub cash_flow: CashFlowAnalysis,
    pub budgets: BudgetAnalysis,
    pub budget_alerts: Vec<BudgetReport>,
    pub trends: Vec<MonthlyTrend>,
    pub breakdown: Vec<ExpenseBreakdownItem>,
    pub recent: Vec<LedgerEntry>,
    pub upcoming: Vec<RecurringTransaction>,
    pub overdue: Vec<RecurringTransaction>,
    pub recurring_totals: RecurringTotals,
    pub high_priority_debts: Vec<Liability>,
}

/// Runs every computation against the configured calendar and the injected clock.
pub struct FinanceEngine<C: Clock = SystemClock> {
    config: Config,
    calendar: Calendar,
    clock: C,
}

impl FinanceEngine<SystemClock> {
    /// Engine on the wall clock with settings read through `manager`.
    pub fn from_config_file(manager: &ConfigManager) -> Result<Self> {
        let config = manager.load()?;
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> FinanceEngine<C> {
    pub fn new(config: Config, clock: C) -> Result<Self> {
        config.validate()?;
        let calendar = Calendar::from_offset_minutes(config.utc_offset_minutes).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "utc_offset_minutes {} is not a valid offset",
                config.utc_offset_minutes
            ))
        })?;
        Ok(Self {
            config,
            calendar,
            clock,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// New budget carrying the configured alert threshold.
    pub fn new_budget(
        &self,
        name: impl Into<String>,
        category: ExpenseCategory,
        monthly_limit: f64,
    ) -> Budget {
        Budget::new(name, category, monthly_limit)
            .with_alert_threshold(self.config.default_alert_threshold)
    }

    pub fn dashboard(&self, snapshot: &FinanceSnapshot) -> Dashboard {
        let as_of = self.now();
        let calendar = &self.calendar;
        let summary = SummaryService::financial_summary(
            &snapshot.entries,
            &snapshot.savings_goals,
            &snapshot.liabilities,
            as_of,
            calendar,
        );
        let budgets = BudgetService::analyze(&snapshot.budgets, &snapshot.entries, as_of, calendar);
        let budget_alerts = budgets
            .reports
            .iter()
            .filter(|report| report.status.needs_attention())
            .cloned()
            .collect();
        let window =
            Duration::try_days(self.config.upcoming_window_days).unwrap_or(Duration::MAX);

        let dashboard = Dashboard {
            as_of,
            cash_flow: SummaryService::cash_flow_analysis(&summary),
            summary,
            budget_alerts,
            budgets,
            trends: SummaryService::monthly_trends(
                &snapshot.entries,
                self.config.trend_months,
                as_of,
                calendar,
            ),
            breakdown: SummaryService::expense_breakdown(&snapshot.entries),
            recent: SummaryService::recent_transactions(&snapshot.entries, DEFAULT_RECENT_LIMIT),
            upcoming: RecurrenceService::upcoming(&snapshot.recurring, as_of, window),
            overdue: RecurrenceService::overdue(&snapshot.recurring, as_of),
            recurring_totals: RecurrenceService::monthly_totals(&snapshot.recurring),
            high_priority_debts: DebtService::high_priority_debts(
                &snapshot.liabilities,
                self.config.priority_thresholds(),
            ),
        };
        debug!(
            %as_of,
            entries = snapshot.entries.len(),
            alerts = dashboard.budget_alerts.len(),
            "dashboard computed"
        );
        dashboard
    }

    /// Postings for every template due now, under the configured catch-up policy.
    pub fn due_postings(&self, snapshot: &FinanceSnapshot) -> ProcessingBatch {
        RecurrenceService::process_due(
            &snapshot.recurring,
            self.now(),
            &self.calendar,
            self.config.catch_up,
        )
    }

    /// Evaluates the scheduler once and applies every posting to a copy of `snapshot`.
    ///
    /// Rejected templates are returned in the batch; they do not abort the run.
    pub fn run_scheduler(
        &self,
        snapshot: &FinanceSnapshot,
    ) -> Result<(FinanceSnapshot, ProcessingBatch)> {
        let batch = self.due_postings(snapshot);
        let mut next = snapshot.clone();
        for posting in &batch.postings {
            next = RecurrenceService::commit(&next, posting)?;
        }
        if !batch.is_empty() {
            info!(
                posted = batch.postings.len(),
                rejected = batch.rejected.len(),
                "recurring transactions processed"
            );
        }
        Ok((next, batch))
    }

    /// Payoff projection at `payment`, or at the liability's minimum when `None`.
    pub fn payoff(&self, liability: &Liability, payment: Option<f64>) -> Result<PayoffResult> {
        Ok(DebtService::payoff_for(
            liability,
            payment,
            self.now(),
            &self.calendar,
        )?)
    }

    pub fn accelerated_payoff(&self, liability: &Liability, extra: f64) -> Result<PayoffResult> {
        Ok(DebtService::accelerated_payoff(
            liability,
            extra,
            self.now(),
            &self.calendar,
        )?)
    }

    pub fn amortization_schedule(
        &self,
        liability: &Liability,
        payment: Option<f64>,
    ) -> Result<Vec<AmortizationRow>> {
        Ok(DebtService::amortization_schedule(
            liability.balance,
            liability.interest_rate,
            payment.unwrap_or(liability.minimum_payment),
        )?)
    }

    pub fn entries_in(&self, snapshot: &FinanceSnapshot, range: &DateRange) -> Vec<LedgerEntry> {
        SummaryService::filter_by_range(&snapshot.entries, range, self.now(), &self.calendar)
    }

    pub fn export_snapshot(&self, snapshot: &FinanceSnapshot) -> Result<String> {
        Ok(encode_snapshot(snapshot, self.now())?)
    }

    /// Decodes and validates a snapshot produced by [`Self::export_snapshot`].
    pub fn import_snapshot(&self, data: &str) -> Result<FinanceSnapshot> {
        let envelope = decode_snapshot(data)?;
        validation::validate_snapshot(&envelope.payload)?;
        Ok(envelope.payload)
    }
}
