//! Cash-flow summaries, trend series, and category breakdowns.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};

use aurum_domain::{
    common::{month_start, shift_month},
    total_amount, CashFlowAnalysis, CashFlowStatus, EntryKind, ExpenseBreakdownItem,
    ExpenseCategory, FinancialSummary, IncomeCategory, LedgerEntry, Liability, MonthlyTrend,
    SavingsGoal, MAX_TREND_MONTHS,
};

use crate::{range::DateRange, time::Calendar};

/// Number of months in the default trend series.
pub const DEFAULT_TREND_MONTHS: usize = 12;

/// Number of entries in the default recent-activity list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

pub struct SummaryService;

impl SummaryService {
    /// Income and expenses within the calendar month of `as_of`, plus portfolio totals.
    pub fn financial_summary(
        entries: &[LedgerEntry],
        savings_goals: &[SavingsGoal],
        liabilities: &[Liability],
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> FinancialSummary {
        let mut income = 0.0;
        let mut expenses = 0.0;
        for entry in entries.iter().filter(|e| calendar.same_month(e.date, as_of)) {
            match entry.kind {
                EntryKind::Income(_) => income += entry.amount,
                EntryKind::Expense(_) => expenses += entry.amount,
            }
        }
        FinancialSummary::from_parts(
            income,
            expenses,
            total_amount(savings_goals),
            total_amount(liabilities),
        )
    }

    pub fn cash_flow_analysis(summary: &FinancialSummary) -> CashFlowAnalysis {
        let net_cash_flow = summary.total_income - summary.total_expenses;
        let savings_rate = if summary.total_income > 0.0 {
            (net_cash_flow / summary.total_income) * 100.0
        } else {
            0.0
        };
        CashFlowAnalysis {
            monthly_income: summary.total_income,
            monthly_expenses: summary.total_expenses,
            net_cash_flow,
            savings_rate,
            net_worth: summary.net_worth,
            status: CashFlowStatus::from_net(net_cash_flow),
        }
    }

    /// Exactly `months` consecutive calendar months ending with the month of `as_of`,
    /// oldest first. Months without entries are zero-filled. `months` is capped at
    /// [`MAX_TREND_MONTHS`].
    pub fn monthly_trends(
        entries: &[LedgerEntry],
        months: usize,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Vec<MonthlyTrend> {
        let mut buckets: HashMap<(i32, u32), (f64, f64)> = HashMap::new();
        for entry in entries {
            let bucket = buckets.entry(calendar.month_key(entry.date)).or_default();
            match entry.kind {
                EntryKind::Income(_) => bucket.0 += entry.amount,
                EntryKind::Expense(_) => bucket.1 += entry.amount,
            }
        }

        let anchor = month_start(calendar.local_date(as_of));
        (0..months.min(MAX_TREND_MONTHS))
            .rev()
            .map(|back| {
                let month = i32::try_from(back).map_or(anchor, |back| shift_month(anchor, -back));
                let (income, expenses) = buckets
                    .get(&(month.year(), month.month()))
                    .copied()
                    .unwrap_or_default();
                MonthlyTrend {
                    month,
                    income,
                    expenses,
                    net_flow: income - expenses,
                }
            })
            .collect()
    }

    /// Expense totals per category with their share of all expenses, largest first.
    ///
    /// Returns an empty breakdown when total expenses are not positive.
    pub fn expense_breakdown(entries: &[LedgerEntry]) -> Vec<ExpenseBreakdownItem> {
        let by_category = Self::expenses_by_category(entries);
        let total: f64 = by_category.values().sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut items: Vec<ExpenseBreakdownItem> = by_category
            .into_iter()
            .map(|(category, amount)| ExpenseBreakdownItem {
                category,
                amount,
                percentage: (amount / total) * 100.0,
            })
            .collect();
        items.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        items
    }

    pub fn expenses_by_category(entries: &[LedgerEntry]) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals = BTreeMap::new();
        for entry in entries {
            if let EntryKind::Expense(category) = entry.kind {
                *totals.entry(category).or_insert(0.0) += entry.amount;
            }
        }
        totals
    }

    pub fn incomes_by_category(entries: &[LedgerEntry]) -> BTreeMap<IncomeCategory, f64> {
        let mut totals = BTreeMap::new();
        for entry in entries {
            if let EntryKind::Income(category) = entry.kind {
                *totals.entry(category).or_insert(0.0) += entry.amount;
            }
        }
        totals
    }

    /// Newest entries first; ties are broken by id so the order is stable.
    pub fn recent_transactions(entries: &[LedgerEntry], limit: usize) -> Vec<LedgerEntry> {
        let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        sorted.into_iter().take(limit).cloned().collect()
    }

    pub fn filter_by_range(
        entries: &[LedgerEntry],
        range: &DateRange,
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|entry| range.contains(entry.date, now, calendar))
            .cloned()
            .collect()
    }
}
