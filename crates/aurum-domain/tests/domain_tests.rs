use aurum_domain::{
    shift_month, total_amount, Budget, BudgetStatus, DebtPriority, EntryKind, ExpenseCategory,
    FinanceSnapshot, FinancialSummary, Frequency, GoalCategory, IncomeCategory, LedgerEntry,
    Liability, LiabilityType, PriorityThresholds, SavingsGoal, DEFAULT_ALERT_THRESHOLD,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn frequency_next_date_covers_every_cadence() {
    let start = date(2025, 1, 1);
    assert_eq!(Frequency::Daily.next_date(start), date(2025, 1, 2));
    assert_eq!(Frequency::Weekly.next_date(start), date(2025, 1, 8));
    assert_eq!(Frequency::Biweekly.next_date(start), date(2025, 1, 15));
    assert_eq!(Frequency::Monthly.next_date(start), date(2025, 2, 1));
    assert_eq!(Frequency::Quarterly.next_date(start), date(2025, 4, 1));
    assert_eq!(Frequency::Yearly.next_date(start), date(2026, 1, 1));
}

#[test]
fn month_shifts_clamp_to_month_length() {
    assert_eq!(Frequency::Monthly.next_date(date(2024, 1, 31)), date(2024, 2, 29));
    assert_eq!(Frequency::Monthly.next_date(date(2023, 1, 31)), date(2023, 2, 28));
    assert_eq!(Frequency::Quarterly.next_date(date(2024, 11, 30)), date(2025, 2, 28));
    assert_eq!(Frequency::Yearly.next_date(date(2024, 2, 29)), date(2025, 2, 28));
    assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
    assert_eq!(shift_month(date(2024, 1, 15), -13), date(2022, 12, 15));
}

#[test]
fn next_date_is_never_earlier_than_input() {
    let mut current = date(2023, 12, 31);
    for frequency in Frequency::ALL {
        for _ in 0..40 {
            let next = frequency.next_date(current);
            assert!(next > current, "{frequency} went backwards from {current}");
            current = next;
        }
    }
}

#[test]
fn next_date_stays_put_at_end_of_calendar() {
    for frequency in Frequency::ALL {
        assert_eq!(frequency.next_date(NaiveDate::MAX), NaiveDate::MAX);
    }
    let near_end = NaiveDate::MAX - chrono::Duration::days(3);
    assert_eq!(Frequency::Daily.next_date(near_end), near_end + chrono::Duration::days(1));
    assert_eq!(Frequency::Weekly.next_date(near_end), near_end);
    assert_eq!(shift_month(date(2024, 1, 15), i32::MAX), date(2024, 1, 15));
    assert_eq!(shift_month(NaiveDate::MIN, i32::MIN), NaiveDate::MIN);
}

#[test]
fn savings_goal_progress_is_clamped() {
    let deadline = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let half = SavingsGoal::new("Trip", 2000.0, 1000.0, deadline, GoalCategory::Vacation);
    assert_eq!(half.progress(), 0.5);
    assert!(!half.is_completed());
    assert_eq!(half.remaining(), 1000.0);

    let over = SavingsGoal::new("Fund", 1000.0, 1500.0, deadline, GoalCategory::Emergency);
    assert_eq!(over.progress(), 1.0);
    assert!(over.is_completed());

    let degenerate = SavingsGoal::new("Zero", 0.0, 10.0, deadline, GoalCategory::Other);
    assert_eq!(degenerate.progress(), 0.0);
}

#[test]
fn budget_status_classification_uses_threshold() {
    assert_eq!(BudgetStatus::classify(0.5, 0.8), BudgetStatus::OnTrack);
    assert_eq!(BudgetStatus::classify(0.8, 0.8), BudgetStatus::NearLimit);
    assert_eq!(BudgetStatus::classify(1.0, 0.8), BudgetStatus::OverBudget);
    assert!(BudgetStatus::OverBudget > BudgetStatus::NearLimit);
    assert!(BudgetStatus::NearLimit > BudgetStatus::OnTrack);

    let budget = Budget::new("Groceries", ExpenseCategory::Food, 400.0);
    assert_eq!(budget.alert_threshold, DEFAULT_ALERT_THRESHOLD);
    assert!(budget.is_active);
}

#[test]
fn debt_priority_follows_rate_thresholds() {
    let due = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let card = Liability::new("Card", LiabilityType::CreditCard, 3000.0, 22.9, 90.0, due);
    let car = Liability::new("Car", LiabilityType::CarLoan, 9000.0, 8.5, 250.0, due);
    let home = Liability::new("Home", LiabilityType::Mortgage, 200000.0, 4.1, 1100.0, due);
    let thresholds = PriorityThresholds::default();

    assert_eq!(card.priority(thresholds), DebtPriority::High);
    assert_eq!(car.priority(thresholds), DebtPriority::Medium);
    assert_eq!(home.priority(thresholds), DebtPriority::Low);
    assert_eq!(card.debt_to_income_ratio(0.0), 0.0);
    assert_eq!(card.debt_to_income_ratio(900.0), 0.1);
}

#[test]
fn financial_summary_derives_net_values() {
    let summary = FinancialSummary::from_parts(5000.0, 3200.0, 12000.0, 4000.0);
    assert_eq!(summary.net_worth, 8000.0);
    assert_eq!(summary.monthly_savings, 1800.0);
}

#[test]
fn snapshot_partitions_entries_by_kind() {
    let when = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    let mut snapshot = FinanceSnapshot::new();
    snapshot
        .entries
        .push(LedgerEntry::income(IncomeCategory::Salary, 4000.0, when));
    snapshot
        .entries
        .push(LedgerEntry::expense(ExpenseCategory::Housing, 1500.0, when));
    snapshot
        .entries
        .push(LedgerEntry::expense(ExpenseCategory::Food, 250.0, when));

    assert_eq!(snapshot.incomes().count(), 1);
    assert_eq!(total_amount(snapshot.expenses()), 1750.0);

    let mut replacement = snapshot.entries[2].clone();
    replacement.amount = 300.0;
    snapshot.upsert_entry(replacement.clone());
    assert_eq!(snapshot.entries.len(), 3);
    assert_eq!(snapshot.entry(replacement.id).unwrap().amount, 300.0);
    assert!(snapshot.remove_entry(replacement.id));
    assert!(!snapshot.remove_entry(replacement.id));
}

#[test]
fn entry_kind_serializes_as_tagged_union() {
    let when = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    let entry = LedgerEntry::expense(ExpenseCategory::Food, 42.5, when).with_note("Lunch");
    let json: Value = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["kind"]["type"], "expense");
    assert_eq!(json["kind"]["category"], "food");
    assert_eq!(json["note"], "Lunch");
    assert!(json.get("recurring_id").is_none());

    let parsed: LedgerEntry = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.kind, EntryKind::Expense(ExpenseCategory::Food));
    assert_eq!(parsed, entry);
}
