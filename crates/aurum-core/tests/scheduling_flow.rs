use aurum_core::{Calendar, DebtService, RecurrenceService, SummaryService};
use aurum_domain::{
    CatchUpPolicy, EntryKind, ExpenseCategory, FinanceSnapshot, Frequency, IncomeCategory,
    RecurringTransaction,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Runs the scheduler every `step` between `from` and `to`, committing each posting.
fn simulate(
    mut snapshot: FinanceSnapshot,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: Duration,
    calendar: &Calendar,
) -> FinanceSnapshot {
    let mut as_of = from;
    while as_of <= to {
        let batch =
            RecurrenceService::process_due(&snapshot.recurring, as_of, calendar, CatchUpPolicy::default());
        assert!(batch.rejected.is_empty());
        for posting in &batch.postings {
            snapshot = RecurrenceService::commit(&snapshot, posting).expect("commit posting");
        }
        as_of += step;
    }
    snapshot
}

#[test]
fn hourly_evaluation_never_double_posts() {
    let calendar = Calendar::utc();
    let weekly = RecurringTransaction::new(
        "Groceries",
        80.0,
        Frequency::Weekly,
        EntryKind::Expense(ExpenseCategory::Food),
        at(2025, 1, 6, 7),
    );
    let snapshot = FinanceSnapshot {
        recurring: vec![weekly],
        ..FinanceSnapshot::default()
    };

    let result = simulate(
        snapshot,
        at(2025, 1, 6, 0),
        at(2025, 2, 2, 23),
        Duration::hours(1),
        &calendar,
    );

    // Jan 6, 13, 20, 27.
    assert_eq!(result.entries.len(), 4);
    assert_eq!(result.recurring[0].next_due, at(2025, 2, 3, 7));
}

#[test]
fn month_end_schedule_feeds_trends() {
    let calendar = Calendar::utc();
    let salary = RecurringTransaction::new(
        "Salary",
        3000.0,
        Frequency::Monthly,
        EntryKind::Income(IncomeCategory::Salary),
        at(2024, 1, 31, 9),
    );
    let snapshot = FinanceSnapshot {
        recurring: vec![salary],
        ..FinanceSnapshot::default()
    };

    let result = simulate(
        snapshot,
        at(2024, 1, 31, 12),
        at(2024, 4, 30, 12),
        Duration::days(1),
        &calendar,
    );

    // Jan 31, Feb 29, Mar 29, Apr 29: the clamp carries forward.
    assert_eq!(result.entries.len(), 4);
    let trends = SummaryService::monthly_trends(&result.entries, 4, at(2024, 4, 30, 12), &calendar);
    assert!(trends.iter().all(|t| t.income == 3000.0 && t.expenses == 0.0));
}

#[test]
fn accelerated_payoff_is_faster_and_cheaper() {
    let calendar = Calendar::utc();
    let card = aurum_domain::Liability::new(
        "Card",
        aurum_domain::LiabilityType::CreditCard,
        4000.0,
        21.0,
        120.0,
        at(2025, 1, 20, 0),
    );
    let as_of = at(2025, 1, 1, 0);

    let minimum = DebtService::minimum_payoff(&card, as_of, &calendar).unwrap();
    let faster = DebtService::accelerated_payoff(&card, 100.0, as_of, &calendar).unwrap();

    assert!(faster.months_to_payoff < minimum.months_to_payoff);
    assert!(faster.total_interest_paid < minimum.total_interest_paid);
    assert_eq!(faster.monthly_payment, 220.0);
}
