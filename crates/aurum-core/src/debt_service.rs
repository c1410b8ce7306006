//! Month-by-month amortization of a liability under a fixed payment.

use chrono::{DateTime, Utc};
use tracing::warn;

use aurum_domain::{AmortizationRow, Liability, PayoffResult, PriorityThresholds};

use crate::{time::Calendar, CoreError};

/// Remaining balance at or below which a debt counts as paid off.
pub const PAYOFF_EPSILON: f64 = 0.01;

/// Safety bound on the simulation loop, not a business rule. Inputs that pass
/// the interest check still converge slowly when the payment barely exceeds
/// the interest; beyond this many months the calculation reports
/// [`CoreError::NonConvergent`] instead of iterating further.
pub const MAX_AMORTIZATION_MONTHS: u32 = 1000;

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    months: u32,
    interest: f64,
}

/// Stateless payoff calculations for liabilities.
pub struct DebtService;

impl DebtService {
    /// Simulates paying `monthly_payment` against `principal` at `annual_rate_percent`.
    ///
    /// `payoff_date` is `as_of` advanced by the number of simulated months.
    pub fn calculate(
        principal: f64,
        annual_rate_percent: f64,
        monthly_payment: f64,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Result<PayoffResult, CoreError> {
        let totals = match simulate(principal, annual_rate_percent, monthly_payment, |_| {}) {
            Ok(totals) => totals,
            Err(err) => {
                warn!(principal, annual_rate_percent, monthly_payment, error = %err, "payoff calculation rejected");
                return Err(err);
            }
        };
        Ok(PayoffResult {
            monthly_payment,
            months_to_payoff: totals.months,
            payoff_date: calendar.add_months(as_of, totals.months as i32),
            total_interest_paid: totals.interest,
            total_amount_paid: principal + totals.interest,
        })
    }

    /// Full per-month schedule for the same simulation [`Self::calculate`] runs.
    pub fn amortization_schedule(
        principal: f64,
        annual_rate_percent: f64,
        monthly_payment: f64,
    ) -> Result<Vec<AmortizationRow>, CoreError> {
        let mut rows = Vec::new();
        simulate(principal, annual_rate_percent, monthly_payment, |row| rows.push(row))?;
        Ok(rows)
    }

    /// Payoff for a liability at `payment`, or at its minimum payment when `None`.
    pub fn payoff_for(
        liability: &Liability,
        payment: Option<f64>,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Result<PayoffResult, CoreError> {
        let payment = payment.unwrap_or(liability.minimum_payment);
        Self::calculate(
            liability.balance,
            liability.interest_rate,
            payment,
            as_of,
            calendar,
        )
    }

    pub fn minimum_payoff(
        liability: &Liability,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Result<PayoffResult, CoreError> {
        Self::payoff_for(liability, None, as_of, calendar)
    }

    /// Payoff when `extra` is paid on top of the minimum every month.
    pub fn accelerated_payoff(
        liability: &Liability,
        extra: f64,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Result<PayoffResult, CoreError> {
        if !extra.is_finite() || extra < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "extra payment must not be negative, got {extra}"
            )));
        }
        Self::payoff_for(
            liability,
            Some(liability.minimum_payment + extra),
            as_of,
            calendar,
        )
    }

    /// Total minimum payments as a fraction of monthly income; zero without income.
    pub fn debt_to_income(liabilities: &[Liability], monthly_income: f64) -> f64 {
        if monthly_income <= 0.0 {
            return 0.0;
        }
        let payments: f64 = liabilities.iter().map(|l| l.minimum_payment).sum();
        payments / monthly_income
    }

    /// High-priority debts, highest rate first.
    pub fn high_priority_debts(
        liabilities: &[Liability],
        thresholds: PriorityThresholds,
    ) -> Vec<Liability> {
        let mut debts: Vec<Liability> = liabilities
            .iter()
            .filter(|l| l.interest_rate > thresholds.high)
            .cloned()
            .collect();
        debts.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
        debts
    }
}

fn simulate(
    principal: f64,
    annual_rate_percent: f64,
    monthly_payment: f64,
    mut on_month: impl FnMut(AmortizationRow),
) -> Result<Totals, CoreError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "principal must be positive, got {principal}"
        )));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "interest rate must not be negative, got {annual_rate_percent}"
        )));
    }
    if !monthly_payment.is_finite() || monthly_payment <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "monthly payment must be positive, got {monthly_payment}"
        )));
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let mut balance = principal;
    let mut totals = Totals::default();

    while balance > PAYOFF_EPSILON {
        if totals.months >= MAX_AMORTIZATION_MONTHS {
            return Err(CoreError::NonConvergent {
                months: MAX_AMORTIZATION_MONTHS,
            });
        }
        let interest = balance * monthly_rate;
        let principal_portion = (monthly_payment - interest).min(balance);
        if principal_portion <= 0.0 {
            return Err(CoreError::InsufficientPayment {
                payment: monthly_payment,
                interest,
            });
        }
        balance -= principal_portion;
        totals.interest += interest;
        totals.months += 1;
        on_month(AmortizationRow {
            month: totals.months,
            interest,
            principal: principal_portion,
            balance,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn zero_interest_pays_off_in_ten_months() {
        let result = DebtService::calculate(1000.0, 0.0, 100.0, today(), &Calendar::utc()).unwrap();
        assert_eq!(result.months_to_payoff, 10);
        assert_eq!(result.total_interest_paid, 0.0);
        assert_eq!(result.total_amount_paid, 1000.0);
        assert_eq!(
            result.payoff_date,
            Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn payment_below_interest_is_insufficient() {
        let err = DebtService::calculate(1000.0, 24.0, 10.0, today(), &Calendar::utc()).unwrap_err();
        match err {
            CoreError::InsufficientPayment { payment, interest } => {
                assert_eq!(payment, 10.0);
                assert!((interest - 20.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn slow_payoff_hits_iteration_ceiling() {
        let err = DebtService::calculate(1_000_000.0, 0.0, 1.0, today(), &Calendar::utc()).unwrap_err();
        assert_eq!(
            err,
            CoreError::NonConvergent {
                months: MAX_AMORTIZATION_MONTHS
            }
        );
    }

    #[test]
    fn invalid_inputs_are_rejected_before_simulation() {
        let calendar = Calendar::utc();
        for (principal, rate, payment) in [
            (0.0, 5.0, 100.0),
            (-10.0, 5.0, 100.0),
            (1000.0, -1.0, 100.0),
            (1000.0, 5.0, 0.0),
            (f64::NAN, 5.0, 100.0),
        ] {
            let err = DebtService::calculate(principal, rate, payment, today(), &calendar).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)), "{principal} {rate} {payment}");
        }
    }

    #[test]
    fn schedule_balances_strictly_decrease() {
        let rows = DebtService::amortization_schedule(5000.0, 18.0, 250.0).unwrap();
        assert!(!rows.is_empty());
        let mut previous = 5000.0;
        for row in &rows {
            assert!(row.balance < previous);
            assert!(row.interest >= 0.0);
            assert!(row.principal > 0.0);
            previous = row.balance;
        }
        assert!(previous <= PAYOFF_EPSILON);

        let result = DebtService::calculate(5000.0, 18.0, 250.0, today(), &Calendar::utc()).unwrap();
        assert_eq!(result.months_to_payoff as usize, rows.len());
        let interest: f64 = rows.iter().map(|row| row.interest).sum();
        assert!((interest - result.total_interest_paid).abs() < 1e-6);
        assert!(result.total_interest_paid > 0.0);
    }
}
