use thiserror::Error;
use uuid::Uuid;

/// Recoverable failures surfaced to the caller as validation feedback.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Payment of {payment:.2} does not cover {interest:.2} of monthly interest")]
    InsufficientPayment { payment: f64, interest: f64 },
    #[error("Balance not paid off within {months} months")]
    NonConvergent { months: u32 },
    #[error("Recurring transaction not due: {0}")]
    NotDue(Uuid),
    #[error("Recurring transaction schedule changed since evaluation: {0}")]
    StaleSchedule(Uuid),
    #[error("Recurring transaction not found: {0}")]
    RecurringNotFound(Uuid),
}
