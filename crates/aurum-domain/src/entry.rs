//! Ledger entries: the income and expense records every analytic is computed from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investment,
    Bonus,
    Rental,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 6] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Investment,
        IncomeCategory::Bonus,
        IncomeCategory::Rental,
        IncomeCategory::Other,
    ];
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Investment => "Investment",
            IncomeCategory::Bonus => "Bonus",
            IncomeCategory::Rental => "Rental",
            IncomeCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    Travel,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Housing,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Shopping,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::Other,
    ];
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "category", rename_all = "snake_case")]
/// Discriminates income from expense and carries the matching category.
pub enum EntryKind {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl EntryKind {
    pub fn is_income(&self) -> bool {
        matches!(self, EntryKind::Income(_))
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, EntryKind::Expense(_))
    }

    pub fn expense_category(&self) -> Option<ExpenseCategory> {
        match self {
            EntryKind::Expense(category) => Some(*category),
            EntryKind::Income(_) => None,
        }
    }

    pub fn income_category(&self) -> Option<IncomeCategory> {
        match self {
            EntryKind::Income(category) => Some(*category),
            EntryKind::Expense(_) => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Income(category) => write!(f, "Income ({category})"),
            EntryKind::Expense(category) => write!(f, "Expense ({category})"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Recurring template this entry was materialized from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<Uuid>,
}

impl LedgerEntry {
    pub fn new(kind: EntryKind, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            note: None,
            recurring_id: None,
        }
    }

    pub fn income(category: IncomeCategory, amount: f64, date: DateTime<Utc>) -> Self {
        Self::new(EntryKind::Income(category), amount, date)
    }

    pub fn expense(category: ExpenseCategory, amount: f64, date: DateTime<Utc>) -> Self {
        Self::new(EntryKind::Expense(category), amount, date)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for LedgerEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}
