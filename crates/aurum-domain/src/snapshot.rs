//! Read-only snapshot of every record the engine computes over.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budget::Budget, entry::LedgerEntry, goal::SavingsGoal, liability::Liability,
    recurring::RecurringTransaction,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// The latest state pushed by the record store. Each evaluation pass borrows it.
pub struct FinanceSnapshot {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
}

impl FinanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incomes(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|entry| entry.is_income())
    }

    pub fn expenses(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|entry| entry.is_expense())
    }

    pub fn entry(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn recurring_transaction(&self, id: Uuid) -> Option<&RecurringTransaction> {
        self.recurring.iter().find(|txn| txn.id == id)
    }

    /// Inserts the entry, replacing any existing record with the same id.
    pub fn upsert_entry(&mut self, entry: LedgerEntry) {
        match self.entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn remove_entry(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn upsert_recurring(&mut self, txn: RecurringTransaction) {
        match self.recurring.iter_mut().find(|existing| existing.id == txn.id) {
            Some(existing) => *existing = txn,
            None => self.recurring.push(txn),
        }
    }
}
