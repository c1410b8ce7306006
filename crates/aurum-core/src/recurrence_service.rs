//! Services that decide which recurring transactions are due and materialize them.
//!
//! Idempotency rests on `last_processed`: a template posts at most once per
//! calendar day no matter how often it is evaluated. Backlogs are never
//! replayed in a burst; each posting advances the schedule according to the
//! caller's [`CatchUpPolicy`].

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use aurum_domain::{
    CatchUpPolicy, FinanceSnapshot, Frequency, LedgerEntry, RecurringTotals, RecurringTransaction,
    ScheduledPosting,
};

use crate::{time::Calendar, validation, CoreError};

/// Upper bound on schedule steps taken while skipping a backlog under
/// [`CatchUpPolicy::LatestOnly`]. A daily schedule hits it only after ~270 years.
pub const MAX_FAST_FORWARD_STEPS: usize = 100_000;

const GENERATED_NOTE_PREFIX: &str = "Auto-generated from";

/// Outcome of evaluating a whole collection of templates.
#[derive(Debug, Clone, Default)]
pub struct ProcessingBatch {
    pub postings: Vec<ScheduledPosting>,
    pub rejected: Vec<(Uuid, CoreError)>,
}

impl ProcessingBatch {
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty() && self.rejected.is_empty()
    }
}

/// Stateless scheduling operations over recurring transaction snapshots.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Returns whether `txn` should post an entry at `as_of`.
    pub fn is_due(txn: &RecurringTransaction, as_of: DateTime<Utc>, calendar: &Calendar) -> bool {
        let processed_today = txn
            .last_processed
            .map(|last| calendar.same_day(last, as_of))
            .unwrap_or(false);
        txn.is_active && as_of >= txn.next_due && !processed_today && txn.within_end(as_of)
    }

    /// Selects the templates due at `as_of`, preserving input order.
    pub fn due_transactions(
        all: &[RecurringTransaction],
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Vec<RecurringTransaction> {
        let due: Vec<RecurringTransaction> = all
            .iter()
            .filter(|txn| Self::is_due(txn, as_of, calendar))
            .cloned()
            .collect();
        debug!(due = due.len(), total = all.len(), %as_of, "evaluated recurring schedule");
        due
    }

    /// Materializes one occurrence of `txn` and returns it with the advanced schedule.
    ///
    /// The template is re-checked against [`Self::is_due`] so a stale caller cannot
    /// double-post. The input is left untouched; persisting the returned pair is
    /// the caller's all-or-nothing write.
    pub fn process(
        txn: &RecurringTransaction,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
        policy: CatchUpPolicy,
    ) -> Result<ScheduledPosting, CoreError> {
        validation::validate_recurring(txn)?;
        if !Self::is_due(txn, as_of, calendar) {
            return Err(CoreError::NotDue(txn.id));
        }

        let entry = Self::materialize(txn, as_of, calendar);
        let mut updated = txn.clone();
        updated.next_due = calendar.next_occurrence(txn.frequency, txn.next_due);
        if policy == CatchUpPolicy::LatestOnly {
            updated.next_due = fast_forward(calendar, txn.frequency, updated.next_due, as_of);
        }
        updated.last_processed = Some(as_of);
        if !updated.within_end(updated.next_due) {
            updated.is_active = false;
        }

        debug!(
            recurring = %txn.id,
            entry = %entry.id,
            next_due = %updated.next_due,
            active = updated.is_active,
            "materialized recurring occurrence"
        );

        Ok(ScheduledPosting {
            entry,
            updated,
            previous_next_due: txn.next_due,
            previous_last_processed: txn.last_processed,
        })
    }

    /// Processes every due template. Invalid templates are reported, not skipped silently.
    pub fn process_due(
        all: &[RecurringTransaction],
        as_of: DateTime<Utc>,
        calendar: &Calendar,
        policy: CatchUpPolicy,
    ) -> ProcessingBatch {
        let mut batch = ProcessingBatch::default();
        for txn in all.iter().filter(|txn| Self::is_due(txn, as_of, calendar)) {
            match Self::process(txn, as_of, calendar, policy) {
                Ok(posting) => batch.postings.push(posting),
                Err(err) => {
                    warn!(recurring = %txn.id, error = %err, "recurring transaction rejected");
                    batch.rejected.push((txn.id, err));
                }
            }
        }
        batch
    }

    /// Applies a posting to an in-memory snapshot, returning the new snapshot.
    ///
    /// Acts as a compare-and-swap on the template's schedule: if the stored
    /// `next_due`/`last_processed` no longer match what the posting was computed
    /// from, the write is refused with [`CoreError::StaleSchedule`].
    pub fn commit(
        snapshot: &FinanceSnapshot,
        posting: &ScheduledPosting,
    ) -> Result<FinanceSnapshot, CoreError> {
        let id = posting.recurring_id();
        let stored = snapshot
            .recurring_transaction(id)
            .ok_or(CoreError::RecurringNotFound(id))?;
        if stored.next_due != posting.previous_next_due
            || stored.last_processed != posting.previous_last_processed
        {
            return Err(CoreError::StaleSchedule(id));
        }
        let mut next = snapshot.clone();
        next.upsert_entry(posting.entry.clone());
        next.upsert_recurring(posting.updated.clone());
        Ok(next)
    }

    /// Active templates due within `window` of `as_of`, overdue ones included.
    pub fn upcoming(
        all: &[RecurringTransaction],
        as_of: DateTime<Utc>,
        window: Duration,
    ) -> Vec<RecurringTransaction> {
        let horizon = as_of
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        sorted_by_due(all.iter().filter(|txn| txn.is_active && txn.next_due <= horizon))
    }

    pub fn overdue(all: &[RecurringTransaction], as_of: DateTime<Utc>) -> Vec<RecurringTransaction> {
        sorted_by_due(all.iter().filter(|txn| txn.is_active && txn.next_due < as_of))
    }

    /// Sums active monthly templates by direction.
    pub fn monthly_totals(all: &[RecurringTransaction]) -> RecurringTotals {
        all.iter()
            .filter(|txn| txn.is_active && txn.frequency == Frequency::Monthly)
            .fold(RecurringTotals::default(), |mut totals, txn| {
                if txn.is_income() {
                    totals.monthly_income += txn.amount;
                } else {
                    totals.monthly_expenses += txn.amount;
                }
                totals
            })
    }

    /// Deterministic id for the entry a template posts on `day`.
    ///
    /// A replayed write of the same posting therefore replaces rather than duplicates.
    pub fn posting_id(recurring_id: Uuid, day: NaiveDate) -> Uuid {
        Uuid::new_v5(&recurring_id, day.format("%Y-%m-%d").to_string().as_bytes())
    }

    fn materialize(
        txn: &RecurringTransaction,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> LedgerEntry {
        LedgerEntry {
            id: Self::posting_id(txn.id, calendar.local_date(as_of)),
            kind: txn.kind,
            amount: txn.amount,
            date: as_of,
            note: Some(format!("{} {}", GENERATED_NOTE_PREFIX, txn.name)),
            recurring_id: Some(txn.id),
        }
    }
}

fn fast_forward(
    calendar: &Calendar,
    frequency: Frequency,
    mut next_due: DateTime<Utc>,
    as_of: DateTime<Utc>,
) -> DateTime<Utc> {
    let mut steps = 0usize;
    while next_due <= as_of && steps < MAX_FAST_FORWARD_STEPS {
        let next = calendar.next_occurrence(frequency, next_due);
        if next == next_due {
            break;
        }
        next_due = next;
        steps += 1;
    }
    next_due
}

fn sorted_by_due<'a>(
    txns: impl Iterator<Item = &'a RecurringTransaction>,
) -> Vec<RecurringTransaction> {
    let mut selected: Vec<RecurringTransaction> = txns.cloned().collect();
    selected.sort_by_key(|txn| (txn.next_due, txn.id));
    selected
}
