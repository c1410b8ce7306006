use aurum_codec::{
    decode_postings, decode_snapshot, encode_postings, encode_snapshot, load_snapshot_from_path,
    save_snapshot_to_path, write_atomic, CodecError, SNAPSHOT_SCHEMA_VERSION,
};
use aurum_domain::{
    Budget, EntryKind, ExpenseCategory, FinanceSnapshot, Frequency, IncomeCategory,
    LedgerEntry, RecurringTransaction, ScheduledPosting,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tempfile::tempdir;

fn exported() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap()
}

fn sample_snapshot() -> FinanceSnapshot {
    let day = Utc.with_ymd_and_hms(2025, 4, 12, 0, 0, 0).unwrap();
    FinanceSnapshot {
        entries: vec![
            LedgerEntry::income(IncomeCategory::Salary, 3200.0, day),
            LedgerEntry::expense(ExpenseCategory::Food, 54.2, day).with_note("market"),
        ],
        recurring: vec![RecurringTransaction::new(
            "Internet",
            45.0,
            Frequency::Monthly,
            EntryKind::Expense(ExpenseCategory::Utilities),
            day,
        )],
        budgets: vec![Budget::new("Food", ExpenseCategory::Food, 300.0)],
        ..FinanceSnapshot::default()
    }
}

#[test]
fn snapshot_survives_envelope() {
    let snapshot = sample_snapshot();
    let json = encode_snapshot(&snapshot, exported()).expect("encode");
    let envelope = decode_snapshot(&json).expect("decode");

    assert_eq!(envelope.schema_version, SNAPSHOT_SCHEMA_VERSION);
    assert_eq!(envelope.exported_at, exported());
    assert_eq!(envelope.payload, snapshot);
}

#[test]
fn envelope_exposes_version_and_snake_case_fields() {
    let json = encode_snapshot(&sample_snapshot(), exported()).expect("encode");
    let value: Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["schema_version"], SNAPSHOT_SCHEMA_VERSION);
    let recurring = &value["payload"]["recurring"][0];
    assert_eq!(recurring["frequency"], "monthly");
    assert_eq!(recurring["kind"]["type"], "expense");
    assert_eq!(recurring["kind"]["category"], "utilities");
    assert!(recurring.get("last_processed").is_none());
}

#[test]
fn newer_schema_is_rejected() {
    let json = r#"{"schema_version": 2, "exported_at": "2025-05-01T00:00:00Z", "payload": {}}"#;
    match decode_snapshot(json) {
        Err(CodecError::UnsupportedSchema { found, expected }) => {
            assert_eq!(found, 2);
            assert_eq!(expected, SNAPSHOT_SCHEMA_VERSION);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_collections_default_to_empty() {
    let json = r#"{"schema_version": 1, "exported_at": "2025-05-01T00:00:00Z", "payload": {"budgets": []}}"#;
    let envelope = decode_snapshot(json).expect("decode partial snapshot");
    assert_eq!(envelope.payload, FinanceSnapshot::default());
}

#[test]
fn malformed_input_is_a_serde_error() {
    assert!(matches!(decode_snapshot("{not json"), Err(CodecError::Serde(_))));
}

#[test]
fn postings_keep_their_schedule_guard() {
    let start = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let txn = RecurringTransaction::new(
        "Gym",
        30.0,
        Frequency::Monthly,
        EntryKind::Expense(ExpenseCategory::Healthcare),
        start,
    );
    let mut updated = txn.clone();
    updated.next_due = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    updated.last_processed = Some(start);
    let posting = ScheduledPosting {
        entry: LedgerEntry::expense(ExpenseCategory::Healthcare, 30.0, start),
        updated,
        previous_next_due: txn.next_due,
        previous_last_processed: None,
    };

    let json = encode_postings(&[posting.clone()], exported()).expect("encode postings");
    let decoded = decode_postings(&json).expect("decode postings");
    assert_eq!(decoded, vec![posting]);
}

#[test]
fn snapshot_file_is_written_atomically() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exports").join("finance.json");
    let snapshot = sample_snapshot();

    save_snapshot_to_path(&snapshot, exported(), &path).expect("save snapshot");
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_snapshot_from_path(&path).expect("load snapshot");
    assert_eq!(loaded.payload, snapshot);
}

#[test]
fn atomic_write_replaces_existing_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("settings");

    write_atomic(&path, "first").expect("first write");
    write_atomic(&path, "second").expect("second write");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn loading_missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let result = load_snapshot_from_path(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(CodecError::Io(_))));
}
