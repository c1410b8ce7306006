//! aurum-codec
//!
//! The one place where engine records cross a serialization boundary. Snapshots
//! and scheduler postings are wrapped in a versioned JSON envelope so a reader
//! can refuse data written by an incompatible schema.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use aurum_domain::{FinanceSnapshot, ScheduledPosting};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Schema revision written into every envelope.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Unsupported schema version {found}, expected {expected}")]
    UnsupportedSchema { found: u32, expected: u32 },
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serde(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(payload: T, exported_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at,
            payload,
        }
    }
}

pub type SnapshotEnvelope = Envelope<FinanceSnapshot>;

/// Header fields only, read before the payload is trusted.
#[derive(Deserialize)]
struct SchemaHeader {
    schema_version: u32,
}

pub fn encode_snapshot(
    snapshot: &FinanceSnapshot,
    exported_at: DateTime<Utc>,
) -> Result<String, CodecError> {
    encode(&Envelope::new(snapshot, exported_at))
}

pub fn decode_snapshot(data: &str) -> Result<SnapshotEnvelope, CodecError> {
    decode(data)
}

pub fn encode_postings(
    postings: &[ScheduledPosting],
    exported_at: DateTime<Utc>,
) -> Result<String, CodecError> {
    encode(&Envelope::new(postings, exported_at))
}

pub fn decode_postings(data: &str) -> Result<Vec<ScheduledPosting>, CodecError> {
    decode::<Vec<ScheduledPosting>>(data).map(|envelope| envelope.payload)
}

/// Writes the snapshot envelope to `path` through a temporary file and rename.
pub fn save_snapshot_to_path(
    snapshot: &FinanceSnapshot,
    exported_at: DateTime<Utc>,
    path: &Path,
) -> Result<(), CodecError> {
    write_atomic(path, &encode_snapshot(snapshot, exported_at)?)?;
    Ok(())
}

/// Replaces `path` with `data` by writing a sibling `.tmp` file and renaming it
/// over the target, so readers never observe a partial file. Missing parent
/// directories are created.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)
}

pub fn load_snapshot_from_path(path: &Path) -> Result<SnapshotEnvelope, CodecError> {
    let data = fs::read_to_string(path)?;
    decode_snapshot(&data)
}

fn encode<T: Serialize>(envelope: &Envelope<T>) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

fn decode<T: DeserializeOwned>(data: &str) -> Result<Envelope<T>, CodecError> {
    let header: SchemaHeader = serde_json::from_str(data)?;
    if header.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(CodecError::UnsupportedSchema {
            found: header.schema_version,
            expected: SNAPSHOT_SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_str(data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
