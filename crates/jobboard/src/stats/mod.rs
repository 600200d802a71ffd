//! Advisory mirror of submitted applications.
//!
//! A second, schema-independent store written outside the primary
//! transaction. Mirror writes are best-effort; the primary store stays the
//! system of record and the mirror count may drift behind it when a write
//! fails. Drift is observable through the orchestrator's warn logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

/// Denormalized row appended once per successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorEntry {
    pub job_title: String,
    pub candidate_name: String,
    pub telegram_handle: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Secondary store used only for aggregate counts on the admin side.
pub trait StatsMirror: Send + Sync {
    fn record_application(&self, entry: MirrorEntry) -> Result<(), StorageError>;
    fn count_all(&self) -> Result<u64, StorageError>;
}
