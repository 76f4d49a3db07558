//! Flattened export entries and per-entry transfer outcomes.

use serde::Serialize;

/// One file ready to transfer to storage, produced by the flattener.
///
/// `name` carries the full relative path built from ancestor folder
/// names. Consumed exactly once by the orchestrator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportEntry {
    pub url: String,
    pub name: String,
    pub filesize: u64,
}

/// The outcome of one entry's transfer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TransferOutcome {
    Fulfilled { value: serde_json::Value },
    Rejected { reason: String },
}

impl TransferOutcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled { .. })
    }
}

/// An entry's original fields merged with its outcome.
///
/// The orchestrator guarantees one report per entry at the entry's
/// original index, regardless of individual failures.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReport {
    pub url: String,
    pub name: String,
    pub filesize: u64,
    #[serde(flatten)]
    pub outcome: TransferOutcome,
}

/// The result of a completed import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub b2path: String,
    pub filesize: u64,
    /// The created-asset descriptor returned by the remote system.
    #[serde(flatten)]
    pub asset: serde_json::Value,
}
