//! Integrity check inputs and report types.
//!
//! A check has two independent parts: structural validation of a log file
//! against a JSON Schema (`SchemaReport`) and a hash-quality census of
//! lifecycle events (`HashComplianceReport`). `run_integrity_check` in
//! `codex-verify` combines both into an `IntegritySummary`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Compliance rate below which an integrity run records a warning.
pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 80.0;

/// A single schema violation found in a log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON Pointer into the log document, e.g. `/3/Hash`.
    pub instance_path: String,
    /// JSON Pointer into the schema naming the failed constraint,
    /// e.g. `/items/properties/Hash/pattern`.
    pub schema_path: String,
    /// The offending value.
    pub actual: serde_json::Value,
    /// Human-readable description from the validator.
    pub message: String,
}

/// The outcome of validating one log file against a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// True only when `errors` is empty.
    pub valid: bool,
    pub errors: Vec<SchemaViolation>,
}

impl SchemaReport {
    pub fn from_errors(errors: Vec<SchemaViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Classification of one event's `Hash` field. Every event gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashClass {
    /// Absent, empty, null, or the pending sentinel.
    Pending,
    /// Present but not 64 hexadecimal digits.
    Invalid,
    /// 64 hexadecimal digits, either case.
    Valid,
}

/// Hash census over every event in a log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HashComplianceReport {
    pub total_events: usize,
    pub valid_hashes: usize,
    pub pending_hashes: usize,
    pub invalid_hashes: usize,
    /// `100 * valid / total`, two decimal places; `0.0` for an empty log.
    pub compliance_rate: f64,
}

/// Terminal status of an integrity run, by strict precedence:
/// any error is `Failed`, else any warning is `Warning`, else `Passed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityStatus {
    Passed,
    Warning,
    Failed,
}

impl IntegrityStatus {
    pub fn from_counts(errors: usize, warnings: usize) -> Self {
        if errors > 0 {
            IntegrityStatus::Failed
        } else if warnings > 0 {
            IntegrityStatus::Warning
        } else {
            IntegrityStatus::Passed
        }
    }
}

/// Inputs for one integrity run over the lifecycle and invocation logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityCheckConfig {
    pub lifecycle_log: PathBuf,
    pub invocation_log: PathBuf,
    /// One schema shared by both logs.
    pub schema_path: PathBuf,
    /// Compute hash compliance for the lifecycle log.
    pub validate_hashes: bool,
    /// Percent; a compliance rate strictly below this is a warning.
    pub compliance_threshold: f64,
}

/// Aggregated result of an integrity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntegritySummary {
    pub validation_timestamp: String,
    pub lifecycle_log_valid: bool,
    pub invocation_log_valid: bool,
    pub lifecycle_count: usize,
    pub invocation_count: usize,
    /// Present only when hash validation was requested and the lifecycle
    /// log could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_compliance_rate: Option<f64>,
    pub lifecycle_schema_errors: Vec<SchemaViolation>,
    pub invocation_schema_errors: Vec<SchemaViolation>,
    pub total_warnings: usize,
    pub total_errors: usize,
    pub status: IntegrityStatus,
}
