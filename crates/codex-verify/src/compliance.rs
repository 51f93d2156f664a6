//! Hash-compliance census over lifecycle events.
//!
//! Each event's `Hash` field falls into exactly one `HashClass`, so
//! `valid + invalid + pending == total` always holds.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use codex_contracts::{
    error::CodexResult,
    event::PENDING_HASH,
    integrity::{HashClass, HashComplianceReport},
};
use codex_core::json::read_json_array;

/// True for exactly 64 hexadecimal digits, either case.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Classify one event's `Hash` value.
///
/// Absent, `null`, empty, and the pending sentinel are `Pending`. Any other
/// value is `Valid` only if it is a 64-digit hex string. Falsy non-strings
/// such as `false` or `0` are `Invalid`, not `Pending`: only a missing,
/// null, or empty hash counts as not yet computed.
pub fn classify_hash(hash: Option<&Value>) -> HashClass {
    match hash {
        None | Some(Value::Null) => HashClass::Pending,
        Some(Value::String(s)) if s.is_empty() || s == PENDING_HASH => HashClass::Pending,
        Some(Value::String(s)) if is_sha256_hex(s) => HashClass::Valid,
        Some(_) => HashClass::Invalid,
    }
}

/// Census over an in-memory event list.
pub fn hash_compliance(events: &[Value]) -> HashComplianceReport {
    let (mut valid, mut invalid, mut pending) = (0usize, 0usize, 0usize);

    for (index, event) in events.iter().enumerate() {
        let hash = event.get("Hash");
        match classify_hash(hash) {
            HashClass::Valid => valid += 1,
            HashClass::Pending => pending += 1,
            HashClass::Invalid => {
                let rendered = hash.map(|h| h.to_string()).unwrap_or_default();
                warn!(index, hash = %rendered, "invalid hash format");
                invalid += 1;
            }
        }
    }

    let report = HashComplianceReport {
        total_events: events.len(),
        valid_hashes: valid,
        pending_hashes: pending,
        invalid_hashes: invalid,
        compliance_rate: compliance_rate(valid, events.len()),
    };

    info!(
        total = report.total_events,
        valid = report.valid_hashes,
        pending = report.pending_hashes,
        invalid = report.invalid_hashes,
        rate = report.compliance_rate,
        "hash integrity report"
    );
    report
}

/// Read the log at `data_path` and take its hash census.
///
/// # Errors
///
/// `NotFound`, or `Parse` if the file is not a JSON array.
pub fn compute_hash_compliance(data_path: &Path) -> CodexResult<HashComplianceReport> {
    let events = read_json_array(data_path)?;
    Ok(hash_compliance(&events))
}

/// `100 * valid / total` to two decimal places; an empty log is `0.0`.
fn compliance_rate(valid: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = valid as f64 * 100.0 / total as f64;
    (rate * 100.0).round() / 100.0
}
