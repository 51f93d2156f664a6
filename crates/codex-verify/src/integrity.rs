//! Integrity runs over the lifecycle and invocation logs.
//!
//! A run validates both logs against one shared schema, counts their
//! records, and optionally takes a hash census of the lifecycle log. The
//! outcome is folded into an `IntegritySummary` whose `status` is the only
//! externally meaningful result.
//!
//! Counting rules:
//!
//! - missing log file → warning
//! - compliance rate below the threshold → warning
//! - missing schema, unreadable or malformed log or schema → error
//! - schema violations → `*LogValid = false` only; they do not by
//!   themselves raise the status to `Failed`

use std::path::Path;

use tracing::{error, info, warn};

use codex_contracts::{
    error::{CodexError, CodexResult},
    integrity::{
        IntegrityCheckConfig, IntegrityStatus, IntegritySummary, SchemaReport, SchemaViolation,
    },
};
use codex_core::{
    ids,
    json::{read_json, read_json_array},
    traits::{Clock, SchemaCompiler},
    SystemClock,
};

use crate::{compliance::hash_compliance, engine::JsonSchemaCompiler};

/// Runs schema validation and integrity checks.
pub struct IntegrityChecker {
    compiler: Box<dyn SchemaCompiler>,
    clock: Box<dyn Clock>,
}

/// What one log contributed to a run.
#[derive(Default)]
struct LogOutcome {
    valid: bool,
    count: usize,
    schema_errors: Vec<SchemaViolation>,
    entries: Option<Vec<serde_json::Value>>,
}

impl IntegrityChecker {
    pub fn new(compiler: Box<dyn SchemaCompiler>, clock: Box<dyn Clock>) -> Self {
        Self { compiler, clock }
    }

    /// Validate the log at `data_path` against the schema at `schema_path`.
    ///
    /// The schema is loaded and compiled on every call. Violations are
    /// returned in the report, not raised.
    ///
    /// # Errors
    ///
    /// `NotFound` if either file is absent, `Parse` for malformed JSON,
    /// `SchemaCompile` if the schema document is not a usable schema.
    pub fn validate_schema(&self, data_path: &Path, schema_path: &Path) -> CodexResult<SchemaReport> {
        for path in [data_path, schema_path] {
            if !path.exists() {
                return Err(CodexError::NotFound {
                    path: path.display().to_string(),
                });
            }
        }

        let schema = read_json(schema_path)?;
        let compiled = self.compiler.compile(&schema)?;
        let data = read_json(data_path)?;
        let report = compiled.validate(&data);

        if report.valid {
            info!(path = %data_path.display(), "schema valid");
        } else {
            for violation in &report.errors {
                warn!(
                    path = %data_path.display(),
                    instance_path = %violation.instance_path,
                    schema_path = %violation.schema_path,
                    message = %violation.message,
                    "schema violation"
                );
            }
        }
        Ok(report)
    }

    /// Check both logs and fold the results into one summary.
    pub fn run(&self, config: &IntegrityCheckConfig) -> IntegritySummary {
        let mut warnings = 0usize;
        let mut errors = 0usize;

        let lifecycle = self.check_log(
            "lifecycle",
            &config.lifecycle_log,
            &config.schema_path,
            &mut warnings,
            &mut errors,
        );

        let mut hash_compliance_rate = None;
        if config.validate_hashes {
            if let Some(entries) = &lifecycle.entries {
                let report = hash_compliance(entries);
                if report.compliance_rate < config.compliance_threshold {
                    warn!(
                        rate = report.compliance_rate,
                        threshold = config.compliance_threshold,
                        "hash compliance below threshold"
                    );
                    warnings += 1;
                }
                hash_compliance_rate = Some(report.compliance_rate);
            }
        }

        let invocation = self.check_log(
            "invocation",
            &config.invocation_log,
            &config.schema_path,
            &mut warnings,
            &mut errors,
        );

        let status = IntegrityStatus::from_counts(errors, warnings);
        info!(?status, errors, warnings, "integrity run complete");

        IntegritySummary {
            validation_timestamp: ids::now_iso(self.clock.as_ref()),
            lifecycle_log_valid: lifecycle.valid,
            invocation_log_valid: invocation.valid,
            lifecycle_count: lifecycle.count,
            invocation_count: invocation.count,
            hash_compliance_rate,
            lifecycle_schema_errors: lifecycle.schema_errors,
            invocation_schema_errors: invocation.schema_errors,
            total_warnings: warnings,
            total_errors: errors,
            status,
        }
    }

    fn check_log(
        &self,
        label: &str,
        log_path: &Path,
        schema_path: &Path,
        warnings: &mut usize,
        errors: &mut usize,
    ) -> LogOutcome {
        if !log_path.exists() {
            warn!(log = label, path = %log_path.display(), "log not found");
            *warnings += 1;
            return LogOutcome::default();
        }

        let mut outcome = LogOutcome::default();
        let result = self
            .validate_schema(log_path, schema_path)
            .and_then(|report| {
                outcome.valid = report.valid;
                outcome.schema_errors = report.errors;
                read_json_array(log_path)
            });

        match result {
            Ok(entries) => {
                outcome.count = entries.len();
                outcome.entries = Some(entries);
            }
            Err(e) => {
                error!(log = label, path = %log_path.display(), error = %e, "log validation failed");
                *errors += 1;
            }
        }
        outcome
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new(Box::new(JsonSchemaCompiler::new()), Box::new(SystemClock))
    }
}

/// Run an integrity check with the `jsonschema` backend and the wall clock.
pub fn run_integrity_check(config: &IntegrityCheckConfig) -> IntegritySummary {
    IntegrityChecker::default().run(config)
}
