//! JSON Schema validation backed by the `jsonschema` crate.
//!
//! `JsonSchemaCompiler` implements `SchemaCompiler` from `codex-core`.
//! Format assertions are switched on, so `"format": "date-time"` rejects a
//! malformed `Timestamp` rather than being treated as an annotation. Every
//! violation is collected, not just the first, so operators see the full
//! failure set in one pass.

use tracing::debug;

use codex_contracts::{
    error::{CodexError, CodexResult},
    integrity::{SchemaReport, SchemaViolation},
};
use codex_core::traits::{CompiledSchema, SchemaCompiler};

/// Compiles schemas with `jsonschema`, draft auto-detected from `$schema`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaCompiler;

impl JsonSchemaCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaCompiler for JsonSchemaCompiler {
    fn compile(&self, schema: &serde_json::Value) -> CodexResult<Box<dyn CompiledSchema>> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| CodexError::SchemaCompile {
                reason: e.to_string(),
            })?;
        Ok(Box::new(JsonSchemaValidator { validator }))
    }
}

/// A compiled `jsonschema` validator.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl CompiledSchema for JsonSchemaValidator {
    fn validate(&self, data: &serde_json::Value) -> SchemaReport {
        let errors: Vec<SchemaViolation> = self
            .validator
            .iter_errors(data)
            .map(|error| SchemaViolation {
                instance_path: error.instance_path.to_string(),
                schema_path: error.schema_path.to_string(),
                actual: error.instance.as_ref().clone(),
                message: error.to_string(),
            })
            .collect();

        debug!(violations = errors.len(), "schema validation complete");
        SchemaReport::from_errors(errors)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
