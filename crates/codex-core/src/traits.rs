//! Seam traits for the Codex audit log.
//!
//! Everything ambient the builders and validators depend on is injected
//! through one of these traits:
//!
//! - `Clock`: the source of "now" for timestamps and run ids
//! - `SessionProvider`: the process-scoped session identifier
//! - `SchemaCompiler`: turns a JSON Schema document into a `CompiledSchema`
//! - `CompiledSchema`: validates a JSON document and reports every violation
//!
//! Production implementations read the system clock and environment; tests
//! substitute fixed values so records are deterministic.

use chrono::{DateTime, Utc};

use codex_contracts::{error::CodexResult, integrity::SchemaReport};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Supplies the session identifier stamped on every event.
///
/// Read-only: the core never writes the identity back anywhere.
pub trait SessionProvider: Send + Sync {
    fn session_id(&self) -> String;
}

/// Compiles a JSON Schema document.
///
/// Any schema library can sit behind this trait; `codex-verify` ships one
/// backed by the `jsonschema` crate.
pub trait SchemaCompiler: Send + Sync {
    /// Compile `schema`.
    ///
    /// Returns `CodexError::SchemaCompile` if the document is not a usable
    /// schema.
    fn compile(&self, schema: &serde_json::Value) -> CodexResult<Box<dyn CompiledSchema>>;
}

/// A compiled schema, ready to validate documents.
pub trait CompiledSchema {
    /// Validate `data`, collecting every violation rather than stopping at
    /// the first.
    fn validate(&self, data: &serde_json::Value) -> SchemaReport;
}
