//! # codex-verify
//!
//! Integrity checking for Codex audit logs.
//!
//! This crate provides:
//!
//! 1. **Structural** checks: [`engine::JsonSchemaCompiler`] implements
//!    [`codex_core::traits::SchemaCompiler`] with the `jsonschema` crate.
//! 2. **Hash quality**: [`compliance::compute_hash_compliance`] classifies
//!    every event's `Hash` as valid, pending, or invalid.
//! 3. **Aggregation**: [`integrity::IntegrityChecker`] runs both over the
//!    lifecycle and invocation logs and derives a `Passed` / `Warning` /
//!    `Failed` status.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use codex_verify::run_integrity_check;
//!
//! let summary = run_integrity_check(&config.integrity_check());
//! if summary.status == IntegrityStatus::Failed {
//!     std::process::exit(1);
//! }
//! ```

pub mod compliance;
pub mod engine;
pub mod integrity;

pub use compliance::{classify_hash, compute_hash_compliance, hash_compliance};
pub use engine::JsonSchemaCompiler;
pub use integrity::{run_integrity_check, IntegrityChecker};

// ── Tests ─────────────────────────────────────────────────────────────────────
