//! # codex-core
//!
//! The ambient seams of the Codex audit log: time, identity, and schema
//! validation.
//!
//! This crate provides:
//! - The four seam traits (`Clock`, `SessionProvider`, `SchemaCompiler`,
//!   `CompiledSchema`)
//! - Timestamp and run-id generation (`ids`)
//! - Whole-file JSON reads (`json`)
//! - Environment-backed and fixed session providers (`session`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codex_core::{ids, SystemClock};
//!
//! let stamp = ids::stamp(&SystemClock);
//! assert!(stamp.run_id.starts_with("RUN-"));
//! ```

pub mod ids;
pub mod json;
pub mod session;
pub mod traits;

pub use ids::{FixedClock, Stamp, SystemClock};
pub use session::{EnvSession, StaticSession};
