//! # codex-audit
//!
//! Append-only JSON-array event logs for assistant invocations and extension
//! lifecycle changes.
//!
//! ## Overview
//!
//! `EventLogger` validates a request, stamps it with a timestamp, run id and
//! session id, resolves the package hash for lifecycle events, and appends
//! the finished record through `JsonArrayStore`. Records are never mutated
//! after the append.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codex_audit::{EventLogger, HashResolver};
//! use codex_contracts::request::InvocationRequest;
//! use codex_core::{EnvSession, SystemClock};
//!
//! let logger = EventLogger::new(
//!     Box::new(SystemClock),
//!     Box::new(EnvSession::default()),
//!     HashResolver::new(vec![], "vsix"),
//!     "logs/CopilotInvocationLog.json",
//!     "logs/CopilotLifecycleLog.json",
//! );
//! let event = logger.build_invocation_event(&InvocationRequest::new("C1", "W1"))?;
//! ```

pub mod builder;
pub mod hash;
pub mod store;

pub use builder::EventLogger;
pub use hash::{sha256_file, HashResolver};
pub use store::JsonArrayStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
