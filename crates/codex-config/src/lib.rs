//! # codex-config
//!
//! TOML configuration for the Codex logging and integrity tools.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use codex_config::CodexConfig;
//!
//! let config = CodexConfig::from_file(Path::new("codex.toml"))?;
//! let check = config.integrity_check();
//! ```
//!
//! Every setting has a default, so `CodexConfig::defaults_in(dir)` is a
//! complete configuration rooted at `dir`.

pub mod loader;
pub mod settings;

pub use loader::CodexConfig;
pub use settings::Settings;

// ── Tests ─────────────────────────────────────────────────────────────────────
