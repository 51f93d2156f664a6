//! Configuration file schema.
//!
//! Every table and field is optional; a missing value falls back to the
//! defaults below, so an empty file (or no file at all) is a valid config.
//!
//! Example:
//! ```toml
//! [logs]
//! lifecycle = "logs/CopilotLifecycleLog.json"
//! invocation = "logs/CopilotInvocationLog.json"
//!
//! [schema]
//! path = "schemas/copilot-events.schema.json"
//!
//! [integrity]
//! validate_hashes = true
//! compliance_threshold = 80.0
//!
//! [artifacts]
//! extension_dirs = ["/opt/vscode/extensions"]
//! package_extension = "vsix"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use codex_core::session::DEFAULT_SESSION_ENV_VAR;

/// The top-level structure deserialized from a TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logs: LogSettings,
    pub schema: SchemaSettings,
    pub integrity: IntegritySettings,
    pub identity: IdentitySettings,
    pub artifacts: ArtifactSettings,
    pub store: StoreSettings,
}

/// Where the two event logs live. Relative paths resolve against the
/// config's base directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub lifecycle: PathBuf,
    pub invocation: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            lifecycle: PathBuf::from("logs").join("CopilotLifecycleLog.json"),
            invocation: PathBuf::from("logs").join("CopilotInvocationLog.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    /// JSON Schema shared by both logs.
    pub path: PathBuf,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schemas").join("copilot-events.schema.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegritySettings {
    /// Compute hash compliance for the lifecycle log.
    pub validate_hashes: bool,
    /// Percent in `0..=100`; a lower compliance rate is a warning.
    pub compliance_threshold: f64,
}

impl Default for IntegritySettings {
    fn default() -> Self {
        Self {
            validate_hashes: false,
            compliance_threshold: codex_contracts::integrity::DEFAULT_COMPLIANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    /// Environment variable holding the editor session id.
    pub session_env_var: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            session_env_var: DEFAULT_SESSION_ENV_VAR.to_string(),
        }
    }
}

/// Where the hash resolver looks for extension packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Per-user extension directories, probed in order. Empty means the
    /// stable and insiders editor directories under the home directory.
    pub extension_dirs: Vec<PathBuf>,
    /// Tool-local fallback directory, probed last.
    pub local_dir: PathBuf,
    /// Package file extension, without the dot.
    pub package_extension: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            extension_dirs: Vec::new(),
            local_dir: PathBuf::from("."),
            package_extension: "vsix".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Hold an exclusive advisory lock for the duration of each append.
    pub lock: bool,
}
