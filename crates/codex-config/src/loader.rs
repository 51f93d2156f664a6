//! Loading and resolving configuration.
//!
//! `CodexConfig` pairs the parsed `Settings` with the base directory that
//! relative paths are resolved against: the config file's parent when
//! loaded from disk, or whatever the caller supplies otherwise.

use std::path::{Path, PathBuf};

use tracing::debug;

use codex_contracts::{
    error::{CodexError, CodexResult},
    integrity::IntegrityCheckConfig,
};

use crate::settings::Settings;

/// Resolved configuration for the logging and integrity tools.
#[derive(Debug, Clone)]
pub struct CodexConfig {
    settings: Settings,
    base_dir: PathBuf,
}

impl CodexConfig {
    /// All defaults, with relative paths resolved against `base_dir`.
    pub fn defaults_in(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: Settings::default(),
            base_dir: base_dir.into(),
        }
    }

    /// Parse `s` as TOML.
    ///
    /// Returns `CodexError::ConfigError` if the TOML is malformed, does not
    /// match `Settings`, or carries an out-of-range threshold.
    pub fn from_toml_str(s: &str, base_dir: impl Into<PathBuf>) -> CodexResult<Self> {
        let settings: Settings = toml::from_str(s).map_err(|e| CodexError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        Self::check(&settings)?;
        Ok(Self {
            settings,
            base_dir: base_dir.into(),
        })
    }

    /// Read and parse the file at `path`. Relative paths inside it resolve
    /// against the file's directory.
    pub fn from_file(path: &Path) -> CodexResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CodexError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!(path = %path.display(), base_dir = %base_dir.display(), "loading config");
        Self::from_toml_str(&contents, base_dir)
    }

    fn check(settings: &Settings) -> CodexResult<()> {
        check_threshold(settings.integrity.compliance_threshold)?;
        if settings.artifacts.package_extension.is_empty() {
            return Err(CodexError::ConfigError {
                reason: "package_extension must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Override the compliance threshold, with the same range check a
    /// config file gets. The current value is kept on error.
    pub fn set_compliance_threshold(&mut self, threshold: f64) -> CodexResult<()> {
        check_threshold(threshold)?;
        self.settings.integrity.compliance_threshold = threshold;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn lifecycle_log(&self) -> PathBuf {
        self.resolve(&self.settings.logs.lifecycle)
    }

    pub fn invocation_log(&self) -> PathBuf {
        self.resolve(&self.settings.logs.invocation)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.settings.schema.path)
    }

    pub fn session_env_var(&self) -> &str {
        &self.settings.identity.session_env_var
    }

    pub fn package_extension(&self) -> &str {
        &self.settings.artifacts.package_extension
    }

    pub fn store_lock(&self) -> bool {
        self.settings.store.lock
    }

    /// Directories the hash resolver probes, in order: configured extension
    /// directories (or the editor defaults under the home directory), then
    /// the tool-local directory.
    pub fn artifact_dirs(&self) -> Vec<PathBuf> {
        let mut search: Vec<PathBuf> = if self.settings.artifacts.extension_dirs.is_empty() {
            default_extension_dirs()
        } else {
            self.settings
                .artifacts
                .extension_dirs
                .iter()
                .map(|p| self.resolve(p))
                .collect()
        };
        search.push(self.resolve(&self.settings.artifacts.local_dir));
        search
    }

    /// Inputs for an integrity run over the configured logs.
    pub fn integrity_check(&self) -> IntegrityCheckConfig {
        IntegrityCheckConfig {
            lifecycle_log: self.lifecycle_log(),
            invocation_log: self.invocation_log(),
            schema_path: self.schema_path(),
            validate_hashes: self.settings.integrity.validate_hashes,
            compliance_threshold: self.settings.integrity.compliance_threshold,
        }
    }
}

/// NaN fails the range test too.
fn check_threshold(threshold: f64) -> CodexResult<()> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(CodexError::ConfigError {
            reason: format!("compliance_threshold must be within 0..=100, got {threshold}"),
        });
    }
    Ok(())
}

/// The stable and insiders per-user extension directories. Empty when the
/// home directory cannot be determined.
pub fn default_extension_dirs() -> Vec<PathBuf> {
    match dirs::home_dir() {
        Some(home) => vec![
            home.join(".vscode").join("extensions"),
            home.join(".vscode-insiders").join("extensions"),
        ],
        None => Vec::new(),
    }
}
