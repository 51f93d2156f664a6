//! Caller-supplied inputs for the event builders.
//!
//! Every field is optional at the type level. The builders decide which are
//! required and fill defaults for the rest, so a request can be assembled
//! from CLI flags, config, or test code without pre-validation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Inputs for logging one assistant invocation.
///
/// `command_id` and `workspace` are required; everything else defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub command_id: Option<String>,
    pub workspace: Option<String>,
    /// Default `"Inline"`.
    pub invocation_type: Option<String>,
    /// Default `"gpt-4-copilot"`.
    pub completion_model: Option<String>,
    pub shortcut_used: Option<String>,
    /// Default empty string.
    pub context: Option<String>,
    /// Default `"Editing"`.
    pub stage: Option<String>,
    /// Default `"Success"`.
    pub result: Option<String>,
    /// Overrides the logger's configured invocation log.
    pub log_path: Option<PathBuf>,
}

impl InvocationRequest {
    pub fn new(command_id: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            command_id: Some(command_id.into()),
            workspace: Some(workspace.into()),
            ..Self::default()
        }
    }
}

/// Inputs for logging one extension lifecycle change.
///
/// `action`, `version`, `workspace` and `reason` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleRequest {
    pub action: Option<String>,
    pub version: Option<String>,
    pub workspace: Option<String>,
    pub reason: Option<String>,
    /// Default `"github.copilot"`.
    pub extension_id: Option<String>,
    /// Default `"Configuration"`.
    pub stage: Option<String>,
    /// Default `"Success"`.
    pub result: Option<String>,
    /// Overrides the logger's configured lifecycle log.
    pub log_path: Option<PathBuf>,
}

impl LifecycleRequest {
    pub fn new(
        action: impl Into<String>,
        version: impl Into<String>,
        workspace: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action: Some(action.into()),
            version: Some(version.into()),
            workspace: Some(workspace.into()),
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}
