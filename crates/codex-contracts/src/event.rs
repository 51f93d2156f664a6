//! Audit event records.
//!
//! Two kinds of event are recorded: an `InvocationEvent` each time the
//! assistant is invoked from an editor, and a `LifecycleEvent` each time the
//! extension is installed, updated, or removed. Both serialize with the
//! PascalCase keys the JSON log files and the external schema expect.
//!
//! Events are built once by the builders in `codex-audit`, appended to a log,
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Extension identifier recorded on invocation events and used as the
/// default for lifecycle events.
pub const DEFAULT_EXTENSION_ID: &str = "github.copilot";

/// Sentinel stored in `Hash` when no artifact digest could be computed.
pub const PENDING_HASH: &str = "[Pending SHA256]";

/// Workspace name that marks a lifecycle event as installation-wide.
pub const GLOBAL_WORKSPACE: &str = "Global";

/// One invocation of the assistant from an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationEvent {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
    /// `RUN-YYYYMMDD-HHMMSS`, derived from the clock at construction.
    pub run_id: String,
    pub invocation_type: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    /// Serialized as `null` when no shortcut was used.
    pub shortcut_used: Option<String>,
    pub completion_model: String,
    #[serde(rename = "ExtensionID")]
    pub extension_id: String,
    pub workspace_name: String,
    /// Always `"Workspace:" + workspace_name`.
    pub workspace_scope: String,
    pub context: String,
    pub stage: String,
    pub result: String,
    #[serde(rename = "SessionID")]
    pub session_id: String,
}

/// An install, update, or removal of the tracked extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub timestamp: String,
    pub run_id: String,
    pub lifecycle_action: String,
    #[serde(rename = "ExtensionID")]
    pub extension_id: String,
    pub version: String,
    pub workspace_name: String,
    /// `"Global"` when `workspace_name` is `"Global"`, else `"Workspace"`.
    pub workspace_scope: String,
    pub reason: String,
    pub stage: String,
    pub result: String,
    /// Upper-case SHA-256 hex of the extension package, or `PENDING_HASH`.
    pub hash: String,
    pub extension_unification: bool,
    #[serde(rename = "SessionID")]
    pub session_id: String,
}

impl LifecycleEvent {
    /// True when the artifact digest has not been computed yet.
    pub fn hash_pending(&self) -> bool {
        self.hash == PENDING_HASH
    }
}

/// Either kind of audit event, as read back from a log file.
///
/// Untagged: the variant is recognized by its required keys (`CommandID`
/// for invocations, `LifecycleAction` for lifecycle events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditEvent {
    Invocation(InvocationEvent),
    Lifecycle(LifecycleEvent),
}

impl AuditEvent {
    pub fn run_id(&self) -> &str {
        match self {
            AuditEvent::Invocation(e) => &e.run_id,
            AuditEvent::Lifecycle(e) => &e.run_id,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            AuditEvent::Invocation(e) => &e.timestamp,
            AuditEvent::Lifecycle(e) => &e.timestamp,
        }
    }
}

impl From<InvocationEvent> for AuditEvent {
    fn from(e: InvocationEvent) -> Self {
        AuditEvent::Invocation(e)
    }
}

impl From<LifecycleEvent> for AuditEvent {
    fn from(e: LifecycleEvent) -> Self {
        AuditEvent::Lifecycle(e)
    }
}
