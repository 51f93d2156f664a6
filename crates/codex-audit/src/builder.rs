//! Event builders.
//!
//! `EventLogger` validates a request, fills defaults, stamps the event with
//! a timestamp, run id and session id, and appends it to the right log.
//! Validation happens before any file is touched: a rejected request never
//! leaves a partial record behind.

use std::path::PathBuf;

use tracing::info;

use codex_contracts::{
    error::{CodexError, CodexResult},
    event::{InvocationEvent, LifecycleEvent, DEFAULT_EXTENSION_ID, GLOBAL_WORKSPACE},
    request::{InvocationRequest, LifecycleRequest},
};
use codex_core::{
    ids,
    traits::{Clock, SessionProvider},
};

use crate::{hash::HashResolver, store::JsonArrayStore};

const DEFAULT_INVOCATION_TYPE: &str = "Inline";
const DEFAULT_COMPLETION_MODEL: &str = "gpt-4-copilot";
const DEFAULT_INVOCATION_STAGE: &str = "Editing";
const DEFAULT_LIFECYCLE_STAGE: &str = "Configuration";
const DEFAULT_RESULT: &str = "Success";

/// Builds invocation and lifecycle events and appends them to their logs.
pub struct EventLogger {
    clock: Box<dyn Clock>,
    session: Box<dyn SessionProvider>,
    resolver: HashResolver,
    invocation_log: PathBuf,
    lifecycle_log: PathBuf,
    lock: bool,
}

impl EventLogger {
    /// Create a logger writing to the given default log paths. A request's
    /// `log_path` overrides the default for that one event.
    pub fn new(
        clock: Box<dyn Clock>,
        session: Box<dyn SessionProvider>,
        resolver: HashResolver,
        invocation_log: impl Into<PathBuf>,
        lifecycle_log: impl Into<PathBuf>,
    ) -> Self {
        Self {
            clock,
            session,
            resolver,
            invocation_log: invocation_log.into(),
            lifecycle_log: lifecycle_log.into(),
            lock: false,
        }
    }

    /// Take the store's advisory lock around each append.
    pub fn with_store_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    /// Build, append, and return one invocation event.
    ///
    /// # Errors
    ///
    /// `MissingField` if `command_id` or `workspace` is absent or blank;
    /// store errors (`Parse`, `Io`, `LockFailed`) from the append.
    pub fn build_invocation_event(&self, req: &InvocationRequest) -> CodexResult<InvocationEvent> {
        let command_id = required(&req.command_id, "CommandID")?;
        let workspace = required(&req.workspace, "Workspace")?;

        let stamp = ids::stamp(self.clock.as_ref());
        let event = InvocationEvent {
            timestamp: stamp.timestamp,
            run_id: stamp.run_id,
            invocation_type: or_default(&req.invocation_type, DEFAULT_INVOCATION_TYPE),
            command_id: command_id.to_string(),
            shortcut_used: req.shortcut_used.clone(),
            completion_model: or_default(&req.completion_model, DEFAULT_COMPLETION_MODEL),
            extension_id: DEFAULT_EXTENSION_ID.to_string(),
            workspace_name: workspace.to_string(),
            workspace_scope: format!("Workspace:{workspace}"),
            context: req.context.clone().unwrap_or_default(),
            stage: or_default(&req.stage, DEFAULT_INVOCATION_STAGE),
            result: or_default(&req.result, DEFAULT_RESULT),
            session_id: self.session.session_id(),
        };

        let store = JsonArrayStore::new(
            req.log_path.clone().unwrap_or_else(|| self.invocation_log.clone()),
        )
        .with_lock(self.lock);
        store.append(&event)?;

        info!(
            command_id = %event.command_id,
            invocation_type = %event.invocation_type,
            workspace = %event.workspace_name,
            model = %event.completion_model,
            run_id = %event.run_id,
            log = %store.path().display(),
            "logged invocation"
        );
        Ok(event)
    }

    /// Build, append, and return one lifecycle event.
    ///
    /// The package hash is resolved after validation and before the append;
    /// a missing or unreadable package yields the pending sentinel.
    ///
    /// # Errors
    ///
    /// `MissingField` for the first of `Action`, `Version`, `Workspace`,
    /// `Reason` that is absent or blank; store errors from the append.
    pub fn build_lifecycle_event(&self, req: &LifecycleRequest) -> CodexResult<LifecycleEvent> {
        let action = required(&req.action, "Action")?;
        let version = required(&req.version, "Version")?;
        let workspace = required(&req.workspace, "Workspace")?;
        let reason = required(&req.reason, "Reason")?;
        let extension_id = or_default(&req.extension_id, DEFAULT_EXTENSION_ID);

        let stamp = ids::stamp(self.clock.as_ref());
        let hash = self.resolver.resolve(&extension_id, version);
        let workspace_scope = if workspace == GLOBAL_WORKSPACE {
            "Global"
        } else {
            "Workspace"
        };

        let event = LifecycleEvent {
            timestamp: stamp.timestamp,
            run_id: stamp.run_id,
            lifecycle_action: action.to_string(),
            extension_id,
            version: version.to_string(),
            workspace_name: workspace.to_string(),
            workspace_scope: workspace_scope.to_string(),
            reason: reason.to_string(),
            stage: or_default(&req.stage, DEFAULT_LIFECYCLE_STAGE),
            result: or_default(&req.result, DEFAULT_RESULT),
            hash,
            extension_unification: true,
            session_id: self.session.session_id(),
        };

        let store = JsonArrayStore::new(
            req.log_path.clone().unwrap_or_else(|| self.lifecycle_log.clone()),
        )
        .with_lock(self.lock);
        store.append(&event)?;

        info!(
            action = %event.lifecycle_action,
            extension_id = %event.extension_id,
            version = %event.version,
            workspace = %event.workspace_name,
            run_id = %event.run_id,
            hash = %event.hash,
            log = %store.path().display(),
            "logged lifecycle event"
        );
        Ok(event)
    }
}

/// A required field: absent, empty, or whitespace-only values are rejected.
fn required<'a>(value: &'a Option<String>, field: &'static str) -> CodexResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CodexError::MissingField { field }),
    }
}

/// An optional field: absent values take `default`, and so does an explicit
/// `""`. An empty string is never written for a defaulted field.
fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
