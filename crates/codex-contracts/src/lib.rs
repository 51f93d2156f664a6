//! # codex-contracts
//!
//! Shared types and errors for the Codex audit log.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod event;
pub mod integrity;
pub mod request;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use error::CodexError;
    use event::{AuditEvent, InvocationEvent, LifecycleEvent, PENDING_HASH};
    use integrity::{IntegrityStatus, SchemaReport, SchemaViolation};

    fn lifecycle() -> LifecycleEvent {
        LifecycleEvent {
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            run_id: "RUN-20240501-120000".to_string(),
            lifecycle_action: "Install".to_string(),
            extension_id: "github.copilot".to_string(),
            version: "1.2.3".to_string(),
            workspace_name: "Global".to_string(),
            workspace_scope: "Global".to_string(),
            reason: "upgrade".to_string(),
            stage: "Configuration".to_string(),
            result: "Success".to_string(),
            hash: PENDING_HASH.to_string(),
            extension_unification: true,
            session_id: "4242".to_string(),
        }
    }

    // ── Event wire format ────────────────────────────────────────────────────

    #[test]
    fn invocation_event_uses_log_file_keys() {
        let event = InvocationEvent {
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            run_id: "RUN-20240501-120000".to_string(),
            invocation_type: "Inline".to_string(),
            command_id: "C1".to_string(),
            shortcut_used: None,
            completion_model: "gpt-4-copilot".to_string(),
            extension_id: "github.copilot".to_string(),
            workspace_name: "W1".to_string(),
            workspace_scope: "Workspace:W1".to_string(),
            context: String::new(),
            stage: "Editing".to_string(),
            result: "Success".to_string(),
            session_id: "4242".to_string(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["CommandID"], "C1");
        assert_eq!(value["ExtensionID"], "github.copilot");
        assert_eq!(value["SessionID"], "4242");
        assert_eq!(value["RunId"], "RUN-20240501-120000");
        assert_eq!(value["WorkspaceScope"], "Workspace:W1");
        // A missing shortcut is written as an explicit null.
        assert!(value.get("ShortcutUsed").unwrap().is_null());
    }

    #[test]
    fn lifecycle_event_uses_log_file_keys() {
        let value = serde_json::to_value(lifecycle()).unwrap();
        assert_eq!(value["LifecycleAction"], "Install");
        assert_eq!(value["Hash"], PENDING_HASH);
        assert_eq!(value["ExtensionUnification"], true);
        assert!(lifecycle().hash_pending());
    }

    #[test]
    fn audit_event_recognizes_variant_by_keys() {
        let raw = serde_json::to_value(lifecycle()).unwrap();
        let event: AuditEvent = serde_json::from_value(raw).unwrap();
        assert!(matches!(event, AuditEvent::Lifecycle(_)));
        assert_eq!(event.run_id(), "RUN-20240501-120000");

        let raw = json!({
            "Timestamp": "2024-05-01T12:00:00.000Z",
            "RunId": "RUN-20240501-120000",
            "InvocationType": "Chat",
            "CommandID": "explain",
            "ShortcutUsed": "Ctrl+I",
            "CompletionModel": "gpt-4-copilot",
            "ExtensionID": "github.copilot",
            "WorkspaceName": "W1",
            "WorkspaceScope": "Workspace:W1",
            "Context": "",
            "Stage": "Editing",
            "Result": "Success",
            "SessionID": "s-1"
        });
        let event: AuditEvent = serde_json::from_value(raw).unwrap();
        match event {
            AuditEvent::Invocation(e) => assert_eq!(e.shortcut_used.as_deref(), Some("Ctrl+I")),
            other => panic!("expected Invocation, got {:?}", other),
        }
    }

    // ── Integrity types ──────────────────────────────────────────────────────

    #[test]
    fn status_precedence_is_error_then_warning() {
        assert_eq!(IntegrityStatus::from_counts(0, 0), IntegrityStatus::Passed);
        assert_eq!(IntegrityStatus::from_counts(0, 3), IntegrityStatus::Warning);
        assert_eq!(IntegrityStatus::from_counts(1, 0), IntegrityStatus::Failed);
        assert_eq!(IntegrityStatus::from_counts(1, 5), IntegrityStatus::Failed);
    }

    #[test]
    fn schema_report_validity_follows_errors() {
        assert!(SchemaReport::from_errors(vec![]).valid);

        let report = SchemaReport::from_errors(vec![SchemaViolation {
            instance_path: "/0/Hash".to_string(),
            schema_path: "/items/properties/Hash/pattern".to_string(),
            actual: json!("xyz"),
            message: "\"xyz\" does not match pattern".to_string(),
        }]);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    // ── Error display ────────────────────────────────────────────────────────

    #[test]
    fn missing_field_display_names_the_field() {
        let err = CodexError::MissingField { field: "CommandID" };
        assert_eq!(err.to_string(), "CommandID is required");
    }

    #[test]
    fn parse_error_display_names_the_file() {
        let err = CodexError::Parse {
            path: "logs/CopilotLifecycleLog.json".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("CopilotLifecycleLog.json"));
        assert!(msg.contains("line 1 column 1"));
    }

    #[test]
    fn not_found_display() {
        let err = CodexError::NotFound {
            path: "schemas/copilot-events.schema.json".to_string(),
        };
        assert!(err.to_string().contains("file not found"));
    }
}
