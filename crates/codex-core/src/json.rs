//! Whole-file JSON reads shared by the log store and the validators.

use std::path::Path;

use serde_json::Value;

use codex_contracts::error::{CodexError, CodexResult};

/// Read and parse any JSON document.
///
/// Returns `NotFound` for an absent file, `Parse` for malformed JSON, and
/// `Io` for any other read failure.
pub fn read_json(path: &Path) -> CodexResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CodexError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            CodexError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })?;
    serde_json::from_str(&contents).map_err(|e| CodexError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read `path` and require the root to be a JSON array.
pub fn read_json_array(path: &Path) -> CodexResult<Vec<Value>> {
    match read_json(path)? {
        Value::Array(entries) => Ok(entries),
        other => Err(CodexError::Parse {
            path: path.display().to_string(),
            reason: format!("log root must be a JSON array, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, r#"[{"A": 1}, 2]"#).unwrap();
        assert_eq!(read_json_array(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_json(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CodexError::NotFound { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(read_json(&path), Err(CodexError::Parse { .. })));
    }

    #[test]
    fn test_scalar_root_is_not_a_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.json");
        std::fs::write(&path, "42").unwrap();
        match read_json_array(&path) {
            Err(CodexError::Parse { reason, .. }) => assert!(reason.contains("a number")),
            other => panic!("expected Parse, got {:?}", other),
        }
    }
}
