//! Session identity providers.

use tracing::debug;

use crate::traits::SessionProvider;

/// Environment variable the editor host exports with its process id.
pub const DEFAULT_SESSION_ENV_VAR: &str = "VSCODE_PID";

/// Session id taken from the environment, or a random UUID when unset.
///
/// The environment is read once at construction and the value is reused for
/// every event this provider stamps. It is not stable across restarts.
#[derive(Debug, Clone)]
pub struct EnvSession {
    session_id: String,
}

impl EnvSession {
    pub fn from_env(var: &str) -> Self {
        let session_id = match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => v,
            _ => {
                let generated = uuid::Uuid::new_v4().to_string();
                debug!(env_var = %var, session_id = %generated, "session variable unset, generated id");
                generated
            }
        };
        Self { session_id }
    }
}

impl Default for EnvSession {
    fn default() -> Self {
        Self::from_env(DEFAULT_SESSION_ENV_VAR)
    }
}

impl SessionProvider for EnvSession {
    fn session_id(&self) -> String {
        self.session_id.clone()
    }
}

/// A fixed session id.
#[derive(Debug, Clone)]
pub struct StaticSession(pub String);

impl SessionProvider for StaticSession {
    fn session_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_session_reads_variable() {
        std::env::set_var("CODEX_TEST_SESSION_SET", "31337");
        let session = EnvSession::from_env("CODEX_TEST_SESSION_SET");
        assert_eq!(session.session_id(), "31337");
    }

    #[test]
    fn env_session_falls_back_to_uuid() {
        let session = EnvSession::from_env("CODEX_TEST_SESSION_DEFINITELY_UNSET");
        let id = session.session_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok(), "expected a uuid, got {id}");
        // Stable for the life of the provider.
        assert_eq!(session.session_id(), id);
    }

    #[test]
    fn separate_fallback_providers_differ() {
        let a = EnvSession::from_env("CODEX_TEST_SESSION_DEFINITELY_UNSET");
        let b = EnvSession::from_env("CODEX_TEST_SESSION_DEFINITELY_UNSET");
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn static_session_returns_its_value() {
        assert_eq!(StaticSession("s-1".to_string()).session_id(), "s-1");
    }
}
