use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque caller identity bundle obtained at sign-in.
///
/// Required on every authenticated call. Replaces the original portal's
/// global client-side storage with an explicit context object that is passed
/// to each operation that needs it; [`require`] is the single accessor that
/// fails fast when the credential is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Session")]
    pub session: String,
}

impl SessionCredential {
    /// All three parts must be present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.token.trim().is_empty()
            && !self.session.trim().is_empty()
    }

    /// Parses a credential from its stored JSON form.
    ///
    /// Malformed JSON and incomplete bundles are both authentication errors:
    /// either way no remote call may be attempted with this credential.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let credential: SessionCredential = serde_json::from_str(raw).map_err(|e| {
            AppError::AuthenticationMissing(format!("failed to parse session data: {}", e))
        })?;

        if !credential.is_complete() {
            return Err(AppError::AuthenticationMissing(
                "session data is incomplete (Id, Token and Session are required)".to_string(),
            ));
        }

        Ok(credential)
    }

    /// Loads the credential from the session file written at sign-in.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::AuthenticationMissing(format!(
                "session file {} not readable: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    /// Persists the credential for later operations.
    pub fn store(&self, path: &Path) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Io(format!("failed to serialize session data: {}", e)))?;
        std::fs::write(path, raw)?;
        tracing::info!("Session credential stored at {}", path.display());
        Ok(())
    }
}

/// Fail-fast accessor for the session credential.
///
/// Every operation that talks to the remote API goes through this before any
/// network attempt.
pub fn require(credential: Option<&SessionCredential>) -> Result<&SessionCredential, AppError> {
    match credential {
        Some(c) if c.is_complete() => Ok(c),
        Some(_) => Err(AppError::AuthenticationMissing(
            "session credential is incomplete".to_string(),
        )),
        None => Err(AppError::AuthenticationMissing(
            "no session credential present; sign in first".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> SessionCredential {
        SessionCredential {
            id: "42".to_string(),
            token: "tok".to_string(),
            session: "sess".to_string(),
        }
    }

    #[test]
    fn parses_stored_json() {
        let raw = r#"{"Id":"42","Token":"tok","Session":"sess"}"#;
        assert_eq!(SessionCredential::from_json(raw).unwrap(), credential());
    }

    #[test]
    fn rejects_incomplete_bundle() {
        let raw = r#"{"Id":"42","Token":"","Session":"sess"}"#;
        let err = SessionCredential::from_json(raw).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationMissing(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SessionCredential::from_json("not json").unwrap_err();
        assert!(matches!(err, AppError::AuthenticationMissing(_)));
    }

    #[test]
    fn require_fails_fast_without_credential() {
        let err = require(None).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationMissing(_)));

        let c = credential();
        assert!(require(Some(&c)).is_ok());
    }
}
