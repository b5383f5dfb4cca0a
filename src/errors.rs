use std::fmt;

/// A single field-level validation failure.
///
/// Collected per field so a caller can surface every problem with a
/// submission at once instead of one at a time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// Name of the offending form field (e.g. "dealValue").
    pub field: String,
    /// Human-readable description of the rule that failed.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Input failed schema rules; reported per field. Never leaves the client.
    Validation(Vec<FieldError>),
    /// Session credential absent or malformed; remote calls are refused
    /// locally before any network attempt.
    AuthenticationMissing(String),
    /// CSV structurally malformed; aborts a bulk operation before any upload.
    Parse(String),
    /// The remote API returned a non-success status for a well-formed request.
    RemoteRejected {
        /// HTTP status code returned by the remote system.
        status: u16,
        /// Remote error message, surfaced verbatim when available.
        message: String,
    },
    /// The request could not complete (connect failure, timeout, bad body).
    Network(String),
    /// Local file I/O failure (e.g. reading a CSV upload).
    Io(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Validation failed: {}", joined)
            }
            AppError::AuthenticationMissing(msg) => {
                write!(f, "Authentication data not found: {}", msg)
            }
            AppError::Parse(msg) => write!(f, "Invalid CSV format: {}", msg),
            AppError::RemoteRejected { status, message } => {
                write!(f, "Remote API error ({}): {}", status, message)
            }
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// User-facing notification text.
    ///
    /// RemoteRejected and Network read the same to the user; the distinction
    /// only matters for diagnostics.
    pub fn user_message(&self) -> String {
        match self {
            AppError::RemoteRejected { message, .. } => message.clone(),
            AppError::Network(_) => "The request could not be completed".to_string(),
            AppError::WithContext { source, .. } => source.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether this error came back from (or on the way to) the remote API,
    /// as opposed to being raised locally.
    pub fn is_remote(&self) -> bool {
        match self {
            AppError::RemoteRejected { .. } | AppError::Network(_) => true,
            AppError::WithContext { source, .. } => source.is_remote(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    /// Converts a `csv::Error` into an `AppError`.
    fn from(err: csv::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for std::io::Error to add context
impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Io(e.to_string())),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Io(e.to_string())),
            context: f(),
        })
    }
}
