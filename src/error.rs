use serde::Serialize;
use thiserror::Error;

/// Failures of the key-value persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key `{key}` is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Metric whose formula divides by a value that may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    BreakEven,
    Roi,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::BreakEven => f.write_str("break-even"),
            Metric::Roi => f.write_str("ROI"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0} is undefined for these inputs")]
    DivisionUndefined(Metric),

    #[error("Invalid value for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Message for the presentation layer. Every core failure is displayed
    /// as an error notice.
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A message tagged with severity, handed to whatever renders the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_error_notices() {
        let notice = AppError::DuplicateEmail.notice();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Email already registered");

        let notice = AppError::DivisionUndefined(Metric::Roi).notice();
        assert_eq!(notice.message, "ROI is undefined for these inputs");
    }

    #[test]
    fn validation_message_names_field() {
        let err = AppError::validation("initialCapital", "must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid value for initialCapital: must not be negative"
        );
    }

    #[test]
    fn notice_serializes_lowercase_severity() {
        let json = serde_json::to_string(&Notice::info("Registration successful")).unwrap();
        assert!(json.contains(r#""severity":"info""#));
    }
}
