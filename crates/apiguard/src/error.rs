use thiserror::Error;

/// Errors produced while loading documents or configuration (E2000-E2005).
///
/// The lint engine itself is infallible; everything here happens before it runs.
#[derive(Debug, Error)]
pub enum LintError {
    /// E2000: File could not be read.
    #[error("E2000: failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E2001: YAML/JSON parse error.
    #[error("E2001: parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// E2002: Document root is not a mapping.
    #[error("E2002: document root must be an object: {0}")]
    NotAnObject(String),

    /// E2003: Configuration file unreadable or invalid.
    #[error("E2003: invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    /// E2004: Malformed `--rule key=severity` override.
    #[error("E2004: invalid rule override '{0}': {1}")]
    RuleOverride(String, String),

    /// E2005: Logging could not be initialized.
    #[error("E2005: failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl LintError {
    /// Stable error code, as printed at the start of the message.
    pub fn code(&self) -> &'static str {
        match self {
            LintError::Io { .. } => "E2000",
            LintError::Parse { .. } => "E2001",
            LintError::NotAnObject(_) => "E2002",
            LintError::Config { .. } => "E2003",
            LintError::RuleOverride(..) => "E2004",
            LintError::LoggingInit(_) => "E2005",
        }
    }
}
