use crate::protocol::Operation;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration and local I/O failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Setting or parameter that caused the error (e.g., "host", "AZKABAN_PROXY_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "session_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Azkaban client.
///
/// `Session` and `Api` are produced by the response classifier; `Transport`
/// is the unreachable-server case and is never reclassified.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session error: {0}")]
    Session(String),

    #[error("{operation} error: {message}")]
    Api { operation: Operation, message: String },

    #[error("{operation} error: response has no '{field}' field")]
    MissingField {
        operation: Operation,
        field: &'static str,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Domain error for `operation` carrying the server's message.
    pub fn api(operation: Operation, message: impl Into<String>) -> Self {
        Error::Api {
            operation,
            message: message.into(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True for failures that mean the caller must log in again.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::NotLoggedIn | Error::Session(_))
    }

    /// The operation a domain error was raised for.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Api { operation, .. } | Error::MissingField { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    /// Server-provided message for classifier errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            Error::Session(message) => Some(message),
            _ => None,
        }
    }

    /// Where a configuration error came from (setting, rejected value, component).
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
