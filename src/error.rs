use crate::transport::TransportError;
use thiserror::Error;

/// Where an error came from and which field caused it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// JSON path or configuration name that caused the error (e.g. "items[2].volumeInfo.title")
    pub field_path: Option<String>,
    /// Free-form details, usually the underlying decoder message
    pub details: Option<String>,
    /// Component that raised the error (e.g. "books", "chat", "config")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
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

/// Error type shared by both clients.
///
/// Every variant is terminal for the call that produced it: nothing in this
/// crate retries or substitutes a fallback value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing URL: `{name}` is not configured")]
    MissingUrl { name: String },

    #[error("Missing API key: `{name}` is not configured")]
    MissingApiKey { name: String },

    #[error("API service error{}: {message}{}", format_status(.status), format_context(.context))]
    ApiService {
        status: Option<u16>,
        message: String,
        context: ErrorContext,
    },

    #[error("Book response error: {message}{}", format_context(.context))]
    Book {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
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
    pub fn api_service(status: Option<u16>, msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::ApiService {
            status,
            message: msg.into(),
            context,
        }
    }

    pub fn book(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Book {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True for `MissingUrl` and `MissingApiKey`.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Error::MissingUrl { .. } | Error::MissingApiKey { .. })
    }

    /// HTTP status attached to a service error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiService { status, .. } => *status,
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::ApiService { context, .. }
            | Error::Book { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
