use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried across the transport boundary
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Every way a single invocation can fail
///
/// None of these are recoverable: the entry point reports the error once and
/// exits with status 1.
#[derive(Debug, Error)]
pub enum QurlError {
    #[error("no query given: pass either --query or --file when the last argument is the endpoint URL")]
    MissingQuerySource,

    #[error("conflicting query sources: {0}")]
    ConflictingQuerySource(String),

    #[error("last argument '{0}' is neither a readable file nor a query")]
    InvalidQuerySource(String),

    #[error("no endpoint: last argument is not a URL and --endpoint '{0}' is not a valid absolute URL")]
    MissingEndpoint(String),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported HTTP method: '{0}'")]
    InvalidMethod(String),

    #[error("invalid header '{header}': {reason}")]
    InvalidHeader { header: String, reason: String },

    #[error("failed to read query file '{}'", path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode request body: {0}")]
    EncodingError(String),

    #[error("{context}")]
    TransportError {
        context: String,
        #[source]
        source: Cause,
    },

    #[error("failed to read response body")]
    BodyReadError(#[source] Cause),
}

impl QurlError {
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        QurlError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_header(header: &str, reason: impl ToString) -> Self {
        QurlError::InvalidHeader {
            header: header.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(context: impl Into<String>, source: impl Into<Cause>) -> Self {
        QurlError::TransportError {
            context: context.into(),
            source: source.into(),
        }
    }
}
