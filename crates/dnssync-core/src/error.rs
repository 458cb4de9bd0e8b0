//! Error types for the dnssync system
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for dnssync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dnssync system
#[derive(Error, Debug)]
pub enum Error {
    /// No zone known to the provider matches the requested name
    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    /// The canonical codec rejected a record
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Conversion between canonical and provider form failed
    #[error("{context}: {source}")]
    Translation {
        /// What was being converted
        context: String,
        /// Underlying codec error
        #[source]
        source: Box<Error>,
    },

    /// The provider answered with a non-2xx status
    #[error("unexpected status code: {status}, request: {method} {url}, response: {body}")]
    Status {
        /// HTTP method of the failed request
        method: String,
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("unexpected http error: request: {method} {url}, error: {message}")]
    Transport {
        /// HTTP method of the failed request
        method: String,
        /// Requested URL
        url: String,
        /// Error description
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("error decoding response: status: {status}, request: {method} {url}, response: {body}, error: {message}")]
    Decode {
        /// HTTP method of the failed request
        method: String,
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Decoder error description
        message: String,
    },

    /// The caller cancelled the operation
    #[error("operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation finished
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error annotated with the operation that produced it
    #[error("{context}: {source}")]
    Operation {
        /// What was being attempted
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap a codec failure with the conversion that triggered it
    pub fn translation(context: impl Into<String>, source: Error) -> Self {
        if source.is_cancellation() {
            return source;
        }
        Self::Translation {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Annotate this error with the operation that was being attempted.
    ///
    /// Cancellation errors are returned unchanged so callers can always
    /// match them directly.
    pub fn context(self, context: impl Into<String>) -> Self {
        if self.is_cancellation() {
            return self;
        }
        Self::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for `Cancelled` and `DeadlineExceeded`
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// True if this error, or one it wraps, is a translation failure
    pub fn is_translation(&self) -> bool {
        match self {
            Self::InvalidRecord(_) | Self::Translation { .. } => true,
            Self::Operation { source, .. } => source.is_translation(),
            _ => false,
        }
    }

    /// HTTP status carried by this error or any error it wraps
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Operation { source, .. } | Self::Translation { source, .. } => source.status(),
            _ => None,
        }
    }
}
