//! Error types for index lookups and downloads.

use std::path::PathBuf;

use thiserror::Error;
use zigdl_schema::CatalogError;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Network and HTTP-level failures.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("{url} access failed, code: {status}, reason: {reason}, body: {body}")]
    Status {
        url: String,
        status: u16,
        reason: String,
        body: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The response body stopped or failed part way through.
    #[error("Reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Request { url, .. } | Self::Body { url, .. } => url,
        }
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Shasum mismatch for {url}, expected: {expected}, actual: {actual}")]
    Integrity {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Flat discriminant of [`Error`], convenient for callers that only need to
/// branch on the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    UnknownVersion,
    UnsupportedPlatform,
    EmptyCatalog,
    Integrity,
    Io,
    InvalidUrl,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Client(_) => ErrorKind::Transport,
            Self::Parse { .. }
            | Self::Catalog(
                CatalogError::InvalidVersion(_) | CatalogError::InvalidArtifact { .. },
            ) => ErrorKind::Parse,
            Self::Catalog(CatalogError::UnknownVersion(_)) => ErrorKind::UnknownVersion,
            Self::Catalog(CatalogError::UnsupportedPlatform { .. }) => {
                ErrorKind::UnsupportedPlatform
            }
            Self::Catalog(CatalogError::EmptyCatalog) => ErrorKind::EmptyCatalog,
            Self::Integrity { .. } => ErrorKind::Integrity,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
