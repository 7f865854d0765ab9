//! Error types for OGC API client operations.

use thiserror::Error;

/// Result type alias using OgcError.
pub type OgcResult<T> = Result<T, OgcError>;

/// Every failure an OGC API client operation can surface.
///
/// Operations never return partial results: they either produce the full
/// value or one of these errors.
#[derive(Debug, Error)]
pub enum OgcError {
    // === Transport Errors ===
    /// The server answered with anything other than 200.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The request never produced a response (DNS, connection, TLS).
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // === Document Errors ===
    #[error("Not JSON")]
    NotJson,

    #[error("Invalid format: (property 'links' is missing)")]
    MissingLinksProperty,

    // Kept verbatim, including the missing closing parenthesis.
    #[error("Invalid format: (property 'links' contains no links with rel=data")]
    NoDataLink,

    #[error("tileMatrixSets not defined")]
    InvalidTileMatrixSetCatalog,

    #[error("TileSet has invalid data")]
    InvalidTileMatrixSetGeometry,

    // === Collaborator Errors ===
    /// The feature codec rejected the response body.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The bounds transformer could not map between two references.
    #[error("Transform error: {0}")]
    Transform(String),
}

impl OgcError {
    /// HTTP status carried by this error, if it came from a non-200 response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            OgcError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// True when the server responded but the document shape was wrong.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            OgcError::NotJson
                | OgcError::MissingLinksProperty
                | OgcError::NoDataLink
                | OgcError::InvalidTileMatrixSetCatalog
                | OgcError::InvalidTileMatrixSetGeometry
        )
    }
}

impl From<serde_json::Error> for OgcError {
    fn from(_: serde_json::Error) -> Self {
        OgcError::NotJson
    }
}
