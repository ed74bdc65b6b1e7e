use std::fmt;

/// Errors surfaced by catalog lookups.
///
/// Lookup failure is fatal for the operation that needed the data; there is
/// no retry policy here and callers must not substitute defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request could not be sent or the transport failed mid-flight.
    Transport(String),
    /// The server answered with a non-success status code.
    Status { endpoint: String, status: u16 },
    /// The payload could not be decoded into the expected record shape.
    Decode { endpoint: String, detail: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Transport(detail) => write!(f, "catalog transport error: {}", detail),
            CatalogError::Status { endpoint, status } => {
                write!(f, "catalog request to {} failed with status {}", endpoint, status)
            }
            CatalogError::Decode { endpoint, detail } => {
                write!(f, "catalog response from {} could not be decoded: {}", endpoint, detail)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
