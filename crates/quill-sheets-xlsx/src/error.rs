//! XLSX error types

use thiserror::Error;

/// Result type for XLSX rendering
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while writing an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document cannot be represented in the XLSX format
    #[error("Cannot write document as XLSX: {0}")]
    InvalidDocument(String),
}
