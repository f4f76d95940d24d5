//! Error types for quill-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while declaring, building or rendering a document
#[derive(Debug, Error)]
pub enum Error {
    /// A record value could not be extracted or converted into a cell value
    #[error("Data error in column '{column}': {message}")]
    Data { column: String, message: String },

    /// The renderer (or the sink it writes to) failed; the source is kept as-is
    #[error(transparent)]
    Write(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Invalid builder or schema declaration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Lookup of a column by key failed
    #[error("Column not found: '{key}' in {scope}")]
    ColumnNotFound { key: String, scope: String },

    /// Invalid or conflicting style declaration
    #[error("Style error: {0}")]
    Style(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Data,
    Write,
    Configuration,
    ColumnNotFound,
    Style,
}

impl Error {
    /// Wrap a renderer or sink failure without reinterpreting it
    pub fn write<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Error::Write(err.into())
    }

    /// Create a style error with a message
    pub fn style<S: Into<String>>(msg: S) -> Self {
        Error::Style(msg.into())
    }

    pub(crate) fn column_not_found(key: impl Into<String>, scope: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            key: key.into(),
            scope: scope.into(),
        }
    }

    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Data { .. } => ErrorKind::Data,
            Error::Write(_) => ErrorKind::Write,
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::ColumnNotFound { .. } => ErrorKind::ColumnNotFound,
            Error::Style(_) => ErrorKind::Style,
        }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Get the configuration error details, if any
    pub fn as_configuration(&self) -> Option<&ConfigError> {
        match self {
            Error::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

/// Invalid declarations detected while building a schema or document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Fixed width that is not a positive character count
    #[error("Fixed column width must be a positive character count, got {width}")]
    InvalidFixedWidth { width: i64 },

    /// Fixed width on a specific column that is not a positive character count
    #[error("Column '{column}' has invalid fixed width {width}")]
    InvalidColumnWidth { column: String, width: i64 },

    /// Column declared without a key
    #[error("Sheet '{sheet}' declares a column with an empty key")]
    EmptyColumnKey { sheet: String },

    /// Two columns of one sheet share a key
    #[error("Sheet '{sheet}' declares column '{key}' more than once")]
    DuplicateColumnKey { sheet: String, key: String },

    /// Record type exposes no exportable fields
    #[error("Record type '{record}' declares no exportable fields")]
    EmptyRecord { record: String },

    /// Record type declares the same field twice
    #[error("Record type '{record}' declares field '{field}' more than once")]
    DuplicateField { record: String, field: String },

    /// Two fields claim the same explicit order index
    #[error("Record type '{record}': fields '{first}' and '{second}' both claim order {order}")]
    ConflictingFieldOrder {
        record: String,
        order: u32,
        first: String,
        second: String,
    },

    /// Header group without columns
    #[error("Header group '{label}' in sheet '{sheet}' spans no columns")]
    EmptyHeaderGroup { sheet: String, label: String },

    /// Header group references a column the sheet does not declare
    #[error("Header group '{label}' in sheet '{sheet}' references unknown column '{key}'")]
    HeaderGroupUnknownColumn {
        sheet: String,
        label: String,
        key: String,
    },

    /// Header group columns are not a contiguous, ordered run
    #[error("Header group '{label}' in sheet '{sheet}' does not span a contiguous run of columns")]
    HeaderGroupNotContiguous { sheet: String, label: String },

    /// Two header groups of the same header row share a column
    #[error("Header groups '{first}' and '{second}' overlap in header row {row} of sheet '{sheet}'")]
    HeaderGroupOverlap {
        sheet: String,
        row: u32,
        first: String,
        second: String,
    },

    /// Data row whose width differs from the column count
    #[error("Row {row} of sheet '{sheet}' has {actual} cells, expected {expected}")]
    RowLengthMismatch {
        sheet: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Records whose schema disagrees with the columns already declared
    #[error("Record type '{record}' does not match the columns declared on sheet '{sheet}'")]
    SchemaMismatch { sheet: String, record: String },

    /// Sheet name rejected by spreadsheet naming rules
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// Two sheets share a name (case-insensitive)
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Output path whose extension no renderer handles
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err: Error = ConfigError::InvalidFixedWidth { width: 0 }.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.is_configuration());

        let err = Error::column_not_found("age", "sheet 'People'");
        assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
        assert_eq!(err.to_string(), "Column not found: 'age' in sheet 'People'");
    }

    #[test]
    fn test_write_error_is_passed_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only sink");
        let err = Error::write(io);
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(err.to_string(), "read-only sink");

        let Error::Write(inner) = err else {
            panic!("expected write error");
        };
        let io = inner.downcast::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
    }
}
