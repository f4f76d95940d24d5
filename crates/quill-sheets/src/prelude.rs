//! Prelude module - common imports for quill-sheets users
//!
//! ```rust
//! use quill_sheets::prelude::*;
//! ```

pub use crate::{
    // Style types
    Alignment,
    BorderStyle,
    Cell,
    CellStyle,
    CellValue,
    Color,
    ColumnDefinition,
    ColumnWidth,
    // Extension traits
    DocumentExt,
    // Error types
    Error,
    ErrorKind,
    // Main types
    ExcelDocument,
    Exportable,
    FieldSet,
    HeaderGroup,
    Renderer,
    Result,
    Theme,
};

#[cfg(feature = "xlsx")]
pub use crate::{XlsxRenderOptions, XlsxRenderer};
