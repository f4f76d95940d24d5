//! # quill-sheets
//!
//! Declarative spreadsheet documents built from typed records.
//!
//! Quill-sheets describes a workbook as data: sheets, columns, header groups
//! and rows, each optionally styled. Styles cascade from a document theme down
//! to individual cells, column widths can be fixed, percentage based or
//! automatic, and record types describe their own columns once. Documents are
//! validated as a whole when built and handed to a [`Renderer`] to become a
//! file.
//!
//! ## Features
//!
//! - All-or-nothing document construction with [`DocumentBuilder`]
//! - Theme, sheet, column and cell style cascade
//! - Record schemas cached per type through [`Exportable`]
//! - XLSX output (feature `xlsx`, on by default)
//! - `Serialize`/`Deserialize` for styles and themes (feature `serde`)
//!
//! ## Example
//!
//! ```rust
//! use quill_sheets::prelude::*;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Exportable for Person {
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.field("name", |p: &Person| &p.name).header("Name");
//!         fields.field("age", |p: &Person| &p.age).header("Age");
//!     }
//! }
//!
//! let people = [
//!     Person { name: "Ann".into(), age: 30 },
//!     Person { name: "Bo".into(), age: 41 },
//! ];
//!
//! let doc = ExcelDocument::builder()
//!     .unnamed_sheet(|s| {
//!         s.records(&people);
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(doc.sheet(0).unwrap().name(), "Sheet1");
//! // doc.save("people.xlsx").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use quill_sheets_core::{
    cascade,
    validate_sheet_name,
    // Style types
    Alignment,
    BorderStyle,
    // Document model
    Cell,
    CellStyle,
    CellValue,
    Color,
    ColumnDefinition,
    ColumnWidth,
    // Error types
    ConfigError,
    DataError,
    DocumentBuilder,
    Error,
    ErrorKind,
    ExcelDocument,
    // Record mapping
    Exportable,
    FieldDescriptor,
    FieldSet,
    HeaderGroup,
    Renderer,
    Result,
    Row,
    Schema,
    SchemaField,
    SchemaRegistry,
    Sheet,
    SheetBuilder,
    SheetStyles,
    StylePool,
    Theme,
    ToCellValue,
    DEFAULT_SHEET_NAME,
    MAX_SHEET_NAME_LEN,
};

// Re-export renderers
#[cfg(feature = "xlsx")]
pub use quill_sheets_xlsx::{XlsxError, XlsxRenderOptions, XlsxRenderer, MAX_COLS, MAX_ROWS};

use std::path::Path;

/// Extension trait for [`ExcelDocument`] to pick a renderer from a file name
pub trait DocumentExt {
    /// Save the document to a file, choosing the format by extension
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl DocumentExt for ExcelDocument {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            #[cfg(feature = "xlsx")]
            Some("xlsx") => self.render_to_path(&XlsxRenderer::new(), path),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into()),
        }
    }
}
