//! # quill-sheets-core
//!
//! Document model and record mapping for the quill-sheets spreadsheet library.
//!
//! This crate provides:
//! - [`ExcelDocument`], [`Sheet`], [`ColumnDefinition`], [`HeaderGroup`] - the declarative document model
//! - [`CellStyle`] and [`Theme`] - styles and their cascade (theme, sheet, column, cell)
//! - [`ColumnWidth`] - fixed, percentage and automatic column widths
//! - [`Exportable`] and [`Schema`] - turning record types into columns and rows
//! - [`DocumentBuilder`] - all-or-nothing document construction
//! - [`Renderer`] - the seam to file encoders
//!
//! ## Example
//!
//! ```rust
//! use quill_sheets_core::{CellStyle, Color, ExcelDocument, Exportable, FieldSet, Theme};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Exportable for Person {
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.field("name", |p: &Person| &p.name).header("Name");
//!         fields.field("age", |p: &Person| &p.age).header("Age").fixed_width(10);
//!     }
//! }
//!
//! let people = vec![
//!     Person { name: "Ann".into(), age: 30 },
//!     Person { name: "Bo".into(), age: 41 },
//! ];
//!
//! let doc = ExcelDocument::builder()
//!     .theme(Theme::classic())
//!     .unnamed_sheet(|s| {
//!         s.style(CellStyle::new().font_color(Color::BLACK))
//!             .records(&people);
//!     })
//!     .build()
//!     .unwrap();
//!
//! let styles = doc.styles(0).unwrap();
//! assert!(styles.header_cell(0).unwrap().bold);
//! assert_eq!(doc.sheet(0).unwrap().name(), "Sheet1");
//! ```

pub mod builder;
pub mod cascade;
pub mod column;
pub mod document;
pub mod error;
pub mod header_group;
pub mod render;
pub mod schema;
pub mod style;
pub mod value;
pub mod width;
pub mod worksheet;

// Re-exports for convenience
pub use builder::{DocumentBuilder, SheetBuilder};
pub use cascade::{cascade, SheetStyles};
pub use column::ColumnDefinition;
pub use document::ExcelDocument;
pub use error::{ConfigError, Error, ErrorKind, Result};
pub use header_group::HeaderGroup;
pub use render::Renderer;
pub use schema::{Exportable, FieldDescriptor, FieldSet, Schema, SchemaField, SchemaRegistry};
pub use value::{CellValue, DataError, ToCellValue};
pub use width::ColumnWidth;
pub use worksheet::{validate_sheet_name, Cell, Row, Sheet, DEFAULT_SHEET_NAME};

pub use style::{Alignment, BorderStyle, CellStyle, Color, StylePool, Theme};

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
