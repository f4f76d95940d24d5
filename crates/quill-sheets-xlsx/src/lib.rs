//! # quill-sheets-xlsx
//!
//! XLSX (Office Open XML) renderer for quill-sheets.
//!
//! [`XlsxRenderer`] implements [`quill_sheets_core::Renderer`]: it asks the
//! document for cascaded styles and declared widths and encodes the result as
//! a `.xlsx` package.
//!
//! ```rust
//! use quill_sheets_core::{CellValue, ColumnDefinition, ExcelDocument};
//! use quill_sheets_xlsx::XlsxRenderer;
//!
//! let doc = ExcelDocument::builder()
//!     .sheet("Report", |s| {
//!         s.column(ColumnDefinition::new("total", "Total"))
//!             .row([CellValue::from(42)]);
//!     })
//!     .build()
//!     .unwrap();
//!
//! let bytes = doc.render_to_vec(&XlsxRenderer::new()).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

pub mod error;
pub mod layout;
pub mod options;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use options::XlsxRenderOptions;
pub use writer::XlsxRenderer;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: usize = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: usize = 16_384;
