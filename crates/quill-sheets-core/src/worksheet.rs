//! Sheet type

use crate::column::ColumnDefinition;
use crate::error::{ConfigError, Error, Result};
use crate::header_group::{self, HeaderGroup};
use crate::style::CellStyle;
use crate::value::CellValue;
use crate::width::ColumnWidth;
use crate::MAX_SHEET_NAME_LEN;

/// Name used for a sheet declared without one
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A single cell of a data row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Cell value
    pub value: CellValue,
    /// Cell-level style, the most specific cascade layer
    pub style: Option<CellStyle>,
}

impl Cell {
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            style: None,
        }
    }

    pub fn styled<V: Into<CellValue>>(value: V, style: CellStyle) -> Self {
        Self {
            value: value.into(),
            style: Some(style),
        }
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Cell { value, style: None }
    }
}

/// One data row, positionally aligned to the sheet's columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a row of unstyled cells
    pub fn from_values<I: IntoIterator<Item = CellValue>>(values: I) -> Self {
        Self {
            cells: values.into_iter().map(Cell::from).collect(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Iterate over the values of the row
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A sheet (single tab of a document)
///
/// Sheets are assembled by [`crate::SheetBuilder`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    columns: Vec<ColumnDefinition>,
    header_groups: Vec<HeaderGroup>,
    rows: Vec<Row>,
    style: Option<CellStyle>,
    freeze_header: bool,
}

impl Sheet {
    pub(crate) fn from_parts(
        name: String,
        columns: Vec<ColumnDefinition>,
        header_groups: Vec<HeaderGroup>,
        rows: Vec<Row>,
        style: Option<CellStyle>,
        freeze_header: bool,
    ) -> Self {
        Self {
            name,
            columns,
            header_groups,
            rows,
            style,
            freeze_header,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column definitions in display order
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by key
    pub fn column(&self, key: &str) -> Result<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| Error::column_not_found(key, format!("sheet '{}'", self.name)))
    }

    /// Position of a column by key
    pub fn column_index(&self, key: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.key() == key)
            .ok_or_else(|| Error::column_not_found(key, format!("sheet '{}'", self.name)))
    }

    /// Width strategy per column, in column order
    pub fn column_widths(&self) -> impl Iterator<Item = Option<&ColumnWidth>> {
        self.columns.iter().map(ColumnDefinition::width)
    }

    /// Header groups in declaration order
    pub fn header_groups(&self) -> &[HeaderGroup] {
        &self.header_groups
    }

    /// Number of header rows: one per group row plus the column header row
    pub fn header_row_count(&self) -> usize {
        self.header_groups
            .iter()
            .map(|g| g.row() as usize + 1)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Data rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a data row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a data cell by row and column indices
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    /// Get a data value by row index and column key
    pub fn value(&self, row: usize, key: &str) -> Result<Option<&CellValue>> {
        let col = self.column_index(key)?;
        Ok(self.cell(row, col).map(|c| &c.value))
    }

    /// Sheet-level style, applied beneath column and cell styles
    pub fn style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    /// Whether renderers should freeze the header rows
    pub fn freeze_header(&self) -> bool {
        self.freeze_header
    }

    /// Check every structural invariant of the sheet
    pub fn validate(&self) -> Result<()> {
        validate_sheet_name(&self.name)?;

        if let Some(style) = &self.style {
            style
                .validate()
                .map_err(|e| Error::style(format!("sheet '{}': {e}", self.name)))?;
        }

        for (idx, column) in self.columns.iter().enumerate() {
            if column.key().is_empty() {
                return Err(ConfigError::EmptyColumnKey {
                    sheet: self.name.clone(),
                }
                .into());
            }
            if self.columns[..idx].iter().any(|c| c.key() == column.key()) {
                return Err(ConfigError::DuplicateColumnKey {
                    sheet: self.name.clone(),
                    key: column.key().to_string(),
                }
                .into());
            }
            column.validate()?;
        }

        header_group::validate_groups(&self.name, &self.columns, &self.header_groups)?;

        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(ConfigError::RowLengthMismatch {
                    sheet: self.name.clone(),
                    row: idx,
                    expected: self.columns.len(),
                    actual: row.len(),
                }
                .into());
            }
            for (cell, column) in row.cells().iter().zip(&self.columns) {
                if let Some(n) = cell.value.as_number().filter(|n| !n.is_finite()) {
                    return Err(Error::Data {
                        column: column.key().to_string(),
                        message: format!(
                            "non-finite number {n} in row {idx} of sheet '{}'",
                            self.name
                        ),
                    });
                }
                if let Some(style) = &cell.style {
                    style.validate().map_err(|e| {
                        Error::style(format!("sheet '{}', row {idx}: {e}", self.name))
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// Validate a sheet name against spreadsheet naming rules
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let invalid = |reason: String| -> Result<()> {
        Err(ConfigError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }
        .into())
    };

    if name.trim().is_empty() {
        return invalid("Sheet name cannot be empty".into());
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return invalid(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        ));
    }

    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
        return invalid(format!("Sheet name cannot contain '{}'", c));
    }

    Ok(())
}
