//! Document type - the finished, immutable model handed to renderers

use crate::builder::DocumentBuilder;
use crate::cascade::SheetStyles;
use crate::error::{ConfigError, Result};
use crate::style::Theme;
use crate::worksheet::Sheet;

/// A spreadsheet document
///
/// Produced by [`DocumentBuilder::build`]; every invariant has been checked by
/// then, so readers (including renderers) can rely on it without
/// re-validating. The document has no interior mutability and can be shared
/// freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcelDocument {
    sheets: Vec<Sheet>,
    theme: Option<Theme>,
}

impl ExcelDocument {
    /// Start declaring a document
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    pub(crate) fn from_parts(sheets: Vec<Sheet>, theme: Option<Theme>) -> Self {
        Self { sheets, theme }
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the document has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Document theme, if any
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Style resolver for one sheet
    pub fn styles(&self, sheet_index: usize) -> Option<SheetStyles<'_>> {
        self.sheets
            .get(sheet_index)
            .map(|sheet| SheetStyles::new(self.theme.as_ref(), sheet))
    }

    /// Check document-level invariants and every sheet
    pub fn validate(&self) -> Result<()> {
        if let Some(theme) = &self.theme {
            theme.validate()?;
        }

        for (idx, sheet) in self.sheets.iter().enumerate() {
            sheet.validate()?;

            let lower = sheet.name().to_lowercase();
            if self.sheets[..idx]
                .iter()
                .any(|other| other.name().to_lowercase() == lower)
            {
                return Err(ConfigError::DuplicateSheetName(sheet.name().to_string()).into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefinition;

    #[test]
    fn test_sheet_lookup_by_name() {
        let doc = ExcelDocument::builder()
            .sheet("Totals", |s| {
                s.column(ColumnDefinition::keyed("sum"));
            })
            .unnamed_sheet(|_| {})
            .build()
            .unwrap();

        assert_eq!(doc.sheet_by_name("Totals").unwrap().column_count(), 1);
        assert_eq!(doc.sheet_by_name("Sheet2").unwrap().column_count(), 0);
        assert!(doc.sheet_by_name("Missing").is_none());
        assert_eq!(doc.sheets().count(), 2);
    }
}
