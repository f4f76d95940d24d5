//! Header groups spanning several columns

use std::ops::RangeInclusive;

use crate::column::ColumnDefinition;
use crate::error::{ConfigError, Error, Result};
use crate::style::CellStyle;

/// A label spanning a contiguous run of columns in a multi-row header
///
/// Groups in header row 0 sit at the top; the column header row always comes
/// after the last group row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    label: String,
    columns: Vec<String>,
    row: u32,
    style: Option<CellStyle>,
}

impl HeaderGroup {
    /// Create a group in header row 0
    pub fn new<L, I, K>(label: L, columns: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            label: label.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            row: 0,
            style: None,
        }
    }

    /// Place the group in another header row
    pub fn in_row(mut self, row: u32) -> Self {
        self.row = row;
        self
    }

    /// Set a style for the group cell
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column keys covered by the group, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Header row the group is drawn in
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    /// Resolve the span against a sheet's columns.
    ///
    /// Returns the inclusive range of column indices. Every key must exist
    /// and the keys must follow each other in sheet order.
    pub fn span(&self, sheet: &str, columns: &[ColumnDefinition]) -> Result<RangeInclusive<usize>> {
        let mut indices = Vec::with_capacity(self.columns.len());
        for key in &self.columns {
            let Some(idx) = columns.iter().position(|c| c.key() == key) else {
                return Err(ConfigError::HeaderGroupUnknownColumn {
                    sheet: sheet.to_string(),
                    label: self.label.clone(),
                    key: key.clone(),
                }
                .into());
            };
            indices.push(idx);
        }

        let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
            return Err(ConfigError::EmptyHeaderGroup {
                sheet: sheet.to_string(),
                label: self.label.clone(),
            }
            .into());
        };

        if indices.windows(2).any(|pair| pair[1] != pair[0] + 1) {
            return Err(ConfigError::HeaderGroupNotContiguous {
                sheet: sheet.to_string(),
                label: self.label.clone(),
            }
            .into());
        }

        Ok(first..=last)
    }

    pub(crate) fn validate_style(&self) -> Result<()> {
        match &self.style {
            Some(style) => style
                .validate()
                .map_err(|e| Error::style(format!("header group '{}': {e}", self.label))),
            None => Ok(()),
        }
    }
}

/// Check that every group resolves and that groups of one row do not overlap
pub(crate) fn validate_groups(
    sheet: &str,
    columns: &[ColumnDefinition],
    groups: &[HeaderGroup],
) -> Result<()> {
    let mut placed: Vec<(u32, RangeInclusive<usize>, &str)> = Vec::with_capacity(groups.len());

    for group in groups {
        group.validate_style()?;
        let span = group.span(sheet, columns)?;

        if let Some((_, _, other)) = placed.iter().find(|(row, existing, _)| {
            *row == group.row && span.start() <= existing.end() && existing.start() <= span.end()
        }) {
            return Err(ConfigError::HeaderGroupOverlap {
                sheet: sheet.to_string(),
                row: group.row,
                first: other.to_string(),
                second: group.label.clone(),
            }
            .into());
        }

        placed.push((group.row, span, &group.label));
    }

    Ok(())
}
