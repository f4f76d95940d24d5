//! Column definitions

use crate::error::{ConfigError, Error, Result};
use crate::style::CellStyle;
use crate::width::ColumnWidth;

/// A column of a sheet: key, header text, and optional width and style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    key: String,
    header: String,
    width: Option<ColumnWidth>,
    style: Option<CellStyle>,
}

impl ColumnDefinition {
    /// Create a column with the given key and header text
    pub fn new<K: Into<String>, H: Into<String>>(key: K, header: H) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            style: None,
        }
    }

    /// Create a column whose header text is its key
    pub fn keyed<K: Into<String>>(key: K) -> Self {
        let key = key.into();
        Self::new(key.clone(), key)
    }

    /// Set the width strategy
    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column-level style override
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Column key, unique within a sheet
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header text
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Width strategy, if declared
    pub fn width(&self) -> Option<&ColumnWidth> {
        self.width.as_ref()
    }

    /// Column-level style override, if declared
    pub fn style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    pub(crate) fn set_width(&mut self, width: ColumnWidth) {
        self.width = Some(width);
    }

    pub(crate) fn set_style(&mut self, style: CellStyle) {
        self.style = Some(style);
    }

    /// Check width and style declarations
    pub fn validate(&self) -> Result<()> {
        if let Some(width) = &self.width {
            width.validate().map_err(|_| {
                Error::from(ConfigError::InvalidColumnWidth {
                    column: self.key.clone(),
                    width: width.characters().map_or(0, i64::from),
                })
            })?;
        }
        if let Some(style) = &self.style {
            style
                .validate()
                .map_err(|e| Error::style(format!("column '{}': {e}", self.key)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_uses_key_as_header() {
        let column = ColumnDefinition::keyed("email");
        assert_eq!(column.key(), "email");
        assert_eq!(column.header(), "email");
        assert!(column.width().is_none());
    }

    #[test]
    fn test_validate_reports_column() {
        let column = ColumnDefinition::new("age", "Age").with_width(ColumnWidth::Fixed(0));
        let err = column.validate().unwrap_err();
        assert_eq!(
            err.as_configuration(),
            Some(&ConfigError::InvalidColumnWidth {
                column: "age".into(),
                width: 0
            })
        );
    }
}
