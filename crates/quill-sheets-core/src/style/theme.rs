//! Document-wide style defaults

use super::{Alignment, BorderStyle, CellStyle, Color};
use crate::error::Result;

/// Document theme
///
/// `base` applies to every cell. `header` is layered on top of it for header
/// and header-group rows, `data` for data rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    /// Default for every cell
    pub base: CellStyle,
    /// Extra defaults for header rows
    pub header: CellStyle,
    /// Extra defaults for data rows
    pub data: CellStyle,
}

impl Theme {
    /// Create a theme from a document-wide default
    pub fn new(base: CellStyle) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Theme without any formatting
    pub fn plain() -> Self {
        Self::default()
    }

    /// Bold, centered header on a light gray fill; thin borders everywhere
    pub fn classic() -> Self {
        Self {
            base: CellStyle::new().border(BorderStyle::Thin),
            header: CellStyle::new()
                .bold(true)
                .alignment(Alignment::Center)
                .background(Color::LIGHT_GRAY),
            data: CellStyle::new(),
        }
    }

    /// Set the header-row defaults
    pub fn with_header(mut self, header: CellStyle) -> Self {
        self.header = header;
        self
    }

    /// Set the data-row defaults
    pub fn with_data(mut self, data: CellStyle) -> Self {
        self.data = data;
        self
    }

    /// Validate every layer of the theme
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.header.validate()?;
        self.data.validate()
    }
}
