//! Cell styling types
//!
//! This module contains the style value types and the layer type that the
//! cascade composes:
//! - [`CellStyle`] - Bag of optional style attributes with a merge operator
//! - [`Theme`] - Document-wide defaults for header and data rows
//! - [`Color`], [`Alignment`], [`BorderStyle`] - Attribute values
//! - [`StylePool`] - Deduplicated index of resolved styles

mod alignment;
mod border;
mod color;
mod pool;
mod theme;

pub use alignment::Alignment;
pub use border::BorderStyle;
pub use color::Color;
pub use pool::StylePool;
pub use theme::Theme;

use crate::error::{Error, Result};

/// One layer of cell formatting
///
/// Every attribute is optional: an absent attribute inherits from the less
/// specific layers of the cascade. The default value is the identity of
/// [`CellStyle::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CellStyle {
    /// Solid background fill
    pub background: Option<Color>,
    /// Font color
    pub font_color: Option<Color>,
    /// Bold font
    pub bold: bool,
    /// Italic font
    pub italic: bool,
    /// Horizontal alignment
    pub alignment: Option<Alignment>,
    /// Border drawn on all edges
    pub border: Option<BorderStyle>,
    /// Number format code (e.g. "0.00", "yyyy-mm-dd")
    pub number_format: Option<String>,
}

impl CellStyle {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set horizontal alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set the border line style
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Check whether this style is the merge identity
    pub fn is_empty(&self) -> bool {
        self == &CellStyle::default()
    }

    /// Overlay `other` onto `self`.
    ///
    /// Optional attributes take `other`'s value when it is set. Flags are
    /// OR-ed: once a layer turns `bold` or `italic` on, a more specific layer
    /// cannot turn it off.
    pub fn merge(&self, other: &CellStyle) -> CellStyle {
        CellStyle {
            background: other.background.or(self.background),
            font_color: other.font_color.or(self.font_color),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            alignment: other.alignment.or(self.alignment),
            border: other.border.or(self.border),
            number_format: other
                .number_format
                .clone()
                .or_else(|| self.number_format.clone()),
        }
    }

    /// Check the declaration for values no renderer could use
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.number_format {
            if format.trim().is_empty() {
                return Err(Error::style("number format must not be blank"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CellStyle {
        CellStyle::new()
            .background(Color::LIGHT_GRAY)
            .font_color(Color::BLUE)
            .bold(true)
            .alignment(Alignment::Center)
            .border(BorderStyle::Thin)
            .number_format("0.00")
    }

    #[test]
    fn test_empty_style_is_identity() {
        assert!(CellStyle::new().is_empty());
        assert_eq!(sample().merge(&CellStyle::new()), sample());
        assert_eq!(CellStyle::new().merge(&sample()), sample());
    }

    #[test]
    fn test_override_wins_for_optional_fields() {
        let over = CellStyle::new()
            .background(Color::WHITE)
            .alignment(Alignment::Right)
            .number_format("0");
        let merged = sample().merge(&over);

        assert_eq!(merged.background, Some(Color::WHITE));
        assert_eq!(merged.alignment, Some(Alignment::Right));
        assert_eq!(merged.number_format.as_deref(), Some("0"));
        // untouched attributes fall through
        assert_eq!(merged.font_color, Some(Color::BLUE));
        assert_eq!(merged.border, Some(BorderStyle::Thin));
    }

    #[test]
    fn test_flags_cannot_be_unset() {
        let merged = sample().merge(&CellStyle::new().bold(false).italic(true));
        assert!(merged.bold);
        assert!(merged.italic);
    }

    #[test]
    fn test_validate_rejects_blank_number_format() {
        assert!(sample().validate().is_ok());
        let err = CellStyle::new().number_format("  ").validate().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Style);
    }
}
