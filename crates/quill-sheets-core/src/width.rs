//! Column width strategies

use std::fmt;

use crate::error::{ConfigError, Result};

/// How a renderer should size a column
///
/// The core only classifies and validates widths; turning a percentage or
/// `Auto` into an absolute width is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnWidth {
    /// Absolute width in characters (must be positive)
    Fixed(u32),
    /// Share of the table width, conventionally 0-100
    Percent(i32),
    /// Sized from the cell contents by the renderer
    Auto,
}

impl ColumnWidth {
    /// Create a fixed width, rejecting non-positive character counts
    pub fn fixed(characters: i64) -> Result<Self> {
        match u32::try_from(characters) {
            Ok(n) if n > 0 => Ok(ColumnWidth::Fixed(n)),
            _ => Err(ConfigError::InvalidFixedWidth { width: characters }.into()),
        }
    }

    /// Create a percentage width
    pub const fn percent(value: i32) -> Self {
        ColumnWidth::Percent(value)
    }

    /// Re-check a width that may have been built from the raw variant
    pub fn validate(&self) -> Result<()> {
        match self {
            ColumnWidth::Fixed(0) => Err(ConfigError::InvalidFixedWidth { width: 0 }.into()),
            _ => Ok(()),
        }
    }

    /// Character count of a fixed width
    pub fn characters(&self) -> Option<u32> {
        match self {
            ColumnWidth::Fixed(n) => Some(*n),
            _ => None,
        }
    }

    /// Percentage of a percent width
    pub fn percent_value(&self) -> Option<i32> {
        match self {
            ColumnWidth::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// Check if the width is content-driven
    pub fn is_auto(&self) -> bool {
        matches!(self, ColumnWidth::Auto)
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Fixed(n) => write!(f, "{n} chars"),
            ColumnWidth::Percent(p) => write!(f, "{p}%"),
            ColumnWidth::Auto => f.write_str("auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rejects_non_positive() {
        for bad in [0, -1, -40, i64::from(u32::MAX) + 1] {
            let err = ColumnWidth::fixed(bad).unwrap_err();
            assert!(err.is_configuration(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_fixed_round_trips() {
        let width = ColumnWidth::fixed(12).unwrap();
        assert_eq!(width, ColumnWidth::Fixed(12));
        assert_eq!(width.characters(), Some(12));
        assert!(width.validate().is_ok());
    }

    #[test]
    fn test_raw_zero_fails_validation() {
        assert!(ColumnWidth::Fixed(0).validate().is_err());
        assert!(ColumnWidth::Percent(0).validate().is_ok());
        assert!(ColumnWidth::Percent(150).validate().is_ok());
    }

    #[test]
    fn test_classification() {
        assert_eq!(ColumnWidth::percent(25).percent_value(), Some(25));
        assert_eq!(ColumnWidth::Auto.characters(), None);
        assert!(ColumnWidth::Auto.is_auto());
        assert_eq!(ColumnWidth::Fixed(10).to_string(), "10 chars");
    }
}
