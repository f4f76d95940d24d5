//! Renderer options

/// Settings for [`crate::XlsxRenderer`]
///
/// Widths are measured in characters of the default font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XlsxRenderOptions {
    /// Width shared out between percentage columns, after fixed columns
    pub table_width: u32,
    /// Lower bound for content-sized columns
    pub autofit_min: u32,
    /// Upper bound for content-sized columns
    pub autofit_max: u32,
    /// Extra characters added to the longest content
    pub autofit_padding: u32,
    /// Number of data rows inspected when sizing a column
    pub autofit_sample_rows: usize,
    /// Number format for date cells without one
    pub default_date_format: String,
    /// Number format for date-time cells without one
    pub default_datetime_format: String,
}

impl Default for XlsxRenderOptions {
    fn default() -> Self {
        Self {
            table_width: 100,
            autofit_min: 8,
            autofit_max: 60,
            autofit_padding: 2,
            autofit_sample_rows: 1000,
            default_date_format: "yyyy-mm-dd".to_string(),
            default_datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }
}

impl XlsxRenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_width(mut self, width: u32) -> Self {
        self.table_width = width;
        self
    }

    /// Set the bounds for content-sized columns
    pub fn with_autofit_bounds(mut self, min: u32, max: u32) -> Self {
        self.autofit_min = min;
        self.autofit_max = max.max(min);
        self
    }

    pub fn with_autofit_padding(mut self, padding: u32) -> Self {
        self.autofit_padding = padding;
        self
    }

    pub fn with_autofit_sample_rows(mut self, rows: usize) -> Self {
        self.autofit_sample_rows = rows;
        self
    }

    pub fn with_date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.default_date_format = format.into();
        self
    }

    pub fn with_datetime_format<S: Into<String>>(mut self, format: S) -> Self {
        self.default_datetime_format = format.into();
        self
    }
}
