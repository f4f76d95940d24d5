//! Cell references and column width layout

use quill_sheets_core::{CellValue, ColumnWidth, Sheet};

use crate::options::XlsxRenderOptions;

/// Convert a 0-based column index to letters (A = 0, Z = 25, AA = 26, ...)
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// A1-style reference for 0-based row and column indices
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_to_letters(col), row + 1)
}

/// Number of characters a value occupies once rendered
pub fn display_len(value: &CellValue, options: &XlsxRenderOptions) -> usize {
    match value {
        CellValue::Empty => 0,
        CellValue::Boolean(true) => 4,
        CellValue::Boolean(false) => 5,
        CellValue::String(s) => s.lines().map(|l| l.chars().count()).max().unwrap_or(0),
        CellValue::Date(_) => options.default_date_format.chars().count(),
        CellValue::DateTime(_) => options.default_datetime_format.chars().count(),
        other => other.to_string().chars().count(),
    }
}

/// Resolve every column of a sheet to a width in characters.
///
/// Fixed columns keep their width. Percentage columns share what is left of
/// `table_width` after the fixed columns; when the percentages add up to more
/// than 100 they are scaled down proportionally. Other columns are sized from
/// their header and the first `autofit_sample_rows` values.
pub fn resolve_widths(sheet: &Sheet, options: &XlsxRenderOptions) -> Vec<f64> {
    let fixed_total: u64 = sheet
        .column_widths()
        .filter_map(|w| w.and_then(ColumnWidth::characters))
        .map(u64::from)
        .sum();
    let available = u64::from(options.table_width).saturating_sub(fixed_total) as f64;

    let percent_total: i64 = sheet
        .column_widths()
        .filter_map(|w| w.and_then(ColumnWidth::percent_value))
        .map(|p| i64::from(p.max(0)))
        .sum();
    let scale = if percent_total > 100 {
        log::warn!(
            "percentage widths of sheet '{}' add up to {}%, scaling down to 100%",
            sheet.name(),
            percent_total
        );
        100.0 / percent_total as f64
    } else {
        1.0
    };

    sheet
        .column_widths()
        .enumerate()
        .map(|(col, width)| match width {
            Some(ColumnWidth::Fixed(n)) => f64::from(*n),
            Some(ColumnWidth::Percent(p)) => {
                let share = available * f64::from((*p).max(0)) / 100.0 * scale;
                round2(share.max(1.0))
            }
            Some(ColumnWidth::Auto) | None => autofit(sheet, col, options),
        })
        .collect()
}

fn autofit(sheet: &Sheet, col: usize, options: &XlsxRenderOptions) -> f64 {
    let header = sheet
        .columns()
        .get(col)
        .map_or(0, |c| c.header().chars().count());

    let longest = sheet
        .rows()
        .iter()
        .take(options.autofit_sample_rows)
        .filter_map(|row| row.cell(col))
        .map(|cell| display_len(&cell.value, options))
        .fold(header, usize::max);

    let width = (longest as u64 + u64::from(options.autofit_padding))
        .clamp(u64::from(options.autofit_min), u64::from(options.autofit_max));
    width as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
