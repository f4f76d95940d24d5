//! XLSX writer

use std::io::{Seek, Write};
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use quill_sheets_core::{CellValue, ExcelDocument, Renderer, Sheet};

use crate::error::{XlsxError, XlsxResult};
use crate::layout::{cell_ref, resolve_widths};
use crate::options::XlsxRenderOptions;
use crate::styles::{SheetXfs, XlsxStyleTable};
use crate::{MAX_COLS, MAX_ROWS};

/// Days from 0001-01-01 (day 1) to 1899-12-30, the day before serial 1
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

/// Serial of 1900-03-01, the first day unaffected by the phantom 1900-02-29
const FIRST_SERIAL_AFTER_LEAP_BUG: i64 = 61;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Renders documents as XLSX packages
#[derive(Debug, Clone, Default)]
pub struct XlsxRenderer {
    options: XlsxRenderOptions,
}

impl XlsxRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options
    pub fn with_options(options: XlsxRenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XlsxRenderOptions {
        &self.options
    }

    /// Write a document to a writer
    pub fn write<W: Write + Seek>(&self, document: &ExcelDocument, writer: W) -> XlsxResult<()> {
        check_limits(document)?;

        let mut zip = zip::ZipWriter::new(writer);

        // Build a document-wide style table.
        let style_table = XlsxStyleTable::build(document, &self.options);

        Self::write_content_types(&mut zip, document)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, document)?;
        Self::write_workbook_rels(&mut zip, document)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for (index, sheet) in document.sheets().enumerate() {
            let xfs = style_table.sheet(index).ok_or_else(|| {
                XlsxError::InvalidDocument(format!("no styles resolved for sheet '{}'", sheet.name()))
            })?;
            self.write_worksheet(&mut zip, sheet, index, xfs)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        document: &ExcelDocument,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..document.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        document: &ExcelDocument,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in document.sheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        document: &ExcelDocument,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..document.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship
        let styles_rid = document.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = style_table.to_styles_xml();
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        &self,
        zip: &mut zip::ZipWriter<W>,
        sheet: &Sheet,
        index: usize,
        xfs: &SheetXfs,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        log::debug!(
            "writing sheet '{}' ({} columns, {} rows)",
            sheet.name(),
            sheet.column_count(),
            sheet.rows().len()
        );

        let spans = group_spans(sheet)?;
        let group_rows = sheet.header_row_count() - 1;
        let header_rows = if sheet.column_count() > 0 {
            group_rows + 1
        } else {
            0
        };

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        // Sheet view, with the header rows frozen if requested
        let tab_selected = if index == 0 { " tabSelected=\"1\"" } else { "" };
        if sheet.freeze_header() && header_rows > 0 {
            content.push_str(&format!(
                "\n    <sheetViews><sheetView{} workbookViewId=\"0\"><pane ySplit=\"{}\" topLeftCell=\"{}\" activePane=\"bottomLeft\" state=\"frozen\"/></sheetView></sheetViews>",
                tab_selected,
                header_rows,
                cell_ref(header_rows, 0)
            ));
        } else {
            content.push_str(&format!(
                "\n    <sheetViews><sheetView{} workbookViewId=\"0\"/></sheetViews>",
                tab_selected
            ));
        }

        content.push_str("\n    <sheetFormatPr defaultRowHeight=\"15\"/>");

        let widths = resolve_widths(sheet, &self.options);
        if !widths.is_empty() {
            content.push_str("\n    <cols>");
            for (col, width) in widths.iter().enumerate() {
                content.push_str(&format!(
                    "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                    col + 1,
                    col + 1,
                    width
                ));
            }
            content.push_str("\n    </cols>");
        }

        if header_rows == 0 && sheet.rows().is_empty() {
            content.push_str("\n    <sheetData/>");
        } else {
            content.push_str("\n    <sheetData>");

            // Header group rows
            for level in 0..group_rows {
                content.push_str(&format!("\n        <row r=\"{}\">", level + 1));
                for col in 0..sheet.column_count() {
                    let r = cell_ref(level, col);
                    let covering = spans
                        .iter()
                        .find(|(group, span)| group_level(sheet, *group) == level && span.contains(&col));
                    match covering {
                        Some((group, span)) if *span.start() == col => {
                            let label = CellValue::string(sheet.header_groups()[*group].label());
                            write_cell(&mut content, &r, xfs.groups[*group], &label);
                        }
                        Some((group, _)) => {
                            write_cell(&mut content, &r, xfs.groups[*group], &CellValue::Empty);
                        }
                        None => write_cell(&mut content, &r, xfs.filler, &CellValue::Empty),
                    }
                }
                content.push_str("\n        </row>");
            }

            // Column header row
            if header_rows > 0 {
                content.push_str(&format!("\n        <row r=\"{}\">", group_rows + 1));
                for (col, column) in sheet.columns().iter().enumerate() {
                    write_cell(
                        &mut content,
                        &cell_ref(group_rows, col),
                        xfs.header.get(col).copied().unwrap_or(0),
                        &CellValue::string(column.header()),
                    );
                }
                content.push_str("\n        </row>");
            }

            // Data rows
            for (r, row) in sheet.rows().iter().enumerate() {
                let sheet_row = header_rows + r;
                content.push_str(&format!("\n        <row r=\"{}\">", sheet_row + 1));
                for (col, cell) in row.cells().iter().enumerate() {
                    write_cell(
                        &mut content,
                        &cell_ref(sheet_row, col),
                        xfs.data_xf(r, col),
                        &cell.value,
                    );
                }
                content.push_str("\n        </row>");
            }

            content.push_str("\n    </sheetData>");
        }

        // Merged header group cells
        let merged: Vec<String> = spans
            .iter()
            .filter(|(_, span)| span.end() > span.start())
            .map(|(group, span)| {
                let level = group_level(sheet, *group);
                format!("{}:{}", cell_ref(level, *span.start()), cell_ref(level, *span.end()))
            })
            .collect();
        if !merged.is_empty() {
            content.push_str(&format!("\n    <mergeCells count=\"{}\">", merged.len()));
            for range in &merged {
                content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
            }
            content.push_str("\n    </mergeCells>");
        }

        content.push_str("\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Renderer for XlsxRenderer {
    type Error = XlsxError;

    fn render<W: Write + Seek>(&self, document: &ExcelDocument, sink: W) -> XlsxResult<()> {
        self.write(document, sink)
    }
}

fn check_limits(document: &ExcelDocument) -> XlsxResult<()> {
    if document.is_empty() {
        return Err(XlsxError::InvalidDocument(
            "a workbook needs at least one sheet".into(),
        ));
    }

    for sheet in document.sheets() {
        if sheet.column_count() > MAX_COLS {
            return Err(XlsxError::InvalidDocument(format!(
                "sheet '{}' has {} columns, the limit is {}",
                sheet.name(),
                sheet.column_count(),
                MAX_COLS
            )));
        }
        for (r, row) in sheet.rows().iter().enumerate() {
            for (col, cell) in row.cells().iter().enumerate() {
                let date = match &cell.value {
                    CellValue::Date(d) => *d,
                    CellValue::DateTime(dt) => dt.date(),
                    _ => continue,
                };
                if date.year() < 1900 {
                    return Err(XlsxError::InvalidDocument(format!(
                        "sheet '{}' has date {} at {}, before the first spreadsheet date 1900-01-01",
                        sheet.name(),
                        date,
                        cell_ref(sheet.header_row_count() + r, col)
                    )));
                }
            }
        }

        let rows = sheet.header_row_count() + sheet.rows().len();
        if rows > MAX_ROWS {
            return Err(XlsxError::InvalidDocument(format!(
                "sheet '{}' needs {} rows, the limit is {}",
                sheet.name(),
                rows,
                MAX_ROWS
            )));
        }
    }

    Ok(())
}

/// Resolve each header group to its column span, keyed by group index
fn group_spans(sheet: &Sheet) -> XlsxResult<Vec<(usize, RangeInclusive<usize>)>> {
    sheet
        .header_groups()
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            group
                .span(sheet.name(), sheet.columns())
                .map(|span| (idx, span))
                .map_err(|e| XlsxError::InvalidDocument(e.to_string()))
        })
        .collect()
}

fn group_level(sheet: &Sheet, group: usize) -> usize {
    sheet
        .header_groups()
        .get(group)
        .map_or(0, |g| g.row() as usize)
}

fn write_cell(content: &mut String, cell_ref: &str, xf_id: u32, value: &CellValue) {
    let style_attr = if xf_id != 0 {
        format!(" s=\"{}\"", xf_id)
    } else {
        String::new()
    };

    match value {
        CellValue::Empty => {
            // Preserve style-only cells
            if xf_id != 0 {
                content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr));
            }
        }
        CellValue::Boolean(b) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                cell_ref,
                style_attr,
                if *b { 1 } else { 0 }
            ));
        }
        CellValue::Integer(i) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><v>{}</v></c>",
                cell_ref, style_attr, i
            ));
        }
        CellValue::Number(n) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><v>{}</v></c>",
                cell_ref, style_attr, n
            ));
        }
        CellValue::String(s) => {
            let space = if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                " xml:space=\"preserve\""
            } else {
                ""
            };
            content.push_str(&format!(
                "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                cell_ref,
                style_attr,
                space,
                escape_xml(s)
            ));
        }
        CellValue::Date(d) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><v>{}</v></c>",
                cell_ref,
                style_attr,
                date_serial(*d)
            ));
        }
        CellValue::DateTime(dt) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><v>{}</v></c>",
                cell_ref,
                style_attr,
                datetime_serial(*dt)
            ));
        }
    }
}

/// Spreadsheet serial day number of a date (1900 date system).
///
/// The 1900 system counts a 29 February 1900 that never existed, so dates in
/// January and February 1900 are one lower than a plain day count. Dates
/// before 1900 have no serial; the writer rejects them.
pub fn date_serial(date: NaiveDate) -> i64 {
    let days = i64::from(date.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE);
    if days < FIRST_SERIAL_AFTER_LEAP_BUG {
        days - 1
    } else {
        days
    }
}

/// Spreadsheet serial number of a date-time, the time as a day fraction
pub fn datetime_serial(datetime: NaiveDateTime) -> f64 {
    let seconds = f64::from(datetime.time().num_seconds_from_midnight());
    date_serial(datetime.date()) as f64 + seconds / SECONDS_PER_DAY
}

/// Escape text for XML content and attributes, dropping characters XML 1.0 forbids
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_serials() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(date_serial(date), 45306);
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(1900, 3, 1).unwrap()), 61);
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(1900, 2, 28).unwrap()), 59);
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()), 1);

        let noon = date.and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(datetime_serial(noon), 45306.5);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
        assert_eq!(escape_xml("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_write_cell_skips_unstyled_empty() {
        let mut content = String::new();
        write_cell(&mut content, "A1", 0, &CellValue::Empty);
        assert!(content.is_empty());

        write_cell(&mut content, "B1", 3, &CellValue::string(" padded"));
        assert!(content.contains("<c r=\"B1\" s=\"3\" t=\"inlineStr\"><is><t xml:space=\"preserve\"> padded</t></is></c>"));
    }
}
