//! XLSX style table (styles.xml)

use std::collections::HashMap;

use quill_sheets_core::{BorderStyle, CellStyle, CellValue, Color, ExcelDocument, StylePool};

use crate::options::XlsxRenderOptions;
use crate::writer::escape_xml;

/// Built-in number formats that need no `<numFmt>` entry
const BUILTIN_NUMBER_FORMATS: &[(&str, u32)] = &[
    ("General", 0),
    ("0", 1),
    ("0.00", 2),
    ("#,##0", 3),
    ("#,##0.00", 4),
    ("0%", 9),
    ("0.00%", 10),
    ("0.00E+00", 11),
    ("@", 49),
];

/// First id available for custom number formats
const FIRST_CUSTOM_NUMFMT_ID: u32 = 164;

/// Cell format ids of one sheet, indexed like the sheet itself
#[derive(Debug, Default)]
pub(crate) struct SheetXfs {
    /// Per column header cell
    pub(crate) header: Vec<u32>,
    /// Per header group, in declaration order
    pub(crate) groups: Vec<u32>,
    /// Group-row cells not covered by any group
    pub(crate) filler: u32,
    /// Per data cell, row-major
    pub(crate) data: Vec<Vec<u32>>,
}

impl SheetXfs {
    pub(crate) fn data_xf(&self, row: usize, col: usize) -> u32 {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }
}

/// Document-wide, deduplicated cell formats
///
/// Every distinct effective style becomes one `cellXfs` entry; the pool index
/// is the xf id, so index 0 is the unstyled default.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    pool: StylePool,
    sheets: Vec<SheetXfs>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FontKey {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl XlsxStyleTable {
    pub(crate) fn build(document: &ExcelDocument, options: &XlsxRenderOptions) -> Self {
        let mut pool = StylePool::new();
        let mut sheets = Vec::with_capacity(document.sheet_count());

        for index in 0..document.sheet_count() {
            let Some(styles) = document.styles(index) else {
                continue;
            };
            let sheet = styles.sheet();

            let mut xfs = SheetXfs {
                filler: pool.get_or_insert(styles.header_filler()),
                ..Default::default()
            };

            xfs.header = (0..sheet.column_count())
                .map(|col| pool.get_or_insert(styles.header_cell(col).unwrap_or_default()))
                .collect();

            xfs.groups = (0..sheet.header_groups().len())
                .map(|group| pool.get_or_insert(styles.group_cell(group).unwrap_or_default()))
                .collect();

            xfs.data = sheet
                .rows()
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    row.cells()
                        .iter()
                        .enumerate()
                        .map(|(c, cell)| {
                            let style = styles.data_cell(r, c).unwrap_or_default();
                            pool.get_or_insert(with_date_format(style, &cell.value, options))
                        })
                        .collect()
                })
                .collect();

            sheets.push(xfs);
        }

        log::debug!("style table holds {} cell formats", pool.len());
        Self { pool, sheets }
    }

    pub(crate) fn sheet(&self, index: usize) -> Option<&SheetXfs> {
        self.sheets.get(index)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: HashMap<FontKey, u32> = HashMap::new();
        let mut fonts: Vec<FontKey> = Vec::new();
        let default_font = FontKey {
            bold: false,
            italic: false,
            color: None,
        };
        fonts.push(default_font);
        font_ids.insert(default_font, 0);

        // Excel requires the first two fills to be: none and gray125
        let mut fill_ids: HashMap<Color, u32> = HashMap::new();
        let mut fills: Vec<Color> = Vec::new();

        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        let mut borders: Vec<BorderStyle> = vec![BorderStyle::None];
        border_ids.insert(BorderStyle::None, 0);

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id = FIRST_CUSTOM_NUMFMT_ID;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.pool.len());

        for (_, style) in self.pool.iter() {
            let font = FontKey {
                bold: style.bold,
                italic: style.italic,
                color: style.font_color,
            };
            let font_id = *font_ids.entry(font).or_insert_with(|| {
                fonts.push(font);
                fonts.len() as u32 - 1
            });

            let fill_id = match style.background {
                None => 0,
                Some(color) => *fill_ids.entry(color).or_insert_with(|| {
                    fills.push(color);
                    fills.len() as u32 + 1
                }),
            };

            let border = style.border.unwrap_or(BorderStyle::None);
            let border_id = *border_ids.entry(border).or_insert_with(|| {
                borders.push(border);
                borders.len() as u32 - 1
            });

            let num_fmt_id = match &style.number_format {
                None => 0,
                Some(code) => match builtin_number_format(code) {
                    Some(id) => id,
                    None => *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmts.push((id, code.clone()));
                        id
                    }),
                },
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(color));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(*border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", resolved.len()));
        for ((_, style), ids) in self.pool.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn builtin_number_format(code: &str) -> Option<u32> {
    BUILTIN_NUMBER_FORMATS
        .iter()
        .find(|(builtin, _)| *builtin == code)
        .map(|&(_, id)| id)
}

/// Give date cells a readable format when their style has none
fn with_date_format(mut style: CellStyle, value: &CellValue, options: &XlsxRenderOptions) -> CellStyle {
    if style.number_format.is_none() {
        match value {
            CellValue::Date(_) => style.number_format = Some(options.default_date_format.clone()),
            CellValue::DateTime(_) => {
                style.number_format = Some(options.default_datetime_format.clone())
            }
            _ => {}
        }
    }
    style
}

fn write_color(tag: &str, color: &Color) -> String {
    format!("<{tag} rgb=\"{}\"/>", color.to_argb_hex())
}

fn write_font(font: &FontKey) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    s.push_str("<sz val=\"11\"/>");
    if let Some(color) = &font.color {
        s.push_str(&write_color("color", color));
    }
    s.push_str("<name val=\"Calibri\"/><family val=\"2\"/></font>");
    s
}

fn write_fill(color: &Color) -> String {
    format!(
        "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
        write_color("fgColor", color)
    )
}

fn write_border(border: BorderStyle) -> String {
    let Some(style) = border.xlsx_name() else {
        return "<border><left/><right/><top/><bottom/><diagonal/></border>".to_string();
    };

    let mut s = String::from("<border>");
    for edge in ["left", "right", "top", "bottom"] {
        s.push_str(&format!(
            "<{edge} style=\"{style}\"><color indexed=\"64\"/></{edge}>"
        ));
    }
    s.push_str("<diagonal/></border>");
    s
}

fn write_xf(style: &CellStyle, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if ids.border_id != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if style.alignment.is_some() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    match style.alignment {
        Some(alignment) => {
            s.push_str(&format!(
                "><alignment horizontal=\"{}\"/></xf>",
                alignment.as_str()
            ));
        }
        None => s.push_str("/>"),
    }
    s
}
