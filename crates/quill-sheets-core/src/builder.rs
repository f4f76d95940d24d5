//! Document builder
//!
//! Declarations are collected first and checked as a whole by
//! [`DocumentBuilder::build`]; no document or sheet exists before that call
//! succeeds.
//!
//! ```
//! use quill_sheets_core::{CellValue, ColumnDefinition, ColumnWidth, ExcelDocument};
//!
//! let doc = ExcelDocument::builder()
//!     .sheet("Totals", |s| {
//!         s.column(ColumnDefinition::new("item", "Item"))
//!             .column(ColumnDefinition::new("qty", "Quantity").with_width(ColumnWidth::Fixed(10)))
//!             .row([CellValue::from("Apples"), CellValue::from(3)]);
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(doc.sheet(0).unwrap().name(), "Totals");
//! ```

use crate::column::ColumnDefinition;
use crate::document::ExcelDocument;
use crate::error::{ConfigError, Error, Result};
use crate::header_group::HeaderGroup;
use crate::schema::{Exportable, SchemaRegistry};
use crate::style::{CellStyle, Theme};
use crate::value::CellValue;
use crate::width::ColumnWidth;
use crate::worksheet::{Cell, Row, Sheet};

/// Collects sheets and the theme of a document
///
/// Obtained from [`ExcelDocument::builder`]. Consumed by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    theme: Option<Theme>,
    sheets: Vec<SheetDraft>,
    registry: SchemaRegistry,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document theme
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Declare a named sheet
    pub fn sheet<N, F>(mut self, name: N, declare: F) -> Self
    where
        N: Into<String>,
        F: FnOnce(&mut SheetBuilder<'_>),
    {
        let draft = SheetDraft::new(Some(name.into()));
        self.declare(draft, declare);
        self
    }

    /// Declare a sheet named after its position ("Sheet1", "Sheet2", ...)
    pub fn unnamed_sheet<F>(mut self, declare: F) -> Self
    where
        F: FnOnce(&mut SheetBuilder<'_>),
    {
        self.declare(SheetDraft::new(None), declare);
        self
    }

    /// Number of sheets declared so far
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn declare<F>(&mut self, draft: SheetDraft, declare: F)
    where
        F: FnOnce(&mut SheetBuilder<'_>),
    {
        let mut builder = SheetBuilder {
            draft,
            registry: &mut self.registry,
        };
        declare(&mut builder);
        self.sheets.push(builder.draft);
    }

    /// Validate every declaration and assemble the document.
    ///
    /// Returns the first error in declaration order; on failure nothing is
    /// produced.
    pub fn build(self) -> Result<ExcelDocument> {
        let names = resolve_sheet_names(&self.sheets);

        let mut sheets = Vec::with_capacity(self.sheets.len());
        for (draft, name) in self.sheets.into_iter().zip(names) {
            if let Some(err) = draft.error {
                return Err(err);
            }
            sheets.push(Sheet::from_parts(
                name,
                draft.columns,
                draft.header_groups,
                draft.rows,
                draft.style,
                draft.freeze_header,
            ));
        }

        let doc = ExcelDocument::from_parts(sheets, self.theme);
        doc.validate()?;

        log::debug!(
            "assembled document with {} sheets ({} schemas cached)",
            doc.sheet_count(),
            self.registry.len()
        );
        Ok(doc)
    }
}

/// Give unnamed sheets "Sheet{n}" names that no other sheet already uses
fn resolve_sheet_names(drafts: &[SheetDraft]) -> Vec<String> {
    let mut taken: Vec<String> = drafts
        .iter()
        .filter_map(|d| d.name.as_ref().map(|n| n.to_lowercase()))
        .collect();

    drafts
        .iter()
        .enumerate()
        .map(|(idx, draft)| match &draft.name {
            Some(name) => name.clone(),
            None => {
                let mut n = idx + 1;
                loop {
                    let name = format!("Sheet{}", n);
                    let lower = name.to_lowercase();
                    if !taken.contains(&lower) {
                        taken.push(lower);
                        return name;
                    }
                    n += 1;
                }
            }
        })
        .collect()
}

#[derive(Debug)]
struct SheetDraft {
    name: Option<String>,
    columns: Vec<ColumnDefinition>,
    header_groups: Vec<HeaderGroup>,
    rows: Vec<Row>,
    style: Option<CellStyle>,
    freeze_header: bool,
    error: Option<Error>,
}

impl SheetDraft {
    fn new(name: Option<String>) -> Self {
        Self {
            name,
            columns: Vec::new(),
            header_groups: Vec::new(),
            rows: Vec::new(),
            style: None,
            freeze_header: false,
            error: None,
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Declares the contents of one sheet
///
/// Passed to the closure given to [`DocumentBuilder::sheet`]. Problems found
/// while declaring (an unknown column key, a record that fails to convert)
/// are kept and reported by [`DocumentBuilder::build`].
#[derive(Debug)]
pub struct SheetBuilder<'r> {
    draft: SheetDraft,
    registry: &'r mut SchemaRegistry,
}

impl SheetBuilder<'_> {
    /// Rename the sheet
    pub fn name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.draft.name = Some(name.into());
        self
    }

    /// Set the sheet-level style
    pub fn style(&mut self, style: CellStyle) -> &mut Self {
        self.draft.style = Some(style);
        self
    }

    /// Ask renderers to freeze the header rows
    pub fn freeze_header(&mut self, freeze: bool) -> &mut Self {
        self.draft.freeze_header = freeze;
        self
    }

    /// Append a column
    pub fn column(&mut self, column: ColumnDefinition) -> &mut Self {
        self.draft.columns.push(column);
        self
    }

    /// Append several columns
    pub fn columns<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = ColumnDefinition>,
    {
        self.draft.columns.extend(columns);
        self
    }

    /// Set the width of a declared column
    pub fn column_width(&mut self, key: &str, width: ColumnWidth) -> &mut Self {
        if let Some(column) = self.find_column(key) {
            column.set_width(width);
        }
        self
    }

    /// Set the style of a declared column
    pub fn column_style(&mut self, key: &str, style: CellStyle) -> &mut Self {
        if let Some(column) = self.find_column(key) {
            column.set_style(style);
        }
        self
    }

    /// Add a header group
    pub fn header_group(&mut self, group: HeaderGroup) -> &mut Self {
        self.draft.header_groups.push(group);
        self
    }

    /// Append a row of unstyled values
    pub fn row<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        self.draft
            .rows
            .push(Row::from_values(values.into_iter().map(Into::into)));
        self
    }

    /// Append a row of cells carrying their own styles
    pub fn styled_row<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = Cell>,
    {
        self.draft.rows.push(Row::new(cells.into_iter().collect()));
        self
    }

    /// Append one row per record.
    ///
    /// When the sheet has no columns yet, the record schema's columns are
    /// installed. Otherwise the declared column keys must equal the schema's,
    /// in the same order, which lets callers restyle or rename headers before
    /// adding records.
    pub fn records<'a, T, I>(&mut self, records: I) -> &mut Self
    where
        T: Exportable,
        I: IntoIterator<Item = &'a T>,
    {
        if self.draft.error.is_some() {
            return self;
        }

        let schema = match self.registry.schema::<T>() {
            Ok(schema) => schema,
            Err(err) => return self.fail(err),
        };

        if self.draft.columns.is_empty() {
            self.draft.columns = schema.columns();
        } else if !self.draft.columns.iter().map(|c| c.key()).eq(schema.keys()) {
            let err = ConfigError::SchemaMismatch {
                sheet: self.draft.display_name().to_string(),
                record: schema.record_name().to_string(),
            };
            return self.fail(err.into());
        }

        for record in records {
            match schema.extract(record) {
                Ok(values) => self.draft.rows.push(Row::from_values(values)),
                Err(err) => return self.fail(err),
            }
        }
        self
    }

    /// Number of columns declared so far
    pub fn column_count(&self) -> usize {
        self.draft.columns.len()
    }

    /// Number of rows declared so far
    pub fn row_count(&self) -> usize {
        self.draft.rows.len()
    }

    fn find_column(&mut self, key: &str) -> Option<&mut ColumnDefinition> {
        match self.draft.columns.iter().position(|c| c.key() == key) {
            Some(idx) => self.draft.columns.get_mut(idx),
            None => {
                let scope = format!("sheet '{}'", self.draft.display_name());
                self.fail(Error::column_not_found(key, scope));
                None
            }
        }
    }

    fn fail(&mut self, err: Error) -> &mut Self {
        if self.draft.error.is_none() {
            self.draft.error = Some(err);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::FieldSet;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    struct Person {
        name: &'static str,
        age: u32,
    }

    impl Exportable for Person {
        fn describe(fields: &mut FieldSet<Self>) {
            fields.field("name", |p: &Person| p.name).header("Name");
            fields
                .field("age", |p: &Person| &p.age)
                .header("Age")
                .fixed_width(10);
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "Ann", age: 30 },
            Person { name: "Bo", age: 41 },
        ]
    }

    #[test]
    fn test_records_end_to_end() {
        let people = people();
        let doc = ExcelDocument::builder()
            .unnamed_sheet(|s| {
                s.records(&people);
            })
            .build()
            .unwrap();

        assert_eq!(doc.sheet_count(), 1);
        let sheet = doc.sheet(0).unwrap();
        assert_eq!(sheet.name(), "Sheet1");

        let headers: Vec<&str> = sheet.columns().iter().map(|c| c.header()).collect();
        assert_eq!(headers, ["Name", "Age"]);
        assert_eq!(sheet.column("age").unwrap().width(), Some(&ColumnWidth::Fixed(10)));

        let rows: Vec<Vec<CellValue>> = sheet
            .rows()
            .iter()
            .map(|r| r.values().cloned().collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![CellValue::from("Ann"), CellValue::from(30)],
                vec![CellValue::from("Bo"), CellValue::from(41)],
            ]
        );
    }

    #[test]
    fn test_duplicate_column_aborts_whole_build() {
        let result = ExcelDocument::builder()
            .sheet("Fine", |s| {
                s.column(ColumnDefinition::keyed("x"));
            })
            .sheet("Broken", |s| {
                s.column(ColumnDefinition::keyed("a"))
                    .column(ColumnDefinition::keyed("a"))
                    .column(ColumnDefinition::keyed("c"));
            })
            .build();

        assert_eq!(
            result.unwrap_err().as_configuration(),
            Some(&ConfigError::DuplicateColumnKey {
                sheet: "Broken".into(),
                key: "a".into()
            })
        );
    }

    #[test]
    fn test_unknown_column_key_is_reported() {
        let err = ExcelDocument::builder()
            .sheet("People", |s| {
                s.column(ColumnDefinition::keyed("name"))
                    .column_width("email", ColumnWidth::Auto)
                    .column_style("name", CellStyle::new().bold(true));
            })
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
        assert_eq!(err.to_string(), "Column not found: 'email' in sheet 'People'");
    }

    #[test]
    fn test_column_overrides_apply() {
        let doc = ExcelDocument::builder()
            .sheet("People", |s| {
                s.columns([ColumnDefinition::keyed("name"), ColumnDefinition::keyed("age")])
                    .column_width("age", ColumnWidth::Percent(25))
                    .column_style("age", CellStyle::new().background(Color::YELLOW));
            })
            .build()
            .unwrap();

        let age = doc.sheet(0).unwrap().column("age").unwrap();
        assert_eq!(age.width(), Some(&ColumnWidth::Percent(25)));
        assert_eq!(age.style().unwrap().background, Some(Color::YELLOW));
    }

    #[test]
    fn test_unnamed_sheets_get_free_names() {
        let doc = ExcelDocument::builder()
            .unnamed_sheet(|_| {})
            .sheet("sheet2", |_| {})
            .unnamed_sheet(|_| {})
            .build()
            .unwrap();

        let names: Vec<&str> = doc.sheets().map(|s| s.name()).collect();
        assert_eq!(names, ["Sheet1", "sheet2", "Sheet3"]);
    }

    #[test]
    fn test_duplicate_sheet_names_rejected() {
        let err = ExcelDocument::builder()
            .sheet("Data", |_| {})
            .sheet("DATA", |_| {})
            .build()
            .unwrap_err();
        assert_eq!(
            err.as_configuration(),
            Some(&ConfigError::DuplicateSheetName("DATA".into()))
        );
    }

    #[test]
    fn test_records_must_match_declared_columns() {
        let people = people();
        let doc = ExcelDocument::builder()
            .sheet("Renamed", |s| {
                s.column(ColumnDefinition::new("name", "Full name"))
                    .column(ColumnDefinition::new("age", "Years"))
                    .records(&people);
            })
            .build()
            .unwrap();
        assert_eq!(doc.sheet(0).unwrap().columns()[0].header(), "Full name");
        assert_eq!(doc.sheet(0).unwrap().rows().len(), 2);

        let err = ExcelDocument::builder()
            .sheet("Wrong", |s| {
                s.column(ColumnDefinition::keyed("age"))
                    .column(ColumnDefinition::keyed("name"))
                    .records(&people);
            })
            .build()
            .unwrap_err();
        assert!(matches!(
            err.as_configuration(),
            Some(ConfigError::SchemaMismatch { sheet, .. }) if sheet == "Wrong"
        ));
    }

    #[test]
    fn test_schema_shared_between_sheets() {
        let people = people();
        let builder = ExcelDocument::builder()
            .sheet("A", |s| {
                s.records(&people[..1]);
            })
            .sheet("B", |s| {
                s.records(&people[1..]);
                assert_eq!(s.row_count(), 1);
                assert_eq!(s.column_count(), 2);
            });
        assert_eq!(builder.registry.len(), 1);

        let doc = builder.build().unwrap();
        assert_eq!(doc.sheet(0).unwrap().columns(), doc.sheet(1).unwrap().columns());
    }

    #[test]
    fn test_non_finite_row_value_fails_build() {
        let err = ExcelDocument::builder()
            .sheet("Readings", |s| {
                s.column(ColumnDefinition::new("level", "Level"))
                    .row([CellValue::from(1.5)])
                    .row([CellValue::from(f64::NAN)]);
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        let Error::Data { column, message } = err else {
            panic!("expected data error");
        };
        assert_eq!(column, "level");
        assert!(message.contains("row 1"));

        let err = ExcelDocument::builder()
            .sheet("Readings", |s| {
                s.column(ColumnDefinition::new("level", "Level"))
                    .styled_row([Cell::styled(f64::INFINITY, CellStyle::new().bold(true))]);
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }
}
