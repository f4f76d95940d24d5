//! Style cascade resolution
//!
//! Effective styles are computed by folding [`CellStyle::merge`] over a chain
//! of layers ordered from least to most specific:
//!
//! | cell            | chain                                                      |
//! |-----------------|------------------------------------------------------------|
//! | data cell       | theme base, theme data, sheet, column, cell                |
//! | column header   | theme base, theme header, sheet                            |
//! | header group    | theme base, theme header, sheet, group                     |
//!
//! Missing layers are skipped. Nothing is cached or mutated: every call
//! derives a fresh [`CellStyle`].

use crate::style::{CellStyle, Theme};
use crate::worksheet::Sheet;

/// Fold a chain of styles, least specific first
pub fn cascade<'a, I>(layers: I) -> CellStyle
where
    I: IntoIterator<Item = &'a CellStyle>,
{
    layers
        .into_iter()
        .fold(CellStyle::default(), |acc, layer| acc.merge(layer))
}

/// Lazily resolves effective styles for the cells of one sheet
#[derive(Debug, Clone, Copy)]
pub struct SheetStyles<'a> {
    theme: Option<&'a Theme>,
    sheet: &'a Sheet,
}

impl<'a> SheetStyles<'a> {
    pub fn new(theme: Option<&'a Theme>, sheet: &'a Sheet) -> Self {
        Self { theme, sheet }
    }

    /// The sheet being resolved
    pub fn sheet(&self) -> &'a Sheet {
        self.sheet
    }

    /// Effective style of the data cell at `(row, col)`
    pub fn data_cell(&self, row: usize, col: usize) -> Option<CellStyle> {
        let column = self.sheet.columns().get(col)?;
        let cell = self.sheet.cell(row, col)?;

        Some(cascade(
            self.theme
                .into_iter()
                .flat_map(|t| [&t.base, &t.data])
                .chain(self.sheet.style())
                .chain(column.style())
                .chain(cell.style.as_ref()),
        ))
    }

    /// Effective style of the column header for `col`
    pub fn header_cell(&self, col: usize) -> Option<CellStyle> {
        if col >= self.sheet.column_count() {
            return None;
        }
        Some(self.header_base())
    }

    /// Effective style of the header group at `group` (declaration index)
    pub fn group_cell(&self, group: usize) -> Option<CellStyle> {
        let group = self.sheet.header_groups().get(group)?;
        Some(match group.style() {
            Some(style) => self.header_base().merge(style),
            None => self.header_base(),
        })
    }

    /// Style of header filler cells (group rows not covered by any group)
    pub fn header_filler(&self) -> CellStyle {
        self.header_base()
    }

    fn header_base(&self) -> CellStyle {
        cascade(
            self.theme
                .into_iter()
                .flat_map(|t| [&t.base, &t.header])
                .chain(self.sheet.style()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefinition;
    use crate::header_group::HeaderGroup;
    use crate::style::{Alignment, BorderStyle, Color};
    use crate::worksheet::{Cell, Row};
    use pretty_assertions::assert_eq;

    fn sheet(sheet_style: Option<CellStyle>, column_style: Option<CellStyle>, cell: Cell) -> Sheet {
        let mut column = ColumnDefinition::new("v", "Value");
        if let Some(style) = column_style {
            column = column.with_style(style);
        }
        Sheet::from_parts(
            "S".into(),
            vec![column],
            vec![HeaderGroup::new("G", ["v"]).with_style(CellStyle::new().italic(true))],
            vec![Row::new(vec![cell])],
            sheet_style,
            false,
        )
    }

    #[test]
    fn test_cascade_of_nothing_is_identity() {
        assert_eq!(cascade(std::iter::empty()), CellStyle::default());
    }

    #[test]
    fn test_sheet_wins_over_theme() {
        let theme = Theme::new(CellStyle::new().background(Color::GRAY));
        let sheet = sheet(
            Some(CellStyle::new().background(Color::WHITE)),
            None,
            Cell::new(1),
        );
        let styles = SheetStyles::new(Some(&theme), &sheet);
        assert_eq!(styles.data_cell(0, 0).unwrap().background, Some(Color::WHITE));
    }

    #[test]
    fn test_full_chain_precedence() {
        let theme = Theme::new(CellStyle::new().background(Color::GRAY).bold(true))
            .with_data(CellStyle::new().alignment(Alignment::Left))
            .with_header(CellStyle::new().alignment(Alignment::Center));
        let sheet = sheet(
            Some(CellStyle::new().border(BorderStyle::Thin)),
            Some(CellStyle::new().alignment(Alignment::Right)),
            Cell::styled(1, CellStyle::new().background(Color::RED).bold(false)),
        );
        let styles = SheetStyles::new(Some(&theme), &sheet);

        assert_eq!(
            styles.data_cell(0, 0).unwrap(),
            CellStyle::new()
                .background(Color::RED)
                .bold(true)
                .alignment(Alignment::Right)
                .border(BorderStyle::Thin)
        );
        assert_eq!(
            styles.header_cell(0).unwrap(),
            CellStyle::new()
                .background(Color::GRAY)
                .bold(true)
                .alignment(Alignment::Center)
                .border(BorderStyle::Thin)
        );
        assert!(styles.group_cell(0).unwrap().italic);
    }

    #[test]
    fn test_out_of_range_is_none() {
        let sheet = sheet(None, None, Cell::new(1));
        let styles = SheetStyles::new(None, &sheet);
        assert!(styles.data_cell(1, 0).is_none());
        assert!(styles.data_cell(0, 1).is_none());
        assert!(styles.header_cell(1).is_none());
        assert!(styles.group_cell(1).is_none());
        assert_eq!(styles.data_cell(0, 0), Some(CellStyle::default()));
    }
}
