//! Record schemas
//!
//! A record type becomes exportable by implementing [`Exportable`] and
//! registering its fields with a [`FieldSet`]. [`Schema::build`] turns those
//! registrations into ordered column definitions plus the accessors that pull
//! each column's value out of a record.
//!
//! ```
//! use quill_sheets_core::{Exportable, FieldSet, Schema};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Exportable for Person {
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.field("name", |p: &Person| &p.name).header("Name");
//!         fields.field("age", |p: &Person| &p.age).header("Age").fixed_width(6);
//!     }
//! }
//!
//! let schema = Schema::<Person>::build().unwrap();
//! let headers: Vec<_> = schema.columns().iter().map(|c| c.header().to_string()).collect();
//! assert_eq!(headers, ["Name", "Age"]);
//! ```

mod registry;

pub use registry::SchemaRegistry;

use std::fmt;
use std::sync::Arc;

use crate::column::ColumnDefinition;
use crate::error::{ConfigError, Error, Result};
use crate::style::CellStyle;
use crate::value::{CellValue, DataError, ToCellValue};
use crate::width::ColumnWidth;

type Accessor<T> = Arc<dyn Fn(&T) -> std::result::Result<CellValue, DataError> + Send + Sync>;

/// A record type whose fields can be exported as sheet columns
pub trait Exportable: Sized + 'static {
    /// Register the exportable fields, in declaration order
    fn describe(fields: &mut FieldSet<Self>);

    /// Name used in error messages
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// One registered field: key, presentation hints and accessor
pub struct FieldDescriptor<T> {
    name: String,
    header: Option<String>,
    width: Option<std::result::Result<ColumnWidth, i64>>,
    style: Option<CellStyle>,
    order: Option<u32>,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    /// Set the header text (defaults to the field name)
    pub fn header<S: Into<String>>(&mut self, header: S) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Set the width strategy
    pub fn width(&mut self, width: ColumnWidth) -> &mut Self {
        self.width = Some(Ok(width));
        self
    }

    /// Set a fixed width in characters.
    ///
    /// Non-positive values are reported when the schema is built.
    pub fn fixed_width(&mut self, characters: i64) -> &mut Self {
        self.width = Some(ColumnWidth::fixed(characters).map_err(|_| characters));
        self
    }

    /// Set a percentage width
    pub fn percent_width(&mut self, percent: i32) -> &mut Self {
        self.width(ColumnWidth::Percent(percent))
    }

    /// Size the column from its contents
    pub fn auto_width(&mut self) -> &mut Self {
        self.width(ColumnWidth::Auto)
    }

    /// Set the column-level style
    pub fn style(&mut self, style: CellStyle) -> &mut Self {
        self.style = Some(style);
        self
    }

    /// Set an explicit position, overriding declaration order
    pub fn order(&mut self, order: u32) -> &mut Self {
        self.order = Some(order);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("style", &self.style)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Collects field registrations for a record type
pub struct FieldSet<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> FieldSet<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a field read by reference
    pub fn field<V, F>(&mut self, name: impl Into<String>, accessor: F) -> &mut FieldDescriptor<T>
    where
        V: ToCellValue + ?Sized,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.push(name.into(), Arc::new(move |record: &T| accessor(record).to_cell_value()))
    }

    /// Register a value computed from the record
    pub fn computed<V, F>(&mut self, name: impl Into<String>, compute: F) -> &mut FieldDescriptor<T>
    where
        V: ToCellValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.push(name.into(), Arc::new(move |record: &T| compute(record).to_cell_value()))
    }

    fn push(&mut self, name: String, accessor: Accessor<T>) -> &mut FieldDescriptor<T> {
        let idx = self.fields.len();
        self.fields.push(FieldDescriptor {
            name,
            header: None,
            width: None,
            style: None,
            order: None,
            accessor,
        });
        &mut self.fields[idx]
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: 'static> Default for FieldSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A column definition paired with the accessor that reads it from a record
pub struct SchemaField<T> {
    column: ColumnDefinition,
    accessor: Accessor<T>,
}

impl<T> SchemaField<T> {
    pub fn column(&self) -> &ColumnDefinition {
        &self.column
    }

    /// Read this field's value from a record
    pub fn extract(&self, record: &T) -> Result<CellValue> {
        (self.accessor)(record).map_err(|e| Error::Data {
            column: self.column.key().to_string(),
            message: e.message().to_string(),
        })
    }
}

impl<T> Clone for SchemaField<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T> fmt::Debug for SchemaField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaField")
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// Ordered column definitions and accessors for one record type
pub struct Schema<T> {
    record: String,
    fields: Vec<SchemaField<T>>,
}

impl<T: Exportable> Schema<T> {
    /// Describe `T` and validate the result
    pub fn build() -> Result<Self> {
        let mut fields = FieldSet::new();
        T::describe(&mut fields);
        Self::from_fields(T::record_name(), fields)
    }
}

impl<T> Schema<T> {
    /// Validate registrations and resolve the final column order.
    ///
    /// A field sorts by its explicit order when it has one and by its
    /// declaration index otherwise. On equal keys explicit orders come first,
    /// then declaration index.
    pub fn from_fields(record: impl Into<String>, fields: FieldSet<T>) -> Result<Self> {
        let record = record.into();
        let fields = fields.fields;

        if fields.is_empty() {
            return Err(ConfigError::EmptyRecord { record }.into());
        }

        for (idx, field) in fields.iter().enumerate() {
            if fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(ConfigError::DuplicateField {
                    record,
                    field: field.name.clone(),
                }
                .into());
            }

            if let Some(Err(width)) = field.width {
                return Err(ConfigError::InvalidColumnWidth {
                    column: field.name.clone(),
                    width,
                }
                .into());
            }

            if let Some(style) = &field.style {
                style.validate().map_err(|e| {
                    Error::style(format!("field '{}' of '{record}': {e}", field.name))
                })?;
            }

            if let Some(order) = field.order {
                if let Some(first) = fields[..idx].iter().find(|f| f.order == Some(order)) {
                    return Err(ConfigError::ConflictingFieldOrder {
                        record,
                        order,
                        first: first.name.clone(),
                        second: field.name.clone(),
                    }
                    .into());
                }
            }
        }

        let mut indexed: Vec<(usize, FieldDescriptor<T>)> = fields.into_iter().enumerate().collect();
        indexed.sort_by_key(|(idx, field)| match field.order {
            Some(order) => (order as usize, false, *idx),
            None => (*idx, true, *idx),
        });

        let fields = indexed
            .into_iter()
            .map(|(_, field)| {
                let mut column = match field.header {
                    Some(header) => ColumnDefinition::new(field.name, header),
                    None => ColumnDefinition::keyed(field.name),
                };
                if let Some(Ok(width)) = field.width {
                    column.set_width(width);
                }
                if let Some(style) = field.style {
                    column.set_style(style);
                }
                SchemaField {
                    column,
                    accessor: field.accessor,
                }
            })
            .collect();

        Ok(Self { record, fields })
    }

    /// Name of the record type
    pub fn record_name(&self) -> &str {
        &self.record
    }

    /// Fields in column order
    pub fn fields(&self) -> &[SchemaField<T>] {
        &self.fields
    }

    /// Column definitions in column order
    pub fn columns(&self) -> Vec<ColumnDefinition> {
        self.fields.iter().map(|f| f.column.clone()).collect()
    }

    /// Column keys in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column.key())
    }

    /// Look up a column by key
    pub fn column(&self, key: &str) -> Result<&ColumnDefinition> {
        self.fields
            .iter()
            .map(|f| &f.column)
            .find(|c| c.key() == key)
            .ok_or_else(|| Error::column_not_found(key, format!("record '{}'", self.record)))
    }

    /// Position of a column by key
    pub fn column_index(&self, key: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.column.key() == key)
            .ok_or_else(|| Error::column_not_found(key, format!("record '{}'", self.record)))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract one row of values from a record
    pub fn extract(&self, record: &T) -> Result<Vec<CellValue>> {
        self.fields.iter().map(|f| f.extract(record)).collect()
    }

    /// Extract rows from several records, stopping at the first failure
    pub fn extract_all<'a, I>(&self, records: I) -> Result<Vec<Vec<CellValue>>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        records.into_iter().map(|r| self.extract(r)).collect()
    }
}

impl<T> PartialEq for Schema<T> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.column == b.column)
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("record", &self.record)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    struct Person {
        name: String,
        age: u32,
        visits: u64,
    }

    impl Exportable for Person {
        fn describe(fields: &mut FieldSet<Self>) {
            fields.field("name", |p: &Person| &p.name).header("Name");
            fields.field("age", |p: &Person| &p.age).header("Age");
        }

        fn record_name() -> &'static str {
            "Person"
        }
    }

    fn person(name: &str, age: u32) -> Person {
        Person {
            name: name.into(),
            age,
            visits: 0,
        }
    }

    fn keys<T>(schema: &Schema<T>) -> Vec<&str> {
        schema.keys().collect()
    }

    #[test]
    fn test_declaration_order_and_headers() {
        let schema = Schema::<Person>::build().unwrap();
        assert_eq!(keys(&schema), ["name", "age"]);
        assert_eq!(schema.column("age").unwrap().header(), "Age");
        assert_eq!(schema.record_name(), "Person");
        assert_eq!(
            schema.extract(&person("Ann", 30)).unwrap(),
            vec![CellValue::string("Ann"), CellValue::Integer(30)]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(
            Schema::<Person>::build().unwrap(),
            Schema::<Person>::build().unwrap()
        );
    }

    #[test]
    fn test_explicit_order_wins_ties() {
        let mut fields = FieldSet::<Person>::new();
        fields.field("name", |p: &Person| &p.name);
        fields.field("age", |p: &Person| &p.age).order(0);
        fields.computed("initial", |p: &Person| p.name.chars().next());
        fields.field("visits", |p: &Person| &p.visits).order(5);

        let schema = Schema::from_fields("Person", fields).unwrap();
        assert_eq!(keys(&schema), ["age", "name", "initial", "visits"]);
        assert_eq!(schema.column("initial").unwrap().header(), "initial");
        assert_eq!(schema.column_index("visits").unwrap(), 3);
    }

    #[test]
    fn test_rejects_invalid_registrations() {
        let empty = Schema::from_fields("Person", FieldSet::<Person>::new()).unwrap_err();
        assert_eq!(
            empty.as_configuration(),
            Some(&ConfigError::EmptyRecord {
                record: "Person".into()
            })
        );

        let mut dup = FieldSet::<Person>::new();
        dup.field("name", |p: &Person| &p.name);
        dup.field("name", |p: &Person| &p.age);
        assert!(matches!(
            Schema::from_fields("Person", dup).unwrap_err().as_configuration(),
            Some(ConfigError::DuplicateField { field, .. }) if field == "name"
        ));

        let mut orders = FieldSet::<Person>::new();
        orders.field("name", |p: &Person| &p.name).order(1);
        orders.field("age", |p: &Person| &p.age).order(1);
        assert_eq!(
            Schema::from_fields("Person", orders).unwrap_err().as_configuration(),
            Some(&ConfigError::ConflictingFieldOrder {
                record: "Person".into(),
                order: 1,
                first: "name".into(),
                second: "age".into(),
            })
        );

        let mut width = FieldSet::<Person>::new();
        width.field("age", |p: &Person| &p.age).fixed_width(-3);
        assert_eq!(
            Schema::from_fields("Person", width).unwrap_err().as_configuration(),
            Some(&ConfigError::InvalidColumnWidth {
                column: "age".into(),
                width: -3
            })
        );

        let mut style = FieldSet::<Person>::new();
        style
            .field("age", |p: &Person| &p.age)
            .style(CellStyle::new().number_format(" "));
        assert_eq!(
            Schema::from_fields("Person", style).unwrap_err().kind(),
            crate::ErrorKind::Style
        );
    }

    #[test]
    fn test_presentation_hints_land_on_columns() {
        let mut fields = FieldSet::<Person>::new();
        fields
            .field("name", |p: &Person| &p.name)
            .fixed_width(24)
            .style(CellStyle::new().font_color(Color::BLUE));
        fields.field("age", |p: &Person| &p.age).percent_width(20);

        let schema = Schema::from_fields("Person", fields).unwrap();
        let columns = schema.columns();
        assert_eq!(columns[0].width(), Some(&ColumnWidth::Fixed(24)));
        assert_eq!(columns[0].style().unwrap().font_color, Some(Color::BLUE));
        assert_eq!(columns[1].width(), Some(&ColumnWidth::Percent(20)));
    }

    #[test]
    fn test_conversion_failure_names_column() {
        let mut fields = FieldSet::<Person>::new();
        fields.field("visits", |p: &Person| &p.visits);
        let schema = Schema::from_fields("Person", fields).unwrap();

        let mut big = person("Ann", 30);
        big.visits = u64::MAX;
        let err = schema.extract_all([&person("Bo", 41), &big]).unwrap_err();
        assert!(matches!(err, Error::Data { ref column, .. } if column == "visits"));
    }

    #[test]
    fn test_unknown_column() {
        let schema = Schema::<Person>::build().unwrap();
        let err = schema.column("email").unwrap_err();
        assert_eq!(err.to_string(), "Column not found: 'email' in record 'Person'");
    }
}
