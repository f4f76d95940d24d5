//! Cell value types and conversion from record fields

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,
    /// Boolean value (TRUE/FALSE)
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number, finite in any built document
    Number(f64),
    /// Text
    String(String),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time of day
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::String(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Integer(n.into())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// A field value that could not be represented as a cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataError {
    message: String,
}

impl DataError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DataError {}

/// Conversion of a record field into a cell value
///
/// Implemented for the common scalar types, dates, `Option<T>` and
/// references, so schema accessors can treat every field the same way.
pub trait ToCellValue {
    fn to_cell_value(&self) -> Result<CellValue, DataError>;
}

impl ToCellValue for CellValue {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(self.clone())
    }
}

impl ToCellValue for str {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::String(self.to_string()))
    }
}

impl ToCellValue for String {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::String(self.clone()))
    }
}

impl ToCellValue for char {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::String(self.to_string()))
    }
}

impl ToCellValue for bool {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::Boolean(*self))
    }
}

macro_rules! lossless_integer {
    ($($t:ty),*) => {
        $(
            impl ToCellValue for $t {
                fn to_cell_value(&self) -> Result<CellValue, DataError> {
                    Ok(CellValue::Integer(i64::from(*self)))
                }
            }
        )*
    };
}

lossless_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! checked_integer {
    ($($t:ty),*) => {
        $(
            impl ToCellValue for $t {
                fn to_cell_value(&self) -> Result<CellValue, DataError> {
                    i64::try_from(*self).map(CellValue::Integer).map_err(|_| {
                        DataError::new(format!(
                            "{} value {} does not fit in a 64-bit signed integer",
                            stringify!($t),
                            self
                        ))
                    })
                }
            }
        )*
    };
}

checked_integer!(u64, usize, isize, i128, u128);

impl ToCellValue for f64 {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        if self.is_finite() {
            Ok(CellValue::Number(*self))
        } else {
            Err(DataError::new(format!("non-finite number {self}")))
        }
    }
}

impl ToCellValue for f32 {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        f64::from(*self).to_cell_value()
    }
}

impl ToCellValue for NaiveDate {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::Date(*self))
    }
}

impl ToCellValue for NaiveDateTime {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        Ok(CellValue::DateTime(*self))
    }
}

impl<T: ToCellValue> ToCellValue for Option<T> {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        match self {
            Some(value) => value.to_cell_value(),
            None => Ok(CellValue::Empty),
        }
    }
}

impl<T: ToCellValue + ?Sized> ToCellValue for &T {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        (**self).to_cell_value()
    }
}

impl<T: ToCellValue + ?Sized> ToCellValue for Box<T> {
    fn to_cell_value(&self) -> Result<CellValue, DataError> {
        (**self).to_cell_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!("Ann".to_cell_value().unwrap(), CellValue::string("Ann"));
        assert_eq!(30u8.to_cell_value().unwrap(), CellValue::Integer(30));
        assert_eq!(1.5f32.to_cell_value().unwrap(), CellValue::Number(1.5));
        assert_eq!(true.to_cell_value().unwrap(), CellValue::Boolean(true));
        assert_eq!(None::<i32>.to_cell_value().unwrap(), CellValue::Empty);
        assert_eq!(Some(7i64).to_cell_value().unwrap(), CellValue::Integer(7));
    }

    #[test]
    fn test_out_of_range_integer_is_data_error() {
        let err = u64::MAX.to_cell_value().unwrap_err();
        assert!(err.message().contains("does not fit"));
        assert_eq!(42u64.to_cell_value().unwrap(), CellValue::Integer(42));
    }

    #[test]
    fn test_non_finite_number_is_data_error() {
        assert!(f64::NAN.to_cell_value().is_err());
        assert!(f64::INFINITY.to_cell_value().is_err());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Integer(3).as_number(), Some(3.0));
        assert_eq!(CellValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(CellValue::from("3").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-02-29");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
