//! Scalar values carried by rows and predicate operands.

use std::{cmp::Ordering, fmt};

use arrow_schema::DataType;

/// Literal values stored in row cells and accepted by predicate operands.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// Represents SQL/Arrow `NULL`.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Binary blob.
    Binary(Vec<u8>),
}

impl ScalarValue {
    /// Returns true when the literal is the `Null` variant.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Compares this scalar with another, returning the ordering when both sides are comparable.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        self.as_ref().compare(other.as_ref())
    }

    /// Returns a borrowed view over this scalar value.
    #[must_use]
    pub fn as_ref(&self) -> ScalarValueRef<'_> {
        match self {
            ScalarValue::Null => ScalarValueRef::Null,
            ScalarValue::Boolean(value) => ScalarValueRef::Boolean(*value),
            ScalarValue::Int64(value) => ScalarValueRef::Int64(*value),
            ScalarValue::UInt64(value) => ScalarValueRef::UInt64(*value),
            ScalarValue::Float64(value) => ScalarValueRef::Float64(*value),
            ScalarValue::Utf8(value) => ScalarValueRef::Utf8(value.as_str()),
            ScalarValue::Binary(value) => ScalarValueRef::Binary(value.as_slice()),
        }
    }

    /// Arrow data type inhabited by this value.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.as_ref().data_type()
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_ref(), f)
    }
}

/// Borrowed view over a scalar value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValueRef<'a> {
    /// Represents SQL/Arrow `NULL`.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string slice.
    Utf8(&'a str),
    /// Binary slice.
    Binary(&'a [u8]),
}

impl<'a> ScalarValueRef<'a> {
    /// Returns true when the literal is the `Null` variant.
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self, ScalarValueRef::Null)
    }

    /// Compares this scalar with another, returning the ordering when both sides are comparable.
    ///
    /// `NULL` is never comparable, and neither are values of different variants.
    pub fn compare(self, other: ScalarValueRef<'_>) -> Option<Ordering> {
        use ScalarValueRef::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Boolean(lhs), Boolean(rhs)) => Some(lhs.cmp(&rhs)),
            (Int64(lhs), Int64(rhs)) => Some(lhs.cmp(&rhs)),
            (UInt64(lhs), UInt64(rhs)) => Some(lhs.cmp(&rhs)),
            (Float64(lhs), Float64(rhs)) => lhs.partial_cmp(&rhs),
            (Utf8(lhs), Utf8(rhs)) => Some(lhs.cmp(rhs)),
            (Binary(lhs), Binary(rhs)) => Some(lhs.cmp(rhs)),
            _ => None,
        }
    }

    /// Returns the string slice when the value is `Utf8`.
    #[must_use]
    pub fn as_utf8(self) -> Option<&'a str> {
        match self {
            ScalarValueRef::Utf8(value) => Some(value),
            _ => None,
        }
    }

    /// Arrow data type inhabited by this value.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            ScalarValueRef::Null => DataType::Null,
            ScalarValueRef::Boolean(_) => DataType::Boolean,
            ScalarValueRef::Int64(_) => DataType::Int64,
            ScalarValueRef::UInt64(_) => DataType::UInt64,
            ScalarValueRef::Float64(_) => DataType::Float64,
            ScalarValueRef::Utf8(_) => DataType::Utf8,
            ScalarValueRef::Binary(_) => DataType::Binary,
        }
    }
}

impl fmt::Display for ScalarValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValueRef::Null => f.write_str("NULL"),
            ScalarValueRef::Boolean(value) => write!(f, "{value}"),
            ScalarValueRef::Int64(value) => write!(f, "{value}"),
            ScalarValueRef::UInt64(value) => write!(f, "{value}"),
            ScalarValueRef::Float64(value) => write!(f, "{value}"),
            ScalarValueRef::Utf8(value) => write!(f, "'{value}'"),
            ScalarValueRef::Binary(value) => {
                f.write_str("0x")?;
                for byte in *value {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl<'a> From<&'a ScalarValue> for ScalarValueRef<'a> {
    fn from(value: &'a ScalarValue) -> Self {
        value.as_ref()
    }
}

/// Returns true when `data_type` can be represented by a [`ScalarValue`].
pub(crate) fn is_supported(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Boolean
            | DataType::Int64
            | DataType::UInt64
            | DataType::Float64
            | DataType::Utf8
            | DataType::Binary
    )
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int64(i64::from(value))
    }
}

impl From<u64> for ScalarValue {
    fn from(value: u64) -> Self {
        ScalarValue::UInt64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        ScalarValue::Binary(value)
    }
}

impl<T> From<Option<T>> for ScalarValue
where
    T: Into<ScalarValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_requires_matching_variants() {
        assert_eq!(
            ScalarValue::from(1i64).compare(&ScalarValue::from(2i64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            ScalarValue::from(1i64).compare(&ScalarValue::from(1u64)),
            None
        );
        assert_eq!(ScalarValue::Null.compare(&ScalarValue::Null), None);
        assert_eq!(
            ScalarValue::from(f64::NAN).compare(&ScalarValue::from(1.0)),
            None
        );
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert!(ScalarValue::from(None::<i64>).is_null());
        assert_eq!(ScalarValue::from(Some("a")), ScalarValue::Utf8("a".into()));
    }

    #[test]
    fn data_type_tracks_variant() {
        assert_eq!(ScalarValue::from(3i32).data_type(), DataType::Int64);
        assert_eq!(ScalarValue::from("x").data_type(), DataType::Utf8);
        assert_eq!(ScalarValue::Null.data_type(), DataType::Null);
        assert!(is_supported(&DataType::Float64));
        assert!(!is_supported(&DataType::Int32));
    }

    #[test]
    fn display_renders_literals() {
        assert_eq!(ScalarValue::from("bob").to_string(), "'bob'");
        assert_eq!(ScalarValue::from(vec![0xab, 0x01]).to_string(), "0xab01");
        assert_eq!(ScalarValue::Null.to_string(), "NULL");
    }
}
