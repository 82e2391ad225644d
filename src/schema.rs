//! Minimal schema surface: named tables and typed column references.

use std::{collections::HashSet, fmt, sync::Arc};

use arrow_schema::{DataType, SchemaRef};

use crate::{error::SchemaError, value::is_supported};

/// A named table backed by an Arrow schema.
///
/// Only the Arrow data types that have a [`ScalarValue`](crate::ScalarValue) counterpart are
/// accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: Arc<str>,
    schema: SchemaRef,
}

impl Table {
    /// Validates `schema` and wraps it under `name`.
    pub fn new<N>(name: N, schema: SchemaRef) -> Result<Self, SchemaError>
    where
        N: Into<Arc<str>>,
    {
        let name = name.into();
        let mut seen = HashSet::with_capacity(schema.fields().len());
        for field in schema.fields() {
            if !is_supported(field.data_type()) {
                return Err(SchemaError::UnsupportedType {
                    table: name.to_string(),
                    column: field.name().clone(),
                    data_type: field.data_type().clone(),
                });
            }
            if !seen.insert(field.name().as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: name.to_string(),
                    column: field.name().clone(),
                });
            }
        }
        Ok(Self { name, schema })
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Underlying Arrow schema.
    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Resolves a column of this table by name.
    pub fn column(&self, name: &str) -> Result<ColumnRef, SchemaError> {
        let (_, field) =
            self.schema
                .column_with_name(name)
                .ok_or_else(|| SchemaError::UnknownColumn {
                    table: self.name.to_string(),
                    column: name.to_owned(),
                })?;
        Ok(ColumnRef {
            table: self.name.clone(),
            name: Arc::from(field.name().as_str()),
            data_type: field.data_type().clone(),
            nullable: field.is_nullable(),
        })
    }
}

/// Reference identifying a column of a table, with its declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: Arc<str>,
    name: Arc<str>,
    data_type: DataType,
    nullable: bool,
}

impl ColumnRef {
    /// Creates a column reference without consulting a [`Table`].
    ///
    /// Prefer [`Table::column`], which guarantees the reference matches the table schema.
    #[must_use]
    pub fn new<T, N>(table: T, name: N, data_type: DataType, nullable: bool) -> Self
    where
        T: Into<Arc<str>>,
        N: Into<Arc<str>>,
    {
        Self {
            table: table.into(),
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Name of the owning table.
    #[must_use]
    pub fn table(&self) -> &Arc<str> {
        &self.table
    }

    /// Canonical column name.
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Declared value type.
    #[must_use]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Whether the column admits `NULL`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::{Field, Schema};

    use super::*;

    fn employee() -> Table {
        Table::new(
            "employee",
            Arc::new(Schema::new(vec![
                Field::new("id", DataType::Utf8, false),
                Field::new("salary", DataType::Float64, true),
            ])),
        )
        .expect("valid schema")
    }

    #[test]
    fn column_resolves_declared_type() {
        let table = employee();
        let salary = table.column("salary").expect("salary column");
        assert_eq!(salary.data_type(), &DataType::Float64);
        assert!(salary.is_nullable());
        assert_eq!(salary.to_string(), "employee.salary");
        assert_eq!(salary.table().as_ref(), "employee");
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = employee().column("bonus").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownColumn {
                table: "employee".into(),
                column: "bonus".into(),
            }
        );
    }

    #[test]
    fn unsupported_and_duplicate_fields_are_rejected() {
        let unsupported = Table::new(
            "t",
            Arc::new(Schema::new(vec![Field::new("a", DataType::Int32, false)])),
        );
        assert!(matches!(
            unsupported,
            Err(SchemaError::UnsupportedType { .. })
        ));

        let duplicate = Table::new(
            "t",
            Arc::new(Schema::new(vec![
                Field::new("a", DataType::Int64, false),
                Field::new("a", DataType::Utf8, false),
            ])),
        );
        assert!(matches!(duplicate, Err(SchemaError::DuplicateColumn { .. })));
    }

    #[test]
    fn references_compare_by_table_name_and_type() {
        let table = employee();
        let resolved = table.column("salary").expect("salary column");
        let manual = ColumnRef::new("employee", "salary", DataType::Float64, true);
        assert_eq!(resolved, manual);
        assert_ne!(
            resolved,
            ColumnRef::new("job", "salary", DataType::Float64, true)
        );
    }
}
