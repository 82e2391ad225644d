//! Error types for schema, relation and predicate failures.

use arrow_schema::DataType;
use thiserror::Error;

use crate::row::RowId;

/// Errors raised while declaring tables and resolving columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The table does not declare the requested column.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Requested column.
        column: String,
    },
    /// The same column name appears twice in one table.
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Repeated column.
        column: String,
    },
    /// The column type has no scalar counterpart.
    #[error("Unsupported type {data_type:?} for column '{table}.{column}'")]
    UnsupportedType {
        /// Table name.
        table: String,
        /// Offending column.
        column: String,
        /// Declared Arrow type.
        data_type: DataType,
    },
}

/// Errors raised while building a [`Relation`](crate::Relation) from rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelationError {
    /// A row disagrees with the declared source tables.
    #[error("Schema mismatch for row {row}: {reason}")]
    SchemaMismatch {
        /// Identity of the offending row.
        row: RowId,
        /// Human-readable description of the mismatch.
        reason: String,
    },
    /// Two rows share one identity.
    #[error("Duplicate row id {0}")]
    DuplicateRowId(RowId),
}

/// Errors raised while constructing or evaluating predicates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredicateError {
    /// The predicate tree is ill-formed, e.g. AND/OR over no children.
    #[error("Invalid predicate configuration: {0}")]
    Configuration(String),
    /// An operand does not match the column's declared type.
    #[error("Type mismatch for column '{column}': expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        /// Qualified column name.
        column: String,
        /// Declared column type.
        expected: DataType,
        /// Type of the offending operand.
        actual: DataType,
    },
    /// The column is not provided by the input relation.
    #[error("Missing column '{0}' in input relation")]
    MissingColumn(String),
    /// A comparison operand is `NULL`.
    #[error("NULL operand for column '{0}'; use is_null instead")]
    NullOperand(String),
    /// A placeholder was evaluated, or bound, without a value.
    #[error("Unbound parameter ?{0}")]
    UnboundParameter(usize),
    /// A pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}
