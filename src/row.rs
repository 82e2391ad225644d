//! Immutable records addressed by a stable identity.

use std::{collections::HashMap, sync::Arc};

use crate::{schema::ColumnRef, value::ScalarValue};

/// Unique identifier for a row within its originating relation.
pub type RowId = u32;

/// A single record: a stable identity plus typed cells keyed by table and column.
///
/// Rows from a single table carry one table entry; rows produced by a join carry one entry per
/// contributing table.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    id: RowId,
    cells: HashMap<Arc<str>, HashMap<Arc<str>, ScalarValue>>,
}

impl Row {
    /// Creates a row holding the given cells of `table`.
    #[must_use]
    pub fn new<T, I, N, V>(id: RowId, table: T, values: I) -> Self
    where
        T: Into<Arc<str>>,
        I: IntoIterator<Item = (N, V)>,
        N: Into<Arc<str>>,
        V: Into<ScalarValue>,
    {
        Self {
            id,
            cells: HashMap::new(),
        }
        .with_table(table, values)
    }

    /// Adds (or extends) the cells of another table on this row.
    #[must_use]
    pub fn with_table<T, I, N, V>(mut self, table: T, values: I) -> Self
    where
        T: Into<Arc<str>>,
        I: IntoIterator<Item = (N, V)>,
        N: Into<Arc<str>>,
        V: Into<ScalarValue>,
    {
        let entry = self.cells.entry(table.into()).or_default();
        for (name, value) in values {
            entry.insert(name.into(), value.into());
        }
        self
    }

    /// Stable identity of this row.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the cell stored for `column`, if the row carries one.
    #[must_use]
    pub fn get(&self, column: &ColumnRef) -> Option<&ScalarValue> {
        self.cell(column.table(), column.name())
    }

    /// Returns the cell stored for `table.column`, if the row carries one.
    #[must_use]
    pub fn cell(&self, table: &str, column: &str) -> Option<&ScalarValue> {
        self.cells.get(table)?.get(column)
    }

    /// Whether the row carries any cell of `table`.
    #[must_use]
    pub fn has_table(&self, table: &str) -> bool {
        self.cells.contains_key(table)
    }

    /// Iterates over every `(table, column, value)` triple carried by the row.
    pub fn cells(&self) -> impl Iterator<Item = (&Arc<str>, &Arc<str>, &ScalarValue)> + '_ {
        self.cells.iter().flat_map(|(table, columns)| {
            columns
                .iter()
                .map(move |(column, value)| (table, column, value))
        })
    }
}
