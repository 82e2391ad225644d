//! Immutable, order-preserving collections of rows.

use std::{slice, sync::Arc};

use crate::{
    error::RelationError,
    observability::log_warn,
    row::{Row, RowId},
    row_set::BitmapRowSet,
    schema::Table,
};

/// Ordered sequence of row references plus the tables that produced them.
///
/// Relations never change after construction: every transform returns a new relation that shares
/// the underlying rows.
#[derive(Clone, Debug)]
pub struct Relation {
    rows: Vec<Arc<Row>>,
    sources: Arc<[Table]>,
}

impl Relation {
    /// Builds a relation from `rows`, validating every cell against `sources`.
    ///
    /// # Errors
    /// Returns [`RelationError::SchemaMismatch`] when a row carries a cell for an undeclared
    /// table or column, or a value of the wrong type, and [`RelationError::DuplicateRowId`] when
    /// two rows share an identity.
    pub fn from_rows<I, R>(rows: I, sources: &[Table]) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Row>>,
    {
        let rows: Vec<Arc<Row>> = rows.into_iter().map(Into::into).collect();
        let mut seen = BitmapRowSet::new();
        for row in &rows {
            let checked = if seen.insert(row.id()) {
                validate_row(row, sources)
            } else {
                Err(RelationError::DuplicateRowId(row.id()))
            };
            if let Err(err) = checked {
                log_warn!(
                    component = "relation",
                    event = "relation_rejected",
                    rows = rows.len(),
                    reason = %err,
                );
                return Err(err);
            }
        }
        Ok(Self {
            rows,
            sources: sources.into(),
        })
    }

    /// Builds a relation with no rows.
    #[must_use]
    pub fn empty(sources: &[Table]) -> Self {
        Self {
            rows: Vec::new(),
            sources: sources.into(),
        }
    }

    /// Rows in relation order.
    #[must_use]
    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    /// Iterates over rows in relation order.
    pub fn iter(&self) -> slice::Iter<'_, Arc<Row>> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the relation holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tables contributing to this relation.
    #[must_use]
    pub fn sources(&self) -> &[Table] {
        &self.sources
    }

    /// Names of the tables contributing to this relation.
    pub fn source_names(&self) -> impl Iterator<Item = &Arc<str>> + '_ {
        self.sources.iter().map(Table::name)
    }

    /// Looks up a source table by name.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<&Table> {
        self.sources
            .iter()
            .find(|table| table.name().as_ref() == name)
    }

    /// Returns true when `name` is one of the source tables.
    #[must_use]
    pub fn has_source(&self, name: &str) -> bool {
        self.source(name).is_some()
    }

    /// Identity set of the rows in this relation.
    #[must_use]
    pub fn row_ids(&self) -> BitmapRowSet {
        self.rows.iter().map(|row| row.id()).collect()
    }

    /// Identities in relation order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|row| row.id())
    }

    /// Keeps the rows whose identity is in `ids`, preserving relation order.
    #[must_use]
    pub fn retain(&self, ids: &BitmapRowSet) -> Self {
        self.filter_rows(|row| ids.contains(row.id()))
    }

    /// Keeps the rows for which `keep` returns true, preserving relation order.
    pub(crate) fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Row) -> bool,
    {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
            sources: self.sources.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a Arc<Row>;
    type IntoIter = slice::Iter<'a, Arc<Row>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_row(row: &Row, sources: &[Table]) -> Result<(), RelationError> {
    let mismatch = |reason: String| RelationError::SchemaMismatch {
        row: row.id(),
        reason,
    };
    for (table_name, column, value) in row.cells() {
        let table = sources
            .iter()
            .find(|table| table.name() == table_name)
            .ok_or_else(|| mismatch(format!("table '{table_name}' is not a declared source")))?;
        let (_, field) = table
            .schema()
            .column_with_name(column)
            .ok_or_else(|| mismatch(format!("unknown column '{table_name}.{column}'")))?;
        if value.is_null() {
            if !field.is_nullable() {
                return Err(mismatch(format!(
                    "NULL in non-nullable column '{table_name}.{column}'"
                )));
            }
        } else if &value.data_type() != field.data_type() {
            return Err(mismatch(format!(
                "column '{table_name}.{column}' expects {:?}, got {:?}",
                field.data_type(),
                value.data_type()
            )));
        }
    }
    for table in sources.iter().filter(|table| row.has_table(table.name())) {
        let missing = table.schema().fields().iter().find(|field| {
            !field.is_nullable() && row.cell(table.name(), field.name()).is_none()
        });
        if let Some(field) = missing {
            return Err(mismatch(format!(
                "missing non-nullable column '{}.{}'",
                table.name(),
                field.name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use arrow_schema::{DataType, Field, Schema};

    use super::*;
    use crate::value::ScalarValue;

    fn employee() -> Table {
        Table::new(
            "employee",
            Arc::new(Schema::new(vec![
                Field::new("name", DataType::Utf8, false),
                Field::new("salary", DataType::Int64, true),
            ])),
        )
        .expect("valid schema")
    }

    fn row(id: RowId, name: &str, salary: Option<i64>) -> Row {
        Row::new(
            id,
            "employee",
            [
                ("name", ScalarValue::from(name)),
                ("salary", ScalarValue::from(salary)),
            ],
        )
    }

    fn ids(relation: &Relation) -> Vec<RowId> {
        relation.ids().collect()
    }

    #[test]
    fn from_rows_keeps_order_and_sources() {
        let relation = Relation::from_rows(
            vec![row(3, "c", Some(1)), row(1, "a", None), row(2, "b", Some(5))],
            &[employee()],
        )
        .expect("valid rows");

        assert_eq!(ids(&relation), vec![3, 1, 2]);
        assert_eq!(relation.len(), 3);
        assert!(relation.has_source("employee"));
        assert!(!relation.has_source("job"));
        assert_eq!(
            relation.source_names().map(|name| name.as_ref()).collect::<Vec<_>>(),
            vec!["employee"]
        );
    }

    #[test]
    fn identical_values_do_not_collapse() {
        let relation =
            Relation::from_rows(vec![row(0, "a", Some(1)), row(1, "a", Some(1))], &[employee()])
                .expect("valid rows");
        assert_eq!(relation.row_ids().len(), 2);
    }

    #[test]
    fn from_rows_rejects_mismatches() {
        let wrong_type = Row::new(0, "employee", [("salary", "high")]);
        assert!(matches!(
            Relation::from_rows(vec![wrong_type], &[employee()]),
            Err(RelationError::SchemaMismatch { row: 0, .. })
        ));

        let null_name = Row::new(1, "employee", [("name", ScalarValue::Null)]);
        assert!(matches!(
            Relation::from_rows(vec![null_name], &[employee()]),
            Err(RelationError::SchemaMismatch { row: 1, .. })
        ));

        let unknown_table = Row::new(2, "job", [("title", "x")]);
        assert!(matches!(
            Relation::from_rows(vec![unknown_table], &[employee()]),
            Err(RelationError::SchemaMismatch { row: 2, .. })
        ));

        let unknown_column = Row::new(3, "employee", [("bonus", 1i64)]);
        assert!(matches!(
            Relation::from_rows(vec![unknown_column], &[employee()]),
            Err(RelationError::SchemaMismatch { row: 3, .. })
        ));

        let absent_name = Row::new(5, "employee", [("salary", 5i64)]);
        let err = Relation::from_rows(vec![absent_name], &[employee()]).unwrap_err();
        assert_eq!(
            err,
            RelationError::SchemaMismatch {
                row: 5,
                reason: "missing non-nullable column 'employee.name'".into(),
            }
        );

        let absent_salary = Row::new(6, "employee", [("name", "f")]);
        assert!(Relation::from_rows(vec![absent_salary], &[employee()]).is_ok());

        assert_eq!(
            Relation::from_rows(vec![row(4, "a", None), row(4, "b", None)], &[employee()])
                .unwrap_err(),
            RelationError::DuplicateRowId(4)
        );
    }

    #[test]
    fn rows_are_shared_not_copied() {
        let shared = Arc::new(row(0, "a", Some(1)));
        let relation =
            Relation::from_rows(vec![shared.clone()], &[employee()]).expect("valid rows");
        assert!(Arc::ptr_eq(&relation.rows()[0], &shared));

        let retained = relation.retain(&relation.row_ids());
        assert!(Arc::ptr_eq(&retained.rows()[0], &shared));
    }
}
