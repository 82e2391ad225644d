//! Relative complement of one relation with respect to another.

use crate::relation::Relation;

/// Rows of `input` whose identity does not appear in `matched`, in `input` order.
///
/// Runs in `O(|input| + |matched|)`: the identity set of `matched` is built once and `input` is
/// scanned once. An empty `matched` yields `input` unchanged; a `matched` covering all of
/// `input` yields an empty relation.
#[must_use]
pub fn relative_complement(input: &Relation, matched: &Relation) -> Relation {
    if matched.is_empty() {
        return input.clone();
    }
    let matched_ids = matched.row_ids();
    input.filter_rows(|row| !matched_ids.contains(row.id()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_schema::{DataType, Field, Schema};

    use super::*;
    use crate::{row::Row, row_set::BitmapRowSet, schema::Table};

    fn numbers(count: u32) -> Relation {
        let table = Table::new(
            "numbers",
            Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)])),
        )
        .expect("valid schema");
        Relation::from_rows(
            (0..count).map(|id| Row::new(id, "numbers", [("n", i64::from(id))])),
            &[table],
        )
        .expect("valid rows")
    }

    fn ids(relation: &Relation) -> Vec<u32> {
        relation.ids().collect()
    }

    #[test]
    fn empty_match_returns_input_unchanged() {
        let input = numbers(4);
        let matched = input.retain(&BitmapRowSet::new());
        let result = relative_complement(&input, &matched);
        assert_eq!(ids(&result), vec![0, 1, 2, 3]);
    }

    #[test]
    fn full_match_returns_empty_relation() {
        let input = numbers(4);
        let result = relative_complement(&input, &input);
        assert!(result.is_empty());
        assert!(result.has_source("numbers"));
    }

    #[test]
    fn complement_preserves_input_order() {
        let input = numbers(6);
        let reversed = Relation::from_rows(input.rows().iter().rev().cloned(), input.sources())
            .expect("valid rows");
        let matched = input.retain(&[1, 4].into_iter().collect());

        assert_eq!(ids(&relative_complement(&input, &matched)), vec![0, 2, 3, 5]);
        assert_eq!(
            ids(&relative_complement(&reversed, &matched)),
            vec![5, 3, 2, 0]
        );
    }
}
