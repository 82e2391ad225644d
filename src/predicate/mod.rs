//! Predicate trees with per-node complement flags.
//!
//! A [`Predicate`] is either a [`ValuePredicate`] (one column, one operator) or a
//! [`CombinedPredicate`] (AND/OR over child predicates). Every node owns a complement flag. When
//! set, `eval` returns the rows of the input that the node's own logic does *not* select,
//! computed as input-minus-match rather than by rewriting the operator or pushing a negation into
//! the children. Flipping a flag is O(1) and never touches other nodes.

mod builder;
mod combined;
mod leaf;

use std::{fmt, sync::Arc};

pub use builder::PredicateBuilder;
pub use combined::{CombinedPredicate, LogicalOp};
pub use leaf::{ComparisonOp, ValueOp, ValuePredicate};

use crate::{
    complement::relative_complement, error::PredicateError, relation::Relation,
    schema::ColumnRef, value::ScalarValue,
};

/// Operand supplied to a value predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Literal value.
    Literal(ScalarValue),
    /// Positional placeholder, filled by [`Predicate::bind`].
    Param(usize),
}

impl Operand {
    /// Placeholder for the `index`-th bound parameter.
    #[must_use]
    pub fn param(index: usize) -> Self {
        Operand::Param(index)
    }

    fn bind(&self, params: &[ScalarValue]) -> Result<Self, PredicateError> {
        match self {
            Operand::Literal(_) => Ok(self.clone()),
            Operand::Param(index) => params
                .get(*index)
                .cloned()
                .map(Operand::Literal)
                .ok_or(PredicateError::UnboundParameter(*index)),
        }
    }

    fn literal(&self) -> Result<&ScalarValue, PredicateError> {
        match self {
            Operand::Literal(value) => Ok(value),
            Operand::Param(index) => Err(PredicateError::UnboundParameter(*index)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => fmt::Display::fmt(value, f),
            Operand::Param(index) => write!(f, "?{index}"),
        }
    }
}

macro_rules! operand_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Literal(ScalarValue::from(value))
                }
            }
        )*
    };
}

operand_from!(ScalarValue, bool, i64, i32, u64, f64, &str, String, Vec<u8>);

/// Boolean condition over the rows of a relation.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// Single column-operator-operand condition.
    Value(ValuePredicate),
    /// AND/OR combination of child predicates.
    Combined(CombinedPredicate),
}

impl Predicate {
    /// Conjunction of `children`.
    ///
    /// # Errors
    /// Returns [`PredicateError::Configuration`] when `children` is empty.
    pub fn and<I>(children: I) -> Result<Self, PredicateError>
    where
        I: IntoIterator<Item = Predicate>,
    {
        CombinedPredicate::new(LogicalOp::And, children).map(Predicate::Combined)
    }

    /// Disjunction of `children`.
    ///
    /// # Errors
    /// Returns [`PredicateError::Configuration`] when `children` is empty.
    pub fn or<I>(children: I) -> Result<Self, PredicateError>
    where
        I: IntoIterator<Item = Predicate>,
    {
        CombinedPredicate::new(LogicalOp::Or, children).map(Predicate::Combined)
    }

    /// Filters `relation`, honoring the complement flag of every node in the tree.
    ///
    /// The result is an order-preserving subsequence of `relation` sharing its rows.
    pub fn eval(&self, relation: &Relation) -> Result<Relation, PredicateError> {
        match self {
            Predicate::Value(leaf) => leaf.eval(relation),
            Predicate::Combined(combined) => combined.eval(relation),
        }
    }

    /// Sets this node's complement flag. Children are never affected.
    pub fn set_complement(&mut self, complement: bool) {
        match self {
            Predicate::Value(leaf) => leaf.set_complement(complement),
            Predicate::Combined(combined) => combined.set_complement(complement),
        }
    }

    /// Current complement flag of this node.
    #[must_use]
    pub fn complement(&self) -> bool {
        match self {
            Predicate::Value(leaf) => leaf.complement(),
            Predicate::Combined(combined) => combined.complement(),
        }
    }

    /// Returns this predicate with its complement flag set to `complement`.
    #[must_use]
    pub fn with_complement(mut self, complement: bool) -> Self {
        self.set_complement(complement);
        self
    }

    /// Deep copy of the whole subtree, flags included.
    ///
    /// Immutable operands (value lists, compiled patterns) are shared with the original.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns a copy of the tree with every placeholder replaced by `params[index]`.
    ///
    /// # Errors
    /// Returns [`PredicateError::UnboundParameter`] when a placeholder index is out of range.
    pub fn bind(&self, params: &[ScalarValue]) -> Result<Self, PredicateError> {
        match self {
            Predicate::Value(leaf) => leaf.bind(params).map(Predicate::Value),
            Predicate::Combined(combined) => combined.bind(params).map(Predicate::Combined),
        }
    }

    /// Distinct columns referenced by the tree, in first-appearance order.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnRef> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    /// Distinct tables referenced by the tree, in first-appearance order.
    #[must_use]
    pub fn tables(&self) -> Vec<Arc<str>> {
        let mut tables: Vec<Arc<str>> = Vec::new();
        for column in self.columns() {
            if !tables.contains(column.table()) {
                tables.push(column.table().clone());
            }
        }
        tables
    }

    fn collect_columns(&self, out: &mut Vec<ColumnRef>) {
        match self {
            Predicate::Value(leaf) => {
                if !out.contains(leaf.column()) {
                    out.push(leaf.column().clone());
                }
            }
            Predicate::Combined(combined) => {
                for child in combined.children() {
                    child.collect_columns(out);
                }
            }
        }
    }
}

impl From<ValuePredicate> for Predicate {
    fn from(value: ValuePredicate) -> Self {
        Predicate::Value(value)
    }
}

impl From<CombinedPredicate> for Predicate {
    fn from(value: CombinedPredicate) -> Self {
        Predicate::Combined(value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Value(leaf) => fmt::Display::fmt(leaf, f),
            Predicate::Combined(combined) => fmt::Display::fmt(combined, f),
        }
    }
}

/// Applies a node's complement flag to its raw match.
fn apply_complement(input: &Relation, raw_match: Relation, complement: bool) -> Relation {
    if complement {
        relative_complement(input, &raw_match)
    } else {
        raw_match
    }
}
