//! Builder for composing predicate trees.

use super::{CombinedPredicate, ComparisonOp, LogicalOp, Operand, Predicate};
use crate::{error::PredicateError, option::PatternOption, schema::ColumnRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuilderCombine {
    Leaf,
    Conjunction,
    Disjunction,
}

/// Builder for composing predicates incrementally.
///
/// Construction errors (an unparsable pattern, an empty group) are deferred and reported by
/// [`PredicateBuilder::build`].
#[derive(Debug)]
pub struct PredicateBuilder {
    combine: BuilderCombine,
    clauses: Vec<Predicate>,
    error: Option<PredicateError>,
}

impl PredicateBuilder {
    const fn new(combine: BuilderCombine) -> Self {
        Self {
            combine,
            clauses: Vec::new(),
            error: None,
        }
    }

    /// Creates a builder that expects a single clause.
    #[must_use]
    pub fn leaf() -> Self {
        Self::new(BuilderCombine::Leaf)
    }

    /// Creates a builder that emits an `AND` of all clauses.
    #[must_use]
    pub fn and() -> Self {
        Self::new(BuilderCombine::Conjunction)
    }

    /// Creates a builder that emits an `OR` of all clauses.
    #[must_use]
    pub fn or() -> Self {
        Self::new(BuilderCombine::Disjunction)
    }

    /// Adds an existing predicate to the builder.
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    /// Adds a comparison predicate.
    #[must_use]
    pub fn compare<O>(self, column: &ColumnRef, op: ComparisonOp, operand: O) -> Self
    where
        O: Into<Operand>,
    {
        self.predicate(column.compare(op, operand))
    }

    /// Adds an equality predicate.
    #[must_use]
    pub fn equals<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::Equal, operand)
    }

    /// Adds an inequality predicate.
    #[must_use]
    pub fn not_equals<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::NotEqual, operand)
    }

    /// Adds a `<` comparison predicate.
    #[must_use]
    pub fn less_than<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::LessThan, operand)
    }

    /// Adds a `<=` comparison predicate.
    #[must_use]
    pub fn less_than_or_equal<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::LessThanOrEqual, operand)
    }

    /// Adds a `>` comparison predicate.
    #[must_use]
    pub fn greater_than<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::GreaterThan, operand)
    }

    /// Adds a `>=` comparison predicate.
    #[must_use]
    pub fn greater_than_or_equal<O: Into<Operand>>(self, column: &ColumnRef, operand: O) -> Self {
        self.compare(column, ComparisonOp::GreaterThanOrEqual, operand)
    }

    /// Adds an inclusive `BETWEEN` predicate.
    #[must_use]
    pub fn between<L, H>(self, column: &ColumnRef, low: L, high: H) -> Self
    where
        L: Into<Operand>,
        H: Into<Operand>,
    {
        self.predicate(column.between(low, high))
    }

    /// Adds an `IN` predicate.
    #[must_use]
    pub fn in_list<I, O>(self, column: &ColumnRef, list: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        self.predicate(column.in_list(list))
    }

    /// Adds a pattern predicate compiled with the default [`PatternOption`].
    #[must_use]
    pub fn matches(self, column: &ColumnRef, pattern: &str) -> Self {
        self.matches_with(column, pattern, &PatternOption::default())
    }

    /// Adds a pattern predicate compiled with `option`.
    #[must_use]
    pub fn matches_with(
        mut self,
        column: &ColumnRef,
        pattern: &str,
        option: &PatternOption,
    ) -> Self {
        match column.matches_with(pattern, option) {
            Ok(predicate) => self.clauses.push(predicate),
            Err(err) => self.record_error(err),
        }
        self
    }

    /// Adds an `IS NULL` predicate.
    #[must_use]
    pub fn is_null(self, column: &ColumnRef) -> Self {
        self.predicate(column.is_null())
    }

    fn branch<F>(mut self, combine: BuilderCombine, complement: bool, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        match build(PredicateBuilder::new(combine)).build() {
            Ok(predicate) => self.clauses.push(predicate.with_complement(complement)),
            Err(err) => self.record_error(err),
        }
        self
    }

    /// Adds a nested conjunction built by the supplied closure.
    #[must_use]
    pub fn and_group<F>(self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        self.branch(BuilderCombine::Conjunction, false, build)
    }

    /// Adds a nested disjunction built by the supplied closure.
    #[must_use]
    pub fn or_group<F>(self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        self.branch(BuilderCombine::Disjunction, false, build)
    }

    /// Adds the complement of a conjunction built by the supplied closure.
    #[must_use]
    pub fn not_group<F>(self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        self.branch(BuilderCombine::Conjunction, true, build)
    }

    fn record_error(&mut self, err: PredicateError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Consumes the builder and returns the composed predicate.
    ///
    /// # Errors
    /// Returns the first deferred construction error, or [`PredicateError::Configuration`] when
    /// the builder holds no clause (or more than one for a leaf builder).
    pub fn build(self) -> Result<Predicate, PredicateError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        match self.combine {
            BuilderCombine::Leaf => {
                let mut clauses = self.clauses.into_iter();
                match (clauses.next(), clauses.next()) {
                    (Some(predicate), None) => Ok(predicate),
                    (None, _) => Err(PredicateError::Configuration(
                        "leaf builder requires exactly one clause, got none".to_owned(),
                    )),
                    (Some(_), Some(_)) => Err(PredicateError::Configuration(
                        "leaf builder requires exactly one clause, got several".to_owned(),
                    )),
                }
            }
            BuilderCombine::Conjunction => {
                CombinedPredicate::new(LogicalOp::And, self.clauses).map(Predicate::Combined)
            }
            BuilderCombine::Disjunction => {
                CombinedPredicate::new(LogicalOp::Or, self.clauses).map(Predicate::Combined)
            }
        }
    }
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self::leaf()
    }
}
