use std::{cmp::Ordering, fmt, sync::Arc};

use arrow_schema::DataType;
use regex::Regex;

use super::{apply_complement, Operand, Predicate};
use crate::{
    error::PredicateError,
    observability::log_trace,
    option::PatternOption,
    relation::Relation,
    schema::ColumnRef,
    value::{ScalarValue, ScalarValueRef},
};

/// Comparison operator used by binary predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equals (`=`).
    Equal,
    /// Not equals (`!=`).
    NotEqual,
    /// Less than (`<`).
    LessThan,
    /// Less than or equal to (`<=`).
    LessThanOrEqual,
    /// Greater than (`>`).
    GreaterThan,
    /// Greater than or equal to (`>=`).
    GreaterThanOrEqual,
}

impl ComparisonOp {
    /// Returns a textual representation of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
        }
    }

    /// Evaluates the operator against a comparison ordering.
    #[must_use]
    pub fn test_ordering(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator kind of a [`ValuePredicate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueOp {
    /// Binary comparison against one operand.
    Compare(ComparisonOp),
    /// Inclusive range check against two operands.
    Between,
    /// Membership test against a list of operands.
    In,
    /// Regular-expression match on a `Utf8` column.
    Matches,
    /// Null check.
    IsNull,
}

#[derive(Clone, Debug)]
enum Condition {
    Compare { op: ComparisonOp, operand: Operand },
    Between { low: Operand, high: Operand },
    InList(Arc<[Operand]>),
    Matches(Regex),
    IsNull,
}

/// Operands resolved to literals for one evaluation.
enum Resolved<'a> {
    Compare(ComparisonOp, ScalarValueRef<'a>),
    Between(ScalarValueRef<'a>, ScalarValueRef<'a>),
    InList(Vec<ScalarValueRef<'a>>),
    Matches(&'a Regex),
    IsNull,
}

impl Resolved<'_> {
    fn test(&self, cell: ScalarValueRef<'_>) -> bool {
        match self {
            Resolved::Compare(op, operand) => cell
                .compare(*operand)
                .is_some_and(|ordering| op.test_ordering(ordering)),
            Resolved::Between(low, high) => {
                cell.compare(*low)
                    .is_some_and(|ordering| ordering != Ordering::Less)
                    && cell
                        .compare(*high)
                        .is_some_and(|ordering| ordering != Ordering::Greater)
            }
            Resolved::InList(list) => list
                .iter()
                .any(|candidate| cell.compare(*candidate) == Some(Ordering::Equal)),
            Resolved::Matches(regex) => cell.as_utf8().is_some_and(|text| regex.is_match(text)),
            Resolved::IsNull => cell.is_null(),
        }
    }
}

/// Leaf predicate: one column, one operator, one or more operands.
///
/// Built through the constructors on [`ColumnRef`] or through
/// [`PredicateBuilder`](super::PredicateBuilder).
#[derive(Clone, Debug)]
pub struct ValuePredicate {
    column: ColumnRef,
    condition: Condition,
    complement: bool,
}

impl ValuePredicate {
    fn new(column: ColumnRef, condition: Condition) -> Self {
        Self {
            column,
            condition,
            complement: false,
        }
    }

    pub(super) fn compare(column: ColumnRef, op: ComparisonOp, operand: Operand) -> Self {
        Self::new(column, Condition::Compare { op, operand })
    }

    pub(super) fn between(column: ColumnRef, low: Operand, high: Operand) -> Self {
        Self::new(column, Condition::Between { low, high })
    }

    pub(super) fn in_list(column: ColumnRef, list: Vec<Operand>) -> Self {
        Self::new(column, Condition::InList(list.into()))
    }

    pub(super) fn matches(
        column: ColumnRef,
        pattern: &str,
        option: &PatternOption,
    ) -> Result<Self, PredicateError> {
        let regex = option.compile(pattern)?;
        Ok(Self::new(column, Condition::Matches(regex)))
    }

    pub(super) fn is_null(column: ColumnRef) -> Self {
        Self::new(column, Condition::IsNull)
    }

    /// Column under test.
    #[must_use]
    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    /// Operator kind.
    #[must_use]
    pub fn op(&self) -> ValueOp {
        match &self.condition {
            Condition::Compare { op, .. } => ValueOp::Compare(*op),
            Condition::Between { .. } => ValueOp::Between,
            Condition::InList(_) => ValueOp::In,
            Condition::Matches(_) => ValueOp::Matches,
            Condition::IsNull => ValueOp::IsNull,
        }
    }

    /// Current complement flag.
    #[must_use]
    pub fn complement(&self) -> bool {
        self.complement
    }

    /// Sets the complement flag; a no-op when the value is unchanged.
    pub fn set_complement(&mut self, complement: bool) {
        if self.complement == complement {
            return;
        }
        self.complement = complement;
        log_trace!(
            component = "predicate",
            event = "complement_toggled",
            column = %self.column,
            complement,
        );
    }

    /// Rows of `relation` satisfying the condition, or their complement when the flag is set.
    pub fn eval(&self, relation: &Relation) -> Result<Relation, PredicateError> {
        self.check_column(relation)?;
        let resolved = self.resolve()?;
        let raw_match = relation.filter_rows(|row| {
            let cell = row.get(&self.column).map_or(ScalarValueRef::Null, ScalarValue::as_ref);
            resolved.test(cell)
        });
        log_trace!(
            component = "predicate",
            event = "leaf_eval",
            predicate = %self,
            input_rows = relation.len(),
            matched_rows = raw_match.len(),
            complement = self.complement,
        );
        Ok(apply_complement(relation, raw_match, self.complement))
    }

    pub(super) fn bind(&self, params: &[ScalarValue]) -> Result<Self, PredicateError> {
        let condition = match &self.condition {
            Condition::Compare { op, operand } => Condition::Compare {
                op: *op,
                operand: operand.bind(params)?,
            },
            Condition::Between { low, high } => Condition::Between {
                low: low.bind(params)?,
                high: high.bind(params)?,
            },
            Condition::InList(list) => {
                if list.iter().any(|operand| matches!(operand, Operand::Param(_))) {
                    Condition::InList(
                        list.iter()
                            .map(|operand| operand.bind(params))
                            .collect::<Result<Vec<_>, _>>()?
                            .into(),
                    )
                } else {
                    Condition::InList(list.clone())
                }
            }
            Condition::Matches(regex) => Condition::Matches(regex.clone()),
            Condition::IsNull => Condition::IsNull,
        };
        Ok(Self {
            column: self.column.clone(),
            condition,
            complement: self.complement,
        })
    }

    fn check_column(&self, relation: &Relation) -> Result<(), PredicateError> {
        let missing = || PredicateError::MissingColumn(self.column.to_string());
        let table = relation.source(self.column.table()).ok_or_else(missing)?;
        let (_, field) = table
            .schema()
            .column_with_name(self.column.name())
            .ok_or_else(missing)?;
        if field.data_type() != self.column.data_type() {
            return Err(PredicateError::TypeMismatch {
                column: self.column.to_string(),
                expected: field.data_type().clone(),
                actual: self.column.data_type().clone(),
            });
        }
        Ok(())
    }

    fn resolve(&self) -> Result<Resolved<'_>, PredicateError> {
        Ok(match &self.condition {
            Condition::Compare { op, operand } => Resolved::Compare(*op, self.typed(operand)?),
            Condition::Between { low, high } => {
                Resolved::Between(self.typed(low)?, self.typed(high)?)
            }
            Condition::InList(list) => Resolved::InList(
                list.iter()
                    .map(|operand| self.typed(operand))
                    .collect::<Result<_, _>>()?,
            ),
            Condition::Matches(regex) => {
                if self.column.data_type() != &DataType::Utf8 {
                    return Err(PredicateError::TypeMismatch {
                        column: self.column.to_string(),
                        expected: self.column.data_type().clone(),
                        actual: DataType::Utf8,
                    });
                }
                Resolved::Matches(regex)
            }
            Condition::IsNull => Resolved::IsNull,
        })
    }

    /// Resolves `operand` to a literal of the column's declared type.
    fn typed<'a>(&self, operand: &'a Operand) -> Result<ScalarValueRef<'a>, PredicateError> {
        let value = operand.literal()?;
        if value.is_null() {
            return Err(PredicateError::NullOperand(self.column.to_string()));
        }
        let actual = value.data_type();
        if &actual != self.column.data_type() {
            return Err(PredicateError::TypeMismatch {
                column: self.column.to_string(),
                expected: self.column.data_type().clone(),
                actual,
            });
        }
        Ok(value.as_ref())
    }

    fn fmt_condition(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Condition::Compare { op, operand } => write!(f, "{} {op} {operand}", self.column),
            Condition::Between { low, high } => {
                write!(f, "{} BETWEEN {low} AND {high}", self.column)
            }
            Condition::InList(list) => {
                write!(f, "{} IN (", self.column)?;
                for (idx, operand) in list.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
            Condition::Matches(regex) => write!(f, "{} MATCHES /{}/", self.column, regex.as_str()),
            Condition::IsNull => write!(f, "{} IS NULL", self.column),
        }
    }
}

impl fmt::Display for ValuePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            f.write_str("NOT (")?;
            self.fmt_condition(f)?;
            f.write_str(")")
        } else {
            self.fmt_condition(f)
        }
    }
}

/// Leaf predicate constructors.
impl ColumnRef {
    /// `column = operand`.
    #[must_use]
    pub fn equals<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::Equal, operand)
    }

    /// `column != operand`.
    #[must_use]
    pub fn not_equals<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::NotEqual, operand)
    }

    /// `column > operand`.
    #[must_use]
    pub fn greater_than<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::GreaterThan, operand)
    }

    /// `column >= operand`.
    #[must_use]
    pub fn greater_than_or_equal<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::GreaterThanOrEqual, operand)
    }

    /// `column < operand`.
    #[must_use]
    pub fn less_than<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::LessThan, operand)
    }

    /// `column <= operand`.
    #[must_use]
    pub fn less_than_or_equal<O: Into<Operand>>(&self, operand: O) -> Predicate {
        self.compare(ComparisonOp::LessThanOrEqual, operand)
    }

    /// Comparison with an explicit operator.
    #[must_use]
    pub fn compare<O: Into<Operand>>(&self, op: ComparisonOp, operand: O) -> Predicate {
        ValuePredicate::compare(self.clone(), op, operand.into()).into()
    }

    /// `low <= column <= high`.
    #[must_use]
    pub fn between<L, H>(&self, low: L, high: H) -> Predicate
    where
        L: Into<Operand>,
        H: Into<Operand>,
    {
        ValuePredicate::between(self.clone(), low.into(), high.into()).into()
    }

    /// `column IN (list...)`. An empty list matches no row.
    #[must_use]
    pub fn in_list<I, O>(&self, list: I) -> Predicate
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        ValuePredicate::in_list(self.clone(), list.into_iter().map(Into::into).collect()).into()
    }

    /// Regular-expression match using the default [`PatternOption`].
    ///
    /// # Errors
    /// Returns [`PredicateError::InvalidPattern`] when `pattern` does not compile.
    pub fn matches(&self, pattern: &str) -> Result<Predicate, PredicateError> {
        self.matches_with(pattern, &PatternOption::default())
    }

    /// Regular-expression match compiled with `option`.
    ///
    /// # Errors
    /// Returns [`PredicateError::InvalidPattern`] when `pattern` does not compile.
    pub fn matches_with(
        &self,
        pattern: &str,
        option: &PatternOption,
    ) -> Result<Predicate, PredicateError> {
        ValuePredicate::matches(self.clone(), pattern, option).map(Predicate::from)
    }

    /// `column IS NULL`. Cells absent from a row read as `NULL`.
    #[must_use]
    pub fn is_null(&self) -> Predicate {
        ValuePredicate::is_null(self.clone()).into()
    }
}
