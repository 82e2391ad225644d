use std::fmt;

use super::{apply_complement, Predicate};
use crate::{
    error::PredicateError,
    observability::{log_debug, log_trace},
    relation::Relation,
    value::ScalarValue,
};

/// Logical combinator of a [`CombinedPredicate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Row must be selected by every child.
    And,
    /// Row must be selected by at least one child.
    Or,
}

impl LogicalOp {
    /// Returns a textual representation of the combinator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AND/OR over an ordered, non-empty list of owned child predicates.
///
/// The node's complement flag is applied to the node's own combined result and is never pushed
/// into the children.
#[derive(Clone, Debug)]
pub struct CombinedPredicate {
    op: LogicalOp,
    children: Vec<Predicate>,
    complement: bool,
}

impl CombinedPredicate {
    /// Combines `children` with `op`.
    ///
    /// # Errors
    /// Returns [`PredicateError::Configuration`] when `children` is empty.
    pub fn new<I>(op: LogicalOp, children: I) -> Result<Self, PredicateError>
    where
        I: IntoIterator<Item = Predicate>,
    {
        let children: Vec<Predicate> = children.into_iter().collect();
        if children.is_empty() {
            let err = PredicateError::Configuration(format!("{op} requires at least one child"));
            log_debug!(
                component = "predicate",
                event = "predicate_rejected",
                reason = %err,
            );
            return Err(err);
        }
        Ok(Self {
            op,
            children,
            complement: false,
        })
    }

    /// Logical combinator.
    #[must_use]
    pub fn op(&self) -> LogicalOp {
        self.op
    }

    /// Child predicates in evaluation order.
    #[must_use]
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    /// Mutable access to the children, e.g. to toggle their complement flags.
    ///
    /// The slice cannot grow or shrink, so the node stays non-empty.
    pub fn children_mut(&mut self) -> &mut [Predicate] {
        &mut self.children
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
            op = %self.op,
            complement,
        );
    }

    /// Combines the children's results by row identity in `relation` order, then applies this
    /// node's complement flag.
    pub fn eval(&self, relation: &Relation) -> Result<Relation, PredicateError> {
        let (first, rest) = self.children.split_first().ok_or_else(|| {
            PredicateError::Configuration(format!("{} requires at least one child", self.op))
        })?;
        let mut ids = first.eval(relation)?.row_ids();
        for child in rest {
            let child_ids = child.eval(relation)?.row_ids();
            ids = match self.op {
                LogicalOp::And => ids.intersect(&child_ids),
                LogicalOp::Or => ids.union(&child_ids),
            };
        }
        let raw_match = relation.retain(&ids);
        log_trace!(
            component = "predicate",
            event = "combined_eval",
            op = %self.op,
            children = self.children.len(),
            input_rows = relation.len(),
            matched_rows = raw_match.len(),
            complement = self.complement,
        );
        Ok(apply_complement(relation, raw_match, self.complement))
    }

    pub(super) fn bind(&self, params: &[ScalarValue]) -> Result<Self, PredicateError> {
        Ok(Self {
            op: self.op,
            children: self
                .children
                .iter()
                .map(|child| child.bind(params))
                .collect::<Result<_, _>>()?,
            complement: self.complement,
        })
    }
}

impl fmt::Display for CombinedPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            f.write_str("NOT ")?;
        }
        f.write_str("(")?;
        for (idx, child) in self.children.iter().enumerate() {
            if idx > 0 {
                write!(f, " {} ", self.op)?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}
