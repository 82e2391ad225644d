#![deny(missing_docs)]
//! Predicate evaluation and complement engine for in-memory relational filtering.
//!
//! Callers describe tables with Arrow schemas, load rows into an immutable [`Relation`], compose
//! a [`Predicate`] tree out of per-column conditions joined by AND/OR, and call
//! [`Predicate::eval`] to obtain the order-preserving subsequence of rows that satisfy it.
//!
//! Every predicate node carries a complement flag that can be flipped at any time with
//! [`Predicate::set_complement`]. A complemented node returns exactly the input rows its own
//! logic does not select, computed by identity-based set subtraction. Flags are local to their
//! node: toggling a parent never rewrites or inspects its children.
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow_schema::{DataType, Field, Schema};
//! use relsift::{Predicate, Relation, Row, Table};
//!
//! let employee = Table::new(
//!     "employee",
//!     Arc::new(Schema::new(vec![Field::new("salary", DataType::Int64, false)])),
//! )?;
//! let rows = (0..8u32).map(|id| Row::new(id, "employee", [("salary", i64::from(id) * 100)]));
//! let input = Relation::from_rows(rows, &[employee.clone()])?;
//!
//! let salary = employee.column("salary")?;
//! let mut predicate = Predicate::and([
//!     salary.greater_than_or_equal(200i64),
//!     salary.less_than_or_equal(600i64),
//! ])?;
//! assert_eq!(predicate.eval(&input)?.len(), 5);
//!
//! predicate.set_complement(true);
//! assert_eq!(predicate.eval(&input)?.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Evaluation is synchronous and performs no locking. A predicate shared between concurrent
//! executions must either be [`copy`](Predicate::copy)-ed per execution or guarded by the caller
//! across the whole `set_complement`/`eval` sequence.

mod complement;
mod error;
mod observability;
mod option;
mod predicate;
mod relation;
mod row;
mod row_set;
mod schema;
mod value;

pub use complement::relative_complement;
pub use error::{PredicateError, RelationError, SchemaError};
pub use option::PatternOption;
pub use predicate::{
    CombinedPredicate, ComparisonOp, LogicalOp, Operand, Predicate, PredicateBuilder, ValueOp,
    ValuePredicate,
};
pub use relation::Relation;
pub use row::{Row, RowId};
pub use row_set::{BitmapRowSet, RowIdIter};
pub use schema::{ColumnRef, Table};
pub use value::{ScalarValue, ScalarValueRef};
