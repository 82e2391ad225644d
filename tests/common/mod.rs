//! Common test utilities for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};
use relsift::{
    ColumnRef, ComparisonOp, Predicate, Relation, Row, RowId, ScalarValue, Table,
};

/// The `employee` table shared by the integration tests.
pub fn employee() -> Table {
    Table::new(
        "employee",
        Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("dept", DataType::Utf8, false),
            Field::new("salary", DataType::Int64, true),
        ])),
    )
    .expect("employee schema should be valid")
}

/// The `job` table joined onto employees by the multi-source tests.
pub fn job() -> Table {
    Table::new(
        "job",
        Arc::new(Schema::new(vec![
            Field::new("title", DataType::Utf8, false),
            Field::new("level", DataType::Int64, true),
        ])),
    )
    .expect("job schema should be valid")
}

/// Resolves a column of the `employee` table.
pub fn column(name: &str) -> ColumnRef {
    employee()
        .column(name)
        .expect("employee column should exist")
}

fn employee_row(id: RowId, salary: Option<i64>) -> Row {
    let dept = if id % 2 == 0 { "eng" } else { "ops" };
    Row::new(
        id,
        "employee",
        [
            ("name", ScalarValue::from(format!("emp-{id}"))),
            ("dept", ScalarValue::from(dept)),
            ("salary", ScalarValue::from(salary)),
        ],
    )
}

/// `count` employees with ids `0..count` and salaries `0, 100, 200, ...` in id order.
pub fn employees(count: u32) -> Relation {
    Relation::from_rows(
        (0..count).map(|id| employee_row(id, Some(i64::from(id) * 100))),
        &[employee()],
    )
    .expect("sample rows should match the employee schema")
}

/// Employees joined with their job: row `id` carries salary `id * 100` and `titles[id]`.
pub fn employees_with_jobs(titles: &[&str]) -> Relation {
    let rows = titles.iter().zip(0u32..).map(|(title, id)| {
        employee_row(id, Some(i64::from(id) * 100))
            .with_table("job", [("title", ScalarValue::from(*title))])
    });
    Relation::from_rows(rows, &[employee(), job()])
        .expect("joined rows should match the employee and job schemas")
}

/// Employees in shuffled order with random salaries, roughly one in ten of them `NULL`.
pub fn random_employees(rng: &mut fastrand::Rng, count: u32) -> Relation {
    let mut ids: Vec<RowId> = (0..count).collect();
    rng.shuffle(&mut ids);
    let rows: Vec<Row> = ids
        .into_iter()
        .map(|id| {
            let salary = (rng.u8(..10) != 0).then(|| rng.i64(0..=700));
            employee_row(id, salary)
        })
        .collect();
    Relation::from_rows(rows, &[employee()]).expect("random rows should match the employee schema")
}

/// Salary column values of `relation`, in relation order.
pub fn salaries(relation: &Relation) -> Vec<i64> {
    let salary = column("salary");
    relation
        .iter()
        .map(|row| match row.get(&salary) {
            Some(ScalarValue::Int64(value)) => *value,
            other => panic!("unexpected salary cell {other:?}"),
        })
        .collect()
}

/// Row identities of `relation`, in relation order.
pub fn ids(relation: &Relation) -> Vec<RowId> {
    relation.ids().collect()
}

/// Random leaf over the employee columns with a random complement flag.
pub fn random_leaf(rng: &mut fastrand::Rng) -> Predicate {
    const OPS: [ComparisonOp; 6] = [
        ComparisonOp::Equal,
        ComparisonOp::NotEqual,
        ComparisonOp::LessThan,
        ComparisonOp::LessThanOrEqual,
        ComparisonOp::GreaterThan,
        ComparisonOp::GreaterThanOrEqual,
    ];
    let salary = column("salary");
    let leaf = match rng.u8(..5) {
        0 => salary.compare(OPS[rng.usize(..OPS.len())], rng.i64(0..=700)),
        1 => {
            let low = rng.i64(0..=700);
            salary.between(low, low + rng.i64(0..=300))
        }
        2 => salary.in_list((0..rng.usize(0..4)).map(|_| rng.i64(0..=7) * 100)),
        3 => column("name")
            .matches(&format!("^emp-{}", rng.u8(0..10)))
            .expect("generated pattern should compile"),
        _ => {
            if rng.bool() {
                salary.is_null()
            } else {
                column("dept").equals("eng")
            }
        }
    };
    leaf.with_complement(rng.bool())
}

/// Random predicate tree of at most `depth` combined levels, every node randomly complemented.
pub fn random_predicate(rng: &mut fastrand::Rng, depth: usize) -> Predicate {
    if depth == 0 || rng.u8(..3) == 0 {
        return random_leaf(rng);
    }
    let children: Vec<Predicate> = (0..rng.usize(1..=3))
        .map(|_| random_predicate(rng, depth - 1))
        .collect();
    let combined = if rng.bool() {
        Predicate::and(children)
    } else {
        Predicate::or(children)
    };
    combined
        .expect("generated groups are never empty")
        .with_complement(rng.bool())
}
