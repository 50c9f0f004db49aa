//! # sqlcraft
//!
//! A fluent SQL construction engine. Builders assemble SELECT statements,
//! common table expressions, and DDL, and serialize them into parameterized
//! SQL text with an ordered bind-value list.
//!
//! - **Text only**: builders produce a SQL string plus `Vec<Value>`; nothing
//!   is ever executed here
//! - **Parameterized by default**: every operand becomes a `?` placeholder
//!   and a bind value, in matching order
//! - **Fluent chaining**: predicates read left-to-right and return to the
//!   query context via `.and()` / `.or()` / `.end()`
//! - **Safe defaults**: empty `IN` lists and null `BETWEEN` bounds are
//!   rejected up front, before any SQL is rendered
//!
//! ## Query building
//!
//! ```
//! use sqlcraft::{QueryBuilder, Value};
//!
//! let query = QueryBuilder::table("users")
//!     .columns(["id", "name"])
//!     .col("status").eq("active")?
//!     .and()
//!     .col("age").between(18, 65)?
//!     .end()
//!     .order_by_desc("created_at")
//!     .limit(10);
//!
//! assert_eq!(
//!     query.build(),
//!     "SELECT id, name FROM users WHERE status = ? AND age BETWEEN ? AND ? \
//!      ORDER BY created_at DESC LIMIT 10"
//! );
//! assert_eq!(
//!     query.bind_values(),
//!     vec![Value::Text("active".into()), Value::Int(18), Value::Int(65)]
//! );
//! # Ok::<(), sqlcraft::BuildError>(())
//! ```
//!
//! ## Subqueries and CTEs
//!
//! A [`QueryBuilder`] can be used as a comparison operand (`IN (SELECT ...)`)
//! or wrapped into a CTE via [`WithBuilder`]; nested bind values surface in
//! definition order.
//!
//! ## DDL
//!
//! [`CreateTable`] and [`AlterTable`] assemble column definitions from
//! [`TableColumn`] and [`Constraint`] fragments.

pub mod column;
pub mod ddl;
pub mod error;
pub mod expr;
pub mod query;
pub mod value;
pub mod with;

pub use column::{AggregateFn, Aggregation, Column, Rounding, RoundingScope};
pub use ddl::{AlterTable, AnyColumn, Constraint, CreateTable, DataType, TableColumn};
pub use error::{BuildError, BuildResult};
pub use expr::{Condition, ConditionQuery, IntoOperand, Logical, Marker, Operand};
pub use query::{ColumnCmp, ConditionChain, QueryBuilder};
pub use value::{IntoValue, Value};
pub use with::WithBuilder;
