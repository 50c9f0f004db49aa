//! Predicate fragments: operands, conditions, and logical chaining.
//!
//! A [`Condition`] is one comparison fragment (`= ?`, `IN (?, ?)`,
//! `BETWEEN ? AND ?`, or a literal-mode variant). The operand shape is a
//! tagged union consumed by a single rendering function with an exhaustive
//! match, so the placeholder count and the bind-value count cannot drift
//! apart: every rendered `?` corresponds to exactly one collected [`Value`].
//!
//! Subquery operands render as `(<nested SQL>)` and contribute their own
//! bind values recursively, in the order the nested builder registered them.

use crate::error::{BuildError, BuildResult};
use crate::query::QueryBuilder;
use crate::value::{IntoValue, Value};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Logical connective between two predicate fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logical {
    /// Both predicates must hold.
    And,
    /// At least one predicate must hold.
    Or,
}

impl Logical {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Placeholder marker mode for scalar and range operands.
///
/// `Literal` inlines the value into the SQL text instead of emitting a `?`.
/// It exists for call sites that intentionally bypass parameter binding
/// (constant folding, generated reference data). Never use it with untrusted
/// input. List operands are always placeholder-expanded regardless of mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Marker {
    /// Emit `?` and append the value to the bind list (default).
    #[default]
    Placeholder,
    /// Inline the value as a SQL literal; nothing is bound.
    Literal,
}

/// Operand of a comparison: a scalar, a value list, a range pair, a nested
/// query, or nothing (null checks).
#[derive(Debug, Clone)]
pub enum Operand {
    /// Single value.
    Scalar(Value),
    /// Ordered value list (`IN` / `NOT IN`).
    List(Vec<Value>),
    /// Range bounds (`BETWEEN` / `NOT BETWEEN`).
    Pair(Value, Value),
    /// Nested query serialized in place.
    Subquery(Box<QueryBuilder>),
    /// No operand (`IS NULL` / `IS NOT NULL`).
    None,
}

/// Conversion into an [`Operand`], so every comparison method accepts a
/// scalar, a value list, or a nested query through one parameter.
pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),* $(,)?) => {
        $(impl IntoOperand for $t {
            fn into_operand(self) -> Operand {
                Operand::Scalar(self.into_value())
            }
        })*
    };
}

impl_scalar_operand!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    Uuid,
    NaiveDate,
    NaiveDateTime,
    serde_json::Value,
    Value,
);

impl<T: IntoValue> IntoOperand for Option<T> {
    fn into_operand(self) -> Operand {
        Operand::Scalar(self.into_value())
    }
}

impl<T: IntoValue> IntoOperand for Vec<T> {
    fn into_operand(self) -> Operand {
        Operand::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue, const N: usize> IntoOperand for [T; N] {
    fn into_operand(self) -> Operand {
        Operand::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl IntoOperand for QueryBuilder {
    fn into_operand(self) -> Operand {
        Operand::Subquery(Box::new(self))
    }
}

/// One comparison fragment: operator symbol, marker mode, and operand.
#[derive(Debug, Clone)]
pub struct Condition {
    operator: &'static str,
    marker: Marker,
    operand: Operand,
}

impl Condition {
    /// Create a plain comparison (`=`, `<`, `LIKE`, ...).
    ///
    /// Accepts a scalar or a subquery; any other operand shape is rejected,
    /// a single comparison renders exactly one placeholder.
    pub(crate) fn compare(
        operator: &'static str,
        marker: Marker,
        operand: Operand,
    ) -> BuildResult<Self> {
        if !matches!(operand, Operand::Scalar(_) | Operand::Subquery(_)) {
            return Err(BuildError::invalid_argument(format!(
                "{operator} expects a single value or a subquery, got {operand:?}"
            )));
        }
        Ok(Self {
            operator,
            marker,
            operand,
        })
    }

    /// Create an `IN` / `NOT IN` membership condition.
    ///
    /// A scalar operand is normalized into a one-element list. An empty list
    /// is an error: it would render zero placeholders.
    pub(crate) fn membership(
        operator: &'static str,
        marker: Marker,
        operand: Operand,
    ) -> BuildResult<Self> {
        let operand = match operand {
            Operand::Scalar(v) => Operand::List(vec![v]),
            Operand::List(values) => {
                if values.is_empty() {
                    return Err(BuildError::invalid_argument(format!(
                        "{operator} requires at least one value"
                    )));
                }
                Operand::List(values)
            }
            Operand::Subquery(q) => Operand::Subquery(q),
            other => {
                return Err(BuildError::invalid_argument(format!(
                    "{operator} expects a value list or a subquery, got {other:?}"
                )));
            }
        };
        Ok(Self {
            operator,
            marker,
            operand,
        })
    }

    /// Create a `BETWEEN` / `NOT BETWEEN` range condition.
    ///
    /// Both bounds must be non-null.
    pub(crate) fn range(
        operator: &'static str,
        marker: Marker,
        from: Value,
        to: Value,
    ) -> BuildResult<Self> {
        if from.is_null() || to.is_null() {
            return Err(BuildError::invalid_argument(format!(
                "{operator} requires two non-null bounds"
            )));
        }
        Ok(Self {
            operator,
            marker,
            operand: Operand::Pair(from, to),
        })
    }

    /// Create an operand-less condition (`IS NULL` / `IS NOT NULL`).
    pub(crate) fn bare(operator: &'static str) -> Self {
        Self {
            operator,
            marker: Marker::Placeholder,
            operand: Operand::None,
        }
    }

    /// Render the fragment (everything after the column name) into `sql`.
    pub(crate) fn render(&self, sql: &mut String) {
        sql.push_str(self.operator);
        match &self.operand {
            Operand::Scalar(v) => {
                sql.push(' ');
                match self.marker {
                    Marker::Placeholder => sql.push('?'),
                    Marker::Literal => sql.push_str(&v.to_literal()),
                }
            }
            Operand::Pair(from, to) => {
                sql.push(' ');
                match self.marker {
                    Marker::Placeholder => sql.push_str("? AND ?"),
                    Marker::Literal => {
                        sql.push_str(&from.to_literal());
                        sql.push_str(" AND ");
                        sql.push_str(&to.to_literal());
                    }
                }
            }
            // Lists are never inlined, whatever the marker says.
            Operand::List(values) => {
                sql.push_str(" (");
                for (i, _) in values.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push('?');
                }
                sql.push(')');
            }
            Operand::Subquery(query) => {
                sql.push_str(" (");
                sql.push_str(&query.build());
                sql.push(')');
            }
            Operand::None => {}
        }
    }

    /// Append this fragment's bind values to `out`, in placeholder order.
    pub(crate) fn collect_values(&self, out: &mut Vec<Value>) {
        match &self.operand {
            Operand::Scalar(v) => {
                if self.marker == Marker::Placeholder {
                    out.push(v.clone());
                }
            }
            Operand::Pair(from, to) => {
                if self.marker == Marker::Placeholder {
                    out.push(from.clone());
                    out.push(to.clone());
                }
            }
            Operand::List(values) => out.extend(values.iter().cloned()),
            Operand::Subquery(query) => out.extend(query.bind_values()),
            Operand::None => {}
        }
    }

    /// Number of bind values this fragment contributes.
    pub(crate) fn value_count(&self) -> usize {
        match &self.operand {
            Operand::Scalar(_) => usize::from(self.marker == Marker::Placeholder),
            Operand::Pair(..) => {
                if self.marker == Marker::Placeholder {
                    2
                } else {
                    0
                }
            }
            Operand::List(values) => values.len(),
            Operand::Subquery(query) => query.bind_values().len(),
            Operand::None => 0,
        }
    }
}

/// One predicate node: column, condition, and the trailing connective.
///
/// A node without a connective is the last in its chain; a trailing
/// connective on the final node is never rendered.
#[derive(Debug, Clone)]
pub struct ConditionQuery {
    pub(crate) column: String,
    pub(crate) condition: Condition,
    pub(crate) logical: Option<Logical>,
}

impl ConditionQuery {
    pub(crate) fn new(column: String, condition: Condition) -> Self {
        Self {
            column,
            condition,
            logical: None,
        }
    }

    pub(crate) fn render(&self, sql: &mut String) {
        sql.push_str(&self.column);
        sql.push(' ');
        self.condition.render(sql);
    }
}
