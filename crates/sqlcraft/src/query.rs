//! The root query-building context and its fluent predicate chain.
//!
//! A [`QueryBuilder`] accumulates a projection, an ordered predicate list,
//! and a running count of bound values. Predicates are opened per column via
//! [`QueryBuilder::col`], which hands out a [`ColumnCmp`]; each comparison
//! returns a [`ConditionChain`] whose `and()` / `or()` route control back to
//! the builder, so a statement reads top to bottom:
//!
//! ```
//! use sqlcraft::QueryBuilder;
//!
//! let query = QueryBuilder::table("users")
//!     .columns(["id", "name"])
//!     .col("status").eq("active")?
//!     .and()
//!     .col("age").between(18, 65)?
//!     .end();
//!
//! assert_eq!(
//!     query.build(),
//!     "SELECT id, name FROM users WHERE status = ? AND age BETWEEN ? AND ?"
//! );
//! assert_eq!(query.bind_values().len(), 3);
//! # Ok::<(), sqlcraft::BuildError>(())
//! ```
//!
//! `build()` is pure: it walks the accumulated state and may be called any
//! number of times, always yielding byte-identical output.

use crate::column::Column;
use crate::error::BuildResult;
use crate::expr::{Condition, ConditionQuery, IntoOperand, Logical, Marker, Operand};
use crate::value::{IntoValue, Value};

/// Root context for one SELECT statement under construction.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    table: String,
    projection: Vec<Column>,
    predicates: Vec<ConditionQuery>,
    marker: Marker,
    group_clauses: Vec<String>,
    order_clauses: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    /// Count of values registered so far; advances only when predicates are
    /// added, never inside `build()`.
    values_bound: usize,
}

impl QueryBuilder {
    /// Start a query against `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    // ==================== Projection ====================

    /// Append one column to the projection.
    pub fn column(mut self, column: impl Into<Column>) -> Self {
        self.projection.push(column.into());
        self
    }

    /// Append multiple columns to the projection.
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.projection.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Number of explicitly projected columns (0 means `SELECT *`).
    pub fn projected_columns(&self) -> usize {
        self.projection.len()
    }

    // ==================== Marker mode ====================

    /// Inline subsequently added scalar/range operands as SQL literals.
    ///
    /// Lists and subqueries are unaffected. Never use with untrusted input.
    pub fn use_literals(mut self) -> Self {
        self.marker = Marker::Literal;
        self
    }

    /// Switch back to `?` placeholders for subsequently added predicates.
    pub fn use_placeholders(mut self) -> Self {
        self.marker = Marker::Placeholder;
        self
    }

    // ==================== Predicates ====================

    /// Open a predicate on `column`.
    pub fn col(self, column: impl Into<String>) -> ColumnCmp {
        ColumnCmp {
            query: self,
            column: column.into(),
        }
    }

    pub(crate) fn push_predicate(&mut self, column: String, condition: Condition) {
        self.values_bound += condition.value_count();
        self.predicates.push(ConditionQuery::new(column, condition));
    }

    /// Count of bind values registered so far.
    pub fn values_bound(&self) -> usize {
        self.values_bound
    }

    // ==================== Ordering & pagination ====================

    /// Add a GROUP BY column.
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_clauses.push(column.into());
        self
    }

    /// Add an ORDER BY clause.
    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_clauses.push(clause.into());
        self
    }

    /// Add ORDER BY column DESC.
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order_clauses.push(format!("{} DESC", column.into()));
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== Build ====================

    /// Render the statement.
    ///
    /// Pure with respect to accumulated state: repeated calls yield
    /// byte-identical text.
    pub fn build(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.projection.is_empty() {
            sql.push('*');
        } else {
            for (i, column) in self.projection.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&column.render());
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            let last = self.predicates.len() - 1;
            for (i, predicate) in self.predicates.iter().enumerate() {
                predicate.render(&mut sql);
                // The connective stored on the final node is never rendered.
                if i < last {
                    let logical = predicate.logical.unwrap_or(Logical::And);
                    sql.push_str(logical.as_sql());
                }
            }
        }

        if !self.group_clauses.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_clauses.join(", "));
        }

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }

    /// The ordered bind-value list matching the `?` placeholders of
    /// [`Self::build`]. Subquery values are spliced in definition order.
    pub fn bind_values(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.values_bound);
        for predicate in &self.predicates {
            predicate.condition.collect_values(&mut values);
        }
        values
    }
}

/// Per-column comparison entry point.
///
/// Every operator method accepts a scalar, a `Vec` of values, or a nested
/// [`QueryBuilder`] through [`IntoOperand`], and returns a
/// [`ConditionChain`] to continue or finish the statement.
#[must_use]
#[derive(Debug)]
pub struct ColumnCmp {
    query: QueryBuilder,
    column: String,
}

impl ColumnCmp {
    fn compare(
        mut self,
        operator: &'static str,
        operand: Operand,
    ) -> BuildResult<ConditionChain> {
        let condition = Condition::compare(operator, self.query.marker, operand)?;
        self.query.push_predicate(self.column, condition);
        Ok(ConditionChain { query: self.query })
    }

    fn membership(
        mut self,
        operator: &'static str,
        operand: Operand,
    ) -> BuildResult<ConditionChain> {
        let condition = Condition::membership(operator, self.query.marker, operand)?;
        self.query.push_predicate(self.column, condition);
        Ok(ConditionChain { query: self.query })
    }

    fn range(
        mut self,
        operator: &'static str,
        from: Value,
        to: Value,
    ) -> BuildResult<ConditionChain> {
        let condition = Condition::range(operator, self.query.marker, from, to)?;
        self.query.push_predicate(self.column, condition);
        Ok(ConditionChain { query: self.query })
    }

    fn bare(mut self, operator: &'static str) -> ConditionChain {
        self.query
            .push_predicate(self.column, Condition::bare(operator));
        ConditionChain { query: self.query }
    }

    /// `column = value`
    pub fn eq(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("=", value.into_operand())
    }

    /// `column != value`
    pub fn ne(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("!=", value.into_operand())
    }

    /// `column > value`
    pub fn gt(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare(">", value.into_operand())
    }

    /// `column >= value`
    pub fn gte(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare(">=", value.into_operand())
    }

    /// `column < value`
    pub fn lt(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("<", value.into_operand())
    }

    /// `column <= value`
    pub fn lte(self, value: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("<=", value.into_operand())
    }

    /// `column LIKE pattern`
    pub fn like(self, pattern: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("LIKE", pattern.into_operand())
    }

    /// `column ILIKE pattern` (case-insensitive)
    pub fn ilike(self, pattern: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.compare("ILIKE", pattern.into_operand())
    }

    /// `column IN (values...)` — one placeholder per value.
    ///
    /// Errors on an empty list. A subquery operand renders as
    /// `IN (<nested SQL>)`.
    pub fn in_list(self, values: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.membership("IN", values.into_operand())
    }

    /// `column NOT IN (values...)` — one placeholder per value.
    ///
    /// Errors on an empty list.
    pub fn not_in(self, values: impl IntoOperand) -> BuildResult<ConditionChain> {
        self.membership("NOT IN", values.into_operand())
    }

    /// `column BETWEEN from AND to` — both bounds must be non-null.
    pub fn between(
        self,
        from: impl IntoValue,
        to: impl IntoValue,
    ) -> BuildResult<ConditionChain> {
        self.range("BETWEEN", from.into_value(), to.into_value())
    }

    /// `column NOT BETWEEN from AND to` — both bounds must be non-null.
    pub fn not_between(
        self,
        from: impl IntoValue,
        to: impl IntoValue,
    ) -> BuildResult<ConditionChain> {
        self.range("NOT BETWEEN", from.into_value(), to.into_value())
    }

    /// `column IS NULL`
    pub fn is_null(self) -> ConditionChain {
        self.bare("IS NULL")
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(self) -> ConditionChain {
        self.bare("IS NOT NULL")
    }
}

/// Terminal node of a predicate: chain with `and()` / `or()`, or finish.
#[must_use]
#[derive(Debug)]
pub struct ConditionChain {
    query: QueryBuilder,
}

impl ConditionChain {
    fn connect(mut self, logical: Logical) -> QueryBuilder {
        if let Some(last) = self.query.predicates.last_mut() {
            last.logical = Some(logical);
        }
        self.query
    }

    /// Join the next predicate with ` AND `.
    pub fn and(self) -> QueryBuilder {
        self.connect(Logical::And)
    }

    /// Join the next predicate with ` OR `.
    pub fn or(self) -> QueryBuilder {
        self.connect(Logical::Or)
    }

    /// Finish the predicate chain and return the builder.
    pub fn end(self) -> QueryBuilder {
        self.query
    }

    /// Render the statement; shorthand for `.end().build()`.
    pub fn build(&self) -> String {
        self.query.build()
    }

    /// The ordered bind-value list for the statement so far.
    pub fn bind_values(&self) -> Vec<Value> {
        self.query.bind_values()
    }
}
