//! Common Table Expression (WITH clause) construction.
//!
//! A [`WithBuilder`] wraps an inner [`QueryBuilder`] under an alias and
//! produces the `WITH <alias> AS (...)` definition together with the outer
//! `SELECT ... FROM <alias>` statement.
//!
//! Renamed CTE columns are arity-checked against the inner query's
//! projection. On mismatch the renaming is skipped and a warning is logged;
//! the statement still builds. Malformed renaming degrades, it never fails.
//!
//! # Example
//! ```
//! use sqlcraft::{QueryBuilder, WithBuilder};
//!
//! let inner = QueryBuilder::table("orders")
//!     .columns(["user_id", "amount"])
//!     .col("status").eq("paid")?
//!     .end();
//!
//! let cte = WithBuilder::new("paid_orders", inner)
//!     .rename_columns(["uid", "total"]);
//!
//! assert_eq!(
//!     cte.build(),
//!     "WITH paid_orders (uid, total) AS \
//!      (SELECT user_id, amount FROM orders WHERE status = ?) \
//!      SELECT * FROM paid_orders"
//! );
//! assert_eq!(cte.bind_values().len(), 1);
//! # Ok::<(), sqlcraft::BuildError>(())
//! ```

use crate::query::QueryBuilder;
use crate::value::Value;

/// Builder for one CTE and its outer query.
#[must_use]
#[derive(Debug, Clone)]
pub struct WithBuilder {
    alias: String,
    inner: QueryBuilder,
    renamed: Option<Vec<String>>,
    outer_columns: Vec<String>,
}

impl WithBuilder {
    /// Wrap `inner` under `alias`.
    pub fn new(alias: impl Into<String>, inner: QueryBuilder) -> Self {
        Self {
            alias: alias.into(),
            inner,
            renamed: None,
            outer_columns: Vec::new(),
        }
    }

    /// Rename the CTE's columns.
    ///
    /// The list length must equal the inner query's projected column count,
    /// otherwise the renaming is skipped at build time (with a logged
    /// warning) and the CTE keeps the inner query's column names.
    pub fn rename_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.renamed = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Select specific columns in the outer query instead of `*`.
    pub fn outer_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outer_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Renamed columns, if they pass the arity check against the inner
    /// projection. An inner `SELECT *` has unknown arity and never matches.
    fn checked_renaming(&self) -> Option<&[String]> {
        let renamed = self.renamed.as_deref()?;
        let projected = self.inner.projected_columns();
        if projected == 0 || renamed.len() != projected {
            tracing::warn!(
                alias = %self.alias,
                supplied = renamed.len(),
                projected,
                "CTE column renaming skipped: column count does not match inner projection"
            );
            return None;
        }
        Some(renamed)
    }

    /// Render the `WITH` definition: `<alias> [(<columns>)] AS (<inner>)`.
    pub fn definition(&self) -> String {
        let mut sql = self.alias.clone();
        if let Some(columns) = self.checked_renaming() {
            sql.push_str(" (");
            sql.push_str(&columns.join(", "));
            sql.push(')');
        }
        sql.push_str(" AS (");
        sql.push_str(&self.inner.build());
        sql.push(')');
        sql
    }

    /// Render the outer `FROM` fragment: `SELECT ... FROM <alias>`.
    pub fn from_clause(&self) -> String {
        if self.outer_columns.is_empty() {
            format!("SELECT * FROM {}", self.alias)
        } else {
            format!("SELECT {} FROM {}", self.outer_columns.join(", "), self.alias)
        }
    }

    /// Render the complete statement: `WITH <definition> <outer select>`.
    pub fn build(&self) -> String {
        format!("WITH {} {}", self.definition(), self.from_clause())
    }

    /// The inner query's bind values, in definition order.
    pub fn bind_values(&self) -> Vec<Value> {
        self.inner.bind_values()
    }
}
