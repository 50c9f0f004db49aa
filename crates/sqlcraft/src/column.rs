//! SELECT projection: columns, aliases, and aggregate wrapping.
//!
//! A [`Column`] renders as `name [AS alias]` unless it carries an
//! [`Aggregation`]. Aggregations support two rounding policies:
//!
//! - [`RoundingScope::PerFunction`]: each `FUNC(col)` term is rounded
//!   individually, then the terms are joined by the combine symbol:
//!   `ROUND(SUM(col), 2) + ROUND(AVG(col), 2)`.
//! - [`RoundingScope::Combined`] (default): the terms are joined first and
//!   rounded once: `ROUND(SUM(col) + AVG(col), 2)`.
//!
//! Rounding is a no-op when the aggregate function list is empty.

/// Aggregate function applied to a projected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    /// SUM(col)
    Sum,
    /// AVG(col)
    Avg,
    /// MIN(col)
    Min,
    /// MAX(col)
    Max,
    /// COUNT(col)
    Count,
}

impl AggregateFn {
    /// SQL name of the function.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Count => "COUNT",
        }
    }
}

/// Where rounding applies when multiple aggregate terms are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundingScope {
    /// Round each `FUNC(col)` term, then combine.
    PerFunction,
    /// Combine all terms, then round the joined expression once.
    #[default]
    Combined,
}

/// Rounding precision with an optional engine-specific mode argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rounding {
    precision: u32,
    mode: Option<String>,
}

impl Rounding {
    /// Round to `precision` decimal places.
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            mode: None,
        }
    }

    /// Round with an explicit mode, rendered as a third `ROUND` argument.
    pub fn with_mode(precision: u32, mode: impl Into<String>) -> Self {
        Self {
            precision,
            mode: Some(mode.into()),
        }
    }

    fn wrap(&self, term: &str) -> String {
        match &self.mode {
            Some(mode) => format!("ROUND({term}, {}, {mode})", self.precision),
            None => format!("ROUND({term}, {})", self.precision),
        }
    }
}

/// Aggregate wrapping for a projected column.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    functions: Vec<AggregateFn>,
    combine: String,
    rounding: Option<Rounding>,
    scope: RoundingScope,
}

impl Default for Aggregation {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregation {
    /// Create an empty aggregation (renders the bare column until a
    /// function is added).
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
            combine: String::from("+"),
            rounding: None,
            scope: RoundingScope::default(),
        }
    }

    /// Create an aggregation with a single function.
    pub fn of(function: AggregateFn) -> Self {
        Self::new().function(function)
    }

    /// Append an aggregate function.
    pub fn function(mut self, function: AggregateFn) -> Self {
        self.functions.push(function);
        self
    }

    /// Set the symbol joining multiple aggregate terms (default `+`).
    pub fn combine_with(mut self, symbol: impl Into<String>) -> Self {
        self.combine = symbol.into();
        self
    }

    /// Round the result to `precision` decimal places.
    pub fn round(mut self, precision: u32) -> Self {
        self.rounding = Some(Rounding::new(precision));
        self
    }

    /// Round with an explicit rounding mode.
    pub fn round_with_mode(mut self, precision: u32, mode: impl Into<String>) -> Self {
        self.rounding = Some(Rounding::with_mode(precision, mode));
        self
    }

    /// Apply rounding to each term instead of the combined expression.
    pub fn per_function(mut self) -> Self {
        self.scope = RoundingScope::PerFunction;
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Render the aggregate expression over `column`.
    ///
    /// Callers must check [`Self::is_empty`] first; without functions there
    /// is nothing to wrap and rounding is ignored.
    pub(crate) fn render(&self, column: &str) -> String {
        let terms: Vec<String> = match (self.scope, &self.rounding) {
            (RoundingScope::PerFunction, Some(rounding)) => self
                .functions
                .iter()
                .map(|f| rounding.wrap(&format!("{}({column})", f.as_sql())))
                .collect(),
            _ => self
                .functions
                .iter()
                .map(|f| format!("{}({column})", f.as_sql()))
                .collect(),
        };

        let joined = terms.join(&format!(" {} ", self.combine));

        match (self.scope, &self.rounding) {
            (RoundingScope::Combined, Some(rounding)) => rounding.wrap(&joined),
            _ => joined,
        }
    }
}

/// A projected column: name, optional alias, optional aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    alias: Option<String>,
    aggregation: Option<Aggregation>,
}

impl Column {
    /// Create a plain column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            aggregation: None,
        }
    }

    /// Set the output alias, rendered as `AS <alias>`. An empty alias is
    /// treated as absent.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = if alias.is_empty() { None } else { Some(alias) };
        self
    }

    /// Attach an aggregation.
    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Render the projection fragment.
    pub(crate) fn render(&self) -> String {
        let base = match &self.aggregation {
            Some(agg) if !agg.is_empty() => agg.render(&self.name),
            _ => self.name.clone(),
        };
        match &self.alias {
            Some(alias) => format!("{base} AS {alias}"),
            None => base,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_column() {
        assert_eq!(Column::new("id").render(), "id");
    }

    #[test]
    fn column_with_alias() {
        assert_eq!(Column::new("id").alias("user_id").render(), "id AS user_id");
    }

    #[test]
    fn empty_alias_is_omitted() {
        assert_eq!(Column::new("id").alias("").render(), "id");
    }

    #[test]
    fn single_aggregate() {
        let col = Column::new("amount").aggregate(Aggregation::of(AggregateFn::Sum));
        assert_eq!(col.render(), "SUM(amount)");
    }

    #[test]
    fn aggregate_with_alias() {
        let col = Column::new("amount")
            .aggregate(Aggregation::of(AggregateFn::Sum))
            .alias("total");
        assert_eq!(col.render(), "SUM(amount) AS total");
    }

    #[test]
    fn combined_rounding() {
        let agg = Aggregation::of(AggregateFn::Sum)
            .function(AggregateFn::Avg)
            .round(2);
        assert_eq!(
            Column::new("col").aggregate(agg).render(),
            "ROUND(SUM(col) + AVG(col), 2)"
        );
    }

    #[test]
    fn per_function_rounding() {
        let agg = Aggregation::of(AggregateFn::Sum)
            .function(AggregateFn::Avg)
            .round(2)
            .per_function();
        assert_eq!(
            Column::new("col").aggregate(agg).render(),
            "ROUND(SUM(col), 2) + ROUND(AVG(col), 2)"
        );
    }

    #[test]
    fn rounding_mode_third_argument() {
        let agg = Aggregation::of(AggregateFn::Avg).round_with_mode(3, "'HALF_EVEN'");
        assert_eq!(
            Column::new("price").aggregate(agg).render(),
            "ROUND(AVG(price), 3, 'HALF_EVEN')"
        );
    }

    #[test]
    fn default_constructed_aggregation_joins_with_plus() {
        let agg = Aggregation::default()
            .function(AggregateFn::Sum)
            .function(AggregateFn::Avg);
        assert_eq!(Column::new("c").aggregate(agg).render(), "SUM(c) + AVG(c)");
    }

    #[test]
    fn custom_combine_symbol() {
        let agg = Aggregation::of(AggregateFn::Max)
            .function(AggregateFn::Min)
            .combine_with("-");
        assert_eq!(
            Column::new("t").aggregate(agg).render(),
            "MAX(t) - MIN(t)"
        );
    }

    #[test]
    fn rounding_without_functions_is_noop() {
        let agg = Aggregation::new().round(2);
        let col = Column::new("id").aggregate(agg).alias("x");
        assert_eq!(col.render(), "id AS x");
    }
}
