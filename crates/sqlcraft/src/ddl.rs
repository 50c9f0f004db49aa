//! DDL construction: table columns, constraints, CREATE TABLE and
//! ALTER TABLE statements.
//!
//! A [`TableColumn`] renders as `<name> <type> <constraint> ...` with
//! constraints space-joined in declaration order. [`Constraint`]s are
//! immutable string fragments produced by factory functions.
//!
//! [`AlterTable::add`] and [`AlterTable::drop`] accept anything convertible
//! into [`AnyColumn`]. Projection columns passed there are ignored without
//! error, so generic column objects can flow through DDL call sites.

use crate::column::Column;
use crate::value::IntoValue;

/// SQL column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    /// DECIMAL(precision, scale)
    Decimal(u32, u32),
    /// CHAR(n)
    Char(u32),
    /// VARCHAR(n)
    Varchar(u32),
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    Uuid,
    Json,
}

impl DataType {
    /// SQL spelling of the type.
    pub fn as_sql(self) -> String {
        match self {
            Self::SmallInt => String::from("SMALLINT"),
            Self::Integer => String::from("INTEGER"),
            Self::BigInt => String::from("BIGINT"),
            Self::Real => String::from("REAL"),
            Self::Double => String::from("DOUBLE PRECISION"),
            Self::Decimal(precision, scale) => format!("DECIMAL({precision}, {scale})"),
            Self::Char(n) => format!("CHAR({n})"),
            Self::Varchar(n) => format!("VARCHAR({n})"),
            Self::Text => String::from("TEXT"),
            Self::Boolean => String::from("BOOLEAN"),
            Self::Date => String::from("DATE"),
            Self::Time => String::from("TIME"),
            Self::Timestamp => String::from("TIMESTAMP"),
            Self::Uuid => String::from("UUID"),
            Self::Json => String::from("JSON"),
        }
    }
}

/// One constraint fragment on a table column or table definition.
///
/// Constraints are immutable once created; the factory functions below cover
/// the supported fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint(String);

impl Constraint {
    /// `NULL`
    pub fn null() -> Self {
        Self(String::from("NULL"))
    }

    /// `NOT NULL`
    pub fn not_null() -> Self {
        Self(String::from("NOT NULL"))
    }

    /// `PRIMARY KEY`
    pub fn primary_key() -> Self {
        Self(String::from("PRIMARY KEY"))
    }

    /// `PRIMARY KEY (a, b, ...)` over named columns.
    pub fn primary_key_on(columns: &[&str]) -> Self {
        Self(format!("PRIMARY KEY ({})", columns.join(", ")))
    }

    /// `AUTO_INCREMENT`
    pub fn auto_increment() -> Self {
        Self(String::from("AUTO_INCREMENT"))
    }

    /// `UNIQUE`
    pub fn unique() -> Self {
        Self(String::from("UNIQUE"))
    }

    /// `UNIQUE (col)` as a table-level constraint.
    pub fn unique_on(column: &str) -> Self {
        Self(format!("UNIQUE ({column})"))
    }

    /// `DEFAULT <value>` with type-specific literal formatting.
    pub fn default_value(value: impl IntoValue) -> Self {
        Self(format!("DEFAULT {}", value.into_value().to_literal()))
    }

    /// `CHECK(<condition>)`
    pub fn check(condition: &str) -> Self {
        Self(format!("CHECK({condition})"))
    }

    /// `FOREIGN KEY (col) REFERENCES table(ref_col)`
    pub fn foreign_key(column: &str, table: &str, ref_column: &str) -> Self {
        Self(format!(
            "FOREIGN KEY ({column}) REFERENCES {table}({ref_column})"
        ))
    }

    /// `ON DELETE CASCADE`
    pub fn on_delete_cascade() -> Self {
        Self(String::from("ON DELETE CASCADE"))
    }

    /// `ON UPDATE CASCADE`
    pub fn on_update_cascade() -> Self {
        Self(String::from("ON UPDATE CASCADE"))
    }

    /// `ON DELETE SET NULL`
    pub fn on_delete_set_null() -> Self {
        Self(String::from("ON DELETE SET NULL"))
    }

    /// `ON UPDATE SET NULL`
    pub fn on_update_set_null() -> Self {
        Self(String::from("ON UPDATE SET NULL"))
    }

    /// The rendered fragment.
    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

/// A column definition inside CREATE TABLE / ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    name: String,
    data_type: DataType,
    constraints: Vec<Constraint>,
}

impl TableColumn {
    /// Create a column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    /// Append a constraint; rendered in declaration order.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render `<name> <type> <constraint> ...`.
    pub fn render(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

/// Builder for CREATE TABLE statements.
#[must_use]
#[derive(Debug, Clone)]
pub struct CreateTable {
    table: String,
    if_not_exists: bool,
    columns: Vec<TableColumn>,
    constraints: Vec<Constraint>,
}

impl CreateTable {
    /// Start a CREATE TABLE for `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            if_not_exists: false,
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Emit `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Add a column definition.
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a table-level constraint (e.g. a composite primary key).
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Render the statement.
    pub fn build(&self) -> String {
        let mut defs: Vec<String> = self.columns.iter().map(TableColumn::render).collect();
        defs.extend(self.constraints.iter().map(|c| c.as_sql().to_string()));

        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.table);
        sql.push_str(" (");
        sql.push_str(&defs.join(", "));
        sql.push(')');
        sql
    }
}

/// Either a DDL column definition or a query projection column.
///
/// ALTER TABLE only acts on the [`AnyColumn::Table`] variant. Projection
/// columns are accepted and ignored, so call sites handing over generic
/// columns need no type check of their own.
#[derive(Debug, Clone)]
pub enum AnyColumn {
    Table(TableColumn),
    Projection(Column),
}

impl From<TableColumn> for AnyColumn {
    fn from(column: TableColumn) -> Self {
        Self::Table(column)
    }
}

impl From<Column> for AnyColumn {
    fn from(column: Column) -> Self {
        Self::Projection(column)
    }
}

/// Builder for ALTER TABLE statements.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct AlterTable {
    table: String,
    actions: Vec<String>,
}

impl AlterTable {
    /// Start an ALTER TABLE for `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            actions: Vec::new(),
        }
    }

    /// Queue `ADD COLUMN <definition>`.
    ///
    /// Projection columns are ignored without error.
    pub fn add(mut self, column: impl Into<AnyColumn>) -> Self {
        match column.into() {
            AnyColumn::Table(column) => {
                self.actions.push(format!("ADD COLUMN {}", column.render()));
            }
            AnyColumn::Projection(_) => {}
        }
        self
    }

    /// Queue `DROP COLUMN <name>`.
    ///
    /// Projection columns are ignored without error.
    pub fn drop(mut self, column: impl Into<AnyColumn>) -> Self {
        match column.into() {
            AnyColumn::Table(column) => {
                self.actions.push(format!("DROP COLUMN {}", column.name()));
            }
            AnyColumn::Projection(_) => {}
        }
        self
    }

    /// Render the statement. Empty if no actions were queued.
    pub fn build(&self) -> String {
        if self.actions.is_empty() {
            return String::new();
        }
        format!("ALTER TABLE {} {}", self.table, self.actions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_column_with_constraints() {
        let col = TableColumn::new("id", DataType::BigInt)
            .constraint(Constraint::primary_key())
            .constraint(Constraint::auto_increment());
        assert_eq!(col.render(), "id BIGINT PRIMARY KEY AUTO_INCREMENT");
    }

    #[test]
    fn default_literal_formatting() {
        assert_eq!(
            Constraint::default_value("pending").as_sql(),
            "DEFAULT 'pending'"
        );
        assert_eq!(Constraint::default_value(42).as_sql(), "DEFAULT 42");
        assert_eq!(Constraint::default_value(true).as_sql(), "DEFAULT TRUE");
    }

    #[test]
    fn default_escapes_quotes() {
        assert_eq!(Constraint::default_value("it's").as_sql(), "DEFAULT 'it''s'");
    }

    #[test]
    fn check_has_no_space() {
        assert_eq!(Constraint::check("price > 0").as_sql(), "CHECK(price > 0)");
    }

    #[test]
    fn foreign_key_with_actions() {
        let col = TableColumn::new("user_id", DataType::BigInt)
            .constraint(Constraint::foreign_key("user_id", "users", "id"))
            .constraint(Constraint::on_delete_cascade());
        assert_eq!(
            col.render(),
            "user_id BIGINT FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn composite_primary_key() {
        assert_eq!(
            Constraint::primary_key_on(&["a", "b"]).as_sql(),
            "PRIMARY KEY (a, b)"
        );
    }

    #[test]
    fn create_table() {
        let sql = CreateTable::new("users")
            .if_not_exists()
            .column(
                TableColumn::new("id", DataType::BigInt).constraint(Constraint::primary_key()),
            )
            .column(
                TableColumn::new("name", DataType::Varchar(255))
                    .constraint(Constraint::not_null()),
            )
            .constraint(Constraint::unique_on("name"))
            .build();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS users \
             (id BIGINT PRIMARY KEY, name VARCHAR(255) NOT NULL, UNIQUE (name))"
        );
    }

    #[test]
    fn alter_table_add_and_drop() {
        let sql = AlterTable::new("users")
            .add(TableColumn::new("age", DataType::Integer).constraint(Constraint::not_null()))
            .drop(TableColumn::new("legacy", DataType::Text))
            .build();
        assert_eq!(
            sql,
            "ALTER TABLE users ADD COLUMN age INTEGER NOT NULL, DROP COLUMN legacy"
        );
    }

    #[test]
    fn projection_columns_are_ignored() {
        let sql = AlterTable::new("users")
            .add(Column::new("not_a_definition"))
            .drop(Column::new("also_not"))
            .add(TableColumn::new("age", DataType::Integer))
            .build();
        assert_eq!(sql, "ALTER TABLE users ADD COLUMN age INTEGER");
    }

    #[test]
    fn alter_table_without_actions_is_empty() {
        assert_eq!(AlterTable::new("users").build(), "");
    }

    #[test]
    fn decimal_and_char_types() {
        assert_eq!(DataType::Decimal(10, 2).as_sql(), "DECIMAL(10, 2)");
        assert_eq!(DataType::Char(8).as_sql(), "CHAR(8)");
        assert_eq!(DataType::Double.as_sql(), "DOUBLE PRECISION");
    }
}
