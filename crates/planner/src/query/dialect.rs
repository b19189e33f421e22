//! Defines the `Dialect` trait for database-specific SQL syntax.

use crate::query::ast::create_table::ColumnType;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Escapes arbitrary text so it can be embedded in a quoted string
    /// literal. Never fails.
    fn escape_literal(&self, value: &str) -> String;

    /// Escapes and quotes a text value as a complete string literal.
    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", self.escape_literal(value))
    }

    /// Renders a column type into a database-specific SQL type string.
    fn render_data_type(&self, data_type: &ColumnType) -> String;

    /// Returns the name of the dialect (e.g. "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    /// Mirrors the character set handled by `mysql_real_escape_string`.
    fn escape_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                other => out.push(other),
            }
        }
        out
    }

    fn render_data_type(&self, data_type: &ColumnType) -> String {
        match data_type {
            ColumnType::Varchar(width) => format!("VARCHAR({width})"),
            ColumnType::Int => "INT".into(),
        }
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}
