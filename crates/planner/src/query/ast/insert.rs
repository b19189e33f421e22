//! Defines the AST for a single-row INSERT statement.

use crate::query::ast::common::TableRef;

/// A positional single-row insert: `INSERT [IGNORE] INTO t VALUES (...)`.
///
/// No column list is rendered, so `values` must line up with the table's
/// column order. Values are always rendered as text literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub values: Vec<String>,
    /// Silently drop rows that would violate a unique or primary key.
    pub ignore: bool,
}
