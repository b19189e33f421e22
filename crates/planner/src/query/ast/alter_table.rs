//! Defines the AST for ALTER TABLE ... ADD COLUMN.

use crate::query::ast::{common::TableRef, create_table::ColumnType};

#[derive(Debug, Clone)]
pub struct AlterTable {
    pub table: TableRef,
    pub operation: AlterOperation,
}

#[derive(Debug, Clone)]
pub enum AlterOperation {
    AddColumn(AddColumn),
}

#[derive(Debug, Clone)]
pub struct AddColumn {
    pub name: String,
    pub data_type: ColumnType,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub position: ColumnPosition,
}

/// Where a new column lands in the table's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnPosition {
    #[default]
    Last,
    First,
}
