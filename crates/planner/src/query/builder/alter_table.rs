use crate::query::ast::{
    alter_table::{AddColumn, AlterOperation, AlterTable, ColumnPosition},
    common::TableRef,
    create_table::ColumnType,
};

/// Builds an `ALTER TABLE ... ADD` for an auto-incrementing integer
/// primary key column.
#[derive(Debug, Clone)]
pub struct AddKeyColumnBuilder {
    table: TableRef,
    column: AddColumn,
}

impl AddKeyColumnBuilder {
    pub fn new(table: TableRef, column: &str) -> Self {
        Self {
            table,
            column: AddColumn {
                name: column.to_string(),
                data_type: ColumnType::Int,
                not_null: true,
                primary_key: true,
                auto_increment: true,
                position: ColumnPosition::Last,
            },
        }
    }

    pub fn first(mut self) -> Self {
        self.column.position = ColumnPosition::First;
        self
    }

    pub fn build(self) -> AlterTable {
        AlterTable {
            table: self.table,
            operation: AlterOperation::AddColumn(self.column),
        }
    }
}
