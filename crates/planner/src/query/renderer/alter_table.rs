use crate::query::{
    ast::alter_table::{AddColumn, AlterOperation, AlterTable, ColumnPosition},
    renderer::{Render, Renderer},
};

impl Render for AlterTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("ALTER TABLE ");
        r.render_table_ref(&self.table);
        match &self.operation {
            AlterOperation::AddColumn(column) => render_add_column(column, r),
        }
    }
}

fn render_add_column(column: &AddColumn, r: &mut Renderer) {
    r.sql.push_str(" ADD ");
    r.sql.push_str(&r.dialect.quote_identifier(&column.name));
    r.sql.push(' ');
    r.sql.push_str(&r.dialect.render_data_type(&column.data_type));
    if column.not_null {
        r.sql.push_str(" NOT NULL");
    }
    if column.primary_key {
        r.sql.push_str(" PRIMARY KEY");
    }
    if column.auto_increment {
        r.sql.push_str(" AUTO_INCREMENT");
    }
    match &column.position {
        ColumnPosition::Last => {}
        ColumnPosition::First => r.sql.push_str(" FIRST"),
    }
}
