use crate::query::{
    ast::create_table::CreateTable,
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");

        let defs: Vec<String> = self
            .columns
            .iter()
            .map(|col| {
                format!(
                    "{} {}",
                    r.dialect.quote_identifier(&col.name),
                    r.dialect.render_data_type(&col.data_type)
                )
            })
            .collect();
        r.sql.push_str(&defs.join(", "));
        r.sql.push(')');
    }
}
