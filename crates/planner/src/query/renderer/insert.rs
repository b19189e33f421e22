use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("INSERT ");
        if self.ignore {
            r.sql.push_str("IGNORE ");
        }
        r.sql.push_str("INTO ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" VALUES (");
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_literal(value));
        }
        r.sql.push(')');
    }
}
