use crate::query::{
    ast::create_database::CreateDatabase,
    renderer::{Render, Renderer},
};

impl Render for CreateDatabase {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE DATABASE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}
