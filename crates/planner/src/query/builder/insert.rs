use crate::query::ast::{common::TableRef, insert::Insert};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
        }
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ast.ignore = ignore;
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ast.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
