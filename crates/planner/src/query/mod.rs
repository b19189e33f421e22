//! SQL statement ASTs and their rendering for the import pipeline.

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

use crate::query::{
    dialect::Dialect,
    renderer::{Render, Renderer},
};

/// Renders any statement AST into a SQL string for the given dialect.
pub fn render<T: Render>(ast: &T, dialect: &dyn Dialect) -> String {
    let mut renderer = Renderer::new(dialect);
    ast.render(&mut renderer);
    renderer.finish()
}
