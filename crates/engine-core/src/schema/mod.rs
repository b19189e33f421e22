pub mod builder;
pub mod sanitize;
