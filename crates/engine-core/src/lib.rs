pub mod config;
pub mod error;
pub mod key;
pub mod loader;
pub mod pipeline;
pub mod post_process;
pub mod provision;
pub mod report;
pub mod schema;
pub mod script;
