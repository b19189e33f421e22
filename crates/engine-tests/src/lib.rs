#![allow(dead_code)]

pub mod integration;
pub mod live;
pub mod memory;
pub mod utils;

/// Connection URL for the live MySQL tests, e.g. `mysql://root:pw@localhost:3306/csvload_test`.
pub const TEST_MYSQL_URL_VAR: &str = "CSVLOAD_TEST_URL";
