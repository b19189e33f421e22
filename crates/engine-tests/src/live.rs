//! Imports against a real server. Run with
//! `CSVLOAD_TEST_URL=mysql://user:pw@localhost:3306/csvload_test cargo test -- --ignored`.
