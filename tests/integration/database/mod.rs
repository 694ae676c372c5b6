//! Database tests

pub mod migrations_test;
