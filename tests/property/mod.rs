//! Property-based tests

pub mod board_proptest;
pub mod storage_proptest;
