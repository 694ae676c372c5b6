//! Test suite for TeamHub
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
