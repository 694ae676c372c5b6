//! Real-time fan-out tests

pub mod broadcast_test;
