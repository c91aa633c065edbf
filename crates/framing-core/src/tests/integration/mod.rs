#![cfg(test)]

pub mod common;
pub mod config_tests;
pub mod framing_tests;
