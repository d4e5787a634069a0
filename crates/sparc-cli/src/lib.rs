//! sparc-cli library root.
//!
//! The binary is a thin wrapper; argument parsing, config handling and the
//! command bodies live here so integration tests can drive them directly.

pub mod cli;
pub mod commands;
pub mod config;
