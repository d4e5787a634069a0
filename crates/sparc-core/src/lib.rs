//! sparc-core
//!
//! Pure domain types for SPARC time tracking: the closed set of activity
//! codes, time entries and their edits, and per-day aggregation.
//! No storage dependency; every other crate in the workspace builds on these types.

pub mod aggregate;
pub mod error;
pub mod models;
