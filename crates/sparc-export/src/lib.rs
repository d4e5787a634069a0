//! sparc-export
//!
//! CSV + XLSX generation from time entries. Both formats share one flat
//! table model; they differ only in how dates and timestamps are rendered.

pub mod delimited;
pub mod display;
pub mod error;
pub mod file;
pub mod range;
pub mod table;
pub mod xlsx;
