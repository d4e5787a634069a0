//! sparc-storage
//!
//! The persistence boundary. [`store::EntryStore`] and
//! [`store::SurveyStore`] describe the calls the hosted backend answers;
//! [`memory::MemoryStore`] implements them in process. [`tracker::TimeTracker`]
//! layers the user-facing operations (quick-log, bulk edits, totals,
//! export, survey submission) on top of any store.

pub mod error;
pub mod memory;
pub mod store;
pub mod tracker;
