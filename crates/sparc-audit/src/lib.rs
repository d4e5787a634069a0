//! sparc-audit
//!
//! Application-level audit events. Events are emitted through `tracing`;
//! the [`telemetry::Telemetry`] handle that emits them is built by the
//! caller and passed to whatever needs it.

pub mod events;
pub mod telemetry;
