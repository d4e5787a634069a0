use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("time entry not found: {id}")]
    NotFound { id: Uuid },

    #[error("time entry already exists: {id}")]
    AlreadyExists { id: Uuid },

    #[error("no survey responses stored for user {user_id}")]
    NoSurvey { user_id: String },

    #[error(transparent)]
    Core(#[from] sparc_core::error::CoreError),

    #[error(transparent)]
    Instrument(#[from] sparc_instruments::error::InstrumentError),

    #[error(transparent)]
    Export(#[from] sparc_export::error::ExportError),

    /// Raised by store implementations that sit on an external system.
    #[error("backend error: {0}")]
    Backend(String),
}
