use thiserror::Error;

use crate::instruments::olbi::ResponseError;
use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("invalid survey responses: {}", join_errors(.0))]
    InvalidResponses(Vec<ResponseError>),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

fn join_errors(errors: &[ResponseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
