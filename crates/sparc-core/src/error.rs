use thiserror::Error;

use crate::models::time_entry::EntryProblem;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown task code: {0}")]
    UnknownTaskCode(String),

    #[error("invalid time entry: {}", join_problems(.0))]
    InvalidEntry(Vec<EntryProblem>),
}

fn join_problems(problems: &[EntryProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
