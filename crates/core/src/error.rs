//! Error types shared across the voice ledger crates

use thiserror::Error;

use crate::traits::CollaboratorError;

/// Core error type
///
/// Extraction never produces one of these: a miss is an absent value.
/// Errors only surface at the boundaries (state import, collaborators,
/// dialogue misuse).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Dialogue error: {0}")]
    Dialogue(String),
}

pub type Result<T> = std::result::Result<T, Error>;
