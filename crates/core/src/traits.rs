//! Collaborator traits
//!
//! The pipeline itself performs no I/O. Time, category suggestion and
//! persistence are supplied by the host through these seams.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::category::{Category, CategoryMatch, NewCategoryProposal};
use crate::command::CommandContext;
use crate::draft::{ConfirmedTransaction, TransactionDraft};

/// Source of "today" for relative dates and of every pipeline timestamp
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same date; `now` is midnight UTC of that date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }
}

/// Failure reported by a host collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("{0}")]
    Other(String),
}

impl CollaboratorError {
    /// Short tag used to pick the user-facing message
    pub fn kind(&self) -> &'static str {
        match self {
            CollaboratorError::Network(_) => "network",
            CollaboratorError::Validation(_) => "validation",
            CollaboratorError::Server(_) => "server",
            CollaboratorError::Other(_) => "default",
        }
    }
}

/// Persistence collaborator that receives confirmed transactions
pub trait TransactionSink: Send + Sync {
    /// Create a category proposed by the pipeline, returning the stored record
    fn create_category(
        &self,
        proposal: &NewCategoryProposal,
        context: CommandContext,
    ) -> Result<Category, CollaboratorError>;

    /// Store a transaction, returning its identifier
    fn create_transaction(
        &self,
        transaction: &ConfirmedTransaction,
        category_id: Option<&str>,
    ) -> Result<String, CollaboratorError>;
}

/// Picks the category shown in the confirmation step
pub trait CategorySuggester: Send + Sync {
    fn suggest(&self, draft: &TransactionDraft, categories: &[Category]) -> Option<CategoryMatch>;
}
