//! Core types for the voice ledger
//!
//! This crate provides the foundational types shared by every other crate:
//! - Commands and their normalized form
//! - Categories and category proposals
//! - Extracted entities, intents and transaction drafts
//! - Collaborator traits (clock, persistence sink, category suggester)
//! - Error types

pub mod category;
pub mod command;
pub mod draft;
pub mod entities;
pub mod error;
pub mod intent;
pub mod money;
pub mod traits;

pub use category::{slugify, Category, CategoryMatch, NewCategoryProposal, TransactionType};
pub use command::{Command, CommandContext, NormalizedCommand};
pub use draft::{ConfirmedTransaction, DraftMetadata, TransactionDraft};
pub use entities::{ExtractedEntities, Field, PaymentStatus, Recurrence};
pub use error::{Error, Result};
pub use intent::{Intent, IntentMetadata, IntentResult, ListCriteria, ListPeriod, SortBy, UpdateSubIntent};
pub use money::Amount;
pub use traits::{
    CategorySuggester, Clock, CollaboratorError, FixedClock, SystemClock, TransactionSink,
};
