//! Text pipeline for Brazilian-Portuguese voice commands
//!
//! This crate turns a spoken command into structured signals:
//! - **Normalization**: case, punctuation, contractions, misheard words
//! - **Signal extraction**: amount, date, transaction type, payment status,
//!   category and description, each a pure function of the text
//! - **Intent classification**: priority-ordered pattern groups with
//!   intent-specific metadata
//! - **Slang detection** and **recurrence** ("todo dia 10")
//!
//! Every table comes from an injected [`voice_ledger_config::Lexicon`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use voice_ledger_config::{Lexicon, ScoringConfig};
//! use voice_ledger_core::TransactionType;
//! use voice_ledger_text_processing::SignalExtractors;
//!
//! let extractors = SignalExtractors::new(&Lexicon::pt_br(), &ScoringConfig::default());
//! let command = extractors.normalize("Torrei cinquenta pau no Uber");
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let entities = extractors.extract(&command, &[], today);
//!
//! assert_eq!(entities.transaction_type, Some(TransactionType::Expense));
//! assert_eq!(entities.amount.map(|a| a.centavos()), Some(5000));
//! ```

pub mod amount;
pub mod category;
pub mod date;
pub mod description;
pub mod intent;
pub mod normalizer;
pub mod numbers;
pub mod phrases;
pub mod recurrence;
pub mod slang;
pub mod status;
pub mod transaction_type;

mod extractors;

pub use extractors::SignalExtractors;

pub use amount::AmountExtractor;
pub use category::CategoryMatcher;
pub use date::DateExtractor;
pub use description::{capitalize, DescriptionExtractor};
pub use intent::IntentClassifier;
pub use normalizer::Normalizer;
pub use numbers::{normalize_digital, NumberWords};
pub use phrases::{alternation, phrase_regex, PhraseSet};
pub use recurrence::{extract_recurrence, strip_recurrence};
pub use slang::{SlangDetector, SlangUsage};
pub use status::StatusExtractor;
pub use transaction_type::{TypeExtractor, TypeScores};
