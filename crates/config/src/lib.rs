//! Configuration for the voice ledger
//!
//! Two kinds of configuration live here:
//! - [`Settings`]: tuning values (thresholds, weights, capacities, dialogue
//!   behaviour) loaded from `config/default`, `config/{env}` and
//!   `VOICE_LEDGER__*` environment variables
//! - [`Lexicon`]: the Brazilian-Portuguese word tables and prompt texts the
//!   extractors and the dialogue read from, built in or loaded from YAML
//!
//! Both are immutable once built and are handed to the components that need
//! them; nothing in this crate is global.

pub mod constants;
pub mod lexicon;
pub mod settings;

pub use lexicon::{
    ByStatus, ByType, CategoryAlias, CategoryHint, CategoryLexicon, ContextualQuestions,
    DateLexicon, DescriptionLexicon, DialogueLexicon, ErrorMessages, KeywordGroup, Lexicon,
    MoneyLexicon, NegationRules, NormalizationLexicon, NoteValue, NumberLexicon, PromptCatalog,
    RelativeDay, Replacement, SlangLexicon, StatusBucket, StatusLexicon, TypeLexicon, TypeSignals,
    ValuePhrase, WeightedCategory,
};
pub use settings::{
    load_settings, load_settings_from, CategoryWeights, ConfidenceConfig, DialogueConfig, MemoryConfig,
    ObservabilityConfig, PhraseStrategyKind, RuntimeEnvironment, ScoringConfig, Settings,
    StatusWeights, TypeWeights,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
