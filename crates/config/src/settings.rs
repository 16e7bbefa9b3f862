//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    category_scoring, confidence, dialogue, memory, status_scoring, type_scoring,
};
use crate::lexicon::Lexicon;
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether configuration fallbacks should be treated as errors
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Extractor scoring weights and thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Draft confidence weights and pattern learning threshold
    #[serde(default)]
    pub confidence: ConfidenceConfig,

    /// Session memory bounds
    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub dialogue: DialogueConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Optional YAML file overriding the built-in lexicon
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

/// Weights used by the transaction type classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeWeights {
    #[serde(default = "default_strong_verb")]
    pub strong_verb: f64,
    #[serde(default = "default_medium_verb")]
    pub medium_verb: f64,
    #[serde(default = "default_noun")]
    pub noun: f64,
    #[serde(default = "default_expression")]
    pub expression: f64,
    #[serde(default = "default_method")]
    pub method: f64,
    #[serde(default = "default_type_pattern")]
    pub pattern: f64,
    #[serde(default = "default_category_context")]
    pub category_context: f64,
}

fn default_strong_verb() -> f64 {
    type_scoring::STRONG_VERB
}
fn default_medium_verb() -> f64 {
    type_scoring::MEDIUM_VERB
}
fn default_noun() -> f64 {
    type_scoring::NOUN
}
fn default_expression() -> f64 {
    type_scoring::EXPRESSION
}
fn default_method() -> f64 {
    type_scoring::METHOD
}
fn default_type_pattern() -> f64 {
    type_scoring::PATTERN
}
fn default_category_context() -> f64 {
    type_scoring::CATEGORY_CONTEXT
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            strong_verb: default_strong_verb(),
            medium_verb: default_medium_verb(),
            noun: default_noun(),
            expression: default_expression(),
            method: default_method(),
            pattern: default_type_pattern(),
            category_context: default_category_context(),
        }
    }
}

/// Weights used by the payment status scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusWeights {
    #[serde(default = "default_status_verb")]
    pub verb: f64,
    #[serde(default = "default_status_expression")]
    pub expression: f64,
    #[serde(default = "default_status_pattern")]
    pub pattern: f64,
}

fn default_status_verb() -> f64 {
    status_scoring::VERB
}
fn default_status_expression() -> f64 {
    status_scoring::EXPRESSION
}
fn default_status_pattern() -> f64 {
    status_scoring::PATTERN
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            verb: default_status_verb(),
            expression: default_status_expression(),
            pattern: default_status_pattern(),
        }
    }
}

/// Weights used by the weighted category matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    #[serde(default = "default_brand")]
    pub brand: f64,
    #[serde(default = "default_place")]
    pub place: f64,
    #[serde(default = "default_service")]
    pub service: f64,
    #[serde(default = "default_keyword")]
    pub keyword: f64,
    #[serde(default = "default_slang")]
    pub slang: f64,
    /// A category's priority is divided by this to get its score multiplier
    #[serde(default = "default_priority_scale")]
    pub priority_scale: f64,
    /// Weighted scores are divided by this before comparison with keyword counts
    #[serde(default = "default_normalization_divisor")]
    pub normalization_divisor: f64,
}

fn default_brand() -> f64 {
    category_scoring::BRAND
}
fn default_place() -> f64 {
    category_scoring::PLACE
}
fn default_service() -> f64 {
    category_scoring::SERVICE
}
fn default_keyword() -> f64 {
    category_scoring::KEYWORD
}
fn default_slang() -> f64 {
    category_scoring::SLANG
}
fn default_priority_scale() -> f64 {
    category_scoring::PRIORITY_SCALE
}
fn default_normalization_divisor() -> f64 {
    category_scoring::NORMALIZATION_DIVISOR
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            place: default_place(),
            service: default_service(),
            keyword: default_keyword(),
            slang: default_slang(),
            priority_scale: default_priority_scale(),
            normalization_divisor: default_normalization_divisor(),
        }
    }
}

/// Extractor scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum score a transaction type needs to win outright
    #[serde(default = "default_type_min_score")]
    pub type_min_score: f64,

    #[serde(default)]
    pub type_weights: TypeWeights,

    #[serde(default)]
    pub status_weights: StatusWeights,

    #[serde(default)]
    pub category_weights: CategoryWeights,
}

fn default_type_min_score() -> f64 {
    type_scoring::MIN_SCORE
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            type_min_score: default_type_min_score(),
            type_weights: TypeWeights::default(),
            status_weights: StatusWeights::default(),
            category_weights: CategoryWeights::default(),
        }
    }
}

/// Aggregate confidence weights
///
/// Each field weight is added when that field was extracted; bonuses are
/// added for colloquialisms, context carry-over and a learned pattern match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    #[serde(default = "default_intent_weight")]
    pub intent: f64,
    #[serde(default = "default_type_weight")]
    pub transaction_type: f64,
    #[serde(default = "default_amount_weight")]
    pub amount: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
    #[serde(default = "default_date_weight")]
    pub date: f64,
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_status_weight")]
    pub status: f64,

    #[serde(default = "default_slang_bonus")]
    pub slang_bonus: f64,
    #[serde(default = "default_context_bonus")]
    pub context_bonus: f64,
    #[serde(default = "default_pattern_bonus")]
    pub pattern_bonus: f64,

    /// Drafts scoring above this are remembered as user patterns
    #[serde(default = "default_learning_threshold")]
    pub learning_threshold: f64,
}

fn default_intent_weight() -> f64 {
    confidence::INTENT
}
fn default_type_weight() -> f64 {
    confidence::TYPE
}
fn default_amount_weight() -> f64 {
    confidence::AMOUNT
}
fn default_description_weight() -> f64 {
    confidence::DESCRIPTION
}
fn default_date_weight() -> f64 {
    confidence::DATE
}
fn default_category_weight() -> f64 {
    confidence::CATEGORY
}
fn default_status_weight() -> f64 {
    confidence::STATUS
}
fn default_slang_bonus() -> f64 {
    confidence::SLANG_BONUS
}
fn default_context_bonus() -> f64 {
    confidence::CONTEXT_BONUS
}
fn default_pattern_bonus() -> f64 {
    confidence::PATTERN_BONUS
}
fn default_learning_threshold() -> f64 {
    confidence::LEARNING_THRESHOLD
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            intent: default_intent_weight(),
            transaction_type: default_type_weight(),
            amount: default_amount_weight(),
            description: default_description_weight(),
            date: default_date_weight(),
            category: default_category_weight(),
            status: default_status_weight(),
            slang_bonus: default_slang_bonus(),
            context_bonus: default_context_bonus(),
            pattern_bonus: default_pattern_bonus(),
            learning_threshold: default_learning_threshold(),
        }
    }
}

impl ConfidenceConfig {
    fn named_values(&self) -> [(&'static str, f64); 11] {
        [
            ("intent", self.intent),
            ("transaction_type", self.transaction_type),
            ("amount", self.amount),
            ("description", self.description),
            ("date", self.date),
            ("category", self.category),
            ("status", self.status),
            ("slang_bonus", self.slang_bonus),
            ("context_bonus", self.context_bonus),
            ("pattern_bonus", self.pattern_bonus),
            ("learning_threshold", self.learning_threshold),
        ]
    }
}

/// Session memory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Recent-turn snapshots kept for context carry-over
    #[serde(default = "default_context_stack_capacity")]
    pub context_stack_capacity: usize,

    /// Learned extractions kept per command shape
    #[serde(default = "default_patterns_per_shape")]
    pub patterns_per_shape: usize,

    /// Processed commands kept in the history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_context_stack_capacity() -> usize {
    memory::CONTEXT_STACK_CAPACITY
}
fn default_patterns_per_shape() -> usize {
    memory::PATTERNS_PER_SHAPE
}
fn default_history_capacity() -> usize {
    memory::HISTORY_CAPACITY
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            context_stack_capacity: default_context_stack_capacity(),
            patterns_per_shape: default_patterns_per_shape(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// How one phrasing is picked among equivalent ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhraseStrategyKind {
    /// Always the first (most formal) variant
    #[default]
    First,
    /// Cycle through the variants
    RoundRobin,
    /// Random pick from a seeded generator
    Seeded,
}

/// Dialogue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Failed replies for a single field before falling back to manual entry
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default)]
    pub phrase_strategy: PhraseStrategyKind,

    /// Seed for the `seeded` strategy; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Append a usage tip to questions
    #[serde(default)]
    pub include_tips: bool,

    /// Amounts above this get the "high amount" type question
    #[serde(default = "default_high_amount_threshold")]
    pub high_amount_threshold: f64,
}

fn default_max_attempts() -> u32 {
    dialogue::MAX_FIELD_ATTEMPTS
}
fn default_high_amount_threshold() -> f64 {
    dialogue::HIGH_AMOUNT_THRESHOLD
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            phrase_strategy: PhraseStrategyKind::default(),
            seed: None,
            include_tips: false,
            high_amount_threshold: default_high_amount_threshold(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_scoring()?;
        self.validate_confidence()?;
        self.validate_memory()?;
        self.validate_dialogue()?;
        Ok(())
    }

    /// The configured lexicon, or the built-in one when no path is set
    pub fn lexicon(&self) -> Result<Lexicon, ConfigError> {
        match &self.lexicon_path {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::pt_br()),
        }
    }

    fn validate_scoring(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;

        if scoring.type_min_score <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.type_min_score".to_string(),
                message: format!("Must be positive, got {}", scoring.type_min_score),
            });
        }

        let weights = &scoring.category_weights;
        if weights.priority_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.category_weights.priority_scale".to_string(),
                message: format!("Must be positive, got {}", weights.priority_scale),
            });
        }
        if weights.normalization_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.category_weights.normalization_divisor".to_string(),
                message: format!("Must be positive, got {}", weights.normalization_divisor),
            });
        }

        let negative = [
            ("scoring.type_weights.strong_verb", scoring.type_weights.strong_verb),
            ("scoring.type_weights.medium_verb", scoring.type_weights.medium_verb),
            ("scoring.type_weights.noun", scoring.type_weights.noun),
            ("scoring.type_weights.expression", scoring.type_weights.expression),
            ("scoring.type_weights.method", scoring.type_weights.method),
            ("scoring.type_weights.pattern", scoring.type_weights.pattern),
            ("scoring.status_weights.verb", scoring.status_weights.verb),
            ("scoring.status_weights.expression", scoring.status_weights.expression),
            ("scoring.status_weights.pattern", scoring.status_weights.pattern),
            ("scoring.category_weights.brand", weights.brand),
            ("scoring.category_weights.keyword", weights.keyword),
        ]
        .into_iter()
        .find(|(_, value)| *value < 0.0);

        if let Some((field, value)) = negative {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("Must not be negative, got {}", value),
            });
        }

        Ok(())
    }

    fn validate_confidence(&self) -> Result<(), ConfigError> {
        for (name, value) in self.confidence.named_values() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: format!("confidence.{}", name),
                    message: format!("Must be between 0.0 and 1.0, got {}", value),
                });
            }
        }
        Ok(())
    }

    fn validate_memory(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("memory.context_stack_capacity", self.memory.context_stack_capacity),
            ("memory.patterns_per_shape", self.memory.patterns_per_shape),
            ("memory.history_capacity", self.memory.history_capacity),
        ];
        for (field, value) in capacities {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_dialogue(&self) -> Result<(), ConfigError> {
        let dialogue = &self.dialogue;

        if dialogue.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.max_attempts".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if dialogue.high_amount_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.high_amount_threshold".to_string(),
                message: format!("Must not be negative, got {}", dialogue.high_amount_threshold),
            });
        }

        if dialogue.phrase_strategy == PhraseStrategyKind::Seeded && dialogue.seed.is_none() {
            if self.environment.is_strict() {
                return Err(ConfigError::MissingField("dialogue.seed".to_string()));
            }
            tracing::warn!("dialogue.phrase_strategy is seeded but no seed is set, using entropy");
        }

        Ok(())
    }
}

/// Load settings from `config/` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from files in `config_dir`, then `VOICE_LEDGER__*` variables
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_file = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_file.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_file = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_file.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("VOICE_LEDGER")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.scoring.type_min_score, 5.0);
        assert_eq!(settings.confidence.learning_threshold, 0.7);
        assert_eq!(settings.memory.context_stack_capacity, 5);
        assert_eq!(settings.memory.patterns_per_shape, 10);
        assert_eq!(settings.dialogue.max_attempts, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_confidence_weights_must_be_fractions() {
        let mut settings = Settings::default();
        settings.confidence.amount = 1.5;
        assert!(settings.validate().is_err());

        settings.confidence.amount = 0.3;
        settings.confidence.learning_threshold = -0.1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_capacities_rejected() {
        let mut settings = Settings::default();
        settings.memory.context_stack_capacity = 0;
        assert!(settings.validate_memory().is_err());
    }

    #[test]
    fn test_dialogue_validation() {
        let mut settings = Settings::default();
        settings.dialogue.max_attempts = 0;
        assert!(settings.validate_dialogue().is_err());

        settings.dialogue.max_attempts = 3;
        settings.dialogue.phrase_strategy = PhraseStrategyKind::Seeded;
        assert!(settings.validate_dialogue().is_ok());

        settings.environment = RuntimeEnvironment::Production;
        assert!(matches!(
            settings.validate_dialogue(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_type_threshold_must_be_positive() {
        let mut settings = Settings::default();
        settings.scoring.type_min_score = 0.0;
        assert!(settings.validate_scoring().is_err());
    }

    #[test]
    fn test_load_settings_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[dialogue]\nmax_attempts = 5\nphrase_strategy = \"round_robin\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "environment = \"staging\"\n[memory]\nhistory_capacity = 50\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.dialogue.max_attempts, 5);
        assert_eq!(settings.dialogue.phrase_strategy, PhraseStrategyKind::RoundRobin);
        assert_eq!(settings.memory.history_capacity, 50);
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.memory.context_stack_capacity, 5);
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[confidence]\namount = 2.0\n").unwrap();

        let result = load_settings_from(dir.path(), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_builtin_lexicon_when_no_path() {
        let settings = Settings::default();
        let lexicon = settings.lexicon().unwrap();
        assert!(!lexicon.money.basic_units.is_empty());
    }
}
