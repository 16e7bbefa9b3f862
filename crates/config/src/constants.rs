//! Default tuning values for the voice ledger
//!
//! Every threshold and weight used by the extractors, the orchestrator and
//! the dialogue lives here and is overridable through [`crate::Settings`].

/// Transaction type classifier
pub mod type_scoring {
    /// Minimum winning score before the direct-keyword fallback is used
    pub const MIN_SCORE: f64 = 5.0;

    pub const STRONG_VERB: f64 = 10.0;
    pub const MEDIUM_VERB: f64 = 8.0;
    pub const NOUN: f64 = 6.0;
    pub const EXPRESSION: f64 = 5.0;
    pub const METHOD: f64 = 4.0;
    /// Each matching legacy regex pattern
    pub const PATTERN: f64 = 5.0;
    /// Each keyword hit in an expense- or income-leaning category group
    pub const CATEGORY_CONTEXT: f64 = 1.0;
}

/// Payment status scorer
pub mod status_scoring {
    pub const VERB: f64 = 10.0;
    pub const EXPRESSION: f64 = 8.0;
    pub const PATTERN: f64 = 5.0;
}

/// Weighted category matcher
pub mod category_scoring {
    pub const BRAND: f64 = 10.0;
    pub const PLACE: f64 = 7.0;
    pub const SERVICE: f64 = 7.0;
    pub const KEYWORD: f64 = 5.0;
    pub const SLANG: f64 = 3.0;
    /// Priority is divided by this before scaling the raw score
    pub const PRIORITY_SCALE: f64 = 10.0;
    /// Weighted scores are divided by this to compare with keyword counts
    pub const NORMALIZATION_DIVISOR: f64 = 10.0;
}

/// Aggregate draft confidence
pub mod confidence {
    pub const INTENT: f64 = 0.05;
    pub const TYPE: f64 = 0.20;
    pub const AMOUNT: f64 = 0.30;
    pub const DESCRIPTION: f64 = 0.15;
    pub const DATE: f64 = 0.10;
    pub const CATEGORY: f64 = 0.15;
    pub const STATUS: f64 = 0.05;

    pub const SLANG_BONUS: f64 = 0.05;
    pub const CONTEXT_BONUS: f64 = 0.05;
    pub const PATTERN_BONUS: f64 = 0.10;

    /// Drafts above this confidence are remembered as user patterns
    pub const LEARNING_THRESHOLD: f64 = 0.7;
}

/// Intent classifier confidence
pub mod intent_scoring {
    pub const BASE: f64 = 0.5;
    pub const STRONG_KEYWORD: f64 = 0.15;
    pub const REFERENCE: f64 = 0.2;
    /// Confidence for recurrence and generic transaction phrasing
    pub const PATTERN_MATCH: f64 = 0.7;
}

/// Session memory bounds
pub mod memory {
    pub const CONTEXT_STACK_CAPACITY: usize = 5;
    pub const PATTERNS_PER_SHAPE: usize = 10;
    pub const HISTORY_CAPACITY: usize = 20;
}

/// Dialogue behaviour
pub mod dialogue {
    /// Failed replies for one field before falling back to manual entry
    pub const MAX_FIELD_ATTEMPTS: u32 = 3;
    /// Amounts above this use the "high" type question
    pub const HIGH_AMOUNT_THRESHOLD: f64 = 500.0;
}

/// Amount sanity bounds
pub mod amounts {
    pub const MAX_AMOUNT: f64 = 999_999_999_999_999.0;
    /// Minimum when the utterance says "mil"
    pub const THOUSAND_CONTEXT_MIN: f64 = 1000.0;
}
