//! Word tables for Brazilian-Portuguese voice commands
//!
//! The lexicon is pure data: money slang, number words, transaction and
//! payment-status signals, category keyword groups, normalization tables
//! and the prompt catalog. Extractors receive it at construction time.
//!
//! Every phrase is matched against *normalized* text, so entries must be
//! lowercase with contractions already expanded (`para`, not `pra`;
//! `estou devendo`, not `tô devendo`).
//!
//! [`Lexicon::pt_br`] returns the built-in tables. A YAML file loaded with
//! [`Lexicon::load`] may override any section; sections it leaves out keep
//! their built-in values.

mod categories;
mod language;
mod money;
mod prompts;
mod signals;

pub use categories::{CategoryAlias, CategoryLexicon, KeywordGroup, WeightedCategory};
pub use language::{
    DateLexicon, DescriptionLexicon, DialogueLexicon, NormalizationLexicon, RelativeDay,
    Replacement, SlangLexicon,
};
pub use money::{MoneyLexicon, NoteValue, NumberLexicon, ValuePhrase};
pub use prompts::{
    Acknowledgments, AmountBucket, CategoryHint, ConfirmationTemplate, ContextualQuestions,
    DateBuckets, ErrorMessages, PromptCatalog,
};
pub use signals::{NegationRules, StatusBucket, StatusLexicon, TypeLexicon, TypeSignals};

use serde::{Deserialize, Serialize};
use std::path::Path;
use voice_ledger_core::{Field, PaymentStatus, TransactionType};

use crate::ConfigError;

/// All tables used by the text pipeline and the dialogue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub normalization: NormalizationLexicon,
    #[serde(default)]
    pub numbers: NumberLexicon,
    #[serde(default)]
    pub money: MoneyLexicon,
    #[serde(default)]
    pub dates: DateLexicon,
    #[serde(default)]
    pub transaction_types: TypeLexicon,
    #[serde(default)]
    pub status: StatusLexicon,
    #[serde(default)]
    pub categories: CategoryLexicon,
    #[serde(default)]
    pub description: DescriptionLexicon,
    #[serde(default)]
    pub slang: SlangLexicon,
    #[serde(default)]
    pub dialogue: DialogueLexicon,
    #[serde(default)]
    pub prompts: PromptCatalog,
}

impl Lexicon {
    /// Built-in Brazilian-Portuguese tables
    pub fn pt_br() -> Self {
        Self::default()
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let lexicon = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let lexicon: Self = serde_yaml::from_str(content)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Check the tables the dialogue cannot work without
    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in Field::REQUIRED {
            let has_question = self
                .prompts
                .questions
                .get(&field)
                .is_some_and(|q| !q.is_empty());
            if !has_question {
                return Err(ConfigError::MissingField(format!(
                    "prompts.questions.{}",
                    field
                )));
            }
        }

        if self.numbers.units.is_empty() {
            return Err(ConfigError::MissingField("numbers.units".to_string()));
        }

        if let Some(category) = self
            .categories
            .weighted
            .iter()
            .find(|c| c.priority <= 0.0)
        {
            return Err(ConfigError::InvalidValue {
                field: format!("categories.weighted.{}.priority", category.slug),
                message: format!("Must be positive, got {}", category.priority),
            });
        }

        Ok(())
    }
}

/// A value per transaction type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByType<T> {
    pub expense: T,
    pub income: T,
}

impl<T> ByType<T> {
    pub fn get(&self, kind: TransactionType) -> &T {
        match kind {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
        }
    }
}

/// A value per payment status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByStatus<T> {
    pub paid: T,
    pub pending: T,
}

impl<T> ByStatus<T> {
    pub fn get(&self, status: PaymentStatus) -> &T {
        match status {
            PaymentStatus::Paid => &self.paid,
            PaymentStatus::Pending => &self.pending,
        }
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
