//! All signal extractors built from one lexicon

use chrono::NaiveDate;

use voice_ledger_config::{Lexicon, ScoringConfig};
use voice_ledger_core::{Category, ExtractedEntities, NormalizedCommand};

use crate::amount::AmountExtractor;
use crate::category::CategoryMatcher;
use crate::date::DateExtractor;
use crate::description::DescriptionExtractor;
use crate::intent::IntentClassifier;
use crate::normalizer::Normalizer;
use crate::recurrence::extract_recurrence;
use crate::slang::SlangDetector;
use crate::status::StatusExtractor;
use crate::transaction_type::TypeExtractor;

/// Normalizer, classifier and one extractor per entity kind
///
/// Built once per lexicon; every method is a pure function of its input.
pub struct SignalExtractors {
    pub normalizer: Normalizer,
    pub intent: IntentClassifier,
    pub amount: AmountExtractor,
    pub date: DateExtractor,
    pub transaction_type: TypeExtractor,
    pub status: StatusExtractor,
    pub category: CategoryMatcher,
    pub description: DescriptionExtractor,
    pub slang: SlangDetector,
}

impl SignalExtractors {
    pub fn new(lexicon: &Lexicon, scoring: &ScoringConfig) -> Self {
        Self {
            normalizer: Normalizer::new(&lexicon.normalization),
            intent: IntentClassifier::new(),
            amount: AmountExtractor::new(&lexicon.numbers, &lexicon.money),
            date: DateExtractor::new(&lexicon.dates),
            transaction_type: TypeExtractor::new(
                &lexicon.transaction_types,
                &lexicon.categories,
                scoring,
            ),
            status: StatusExtractor::new(&lexicon.status, scoring),
            category: CategoryMatcher::new(&lexicon.categories, &lexicon.numbers, scoring),
            description: DescriptionExtractor::new(
                &lexicon.description,
                &lexicon.numbers,
                &lexicon.money,
            ),
            slang: SlangDetector::new(&lexicon.slang),
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedCommand {
        self.normalizer.normalize(text)
    }

    /// Run every extractor on a normalized command
    ///
    /// The category is a directive or scored match only; the catch-all is
    /// left for the caller to apply after its own fallbacks.
    pub fn extract(
        &self,
        command: &NormalizedCommand,
        categories: &[Category],
        today: NaiveDate,
    ) -> ExtractedEntities {
        let text = command.as_str();
        let transaction_type = self.transaction_type.extract(text);

        ExtractedEntities {
            transaction_type,
            amount: self.amount.extract_amount(text),
            description: self.description.extract(text),
            date: Some(self.date.extract(text, today)),
            status: Some(self.status.extract(text)),
            category: self.category.find_match(text, categories, transaction_type),
            recurring: extract_recurrence(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::{Field, PaymentStatus, TransactionType};

    fn extractors() -> SignalExtractors {
        SignalExtractors::new(&Lexicon::pt_br(), &ScoringConfig::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_full_command() {
        let x = extractors();
        let categories = vec![Category::new(
            "1",
            "Alimentação",
            "alimentacao",
            TransactionType::Expense,
        )];
        let command = x.normalize("Gastei 50 reais no mercado ontem");
        let entities = x.extract(&command, &categories, today());

        assert_eq!(entities.transaction_type, Some(TransactionType::Expense));
        assert_eq!(entities.amount.map(|a| a.centavos()), Some(5000));
        assert_eq!(entities.description.as_deref(), Some("Mercado"));
        assert_eq!(entities.date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(entities.status, Some(PaymentStatus::Pending));
        assert_eq!(entities.category.as_ref().map(|c| c.slug()), Some("alimentacao"));
        assert!(entities.missing_fields().is_empty());
    }

    #[test]
    fn test_bare_verb_leaves_fields_missing() {
        let x = extractors();
        let entities = x.extract(&x.normalize("gastei"), &[], today());
        assert_eq!(entities.transaction_type, Some(TransactionType::Expense));
        assert_eq!(entities.missing_fields(), vec![Field::Amount, Field::Description]);
        assert_eq!(entities.date, Some(today()));
    }

    #[test]
    fn test_recurring_command() {
        let x = extractors();
        let entities = x.extract(&x.normalize("Netflix todo dia 15, 55 reais"), &[], today());
        assert_eq!(entities.recurring.map(|r| r.day), Some(15));
        assert_eq!(entities.amount.map(|a| a.centavos()), Some(5500));
    }
}
