//! Category suggestion for the confirmation step

use voice_ledger_config::{Lexicon, ScoringConfig};
use voice_ledger_core::{
    Category, CategoryMatch, CategorySuggester, NewCategoryProposal, TransactionDraft,
    TransactionType,
};
use voice_ledger_text_processing::CategoryMatcher;

/// Re-matches the description against the known categories
///
/// When nothing matches and there is no catch-all, proposes a new category
/// named after the description.
pub struct DefaultCategorySuggester {
    matcher: CategoryMatcher,
}

impl DefaultCategorySuggester {
    pub fn new(lexicon: &Lexicon, scoring: &ScoringConfig) -> Self {
        Self {
            matcher: CategoryMatcher::new(&lexicon.categories, &lexicon.numbers, scoring),
        }
    }
}

impl CategorySuggester for DefaultCategorySuggester {
    fn suggest(&self, draft: &TransactionDraft, categories: &[Category]) -> Option<CategoryMatch> {
        let entities = draft.entities();
        if let Some(category) = &entities.category {
            return Some(category.clone());
        }

        let description = entities.description.as_deref()?;
        if let Some(category) = self.matcher.find_best(&description.to_lowercase(), categories) {
            return Some(CategoryMatch::Existing(category.clone()));
        }

        let kind = entities.transaction_type.unwrap_or(TransactionType::Expense);
        NewCategoryProposal::new(description, kind).map(CategoryMatch::Proposed)
    }
}
