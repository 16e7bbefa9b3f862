//! Expense vs. income classification
//!
//! Every signal list in the lexicon contributes `hits * weight` to its
//! type's score. Phrase groups score once per group. Category keyword
//! groups add a small nudge toward the type they lean to ("salário" leans
//! income, "mercado" leans expense).
//!
//! A negated verb short-circuits the scoring: "não recebi" is an expense,
//! "não paguei" is income.

use regex::Regex;

use voice_ledger_config::{CategoryLexicon, ScoringConfig, TypeLexicon, TypeSignals, TypeWeights};
use voice_ledger_core::TransactionType;

use crate::phrases::{alternation, PhraseSet};

/// Scores computed for a command
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypeScores {
    pub expense: f64,
    pub income: f64,
}

struct SignalSets {
    strong_verbs: PhraseSet,
    medium_verbs: PhraseSet,
    nouns: PhraseSet,
    expressions: PhraseSet,
    methods: PhraseSet,
    patterns: Vec<PhraseSet>,
}

impl SignalSets {
    fn new(signals: &TypeSignals) -> Self {
        Self {
            strong_verbs: PhraseSet::new(&signals.strong_verbs),
            medium_verbs: PhraseSet::new(&signals.medium_verbs),
            nouns: PhraseSet::new(&signals.nouns),
            expressions: PhraseSet::new(&signals.expressions),
            methods: PhraseSet::new(&signals.methods),
            patterns: signals.patterns.iter().map(PhraseSet::new).collect(),
        }
    }

    fn score(&self, text: &str, weights: &TypeWeights) -> f64 {
        let groups = self.patterns.iter().filter(|g| g.contains_any(text)).count();

        self.strong_verbs.count(text) as f64 * weights.strong_verb
            + self.medium_verbs.count(text) as f64 * weights.medium_verb
            + self.nouns.count(text) as f64 * weights.noun
            + self.expressions.count(text) as f64 * weights.expression
            + self.methods.count(text) as f64 * weights.method
            + groups as f64 * weights.pattern
    }
}

pub struct TypeExtractor {
    expense: SignalSets,
    income: SignalSets,
    category_context: Vec<(PhraseSet, TransactionType)>,
    negated_income: Option<Regex>,
    negated_expense: Option<Regex>,
    fallback_expense: PhraseSet,
    fallback_income: PhraseSet,
    weights: TypeWeights,
    min_score: f64,
}

impl TypeExtractor {
    pub fn new(types: &TypeLexicon, categories: &CategoryLexicon, scoring: &ScoringConfig) -> Self {
        let category_context = categories
            .keyword_groups
            .iter()
            .filter_map(|group| group.leans.map(|kind| (PhraseSet::new(&group.keywords), kind)))
            .collect();

        let markers = alternation(types.negation.markers.iter().map(String::as_str));
        let negated = |verbs: &[String]| -> Option<Regex> {
            let verbs = alternation(verbs.iter().map(String::as_str));
            if markers.is_empty() || verbs.is_empty() {
                return None;
            }
            Regex::new(&format!(
                r"(?:^|[^\w])(?:{})\s+(?:{})(?:[^\w]|$)",
                markers, verbs
            ))
            .ok()
        };

        Self {
            expense: SignalSets::new(&types.expense),
            income: SignalSets::new(&types.income),
            category_context,
            negated_income: negated(&types.negation.income_verbs),
            negated_expense: negated(&types.negation.expense_verbs),
            fallback_expense: PhraseSet::new(&types.fallback.expense),
            fallback_income: PhraseSet::new(&types.fallback.income),
            weights: scoring.type_weights.clone(),
            min_score: scoring.type_min_score,
        }
    }

    pub fn scores(&self, text: &str) -> TypeScores {
        let mut scores = TypeScores {
            expense: self.expense.score(text, &self.weights),
            income: self.income.score(text, &self.weights),
        };

        for (keywords, leans) in &self.category_context {
            let nudge = keywords.count(text) as f64 * self.weights.category_context;
            match leans {
                TransactionType::Expense => scores.expense += nudge,
                TransactionType::Income => scores.income += nudge,
            }
        }

        scores
    }

    pub fn extract(&self, text: &str) -> Option<TransactionType> {
        if self.negated_income.as_ref().is_some_and(|re| re.is_match(text)) {
            tracing::debug!("negated income verb, reading as expense");
            return Some(TransactionType::Expense);
        }
        if self.negated_expense.as_ref().is_some_and(|re| re.is_match(text)) {
            tracing::debug!("negated expense verb, reading as income");
            return Some(TransactionType::Income);
        }

        let scores = self.scores(text);
        tracing::debug!(expense = scores.expense, income = scores.income, "type scores");

        if scores.expense > scores.income && scores.expense >= self.min_score {
            return Some(TransactionType::Expense);
        }
        if scores.income > scores.expense && scores.income >= self.min_score {
            return Some(TransactionType::Income);
        }

        if self.fallback_income.contains_any(text) {
            Some(TransactionType::Income)
        } else if self.fallback_expense.contains_any(text) {
            Some(TransactionType::Expense)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TypeExtractor {
        TypeExtractor::new(
            &TypeLexicon::default(),
            &CategoryLexicon::default(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_expense_verbs() {
        let types = extractor();
        assert_eq!(types.extract("gastei 50 no mercado"), Some(TransactionType::Expense));
        assert_eq!(types.extract("torrei cem pau na balada"), Some(TransactionType::Expense));
        assert_eq!(types.extract("paguei a conta de luz"), Some(TransactionType::Expense));
    }

    #[test]
    fn test_income_verbs() {
        let types = extractor();
        assert_eq!(types.extract("recebi 3 mil de salário"), Some(TransactionType::Income));
        assert_eq!(types.extract("ganhei 200 reais"), Some(TransactionType::Income));
    }

    #[test]
    fn test_negation_flips_type() {
        let types = extractor();
        assert_eq!(types.extract("não recebi o pagamento"), Some(TransactionType::Expense));
        assert_eq!(types.extract("nao paguei nada"), Some(TransactionType::Income));
    }

    #[test]
    fn test_unknown_type() {
        let types = extractor();
        assert_eq!(types.extract("cinquenta reais"), None);
        assert_eq!(types.extract(""), None);
    }

    #[test]
    fn test_scores_favor_matching_type() {
        let scores = extractor().scores("gastei no mercado");
        assert!(scores.expense > scores.income);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut scoring = ScoringConfig::default();
        scoring.type_min_score = 1000.0;
        let types = TypeExtractor::new(&TypeLexicon::default(), &CategoryLexicon::default(), &scoring);
        // Below threshold, the fallback keywords still decide
        assert_eq!(types.extract("gastei 50"), Some(TransactionType::Expense));
        assert_eq!(types.extract("comprei pão"), None);
    }
}
