//! Category matching against the caller's category list
//!
//! Two scorers run side by side:
//!
//! - a weighted scorer over brands, places, services, keywords and slang,
//!   scaled by each category's priority
//! - a flat keyword-group scorer that counts hits per group
//!
//! The weighted score is normalized before the two are compared; ties go to
//! the weighted scorer. When neither finds anything, the catch-all category
//! ("Outros") is used if the caller has one.
//!
//! An explicit "categoria X" in the command bypasses scoring: `X` is looked
//! up by name and proposed as a new category when missing.

use std::cmp::Ordering;

use voice_ledger_config::{CategoryLexicon, CategoryWeights, NumberLexicon, ScoringConfig, WeightedCategory};
use voice_ledger_core::{slugify, Category, CategoryMatch, NewCategoryProposal, TransactionType};

use crate::description::capitalize;
use crate::phrases::PhraseSet;

/// Words that end the name after "categoria"
const DIRECTIVE_STOP_WORDS: &[&str] = &[
    "de", "do", "da", "em", "no", "na", "com", "para", "pro", "o", "a", "e", "hoje", "ontem",
    "amanhã", "amanha", "já", "pago", "paga", "pendente", "reais", "real",
];

const DIRECTIVE_MAX_WORDS: usize = 3;

struct WeightedSets {
    slug: String,
    priority: f64,
    brands: PhraseSet,
    places: PhraseSet,
    services: PhraseSet,
    keywords: PhraseSet,
    slang: PhraseSet,
}

impl WeightedSets {
    fn new(category: &WeightedCategory) -> Self {
        Self {
            slug: category.slug.to_lowercase(),
            priority: category.priority,
            brands: PhraseSet::new(&category.brands),
            places: PhraseSet::new(&category.places),
            services: PhraseSet::new(&category.services),
            keywords: PhraseSet::new(&category.keywords),
            slang: PhraseSet::new(&category.slang),
        }
    }

    fn score(&self, text: &str, weights: &CategoryWeights) -> f64 {
        let raw = self.brands.count(text) as f64 * weights.brand
            + self.places.count(text) as f64 * weights.place
            + self.services.count(text) as f64 * weights.service
            + self.keywords.count(text) as f64 * weights.keyword
            + self.slang.count(text) as f64 * weights.slang;
        raw * self.priority / weights.priority_scale
    }
}

struct KeywordSets {
    name_slug: String,
    keywords: PhraseSet,
}

pub struct CategoryMatcher {
    lexicon: CategoryLexicon,
    numbers: NumberLexicon,
    weighted: Vec<WeightedSets>,
    groups: Vec<KeywordSets>,
    weights: CategoryWeights,
}

impl CategoryMatcher {
    pub fn new(lexicon: &CategoryLexicon, numbers: &NumberLexicon, scoring: &ScoringConfig) -> Self {
        Self {
            lexicon: lexicon.clone(),
            numbers: numbers.clone(),
            weighted: lexicon.weighted.iter().map(WeightedSets::new).collect(),
            groups: lexicon
                .keyword_groups
                .iter()
                .map(|group| KeywordSets {
                    name_slug: slugify(&group.name),
                    keywords: PhraseSet::new(&group.keywords),
                })
                .collect(),
            weights: scoring.category_weights.clone(),
        }
    }

    /// Category for a command: explicit directive, scoring, then the catch-all
    ///
    /// `draft_type` becomes the type of a proposed category.
    pub fn extract(
        &self,
        text: &str,
        categories: &[Category],
        draft_type: Option<TransactionType>,
    ) -> Option<CategoryMatch> {
        self.find_match(text, categories, draft_type).or_else(|| {
            self.fallback(categories)
                .map(|c| CategoryMatch::Existing(c.clone()))
        })
    }

    /// Directive or scored match, without the catch-all
    pub fn find_match(
        &self,
        text: &str,
        categories: &[Category],
        draft_type: Option<TransactionType>,
    ) -> Option<CategoryMatch> {
        if let Some(name) = self.directive(text) {
            return Some(match self.find_by_name(&name, categories) {
                Some(category) => CategoryMatch::Existing(category.clone()),
                None => {
                    let kind = draft_type.unwrap_or(TransactionType::Expense);
                    let proposal = NewCategoryProposal::new(name, kind)?;
                    tracing::debug!(slug = %proposal.slug, "proposing new category");
                    CategoryMatch::Proposed(proposal)
                }
            });
        }

        self.best_match(text, categories)
            .map(|c| CategoryMatch::Existing(c.clone()))
    }

    /// Best scoring category, falling back to the catch-all
    pub fn find_best<'a>(&self, text: &str, categories: &'a [Category]) -> Option<&'a Category> {
        self.best_match(text, categories)
            .or_else(|| self.fallback(categories))
    }

    /// Best scoring category without the catch-all
    pub fn best_match<'a>(&self, text: &str, categories: &'a [Category]) -> Option<&'a Category> {
        if categories.is_empty() || text.trim().is_empty() {
            return None;
        }

        let weighted = self.weighted_match(text, categories);
        let keyword = self.keyword_match(text, categories);

        match (weighted, keyword) {
            (Some((w, w_score)), Some((k, k_hits))) => {
                let normalized = w_score / self.weights.normalization_divisor;
                if normalized >= k_hits as f64 {
                    Some(w)
                } else {
                    Some(k)
                }
            }
            (Some((w, _)), None) => Some(w),
            (None, Some((k, _))) => Some(k),
            (None, None) => None,
        }
    }

    /// The caller's catch-all category, if any
    pub fn fallback<'a>(&self, categories: &'a [Category]) -> Option<&'a Category> {
        categories.iter().find(|c| {
            let name = c.name.to_lowercase();
            let slug = c.slug.to_lowercase();
            self.lexicon
                .fallback_names
                .iter()
                .any(|f| *f == name || *f == slug)
        })
    }

    /// Category with this name or slug, aliases included
    pub fn find_by_name<'a>(&self, name: &str, categories: &'a [Category]) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        let slug = slugify(name);
        if slug.is_empty() {
            return None;
        }

        categories
            .iter()
            .find(|c| c.slug.to_lowercase() == slug || c.name.to_lowercase() == lower)
            .or_else(|| self.resolve_slug(&self.lexicon.canonical_slug(name), categories))
    }

    /// Name following "categoria" in the command, if any
    pub fn directive(&self, text: &str) -> Option<String> {
        let mut words = text.split_whitespace().skip_while(|w| *w != "categoria");
        words.next()?;

        let name: Vec<&str> = words
            .skip_while(|w| matches!(*w, "de" | "do" | "da"))
            .take_while(|w| !self.is_stop_word(w))
            .take(DIRECTIVE_MAX_WORDS)
            .collect();

        if name.is_empty() {
            return None;
        }
        Some(capitalize(&name.join(" ")))
    }

    fn is_stop_word(&self, word: &str) -> bool {
        DIRECTIVE_STOP_WORDS.contains(&word)
            || word.starts_with(|c: char| c.is_ascii_digit())
            || self.numbers.is_number_word(word)
    }

    fn weighted_match<'a>(&self, text: &str, categories: &'a [Category]) -> Option<(&'a Category, f64)> {
        let mut scored: Vec<(&WeightedSets, f64)> = self
            .weighted
            .iter()
            .map(|sets| (sets, sets.score(text, &self.weights)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored.into_iter().find_map(|(sets, score)| {
            let category = self.resolve_slug(&sets.slug, categories)?;
            tracing::debug!(slug = %sets.slug, score, "weighted category match");
            Some((category, score))
        })
    }

    fn keyword_match<'a>(&self, text: &str, categories: &'a [Category]) -> Option<(&'a Category, usize)> {
        let mut best: Option<(&Category, usize)> = None;

        for group in &self.groups {
            let hits = group.keywords.count(text);
            if hits == 0 || best.is_some_and(|(_, b)| hits <= b) {
                continue;
            }
            let found = categories.iter().find(|c| {
                slugify(&c.name).contains(&group.name_slug)
                    || slugify(&c.slug).contains(&group.name_slug)
            });
            if let Some(category) = found {
                best = Some((category, hits));
            }
        }

        best
    }

    /// First caller category a canonical slug resolves to
    fn resolve_slug<'a>(&self, slug: &str, categories: &'a [Category]) -> Option<&'a Category> {
        if slug.is_empty() {
            return None;
        }
        categories
            .iter()
            .find(|c| c.slug.to_lowercase() == slug)
            .or_else(|| {
                categories
                    .iter()
                    .find(|c| self.lexicon.canonical_slug(&c.name) == slug)
            })
            .or_else(|| categories.iter().find(|c| c.name.to_lowercase().contains(slug)))
            .or_else(|| categories.iter().find(|c| c.slug.to_lowercase().contains(slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("1", "Alimentação", "alimentacao", TransactionType::Expense),
            Category::new("2", "Transporte", "transporte", TransactionType::Expense),
            Category::new("3", "Saúde", "saude", TransactionType::Expense),
            Category::new("4", "Salário", "salario", TransactionType::Income),
            Category::new("5", "Outros", "outros", TransactionType::Expense),
        ]
    }

    fn matcher() -> CategoryMatcher {
        CategoryMatcher::new(
            &CategoryLexicon::default(),
            &NumberLexicon::default(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_weighted_match() {
        let cats = categories();
        let m = matcher();
        assert_eq!(m.find_best("gastei 50 no mercado", &cats).unwrap().slug, "alimentacao");
        assert_eq!(m.find_best("corrida de uber", &cats).unwrap().slug, "transporte");
        assert_eq!(m.find_best("comprei remédio na farmácia", &cats).unwrap().slug, "saude");
    }

    #[test]
    fn test_fallback_category() {
        let cats = categories();
        let m = matcher();
        assert!(m.best_match("paguei o bagulho", &cats).is_none());
        assert_eq!(m.find_best("paguei o bagulho", &cats).unwrap().slug, "outros");
    }

    #[test]
    fn test_no_categories() {
        assert!(matcher().find_best("gastei no mercado", &[]).is_none());
    }

    #[test]
    fn test_directive() {
        let m = matcher();
        assert_eq!(m.directive("gastei 30 categoria de pets hoje").as_deref(), Some("Pets"));
        assert_eq!(
            m.directive("categoria festa junina 50 reais").as_deref(),
            Some("Festa junina")
        );
        assert_eq!(m.directive("categoria"), None);
        assert_eq!(m.directive("gastei no mercado"), None);
    }

    #[test]
    fn test_directive_resolves_existing_category() {
        let cats = categories();
        let result = matcher()
            .extract("gastei 20 categoria transporte", &cats, Some(TransactionType::Expense))
            .unwrap();
        assert_eq!(result.existing().map(|c| c.id.as_str()), Some("2"));
    }

    #[test]
    fn test_directive_proposes_missing_category() {
        let cats = categories();
        let result = matcher()
            .extract("recebi 100 categoria vendas", &cats, Some(TransactionType::Income))
            .unwrap();
        let proposal = result.proposal().unwrap();
        assert_eq!(proposal.name, "Vendas");
        assert_eq!(proposal.slug, "vendas");
        assert_eq!(proposal.kind, TransactionType::Income);
    }

    #[test]
    fn test_extract_falls_back_to_catch_all() {
        let cats = categories();
        let m = matcher();
        assert!(m.find_match("paguei o bagulho", &cats, None).is_none());
        let result = m.extract("paguei o bagulho", &cats, None).unwrap();
        assert_eq!(result.slug(), "outros");
    }

    #[test]
    fn test_find_by_alias() {
        let cats = categories();
        let m = matcher();
        assert_eq!(m.find_by_name("comida", &cats).unwrap().slug, "alimentacao");
        assert_eq!(m.find_by_name("saúde", &cats).unwrap().slug, "saude");
        assert!(m.find_by_name("pets", &cats).is_none());
    }
}
