//! Command orchestration
//!
//! Turns one raw utterance into a [`TransactionDraft`]:
//!
//! 1. normalize the text and record it in the command history
//! 2. classify the intent and run every signal extractor
//! 3. enhance with context: inherit the type from the previous turn or from
//!    a strong verb, re-match the category against the description alone,
//!    then fall back to the catch-all or a proposed new category
//! 4. score confidence as a weighted sum of the fields found plus bonuses
//! 5. push a context snapshot and, above the learning threshold, remember
//!    the command shape
//!
//! One orchestrator serves one voice session and owns that session's memory.

use std::sync::Arc;

use chrono::NaiveDate;

use voice_ledger_config::{ByType, ConfidenceConfig, Lexicon, Settings};
use voice_ledger_core::{
    Category, CategoryMatch, Clock, Command, DraftMetadata, ExtractedEntities,
    NewCategoryProposal, NormalizedCommand, Result, SystemClock, TransactionDraft,
    TransactionType,
};
use voice_ledger_text_processing::{PhraseSet, SignalExtractors};

use crate::memory::{CommandHistory, ContextEntry, ContextStack, PatternExport, PatternMemo};

/// What context enhancement changed
#[derive(Debug, Clone, Copy, Default)]
struct Enhancement {
    enhanced: bool,
}

pub struct Orchestrator {
    lexicon: Arc<Lexicon>,
    extractors: SignalExtractors,
    confidence: ConfidenceConfig,
    context_verbs: ByType<PhraseSet>,
    categories: Vec<Category>,
    clock: Arc<dyn Clock>,
    context: ContextStack,
    patterns: PatternMemo,
    history: CommandHistory,
}

impl Orchestrator {
    pub fn new(lexicon: Arc<Lexicon>, settings: &Settings) -> Self {
        let verbs = &lexicon.transaction_types.context_verbs;
        Self {
            extractors: SignalExtractors::new(&lexicon, &settings.scoring),
            confidence: settings.confidence.clone(),
            context_verbs: ByType {
                expense: PhraseSet::new(&verbs.expense),
                income: PhraseSet::new(&verbs.income),
            },
            categories: Vec::new(),
            clock: Arc::new(SystemClock),
            context: ContextStack::new(settings.memory.context_stack_capacity),
            patterns: PatternMemo::new(settings.memory.patterns_per_shape, &lexicon.money),
            history: CommandHistory::new(settings.memory.history_capacity),
            lexicon,
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn extractors(&self) -> &SignalExtractors {
        &self.extractors
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Replace the known categories, e.g. after the host created one
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn context_stack(&self) -> &ContextStack {
        &self.context
    }

    pub fn patterns(&self) -> &PatternMemo {
        &self.patterns
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Process one command into a draft, updating session memory
    pub fn process(&mut self, command: &Command) -> TransactionDraft {
        let normalized = self.extractors.normalize(command.text());
        let intent = self.extractors.intent.classify(normalized.as_str());
        let now = self.clock.now();
        self.history.record(command.text(), &normalized, intent.intent, now);

        let mut entities = self.analyze(&normalized);
        let slang = self.extractors.slang.detect(normalized.as_str());
        let pattern_matched = self.patterns.lookup(&normalized).is_some();

        let enhancement = self.enhance(&mut entities, &normalized);
        self.context.push(ContextEntry::new(
            entities.transaction_type,
            entities.category.as_ref().map(|c| c.slug().to_string()),
            entities.amount,
            now,
        ));

        let metadata = DraftMetadata {
            slang_detected: slang.any(),
            context_enhanced: enhancement.enhanced,
            pattern_matched,
            processed_at: now,
        };
        let confidence = self.score(&entities, &metadata);

        if confidence > self.confidence.learning_threshold {
            self.patterns.learn(
                &normalized,
                entities.transaction_type,
                entities.category.as_ref().map(|c| c.slug().to_string()),
                now,
            );
        }

        let draft = TransactionDraft::new(
            intent,
            entities,
            command.context(),
            command.text(),
            normalized,
        )
        .with_confidence(confidence)
        .with_metadata(metadata);

        tracing::debug!(
            intent = %draft.intent.intent,
            confidence = draft.confidence,
            missing = ?draft.missing_fields(),
            context_enhanced = draft.metadata.context_enhanced,
            "command processed"
        );
        draft
    }

    /// Run the extractors on a normalized command without touching memory
    pub fn analyze(&self, command: &NormalizedCommand) -> ExtractedEntities {
        self.extractors.extract(command, &self.categories, self.today())
    }

    /// Normalize and analyze a dialogue reply without touching memory
    pub fn analyze_reply(&self, text: &str) -> ExtractedEntities {
        self.analyze(&self.extractors.normalize(text))
    }

    /// Forget the session: context, learned patterns and history
    pub fn reset(&mut self) {
        self.context.clear();
        self.patterns.clear();
        self.history.clear();
    }

    pub fn export_patterns(&self) -> PatternExport {
        self.patterns.export()
    }

    pub fn import_patterns(&mut self, export: PatternExport) {
        self.patterns.import(export);
    }

    pub fn export_patterns_json(&self) -> Result<String> {
        self.patterns.export_json()
    }

    pub fn import_patterns_json(&mut self, json: &str) -> Result<()> {
        self.patterns.import_json(json)
    }

    fn enhance(&self, entities: &mut ExtractedEntities, command: &NormalizedCommand) -> Enhancement {
        let mut result = Enhancement::default();
        let text = command.as_str();

        if entities.transaction_type.is_none() {
            if let Some(kind) = self.context.latest_type() {
                tracing::debug!(kind = %kind, "type inherited from previous turn");
                entities.transaction_type = Some(kind);
                result.enhanced = true;
            }
        }

        if entities.category.is_none() {
            if let Some(description) = entities.description.as_deref() {
                let found = self
                    .extractors
                    .category
                    .best_match(&description.to_lowercase(), &self.categories);
                if let Some(category) = found {
                    tracing::debug!(slug = %category.slug, "category matched from description");
                    entities.category = Some(CategoryMatch::Existing(category.clone()));
                    result.enhanced = true;
                }
            }
        }

        if entities.amount.is_some() && entities.transaction_type.is_none() {
            if let Some(kind) = self.verb_type(text) {
                tracing::debug!(kind = %kind, "type inferred from verb");
                entities.transaction_type = Some(kind);
                result.enhanced = true;
            }
        }

        if entities.category.is_none() {
            entities.category = self.fallback_category(text, entities.transaction_type);
        }

        result
    }

    fn verb_type(&self, text: &str) -> Option<TransactionType> {
        if self.context_verbs.expense.contains_any(text) {
            Some(TransactionType::Expense)
        } else if self.context_verbs.income.contains_any(text) {
            Some(TransactionType::Income)
        } else {
            None
        }
    }

    /// Catch-all category, else a proposal for a mentioned unknown category
    fn fallback_category(
        &self,
        text: &str,
        kind: Option<TransactionType>,
    ) -> Option<CategoryMatch> {
        if let Some(category) = self.extractors.category.fallback(&self.categories) {
            return Some(CategoryMatch::Existing(category.clone()));
        }

        let name = self.extractors.description.mentioned_category(text)?;
        if let Some(category) = self.extractors.category.find_by_name(&name, &self.categories) {
            return Some(CategoryMatch::Existing(category.clone()));
        }
        let proposal = NewCategoryProposal::new(name, kind.unwrap_or(TransactionType::Expense))?;
        tracing::debug!(slug = %proposal.slug, "proposing mentioned category");
        Some(CategoryMatch::Proposed(proposal))
    }

    fn score(&self, entities: &ExtractedEntities, metadata: &DraftMetadata) -> f64 {
        let w = &self.confidence;
        let weight = |present: bool, weight: f64| if present { weight } else { 0.0 };

        let total = w.intent
            + weight(entities.transaction_type.is_some(), w.transaction_type)
            + weight(entities.amount.is_some(), w.amount)
            + weight(entities.description.is_some(), w.description)
            + weight(entities.date.is_some(), w.date)
            + weight(entities.category.is_some(), w.category)
            + weight(entities.status.is_some(), w.status)
            + weight(metadata.slang_detected, w.slang_bonus)
            + weight(metadata.context_enhanced, w.context_bonus)
            + weight(metadata.pattern_matched, w.pattern_bonus);

        total.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::{CommandContext, Field, FixedClock, Intent};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new("1", "Alimentação", "alimentacao", TransactionType::Expense),
            Category::new("2", "Transporte", "transporte", TransactionType::Expense),
            Category::new("9", "Outros", "outros", TransactionType::Expense),
        ]
    }

    fn orchestrator(categories: Vec<Category>) -> Orchestrator {
        Orchestrator::new(Arc::new(Lexicon::pt_br()), &Settings::default())
            .with_categories(categories)
            .with_clock(Arc::new(FixedClock(today())))
    }

    fn personal(text: &str) -> Command {
        Command::new(text, CommandContext::Personal)
    }

    #[test]
    fn test_complete_command() {
        let mut o = orchestrator(categories());
        let draft = o.process(&personal("Gastei 50 reais no mercado"));

        assert_eq!(draft.intent.intent, Intent::CreateTransaction);
        assert!(draft.is_complete());
        let e = draft.entities();
        assert_eq!(e.transaction_type, Some(TransactionType::Expense));
        assert_eq!(e.amount.map(|a| a.centavos()), Some(5000));
        assert_eq!(e.category.as_ref().map(|c| c.slug()), Some("alimentacao"));
        assert_eq!(draft.due_date, Some(today()));
        // every field weight
        assert!((draft.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bare_verb_leaves_amount_and_description_missing() {
        let mut o = orchestrator(Vec::new());
        let draft = o.process(&personal("gastei"));
        assert_eq!(draft.missing_fields(), &[Field::Amount, Field::Description]);
        assert_eq!(draft.entities().date, Some(today()));
    }

    #[test]
    fn test_type_inherited_from_previous_turn() {
        let mut o = orchestrator(categories());
        o.process(&personal("gastei 30 no uber"));
        let draft = o.process(&personal("mais 20 na padaria"));

        assert_eq!(draft.entities().transaction_type, Some(TransactionType::Expense));
        assert!(draft.metadata.context_enhanced);
    }

    #[test]
    fn test_category_from_catch_all() {
        let mut o = orchestrator(categories());
        let draft = o.process(&personal("paguei 40 reais do bagulho"));
        assert_eq!(draft.entities().category.as_ref().map(|c| c.slug()), Some("outros"));
    }

    #[test]
    fn test_mentioned_category_is_proposed() {
        let cats = vec![Category::new("1", "Alimentação", "alimentacao", TransactionType::Expense)];
        let mut o = orchestrator(cats);
        let draft = o.process(&personal("gastei 80 reais com pets"));

        let category = draft.entities().category.clone().unwrap();
        let proposal = category.proposal().unwrap();
        assert_eq!(proposal.name, "Pets");
        assert_eq!(proposal.kind, TransactionType::Expense);
    }

    #[test]
    fn test_context_stack_is_bounded() {
        let mut o = orchestrator(categories());
        for i in 1..=7 {
            o.process(&personal(&format!("gastei {} reais no mercado", i)));
        }
        assert_eq!(o.context_stack().len(), 5);
        assert_eq!(o.history().len(), 7);
    }

    #[test]
    fn test_timestamps_come_from_the_clock() {
        let mut o = orchestrator(categories());
        let mut draft = o.process(&personal("gastei 50 reais no mercado"));
        let now = FixedClock(today()).now();

        assert_eq!(draft.metadata.processed_at, now);
        assert_eq!(o.context_stack().latest().map(|e| e.timestamp), Some(now));
        assert_eq!(o.history().last().map(|e| e.timestamp), Some(now));
        let normalized = &o.history().last().unwrap().normalized;
        assert_eq!(o.patterns().lookup(normalized).map(|p| p.timestamp), Some(now));

        // without an extracted date, confirmation falls back to the clock's day
        draft.update_entities(|e| e.date = None);
        assert_eq!(draft.confirm().unwrap().date, today());
    }

    #[test]
    fn test_confident_commands_are_learned() {
        let mut o = orchestrator(categories());
        let first = o.process(&personal("gastei 50 reais no mercado"));
        assert!(!first.metadata.pattern_matched);
        assert_eq!(o.patterns().len(), 1);

        let second = o.process(&personal("gastei 70 reais no mercado"));
        assert!(second.metadata.pattern_matched);
    }

    #[test]
    fn test_low_confidence_is_not_learned() {
        let mut o = orchestrator(Vec::new());
        o.process(&personal("gastei"));
        assert!(o.patterns().is_empty());
    }

    #[test]
    fn test_analyze_reply_leaves_memory_alone() {
        let o = orchestrator(categories());
        let entities = o.analyze_reply("cinquenta reais");
        assert_eq!(entities.amount.map(|a| a.centavos()), Some(5000));
        assert!(o.context_stack().is_empty());
        assert!(o.history().is_empty());
    }

    #[test]
    fn test_reset_clears_memory() {
        let mut o = orchestrator(categories());
        o.process(&personal("gastei 50 reais no mercado"));
        o.reset();
        assert!(o.context_stack().is_empty());
        assert!(o.patterns().is_empty());
        assert!(o.history().is_empty());
    }

    #[test]
    fn test_patterns_survive_export() {
        let mut o = orchestrator(categories());
        o.process(&personal("recebi 1200 reais de salário"));
        let json = o.export_patterns_json().unwrap();

        let mut fresh = orchestrator(categories());
        fresh.import_patterns_json(&json).unwrap();
        assert_eq!(fresh.patterns().len(), 1);
    }
}
