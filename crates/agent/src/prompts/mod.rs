//! Prompt generation
//!
//! Builds every sentence the dialogue speaks from the lexicon's prompt
//! catalog: follow-up questions phrased with what is already known,
//! acknowledgments of the value just filled, clarifications, hints and the
//! final confirmation summary. Variants are chosen by the configured
//! [`PhraseSelector`].

pub mod format;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use voice_ledger_config::{DialogueConfig, Lexicon};
use voice_ledger_core::{
    CategoryMatch, ConfirmedTransaction, ExtractedEntities, Field, TransactionDraft,
};

use crate::phrasing::{selector_for, PhraseSelector};
use format::{currency, fill, friendly_date, whole_reais, DateRelation};

/// Round amounts below this get a "Confirma N reais?" suggestion
const ROUND_AMOUNT_LIMIT: i64 = 1000;

pub struct PromptGenerator {
    lexicon: Arc<Lexicon>,
    selector: Box<dyn PhraseSelector>,
    include_tips: bool,
    high_amount_threshold: f64,
}

impl PromptGenerator {
    pub fn new(lexicon: Arc<Lexicon>, config: &DialogueConfig) -> Self {
        Self {
            lexicon,
            selector: selector_for(config),
            include_tips: config.include_tips,
            high_amount_threshold: config.high_amount_threshold,
        }
    }

    pub fn with_selector(mut self, selector: Box<dyn PhraseSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Question for `field`, opened by an acknowledgment of `last_filled`
    pub fn question(
        &mut self,
        field: Field,
        entities: &ExtractedEntities,
        last_filled: Option<Field>,
        today: NaiveDate,
    ) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(ack) = last_filled.and_then(|f| self.acknowledgment(f, entities, today)) {
            parts.push(ack);
        }
        parts.push(self.contextual_question(field, entities, today));

        let mut text = parts.join(" ");
        if self.include_tips {
            if let Some(tip) = self.lexicon.prompts.tips.get(&field) {
                text.push_str("\n\n");
                text.push_str(tip);
            }
        }
        text
    }

    /// Question phrased with the entities already known
    pub fn contextual_question(
        &mut self,
        field: Field,
        entities: &ExtractedEntities,
        today: NaiveDate,
    ) -> String {
        let lexicon = Arc::clone(&self.lexicon);
        let ctx = &lexicon.prompts.contextual;

        let contextual = match field {
            Field::Type => entities
                .amount
                .map(|amount| {
                    let template = if amount.reais() > self.high_amount_threshold {
                        &ctx.type_high_amount
                    } else {
                        &ctx.type_low_amount
                    };
                    fill(template, &[("amount", &currency(amount))])
                })
                .or_else(|| self.by_category(&ctx.type_by_category, entities)),
            Field::Amount => entities
                .transaction_type
                .map(|t| ctx.amount_by_type.get(t).clone())
                .or_else(|| self.by_category(&ctx.amount_by_category, entities))
                .or_else(|| {
                    entities.description.as_deref().map(|description| {
                        fill(&ctx.amount_with_description, &[("description", description)])
                    })
                }),
            Field::Description => entities
                .transaction_type
                .map(|t| ctx.description_by_type.get(t).clone())
                .or_else(|| self.by_category(&ctx.description_by_category, entities))
                .or_else(|| {
                    entities.amount.map(|amount| {
                        fill(&ctx.description_with_amount, &[("amount", &currency(amount))])
                    })
                }),
            Field::Category => entities
                .description
                .as_deref()
                .and_then(|description| lexicon.prompts.category_hint(description))
                .map(str::to_string),
            Field::Date => Some(
                entities
                    .amount
                    .map(|amount| fill(&ctx.date_with_amount, &[("amount", &currency(amount))]))
                    .or_else(|| entities.transaction_type.map(|t| ctx.date_by_type.get(t).clone()))
                    .unwrap_or_else(|| ctx.date_default.clone()),
            ),
            Field::Status => entities
                .transaction_type
                .map(|t| ctx.status_by_type.get(t).clone())
                .or_else(|| {
                    entities.date.map(|date| {
                        let buckets = &ctx.status_by_date;
                        match DateRelation::of(date, today) {
                            DateRelation::Past => {
                                fill(&buckets.past, &[("date", &friendly_date(date, today))])
                            }
                            DateRelation::Today => buckets.today.clone(),
                            DateRelation::Future => buckets.future.clone(),
                        }
                    })
                }),
        };

        contextual.unwrap_or_else(|| self.basic_question(field))
    }

    /// One of the plain questions for `field`
    pub fn basic_question(&mut self, field: Field) -> String {
        let lexicon = Arc::clone(&self.lexicon);
        self.selector
            .pick(lexicon.prompts.questions_for(field))
            .unwrap_or(lexicon.prompts.fallback_question.as_str())
            .to_string()
    }

    /// Re-ask after a reply that did not fill `field`
    pub fn clarification(&self, field: Field) -> String {
        let prompts = &self.lexicon.prompts;
        prompts
            .clarifications
            .get(&field)
            .or_else(|| prompts.questions_for(field).first())
            .unwrap_or(&prompts.fallback_question)
            .clone()
    }

    /// Acknowledge the value just stored for `field`
    pub fn acknowledgment(
        &mut self,
        field: Field,
        entities: &ExtractedEntities,
        today: NaiveDate,
    ) -> Option<String> {
        let lexicon = Arc::clone(&self.lexicon);
        let acks = &lexicon.prompts.acknowledgments;

        let text = match field {
            Field::Type => {
                let kind = entities.transaction_type?;
                self.selector.pick(acks.transaction_type.get(kind))?.to_string()
            }
            Field::Status => {
                let status = entities.status?;
                self.selector.pick(acks.status.get(status))?.to_string()
            }
            Field::Amount => {
                let amount = currency(entities.amount?);
                fill(self.selector.pick(&acks.amount)?, &[("amount", &amount)])
            }
            Field::Description => {
                let description = entities.description.as_deref()?;
                fill(self.selector.pick(&acks.description)?, &[("description", description)])
            }
            Field::Category => {
                let category = entities.category.as_ref()?;
                fill(self.selector.pick(&acks.category)?, &[("category", category.name())])
            }
            Field::Date => {
                let date = friendly_date(entities.date?, today);
                fill(self.selector.pick(&acks.date)?, &[("date", &date)])
            }
        };
        Some(text)
    }

    /// Language-only hint for `field`; never fills a value
    pub fn smart_suggestion(&self, field: Field, entities: &ExtractedEntities) -> Option<String> {
        let prompts = &self.lexicon.prompts;
        let amount = entities.amount?;
        match field {
            Field::Amount => whole_reais(amount)
                .filter(|value| value % 10 == 0 && *value < ROUND_AMOUNT_LIMIT)
                .map(|value| fill(&prompts.round_amount, &[("value", &value.to_string())])),
            Field::Category => prompts.amount_hint(amount.reais()).map(str::to_string),
            _ => None,
        }
    }

    /// "Para \"Uber\", a categoria é Transporte, correto?"
    pub fn category_suggestion(&self, description: &str, category: &CategoryMatch) -> String {
        fill(
            &self.lexicon.prompts.category_suggestion,
            &[("description", description), ("category", category.name())],
        )
    }

    /// Summary read back before saving
    pub fn confirmation(&self, draft: &TransactionDraft, today: NaiveDate) -> String {
        let template = &self.lexicon.prompts.confirmation;
        let e = draft.entities();
        let mut parts = Vec::new();

        if let Some(kind) = e.transaction_type {
            parts.push(format!("**{}**", kind.label()));
        }
        if let Some(amount) = e.amount {
            parts.push(format!("de **{}**", currency(amount)));
        }
        if let Some(description) = &e.description {
            parts.push(format!("\"{}\"", description));
        }
        if let Some(category) = &e.category {
            parts.push(format!("na categoria **{}**", category.name()));
        }
        if let Some(date) = e.date {
            parts.push(format!("para **{}**", friendly_date(date, today)));
        }
        if let Some(status) = e.status {
            parts.push(format!("({})", template.status.get(status)));
        }

        format!("{} {}. {}", template.prefix, parts.join(" "), template.suffix)
    }

    pub fn success(&mut self, transaction: &ConfirmedTransaction) -> String {
        let lexicon = Arc::clone(&self.lexicon);
        let template = self
            .selector
            .pick(&lexicon.prompts.success)
            .unwrap_or("{type} de {amount} registrada.");
        fill(
            template,
            &[
                ("type", transaction.transaction_type.label()),
                ("amount", &currency(transaction.amount)),
            ],
        )
    }

    /// Message for a failed collaborator call, by error kind
    pub fn error_message(&self, kind: &str) -> String {
        self.lexicon.prompts.errors.for_kind(kind).to_string()
    }

    pub fn manual_entry(&self) -> String {
        self.lexicon.prompts.manual_entry.clone()
    }

    pub fn cancelled(&self) -> String {
        self.lexicon.prompts.cancelled.clone()
    }

    pub fn ask_category_name(&self) -> String {
        self.lexicon.prompts.ask_category_name.clone()
    }

    pub fn ask_transaction_reference(&self) -> String {
        self.lexicon.prompts.ask_transaction_reference.clone()
    }

    fn by_category(
        &self,
        questions: &BTreeMap<String, String>,
        entities: &ExtractedEntities,
    ) -> Option<String> {
        let category = entities.category.as_ref()?;
        questions
            .get(category.slug())
            .or_else(|| {
                questions.get(&self.lexicon.categories.canonical_slug(category.name()))
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::{
        Amount, Category, CommandContext, Intent, IntentResult, NormalizedCommand, PaymentStatus,
        TransactionType,
    };

    fn generator() -> PromptGenerator {
        PromptGenerator::new(Arc::new(Lexicon::pt_br()), &DialogueConfig::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn expense() -> ExtractedEntities {
        ExtractedEntities {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        }
    }

    #[test]
    fn test_amount_question_uses_known_type() {
        let mut g = generator();
        assert_eq!(
            g.contextual_question(Field::Amount, &expense(), today()),
            "Quanto você gastou?"
        );
    }

    #[test]
    fn test_type_question_by_amount_size() {
        let mut g = generator();
        let high = ExtractedEntities {
            amount: Amount::from_reais(800.0),
            ..Default::default()
        };
        assert_eq!(
            g.contextual_question(Field::Type, &high, today()),
            "Você recebeu ou gastou esses R$ 800,00?"
        );

        let low = ExtractedEntities {
            amount: Amount::from_reais(30.0),
            ..Default::default()
        };
        assert_eq!(
            g.contextual_question(Field::Type, &low, today()),
            "Esses R$ 30,00 entraram ou saíram?"
        );
    }

    #[test]
    fn test_type_question_by_category() {
        let mut g = generator();
        let entities = ExtractedEntities {
            category: Some(CategoryMatch::Existing(Category::new(
                "2",
                "Transporte",
                "transporte",
                TransactionType::Expense,
            ))),
            ..Default::default()
        };
        assert_eq!(
            g.contextual_question(Field::Type, &entities, today()),
            "Você pagou essa corrida ou foi um reembolso?"
        );
    }

    #[test]
    fn test_description_question_with_amount_only() {
        let mut g = generator();
        let entities = ExtractedEntities {
            amount: Amount::from_reais(50.0),
            ..Default::default()
        };
        assert_eq!(
            g.contextual_question(Field::Description, &entities, today()),
            "Me fala mais sobre essa transação de R$ 50,00?"
        );
    }

    #[test]
    fn test_basic_question_when_nothing_known() {
        let mut g = generator();
        assert_eq!(
            g.contextual_question(Field::Type, &ExtractedEntities::default(), today()),
            "É uma entrada (receita) ou saída (despesa)?"
        );
    }

    #[test]
    fn test_status_question_for_past_date() {
        let mut g = generator();
        let entities = ExtractedEntities {
            date: NaiveDate::from_ymd_opt(2024, 2, 10),
            ..Default::default()
        };
        assert_eq!(
            g.contextual_question(Field::Status, &entities, today()),
            "Essa conta do dia 10/02/2024 já foi paga?"
        );
    }

    #[test]
    fn test_question_with_acknowledgment_and_tip() {
        let lexicon = Arc::new(Lexicon::pt_br());
        let config = DialogueConfig {
            include_tips: true,
            ..Default::default()
        };
        let mut g = PromptGenerator::new(lexicon, &config);
        let entities = ExtractedEntities {
            amount: Amount::from_reais(50.0),
            ..expense()
        };

        let text = g.question(Field::Description, &entities, Some(Field::Amount), today());
        assert!(text.starts_with("Anotado o valor de R$ 50,00. Com o que você gastou?"));
        assert!(text.ends_with("Dica: Seja breve, tipo 'mercado', 'uber', 'netflix'."));
    }

    #[test]
    fn test_acknowledgment_requires_value() {
        let mut g = generator();
        assert!(g
            .acknowledgment(Field::Amount, &ExtractedEntities::default(), today())
            .is_none());
        assert_eq!(
            g.acknowledgment(Field::Type, &expense(), today()).as_deref(),
            Some("Entendi, é uma despesa.")
        );
    }

    #[test]
    fn test_clarification() {
        let g = generator();
        assert!(g.clarification(Field::Amount).contains("valor em reais"));
        assert_eq!(g.clarification(Field::Status), "Você já pagou ou ainda vai pagar?");
    }

    #[test]
    fn test_smart_suggestions() {
        let g = generator();
        let round = ExtractedEntities {
            amount: Amount::from_reais(50.0),
            ..Default::default()
        };
        assert_eq!(
            g.smart_suggestion(Field::Amount, &round).as_deref(),
            Some("Confirma 50 reais?")
        );
        assert!(g
            .smart_suggestion(Field::Category, &round)
            .unwrap()
            .contains("mercado"));

        let odd = ExtractedEntities {
            amount: Amount::from_reais(47.5),
            ..Default::default()
        };
        assert!(g.smart_suggestion(Field::Amount, &odd).is_none());
    }

    #[test]
    fn test_confirmation_summary() {
        let g = generator();
        let entities = ExtractedEntities {
            amount: Amount::from_reais(50.0),
            description: Some("Mercado".to_string()),
            date: Some(today()),
            status: Some(PaymentStatus::Pending),
            ..expense()
        };
        let draft = TransactionDraft::new(
            IntentResult::new(Intent::CreateTransaction, 0.7),
            entities,
            CommandContext::Personal,
            "gastei 50 no mercado",
            NormalizedCommand::from_normalized("gastei 50 no mercado".to_string()),
        );

        assert_eq!(
            g.confirmation(&draft, today()),
            "Vou registrar: **Despesa** de **R$ 50,00** \"Mercado\" para **hoje** (pendente). Confirma?"
        );
    }

    #[test]
    fn test_category_suggestion() {
        let g = generator();
        let category = CategoryMatch::Existing(Category::new(
            "2",
            "Transporte",
            "transporte",
            TransactionType::Expense,
        ));
        assert_eq!(
            g.category_suggestion("Uber", &category),
            "Para \"Uber\", a categoria é Transporte, correto?"
        );
    }

    #[test]
    fn test_error_message() {
        let g = generator();
        assert_eq!(
            g.error_message("server"),
            "Erro no servidor. Aguarda um momento e tenta novamente."
        );
    }
}
