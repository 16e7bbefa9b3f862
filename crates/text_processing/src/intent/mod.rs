//! Intent classification
//!
//! Pattern groups are tested in a fixed priority order and the first group
//! that matches decides the intent, so ambiguous commands resolve the same
//! way every time:
//!
//! 1. list transactions
//! 2. create category
//! 3. mark as paid
//! 4. mark as pending
//! 5. update transaction
//! 6. delete transaction
//! 7. search transaction
//! 8. schedule transaction (recurrence phrasing)
//! 9. create transaction, by phrasing or by default
//!
//! # Example
//!
//! ```
//! use voice_ledger_core::Intent;
//! use voice_ledger_text_processing::intent::IntentClassifier;
//!
//! let classifier = IntentClassifier::new();
//! let result = classifier.classify("marcar como paga a despesa do aluguel");
//!
//! assert_eq!(result.intent, Intent::MarkAsPaid);
//! assert_eq!(result.metadata.transaction_reference.as_deref(), Some("aluguel"));
//! ```

pub mod metadata;

use regex::Regex;

use voice_ledger_config::constants::intent_scoring;
use voice_ledger_core::{Intent, IntentMetadata, IntentResult};

use crate::phrases::PhraseSet;

/// Priority-ordered pattern groups
const INTENT_PATTERNS: &[(Intent, &[&str])] = &[
    (
        Intent::ListTransactions,
        &[
            r"\bquais (?:são )?(?:as |os )?(?:minhas|meus|as|os|próximas?|contas|despesas|receitas)\b",
            r"\b(?:mostrar|listar|ver) (?:minhas|meus|as|os|todas)\b",
            r"\bpróximas? (?:dívidas?|contas?|despesas?|receitas?|pagamentos?)\b",
            r"\b(?:contas|despesas|dívidas) (?:pendentes|a pagar|em aberto)\b",
            r"\bo que (?:eu )?tenho (?:a|para) (?:pagar|receber)\b",
            r"\bcontas a receber\b",
        ],
    ),
    (
        Intent::CreateCategory,
        &[
            r"\b(?:criar|adicionar|cadastrar|registrar|fazer|quero) (?:uma |a )?(?:nova )?categoria\b",
            r"\bnova categoria\b",
        ],
    ),
    (
        Intent::MarkAsPaid,
        &[
            r"\bmarcar como pag[oa]\b",
            r"\badicionar status pag[oa]\b",
            r"\bdefinir como pag[oa]\b",
            r"\bfoi pag[oa]\b",
            r"^já paguei\b",
            r"\bpaguei (?:essa|esse|isso)\b",
            r"\bquitei\b",
            r"\bzerei\b",
            r"\bmatei a conta\b",
        ],
    ),
    (
        Intent::MarkAsPending,
        &[
            r"\bmarcar como pendente\b",
            r"\badicionar status pendente\b",
            r"\bainda n[ãa]o (?:paguei|foi pag[oa])\b",
            r"\bn[ãa]o paguei\b",
            r"\bfica pendente\b",
            r"\bdeixar pendente\b",
        ],
    ),
    (
        Intent::UpdateTransaction,
        &[
            r"\b(?:atualizar|mudar|modificar|alterar|editar|corrigir) (?:a |o )?(?:transa[çc][ãa]o|lan[çc]amento|despesa|receita|valor|data|categoria|descri[çc][ãa]o|status)\b",
        ],
    ),
    (
        Intent::DeleteTransaction,
        &[
            r"\b(?:excluir|deletar|remover|apagar) (?:a |o )?(?:transa[çc][ãa]o|lan[çc]amento|despesa|receita)\b",
            r"\bcancelar (?:a |o )?lan[çc]amento\b",
        ],
    ),
    (
        Intent::SearchTransaction,
        &[
            r"\b(?:buscar|procurar|encontrar|mostrar) (?:a |o )?(?:transa[çc][ãa]o|lan[çc]amento)\b",
            r"\bonde (?:está|esta|fica) (?:a |o )?(?:transa[çc][ãa]o|lan[çc]amento)\b",
        ],
    ),
    (
        Intent::ScheduleTransaction,
        &[
            r"\b(?:agendar|agende|programar|mensal|semanal|anual|recorrente|repetir|automático|fixo)\b",
            r"\btodo (?:dia|mês|ano)\b",
            r"\bsempre no dia\b",
        ],
    ),
    (
        Intent::CreateTransaction,
        &[
            r"\b(?:pagar|paguei|despesa|gasto|receita|receber|recebi|entrada|saída)\b",
            r"\b(?:gastei|comprei|torrei|queimei|fritei|caiu|pingou)\b",
        ],
    ),
];

/// Words that raise confidence in a matched intent
const STRONG_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::CreateCategory, &["criar", "nova", "cadastrar"]),
    (Intent::UpdateTransaction, &["atualizar", "modificar", "alterar"]),
    (Intent::MarkAsPaid, &["marcar", "paguei", "quitei"]),
    (Intent::DeleteTransaction, &["excluir", "deletar", "remover"]),
    (
        Intent::ListTransactions,
        &["quais", "mostrar", "listar", "próximas", "pendentes"],
    ),
];

struct IntentPattern {
    intent: Intent,
    patterns: Vec<Regex>,
}

pub struct IntentClassifier {
    groups: Vec<IntentPattern>,
    keywords: Vec<(Intent, PhraseSet)>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let groups = INTENT_PATTERNS
            .iter()
            .map(|(intent, patterns)| IntentPattern {
                intent: *intent,
                patterns: patterns.iter().filter_map(|p| Regex::new(p).ok()).collect(),
            })
            .collect();
        let keywords = STRONG_KEYWORDS
            .iter()
            .map(|(intent, words)| (*intent, PhraseSet::new(words.iter())))
            .collect();
        Self { groups, keywords }
    }

    /// Intent of a normalized command; never fails
    pub fn classify(&self, text: &str) -> IntentResult {
        let text = text.trim();

        let Some(group) = self
            .groups
            .iter()
            .find(|g| g.patterns.iter().any(|re| re.is_match(text)))
        else {
            tracing::debug!("no intent pattern matched, defaulting to create");
            return IntentResult::new(Intent::CreateTransaction, intent_scoring::BASE);
        };

        let intent = group.intent;
        let result = match intent {
            Intent::ScheduleTransaction | Intent::CreateTransaction => {
                IntentResult::new(intent, intent_scoring::PATTERN_MATCH)
            }
            _ => IntentResult::new(intent, self.confidence(text, intent))
                .with_metadata(self.metadata(text, intent)),
        };

        tracing::debug!(intent = %result.intent, confidence = result.confidence, "intent classified");
        result
    }

    fn confidence(&self, text: &str, intent: Intent) -> f64 {
        let mut confidence = intent_scoring::BASE;

        if let Some((_, words)) = self.keywords.iter().find(|(i, _)| *i == intent) {
            confidence += words.count(text) as f64 * intent_scoring::STRONG_KEYWORD;
        }

        let rewards_reference = matches!(
            intent,
            Intent::UpdateTransaction | Intent::MarkAsPaid | Intent::DeleteTransaction
        );
        if rewards_reference && metadata::transaction_reference(text).is_some() {
            confidence += intent_scoring::REFERENCE;
        }

        confidence.min(1.0)
    }

    fn metadata(&self, text: &str, intent: Intent) -> IntentMetadata {
        let mut metadata = IntentMetadata::default();
        match intent {
            Intent::ListTransactions => {
                metadata.list_criteria = Some(metadata::list_criteria(text));
            }
            Intent::CreateCategory => {
                metadata.category_name = metadata::category_name(text);
                metadata.category_type = Some(metadata::category_type(text));
            }
            Intent::UpdateTransaction => {
                metadata.transaction_reference = metadata::transaction_reference(text);
                metadata.sub_intent = metadata::update_sub_intent(text);
                metadata.search_term = metadata::search_term(text);
            }
            Intent::MarkAsPaid
            | Intent::MarkAsPending
            | Intent::DeleteTransaction
            | Intent::SearchTransaction => {
                metadata.transaction_reference = metadata::transaction_reference(text);
                metadata.search_term = metadata::search_term(text);
            }
            Intent::CreateTransaction | Intent::ScheduleTransaction => {}
        }
        metadata
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::{ListPeriod, PaymentStatus, TransactionType, UpdateSubIntent};

    fn classify(text: &str) -> IntentResult {
        IntentClassifier::new().classify(text)
    }

    #[test]
    fn test_default_is_create() {
        let result = classify("mercado");
        assert_eq!(result.intent, Intent::CreateTransaction);
        assert_eq!(result.confidence, 0.5);
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn test_create_by_phrasing() {
        let result = classify("gastei 50 no mercado");
        assert_eq!(result.intent, Intent::CreateTransaction);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(classify("paguei a conta de luz").intent, Intent::CreateTransaction);
    }

    #[test]
    fn test_schedule() {
        let result = classify("netflix todo dia 15 de 55 reais");
        assert_eq!(result.intent, Intent::ScheduleTransaction);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_list_has_priority() {
        let result = classify("quais as próximas contas pendentes");
        assert_eq!(result.intent, Intent::ListTransactions);
        let criteria = result.metadata.list_criteria.unwrap();
        assert_eq!(criteria.status, Some(PaymentStatus::Pending));
        assert_eq!(criteria.period, Some(ListPeriod::Future));
        // quais + próximas + pendentes
        assert!((result.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_create_category() {
        let result = classify("criar categoria de pets");
        assert_eq!(result.intent, Intent::CreateCategory);
        assert_eq!(result.metadata.category_name.as_deref(), Some("Pets"));
        assert_eq!(result.metadata.category_type, Some(TransactionType::Expense));
        assert!((result.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_mark_as_paid_with_reference() {
        let result = classify("marcar como paga a despesa do aluguel");
        assert_eq!(result.intent, Intent::MarkAsPaid);
        assert_eq!(result.metadata.transaction_reference.as_deref(), Some("aluguel"));
        // marcar + reference
        assert!((result.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_mark_as_pending() {
        assert_eq!(classify("ainda não paguei a internet").intent, Intent::MarkAsPending);
        assert_eq!(classify("marcar como pendente o aluguel").intent, Intent::MarkAsPending);
    }

    #[test]
    fn test_update_sub_intent() {
        let result = classify("alterar o valor da transação do mercado");
        assert_eq!(result.intent, Intent::UpdateTransaction);
        assert_eq!(result.metadata.sub_intent, Some(UpdateSubIntent::Amount));
        assert_eq!(result.metadata.transaction_reference.as_deref(), Some("mercado"));
    }

    #[test]
    fn test_delete_and_search() {
        assert_eq!(classify("excluir a transação do uber").intent, Intent::DeleteTransaction);
        assert_eq!(classify("cancelar o lançamento de ontem").intent, Intent::DeleteTransaction);
        let search = classify("procurar lançamento de netflix");
        assert_eq!(search.intent, Intent::SearchTransaction);
        assert_eq!(search.metadata.search_term.as_deref(), Some("netflix"));
    }

    #[test]
    fn test_creation_with_status_words_stays_create() {
        assert_eq!(classify("gastei 80 na farmácia e já paguei").intent, Intent::CreateTransaction);
        assert_eq!(classify("comprei um tênis pendente").intent, Intent::CreateTransaction);
    }

    #[test]
    fn test_empty_command() {
        assert_eq!(classify("").intent, Intent::CreateTransaction);
    }
}
