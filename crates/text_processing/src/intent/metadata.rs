//! Intent-specific details captured alongside the intent
//!
//! All helpers take normalized text and return `None` when the detail is
//! not present.

use once_cell::sync::Lazy;
use regex::Regex;

use voice_ledger_core::{ListCriteria, ListPeriod, PaymentStatus, SortBy, TransactionType, UpdateSubIntent};

use crate::description::capitalize;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

static REFERENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:despesa|lan[çc]amento|transa[çc][ãa]o|gasto|receita)\s+(?:de|do|da|com|no|na)\s+([^,.\n]+)",
        r"(?:transa[çc][ãa]o|lan[çc]amento|despesa|receita)\s+de\s+(\d+(?:[.,]\d+)?)\s*(?:reais|real|r\$)?",
        r"gastei\s+\d+(?:[.,]\d+)?\s*(?:reais|real|pau|conto)?\s+(?:em|no|na|com|de|do|da)\s+([^,.\n]+)",
        r"\bpara\s+(?:a\s+|o\s+)?([^,.\n]+)",
    ])
});

static SEARCH_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(?:atualizar|modificar|alterar|editar|mudar|corrigir|marcar|adicionar|definir|excluir|deletar|remover)\b",
        r"\b(?:como|status|transa[çc][ãa]o|lan[çc]amento|despesa|receita)\b",
        r"\b(?:pag[oa]|pendente)\b",
        r"\b(?:quais|mostrar|listar|buscar|procurar|ver|próximas?)\b",
        r"\b(?:minhas|as|são)\b",
        r"\b(?:dívidas?|contas?|despesas?|receitas?|pagamentos?)\b",
    ])
});

static SEARCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\bpara\s+(?:a\s+|o\s+)?(.+)",
        r"\bde\s+(.+)",
        r"\b(?:da|do)\s+(.+)",
        r"(.+)",
    ])
});

static CATEGORY_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let name = r"([^\s,.]+(?:\s+[^\s,.]+)?)";
    [
        r"criar\s+(?:uma\s+)?categoria\s+(?:de\s+|chamada\s+|para\s+)?",
        r"nova\s+categoria\s+(?:de\s+|chamada\s+|para\s+)?",
        r"categoria\s+(?:de\s+|chamada\s+)?",
        r"adicionar\s+categoria\s+",
        r"cadastrar\s+categoria\s+",
    ]
    .iter()
    .map(|prefix| Regex::new(&format!("{}{}", prefix, name)).unwrap())
    .collect()
});

static PREPOSITIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:de|do|da|em|no|na|com|para|pro)\b").unwrap());

static EXPENSE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"despesa|gasto|pagar|custo|sa[íi]da").unwrap());

static INCOME_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"receita|ganho|receber|renda|entrada").unwrap());

static STATUS_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"status|situa[çc][ãa]o").unwrap());
static PAID_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bpag[oa]\b").unwrap());
static PENDING_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"pendente|em aberto").unwrap());
static AMOUNT_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"valor|quantia|pre[çc]o").unwrap());
static DATE_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:data|dia|vencimento)\b").unwrap());
static DESCRIPTION_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"descri[çc][ãa]o|\bnome\b|t[íi]tulo").unwrap());

static LIST_PENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pendentes?|a pagar|dívidas?|contas?").unwrap());
static LIST_INCOME: Lazy<Regex> = Lazy::new(|| Regex::new(r"receitas?|receber").unwrap());
static LIST_EXPENSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"despesas?|gastos?").unwrap());
static LIST_FUTURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"próximas?|proximas?").unwrap());
static LIST_PAST: Lazy<Regex> = Lazy::new(|| Regex::new(r"passadas?|anteriores?").unwrap());
static LIST_CURRENT_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"este mês|esse mês|mês atual").unwrap());

/// Free-text reference to an existing transaction ("a despesa do aluguel")
pub fn transaction_reference(text: &str) -> Option<String> {
    REFERENCE_PATTERNS.iter().find_map(|re| {
        let reference = re.captures(text)?.get(1)?.as_str().trim();
        (!reference.is_empty()).then(|| reference.to_string())
    })
}

/// Which field an update command targets
pub fn update_sub_intent(text: &str) -> Option<UpdateSubIntent> {
    if STATUS_TARGET.is_match(text) {
        let status = if PAID_WORD.is_match(text) {
            Some(PaymentStatus::Paid)
        } else if PENDING_WORD.is_match(text) {
            Some(PaymentStatus::Pending)
        } else {
            None
        };
        return Some(UpdateSubIntent::Status(status));
    }
    if AMOUNT_TARGET.is_match(text) {
        return Some(UpdateSubIntent::Amount);
    }
    if DATE_TARGET.is_match(text) {
        return Some(UpdateSubIntent::Date);
    }
    if text.contains("categoria") {
        return Some(UpdateSubIntent::Category);
    }
    if DESCRIPTION_TARGET.is_match(text) {
        return Some(UpdateSubIntent::Description);
    }
    None
}

/// Name of the category to create ("criar categoria de pets" -> "Pets")
pub fn category_name(text: &str) -> Option<String> {
    CATEGORY_NAME_PATTERNS.iter().find_map(|re| {
        let raw = re.captures(text)?.get(1)?.as_str();
        let name = PREPOSITIONS
            .replace_all(raw, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        (name.chars().count() > 2).then(|| capitalize(&name))
    })
}

/// Type of the category to create; expense unless income words appear
pub fn category_type(text: &str) -> TransactionType {
    if EXPENSE_WORDS.is_match(text) {
        TransactionType::Expense
    } else if INCOME_WORDS.is_match(text) {
        TransactionType::Income
    } else {
        TransactionType::Expense
    }
}

/// What to look for when searching or updating a transaction
pub fn search_term(text: &str) -> Option<String> {
    let mut cleaned = text.to_string();
    for re in SEARCH_NOISE.iter() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    SEARCH_PATTERNS.iter().find_map(|re| {
        let term = re.captures(&cleaned)?.get(1)?.as_str().trim();
        (term.chars().count() > 2).then(|| term.to_string())
    })
}

/// Filters for a listing command
pub fn list_criteria(text: &str) -> ListCriteria {
    let mut criteria = ListCriteria {
        sort_by: SortBy::Date,
        ..ListCriteria::default()
    };

    if LIST_PENDING.is_match(text) {
        criteria.status = Some(PaymentStatus::Pending);
        criteria.transaction_type = Some(TransactionType::Expense);
    }
    if LIST_INCOME.is_match(text) {
        criteria.transaction_type = Some(TransactionType::Income);
    }
    if LIST_EXPENSE.is_match(text) && criteria.status.is_none() {
        criteria.transaction_type = Some(TransactionType::Expense);
    }

    if LIST_FUTURE.is_match(text) {
        criteria.period = Some(ListPeriod::Future);
        criteria.sort_by = SortBy::DueDate;
    }
    if LIST_PAST.is_match(text) {
        criteria.period = Some(ListPeriod::Past);
        criteria.sort_by = SortBy::Date;
    }
    if LIST_CURRENT_MONTH.is_match(text) {
        criteria.period = Some(ListPeriod::CurrentMonth);
        criteria.sort_by = SortBy::Date;
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_reference() {
        assert_eq!(
            transaction_reference("marcar como paga a despesa do aluguel").as_deref(),
            Some("aluguel")
        );
        assert_eq!(
            transaction_reference("gastei 50 reais no mercado").as_deref(),
            Some("mercado")
        );
        assert_eq!(
            transaction_reference("paguei a conta para o joão").as_deref(),
            Some("joão")
        );
        assert_eq!(transaction_reference("quitei"), None);
    }

    #[test]
    fn test_update_sub_intent() {
        assert_eq!(
            update_sub_intent("alterar o status da transação para pago"),
            Some(UpdateSubIntent::Status(Some(PaymentStatus::Paid)))
        );
        assert_eq!(
            update_sub_intent("mudar a situação para pendente"),
            Some(UpdateSubIntent::Status(Some(PaymentStatus::Pending)))
        );
        assert_eq!(update_sub_intent("alterar o valor da transação"), Some(UpdateSubIntent::Amount));
        assert_eq!(update_sub_intent("mudar a data do lançamento"), Some(UpdateSubIntent::Date));
        assert_eq!(update_sub_intent("editar a categoria"), Some(UpdateSubIntent::Category));
        assert_eq!(update_sub_intent("corrigir o nome"), Some(UpdateSubIntent::Description));
        assert_eq!(update_sub_intent("editar a transação"), None);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(category_name("criar categoria de pets").as_deref(), Some("Pets"));
        assert_eq!(
            category_name("nova categoria chamada viagens internacionais").as_deref(),
            Some("Viagens internacionais")
        );
        assert_eq!(category_name("criar categoria"), None);
    }

    #[test]
    fn test_category_type() {
        assert_eq!(category_type("nova categoria de renda extra"), TransactionType::Income);
        assert_eq!(category_type("criar categoria de despesa fixa"), TransactionType::Expense);
        assert_eq!(category_type("criar categoria pets"), TransactionType::Expense);
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("buscar transação do aluguel").as_deref(), Some("aluguel"));
        assert_eq!(search_term("procurar lançamento de netflix").as_deref(), Some("netflix"));
        assert_eq!(search_term("buscar"), None);
    }

    #[test]
    fn test_list_criteria() {
        let pending = list_criteria("quais as próximas contas pendentes");
        assert_eq!(pending.status, Some(PaymentStatus::Pending));
        assert_eq!(pending.transaction_type, Some(TransactionType::Expense));
        assert_eq!(pending.period, Some(ListPeriod::Future));
        assert_eq!(pending.sort_by, SortBy::DueDate);

        let income = list_criteria("mostrar minhas receitas deste mês atual");
        assert_eq!(income.transaction_type, Some(TransactionType::Income));
        assert_eq!(income.period, Some(ListPeriod::CurrentMonth));
        assert_eq!(income.sort_by, SortBy::Date);
    }
}
