//! Texts spoken back to the user
//!
//! Templates use `{name}` placeholders (`{amount}`, `{description}`,
//! `{category}`, `{date}`, `{value}`, `{type}`) filled in by the dialogue.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use voice_ledger_core::Field;

use super::{strings, ByStatus, ByType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCatalog {
    /// Plain questions per field; the first entry is the formal one
    #[serde(default = "default_questions")]
    pub questions: HashMap<Field, Vec<String>>,
    /// Re-asked after a reply that did not fill the field
    #[serde(default = "default_clarifications")]
    pub clarifications: HashMap<Field, String>,
    #[serde(default)]
    pub contextual: ContextualQuestions,
    #[serde(default)]
    pub acknowledgments: Acknowledgments,
    #[serde(default = "default_tips")]
    pub tips: HashMap<Field, String>,
    #[serde(default = "default_category_hints")]
    pub category_hints: Vec<CategoryHint>,
    #[serde(default = "default_amount_buckets")]
    pub amount_buckets: Vec<AmountBucket>,
    #[serde(default = "default_round_amount")]
    pub round_amount: String,
    #[serde(default = "default_category_suggestion")]
    pub category_suggestion: String,
    #[serde(default)]
    pub confirmation: ConfirmationTemplate,
    #[serde(default = "default_success")]
    pub success: Vec<String>,
    #[serde(default)]
    pub errors: ErrorMessages,
    #[serde(default = "default_manual_entry")]
    pub manual_entry: String,
    #[serde(default = "default_cancelled")]
    pub cancelled: String,
    #[serde(default = "default_ask_category_name")]
    pub ask_category_name: String,
    #[serde(default = "default_ask_transaction_reference")]
    pub ask_transaction_reference: String,
    #[serde(default = "default_fallback_question")]
    pub fallback_question: String,
}

impl PromptCatalog {
    pub fn questions_for(&self, field: Field) -> &[String] {
        self.questions.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Amount bucket text for a value, first matching bucket wins
    pub fn amount_hint(&self, amount: f64) -> Option<&str> {
        self.amount_buckets
            .iter()
            .find(|b| b.contains(amount))
            .map(|b| b.text.as_str())
    }

    /// Hint for a description, e.g. "uber" suggests Transporte
    pub fn category_hint(&self, description: &str) -> Option<&str> {
        let lower = description.to_lowercase();
        self.category_hints
            .iter()
            .find(|h| h.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|h| h.text.as_str())
    }
}

fn default_questions() -> HashMap<Field, Vec<String>> {
    HashMap::from([
        (
            Field::Type,
            strings(&[
                "É uma entrada (receita) ou saída (despesa)?",
                "Isso é dinheiro que entrou ou saiu?",
                "Você recebeu ou gastou?",
                "É um ganho ou um gasto?",
                "Foi receita ou despesa?",
            ]),
        ),
        (
            Field::Amount,
            strings(&[
                "Qual o valor da transação?",
                "Quanto foi?",
                "Qual o valor disso?",
                "Quantos reais?",
                "Me diz o valor?",
            ]),
        ),
        (
            Field::Description,
            strings(&[
                "Pode me dar mais detalhes sobre essa transação?",
                "Me conta mais sobre isso?",
                "O que foi exatamente?",
                "Pode descrever melhor?",
                "Qual a descrição?",
            ]),
        ),
        (
            Field::Category,
            strings(&[
                "Qual a categoria dessa transação?",
                "Isso se encaixa em qual categoria?",
                "É de qual tipo de despesa/receita?",
                "Em que categoria você quer classificar?",
            ]),
        ),
        (
            Field::Date,
            strings(&[
                "Quando foi isso?",
                "Qual a data dessa transação?",
                "Foi hoje ou outro dia?",
                "Pode me dizer quando aconteceu?",
            ]),
        ),
        (
            Field::Status,
            strings(&[
                "Você já pagou ou ainda vai pagar?",
                "Está pago ou pendente?",
                "Já foi quitado?",
                "Essa conta já foi paga?",
            ]),
        ),
    ])
}

fn default_clarifications() -> HashMap<Field, String> {
    HashMap::from([
        (
            Field::Type,
            "Não entendi. É uma entrada (receita) ou saída (despesa)?".to_string(),
        ),
        (
            Field::Amount,
            "Não consegui identificar o valor. Pode repetir o valor em reais?".to_string(),
        ),
        (
            Field::Description,
            "Preciso de uma descrição mais detalhada. Para que foi essa transação?".to_string(),
        ),
        (
            Field::Date,
            "Não entendi a data. É para hoje, ontem, ou uma data específica?".to_string(),
        ),
    ])
}

fn default_tips() -> HashMap<Field, String> {
    HashMap::from([
        (
            Field::Type,
            "Dica: Diga 'gastei' para despesas ou 'recebi' para receitas.".to_string(),
        ),
        (
            Field::Amount,
            "Dica: Pode falar '50 reais', 'cinquenta pau', ou só '50'.".to_string(),
        ),
        (
            Field::Description,
            "Dica: Seja breve, tipo 'mercado', 'uber', 'netflix'.".to_string(),
        ),
        (
            Field::Category,
            "Dica: Temos categorias como Alimentação, Transporte, Saúde, Casa...".to_string(),
        ),
        (
            Field::Date,
            "Dica: Pode dizer 'hoje', 'ontem', 'dia 15', ou uma data específica.".to_string(),
        ),
        (
            Field::Status,
            "Dica: Diga 'já paguei' ou 'vou pagar depois'.".to_string(),
        ),
    ])
}

fn default_category_hints() -> Vec<CategoryHint> {
    [
        (
            &["ifood", "rappi", "delivery", "restaurante", "comida"][..],
            "Parece ser Alimentação, confirma?",
        ),
        (
            &["uber", "99", "taxi", "gasolina", "combustível"],
            "Parece ser Transporte, está certo?",
        ),
        (&["netflix", "spotify", "prime", "hbo"], "É uma Assinatura?"),
        (&["médico", "farmácia", "remédio", "hospital"], "É Saúde?"),
        (
            &["luz", "água", "internet", "telefone", "aluguel"],
            "É conta de Casa?",
        ),
    ]
    .into_iter()
    .map(|(keywords, text)| CategoryHint {
        keywords: strings(keywords),
        text: text.to_string(),
    })
    .collect()
}

fn default_amount_buckets() -> Vec<AmountBucket> {
    vec![
        AmountBucket::below(50.0, "Parece ser algo pequeno, tipo lanche ou transporte?"),
        AmountBucket::below(200.0, "Pode ser compras no mercado ou combustível?"),
        AmountBucket::below(500.0, "É alguma conta maior, tipo luz, água ou internet?"),
        AmountBucket {
            above: Some(1000.0),
            below: None,
            text: "Parece ser algo significativo, tipo aluguel ou salário?".to_string(),
        },
    ]
}

fn default_round_amount() -> String {
    "Confirma {value} reais?".to_string()
}

fn default_category_suggestion() -> String {
    "Para \"{description}\", a categoria é {category}, correto?".to_string()
}

fn default_success() -> Vec<String> {
    strings(&[
        "{type} de {amount} registrada com sucesso! ✅",
        "Pronto! {type} de {amount} salva.",
        "{type} criada: {amount}. Tudo certo! 👍",
        "Feito! {type} de {amount} está no sistema.",
    ])
}

fn default_manual_entry() -> String {
    "Não consegui entender depois de algumas tentativas. Você pode cadastrar essa transação manualmente."
        .to_string()
}

fn default_cancelled() -> String {
    "Transação cancelada.".to_string()
}

fn default_ask_category_name() -> String {
    "Qual o nome da nova categoria?".to_string()
}

fn default_ask_transaction_reference() -> String {
    "Qual transação você quer atualizar?".to_string()
}

fn default_fallback_question() -> String {
    "Preciso de mais informações.".to_string()
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            clarifications: default_clarifications(),
            contextual: ContextualQuestions::default(),
            acknowledgments: Acknowledgments::default(),
            tips: default_tips(),
            category_hints: default_category_hints(),
            amount_buckets: default_amount_buckets(),
            round_amount: default_round_amount(),
            category_suggestion: default_category_suggestion(),
            confirmation: ConfirmationTemplate::default(),
            success: default_success(),
            errors: ErrorMessages::default(),
            manual_entry: default_manual_entry(),
            cancelled: default_cancelled(),
            ask_category_name: default_ask_category_name(),
            ask_transaction_reference: default_ask_transaction_reference(),
            fallback_question: default_fallback_question(),
        }
    }
}

/// Status questions by where the date falls relative to today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateBuckets {
    pub past: String,
    pub today: String,
    pub future: String,
}

/// Questions phrased with what is already known
///
/// Category maps are keyed by canonical category slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextualQuestions {
    pub type_high_amount: String,
    pub type_low_amount: String,
    pub type_by_category: BTreeMap<String, String>,
    pub amount_by_type: ByType<String>,
    pub amount_by_category: BTreeMap<String, String>,
    pub amount_with_description: String,
    pub description_by_type: ByType<String>,
    pub description_by_category: BTreeMap<String, String>,
    pub description_with_amount: String,
    pub date_with_amount: String,
    pub date_by_type: ByType<String>,
    pub date_default: String,
    pub status_by_type: ByType<String>,
    pub status_by_date: DateBuckets,
}

fn keyed(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn by_type(expense: &str, income: &str) -> ByType<String> {
    ByType {
        expense: expense.to_string(),
        income: income.to_string(),
    }
}

impl Default for ContextualQuestions {
    fn default() -> Self {
        Self {
            type_high_amount: "Você recebeu ou gastou esses {amount}?".to_string(),
            type_low_amount: "Esses {amount} entraram ou saíram?".to_string(),
            type_by_category: keyed(&[
                ("alimentacao", "Foi uma compra de comida ou você vendeu algo?"),
                ("transporte", "Você pagou essa corrida ou foi um reembolso?"),
                ("trabalho", "É o seu salário ou um pagamento que você fez?"),
            ]),
            amount_by_type: by_type("Quanto você gastou?", "Quanto você recebeu?"),
            amount_by_category: keyed(&[
                ("alimentacao", "Quanto gastou com comida?"),
                ("transporte", "Quanto foi essa corrida/combustível?"),
                ("assinaturas", "Qual o valor da assinatura?"),
            ]),
            amount_with_description: "Quanto foi esse \"{description}\"?".to_string(),
            description_by_type: by_type("Com o que você gastou?", "De onde veio esse dinheiro?"),
            description_by_category: keyed(&[
                ("alimentacao", "Onde você comeu? Ou o que comprou?"),
                ("transporte", "Foi Uber, 99, ou gasolina?"),
                ("saude", "Foi médico, farmácia, ou exame?"),
                ("assinaturas", "Qual serviço você pagou?"),
            ]),
            description_with_amount: "Me fala mais sobre essa transação de {amount}?".to_string(),
            date_with_amount: "Quando foi essa transação de {amount}?".to_string(),
            date_by_type: by_type("Quando você fez esse gasto?", "Quando você recebeu?"),
            date_default: "Foi hoje, ontem, ou outro dia?".to_string(),
            status_by_type: by_type(
                "Você já pagou ou ainda vai pagar?",
                "Você já recebeu esse dinheiro?",
            ),
            status_by_date: DateBuckets {
                past: "Essa conta do dia {date} já foi paga?".to_string(),
                today: "Você já pagou hoje ou ainda vai pagar?".to_string(),
                future: "Você vai pagar quando chegar a data?".to_string(),
            },
        }
    }
}

/// Phrases confirming the value just filled
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Acknowledgments {
    #[serde(rename = "type")]
    pub transaction_type: ByType<Vec<String>>,
    pub amount: Vec<String>,
    pub description: Vec<String>,
    pub category: Vec<String>,
    pub date: Vec<String>,
    pub status: ByStatus<Vec<String>>,
}

impl Default for Acknowledgments {
    fn default() -> Self {
        Self {
            transaction_type: ByType {
                expense: strings(&[
                    "Entendi, é uma despesa.",
                    "Ok, gasto anotado.",
                    "Certo, saída registrada.",
                ]),
                income: strings(&[
                    "Entendi, é uma receita.",
                    "Legal, entrada anotada.",
                    "Ótimo, ganho registrado.",
                ]),
            },
            amount: strings(&[
                "Anotado o valor de {amount}.",
                "Ok, {amount} registrado.",
                "Perfeito, {amount}.",
                "Entendi, {amount}.",
            ]),
            description: strings(&[
                "Descrição salva: \"{description}\".",
                "Ok, anotei: \"{description}\".",
                "Certo: \"{description}\".",
            ]),
            category: strings(&[
                "Classificado como {category}.",
                "Ok, categoria {category}.",
                "Anotado em {category}.",
            ]),
            date: strings(&[
                "Data registrada: {date}.",
                "Ok, para o dia {date}.",
                "Anotado para {date}.",
            ]),
            status: ByStatus {
                paid: strings(&[
                    "Marcado como pago.",
                    "Ok, conta quitada.",
                    "Registrado como pago.",
                ]),
                pending: strings(&[
                    "Marcado como pendente.",
                    "Ok, fica na lista de contas a pagar.",
                    "Anotado como não pago ainda.",
                ]),
            },
        }
    }
}

/// Keywords in a description that point to a likely category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHint {
    pub keywords: Vec<String>,
    pub text: String,
}

/// Suggestion for amounts strictly between `above` and `below`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountBucket {
    #[serde(default)]
    pub above: Option<f64>,
    #[serde(default)]
    pub below: Option<f64>,
    pub text: String,
}

impl AmountBucket {
    fn below(limit: f64, text: &str) -> Self {
        Self {
            above: None,
            below: Some(limit),
            text: text.to_string(),
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.above.map_or(true, |min| amount > min) && self.below.map_or(true, |max| amount < max)
    }
}

/// `Vou registrar: **Despesa** de **R$ 50,00** ... Confirma?`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationTemplate {
    pub prefix: String,
    pub suffix: String,
    pub status: ByStatus<String>,
}

impl Default for ConfirmationTemplate {
    fn default() -> Self {
        Self {
            prefix: "Vou registrar:".to_string(),
            suffix: "Confirma?".to_string(),
            status: ByStatus {
                paid: "já paga".to_string(),
                pending: "pendente".to_string(),
            },
        }
    }
}

/// Messages for failed persistence calls, keyed by error kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    pub network: String,
    pub validation: String,
    pub server: String,
    pub default: String,
}

impl ErrorMessages {
    pub fn for_kind(&self, kind: &str) -> &str {
        match kind {
            "network" => &self.network,
            "validation" => &self.validation,
            "server" => &self.server,
            _ => &self.default,
        }
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            network: "Ops! Problema de conexão. Tenta de novo?".to_string(),
            validation: "Alguns dados não estão corretos. Vamos revisar?".to_string(),
            server: "Erro no servidor. Aguarda um momento e tenta novamente.".to_string(),
            default: "Algo deu errado. Pode tentar de novo?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_buckets() {
        let catalog = PromptCatalog::default();
        assert!(catalog.amount_hint(30.0).unwrap().contains("pequeno"));
        assert!(catalog.amount_hint(150.0).unwrap().contains("mercado"));
        assert!(catalog.amount_hint(700.0).is_none());
        assert!(catalog.amount_hint(2000.0).unwrap().contains("aluguel"));
    }

    #[test]
    fn test_category_hint() {
        let catalog = PromptCatalog::default();
        assert_eq!(catalog.category_hint("Uber"), Some("Parece ser Transporte, está certo?"));
        assert!(catalog.category_hint("Presente").is_none());
    }

    #[test]
    fn test_error_message_by_kind() {
        let errors = ErrorMessages::default();
        assert!(errors.for_kind("network").contains("conexão"));
        assert_eq!(errors.for_kind("unknown"), errors.default);
    }
}
