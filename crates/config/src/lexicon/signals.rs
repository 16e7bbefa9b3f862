//! Transaction-type and payment-status signals
//!
//! Each list is scored by the matching weight in
//! [`crate::settings::ScoringConfig`]. `patterns` are phrase groups: a group
//! scores once when any of its phrases is present.

use serde::{Deserialize, Serialize};

use super::{strings, ByStatus, ByType};

fn groups(items: &[&[&str]]) -> Vec<Vec<String>> {
    items.iter().map(|g| strings(g)).collect()
}

/// Weighted signals for one transaction type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSignals {
    #[serde(default)]
    pub strong_verbs: Vec<String>,
    #[serde(default)]
    pub medium_verbs: Vec<String>,
    #[serde(default)]
    pub nouns: Vec<String>,
    #[serde(default)]
    pub expressions: Vec<String>,
    /// Payment methods for expenses, income kinds for income
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<Vec<String>>,
}

impl TypeSignals {
    fn expense() -> Self {
        Self {
            strong_verbs: strings(&[
                "gastei", "torrei", "queimei", "paguei", "comprei", "adquiri", "contratei",
                "assinei", "renovei", "deixei", "dei", "mandei",
            ]),
            medium_verbs: strings(&[
                "foi", "custou", "saiu", "ficou", "deu", "passei", "fiz", "usei", "investi",
                "apliquei", "coloquei",
            ]),
            nouns: strings(&[
                "despesa", "gasto", "compra", "pagamento", "conta", "boleto", "fatura",
                "parcela", "prestação", "mensalidade", "anuidade",
            ]),
            expressions: strings(&[
                "levei um tombo",
                "tomei uma facada",
                "levou uma paulada",
                "deu um preju",
                "foi um rombo",
                "arrombou o bolso",
                "sangrou",
                "foi salgado",
                "pesou no bolso",
                "estourei",
                "varei",
                "fritei",
                "derreti",
                "evaporou",
            ]),
            methods: strings(&[
                "no crédito",
                "no débito",
                "no pix",
                "via pix",
                "transferi",
                "doc",
                "ted",
                "boleto",
                "dinheiro",
                "espécie",
                "parcelado",
                "à vista",
                "cartão",
                "no cartão",
            ]),
            patterns: groups(&[
                &[
                    "despesa", "gasto", "pagar", "paguei", "saída", "débito", "conta", "boleto",
                ],
                &["comprar", "comprei", "gastei", "perdi"],
                &[
                    "torrei", "queimei", "deixei", "fritei", "varei", "derreti", "estourei",
                ],
                &[
                    "levei tombo",
                    "levei um tombo",
                    "levou paulada",
                    "levou uma paulada",
                    "tomei facada",
                    "tomei uma facada",
                ],
                &[
                    "deu preju",
                    "deu um preju",
                    "foi rombo",
                    "foi um rombo",
                    "arrombou o bolso",
                    "sangrou",
                    "pesou no bolso",
                ],
                &["no crédito", "no débito", "via pix", "transferi", "doc", "ted"],
                &["foi salgado", "foi caro", "custou caro"],
            ]),
        }
    }

    fn income() -> Self {
        Self {
            strong_verbs: strings(&[
                "recebi",
                "ganhei",
                "faturei",
                "embolsei",
                "lucrei",
                "arrecadei",
                "resgatei",
                "saquei",
                "entrou",
                "caiu",
                "pingou",
                "creditaram",
            ]),
            medium_verbs: strings(&[
                "levantei", "fiz", "tirei", "consegui", "obtive", "juntei", "acumulei", "somei",
            ]),
            nouns: strings(&[
                "receita",
                "ganho",
                "lucro",
                "renda",
                "entrada",
                "crédito",
                "rendimento",
                "proventos",
                "honorários",
                "cachê",
            ]),
            expressions: strings(&[
                "fiz uma grana",
                "fiz um dinheiro",
                "levantei uma bolada",
                "garimpei",
                "caiu uma graninha",
                "entrou uma bufunfa",
                "veio um troco",
                "rendeu",
                "deu lucro",
                "fiz caixa",
            ]),
            methods: strings(&[
                "salário",
                "cachê",
                "freelance",
                "bico",
                "freela",
                "projeto",
                "venda",
                "comissão",
                "bônus",
                "adiantamento",
                "vale",
                "décimo terceiro",
                "13º",
                "férias",
                "dividendos",
                "juros",
            ]),
            patterns: groups(&[
                &[
                    "receita", "entrada", "receber", "recebi", "crédito", "ganho", "salário",
                ],
                &["vender", "vendi", "lucro", "rendimento"],
                &[
                    "faturei", "embolsei", "lucrei", "arrecadei", "resgatei", "saquei",
                ],
                &["caiu", "pingou", "creditaram", "entrou", "entrou na conta"],
                &[
                    "fiz grana",
                    "fiz uma grana",
                    "levantei bolada",
                    "levantei uma bolada",
                    "garimpei",
                ],
                &["cachê", "freelance", "freela", "bico", "comissão", "bônus"],
                &["décimo terceiro", "13º", "férias", "vale", "adiantamento"],
            ]),
        }
    }
}

/// "não recebi" means the money went out, "não paguei" that it came in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegationRules {
    pub markers: Vec<String>,
    /// Negated, these point to an expense
    pub income_verbs: Vec<String>,
    /// Negated, these point to income
    pub expense_verbs: Vec<String>,
}

impl Default for NegationRules {
    fn default() -> Self {
        Self {
            markers: strings(&["não", "nao", "nem"]),
            income_verbs: strings(&["recebi", "ganhei", "faturei"]),
            expense_verbs: strings(&["gastei", "paguei", "comprei"]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeLexicon {
    #[serde(default = "TypeSignals::expense")]
    pub expense: TypeSignals,
    #[serde(default = "TypeSignals::income")]
    pub income: TypeSignals,
    #[serde(default)]
    pub negation: NegationRules,
    /// Direct keywords used when no score clears the threshold
    #[serde(default = "default_type_fallback")]
    pub fallback: ByType<Vec<String>>,
    /// Verbs that let the orchestrator infer a type for a bare amount
    #[serde(default = "default_context_verbs")]
    pub context_verbs: ByType<Vec<String>>,
}

fn default_type_fallback() -> ByType<Vec<String>> {
    ByType {
        expense: strings(&["gastei", "paguei"]),
        income: strings(&["recebi", "ganhei"]),
    }
}

fn default_context_verbs() -> ByType<Vec<String>> {
    ByType {
        expense: strings(&["gastei", "paguei", "comprei", "torrei"]),
        income: strings(&["recebi", "ganhei", "faturei"]),
    }
}

impl Default for TypeLexicon {
    fn default() -> Self {
        Self {
            expense: TypeSignals::expense(),
            income: TypeSignals::income(),
            negation: NegationRules::default(),
            fallback: default_type_fallback(),
            context_verbs: default_context_verbs(),
        }
    }
}

/// Weighted signals for one payment status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusBucket {
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub expressions: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<Vec<String>>,
}

impl StatusBucket {
    fn paid() -> Self {
        Self {
            verbs: strings(&[
                "paguei", "quitei", "resolvi", "acertei", "liquidei", "saldei", "finalizei",
                "fechei", "zerei", "matei", "encerrei",
            ]),
            expressions: strings(&[
                "já pago",
                "já foi",
                "está pago",
                "pago",
                "já era",
                "resolvido",
                "quitado",
                "liquidado",
                "zerado",
                "fechado",
                "finalizado",
            ]),
            patterns: groups(&[
                &[
                    "paguei", "pago", "quitei", "quitado", "já paguei", "paga", "recebi",
                    "recebido",
                ],
                &["resolvi", "acertei", "liquidei", "saldei", "finalizei", "fechei"],
                &["zerei", "matei", "matei a conta", "já era", "está pago"],
                &["já foi", "resolvido", "encerrei"],
            ]),
        }
    }

    fn pending() -> Self {
        Self {
            verbs: strings(&[
                "preciso pagar",
                "tenho que pagar",
                "devo",
                "falta pagar",
                "ainda não paguei",
                "esqueci de pagar",
                "vence",
                "estou devendo",
            ]),
            expressions: strings(&[
                "pendente",
                "em aberto",
                "a pagar",
                "para pagar",
                "não pago",
                "ainda não",
                "está devendo",
                "na agulha",
                "atrasado",
                "vencido",
                "vence hoje",
                "vence amanhã",
            ]),
            patterns: groups(&[
                &["vou pagar", "preciso pagar", "devo", "pendente", "em aberto"],
                &[
                    "tenho que pagar",
                    "falta pagar",
                    "ainda não paguei",
                    "esqueci de pagar",
                ],
                &["estou devendo", "está devendo", "na agulha"],
                &["a pagar", "para pagar", "não pago"],
                &[
                    "vence",
                    "vence hoje",
                    "vence amanhã",
                    "vence essa semana",
                    "vencido",
                    "atrasado",
                ],
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusLexicon {
    #[serde(default = "StatusBucket::paid")]
    pub paid: StatusBucket,
    #[serde(default = "StatusBucket::pending")]
    pub pending: StatusBucket,
    /// Checked before any scoring; pending phrases first
    #[serde(default = "default_temporal")]
    pub temporal: ByStatus<Vec<String>>,
    /// Words that announce a new record, which defaults to pending
    #[serde(default = "default_creation_keywords")]
    pub creation_keywords: Vec<String>,
    /// Turn a new record into a paid one
    #[serde(default = "default_paid_confirmations")]
    pub paid_confirmations: Vec<String>,
    /// Past tense of the settle verbs, breaks ties toward paid
    #[serde(default = "default_settle_past")]
    pub settle_past: Vec<String>,
    /// Infinitive of the settle verbs, breaks ties toward pending
    #[serde(default = "default_settle_future")]
    pub settle_future: Vec<String>,
}

fn default_temporal() -> ByStatus<Vec<String>> {
    ByStatus {
        paid: strings(&[
            "já paguei",
            "já quitei",
            "acabei de pagar",
            "paguei ontem",
            "paguei hoje",
            "paguei essa",
            "paguei esse",
            "já era",
            "já foi",
        ]),
        pending: strings(&[
            "vou pagar",
            "vou quitar",
            "tenho que pagar",
            "preciso pagar",
            "devo pagar",
            "falta pagar",
            "amanhã",
            "amanha",
            "semana que vem",
            "mês que vem",
            "depois",
            "ainda não",
            "até",
        ]),
    }
}

fn default_creation_keywords() -> Vec<String> {
    strings(&[
        "registrar",
        "registrei",
        "anotar",
        "anotei",
        "lançar",
        "lancei",
        "adicionar",
        "adicionei",
        "criar",
        "criei",
        "comprei",
        "gastei",
        "foi",
        "custou",
        "saiu",
    ])
}

fn default_paid_confirmations() -> Vec<String> {
    strings(&["já paguei", "pago", "quitei", "já foi", "já era"])
}

fn default_settle_past() -> Vec<String> {
    strings(&["paguei", "quitei", "resolvi"])
}

fn default_settle_future() -> Vec<String> {
    strings(&["pagar", "quitar", "resolver"])
}

impl Default for StatusLexicon {
    fn default() -> Self {
        Self {
            paid: StatusBucket::paid(),
            pending: StatusBucket::pending(),
            temporal: default_temporal(),
            creation_keywords: default_creation_keywords(),
            paid_confirmations: default_paid_confirmations(),
            settle_past: default_settle_past(),
            settle_future: default_settle_future(),
        }
    }
}
