//! Category keyword tables

use serde::{Deserialize, Serialize};
use voice_ledger_core::TransactionType;

use super::strings;

/// Category vocabulary scored by source, scaled by `priority / 10`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    /// Canonical slug resolved against the caller's categories
    pub slug: String,
    pub priority: f64,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub slang: Vec<String>,
}

impl WeightedCategory {
    fn new(slug: &str, priority: f64) -> Self {
        Self {
            slug: slug.to_string(),
            priority,
            brands: Vec::new(),
            places: Vec::new(),
            services: Vec::new(),
            keywords: Vec::new(),
            slang: Vec::new(),
        }
    }

    fn brands(mut self, items: &[&str]) -> Self {
        self.brands = strings(items);
        self
    }

    fn places(mut self, items: &[&str]) -> Self {
        self.places = strings(items);
        self
    }

    fn services(mut self, items: &[&str]) -> Self {
        self.services = strings(items);
        self
    }

    fn keywords(mut self, items: &[&str]) -> Self {
        self.keywords = strings(items);
        self
    }

    fn slang(mut self, items: &[&str]) -> Self {
        self.slang = strings(items);
        self
    }
}

/// Flat keyword list used by the simple category scorer and as type context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Matched against category names and slugs after slugifying
    pub name: String,
    pub keywords: Vec<String>,
    /// Hits add to this transaction type's score
    #[serde(default)]
    pub leans: Option<TransactionType>,
}

impl KeywordGroup {
    fn new(name: &str, leans: TransactionType, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: strings(keywords),
            leans: Some(leans),
        }
    }
}

/// Names a caller might give a category with a canonical slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAlias {
    pub slug: String,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLexicon {
    #[serde(default = "default_weighted")]
    pub weighted: Vec<WeightedCategory>,
    #[serde(default = "default_keyword_groups")]
    pub keyword_groups: Vec<KeywordGroup>,
    #[serde(default = "default_aliases")]
    pub aliases: Vec<CategoryAlias>,
    /// Names or slugs of the catch-all category
    #[serde(default = "default_fallback_names")]
    pub fallback_names: Vec<String>,
}

impl CategoryLexicon {
    /// Canonical slug for a category name, or the lowercased name itself
    pub fn canonical_slug(&self, name: &str) -> String {
        let lower = name.to_lowercase();
        self.aliases
            .iter()
            .find(|alias| alias.variants.iter().any(|v| lower.contains(v.as_str())))
            .map(|alias| alias.slug.clone())
            .unwrap_or(lower)
    }
}

fn default_weighted() -> Vec<WeightedCategory> {
    vec![
        WeightedCategory::new("alimentacao", 10.0)
            .brands(&[
                "ifood", "rappi", "uber eats", "zé delivery", "james delivery", "mcdonalds",
                "bk", "burger king", "bob's", "subway", "dominos", "pizza hut", "spoleto",
                "gendai", "china in box", "outback", "giraffas", "habib", "burguer king",
            ])
            .places(&[
                "restaurante", "padaria", "mercado", "supermercado", "açougue", "feira",
                "quitanda", "hortifruti", "sacolão", "empório", "lanchonete", "boteco", "bar",
                "pizzaria", "sorveteria", "cafeteria", "café", "confeitaria", "doceria",
            ])
            .keywords(&[
                "comida", "almoço", "almoçar", "jantar", "janta", "jantei", "café da manhã",
                "cafezinho", "lanche", "lanchinho", "merenda", "pizza", "hambúrguer", "burger",
                "x-burger", "xis", "sanduíche", "salgado", "pastel", "coxinha", "esfirra",
                "açaí", "sorvete",
            ])
            .slang(&[
                "rango", "rangu", "bóia", "larica", "come", "comê", "papou", "mandei ver",
                "petiscou", "beliscou",
            ]),
        WeightedCategory::new("transporte", 9.0)
            .brands(&[
                "uber", "99", "99 pop", "cabify", "lady driver", "buser", "blablacar",
                "waze carpool", "shell", "petrobras", "ipiranga", "ale", "br",
            ])
            .services(&[
                "taxi", "táxi", "ônibus", "busão", "metrô", "metro", "trem", "brt", "vlt",
                "bilhete único", "aplicativo", "estacionamento", "pedágio", "lavagem",
                "mecânico",
            ])
            .keywords(&[
                "combustível", "gasolina", "gasosa", "etanol", "álcool", "diesel", "gás",
                "gnv", "abasteci", "abastecer", "enchi o tanque", "corrida", "viagem",
                "deslocamento", "frete", "mudança",
            ])
            .slang(&["corridinha", "abastecida", "tanque cheio"]),
        WeightedCategory::new("saude", 10.0)
            .places(&[
                "hospital", "clínica", "consultório", "posto de saúde", "upa",
                "pronto socorro", "ps", "farmácia", "drogaria", "laboratório", "dentista",
                "oftalmologista", "dermatologista",
            ])
            .keywords(&[
                "médico", "doutor", "consulta", "exame", "raio-x", "ultrassom", "tomografia",
                "ressonância", "cirurgia", "procedimento", "remédio", "medicamento", "vacina",
                "injeção", "tratamento", "terapia", "sessão", "fisioterapia", "psicólogo",
                "terapeuta",
            ])
            .brands(&[
                "unimed", "amil", "bradesco saúde", "sulamerica", "notredame", "hapvida",
                "samp", "golden cross", "drogasil", "pacheco", "droga raia", "pague menos",
                "panvel", "extrafarma", "venancio",
            ])
            .slang(&["plano de saúde", "convênio", "médico particular"]),
        WeightedCategory::new("casa", 8.0)
            .keywords(&[
                "aluguel", "locação", "luz", "energia", "elétrica", "conta de luz", "água",
                "esgoto", "saneamento", "conta de água", "internet", "wi-fi", "wifi",
                "banda larga", "telefone", "celular", "linha", "condomínio",
                "taxa condominial", "iptu", "imposto", "botijão", "móveis", "eletrodoméstico",
                "reforma", "manutenção", "conserto", "pintura", "encanador", "eletricista",
            ])
            .brands(&[
                "enel", "light", "cemig", "celpe", "copel", "sabesp", "cedae", "caesb",
                "sanepar", "vivo", "claro", "tim", "oi", "net", "sky", "directv", "ultragaz",
                "liquigás", "copagaz",
            ])
            .slang(&["a luz", "a água", "a net", "o condomínio"]),
        WeightedCategory::new("assinaturas", 7.0)
            .brands(&[
                "netflix", "amazon prime", "prime video", "disney plus", "disney+", "hbo max",
                "paramount plus", "paramount+", "apple tv", "globoplay", "spotify", "deezer",
                "youtube premium", "youtube music", "amazon music", "apple music", "tidal",
                "google one", "icloud", "dropbox", "onedrive", "adobe", "canva", "notion",
                "evernote", "microsoft 365", "office 365", "ps plus", "xbox live",
            ])
            .keywords(&[
                "streaming", "assinatura", "mensalidade", "plano", "pacote", "serviço", "app",
                "renovação", "premium", "plus", "anual", "mensal",
            ])
            .slang(&["meu netflix", "meu spotify", "a netflix", "o spotify"]),
        WeightedCategory::new("lazer", 6.0)
            .keywords(&[
                "cinema", "filme", "ingresso", "teatro", "show", "festa", "balada", "festival",
                "evento", "parque", "diversão", "passeio", "turismo", "hotel", "pousada",
                "airbnb", "hospedagem", "zoológico", "museu", "exposição",
            ])
            .slang(&["rolê", "role", "cineminha", "bailão", "festinha"]),
        WeightedCategory::new("trabalho", 9.0)
            .keywords(&[
                "salário", "salario", "ordenado", "vencimento", "freelance", "freela", "bico",
                "projeto", "job", "trabalho", "consultoria", "honorário", "honorarios", "cachê",
                "cache", "comissão", "comissao", "bônus", "bonus", "gratificação", "vale",
                "adiantamento", "décimo terceiro", "13º", "férias",
                "participação nos lucros", "plr",
            ])
            .slang(&["trampo", "grana do trampo", "pagamento", "salário do mês"]),
        WeightedCategory::new("educacao", 7.0)
            .keywords(&[
                "escola", "colégio", "faculdade", "universidade", "curso",
                "mensalidade escolar", "matrícula", "material escolar", "livros", "apostila",
                "uniforme", "transporte escolar", "aula particular", "professor", "reforço",
                "cursinho", "pré-vestibular", "idiomas", "inglês", "espanhol",
            ])
            .brands(&[
                "kumon", "wizard", "ccaa", "cultura inglesa", "fisk", "skill", "udemy",
                "coursera", "alura", "rocketseat",
            ]),
        WeightedCategory::new("vestuario", 5.0)
            .keywords(&[
                "roupa", "calça", "camisa", "camiseta", "blusa", "vestido", "short", "bermuda",
                "sapato", "tênis", "sandália", "chinelo", "bota", "cueca", "calcinha", "sutiã",
                "lingerie", "jaqueta", "casaco", "moletom", "polo",
            ])
            .brands(&[
                "zara", "renner", "c&a", "riachuelo", "marisa", "pernambucanas",
                "lojas americanas", "magazine luiza", "nike", "adidas", "puma", "farm",
                "shoulder", "reserva", "aramis",
            ])
            .slang(&["look", "outfit", "peça"]),
        WeightedCategory::new("beleza", 5.0)
            .keywords(&[
                "salão", "cabeleireiro", "barbeiro", "manicure", "pedicure", "depilação",
                "sobrancelha", "massagem", "spa", "estética", "maquiagem", "perfume",
                "cosmético", "shampoo", "condicionador", "creme", "hidratante",
                "protetor solar",
            ])
            .slang(&["cabelo", "unha", "make"]),
    ]
}

fn default_keyword_groups() -> Vec<KeywordGroup> {
    use TransactionType::{Expense, Income};
    vec![
        KeywordGroup::new(
            "alimentação",
            Expense,
            &[
                "comida", "almoço", "jantar", "café", "lanche", "restaurante", "padaria",
                "mercado", "supermercado", "ifood", "delivery", "pizza", "hambúrguer",
            ],
        ),
        KeywordGroup::new(
            "transporte",
            Expense,
            &[
                "uber", "99", "taxi", "ônibus", "metrô", "combustível", "gasolina", "álcool",
                "posto", "estacionamento", "pedágio", "mecânico",
            ],
        ),
        KeywordGroup::new(
            "saúde",
            Expense,
            &[
                "médico", "farmácia", "remédio", "medicamento", "hospital", "consulta",
                "plano de saúde", "dentista", "exame", "laboratório",
            ],
        ),
        KeywordGroup::new(
            "casa",
            Expense,
            &[
                "aluguel", "luz", "energia", "água", "internet", "telefone", "celular",
                "condomínio", "iptu", "móveis", "decoração", "limpeza",
            ],
        ),
        KeywordGroup::new(
            "trabalho",
            Income,
            &[
                "salário", "freelance", "projeto", "serviço", "consulta", "honorário",
                "comissão", "bônus", "vale", "adiantamento",
            ],
        ),
    ]
}

fn default_aliases() -> Vec<CategoryAlias> {
    [
        ("alimentacao", &["alimentação", "comida", "alimento"][..]),
        ("transporte", &["transporte", "locomoção"]),
        ("saude", &["saúde", "médico"]),
        ("casa", &["casa", "moradia", "residência"]),
        ("assinaturas", &["assinatura", "streaming"]),
        ("lazer", &["lazer", "entretenimento", "diversão"]),
        ("trabalho", &["trabalho", "renda", "salário"]),
        ("educacao", &["educação", "estudo"]),
        ("vestuario", &["vestuário", "roupa"]),
        ("beleza", &["beleza", "estética"]),
    ]
    .into_iter()
    .map(|(slug, variants)| CategoryAlias {
        slug: slug.to_string(),
        variants: strings(variants),
    })
    .collect()
}

fn default_fallback_names() -> Vec<String> {
    strings(&["outros", "other"])
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self {
            weighted: default_weighted(),
            keyword_groups: default_keyword_groups(),
            aliases: default_aliases(),
            fallback_names: default_fallback_names(),
        }
    }
}
