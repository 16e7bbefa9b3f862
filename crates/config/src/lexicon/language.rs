//! Normalization, date, description, slang and dialogue word lists

use serde::{Deserialize, Serialize};

use super::strings;

/// Whole-word replacement applied during normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationLexicon {
    /// Spoken contractions expanded to their full form
    #[serde(default = "default_contractions")]
    pub contractions: Vec<Replacement>,
    /// Words speech recognition commonly gets wrong
    #[serde(default = "default_voice_corrections")]
    pub voice_corrections: Vec<Replacement>,
}

fn default_contractions() -> Vec<Replacement> {
    [
        ("tô", "estou"),
        ("tá", "está"),
        ("cê", "você"),
        ("pra", "para"),
        ("pro", "para o"),
        ("vc", "você"),
        ("vlw", "valeu"),
        ("blz", "beleza"),
    ]
    .into_iter()
    .map(|(from, to)| Replacement::new(from, to))
    .collect()
}

fn default_voice_corrections() -> Vec<Replacement> {
    [
        ("cincuenta", "cinquenta"),
        ("sescenta", "sessenta"),
        ("pão", "pau"),
        ("cinto", "conto"),
        ("ifi", "ifood"),
        ("notflix", "netflix"),
    ]
    .into_iter()
    .map(|(from, to)| Replacement::new(from, to))
    .collect()
}

impl Default for NormalizationLexicon {
    fn default() -> Self {
        Self {
            contractions: default_contractions(),
            voice_corrections: default_voice_corrections(),
        }
    }
}

/// A phrase resolving to a day relative to today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDay {
    pub phrase: String,
    pub offset_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateLexicon {
    /// Checked in order; the first phrase found wins
    #[serde(default = "default_relative_days")]
    pub relative_days: Vec<RelativeDay>,
}

fn default_relative_days() -> Vec<RelativeDay> {
    [
        ("depois de amanhã", 2),
        ("depois de amanha", 2),
        ("anteontem", -2),
        ("hoje", 0),
        ("agora", 0),
        ("ontem", -1),
        ("amanhã", 1),
        ("amanha", 1),
    ]
    .into_iter()
    .map(|(phrase, offset_days)| RelativeDay {
        phrase: phrase.to_string(),
        offset_days,
    })
    .collect()
}

impl Default for DateLexicon {
    fn default() -> Self {
        Self {
            relative_days: default_relative_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionLexicon {
    /// Residues too vague to be a description on their own
    #[serde(default = "default_generic_placeholders")]
    pub generic_placeholders: Vec<String>,
    /// Brand names rewritten to their display form
    #[serde(default = "default_brands")]
    pub brands: Vec<Replacement>,
    /// Prepositions trimmed from either end of a description
    #[serde(default = "default_dangling_prepositions")]
    pub dangling_prepositions: Vec<String>,
}

fn default_generic_placeholders() -> Vec<String> {
    strings(&[
        "isso", "isso ai", "isso aí", "aquilo", "la", "lá", "coisas", "coisa", "negocio",
        "negócio", "bagulho", "trem", "treco",
    ])
}

fn default_brands() -> Vec<Replacement> {
    [
        ("ifood", "Ifood"),
        ("uber", "Uber"),
        ("99", "99"),
        ("netflix", "Netflix"),
        ("spotify", "Spotify"),
    ]
    .into_iter()
    .map(|(from, to)| Replacement::new(from, to))
    .collect()
}

fn default_dangling_prepositions() -> Vec<String> {
    strings(&[
        "de", "do", "da", "em", "no", "na", "com", "para", "pro", "o", "a",
    ])
}

impl Default for DescriptionLexicon {
    fn default() -> Self {
        Self {
            generic_placeholders: default_generic_placeholders(),
            brands: default_brands(),
            dangling_prepositions: default_dangling_prepositions(),
        }
    }
}

/// Colloquialisms that earn the slang confidence bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlangLexicon {
    #[serde(default = "default_money_slang")]
    pub money: Vec<String>,
    #[serde(default = "default_transaction_slang")]
    pub transaction: Vec<String>,
    #[serde(default = "default_category_slang")]
    pub category: Vec<String>,
    #[serde(default = "default_status_slang")]
    pub status: Vec<String>,
}

fn default_money_slang() -> Vec<String> {
    strings(&["pau", "conto", "pila", "mango", "prata", "milão", "k", "barão"])
}

fn default_transaction_slang() -> Vec<String> {
    strings(&["torrei", "queimei", "fritei", "pingou", "caiu", "garimpei"])
}

fn default_category_slang() -> Vec<String> {
    strings(&["rango", "bóia", "larica", "corridinha", "busão", "rolê"])
}

fn default_status_slang() -> Vec<String> {
    strings(&["zerei", "matei", "já era", "estou devendo", "na agulha"])
}

impl Default for SlangLexicon {
    fn default() -> Self {
        Self {
            money: default_money_slang(),
            transaction: default_transaction_slang(),
            category: default_category_slang(),
            status: default_status_slang(),
        }
    }
}

/// Words that steer the conversation itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueLexicon {
    /// Abort the conversation from any state
    #[serde(default = "default_cancel_phrases")]
    pub cancel_phrases: Vec<String>,
    /// Accept the confirmation summary
    #[serde(default = "default_confirm_words")]
    pub confirm_words: Vec<String>,
    /// Reject the confirmation summary
    #[serde(default = "default_deny_words")]
    pub deny_words: Vec<String>,
}

fn default_cancel_phrases() -> Vec<String> {
    strings(&[
        "cancelar",
        "cancela",
        "esquece",
        "deixa para lá",
        "deixa para la",
        "para tudo",
    ])
}

fn default_confirm_words() -> Vec<String> {
    strings(&[
        "sim",
        "confirma",
        "confirmo",
        "pode",
        "pode salvar",
        "pode registrar",
        "isso mesmo",
        "correto",
        "ok",
    ])
}

fn default_deny_words() -> Vec<String> {
    strings(&["não", "nao", "errado"])
}

impl Default for DialogueLexicon {
    fn default() -> Self {
        Self {
            cancel_phrases: default_cancel_phrases(),
            confirm_words: default_confirm_words(),
            deny_words: default_deny_words(),
        }
    }
}
