//! Number words and money slang

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::strings;

/// A phrase with a fixed numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePhrase {
    pub phrase: String,
    pub value: f64,
}

impl ValuePhrase {
    fn new(phrase: &str, value: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            value,
        }
    }
}

/// A banknote or coin nickname ("onça" is the R$ 50 note)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteValue {
    pub name: String,
    #[serde(default)]
    pub plural: Option<String>,
    pub value: f64,
    /// Only counts when preceded by a quantity ("uma nota", "duas onças");
    /// words like "nota" are too common on their own
    #[serde(default)]
    pub requires_quantity: bool,
}

impl NoteValue {
    fn new(name: &str, plural: &str, value: f64, requires_quantity: bool) -> Self {
        Self {
            name: name.to_string(),
            plural: Some(plural.to_string()),
            value,
            requires_quantity,
        }
    }

    /// Singular and plural spellings
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.plural.as_deref())
    }
}

/// Spelled-out numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberLexicon {
    /// Words below one thousand ("cinquenta" = 50, "cem" = 100)
    #[serde(default = "default_units")]
    pub units: BTreeMap<String, u64>,
    /// Scale words ("mil", "milhões")
    #[serde(default = "default_multipliers")]
    pub multipliers: BTreeMap<String, u64>,
}

impl NumberLexicon {
    pub fn value_of(&self, word: &str) -> Option<u64> {
        self.units.get(word).copied()
    }

    pub fn multiplier_of(&self, word: &str) -> Option<u64> {
        self.multipliers.get(word).copied()
    }

    pub fn is_number_word(&self, word: &str) -> bool {
        self.units.contains_key(word) || self.multipliers.contains_key(word)
    }
}

fn default_units() -> BTreeMap<String, u64> {
    [
        ("zero", 0),
        ("um", 1),
        ("uma", 1),
        ("dois", 2),
        ("duas", 2),
        ("três", 3),
        ("tres", 3),
        ("quatro", 4),
        ("cinco", 5),
        ("seis", 6),
        ("sete", 7),
        ("oito", 8),
        ("nove", 9),
        ("dez", 10),
        ("onze", 11),
        ("doze", 12),
        ("treze", 13),
        ("catorze", 14),
        ("quatorze", 14),
        ("quinze", 15),
        ("dezesseis", 16),
        ("dezessete", 17),
        ("dezoito", 18),
        ("dezenove", 19),
        ("vinte", 20),
        ("trinta", 30),
        ("quarenta", 40),
        ("cinquenta", 50),
        ("sessenta", 60),
        ("setenta", 70),
        ("oitenta", 80),
        ("noventa", 90),
        ("cem", 100),
        ("cento", 100),
        ("duzentos", 200),
        ("duzentas", 200),
        ("trezentos", 300),
        ("trezentas", 300),
        ("quatrocentos", 400),
        ("quatrocentas", 400),
        ("quinhentos", 500),
        ("quinhentas", 500),
        ("seiscentos", 600),
        ("seiscentas", 600),
        ("setecentos", 700),
        ("setecentas", 700),
        ("oitocentos", 800),
        ("oitocentas", 800),
        ("novecentos", 900),
        ("novecentas", 900),
    ]
    .into_iter()
    .map(|(w, v)| (w.to_string(), v))
    .collect()
}

fn default_multipliers() -> BTreeMap<String, u64> {
    [
        ("mil", 1_000),
        ("milhão", 1_000_000),
        ("milhao", 1_000_000),
        ("milhões", 1_000_000),
        ("milhoes", 1_000_000),
        ("bilhão", 1_000_000_000),
        ("bilhao", 1_000_000_000),
        ("bilhões", 1_000_000_000),
        ("bilhoes", 1_000_000_000),
        ("trilhão", 1_000_000_000_000),
        ("trilhao", 1_000_000_000_000),
        ("trilhões", 1_000_000_000_000),
        ("trilhoes", 1_000_000_000_000),
    ]
    .into_iter()
    .map(|(w, v)| (w.to_string(), v))
    .collect()
}

impl Default for NumberLexicon {
    fn default() -> Self {
        Self {
            units: default_units(),
            multipliers: default_multipliers(),
        }
    }
}

/// Brazilian money slang
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyLexicon {
    /// Whole-phrase amounts checked before anything else ("meio milhão")
    #[serde(default = "default_special_phrases")]
    pub special_phrases: Vec<ValuePhrase>,
    #[serde(default = "default_notes")]
    pub notes: Vec<NoteValue>,
    /// Slang for one real ("pau", "conto", "pila")
    #[serde(default = "default_basic_units")]
    pub basic_units: Vec<String>,
    /// Slang for one thousand reais ("milão", "k", "barão")
    #[serde(default = "default_big_multipliers")]
    pub big_multipliers: Vec<ValuePhrase>,
    /// Fractions that may precede a unit ("meio pau")
    #[serde(default = "default_fractions")]
    pub fractions: Vec<ValuePhrase>,
    /// Formal currency words
    #[serde(default = "default_currency_words")]
    pub currency_words: Vec<String>,
}

fn default_special_phrases() -> Vec<ValuePhrase> {
    vec![
        ValuePhrase::new("meio milhão", 500_000.0),
        ValuePhrase::new("meia milhão", 500_000.0),
        ValuePhrase::new("meio bilhão", 500_000_000.0),
        ValuePhrase::new("meia bilhão", 500_000_000.0),
        ValuePhrase::new("meio trilhão", 500_000_000_000.0),
        ValuePhrase::new("meia trilhão", 500_000_000_000.0),
        ValuePhrase::new("um quarto de milhão", 250_000.0),
        ValuePhrase::new("três quartos de milhão", 750_000.0),
        ValuePhrase::new("dois terços de milhão", 666_666.67),
    ]
}

fn default_notes() -> Vec<NoteValue> {
    vec![
        NoteValue::new("nota", "notas", 100.0, true),
        NoteValue::new("toco", "tocos", 100.0, true),
        NoteValue::new("onça", "onças", 50.0, true),
        NoteValue::new("peixe", "peixes", 100.0, true),
        NoteValue::new("arara", "araras", 10.0, true),
        NoteValue::new("beija-flor", "beija-flores", 1.0, true),
        NoteValue::new("cinquentão", "cinquentões", 50.0, false),
        NoteValue::new("vintão", "vintões", 20.0, false),
    ]
}

fn default_basic_units() -> Vec<String> {
    strings(&[
        "conto", "contos", "pau", "paus", "pila", "pilas", "mango", "mangos", "prata", "pratas",
        "grana", "dindin",
    ])
}

fn default_big_multipliers() -> Vec<ValuePhrase> {
    vec![
        ValuePhrase::new("milão", 1_000.0),
        ValuePhrase::new("k", 1_000.0),
        ValuePhrase::new("barão", 1_000.0),
        ValuePhrase::new("barões", 1_000.0),
    ]
}

fn default_fractions() -> Vec<ValuePhrase> {
    vec![
        ValuePhrase::new("três quartos", 0.75),
        ValuePhrase::new("tres quartos", 0.75),
        ValuePhrase::new("dois terços", 2.0 / 3.0),
        ValuePhrase::new("um quarto", 0.25),
        ValuePhrase::new("metade", 0.5),
        ValuePhrase::new("meio", 0.5),
        ValuePhrase::new("meia", 0.5),
    ]
}

fn default_currency_words() -> Vec<String> {
    strings(&["reais", "real", "r$"])
}

impl Default for MoneyLexicon {
    fn default() -> Self {
        Self {
            special_phrases: default_special_phrases(),
            notes: default_notes(),
            basic_units: default_basic_units(),
            big_multipliers: default_big_multipliers(),
            fractions: default_fractions(),
            currency_words: default_currency_words(),
        }
    }
}

impl MoneyLexicon {
    /// Every word that denotes money on its own
    pub fn money_words(&self) -> impl Iterator<Item = &str> {
        self.basic_units
            .iter()
            .map(String::as_str)
            .chain(self.big_multipliers.iter().map(|m| m.phrase.as_str()))
            .chain(self.currency_words.iter().map(String::as_str))
    }
}
