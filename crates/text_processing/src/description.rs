//! Free-text description
//!
//! What remains of the command once command vocabulary (verbs, amounts,
//! money slang, dates, status words, category directives) is scrubbed out.
//! A residue that is empty or too vague ("isso", "coisa") is replaced by a
//! category named after a preposition ("no mercado" -> "Mercado").

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use voice_ledger_config::{DescriptionLexicon, MoneyLexicon, NumberLexicon};

use crate::numbers::NumberWords;
use crate::phrases::alternation;
use crate::recurrence::strip_recurrence;

static COMMAND_VOCABULARY: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:receita|despesa|entrada|sa[íi]da|gast(?:o|ei|ar)|pag(?:ar|uei|o)|receb(?:i|er))\b",
        r"\b(?:torrei|queimei|fritei|varei|derreti|estourei|pingou|caiu|garimpei|faturei)\b",
        r"\b(?:agendar|agende|mensal|semanal|anual|recorrente|repetir|autom[áa]tico|fixo|sempre)\b",
        r"\bdia\s+\d{1,2}\s+de\s+\w+",
        r"\b(?:depois\s+de\s+amanh[ãa]|anteontem|hoje|ontem|amanh[ãa])\b",
        r"\b(?:já|pago|paga|pendente|em\s+aberto|quitado|zerei|matei)\b",
        r"\b(?:na\s+)?categoria\s+(?:de\s+)?\w+",
        r"\b(?:atualizar|modificar|alterar|editar|mudar|corrigir)\b",
        r"\b(?:marcar\s+como|adicionar\s+status|definir\s+como)\b",
        r"\b(?:transaç[ãa]o|lan[çc]amento)\b",
        r"\b(?:quais|mostrar|listar|ver|buscar|procurar)\b",
        r"\b(?:minhas|as|são|próximas?|pendentes?)\b",
        r"\b(?:criar|nova|adicionar|cadastrar|registrar)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:r\$\s*)?\d+(?:[.,]\d+)*").unwrap());

static MENTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:em|no|na|com|de|do|da)\s+(\p{L}+)",
        r"\bcategoria\s+(?:de\s+)?(\p{L}+)",
        r"\bpara\s+(\p{L}+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Words that never name a category when they follow a preposition
const NON_CATEGORY_WORDS: &[&str] = &[
    "hoje", "ontem", "amanhã", "amanha", "anteontem", "depois", "pagar", "receber", "novo",
    "nova", "categoria",
];

/// First grapheme uppercased, the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => first.to_uppercase() + graphemes.as_str(),
        None => String::new(),
    }
}

pub struct DescriptionExtractor {
    amounts: Vec<Regex>,
    number_chain: Option<Regex>,
    placeholders: HashSet<String>,
    prepositions: HashSet<String>,
    brands: Vec<(Regex, String)>,
    vocabulary: HashSet<String>,
}

impl DescriptionExtractor {
    pub fn new(lexicon: &DescriptionLexicon, numbers: &NumberLexicon, money: &MoneyLexicon) -> Self {
        let words = NumberWords::new(numbers);
        let chain = words.chain_pattern();

        let money_words = alternation(money.money_words());
        let fractions = alternation(money.fractions.iter().map(|f| f.phrase.as_str()));
        let notes = alternation(money.notes.iter().flat_map(|n| n.spellings()));
        let specials = alternation(money.special_phrases.iter().map(|p| p.phrase.as_str()));

        let mut quantity = vec![r"\d+(?:[.,]\d+)*".to_string(), chain.to_string()];
        if !fractions.is_empty() {
            quantity.insert(0, fractions);
        }
        let quantity = quantity.join("|");

        let amounts = [specials, notes, money_words]
            .iter()
            .filter(|alt| !alt.is_empty())
            .filter_map(|alt| {
                Regex::new(&format!(
                    r"(?:^|[^\w])(?:(?:{})\s*)?(?:{})(?:[^\w]|$)",
                    quantity, alt
                ))
                .ok()
            })
            .collect();

        let vocabulary = numbers
            .units
            .keys()
            .chain(numbers.multipliers.keys())
            .map(String::as_str)
            .chain(money.money_words())
            .chain(money.notes.iter().flat_map(|n| n.spellings()))
            .chain(NON_CATEGORY_WORDS.iter().copied())
            .map(str::to_string)
            .collect();

        Self {
            amounts,
            number_chain: Regex::new(&format!(r"\b(?:{})", chain)).ok(),
            placeholders: lexicon.generic_placeholders.iter().cloned().collect(),
            prepositions: lexicon.dangling_prepositions.iter().cloned().collect(),
            brands: lexicon
                .brands
                .iter()
                .filter_map(|b| {
                    Regex::new(&format!(r"\b{}\b", regex::escape(&b.from.to_lowercase())))
                        .ok()
                        .map(|re| (re, b.to.clone()))
                })
                .collect(),
            vocabulary,
        }
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        let residue = self.scrub(text);
        let mentioned = self.mentioned_category(text);

        let description = if self.is_too_generic(&residue) {
            mentioned.clone()?
        } else {
            residue
        };

        let mut enhanced = match &mentioned {
            Some(category) if !description.to_lowercase().contains(&category.to_lowercase()) => {
                format!("{} - {}", category, description)
            }
            _ => description,
        };
        for (re, display) in &self.brands {
            enhanced = re.replace_all(&enhanced, NoExpand(display)).into_owned();
        }

        let description = capitalize(&enhanced);
        tracing::debug!(description = %description, "description extracted");
        Some(description)
    }

    /// Category named after a preposition ("no mercado", "para escola")
    pub fn mentioned_category(&self, text: &str) -> Option<String> {
        MENTION_PATTERNS.iter().find_map(|re| {
            re.captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .find(|word| {
                    word.chars().count() > 2
                        && !self.vocabulary.contains(*word)
                        && !self.placeholders.contains(*word)
                })
                .map(capitalize)
        })
    }

    /// Command text with command vocabulary removed
    fn scrub(&self, text: &str) -> String {
        let mut residue = strip_recurrence(text).into_owned();

        for re in COMMAND_VOCABULARY.iter() {
            residue = re.replace_all(&residue, " ").into_owned();
        }
        for re in &self.amounts {
            residue = re.replace_all(&residue, " ").into_owned();
        }
        residue = DIGITS.replace_all(&residue, " ").into_owned();
        if let Some(re) = &self.number_chain {
            residue = re.replace_all(&residue, " ").into_owned();
        }

        let mut words: Vec<&str> = residue.split_whitespace().collect();
        while words.first().is_some_and(|w| self.prepositions.contains(*w)) {
            words.remove(0);
        }
        while words.last().is_some_and(|w| self.prepositions.contains(*w)) {
            words.pop();
        }
        words.join(" ")
    }

    fn is_too_generic(&self, residue: &str) -> bool {
        residue.chars().count() < 3 || self.placeholders.contains(residue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DescriptionExtractor {
        DescriptionExtractor::new(
            &DescriptionLexicon::default(),
            &NumberLexicon::default(),
            &MoneyLexicon::default(),
        )
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mercado"), "Mercado");
        assert_eq!(capitalize("ônibus"), "Ônibus");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_bare_noun() {
        assert_eq!(extractor().extract("mercado").as_deref(), Some("Mercado"));
    }

    #[test]
    fn test_strips_command_vocabulary() {
        let d = extractor();
        assert_eq!(d.extract("gastei 50 no mercado").as_deref(), Some("Mercado"));
        assert_eq!(
            d.extract("gastei cinquenta reais com pizza hoje").as_deref(),
            Some("Pizza")
        );
        assert_eq!(d.extract("torrei 20 pau na balada").as_deref(), Some("Balada"));
    }

    #[test]
    fn test_nothing_left() {
        let d = extractor();
        assert_eq!(d.extract("gastei"), None);
        assert_eq!(d.extract("cinquenta reais"), None);
        assert_eq!(d.extract("paguei isso"), None);
    }

    #[test]
    fn test_generic_residue_uses_mentioned_category() {
        assert_eq!(
            extractor().extract("paguei 30 na categoria lazer").as_deref(),
            Some("Lazer")
        );
        assert_eq!(extractor().extract("gastei 30 com coisa").as_deref(), None);
    }

    #[test]
    fn test_brand_capitalization() {
        assert_eq!(extractor().extract("gastei 40 no ifood").as_deref(), Some("Ifood"));
        assert_eq!(
            extractor().extract("assinatura netflix").as_deref(),
            Some("Assinatura Netflix")
        );
    }

    #[test]
    fn test_mentioned_category_skips_date_words() {
        let d = extractor();
        assert_eq!(d.mentioned_category("paguei depois de amanhã"), None);
        assert_eq!(d.mentioned_category("comprei na padaria").as_deref(), Some("Padaria"));
    }
}
