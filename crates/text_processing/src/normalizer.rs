//! Command normalization
//!
//! Lowercases, drops sentence punctuation (keeping decimal and thousands
//! separators between digits), collapses whitespace, expands spoken
//! contractions and fixes words speech recognition commonly mishears.

use std::collections::HashMap;

use voice_ledger_config::NormalizationLexicon;
use voice_ledger_core::NormalizedCommand;

pub struct Normalizer {
    contractions: HashMap<String, String>,
    corrections: HashMap<String, String>,
}

impl Normalizer {
    pub fn new(lexicon: &NormalizationLexicon) -> Self {
        let contractions = lexicon
            .contractions
            .iter()
            .map(|r| (r.from.to_lowercase(), r.to.to_lowercase()))
            .collect();
        let corrections = lexicon
            .voice_corrections
            .iter()
            .map(|r| (r.from.to_lowercase(), r.to.to_lowercase()))
            .collect();
        Self {
            contractions,
            corrections,
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedCommand {
        let lowered = text.trim().to_lowercase();
        let cleaned = strip_punctuation(&lowered);

        let mut words: Vec<&str> = Vec::new();
        for token in cleaned.split_whitespace() {
            let expanded = self
                .contractions
                .get(token)
                .map(String::as_str)
                .unwrap_or(token);
            for word in expanded.split_whitespace() {
                words.push(self.corrections.get(word).map(String::as_str).unwrap_or(word));
            }
        }

        NormalizedCommand::from_normalized(words.join(" "))
    }
}

/// Replace punctuation with spaces, keeping `,` and `.` between two digits
fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        let keep = match ch {
            ',' | '.' => {
                let prev = i.checked_sub(1).and_then(|j| chars.get(j));
                let next = chars.get(i + 1);
                matches!((prev, next), (Some(p), Some(n)) if p.is_ascii_digit() && n.is_ascii_digit())
            }
            '!' | '?' | ';' | ':' | '"' | '“' | '”' | '(' | ')' | '¡' | '¿' | '…' => false,
            _ => true,
        };
        out.push(if keep { ch } else { ' ' });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        Normalizer::new(&NormalizationLexicon::default())
            .normalize(text)
            .as_str()
            .to_string()
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("  Gastei 50,  no MERCADO!  "), "gastei 50 no mercado");
        assert_eq!(normalize("Isso é tudo? Sim."), "isso é tudo sim");
    }

    #[test]
    fn test_separators_between_digits_survive() {
        assert_eq!(normalize("Paguei R$ 1.234,56."), "paguei r$ 1.234,56");
        assert_eq!(normalize("foram 12.5 reais, ok"), "foram 12.5 reais ok");
    }

    #[test]
    fn test_contractions_expand() {
        assert_eq!(normalize("Tô devendo pro banco"), "estou devendo para o banco");
        assert_eq!(normalize("deixa pra lá"), "deixa para lá");
    }

    #[test]
    fn test_voice_corrections_are_whole_words() {
        assert_eq!(normalize("cincuenta pão no ifi"), "cinquenta pau no ifood");
        assert_eq!(normalize("pãozinho"), "pãozinho");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!"), "");
    }
}
