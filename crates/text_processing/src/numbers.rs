//! Spelled-out numbers and digit strings
//!
//! Handles Brazilian number words ("cento e vinte e cinco", "dois mil e
//! quinhentos") and digit strings whose separators have to be
//! disambiguated (`1.234,56` vs `1.234` vs `12.5`).

use voice_ledger_config::NumberLexicon;

use crate::phrases::alternation;

/// Number-word parser built from the lexicon
pub struct NumberWords {
    lexicon: NumberLexicon,
    chain: String,
}

impl NumberWords {
    pub fn new(lexicon: &NumberLexicon) -> Self {
        let word = alternation(
            lexicon
                .units
                .keys()
                .chain(lexicon.multipliers.keys())
                .map(String::as_str),
        );
        let chain = format!(r"(?:{w})\b(?:\s+(?:e\s+)?(?:{w})\b)*", w = word);
        Self {
            lexicon: lexicon.clone(),
            chain,
        }
    }

    /// Regex fragment matching a run of number words, `e` allowed between them
    pub fn chain_pattern(&self) -> &str {
        &self.chain
    }

    pub fn is_number_word(&self, word: &str) -> bool {
        self.lexicon.is_number_word(word)
    }

    /// Value of a run of number words
    ///
    /// `cem`/`cento` start a hundred or scale what came before; other unit
    /// words add up; a scale word multiplies what came before (or one) into
    /// the total. Returns `None` if any word is not a number word.
    pub fn words_to_number(&self, text: &str) -> Option<f64> {
        let mut total: u64 = 0;
        let mut current: u64 = 0;
        let mut seen = false;

        for word in text.split_whitespace() {
            if word == "e" {
                continue;
            }
            if let Some(value) = self.lexicon.value_of(word) {
                if value == 100 {
                    current = if current == 0 { 100 } else { current.saturating_mul(100) };
                } else {
                    current = current.saturating_add(value);
                }
            } else if let Some(multiplier) = self.lexicon.multiplier_of(word) {
                total = total.saturating_add(current.max(1).saturating_mul(multiplier));
                current = 0;
            } else {
                return None;
            }
            seen = true;
        }

        seen.then(|| total.saturating_add(current) as f64)
    }

    /// Quantity written in digits or words ("2", "1,5", "duas", "2,5 mil")
    ///
    /// Digits may be followed by scale words, which multiply them.
    pub fn parse_quantity(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return self.words_to_number(text);
        }

        let end = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(text.len());
        let (digits, scale) = text.split_at(end);
        let base = normalize_digital(digits)?;
        match scale.trim() {
            "" => Some(base),
            words => self.words_to_number(words).map(|m| base * m),
        }
    }
}

/// Parse a digit string using Brazilian separator conventions
///
/// - both `.` and `,`: dots group thousands, the comma is the decimal mark
/// - only `,`: decimal mark when followed by one or two digits, else grouping
/// - only `.`: decimal mark when it appears once followed by one or two
///   digits, else grouping
pub fn normalize_digital(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let has_comma = raw.contains(',');
    let has_dot = raw.contains('.');

    let cleaned = match (has_comma, has_dot) {
        (true, true) => raw.replace('.', "").replacen(',', ".", 1),
        (true, false) => {
            let decimals = raw.rsplit(',').next().map_or(0, str::len);
            if raw.matches(',').count() == 1 && decimals <= 2 {
                raw.replace(',', ".")
            } else {
                raw.replace(',', "")
            }
        }
        (false, true) => {
            let parts: Vec<&str> = raw.split('.').collect();
            if parts.len() == 2 && parts[1].len() <= 2 {
                raw.to_string()
            } else {
                raw.replace('.', "")
            }
        }
        (false, false) => raw.to_string(),
    };

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> NumberWords {
        NumberWords::new(&NumberLexicon::default())
    }

    #[test]
    fn test_words_to_number() {
        let w = words();
        assert_eq!(w.words_to_number("cinquenta"), Some(50.0));
        assert_eq!(w.words_to_number("cento e vinte e cinco"), Some(125.0));
        assert_eq!(w.words_to_number("cem"), Some(100.0));
        assert_eq!(w.words_to_number("dois mil e quinhentos"), Some(2500.0));
        assert_eq!(w.words_to_number("mil"), Some(1000.0));
        assert_eq!(w.words_to_number("um milhão e duzentos mil"), Some(1_200_000.0));
        assert_eq!(w.words_to_number("trezentos e quarenta mil"), Some(340_000.0));
    }

    #[test]
    fn test_words_to_number_rejects_other_words() {
        let w = words();
        assert_eq!(w.words_to_number("cinquenta reais"), None);
        assert_eq!(w.words_to_number(""), None);
    }

    #[test]
    fn test_normalize_digital() {
        assert_eq!(normalize_digital("1.234,56"), Some(1234.56));
        assert_eq!(normalize_digital("1.234"), Some(1234.0));
        assert_eq!(normalize_digital("12.5"), Some(12.5));
        assert_eq!(normalize_digital("12,50"), Some(12.5));
        assert_eq!(normalize_digital("1,500"), Some(1500.0));
        assert_eq!(normalize_digital("1.000.000"), Some(1_000_000.0));
        assert_eq!(normalize_digital("1234.5"), Some(1234.5));
        assert_eq!(normalize_digital("abc"), None);
    }

    #[test]
    fn test_parse_quantity() {
        let w = words();
        assert_eq!(w.parse_quantity("2"), Some(2.0));
        assert_eq!(w.parse_quantity("duas"), Some(2.0));
        assert_eq!(w.parse_quantity("1,5"), Some(1.5));
        assert_eq!(w.parse_quantity("5 mil"), Some(5000.0));
        assert_eq!(w.parse_quantity("2,5 mil"), Some(2500.0));
        assert_eq!(w.parse_quantity("3 reais"), None);
    }

    #[test]
    fn test_chain_pattern_matches_runs() {
        let w = words();
        let re = regex::Regex::new(&format!("^{}$", w.chain_pattern())).unwrap();
        assert!(re.is_match("cento e vinte e cinco"));
        assert!(re.is_match("dezoito"));
        assert!(!re.is_match("cinquenta e"));
    }
}
