//! Amount extraction
//!
//! Attempts run from the most specific phrasing to the most generic:
//!
//! 1. Fixed phrases ("meio milhão")
//! 2. Banknote nicknames with an optional quantity ("duas onças")
//! 3. Quantity + basic slang unit ("cinquenta pau", "20 conto")
//! 4. Quantity + thousand slang ("dois k", "um milão", "barão")
//! 5. Fraction + basic slang unit ("meio pau")
//! 6. Digits ("2,5 mil", "R$ 1.234,56", "12.5")
//! 7. Spelled-out numbers ("cento e vinte reais")
//!
//! The first attempt that yields a value wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

use voice_ledger_config::constants::amounts;
use voice_ledger_config::{MoneyLexicon, NumberLexicon};
use voice_ledger_core::Amount;

use crate::numbers::{normalize_digital, NumberWords};
use crate::phrases::{alternation, phrase_regex};
use crate::recurrence::strip_recurrence;

// Group 1 is the value. A group 2 means the digits continue past what the
// pattern can read, so the match is skipped.
static GROUPED_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.,])(?:r\$\s*)?(\d{1,3}(?:\.\d{3})*,\d{1,2})(\d)?").unwrap()
});

static GROUPED_THOUSANDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.,])(?:r\$\s*)?(\d{1,3}(?:\.\d{3})+)(\s*(?:vírgula|,)|\d)?").unwrap()
});

static SINGLE_THOUSANDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\d.,])(?:r\$\s*)?(\d+\.\d{3})(\d)?").unwrap());

static COMMA_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\d.,])(?:r\$\s*)?(\d+,\d{1,2})(\d)?").unwrap());

static CURRENCY_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.,])(\d+(?:[.,]\d+)?)\s*(?:(?:reais|real)\b|r\$)").unwrap()
});

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\d.,])(?:r\$\s*)?(\d+(?:\.\d{1,2})?)(\d)?").unwrap());

static THOUSAND_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmil\b").unwrap());

struct NotePattern {
    regex: Regex,
    value: f64,
    requires_quantity: bool,
}

/// Extracts monetary amounts from normalized commands
pub struct AmountExtractor {
    numbers: NumberWords,
    special_phrases: Vec<(Regex, f64)>,
    notes: Vec<NotePattern>,
    basic_units: Option<Regex>,
    big_multipliers: Option<Regex>,
    big_values: HashMap<String, f64>,
    fractions: Option<Regex>,
    fraction_values: HashMap<String, f64>,
    digit_multiplier: Option<Regex>,
    currency_words: HashSet<String>,
}

impl AmountExtractor {
    pub fn new(numbers: &NumberLexicon, money: &MoneyLexicon) -> Self {
        let number_words = NumberWords::new(numbers);
        let chain = number_words.chain_pattern().to_string();
        let multiplier_alt = alternation(numbers.multipliers.keys().map(String::as_str));
        // digits may carry a scale word ("5 mil conto")
        let quantity = match non_empty(&multiplier_alt) {
            Some(mults) => format!(r"\d+(?:[.,]\d+)?(?:\s*(?:{})\b)?|{}", mults, chain),
            None => format!(r"\d+(?:[.,]\d+)?|{}", chain),
        };

        let special_phrases = money
            .special_phrases
            .iter()
            .filter_map(|p| phrase_regex(&p.phrase).map(|re| (re, p.value)))
            .collect();

        let notes = money
            .notes
            .iter()
            .filter_map(|note| {
                let spellings = alternation(note.spellings());
                let pattern = format!(
                    r"(?:^|[^\w])(?:({})\s+)?(?:{})(?:[^\w]|$)",
                    quantity, spellings
                );
                Regex::new(&pattern).ok().map(|regex| NotePattern {
                    regex,
                    value: note.value,
                    requires_quantity: note.requires_quantity,
                })
            })
            .collect();

        let units = alternation(money.basic_units.iter().map(String::as_str));
        let basic_units = non_empty(&units).and_then(|units| {
            Regex::new(&format!(
                r"(?:^|[^\w])({})\s*(?:{})(?:[^\w]|$)",
                quantity, units
            ))
            .ok()
        });

        let fraction_alt = alternation(money.fractions.iter().map(|f| f.phrase.as_str()));
        let bigs = alternation(money.big_multipliers.iter().map(|m| m.phrase.as_str()));
        let big_multipliers = non_empty(&bigs).and_then(|bigs| {
            let quantity = match non_empty(&fraction_alt) {
                Some(fractions) => format!(r"\d+(?:[.,]\d+)?|{}|{}", fractions, chain),
                None => quantity.clone(),
            };
            Regex::new(&format!(
                r"(?:^|[^\w])(?:({})\s*)?({})(?:[^\w]|$)",
                quantity, bigs
            ))
            .ok()
        });

        let fractions = match (non_empty(&fraction_alt), non_empty(&units)) {
            (Some(fractions), Some(units)) => Regex::new(&format!(
                r"(?:^|[^\w])({})\s+(?:{})(?:[^\w]|$)",
                fractions, units
            ))
            .ok(),
            _ => None,
        };

        let digit_multiplier = non_empty(&multiplier_alt).and_then(|mults| {
            Regex::new(&format!(
                r"(?:^|[^\d.,])(?:r\$\s*)?(\d+(?:[.,]\d+)?)\s*({})\b",
                mults
            ))
            .ok()
        });

        Self {
            numbers: number_words,
            special_phrases,
            notes,
            basic_units,
            big_multipliers,
            big_values: money
                .big_multipliers
                .iter()
                .map(|m| (m.phrase.clone(), m.value))
                .collect(),
            fractions,
            fraction_values: money
                .fractions
                .iter()
                .map(|f| (f.phrase.clone(), f.value))
                .collect(),
            digit_multiplier,
            currency_words: money.currency_words.iter().cloned().collect(),
        }
    }

    /// Raw amount in reais, before plausibility checks
    pub fn extract(&self, text: &str) -> Option<f64> {
        let attempts: [(&str, fn(&Self, &str) -> Option<f64>); 7] = [
            ("special_phrase", Self::extract_special_phrase),
            ("note", Self::extract_note),
            ("slang_unit", Self::extract_slang_unit),
            ("big_multiplier", Self::extract_big_multiplier),
            ("fraction", Self::extract_fraction),
            ("digits", Self::extract_digits),
            ("words", Self::extract_words),
        ];

        attempts.iter().find_map(|(source, attempt)| {
            let value = attempt(self, text)?;
            tracing::debug!(amount = value, source = *source, "amount matched");
            Some(value)
        })
    }

    /// Amount that passed the plausibility checks
    ///
    /// Rejects zero, negative and absurdly large values, and values below a
    /// thousand when the command says "mil".
    pub fn extract_amount(&self, text: &str) -> Option<Amount> {
        let value = self.extract(text)?;
        if !is_plausible(value, text) {
            tracing::warn!(amount = value, "rejecting implausible amount");
            return None;
        }
        Amount::from_reais(value).filter(Amount::is_positive)
    }

    fn extract_special_phrase(&self, text: &str) -> Option<f64> {
        self.special_phrases
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, value)| *value)
    }

    fn extract_note(&self, text: &str) -> Option<f64> {
        self.notes.iter().find_map(|note| {
            note.regex.captures_iter(text).find_map(|caps| {
                let quantity = caps.get(1).and_then(|q| self.numbers.parse_quantity(q.as_str()));
                if note.requires_quantity && quantity.is_none() {
                    return None;
                }
                let quantity = quantity.filter(|q| *q > 0.0).unwrap_or(1.0);
                Some(note.value * quantity)
            })
        })
    }

    fn extract_slang_unit(&self, text: &str) -> Option<f64> {
        let re = self.basic_units.as_ref()?;
        re.captures_iter(text).find_map(|caps| {
            self.numbers
                .parse_quantity(caps.get(1)?.as_str())
                .filter(|v| *v > 0.0)
        })
    }

    fn extract_big_multiplier(&self, text: &str) -> Option<f64> {
        let re = self.big_multipliers.as_ref()?;
        re.captures_iter(text).find_map(|caps| {
            let phrase = caps.get(2)?.as_str();
            let multiplier = *self.big_values.get(phrase)?;
            match caps.get(1) {
                Some(q) => {
                    let q = q.as_str();
                    let quantity = self
                        .fraction_values
                        .get(q)
                        .copied()
                        .or_else(|| self.numbers.parse_quantity(q))?;
                    Some(quantity * multiplier).filter(|v| *v > 0.0)
                }
                // single letters like "k" need a quantity
                None if phrase.chars().count() > 1 => Some(multiplier),
                None => None,
            }
        })
    }

    fn extract_fraction(&self, text: &str) -> Option<f64> {
        let caps = self.fractions.as_ref()?.captures(text)?;
        self.fraction_values.get(caps.get(1)?.as_str()).copied()
    }

    fn extract_digits(&self, text: &str) -> Option<f64> {
        let text = strip_recurrence(text);

        self.extract_digit_multiplier(&text)
            .or_else(|| first_digit_value(&GROUPED_DECIMAL, &text))
            .or_else(|| first_digit_value(&GROUPED_THOUSANDS, &text))
            .or_else(|| first_digit_value(&SINGLE_THOUSANDS, &text))
            .or_else(|| first_digit_value(&COMMA_DECIMAL, &text))
            .or_else(|| first_digit_value(&CURRENCY_SUFFIX, &text))
            .or_else(|| first_digit_value(&PLAIN_NUMBER, &text))
    }

    fn extract_digit_multiplier(&self, text: &str) -> Option<f64> {
        let re = self.digit_multiplier.as_ref()?;
        let caps = re.captures(text)?;
        let base = normalize_digital(caps.get(1)?.as_str())?;
        let multiplier = self.numbers.words_to_number(caps.get(2)?.as_str())?;
        Some(base * multiplier)
    }

    /// First run of number words with a positive value
    ///
    /// A lone "um"/"uma" is an article unless a currency word follows it.
    fn extract_words(&self, text: &str) -> Option<f64> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut i = 0;

        while i < tokens.len() {
            if !self.numbers.is_number_word(tokens[i]) {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i + 1;
            loop {
                match tokens.get(end) {
                    Some(t) if self.numbers.is_number_word(t) => end += 1,
                    Some(&"e")
                        if tokens
                            .get(end + 1)
                            .is_some_and(|t| self.numbers.is_number_word(t)) =>
                    {
                        end += 2
                    }
                    _ => break,
                }
            }

            let run = tokens[start..end].join(" ");
            let value = self.numbers.words_to_number(&run).unwrap_or(0.0);
            let lone_one = end - start == 1 && value == 1.0;
            let currency_follows = tokens
                .get(end)
                .is_some_and(|t| self.currency_words.contains(*t));

            if value > 0.0 && (!lone_one || currency_follows) {
                return Some(value);
            }
            i = end;
        }

        None
    }
}

fn first_digit_value(re: &Regex, text: &str) -> Option<f64> {
    re.captures_iter(text).find_map(|caps: Captures<'_>| {
        if caps.get(2).is_some() {
            return None;
        }
        normalize_digital(caps.get(1)?.as_str())
    })
}

fn is_plausible(value: f64, text: &str) -> bool {
    value > 0.0
        && value <= amounts::MAX_AMOUNT
        && (!THOUSAND_WORD.is_match(text) || value >= amounts::THOUSAND_CONTEXT_MIN)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> AmountExtractor {
        AmountExtractor::new(&NumberLexicon::default(), &MoneyLexicon::default())
    }

    fn amount(text: &str) -> Option<f64> {
        extractor().extract(text)
    }

    #[test]
    fn test_money_slang() {
        assert_eq!(amount("cinquenta pau"), Some(50.0));
        assert_eq!(amount("gastei 20 conto no bar"), Some(20.0));
        assert_eq!(amount("cento e vinte pila"), Some(120.0));
        assert_eq!(amount("dois k"), Some(2000.0));
        assert_eq!(amount("5k de bônus"), Some(5000.0));
        assert_eq!(amount("um milão"), Some(1000.0));
        assert_eq!(amount("recebi um barão"), Some(1000.0));
        assert_eq!(amount("faturei barão"), Some(1000.0));
        assert_eq!(amount("meio milão"), Some(500.0));
        assert_eq!(amount("meio pau"), Some(0.5));
    }

    #[test]
    fn test_scaled_digits_before_slang_unit() {
        assert_eq!(amount("gastei 5 mil conto no carro"), Some(5000.0));
        assert_eq!(amount("2 mil pau"), Some(2000.0));
        assert_eq!(amount("2,5 mil pila"), Some(2500.0));
        assert_eq!(amount("dois mil pau"), Some(2000.0));
        assert_eq!(
            extractor()
                .extract_amount("recebi 3 mil reais")
                .map(|a| a.centavos()),
            Some(300_000)
        );
    }

    #[test]
    fn test_notes() {
        assert_eq!(amount("uma onça"), Some(50.0));
        assert_eq!(amount("duas onças"), Some(100.0));
        assert_eq!(amount("3 peixes"), Some(300.0));
        assert_eq!(amount("um vintão"), Some(20.0));
        assert_eq!(amount("ganhei um cinquentão"), Some(50.0));
    }

    #[test]
    fn test_notes_needing_quantity() {
        assert_eq!(amount("anotei na nota"), None);
    }

    #[test]
    fn test_special_phrases() {
        assert_eq!(amount("vendi a casa por meio milhão"), Some(500_000.0));
        assert_eq!(amount("um quarto de milhão"), Some(250_000.0));
    }

    #[test]
    fn test_digits() {
        assert_eq!(amount("paguei r$ 1.234,56"), Some(1234.56));
        assert_eq!(amount("1.234"), Some(1234.0));
        assert_eq!(amount("12.5"), Some(12.5));
        assert_eq!(amount("gastei 49,90 na farmácia"), Some(49.9));
        assert_eq!(amount("1234,56"), Some(1234.56));
        assert_eq!(amount("r$50"), Some(50.0));
        assert_eq!(amount("2,5 mil de salário"), Some(2500.0));
        assert_eq!(amount("3 milhões"), Some(3_000_000.0));
    }

    #[test]
    fn test_recurrence_day_is_not_an_amount() {
        assert_eq!(amount("netflix todo dia 15 55 reais"), Some(55.0));
    }

    #[test]
    fn test_spelled_numbers() {
        assert_eq!(amount("cinquenta reais"), Some(50.0));
        assert_eq!(amount("gastei dois mil e quinhentos no aluguel"), Some(2500.0));
        assert_eq!(amount("um real"), Some(1.0));
        assert_eq!(amount("comprei um pão"), None);
    }

    #[test]
    fn test_nothing_to_extract() {
        assert_eq!(amount("gastei no mercado"), None);
        assert_eq!(amount(""), None);
    }

    #[test]
    fn test_validation() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract_amount("cinquenta reais").map(|a| a.centavos()),
            Some(5000)
        );
        // "mil" present but the value read is below a thousand
        assert!(extractor.extract_amount("mil 50 reais").is_none());
        assert!(extractor.extract_amount("0 reais").is_none());
    }
}
