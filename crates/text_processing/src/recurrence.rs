//! Monthly recurrence ("todo dia 10", "sempre no dia 5")

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use voice_ledger_core::Recurrence;

static RECURRENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:todo dia|sempre no dia)\s+(\d{1,2})\b").unwrap());

/// Day-of-month recurrence, if the command states one
pub fn extract_recurrence(text: &str) -> Option<Recurrence> {
    let caps = RECURRENCE_PATTERN.captures(text)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let recurrence = Recurrence::monthly(day);
    if recurrence.is_none() {
        tracing::debug!(day, "ignoring recurrence outside 1-31");
    }
    recurrence
}

/// Remove recurrence phrases so their day number is not read as an amount
pub fn strip_recurrence(text: &str) -> Cow<'_, str> {
    RECURRENCE_PATTERN.replace_all(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_recurrence() {
        assert_eq!(
            extract_recurrence("aluguel todo dia 10 de 1.500 reais"),
            Some(Recurrence { day: 10 })
        );
        assert_eq!(extract_recurrence("sempre no dia 5"), Some(Recurrence { day: 5 }));
        assert_eq!(extract_recurrence("todo dia 45"), None);
        assert_eq!(extract_recurrence("paguei 10 reais"), None);
    }

    #[test]
    fn test_strip_recurrence() {
        assert_eq!(strip_recurrence("netflix todo dia 15 55 reais"), "netflix   55 reais");
    }
}
