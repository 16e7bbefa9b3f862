//! Whole-word phrase matching
//!
//! Lexicon phrases are matched on word boundaries so that `pago` does not
//! fire inside `pagou` and `k` does not fire inside `kg`. Phrases may start
//! or end with non-word characters (`r$`, `13º`), so the boundary is written
//! as "start of text or a non-word character" instead of `\b`.

use regex::Regex;

/// Regex matching `phrase` as a whole word or word sequence
pub fn phrase_regex(phrase: &str) -> Option<Regex> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(phrase))).ok()
}

/// Regex alternation of `items`, longest first so that `dezoito` wins over `dez`
pub fn alternation<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut items: Vec<&str> = items.into_iter().filter(|s| !s.trim().is_empty()).collect();
    items.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    items.dedup();
    items
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// A compiled list of phrases
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    phrases: Vec<(String, Regex)>,
}

impl PhraseSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .filter_map(|p| {
                let phrase = p.as_ref().trim().to_string();
                phrase_regex(&phrase).map(|regex| (phrase, regex))
            })
            .collect();
        Self { phrases }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Number of distinct phrases present in `text`
    pub fn count(&self, text: &str) -> usize {
        self.phrases.iter().filter(|(_, re)| re.is_match(text)).count()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.phrases.iter().any(|(_, re)| re.is_match(text))
    }

    /// Phrases present in `text`, in list order
    pub fn matched<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.phrases
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.as_str())
            .collect()
    }

    /// First phrase in list order present in `text`
    pub fn first_match<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.phrases
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.as_str())
    }
}
