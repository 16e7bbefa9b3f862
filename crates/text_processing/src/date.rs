//! Relative date resolution
//!
//! Only relative phrases are understood ("hoje", "ontem", "amanhã",
//! "anteontem", "depois de amanhã"). A command without one refers to today,
//! so the date is never missing.

use chrono::{Duration, NaiveDate};
use regex::Regex;

use voice_ledger_config::DateLexicon;

use crate::phrases::phrase_regex;

pub struct DateExtractor {
    /// Checked in lexicon order; the first phrase found wins
    relative_days: Vec<(Regex, i64)>,
}

impl DateExtractor {
    pub fn new(lexicon: &DateLexicon) -> Self {
        let relative_days = lexicon
            .relative_days
            .iter()
            .filter_map(|day| phrase_regex(&day.phrase).map(|re| (re, day.offset_days)))
            .collect();
        Self { relative_days }
    }

    /// Date mentioned in the command, if any
    pub fn find(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let offset = self
            .relative_days
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, offset)| *offset)?;
        today.checked_add_signed(Duration::days(offset))
    }

    /// Date mentioned in the command, today otherwise
    pub fn extract(&self, text: &str, today: NaiveDate) -> NaiveDate {
        self.find(text, today).unwrap_or(today)
    }
}
