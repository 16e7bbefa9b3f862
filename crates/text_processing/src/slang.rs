//! Colloquialism detection
//!
//! Slang does not change any extracted value. Its presence only earns the
//! command a small confidence bonus.

use serde::{Deserialize, Serialize};

use voice_ledger_config::SlangLexicon;

use crate::phrases::PhraseSet;

/// Slang found in a command, per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlangUsage {
    pub money: Vec<String>,
    pub transaction: Vec<String>,
    pub category: Vec<String>,
    pub status: Vec<String>,
}

impl SlangUsage {
    pub fn any(&self) -> bool {
        !(self.money.is_empty()
            && self.transaction.is_empty()
            && self.category.is_empty()
            && self.status.is_empty())
    }
}

pub struct SlangDetector {
    money: PhraseSet,
    transaction: PhraseSet,
    category: PhraseSet,
    status: PhraseSet,
}

impl SlangDetector {
    pub fn new(lexicon: &SlangLexicon) -> Self {
        Self {
            money: PhraseSet::new(&lexicon.money),
            transaction: PhraseSet::new(&lexicon.transaction),
            category: PhraseSet::new(&lexicon.category),
            status: PhraseSet::new(&lexicon.status),
        }
    }

    pub fn detect(&self, text: &str) -> SlangUsage {
        let owned = |set: &PhraseSet| -> Vec<String> {
            set.matched(text).into_iter().map(str::to_string).collect()
        };
        SlangUsage {
            money: owned(&self.money),
            transaction: owned(&self.transaction),
            category: owned(&self.category),
            status: owned(&self.status),
        }
    }
}
