//! Learned command shapes
//!
//! Commands are abstracted to a shape (digits become `NUM`, money slang
//! becomes `MONEY`, currency words become `CURRENCY`) so that "gastei 50
//! pau no mercado" and "gastei 80 pau no mercado" share one entry. A shape
//! seen before only nudges confidence; it never fills a value.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};

use voice_ledger_config::MoneyLexicon;
use voice_ledger_core::{Error, NormalizedCommand, Result, TransactionType};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// One remembered extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub command: String,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Category slug
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Serialized form of the memo, for persistence across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternExport {
    pub patterns: BTreeMap<String, Vec<LearnedPattern>>,
    pub exported_at: DateTime<Utc>,
}

/// Reduces a normalized command to its shape
#[derive(Debug, Clone)]
pub struct CommandShaper {
    money: HashSet<String>,
    currency: HashSet<String>,
}

impl CommandShaper {
    pub fn new(money: &MoneyLexicon) -> Self {
        Self {
            money: money
                .basic_units
                .iter()
                .cloned()
                .chain(money.big_multipliers.iter().map(|m| m.phrase.clone()))
                .collect(),
            currency: money.currency_words.iter().cloned().collect(),
        }
    }

    pub fn shape(&self, command: &str) -> String {
        command
            .split_whitespace()
            .map(|token| {
                if self.money.contains(token) {
                    "MONEY".to_string()
                } else if self.currency.contains(token) {
                    "CURRENCY".to_string()
                } else {
                    DIGITS.replace_all(token, "NUM").into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct PatternMemo {
    patterns: BTreeMap<String, VecDeque<LearnedPattern>>,
    per_shape: usize,
    shaper: CommandShaper,
}

impl PatternMemo {
    pub fn new(per_shape: usize, money: &MoneyLexicon) -> Self {
        Self {
            patterns: BTreeMap::new(),
            per_shape: per_shape.max(1),
            shaper: CommandShaper::new(money),
        }
    }

    pub fn shape(&self, command: &NormalizedCommand) -> String {
        self.shaper.shape(command.as_str())
    }

    /// Remember an extraction under the command's shape
    pub fn learn(
        &mut self,
        command: &NormalizedCommand,
        transaction_type: Option<TransactionType>,
        category: Option<String>,
        at: DateTime<Utc>,
    ) {
        let shape = self.shape(command);
        let entries = self.patterns.entry(shape.clone()).or_default();
        entries.push_back(LearnedPattern {
            command: command.as_str().to_string(),
            transaction_type,
            category,
            timestamp: at,
        });
        while entries.len() > self.per_shape {
            entries.pop_front();
        }
        tracing::debug!(shape = %shape, entries = entries.len(), "pattern learned");
    }

    /// Most recent extraction with the same shape
    pub fn lookup(&self, command: &NormalizedCommand) -> Option<&LearnedPattern> {
        self.patterns.get(&self.shape(command)).and_then(|e| e.back())
    }

    /// Number of distinct shapes
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn entries_for(&self, command: &NormalizedCommand) -> usize {
        self.patterns.get(&self.shape(command)).map_or(0, VecDeque::len)
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    pub fn export(&self) -> PatternExport {
        PatternExport {
            patterns: self
                .patterns
                .iter()
                .map(|(shape, entries)| (shape.clone(), entries.iter().cloned().collect()))
                .collect(),
            exported_at: Utc::now(),
        }
    }

    /// Replace the memo with imported patterns, keeping the newest per shape
    pub fn import(&mut self, export: PatternExport) {
        self.patterns = export
            .patterns
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(shape, entries)| {
                let skip = entries.len().saturating_sub(self.per_shape);
                (shape, entries.into_iter().skip(skip).collect())
            })
            .collect();
        tracing::debug!(shapes = self.patterns.len(), "patterns imported");
    }

    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export()).map_err(Error::from)
    }

    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let export: PatternExport = serde_json::from_str(json)?;
        self.import(export);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> NormalizedCommand {
        NormalizedCommand::from_normalized(text.to_string())
    }

    fn memo() -> PatternMemo {
        PatternMemo::new(10, &MoneyLexicon::default())
    }

    #[test]
    fn test_shape() {
        let shaper = CommandShaper::new(&MoneyLexicon::default());
        assert_eq!(shaper.shape("gastei 50 pau no mercado"), "gastei NUM MONEY no mercado");
        assert_eq!(shaper.shape("recebi 1200 reais"), "recebi NUM CURRENCY");
        assert_eq!(shaper.shape("dois k de freela"), "dois MONEY de freela");
    }

    #[test]
    fn test_same_shape_matches() {
        let mut m = memo();
        m.learn(
            &command("gastei 50 pau no mercado"),
            Some(TransactionType::Expense),
            Some("alimentacao".into()),
            Utc::now(),
        );

        let found = m.lookup(&command("gastei 80 conto no mercado")).unwrap();
        assert_eq!(found.category.as_deref(), Some("alimentacao"));
        assert!(m.lookup(&command("recebi 80 reais")).is_none());
    }

    #[test]
    fn test_bounded_per_shape() {
        let mut m = memo();
        for i in 0..15 {
            m.learn(&command(&format!("gastei {} reais", i)), None, None, Utc::now());
        }
        assert_eq!(m.len(), 1);
        assert_eq!(m.entries_for(&command("gastei 1 reais")), 10);
        assert_eq!(
            m.lookup(&command("gastei 1 reais")).unwrap().command,
            "gastei 14 reais"
        );
    }

    #[test]
    fn test_export_import() {
        let mut m = memo();
        m.learn(
            &command("recebi 100 reais"),
            Some(TransactionType::Income),
            None,
            Utc::now(),
        );
        let json = m.export_json().unwrap();
        assert!(json.contains("exported_at"));

        let mut restored = memo();
        restored.import_json(&json).unwrap();
        assert_eq!(
            restored.lookup(&command("recebi 5 reais")).unwrap().transaction_type,
            Some(TransactionType::Income)
        );
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut m = memo();
        assert!(m.import_json("{\"nope\": 1}").is_err());
        assert!(m.is_empty());
    }
}
