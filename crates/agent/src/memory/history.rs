//! Command history for a session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use voice_ledger_core::{Intent, NormalizedCommand};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub original: String,
    pub normalized: NormalizedCommand,
    pub intent: Intent,
    pub timestamp: DateTime<Utc>,
}

/// Last `capacity` processed commands, oldest first
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record(
        &mut self,
        original: &str,
        normalized: &NormalizedCommand,
        intent: Intent,
        at: DateTime<Utc>,
    ) {
        self.entries.push_back(HistoryEntry {
            original: original.to_string(),
            normalized: normalized.clone(),
            intent,
            timestamp: at,
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
