//! Rolling context of recent turns
//!
//! A bounded FIFO of what the last few commands were about. An
//! underspecified follow-up ("mais cinquenta") inherits its transaction type
//! from the most recent entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use voice_ledger_core::{Amount, TransactionType};

/// Snapshot of one processed command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Category slug
    pub category: Option<String>,
    pub amount: Option<Amount>,
    pub timestamp: DateTime<Utc>,
}

impl ContextEntry {
    pub fn new(
        transaction_type: Option<TransactionType>,
        category: Option<String>,
        amount: Option<Amount>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_type,
            category,
            amount,
            timestamp,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextStack {
    entries: VecDeque<ContextEntry>,
    capacity: usize,
}

impl ContextStack {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot, evicting the oldest beyond capacity
    pub fn push(&mut self, entry: ContextEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&ContextEntry> {
        self.entries.back()
    }

    /// Type of the most recent entry, if that entry has one
    pub fn latest_type(&self) -> Option<TransactionType> {
        self.latest().and_then(|e| e.transaction_type)
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ContextEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: i64) -> ContextEntry {
        ContextEntry::new(
            Some(TransactionType::Expense),
            None,
            Some(Amount::from_centavos(amount)),
            Utc::now(),
        )
    }

    #[test]
    fn test_evicts_oldest() {
        let mut stack = ContextStack::new(5);
        for i in 1..=6 {
            stack.push(entry(i));
        }
        assert_eq!(stack.len(), 5);
        assert_eq!(
            stack.iter().next().and_then(|e| e.amount),
            Some(Amount::from_centavos(2))
        );
        assert_eq!(stack.latest().and_then(|e| e.amount), Some(Amount::from_centavos(6)));
    }

    #[test]
    fn test_latest_type_only_looks_at_last_entry() {
        let mut stack = ContextStack::new(5);
        assert_eq!(stack.latest_type(), None);

        stack.push(entry(100));
        assert_eq!(stack.latest_type(), Some(TransactionType::Expense));

        stack.push(ContextEntry::new(None, Some("outros".into()), None, Utc::now()));
        assert_eq!(stack.latest_type(), None);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut stack = ContextStack::new(0);
        stack.push(entry(1));
        stack.push(entry(2));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.capacity(), 1);
    }
}
