//! Intent classification results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::TransactionType;
use crate::entities::PaymentStatus;

/// The classified purpose of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    CreateTransaction,
    ScheduleTransaction,
    CreateCategory,
    MarkAsPaid,
    MarkAsPending,
    UpdateTransaction,
    DeleteTransaction,
    SearchTransaction,
    ListTransactions,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::CreateTransaction,
        Intent::ScheduleTransaction,
        Intent::CreateCategory,
        Intent::MarkAsPaid,
        Intent::MarkAsPending,
        Intent::UpdateTransaction,
        Intent::DeleteTransaction,
        Intent::SearchTransaction,
        Intent::ListTransactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CreateTransaction => "create_transaction",
            Intent::ScheduleTransaction => "schedule_transaction",
            Intent::CreateCategory => "create_category",
            Intent::MarkAsPaid => "mark_as_paid",
            Intent::MarkAsPending => "mark_as_pending",
            Intent::UpdateTransaction => "update_transaction",
            Intent::DeleteTransaction => "delete_transaction",
            Intent::SearchTransaction => "search_transaction",
            Intent::ListTransactions => "list_transactions",
        }
    }

    /// Intents that produce a new transaction and go through slot filling
    pub fn creates_transaction(&self) -> bool {
        matches!(self, Intent::CreateTransaction | Intent::ScheduleTransaction)
    }

    /// Intents that act on an existing transaction
    pub fn targets_transaction(&self) -> bool {
        matches!(
            self,
            Intent::MarkAsPaid
                | Intent::MarkAsPending
                | Intent::UpdateTransaction
                | Intent::DeleteTransaction
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| format!("unknown intent: {}", s))
    }
}

/// Which part of a transaction an update command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "value", rename_all = "snake_case")]
pub enum UpdateSubIntent {
    /// Status change, with the requested status if one was said
    Status(Option<PaymentStatus>),
    Amount,
    Date,
    Category,
    Description,
}

/// Time window for listing transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPeriod {
    Future,
    Past,
    CurrentMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    DueDate,
    Date,
}

/// Filters spoken in a listing command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListCriteria {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub status: Option<PaymentStatus>,
    pub period: Option<ListPeriod>,
    pub sort_by: SortBy,
}

/// Intent-specific data captured by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntentMetadata {
    /// Free-text reference to an existing transaction
    pub transaction_reference: Option<String>,
    /// Name for a category to be created
    pub category_name: Option<String>,
    pub category_type: Option<TransactionType>,
    pub sub_intent: Option<UpdateSubIntent>,
    pub search_term: Option<String>,
    pub list_criteria: Option<ListCriteria>,
}

impl IntentMetadata {
    pub fn is_empty(&self) -> bool {
        *self == IntentMetadata::default()
    }
}

/// Classifier output: exactly one intent per command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    /// Confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub metadata: IntentMetadata,
}

impl IntentResult {
    pub fn new(intent: Intent, confidence: f64) -> Self {
        Self {
            intent,
            confidence: confidence.clamp(0.0, 1.0),
            metadata: IntentMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: IntentMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl Default for IntentResult {
    fn default() -> Self {
        Self::new(Intent::CreateTransaction, 0.5)
    }
}
