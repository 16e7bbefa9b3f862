//! Transaction drafts
//!
//! A draft is the orchestrator's output for one command. It is complete
//! when none of the required fields (type, amount, description) is missing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::{CategoryMatch, NewCategoryProposal, TransactionType};
use crate::command::{CommandContext, NormalizedCommand};
use crate::entities::{ExtractedEntities, Field, PaymentStatus, Recurrence};
use crate::error::{Error, Result};
use crate::intent::IntentResult;
use crate::money::Amount;

/// Signals that contributed to a draft's confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMetadata {
    pub slang_detected: bool,
    /// Type was inherited from a previous turn or inferred from verbs
    pub context_enhanced: bool,
    /// The command shape matched a learned pattern
    pub pattern_matched: bool,
    pub processed_at: DateTime<Utc>,
}

impl Default for DraftMetadata {
    fn default() -> Self {
        Self {
            slang_detected: false,
            context_enhanced: false,
            pattern_matched: false,
            processed_at: Utc::now(),
        }
    }
}

/// Structured result of processing one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub id: Uuid,
    pub intent: IntentResult,
    entities: ExtractedEntities,
    pub context: CommandContext,
    pub due_date: Option<NaiveDate>,
    missing_fields: Vec<Field>,
    pub confidence: f64,
    pub original_command: String,
    pub normalized_command: NormalizedCommand,
    pub metadata: DraftMetadata,
}

impl TransactionDraft {
    pub fn new(
        intent: IntentResult,
        entities: ExtractedEntities,
        context: CommandContext,
        original_command: impl Into<String>,
        normalized_command: NormalizedCommand,
    ) -> Self {
        let missing_fields = entities.missing_fields();
        Self {
            id: Uuid::new_v4(),
            intent,
            due_date: entities.date,
            entities,
            context,
            missing_fields,
            confidence: 0.0,
            original_command: original_command.into(),
            normalized_command,
            metadata: DraftMetadata::default(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_metadata(mut self, metadata: DraftMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn entities(&self) -> &ExtractedEntities {
        &self.entities
    }

    /// Mutate the entities; missing fields are recomputed afterwards
    pub fn update_entities<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ExtractedEntities),
    {
        f(&mut self.entities);
        self.missing_fields = self.entities.missing_fields();
        if self.due_date.is_none() {
            self.due_date = self.entities.date;
        }
    }

    /// Required fields still without a value, in asking order
    pub fn missing_fields(&self) -> &[Field] {
        &self.missing_fields
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Turn a complete draft into the record handed to persistence
    pub fn confirm(&self) -> Result<ConfirmedTransaction> {
        let e = &self.entities;
        let (Some(transaction_type), Some(amount), Some(description)) =
            (e.transaction_type, e.amount, e.description.clone())
        else {
            return Err(Error::InvalidInput(format!(
                "draft {} is incomplete, missing: {:?}",
                self.id, self.missing_fields
            )));
        };

        let date = e.date.unwrap_or_else(|| self.metadata.processed_at.date_naive());
        Ok(ConfirmedTransaction {
            draft_id: self.id,
            transaction_type,
            amount,
            description,
            date,
            due_date: self.due_date.unwrap_or(date),
            status: e.status.unwrap_or(PaymentStatus::Paid),
            category: e.category.clone(),
            recurring: e.recurring,
            context: self.context,
        })
    }
}

/// A finalized transaction ready for the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedTransaction {
    pub draft_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub description: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub category: Option<CategoryMatch>,
    pub recurring: Option<Recurrence>,
    pub context: CommandContext,
}

impl ConfirmedTransaction {
    /// The category that must be created before this transaction is saved
    pub fn category_to_create(&self) -> Option<&NewCategoryProposal> {
        self.category.as_ref().and_then(CategoryMatch::proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;

    fn draft(entities: ExtractedEntities) -> TransactionDraft {
        TransactionDraft::new(
            IntentResult::new(Intent::CreateTransaction, 0.5),
            entities,
            CommandContext::Personal,
            "gastei",
            NormalizedCommand::from_normalized("gastei".to_string()),
        )
    }

    #[test]
    fn test_missing_fields_follow_entities() {
        let mut d = draft(ExtractedEntities {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        });
        assert_eq!(d.missing_fields(), &[Field::Amount, Field::Description]);
        assert!(!d.is_complete());

        d.update_entities(|e| {
            e.amount = Amount::from_reais(50.0);
            e.description = Some("Mercado".to_string());
        });
        assert!(d.is_complete());
    }

    #[test]
    fn test_confirm_requires_complete_draft() {
        let d = draft(ExtractedEntities::default());
        assert!(d.confirm().is_err());
    }

    #[test]
    fn test_confirm_defaults_status_and_due_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let d = draft(ExtractedEntities {
            transaction_type: Some(TransactionType::Income),
            amount: Amount::from_reais(1200.0),
            description: Some("Freela".to_string()),
            date: Some(date),
            category: NewCategoryProposal::new("Freelas", TransactionType::Income)
                .map(CategoryMatch::Proposed),
            ..Default::default()
        });
        let confirmed = d.confirm().unwrap();
        assert_eq!(confirmed.status, PaymentStatus::Paid);
        assert_eq!(confirmed.due_date, date);
        assert_eq!(confirmed.category_to_create().unwrap().slug, "freelas");
    }
}
