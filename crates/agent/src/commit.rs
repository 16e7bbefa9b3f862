//! Handing a confirmed transaction to persistence
//!
//! A proposed category is created first and swapped into the transaction,
//! then the transaction itself is stored. On failure the caller gets the
//! transaction back, with any category already created, so the user can
//! retry without repeating the dialogue.

use thiserror::Error;

use voice_ledger_core::{
    Category, CategoryMatch, CollaboratorError, ConfirmedTransaction, TransactionSink,
};

use crate::prompts::PromptGenerator;

/// A stored transaction
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub transaction_id: String,
    /// Category created for this transaction, if it proposed one
    pub created_category: Option<Category>,
    pub transaction: ConfirmedTransaction,
    pub message: String,
}

/// A failed commit; `transaction` is ready to be retried
#[derive(Error, Debug, Clone)]
#[error("failed to commit transaction: {error}")]
pub struct CommitFailure {
    pub error: CollaboratorError,
    pub message: String,
    pub transaction: ConfirmedTransaction,
}

pub fn commit(
    mut transaction: ConfirmedTransaction,
    sink: &dyn TransactionSink,
    prompts: &mut PromptGenerator,
) -> Result<CommitReceipt, CommitFailure> {
    let mut created_category = None;

    if let Some(proposal) = transaction.category_to_create().cloned() {
        match sink.create_category(&proposal, transaction.context) {
            Ok(category) => {
                tracing::info!(slug = %category.slug, id = %category.id, "category created");
                transaction.category = Some(CategoryMatch::Existing(category.clone()));
                created_category = Some(category);
            }
            Err(error) => return Err(failure(error, transaction, prompts)),
        }
    }

    let category_id = transaction
        .category
        .as_ref()
        .and_then(CategoryMatch::existing)
        .map(|c| c.id.clone());

    match sink.create_transaction(&transaction, category_id.as_deref()) {
        Ok(transaction_id) => {
            tracing::info!(
                id = %transaction_id,
                amount = transaction.amount.centavos(),
                "transaction committed"
            );
            Ok(CommitReceipt {
                message: prompts.success(&transaction),
                transaction_id,
                created_category,
                transaction,
            })
        }
        Err(error) => Err(failure(error, transaction, prompts)),
    }
}

fn failure(
    error: CollaboratorError,
    transaction: ConfirmedTransaction,
    prompts: &PromptGenerator,
) -> CommitFailure {
    tracing::warn!(kind = error.kind(), error = %error, "commit failed");
    CommitFailure {
        message: prompts.error_message(error.kind()),
        error,
        transaction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;
    use voice_ledger_config::{DialogueConfig, Lexicon};
    use voice_ledger_core::{
        Amount, CommandContext, NewCategoryProposal, PaymentStatus, TransactionType,
    };

    #[derive(Default)]
    struct RecordingSink {
        fail_category: Option<CollaboratorError>,
        fail_transaction: Option<CollaboratorError>,
        calls: Mutex<Vec<String>>,
    }

    impl TransactionSink for RecordingSink {
        fn create_category(
            &self,
            proposal: &NewCategoryProposal,
            _context: CommandContext,
        ) -> Result<Category, CollaboratorError> {
            self.calls.lock().unwrap().push(format!("category:{}", proposal.slug));
            match &self.fail_category {
                Some(error) => Err(error.clone()),
                None => Ok(Category::new("42", &proposal.name, &proposal.slug, proposal.kind)),
            }
        }

        fn create_transaction(
            &self,
            _transaction: &ConfirmedTransaction,
            category_id: Option<&str>,
        ) -> Result<String, CollaboratorError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("transaction:{}", category_id.unwrap_or("-")));
            match &self.fail_transaction {
                Some(error) => Err(error.clone()),
                None => Ok("tx-1".to_string()),
            }
        }
    }

    fn prompts() -> PromptGenerator {
        PromptGenerator::new(Arc::new(Lexicon::pt_br()), &DialogueConfig::default())
    }

    fn transaction(category: Option<CategoryMatch>) -> ConfirmedTransaction {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        ConfirmedTransaction {
            draft_id: Uuid::nil(),
            transaction_type: TransactionType::Expense,
            amount: Amount::from_centavos(8000),
            description: "Ração".to_string(),
            date,
            due_date: date,
            status: PaymentStatus::Paid,
            category,
            recurring: None,
            context: CommandContext::Personal,
        }
    }

    fn proposal() -> Option<CategoryMatch> {
        NewCategoryProposal::new("Pets", TransactionType::Expense).map(CategoryMatch::Proposed)
    }

    #[test]
    fn test_creates_proposed_category_first() {
        let sink = RecordingSink::default();
        let receipt = commit(transaction(proposal()), &sink, &mut prompts()).unwrap();

        assert_eq!(
            *sink.calls.lock().unwrap(),
            vec!["category:pets".to_string(), "transaction:42".to_string()]
        );
        assert_eq!(receipt.transaction_id, "tx-1");
        assert_eq!(receipt.created_category.map(|c| c.id), Some("42".to_string()));
        assert_eq!(receipt.message, "Despesa de R$ 80,00 registrada com sucesso! ✅");
    }

    #[test]
    fn test_existing_category_is_not_recreated() {
        let sink = RecordingSink::default();
        let existing = CategoryMatch::Existing(Category::new(
            "7",
            "Casa",
            "casa",
            TransactionType::Expense,
        ));
        commit(transaction(Some(existing)), &sink, &mut prompts()).unwrap();
        assert_eq!(*sink.calls.lock().unwrap(), vec!["transaction:7".to_string()]);
    }

    #[test]
    fn test_failure_preserves_transaction() {
        let sink = RecordingSink {
            fail_transaction: Some(CollaboratorError::Network("timeout".into())),
            ..Default::default()
        };
        let failure = commit(transaction(proposal()), &sink, &mut prompts()).unwrap_err();

        assert_eq!(failure.message, "Ops! Problema de conexão. Tenta de novo?");
        assert_eq!(failure.transaction.amount, Amount::from_centavos(8000));
        // the category was created, so a retry goes straight to the transaction
        assert!(failure.transaction.category_to_create().is_none());
        assert_eq!(
            failure.transaction.category.as_ref().and_then(|c| c.existing()).map(|c| c.id.as_str()),
            Some("42")
        );
    }

    #[test]
    fn test_category_failure_stops_commit() {
        let sink = RecordingSink {
            fail_category: Some(CollaboratorError::Validation("duplicate".into())),
            ..Default::default()
        };
        let failure = commit(transaction(proposal()), &sink, &mut prompts()).unwrap_err();
        assert_eq!(failure.error.kind(), "validation");
        assert_eq!(*sink.calls.lock().unwrap(), vec!["category:pets".to_string()]);
        assert!(failure.transaction.category_to_create().is_some());
    }
}
