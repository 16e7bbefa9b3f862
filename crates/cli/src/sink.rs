//! In-memory ledger standing in for the persistence service

use parking_lot::RwLock;
use uuid::Uuid;

use voice_ledger_core::{
    Category, CollaboratorError, CommandContext, ConfirmedTransaction, NewCategoryProposal,
    TransactionSink,
};

#[derive(Debug, Clone)]
pub struct StoredTransaction {
    pub id: String,
    pub category_id: Option<String>,
    pub transaction: ConfirmedTransaction,
}

#[derive(Default)]
pub struct MemoryLedger {
    categories: RwLock<Vec<Category>>,
    transactions: RwLock<Vec<StoredTransaction>>,
}

impl MemoryLedger {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(categories),
            transactions: RwLock::new(Vec::new()),
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.read().clone()
    }

    pub fn transactions(&self) -> Vec<StoredTransaction> {
        self.transactions.read().clone()
    }
}

impl TransactionSink for MemoryLedger {
    fn create_category(
        &self,
        proposal: &NewCategoryProposal,
        _context: CommandContext,
    ) -> Result<Category, CollaboratorError> {
        let mut categories = self.categories.write();
        if let Some(existing) = categories.iter().find(|c| c.slug == proposal.slug) {
            return Err(CollaboratorError::Validation(format!(
                "category '{}' already exists",
                existing.name
            )));
        }

        let category = Category::new(
            Uuid::new_v4().to_string(),
            &proposal.name,
            &proposal.slug,
            proposal.kind,
        );
        categories.push(category.clone());
        Ok(category)
    }

    fn create_transaction(
        &self,
        transaction: &ConfirmedTransaction,
        category_id: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        let id = Uuid::new_v4().to_string();
        self.transactions.write().push(StoredTransaction {
            id: id.clone(),
            category_id: category_id.map(str::to_string),
            transaction: transaction.clone(),
        });
        Ok(id)
    }
}
