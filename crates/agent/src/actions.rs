//! What the host should do with a classified command
//!
//! Transaction-creating intents go through slot filling; every other intent
//! is handed to the host as a [`CommandAction`] carrying the metadata the
//! classifier extracted.

use serde::{Deserialize, Serialize};

use voice_ledger_core::{Intent, ListCriteria, TransactionDraft, TransactionType, UpdateSubIntent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandAction {
    Create,
    Schedule {
        day: Option<u32>,
    },
    CreateCategory {
        name: Option<String>,
        #[serde(rename = "type")]
        kind: TransactionType,
    },
    MarkAsPaid {
        reference: Option<String>,
    },
    MarkAsPending {
        reference: Option<String>,
    },
    Update {
        reference: Option<String>,
        sub_intent: Option<UpdateSubIntent>,
        search_term: Option<String>,
    },
    Delete {
        reference: Option<String>,
    },
    Search {
        term: Option<String>,
    },
    List(ListCriteria),
}

impl CommandAction {
    pub fn from_draft(draft: &TransactionDraft) -> Self {
        let metadata = &draft.intent.metadata;
        let reference = metadata.transaction_reference.clone();

        match draft.intent.intent {
            Intent::CreateTransaction => CommandAction::Create,
            Intent::ScheduleTransaction => CommandAction::Schedule {
                day: draft.entities().recurring.map(|r| r.day),
            },
            Intent::CreateCategory => CommandAction::CreateCategory {
                name: metadata.category_name.clone(),
                kind: metadata.category_type.unwrap_or(TransactionType::Expense),
            },
            Intent::MarkAsPaid => CommandAction::MarkAsPaid { reference },
            Intent::MarkAsPending => CommandAction::MarkAsPending { reference },
            Intent::UpdateTransaction => CommandAction::Update {
                reference,
                sub_intent: metadata.sub_intent,
                search_term: metadata.search_term.clone(),
            },
            Intent::DeleteTransaction => CommandAction::Delete { reference },
            Intent::SearchTransaction => CommandAction::Search {
                term: metadata.search_term.clone().or(reference),
            },
            Intent::ListTransactions => {
                CommandAction::List(metadata.list_criteria.clone().unwrap_or_default())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandAction::Create => "create",
            CommandAction::Schedule { .. } => "schedule",
            CommandAction::CreateCategory { .. } => "create_category",
            CommandAction::MarkAsPaid { .. } => "mark_as_paid",
            CommandAction::MarkAsPending { .. } => "mark_as_pending",
            CommandAction::Update { .. } => "update",
            CommandAction::Delete { .. } => "delete",
            CommandAction::Search { .. } => "search",
            CommandAction::List(_) => "list",
        }
    }

    /// Whether the action builds a new transaction through slot filling
    pub fn creates_transaction(&self) -> bool {
        matches!(self, CommandAction::Create | CommandAction::Schedule { .. })
    }

    /// Information the host still needs before it can act
    pub fn missing_detail(&self) -> Option<MissingDetail> {
        match self {
            CommandAction::CreateCategory { name: None, .. } => Some(MissingDetail::CategoryName),
            CommandAction::MarkAsPaid { reference: None }
            | CommandAction::MarkAsPending { reference: None }
            | CommandAction::Update { reference: None, .. }
            | CommandAction::Delete { reference: None } => {
                Some(MissingDetail::TransactionReference)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDetail {
    CategoryName,
    TransactionReference,
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::{
        CommandContext, ExtractedEntities, IntentMetadata, IntentResult, NormalizedCommand,
        Recurrence,
    };

    fn draft(intent: Intent, metadata: IntentMetadata, entities: ExtractedEntities) -> TransactionDraft {
        TransactionDraft::new(
            IntentResult::new(intent, 0.8).with_metadata(metadata),
            entities,
            CommandContext::Personal,
            "",
            NormalizedCommand::from_normalized(String::new()),
        )
    }

    #[test]
    fn test_schedule_carries_day() {
        let entities = ExtractedEntities {
            recurring: Recurrence::monthly(15),
            ..Default::default()
        };
        let action = CommandAction::from_draft(&draft(
            Intent::ScheduleTransaction,
            IntentMetadata::default(),
            entities,
        ));
        assert_eq!(action, CommandAction::Schedule { day: Some(15) });
        assert!(action.creates_transaction());
    }

    #[test]
    fn test_mark_as_paid_without_reference_needs_one() {
        let action = CommandAction::from_draft(&draft(
            Intent::MarkAsPaid,
            IntentMetadata::default(),
            ExtractedEntities::default(),
        ));
        assert_eq!(action.name(), "mark_as_paid");
        assert_eq!(action.missing_detail(), Some(MissingDetail::TransactionReference));
    }

    #[test]
    fn test_create_category() {
        let metadata = IntentMetadata {
            category_name: Some("Pets".to_string()),
            category_type: Some(TransactionType::Expense),
            ..Default::default()
        };
        let action = CommandAction::from_draft(&draft(
            Intent::CreateCategory,
            metadata,
            ExtractedEntities::default(),
        ));
        assert_eq!(action.missing_detail(), None);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "create_category");
        assert_eq!(json["name"], "Pets");
    }

    #[test]
    fn test_list_defaults_criteria() {
        let action = CommandAction::from_draft(&draft(
            Intent::ListTransactions,
            IntentMetadata::default(),
            ExtractedEntities::default(),
        ));
        assert_eq!(action, CommandAction::List(ListCriteria::default()));
    }
}
