//! Slot-filling dialogue
//!
//! Drives the conversation over the fields an initial command left missing:
//!
//! ```text
//! Idle ──command with missing fields──▶ AwaitingField(f)
//! Idle ──complete command─────────────▶ Complete
//! AwaitingField(f) ──reply fills f──▶ AwaitingField(next) | Complete
//! AwaitingField(f) ──reply misses f─▶ AwaitingField(f), until the retry cap
//! Complete ──"sim"──▶ Idle (confirmed)     Complete ──"não"──▶ Cancelled
//! any ──cancel phrase──▶ Cancelled
//! ```
//!
//! The conversation is an owned [`ConversationState`] value: each call to
//! [`DialogueManager::turn`] takes the state and hands back the next one.
//! Cancelled and exhausted conversations come back as a fresh idle state.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use voice_ledger_config::{Lexicon, Settings};
use voice_ledger_core::{
    CategorySuggester, Command, ConfirmedTransaction, Field, NormalizedCommand, TransactionDraft,
    TransactionSink,
};
use voice_ledger_text_processing::PhraseSet;

use crate::actions::{CommandAction, MissingDetail};
use crate::commit::{self, CommitFailure, CommitReceipt};
use crate::orchestrator::Orchestrator;
use crate::phrasing::PhraseSelector;
use crate::prompts::PromptGenerator;
use crate::suggester::DefaultCategorySuggester;

/// Where the conversation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "field", rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Idle,
    /// Waiting for the user to supply this field
    AwaitingField(Field),
    /// All required fields present, waiting for confirmation
    Complete,
    Cancelled,
}

impl DialogueState {
    pub fn name(&self) -> &'static str {
        match self {
            DialogueState::Idle => "idle",
            DialogueState::AwaitingField(_) => "awaiting_field",
            DialogueState::Complete => "complete",
            DialogueState::Cancelled => "cancelled",
        }
    }

    /// Whether a conversation is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, DialogueState::AwaitingField(_) | DialogueState::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Reason for a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionReason {
    /// The command left required fields empty
    MissingFields,
    FieldFilled(Field),
    /// Every required field is present
    ReadyToConfirm,
    CancelRequested,
    /// The user rejected the summary
    Denied,
    Confirmed,
    /// Too many replies failed to fill this field
    RetriesExhausted(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueTransition {
    pub from: DialogueState,
    pub to: DialogueState,
    pub reason: TransitionReason,
}

/// Everything one voice session carries between turns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    state: DialogueState,
    draft: Option<TransactionDraft>,
    missing: VecDeque<Field>,
    last_field_filled: Option<Field>,
    attempts: u32,
    turns: Vec<Turn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn draft(&self) -> Option<&TransactionDraft> {
        self.draft.as_ref()
    }

    /// Field currently being asked for
    pub fn active_field(&self) -> Option<Field> {
        match self.state {
            DialogueState::AwaitingField(field) => Some(field),
            _ => None,
        }
    }

    /// Fields still to be asked, active one first
    pub fn missing_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.missing.iter().copied()
    }

    pub fn last_field_filled(&self) -> Option<Field> {
        self.last_field_filled
    }

    /// Failed replies for the active field
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn in_dialogue(&self) -> bool {
        self.state.is_active()
    }

    fn record(&mut self, role: TurnRole, text: &str) {
        self.turns.push(Turn {
            role,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// What happened during a turn
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    /// Empty utterance while idle
    Ignored,
    /// Started asking for a field
    Asked(Field),
    FieldFilled { field: Field, next: Option<Field> },
    /// The reply did not fill the active field
    Retry { field: Field, attempt: u32 },
    AwaitingConfirmation,
    /// Ready to be committed by the host
    Confirmed(ConfirmedTransaction),
    Cancelled,
    /// The retry cap was reached; the partial draft is handed back
    ManualEntry(Option<TransactionDraft>),
    /// A command that is not a new transaction, routed to the host
    Action {
        action: CommandAction,
        draft: TransactionDraft,
    },
}

/// Result of one call to [`DialogueManager::turn`]
#[derive(Debug, Clone)]
pub struct DialogueTurn {
    pub state: ConversationState,
    /// Text to speak back, if any
    pub reply: Option<String>,
    pub event: DialogueEvent,
    pub transition: Option<DialogueTransition>,
}

pub struct DialogueManager {
    prompts: PromptGenerator,
    suggester: Box<dyn CategorySuggester>,
    cancel: PhraseSet,
    confirm: PhraseSet,
    deny: PhraseSet,
    max_attempts: u32,
}

impl DialogueManager {
    pub fn new(lexicon: Arc<Lexicon>, settings: &Settings) -> Self {
        let words = &lexicon.dialogue;
        Self {
            cancel: PhraseSet::new(&words.cancel_phrases),
            confirm: PhraseSet::new(&words.confirm_words),
            deny: PhraseSet::new(&words.deny_words),
            suggester: Box::new(DefaultCategorySuggester::new(&lexicon, &settings.scoring)),
            max_attempts: settings.dialogue.max_attempts.max(1),
            prompts: PromptGenerator::new(lexicon, &settings.dialogue),
        }
    }

    pub fn with_suggester(mut self, suggester: Box<dyn CategorySuggester>) -> Self {
        self.suggester = suggester;
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn PhraseSelector>) -> Self {
        self.prompts = self.prompts.with_selector(selector);
        self
    }

    pub fn prompts(&mut self) -> &mut PromptGenerator {
        &mut self.prompts
    }

    /// Commit a confirmed transaction through the host's sink
    pub fn commit(
        &mut self,
        transaction: ConfirmedTransaction,
        sink: &dyn TransactionSink,
    ) -> Result<CommitReceipt, CommitFailure> {
        commit::commit(transaction, sink, &mut self.prompts)
    }

    /// Process one user utterance
    pub fn turn(
        &mut self,
        mut state: ConversationState,
        command: &Command,
        orchestrator: &mut Orchestrator,
    ) -> DialogueTurn {
        let text = command.text().trim();
        state.record(TurnRole::User, text);
        let normalized = orchestrator.extractors().normalize(text);

        if state.in_dialogue() && self.cancel.contains_any(normalized.as_str()) {
            return self.cancel(state, TransitionReason::CancelRequested);
        }

        match state.state {
            DialogueState::Idle | DialogueState::Cancelled => {
                if normalized.is_empty() {
                    return DialogueTurn {
                        state,
                        reply: None,
                        event: DialogueEvent::Ignored,
                        transition: None,
                    };
                }
                self.start(state, command, orchestrator)
            }
            DialogueState::AwaitingField(field) => self.fill(state, field, &normalized, orchestrator),
            DialogueState::Complete => self.confirm(state, &normalized, orchestrator),
        }
    }

    fn start(
        &mut self,
        mut state: ConversationState,
        command: &Command,
        orchestrator: &mut Orchestrator,
    ) -> DialogueTurn {
        let draft = orchestrator.process(command);
        let action = CommandAction::from_draft(&draft);

        if !action.creates_transaction() {
            let reply = match action.missing_detail() {
                Some(MissingDetail::CategoryName) => Some(self.prompts.ask_category_name()),
                Some(MissingDetail::TransactionReference) => {
                    Some(self.prompts.ask_transaction_reference())
                }
                None => None,
            };
            tracing::info!(action = action.name(), "routing command to host");
            if let Some(reply) = &reply {
                state.record(TurnRole::Assistant, reply);
            }
            return DialogueTurn {
                state,
                reply,
                event: DialogueEvent::Action { action, draft },
                transition: None,
            };
        }

        state.missing = draft.missing_fields().iter().copied().collect();
        state.draft = Some(draft);
        state.last_field_filled = None;
        state.attempts = 0;
        self.advance(state, TransitionReason::MissingFields, orchestrator)
    }

    fn fill(
        &mut self,
        mut state: ConversationState,
        field: Field,
        reply: &NormalizedCommand,
        orchestrator: &mut Orchestrator,
    ) -> DialogueTurn {
        let Some(draft) = state.draft.as_mut() else {
            tracing::warn!(field = %field, "awaiting a field without a draft, resetting");
            return self.cancel(state, TransitionReason::CancelRequested);
        };

        let extracted = orchestrator.analyze(reply);
        let mut accepted = false;
        draft.update_entities(|e| accepted = e.take_field(field, &extracted));

        if accepted {
            tracing::debug!(field = %field, "field filled");
            state.missing.retain(|f| *f != field);
            state.last_field_filled = Some(field);
            state.attempts = 0;
            return self.advance(state, TransitionReason::FieldFilled(field), orchestrator);
        }

        state.attempts += 1;
        if state.attempts >= self.max_attempts {
            return self.give_up(state, field);
        }

        tracing::warn!(field = %field, attempt = state.attempts, "reply did not fill field");
        let reply = self.prompts.clarification(field);
        state.record(TurnRole::Assistant, &reply);
        let attempt = state.attempts;
        DialogueTurn {
            state,
            reply: Some(reply),
            event: DialogueEvent::Retry { field, attempt },
            transition: None,
        }
    }

    fn confirm(
        &mut self,
        mut state: ConversationState,
        reply: &NormalizedCommand,
        orchestrator: &mut Orchestrator,
    ) -> DialogueTurn {
        let text = reply.as_str();
        if self.deny.contains_any(text) {
            return self.cancel(state, TransitionReason::Denied);
        }

        let Some(draft) = state.draft.as_ref() else {
            return self.cancel(state, TransitionReason::CancelRequested);
        };

        if !self.confirm.contains_any(text) {
            let summary = self.prompts.confirmation(draft, orchestrator.today());
            state.record(TurnRole::Assistant, &summary);
            return DialogueTurn {
                state,
                reply: Some(summary),
                event: DialogueEvent::AwaitingConfirmation,
                transition: None,
            };
        }

        match draft.confirm() {
            Ok(transaction) => {
                let transition = transition(state.state, DialogueState::Idle, TransitionReason::Confirmed);
                DialogueTurn {
                    state: ConversationState::default(),
                    reply: None,
                    event: DialogueEvent::Confirmed(transaction),
                    transition: Some(transition),
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "confirmed an incomplete draft, asking again");
                let missing = draft.missing_fields().iter().copied().collect();
                state.missing = missing;
                self.advance(state, TransitionReason::MissingFields, orchestrator)
            }
        }
    }

    /// Ask for the next missing field, or read back the summary
    fn advance(
        &mut self,
        mut state: ConversationState,
        reason: TransitionReason,
        orchestrator: &Orchestrator,
    ) -> DialogueTurn {
        let today = orchestrator.today();
        let from = state.state;
        let last_filled = state.last_field_filled;

        let Some(draft) = state.draft.as_mut() else {
            return self.cancel(state, TransitionReason::CancelRequested);
        };

        if let Some(&next) = state.missing.front() {
            let question = self.prompts.question(next, draft.entities(), last_filled, today);
            let to = DialogueState::AwaitingField(next);
            let event = match reason {
                TransitionReason::FieldFilled(field) => DialogueEvent::FieldFilled {
                    field,
                    next: Some(next),
                },
                _ => DialogueEvent::Asked(next),
            };
            state.state = to;
            state.record(TurnRole::Assistant, &question);
            return DialogueTurn {
                state,
                reply: Some(question),
                event,
                transition: Some(transition(from, to, reason)),
            };
        }

        if draft.entities().category.is_none() {
            if let Some(category) = self.suggester.suggest(draft, orchestrator.categories()) {
                tracing::debug!(slug = category.slug(), "category suggested");
                draft.update_entities(|e| e.category = Some(category));
            }
        }

        let mut parts = Vec::with_capacity(2);
        if let Some(ack) =
            last_filled.and_then(|f| self.prompts.acknowledgment(f, draft.entities(), today))
        {
            parts.push(ack);
        }
        parts.push(self.prompts.confirmation(draft, today));
        let summary = parts.join(" ");

        state.state = DialogueState::Complete;
        state.record(TurnRole::Assistant, &summary);
        let reason = match reason {
            TransitionReason::FieldFilled(_) | TransitionReason::MissingFields => {
                TransitionReason::ReadyToConfirm
            }
            other => other,
        };
        DialogueTurn {
            state,
            reply: Some(summary),
            event: DialogueEvent::AwaitingConfirmation,
            transition: Some(transition(from, DialogueState::Complete, reason)),
        }
    }

    fn cancel(&mut self, state: ConversationState, reason: TransitionReason) -> DialogueTurn {
        let transition = transition(state.state, DialogueState::Cancelled, reason);
        DialogueTurn {
            state: ConversationState::default(),
            reply: Some(self.prompts.cancelled()),
            event: DialogueEvent::Cancelled,
            transition: Some(transition),
        }
    }

    fn give_up(&mut self, state: ConversationState, field: Field) -> DialogueTurn {
        tracing::warn!(field = %field, attempts = state.attempts, "retries exhausted, falling back to manual entry");
        let transition = transition(
            state.state,
            DialogueState::Idle,
            TransitionReason::RetriesExhausted(field),
        );
        DialogueTurn {
            reply: Some(self.prompts.manual_entry()),
            event: DialogueEvent::ManualEntry(state.draft),
            state: ConversationState::default(),
            transition: Some(transition),
        }
    }
}

fn transition(from: DialogueState, to: DialogueState, reason: TransitionReason) -> DialogueTransition {
    tracing::info!(from = from.name(), to = to.name(), reason = ?reason, "dialogue transition");
    DialogueTransition { from, to, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use voice_ledger_core::{CommandContext, FixedClock, Intent, TransactionType};

    fn setup() -> (DialogueManager, Orchestrator) {
        let lexicon = Arc::new(Lexicon::pt_br());
        let settings = Settings::default();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let orchestrator = Orchestrator::new(Arc::clone(&lexicon), &settings)
            .with_clock(Arc::new(FixedClock(today)));
        (DialogueManager::new(lexicon, &settings), orchestrator)
    }

    fn say(text: &str) -> Command {
        Command::new(text, CommandContext::Personal)
    }

    #[test]
    fn test_complete_command_goes_straight_to_confirmation() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei 50 reais no mercado"), &mut o);

        assert_eq!(turn.state.state(), DialogueState::Complete);
        assert_eq!(turn.event, DialogueEvent::AwaitingConfirmation);
        let reply = turn.reply.unwrap();
        assert!(reply.starts_with("Vou registrar:"));
        assert!(reply.ends_with("Confirma?"));
    }

    #[test]
    fn test_asks_first_missing_field() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei"), &mut o);

        assert_eq!(turn.state.state(), DialogueState::AwaitingField(Field::Amount));
        assert_eq!(turn.event, DialogueEvent::Asked(Field::Amount));
        assert_eq!(turn.reply.as_deref(), Some("Quanto você gastou?"));
        assert_eq!(
            turn.state.missing_fields().collect::<Vec<_>>(),
            vec![Field::Amount, Field::Description]
        );
        let t = turn.transition.unwrap();
        assert_eq!(t.from, DialogueState::Idle);
        assert_eq!(t.reason, TransitionReason::MissingFields);
    }

    #[test]
    fn test_only_active_field_is_accepted() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei"), &mut o);
        // names a description but no amount
        let turn = dm.turn(turn.state, &say("no mercado"), &mut o);

        assert_eq!(turn.event, DialogueEvent::Retry { field: Field::Amount, attempt: 1 });
        assert!(turn.state.draft().unwrap().entities().description.is_none());
        assert!(turn.reply.unwrap().contains("valor"));
    }

    #[test]
    fn test_retry_cap_falls_back_to_manual_entry() {
        let (mut dm, mut o) = setup();
        let mut turn = dm.turn(ConversationState::new(), &say("gastei"), &mut o);
        for _ in 0..2 {
            turn = dm.turn(turn.state, &say("sei lá"), &mut o);
            assert!(matches!(turn.event, DialogueEvent::Retry { .. }));
        }
        let turn = dm.turn(turn.state, &say("sei lá"), &mut o);

        match &turn.event {
            DialogueEvent::ManualEntry(Some(draft)) => {
                assert_eq!(draft.entities().transaction_type, Some(TransactionType::Expense));
            }
            other => panic!("expected manual entry, got {:?}", other),
        }
        assert!(turn.reply.unwrap().contains("manualmente"));
        assert_eq!(turn.state, ConversationState::default());
    }

    #[test]
    fn test_cancel_resets_everything() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei"), &mut o);
        let turn = dm.turn(turn.state, &say("deixa pra lá"), &mut o);

        assert_eq!(turn.event, DialogueEvent::Cancelled);
        assert_eq!(turn.reply.as_deref(), Some("Transação cancelada."));
        assert_eq!(turn.state, ConversationState::default());
        assert_eq!(turn.transition.unwrap().to, DialogueState::Cancelled);
    }

    #[test]
    fn test_cancel_word_while_idle_is_a_command() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("cancelar o lançamento do uber"), &mut o);
        match turn.event {
            DialogueEvent::Action { action, draft } => {
                assert_eq!(draft.intent.intent, Intent::DeleteTransaction);
                assert_eq!(action.name(), "delete");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_deny_cancels_at_confirmation() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei 50 reais no mercado"), &mut o);
        let turn = dm.turn(turn.state, &say("não"), &mut o);
        assert_eq!(turn.event, DialogueEvent::Cancelled);
        assert_eq!(turn.transition.unwrap().reason, TransitionReason::Denied);
    }

    #[test]
    fn test_unclear_confirmation_repeats_summary() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei 50 reais no mercado"), &mut o);
        let turn = dm.turn(turn.state, &say("hmm"), &mut o);
        assert_eq!(turn.event, DialogueEvent::AwaitingConfirmation);
        assert_eq!(turn.state.state(), DialogueState::Complete);
    }

    #[test]
    fn test_create_category_without_name_asks_for_it() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("quero uma nova categoria"), &mut o);
        assert_eq!(turn.reply.as_deref(), Some("Qual o nome da nova categoria?"));
        assert_eq!(turn.state.state(), DialogueState::Idle);
    }

    #[test]
    fn test_empty_utterance_is_ignored() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("   "), &mut o);
        assert_eq!(turn.event, DialogueEvent::Ignored);
        assert!(o.history().is_empty());
    }

    #[test]
    fn test_state_serializes() {
        let (mut dm, mut o) = setup();
        let turn = dm.turn(ConversationState::new(), &say("gastei"), &mut o);
        let json = serde_json::to_string(&turn.state).unwrap();
        let restored: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), DialogueState::AwaitingField(Field::Amount));
        assert_eq!(restored.turns().len(), 2);
    }
}
