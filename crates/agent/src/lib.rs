//! Command orchestration and slot-filling dialogue
//!
//! Features:
//! - [`Orchestrator`]: one command in, one [`TransactionDraft`] out, with
//!   session memory for context carry-over and learned command shapes
//! - [`DialogueManager`]: asks for missing fields one at a time, confirms,
//!   and hands the confirmed transaction back to the host
//! - Prompt generation with pluggable phrase selection
//! - Category suggestion and the commit step against a [`TransactionSink`]
//!
//! [`TransactionDraft`]: voice_ledger_core::TransactionDraft
//! [`TransactionSink`]: voice_ledger_core::TransactionSink
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use voice_ledger_agent::{ConversationState, DialogueManager, DialogueState, Orchestrator};
//! use voice_ledger_config::{Lexicon, Settings};
//! use voice_ledger_core::{Command, CommandContext, Field};
//!
//! let lexicon = Arc::new(Lexicon::pt_br());
//! let settings = Settings::default();
//! let mut orchestrator = Orchestrator::new(Arc::clone(&lexicon), &settings);
//! let mut dialogue = DialogueManager::new(lexicon, &settings);
//!
//! let command = Command::new("gastei", CommandContext::Personal);
//! let turn = dialogue.turn(ConversationState::new(), &command, &mut orchestrator);
//! assert_eq!(turn.state.state(), DialogueState::AwaitingField(Field::Amount));
//! ```

pub mod actions;
pub mod commit;
pub mod dialogue;
pub mod memory;
pub mod orchestrator;
pub mod phrasing;
pub mod prompts;
pub mod suggester;

pub use actions::{CommandAction, MissingDetail};
pub use commit::{CommitFailure, CommitReceipt};
pub use dialogue::{
    ConversationState, DialogueEvent, DialogueManager, DialogueState, DialogueTransition,
    DialogueTurn, TransitionReason, Turn, TurnRole,
};
pub use memory::{CommandHistory, ContextEntry, ContextStack, PatternExport, PatternMemo};
pub use orchestrator::Orchestrator;
pub use phrasing::{selector_for, FirstChoice, PhraseSelector, RoundRobin, SeededRandom};
pub use prompts::PromptGenerator;
pub use suggester::DefaultCategorySuggester;
