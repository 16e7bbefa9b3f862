//! Per-session memory
//!
//! - [`ContextStack`]: snapshots of the last few commands, for carry-over
//! - [`PatternMemo`]: command shapes that extracted well before
//! - [`CommandHistory`]: the raw and normalized commands of the session
//!
//! All three are owned by one orchestrator and bounded by
//! [`voice_ledger_config::MemoryConfig`].

pub mod context_stack;
pub mod history;
pub mod pattern_memo;

pub use context_stack::{ContextEntry, ContextStack};
pub use history::{CommandHistory, HistoryEntry};
pub use pattern_memo::{CommandShaper, LearnedPattern, PatternExport, PatternMemo};
