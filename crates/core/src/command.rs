//! Raw and normalized voice commands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Context tag supplied by the hosting UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandContext {
    Business,
    #[default]
    Personal,
}

impl CommandContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandContext::Business => "business",
            CommandContext::Personal => "personal",
        }
    }

    /// Parse a context tag, accepting the Portuguese labels too
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "business" | "empresa" | "negocio" | "negócio" => Some(CommandContext::Business),
            "personal" | "pessoal" => Some(CommandContext::Personal),
            _ => None,
        }
    }
}

impl fmt::Display for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transcribed utterance as received from the speech collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    text: String,
    context: CommandContext,
}

impl Command {
    pub fn new(text: impl Into<String>, context: CommandContext) -> Self {
        Self {
            text: text.into(),
            context,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> CommandContext {
        self.context
    }
}

/// Lowercased, punctuation-collapsed, contraction-expanded command text
///
/// Only the normalizer constructs these; the text is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedCommand(String);

impl NormalizedCommand {
    #[doc(hidden)]
    pub fn from_normalized(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedCommand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
