//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use voice_ledger_core::CommandContext;

/// Voice ledger - turn spoken pt-BR commands into transactions
#[derive(Parser, Debug)]
#[command(name = "voice-ledger")]
#[command(about = "Understands Brazilian-Portuguese finance commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding default.toml and per-environment overrides
    #[arg(long, default_value = "config", global = true)]
    pub config_dir: PathBuf,

    /// Environment overlay to load (e.g. "development", "production")
    #[arg(long, env = "VOICE_LEDGER_ENV", global = true)]
    pub env: Option<String>,

    /// Ledger the commands belong to
    #[arg(long, value_enum, default_value_t = ContextArg::Personal, global = true)]
    pub context: ContextArg,

    /// YAML list of existing categories
    #[arg(long, global = true)]
    pub categories: Option<PathBuf>,

    /// YAML lexicon replacing the built-in one
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session reading one command per line (default)
    Chat {
        /// JSON file to load learned patterns from and save them back to
        #[arg(long)]
        patterns: Option<PathBuf>,
    },

    /// Process a single command and print the draft as JSON
    Parse {
        /// The command text
        text: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextArg {
    Personal,
    Business,
}

impl From<ContextArg> for CommandContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Personal => CommandContext::Personal,
            ContextArg::Business => CommandContext::Business,
        }
    }
}
