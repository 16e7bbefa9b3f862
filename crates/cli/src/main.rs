//! Voice ledger shell
//!
//! Usage:
//!   voice-ledger                          Interactive session
//!   voice-ledger chat --patterns p.json   Session that remembers learned patterns
//!   voice-ledger parse "gastei 50 no uber" Print the draft for one command
//!
//! Inside a session, `/reset` forgets context, `/lancamentos` lists what was
//! stored, `/repetir` retries a failed save and `/sair` quits.

mod cli;
mod sink;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use voice_ledger_agent::{ConversationState, DialogueEvent, DialogueManager, Orchestrator};
use voice_ledger_config::{load_settings_from, Settings};
use voice_ledger_core::{Category, Command, CommandContext, ConfirmedTransaction};

use cli::{Cli, Commands};
use sink::MemoryLedger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match load_settings_from(&cli.config_dir, cli.env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // tracing is not up yet
            eprintln!("Warning: failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };
    if let Some(path) = &cli.lexicon {
        settings.lexicon_path = Some(path.to_string_lossy().into_owned());
    }

    init_tracing(&settings, cli.verbose);
    tracing::info!(
        environment = ?settings.environment,
        config_dir = %cli.config_dir.display(),
        "configuration loaded"
    );

    let lexicon = Arc::new(settings.lexicon().context("failed to load lexicon")?);
    let categories = match &cli.categories {
        Some(path) => load_categories(path)?,
        None => Vec::new(),
    };
    tracing::debug!(count = categories.len(), "categories loaded");

    let ledger = MemoryLedger::new(categories.clone());
    let mut orchestrator =
        Orchestrator::new(Arc::clone(&lexicon), &settings).with_categories(categories);
    let context = CommandContext::from(cli.context);

    match cli.command.unwrap_or(Commands::Chat { patterns: None }) {
        Commands::Parse { text } => {
            let draft = orchestrator.process(&Command::new(text, context));
            println!("{}", serde_json::to_string_pretty(&draft)?);
            Ok(())
        }
        Commands::Chat { patterns } => {
            let mut session = Session {
                dialogue: DialogueManager::new(lexicon, &settings),
                orchestrator,
                ledger,
                context,
                state: ConversationState::new(),
                failed: None,
            };
            session.run(patterns.as_deref())
        }
    }
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            "debug"
        } else {
            settings.observability.log_level.as_str()
        };
        format!("voice_ledger={}", level).into()
    });

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read categories from {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("invalid categories file {}", path.display()))
}

struct Session {
    dialogue: DialogueManager,
    orchestrator: Orchestrator,
    ledger: MemoryLedger,
    context: CommandContext,
    state: ConversationState,
    /// Confirmed transaction whose save failed
    failed: Option<ConfirmedTransaction>,
}

impl Session {
    fn run(&mut self, patterns: Option<&Path>) -> Result<()> {
        if let Some(path) = patterns.filter(|p| p.exists()) {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            self.orchestrator.import_patterns_json(&json)?;
            tracing::info!(patterns = self.orchestrator.patterns().len(), "patterns imported");
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            match line.trim() {
                "" => continue,
                "/sair" | "/quit" => break,
                "/reset" => {
                    self.orchestrator.reset();
                    self.state = ConversationState::new();
                    println!("Memória da sessão apagada.");
                }
                "/lancamentos" => self.list(),
                "/repetir" => self.retry(),
                text => self.handle(text)?,
            }
        }

        if let Some(path) = patterns {
            save_patterns(&self.orchestrator, path)?;
        }
        Ok(())
    }

    fn handle(&mut self, text: &str) -> Result<()> {
        let command = Command::new(text, self.context);
        let state = std::mem::take(&mut self.state);
        let turn = self.dialogue.turn(state, &command, &mut self.orchestrator);
        self.state = turn.state;

        if let Some(reply) = &turn.reply {
            println!("{}", reply);
        }

        match turn.event {
            DialogueEvent::Confirmed(transaction) => self.save(transaction),
            DialogueEvent::Action { action, .. } if turn.reply.is_none() => {
                println!("{}", serde_json::to_string(&action)?);
            }
            DialogueEvent::ManualEntry(Some(draft)) => {
                println!("{}", serde_json::to_string_pretty(draft.entities())?);
            }
            _ => {}
        }
        Ok(())
    }

    fn save(&mut self, transaction: ConfirmedTransaction) {
        match self.dialogue.commit(transaction, &self.ledger) {
            Ok(receipt) => {
                if receipt.created_category.is_some() {
                    self.orchestrator.set_categories(self.ledger.categories());
                }
                self.failed = None;
                println!("{}", receipt.message);
            }
            Err(failure) => {
                println!("{}", failure.message);
                self.failed = Some(failure.transaction);
            }
        }
    }

    fn retry(&mut self) {
        match self.failed.take() {
            Some(transaction) => self.save(transaction),
            None => println!("Nada para repetir."),
        }
    }

    fn list(&self) {
        let stored = self.ledger.transactions();
        if stored.is_empty() {
            println!("Nenhum lançamento ainda.");
        }
        for entry in stored {
            let t = &entry.transaction;
            println!(
                "{}  {}  {}  {}  {}  {}",
                &entry.id[..8],
                t.date.format("%d/%m/%Y"),
                t.transaction_type.label(),
                t.amount.to_brl(),
                t.description,
                t.category.as_ref().map(|c| c.name()).unwrap_or("-"),
            );
            tracing::debug!(id = %entry.id, category_id = ?entry.category_id, "listed");
        }
    }
}

fn save_patterns(orchestrator: &Orchestrator, path: &Path) -> Result<()> {
    let json = orchestrator.export_patterns_json()?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "patterns saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ledger_core::TransactionType;

    #[test]
    fn test_load_categories_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.yaml");
        fs::write(
            &path,
            "- id: \"1\"\n  name: Mercado\n  slug: mercado\n  type: expense\n",
        )
        .unwrap();

        let categories = load_categories(&path).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].kind, TransactionType::Expense);
    }

    #[test]
    fn test_missing_categories_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_categories(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn test_patterns_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        let settings = Settings::default();
        let lexicon = Arc::new(voice_ledger_config::Lexicon::pt_br());

        let mut first = Orchestrator::new(Arc::clone(&lexicon), &settings);
        first.process(&Command::new("gastei 50 reais no mercado", CommandContext::Personal));
        save_patterns(&first, &path).unwrap();

        let mut second = Orchestrator::new(lexicon, &settings);
        second
            .import_patterns_json(&fs::read_to_string(&path).unwrap())
            .unwrap();
        assert_eq!(second.patterns().len(), first.patterns().len());
    }
}
