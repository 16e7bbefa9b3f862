//! Choosing among equivalent phrasings
//!
//! Questions and acknowledgments come in several interchangeable variants.
//! Which one is spoken is a pluggable strategy so that a session can vary
//! its wording while tests stay deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use voice_ledger_config::{DialogueConfig, PhraseStrategyKind};

pub trait PhraseSelector: Send {
    /// Index into a list of `len` variants; `len` is never zero
    fn select(&mut self, len: usize) -> usize;

    fn pick<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        if options.is_empty() {
            return None;
        }
        let index = self.select(options.len()).min(options.len() - 1);
        Some(options[index].as_str())
    }
}

/// Always the first, most formal, variant
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl PhraseSelector for FirstChoice {
    fn select(&mut self, _len: usize) -> usize {
        0
    }
}

/// Cycles through variants, one step per pick
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    next: usize,
}

impl PhraseSelector for RoundRobin {
    fn select(&mut self, len: usize) -> usize {
        let index = self.next % len;
        self.next = self.next.wrapping_add(1);
        index
    }
}

/// Uniform pick from a seeded generator
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl PhraseSelector for SeededRandom {
    fn select(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Selector configured by the dialogue settings
pub fn selector_for(config: &DialogueConfig) -> Box<dyn PhraseSelector> {
    match config.phrase_strategy {
        PhraseStrategyKind::First => Box::new(FirstChoice),
        PhraseStrategyKind::RoundRobin => Box::new(RoundRobin::default()),
        PhraseStrategyKind::Seeded => Box::new(
            config
                .seed
                .map(SeededRandom::new)
                .unwrap_or_else(SeededRandom::from_entropy),
        ),
    }
}
