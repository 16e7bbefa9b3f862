//! Payment status detection
//!
//! Resolution order:
//!
//! 1. Temporal phrases ("vou pagar", "amanhã" before "já paguei")
//! 2. Creation keywords: a new record is pending unless it also says it
//!    was settled ("comprei e já paguei")
//! 3. Weighted verbs, expressions and phrase groups
//! 4. Settle-verb tense when the scores give no answer
//!
//! Status always resolves; an undecided command is paid.

use voice_ledger_config::{ScoringConfig, StatusBucket, StatusLexicon, StatusWeights};
use voice_ledger_core::PaymentStatus;

use crate::phrases::PhraseSet;

struct StatusSignals {
    verbs: PhraseSet,
    expressions: PhraseSet,
    patterns: Vec<PhraseSet>,
}

impl StatusSignals {
    fn new(bucket: &StatusBucket) -> Self {
        Self {
            verbs: PhraseSet::new(&bucket.verbs),
            expressions: PhraseSet::new(&bucket.expressions),
            patterns: bucket.patterns.iter().map(PhraseSet::new).collect(),
        }
    }

    fn score(&self, text: &str, weights: &StatusWeights) -> f64 {
        let groups = self.patterns.iter().filter(|g| g.contains_any(text)).count();
        self.verbs.count(text) as f64 * weights.verb
            + self.expressions.count(text) as f64 * weights.expression
            + groups as f64 * weights.pattern
    }
}

pub struct StatusExtractor {
    paid: StatusSignals,
    pending: StatusSignals,
    temporal_paid: PhraseSet,
    temporal_pending: PhraseSet,
    creation_keywords: PhraseSet,
    paid_confirmations: PhraseSet,
    settle_past: PhraseSet,
    settle_future: PhraseSet,
    weights: StatusWeights,
}

impl StatusExtractor {
    pub fn new(lexicon: &StatusLexicon, scoring: &ScoringConfig) -> Self {
        Self {
            paid: StatusSignals::new(&lexicon.paid),
            pending: StatusSignals::new(&lexicon.pending),
            temporal_paid: PhraseSet::new(&lexicon.temporal.paid),
            temporal_pending: PhraseSet::new(&lexicon.temporal.pending),
            creation_keywords: PhraseSet::new(&lexicon.creation_keywords),
            paid_confirmations: PhraseSet::new(&lexicon.paid_confirmations),
            settle_past: PhraseSet::new(&lexicon.settle_past),
            settle_future: PhraseSet::new(&lexicon.settle_future),
            weights: scoring.status_weights.clone(),
        }
    }

    pub fn extract(&self, text: &str) -> PaymentStatus {
        if self.temporal_pending.contains_any(text) {
            return PaymentStatus::Pending;
        }
        if self.temporal_paid.contains_any(text) {
            return PaymentStatus::Paid;
        }

        if self.creation_keywords.contains_any(text) {
            return if self.paid_confirmations.contains_any(text) {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            };
        }

        let paid = self.paid.score(text, &self.weights);
        let pending = self.pending.score(text, &self.weights);
        tracing::debug!(paid, pending, "status scores");

        let past = self.settle_past.contains_any(text);
        let future = self.settle_future.contains_any(text);

        if paid == 0.0 && pending == 0.0 {
            return if future && !past {
                PaymentStatus::Pending
            } else {
                PaymentStatus::Paid
            };
        }

        if paid > pending {
            PaymentStatus::Paid
        } else if pending > paid {
            PaymentStatus::Pending
        } else if past {
            PaymentStatus::Paid
        } else if future {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Paid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str) -> PaymentStatus {
        StatusExtractor::new(&StatusLexicon::default(), &ScoringConfig::default()).extract(text)
    }

    #[test]
    fn test_temporal_phrases() {
        assert_eq!(status("vou pagar o aluguel"), PaymentStatus::Pending);
        assert_eq!(status("a conta vence amanhã"), PaymentStatus::Pending);
        assert_eq!(status("já paguei o aluguel"), PaymentStatus::Paid);
        assert_eq!(status("ainda não paguei a luz"), PaymentStatus::Pending);
    }

    #[test]
    fn test_new_record_defaults_to_pending() {
        assert_eq!(status("gastei 50 no mercado"), PaymentStatus::Pending);
        assert_eq!(status("comprei um tênis e já paguei"), PaymentStatus::Paid);
    }

    #[test]
    fn test_scored_signals() {
        assert_eq!(status("paguei a conta de luz"), PaymentStatus::Paid);
        assert_eq!(status("boleto pendente da escola"), PaymentStatus::Pending);
        assert_eq!(status("quitei o cartão"), PaymentStatus::Paid);
    }

    #[test]
    fn test_undecided_is_paid() {
        assert_eq!(status("mercado"), PaymentStatus::Paid);
        assert_eq!(status(""), PaymentStatus::Paid);
    }
}
