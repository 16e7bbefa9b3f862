//! Monetary amounts
//!
//! Amounts are held in centavos so that sums and comparisons are exact;
//! extractors produce them from fractional reais.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of Brazilian reais, stored in centavos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    centavos: i64,
}

impl Amount {
    /// Build from a value in reais, rounding to the nearest centavo
    ///
    /// Returns `None` for non-finite values or values that do not fit.
    pub fn from_reais(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let centavos = (value * 100.0).round();
        if centavos.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self {
            centavos: centavos as i64,
        })
    }

    pub fn from_centavos(centavos: i64) -> Self {
        Self { centavos }
    }

    pub fn centavos(&self) -> i64 {
        self.centavos
    }

    /// Value in reais
    pub fn reais(&self) -> f64 {
        self.centavos as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.centavos > 0
    }

    /// Format as pt-BR currency, e.g. `R$ 1.234,56`
    pub fn to_brl(&self) -> String {
        let negative = self.centavos < 0;
        let abs = self.centavos.unsigned_abs();
        let whole = abs / 100;
        let cents = abs % 100;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if negative {
            format!("-R$ {},{:02}", grouped, cents)
        } else {
            format!("R$ {},{:02}", grouped, cents)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_brl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_centavos() {
        let amount = Amount::from_reais(666_666.666).unwrap();
        assert_eq!(amount.centavos(), 66_666_667);
        assert_eq!(Amount::from_reais(0.5).unwrap().centavos(), 50);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Amount::from_reais(f64::NAN).is_none());
        assert!(Amount::from_reais(f64::INFINITY).is_none());
    }

    #[test]
    fn test_brl_formatting() {
        assert_eq!(Amount::from_reais(50.0).unwrap().to_brl(), "R$ 50,00");
        assert_eq!(Amount::from_reais(1234.56).unwrap().to_brl(), "R$ 1.234,56");
        assert_eq!(Amount::from_reais(1_000_000.0).unwrap().to_brl(), "R$ 1.000.000,00");
        assert_eq!(Amount::from_reais(0.5).unwrap().to_brl(), "R$ 0,50");
        assert_eq!(Amount::from_centavos(-1050).to_brl(), "-R$ 10,50");
    }
}
