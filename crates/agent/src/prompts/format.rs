//! Spoken formatting of values

use chrono::{Duration, NaiveDate};

use voice_ledger_core::Amount;

/// Where a date falls relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRelation {
    Past,
    Today,
    Future,
}

impl DateRelation {
    pub fn of(date: NaiveDate, today: NaiveDate) -> Self {
        match date.cmp(&today) {
            std::cmp::Ordering::Less => DateRelation::Past,
            std::cmp::Ordering::Equal => DateRelation::Today,
            std::cmp::Ordering::Greater => DateRelation::Future,
        }
    }
}

/// `hoje`, `ontem`, `amanhã` or `DD/MM/YYYY`
pub fn friendly_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "hoje".to_string()
    } else if date == today - Duration::days(1) {
        "ontem".to_string()
    } else if date == today + Duration::days(1) {
        "amanhã".to_string()
    } else {
        date.format("%d/%m/%Y").to_string()
    }
}

/// `R$ 1.234,56`
pub fn currency(amount: Amount) -> String {
    amount.to_brl()
}

/// Whole reais for "Confirma 50 reais?", when the amount is whole
pub fn whole_reais(amount: Amount) -> Option<i64> {
    (amount.centavos() % 100 == 0).then(|| amount.centavos() / 100)
}

/// Replace `{key}` placeholders
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}
