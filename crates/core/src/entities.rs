//! Entities extracted from a command
//!
//! Every field is independently optional; no field implies another.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::{CategoryMatch, TransactionType};
use crate::money::Amount;

/// Payment status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly recurrence on a fixed day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Day of month (1-31)
    pub day: u32,
}

impl Recurrence {
    pub fn monthly(day: u32) -> Option<Self> {
        (1..=31).contains(&day).then_some(Self { day })
    }
}

/// A field the dialogue can ask for
///
/// Only `Type`, `Amount` and `Description` are ever reported missing; the
/// rest exist so prompts and acknowledgments can refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Type,
    Amount,
    Description,
    Category,
    Date,
    Status,
}

impl Field {
    /// Required fields in the order they are asked for
    pub const REQUIRED: [Field; 3] = [Field::Type, Field::Amount, Field::Description];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Category => "category",
            Field::Date => "date",
            Field::Status => "status",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All entities extracted from one command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub category: Option<CategoryMatch>,
    pub recurring: Option<Recurrence>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.recurring.is_none()
    }

    /// Whether a value is present for `field`
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Type => self.transaction_type.is_some(),
            Field::Amount => self.amount.is_some(),
            Field::Description => self.description.is_some(),
            Field::Category => self.category.is_some(),
            Field::Date => self.date.is_some(),
            Field::Status => self.status.is_some(),
        }
    }

    /// Required fields with no value, in asking order
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::REQUIRED
            .iter()
            .copied()
            .filter(|f| !self.has(*f))
            .collect()
    }

    /// Copy the value of a single field from `other`
    ///
    /// Returns `false` when `other` has nothing for that field.
    pub fn take_field(&mut self, field: Field, other: &ExtractedEntities) -> bool {
        if !other.has(field) {
            return false;
        }
        match field {
            Field::Type => self.transaction_type = other.transaction_type,
            Field::Amount => self.amount = other.amount,
            Field::Description => self.description = other.description.clone(),
            Field::Category => self.category = other.category.clone(),
            Field::Date => self.date = other.date,
            Field::Status => self.status = other.status,
        }
        true
    }

    /// Merge another set of entities, overriding fields present in `other`
    pub fn merge(&mut self, other: &ExtractedEntities) {
        for field in [
            Field::Type,
            Field::Amount,
            Field::Description,
            Field::Category,
            Field::Date,
            Field::Status,
        ] {
            self.take_field(field, other);
        }
        if other.recurring.is_some() {
            self.recurring = other.recurring;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_order() {
        let entities = ExtractedEntities {
            amount: Amount::from_reais(10.0),
            ..Default::default()
        };
        assert_eq!(entities.missing_fields(), vec![Field::Type, Field::Description]);
        assert!(ExtractedEntities::default().is_empty());
    }

    #[test]
    fn test_take_field_only_copies_one() {
        let mut base = ExtractedEntities::default();
        let reply = ExtractedEntities {
            amount: Amount::from_reais(50.0),
            description: Some("Mercado".to_string()),
            ..Default::default()
        };
        assert!(base.take_field(Field::Amount, &reply));
        assert!(base.description.is_none());
        assert!(!base.take_field(Field::Type, &reply));
    }

    #[test]
    fn test_merge_overrides_present_fields() {
        let mut base = ExtractedEntities {
            transaction_type: Some(TransactionType::Expense),
            amount: Amount::from_reais(10.0),
            ..Default::default()
        };
        let other = ExtractedEntities {
            amount: Amount::from_reais(20.0),
            recurring: Recurrence::monthly(5),
            ..Default::default()
        };
        base.merge(&other);
        assert_eq!(base.transaction_type, Some(TransactionType::Expense));
        assert_eq!(base.amount, Amount::from_reais(20.0));
        assert_eq!(base.recurring, Some(Recurrence { day: 5 }));
    }

    #[test]
    fn test_recurrence_bounds() {
        assert!(Recurrence::monthly(0).is_none());
        assert!(Recurrence::monthly(32).is_none());
        assert!(Recurrence::monthly(31).is_some());
    }
}
