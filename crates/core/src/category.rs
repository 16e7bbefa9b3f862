//! Categories and transaction types
//!
//! Categories are owned by the caller. The pipeline only matches against the
//! supplied set, or proposes a new category for the caller to create.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    /// User-facing label ("Despesa" / "Receita")
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Despesa",
            TransactionType::Income => "Receita",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "despesa" | "saida" | "saída" => Some(TransactionType::Expense),
            "income" | "receita" | "entrada" => Some(TransactionType::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category record supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            kind,
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

/// A category the caller should create before saving the transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategoryProposal {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewCategoryProposal {
    /// Returns `None` when the name is blank
    pub fn new(name: impl Into<String>, kind: TransactionType) -> Option<Self> {
        let name = name.into().trim().to_string();
        let slug = slugify(&name);
        if slug.is_empty() {
            return None;
        }
        Some(Self { name, slug, kind })
    }
}

/// Category reference carried by entities and drafts
///
/// Either a record from the supplied list or a well-formed proposal;
/// there is no partial reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryMatch {
    Existing(Category),
    Proposed(NewCategoryProposal),
}

impl CategoryMatch {
    pub fn name(&self) -> &str {
        match self {
            CategoryMatch::Existing(c) => &c.name,
            CategoryMatch::Proposed(p) => &p.name,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            CategoryMatch::Existing(c) => &c.slug,
            CategoryMatch::Proposed(p) => &p.slug,
        }
    }

    pub fn existing(&self) -> Option<&Category> {
        match self {
            CategoryMatch::Existing(c) => Some(c),
            CategoryMatch::Proposed(_) => None,
        }
    }

    pub fn proposal(&self) -> Option<&NewCategoryProposal> {
        match self {
            CategoryMatch::Existing(_) => None,
            CategoryMatch::Proposed(p) => Some(p),
        }
    }
}

/// Lowercase ASCII slug: accents stripped, non-alphanumerics collapsed to `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    // NFD splits accented letters into base + combining mark; marks are dropped
    for ch in text.nfd() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii() || ch.is_whitespace() {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Alimentação"), "alimentacao");
        assert_eq!(slugify("  Saúde & Bem-estar "), "saude-bem-estar");
        assert_eq!(slugify("!!"), "");
    }

    #[test]
    fn test_proposal_requires_name() {
        assert!(NewCategoryProposal::new("   ", TransactionType::Expense).is_none());
        let p = NewCategoryProposal::new("Pets", TransactionType::Expense).unwrap();
        assert_eq!(p.slug, "pets");
    }

    #[test]
    fn test_category_deserializes_type_field() {
        let yaml = "id: '1'\nname: Transporte\nslug: transporte\ntype: expense\n";
        let category: Category = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(category.kind, TransactionType::Expense);
        assert!(category.emoji.is_none());
    }
}
