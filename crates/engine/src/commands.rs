//! Command structs for manager operations.
//!
//! These types group parameters for transaction writes and listing, keeping
//! call sites readable and avoiding long argument lists.

use chrono::NaiveDate;

use crate::{Category, Money, TransactionKind};

/// Create an income or an expense.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub name: String,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: Option<Category>,
    pub note: Option<String>,
    pub persons: Vec<String>,
}

impl NewTransaction {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: TransactionKind,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            amount,
            date,
            category: None,
            note: None,
            persons: Vec::new(),
        }
    }

    #[must_use]
    pub fn income(name: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(name, TransactionKind::Income, amount, date)
    }

    #[must_use]
    pub fn expense(name: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(name, TransactionKind::Expense, amount, date)
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Adds a person to the allocation; call repeatedly to share.
    #[must_use]
    pub fn person(mut self, person_id: impl Into<String>) -> Self {
        self.persons.push(person_id.into());
        self
    }
}

/// Patch an existing transaction. `None` fields are left as they are.
///
/// `category` and `note` are double options: `Some(None)` clears the value.
#[derive(Clone, Debug, Default)]
pub struct TransactionUpdate {
    pub name: Option<String>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category: Option<Option<Category>>,
    pub note: Option<Option<String>>,
}

impl TransactionUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = Some(note);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.note.is_none()
    }
}

/// Narrow a transaction listing. Every set field must match.
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub kind: Option<TransactionKind>,
    pub person: Option<String>,
    pub category: Option<Category>,
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
}
