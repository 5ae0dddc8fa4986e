//! Transaction primitives.
//!
//! A `Transaction` is an income or an expense shared by zero or more persons.
//! Amounts are stored as non-negative magnitudes; the sign comes from the
//! kind.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, slugify};

/// Date format used for user input and the context file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidKind(value.trim().to_string())),
        }
    }
}

/// Spending/earning category attached to a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Utility,
    Entertainment,
    Development,
    #[serde(rename = "Music Production")]
    MusicProduction,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Housing,
        Category::Utility,
        Category::Entertainment,
        Category::Development,
        Category::MusicProduction,
        Category::HealthFitness,
    ];

    /// Display name, also used in the context file.
    pub fn name(self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Utility => "Utility",
            Self::Entertainment => "Entertainment",
            Self::Development => "Development",
            Self::MusicProduction => "Music Production",
            Self::HealthFitness => "Health & Fitness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Accepts the display name or its slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        Category::ALL
            .into_iter()
            .find(|category| slugify(category.name()) == wanted)
            .ok_or_else(|| EngineError::InvalidCategory(s.trim().to_string()))
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| EngineError::InvalidDate(format!("{value:?}: {err}")))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: Option<Category>,
    pub note: Option<String>,
    /// Person ids sharing the transaction, in allocation order.
    pub persons: Vec<String>,
}

impl Transaction {
    /// Signed value: positive for incomes, negative for expenses.
    pub fn value(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn is_unallocated(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn is_shared(&self) -> bool {
        self.persons.len() > 1
    }

    /// Splits the amount among the persons, in allocation order.
    ///
    /// Shares are magnitudes, like `amount`.
    pub fn shares(&self) -> ResultEngine<Vec<(&str, Money)>> {
        if self.is_unallocated() {
            return Err(EngineError::Unallocated(self.id.clone()));
        }
        Ok(self
            .persons
            .iter()
            .map(String::as_str)
            .zip(self.amount.split(self.persons.len()))
            .collect())
    }

    /// The share of a single person.
    pub fn share_of(&self, person_id: &str) -> ResultEngine<Money> {
        self.shares()?
            .into_iter()
            .find_map(|(id, share)| (id == person_id).then_some(share))
            .ok_or_else(|| EngineError::KeyNotFound(format!("{person_id} in {}", self.id)))
    }
}

pub(crate) fn validate_amount(amount: Money) -> ResultEngine<Money> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be >= 0, got {amount}"
        )));
    }
    Ok(amount)
}
