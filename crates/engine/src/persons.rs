//! A person taking part in incomes and expenses.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Slug of `name`.
    pub id: String,
    pub name: String,
    /// Ids of the transactions the person shares, in link order.
    pub transactions: Vec<String>,
}

impl Person {
    pub(crate) fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            transactions: Vec::new(),
        }
    }
}
