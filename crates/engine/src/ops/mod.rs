use std::collections::BTreeMap;

use crate::{EngineError, Person, ResultEngine, Transaction};

mod persons;
mod reports;
mod transactions;

pub use reports::{PersonLine, PersonReport, Summary, TransactionLine};

/// In-memory state of a context: persons, transactions and the links
/// between them.
///
/// Links are kept on both sides (`Person::transactions` and
/// `Transaction::persons`) and every operation keeps them symmetric. A failing
/// operation leaves the manager untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manager {
    pub(crate) persons: BTreeMap<String, Person>,
    pub(crate) transactions: BTreeMap<String, Transaction>,
}

impl Manager {
    /// An empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.transactions.is_empty()
    }

    fn require_person(&self, person_id: &str) -> ResultEngine<&Person> {
        self.persons
            .get(person_id)
            .ok_or_else(|| EngineError::KeyNotFound(person_id.to_string()))
    }

    fn require_transaction(&self, transaction_id: &str) -> ResultEngine<&Transaction> {
        self.transactions
            .get(transaction_id)
            .ok_or_else(|| EngineError::KeyNotFound(transaction_id.to_string()))
    }

    /// Adds the link on both sides. Callers check existence first.
    fn link(&mut self, transaction_id: &str, person_id: &str) {
        if let Some(tx) = self.transactions.get_mut(transaction_id) {
            tx.persons.push(person_id.to_string());
        }
        if let Some(person) = self.persons.get_mut(person_id) {
            person.transactions.push(transaction_id.to_string());
        }
    }

    fn unlink(&mut self, transaction_id: &str, person_id: &str) {
        if let Some(tx) = self.transactions.get_mut(transaction_id) {
            tx.persons.retain(|id| id != person_id);
        }
        if let Some(person) = self.persons.get_mut(person_id) {
            person.transactions.retain(|id| id != transaction_id);
        }
    }
}

fn replace_id(ids: &mut [String], old: &str, new: &str) {
    for id in ids.iter_mut().filter(|id| id.as_str() == old) {
        *id = new.to_string();
    }
}
