//! Serialized form of a [`Manager`].
//!
//! The document is what lands in the context file. Loading it back checks
//! every invariant the manager relies on, so a hand-edited file cannot smuggle
//! in dangling or one-sided links.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Manager, Person, ResultEngine, Transaction, slugify};

/// Version written by this build.
pub const CONTEXT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub version: u32,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Default for ContextDocument {
    fn default() -> Self {
        Self {
            version: CONTEXT_VERSION,
            persons: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

fn corrupt(message: String) -> EngineError {
    EngineError::CorruptContext(message)
}

fn check_identity(kind: &str, id: &str, name: &str) -> ResultEngine<()> {
    if id.is_empty() || slugify(name) != id {
        return Err(corrupt(format!(
            "{kind} \"{name}\" does not match its id \"{id}\""
        )));
    }
    Ok(())
}

fn check_unique_links(owner: &str, links: &[String]) -> ResultEngine<()> {
    let mut seen = HashSet::with_capacity(links.len());
    for link in links {
        if !seen.insert(link.as_str()) {
            return Err(corrupt(format!("\"{owner}\" links \"{link}\" twice")));
        }
    }
    Ok(())
}

impl Manager {
    /// Snapshot of the whole state, ready to be serialized.
    pub fn to_document(&self) -> ContextDocument {
        ContextDocument {
            version: CONTEXT_VERSION,
            persons: self.persons.values().cloned().collect(),
            transactions: self.transactions.values().cloned().collect(),
        }
    }

    /// Rebuilds a manager from a document, rejecting anything that breaks
    /// identity, uniqueness or link symmetry.
    pub fn from_document(document: ContextDocument) -> ResultEngine<Self> {
        if document.version != CONTEXT_VERSION {
            return Err(EngineError::UnsupportedVersion(document.version));
        }

        let mut persons = BTreeMap::new();
        for person in document.persons {
            check_identity("person", &person.id, &person.name)?;
            check_unique_links(&person.id, &person.transactions)?;
            if persons.contains_key(&person.id) {
                return Err(corrupt(format!("duplicate person \"{}\"", person.id)));
            }
            persons.insert(person.id.clone(), person);
        }

        let mut transactions = BTreeMap::new();
        for tx in document.transactions {
            check_identity(tx.kind.as_str(), &tx.id, &tx.name)?;
            check_unique_links(&tx.id, &tx.persons)?;
            if tx.amount.is_negative() {
                return Err(corrupt(format!("negative amount in \"{}\"", tx.id)));
            }
            if transactions.contains_key(&tx.id) {
                return Err(corrupt(format!("duplicate transaction \"{}\"", tx.id)));
            }
            transactions.insert(tx.id.clone(), tx);
        }

        for tx in transactions.values() {
            for person_id in &tx.persons {
                let person = persons.get(person_id).ok_or_else(|| {
                    corrupt(format!("\"{}\" references unknown person \"{person_id}\"", tx.id))
                })?;
                if !person.transactions.contains(&tx.id) {
                    return Err(corrupt(format!(
                        "\"{person_id}\" is missing the link to \"{}\"",
                        tx.id
                    )));
                }
            }
        }
        for person in persons.values() {
            for tx_id in &person.transactions {
                let tx = transactions.get(tx_id).ok_or_else(|| {
                    corrupt(format!(
                        "\"{}\" references unknown transaction \"{tx_id}\"",
                        person.id
                    ))
                })?;
                if !tx.persons.contains(&person.id) {
                    return Err(corrupt(format!(
                        "\"{tx_id}\" is missing the link to \"{}\"",
                        person.id
                    )));
                }
            }
        }

        Ok(Self {
            persons,
            transactions,
        })
    }
}
