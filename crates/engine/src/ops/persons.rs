use tracing::debug;

use crate::{EngineError, Person, ResultEngine, util::normalize_name};

use super::{Manager, replace_id};

impl Manager {
    /// Return a person by id.
    pub fn person(&self, person_id: &str) -> ResultEngine<&Person> {
        self.require_person(person_id)
    }

    /// All persons, ordered by id.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Add a new person and return its id (the slug of `name`).
    pub fn create_person(&mut self, name: &str) -> ResultEngine<String> {
        let (name, id) = normalize_name(name, "person")?;
        if self.persons.contains_key(&id) {
            return Err(EngineError::ExistingKey(id));
        }

        debug!(person = %id, "creating person");
        self.persons.insert(id.clone(), Person::new(id.clone(), name));
        Ok(id)
    }

    /// Renames a person and returns its new id.
    ///
    /// Transactions referencing the old id are rewritten.
    pub fn rename_person(&mut self, person_id: &str, new_name: &str) -> ResultEngine<String> {
        let (new_name, new_id) = normalize_name(new_name, "person")?;
        self.require_person(person_id)?;
        if new_id != person_id && self.persons.contains_key(&new_id) {
            return Err(EngineError::ExistingKey(new_id));
        }

        let Some(mut person) = self.persons.remove(person_id) else {
            return Err(EngineError::KeyNotFound(person_id.to_string()));
        };
        debug!(person = %person_id, new_id = %new_id, "renaming person");
        for tx_id in &person.transactions {
            if let Some(tx) = self.transactions.get_mut(tx_id) {
                replace_id(&mut tx.persons, person_id, &new_id);
            }
        }
        person.id = new_id.clone();
        person.name = new_name;
        self.persons.insert(new_id.clone(), person);
        Ok(new_id)
    }

    /// Removes a person and unlinks it from every transaction.
    ///
    /// The transactions stay; the ones left without persons become
    /// unallocated.
    pub fn delete_person(&mut self, person_id: &str) -> ResultEngine<Person> {
        let person = self
            .persons
            .remove(person_id)
            .ok_or_else(|| EngineError::KeyNotFound(person_id.to_string()))?;

        debug!(person = %person_id, links = person.transactions.len(), "deleting person");
        for tx_id in &person.transactions {
            if let Some(tx) = self.transactions.get_mut(tx_id) {
                tx.persons.retain(|id| id != person_id);
            }
        }
        Ok(person)
    }
}
