use tracing::debug;

use crate::{
    EngineError, NewTransaction, ResultEngine, Transaction, TransactionListFilter,
    TransactionUpdate,
    transactions::validate_amount,
    util::{normalize_name, normalize_optional_text},
};

use super::{Manager, replace_id};

impl Manager {
    /// Return a transaction by id.
    pub fn transaction(&self, transaction_id: &str) -> ResultEngine<&Transaction> {
        self.require_transaction(transaction_id)
    }

    /// List transactions matching `filter`, ordered by date then id.
    pub fn transactions(&self, filter: &TransactionListFilter) -> ResultEngine<Vec<&Transaction>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(EngineError::InvalidDate(format!(
                "invalid range: {from} is after {to}"
            )));
        }
        if let Some(person_id) = filter.person.as_deref() {
            self.require_person(person_id)?;
        }

        let mut out: Vec<&Transaction> = self
            .transactions
            .values()
            .filter(|tx| filter.kind.is_none_or(|kind| tx.kind == kind))
            .filter(|tx| filter.category.is_none_or(|c| tx.category == Some(c)))
            .filter(|tx| filter.from.is_none_or(|from| tx.date >= from))
            .filter(|tx| filter.to.is_none_or(|to| tx.date <= to))
            .filter(|tx| {
                filter
                    .person
                    .as_ref()
                    .is_none_or(|person| tx.persons.contains(person))
            })
            .collect();
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    /// Create an income or an expense and return its id.
    ///
    /// Every listed person must exist; repeated ids are only linked once.
    pub fn create_transaction(&mut self, cmd: NewTransaction) -> ResultEngine<String> {
        let (name, id) = normalize_name(&cmd.name, cmd.kind.as_str())?;
        let amount = validate_amount(cmd.amount)?;
        if self.transactions.contains_key(&id) {
            return Err(EngineError::ExistingKey(id));
        }

        let mut persons: Vec<String> = Vec::with_capacity(cmd.persons.len());
        for person_id in cmd.persons {
            self.require_person(&person_id)?;
            if !persons.contains(&person_id) {
                persons.push(person_id);
            }
        }

        debug!(
            transaction = %id,
            kind = %cmd.kind,
            amount = %amount,
            persons = persons.len(),
            "creating transaction"
        );
        self.transactions.insert(
            id.clone(),
            Transaction {
                id: id.clone(),
                name,
                kind: cmd.kind,
                amount,
                date: cmd.date,
                category: cmd.category,
                note: normalize_optional_text(cmd.note.as_deref()),
                persons: Vec::new(),
            },
        );
        for person_id in &persons {
            self.link(&id, person_id);
        }
        Ok(id)
    }

    /// Apply a patch to a transaction and return its (possibly new) id.
    ///
    /// A new name re-keys the transaction; the persons sharing it follow.
    pub fn update_transaction(
        &mut self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> ResultEngine<String> {
        let mut next = self.require_transaction(transaction_id)?.clone();

        if let Some(name) = update.name.as_deref() {
            let (name, id) = normalize_name(name, next.kind.as_str())?;
            if id != transaction_id && self.transactions.contains_key(&id) {
                return Err(EngineError::ExistingKey(id));
            }
            next.id = id;
            next.name = name;
        }
        if let Some(amount) = update.amount {
            next.amount = validate_amount(amount)?;
        }
        if let Some(kind) = update.kind {
            next.kind = kind;
        }
        if let Some(date) = update.date {
            next.date = date;
        }
        if let Some(category) = update.category {
            next.category = category;
        }
        if let Some(note) = update.note {
            next.note = normalize_optional_text(note.as_deref());
        }

        debug!(transaction = %transaction_id, new_id = %next.id, "updating transaction");
        let new_id = next.id.clone();
        if new_id != transaction_id {
            for person_id in &next.persons {
                if let Some(person) = self.persons.get_mut(person_id) {
                    replace_id(&mut person.transactions, transaction_id, &new_id);
                }
            }
            self.transactions.remove(transaction_id);
        }
        self.transactions.insert(new_id.clone(), next);
        Ok(new_id)
    }

    /// Removes a transaction and unlinks it from every person.
    pub fn delete_transaction(&mut self, transaction_id: &str) -> ResultEngine<Transaction> {
        let tx = self
            .transactions
            .remove(transaction_id)
            .ok_or_else(|| EngineError::KeyNotFound(transaction_id.to_string()))?;

        debug!(transaction = %transaction_id, links = tx.persons.len(), "deleting transaction");
        for person_id in &tx.persons {
            if let Some(person) = self.persons.get_mut(person_id) {
                person.transactions.retain(|id| id != transaction_id);
            }
        }
        Ok(tx)
    }

    /// Adds a person to the ones sharing a transaction.
    pub fn assign(&mut self, transaction_id: &str, person_id: &str) -> ResultEngine<()> {
        let tx = self.require_transaction(transaction_id)?;
        self.require_person(person_id)?;
        if tx.persons.iter().any(|id| id == person_id) {
            return Err(EngineError::ExistingKey(format!(
                "{person_id} in {transaction_id}"
            )));
        }

        debug!(transaction = %transaction_id, person = %person_id, "assigning");
        self.link(transaction_id, person_id);
        Ok(())
    }

    /// Removes a person from the ones sharing a transaction.
    pub fn unassign(&mut self, transaction_id: &str, person_id: &str) -> ResultEngine<()> {
        let tx = self.require_transaction(transaction_id)?;
        self.require_person(person_id)?;
        if !tx.persons.iter().any(|id| id == person_id) {
            return Err(EngineError::KeyNotFound(format!(
                "{person_id} in {transaction_id}"
            )));
        }

        debug!(transaction = %transaction_id, person = %person_id, "unassigning");
        self.unlink(transaction_id, person_id);
        Ok(())
    }
}
