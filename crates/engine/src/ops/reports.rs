//! Read-only views over the manager: the global summary and the per-person
//! report.

use crate::{EngineError, Money, ResultEngine, Transaction, TransactionKind};

use super::Manager;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonLine {
    pub id: String,
    pub name: String,
}

/// One transaction in a listing. `amount` is the full amount in a summary
/// and the person's share in a person report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionLine {
    pub id: String,
    pub name: String,
    pub amount: Money,
    pub shared: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub persons: Vec<PersonLine>,
    pub incomes: Vec<TransactionLine>,
    pub expenses: Vec<TransactionLine>,
    pub total_incomes: Money,
    pub total_expenses: Money,
    /// `total_incomes - total_expenses`.
    pub balance: Money,
    /// Transactions nobody takes part in.
    pub unallocated: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonReport {
    pub id: String,
    pub name: String,
    pub incomes: Vec<TransactionLine>,
    pub expenses: Vec<TransactionLine>,
    pub total_incomes: Money,
    pub total_expenses: Money,
    /// `total_incomes - total_expenses`.
    pub profits: Money,
    pub total_shared_incomes: Money,
    pub total_shared_expenses: Money,
}

fn full_line(tx: &Transaction) -> TransactionLine {
    TransactionLine {
        id: tx.id.clone(),
        name: tx.name.clone(),
        amount: tx.amount,
        shared: tx.is_shared(),
    }
}

fn overflow(what: &str) -> EngineError {
    EngineError::InvalidAmount(format!("{what} out of range"))
}

fn sum<'a>(lines: impl Iterator<Item = &'a TransactionLine>, what: &str) -> ResultEngine<Money> {
    lines
        .map(|line| line.amount)
        .try_fold(Money::ZERO, Money::checked_add)
        .ok_or_else(|| overflow(what))
}

fn total(lines: &[TransactionLine], what: &str) -> ResultEngine<Money> {
    sum(lines.iter(), what)
}

fn shared_total(lines: &[TransactionLine], what: &str) -> ResultEngine<Money> {
    sum(lines.iter().filter(|line| line.shared), what)
}

fn difference(incomes: Money, expenses: Money, what: &str) -> ResultEngine<Money> {
    incomes
        .checked_sub(expenses)
        .ok_or_else(|| overflow(what))
}

impl Manager {
    /// Everything the manager holds, with overall totals.
    ///
    /// Fails with [`EngineError::InvalidAmount`] when a total does not fit.
    pub fn summary(&self) -> ResultEngine<Summary> {
        let persons = self
            .persons
            .values()
            .map(|person| PersonLine {
                id: person.id.clone(),
                name: person.name.clone(),
            })
            .collect();
        let of_kind = |kind: TransactionKind| -> Vec<TransactionLine> {
            self.transactions
                .values()
                .filter(|tx| tx.kind == kind)
                .map(full_line)
                .collect()
        };
        let incomes = of_kind(TransactionKind::Income);
        let expenses = of_kind(TransactionKind::Expense);
        let total_incomes = total(&incomes, "total incomes")?;
        let total_expenses = total(&expenses, "total expenses")?;

        Ok(Summary {
            persons,
            incomes,
            expenses,
            total_incomes,
            total_expenses,
            balance: difference(total_incomes, total_expenses, "balance")?,
            unallocated: self
                .transactions
                .values()
                .filter(|tx| tx.is_unallocated())
                .count(),
        })
    }

    /// The transactions of one person with that person's share of each.
    pub fn person_report(&self, person_id: &str) -> ResultEngine<PersonReport> {
        let person = self.require_person(person_id)?;

        let mut incomes = Vec::new();
        let mut expenses = Vec::new();
        for tx_id in &person.transactions {
            let tx = self.require_transaction(tx_id)?;
            let line = TransactionLine {
                amount: tx.share_of(person_id)?,
                ..full_line(tx)
            };
            match tx.kind {
                TransactionKind::Income => incomes.push(line),
                TransactionKind::Expense => expenses.push(line),
            }
        }

        let total_incomes = total(&incomes, "total incomes")?;
        let total_expenses = total(&expenses, "total expenses")?;
        Ok(PersonReport {
            id: person.id.clone(),
            name: person.name.clone(),
            total_shared_incomes: shared_total(&incomes, "total shared incomes")?,
            total_shared_expenses: shared_total(&expenses, "total shared expenses")?,
            incomes,
            expenses,
            total_incomes,
            total_expenses,
            profits: difference(total_incomes, total_expenses, "profits")?,
        })
    }
}
