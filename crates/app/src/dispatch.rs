//! Runs a parsed command against a loaded manager.

use std::io::Write;

use chrono::NaiveDate;
use engine::{Manager, NewTransaction, TransactionKind, TransactionListFilter, TransactionUpdate};
use tracing::debug;

use crate::{
    cli::{
        AddArgs, AddCommand, Command, Expense, Income, ListArgs, Person, PersonCommand, Tx,
        TxCommand, UpdateArgs,
    },
    error::{AppError, Result},
    render,
};

/// What the caller has to do once a command ran.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed and must be saved.
    Changed,
    Unchanged,
}

/// Executes `command`, printing results to `out`.
///
/// `today` fills in missing transaction dates. `init` and `export` touch
/// files and are handled by the caller.
pub fn execute(
    manager: &mut Manager,
    command: Command,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<Outcome> {
    debug!(?command, "executing");
    match command {
        Command::Summary => {
            render::summary(out, &manager.summary()?)?;
            Ok(Outcome::Unchanged)
        }
        Command::Person(Person { command }) => person(manager, command, out),
        Command::Income(Income {
            command: AddCommand::Add(args),
        }) => add(manager, TransactionKind::Income, args, today, out),
        Command::Expense(Expense {
            command: AddCommand::Add(args),
        }) => add(manager, TransactionKind::Expense, args, today, out),
        Command::Tx(Tx { command }) => tx(manager, command, out),
        Command::Init | Command::Export(_) => Err(AppError::Usage(
            "command needs direct access to the context file".to_string(),
        )),
    }
}

fn person(manager: &mut Manager, command: PersonCommand, out: &mut dyn Write) -> Result<Outcome> {
    match command {
        PersonCommand::Add { name } => {
            let id = manager.create_person(&name)?;
            writeln!(out, "created person: {id}")?;
            Ok(Outcome::Changed)
        }
        PersonCommand::Rename { id, name } => {
            let new_id = manager.rename_person(&id, &name)?;
            writeln!(out, "renamed person: {id} -> {new_id}")?;
            Ok(Outcome::Changed)
        }
        PersonCommand::Remove { id } => {
            let removed = manager.delete_person(&id)?;
            writeln!(
                out,
                "removed person: {id} (unlinked from {} transaction(s))",
                removed.transactions.len()
            )?;
            Ok(Outcome::Changed)
        }
        PersonCommand::Show { id } => {
            render::person_report(out, &manager.person_report(&id)?)?;
            Ok(Outcome::Unchanged)
        }
        PersonCommand::List => {
            render::persons(out, manager.persons())?;
            Ok(Outcome::Unchanged)
        }
    }
}

fn add(
    manager: &mut Manager,
    kind: TransactionKind,
    args: AddArgs,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let mut cmd = NewTransaction::new(args.name, kind, args.amount, args.date.unwrap_or(today));
    cmd.category = args.category;
    cmd.note = args.note;
    cmd.persons = args.persons;

    let id = manager.create_transaction(cmd)?;
    writeln!(out, "created {kind}: {id}")?;
    Ok(Outcome::Changed)
}

fn update_from_args(args: &UpdateArgs) -> TransactionUpdate {
    let mut update = TransactionUpdate::new();
    update.name = args.name.clone();
    update.kind = args.kind;
    update.amount = args.amount;
    update.date = args.date;
    if args.no_category {
        update.category = Some(None);
    } else if let Some(category) = args.category {
        update.category = Some(Some(category));
    }
    if args.no_note {
        update.note = Some(None);
    } else if let Some(note) = &args.note {
        update.note = Some(Some(note.clone()));
    }
    update
}

fn filter_from_args(args: ListArgs) -> TransactionListFilter {
    TransactionListFilter {
        kind: args.kind,
        person: args.person,
        category: args.category,
        from: args.from,
        to: args.to,
    }
}

fn tx(manager: &mut Manager, command: TxCommand, out: &mut dyn Write) -> Result<Outcome> {
    match command {
        TxCommand::Update(args) => {
            let update = update_from_args(&args);
            if update.is_empty() {
                return Err(AppError::Usage(
                    "nothing to update: pass at least one option".to_string(),
                ));
            }
            let new_id = manager.update_transaction(&args.id, update)?;
            if new_id == args.id {
                writeln!(out, "updated transaction: {new_id}")?;
            } else {
                writeln!(out, "updated transaction: {} -> {new_id}", args.id)?;
            }
            Ok(Outcome::Changed)
        }
        TxCommand::Remove { id } => {
            manager.delete_transaction(&id)?;
            writeln!(out, "removed transaction: {id}")?;
            Ok(Outcome::Changed)
        }
        TxCommand::Assign { id, persons } => {
            // All or nothing: work on a copy so a bad id leaves the state as it was.
            let mut next = manager.clone();
            for person in &persons {
                next.assign(&id, person)?;
            }
            *manager = next;
            writeln!(out, "assigned {} to {id}", persons.join(", "))?;
            Ok(Outcome::Changed)
        }
        TxCommand::Unassign { id, person } => {
            manager.unassign(&id, &person)?;
            writeln!(out, "unassigned {person} from {id}")?;
            Ok(Outcome::Changed)
        }
        TxCommand::List(args) => {
            let listed = manager.transactions(&filter_from_args(args))?;
            render::transactions(out, &listed)?;
            Ok(Outcome::Unchanged)
        }
    }
}
