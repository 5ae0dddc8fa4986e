//! Plain-text rendering of manager views.

use std::io::{self, Write};

use engine::{Person, PersonReport, Summary, Transaction, TransactionLine};

fn title(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "------- {text} -------")
}

fn section(
    out: &mut dyn Write,
    label: &str,
    bullet: char,
    lines: &[TransactionLine],
) -> io::Result<()> {
    writeln!(out, "{label}:")?;
    for line in lines {
        writeln!(out, "    {bullet} {}: {}", line.name, line.amount)?;
    }
    Ok(())
}

/// Sections with nothing in them are left out.
pub fn summary(out: &mut dyn Write, summary: &Summary) -> io::Result<()> {
    title(out, "Summary")?;

    if !summary.persons.is_empty() {
        writeln!(out, "Persons:")?;
        for person in &summary.persons {
            writeln!(out, "    • {} ({})", person.name, person.id)?;
        }
    }
    if !summary.incomes.is_empty() {
        section(out, "Incomes", '+', &summary.incomes)?;
    }
    if !summary.expenses.is_empty() {
        section(out, "Expenses", '-', &summary.expenses)?;
    }
    if !summary.incomes.is_empty() || !summary.expenses.is_empty() {
        writeln!(out, "Total incomes: {}", summary.total_incomes)?;
        writeln!(out, "Total expenses: {}", summary.total_expenses)?;
        writeln!(out, "Balance: {}", summary.balance)?;
    }
    if summary.unallocated > 0 {
        writeln!(out, "Unallocated transactions: {}", summary.unallocated)?;
    }
    Ok(())
}

pub fn person_report(out: &mut dyn Write, report: &PersonReport) -> io::Result<()> {
    title(out, &report.name)?;
    section(out, "Incomes", '+', &report.incomes)?;
    section(out, "Expenses", '-', &report.expenses)?;
    writeln!(out, "Profits: {}", report.profits)?;
    writeln!(out, "Total incomes: {}", report.total_incomes)?;
    writeln!(out, "Total expenses: {}", report.total_expenses)?;
    writeln!(out, "Total shared incomes: {}", report.total_shared_incomes)?;
    writeln!(out, "Total shared expenses: {}", report.total_shared_expenses)
}

pub fn persons<'a>(
    out: &mut dyn Write,
    persons: impl Iterator<Item = &'a Person>,
) -> io::Result<()> {
    let mut any = false;
    for person in persons {
        any = true;
        writeln!(
            out,
            "{:<20}  {:<24}  {} transaction(s)",
            person.id,
            person.name,
            person.transactions.len()
        )?;
    }
    if !any {
        writeln!(out, "No persons.")?;
    }
    Ok(())
}

pub fn transactions(out: &mut dyn Write, transactions: &[&Transaction]) -> io::Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions.");
    }
    for tx in transactions {
        let category = tx.category.map(|c| c.name()).unwrap_or("-");
        let persons = if tx.is_unallocated() {
            "(unallocated)".to_string()
        } else {
            tx.persons.join(", ")
        };
        writeln!(
            out,
            "{}  {:<7}  {:>12}  {:<24}  {:<16}  {}",
            tx.date,
            tx.kind,
            tx.value().to_string(),
            tx.id,
            category,
            persons
        )?;
    }
    Ok(())
}
