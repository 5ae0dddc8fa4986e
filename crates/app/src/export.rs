//! CSV export of the transactions of a context.

use std::io::Write;

use csv::WriterBuilder;
use engine::{Manager, TransactionListFilter};
use serde::Serialize;

use crate::error::Result;

const HEADER: [&str; 8] = [
    "id", "name", "kind", "date", "amount", "category", "note", "persons",
];

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a str,
    date: String,
    amount: String,
    category: Option<&'a str>,
    note: Option<&'a str>,
    persons: String,
}

/// Writes the header, then one row per transaction ordered by date. Amounts
/// are signed.
pub fn write_csv<W: Write>(manager: &Manager, target: W) -> Result<usize> {
    let transactions = manager.transactions(&TransactionListFilter::default())?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(target);
    writer.write_record(HEADER)?;
    for tx in &transactions {
        writer.serialize(ExportRow {
            id: &tx.id,
            name: &tx.name,
            kind: tx.kind.as_str(),
            date: tx.date.to_string(),
            amount: tx.value().to_string(),
            category: tx.category.map(|c| c.name()),
            note: tx.note.as_deref(),
            persons: tx.persons.join(";"),
        })?;
    }
    writer.flush()?;
    Ok(transactions.len())
}
