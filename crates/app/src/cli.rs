use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Category, Money, TransactionKind};

#[derive(Parser, Debug)]
#[command(name = "budgee", version)]
#[command(about = "Track incomes and expenses shared between people")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Context file to load and rewrite (overrides the config).
    #[arg(long, global = true)]
    pub context: Option<PathBuf>,

    /// Defaults to `summary`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an empty context file.
    Init,
    /// Show persons, incomes, expenses and totals.
    Summary,
    Person(Person),
    Income(Income),
    Expense(Expense),
    Tx(Tx),
    /// Write every transaction as CSV.
    Export(ExportArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct Person {
    #[command(subcommand)]
    pub command: PersonCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PersonCommand {
    Add {
        name: String,
    },
    Rename {
        id: String,
        name: String,
    },
    Remove {
        id: String,
    },
    /// Show the incomes and expenses of a person with their share.
    Show {
        id: String,
    },
    List,
}

#[derive(Args, Debug, PartialEq)]
pub struct Income {
    #[command(subcommand)]
    pub command: AddCommand,
}

#[derive(Args, Debug, PartialEq)]
pub struct Expense {
    #[command(subcommand)]
    pub command: AddCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AddCommand {
    Add(AddArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    pub name: String,
    #[arg(value_parser = parse_money, allow_negative_numbers = true)]
    pub amount: Money,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    #[arg(long)]
    pub note: Option<String>,
    /// Person sharing the transaction; repeat to share between several.
    #[arg(long = "person")]
    pub persons: Vec<String>,
}

#[derive(Args, Debug, PartialEq)]
pub struct Tx {
    #[command(subcommand)]
    pub command: TxCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum TxCommand {
    Update(UpdateArgs),
    Remove {
        id: String,
    },
    /// Share a transaction with one or more persons.
    Assign {
        id: String,
        #[arg(required = true)]
        persons: Vec<String>,
    },
    Unassign {
        id: String,
        person: String,
    },
    List(ListArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
    pub amount: Option<Money>,
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<TransactionKind>,
    #[arg(long, value_parser = parse_category, conflicts_with = "no_category")]
    pub category: Option<Category>,
    #[arg(long)]
    pub no_category: bool,
    #[arg(long, conflicts_with = "no_note")]
    pub note: Option<String>,
    #[arg(long)]
    pub no_note: bool,
}

#[derive(Args, Debug, PartialEq, Default)]
pub struct ListArgs {
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<TransactionKind>,
    #[arg(long)]
    pub person: Option<String>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug, PartialEq)]
pub struct ExportArgs {
    /// Output file; stdout when missing.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn parse_money(raw: &str) -> Result<Money, String> {
    raw.parse().map_err(|err: engine::EngineError| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    engine::parse_date(raw).map_err(|err| err.to_string())
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse().map_err(|err: engine::EngineError| err.to_string())
}

fn parse_kind(raw: &str) -> Result<TransactionKind, String> {
    TransactionKind::try_from(raw).map_err(|err| err.to_string())
}
