//! Budget engine: persons, their incomes and expenses, and the JSON context
//! file they live in.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use engine::{Manager, Money, NewTransaction};
//!
//! let mut manager = Manager::new();
//! let alice = manager.create_person("Alice").unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! manager
//!     .create_transaction(NewTransaction::expense("Rent", Money::new(900_00), date).person(&alice))
//!     .unwrap();
//!
//! let report = manager.person_report(&alice).unwrap();
//! assert_eq!(report.profits, Money::new(-900_00));
//! ```

pub use commands::{NewTransaction, TransactionListFilter, TransactionUpdate};
pub use document::{CONTEXT_VERSION, ContextDocument};
pub use error::EngineError;
pub use money::Money;
pub use ops::{Manager, PersonLine, PersonReport, Summary, TransactionLine};
pub use persons::Person;
pub use store::{read_document, write_document};
pub use transactions::{Category, DATE_FORMAT, Transaction, TransactionKind, parse_date};
pub use util::slugify;

mod commands;
mod document;
mod error;
mod money;
mod ops;
mod persons;
mod store;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
