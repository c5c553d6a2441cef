//! Core data model of the tally finance tracker.
//!
//! The [`Store`] maps categories to their transactions and is persisted as a
//! whole-file JSON [`snapshot`]. Both front ends load it independently, mutate
//! it through positional operations and read it through the flattened view
//! ([`Store::flatten`]), [`search`] and [`SortState`].

pub use bulk::{BulkReader, BulkRecord};
pub use date::{DATE_FORMAT, format_date, parse_date};
pub use error::EngineError;
pub use money::MoneyCents;
pub use search::{SearchOutcome, search};
pub use sort::{SortColumn, SortDirection, SortState, Sorted, sort_entries};
pub use store::{Category, CategoryTotal, Store, Summary};
pub use transactions::{Entry, Transaction, TransactionUpdate};

pub mod bulk;
mod date;
mod error;
mod money;
mod search;
pub mod snapshot;
mod sort;
mod store;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
