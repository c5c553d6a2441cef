//! Transaction primitives.
//!
//! A `Transaction` is one recorded amount on a given day. It does not carry its
//! category: the store groups transactions under their category name and only
//! reattaches it when producing an [`Entry`] for the flattened view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MoneyCents, date};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: MoneyCents,
    #[serde(with = "date::serde_date")]
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(amount: MoneyCents, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}

/// A transaction with its category attached, as shown by the flattened view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub category: String,
    pub date: NaiveDate,
    pub amount: MoneyCents,
}

impl Entry {
    pub(crate) fn new(category: &str, tx: &Transaction) -> Self {
        Self {
            category: category.to_string(),
            date: tx.date,
            amount: tx.amount,
        }
    }

    /// Date rendered as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_label(&self) -> String {
        date::format_date(self.date)
    }
}

/// Which field of a transaction an update replaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionUpdate {
    /// Renames the whole category the transaction belongs to.
    Category(String),
    Amount(MoneyCents),
    Date(NaiveDate),
}

impl TransactionUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Category(_) => "category",
            Self::Amount(_) => "amount",
            Self::Date(_) => "date",
        }
    }
}
