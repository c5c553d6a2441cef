//! In-memory transaction store.
//!
//! The store maps each category name to the ordered list of its transactions.
//! Categories keep their first-seen order and transactions keep insertion
//! order; there is no stable identifier, so update and delete address a
//! transaction by position (category index, then index inside the category).
//!
//! Category names are case-sensitive keys and are never pruned: deleting the
//! last transaction of a category leaves the category with an empty list.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    BulkRecord, EngineError, Entry, MoneyCents, ResultEngine, Transaction, TransactionUpdate,
};

/// A category and its transactions, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Category {
    pub(crate) name: String,
    pub(crate) transactions: Vec<Transaction>,
}

impl Category {
    pub(crate) fn new(name: String, transactions: Vec<Transaction>) -> Self {
        Self { name, transactions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of the category amounts.
    pub fn total(&self) -> ResultEngine<MoneyCents> {
        MoneyCents::checked_sum(self.transactions.iter().map(|tx| tx.amount))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: MoneyCents,
}

/// Per-category totals in category order, plus the grand total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub categories: Vec<CategoryTotal>,
    pub total: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Store {
    categories: Vec<Category>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// `true` when the store holds no category at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of transactions across every category.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.transactions.len()).sum()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks a category up by its exact (case-sensitive) name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    /// Appends a transaction to `category`, creating the category if needed.
    ///
    /// No duplicate detection is performed.
    pub fn add(&mut self, category: impl Into<String>, amount: MoneyCents, date: NaiveDate) {
        let category = category.into();
        debug!(%category, %amount, %date, "adding transaction");
        let tx = Transaction::new(amount, date);
        match self.position(&category) {
            Some(idx) => self.categories[idx].transactions.push(tx),
            None => self.categories.push(Category::new(category, vec![tx])),
        }
    }

    /// Adds every record in order and returns how many were applied.
    ///
    /// The first failing record stops the import: records before it stay
    /// applied, records after it are never read.
    pub fn add_bulk<I>(&mut self, records: I) -> ResultEngine<usize>
    where
        I: IntoIterator<Item = ResultEngine<BulkRecord>>,
    {
        let mut applied = 0;
        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(applied, "bulk import aborted: {err}");
                    return Err(err);
                }
            };
            self.add(record.category, record.amount, record.date);
            applied += 1;
        }
        debug!(applied, "bulk import completed");
        Ok(applied)
    }

    /// Checks that both positional indices address an existing transaction.
    fn locate(&self, category_index: usize, transaction_index: usize) -> ResultEngine<()> {
        let category =
            self.categories
                .get(category_index)
                .ok_or(EngineError::CategoryIndex {
                    index: category_index,
                    len: self.categories.len(),
                })?;
        if transaction_index >= category.transactions.len() {
            return Err(EngineError::TransactionIndex {
                category: category.name.clone(),
                index: transaction_index,
                len: category.transactions.len(),
            });
        }
        Ok(())
    }

    /// Replaces one field of the addressed transaction.
    ///
    /// A category change renames the whole category: every transaction under
    /// the old name moves to the new one, merging into it when it already
    /// exists (the target keeps its position, moved transactions go last).
    pub fn update(
        &mut self,
        category_index: usize,
        transaction_index: usize,
        change: TransactionUpdate,
    ) -> ResultEngine<()> {
        self.locate(category_index, transaction_index)?;
        debug!(
            category_index,
            transaction_index,
            field = change.field(),
            "updating transaction"
        );

        match change {
            TransactionUpdate::Category(name) => self.rename(category_index, name),
            TransactionUpdate::Amount(amount) => {
                self.categories[category_index].transactions[transaction_index].amount = amount;
            }
            TransactionUpdate::Date(date) => {
                self.categories[category_index].transactions[transaction_index].date = date;
            }
        }
        Ok(())
    }

    fn rename(&mut self, index: usize, name: String) {
        if self.categories[index].name == name {
            return;
        }
        match self.position(&name) {
            Some(target) => {
                let moved = self.categories.remove(index);
                let target = if target > index { target - 1 } else { target };
                debug!(from = %moved.name, to = %name, "merging category");
                self.categories[target].transactions.extend(moved.transactions);
            }
            None => self.categories[index].name = name,
        }
    }

    /// Removes the addressed transaction and returns it.
    ///
    /// The category stays in the store even when its list becomes empty.
    pub fn delete(
        &mut self,
        category_index: usize,
        transaction_index: usize,
    ) -> ResultEngine<Transaction> {
        self.locate(category_index, transaction_index)?;
        let category = &mut self.categories[category_index];
        debug!(category = %category.name, transaction_index, "deleting transaction");
        Ok(category.transactions.remove(transaction_index))
    }

    /// Every transaction with its category attached, in category order then
    /// insertion order. The iterator is recomputed on each call.
    pub fn flatten(&self) -> impl Iterator<Item = Entry> + '_ {
        self.categories.iter().flat_map(|category| {
            category
                .transactions
                .iter()
                .map(|tx| Entry::new(&category.name, tx))
        })
    }

    /// Fails with [`EngineError::TotalOverflow`] when a total does not fit.
    pub fn summarize(&self) -> ResultEngine<Summary> {
        let categories = self
            .categories
            .iter()
            .map(|category| {
                Ok(CategoryTotal {
                    name: category.name.clone(),
                    total: category.total()?,
                })
            })
            .collect::<ResultEngine<Vec<_>>>()?;
        let total = MoneyCents::checked_sum(categories.iter().map(|c| c.total))?;
        Ok(Summary { categories, total })
    }
}
