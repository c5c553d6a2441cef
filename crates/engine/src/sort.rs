//! Column sorting of the flattened view.
//!
//! Each column remembers the direction it will use next; sorting by a column
//! flips it, so activating the same column twice alternates ascending and
//! descending. Sorting is stable: equal keys keep their flattened order.

use std::cmp::Ordering;

use crate::{Entry, Store};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Category,
    Date,
    Amount,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [Self::Category, Self::Date, Self::Amount];

    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Amount => "Amount",
        }
    }

    fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            Self::Category => category_key(&a.category).cmp(&category_key(&b.category)),
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.amount.cmp(&b.amount),
        }
    }
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sorts `entries` in place, stable in both directions.
pub fn sort_entries(entries: &mut [Entry], column: SortColumn, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => entries.sort_by(|a, b| column.compare(a, b)),
        SortDirection::Descending => entries.sort_by(|a, b| column.compare(b, a)),
    }
}

/// The flattened view after a sort, with the order that was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorted {
    pub column: SortColumn,
    pub direction: SortDirection,
    pub entries: Vec<Entry>,
}

/// Per-column direction memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    category: SortDirection,
    date: SortDirection,
    amount: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the next sort on `column` will use.
    pub fn next_direction(&self, column: SortColumn) -> SortDirection {
        match column {
            SortColumn::Category => self.category,
            SortColumn::Date => self.date,
            SortColumn::Amount => self.amount,
        }
    }

    fn slot(&mut self, column: SortColumn) -> &mut SortDirection {
        match column {
            SortColumn::Category => &mut self.category,
            SortColumn::Date => &mut self.date,
            SortColumn::Amount => &mut self.amount,
        }
    }

    /// Sorts the whole store by `column` and flips that column's direction.
    pub fn sort(&mut self, store: &Store, column: SortColumn) -> Sorted {
        let slot = self.slot(column);
        let direction = *slot;
        *slot = direction.toggled();

        let mut entries: Vec<Entry> = store.flatten().collect();
        sort_entries(&mut entries, column, direction);
        Sorted {
            column,
            direction,
            entries,
        }
    }
}
