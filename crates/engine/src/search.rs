//! Linear search over the flattened view.

use tracing::debug;

use crate::{EngineError, Entry, ResultEngine, Store};

/// Result of a search that ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(Vec<Entry>),
    /// The scan ran and nothing matched.
    NoMatches,
}

impl SearchOutcome {
    /// Matching entries; empty for [`SearchOutcome::NoMatches`].
    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Matches(entries) => entries,
            Self::NoMatches => Vec::new(),
        }
    }
}

/// Finds the entries where the query is a case-insensitive substring of the
/// category, equals the date (case-insensitively), or equals the compact
/// amount rendering (`250` matches `250` but not `250.5`).
///
/// A blank query fails with [`EngineError::EmptyQuery`] before any scan.
pub fn search(store: &Store, query: &str) -> ResultEngine<SearchOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Err(EngineError::EmptyQuery);
    }
    let needle = query.to_lowercase();

    let matches: Vec<Entry> = store
        .flatten()
        .filter(|entry| {
            entry.category.to_lowercase().contains(&needle)
                || entry.date_label().eq_ignore_ascii_case(query)
                || entry.amount.compact() == query
        })
        .collect();
    debug!(query, matches = matches.len(), "search completed");

    if matches.is_empty() {
        Ok(SearchOutcome::NoMatches)
    } else {
        Ok(SearchOutcome::Matches(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoneyCents, parse_date};

    fn store() -> Store {
        let mut store = Store::new();
        store.add("Groceries", MoneyCents::new(25000), parse_date("2024-01-02").unwrap());
        store.add("Rent", MoneyCents::new(25050), parse_date("2024-01-01").unwrap());
        store.add("Fun", MoneyCents::new(1200), parse_date("2024-03-09").unwrap());
        store
    }

    fn categories(outcome: SearchOutcome) -> Vec<String> {
        outcome.into_entries().into_iter().map(|e| e.category).collect()
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(search(&store(), ""), Err(EngineError::EmptyQuery)));
        assert!(matches!(search(&store(), "  \t"), Err(EngineError::EmptyQuery)));
    }

    #[test]
    fn category_substring_ignores_case() {
        assert_eq!(categories(search(&store(), "GROC").unwrap()), vec!["Groceries"]);
        assert_eq!(categories(search(&store(), "n").unwrap()), vec!["Rent", "Fun"]);
    }

    #[test]
    fn date_must_match_exactly() {
        assert_eq!(categories(search(&store(), "2024-03-09").unwrap()), vec!["Fun"]);
        assert_eq!(search(&store(), "2024-03").unwrap(), SearchOutcome::NoMatches);
    }

    #[test]
    fn amount_uses_compact_rendering() {
        assert_eq!(categories(search(&store(), "250").unwrap()), vec!["Groceries"]);
        assert_eq!(categories(search(&store(), "250.5").unwrap()), vec!["Rent"]);
        assert_eq!(search(&store(), "250.0").unwrap(), SearchOutcome::NoMatches);
    }

    #[test]
    fn no_matches_is_distinct() {
        assert_eq!(search(&store(), "travel").unwrap(), SearchOutcome::NoMatches);
    }
}
