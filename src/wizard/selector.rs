//! Country selector modal — a filterable view over the fixed catalog.

use crate::countries::{self, Country};

/// Shown when the search matches nothing.
pub const EMPTY_RESULTS_MESSAGE: &str = "No countries found";

/// How the selector was dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    Selected(Country),
    Closed,
}

/// Search state of an open selector.
#[derive(Debug, Clone, Default)]
pub struct CountrySelector {
    search: String,
}

impl CountrySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Catalog entries whose name contains the search text, ignoring case.
    pub fn results(&self) -> Vec<&'static Country> {
        countries::filter(&self.search)
    }

    pub fn is_empty_result(&self) -> bool {
        self.results().is_empty()
    }

    /// Pick a country from the current results by code.
    ///
    /// Returns `None` when the code is not among the visible results.
    pub fn select(&self, code: &str) -> Option<SelectorOutcome> {
        self.results()
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .map(|c| SelectorOutcome::Selected(c.clone()))
    }

    pub fn close(self) -> SelectorOutcome {
        SelectorOutcome::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ire_returns_ireland() {
        let mut selector = CountrySelector::new();
        selector.set_search("ire");
        let results = selector.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Ireland");
    }

    #[test]
    fn search_zz_is_empty() {
        let mut selector = CountrySelector::new();
        selector.set_search("zz");
        assert!(selector.is_empty_result());
    }

    #[test]
    fn clear_search_restores_catalog() {
        let mut selector = CountrySelector::new();
        selector.set_search("alg");
        assert_eq!(selector.results().len(), 1);
        selector.clear_search();
        assert_eq!(selector.search(), "");
        assert_eq!(selector.results().len(), countries::catalog().len());
    }

    #[test]
    fn select_only_from_visible_results() {
        let mut selector = CountrySelector::new();
        selector.set_search("Aus");
        match selector.select("au") {
            Some(SelectorOutcome::Selected(country)) => assert_eq!(country.name, "Australia"),
            other => panic!("expected Australia, got {other:?}"),
        }
        assert!(selector.select("GB").is_none());
    }

    #[test]
    fn close_returns_closed() {
        assert_eq!(CountrySelector::new().close(), SelectorOutcome::Closed);
    }
}
