//! Business switcher dropdown

use crate::models::Business;

pub const NO_SELECTION_LABEL: &str = "Select a business";
pub const EMPTY_LIST_LABEL: &str = "No businesses";

/// Businesses whose name contains `query`, ignoring case; an empty query keeps all
pub fn filter_businesses<'a>(businesses: &'a [Business], query: &str) -> Vec<&'a Business> {
    let needle = query.to_lowercase();
    businesses
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&needle))
        .collect()
}

/// Open/closed state and search query of the switcher
#[derive(Debug, Clone, Default)]
pub struct BusinessSelector {
    open: bool,
    query: String,
}

impl BusinessSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text on the trigger button
    pub fn trigger_label(selected: Option<&Business>) -> &str {
        selected.map(|b| b.name.as_str()).unwrap_or(NO_SELECTION_LABEL)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Entries shown in the open list
    pub fn visible<'a>(&self, businesses: &'a [Business]) -> Vec<&'a Business> {
        if !self.open {
            return Vec::new();
        }
        filter_businesses(businesses, &self.query)
    }

    /// Empty-state text when the open list has nothing to show
    pub fn empty_state(&self, businesses: &[Business]) -> Option<&'static str> {
        if self.open && self.visible(businesses).is_empty() {
            Some(EMPTY_LIST_LABEL)
        } else {
            None
        }
    }

    /// Pick a visible entry by id; closes the list when something was picked
    pub fn choose<'a>(&mut self, businesses: &'a [Business], id: i64) -> Option<&'a Business> {
        let chosen = self.visible(businesses).into_iter().find(|b| b.id == id)?;
        self.close();
        Some(chosen)
    }
}
