//! Filter/sort controller over an in-memory record collection.
//!
//! A [`CollectionView`] owns a copy of its source records and a working set derived
//! from the current filter and sort keys. Unknown keys never fail: an unmatched
//! filter yields an empty view and an unknown sort leaves the order untouched.

pub mod collate;
pub mod keys;
mod records;

use serde::Serialize;
use std::cmp::Ordering;

pub use keys::{FilterKey, SortKey};

/// Comparison used to order a working set
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A record type the controller can filter and sort
pub trait Record: Clone {
    fn record_id(&self) -> &str;

    /// Whether the record belongs to the subset selected by `key` (never `"all"`)
    fn matches_filter(&self, key: &str) -> bool;

    /// Ordering for `key`, or `None` when the record type has no such ordering
    fn comparator(key: SortKey) -> Option<Comparator<Self>>;
}

/// Whether the current view has anything to show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Empty,
    Populated { count: usize },
}

impl ViewState {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty)
    }

    pub fn count(&self) -> usize {
        match self {
            ViewState::Empty => 0,
            ViewState::Populated { count } => *count,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CollectionView<T> {
    source: Vec<T>,
    working: Vec<T>,
    filter: FilterKey,
    sort: Option<SortKey>,
}

impl<T: Record> CollectionView<T> {
    pub fn new(source: Vec<T>) -> Self {
        let working = source.clone();
        Self {
            source,
            working,
            filter: FilterKey::All,
            sort: None,
        }
    }

    /// Rebuild the working set from the source in source order.
    ///
    /// The previous sort is dropped; callers re-apply it if they want it kept.
    pub fn set_filter(&mut self, key: &str) -> ViewState {
        self.filter = FilterKey::parse(key);
        self.working = match &self.filter {
            FilterKey::All => self.source.clone(),
            FilterKey::Only(key) => self
                .source
                .iter()
                .filter(|record| record.matches_filter(key))
                .cloned()
                .collect(),
        };
        self.sort = None;
        self.state()
    }

    /// Reorder the working set; unknown keys leave it unchanged
    pub fn set_sort(&mut self, key: &str) -> ViewState {
        match SortKey::parse(key) {
            Some(sort) => self.sort_by(sort),
            None => {
                tracing::debug!(key, "ignoring unknown sort key");
                self.state()
            }
        }
    }

    /// Stable reorder of the working set by `key`
    pub fn sort_by(&mut self, key: SortKey) -> ViewState {
        match T::comparator(key) {
            Some(compare) => {
                self.working.sort_by(compare);
                self.sort = Some(key);
            }
            None => tracing::debug!(key = key.as_str(), "record type has no such ordering"),
        }
        self.state()
    }

    pub fn state(&self) -> ViewState {
        match self.working.len() {
            0 => ViewState::Empty,
            count => ViewState::Populated { count },
        }
    }

    pub fn items(&self) -> &[T] {
        &self.working
    }

    pub fn into_items(self) -> Vec<T> {
        self.working
    }

    pub fn ids(&self) -> Vec<&str> {
        self.working.iter().map(Record::record_id).collect()
    }

    pub fn filter(&self) -> &FilterKey {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }
}
