//! Page boundaries over an ordered listing.
//!
//! Swift paginates listings with a `marker` (list entries strictly after this
//! name) and a `limit`. A [`PaginationMap`] snapshots an ordered key sequence
//! and records, for every page, the marker that starts it. Listing with
//! `(prefix, marker(i), page_size)` then returns exactly page `i`, so
//! page-index and marker-based listing always agree on boundaries. Page 0
//! has no marker at all, so an empty name is an ordinary key.
//!
//! The map is a snapshot: entries created or deleted after it was built are
//! not reflected in its page count.

use serde::{Deserialize, Serialize};

/// Snapshot of page markers for a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMap {
    prefix: Option<String>,
    page_size: usize,
    number_of_records: usize,
    /// `markers[i]` is the last key of page `i - 1`; `None` for page 0.
    markers: Vec<Option<String>>,
}

impl PaginationMap {
    /// Build a map over `keys`, which must already be in listing order.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn from_keys<I, S>(keys: I, prefix: Option<&str>, page_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let page_size = page_size.max(1);
        let mut markers = Vec::new();
        let mut previous: Option<String> = None;
        let mut number_of_records = 0;

        for key in keys {
            if number_of_records % page_size == 0 {
                markers.push(previous.take());
            }
            previous = Some(key.as_ref().to_string());
            number_of_records += 1;
        }

        Self {
            prefix: prefix.map(str::to_string),
            page_size,
            number_of_records,
            markers,
        }
    }

    /// Entries per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total entries in the listing when the map was built.
    pub fn number_of_records(&self) -> usize {
        self.number_of_records
    }

    /// `ceil(number_of_records / page_size)`.
    pub fn number_of_pages(&self) -> usize {
        self.markers.len()
    }

    /// Name prefix the listing was filtered on.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Marker that starts `page`, or `None` if the page is out of range.
    ///
    /// Page 0 yields `Some(None)`: it starts at the beginning of the listing.
    pub fn marker(&self, page: usize) -> Option<Option<&str>> {
        self.markers.get(page).map(Option::as_deref)
    }
}
