//! Pagination utilities for Lunch Money API responses.

use serde::{Deserialize, Serialize};

/// A page of results from the Lunch Money API.
///
/// Listing endpoints are offset based: a page starts at `offset` and holds
/// at most `limit` items.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Number of items skipped before this page.
    pub offset: u32,
    /// Maximum number of items requested for this page.
    pub limit: u32,
    /// Whether there are more items after this page.
    pub has_more: bool,
    /// Number of server items this page covers, kept across [`Page::filter`].
    #[serde(skip)]
    scanned: u32,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    ///
    /// When the server does not report `has_more`, a full page is taken to
    /// mean more items may follow.
    #[must_use]
    pub fn new(items: Vec<T>, offset: u32, limit: u32, has_more: Option<bool>) -> Self {
        let has_more = has_more.unwrap_or(items.len() >= limit as usize && limit > 0);
        let scanned = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            items,
            offset,
            limit,
            has_more,
            scanned,
        }
    }

    /// A page holding a complete, unpaginated collection.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        let limit = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            items,
            offset: 0,
            limit,
            has_more: false,
            scanned: limit,
        }
    }

    /// Offset of the page following this one.
    ///
    /// Counts every item the server returned for this page, including
    /// items dropped afterwards by [`Page::filter`].
    #[must_use]
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.scanned)
    }

    /// Keep only the items matching `predicate`.
    ///
    /// The page still covers the same window of the listing, so `offset`,
    /// `has_more` and [`Page::next_offset`] are unchanged.
    #[must_use]
    pub fn filter<P: FnMut(&T) -> bool>(mut self, predicate: P) -> Self {
        self.items.retain(predicate);
        self
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            has_more: self.has_more,
            scanned: self.scanned,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of items to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific window.
    #[must_use]
    pub fn window(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }
}
