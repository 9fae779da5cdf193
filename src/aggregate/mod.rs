//! Post aggregation - ordering and range selection for collection listings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::content::ContentItem;

/// Anything that can be placed on a timeline
pub trait Dated {
    fn published(&self) -> DateTime<Utc>;
}

impl Dated for ContentItem {
    fn published(&self) -> DateTime<Utc> {
        ContentItem::published(self)
    }
}

/// A window into a sorted listing.
///
/// `start` is 1-based and inclusive, `end` is 1-based and exclusive, so
/// `start = 2, end = 4` selects the second and third entries. Indices past
/// the end of the listing clamp instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl PostRange {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// The first `n` entries
    pub fn first(n: usize) -> Self {
        Self::new(1, Some(n + 1))
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let begin = self.start.max(1) - 1;
        let stop = self.end.map(|e| e.saturating_sub(1)).unwrap_or(len);
        let begin = begin.min(len);
        let stop = stop.min(len).max(begin);
        (begin, stop)
    }
}

/// Order items newest first. Items with the same date keep their
/// relative order.
pub fn newest_first<T: Dated>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_cached_key(|item| Reverse(item.published()));
    items
}

/// Keep only the entries inside `range`
pub fn slice_range<T>(items: Vec<T>, range: PostRange) -> Vec<T> {
    let (begin, stop) = range.bounds(items.len());
    items.into_iter().skip(begin).take(stop - begin).collect()
}

/// Sort newest first, then apply the optional range
pub fn aggregate<T: Dated>(items: Vec<T>, range: Option<PostRange>) -> Vec<T> {
    let sorted = newest_first(items);
    match range {
        Some(range) => slice_range(sorted, range),
        None => sorted,
    }
}
