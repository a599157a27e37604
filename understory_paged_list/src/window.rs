// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The loaded run of pages: flat items plus a page-boundary index.

use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

/// A contiguous run of loaded pages `[begin_page, end_page)` flattened into one
/// item sequence.
///
/// The divider table holds one cumulative item count per loaded page: entry `i`
/// is the (exclusive) end index of page `begin_page + i`. For example pages 3, 4
/// and 5 holding 7, 8 and 9 items give dividers `[7, 15, 24]`.
///
/// `min_page` is the first page known to exist and `max_page` is one past the
/// last; both come from the most recent response and may move between fetches.
///
/// Mutation is only available to [`PagedList`](crate::PagedList).
#[derive(Debug, Clone)]
pub struct PageWindow<T> {
    items: Vec<T>,
    dividers: SmallVec<[usize; 8]>,
    min_page: i32,
    max_page: i32,
    begin_page: i32,
    end_page: i32,
}

impl<T> Default for PageWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Index ranges touched by an in-place page replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageSplice {
    pub(crate) removed: Range<usize>,
    pub(crate) inserted: Range<usize>,
}

impl<T> PageWindow<T> {
    /// Creates an empty, unbounded window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dividers: SmallVec::new(),
            min_page: 0,
            max_page: 0,
            begin_page: 0,
            end_page: 0,
        }
    }

    /// Number of loaded items across all pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are loaded. Pages may still be loaded if all of them were empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if loaded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All loaded items in page order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates all loaded items in page order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Cumulative item counts, one per loaded page.
    #[must_use]
    pub fn dividers(&self) -> &[usize] {
        &self.dividers
    }

    /// Smallest page known to exist.
    #[must_use]
    pub const fn min_page(&self) -> i32 {
        self.min_page
    }

    /// One past the largest page known to exist.
    #[must_use]
    pub const fn max_page(&self) -> i32 {
        self.max_page
    }

    /// First loaded page (inclusive).
    #[must_use]
    pub const fn begin_page(&self) -> i32 {
        self.begin_page
    }

    /// One past the last loaded page.
    #[must_use]
    pub const fn end_page(&self) -> i32 {
        self.end_page
    }

    /// Number of loaded pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.dividers.len()
    }

    /// Returns `true` if no page before the window is known to exist.
    #[must_use]
    pub const fn is_min_reached(&self) -> bool {
        self.begin_page <= self.min_page
    }

    /// Returns `true` if no page after the window is known to exist.
    #[must_use]
    pub const fn is_max_reached(&self) -> bool {
        self.end_page >= self.max_page
    }

    /// Returns `true` if `page` is loaded.
    #[must_use]
    pub const fn contains_page(&self, page: i32) -> bool {
        page >= self.begin_page && page < self.end_page
    }

    /// Index of the first item of a loaded `page`.
    #[must_use]
    pub fn page_start(&self, page: i32) -> Option<usize> {
        self.page_range(page).map(|r| r.start)
    }

    /// Item index range covered by a loaded `page`.
    #[must_use]
    pub fn page_range(&self, page: i32) -> Option<Range<usize>> {
        if !self.contains_page(page) {
            return None;
        }
        let slot = self.slot(page);
        let start = if slot == 0 { 0 } else { self.dividers[slot - 1] };
        Some(start..self.dividers[slot])
    }

    /// The page holding the item at `index`, if loaded.
    #[must_use]
    pub fn page_for_position(&self, index: usize) -> Option<i32> {
        let slot = self.dividers.partition_point(|&end| end <= index);
        if slot >= self.dividers.len() {
            return None;
        }
        i32::try_from(slot).ok().map(|s| self.begin_page + s)
    }

    fn slot(&self, page: i32) -> usize {
        debug_assert!(
            self.contains_page(page),
            "page {page} outside window [{}, {})",
            self.begin_page,
            self.end_page
        );
        (page - self.begin_page) as usize
    }

    fn set_bounds(&mut self, min_page: i32, max_page: i32) {
        self.min_page = min_page;
        self.max_page = max_page;
    }

    /// Clears everything, bounds included. Returns the number of removed items.
    pub(crate) fn reset(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        self.dividers.clear();
        self.min_page = 0;
        self.max_page = 0;
        self.begin_page = 0;
        self.end_page = 0;
        removed
    }

    /// Discards the window and installs `items` as the only page.
    ///
    /// Returns the number of removed items; the new items occupy `0..len()`.
    pub(crate) fn replace_all(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> usize {
        let removed = self.items.len();
        self.items = items;
        self.dividers.clear();
        self.dividers.push(self.items.len());
        self.begin_page = page;
        self.end_page = page + 1;
        self.set_bounds(min_page, max_page);
        self.check_invariants();
        removed
    }

    /// Loads `page` in front of the window. Returns the number of inserted items, all at index 0.
    ///
    /// # Panics
    ///
    /// If `page` is not `begin_page - 1`.
    pub(crate) fn prepend(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> usize {
        assert!(
            self.begin_page.checked_sub(1) == Some(page),
            "prepend requires the page before the window: begin_page={}, page={page}",
            self.begin_page
        );
        let count = items.len();
        if count != 0 {
            self.items.splice(0..0, items);
            for divider in &mut self.dividers {
                *divider += count;
            }
        }
        self.dividers.insert(0, count);
        self.begin_page -= 1;
        self.set_bounds(min_page, max_page);
        self.check_invariants();
        count
    }

    /// Loads `page` after the window. Returns the inserted index range.
    ///
    /// # Panics
    ///
    /// If `page` is not `end_page`.
    pub(crate) fn append(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> Range<usize> {
        assert!(
            page == self.end_page,
            "append requires the window's end page: end_page={}, page={page}",
            self.end_page
        );
        let start = self.items.len();
        self.items.extend(items);
        self.dividers.push(self.items.len());
        self.end_page += 1;
        self.set_bounds(min_page, max_page);
        self.check_invariants();
        start..self.items.len()
    }

    /// Replaces the items of a loaded `page` and shifts every later boundary.
    ///
    /// # Panics
    ///
    /// If `page` is outside `[begin_page, end_page)`.
    pub(crate) fn replace_page(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> PageSplice {
        let Some(old) = self.page_range(page) else {
            panic!(
                "in-place refresh requires a loaded page: begin_page={}, end_page={}, page={page}",
                self.begin_page, self.end_page
            );
        };
        let start = old.start;
        let new_end = start + items.len();
        self.items.splice(old.clone(), items);
        if new_end != old.end {
            let slot = self.slot(page);
            for divider in &mut self.dividers[slot..] {
                *divider = *divider - old.end + new_end;
            }
        }
        self.set_bounds(min_page, max_page);
        self.check_invariants();
        PageSplice {
            removed: old,
            inserted: start..new_end,
        }
    }

    /// Drops every incoming item equal to a loaded item within `around`.
    ///
    /// `around` is clamped to the loaded items. Duplicates inside `incoming`
    /// itself are kept.
    pub(crate) fn without_duplicates(
        &self,
        incoming: Vec<T>,
        around: Range<usize>,
        is_duplicate: fn(&T, &T) -> bool,
    ) -> Vec<T> {
        let end = around.end.min(self.items.len());
        let start = around.start.min(end);
        let neighbours = &self.items[start..end];
        if neighbours.is_empty() {
            return incoming;
        }
        incoming
            .into_iter()
            .filter(|item| !neighbours.iter().any(|old| is_duplicate(item, old)))
            .collect()
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.begin_page <= self.end_page,
            "begin_page {} after end_page {}",
            self.begin_page,
            self.end_page
        );
        debug_assert_eq!(
            self.dividers.len(),
            (self.end_page - self.begin_page) as usize,
            "one divider per loaded page"
        );
        debug_assert!(
            self.dividers.windows(2).all(|w| w[0] <= w[1]),
            "dividers must be nondecreasing: {:?}",
            self.dividers
        );
        debug_assert_eq!(
            self.dividers.last().copied().unwrap_or(0),
            self.items.len(),
            "last divider must equal the item count"
        );
    }
}

impl<'a, T> IntoIterator for &'a PageWindow<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
