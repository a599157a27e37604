// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fetching side of a [`PagedList`](crate::PagedList).

use crate::RequestId;

/// Supplies pages to a [`PagedList`](crate::PagedList).
///
/// Requests are fire-and-forget. For every `id` it receives, a source must
/// eventually deliver exactly one of
/// [`on_data_arrived`](crate::PagedList::on_data_arrived) or
/// [`on_error_arrived`](crate::PagedList::on_error_arrived) with that same id,
/// on the sequence that drives the list. A source that already has the data
/// must still defer the answer (post it to the host's queue) rather than call
/// back from inside `require_page`.
///
/// Superseded requests are not cancelled; their answers are silently dropped.
pub trait PageSource<T> {
    /// Failure reported through [`on_error_arrived`](crate::PagedList::on_error_arrived).
    type Error;

    /// Starts fetching `page`.
    fn require_page(&mut self, id: RequestId, page: i32);

    /// Starts loading the items last passed to [`backup`](Self::backup).
    ///
    /// Returns `false` if this source keeps no backup, in which case no answer is expected.
    fn require_restore(&mut self, id: RequestId) -> bool {
        let _ = id;
        false
    }

    /// Stores a freshly loaded first page so a later session can restore it.
    fn backup(&mut self, items: &[T]) {
        let _ = items;
    }
}
