// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paged_list --heading-base-level=0

//! Understory Paged List: a windowed pagination controller.
//!
//! This crate manages a virtually unbounded, page-sourced list of items (search
//! results, download queues, favorites) on behalf of a list view. It keeps a
//! bounded, contiguous window of loaded pages consistent while the user scrolls
//! forwards and backwards, jumps to a page, or refreshes in place, and it
//! tolerates stale and out-of-order answers from asynchronous fetches.
//!
//! The core concepts are:
//!
//! - [`PagedList`]: the controller. It exposes paging operations
//!   ([`go_to`](PagedList::go_to), [`switch_to`](PagedList::switch_to),
//!   [`prev_page`](PagedList::prev_page), [`next_page`](PagedList::next_page),
//!   [`refresh_page`](PagedList::refresh_page)) and pull-to-refresh/retry
//!   gestures, issues requests to a [`PageSource`], and applies the answers.
//! - [`PageWindow`]: the loaded pages `[begin_page, end_page)` flattened into
//!   one item sequence, with a divider table mapping pages to item ranges and
//!   the dataset bounds `[min_page, max_page)` as last reported.
//! - [`RequestCorrelator`]: a generation counter. Only the latest
//!   [`RequestId`] is accepted; superseded answers are dropped silently.
//! - [`ViewSink`] and [`ViewRecorder`]: the attached view receives ordered item
//!   notifications and visibility changes, while the recorder keeps the coarse
//!   visibility and refresh state so a view attached later can be brought up
//!   to date without a fetch.
//! - [`TipMapper`]: turns empty results ([`TipReason::NotFound`],
//!   [`TipReason::TapToLoad`]) and fetch failures into displayable [`TipInfo`].
//!
//! This crate deliberately does **not** fetch anything, render anything, or own
//! threads. Host frameworks are responsible for:
//!
//! - Implementing [`PageSource`] and delivering each answer back through
//!   [`PagedList::on_data_arrived`] or [`PagedList::on_error_arrived`] on the
//!   same sequence that drives the list.
//! - Implementing [`ViewSink`] and applying item notifications in order.
//! - Retrying, backing off, and timing out fetches.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_paged_list::{PageSource, PagedList, RequestId};
//!
//! #[derive(Default)]
//! struct Pending(Option<(RequestId, i32)>);
//!
//! impl PageSource<String> for Pending {
//!     type Error = &'static str;
//!     fn require_page(&mut self, id: RequestId, page: i32) {
//!         self.0 = Some((id, page));
//!     }
//! }
//!
//! let mut list: PagedList<String, _> = PagedList::new(Pending::default());
//! list.go_to(0);
//!
//! // The host later answers on its event loop.
//! let (id, _) = list.source_mut().0.take().unwrap();
//! list.on_data_arrived(id, vec!["a".into(), "b".into()], 0, 3);
//!
//! // Append page 1.
//! list.next_page();
//! let (id, page) = list.source_mut().0.take().unwrap();
//! assert_eq!(page, 1);
//! list.on_data_arrived(id, vec!["c".into()], 0, 3);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.window().dividers(), &[2, 3]);
//! assert_eq!(list.page_for_position(2), Some(1));
//!
//! // A failure with items loaded keeps them.
//! list.next_page();
//! let (id, _) = list.source_mut().0.take().unwrap();
//! list.on_error_arrived(id, "offline");
//! assert_eq!(list.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. It logs through [`tracing`].

#![no_std]

extern crate alloc;

mod error;
mod paged_list;
mod recorder;
mod request;
mod source;
mod tip;
mod view;
mod window;

#[cfg(test)]
mod testing;

pub use error::PagedListError;
pub use paged_list::PagedList;
pub use recorder::{ViewRecorder, Visibility};
pub use request::{PendingRequest, RequestCorrelator, RequestId, RequestKind};
pub use source::PageSource;
pub use tip::{DisplayTips, TipMapper, TipReason};
pub use view::{RefreshFlags, TipInfo, ViewSink};
pub use window::PageWindow;
