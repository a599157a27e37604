// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering side of a [`PagedList`](crate::PagedList).

use alloc::string::String;

/// A blocking tip shown in place of the list, such as "Not Found".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TipInfo {
    /// Host-defined icon key, if any.
    pub icon: Option<&'static str>,
    /// Text shown to the user.
    pub text: String,
}

impl TipInfo {
    /// Creates a tip with an icon key.
    #[must_use]
    pub fn new(icon: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon: Some(icon),
            text: text.into(),
        }
    }

    /// Creates a text-only tip.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            icon: None,
            text: text.into(),
        }
    }
}

bitflags::bitflags! {
    /// Pull-to-refresh indicators currently spinning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RefreshFlags: u8 {
        /// Refreshing at the top of the list.
        const HEADER = 1 << 0;
        /// Refreshing at the bottom of the list.
        const FOOTER = 1 << 1;
    }
}

/// A list view driven by a [`PagedList`](crate::PagedList).
///
/// `show_content`, `show_tip` and `show_progress_bar` are mutually exclusive
/// top-level states. The refresh indicators are independent of them.
///
/// Item notifications must be applied in the order they are emitted. Scroll
/// requests are hints; a view may ignore an index it cannot reach.
pub trait ViewSink {
    /// Show the list.
    fn show_content(&mut self);

    /// Replace the list with a blocking tip.
    fn show_tip(&mut self, tip: &TipInfo);

    /// Replace the list with a progress indicator.
    fn show_progress_bar(&mut self);

    /// Show a transient, non-blocking message over the list.
    fn show_message(&mut self, text: &str);

    /// Stop both refresh indicators.
    fn stop_refreshing(&mut self);

    /// Start the top refresh indicator.
    fn set_header_refreshing(&mut self);

    /// Start the bottom refresh indicator.
    fn set_footer_refreshing(&mut self);

    /// Scroll so that `position` is the first visible item.
    fn scroll_to_position(&mut self, position: usize);

    /// Nudge the list after a silent append so the user notices the new items.
    fn scroll_down_a_little(&mut self) {}

    /// `count` items were inserted at `start`.
    fn notify_item_range_inserted(&mut self, start: usize, count: usize);

    /// `count` items were removed from `start`.
    fn notify_item_range_removed(&mut self, start: usize, count: usize);
}
