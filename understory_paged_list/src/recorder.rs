// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coarse view state remembered across view attach/detach cycles.

use crate::{RefreshFlags, TipInfo, ViewSink};

/// The top-level state last sent to a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Nothing has been shown yet.
    #[default]
    Hidden,
    /// The list is shown.
    Content,
    /// A blocking tip is shown.
    Tip(TipInfo),
    /// The progress indicator is shown.
    ProgressBar,
}

/// A write-through shadow of the visibility and refresh state of a view.
///
/// [`PagedList`](crate::PagedList) sends every visibility and refresh call to
/// the recorder as well as to the attached view. When a new view attaches, the
/// recorder [replays](Self::replay) that state so the view catches up without a
/// new fetch. Item notifications, scroll hints and transient messages are not
/// recorded: a fresh view reads the items directly.
#[derive(Debug, Clone, Default)]
pub struct ViewRecorder {
    visibility: Visibility,
    refreshing: RefreshFlags,
}

impl ViewRecorder {
    /// Creates a recorder with nothing shown and no indicator running.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last top-level state.
    #[must_use]
    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// The refresh indicators currently running.
    #[must_use]
    pub const fn refreshing(&self) -> RefreshFlags {
        self.refreshing
    }

    /// Brings `view` up to date with the recorded state.
    pub fn replay(&self, view: &mut dyn ViewSink) {
        match &self.visibility {
            Visibility::Hidden => {}
            Visibility::Content => view.show_content(),
            Visibility::Tip(tip) => view.show_tip(tip),
            Visibility::ProgressBar => view.show_progress_bar(),
        }
        if self.refreshing.contains(RefreshFlags::HEADER) {
            view.set_header_refreshing();
        }
        if self.refreshing.contains(RefreshFlags::FOOTER) {
            view.set_footer_refreshing();
        }
    }
}

impl ViewSink for ViewRecorder {
    fn show_content(&mut self) {
        self.visibility = Visibility::Content;
    }

    fn show_tip(&mut self, tip: &TipInfo) {
        self.visibility = Visibility::Tip(tip.clone());
    }

    fn show_progress_bar(&mut self) {
        self.visibility = Visibility::ProgressBar;
    }

    fn show_message(&mut self, _text: &str) {}

    fn stop_refreshing(&mut self) {
        self.refreshing = RefreshFlags::empty();
    }

    fn set_header_refreshing(&mut self) {
        self.refreshing.insert(RefreshFlags::HEADER);
    }

    fn set_footer_refreshing(&mut self) {
        self.refreshing.insert(RefreshFlags::FOOTER);
    }

    fn scroll_to_position(&mut self, _position: usize) {}

    fn notify_item_range_inserted(&mut self, _start: usize, _count: usize) {}

    fn notify_item_range_removed(&mut self, _start: usize, _count: usize) {}
}
