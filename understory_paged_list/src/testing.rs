// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles shared by the unit tests.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::{PageSource, RequestId, TipInfo, ViewSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    ShowContent,
    ShowTip(TipInfo),
    ShowProgressBar,
    ShowMessage(String),
    StopRefreshing,
    HeaderRefreshing,
    FooterRefreshing,
    ScrollTo(usize),
    ScrollDownALittle,
    Inserted(usize, usize),
    Removed(usize, usize),
}

/// A view logging every call. Clones share the log, so a test can keep a
/// handle after boxing one into a list.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingView {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingView {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub(crate) fn take_events(&self) -> Vec<Event> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl ViewSink for RecordingView {
    fn show_content(&mut self) {
        self.push(Event::ShowContent);
    }

    fn show_tip(&mut self, tip: &TipInfo) {
        self.push(Event::ShowTip(tip.clone()));
    }

    fn show_progress_bar(&mut self) {
        self.push(Event::ShowProgressBar);
    }

    fn show_message(&mut self, text: &str) {
        self.push(Event::ShowMessage(text.to_string()));
    }

    fn stop_refreshing(&mut self) {
        self.push(Event::StopRefreshing);
    }

    fn set_header_refreshing(&mut self) {
        self.push(Event::HeaderRefreshing);
    }

    fn set_footer_refreshing(&mut self) {
        self.push(Event::FooterRefreshing);
    }

    fn scroll_to_position(&mut self, position: usize) {
        self.push(Event::ScrollTo(position));
    }

    fn scroll_down_a_little(&mut self) {
        self.push(Event::ScrollDownALittle);
    }

    fn notify_item_range_inserted(&mut self, start: usize, count: usize) {
        self.push(Event::Inserted(start, count));
    }

    fn notify_item_range_removed(&mut self, start: usize, count: usize) {
        self.push(Event::Removed(start, count));
    }
}

/// A source that only remembers what it was asked for; tests answer by hand.
#[derive(Debug, Clone)]
pub(crate) struct ManualSource<T> {
    pub(crate) requests: Vec<(RequestId, i32)>,
    pub(crate) restores: Vec<RequestId>,
    pub(crate) backups: Vec<Vec<T>>,
    pub(crate) keeps_backup: bool,
}

impl<T> Default for ManualSource<T> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            restores: Vec::new(),
            backups: Vec::new(),
            keeps_backup: false,
        }
    }
}

impl<T> ManualSource<T> {
    /// Id of the most recent page request.
    pub(crate) fn last_id(&self) -> RequestId {
        self.requests.last().expect("no page was requested").0
    }

    /// Page of the most recent page request.
    pub(crate) fn last_page(&self) -> i32 {
        self.requests.last().expect("no page was requested").1
    }
}

impl<T: Clone> PageSource<T> for ManualSource<T> {
    type Error = &'static str;

    fn require_page(&mut self, id: RequestId, page: i32) {
        self.requests.push((id, page));
    }

    fn require_restore(&mut self, id: RequestId) -> bool {
        if self.keeps_backup {
            self.restores.push(id);
        }
        self.keeps_backup
    }

    fn backup(&mut self, items: &[T]) {
        self.backups.push(items.to_vec());
    }
}
