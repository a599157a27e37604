// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller that keeps a window of asynchronously fetched pages in sync with a view.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Display;

use crate::{
    DisplayTips, PageSource, PageWindow, PagedListError, PendingRequest, RefreshFlags, RequestCorrelator,
    RequestId, RequestKind, TipMapper, TipReason, ViewRecorder, ViewSink,
};

/// Default number of items on each side of an insertion point checked for duplicates.
const DEFAULT_DUPLICATES_CHECK_RANGE: usize = 50;

/// Controller for a paged list over a virtually unbounded dataset.
///
/// This type:
/// - owns a [`PageWindow`] of loaded pages and the bounds of the dataset,
/// - turns paging gestures into page requests on a [`PageSource`],
/// - accepts only the answer to the latest request and drops everything else,
/// - emits ordered item notifications and visibility changes to the attached [`ViewSink`],
/// - remembers the coarse view state in a [`ViewRecorder`] so a view attached later catches up.
///
/// A list lives for a whole browsing session and outlives the views attached to
/// it. It is not synchronized: paging calls and source answers must all be made
/// from one sequence (an event loop turn, a task queue). Sources may fetch
/// elsewhere but must hop back onto that sequence before answering.
///
/// At most one request is outstanding. A new paging call supersedes the previous
/// request without cancelling it; its answer simply stops matching.
///
/// ## Example
///
/// ```rust
/// use understory_paged_list::{PageSource, PagedList, RequestId};
///
/// #[derive(Default)]
/// struct Queue(Vec<(RequestId, i32)>);
///
/// impl PageSource<u32> for Queue {
///     type Error = &'static str;
///     fn require_page(&mut self, id: RequestId, page: i32) {
///         self.0.push((id, page));
///     }
/// }
///
/// let mut list: PagedList<u32, _> = PagedList::new(Queue::default());
/// list.go_to(2);
///
/// // Later, once the fetch for page 2 completes:
/// let (id, page) = list.source_mut().0.pop().unwrap();
/// assert_eq!(page, 2);
/// assert!(list.on_data_arrived(id, vec![20, 21, 22], 0, 5));
///
/// assert_eq!(list.items(), &[20, 21, 22]);
/// assert_eq!(list.window().begin_page(), 2);
/// assert_eq!(list.window().dividers(), &[3]);
///
/// // Answering the same id twice is a no-op.
/// assert!(!list.on_data_arrived(id, vec![99], 0, 5));
/// ```
pub struct PagedList<T, S, M = DisplayTips> {
    window: PageWindow<T>,
    requests: RequestCorrelator,
    source: S,
    mapper: M,
    view: Option<Box<dyn ViewSink>>,
    recorder: ViewRecorder,
    first_page: i32,
    is_duplicate: Option<fn(&T, &T) -> bool>,
    duplicates_check_range: usize,
}

impl<T: fmt::Debug, S: fmt::Debug, M: fmt::Debug> fmt::Debug for PagedList<T, S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedList")
            .field("window", &self.window)
            .field("requests", &self.requests)
            .field("source", &self.source)
            .field("mapper", &self.mapper)
            .field("has_view", &self.view.is_some())
            .field("recorder", &self.recorder)
            .field("first_page", &self.first_page)
            .field("remove_duplicates", &self.is_duplicate.is_some())
            .field("duplicates_check_range", &self.duplicates_check_range)
            .finish_non_exhaustive()
    }
}

impl<T, S> PagedList<T, S>
where
    S: PageSource<T>,
    S::Error: Display,
{
    /// Creates an empty list over `source`, describing failures with [`DisplayTips`].
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_mapper(source, DisplayTips)
    }
}

impl<T, S, M> PagedList<T, S, M>
where
    S: PageSource<T>,
    M: TipMapper<S::Error>,
{
    /// Creates an empty list over `source`, describing tips and failures with `mapper`.
    #[must_use]
    pub fn with_mapper(source: S, mapper: M) -> Self {
        Self {
            window: PageWindow::new(),
            requests: RequestCorrelator::new(),
            source,
            mapper,
            view: None,
            recorder: ViewRecorder::new(),
            first_page: 0,
            is_duplicate: None,
            duplicates_check_range: DEFAULT_DUPLICATES_CHECK_RANGE,
        }
    }

    // --- configuration ---

    /// Page loaded after a restore and backed up when it arrives. Defaults to `0`.
    #[must_use]
    pub const fn first_page(&self) -> i32 {
        self.first_page
    }

    /// Sets the page loaded after a restore and backed up when it arrives.
    pub fn set_first_page(&mut self, page: i32) {
        self.first_page = page;
    }

    /// Drops incoming items equal to already loaded neighbours when pages are
    /// prepended, appended or refreshed. Duplicates within one page are kept.
    pub fn set_remove_duplicates(&mut self, remove: bool)
    where
        T: PartialEq,
    {
        let eq: fn(&T, &T) -> bool = <T as PartialEq>::eq;
        self.is_duplicate = remove.then_some(eq);
    }

    /// Like [`set_remove_duplicates`](Self::set_remove_duplicates) with a custom equality.
    pub fn set_duplicate_predicate(&mut self, is_duplicate: Option<fn(&T, &T) -> bool>) {
        self.is_duplicate = is_duplicate;
    }

    /// Number of loaded items on each side of the insertion point compared
    /// against incoming items. Defaults to `50`.
    pub fn set_duplicates_check_range(&mut self, range: usize) {
        self.duplicates_check_range = range;
    }

    // --- queries ---

    /// The loaded pages and dataset bounds.
    #[must_use]
    pub fn window(&self) -> &PageWindow<T> {
        &self.window
    }

    /// Number of loaded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if no item is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The item at `index`, if loaded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.window.get(index)
    }

    /// All loaded items, in page order. A freshly attached view populates itself from here.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.window.items()
    }

    /// Iterates the loaded items.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.window.iter()
    }

    /// The page holding the item at `index`, if loaded.
    #[must_use]
    pub fn page_for_position(&self, index: usize) -> Option<i32> {
        self.window.page_for_position(index)
    }

    /// Returns `true` while a request is waiting for its answer.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.requests.is_pending()
    }

    /// The outstanding request, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingRequest> {
        self.requests.pending()
    }

    /// The page source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The page source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The tip mapper.
    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// The remembered view state.
    #[must_use]
    pub fn recorder(&self) -> &ViewRecorder {
        &self.recorder
    }

    // --- view slot ---

    /// Attaches `view`, replaying the remembered visibility and refresh state onto it.
    ///
    /// Item notifications are not replayed; the view should read [`items`](Self::items).
    /// Returns the previously attached view.
    pub fn attach_view(&mut self, mut view: Box<dyn ViewSink>) -> Option<Box<dyn ViewSink>> {
        self.recorder.replay(view.as_mut());
        self.view.replace(view)
    }

    /// Detaches and returns the current view. Emissions keep reaching the recorder.
    pub fn detach_view(&mut self) -> Option<Box<dyn ViewSink>> {
        self.view.take()
    }

    /// Returns `true` if a view is attached.
    #[must_use]
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    // --- paging operations ---

    /// Discards every loaded page and loads `page`.
    ///
    /// `i32::MAX` has no page after it and is ignored.
    pub fn go_to(&mut self, page: i32) {
        if page.checked_add(1).is_none() {
            tracing::debug!(page, "ignoring page with no successor");
            return;
        }
        self.show_loading(RefreshFlags::HEADER);
        self.require(page, RequestKind::GoTo);
    }

    /// Shows `page`, fetching only when it is not loaded.
    ///
    /// A loaded page is scrolled to. The pages adjacent to the window are
    /// prepended or appended; anything further away is a [`go_to`](Self::go_to).
    pub fn switch_to(&mut self, page: i32) {
        if let Some(start) = self.window.page_start(page) {
            self.scroll_to(start);
        } else if page == self.window.end_page() {
            self.next_page();
        } else if Some(page) == self.window.begin_page().checked_sub(1) {
            self.prev_page();
        } else {
            self.go_to(page);
        }
    }

    /// Loads the page before the window. Only meaningful while the min bound is not reached.
    pub fn prev_page(&mut self) {
        self.request_prev(false);
    }

    /// Loads the page after the window. Only meaningful while the max bound is not reached.
    pub fn next_page(&mut self) {
        self.request_next(false);
    }

    /// Reloads a loaded `page` in place. Returns `false`, without fetching, if
    /// `page` is not loaded.
    pub fn refresh_page(&mut self, page: i32) -> bool {
        if !self.window.contains_page(page) {
            tracing::debug!(
                page,
                begin_page = self.window.begin_page(),
                end_page = self.window.end_page(),
                "ignoring refresh of a page outside the window"
            );
            return false;
        }
        self.emit(|v| v.set_footer_refreshing());
        self.require(page, RequestKind::RefreshPage);
        true
    }

    /// Pull-to-refresh at the top: prepends the previous page, or reloads from
    /// the first page when there is nothing before the window.
    pub fn on_refresh_header(&mut self) {
        if self.window.is_min_reached() {
            self.go_to(self.window.min_page());
        } else {
            self.request_prev(false);
        }
    }

    /// Pull-to-refresh at the bottom: appends the next page, or refreshes the
    /// last loaded page when there is nothing after the window.
    ///
    /// # Errors
    ///
    /// [`PagedListError::EmptyWindow`] if there is nothing after the window and
    /// no page is loaded. The footer indicator is stopped.
    pub fn on_refresh_footer(&mut self) -> Result<(), PagedListError> {
        if !self.window.is_max_reached() {
            self.request_next(false);
            return Ok(());
        }
        let (begin_page, end_page) = (self.window.begin_page(), self.window.end_page());
        if end_page > begin_page {
            let refreshed = self.refresh_page(end_page - 1);
            debug_assert!(refreshed, "the last loaded page must be refreshable");
            Ok(())
        } else {
            tracing::error!(begin_page, end_page, "footer refresh with no page loaded");
            self.emit(|v| v.stop_refreshing());
            Err(PagedListError::EmptyWindow {
                begin_page,
                end_page,
            })
        }
    }

    /// Scrolling hit the end of the loaded items: appends the next page if one exists.
    pub fn on_reach_bottom(&mut self) {
        if !self.window.is_max_reached() {
            self.request_next(false);
        }
    }

    /// The tip was tapped: retries by appending, then by prepending, and finally
    /// by reloading from the min page, picking the first direction whose bound
    /// is still open. The list is scrolled to the new page once it arrives.
    pub fn on_click_tip(&mut self) {
        self.emit(|v| v.show_progress_bar());
        if !self.window.is_max_reached() {
            self.request_next(true);
        } else if !self.window.is_min_reached() {
            self.request_prev(true);
        } else {
            self.go_to(self.window.min_page());
        }
    }

    /// Loads the items last backed up by the source, then reloads the first page.
    ///
    /// Falls back to [`go_to`](Self::go_to) the first page if the source keeps
    /// no backup.
    ///
    /// # Errors
    ///
    /// [`PagedListError::AlreadyStarted`] if any request was issued before.
    pub fn restore(&mut self) -> Result<(), PagedListError> {
        if self.requests.has_issued() {
            tracing::error!("restore requested after loading started");
            return Err(PagedListError::AlreadyStarted);
        }
        self.emit(|v| {
            v.stop_refreshing();
            v.show_progress_bar();
        });
        self.require(0, RequestKind::Restore);
        Ok(())
    }

    /// Drops any pending request and every loaded item, then shows a tip for `error`.
    pub fn force_error(&mut self, error: S::Error) {
        self.requests.cancel();
        self.emit(|v| v.stop_refreshing());
        self.clear_window();
        self.show_error_tip(&error);
    }

    /// Drops any pending request and every loaded item, then shows the progress bar.
    pub fn force_progress(&mut self) {
        self.requests.cancel();
        self.emit(|v| v.stop_refreshing());
        self.clear_window();
        self.emit(|v| v.show_progress_bar());
    }

    // --- source callbacks ---

    /// Delivers the items of a page.
    ///
    /// `min_page` and `max_page` are the dataset bounds as now known, `max_page`
    /// being one past the last page. Returns `false`, changing nothing, unless
    /// `id` is the outstanding request.
    ///
    /// # Panics
    ///
    /// If the window moved away from the requested page while the request was
    /// pending, which only a bug in this type can cause.
    pub fn on_data_arrived(
        &mut self,
        id: RequestId,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> bool {
        let Some(request) = self.requests.accept(id) else {
            tracing::trace!(id = id.get(), "dropping stale page data");
            return false;
        };
        tracing::trace!(
            id = id.get(),
            page = request.page,
            kind = ?request.kind,
            count = items.len(),
            "page data arrived"
        );
        self.emit(|v| v.stop_refreshing());

        match request.kind {
            RequestKind::Restore => self.apply_restore(items),
            RequestKind::GoTo => self.apply_go_to(request.page, items, min_page, max_page),
            RequestKind::PrevPage { adjust_position } => {
                self.apply_prev(request.page, items, min_page, max_page, adjust_position);
            }
            RequestKind::NextPage { adjust_position } => {
                self.apply_next(request.page, items, min_page, max_page, adjust_position);
            }
            RequestKind::RefreshPage => {
                self.apply_refresh(request.page, items, min_page, max_page);
            }
        }
        true
    }

    /// Delivers a failed fetch.
    ///
    /// With no item loaded the window is reset and a tip for `error` is shown.
    /// Otherwise the loaded items stay and `error` is shown as a transient
    /// message. Returns `false`, changing nothing, unless `id` is the
    /// outstanding request.
    pub fn on_error_arrived(&mut self, id: RequestId, error: S::Error) -> bool {
        let Some(request) = self.requests.accept(id) else {
            tracing::trace!(id = id.get(), "dropping stale page error");
            return false;
        };
        tracing::debug!(id = id.get(), page = request.page, kind = ?request.kind, "page request failed");
        self.emit(|v| v.stop_refreshing());

        if request.kind == RequestKind::Restore {
            self.clear_window();
            self.emit(|v| {
                v.show_progress_bar();
                v.set_header_refreshing();
            });
            self.require(self.first_page, RequestKind::GoTo);
        } else if self.window.is_empty() {
            self.clear_window();
            self.show_error_tip(&error);
        } else {
            let text = self.mapper.message_for(&error);
            self.notify(|v| v.show_message(&text));
        }
        true
    }

    // --- internals ---

    fn request_prev(&mut self, adjust_position: bool) {
        let Some(page) = self.window.begin_page().checked_sub(1) else {
            tracing::debug!("ignoring previous page before i32::MIN");
            return;
        };
        self.show_loading(RefreshFlags::HEADER);
        self.require(page, RequestKind::PrevPage { adjust_position });
    }

    fn request_next(&mut self, adjust_position: bool) {
        let page = self.window.end_page();
        if page.checked_add(1).is_none() {
            tracing::debug!(page, "ignoring next page with no successor");
            return;
        }
        self.show_loading(RefreshFlags::FOOTER);
        self.require(page, RequestKind::NextPage { adjust_position });
    }

    fn require(&mut self, page: i32, kind: RequestKind) {
        if kind != RequestKind::Restore && page.checked_add(1).is_none() {
            tracing::debug!(page, ?kind, "not requesting page with no successor");
            return;
        }
        let id = self.requests.issue(page, kind);
        tracing::trace!(id = id.get(), page, ?kind, "requesting page");
        if kind != RequestKind::Restore {
            self.source.require_page(id, page);
        } else if !self.source.require_restore(id) {
            tracing::debug!("page source keeps no backup; loading the first page");
            self.requests.cancel();
            self.go_to(self.first_page);
        }
    }

    /// Progress bar for an empty list, otherwise the list plus a refresh indicator.
    fn show_loading(&mut self, indicator: RefreshFlags) {
        if self.window.is_empty() {
            self.emit(|v| {
                v.stop_refreshing();
                v.show_progress_bar();
            });
        } else {
            self.emit(|v| {
                v.show_content();
                if indicator.contains(RefreshFlags::FOOTER) {
                    v.set_footer_refreshing();
                } else {
                    v.set_header_refreshing();
                }
            });
        }
    }

    /// Shows the list, or the matching tip when nothing is loaded. Returns `true` if the list is shown.
    fn show_result(&mut self) -> bool {
        if !self.window.is_empty() {
            self.emit(|v| v.show_content());
            return true;
        }
        let reason: TipReason<'_, S::Error> =
            if self.window.is_min_reached() && self.window.is_max_reached() {
                TipReason::NotFound
            } else {
                TipReason::TapToLoad
            };
        let tip = <M as TipMapper<S::Error>>::tip_for(&self.mapper, &reason);
        self.emit(|v| v.show_tip(&tip));
        false
    }

    fn show_error_tip(&mut self, error: &S::Error) {
        let tip = <M as TipMapper<S::Error>>::tip_for(&self.mapper, &TipReason::Error(error));
        self.emit(|v| v.show_tip(&tip));
    }

    fn clear_window(&mut self) {
        let removed = self.window.reset();
        self.notify_removed(0, removed);
    }

    fn apply_restore(&mut self, items: Vec<T>) {
        // A backup is always treated as the only page of a one-page dataset.
        let removed = self.window.replace_all(0, items, 0, 1);
        self.notify_removed(0, removed);
        self.notify_inserted(0, self.window.len());
        if self.window.is_empty() {
            self.emit(|v| v.show_progress_bar());
        } else {
            self.emit(|v| v.show_content());
            self.scroll_to(0);
        }
        self.emit(|v| v.set_header_refreshing());
        self.require(self.first_page, RequestKind::GoTo);
    }

    fn apply_go_to(&mut self, page: i32, items: Vec<T>, min_page: i32, max_page: i32) {
        let removed = self.window.replace_all(page, items, min_page, max_page);
        self.notify_removed(0, removed);
        self.notify_inserted(0, self.window.len());
        if page == self.first_page && !self.window.is_empty() {
            self.source.backup(self.window.items());
        }
        if self.show_result() {
            self.scroll_to(0);
        }
    }

    fn apply_prev(
        &mut self,
        page: i32,
        mut items: Vec<T>,
        min_page: i32,
        max_page: i32,
        adjust_position: bool,
    ) {
        if let Some(is_duplicate) = self.is_duplicate {
            items = self
                .window
                .without_duplicates(items, 0..self.duplicates_check_range, is_duplicate);
        }
        let count = self.window.prepend(page, items, min_page, max_page);
        self.notify_inserted(0, count);
        if self.show_result() && adjust_position {
            self.scroll_to(0);
        }
    }

    fn apply_next(
        &mut self,
        page: i32,
        mut items: Vec<T>,
        min_page: i32,
        max_page: i32,
        adjust_position: bool,
    ) {
        if let Some(is_duplicate) = self.is_duplicate {
            let len = self.window.len();
            let range = self.duplicates_check_range;
            items = self.window.without_duplicates(
                items,
                len.saturating_sub(range)..len.saturating_add(range),
                is_duplicate,
            );
        }
        let inserted = self.window.append(page, items, min_page, max_page);
        self.notify_inserted(inserted.start, inserted.len());
        if self.show_result() {
            if adjust_position {
                // Keep the previously last item in view rather than jumping to the end.
                self.scroll_to(inserted.start.min(self.window.len() - 1));
            } else {
                self.notify(|v| v.scroll_down_a_little());
            }
        }
    }

    fn apply_refresh(&mut self, page: i32, mut items: Vec<T>, min_page: i32, max_page: i32) {
        if let (Some(is_duplicate), Some(old)) = (self.is_duplicate, self.window.page_range(page)) {
            let range = self.duplicates_check_range;
            items = self.window.without_duplicates(
                items,
                old.start.saturating_sub(range)..old.start,
                is_duplicate,
            );
            items = self.window.without_duplicates(
                items,
                old.end..old.end.saturating_add(range),
                is_duplicate,
            );
        }
        let splice = self.window.replace_page(page, items, min_page, max_page);
        self.notify_removed(splice.removed.start, splice.removed.len());
        self.notify_inserted(splice.inserted.start, splice.inserted.len());
        self.show_result();
    }

    /// Sends a visibility or refresh call to the recorder and the attached view.
    fn emit(&mut self, f: impl Fn(&mut dyn ViewSink)) {
        let recorder: &mut dyn ViewSink = &mut self.recorder;
        f(recorder);
        if let Some(view) = self.view.as_deref_mut() {
            f(view);
        }
    }

    /// Sends a call to the attached view only.
    fn notify(&mut self, f: impl FnOnce(&mut dyn ViewSink)) {
        if let Some(view) = self.view.as_deref_mut() {
            f(view);
        }
    }

    fn scroll_to(&mut self, position: usize) {
        self.notify(|v| v.scroll_to_position(position));
    }

    fn notify_inserted(&mut self, start: usize, count: usize) {
        if count != 0 {
            self.notify(|v| v.notify_item_range_inserted(start, count));
        }
    }

    fn notify_removed(&mut self, start: usize, count: usize) {
        if count != 0 {
            self.notify(|v| v.notify_item_range_removed(start, count));
        }
    }
}

impl<'a, T, S, M> IntoIterator for &'a PagedList<T, S, M> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.window.iter()
    }
}
