// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported for operations that cannot run in the current state.

use thiserror::Error;

/// An operation was rejected because of the list's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PagedListError {
    /// The max bound is reached but no page is loaded to refresh.
    #[error("no page to refresh: begin_page={begin_page}, end_page={end_page}")]
    EmptyWindow {
        /// First loaded page.
        begin_page: i32,
        /// One past the last loaded page.
        end_page: i32,
    },
    /// A restore was requested after loading had already started.
    #[error("restore must be requested before any other loading operation")]
    AlreadyStarted,
}
