// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request/response correlation.
//!
//! Every paging action issues a fresh [`RequestId`]. Only the most recently
//! issued id is live; a response carrying any other id is stale and must be
//! dropped by the caller. Superseded fetches are never cancelled, their
//! answers simply stop matching.

use core::num::NonZeroU64;

/// Identifier handed to a [`PageSource`](crate::PageSource) for one fetch.
///
/// Ids are generations of a monotonically increasing counter. Zero is reserved
/// as "no request" and is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(NonZeroU64);

impl RequestId {
    /// Rebuilds an id from its raw generation, or `None` for the reserved zero.
    ///
    /// Useful for sources that ship ids across a channel or an FFI boundary.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(generation) => Some(Self(generation)),
            None => None,
        }
    }

    /// Returns the raw generation of this id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// What a pending request will do to the window once answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Load a previously backed-up first page.
    Restore,
    /// Discard the window and load a single page.
    GoTo,
    /// Prepend the page before the window.
    PrevPage {
        /// Scroll to the first inserted item once applied.
        adjust_position: bool,
    },
    /// Append the page after the window.
    NextPage {
        /// Scroll to the first inserted item once applied.
        adjust_position: bool,
    },
    /// Replace one page of the window in place.
    RefreshPage,
}

/// The single outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    /// Id the response must carry.
    pub id: RequestId,
    /// Requested page.
    pub page: i32,
    /// How the response is applied.
    pub kind: RequestKind,
}

/// Generation counter plus the one live request.
#[derive(Debug, Clone, Default)]
pub struct RequestCorrelator {
    last: u64,
    pending: Option<PendingRequest>,
}

impl RequestCorrelator {
    /// Creates a correlator that has never issued a request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: 0,
            pending: None,
        }
    }

    /// Issues a new id for `page`, superseding whatever was pending.
    pub fn issue(&mut self, page: i32, kind: RequestKind) -> RequestId {
        // Skip the reserved zero when the counter wraps.
        let generation = NonZeroU64::new(self.last.wrapping_add(1)).unwrap_or(NonZeroU64::MIN);
        self.last = generation.get();
        let id = RequestId(generation);
        if let Some(old) = self.pending.replace(PendingRequest { id, page, kind }) {
            tracing::trace!(
                superseded = old.id.get(),
                by = id.get(),
                "pending page request superseded"
            );
        }
        id
    }

    /// Returns `true` if `id` is the live request.
    #[must_use]
    pub fn matches(&self, id: RequestId) -> bool {
        self.pending.is_some_and(|p| p.id == id)
    }

    /// Consumes the live request if `id` matches it.
    ///
    /// Stale, duplicate, or unsolicited ids leave the correlator untouched.
    pub fn accept(&mut self, id: RequestId) -> Option<PendingRequest> {
        if self.matches(id) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops the live request, if any. Its response will be treated as stale.
    pub fn cancel(&mut self) -> Option<PendingRequest> {
        self.pending.take()
    }

    /// The live request, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// Returns `true` while a request is waiting for its response.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns `true` once any request has been issued.
    #[must_use]
    pub const fn has_issued(&self) -> bool {
        self.last != 0
    }
}
