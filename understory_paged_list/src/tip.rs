// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning empty results and fetch failures into user-facing tips.

use alloc::string::{String, ToString};
use core::fmt::Display;

use crate::TipInfo;

/// Why a blocking tip replaces the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipReason<'a, E> {
    /// Both bounds are reached and no item exists.
    NotFound,
    /// No item is loaded but the dataset may continue past the window.
    TapToLoad,
    /// Fetching failed while the window was empty.
    Error(&'a E),
}

/// Maps tip reasons and source errors to what a view displays.
pub trait TipMapper<E> {
    /// The blocking tip for `reason`.
    fn tip_for(&self, reason: &TipReason<'_, E>) -> TipInfo;

    /// The transient message for a failure that left loaded items in place.
    fn message_for(&self, error: &E) -> String;
}

/// A [`TipMapper`] using fixed English texts and the error's [`Display`] output.
///
/// Icon keys are `"not_found"`, `"tap_to_load"` and `"error"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayTips;

impl<E: Display> TipMapper<E> for DisplayTips {
    fn tip_for(&self, reason: &TipReason<'_, E>) -> TipInfo {
        match reason {
            TipReason::NotFound => TipInfo::new("not_found", "Not Found"),
            TipReason::TapToLoad => TipInfo::new("tap_to_load", "Tap to Load"),
            TipReason::Error(error) => TipInfo::new("error", error.to_string()),
        }
    }

    fn message_for(&self, error: &E) -> String {
        error.to_string()
    }
}
