// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-effort pager notifications.

use flipbook_reuse::AdapterId;

/// Observer of pager transitions and page-indicator state.
///
/// Every notification point is independently optional: each method has an
/// empty default body, so implementors override only what they care about
/// and receive nothing for the rest. The pager never depends on a delegate
/// reacting.
pub trait PagerDelegate<I> {
    /// A gesture-initiated or programmatic transition began; `pending` may
    /// become the active adapter.
    fn will_transition(&mut self, pending: AdapterId, item: &I) {
        let _ = (pending, item);
    }

    /// A transition ended. `finished` is `true` when an animation ran to its
    /// end (`false` for synchronous, non-animated moves), `previous` is the
    /// adapter that was active before the interaction, and `completed` tells
    /// whether focus actually moved.
    fn did_finish(&mut self, finished: bool, previous: Option<AdapterId>, completed: bool) {
        let _ = (finished, previous, completed);
    }

    /// The page-indicator state changed: `count` items with `position`
    /// active. Either side is `None` when unknown (counting sources only).
    fn indicator_changed(&mut self, count: Option<usize>, position: Option<usize>) {
        let _ = (count, position);
    }
}

/// A delegate that ignores every notification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoDelegate;

impl<I> PagerDelegate<I> for NoDelegate {}
