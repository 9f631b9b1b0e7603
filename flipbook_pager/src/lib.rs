// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipbook Pager: a paged navigation controller core.
//!
//! ## Overview
//!
//! A [`Pager`] presents a linear, navigable sequence of content pages backed
//! by an externally owned, dynamically mutable ordered data source. One
//! adapter exists per visible or about-to-be-visible item; adapters are
//! recycled through `flipbook_reuse` rather than destroyed when their item
//! scrolls out of view. Transitions — gesture-driven or programmatic — run
//! on the `flipbook_transition` state machine.
//!
//! This crate deliberately does **not** perform layout, hit testing, or
//! rendering, and it never owns the data source's storage. Host frameworks
//! are responsible for:
//!
//! - Owning the data and implementing [`DataSource`] over it.
//! - Translating their gesture recognizer into
//!   [`PanSample`](flipbook_transition::PanSample) observations.
//! - Driving the animation clock: animate for
//!   [`Pager::suggested_duration`] and then report
//!   [`Pager::finish_animation`].
//! - Drawing the page indicator from [`IndicatorState`].
//!
//! ## Data mutation
//!
//! The source may mutate at any time, including while a transition is in
//! flight. Wrap batches in [`Pager::begin_updates`] / [`Pager::end_updates`]
//! (scopes nest; the outermost end settles everything once), or report
//! out-of-band edits with [`Pager::note_data_changed`]. Reconciliation
//! re-derives every tracked index, releases adapters whose items vanished,
//! and re-homes the active page — the nearest surviving neighbor when the
//! active item itself was removed. While the transition machine is not
//! idle, adapter reassignment is queued and applied on return to idle, so
//! an animation never has its adapters re-homed under it.
//!
//! ## Concurrency model
//!
//! One logical actor: navigation input, mutation notifications, and
//! reconciliation interleave but never run in parallel, every operation
//! takes `&mut self`, and the core never blocks. No locking exists or is
//! needed.
//!
//! ## Minimal example
//!
//! ```rust
//! use flipbook_pager::{NoDelegate, PageList, Pager, PagerConfig};
//!
//! #[derive(Default)]
//! struct Card(Option<&'static str>);
//! impl flipbook_reuse::Adapter for Card {}
//!
//! let mut list: PageList<&'static str, Card> =
//!     PageList::new("page", |card: &mut Card, item, _| card.0 = Some(*item));
//! list.extend(["intro", "body", "outro"]);
//!
//! let mut pager = Pager::new(list, PagerConfig::default());
//! pager.register("page", Card::default);
//! pager.reload(&mut NoDelegate).unwrap();
//!
//! assert_eq!(pager.active_item(), Some(&"intro"));
//!
//! // Remove the active page; its neighbor takes over.
//! pager.begin_updates();
//! pager.source_mut().remove_item(&"intro");
//! pager.end_updates(&mut NoDelegate).unwrap();
//! assert_eq!(pager.active_item(), Some(&"body"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod delegate;
mod list;
mod pager;
mod source;
mod tracker;
mod updates;

pub use delegate::{NoDelegate, PagerDelegate};
pub use list::PageList;
pub use pager::{IndicatorState, Pager, PagerConfig, PagerError, TransitionStyle};
pub use source::DataSource;
pub use tracker::{ObjectIndexTracker, Reconcile, Registration};
pub use updates::{EndOutcome, UpdateCoordinator};

pub use flipbook_reuse::{Adapter, AdapterId, DequeueError, Dequeued, Provenance, ReuseId};
pub use flipbook_transition::{
    Decision, Direction, Finished, Mode, Orientation, PanSample, Phase, TransitionConfig,
};
