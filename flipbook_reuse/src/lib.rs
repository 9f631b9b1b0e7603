// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipbook Reuse: adapter recycling primitives for paged UIs.
//!
//! Adapters — the on-screen units representing one data item each — are
//! expensive to construct, so a paged host keeps only the visible and
//! about-to-be-visible ones alive and recycles the rest. This crate provides
//! the two pieces that make that recycling correct:
//!
//! - [`ReuseRegistry`]: a table mapping a [`ReuseId`] to a factory capable of
//!   producing a fresh adapter, resolved late at dequeue time.
//! - [`ReusePool`]: per-identifier storage of adapters with an idle FIFO and
//!   an active set, implementing dequeue-with-preference semantics.
//!
//! Adapters live inside the pool and are addressed by small, copyable
//! [`AdapterId`] handles. The pool never destroys an adapter; one becomes
//! idle when [`ReusePool::release`] displaces it and is revived by a later
//! [`ReusePool::dequeue`].
//!
//! ## Dequeue preference
//!
//! [`ReusePool::dequeue`] resolves a request for `(identifier, item)` in this
//! order:
//!
//! 1. An adapter (active or idle) that already represents an item equal to
//!    the requested one is returned as-is, with its display state untouched.
//!    This avoids needless reconfiguration flicker when navigation re-enters
//!    a page that was just left.
//! 2. Otherwise the oldest idle adapter for the identifier is popped (strict
//!    FIFO) and [`Adapter::prepare_for_reuse`] is invoked on it.
//! 3. Otherwise the registered factory produces a fresh adapter.
//!
//! The returned [`Dequeued`] reports which path fired via [`Provenance`], so
//! hosts can decide how much configuration the adapter still needs.
//!
//! ## Minimal example
//!
//! ```rust
//! use flipbook_reuse::{Provenance, ReusePool};
//!
//! #[derive(Default)]
//! struct Card;
//! impl flipbook_reuse::Adapter for Card {}
//!
//! let mut pool: ReusePool<Card, u32> = ReusePool::new();
//! pool.register("page", Card::default);
//!
//! // Nothing idle yet: the factory runs.
//! let first = pool.dequeue(&"page".into(), &7).unwrap();
//! assert_eq!(first.provenance, Provenance::Fresh);
//!
//! // Released adapters are preferred over the factory...
//! pool.release(first.adapter);
//! let again = pool.dequeue(&"page".into(), &7).unwrap();
//! // ...and an adapter still representing the requested item wins outright.
//! assert_eq!(again.adapter, first.adapter);
//! assert_eq!(again.provenance, Provenance::SameItem);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod pool;
mod registry;

pub use pool::{AdapterId, Dequeued, Provenance, ReusePool};
pub use registry::{ReuseId, ReuseRegistry};

/// A recyclable on-screen unit representing one data item.
///
/// The only lifecycle hook the pool itself drives is
/// [`prepare_for_reuse`](Adapter::prepare_for_reuse); item-specific
/// configuration is owned by the host and applied after dequeue.
pub trait Adapter {
    /// Reset transient display state before the adapter represents a
    /// different item.
    ///
    /// Called by [`ReusePool::dequeue`] exactly when an idle adapter is
    /// recycled for a new item ([`Provenance::Recycled`]); never called when
    /// the adapter already represents the requested item.
    fn prepare_for_reuse(&mut self) {}
}

/// Failure to produce an adapter from the pool.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DequeueError {
    /// No factory is registered for the requested identifier.
    ///
    /// This is a programmer error: the identifier must be registered with
    /// [`ReusePool::register`] before any dequeue. No adapter is produced and
    /// the pool is left unchanged.
    #[error("no adapter factory registered for reuse identifier `{0}`")]
    Unregistered(ReuseId),
}
