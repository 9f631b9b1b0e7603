// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only query interface onto the externally owned data source.

use core::fmt::Debug;
use core::hash::Hash;

use flipbook_reuse::{Adapter, ReuseId};

/// An ordered collection of items viewed, never owned, by the pager.
///
/// The pager observes the collection purely through this interface; items
/// are opaque identity tokens compared with the key type's own equality.
/// Indices are only meaningful until the next accepted mutation, after which
/// the pager re-derives them during reconciliation.
///
/// The two adapter hooks split the original "produce an adapter for this
/// item" request into its halves: [`reuse_id`](DataSource::reuse_id) names
/// the pool to draw from, and [`configure`](DataSource::configure) applies
/// item-specific state to whatever adapter the pool produced. The adapter
/// passed to `configure` may be brand new, already representing `item`, or
/// freshly recycled from a different item; implementations must handle all
/// three.
pub trait DataSource {
    /// Identity token for one element of the collection.
    type Item: Clone + Eq + Hash + Debug;
    /// The on-screen unit representing one item.
    type Adapter: Adapter;

    /// The item at `index`, or `None` when out of range.
    fn item_at(&self, index: usize) -> Option<Self::Item>;

    /// The current index of `item`, or `None` when absent.
    fn index_of(&self, item: &Self::Item) -> Option<usize>;

    /// The item to present when nothing is active yet or every tracked item
    /// vanished. `None` when the collection is empty.
    fn default_item(&self) -> Option<Self::Item>;

    /// Total number of items, when cheaply known. Feeds the page-indicator
    /// state; `None` leaves the indicator without a count.
    fn count(&self) -> Option<usize> {
        None
    }

    /// The reuse identifier to dequeue under for `item` at `index`.
    fn reuse_id(&self, item: &Self::Item, index: usize) -> ReuseId;

    /// Apply item-specific state to a dequeued adapter.
    fn configure(&mut self, adapter: &mut Self::Adapter, item: &Self::Item, index: usize);
}
