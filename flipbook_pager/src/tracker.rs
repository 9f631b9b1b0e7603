// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional adapter ↔ item ↔ index bookkeeping and reconciliation.

use core::fmt;

use flipbook_reuse::AdapterId;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::source::DataSource;

/// The item and index an adapter currently represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<I> {
    /// The represented item.
    pub item: I,
    /// The item's index as of the last reconciliation.
    pub index: usize,
}

/// Outcome of a reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconcile<I> {
    /// The item that must now be active: the surviving incumbent, a
    /// replacement neighbor, or the source's default item. `None` when the
    /// source is empty.
    pub active: Option<I>,
    /// Adapters whose items vanished; they are already dissociated and must
    /// be released back to their pools.
    pub released: SmallVec<[AdapterId; 4]>,
    /// Whether any registration changed. A repeated pass with no intervening
    /// mutation reports `false`.
    pub changed: bool,
}

/// The single source of truth for "what is on screen and where".
///
/// Maintains mutually inverse adapter → (item, index) and item → adapter
/// maps over the active and active-adjacent adapters. Idle adapters have no
/// entry here; their last-item affinity lives in the reuse pool.
pub struct ObjectIndexTracker<I> {
    by_adapter: HashMap<AdapterId, Registration<I>>,
    by_item: HashMap<I, AdapterId>,
}

impl<I: fmt::Debug> fmt::Debug for ObjectIndexTracker<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIndexTracker")
            .field("tracked", &self.by_adapter.len())
            .finish_non_exhaustive()
    }
}

impl<I: Clone + Eq + core::hash::Hash> ObjectIndexTracker<I> {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_adapter: HashMap::new(),
            by_item: HashMap::new(),
        }
    }

    /// Associate `adapter` with `item` at `index`, replacing any prior
    /// association of either the adapter or the item.
    pub fn associate(&mut self, adapter: AdapterId, item: I, index: usize) {
        if let Some(prior) = self.by_adapter.remove(&adapter) {
            self.by_item.remove(&prior.item);
        }
        if let Some(prior_adapter) = self.by_item.remove(&item) {
            self.by_adapter.remove(&prior_adapter);
        }
        self.by_item.insert(item.clone(), adapter);
        self.by_adapter.insert(adapter, Registration { item, index });
        debug_assert_eq!(
            self.by_adapter.len(),
            self.by_item.len(),
            "adapter and item maps must stay mutual inverses"
        );
    }

    /// Drop the association for `adapter`, returning what it represented.
    pub fn dissociate(&mut self, adapter: AdapterId) -> Option<Registration<I>> {
        let registration = self.by_adapter.remove(&adapter)?;
        self.by_item.remove(&registration.item);
        Some(registration)
    }

    /// What `adapter` currently represents.
    #[must_use]
    pub fn registration(&self, adapter: AdapterId) -> Option<&Registration<I>> {
        self.by_adapter.get(&adapter)
    }

    /// The adapter currently representing `item`.
    #[must_use]
    pub fn adapter_for(&self, item: &I) -> Option<AdapterId> {
        self.by_item.get(item).copied()
    }

    /// The index of `item`: the tracked registration when the item is on
    /// screen, the data source otherwise.
    ///
    /// Tracked indices are re-derived on every reconciliation; between a
    /// mutation and the reconcile that absorbs it they may be stale.
    pub fn index_of<S>(&self, source: &S, item: &I) -> Option<usize>
    where
        S: DataSource<Item = I>,
    {
        match self.by_item.get(item) {
            Some(adapter) => self.by_adapter.get(adapter).map(|r| r.index),
            None => source.index_of(item),
        }
    }

    /// The item at `index`: a tracked registration when one matches, the
    /// data source otherwise.
    pub fn item_at<S>(&self, source: &S, index: usize) -> Option<I>
    where
        S: DataSource<Item = I>,
    {
        self.by_adapter
            .values()
            .find(|r| r.index == index)
            .map(|r| r.item.clone())
            .or_else(|| source.item_at(index))
    }

    /// Number of tracked adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_adapter.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_adapter.is_empty()
    }

    /// Absorb data source mutations: re-derive every tracked index, drop
    /// registrations whose items vanished, and select the item that must now
    /// be active.
    ///
    /// `active` is the incumbent item with its last-known index, if any.
    /// When the incumbent survives it stays active; when it vanished the
    /// replacement is the item now occupying its last-known index, else the
    /// nearest surviving predecessor, else the source's default item.
    ///
    /// Callers release the returned adapters to their pools; the tracker
    /// does not decide recycling mechanics.
    pub fn reconcile<S>(&mut self, source: &S, active: Option<(&I, usize)>) -> Reconcile<I>
    where
        S: DataSource<Item = I>,
    {
        let mut released = SmallVec::new();
        let mut changed = false;

        let tracked: SmallVec<[(AdapterId, I, usize); 4]> = self
            .by_adapter
            .iter()
            .map(|(adapter, r)| (*adapter, r.item.clone(), r.index))
            .collect();
        for (adapter, item, index) in tracked {
            match source.index_of(&item) {
                Some(new_index) => {
                    if new_index != index {
                        if let Some(r) = self.by_adapter.get_mut(&adapter) {
                            r.index = new_index;
                        }
                        changed = true;
                    }
                }
                None => {
                    self.dissociate(adapter);
                    released.push(adapter);
                    changed = true;
                }
            }
        }

        let active = match active {
            Some((item, _)) if source.index_of(item).is_some() => Some(item.clone()),
            Some((_, last_index)) => Self::replacement_near(source, last_index),
            None => source.default_item(),
        };

        Reconcile {
            active,
            released,
            changed,
        }
    }

    /// Nearest surviving item to a vanished active item's last-known index:
    /// the item now at that index (the old right neighbor), else the closest
    /// surviving predecessor, else the default item.
    fn replacement_near<S>(source: &S, last_index: usize) -> Option<I>
    where
        S: DataSource<Item = I>,
    {
        if let Some(item) = source.item_at(last_index) {
            return Some(item);
        }
        for index in (0..last_index).rev() {
            if let Some(item) = source.item_at(index) {
                return Some(item);
            }
        }
        source.default_item()
    }
}

impl<I: Clone + Eq + core::hash::Hash> Default for ObjectIndexTracker<I> {
    fn default() -> Self {
        Self::new()
    }
}
