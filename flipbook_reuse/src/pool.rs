// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reuse pool: adapter storage, idle FIFOs, and dequeue-with-preference.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::registry::{ReuseId, ReuseRegistry};
use crate::{Adapter, DequeueError};

/// Stable handle to an adapter stored in a [`ReusePool`].
///
/// Ids are unique within one pool and are never reused; the pool never
/// destroys adapters, so a handle stays valid for the pool's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdapterId(u32);

impl AdapterId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Adapter ids are intentionally 32-bit; a pool never holds 2^32 adapters."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which dequeue path produced an adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// The adapter already represented the requested item; its display state
    /// was left untouched.
    SameItem,
    /// The oldest idle adapter was recycled and
    /// [`Adapter::prepare_for_reuse`] has run on it.
    Recycled,
    /// The registered factory produced a brand-new adapter.
    Fresh,
}

/// A successful dequeue: the adapter handle plus how it was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dequeued {
    /// Handle of the adapter, now in the active set.
    pub adapter: AdapterId,
    /// Which preference rule satisfied the request.
    pub provenance: Provenance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Idle,
    Active,
}

struct Slot<A, I> {
    adapter: A,
    reuse_id: ReuseId,
    status: Status,
    /// Item the adapter most recently represented. Retained while idle so
    /// the same-item preference can match without reconfiguration.
    last_item: Option<I>,
}

#[derive(Default)]
struct IdQueues {
    /// Idle adapters in release order; the front is the oldest.
    idle: VecDeque<AdapterId>,
    /// Adapters currently dequeued. Small: active plus adjacent pages.
    active: Vec<AdapterId>,
}

/// Per-identifier adapter pool with an idle FIFO and an active set.
///
/// The pool owns every adapter it has ever produced and hands out
/// [`AdapterId`] handles. An adapter is in exactly one of the idle queue or
/// the active set for its identifier at any instant.
///
/// `I` is the host's item key type; items are compared with `PartialEq` and
/// only ever cloned, never mutated.
pub struct ReusePool<A, I> {
    registry: ReuseRegistry<A>,
    slots: Vec<Slot<A, I>>,
    queues: HashMap<ReuseId, IdQueues>,
}

impl<A, I> fmt::Debug for ReusePool<A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idle = self
            .slots
            .iter()
            .filter(|s| s.status == Status::Idle)
            .count();
        f.debug_struct("ReusePool")
            .field("adapters", &self.slots.len())
            .field("idle", &idle)
            .field("active", &(self.slots.len() - idle))
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<A: Adapter, I: Clone + PartialEq> ReusePool<A, I> {
    /// Create an empty pool with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ReuseRegistry::new(),
            slots: Vec::new(),
            queues: HashMap::new(),
        }
    }

    /// Register `factory` for `id`, replacing any prior factory.
    ///
    /// See [`ReuseRegistry::register`].
    pub fn register(&mut self, id: impl Into<ReuseId>, factory: impl FnMut() -> A + 'static) {
        self.registry.register(id, factory);
    }

    /// Remove the factory for `id`; subsequent dequeues for it fail with
    /// [`DequeueError::Unregistered`].
    ///
    /// See [`ReuseRegistry::unregister`].
    pub fn unregister(&mut self, id: &ReuseId) -> bool {
        self.registry.unregister(id)
    }

    /// Shared access to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ReuseRegistry<A> {
        &self.registry
    }

    /// Obtain an adapter for `item` under `id`, preferring an adapter that
    /// already represents `item`, then the oldest idle adapter, then the
    /// factory.
    ///
    /// The returned adapter is in the active set. Fails with
    /// [`DequeueError::Unregistered`] when no factory is registered for `id`,
    /// regardless of pool contents.
    pub fn dequeue(&mut self, id: &ReuseId, item: &I) -> Result<Dequeued, DequeueError> {
        if !self.registry.is_registered(id) {
            return Err(DequeueError::Unregistered(id.clone()));
        }

        // Preference 1: an adapter already representing `item`, active or
        // idle. Display state stays untouched.
        if let Some((adapter, was_idle)) = self.find_representing(id, item) {
            if was_idle {
                self.activate(id, adapter);
            }
            return Ok(Dequeued {
                adapter,
                provenance: Provenance::SameItem,
            });
        }

        // Preference 2: the oldest idle adapter, strict FIFO.
        if let Some(queues) = self.queues.get_mut(id) {
            if let Some(adapter) = queues.idle.pop_front() {
                queues.active.push(adapter);
                let slot = &mut self.slots[adapter.idx()];
                slot.status = Status::Active;
                slot.last_item = Some(item.clone());
                slot.adapter.prepare_for_reuse();
                return Ok(Dequeued {
                    adapter,
                    provenance: Provenance::Recycled,
                });
            }
        }

        // Otherwise the factory produces a fresh adapter.
        match self.registry.make(id) {
            Some(adapter) => {
                let handle = AdapterId::new(self.slots.len());
                self.slots.push(Slot {
                    adapter,
                    reuse_id: id.clone(),
                    status: Status::Active,
                    last_item: Some(item.clone()),
                });
                self.queues.entry(id.clone()).or_default().active.push(handle);
                Ok(Dequeued {
                    adapter: handle,
                    provenance: Provenance::Fresh,
                })
            }
            None => Err(DequeueError::Unregistered(id.clone())),
        }
    }

    /// Move `adapter` from the active set to the back of its idle queue.
    ///
    /// No-op for unknown handles and for adapters that are already idle.
    pub fn release(&mut self, adapter: AdapterId) {
        let Some(slot) = self.slots.get_mut(adapter.idx()) else {
            return;
        };
        if slot.status == Status::Idle {
            return;
        }
        slot.status = Status::Idle;
        if let Some(queues) = self.queues.get_mut(&slot.reuse_id) {
            queues.active.retain(|a| *a != adapter);
            queues.idle.push_back(adapter);
        }
    }

    /// Shared access to an adapter.
    #[must_use]
    pub fn get(&self, adapter: AdapterId) -> Option<&A> {
        self.slots.get(adapter.idx()).map(|s| &s.adapter)
    }

    /// Exclusive access to an adapter.
    pub fn get_mut(&mut self, adapter: AdapterId) -> Option<&mut A> {
        self.slots.get_mut(adapter.idx()).map(|s| &mut s.adapter)
    }

    /// The reuse identifier `adapter` was dequeued under.
    #[must_use]
    pub fn reuse_id_of(&self, adapter: AdapterId) -> Option<&ReuseId> {
        self.slots.get(adapter.idx()).map(|s| &s.reuse_id)
    }

    /// Whether `adapter` is currently in the active set.
    #[must_use]
    pub fn is_active(&self, adapter: AdapterId) -> bool {
        self.slots
            .get(adapter.idx())
            .is_some_and(|s| s.status == Status::Active)
    }

    /// Total number of adapters the pool has ever produced.
    #[must_use]
    pub fn adapter_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of idle adapters held for `id`.
    #[must_use]
    pub fn idle_count(&self, id: &ReuseId) -> usize {
        self.queues.get(id).map_or(0, |q| q.idle.len())
    }

    /// Number of active adapters held for `id`.
    #[must_use]
    pub fn active_count(&self, id: &ReuseId) -> usize {
        self.queues.get(id).map_or(0, |q| q.active.len())
    }

    fn find_representing(&self, id: &ReuseId, item: &I) -> Option<(AdapterId, bool)> {
        let queues = self.queues.get(id)?;
        let represents = |a: &AdapterId| self.slots[a.idx()].last_item.as_ref() == Some(item);
        if let Some(adapter) = queues.active.iter().copied().find(|a| represents(a)) {
            return Some((adapter, false));
        }
        if let Some(adapter) = queues.idle.iter().copied().find(|a| represents(a)) {
            return Some((adapter, true));
        }
        None
    }

    fn activate(&mut self, id: &ReuseId, adapter: AdapterId) {
        if let Some(queues) = self.queues.get_mut(id) {
            queues.idle.retain(|a| *a != adapter);
            queues.active.push(adapter);
        }
        self.slots[adapter.idx()].status = Status::Active;
    }
}

impl<A: Adapter, I: Clone + PartialEq> Default for ReusePool<A, I> {
    fn default() -> Self {
        Self::new()
    }
}
