// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reuse identifier registry: late-bound adapter factories.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

/// Opaque string key distinguishing kinds of adapters for pooling purposes.
///
/// One identifier is unique per registered adapter kind. Hosts typically use
/// short literals (`"page"`, `"cover"`); the registry treats the value as
/// opaque.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReuseId(String);

impl ReuseId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReuseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ReuseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReuseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Factory<A> = Box<dyn FnMut() -> A>;

/// Table mapping a [`ReuseId`] to a factory producing fresh adapters.
///
/// Factories are resolved at dequeue time, not at registration time. A
/// registration takes effect immediately for subsequent dequeues and never
/// affects adapters already dequeued.
pub struct ReuseRegistry<A> {
    factories: HashMap<ReuseId, Factory<A>>,
}

impl<A> fmt::Debug for ReuseRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: alloc::vec::Vec<&ReuseId> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("ReuseRegistry")
            .field("identifiers", &ids)
            .finish_non_exhaustive()
    }
}

impl<A> ReuseRegistry<A> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` for `id`, replacing any prior factory.
    ///
    /// Registration is idempotent: re-registering the same identifier simply
    /// swaps the factory used for future dequeues.
    pub fn register(&mut self, id: impl Into<ReuseId>, factory: impl FnMut() -> A + 'static) {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Remove the factory for `id`, invalidating future dequeues for it.
    ///
    /// Returns `true` if a factory was registered. Adapters already produced
    /// under `id` are unaffected.
    pub fn unregister(&mut self, id: &ReuseId) -> bool {
        self.factories.remove(id).is_some()
    }

    /// Whether a factory is currently registered for `id`.
    #[must_use]
    pub fn is_registered(&self, id: &ReuseId) -> bool {
        self.factories.contains_key(id)
    }

    /// Produce a fresh adapter for `id`, or `None` if unregistered.
    pub fn make(&mut self, id: &ReuseId) -> Option<A> {
        self.factories.get_mut(id).map(|factory| factory())
    }
}

impl<A> Default for ReuseRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}
