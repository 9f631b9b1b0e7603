// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A Vec-backed reference [`DataSource`] for hosts that own a plain ordered
//! list of items.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::hash::Hash;

use flipbook_reuse::{Adapter, ReuseId};

use crate::source::DataSource;

/// An ordered, mutable list of items exposed to the pager as a
/// [`DataSource`].
///
/// Adapter production is driven by two pieces of host configuration:
///
/// - a reuse identifier, either one fixed identifier for every item or a
///   per-item function set with [`PageList::set_reuse_id_fn`] (returning a
///   distinct identifier per item effectively disables recycling for it);
/// - a configure closure applying an item to a dequeued adapter. The adapter
///   handed in may be brand new, already showing the item, or recycled from
///   a different item; the closure must handle all three.
///
/// Mutations do not notify the pager by themselves: wrap them in
/// `begin_updates` / `end_updates`, use the pager's `mutate` helper, or call
/// `note_data_changed` afterwards.
///
/// ```rust
/// use flipbook_pager::{DataSource, PageList};
///
/// struct Label(String);
/// impl flipbook_reuse::Adapter for Label {}
///
/// let mut list: PageList<u32, Label> =
///     PageList::new("page", |label: &mut Label, item: &u32, _| label.0 = item.to_string());
/// list.extend([1, 2, 3]);
///
/// assert_eq!(list.index_of(&2), Some(1));
/// assert_eq!(list.default_item(), Some(1));
/// assert_eq!(list.count(), Some(3));
/// ```
pub struct PageList<I, A> {
    items: Vec<I>,
    reuse_id: ReuseId,
    reuse_id_fn: Option<Box<dyn Fn(&I, usize) -> ReuseId>>,
    configure: Box<dyn FnMut(&mut A, &I, usize)>,
}

impl<I: Debug, A> fmt::Debug for PageList<I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageList")
            .field("items", &self.items)
            .field("reuse_id", &self.reuse_id)
            .field("dynamic_reuse_id", &self.reuse_id_fn.is_some())
            .finish_non_exhaustive()
    }
}

impl<I, A> PageList<I, A> {
    /// Create an empty list dequeuing every adapter under `reuse_id` and
    /// configuring adapters with `configure`.
    pub fn new(
        reuse_id: impl Into<ReuseId>,
        configure: impl FnMut(&mut A, &I, usize) + 'static,
    ) -> Self {
        Self {
            items: Vec::new(),
            reuse_id: reuse_id.into(),
            reuse_id_fn: None,
            configure: Box::new(configure),
        }
    }

    /// Derive reuse identifiers per item instead of using the fixed one.
    pub fn set_reuse_id_fn(&mut self, f: impl Fn(&I, usize) -> ReuseId + 'static) {
        self.reuse_id_fn = Some(Box::new(f));
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    /// All items in order.
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Append an item.
    pub fn push(&mut self, item: I) {
        self.items.push(item);
    }

    /// Append every item of `iter`.
    pub fn extend(&mut self, iter: impl IntoIterator<Item = I>) {
        self.items.extend(iter);
    }

    /// Insert an item at `index`, shifting later items up.
    ///
    /// # Panics
    ///
    /// Panics when `index > len`.
    pub fn insert(&mut self, index: usize, item: I) {
        self.items.insert(index, item);
    }

    /// Remove and return the item at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<I> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Replace the item at `index`, returning the previous one, or `None`
    /// (leaving the list unchanged) when out of range.
    pub fn replace(&mut self, index: usize, item: I) -> Option<I> {
        let slot = self.items.get_mut(index)?;
        Some(core::mem::replace(slot, item))
    }

    /// Exchange the items at two indices.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// Keep only the items for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&I) -> bool) {
        self.items.retain(keep);
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<I: PartialEq, A> PageList<I, A> {
    /// Remove the first occurrence of `item`, reporting whether one existed.
    pub fn remove_item(&mut self, item: &I) -> bool {
        match self.items.iter().position(|x| x == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<I, A> DataSource for PageList<I, A>
where
    I: Clone + Eq + Hash + Debug,
    A: Adapter,
{
    type Item = I;
    type Adapter = A;

    fn item_at(&self, index: usize) -> Option<I> {
        self.items.get(index).cloned()
    }

    fn index_of(&self, item: &I) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    fn default_item(&self) -> Option<I> {
        self.items.first().cloned()
    }

    fn count(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn reuse_id(&self, item: &I, index: usize) -> ReuseId {
        match &self.reuse_id_fn {
            Some(f) => f(item, index),
            None => self.reuse_id.clone(),
        }
    }

    fn configure(&mut self, adapter: &mut A, item: &I, index: usize) {
        (self.configure)(adapter, item, index);
    }
}
