// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pager facade: navigation, update batching, and adapter re-homing.

use core::fmt;

use flipbook_reuse::{AdapterId, DequeueError, Dequeued, ReuseId, ReusePool};
use flipbook_transition::{
    Decision, Direction, Finished, Mode, Orientation, PanSample, Phase, TransitionConfig,
    TransitionMachine,
};

use crate::delegate::PagerDelegate;
use crate::source::DataSource;
use crate::tracker::ObjectIndexTracker;
use crate::updates::{EndOutcome, UpdateCoordinator};

/// Failure of a pager operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    /// The requested item (or the item behind a given adapter) is absent
    /// from the data source. Recoverable; no state was mutated.
    #[error("item not present in the data source")]
    ObjectNotFound,
    /// A transition is already in flight; once animating, only natural
    /// completion leads back to idle. Recoverable; no state was mutated.
    #[error("a transition is already in flight")]
    TransitionInFlight,
    /// The reuse pool could not produce an adapter.
    #[error(transparent)]
    Dequeue(#[from] DequeueError),
}

/// How the host renders the movement between pages.
///
/// Carried as configuration for the rendering layer; the core's bookkeeping
/// is identical for both styles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransitionStyle {
    /// Pages slide continuously, the incoming page pushing the outgoing one.
    #[default]
    Scroll,
    /// The incoming page slides over the stationary outgoing page.
    Stack,
}

/// Pager configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PagerConfig {
    /// Rendering style for transitions.
    pub style: TransitionStyle,
    /// Axis pages move along.
    pub orientation: Orientation,
    /// Thresholds and timing for the transition machine.
    pub transition: TransitionConfig,
    /// Extent of the transition axis in host units, used to normalize pan
    /// translations. With the default of `1.0`, translations are taken as
    /// already-normalized ratios.
    pub viewport_extent: f64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            style: TransitionStyle::Scroll,
            orientation: Orientation::Horizontal,
            transition: TransitionConfig::default(),
            viewport_extent: 1.0,
        }
    }
}

/// Page-indicator state: how many pages and which one is current.
///
/// Pure state for an external indicator widget; the core never draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndicatorState {
    /// Number of items, when the source counts.
    pub count: Option<usize>,
    /// Index of the active item, when something is active.
    pub position: Option<usize>,
}

/// A linear, navigable sequence of recycled pages over an externally owned
/// data source.
///
/// The pager owns the reuse pool, the adapter ↔ item ↔ index bookkeeping,
/// the update coordinator, and the transition machine; the host owns
/// rendering, the animation clock, and the data itself (viewed through
/// [`DataSource`]). Everything runs on one logical actor: every operation
/// takes `&mut self` and nothing blocks.
///
/// ```rust
/// use flipbook_pager::{NoDelegate, PageList, Pager, PagerConfig};
///
/// #[derive(Default)]
/// struct Card(Option<u32>);
/// impl flipbook_reuse::Adapter for Card {}
///
/// let mut list: PageList<u32, Card> =
///     PageList::new("page", |card: &mut Card, item, _| card.0 = Some(*item));
/// list.extend([10, 20, 30]);
///
/// let mut pager = Pager::new(list, PagerConfig::default());
/// pager.register("page", Card::default);
///
/// // Realize the default item.
/// pager.reload(&mut NoDelegate).unwrap();
/// assert_eq!(pager.active_item(), Some(&10));
///
/// // Jump without animation.
/// pager.set_active_item(&30, false, &mut NoDelegate).unwrap();
/// assert_eq!(pager.active_index(), Some(2));
/// ```
pub struct Pager<S: DataSource> {
    source: S,
    pool: ReusePool<S::Adapter, S::Item>,
    tracker: ObjectIndexTracker<S::Item>,
    updates: UpdateCoordinator,
    machine: TransitionMachine,
    style: TransitionStyle,
    orientation: Orientation,
    viewport_extent: f64,
    active: Option<AdapterId>,
    other: Option<AdapterId>,
    /// Adapter that was active before the in-flight interaction; reported
    /// by the did-finish notification.
    previous_active: Option<AdapterId>,
    /// A reconcile arrived while a transition was in flight; run it once
    /// the machine returns to idle.
    pending_reconcile: bool,
    indicator: IndicatorState,
}

impl<S: DataSource> fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("machine", &self.machine)
            .field("pool", &self.pool)
            .field("tracker", &self.tracker)
            .field("updates", &self.updates)
            .field("active", &self.active)
            .field("other", &self.other)
            .field("pending_reconcile", &self.pending_reconcile)
            .field("indicator", &self.indicator)
            .finish_non_exhaustive()
    }
}

impl<S: DataSource> Pager<S> {
    /// Create a pager over `source`.
    ///
    /// No adapter is realized yet: register factories first, then call
    /// [`reload`](Self::reload) to present the source's default item.
    #[must_use]
    pub fn new(source: S, config: PagerConfig) -> Self {
        Self {
            source,
            pool: ReusePool::new(),
            tracker: ObjectIndexTracker::new(),
            updates: UpdateCoordinator::new(),
            machine: TransitionMachine::new(config.transition),
            style: config.style,
            orientation: config.orientation,
            viewport_extent: config.viewport_extent,
            active: None,
            other: None,
            previous_active: None,
            pending_reconcile: false,
            indicator: IndicatorState::default(),
        }
    }

    // --- Registration ----------------------------------------------------

    /// Register an adapter factory for `id`. See `ReusePool::register`.
    pub fn register(
        &mut self,
        id: impl Into<ReuseId>,
        factory: impl FnMut() -> S::Adapter + 'static,
    ) {
        self.pool.register(id, factory);
    }

    /// Remove the factory for `id`. See `ReusePool::unregister`.
    pub fn unregister(&mut self, id: &ReuseId) -> bool {
        self.pool.unregister(id)
    }

    /// Dequeue an adapter for `item` at `index`, associate it, and run the
    /// source's configuration step on it.
    ///
    /// This is the low-level acquisition path the pager itself uses while
    /// navigating; hosts pre-warming a page can call it directly.
    pub fn dequeue_adapter(
        &mut self,
        item: &S::Item,
        index: usize,
    ) -> Result<Dequeued, PagerError> {
        self.acquire(item, index)
    }

    // --- Queries ----------------------------------------------------------

    /// The data source under observation.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Exclusive access to the data source.
    ///
    /// Mutating through this reference does not notify the pager: wrap the
    /// edits in [`begin_updates`](Self::begin_updates) /
    /// [`end_updates`](Self::end_updates), use [`mutate`](Self::mutate), or
    /// call [`note_data_changed`](Self::note_data_changed) afterwards.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The adapter currently in focus.
    #[must_use]
    pub fn active_adapter(&self) -> Option<AdapterId> {
        self.active
    }

    /// The candidate adapter of an in-flight transition.
    #[must_use]
    pub fn other_adapter(&self) -> Option<AdapterId> {
        self.other
    }

    /// The item represented by the active adapter.
    #[must_use]
    pub fn active_item(&self) -> Option<&S::Item> {
        self.active
            .and_then(|a| self.tracker.registration(a))
            .map(|r| &r.item)
    }

    /// The active item's index as of the last reconciliation.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
            .and_then(|a| self.tracker.registration(a))
            .map(|r| r.index)
    }

    /// The adapter currently representing `item`, if it is on screen.
    #[must_use]
    pub fn adapter_for_item(&self, item: &S::Item) -> Option<AdapterId> {
        self.tracker.adapter_for(item)
    }

    /// The item represented by `adapter`, if the adapter is on screen.
    #[must_use]
    pub fn item_for_adapter(&self, adapter: AdapterId) -> Option<&S::Item> {
        self.tracker.registration(adapter).map(|r| &r.item)
    }

    /// Shared access to an adapter.
    #[must_use]
    pub fn adapter(&self, adapter: AdapterId) -> Option<&S::Adapter> {
        self.pool.get(adapter)
    }

    /// Exclusive access to an adapter.
    pub fn adapter_mut(&mut self, adapter: AdapterId) -> Option<&mut S::Adapter> {
        self.pool.get_mut(adapter)
    }

    /// The index of `item`, answered from tracked registrations before the
    /// data source.
    #[must_use]
    pub fn index_of(&self, item: &S::Item) -> Option<usize> {
        self.tracker.index_of(&self.source, item)
    }

    /// The item at `index`, answered from tracked registrations before the
    /// data source.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<S::Item> {
        self.tracker.item_at(&self.source, index)
    }

    /// The reuse pool.
    #[must_use]
    pub fn pool(&self) -> &ReusePool<S::Adapter, S::Item> {
        &self.pool
    }

    /// Current page-indicator state.
    #[must_use]
    pub fn indicator(&self) -> IndicatorState {
        self.indicator
    }

    /// Current transition phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Whether a gesture is being tracked or an animation is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        !self.machine.is_idle()
    }

    /// The rendering style for transitions.
    #[must_use]
    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    /// Change the rendering style for subsequent transitions.
    pub fn set_style(&mut self, style: TransitionStyle) {
        self.style = style;
    }

    /// The axis pages move along.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The transition thresholds and timing limits.
    #[must_use]
    pub fn transition_config(&self) -> &TransitionConfig {
        self.machine.config()
    }

    /// Exclusive access to the transition thresholds.
    pub fn transition_config_mut(&mut self) -> &mut TransitionConfig {
        self.machine.config_mut()
    }

    /// Update the transition-axis extent used to normalize pan translations.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = extent.max(0.0);
    }

    // --- Update batching --------------------------------------------------

    /// Open an update scope before mutating the data source. Scopes nest.
    pub fn begin_updates(&mut self) {
        self.updates.begin();
    }

    /// Close an update scope; the outermost close reconciles and refreshes
    /// the page-indicator state.
    ///
    /// Closing with no scope open is reported and ignored. While a
    /// transition is in flight the reconcile's adapter reassignment is
    /// queued until the machine returns to idle.
    pub fn end_updates(&mut self, delegate: &mut impl PagerDelegate<S::Item>) -> Result<(), PagerError> {
        match self.updates.end() {
            EndOutcome::Unbalanced => {
                tracing::warn!("end_updates called with no open update scope");
                Ok(())
            }
            EndOutcome::StillNested => Ok(()),
            EndOutcome::Reconcile => self.reload(delegate),
        }
    }

    /// Record an out-of-band data source mutation.
    ///
    /// Outside any update scope this is an implicit single-shot scope:
    /// reconciliation runs immediately. Inside a scope the change is
    /// absorbed into the batch.
    pub fn note_data_changed(
        &mut self,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        if self.updates.note_mutation() {
            self.reload(delegate)
        } else {
            Ok(())
        }
    }

    /// Run `edit` against the data source inside its own update scope.
    pub fn mutate(
        &mut self,
        delegate: &mut impl PagerDelegate<S::Item>,
        edit: impl FnOnce(&mut S),
    ) -> Result<(), PagerError> {
        self.updates.begin();
        edit(&mut self.source);
        self.end_updates(delegate)
    }

    /// Reconcile the pager with the data source's current contents.
    ///
    /// Re-derives every tracked index, releases adapters whose items
    /// vanished, re-homes the active adapter (nearest surviving neighbor,
    /// then the default item, when the incumbent is gone), reconfigures the
    /// active adapter, and refreshes the page-indicator state. Deferred
    /// until idle while a transition is in flight.
    pub fn reload(&mut self, delegate: &mut impl PagerDelegate<S::Item>) -> Result<(), PagerError> {
        if !self.machine.is_idle() {
            self.pending_reconcile = true;
            return Ok(());
        }
        self.perform_reconcile(delegate)
    }

    // --- Programmatic navigation -----------------------------------------

    /// Move focus to `item`.
    ///
    /// Fails with [`PagerError::ObjectNotFound`] when the item is absent and
    /// [`PagerError::TransitionInFlight`] during a transition, mutating
    /// nothing in either case. When `item` is already active its adapter is
    /// refreshed in place through the regular configuration path and no
    /// transition occurs. Otherwise the transition direction follows the
    /// index ordering; `animated` moves enter the animating phase (complete
    /// them with [`finish_animation`](Self::finish_animation)), non-animated
    /// moves commit synchronously.
    pub fn set_active_item(
        &mut self,
        item: &S::Item,
        animated: bool,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        if !self.machine.is_idle() {
            return Err(PagerError::TransitionInFlight);
        }
        let index = self.source.index_of(item).ok_or(PagerError::ObjectNotFound)?;

        if let Some((adapter, active_item, _)) = self.active_info() {
            if active_item == *item {
                self.tracker.associate(adapter, active_item, index);
                self.configure(adapter, item, index);
                self.refresh_indicator(delegate);
                return Ok(());
            }
        }

        let direction = match self.active_info() {
            Some((_, _, active_index)) if index < active_index => Direction::Reverse,
            _ => Direction::Forward,
        };
        let dequeued = self.acquire(item, index)?;
        self.commit_programmatic(dequeued.adapter, item, direction, animated, delegate);
        Ok(())
    }

    /// Move focus to an already-realized adapter, animating as if its page
    /// lay in `direction`.
    ///
    /// The adapter must be on screen and its item still present in the data
    /// source; otherwise [`PagerError::ObjectNotFound`].
    pub fn set_active_adapter(
        &mut self,
        adapter: AdapterId,
        direction: Direction,
        animated: bool,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        if !self.machine.is_idle() {
            return Err(PagerError::TransitionInFlight);
        }
        let item = self
            .tracker
            .registration(adapter)
            .map(|r| r.item.clone())
            .ok_or(PagerError::ObjectNotFound)?;
        let index = self.source.index_of(&item).ok_or(PagerError::ObjectNotFound)?;

        self.tracker.associate(adapter, item.clone(), index);
        if self.active == Some(adapter) {
            self.configure(adapter, &item, index);
            self.refresh_indicator(delegate);
            return Ok(());
        }
        self.commit_programmatic(adapter, &item, direction, animated, delegate);
        Ok(())
    }

    // --- Gesture navigation -----------------------------------------------

    /// Feed a pan gesture observation.
    ///
    /// The first directed sample begins tracking and realizes the candidate
    /// adapter for the neighbor in the travel direction (notifying
    /// will-transition). Later samples update progress, swap the candidate
    /// when the direction flips, and re-check that the candidate's item
    /// still exists — a mid-gesture removal cancels the transition
    /// automatically. Samples are idempotent and may arrive many times per
    /// frame. Ignored while an animation is running.
    pub fn update_gesture(
        &mut self,
        sample: PanSample,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        if self.machine.is_animating() {
            return Ok(());
        }
        let ratio = sample.ratio(self.orientation, self.viewport_extent);
        let sampled = Direction::from_ratio(ratio);

        if self.machine.is_idle() {
            let Some(direction) = sampled else {
                return Ok(());
            };
            if self.active.is_none() || !self.machine.begin_tracking(direction) {
                return Ok(());
            }
            self.begin_candidate(direction, delegate)?;
        }

        let Phase::Tracking { direction: current, .. } = self.machine.phase() else {
            return Ok(());
        };
        let direction = sampled.unwrap_or(current);

        // Existence check on the candidate's item: a concurrent removal
        // cancels rather than dangles.
        if let Some(other) = self.other {
            let stale = self
                .tracker
                .registration(other)
                .is_none_or(|r| self.source.index_of(&r.item).is_none());
            if stale {
                tracing::debug!("candidate item vanished mid-gesture; cancelling");
                self.release_other();
                self.previous_active = self.active;
                self.machine.cancel_tracking();
                return Ok(());
            }
        }

        if direction != current {
            // Re-entrant swipe: the candidate switches sides. The pool's
            // same-item preference brings back the adapter just released.
            self.release_other();
            self.begin_candidate(direction, delegate)?;
        }
        self.machine.track(direction, ratio.abs());
        Ok(())
    }

    /// Release the pan gesture and decide the transition's outcome.
    ///
    /// Commits when the completion ratio was covered or the release
    /// velocity toward the travel direction crosses the threshold; cancels
    /// otherwise (including tracking against a boundary with no neighbor).
    /// Either way the machine enters the animating phase: drive the
    /// animation for [`suggested_duration`](Self::suggested_duration) and
    /// then call [`finish_animation`](Self::finish_animation). Returns
    /// `None` when no gesture was being tracked.
    pub fn end_gesture(
        &mut self,
        sample: PanSample,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Option<Decision> {
        let Phase::Tracking { direction, .. } = self.machine.phase() else {
            return None;
        };

        let Some(incoming) = self.other else {
            // Nothing to commit to: snap back.
            self.previous_active = self.active;
            self.machine.cancel_tracking();
            return Some(Decision {
                mode: Mode::Cancel,
                reason: None,
            });
        };

        let velocity = sample.velocity_toward(self.orientation, direction);
        let decision = self.machine.release(velocity)?;
        tracing::debug!(mode = ?decision.mode, reason = ?decision.reason, "gesture released");
        match decision.mode {
            Mode::Commit => self.commit_entry(incoming, delegate),
            Mode::Cancel => self.cancel_entry(),
        }
        Some(decision)
    }

    /// Cancel a tracked gesture outright (for example when the host's
    /// gesture recognizer is interrupted), entering the snap-back
    /// animation. Returns `false` when no gesture was being tracked.
    pub fn cancel_gesture(&mut self) -> bool {
        if !self.machine.is_tracking() {
            return false;
        }
        self.release_other();
        self.previous_active = self.active;
        self.machine.cancel_tracking()
    }

    /// Duration the host should animate the current transition for, derived
    /// from residual distance and `velocity_along` (host units per second
    /// along the transition axis), capped by the configured maximum.
    /// `None` when nothing is animating.
    #[must_use]
    pub fn suggested_duration(&self, velocity_along: f64) -> Option<f64> {
        let velocity_norm = if self.viewport_extent > 0.0 {
            velocity_along.abs() / self.viewport_extent
        } else {
            0.0
        };
        self.machine.suggested_duration(velocity_norm)
    }

    /// Report that the host's transition animation reached its end.
    ///
    /// Returns the machine to idle, notifies did-finish, and applies any
    /// reconcile that was queued while the transition was in flight.
    /// Returns `None` when nothing was animating.
    pub fn finish_animation(
        &mut self,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<Option<Finished>, PagerError> {
        let Some(finished) = self.machine.finish() else {
            return Ok(None);
        };
        let previous = self.previous_active.take();
        delegate.did_finish(true, previous, finished.mode == Mode::Commit);
        if self.pending_reconcile {
            self.pending_reconcile = false;
            self.perform_reconcile(delegate)?;
        }
        Ok(Some(finished))
    }

    // --- Internals --------------------------------------------------------

    fn active_info(&self) -> Option<(AdapterId, S::Item, usize)> {
        let adapter = self.active?;
        let registration = self.tracker.registration(adapter)?;
        Some((adapter, registration.item.clone(), registration.index))
    }

    fn neighbor_item(&self, direction: Direction) -> Option<(S::Item, usize)> {
        let (_, _, index) = self.active_info()?;
        let target = match direction {
            Direction::Forward => index.checked_add(1)?,
            Direction::Reverse => index.checked_sub(1)?,
        };
        let item = self.source.item_at(target)?;
        Some((item, target))
    }

    fn acquire(&mut self, item: &S::Item, index: usize) -> Result<Dequeued, PagerError> {
        let reuse_id = self.source.reuse_id(item, index);
        let dequeued = match self.pool.dequeue(&reuse_id, item) {
            Ok(dequeued) => dequeued,
            Err(err) => {
                tracing::warn!(identifier = %reuse_id, "dequeue failed: identifier unregistered");
                return Err(err.into());
            }
        };
        self.tracker.associate(dequeued.adapter, item.clone(), index);
        self.configure(dequeued.adapter, item, index);
        Ok(dequeued)
    }

    fn configure(&mut self, adapter: AdapterId, item: &S::Item, index: usize) {
        if let Some(adapter) = self.pool.get_mut(adapter) {
            self.source.configure(adapter, item, index);
        }
    }

    /// Realize the candidate adapter for the neighbor in `direction`, when
    /// one exists. Tracking against a boundary leaves the candidate empty.
    fn begin_candidate(
        &mut self,
        direction: Direction,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        debug_assert!(self.other.is_none(), "candidate already realized");
        if let Some((item, index)) = self.neighbor_item(direction) {
            let dequeued = self.acquire(&item, index)?;
            self.other = Some(dequeued.adapter);
            delegate.will_transition(dequeued.adapter, &item);
        }
        Ok(())
    }

    fn release_other(&mut self) {
        if let Some(other) = self.other.take() {
            self.tracker.dissociate(other);
            self.pool.release(other);
        }
    }

    /// Side effects of entering the committing animation: the candidate
    /// becomes active and the outgoing adapter goes back to its pool. The
    /// pool keeps its last-item affinity, so navigating back revives it
    /// untouched.
    fn commit_entry(
        &mut self,
        incoming: AdapterId,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) {
        let outgoing = self.active;
        if let Some(outgoing) = outgoing {
            if outgoing != incoming {
                self.tracker.dissociate(outgoing);
                self.pool.release(outgoing);
            }
        }
        self.active = Some(incoming);
        self.other = None;
        self.previous_active = outgoing;
        self.refresh_indicator(delegate);
    }

    /// Side effects of entering the cancelling animation: the candidate is
    /// released, the active mapping is unchanged.
    fn cancel_entry(&mut self) {
        self.release_other();
        self.previous_active = self.active;
    }

    fn commit_programmatic(
        &mut self,
        incoming: AdapterId,
        item: &S::Item,
        direction: Direction,
        animated: bool,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) {
        delegate.will_transition(incoming, item);
        if animated {
            self.machine.begin_animating(direction, Mode::Commit);
            self.commit_entry(incoming, delegate);
        } else {
            self.commit_entry(incoming, delegate);
            let previous = self.previous_active.take();
            delegate.did_finish(false, previous, true);
        }
    }

    fn perform_reconcile(
        &mut self,
        delegate: &mut impl PagerDelegate<S::Item>,
    ) -> Result<(), PagerError> {
        debug_assert!(self.machine.is_idle(), "reconcile must wait for idle");
        let active_info = self.active_info();
        let outcome = self.tracker.reconcile(
            &self.source,
            active_info.as_ref().map(|(_, item, index)| (item, *index)),
        );
        tracing::debug!(
            released = outcome.released.len(),
            changed = outcome.changed,
            active = ?outcome.active,
            "reconciled data source"
        );
        for adapter in &outcome.released {
            self.pool.release(*adapter);
        }
        if self.active.is_some_and(|a| outcome.released.contains(&a)) {
            self.active = None;
        }
        match outcome.active {
            Some(item) => self.ensure_active(&item)?,
            None => {
                if let Some(adapter) = self.active.take() {
                    self.tracker.dissociate(adapter);
                    self.pool.release(adapter);
                }
            }
        }
        self.refresh_indicator(delegate);
        Ok(())
    }

    /// Make `item` the active page after a reconcile, reusing its on-screen
    /// adapter when it has one and reconfiguring either way.
    fn ensure_active(&mut self, item: &S::Item) -> Result<(), PagerError> {
        let index = self.source.index_of(item).ok_or(PagerError::ObjectNotFound)?;
        match self.tracker.adapter_for(item) {
            Some(adapter) => {
                self.configure(adapter, item, index);
                self.active = Some(adapter);
            }
            None => {
                let dequeued = self.acquire(item, index)?;
                self.active = Some(dequeued.adapter);
            }
        }
        Ok(())
    }

    fn refresh_indicator(&mut self, delegate: &mut impl PagerDelegate<S::Item>) {
        let state = IndicatorState {
            count: self.source.count(),
            position: self.active_index(),
        };
        if state != self.indicator {
            self.indicator = state;
            delegate.indicator_changed(state.count, state.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::NoDelegate;
    use crate::list::PageList;
    use alloc::vec::Vec;
    use flipbook_transition::CommitReason;
    use kurbo::Vec2;

    #[derive(Default)]
    struct Card {
        shown: Option<char>,
        prepared: u32,
    }

    impl flipbook_reuse::Adapter for Card {
        fn prepare_for_reuse(&mut self) {
            self.shown = None;
            self.prepared += 1;
        }
    }

    #[derive(Default)]
    struct Recording {
        will: Vec<AdapterId>,
        finishes: Vec<(bool, Option<AdapterId>, bool)>,
        indicators: Vec<(Option<usize>, Option<usize>)>,
    }

    impl PagerDelegate<char> for Recording {
        fn will_transition(&mut self, pending: AdapterId, _item: &char) {
            self.will.push(pending);
        }

        fn did_finish(&mut self, finished: bool, previous: Option<AdapterId>, completed: bool) {
            self.finishes.push((finished, previous, completed));
        }

        fn indicator_changed(&mut self, count: Option<usize>, position: Option<usize>) {
            self.indicators.push((count, position));
        }
    }

    fn pager(items: &[char]) -> Pager<PageList<char, Card>> {
        let mut list = PageList::new("page", |card: &mut Card, item: &char, _| {
            card.shown = Some(*item);
        });
        list.extend(items.iter().copied());
        let mut pager = Pager::new(
            list,
            PagerConfig {
                viewport_extent: 100.0,
                ..PagerConfig::default()
            },
        );
        pager.register("page", Card::default);
        pager.reload(&mut NoDelegate).unwrap();
        pager
    }

    /// Pan along the horizontal axis: `tx` host units covered, `vx` units
    /// per second at release.
    fn pan(tx: f64, vx: f64) -> PanSample {
        PanSample::new(Vec2::new(tx, 0.0), Vec2::new(vx, 0.0))
    }

    #[test]
    fn reload_presents_the_default_item() {
        let pager = pager(&['a', 'b', 'c']);
        assert_eq!(pager.active_item(), Some(&'a'));
        assert_eq!(pager.active_index(), Some(0));
        let adapter = pager.active_adapter().unwrap();
        assert_eq!(pager.adapter(adapter).unwrap().shown, Some('a'));
        assert_eq!(
            pager.indicator(),
            IndicatorState {
                count: Some(3),
                position: Some(0),
            }
        );
    }

    #[test]
    fn reload_of_an_empty_source_leaves_nothing_active() {
        let pager = pager(&[]);
        assert_eq!(pager.active_adapter(), None);
        assert_eq!(
            pager.indicator(),
            IndicatorState {
                count: Some(0),
                position: None,
            }
        );
    }

    #[test]
    fn reload_without_a_registered_factory_fails() {
        let mut list: PageList<char, Card> = PageList::new("page", |_, _, _| {});
        list.push('a');
        let mut pager = Pager::new(list, PagerConfig::default());
        let err = pager.reload(&mut NoDelegate).unwrap_err();
        assert_eq!(
            err,
            PagerError::Dequeue(DequeueError::Unregistered("page".into()))
        );
    }

    #[test]
    fn set_active_item_to_an_absent_item_changes_nothing() {
        let mut pager = pager(&['a', 'b', 'c']);
        let mut recording = Recording::default();
        let err = pager
            .set_active_item(&'z', false, &mut recording)
            .unwrap_err();

        assert_eq!(err, PagerError::ObjectNotFound);
        assert_eq!(pager.active_item(), Some(&'a'));
        assert!(recording.will.is_empty());
        assert!(recording.finishes.is_empty());
    }

    #[test]
    fn synchronous_set_active_item_commits_immediately() {
        let mut pager = pager(&['a', 'b', 'c']);
        let first = pager.active_adapter().unwrap();
        let mut recording = Recording::default();

        pager.set_active_item(&'c', false, &mut recording).unwrap();

        assert_eq!(pager.active_item(), Some(&'c'));
        assert_eq!(pager.active_index(), Some(2));
        assert!(pager.phase() == Phase::Idle);
        // The outgoing adapter went back to its pool.
        assert!(!pager.pool().is_active(first));
        // Synchronous moves report finished = false, completed = true.
        assert_eq!(recording.finishes.as_slice(), &[(false, Some(first), true)]);
        assert_eq!(recording.indicators.as_slice(), &[(Some(3), Some(2))]);
    }

    #[test]
    fn set_active_item_for_the_active_item_refreshes_in_place() {
        let mut pager = pager(&['a', 'b']);
        let adapter = pager.active_adapter().unwrap();
        pager.adapter_mut(adapter).unwrap().shown = None;
        let mut recording = Recording::default();

        pager.set_active_item(&'a', false, &mut recording).unwrap();

        // Same adapter, reconfigured through the regular path, no
        // transition notifications.
        assert_eq!(pager.active_adapter(), Some(adapter));
        assert_eq!(pager.adapter(adapter).unwrap().shown, Some('a'));
        assert!(recording.will.is_empty());
        assert!(recording.finishes.is_empty());
    }

    #[test]
    fn animated_set_active_item_commits_at_animation_entry() {
        let mut pager = pager(&['a', 'b', 'c']);
        let first = pager.active_adapter().unwrap();
        let mut recording = Recording::default();

        pager.set_active_item(&'b', true, &mut recording).unwrap();

        // Active flips as soon as the animation begins.
        assert_eq!(pager.active_item(), Some(&'b'));
        assert!(pager.is_transitioning());
        assert!(recording.finishes.is_empty());

        let finished = pager.finish_animation(&mut recording).unwrap().unwrap();
        assert_eq!(finished.mode, Mode::Commit);
        assert_eq!(finished.direction, Direction::Forward);
        assert_eq!(recording.finishes.as_slice(), &[(true, Some(first), true)]);
        assert!(pager.phase() == Phase::Idle);
    }

    #[test]
    fn navigation_is_rejected_while_animating() {
        let mut pager = pager(&['a', 'b', 'c']);
        pager.set_active_item(&'b', true, &mut NoDelegate).unwrap();

        let err = pager
            .set_active_item(&'c', false, &mut NoDelegate)
            .unwrap_err();
        assert_eq!(err, PagerError::TransitionInFlight);
        assert_eq!(pager.active_item(), Some(&'b'));
    }

    #[test]
    fn set_active_adapter_moves_focus_to_a_realized_adapter() {
        let mut pager = pager(&['a', 'b', 'c']);
        let first = pager.active_adapter().unwrap();
        let warmed = pager.dequeue_adapter(&'c', 2).unwrap().adapter;
        let mut recording = Recording::default();

        pager
            .set_active_adapter(warmed, Direction::Forward, false, &mut recording)
            .unwrap();
        assert_eq!(pager.active_adapter(), Some(warmed));
        assert_eq!(pager.active_item(), Some(&'c'));

        // The committed move dissociated the outgoing adapter; it can no
        // longer be navigated to directly.
        let err = pager
            .set_active_adapter(first, Direction::Reverse, false, &mut recording)
            .unwrap_err();
        assert_eq!(err, PagerError::ObjectNotFound);
    }

    #[test]
    fn gesture_past_the_completion_ratio_commits() {
        let mut pager = pager(&['a', 'b', 'c']);
        let first = pager.active_adapter().unwrap();
        let mut recording = Recording::default();

        // Drag left 35 of 100 units: toward 'b', past the 0.3 ratio.
        pager.update_gesture(pan(-35.0, 0.0), &mut recording).unwrap();
        let candidate = pager.other_adapter().unwrap();
        assert_eq!(pager.item_for_adapter(candidate), Some(&'b'));
        assert_eq!(recording.will.as_slice(), &[candidate]);

        let decision = pager.end_gesture(pan(-35.0, 0.0), &mut recording).unwrap();
        assert_eq!(decision.mode, Mode::Commit);
        assert_eq!(decision.reason, Some(CommitReason::Ratio));
        assert_eq!(pager.active_item(), Some(&'b'));

        let finished = pager.finish_animation(&mut recording).unwrap().unwrap();
        assert_eq!(finished.mode, Mode::Commit);
        assert_eq!(recording.finishes.as_slice(), &[(true, Some(first), true)]);
    }

    #[test]
    fn gesture_below_both_thresholds_cancels() {
        let mut pager = pager(&['a', 'b', 'c']);
        let mut recording = Recording::default();

        pager.update_gesture(pan(-10.0, 0.0), &mut recording).unwrap();
        let candidate = pager.other_adapter().unwrap();

        let decision = pager.end_gesture(pan(-10.0, 0.0), &mut recording).unwrap();
        assert_eq!(decision.mode, Mode::Cancel);
        assert_eq!(pager.active_item(), Some(&'a'));
        // The candidate went back to its pool.
        assert!(!pager.pool().is_active(candidate));
        assert_eq!(pager.other_adapter(), None);

        pager.finish_animation(&mut recording).unwrap().unwrap();
        let first = pager.active_adapter();
        assert_eq!(recording.finishes.as_slice(), &[(true, first, false)]);
    }

    #[test]
    fn fast_flick_commits_despite_short_distance() {
        let mut pager = pager(&['a', 'b', 'c']);
        let mut recording = Recording::default();

        pager.update_gesture(pan(-5.0, -800.0), &mut recording).unwrap();
        // Released moving left at 800 units/s: velocity toward 'b' crosses
        // the 500 threshold.
        let decision = pager.end_gesture(pan(-5.0, -800.0), &mut recording).unwrap();
        assert_eq!(decision.mode, Mode::Commit);
        assert_eq!(decision.reason, Some(CommitReason::Velocity));
    }

    #[test]
    fn swiping_back_to_the_page_just_left_revives_its_adapter_untouched() {
        let mut pager = pager(&['a', 'b', 'c']);
        let a_adapter = pager.active_adapter().unwrap();
        pager.set_active_item(&'b', false, &mut NoDelegate).unwrap();

        // Swipe back toward 'a': its released adapter still represents it,
        // so it returns without a reuse-preparation step.
        pager.update_gesture(pan(15.0, 0.0), &mut NoDelegate).unwrap();
        let candidate = pager.other_adapter().unwrap();
        assert_eq!(candidate, a_adapter);
        assert_eq!(pager.item_for_adapter(candidate), Some(&'a'));
        assert_eq!(pager.adapter(candidate).unwrap().prepared, 0);

        // Flip forward past the origin without releasing: the candidate
        // switches sides and the idle FIFO serves 'c'.
        pager.update_gesture(pan(-10.0, 0.0), &mut NoDelegate).unwrap();
        let candidate = pager.other_adapter().unwrap();
        assert_eq!(pager.item_for_adapter(candidate), Some(&'c'));
        assert_eq!(pager.item_for_adapter(a_adapter), Some(&'c'));
        assert_eq!(pager.adapter(candidate).unwrap().prepared, 1);
    }

    #[test]
    fn boundary_gesture_tracks_without_a_candidate_and_cancels() {
        let mut pager = pager(&['a', 'b']);
        let mut recording = Recording::default();

        // 'a' is first: there is nothing before it.
        pager.update_gesture(pan(25.0, 0.0), &mut recording).unwrap();
        assert!(pager.is_transitioning());
        assert_eq!(pager.other_adapter(), None);
        assert!(recording.will.is_empty());

        let decision = pager.end_gesture(pan(25.0, 0.0), &mut recording).unwrap();
        assert_eq!(decision.mode, Mode::Cancel);
        pager.finish_animation(&mut recording).unwrap().unwrap();
        assert_eq!(pager.active_item(), Some(&'a'));
    }

    #[test]
    fn mid_gesture_removal_of_the_candidate_cancels_automatically() {
        let mut pager = pager(&['a', 'b', 'c']);
        let mut recording = Recording::default();

        pager.update_gesture(pan(-20.0, 0.0), &mut recording).unwrap();
        let candidate = pager.other_adapter().unwrap();

        // 'b' is removed while the finger is down; the reconcile defers.
        pager.mutate(&mut recording, |list| {
            list.remove_item(&'b');
        }).unwrap();
        assert!(pager.is_transitioning());

        // The next progress update discovers the stale candidate.
        pager.update_gesture(pan(-22.0, 0.0), &mut recording).unwrap();
        assert_eq!(pager.other_adapter(), None);
        assert!(!pager.pool().is_active(candidate));

        // The gesture is already animating its snap-back; releasing the
        // finger has nothing left to decide.
        assert_eq!(pager.end_gesture(pan(-22.0, 0.0), &mut recording), None);

        let finished = pager.finish_animation(&mut recording).unwrap().unwrap();
        assert_eq!(finished.mode, Mode::Cancel);
        assert_eq!(pager.active_item(), Some(&'a'));
        // The deferred reconcile ran on return to idle.
        assert_eq!(pager.indicator().count, Some(2));
    }

    #[test]
    fn cancel_gesture_snaps_back() {
        let mut pager = pager(&['a', 'b']);
        pager.update_gesture(pan(-40.0, 0.0), &mut NoDelegate).unwrap();
        assert!(pager.cancel_gesture());

        let finished = pager.finish_animation(&mut NoDelegate).unwrap().unwrap();
        assert_eq!(finished.mode, Mode::Cancel);
        assert_eq!(pager.active_item(), Some(&'a'));
        assert!(!pager.cancel_gesture());
    }

    #[test]
    fn gestures_are_ignored_while_animating() {
        let mut pager = pager(&['a', 'b', 'c']);
        pager.set_active_item(&'b', true, &mut NoDelegate).unwrap();

        pager.update_gesture(pan(-50.0, 0.0), &mut NoDelegate).unwrap();
        assert_eq!(pager.other_adapter(), None);
        assert_eq!(pager.end_gesture(pan(-50.0, 0.0), &mut NoDelegate), None);
    }

    #[test]
    fn removing_the_active_item_re_homes_to_its_neighbor() {
        let mut pager = pager(&['a', 'b', 'c']);
        pager.set_active_item(&'b', false, &mut NoDelegate).unwrap();

        pager.begin_updates();
        pager.source_mut().remove_item(&'b');
        pager.end_updates(&mut NoDelegate).unwrap();

        // The item now at the old index is the former right neighbor.
        assert_eq!(pager.active_item(), Some(&'c'));
        assert_eq!(pager.active_index(), Some(1));
    }

    #[test]
    fn nested_update_scopes_settle_once() {
        let mut pager = pager(&['a', 'b', 'c']);
        let mut recording = Recording::default();

        pager.begin_updates();
        pager.source_mut().remove_item(&'c');
        pager.begin_updates();
        pager.source_mut().remove_item(&'b');
        pager.end_updates(&mut recording).unwrap();
        // Inner end: nothing settles yet.
        assert!(recording.indicators.is_empty());

        pager.end_updates(&mut recording).unwrap();
        assert_eq!(recording.indicators.as_slice(), &[(Some(1), Some(0))]);
    }

    #[test]
    fn unbalanced_end_updates_is_reported_and_ignored() {
        let mut pager = pager(&['a', 'b']);
        let mut recording = Recording::default();
        pager.end_updates(&mut recording).unwrap();

        assert_eq!(pager.active_item(), Some(&'a'));
        assert!(recording.indicators.is_empty());

        // Batching still works afterwards.
        pager.begin_updates();
        pager.source_mut().push('c');
        pager.end_updates(&mut recording).unwrap();
        assert_eq!(pager.indicator().count, Some(3));
    }

    #[test]
    fn out_of_band_mutation_reconciles_immediately() {
        let mut pager = pager(&['a', 'b']);
        pager.source_mut().push('c');
        assert_eq!(pager.indicator().count, Some(2));

        pager.note_data_changed(&mut NoDelegate).unwrap();
        assert_eq!(pager.indicator().count, Some(3));
    }

    #[test]
    fn reconcile_while_animating_waits_for_idle() {
        let mut pager = pager(&['a', 'b', 'c']);
        pager.set_active_item(&'c', true, &mut NoDelegate).unwrap();

        pager.begin_updates();
        pager.source_mut().remove_item(&'a');
        pager.end_updates(&mut NoDelegate).unwrap();
        // Tracked indices stay as they were while the animation runs.
        assert_eq!(pager.active_index(), Some(2));

        pager.finish_animation(&mut NoDelegate).unwrap().unwrap();
        assert_eq!(pager.active_index(), Some(1));
        assert_eq!(pager.indicator().count, Some(2));
    }

    #[test]
    fn suggested_duration_is_capped_and_velocity_aware() {
        let mut pager = pager(&['a', 'b', 'c']);
        assert_eq!(pager.suggested_duration(0.0), None);

        pager.update_gesture(pan(-50.0, 0.0), &mut NoDelegate).unwrap();
        pager.end_gesture(pan(-50.0, -1000.0), &mut NoDelegate).unwrap();

        // Half the extent remains; 1000 units/s over a 100-unit extent
        // covers it in 0.05s, under the 0.35s cap.
        let duration = pager.suggested_duration(-1000.0).unwrap();
        assert!((duration - 0.05).abs() < 1e-9);
    }
}
