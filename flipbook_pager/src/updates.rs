// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested update scopes with settle-once reconciliation.

/// What an [`UpdateCoordinator::end`] call resolved to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndOutcome {
    /// An inner scope closed; reconciliation stays deferred.
    StillNested,
    /// The outermost scope closed; run reconciliation now.
    Reconcile,
    /// `end` was called with no scope open. Reported and ignored.
    Unbalanced,
}

/// Tracks nested begin/end update scopes and absorbs out-of-band mutation
/// notifications.
///
/// The depth counter is non-negative and reaches zero only at the true
/// outermost `end`, which is the single point where reconciliation runs —
/// the batch-mutation-settle-once strategy. A mutation noted while no scope
/// is open is an implicit single-shot scope: reconciliation runs
/// immediately, because no batching was requested.
#[derive(Clone, Debug, Default)]
pub struct UpdateCoordinator {
    depth: usize,
    had_implicit_change: bool,
}

impl UpdateCoordinator {
    /// Create a coordinator with no scope open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope. Scopes nest; only the matching outermost
    /// [`end`](Self::end) reconciles.
    pub fn begin(&mut self) {
        self.depth += 1;
    }

    /// Close a scope.
    ///
    /// Returns [`EndOutcome::Reconcile`] exactly when the outermost scope
    /// closed. Calling with no scope open is a programmer error, reported as
    /// [`EndOutcome::Unbalanced`] and otherwise ignored.
    pub fn end(&mut self) -> EndOutcome {
        if self.depth == 0 {
            return EndOutcome::Unbalanced;
        }
        self.depth -= 1;
        if self.depth == 0 {
            self.had_implicit_change = false;
            EndOutcome::Reconcile
        } else {
            EndOutcome::StillNested
        }
    }

    /// Record a mutation notification.
    ///
    /// Returns `true` when no scope is open: the change was implicit and the
    /// caller must reconcile immediately. Inside a scope the change is
    /// absorbed into the batch and `false` is returned.
    pub fn note_mutation(&mut self) -> bool {
        if self.depth == 0 {
            self.had_implicit_change = true;
            true
        } else {
            false
        }
    }

    /// Whether the most recent reconciliation was triggered by a mutation
    /// outside any scope. Cleared when a batched scope settles.
    #[must_use]
    pub fn had_implicit_change(&self) -> bool {
        self.had_implicit_change
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether at least one scope is open.
    #[must_use]
    pub fn is_batching(&self) -> bool {
        self.depth > 0
    }
}
