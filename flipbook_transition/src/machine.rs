// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition phases and the commit/cancel decision.

use crate::gesture::Direction;

/// Thresholds and timing limits for transitions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Fraction of the transition-axis extent a gesture must cover for its
    /// release to commit. Boundary inclusive.
    pub completion_ratio: f64,
    /// Velocity toward the travel direction (host units per second) at which
    /// a release commits regardless of covered distance.
    pub velocity_threshold: f64,
    /// Upper bound on the duration of any transition animation, in seconds.
    /// Gesture-driven transitions may run shorter; see
    /// [`TransitionMachine::suggested_duration`].
    pub max_duration: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            completion_ratio: 0.3,
            velocity_threshold: 500.0,
            max_duration: 0.35,
        }
    }
}

/// Terminal outcome of an in-flight transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The other page becomes active.
    Commit,
    /// Focus stays on the active page.
    Cancel,
}

/// Which threshold produced a commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommitReason {
    /// The velocity threshold was crossed. Wins when both thresholds cross
    /// on the same release.
    Velocity,
    /// The completion ratio was covered.
    Ratio,
}

/// Outcome of releasing a tracked gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Whether the release commits or cancels.
    pub mode: Mode,
    /// The threshold that fired, `None` for cancels.
    pub reason: Option<CommitReason>,
}

/// A transition that has reached its end and returned the machine to
/// [`Phase::Idle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Finished {
    /// Direction the transition was moving in.
    pub direction: Direction,
    /// Whether it committed or cancelled.
    pub mode: Mode,
}

/// Current state of the transition machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Phase {
    /// No transition in flight.
    Idle,
    /// A gesture is in progress and has not yet been released.
    Tracking {
        /// Neighbor the gesture is currently moving toward. May flip while
        /// tracking (a re-entrant swipe).
        direction: Direction,
        /// Normalized progress toward `direction`, non-negative.
        progress: f64,
    },
    /// The terminal animation is running; only natural completion leads out.
    Animating {
        /// Neighbor the transition was moving toward.
        direction: Direction,
        /// Whether the animation is committing or snapping back.
        mode: Mode,
        /// Progress at the moment the animation began, used for duration
        /// derivation.
        from_progress: f64,
    },
}

/// The gesture/programmatic transition state machine.
///
/// Drives `Idle → Tracking → Animating → Idle` for gestures, and
/// `Idle → Animating → Idle` for programmatic moves. All timing is owned by
/// the host: the machine decides *whether* and *how long*, the host decides
/// *when it is over* by calling [`TransitionMachine::finish`].
///
/// Progress updates are idempotent: re-reporting the same progress has no
/// effect beyond storing it, so hosts may re-evaluate per frame.
#[derive(Clone, Debug)]
pub struct TransitionMachine {
    config: TransitionConfig,
    phase: Phase,
}

impl TransitionMachine {
    /// Create an idle machine with the given thresholds.
    #[must_use]
    pub const fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// The configured thresholds.
    #[must_use]
    pub const fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Exclusive access to the thresholds. Takes effect from the next
    /// decision; an in-flight phase is not re-evaluated.
    pub fn config_mut(&mut self) -> &mut TransitionConfig {
        &mut self.config
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether no transition is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Whether a gesture is being tracked.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(self.phase, Phase::Tracking { .. })
    }

    /// Whether the terminal animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    /// Enter [`Phase::Tracking`] from [`Phase::Idle`].
    ///
    /// Returns `false` without effect when a transition is already in
    /// flight.
    pub fn begin_tracking(&mut self, direction: Direction) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = Phase::Tracking {
            direction,
            progress: 0.0,
        };
        true
    }

    /// Update the tracked direction and progress.
    ///
    /// Negative progress is clamped to zero. Returns `false` without effect
    /// when the machine is not tracking.
    pub fn track(&mut self, direction: Direction, progress: f64) -> bool {
        if !self.is_tracking() {
            return false;
        }
        self.phase = Phase::Tracking {
            direction,
            progress: progress.max(0.0),
        };
        true
    }

    /// Release the tracked gesture and decide its outcome.
    ///
    /// `velocity_toward` is the release velocity toward the travel
    /// direction (see `PanSample::velocity_toward`); values away from the
    /// travel direction are negative and can never satisfy the velocity
    /// threshold. Commits when progress reached the completion ratio or the
    /// velocity threshold was crossed; the velocity reason wins ties.
    ///
    /// Returns `None` without effect when the machine is not tracking.
    pub fn release(&mut self, velocity_toward: f64) -> Option<Decision> {
        let Phase::Tracking {
            direction,
            progress,
        } = self.phase
        else {
            return None;
        };

        let velocity_met = velocity_toward >= self.config.velocity_threshold;
        let ratio_met = progress >= self.config.completion_ratio;
        let decision = if velocity_met {
            Decision {
                mode: Mode::Commit,
                reason: Some(CommitReason::Velocity),
            }
        } else if ratio_met {
            Decision {
                mode: Mode::Commit,
                reason: Some(CommitReason::Ratio),
            }
        } else {
            Decision {
                mode: Mode::Cancel,
                reason: None,
            }
        };

        self.phase = Phase::Animating {
            direction,
            mode: decision.mode,
            from_progress: progress,
        };
        Some(decision)
    }

    /// Cancel a tracked gesture outright, entering the snap-back animation.
    ///
    /// This is the path taken when the item under transition is discovered
    /// absent from the data source mid-gesture. Returns `false` without
    /// effect when the machine is not tracking.
    pub fn cancel_tracking(&mut self) -> bool {
        let Phase::Tracking {
            direction,
            progress,
        } = self.phase
        else {
            return false;
        };
        self.phase = Phase::Animating {
            direction,
            mode: Mode::Cancel,
            from_progress: progress,
        };
        true
    }

    /// Enter [`Phase::Animating`] directly from [`Phase::Idle`], bypassing
    /// tracking. Used for programmatic navigation.
    ///
    /// Returns `false` without effect when a transition is already in
    /// flight.
    pub fn begin_animating(&mut self, direction: Direction, mode: Mode) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = Phase::Animating {
            direction,
            mode,
            from_progress: 0.0,
        };
        true
    }

    /// Report that the host's animation reached its end, returning the
    /// machine to [`Phase::Idle`].
    ///
    /// Returns `None` without effect when the machine is not animating.
    pub fn finish(&mut self) -> Option<Finished> {
        let Phase::Animating {
            direction, mode, ..
        } = self.phase
        else {
            return None;
        };
        self.phase = Phase::Idle;
        Some(Finished { direction, mode })
    }

    /// Duration for the current animation, derived from the residual
    /// distance and the normalized release velocity.
    ///
    /// `velocity_norm` is progress units per second (axis velocity divided
    /// by the axis extent); pass `0.0` when no gesture velocity applies.
    /// The result is proportional to the distance still to cover and
    /// shortens further when the velocity would cover it faster, capped by
    /// [`TransitionConfig::max_duration`]. Returns `None` when the machine
    /// is not animating.
    #[must_use]
    pub fn suggested_duration(&self, velocity_norm: f64) -> Option<f64> {
        let Phase::Animating {
            mode,
            from_progress,
            ..
        } = self.phase
        else {
            return None;
        };
        let remaining = match mode {
            Mode::Commit => (1.0 - from_progress).clamp(0.0, 1.0),
            Mode::Cancel => from_progress.clamp(0.0, 1.0),
        };
        let mut duration = self.config.max_duration * remaining;
        if velocity_norm > 0.0 {
            duration = duration.min(remaining / velocity_norm);
        }
        Some(duration.min(self.config.max_duration))
    }
}

impl Default for TransitionMachine {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
