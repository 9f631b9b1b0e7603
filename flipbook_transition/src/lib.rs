// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipbook Transition: the page-transition state machine.
//!
//! A page transition moves focus from an *active* page to an adjacent
//! *other* page, driven either by a pan gesture or programmatically. This
//! crate models that interaction as a small, pure state machine plus the
//! gesture geometry needed to feed it:
//!
//! - [`PanSample`] and [`Orientation`]: convert a 2D pan translation and
//!   velocity into a signed ratio and an axis velocity.
//! - [`Direction`]: which neighbor a transition moves focus toward.
//! - [`TransitionMachine`]: phases [`Phase::Idle`] → [`Phase::Tracking`] →
//!   [`Phase::Animating`] → back to [`Phase::Idle`], with the commit/cancel
//!   decision applied at gesture release.
//!
//! The machine holds no references to items or adapters and performs no
//! timing of its own; the host owns the animation clock and reports
//! completion via [`TransitionMachine::finish`]. Integration with adapter
//! pools and data sources lives one layer up, in `flipbook_pager`.
//!
//! ## Commit decision
//!
//! Releasing a tracked gesture commits when the accumulated progress has
//! reached the configured completion ratio (default `0.3`, boundary
//! inclusive) **or** when the velocity toward the travel direction has
//! reached the velocity threshold — whichever fires. When both thresholds
//! are crossed on the same release, the decision is attributed to velocity,
//! which reflects user intent more directly during a fast flick and drives
//! a shorter animation via [`TransitionMachine::suggested_duration`].
//!
//! ```rust
//! use flipbook_transition::{Direction, Mode, TransitionConfig, TransitionMachine};
//!
//! let mut machine = TransitionMachine::new(TransitionConfig::default());
//! machine.begin_tracking(Direction::Forward);
//! machine.track(Direction::Forward, 0.35);
//!
//! // Past the 0.3 completion ratio: the release commits.
//! let decision = machine.release(0.0).unwrap();
//! assert_eq!(decision.mode, Mode::Commit);
//!
//! // The host animates, then reports completion.
//! let finished = machine.finish().unwrap();
//! assert_eq!(finished.mode, Mode::Commit);
//! assert!(machine.is_idle());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod gesture;
mod machine;

pub use gesture::{Direction, Orientation, PanSample};
pub use machine::{
    CommitReason, Decision, Finished, Mode, Phase, TransitionConfig, TransitionMachine,
};
