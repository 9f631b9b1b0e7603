// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture geometry: axis extraction and direction conventions.

use kurbo::Vec2;

/// Axis along which pages transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Pages move along the horizontal screen dimension.
    Horizontal,
    /// Pages move along the vertical screen dimension.
    Vertical,
}

impl Orientation {
    /// Component of `v` along this axis.
    #[must_use]
    pub fn along(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }
}

/// Which neighbor a transition moves focus toward.
///
/// `Forward` targets the item at the next higher index, `Reverse` the next
/// lower one. Dragging content toward the axis origin (negative translation)
/// reveals the next page, so negative translation maps to `Forward`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the item after the active one.
    Forward,
    /// Toward the item before the active one.
    Reverse,
}

impl Direction {
    /// Direction implied by a signed translation ratio, or `None` for zero.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Option<Self> {
        if ratio < 0.0 {
            Some(Self::Forward)
        } else if ratio > 0.0 {
            Some(Self::Reverse)
        } else {
            None
        }
    }

    /// The sign translations carry when moving in this direction.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Reverse => 1.0,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// One pan gesture observation: accumulated translation and instantaneous
/// velocity, both in host units (typically logical pixels, and pixels per
/// second).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanSample {
    /// Translation accumulated since the gesture began.
    pub translation: Vec2,
    /// Instantaneous velocity of the pointer.
    pub velocity: Vec2,
}

impl PanSample {
    /// Bundle a translation and velocity pair.
    #[must_use]
    pub const fn new(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            translation,
            velocity,
        }
    }

    /// Signed translation ratio along `orientation`, normalized by the
    /// transition-axis `extent`.
    ///
    /// A zero or negative extent yields `0.0` rather than an unbounded
    /// ratio.
    #[must_use]
    pub fn ratio(&self, orientation: Orientation, extent: f64) -> f64 {
        if extent <= 0.0 {
            return 0.0;
        }
        orientation.along(self.translation) / extent
    }

    /// Signed velocity component along `orientation`, in host units per
    /// second.
    #[must_use]
    pub fn velocity_along(&self, orientation: Orientation) -> f64 {
        orientation.along(self.velocity)
    }

    /// Velocity toward `direction` along `orientation`; negative when the
    /// pointer is moving away from that direction.
    #[must_use]
    pub fn velocity_toward(&self, orientation: Orientation, direction: Direction) -> f64 {
        self.velocity_along(orientation) * direction.sign()
    }
}
