#![forbid(unsafe_code)]

//! Drag evaluation: turns a finished gesture into a navigation decision.
//!
//! The controller does not track pointers. The caller reports a net
//! displacement and a release velocity; [`DragThresholds::decide`] maps that
//! [`DragSample`] to a [`DragDecision`]. [`VelocityTracker`] is provided for
//! callers that only have timestamped positions.
//!
//! # Sign convention
//!
//! Content follows the pointer. Dragging left (negative displacement) pulls
//! the next item into view, so negative means [`DragDecision::Advance`].
//!
//! # Invariants
//!
//! 1. A velocity strictly above the velocity threshold decides the direction,
//!    even if the displacement points the other way (a reversed fling wins).
//! 2. Otherwise a displacement strictly above the distance threshold decides.
//! 3. Zero displacement and zero velocity always snap back, for any thresholds.
//! 4. Non-finite samples snap back.
//!
//! # Failure Modes
//!
//! - Timestamps that go backwards reset the velocity tracker rather than
//!   producing a negative time delta.

use std::collections::VecDeque;
use std::time::Duration;

use crate::config::{DEFAULT_DRAG_DISTANCE_THRESHOLD, DEFAULT_DRAG_VELOCITY_THRESHOLD};

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// What a finished drag should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    /// Commit a step forward.
    Advance,
    /// Commit a step backward.
    Retreat,
    /// Return to the pre-drag index.
    SnapBack,
}

/// Net movement of one gesture, sampled at release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    /// Net displacement since drag start (logical pixels).
    pub displacement: f32,
    /// Release velocity (logical pixels / second).
    pub velocity: f32,
}

impl DragSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(displacement: f32, velocity: f32) -> Self {
        Self {
            displacement,
            velocity,
        }
    }
}

/// Distance and velocity thresholds for committing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    /// Minimum absolute displacement (exclusive).
    pub distance: f32,
    /// Minimum absolute velocity (exclusive).
    pub velocity: f32,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_DISTANCE_THRESHOLD, DEFAULT_DRAG_VELOCITY_THRESHOLD)
    }
}

impl DragThresholds {
    /// Create thresholds.
    #[must_use]
    pub const fn new(distance: f32, velocity: f32) -> Self {
        Self { distance, velocity }
    }

    /// Decide what a released gesture commits to.
    #[must_use]
    pub fn decide(&self, sample: DragSample) -> DragDecision {
        let DragSample {
            displacement,
            velocity,
        } = sample;
        if !displacement.is_finite() || !velocity.is_finite() {
            return DragDecision::SnapBack;
        }
        // Negative or NaN thresholds behave as zero.
        if velocity.abs() > self.velocity.max(0.0) {
            return direction(velocity);
        }
        if displacement.abs() > self.distance.max(0.0) {
            return direction(displacement);
        }
        DragDecision::SnapBack
    }
}

#[inline]
fn direction(signed: f32) -> DragDecision {
    if signed < 0.0 {
        DragDecision::Advance
    } else if signed > 0.0 {
        DragDecision::Retreat
    } else {
        DragDecision::SnapBack
    }
}

// ---------------------------------------------------------------------------
// Velocity estimation
// ---------------------------------------------------------------------------

/// Number of samples retained.
const HISTORY_SIZE: usize = 20;

/// Only samples this close to the newest one contribute.
const HORIZON: Duration = Duration::from_millis(100);

/// A gap this long between samples means the pointer stopped.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct PositionAt {
    at: Duration,
    position: f32,
}

/// 1D release-velocity estimator over timestamped positions.
///
/// Fits a least-squares line through the samples within the last 100ms and
/// reports its slope in units per second. A pause longer than 40ms between
/// samples discards everything before it, so a drag that stops before release
/// reports near-zero velocity.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<PositionAt>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Record `position` at monotonic time `at`.
    pub fn add(&mut self, at: Duration, position: f32) {
        if !position.is_finite() {
            return;
        }
        if self.samples.back().is_some_and(|last| at < last.at) {
            self.samples.clear();
        }
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(PositionAt { at, position });
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimated velocity in units per second. Zero with fewer than two
    /// usable samples.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples.back().copied() else {
            return 0.0;
        };

        let mut window: Vec<PositionAt> = Vec::with_capacity(self.samples.len());
        let mut prev_at = newest.at;
        for sample in self.samples.iter().rev() {
            if newest.at - sample.at > HORIZON || prev_at - sample.at > ASSUME_STOPPED {
                break;
            }
            window.push(*sample);
            prev_at = sample.at;
        }
        if window.len() < 2 {
            return 0.0;
        }

        // x: seconds relative to newest (<= 0), y: position.
        let n = window.len() as f64;
        let (mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for s in &window {
            let x = -(newest.at - s.at).as_secs_f64();
            let y = f64::from(s.position);
            sx += x;
            sy += y;
            sxx += x * x;
            sxy += x * y;
        }
        let denom = n * sxx - sx * sx;
        if denom.abs() < f64::EPSILON {
            return 0.0;
        }
        ((n * sxy - sx * sy) / denom) as f32
    }

    /// Drop all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
