#![forbid(unsafe_code)]

//! Auto-advance scheduling.
//!
//! [`Autoplay`] decides *when* a carousel should receive `tick()`. It is the
//! timer-owning collaborator: the controller knows nothing about hover or
//! intervals.
//!
//! # Invariants
//!
//! 1. `poll` fires at most once per call and never more often than once per
//!    interval.
//! 2. `poll` never fires while disabled or hovered.
//! 3. After `restart(now)` (manual navigation) the next fire is a full
//!    interval away.
//! 4. Leaving hover restarts the countdown rather than firing immediately.
//!
//! # Failure Modes
//!
//! - A caller that polls late (e.g. a stalled frame loop) gets one fire, not a
//!   burst; the next fire is scheduled an interval after the late poll.

use std::time::Duration;

use reel_core::CarouselConfig;

/// Interval timer with a hover pause.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    enabled: bool,
    hovered: bool,
    next_due: Option<Duration>,
}

impl Autoplay {
    /// Create a timer. The first fire is one interval after the first poll.
    #[must_use]
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            interval,
            enabled: enabled && !interval.is_zero(),
            hovered: false,
            next_due: None,
        }
    }

    /// Timer matching a carousel's `auto_advance` settings.
    #[must_use]
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.auto_advance_interval, config.auto_advance)
    }

    /// Returns `true` when a tick is due at `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.enabled || self.hovered {
            return false;
        }
        let due = *self.next_due.get_or_insert(now.saturating_add(self.interval));
        if now < due {
            return false;
        }
        self.next_due = Some(now.saturating_add(self.interval));
        tracing::trace!(message = "autoplay.fire", now_ms = now.as_millis() as u64);
        true
    }

    /// Push the next fire a full interval past `now`.
    pub fn restart(&mut self, now: Duration) {
        if self.enabled {
            self.next_due = Some(now.saturating_add(self.interval));
        }
    }

    /// Update the hover pause.
    pub fn set_hovered(&mut self, hovered: bool, now: Duration) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        tracing::debug!(message = "autoplay.hover", hovered);
        if !hovered {
            self.restart(now);
        }
    }

    /// Enable or disable the timer.
    pub fn set_enabled(&mut self, enabled: bool, now: Duration) {
        self.enabled = enabled && !self.interval.is_zero();
        self.next_due = None;
        if self.enabled {
            self.restart(now);
        }
    }

    /// Whether the timer is paused by hover.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the timer is enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured period.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time until the next fire, if one is scheduled and not paused.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        if !self.enabled || self.hovered {
            return None;
        }
        self.next_due.map(|due| due.saturating_sub(now))
    }
}
