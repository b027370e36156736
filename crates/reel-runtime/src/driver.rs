#![forbid(unsafe_code)]

//! Message-driven carousel host.
//!
//! [`CarouselDriver`] is what a view owns. It wraps a [`Carousel`] together
//! with the collaborators the controller deliberately lacks: an [`Autoplay`]
//! timer with hover pause, a [`VelocityTracker`] for pointer drags, and an
//! optional synthetic transition timer for renderers that cannot report when
//! a slide animation ends.
//!
//! Input arrives as [`CarouselMsg`] values stamped with monotonic time;
//! [`update`](CarouselDriver::update) returns the [`CarouselEvent`]s a
//! renderer needs to react to.
//!
//! # Ordering on `Frame`
//!
//! 1. Synthetic transition end (if configured and elapsed).
//! 2. Reset grace window (`settle`).
//! 3. Auto-advance poll, only when the carousel is idle.
//!
//! Manual navigation and finished drags restart the auto-advance countdown.

use std::time::Duration;

use reel_core::{Carousel, CarouselConfig, CarouselPhase, Motion, VelocityTracker};

use crate::autoplay::Autoplay;

/// Default synthetic slide duration.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Input to a [`CarouselDriver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselMsg {
    /// "Next" arrow.
    Next,
    /// "Previous" arrow.
    Previous,
    /// Thumbnail or indicator dot for an item.
    Select(usize),
    /// Raw index jump.
    JumpTo(isize),
    /// External timer fired. Ignored while hovered.
    Tick,
    /// Pointer entered (`true`) or left (`false`) the carousel.
    Hover(bool),
    /// Pointer pressed at this horizontal position.
    PointerDown(f32),
    /// Pointer moved to this horizontal position.
    PointerMove(f32),
    /// Pointer released at this horizontal position.
    PointerUp(f32),
    /// Gesture aborted (focus loss, escape).
    PointerCancel,
    /// Renderer finished animating to the current index.
    TransitionEnd,
    /// Frame callback; drives timers.
    Frame,
}

/// Output of a [`CarouselDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The index changed.
    Moved {
        /// Previous index.
        from: isize,
        /// New index.
        to: isize,
        /// How to get there.
        motion: Motion,
    },
    /// A drag ended without navigating.
    SnappedBack {
        /// Index returned to.
        index: isize,
    },
    /// The seamless loop snapped from the duplicate slot back to `0`.
    ResetCommitted,
    /// The reset grace window elapsed; input is accepted again.
    Settled,
}

/// Host-side options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// When set, `Frame` synthesizes `TransitionEnd` this long after a slide
    /// started. Leave `None` when the renderer reports it.
    pub transition: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            transition: Some(DEFAULT_TRANSITION),
        }
    }
}

/// A carousel with its timer and gesture collaborators.
pub struct CarouselDriver<T> {
    carousel: Carousel<T>,
    autoplay: Autoplay,
    velocity: VelocityTracker,
    pointer_origin: Option<f32>,
    slide_started: Option<Duration>,
    config: DriverConfig,
}

impl<T> std::fmt::Debug for CarouselDriver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselDriver")
            .field("carousel", &self.carousel)
            .field("autoplay", &self.autoplay)
            .field("pointer_origin", &self.pointer_origin)
            .field("slide_started", &self.slide_started)
            .finish()
    }
}

impl<T> CarouselDriver<T> {
    /// Create a driver with default host options.
    #[must_use]
    pub fn new(items: impl Into<Box<[T]>>, config: CarouselConfig) -> Self {
        Self::with_driver_config(items, config, DriverConfig::default())
    }

    /// Create a driver with explicit host options.
    #[must_use]
    pub fn with_driver_config(
        items: impl Into<Box<[T]>>,
        config: CarouselConfig,
        driver: DriverConfig,
    ) -> Self {
        let autoplay = Autoplay::from_config(&config);
        let carousel = Carousel::new(items, config);
        tracing::info!(
            message = "driver.new",
            len = carousel.len(),
            policy = carousel.config().boundary_policy.as_str(),
            autoplay = autoplay.is_enabled(),
            synthetic_transition_ms = driver.transition.map(|d| d.as_millis() as u64)
        );
        Self {
            carousel,
            autoplay,
            velocity: VelocityTracker::new(),
            pointer_origin: None,
            slide_started: None,
            config: driver,
        }
    }

    /// The wrapped controller.
    #[inline]
    #[must_use]
    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    /// The auto-advance timer.
    #[inline]
    #[must_use]
    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Whether a slide animation is believed to be running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.slide_started.is_some()
    }

    /// Apply one message at monotonic time `now`.
    pub fn update(&mut self, msg: CarouselMsg, now: Duration) -> Vec<CarouselEvent> {
        let mut out = Vec::with_capacity(2);
        match msg {
            CarouselMsg::Next => {
                self.navigate(now, &mut out, Carousel::next);
            }
            CarouselMsg::Previous => {
                self.navigate(now, &mut out, Carousel::previous);
            }
            CarouselMsg::Select(item) => {
                self.navigate(now, &mut out, |c| c.select(item));
            }
            CarouselMsg::JumpTo(index) => {
                self.navigate(now, &mut out, |c| c.jump_to(index));
            }
            CarouselMsg::Tick => {
                if !self.autoplay.is_hovered() {
                    self.auto_advance(now, &mut out);
                }
            }
            CarouselMsg::Hover(hovered) => self.autoplay.set_hovered(hovered, now),
            CarouselMsg::PointerDown(x) => self.on_pointer_down(x, now),
            CarouselMsg::PointerMove(x) => self.on_pointer_move(x, now),
            CarouselMsg::PointerUp(x) => self.on_pointer_up(x, now, &mut out),
            CarouselMsg::PointerCancel => {
                if self.pointer_origin.take().is_some() {
                    self.velocity.reset();
                    let index = self.carousel.cancel_drag();
                    tracing::debug!(message = "driver.drag_cancel", index);
                    out.push(CarouselEvent::SnappedBack { index });
                }
            }
            CarouselMsg::TransitionEnd => self.on_transition_end(now, &mut out),
            CarouselMsg::Frame => self.on_frame(now, &mut out),
        }
        out
    }

    // -- Handlers -----------------------------------------------------------

    fn navigate(
        &mut self,
        now: Duration,
        out: &mut Vec<CarouselEvent>,
        op: impl FnOnce(&mut Carousel<T>) -> isize,
    ) {
        let from = self.carousel.index();
        let to = op(&mut self.carousel);
        if self.record_move(from, to, now, out) {
            self.autoplay.restart(now);
        }
    }

    fn auto_advance(&mut self, now: Duration, out: &mut Vec<CarouselEvent>) {
        let from = self.carousel.index();
        let to = self.carousel.tick();
        self.record_move(from, to, now, out);
    }

    fn on_pointer_down(&mut self, x: f32, now: Duration) {
        if !self.carousel.begin_drag() {
            tracing::trace!(message = "driver.drag_rejected", phase = ?self.carousel.phase());
            return;
        }
        self.pointer_origin = Some(x);
        self.velocity.reset();
        self.velocity.add(now, x);
    }

    fn on_pointer_move(&mut self, x: f32, now: Duration) {
        let Some(origin) = self.pointer_origin else {
            return;
        };
        self.velocity.add(now, x);
        self.carousel.update_drag(x - origin);
        tracing::trace!(message = "driver.drag_move", displacement = x - origin);
    }

    fn on_pointer_up(&mut self, x: f32, now: Duration, out: &mut Vec<CarouselEvent>) {
        let Some(origin) = self.pointer_origin.take() else {
            return;
        };
        self.velocity.add(now, x);
        let velocity = self.velocity.velocity();
        self.velocity.reset();

        let from = self.carousel.index();
        let outcome = self.carousel.end_drag(x - origin, velocity);
        tracing::debug!(
            message = "driver.drag_end",
            displacement = x - origin,
            velocity,
            decision = ?outcome.decision,
            index = outcome.index
        );
        if outcome.moved {
            self.record_move(from, outcome.index, now, out);
        } else {
            out.push(CarouselEvent::SnappedBack {
                index: outcome.index,
            });
        }
        self.autoplay.restart(now);
    }

    fn on_transition_end(&mut self, now: Duration, out: &mut Vec<CarouselEvent>) {
        self.slide_started = None;
        if self.carousel.end_transition(now) {
            out.push(CarouselEvent::ResetCommitted);
        }
    }

    fn on_frame(&mut self, now: Duration, out: &mut Vec<CarouselEvent>) {
        if let (Some(started), Some(transition)) = (self.slide_started, self.config.transition)
            && now.saturating_sub(started) >= transition
        {
            self.on_transition_end(now, out);
        }
        if self.carousel.settle(now) {
            tracing::debug!(message = "driver.settled", index = self.carousel.index());
            out.push(CarouselEvent::Settled);
        }
        if self.carousel.phase() == CarouselPhase::Idle && self.autoplay.poll(now) {
            self.auto_advance(now, out);
        }
    }

    fn record_move(
        &mut self,
        from: isize,
        to: isize,
        now: Duration,
        out: &mut Vec<CarouselEvent>,
    ) -> bool {
        if from == to {
            return false;
        }
        let motion = self.carousel.motion();
        self.slide_started = match motion {
            Motion::Slide => Some(now),
            Motion::Snap => None,
        };
        out.push(CarouselEvent::Moved { from, to, motion });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::BoundaryPolicy;

    const MS_16: Duration = Duration::from_millis(16);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn projects() -> Vec<&'static str> {
        vec!["harbor", "lumen", "atlas"]
    }

    #[test]
    fn manual_next_emits_moved() {
        let mut d = CarouselDriver::new(projects(), CarouselConfig::featured_projects());
        let events = d.update(CarouselMsg::Next, ms(0));
        assert_eq!(
            events,
            vec![CarouselEvent::Moved {
                from: 0,
                to: 1,
                motion: Motion::Slide
            }]
        );
        assert!(d.is_animating());
    }

    #[test]
    fn clamped_next_at_end_emits_nothing() {
        let mut d = CarouselDriver::new(projects(), CarouselConfig::featured_projects());
        d.update(CarouselMsg::JumpTo(2), ms(0));
        assert!(d.update(CarouselMsg::Next, ms(10)).is_empty());
    }

    #[test]
    fn tick_ignored_while_hovered() {
        let config = CarouselConfig::default()
            .with_boundary_policy(BoundaryPolicy::WrapAround)
            .with_auto_advance(true);
        let mut d = CarouselDriver::new(projects(), config);
        d.update(CarouselMsg::Hover(true), ms(0));
        assert!(d.update(CarouselMsg::Tick, ms(10)).is_empty());
        d.update(CarouselMsg::Hover(false), ms(20));
        assert_eq!(d.update(CarouselMsg::Tick, ms(30)).len(), 1);
    }

    #[test]
    fn pointer_fling_advances() {
        let mut d = CarouselDriver::new(projects(), CarouselConfig::featured_projects());
        d.update(CarouselMsg::PointerDown(300.0), ms(0));
        assert!(d.carousel().is_dragging());
        d.update(CarouselMsg::PointerMove(280.0), ms(10));
        d.update(CarouselMsg::PointerMove(250.0), ms(20));
        let events = d.update(CarouselMsg::PointerUp(220.0), ms(30));
        assert_eq!(
            events,
            vec![CarouselEvent::Moved {
                from: 0,
                to: 1,
                motion: Motion::Slide
            }]
        );
    }

    #[test]
    fn pointer_jitter_snaps_back() {
        let mut d = CarouselDriver::new(projects(), CarouselConfig::featured_projects());
        d.update(CarouselMsg::PointerDown(300.0), ms(0));
        d.update(CarouselMsg::PointerMove(298.0), ms(100));
        let events = d.update(CarouselMsg::PointerUp(297.0), ms(200));
        assert_eq!(events, vec![CarouselEvent::SnappedBack { index: 0 }]);
    }

    #[test]
    fn pointer_cancel_snaps_back() {
        let mut d = CarouselDriver::new(projects(), CarouselConfig::featured_projects());
        d.update(CarouselMsg::PointerDown(300.0), ms(0));
        let events = d.update(CarouselMsg::PointerCancel, ms(10));
        assert_eq!(events, vec![CarouselEvent::SnappedBack { index: 0 }]);
        assert!(!d.carousel().is_dragging());
        assert!(d.update(CarouselMsg::PointerUp(0.0), ms(20)).is_empty());
    }

    #[test]
    fn frames_drive_seamless_loop() {
        let config = CarouselConfig::showcase_loop().with_auto_advance_interval(ms(1000));
        let mut d = CarouselDriver::new(vec!['a', 'b'], config);
        let mut now = Duration::ZERO;
        let mut events = Vec::new();
        while now <= ms(2600) {
            events.extend(d.update(CarouselMsg::Frame, now));
            now += MS_16;
        }
        // 1s: 0 -> 1, 2s: 1 -> 2 (duplicate), 2.5s: reset, 2.55s: settled.
        assert!(events.contains(&CarouselEvent::Moved {
            from: 1,
            to: 2,
            motion: Motion::Slide
        }));
        assert!(events.contains(&CarouselEvent::ResetCommitted));
        assert!(events.contains(&CarouselEvent::Settled));
        assert_eq!(d.carousel().index(), 0);
        assert_eq!(d.carousel().phase(), CarouselPhase::Idle);
    }

    #[test]
    fn renderer_reported_transition_end() {
        let config = CarouselConfig::showcase_loop().with_auto_advance(false);
        let mut d = CarouselDriver::with_driver_config(
            vec![1, 2],
            config,
            DriverConfig { transition: None },
        );
        d.update(CarouselMsg::Next, ms(0));
        d.update(CarouselMsg::Next, ms(10));
        assert_eq!(d.carousel().index(), 2);
        // Without a synthetic timer, frames alone never reset.
        assert!(d.update(CarouselMsg::Frame, ms(10_000)).is_empty());
        let events = d.update(CarouselMsg::TransitionEnd, ms(10_001));
        assert_eq!(events, vec![CarouselEvent::ResetCommitted]);
        assert_eq!(d.update(CarouselMsg::Frame, ms(10_100)), vec![CarouselEvent::Settled]);
    }

    #[test]
    fn manual_navigation_restarts_autoplay() {
        let config = CarouselConfig::showcase_loop().with_auto_advance_interval(ms(1000));
        let mut d = CarouselDriver::new(vec![1, 2, 3], config);
        d.update(CarouselMsg::Frame, ms(0));
        d.update(CarouselMsg::Next, ms(900));
        // Would have fired at 1000 without the restart.
        let events = d.update(CarouselMsg::Frame, ms(1000));
        assert!(events.is_empty());
        assert_eq!(d.autoplay().remaining(ms(1000)), Some(ms(900)));
    }
}
