#![forbid(unsafe_code)]

//! The carousel controller: index state plus a three-state transition machine.
//!
//! [`Carousel`] holds an immutable item list and a position index. It is
//! driven synchronously by UI callbacks (`next`, `previous`, `jump_to`,
//! drag lifecycle) and by an external timer calling [`tick`](Carousel::tick).
//! It never owns a timer and never blocks.
//!
//! # State Machine
//!
//! ```text
//!            begin_drag                      end_drag / cancel_drag
//!   Idle ───────────────────► Dragging ─────────────────────────────► Idle
//!    │                                         │ (commits onto duplicate)
//!    │ next/tick onto duplicate slot            ▼
//!    └──────────────────────────────► Resetting(awaiting transition end)
//!                                               │ end_transition(now): snap to 0
//!                                               ▼
//!                                    Resetting(since now) ── settle(now + grace) ──► Idle
//! ```
//!
//! # Invariants
//!
//! 1. With `N > 0`, [`active_index`](Carousel::active_index) is always
//!    `Some(i)` with `i < N`, and every slot in [`slides`](Carousel::slides)
//!    addressed by [`index`](Carousel::index) exists.
//! 2. Navigation (`next`, `previous`, `jump_to`, `select`, `tick`) only has
//!    effect in `Idle`. Triggers arriving while dragging or resetting are
//!    dropped, not queued.
//! 3. `tick` has effect only when auto-advance is enabled.
//! 4. Outside the seamless-loop duplicate slot, `index` stays inside
//!    [`BoundaryPolicy::bounds`].
//! 5. Exactly one transition is in flight: the duplicate slot is only ever
//!    entered from `Idle`/`Dragging` and only ever left through a reset.
//!
//! # Failure Modes
//!
//! - Empty item list: every operation is a no-op and `index()` stays at the
//!   policy's initial sentinel (`0`, or `-1` for preview-siblings).
//! - `end_transition` is never reported: the carousel stays in `Resetting`
//!   with the duplicate visible. The runtime driver synthesizes the callback
//!   after a fixed transition time for renderers without one.

use std::time::Duration;

use crate::config::CarouselConfig;
use crate::drag::{DragDecision, DragSample};
use crate::policy::{BoundaryPolicy, to_isize};

// ---------------------------------------------------------------------------
// Public state types
// ---------------------------------------------------------------------------

/// Coarse controller state, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// Accepting navigation.
    Idle,
    /// A drag gesture is in progress.
    Dragging,
    /// A seamless-loop reset is pending or inside its grace window.
    Resetting,
}

/// How the renderer should get to the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    /// Animate from the previous visual position.
    Slide,
    /// Jump with zero duration.
    #[default]
    Snap,
}

/// Result of [`Carousel::end_drag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// What the thresholds decided.
    pub decision: DragDecision,
    /// Index after the gesture.
    pub index: isize,
    /// Whether the index changed. An `Advance` at a clamped edge does not move.
    pub moved: bool,
}

/// The active item and its immediate neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Siblings<'a, T> {
    /// Item shown before the active one.
    pub previous: Option<&'a T>,
    /// The active item.
    pub active: Option<&'a T>,
    /// Item shown after the active one.
    pub next: Option<&'a T>,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging { origin: isize, offset: f32 },
    /// `since` is `None` until the slide onto the duplicate has finished.
    Resetting { since: Option<Duration> },
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Index controller over an ordered, immutable item list.
///
/// One instance per view; instances share nothing.
pub struct Carousel<T> {
    items: Box<[T]>,
    config: CarouselConfig,
    index: isize,
    phase: Phase,
    motion: Motion,
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("policy", &self.config.boundary_policy)
            .field("index", &self.index)
            .field("phase", &self.phase)
            .field("motion", &self.motion)
            .finish()
    }
}

impl<T> Carousel<T> {
    /// Create a carousel positioned at the policy's initial index.
    #[must_use]
    pub fn new(items: impl Into<Box<[T]>>, config: CarouselConfig) -> Self {
        let items = items.into();
        let index = config.boundary_policy.initial_index();
        let carousel = Self {
            items,
            config,
            index,
            phase: Phase::Idle,
            motion: Motion::Snap,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.new",
            len = carousel.items.len(),
            policy = carousel.config.boundary_policy.as_str(),
            seamless = carousel.is_seamless()
        );
        carousel
    }

    // -- Navigation ---------------------------------------------------------

    /// Advance one position. Returns the new index.
    pub fn next(&mut self) -> isize {
        if !self.accepts_navigation() {
            return self.index;
        }
        self.step_forward("next")
    }

    /// Retreat one position. Returns the new index.
    pub fn previous(&mut self) -> isize {
        if !self.accepts_navigation() {
            return self.index;
        }
        self.step_back("previous")
    }

    /// Set the index directly, clamped into the policy's bounds.
    ///
    /// Under [`BoundaryPolicy::PreviewSiblings`] this is the raw index, so
    /// `jump_to(-1)` centers the first item. Use [`select`](Self::select) to
    /// address items instead.
    pub fn jump_to(&mut self, target: isize) -> isize {
        if !self.accepts_navigation() {
            return self.index;
        }
        let clamped = self.policy().clamp_index(target, self.items.len());
        self.move_to(clamped, Motion::Slide, "jump_to")
    }

    /// Make `item` the active item (clamped). Used by thumbnails and dots.
    pub fn select(&mut self, item: usize) -> isize {
        if !self.accepts_navigation() {
            return self.index;
        }
        let target = self.policy().index_for_item(item, self.items.len());
        self.move_to(target, Motion::Slide, "select")
    }

    /// Timer callback: `next()` when auto-advance is on and nothing else is
    /// in flight.
    pub fn tick(&mut self) -> isize {
        if !self.config.auto_advance || !self.accepts_navigation() {
            return self.index;
        }
        self.step_forward("tick")
    }

    // -- Drag lifecycle -----------------------------------------------------

    /// Start a drag. Returns `false` (and changes nothing) unless idle.
    pub fn begin_drag(&mut self) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        self.phase = Phase::Dragging {
            origin: self.index,
            offset: 0.0,
        };
        true
    }

    /// Report the current net displacement of an in-progress drag.
    pub fn update_drag(&mut self, displacement: f32) {
        if let Phase::Dragging { offset, .. } = &mut self.phase
            && displacement.is_finite()
        {
            *offset = displacement;
        }
    }

    /// Finish a drag and commit, or snap back, according to the thresholds.
    pub fn end_drag(&mut self, displacement: f32, velocity: f32) -> DragOutcome {
        let Phase::Dragging { origin, .. } = self.phase else {
            return DragOutcome {
                decision: DragDecision::SnapBack,
                index: self.index,
                moved: false,
            };
        };
        self.phase = Phase::Idle;

        let decision = self
            .config
            .drag_thresholds()
            .decide(DragSample::new(displacement, velocity));
        let index = match decision {
            DragDecision::Advance => self.step_forward("drag"),
            DragDecision::Retreat => self.step_back("drag"),
            DragDecision::SnapBack => {
                self.motion = Motion::Slide;
                self.index
            }
        };
        DragOutcome {
            decision,
            index,
            moved: index != origin,
        }
    }

    /// Abandon a drag without navigating.
    pub fn cancel_drag(&mut self) -> isize {
        if matches!(self.phase, Phase::Dragging { .. }) {
            self.phase = Phase::Idle;
            self.motion = Motion::Slide;
        }
        self.index
    }

    // -- Seamless loop ------------------------------------------------------

    /// Report that the renderer finished animating to the current index.
    ///
    /// When the duplicate slot is showing, snaps to `0` and starts the grace
    /// window. Returns whether a reset was committed.
    pub fn end_transition(&mut self, now: Duration) -> bool {
        if self.phase != (Phase::Resetting { since: None }) {
            return false;
        }
        let from = self.index;
        self.index = 0;
        self.motion = Motion::Snap;
        self.phase = Phase::Resetting { since: Some(now) };
        #[cfg(feature = "tracing")]
        self.log_transition("reset", from);
        #[cfg(not(feature = "tracing"))]
        let _ = from;
        true
    }

    /// Leave `Resetting` once the grace window has elapsed. Returns whether
    /// the carousel became idle.
    pub fn settle(&mut self, now: Duration) -> bool {
        let Phase::Resetting { since: Some(since) } = self.phase else {
            return false;
        };
        if now.saturating_sub(since) < self.config.reset_grace {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    // -- Queries ------------------------------------------------------------

    /// Current position index (see [`BoundaryPolicy`] for its meaning).
    #[inline]
    #[must_use]
    pub fn index(&self) -> isize {
        self.index
    }

    /// Number of real items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item list.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The construction-time configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Coarse state.
    #[must_use]
    pub fn phase(&self) -> CarouselPhase {
        match self.phase {
            Phase::Idle => CarouselPhase::Idle,
            Phase::Dragging { .. } => CarouselPhase::Dragging,
            Phase::Resetting { .. } => CarouselPhase::Resetting,
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Whether a seamless-loop reset is pending or settling.
    #[inline]
    #[must_use]
    pub fn is_resetting(&self) -> bool {
        matches!(self.phase, Phase::Resetting { .. })
    }

    /// How the renderer should move to the current index.
    #[inline]
    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Displacement of the in-progress drag, or `0.0`.
    #[must_use]
    pub fn drag_offset(&self) -> f32 {
        match self.phase {
            Phase::Dragging { offset, .. } => offset,
            _ => 0.0,
        }
    }

    /// Subscript of the visually active item.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let len = self.items.len();
        if self.is_seamless() && self.index == to_isize(len) {
            return Some(0);
        }
        self.policy().active_item(self.index, len)
    }

    /// The visually active item.
    #[must_use]
    pub fn active(&self) -> Option<&T> {
        self.active_index().and_then(|i| self.items.get(i))
    }

    /// Whether item `item` is the active one (indicator dots).
    #[must_use]
    pub fn is_active(&self, item: usize) -> bool {
        self.active_index() == Some(item)
    }

    /// The active item with its neighbors. Neighbors wrap only under
    /// [`BoundaryPolicy::WrapAround`].
    #[must_use]
    pub fn siblings(&self) -> Siblings<'_, T> {
        let len = self.items.len();
        let Some(active) = self.active_index() else {
            return Siblings {
                previous: None,
                active: None,
                next: None,
            };
        };
        let wraps = self.policy() == BoundaryPolicy::WrapAround && len > 1;
        let previous = match active.checked_sub(1) {
            Some(i) => Some(i),
            None if wraps => Some(len - 1),
            None => None,
        };
        let next = if active + 1 < len {
            Some(active + 1)
        } else if wraps {
            Some(0)
        } else {
            None
        };
        Siblings {
            previous: previous.and_then(|i| self.items.get(i)),
            active: self.items.get(active),
            next: next.and_then(|i| self.items.get(i)),
        }
    }

    /// Number of render slots: items plus the trailing duplicate when
    /// looping seamlessly.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        if self.is_seamless() {
            self.items.len() + 1
        } else {
            self.items.len()
        }
    }

    /// Render slots in order. With seamless looping the first item appears
    /// again at the end.
    pub fn slides(&self) -> impl Iterator<Item = &T> + '_ {
        let duplicate = if self.is_seamless() {
            self.items.first()
        } else {
            None
        };
        self.items.iter().chain(duplicate)
    }

    /// Whether `next()` would move right now.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        self.is_seamless() || self.policy().can_step_forward(self.index, self.items.len())
    }

    /// Whether `previous()` would move right now.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        self.is_seamless() || self.policy().can_step_back(self.index, self.items.len())
    }

    /// Whether the duplicate-slot loop is active for this instance.
    #[must_use]
    pub fn is_seamless(&self) -> bool {
        self.config.loop_seamlessly
            && self.config.boundary_policy == BoundaryPolicy::WrapAround
            && self.items.len() >= 2
    }

    // -- Internals ----------------------------------------------------------

    #[inline]
    fn policy(&self) -> BoundaryPolicy {
        self.config.boundary_policy
    }

    #[inline]
    fn accepts_navigation(&self) -> bool {
        self.phase == Phase::Idle && !self.items.is_empty()
    }

    fn step_forward(&mut self, action: &'static str) -> isize {
        let len = self.items.len();
        if self.is_seamless() && self.index == to_isize(len) - 1 {
            let index = self.move_to(to_isize(len), Motion::Slide, action);
            self.phase = Phase::Resetting { since: None };
            return index;
        }
        let target = self.policy().step_forward(self.index, len);
        self.move_to(target, Motion::Slide, action)
    }

    fn step_back(&mut self, action: &'static str) -> isize {
        let len = self.items.len();
        if self.is_seamless() && self.index == 0 {
            return self.move_to(to_isize(len) - 1, Motion::Snap, action);
        }
        let target = self.policy().step_back(self.index, len);
        self.move_to(target, Motion::Slide, action)
    }

    fn move_to(&mut self, target: isize, motion: Motion, action: &'static str) -> isize {
        let from = self.index;
        self.index = target;
        self.motion = motion;
        #[cfg(feature = "tracing")]
        self.log_transition(action, from);
        #[cfg(not(feature = "tracing"))]
        let _ = (from, action);
        self.index
    }

    #[cfg(feature = "tracing")]
    fn log_transition(&self, action: &str, from: isize) {
        tracing::debug!(
            message = "carousel.transition",
            action,
            from,
            to = self.index,
            active = self.active_index(),
            phase = ?self.phase(),
            motion = ?self.motion
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
