//! Driver behavior under a deterministic clock: auto-advance, hover pause,
//! drag gestures, and the seamless-loop reset, interleaved.

use std::time::Duration;

use reel_core::{BoundaryPolicy, CarouselConfig, CarouselPhase, Motion};
use reel_runtime::{CarouselDriver, CarouselEvent, CarouselMsg, DeterministicClock, MonotonicClock};

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    clock: DeterministicClock,
    driver: CarouselDriver<&'static str>,
    events: Vec<CarouselEvent>,
}

impl Harness {
    fn new(config: CarouselConfig) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            clock: DeterministicClock::new(),
            driver: CarouselDriver::new(vec!["harbor", "lumen", "atlas", "fable"], config),
            events: Vec::new(),
        }
    }

    fn send(&mut self, msg: CarouselMsg) {
        let events = self.driver.update(msg, self.clock.now_mono());
        self.events.extend(events);
    }

    fn run_frames_for(&mut self, span: Duration) {
        let end = self.clock.now_mono() + span;
        while self.clock.now_mono() < end {
            self.clock.advance(FRAME);
            self.send(CarouselMsg::Frame);
        }
    }

    fn moves(&self) -> Vec<(isize, isize)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                CarouselEvent::Moved { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

fn looping() -> CarouselConfig {
    CarouselConfig::showcase_loop().with_auto_advance_interval(Duration::from_secs(2))
}

#[test]
fn autoplay_cycles_through_duplicate_and_back() {
    let mut h = Harness::new(looping());
    h.run_frames_for(Duration::from_millis(8_700));
    assert_eq!(h.moves(), vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert!(h.events.contains(&CarouselEvent::ResetCommitted));
    assert_eq!(h.driver.carousel().index(), 0);
    assert_eq!(h.driver.carousel().active(), Some(&"harbor"));
    assert_eq!(h.driver.carousel().phase(), CarouselPhase::Idle);
}

#[test]
fn hover_pauses_autoplay() {
    let mut h = Harness::new(looping());
    h.send(CarouselMsg::Hover(true));
    h.run_frames_for(Duration::from_secs(10));
    assert!(h.moves().is_empty());
    h.send(CarouselMsg::Hover(false));
    h.run_frames_for(Duration::from_millis(2_100));
    assert_eq!(h.moves(), vec![(0, 1)]);
}

#[test]
fn drag_during_reset_is_dropped() {
    let mut h = Harness::new(looping());
    h.send(CarouselMsg::JumpTo(3));
    h.run_frames_for(Duration::from_millis(600));
    h.send(CarouselMsg::Next);
    assert_eq!(h.driver.carousel().phase(), CarouselPhase::Resetting);

    h.send(CarouselMsg::PointerDown(400.0));
    assert!(!h.driver.carousel().is_dragging());
    h.send(CarouselMsg::PointerUp(100.0));
    assert_eq!(h.driver.carousel().index(), 4);

    h.run_frames_for(Duration::from_millis(600));
    assert_eq!(h.driver.carousel().index(), 0);
    assert_eq!(h.driver.carousel().phase(), CarouselPhase::Idle);
}

#[test]
fn preview_reviews_drag_to_last_then_clamp() {
    let mut h = Harness::new(CarouselConfig::reviews());
    for _ in 0..5 {
        h.send(CarouselMsg::PointerDown(500.0));
        h.clock.advance(FRAME);
        h.send(CarouselMsg::PointerMove(420.0));
        h.clock.advance(FRAME);
        h.send(CarouselMsg::PointerUp(350.0));
        h.clock.advance(Duration::from_millis(600));
    }
    assert_eq!(h.driver.carousel().index(), 2);
    assert_eq!(h.driver.carousel().active(), Some(&"fable"));
    assert_eq!(h.moves(), vec![(-1, 0), (0, 1), (1, 2)]);
    assert_eq!(
        h.events
            .iter()
            .filter(|e| matches!(e, CarouselEvent::SnappedBack { .. }))
            .count(),
        2
    );
}

#[test]
fn wrap_previous_slides_to_last() {
    let config = CarouselConfig::default().with_boundary_policy(BoundaryPolicy::WrapAround);
    let mut h = Harness::new(config);
    h.send(CarouselMsg::Previous);
    assert_eq!(
        h.events,
        vec![CarouselEvent::Moved {
            from: 0,
            to: 3,
            motion: Motion::Slide
        }]
    );
}
