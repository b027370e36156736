//! Property tests for the auto-advance timer and driver under random input.

use std::time::Duration;

use proptest::prelude::*;
use reel_core::{BoundaryPolicy, CarouselConfig};
use reel_runtime::{Autoplay, CarouselDriver, CarouselEvent, CarouselMsg};

#[derive(Debug, Clone)]
enum Input {
    Wait(u16),
    Hover(bool),
    Next,
    Previous,
    Drag { from: i16, to: i16, millis: u8 },
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (1u16..2_000).prop_map(Input::Wait),
        1 => any::<bool>().prop_map(Input::Hover),
        1 => Just(Input::Next),
        1 => Just(Input::Previous),
        1 => (any::<i16>(), any::<i16>(), 1u8..200)
            .prop_map(|(from, to, millis)| Input::Drag { from, to, millis }),
    ]
}

proptest! {
    #[test]
    fn fires_are_at_least_one_interval_apart(
        interval_ms in 1u64..5_000,
        steps in prop::collection::vec(1u64..3_000, 1..200),
    ) {
        let interval = Duration::from_millis(interval_ms);
        let mut ap = Autoplay::new(interval, true);
        let mut now = Duration::ZERO;
        let mut last_fire: Option<Duration> = None;
        for step in steps {
            now += Duration::from_millis(step);
            if ap.poll(now) {
                if let Some(last) = last_fire {
                    prop_assert!(now - last >= interval);
                }
                last_fire = Some(now);
            }
        }
    }

    #[test]
    fn hovered_timer_never_fires(steps in prop::collection::vec(1u64..10_000, 1..100)) {
        let mut ap = Autoplay::new(Duration::from_millis(10), true);
        ap.set_hovered(true, Duration::ZERO);
        let mut now = Duration::ZERO;
        for step in steps {
            now += Duration::from_millis(step);
            prop_assert!(!ap.poll(now));
        }
    }

    #[test]
    fn seamless_driver_keeps_index_addressable(inputs in prop::collection::vec(input(), 1..120)) {
        let config = CarouselConfig::showcase_loop()
            .with_auto_advance_interval(Duration::from_millis(300));
        let mut driver = CarouselDriver::new(vec![1u8, 2, 3, 4], config);
        let mut now = Duration::ZERO;
        let frame = Duration::from_millis(16);

        for input in inputs {
            let mut events = Vec::new();
            match input {
                Input::Wait(ms) => {
                    let until = now + Duration::from_millis(u64::from(ms));
                    while now < until {
                        now += frame;
                        events.extend(driver.update(CarouselMsg::Frame, now));
                    }
                }
                Input::Hover(h) => events.extend(driver.update(CarouselMsg::Hover(h), now)),
                Input::Next => events.extend(driver.update(CarouselMsg::Next, now)),
                Input::Previous => events.extend(driver.update(CarouselMsg::Previous, now)),
                Input::Drag { from, to, millis } => {
                    events.extend(driver.update(CarouselMsg::PointerDown(f32::from(from)), now));
                    now += Duration::from_millis(u64::from(millis));
                    events.extend(driver.update(CarouselMsg::PointerUp(f32::from(to)), now));
                }
            }

            let carousel = driver.carousel();
            prop_assert_eq!(carousel.config().boundary_policy, BoundaryPolicy::WrapAround);
            let slot = usize::try_from(carousel.index());
            prop_assert!(slot.is_ok_and(|s| s < carousel.slide_count()));
            prop_assert!(carousel.active().is_some());
            for event in events {
                if let CarouselEvent::Moved { to, .. } = event {
                    prop_assert!((0..=4).contains(&to));
                }
            }
        }
    }
}
