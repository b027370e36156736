#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reel_core::{BoundaryPolicy, Carousel, CarouselConfig, CarouselPhase};

#[derive(Debug, Arbitrary)]
enum Policy {
    Clamp,
    Wrap,
    Preview,
    Seamless,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Previous,
    Tick,
    JumpTo(i16),
    Select(u8),
    BeginDrag,
    UpdateDrag(f32),
    EndDrag(f32, f32),
    CancelDrag,
    EndTransition(u16),
    Settle(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    policy: Policy,
    len: u8,
    distance_threshold: f32,
    velocity_threshold: f32,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let len = usize::from(input.len % 16);
    let config = match input.policy {
        Policy::Clamp => CarouselConfig::default(),
        Policy::Wrap => CarouselConfig::default().with_boundary_policy(BoundaryPolicy::WrapAround),
        Policy::Preview => CarouselConfig::reviews(),
        Policy::Seamless => CarouselConfig::showcase_loop(),
    }
    .with_auto_advance(true)
    .with_drag_distance_threshold(input.distance_threshold)
    .with_drag_velocity_threshold(input.velocity_threshold);

    let mut c = Carousel::new((0..len).collect::<Vec<_>>(), config);
    let mut now = Duration::ZERO;

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Next => {
                c.next();
            }
            Op::Previous => {
                c.previous();
            }
            Op::Tick => {
                c.tick();
            }
            Op::JumpTo(i) => {
                c.jump_to(isize::from(i));
            }
            Op::Select(i) => {
                c.select(usize::from(i));
            }
            Op::BeginDrag => {
                c.begin_drag();
            }
            Op::UpdateDrag(d) => c.update_drag(d),
            Op::EndDrag(d, v) => {
                let outcome = c.end_drag(d, v);
                assert_eq!(outcome.index, c.index());
            }
            Op::CancelDrag => {
                c.cancel_drag();
            }
            Op::EndTransition(dt) => {
                now += Duration::from_millis(u64::from(dt));
                c.end_transition(now);
            }
            Op::Settle(dt) => {
                now += Duration::from_millis(u64::from(dt));
                c.settle(now);
            }
        }

        if c.is_empty() {
            assert_eq!(c.active(), None);
            continue;
        }
        // Every index addresses a rendered slot.
        let active = c.active_index().expect("non-empty carousel has an active item");
        assert!(active < c.len());
        if c.is_seamless() {
            let slot = usize::try_from(c.index()).expect("seamless index is non-negative");
            assert!(slot < c.slide_count());
        } else if let Some((lo, hi)) = c.config().boundary_policy.bounds(c.len()) {
            assert!((lo..=hi).contains(&c.index()));
        }
        if c.phase() != CarouselPhase::Dragging {
            assert_eq!(c.drag_offset(), 0.0);
        }
    }
});
