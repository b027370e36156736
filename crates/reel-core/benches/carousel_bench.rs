//! Benchmark: controller navigation and release-velocity estimation.
//!
//! Run with: `cargo bench -p reel-core --bench carousel_bench`
//!
//! Navigation runs on every click and timer tick; the velocity tracker runs
//! on every pointer-move sample while dragging.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reel_core::{BoundaryPolicy, Carousel, CarouselConfig, VelocityTracker};

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/navigation");
    for policy in [
        BoundaryPolicy::Clamp,
        BoundaryPolicy::WrapAround,
        BoundaryPolicy::PreviewSiblings,
    ] {
        let config = CarouselConfig::default().with_boundary_policy(policy);
        group.bench_with_input(BenchmarkId::new("next_x1000", policy), &config, |b, config| {
            b.iter(|| {
                let mut carousel = Carousel::new((0..64u32).collect::<Vec<_>>(), config.clone());
                for _ in 0..1000 {
                    black_box(carousel.next());
                }
                carousel.index()
            });
        });
    }
    group.finish();
}

fn bench_seamless_loop(c: &mut Criterion) {
    c.bench_function("carousel/seamless_tick_reset_x100", |b| {
        b.iter(|| {
            let mut carousel = Carousel::new((0..8u32).collect::<Vec<_>>(), CarouselConfig::showcase_loop());
            let mut now = Duration::ZERO;
            for _ in 0..100 {
                carousel.tick();
                now += Duration::from_millis(500);
                if carousel.end_transition(now) {
                    carousel.settle(now + Duration::from_millis(50));
                }
            }
            black_box(carousel.index())
        });
    });
}

fn bench_velocity(c: &mut Criterion) {
    c.bench_function("velocity_tracker/add_and_estimate_x60", |b| {
        b.iter(|| {
            let mut tracker = VelocityTracker::new();
            for i in 0..60u32 {
                tracker.add(Duration::from_millis(u64::from(i) * 8), -3.5 * i as f32);
                black_box(tracker.velocity());
            }
        });
    });
}

criterion_group!(benches, bench_navigation, bench_seamless_loop, bench_velocity);
criterion_main!(benches);
