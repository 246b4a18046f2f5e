//! Easing, scroll-through and render benchmarks.
#![allow(missing_docs, unused_results)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use scroll_reveal::config::RevealConfig;
use scroll_reveal::driver::{shared, ImperativeDriver, Presentation};
use scroll_reveal::engine::RevealEngine;
use scroll_reveal::geometry::{Rect, RootMargin};
use scroll_reveal::group::GroupConfig;
use scroll_reveal::machine::TrackRole;
use scroll_reveal::reset::ResetChannel;
use scroll_reveal::util::easing::EasingFunction;
use scroll_reveal::util::frame_timing::FrameClock;
use scroll_reveal::viewport::{ElementId, ScrollViewport};
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::DEFAULT;
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))));
    });
    let bounce = EasingFunction::BOUNCE;
    c.bench_function("back_out_easing", |b| {
        b.iter(|| black_box(bounce.evaluate(black_box(0.5))));
    });
}

fn engine_with_group(count: usize) -> RevealEngine<ScrollViewport> {
    let channel = ResetChannel::new();
    let mut engine = RevealEngine::new(
        ScrollViewport::new(1280.0, 720.0),
        shared(ImperativeDriver::default()),
        &channel,
    );
    let items: Vec<String> = (0..count).map(|i| format!("item-{i}")).collect();
    let reveal = RevealConfig::default().with_root_margin(RootMargin::ZERO);
    let group = engine.use_group_reveal(
        &items,
        GroupConfig::timeline(reveal, Duration::from_millis(50)),
    );
    for (i, id) in items.iter().enumerate() {
        let el = engine
            .viewport_mut()
            .insert(Rect::new(0.0, 120.0 * i as f32, 1280.0, 100.0));
        let _ = engine.attach_ref_for_id(group, id, Some(el));
    }
    engine
}

fn scroll_through_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_through");

    for count in [10, 50, 100, 500] {
        group.bench_function(format!("{count}_members"), |b| {
            b.iter(|| {
                let mut engine = engine_with_group(count);
                let mut clock = FrameClock::new(Instant::now(), 60);
                let bottom = 120.0 * count as f32;
                while engine.viewport().scroll_y() < bottom {
                    engine.viewport_mut().scroll_by(40.0);
                    let _ = black_box(engine.tick(clock.advance()));
                }
            });
        });
    }
    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut engine = engine_with_group(200);
    let now = Instant::now();
    let _ = engine.tick(now);
    let _ = engine.tick(now + Duration::from_millis(300));
    c.bench_function("render_200_members", |b| {
        b.iter(|| {
            let mut sink: Vec<(ElementId, TrackRole, Presentation)> = Vec::new();
            engine.render(&mut sink);
            black_box(sink)
        });
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    scroll_through_benchmark,
    render_benchmark
);
criterion_main!(benches);
