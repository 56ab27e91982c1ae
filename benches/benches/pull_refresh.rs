// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_pull_refresh::pointer::{PointerEvent, PointerId, PointerPhase, PointerSample};
use understory_pull_refresh::{
    DrawMode, Edge, FnListener, MeasuredSurfaces, PullRefresh, RefreshHandler, StaticContent,
    compute_displacement,
};

const CONTAINER: Size = Size::new(360.0, 640.0);

struct Header;

impl RefreshHandler for Header {
    fn drag_min_distance(&self) -> Option<f64> {
        Some(100.0)
    }
}

fn controller() -> PullRefresh {
    let mut pull = PullRefresh::new();
    pull.attach_content(CONTAINER).expect("fresh controller");
    pull.set_header(Header);
    pull.set_footer(Header);
    pull.set_refresh_listener(FnListener::new(|| {}, || {}));
    pull.layout(CONTAINER, MeasuredSurfaces::new(CONTAINER, 80.0, 60.0))
        .expect("content attached");
    pull
}

fn send(pull: &mut PullRefresh, phase: PointerPhase, y: f64) {
    let samples = [PointerSample::new(PointerId(0), Point::new(180.0, y))];
    black_box(pull.on_pointer_event(&StaticContent, &PointerEvent::new(phase, 0, &samples)));
}

fn bench_pull_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_refresh");

    group.bench_function("displacement", |b| {
        b.iter(|| {
            let mut offset = 0.0;
            for _ in 0..64 {
                offset = compute_displacement(
                    black_box(DrawMode::Follow),
                    Edge::Header,
                    offset,
                    black_box(12.0),
                    600.0,
                );
            }
            offset
        });
    });

    for frames in [16_u32, 256] {
        group.bench_function(format!("drag_frames(n={frames})"), |b| {
            b.iter_batched(
                controller,
                |mut pull| {
                    send(&mut pull, PointerPhase::Down, 0.0);
                    let mut y = 0.0;
                    for _ in 0..frames {
                        y += 8.0;
                        send(&mut pull, PointerPhase::Move, y);
                    }
                    send(&mut pull, PointerPhase::Up, y);
                    pull
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("settle_frames(n=60)", |b| {
        b.iter_batched(
            || {
                let mut pull = controller();
                send(&mut pull, PointerPhase::Down, 0.0);
                for step in 1..=10 {
                    send(&mut pull, PointerPhase::Move, 40.0 * f64::from(step));
                }
                send(&mut pull, PointerPhase::Up, 400.0);
                pull
            },
            |mut pull| {
                for frame in 0..60_u64 {
                    pull.advance(Duration::from_millis(frame * 16));
                    black_box(pull.surface_layout(CONTAINER));
                }
                pull
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_pull_refresh);
criterion_main!(benches);
