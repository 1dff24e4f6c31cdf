// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use hashbrown::HashMap;
use kurbo::Rect;
use understory_hierarchy::VisualState;
use understory_overlap::{ControlKind, OverlapDetector};

/// Every task faded at a deep level so each control takes the geometric path.
fn faded(n: u32) -> HashMap<u32, VisualState> {
    (0..n).map(|id| (id, VisualState::SemiTransparent(0.5))).collect()
}

/// `n` task rectangles on a loose grid, each with a counter and a split control.
///
/// Rows alternate between two levels so controls on the shallower row are
/// tested against the deeper one.
fn populated(n: u32) -> OverlapDetector<u32> {
    let mut detector = OverlapDetector::default();
    let cols = (f64::from(n).sqrt().ceil() as u32).max(1);
    for id in 0..n {
        let (col, row) = (id % cols, id / cols);
        let rect = Rect::from_origin_size(
            (f64::from(col) * 200.0, f64::from(row) * 100.0),
            (240.0, 120.0),
        );
        let level = 3 + row % 2;
        detector.register_rectangle(id, rect, level).unwrap();
        let counter = Rect::from_origin_size((rect.x1 - 20.0, rect.y0), (20.0, 20.0));
        let split = Rect::from_origin_size((rect.x0, rect.y1 - 20.0), (20.0, 20.0));
        detector
            .register_control(n + 2 * id, counter, level, Some(id), ControlKind::Counter)
            .unwrap();
        detector
            .register_control(n + 2 * id + 1, split, level, Some(id), ControlKind::Split)
            .unwrap();
    }
    detector
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap/detect_overlaps");

    for n in [16_u32, 64, 256, 1_024] {
        group.throughput(Throughput::Elements(u64::from(2 * n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut detector = populated(n);
                    detector.apply_states(&faded(n));
                    detector
                },
                |mut detector| black_box(detector.detect_overlaps()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_debounce_burst(c: &mut Criterion) {
    c.bench_function("overlap/burst_of_moves", |b| {
        b.iter_batched(
            || populated(256),
            |mut detector| {
                let mut now = 0_u64;
                let mut runs = 0_u32;
                for id in 0..256_u32 {
                    let bounds = Rect::from_origin_size((f64::from(id), 0.0), (240.0, 120.0));
                    let _ = detector.update_rectangle_bounds(&id, bounds);
                    detector.request_evaluation(now);
                    if detector.poll(now).is_some() {
                        runs += 1;
                    }
                    now += 5;
                }
                black_box(runs)
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_detect, bench_debounce_burst);
criterion_main!(benches);
