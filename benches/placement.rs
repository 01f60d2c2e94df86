use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use maplabel::{GlyphBox, PlacementEngine, Point, Rect};
use std::hint::black_box;

// Square grid of same-sized labels, spaced tightly enough that neighbors
// contest each other and force clearance-scale resolution.
fn grid_labels(side: usize, spacing: f32) -> Vec<(Point, Vec<GlyphBox>)> {
    let origin = 200.0;
    let mut labels = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            let anchor = Point::new(
                origin + col as f32 * spacing,
                origin + row as f32 * spacing,
            );
            let rect = Rect::new(Point::new(-50.0, -12.0), Point::new(50.0, 12.0));
            labels.push((anchor, vec![GlyphBox::new(rect, anchor)]));
        }
    }
    labels
}

fn place_all(labels: &[(Point, Vec<GlyphBox>)]) -> usize {
    let mut engine = PlacementEngine::new();
    let mut placed = 0;
    for (anchor, boxes) in labels {
        if engine.place(boxes, *anchor, 1.0, 8.0, 0.0, true).is_some() {
            placed += 1;
        }
    }
    placed
}

fn bench_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_grid");
    for side in [8usize, 16, 32] {
        let labels = grid_labels(side, 90.0);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &labels, |b, labels| {
            b.iter(|| place_all(black_box(labels)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grids);
criterion_main!(benches);
