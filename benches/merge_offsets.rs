//! Benchmarks for merge-offset and merged-rect computation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datagrid::cellgroup::{calculate_merge_offsets, join_cell_groups_with_merged_cell_groups};
use datagrid::{Axis, CellGroup, CellRegion, GridLayout, SectionList, StaticModel, Viewport};

/// Model with `count` disjoint 2x2 groups down the diagonal
fn diagonal_model(count: i32) -> StaticModel {
    let mut model = StaticModel::new(10_000, 10_000);
    for i in 0..count {
        let start = i * 3;
        model
            .add_group(CellRegion::Body, CellGroup::new(start, start, start + 1, start + 1))
            .unwrap();
    }
    model
}

/// Model whose `count` groups form a single chain, declared in reverse order
/// so every join has to rescan
fn chained_model(count: i32) -> StaticModel {
    let mut model = StaticModel::new(10_000, 10_000);
    for i in (0..count).rev() {
        model
            .add_group(CellRegion::Body, CellGroup::new(i, i, i + 1, i + 1))
            .unwrap();
    }
    model
}

fn bench_offsets_by_group_count(c: &mut Criterion) {
    let sections = SectionList::new(10_000, 20.0);
    let mut group = c.benchmark_group("merge_offsets_disjoint");

    for count in [10, 100, 1_000] {
        let model = diagonal_model(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &model, |b, model| {
            b.iter(|| {
                calculate_merge_offsets(
                    model,
                    &[CellRegion::Body],
                    Axis::Row,
                    &sections,
                    black_box(3),
                )
            })
        });
    }

    group.finish();
}

fn bench_chained_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_chained");

    for count in [10, 100, 500] {
        let model = chained_model(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &model, |b, model| {
            b.iter(|| {
                join_cell_groups_with_merged_cell_groups(
                    model,
                    black_box(&CellGroup::cell(0, 0)),
                    CellRegion::Body,
                )
            })
        });
    }

    group.finish();
}

/// One frame's worth of merged rects for a 50x20 visible window
fn bench_visible_frame(c: &mut Criterion) {
    let model = diagonal_model(200);
    let layout = GridLayout::from_model(&model, &model.default_sizes);
    let mut viewport = Viewport::new();
    viewport.resize(1280.0, 1000.0);
    viewport.set_scroll(0.0, 2000.0, &layout);

    c.bench_function("visible_frame_rects", |b| {
        b.iter(|| {
            let Some((row_start, row_end)) = viewport.visible_rows(&layout) else {
                return;
            };
            let Some((col_start, col_end)) = viewport.visible_columns(&layout) else {
                return;
            };
            for row in row_start..=row_end {
                for column in col_start..=col_end {
                    black_box(layout.cell_rect(&model, CellRegion::Body, row, column));
                }
            }
            black_box(viewport.visible_merged_groups(&model, &layout, CellRegion::Body));
        })
    });
}

criterion_group!(
    benches,
    bench_offsets_by_group_count,
    bench_chained_join,
    bench_visible_frame,
);

criterion_main!(benches);
