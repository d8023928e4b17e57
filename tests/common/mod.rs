//! Common test fixtures and assertion helpers.
//!
//! Provides the demo grid model used across the integration tests, a model
//! that misbehaves at its group boundary, and helpers for comparing offsets
//! and rectangles.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;

use datagrid::cellgroup::MergeOffsets;
use datagrid::layout::CellRect;
use datagrid::{
    CellGroup, CellRegion, ColumnRegion, DataModel, DefaultSizes, RowRegion, StaticModel,
};

// ============================================================================
// Fixture models
// ============================================================================

/// The demo model: 20x6 body, 3 header rows and columns, a few groups in
/// every region.
pub fn demo_model() -> StaticModel {
    StaticModel::new(20, 6)
        .with_header_rows(3)
        .with_header_columns(3)
        .with_group(CellRegion::Body, CellGroup::new(1, 1, 2, 2))
        .unwrap()
        .with_group(CellRegion::Body, CellGroup::new(5, 1, 5, 2))
        .unwrap()
        .with_group(CellRegion::Body, CellGroup::new(3, 5, 4, 5))
        .unwrap()
        .with_group(CellRegion::ColumnHeader, CellGroup::new(0, 4, 1, 4))
        .unwrap()
        .with_group(CellRegion::RowHeader, CellGroup::new(0, 0, 1, 1))
        .unwrap()
        .with_group(CellRegion::CornerHeader, CellGroup::new(0, 0, 1, 1))
        .unwrap()
}

/// A 100x100 model with only body groups.
pub fn body_model(groups: &[CellGroup]) -> StaticModel {
    let mut model = StaticModel::new(100, 100);
    model
        .set_groups(CellRegion::Body, groups.to_vec())
        .unwrap();
    model
}

/// Sizes that keep hand arithmetic easy.
pub fn round_sizes() -> DefaultSizes {
    DefaultSizes {
        row_height: 20.0,
        column_width: 50.0,
        row_header_width: 40.0,
        column_header_height: 10.0,
    }
}

/// A model that claims more groups than it can produce, and counts how many
/// times its groups are read.
pub struct ShortModel {
    pub groups: Vec<CellGroup>,
    pub claimed: usize,
    pub reads: Cell<usize>,
}

impl ShortModel {
    pub fn new(groups: Vec<CellGroup>, claimed: usize) -> Self {
        Self {
            groups,
            claimed,
            reads: Cell::new(0),
        }
    }
}

impl DataModel for ShortModel {
    fn row_count(&self, _region: RowRegion) -> u32 {
        100
    }

    fn column_count(&self, _region: ColumnRegion) -> u32 {
        100
    }

    fn data(&self, _region: CellRegion, _row: i32, _column: i32) -> Option<serde_json::Value> {
        None
    }

    fn group_count(&self, region: CellRegion) -> usize {
        if region == CellRegion::Body {
            self.claimed
        } else {
            0
        }
    }

    fn group(&self, region: CellRegion, index: usize) -> Option<CellGroup> {
        self.reads.set(self.reads.get() + 1);
        if region == CellRegion::Body {
            self.groups.get(index).copied()
        } else {
            None
        }
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn uniform(size: f32) -> impl Fn(i32) -> f32 {
    move |_| size
}

#[track_caller]
pub fn assert_offsets(offsets: &MergeOffsets, start: f32, end: f32, group: CellGroup) {
    assert_eq!(
        (offsets.start_offset, offsets.end_offset, offsets.group),
        (start, end, group),
        "unexpected merge offsets"
    );
}

#[track_caller]
pub fn assert_rect(rect: &CellRect, x: f32, y: f32, width: f32, height: f32) {
    assert!(
        (rect.x - x).abs() < 0.01
            && (rect.y - y).abs() < 0.01
            && (rect.width - width).abs() < 0.01
            && (rect.height - height).abs() < 0.01,
        "expected rect ({x}, {y}, {width}, {height}), got ({}, {}, {}, {})",
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
}
