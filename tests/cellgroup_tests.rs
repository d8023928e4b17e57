//! Tests for the merged-cell algebra
//!
//! These pin the behaviors a grid relies on while painting:
//! - membership (`are_cells_merged`) looks at one declared group at a time
//! - joins follow chains of overlapping groups to a fixed point
//! - merge offsets join along one axis only and sum section sizes
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_offsets, body_model, demo_model, uniform, ShortModel};
use datagrid::cellgroup::{
    are_cell_groups_intersecting, are_cell_groups_intersecting_at_axis, are_cells_merged,
    calculate_merge_offsets, cell_groups_at_column, cell_groups_at_region, cell_groups_at_regions,
    cell_groups_at_row, join_cell_groups, join_cell_groups_with_merged_cell_groups, MergeOffsets,
};
use datagrid::{Axis, CellGroup, CellRegion, DataGridError, SectionList};
use test_case::test_case;

// ============================================================================
// PREDICATES
// ============================================================================

#[test_case(CellGroup::new(0, 0, 0, 0) ; "single cell")]
#[test_case(CellGroup::new(1, 1, 2, 3) ; "rectangle")]
#[test_case(CellGroup::new(0, 7, 40, 7) ; "tall column")]
fn test_intersection_is_reflexive(g: CellGroup) {
    assert!(are_cell_groups_intersecting(&g, &g));
    assert!(are_cell_groups_intersecting_at_axis(&g, &g, Axis::Row));
    assert!(are_cell_groups_intersecting_at_axis(&g, &g, Axis::Column));
}

#[test_case(CellGroup::new(2, 3, 4, 4), true ; "shared corner")]
#[test_case(CellGroup::new(0, 0, 1, 1), true ; "shared top-left corner")]
#[test_case(CellGroup::new(3, 1, 4, 3), false ; "row below")]
#[test_case(CellGroup::new(1, 4, 2, 6), false ; "column to the right")]
#[test_case(CellGroup::new(0, 0, 9, 9), true ; "containing")]
fn test_touching_edges_intersect(other: CellGroup, expected: bool) {
    let g = CellGroup::new(1, 1, 2, 3);
    assert_eq!(are_cell_groups_intersecting(&g, &other), expected);
    assert_eq!(are_cell_groups_intersecting(&other, &g), expected);
}

/// Axis independence: a group spanning rows 1-2 and columns 1-3 overlaps
/// another on rows while being disjoint in 2-D.
#[test]
fn test_axis_intersection_ignores_other_axis() {
    let g = CellGroup::new(1, 1, 2, 3);
    let h = CellGroup::new(2, 10, 5, 12);
    assert!(are_cell_groups_intersecting_at_axis(&g, &h, Axis::Row));
    assert!(!are_cell_groups_intersecting_at_axis(&g, &h, Axis::Column));
    assert!(!are_cell_groups_intersecting(&g, &h));
}

/// `are_cells_merged` is deliberately non-transitive: two adjacent groups
/// that look like one merged block are still two groups.
#[test]
fn test_are_cells_merged_pins_non_transitive_behavior() {
    let model = body_model(&[CellGroup::new(0, 0, 1, 1), CellGroup::new(0, 2, 1, 3)]);
    assert!(!are_cells_merged(&model, CellRegion::Body, (0, 0), (0, 3)));
    assert!(!are_cells_merged(&model, CellRegion::Body, (1, 1), (1, 2)));
    assert!(are_cells_merged(&model, CellRegion::Body, (0, 0), (1, 1)));
    assert!(are_cells_merged(&model, CellRegion::Body, (0, 2), (1, 3)));

    // The transitive join over the same model does not combine them either:
    // adjacency is not overlap.
    let joined = join_cell_groups_with_merged_cell_groups(
        &model,
        &CellGroup::new(0, 0, 1, 1),
        CellRegion::Body,
    );
    assert_eq!(joined, CellGroup::new(0, 0, 1, 1));
}

#[test]
fn test_are_cells_merged_is_region_scoped() {
    let model = demo_model();
    assert!(are_cells_merged(&model, CellRegion::RowHeader, (0, 0), (1, 1)));
    assert!(are_cells_merged(&model, CellRegion::CornerHeader, (0, 0), (1, 1)));
    assert!(!are_cells_merged(&model, CellRegion::Body, (0, 0), (1, 1)));
    assert!(are_cells_merged(&model, CellRegion::ColumnHeader, (0, 4), (1, 4)));
    assert!(!are_cells_merged(&model, CellRegion::ColumnHeader, (0, 4), (0, 5)));
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn test_region_aggregation_on_demo_model() {
    let model = demo_model();
    assert_eq!(cell_groups_at_region(&model, CellRegion::Body).len(), 3);
    assert_eq!(
        cell_groups_at_row(&model, CellRegion::Body, 5),
        vec![CellGroup::new(5, 1, 5, 2)]
    );
    assert_eq!(
        cell_groups_at_column(&model, CellRegion::Body, 5),
        vec![CellGroup::new(3, 5, 4, 5)]
    );
    assert!(cell_groups_at_column(&model, CellRegion::Body, 0).is_empty());

    let pooled = cell_groups_at_regions(&model, &[CellRegion::RowHeader, CellRegion::Body]);
    assert_eq!(pooled.len(), 4);
    assert_eq!(pooled[0], CellGroup::new(0, 0, 1, 1));
}

/// A model that reports an absent group stops the iteration there.
#[test]
fn test_absent_group_ends_iteration() {
    let model = ShortModel::new(
        vec![CellGroup::new(0, 0, 1, 1), CellGroup::new(4, 4, 5, 5)],
        10,
    );
    assert_eq!(cell_groups_at_region(&model, CellRegion::Body).len(), 2);
    assert_eq!(cell_groups_at_row(&model, CellRegion::Body, 4).len(), 1);
    assert!(!are_cells_merged(&model, CellRegion::Body, (8, 8), (9, 9)));
    // Two groups plus the first absent one, no further reads
    model.reads.set(0);
    let _ = cell_groups_at_region(&model, CellRegion::Body);
    assert_eq!(model.reads.get(), 3);
}

// ============================================================================
// JOINS
// ============================================================================

#[test]
fn test_join_identity_and_order_independence() {
    let a = CellGroup::new(3, 0, 4, 2);
    let b = CellGroup::new(0, 5, 1, 6);
    let c = CellGroup::new(7, 1, 9, 1);
    assert_eq!(join_cell_groups(&[a]).unwrap(), a);

    let expected = CellGroup::new(0, 0, 9, 6);
    for order in [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
        assert_eq!(join_cell_groups(&order).unwrap(), expected);
    }
}

#[test]
fn test_join_empty_is_a_programming_error() {
    let err = join_cell_groups(&[]).unwrap_err();
    assert!(matches!(err, DataGridError::EmptyJoin));
}

/// Chained groups: (0,0)-(1,1) and (1,2)-(2,3) share row 1 but no cell.
/// A start group touching both joins all of them.
#[test]
fn test_join_with_merged_follows_chain() {
    let model = body_model(&[CellGroup::new(0, 0, 1, 1), CellGroup::new(1, 2, 2, 3)]);
    let joined = join_cell_groups_with_merged_cell_groups(
        &model,
        &CellGroup::new(1, 1, 1, 2),
        CellRegion::Body,
    );
    assert_eq!(joined, CellGroup::new(0, 0, 2, 3));
}

/// Seeded with one of the pair itself, the 2-D join stops: the groups share
/// row 1 but no column.
#[test]
fn test_join_with_merged_needs_a_shared_cell() {
    let model = body_model(&[CellGroup::new(0, 0, 1, 1), CellGroup::new(1, 2, 2, 3)]);
    let joined = join_cell_groups_with_merged_cell_groups(
        &model,
        &CellGroup::new(0, 0, 1, 1),
        CellRegion::Body,
    );
    assert_eq!(joined, CellGroup::new(0, 0, 1, 1));
}

/// The same chained pair, measured along rows: the row band joins them even
/// though they never overlap in 2-D.
#[test]
fn test_chained_pair_joins_along_shared_rows() {
    let model = body_model(&[CellGroup::new(0, 0, 1, 1), CellGroup::new(1, 2, 2, 3)]);
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(20.0), 0);
    assert_offsets(&offsets, 0.0, 40.0, CellGroup::new(0, 0, 2, 3));
}

#[test]
fn test_join_with_merged_long_chain_in_reverse_order() {
    // (i, i)-(i+1, i+1) for i = 0..20, declared last-to-first
    let groups: Vec<CellGroup> = (0..20).rev().map(|i| CellGroup::new(i, i, i + 1, i + 1)).collect();
    let model = body_model(&groups);
    let joined =
        join_cell_groups_with_merged_cell_groups(&model, &CellGroup::cell(0, 0), CellRegion::Body);
    assert_eq!(joined, CellGroup::new(0, 0, 20, 20));
}

#[test]
fn test_join_with_merged_never_shrinks() {
    let model = body_model(&[CellGroup::new(2, 2, 3, 3)]);
    let start = CellGroup::new(0, 0, 10, 10);
    let joined = join_cell_groups_with_merged_cell_groups(&model, &start, CellRegion::Body);
    assert_eq!(joined, start);
}

#[test]
fn test_join_with_merged_stays_in_region() {
    let model = demo_model();
    let joined =
        join_cell_groups_with_merged_cell_groups(&model, &CellGroup::cell(1, 1), CellRegion::Body);
    assert_eq!(joined, CellGroup::new(1, 1, 2, 2));
    // The row header's (0,0)-(1,1) is not pulled into a body join
    let joined =
        join_cell_groups_with_merged_cell_groups(&model, &CellGroup::cell(0, 0), CellRegion::Body);
    assert_eq!(joined, CellGroup::cell(0, 0));
}

// ============================================================================
// MERGE OFFSETS
// ============================================================================

/// Scenario: body groups (1,1)-(2,2), (5,1)-(5,2), (3,5)-(4,5), rows of 20px.
#[test]
fn test_merge_offsets_demo_row_one() {
    let model = demo_model();
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(20.0), 1);
    assert_offsets(&offsets, 0.0, 20.0, CellGroup::new(1, 1, 2, 2));
}

#[test_case(0 ; "above every group")]
#[test_case(6 ; "between groups")]
#[test_case(19 ; "last row")]
fn test_merge_offsets_unmerged_rows(index: i32) {
    let model = demo_model();
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(20.0), index);
    assert_eq!(offsets, MergeOffsets::NONE);
    assert_eq!(offsets.group, CellGroup::new(-1, -1, -1, -1));
}

#[test_case(Axis::Row, 2, 20.0, 0.0 ; "row 2 at bottom of first group")]
#[test_case(Axis::Row, 4, 20.0, 0.0 ; "row 4 at bottom of column 5 group")]
#[test_case(Axis::Row, 5, 0.0, 0.0 ; "row 5 is a one-row group")]
#[test_case(Axis::Column, 1, 0.0, 20.0 ; "column 1 joins both column 1-2 groups")]
#[test_case(Axis::Column, 5, 0.0, 0.0 ; "column 5 is a one-column group")]
fn test_merge_offsets_demo_model(axis: Axis, index: i32, start: f32, end: f32) {
    let model = demo_model();
    let offsets = calculate_merge_offsets(&model, &[CellRegion::Body], axis, &uniform(20.0), index);
    assert_eq!((offsets.start_offset, offsets.end_offset), (start, end));
    assert!(offsets.is_merged());
}

#[test]
fn test_merge_offsets_column_axis_joins_across_rows() {
    // Column band 1-2 is shared by groups at rows 1-2 and row 5
    let model = demo_model();
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Column, &uniform(50.0), 2);
    assert_offsets(&offsets, 50.0, 0.0, CellGroup::new(1, 1, 5, 2));
}

#[test]
fn test_merge_offsets_with_resized_sections() {
    let model = body_model(&[CellGroup::new(10, 0, 14, 0)]);
    let mut rows = SectionList::new(100, 20.0);
    rows.resize(10, 5.0);
    rows.resize(13, 100.0);
    rows.set_hidden(11, true);
    let offsets = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &rows, 12);
    // rows 10 (5) and 11 (hidden) before; 13 (100) and 14 (20) after
    assert_offsets(&offsets, 5.0, 120.0, CellGroup::new(10, 0, 14, 0));
}

#[test]
fn test_merge_offsets_restart_reaches_skipped_group() {
    // Seeded from (4..5); the far group (0..1) only touches the envelope
    // after (1..4) has been joined, but is declared first.
    let model = body_model(&[
        CellGroup::new(0, 0, 1, 0),
        CellGroup::new(4, 9, 5, 9),
        CellGroup::new(1, 3, 4, 3),
    ]);
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(10.0), 5);
    assert_offsets(&offsets, 50.0, 0.0, CellGroup::new(0, 0, 5, 9));
}

#[test]
fn test_merge_offsets_pool_header_and_body() {
    let model = demo_model();
    // Row header (0,0)-(1,1) and body (1,1)-(2,2) share row 1
    let regions = [CellRegion::Body, CellRegion::RowHeader];
    let offsets = calculate_merge_offsets(&model, &regions, Axis::Row, &uniform(20.0), 0);
    assert_offsets(&offsets, 0.0, 40.0, CellGroup::new(0, 0, 2, 2));

    let body_only =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(20.0), 0);
    assert_eq!(body_only, MergeOffsets::NONE);
}

#[test]
fn test_merge_offsets_at_coordinate_limit() {
    let model = body_model(&[CellGroup::new(i32::MAX - 1, 0, i32::MAX, 0)]);
    let last =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(10.0), i32::MAX);
    assert_offsets(&last, 10.0, 0.0, CellGroup::new(i32::MAX - 1, 0, i32::MAX, 0));

    let first = calculate_merge_offsets(
        &model,
        &[CellRegion::Body],
        Axis::Row,
        &uniform(10.0),
        i32::MAX - 1,
    );
    assert_offsets(&first, 0.0, 10.0, CellGroup::new(i32::MAX - 1, 0, i32::MAX, 0));
}

#[test]
fn test_merge_offsets_empty_region_list() {
    let model = demo_model();
    let offsets = calculate_merge_offsets(&model, &[], Axis::Row, &uniform(20.0), 1);
    assert_eq!(offsets, MergeOffsets::NONE);
}

#[test]
fn test_merge_offsets_on_short_model() {
    let model = ShortModel::new(vec![CellGroup::new(2, 0, 4, 0)], 5);
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(10.0), 3);
    assert_offsets(&offsets, 10.0, 10.0, CellGroup::new(2, 0, 4, 0));
}

#[test]
fn test_merge_offsets_serialize_for_js() {
    let model = demo_model();
    let offsets =
        calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform(20.0), 1);
    let json = serde_json::to_value(offsets).unwrap();
    assert_eq!(json["startOffset"], 0.0);
    assert_eq!(json["endOffset"], 20.0);
    assert_eq!(json["group"]["endRow"], 2);
}
