//! Merged-cell algebra.
//!
//! A data model declares rectangles of cells that render as one. A logical
//! merged region may be declared as several rectangles that overlap or chain
//! into each other, so most queries here follow overlaps transitively and
//! report the envelope of everything reachable. The one exception is
//! [`are_cells_merged`], which only looks for a single group holding both
//! cells.
//!
//! Everything is recomputed from the model on each call. Models can swap
//! their groups between calls, so nothing is cached.

use serde::Serialize;

use crate::error::{DataGridError, Result};
use crate::layout::SectionIndex;
use crate::model::DataModel;
use crate::types::{Axis, CellGroup, CellRegion};

/// Pixel extension of one cell along one axis to cover its merged group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOffsets {
    /// Pixels to extend before the cell's leading edge
    pub start_offset: f32,
    /// Pixels to extend past the cell's trailing edge
    pub end_offset: f32,
    /// Joined group, or [`CellGroup::EMPTY`] when the index is not merged
    pub group: CellGroup,
}

impl MergeOffsets {
    /// The result for an index that takes part in no merge.
    pub const NONE: MergeOffsets = MergeOffsets {
        start_offset: 0.0,
        end_offset: 0.0,
        group: CellGroup::EMPTY,
    };

    pub fn is_merged(&self) -> bool {
        !self.group.is_empty()
    }
}

/// Iterate the groups declared in `region`, stopping at the first absent one.
fn declared_groups<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
) -> impl Iterator<Item = CellGroup> + '_ {
    (0..model.group_count(region)).map_while(move |i| model.group(region, i))
}

/// True if a single group declared in `region` holds both cells.
///
/// Cells that are only connected through a chain of overlapping groups are
/// not reported as merged here.
pub fn are_cells_merged<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
    cell1: (i32, i32),
    cell2: (i32, i32),
) -> bool {
    let (row1, column1) = cell1;
    let (row2, column2) = cell2;
    declared_groups(model, region).any(|g| g.contains(row1, column1) && g.contains(row2, column2))
}

/// Do the two groups overlap on both axes? Shared edges count.
pub fn are_cell_groups_intersecting(group1: &CellGroup, group2: &CellGroup) -> bool {
    group1.intersects(group2)
}

/// Do the two groups overlap along `axis`, whatever their extent on the
/// other axis?
pub fn are_cell_groups_intersecting_at_axis(
    group1: &CellGroup,
    group2: &CellGroup,
    axis: Axis,
) -> bool {
    group1.intersects_at_axis(group2, axis)
}

/// All groups declared in `region`.
pub fn cell_groups_at_region<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
) -> Vec<CellGroup> {
    declared_groups(model, region).collect()
}

/// Groups of every region in `regions`, in region order.
pub fn cell_groups_at_regions<M: DataModel + ?Sized>(
    model: &M,
    regions: &[CellRegion],
) -> Vec<CellGroup> {
    regions
        .iter()
        .flat_map(|&region| declared_groups(model, region))
        .collect()
}

/// Groups declared in `region` whose rows include `row`.
pub fn cell_groups_at_row<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
    row: i32,
) -> Vec<CellGroup> {
    declared_groups(model, region)
        .filter(|g| g.contains_at_axis(Axis::Row, row))
        .collect()
}

/// Groups declared in `region` whose columns include `column`.
pub fn cell_groups_at_column<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
    column: i32,
) -> Vec<CellGroup> {
    declared_groups(model, region)
        .filter(|g| g.contains_at_axis(Axis::Column, column))
        .collect()
}

fn cell_groups_at_axis<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
    axis: Axis,
    index: i32,
) -> Vec<CellGroup> {
    match axis {
        Axis::Row => cell_groups_at_row(model, region, index),
        Axis::Column => cell_groups_at_column(model, region, index),
    }
}

/// First group declared in `region` that contains the cell.
pub fn cell_group_at<M: DataModel + ?Sized>(
    model: &M,
    region: CellRegion,
    row: i32,
    column: i32,
) -> Option<CellGroup> {
    declared_groups(model, region).find(|g| g.contains(row, column))
}

/// Smallest group containing every group in `groups`.
///
/// # Errors
/// Returns [`DataGridError::EmptyJoin`] when `groups` is empty.
pub fn join_cell_groups(groups: &[CellGroup]) -> Result<CellGroup> {
    let (first, rest) = groups.split_first().ok_or(DataGridError::EmptyJoin)?;
    Ok(rest.iter().fold(*first, |joined, g| joined.union(g)))
}

/// Grow `joined` by every group in `pool` that overlaps it, until nothing left
/// in the pool overlaps. Matched groups are removed from the pool.
///
/// The scan restarts after every match: a union can bring the envelope into
/// contact with a group that was already passed over.
fn absorb_intersecting(
    mut joined: CellGroup,
    pool: &mut Vec<CellGroup>,
    intersects: impl Fn(&CellGroup, &CellGroup) -> bool,
) -> CellGroup {
    let mut passes = 0usize;
    while let Some(pos) = pool.iter().position(|g| intersects(&joined, g)) {
        let group = pool.swap_remove(pos);
        joined = joined.union(&group);
        passes += 1;
    }
    log::trace!("joined {passes} groups into {joined:?}");
    joined
}

/// Envelope of `group` and every group in `region` reachable from it through
/// a chain of 2-D overlaps. `group` itself need not be declared.
pub fn join_cell_groups_with_merged_cell_groups<M: DataModel + ?Sized>(
    model: &M,
    group: &CellGroup,
    region: CellRegion,
) -> CellGroup {
    let mut pool = cell_groups_at_region(model, region);
    absorb_intersecting(*group, &mut pool, CellGroup::intersects)
}

/// Compute how far the cell at `index` along `axis` must be extended to cover
/// its merged band.
///
/// Groups of all `regions` are pooled, since regions laid out on the same
/// sections (e.g. body and row header for rows) share a band. Starting from
/// the first group containing `index`, groups are joined while they overlap
/// along `axis` only; their extent on the other axis does not matter. The
/// offsets are the summed sizes of the sections between the joined band's
/// edges and `index`, read from `sections`.
pub fn calculate_merge_offsets<M, S>(
    model: &M,
    regions: &[CellRegion],
    axis: Axis,
    sections: &S,
    index: i32,
) -> MergeOffsets
where
    M: DataModel + ?Sized,
    S: SectionIndex + ?Sized,
{
    let mut merged_cell_groups = cell_groups_at_regions(model, regions);

    let Some(seed) = regions
        .iter()
        .find_map(|&region| cell_groups_at_axis(model, region, axis, index).first().copied())
    else {
        return MergeOffsets::NONE;
    };

    let joined = absorb_intersecting(seed, &mut merged_cell_groups, |a, b| {
        a.intersects_at_axis(b, axis)
    });

    let (min_index, max_index) = joined.span(axis);
    let start_offset: f32 = (min_index..index).map(|k| sections.size_of(k)).sum();
    let end_offset: f32 = (index..=max_index).skip(1).map(|k| sections.size_of(k)).sum();

    log::trace!(
        "{axis} {index} in {regions:?}: offsets ({start_offset}, {end_offset}) for {joined:?}"
    );

    MergeOffsets {
        start_offset,
        end_offset,
        group: joined,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::model::StaticModel;

    fn model_with(region: CellRegion, groups: &[CellGroup]) -> StaticModel {
        let mut model = StaticModel::new(20, 20).with_header_rows(3).with_header_columns(3);
        model.set_groups(region, groups.to_vec()).unwrap();
        model
    }

    fn uniform(_: i32) -> f32 {
        20.0
    }

    #[test]
    fn test_are_cells_merged_single_group() {
        let model = model_with(CellRegion::Body, &[CellGroup::new(1, 1, 2, 2)]);
        assert!(are_cells_merged(&model, CellRegion::Body, (1, 1), (2, 2)));
        assert!(are_cells_merged(&model, CellRegion::Body, (1, 2), (1, 2)));
        assert!(!are_cells_merged(&model, CellRegion::Body, (1, 1), (3, 3)));
        // Other regions have no groups
        assert!(!are_cells_merged(&model, CellRegion::RowHeader, (1, 1), (2, 2)));
    }

    #[test]
    fn test_are_cells_merged_is_not_transitive() {
        // (0,0)-(1,1) and (1,1)-(2,2) overlap at (1,1), but no single group
        // holds both (0,0) and (2,2).
        let model = model_with(
            CellRegion::Body,
            &[CellGroup::new(0, 0, 1, 1), CellGroup::new(1, 1, 2, 2)],
        );
        assert!(!are_cells_merged(&model, CellRegion::Body, (0, 0), (2, 2)));
        assert!(are_cells_merged(&model, CellRegion::Body, (0, 0), (1, 1)));
        assert!(are_cells_merged(&model, CellRegion::Body, (1, 1), (2, 2)));
    }

    #[test]
    fn test_intersection_predicates() {
        let g = CellGroup::new(1, 1, 2, 3);
        assert!(are_cell_groups_intersecting(&g, &g));
        // Shared edge
        assert!(are_cell_groups_intersecting(&g, &CellGroup::new(2, 3, 4, 4)));
        // Same rows, disjoint columns
        let h = CellGroup::new(2, 5, 2, 6);
        assert!(are_cell_groups_intersecting_at_axis(&g, &h, Axis::Row));
        assert!(!are_cell_groups_intersecting_at_axis(&g, &h, Axis::Column));
        assert!(!are_cell_groups_intersecting(&g, &h));
        // Containment in either direction
        let big = CellGroup::new(0, 0, 10, 10);
        assert!(are_cell_groups_intersecting(&g, &big));
        assert!(are_cell_groups_intersecting(&big, &g));
    }

    #[test]
    fn test_region_filters() {
        let groups = [
            CellGroup::new(1, 1, 2, 2),
            CellGroup::new(5, 1, 5, 2),
            CellGroup::new(3, 5, 4, 5),
        ];
        let model = model_with(CellRegion::Body, &groups);
        assert_eq!(cell_groups_at_region(&model, CellRegion::Body), groups.to_vec());
        assert!(cell_groups_at_region(&model, CellRegion::ColumnHeader).is_empty());
        assert_eq!(
            cell_groups_at_row(&model, CellRegion::Body, 2),
            vec![CellGroup::new(1, 1, 2, 2)]
        );
        assert!(cell_groups_at_row(&model, CellRegion::Body, 0).is_empty());
        assert_eq!(
            cell_groups_at_column(&model, CellRegion::Body, 1),
            vec![CellGroup::new(1, 1, 2, 2), CellGroup::new(5, 1, 5, 2)]
        );
        assert_eq!(
            cell_group_at(&model, CellRegion::Body, 4, 5),
            Some(CellGroup::new(3, 5, 4, 5))
        );
        assert_eq!(cell_group_at(&model, CellRegion::Body, 4, 4), None);
    }

    #[test]
    fn test_join_cell_groups() {
        let a = CellGroup::new(0, 3, 1, 4);
        let b = CellGroup::new(4, 0, 5, 1);
        let c = CellGroup::new(2, 2, 2, 8);
        let expected = CellGroup::new(0, 0, 5, 8);
        assert_eq!(join_cell_groups(&[a]).unwrap(), a);
        assert_eq!(join_cell_groups(&[a, b, c]).unwrap(), expected);
        assert_eq!(join_cell_groups(&[c, a, b]).unwrap(), expected);
        assert_eq!(join_cell_groups(&[b, c, a]).unwrap(), expected);
    }

    #[test]
    fn test_join_cell_groups_empty_is_error() {
        assert!(matches!(join_cell_groups(&[]), Err(DataGridError::EmptyJoin)));
    }

    #[test]
    fn test_join_with_merged_follows_chains() {
        let model = model_with(
            CellRegion::Body,
            &[CellGroup::new(0, 0, 1, 1), CellGroup::new(1, 2, 2, 3)],
        );
        // The two groups share row 1 but no cell; starting from a cell that
        // touches both still pulls in both.
        let joined = join_cell_groups_with_merged_cell_groups(
            &model,
            &CellGroup::new(1, 1, 1, 2),
            CellRegion::Body,
        );
        assert_eq!(joined, CellGroup::new(0, 0, 2, 3));
    }

    #[test]
    fn test_join_with_merged_restarts_scan() {
        // Declared order forces the scan to revisit an earlier group: the
        // seed only touches the last group, which then reaches the first.
        let model = model_with(
            CellRegion::Body,
            &[
                CellGroup::new(6, 6, 7, 7),
                CellGroup::new(3, 3, 5, 5),
                CellGroup::new(0, 0, 3, 3),
            ],
        );
        let joined = join_cell_groups_with_merged_cell_groups(
            &model,
            &CellGroup::cell(0, 0),
            CellRegion::Body,
        );
        assert_eq!(joined, CellGroup::new(0, 0, 5, 5));
    }

    #[test]
    fn test_join_with_merged_undeclared_start() {
        let model = model_with(CellRegion::Body, &[CellGroup::new(1, 1, 2, 2)]);
        let lone = CellGroup::cell(9, 9);
        assert_eq!(
            join_cell_groups_with_merged_cell_groups(&model, &lone, CellRegion::Body),
            lone
        );
    }

    #[test]
    fn test_merge_offsets_unmerged_index() {
        let model = model_with(CellRegion::Body, &[CellGroup::new(1, 1, 2, 2)]);
        let offsets = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 7);
        assert_eq!(offsets, MergeOffsets::NONE);
        assert!(!offsets.is_merged());
        assert_eq!(offsets.group, CellGroup::new(-1, -1, -1, -1));
    }

    #[test]
    fn test_merge_offsets_middle_of_band() {
        let model = model_with(CellRegion::Body, &[CellGroup::new(2, 0, 6, 0)]);
        let offsets = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 4);
        assert_eq!(offsets.start_offset, 40.0);
        assert_eq!(offsets.end_offset, 40.0);
        assert_eq!(offsets.group, CellGroup::new(2, 0, 6, 0));
    }

    #[test]
    fn test_merge_offsets_column_axis_uses_column_span() {
        let model = model_with(CellRegion::Body, &[CellGroup::new(0, 3, 0, 7)]);
        let widths = |k: i32| -> f32 { if k == 5 { 100.0 } else { 10.0 } };
        let offsets =
            calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Column, &widths, 4);
        assert_eq!(offsets.start_offset, 10.0);
        assert_eq!(offsets.end_offset, 120.0);
    }

    #[test]
    fn test_merge_offsets_join_ignores_cross_axis() {
        // Rows 1-2 in columns 0-1 and rows 2-4 in columns 8-9 never touch in
        // 2-D, but share row 2, so the row band is 1-4.
        let model = model_with(
            CellRegion::Body,
            &[CellGroup::new(1, 0, 2, 1), CellGroup::new(2, 8, 4, 9)],
        );
        let offsets = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 1);
        assert_eq!(offsets.start_offset, 0.0);
        assert_eq!(offsets.end_offset, 60.0);
        assert_eq!(offsets.group, CellGroup::new(1, 0, 4, 9));
    }

    #[test]
    fn test_merge_offsets_pools_regions() {
        let mut model = model_with(CellRegion::Body, &[CellGroup::new(3, 0, 4, 0)]);
        model
            .set_groups(CellRegion::RowHeader, vec![CellGroup::new(4, 0, 6, 1)])
            .unwrap();
        let regions = [CellRegion::Body, CellRegion::RowHeader];
        let offsets = calculate_merge_offsets(&model, &regions, Axis::Row, &uniform, 3);
        assert_eq!(offsets.end_offset, 60.0);
        assert_eq!(offsets.group, CellGroup::new(3, 0, 6, 1));

        // Body alone stops at row 4
        let body_only =
            calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 3);
        assert_eq!(body_only.end_offset, 20.0);
    }

    #[test]
    fn test_merge_offsets_sees_model_changes() {
        let mut model = model_with(CellRegion::Body, &[CellGroup::new(0, 0, 1, 0)]);
        let before = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 0);
        assert_eq!(before.end_offset, 20.0);

        model.set_groups(CellRegion::Body, Vec::new()).unwrap();
        let after = calculate_merge_offsets(&model, &[CellRegion::Body], Axis::Row, &uniform, 0);
        assert_eq!(after, MergeOffsets::NONE);
    }
}
