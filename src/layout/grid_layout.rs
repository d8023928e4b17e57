//! Geometry of the four grid regions.
//!
//! The layout owns the section lists for body rows and columns and for the
//! header rows and columns. It never stores merge groups: every merged
//! rectangle is derived from the model at the time it is asked for.

use serde::Serialize;

use super::{SectionIndex, SectionList};
use crate::cellgroup::{calculate_merge_offsets, cell_group_at, cell_groups_at_region};
use crate::config::DefaultSizes;
use crate::model::DataModel;
use crate::types::{Axis, CellRegion, ColumnRegion, RowRegion};

/// Section lists for every region of a grid
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Body rows, shared with the row header
    pub rows: SectionList,
    /// Body columns, shared with the column header
    pub columns: SectionList,
    /// Rows of the column header, shared with the corner header
    pub header_rows: SectionList,
    /// Columns of the row header, shared with the corner header
    pub header_columns: SectionList,
}

/// Rectangle of a cell in grid content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the cell
    pub width: f32,
    /// Height of the cell
    pub height: f32,
    /// Inclusive rows covered by the rectangle
    pub rows: (i32, i32),
    /// Inclusive columns covered by the rectangle
    pub columns: (i32, i32),
    /// True if this cell should be skipped (part of merge but not origin)
    pub skip: bool,
}

impl CellRect {
    /// True when the rectangle spans more than one cell
    pub fn is_merged(&self) -> bool {
        self.rows.0 != self.rows.1 || self.columns.0 != self.columns.1
    }
}

/// Cell found under a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitTest {
    pub region: CellRegion,
    pub row: i32,
    pub column: i32,
    /// Rectangle of the cell, expanded to its merged group
    pub rect: CellRect,
}

impl GridLayout {
    /// Create an empty layout (no rows or columns) with the given sizes.
    pub fn new(sizes: &DefaultSizes) -> Self {
        Self {
            rows: SectionList::new(0, sizes.row_height),
            columns: SectionList::new(0, sizes.column_width),
            header_rows: SectionList::new(0, sizes.column_header_height),
            header_columns: SectionList::new(0, sizes.row_header_width),
        }
    }

    /// Create a layout sized for `model`.
    pub fn from_model<M: DataModel + ?Sized>(model: &M, sizes: &DefaultSizes) -> Self {
        let mut layout = Self::new(sizes);
        layout.sync_counts(model);
        layout
    }

    /// Match section counts to the model after it changed shape.
    pub fn sync_counts<M: DataModel + ?Sized>(&mut self, model: &M) {
        self.rows.set_count(model.row_count(RowRegion::Body));
        self.columns.set_count(model.column_count(ColumnRegion::Body));
        self.header_rows
            .set_count(model.row_count(RowRegion::ColumnHeader));
        self.header_columns
            .set_count(model.column_count(ColumnRegion::RowHeader));
        log::debug!(
            "layout synced: {}x{} body, {} header rows, {} header columns",
            self.rows.count(),
            self.columns.count(),
            self.header_rows.count(),
            self.header_columns.count()
        );
    }

    /// Sections that lay out `region` along `axis`.
    /// Change the size every section without an explicit size falls back to.
    pub fn set_default_sizes(&mut self, sizes: &DefaultSizes) {
        self.rows.set_default_size(sizes.row_height);
        self.columns.set_default_size(sizes.column_width);
        self.header_rows.set_default_size(sizes.column_header_height);
        self.header_columns.set_default_size(sizes.row_header_width);
    }

    pub fn sections(&self, region: CellRegion, axis: Axis) -> &SectionList {
        match axis {
            Axis::Row => match region.row_region() {
                RowRegion::Body => &self.rows,
                RowRegion::ColumnHeader => &self.header_rows,
            },
            Axis::Column => match region.column_region() {
                ColumnRegion::Body => &self.columns,
                ColumnRegion::RowHeader => &self.header_columns,
            },
        }
    }

    pub fn sections_mut(&mut self, region: CellRegion, axis: Axis) -> &mut SectionList {
        match axis {
            Axis::Row => match region.row_region() {
                RowRegion::Body => &mut self.rows,
                RowRegion::ColumnHeader => &mut self.header_rows,
            },
            Axis::Column => match region.column_region() {
                ColumnRegion::Body => &mut self.columns,
                ColumnRegion::RowHeader => &mut self.header_columns,
            },
        }
    }

    /// Width of the row header
    pub fn header_width(&self) -> f32 {
        self.header_columns.total_size()
    }

    /// Height of the column header
    pub fn header_height(&self) -> f32 {
        self.header_rows.total_size()
    }

    /// Width of headers plus body
    pub fn total_width(&self) -> f32 {
        self.header_width() + self.columns.total_size()
    }

    /// Height of headers plus body
    pub fn total_height(&self) -> f32 {
        self.header_height() + self.rows.total_size()
    }

    /// Top-left corner of `region` in content coordinates.
    pub fn region_origin(&self, region: CellRegion) -> (f32, f32) {
        let x = match region.column_region() {
            ColumnRegion::Body => self.header_width(),
            ColumnRegion::RowHeader => 0.0,
        };
        let y = match region.row_region() {
            RowRegion::Body => self.header_height(),
            RowRegion::ColumnHeader => 0.0,
        };
        (x, y)
    }

    /// Rectangle of a single cell, ignoring merges
    pub fn plain_cell_rect(&self, region: CellRegion, row: i32, column: i32) -> CellRect {
        let (origin_x, origin_y) = self.region_origin(region);
        let rows = self.sections(region, Axis::Row);
        let columns = self.sections(region, Axis::Column);
        CellRect {
            x: origin_x + columns.offset_of(column),
            y: origin_y + rows.offset_of(row),
            width: columns.size_of(column),
            height: rows.size_of(row),
            rows: (row, row),
            columns: (column, column),
            skip: false,
        }
    }

    /// Rectangle of a cell, expanded to cover its merged group.
    ///
    /// Cells that belong to no group declared in their region get their plain
    /// rectangle. For merged cells each axis is extended independently by the
    /// band the cell's row (or column) belongs to, joined across the regions
    /// that share that axis' sections.
    pub fn cell_rect<M: DataModel + ?Sized>(
        &self,
        model: &M,
        region: CellRegion,
        row: i32,
        column: i32,
    ) -> CellRect {
        let mut rect = self.plain_cell_rect(region, row, column);
        if cell_group_at(model, region, row, column).is_none() {
            return rect;
        }

        let row_merge = calculate_merge_offsets(
            model,
            &region.aligned_regions(Axis::Row),
            Axis::Row,
            self.sections(region, Axis::Row),
            row,
        );
        let column_merge = calculate_merge_offsets(
            model,
            &region.aligned_regions(Axis::Column),
            Axis::Column,
            self.sections(region, Axis::Column),
            column,
        );

        rect.y -= row_merge.start_offset;
        rect.height += row_merge.start_offset + row_merge.end_offset;
        rect.x -= column_merge.start_offset;
        rect.width += column_merge.start_offset + column_merge.end_offset;
        if row_merge.is_merged() {
            rect.rows = row_merge.group.span(Axis::Row);
        }
        if column_merge.is_merged() {
            rect.columns = column_merge.group.span(Axis::Column);
        }
        rect.skip = (row, column) != (rect.rows.0, rect.columns.0);
        rect
    }

    /// Region under a content-coordinate point, with the point translated
    /// into that region's local coordinates.
    pub fn region_at(&self, x: f32, y: f32) -> Option<(CellRegion, f32, f32)> {
        if x < 0.0 || y < 0.0 || x >= self.total_width() || y >= self.total_height() {
            return None;
        }
        let header_width = self.header_width();
        let header_height = self.header_height();
        let region = match (x < header_width, y < header_height) {
            (true, true) => CellRegion::CornerHeader,
            (true, false) => CellRegion::RowHeader,
            (false, true) => CellRegion::ColumnHeader,
            (false, false) => CellRegion::Body,
        };
        let (origin_x, origin_y) = self.region_origin(region);
        Some((region, x - origin_x, y - origin_y))
    }

    /// Find the cell under a content-coordinate point.
    pub fn hit_test<M: DataModel + ?Sized>(&self, model: &M, x: f32, y: f32) -> Option<HitTest> {
        let (region, local_x, local_y) = self.region_at(x, y)?;
        let row = self.sections(region, Axis::Row).index_of(local_y)?;
        let column = self.sections(region, Axis::Column).index_of(local_x)?;
        Some(HitTest {
            region,
            row,
            column,
            rect: self.cell_rect(model, region, row, column),
        })
    }

    /// Grid-line segments to leave out because they cross a merged group.
    ///
    /// `axis` names the sections whose boundaries the lines sit on:
    /// `Axis::Column` gives the vertical lines between columns, `Axis::Row`
    /// the horizontal lines between rows. Entry `b` holds the half-open spans
    /// along the other axis to skip on boundary `b`, sorted and coalesced.
    pub fn grid_line_skips<M: DataModel + ?Sized>(
        &self,
        model: &M,
        region: CellRegion,
        axis: Axis,
    ) -> Vec<Vec<(i32, i32)>> {
        let last = self.sections(region, axis).count();
        let boundaries = usize::try_from(last).unwrap_or(0) + 1;
        let mut skips: Vec<Vec<(i32, i32)>> = vec![Vec::new(); boundaries];

        for group in cell_groups_at_region(model, region) {
            let (start, end) = group.span(axis);
            let (cross_start, cross_end) = group.span(axis.cross());
            for boundary in (start..=end.min(last)).skip(1) {
                if let Some(list) = usize::try_from(boundary)
                    .ok()
                    .and_then(|b| skips.get_mut(b))
                {
                    list.push((cross_start, cross_end.saturating_add(1)));
                }
            }
        }

        for spans in &mut skips {
            coalesce_spans(spans);
        }
        skips
    }
}

/// Sort half-open spans and fold each one into the previous span it touches.
fn coalesce_spans(spans: &mut Vec<(i32, i32)>) {
    spans.sort_unstable();
    spans.dedup_by(|next, kept| {
        let touches = next.0 <= kept.1;
        if touches {
            kept.1 = kept.1.max(next.1);
        }
        touches
    });
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
    use crate::types::CellGroup;

    fn sizes() -> DefaultSizes {
        DefaultSizes {
            row_height: 20.0,
            column_width: 50.0,
            row_header_width: 40.0,
            column_header_height: 10.0,
        }
    }

    fn model() -> StaticModel {
        StaticModel::new(10, 5)
            .with_header_rows(2)
            .with_header_columns(1)
            .with_group(CellRegion::Body, CellGroup::new(1, 1, 2, 2))
            .unwrap()
    }

    #[test]
    fn test_basic_layout() {
        let layout = GridLayout::from_model(&model(), &sizes());
        assert_eq!(layout.header_width(), 40.0);
        assert_eq!(layout.header_height(), 20.0);
        assert_eq!(layout.total_width(), 40.0 + 250.0);
        assert_eq!(layout.total_height(), 20.0 + 200.0);
        assert_eq!(layout.region_origin(CellRegion::Body), (40.0, 20.0));
        assert_eq!(layout.region_origin(CellRegion::RowHeader), (0.0, 20.0));
        assert_eq!(layout.region_origin(CellRegion::ColumnHeader), (40.0, 0.0));
        assert_eq!(layout.region_origin(CellRegion::CornerHeader), (0.0, 0.0));
    }

    #[test]
    fn test_plain_cell_rect() {
        let model = model();
        let layout = GridLayout::from_model(&model, &sizes());
        let rect = layout.cell_rect(&model, CellRegion::Body, 0, 0);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (40.0, 20.0, 50.0, 20.0));
        assert!(!rect.skip);
        assert!(!rect.is_merged());

        let rect = layout.cell_rect(&model, CellRegion::ColumnHeader, 1, 3);
        assert_eq!((rect.x, rect.y), (40.0 + 150.0, 10.0));
    }

    #[test]
    fn test_merged_cells() {
        let model = model();
        let layout = GridLayout::from_model(&model, &sizes());

        // Origin cell covers the whole group
        let origin = layout.cell_rect(&model, CellRegion::Body, 1, 1);
        assert!(!origin.skip);
        assert!(origin.is_merged());
        assert_eq!(origin.x, 40.0 + 50.0);
        assert_eq!(origin.y, 20.0 + 20.0);
        assert_eq!(origin.width, 100.0);
        assert_eq!(origin.height, 40.0);
        assert_eq!(origin.rows, (1, 2));
        assert_eq!(origin.columns, (1, 2));

        // Every other member reports the same rectangle and is skipped
        for (row, column) in [(1, 2), (2, 1), (2, 2)] {
            let rect = layout.cell_rect(&model, CellRegion::Body, row, column);
            assert!(rect.skip);
            assert_eq!((rect.x, rect.y, rect.width, rect.height), (90.0, 40.0, 100.0, 40.0));
        }
    }

    #[test]
    fn test_merged_cell_follows_resize() {
        let model = model();
        let mut layout = GridLayout::from_model(&model, &sizes());
        layout.rows.resize(2, 35.0);
        layout.columns.resize(1, 10.0);
        let rect = layout.cell_rect(&model, CellRegion::Body, 2, 2);
        assert_eq!(rect.height, 55.0);
        assert_eq!(rect.width, 60.0);
        assert_eq!(rect.x, 40.0 + 50.0);
    }

    #[test]
    fn test_row_header_group_extends_rows() {
        let mut model = model();
        model
            .add_group(CellRegion::RowHeader, CellGroup::new(0, 0, 1, 0))
            .unwrap();
        let layout = GridLayout::from_model(&model, &sizes());
        let rect = layout.cell_rect(&model, CellRegion::RowHeader, 0, 0);
        // Row header rows 0-1 pool with the body group on rows 1-2
        assert_eq!(rect.rows, (0, 2));
        assert_eq!(rect.height, 60.0);
        assert_eq!(rect.width, 40.0);
    }

    #[test]
    fn test_region_at() {
        let layout = GridLayout::from_model(&model(), &sizes());
        assert_eq!(layout.region_at(5.0, 5.0), Some((CellRegion::CornerHeader, 5.0, 5.0)));
        assert_eq!(layout.region_at(5.0, 25.0), Some((CellRegion::RowHeader, 5.0, 5.0)));
        assert_eq!(layout.region_at(45.0, 5.0), Some((CellRegion::ColumnHeader, 5.0, 5.0)));
        assert_eq!(layout.region_at(45.0, 25.0), Some((CellRegion::Body, 5.0, 5.0)));
        assert_eq!(layout.region_at(-1.0, 0.0), None);
        assert_eq!(layout.region_at(1000.0, 0.0), None);
    }

    #[test]
    fn test_hit_test_merged() {
        let model = model();
        let layout = GridLayout::from_model(&model, &sizes());
        // Inside body cell (2, 2)
        let hit = layout.hit_test(&model, 40.0 + 120.0, 20.0 + 50.0).unwrap();
        assert_eq!(hit.region, CellRegion::Body);
        assert_eq!((hit.row, hit.column), (2, 2));
        assert_eq!(hit.rect.rows, (1, 2));
        assert!(hit.rect.skip);
    }

    #[test]
    fn test_grid_line_skips() {
        let model = model();
        let layout = GridLayout::from_model(&model, &sizes());

        let vertical = layout.grid_line_skips(&model, CellRegion::Body, Axis::Column);
        assert_eq!(vertical.len(), 6);
        assert_eq!(vertical[2], vec![(1, 3)]);
        assert!(vertical[1].is_empty());
        assert!(vertical[3].is_empty());

        let horizontal = layout.grid_line_skips(&model, CellRegion::Body, Axis::Row);
        assert_eq!(horizontal.len(), 11);
        assert_eq!(horizontal[2], vec![(1, 3)]);
    }

    #[test]
    fn test_set_default_sizes_keeps_overrides() {
        let model = model();
        let mut layout = GridLayout::from_model(&model, &sizes());
        layout.rows.resize(1, 50.0);
        layout.set_default_sizes(&DefaultSizes {
            row_height: 30.0,
            column_width: 60.0,
            row_header_width: 20.0,
            column_header_height: 15.0,
        });
        assert_eq!(layout.header_width(), 20.0);
        assert_eq!(layout.header_height(), 30.0);
        assert_eq!(layout.rows.size_of(0), 30.0);
        assert_eq!(layout.rows.size_of(1), 50.0);
        // Merged origin (1,1)-(2,2): rows 50 + 30, columns 60 + 60
        let rect = layout.cell_rect(&model, CellRegion::Body, 1, 1);
        assert_eq!((rect.width, rect.height), (120.0, 80.0));
    }

    #[test]
    fn test_coalesce_spans() {
        let mut spans = vec![(5, 7), (0, 2), (1, 3), (7, 9), (12, 13)];
        coalesce_spans(&mut spans);
        assert_eq!(spans, vec![(0, 3), (5, 9), (12, 13)]);
    }

    #[test]
    fn test_grid_line_skips_at_coordinate_limit() {
        let model = StaticModel::new(10, 5)
            .with_group(CellRegion::Body, CellGroup::new(0, 0, 1, i32::MAX))
            .unwrap();
        let layout = GridLayout::from_model(&model, &sizes());

        let horizontal = layout.grid_line_skips(&model, CellRegion::Body, Axis::Row);
        assert_eq!(horizontal[1], vec![(0, i32::MAX)]);

        // Boundaries past the last column are not visited
        let vertical = layout.grid_line_skips(&model, CellRegion::Body, Axis::Column);
        assert_eq!(vertical.len(), 6);
        assert!(vertical[1..].iter().all(|spans| spans == &vec![(0, 2)]));
    }

    #[test]
    fn test_sync_counts_after_model_change() {
        let mut model = model();
        let mut layout = GridLayout::from_model(&model, &sizes());
        model.row_count = 3;
        layout.sync_counts(&model);
        assert_eq!(layout.rows.count(), 3);
        assert_eq!(layout.rows.total_size(), 60.0);
    }
}
