//! Viewport state: the scrolled window onto the grid body.
//!
//! Headers stay pinned; only the body scrolls. The viewport decides which
//! rows and columns are realized and which merged groups reach into that
//! window from outside it.

use super::GridLayout;
use crate::cellgroup::{cell_groups_at_region, join_cell_groups_with_merged_cell_groups};
use crate::model::DataModel;
use crate::types::{CellGroup, CellRegion};

/// Viewport state - represents the visible area of the grid
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Horizontal scroll position in body coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in body coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels, headers included
    pub width: f32,
    /// Viewport height in pixels, headers included
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    /// Width left for the body once the row header is drawn
    pub fn body_width(&self, layout: &GridLayout) -> f32 {
        (self.width - layout.header_width()).max(0.0)
    }

    /// Height left for the body once the column header is drawn
    pub fn body_height(&self, layout: &GridLayout) -> f32 {
        (self.height - layout.header_height()).max(0.0)
    }

    /// Visible body rows (inclusive), `None` if no row is visible.
    pub fn visible_rows(&self, layout: &GridLayout) -> Option<(i32, i32)> {
        let height = self.body_height(layout);
        if height <= 0.0 {
            return None;
        }
        let start = layout.rows.index_of(self.scroll_y)?;
        let end = layout
            .rows
            .index_of(self.scroll_y + height)
            .unwrap_or(layout.rows.count() - 1);
        Some((start, end.max(start)))
    }

    /// Visible body columns (inclusive), `None` if no column is visible.
    pub fn visible_columns(&self, layout: &GridLayout) -> Option<(i32, i32)> {
        let width = self.body_width(layout);
        if width <= 0.0 {
            return None;
        }
        let start = layout.columns.index_of(self.scroll_x)?;
        let end = layout
            .columns
            .index_of(self.scroll_x + width)
            .unwrap_or(layout.columns.count() - 1);
        Some((start, end.max(start)))
    }

    /// Convert screen coordinates to content coordinates.
    ///
    /// Points over a header are not scrolled along the header's pinned axis.
    pub fn to_content(&self, screen_x: f32, screen_y: f32, layout: &GridLayout) -> (f32, f32) {
        let x = if screen_x < layout.header_width() {
            screen_x
        } else {
            screen_x + self.scroll_x
        };
        let y = if screen_y < layout.header_height() {
            screen_y
        } else {
            screen_y + self.scroll_y
        };
        (x, y)
    }

    /// Convert content coordinates of a cell in `region` to screen coordinates.
    pub fn to_screen(&self, x: f32, y: f32, region: CellRegion) -> (f32, f32) {
        let (scrolls_x, scrolls_y) = match region {
            CellRegion::Body => (true, true),
            CellRegion::RowHeader => (false, true),
            CellRegion::ColumnHeader => (true, false),
            CellRegion::CornerHeader => (false, false),
        };
        (
            if scrolls_x { x - self.scroll_x } else { x },
            if scrolls_y { y - self.scroll_y } else { y },
        )
    }

    /// Clamp scroll position to valid range.
    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        let max_x = (layout.columns.total_size() - self.body_width(layout)).max(0.0);
        let max_y = (layout.rows.total_size() - self.body_height(layout)).max(0.0);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, layout: &GridLayout) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(layout);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, layout: &GridLayout) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(layout);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Cells of `region` currently on screen, as a group.
    ///
    /// Headers are pinned on one axis, so every header row (or column) counts
    /// as visible along it.
    pub fn visible_window(&self, layout: &GridLayout, region: CellRegion) -> Option<CellGroup> {
        let all = |count: i32| if count > 0 { Some((0, count - 1)) } else { None };
        let rows = match region {
            CellRegion::Body | CellRegion::RowHeader => self.visible_rows(layout)?,
            CellRegion::ColumnHeader | CellRegion::CornerHeader => {
                all(layout.header_rows.count())?
            }
        };
        let columns = match region {
            CellRegion::Body | CellRegion::ColumnHeader => self.visible_columns(layout)?,
            CellRegion::RowHeader | CellRegion::CornerHeader => {
                all(layout.header_columns.count())?
            }
        };
        Some(CellGroup::new(rows.0, columns.0, rows.1, columns.1))
    }

    /// Merged groups of `region` that overlap the visible window, each joined
    /// with every group it chains into.
    ///
    /// A painter walking only the visible cells would miss a merge whose
    /// top-left cell is scrolled away; these are the rectangles to draw for
    /// such merges. Groups that chain together are reported once.
    pub fn visible_merged_groups<M: DataModel + ?Sized>(
        &self,
        model: &M,
        layout: &GridLayout,
        region: CellRegion,
    ) -> Vec<CellGroup> {
        let Some(window) = self.visible_window(layout, region) else {
            return Vec::new();
        };
        let mut joined: Vec<CellGroup> = Vec::new();
        for group in cell_groups_at_region(model, region) {
            if !group.intersects(&window) || joined.iter().any(|j| j.intersects(&group)) {
                continue;
            }
            joined.push(join_cell_groups_with_merged_cell_groups(model, &group, region));
        }
        joined
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
    use crate::config::DefaultSizes;
    use crate::model::StaticModel;

    fn layout_for(model: &StaticModel) -> GridLayout {
        GridLayout::from_model(
            model,
            &DefaultSizes {
                row_height: 20.0,
                column_width: 50.0,
                row_header_width: 40.0,
                column_header_height: 20.0,
            },
        )
    }

    fn viewport(width: f32, height: f32) -> Viewport {
        let mut viewport = Viewport::new();
        viewport.resize(width, height);
        viewport
    }

    #[test]
    fn test_visible_ranges() {
        let model = StaticModel::new(100, 20);
        let layout = layout_for(&model);
        // 200px of body each way: 10 rows, 4 columns
        let mut vp = viewport(240.0, 220.0);
        assert_eq!(vp.visible_rows(&layout), Some((0, 10)));
        assert_eq!(vp.visible_columns(&layout), Some((0, 4)));

        vp.set_scroll(75.0, 45.0, &layout);
        assert_eq!(vp.visible_rows(&layout), Some((2, 12)));
        assert_eq!(vp.visible_columns(&layout), Some((1, 5)));
    }

    #[test]
    fn test_visible_ranges_clip_at_end() {
        let model = StaticModel::new(3, 2);
        let layout = layout_for(&model);
        let vp = viewport(800.0, 600.0);
        assert_eq!(vp.visible_rows(&layout), Some((0, 2)));
        assert_eq!(vp.visible_columns(&layout), Some((0, 1)));
    }

    #[test]
    fn test_empty_body_has_no_visible_rows() {
        let model = StaticModel::new(0, 0);
        let layout = layout_for(&model);
        let vp = viewport(800.0, 600.0);
        assert_eq!(vp.visible_rows(&layout), None);
        assert_eq!(vp.visible_window(&layout, CellRegion::Body), None);
    }

    #[test]
    fn test_clamp_scroll() {
        let model = StaticModel::new(10, 10);
        let layout = layout_for(&model);
        let mut vp = viewport(240.0, 120.0);
        vp.scroll_by(-50.0, 10_000.0, &layout);
        assert_eq!(vp.scroll_x, 0.0);
        // 200px of rows, 100px of body height
        assert_eq!(vp.scroll_y, 100.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let model = StaticModel::new(100, 100);
        let layout = layout_for(&model);
        let mut vp = viewport(400.0, 400.0);
        vp.set_scroll(100.0, 60.0, &layout);
        // Over the row header: x pinned, y scrolled
        assert_eq!(vp.to_content(10.0, 50.0, &layout), (10.0, 110.0));
        assert_eq!(vp.to_content(50.0, 50.0, &layout), (150.0, 110.0));
        assert_eq!(
            vp.to_screen(150.0, 110.0, CellRegion::Body),
            (50.0, 50.0)
        );
        assert_eq!(
            vp.to_screen(10.0, 110.0, CellRegion::RowHeader),
            (10.0, 50.0)
        );
    }

    #[test]
    fn test_visible_merged_groups_include_offscreen_origin() {
        let model = StaticModel::new(100, 10)
            .with_group(CellRegion::Body, CellGroup::new(0, 0, 5, 1))
            .unwrap()
            .with_group(CellRegion::Body, CellGroup::new(5, 1, 7, 2))
            .unwrap()
            .with_group(CellRegion::Body, CellGroup::new(50, 0, 51, 0))
            .unwrap();
        let layout = layout_for(&model);
        let mut vp = viewport(240.0, 120.0);
        // Scroll so row 3 is the first visible row
        vp.set_scroll(0.0, 60.0, &layout);
        assert_eq!(vp.visible_rows(&layout), Some((3, 8)));

        let groups = vp.visible_merged_groups(&model, &layout, CellRegion::Body);
        assert_eq!(groups, vec![CellGroup::new(0, 0, 7, 2)]);
    }

    #[test]
    fn test_header_windows_are_pinned() {
        let model = StaticModel::new(100, 100)
            .with_header_rows(2)
            .with_header_columns(3);
        let layout = layout_for(&model);
        let mut vp = viewport(400.0, 400.0);
        vp.set_scroll(500.0, 500.0, &layout);
        let corner = vp.visible_window(&layout, CellRegion::CornerHeader).unwrap();
        assert_eq!(corner, CellGroup::new(0, 0, 1, 2));
        let column_header = vp.visible_window(&layout, CellRegion::ColumnHeader).unwrap();
        assert_eq!((column_header.start_row, column_header.end_row), (0, 1));
        assert_eq!(column_header.start_column, 10);
    }
}
