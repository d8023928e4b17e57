//! Main GridView struct - the entry point for a canvas painter in JavaScript.
//!
//! `GridView` owns a data model, its layout and a viewport. It answers the
//! geometry questions a canvas data grid asks while painting and hit-testing:
//! where a (possibly merged) cell is, which cell sits under the pointer, which
//! merged groups reach into the visible window. Painting itself stays in JS.
//!
//! Every method has a typed Rust form and a `js_`-prefixed WASM export that
//! takes region/axis names as strings and returns values through
//! `serde-wasm-bindgen`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::cellgroup::{calculate_merge_offsets, MergeOffsets};
use crate::config::DefaultSizes;
use crate::error::Result;
use crate::layout::{CellRect, GridLayout, HitTest, Viewport};
use crate::model::StaticModel;
use crate::types::{Axis, CellGroup, CellRegion};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn regions_from_array(regions: &js_sys::Array) -> std::result::Result<Vec<CellRegion>, JsValue> {
    regions
        .iter()
        .map(|value| {
            let name = value
                .as_string()
                .ok_or_else(|| JsValue::from_str("region names must be strings"))?;
            name.parse::<CellRegion>().map_err(to_js_error)
        })
        .collect()
}

/// A data model with its layout and viewport
#[wasm_bindgen]
pub struct GridView {
    model: StaticModel,
    layout: GridLayout,
    viewport: Viewport,
}

impl GridView {
    /// Wrap a model, sizing sections from its default sizes.
    pub fn from_model(model: StaticModel) -> Self {
        let layout = GridLayout::from_model(&model, &model.default_sizes);
        Self {
            model,
            layout,
            viewport: Viewport::new(),
        }
    }

    pub fn model(&self) -> &StaticModel {
        &self.model
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Swap in a new model. Section resizes survive for indices that still
    /// exist.
    pub fn replace_model(&mut self, model: StaticModel) {
        self.model = model;
        self.layout.sync_counts(&self.model);
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Merge offsets along `axis`, measured with the sections of the first
    /// region in `regions` (body when empty).
    pub fn merge_offsets(&self, regions: &[CellRegion], axis: Axis, index: i32) -> MergeOffsets {
        let region = regions.first().copied().unwrap_or(CellRegion::Body);
        calculate_merge_offsets(
            &self.model,
            regions,
            axis,
            self.layout.sections(region, axis),
            index,
        )
    }

    /// Content-coordinate rectangle of a cell, expanded over its merge.
    pub fn cell_rect(&self, region: CellRegion, row: i32, column: i32) -> CellRect {
        self.layout.cell_rect(&self.model, region, row, column)
    }

    /// Screen-coordinate rectangle of a cell, expanded over its merge.
    pub fn screen_rect(&self, region: CellRegion, row: i32, column: i32) -> CellRect {
        let mut rect = self.cell_rect(region, row, column);
        let (x, y) = self.viewport.to_screen(rect.x, rect.y, region);
        rect.x = x;
        rect.y = y;
        rect
    }

    /// Cell under a screen-coordinate point.
    pub fn hit_test(&self, screen_x: f32, screen_y: f32) -> Option<HitTest> {
        let (x, y) = self.viewport.to_content(screen_x, screen_y, &self.layout);
        self.layout.hit_test(&self.model, x, y)
    }

    /// Change the fallback section sizes; explicitly resized sections keep
    /// their size.
    pub fn set_default_sizes(&mut self, sizes: DefaultSizes) {
        self.layout.set_default_sizes(&sizes);
        self.model.default_sizes = sizes;
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Resize one row of `region` (body rows for body and row header).
    pub fn resize_row(&mut self, region: CellRegion, index: i32, size: f32) {
        self.layout
            .sections_mut(region, Axis::Row)
            .resize(index, size);
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Resize one column of `region` (body columns for body and column header).
    pub fn resize_column(&mut self, region: CellRegion, index: i32, size: f32) {
        self.layout
            .sections_mut(region, Axis::Column)
            .resize(index, size);
        self.viewport.clamp_scroll(&self.layout);
    }

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.viewport.scroll_by(delta_x, delta_y, &self.layout);
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.viewport.set_scroll(x, y, &self.layout);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Merged groups of `region` to paint for the current scroll position.
    pub fn visible_merged_groups(&self, region: CellRegion) -> Vec<CellGroup> {
        self.viewport
            .visible_merged_groups(&self.model, &self.layout, region)
    }
}

#[wasm_bindgen]
impl GridView {
    /// Create a view from a JSON model (see [`StaticModel`] for the shape).
    #[wasm_bindgen(constructor)]
    pub fn js_new(model_json: &str) -> std::result::Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let model = StaticModel::from_json(model_json).map_err(to_js_error)?;
        Ok(Self::from_model(model))
    }

    #[wasm_bindgen(js_name = setModel)]
    pub fn js_set_model(&mut self, model_json: &str) -> std::result::Result<(), JsValue> {
        let model = StaticModel::from_json(model_json).map_err(to_js_error)?;
        self.replace_model(model);
        Ok(())
    }

    #[wasm_bindgen(js_name = mergeOffsets)]
    pub fn js_merge_offsets(
        &self,
        regions: &js_sys::Array,
        axis: &str,
        index: i32,
    ) -> std::result::Result<JsValue, JsValue> {
        let regions = regions_from_array(regions)?;
        let axis: Axis = axis.parse().map_err(to_js_error)?;
        to_js(&self.merge_offsets(&regions, axis, index))
    }

    #[wasm_bindgen(js_name = cellRect)]
    pub fn js_cell_rect(
        &self,
        region: &str,
        row: i32,
        column: i32,
    ) -> std::result::Result<JsValue, JsValue> {
        let region: CellRegion = region.parse().map_err(to_js_error)?;
        to_js(&self.screen_rect(region, row, column))
    }

    #[wasm_bindgen(js_name = hitTest)]
    pub fn js_hit_test(&self, x: f32, y: f32) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.hit_test(x, y))
    }

    #[wasm_bindgen(js_name = resizeRow)]
    pub fn js_resize_row(
        &mut self,
        region: &str,
        index: i32,
        size: f32,
    ) -> std::result::Result<(), JsValue> {
        let region: CellRegion = region.parse().map_err(to_js_error)?;
        self.resize_row(region, index, size);
        Ok(())
    }

    #[wasm_bindgen(js_name = resizeColumn)]
    pub fn js_resize_column(
        &mut self,
        region: &str,
        index: i32,
        size: f32,
    ) -> std::result::Result<(), JsValue> {
        let region: CellRegion = region.parse().map_err(to_js_error)?;
        self.resize_column(region, index, size);
        Ok(())
    }

    /// Accepts a partial `{rowHeight, columnWidth, rowHeaderWidth,
    /// columnHeaderHeight}` object; missing fields take the built-in defaults.
    #[wasm_bindgen(js_name = setDefaultSizes)]
    pub fn js_set_default_sizes(&mut self, sizes: JsValue) -> std::result::Result<(), JsValue> {
        let sizes: DefaultSizes = serde_wasm_bindgen::from_value(sizes)
            .map_err(|e| JsValue::from_str(&format!("Invalid sizes: {e}")))?;
        self.set_default_sizes(sizes);
        Ok(())
    }

    #[wasm_bindgen(js_name = scrollBy)]
    pub fn js_scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_by(delta_x, delta_y);
    }

    #[wasm_bindgen(js_name = setScroll)]
    pub fn js_set_scroll(&mut self, x: f32, y: f32) {
        self.set_scroll(x, y);
    }

    #[wasm_bindgen(js_name = resize)]
    pub fn js_resize(&mut self, width: f32, height: f32) {
        self.resize(width, height);
    }

    #[wasm_bindgen(getter, js_name = scrollX)]
    pub fn js_scroll_x(&self) -> f32 {
        self.viewport.scroll_x
    }

    #[wasm_bindgen(getter, js_name = scrollY)]
    pub fn js_scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    #[wasm_bindgen(js_name = visibleMergedGroups)]
    pub fn js_visible_merged_groups(&self, region: &str) -> std::result::Result<JsValue, JsValue> {
        let region: CellRegion = region.parse().map_err(to_js_error)?;
        to_js(&self.visible_merged_groups(region))
    }
}

/// Load a JSON model into a view (native convenience for tools and tests).
pub fn view_from_json(model_json: &str) -> Result<GridView> {
    Ok(GridView::from_model(StaticModel::from_json(model_json)?))
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

    const MODEL: &str = r#"{
        "rowCount": 50,
        "columnCount": 10,
        "defaultSizes": {
            "rowHeight": 20,
            "columnWidth": 50,
            "rowHeaderWidth": 40,
            "columnHeaderHeight": 20
        },
        "groups": {
            "body": [{"startRow": 0, "endRow": 3, "startColumn": 0, "endColumn": 1}]
        }
    }"#;

    #[test]
    fn test_merge_offsets_use_layout_sections() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize_row(CellRegion::Body, 2, 50.0);
        let offsets = view.merge_offsets(&[CellRegion::Body], Axis::Row, 1);
        assert_eq!(offsets.start_offset, 20.0);
        assert_eq!(offsets.end_offset, 70.0);
        assert_eq!(offsets.group, CellGroup::new(0, 0, 3, 1));
    }

    #[test]
    fn test_screen_rect_tracks_scroll() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize(400.0, 200.0);
        view.scroll_by(0.0, 40.0);
        let rect = view.screen_rect(CellRegion::Body, 2, 1);
        // Merge starts at content y = 20 (header), scrolled up by 40
        assert_eq!(rect.y, -20.0);
        assert_eq!(rect.height, 80.0);
        assert!(rect.skip);
    }

    #[test]
    fn test_hit_test_through_viewport() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize(400.0, 200.0);
        view.scroll_by(0.0, 100.0);
        let hit = view.hit_test(45.0, 25.0).unwrap();
        assert_eq!(hit.region, CellRegion::Body);
        assert_eq!((hit.row, hit.column), (5, 0));
        // Row header stays pinned horizontally
        let hit = view.hit_test(10.0, 25.0).unwrap();
        assert_eq!(hit.region, CellRegion::RowHeader);
        assert_eq!(hit.row, 5);
    }

    #[test]
    fn test_replace_model_resyncs() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize(400.0, 200.0);
        view.scroll_by(0.0, 10_000.0);
        view.replace_model(StaticModel::new(5, 2));
        assert_eq!(view.layout().rows.count(), 5);
        assert_eq!(view.viewport().scroll_y, 0.0);
        assert!(view.visible_merged_groups(CellRegion::Body).is_empty());
    }

    #[test]
    fn test_set_default_sizes_moves_cells() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize_row(CellRegion::Body, 5, 100.0);
        view.set_default_sizes(DefaultSizes {
            row_height: 10.0,
            column_width: 30.0,
            row_header_width: 25.0,
            column_header_height: 15.0,
        });
        assert_eq!(view.model().default_sizes.row_height, 10.0);
        let rect = view.cell_rect(CellRegion::Body, 6, 2);
        // 15 header + rows 0-4 at 10 + row 5 at 100
        assert_eq!((rect.x, rect.y), (25.0 + 60.0, 15.0 + 150.0));
        assert_eq!((rect.width, rect.height), (30.0, 10.0));
    }

    #[test]
    fn test_visible_merged_groups_after_scroll() {
        let mut view = view_from_json(MODEL).unwrap();
        view.resize(400.0, 100.0);
        view.set_scroll(0.0, 40.0);
        assert_eq!(
            view.visible_merged_groups(CellRegion::Body),
            vec![CellGroup::new(0, 0, 3, 1)]
        );
        view.set_scroll(0.0, 100.0);
        assert!(view.visible_merged_groups(CellRegion::Body).is_empty());
    }
}
