//! datagrid - merged-cell geometry for virtualized canvas data grids
//!
//! A data model declares rectangles of cells that should render as one
//! merged region. This crate answers the questions a canvas grid asks while
//! painting and hit-testing:
//! - Are two cells merged? Which groups overlap, directly or through a chain?
//! - How far must a cell's rectangle grow to cover its merged band, given
//!   non-uniform and resizable rows and columns?
//! - Which merged groups reach into the visible window of a virtualized grid?
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'datagrid';
//! await init();
//! const view = new GridView(JSON.stringify(model));
//! const rect = view.cellRect('body', 1, 1);
//! ```

pub mod cellgroup;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use cellgroup::MergeOffsets;
pub use config::DefaultSizes;
pub use error::{DataGridError, Result};
pub use layout::{GridLayout, SectionIndex, SectionList, Viewport};
pub use model::{DataModel, StaticModel};
pub use types::*;
pub use viewer::GridView;

/// Merge offsets for one index of a static model, measured with sections at
/// the model's default sizes.
///
/// Sections are those of the first region in `regions` along `axis` (body
/// when `regions` is empty).
pub fn merge_offsets_for_model(
    model: &StaticModel,
    regions: &[CellRegion],
    axis: Axis,
    index: i32,
) -> MergeOffsets {
    let layout = GridLayout::from_model(model, &model.default_sizes);
    let region = regions.first().copied().unwrap_or(CellRegion::Body);
    cellgroup::calculate_merge_offsets(model, regions, axis, layout.sections(region, axis), index)
}

/// Compute merge offsets from a JSON model.
///
/// # Arguments
/// * `model_json` - The model, as accepted by [`StaticModel::from_json`]
/// * `regions` - Comma-separated region names, e.g. `"body,row-header"`
/// * `axis` - `"row"` or `"column"`
/// * `index` - Row or column to measure
///
/// # Errors
/// Returns an error if the model, a region name or the axis is invalid.
#[wasm_bindgen]
pub fn calculate_merge_offsets_json(
    model_json: &str,
    regions: &str,
    axis: &str,
    index: i32,
) -> std::result::Result<JsValue, JsValue> {
    let model = StaticModel::from_json(model_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let regions = parse_regions(regions).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let axis: Axis = axis.parse().map_err(|e: DataGridError| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&merge_offsets_for_model(&model, &regions, axis, index))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
